mod content_type;
mod header_map;

pub use content_type::ContentType;
pub use header_map::Header;
