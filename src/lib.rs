pub mod binding;
pub mod constants;
pub mod header;
