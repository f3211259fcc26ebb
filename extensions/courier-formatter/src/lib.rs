pub mod constants;

mod config;
pub use config::*;

pub mod error;

mod formatter_interface;
pub use formatter_interface::*;

mod payload;
pub use payload::*;

mod json_codec;
pub use json_codec::*;

mod content_type_sniffer;
pub use content_type_sniffer::*;

mod charset;

mod json_formatter;
pub use json_formatter::*;

mod url_formatter;
pub use url_formatter::*;

mod formatter_registry;
pub use formatter_registry::*;

#[cfg(feature = "tokio_support")]
mod blocking;
#[cfg(feature = "tokio_support")]
pub use blocking::*;
