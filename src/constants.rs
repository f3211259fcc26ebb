/// Character set assumed when a caller does not name one.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Prefix used to synthesize a binding name for parameters without a name hint.
///
/// The zero-based parameter index is appended, e.g. `argument0`.
pub const ARGUMENT_PREFIX: &str = "argument";

/// Separator between a namespace and a property or map key (`user.name`).
pub const DEFAULT_PROPERTY_SEPARATOR: &str = ".";

/// Opening delimiter for indexed collection elements (`items[0]`).
pub const DEFAULT_INDEX_OPEN: &str = "[";

/// Closing delimiter for indexed collection elements (`items[0]`).
pub const DEFAULT_INDEX_CLOSE: &str = "]";

// Wire header field names
pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_DISPOSITION: &str = "Content-Disposition";
