/// Algorithm identifier of [`JsonFormatter`](crate::JsonFormatter).
pub const JSON_ALGORITHM: &str = "application/json";

/// Algorithm identifier of [`UrlFormatter`](crate::UrlFormatter).
pub const URL_ALGORITHM: &str = "application/url";

/// Content type sent for a file whose type could not be detected.
pub const FILE_CONTENT_TYPE: &str = "file";

/// Files of this top-level type are left inline instead of sent as attachments.
pub const INLINE_CONTENT_TYPE_PREFIX: &str = "image/";

pub const DEFAULT_COPY_BUFFER_SIZE: usize = 8 * 1024;

/// How many leading bytes of a file are inspected for magic numbers.
pub const SNIFF_HEAD_SIZE: u64 = 8 * 1024;
