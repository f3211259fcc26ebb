use crate::constants::DEFAULT_COPY_BUFFER_SIZE;
use courier::binding::NamingConvention;
use serde::Deserialize;

/// Construction-time settings shared by the formatters.
///
/// Deserializable with every field optional, so a host can embed it in its own
/// configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Route JSON output through the caller's charset instead of writing the
    /// codec's UTF-8 bytes directly.
    pub transcoding: bool,

    /// Buffer size used when streaming file payloads.
    pub copy_buffer_size: usize,

    /// Addressing of nested binding targets in URL-form bodies.
    pub naming: NamingConvention,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            transcoding: false,
            copy_buffer_size: DEFAULT_COPY_BUFFER_SIZE,
            naming: NamingConvention::default(),
        }
    }
}

impl FormatterConfig {
    pub fn with_transcoding(mut self, transcoding: bool) -> Self {
        self.transcoding = transcoding;
        self
    }

    pub fn with_naming(mut self, naming: NamingConvention) -> Self {
        self.naming = naming;
        self
    }
}
