use crate::constants::SNIFF_HEAD_SIZE;
use once_cell::sync::Lazy;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Detects candidate content types of a file, most likely first.
///
/// Detection never fails: an unreadable or unrecognized file yields an empty
/// list and the caller picks a fallback.
pub trait ContentTypeSniffer: Send + Sync {
    fn sniff(&self, path: &Path) -> Vec<String>;
}

/// Process-wide magic-number matchers, built on first use.
///
/// Every formatter shares this table, so concurrent construction registers the
/// extra matchers exactly once.
static MAGIC: Lazy<infer::Infer> = Lazy::new(|| {
    let mut matchers = infer::Infer::new();
    matchers.add("image/svg+xml", "svg", is_svg);
    tracing::debug!("registered magic content type matchers");
    matchers
});

fn is_svg(buf: &[u8]) -> bool {
    let head = String::from_utf8_lossy(&buf[..buf.len().min(512)]);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

/// Sniffs by inspecting the leading bytes of the file.
#[derive(Debug, Clone, Copy)]
pub struct MagicSniffer;

impl MagicSniffer {
    pub fn new() -> Self {
        Lazy::force(&MAGIC);
        Self
    }
}

impl Default for MagicSniffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTypeSniffer for MagicSniffer {
    fn sniff(&self, path: &Path) -> Vec<String> {
        let mut head = Vec::new();
        let read = File::open(path)
            .and_then(|file| file.take(SNIFF_HEAD_SIZE).read_to_end(&mut head));

        if let Err(e) = read {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "could not read file head for content type detection"
            );
            return Vec::new();
        }

        MAGIC
            .get(&head)
            .map(|kind| vec![kind.mime_type().to_string()])
            .unwrap_or_default()
    }
}

/// Answers every file with a fixed list of candidates.
#[derive(Debug, Clone, Default)]
pub struct StaticSniffer {
    candidates: Vec<String>,
}

impl StaticSniffer {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }
}

impl ContentTypeSniffer for StaticSniffer {
    fn sniff(&self, _path: &Path) -> Vec<String> {
        self.candidates.clone()
    }
}

impl<F> ContentTypeSniffer for F
where
    F: Fn(&Path) -> Vec<String> + Send + Sync,
{
    fn sniff(&self, path: &Path) -> Vec<String> {
        self(path)
    }
}

#[cfg(test)]
mod tests {
    use super::is_svg;

    #[test]
    fn recognizes_svg_documents() {
        assert!(is_svg(b"<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>"));
        assert!(is_svg(b"<?xml version=\"1.0\"?>\n<svg></svg>"));
        assert!(!is_svg(b"<?xml version=\"1.0\"?><note/>"));
        assert!(!is_svg(b"plain text"));
    }
}
