//! Decode stage: raw input file → ordered line sequence.
//!
//! Decoding is strict: if the bytes are malformed under the chosen encoding,
//! the conversion fails with [`ConvertError::Decode`] rather than silently
//! substituting replacement characters. A mangled document that *looks*
//! successful is worse than an error the uploader can act on.

use crate::config::{ConversionConfig, EncodingPolicy};
use crate::detect::detect_encoding;
use crate::error::ConvertError;
use encoding_rs::Encoding;
use std::path::Path;
use tracing::debug;

/// The decoded source text: ordered lines, each stripped of trailing
/// whitespace, plus the encoding they were decoded under.
#[derive(Debug)]
pub struct SourceDocument {
    pub lines: Vec<String>,
    pub encoding: &'static Encoding,
}

impl SourceDocument {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Read and decode the input file into a [`SourceDocument`].
pub fn read_source(
    path: &Path,
    config: &ConversionConfig,
) -> Result<SourceDocument, ConvertError> {
    let bytes = std::fs::read(path).map_err(|e| ConvertError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let encoding = resolve_encoding(&bytes, &config.encoding)?;

    // `decode` also sniffs the BOM, so the encoding actually used may
    // differ from the resolved one (e.g. a UTF-16 BOM under a UTF-8 label).
    let (text, used, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(ConvertError::Decode {
            path: path.to_path_buf(),
            encoding: used.name(),
        });
    }

    debug!(
        "decoded {} ({} bytes) as {}",
        path.display(),
        bytes.len(),
        used.name()
    );

    let lines = text
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect();

    Ok(SourceDocument {
        lines,
        encoding: used,
    })
}

/// Resolve the encoding policy against the actual file content.
fn resolve_encoding(
    bytes: &[u8],
    policy: &EncodingPolicy,
) -> Result<&'static Encoding, ConvertError> {
    match policy {
        EncodingPolicy::Detect => {
            Ok(detect_encoding(bytes).unwrap_or(encoding_rs::WINDOWS_1252))
        }
        EncodingPolicy::Fixed(label) => {
            Encoding::for_label(label.as_bytes()).ok_or_else(|| {
                ConvertError::InvalidConfig(format!("unknown encoding label '{label}'"))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConversionConfig;
    use std::io::Write;

    fn write_temp(content: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content).unwrap();
        f
    }

    #[test]
    fn lines_are_split_and_stripped() {
        let f = write_temp(b"Hello   \nWorld\t\n");
        let doc = read_source(f.path(), &ConversionConfig::default()).unwrap();
        assert_eq!(doc.lines, vec!["Hello", "World"]);
        assert_eq!(doc.encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn empty_file_yields_empty_document() {
        let f = write_temp(b"");
        let doc = read_source(f.path(), &ConversionConfig::default()).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn latin1_content_decodes_under_detection() {
        let f = write_temp(b"caf\xE9\n");
        let doc = read_source(f.path(), &ConversionConfig::default()).unwrap();
        assert_eq!(doc.lines, vec!["caf\u{e9}"]);
        assert_eq!(doc.encoding, encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn fixed_utf8_rejects_invalid_bytes() {
        let f = write_temp(b"caf\xE9\n");
        let config = ConversionConfig::builder()
            .encoding(EncodingPolicy::Fixed("utf-8".to_string()))
            .build()
            .unwrap();
        let err = read_source(f.path(), &config).unwrap_err();
        assert!(matches!(err, ConvertError::Decode { .. }), "got: {err}");
    }

    #[test]
    fn unknown_fixed_label_is_a_config_error() {
        let f = write_temp(b"hello\n");
        let config = ConversionConfig::builder()
            .encoding(EncodingPolicy::Fixed("klingon-8".to_string()))
            .build()
            .unwrap();
        let err = read_source(f.path(), &config).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidConfig(_)), "got: {err}");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_source(
            Path::new("/definitely/not/a/real/file.txt"),
            &ConversionConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::Read { .. }), "got: {err}");
    }

    #[test]
    fn utf16_bom_overrides_fixed_utf8_label() {
        let f = write_temp(b"\xFF\xFEH\x00i\x00");
        let config = ConversionConfig::builder()
            .encoding(EncodingPolicy::Fixed("utf-8".to_string()))
            .build()
            .unwrap();
        let doc = read_source(f.path(), &config).unwrap();
        assert_eq!(doc.lines, vec!["Hi"]);
        assert_eq!(doc.encoding, encoding_rs::UTF_16LE);
    }
}
