//! Conversion entry points.
//!
//! The whole pipeline (read, decode, lay out, render, write) is a single
//! blocking pass with no retries and no partial-completion state. The async
//! [`convert`] wrapper moves that pass onto the blocking thread pool so a
//! request handler can await it without stalling the runtime.
//!
//! Output is written atomically: bytes land in a temp file next to the
//! destination and are renamed into place only after a complete, successful
//! serialisation. A failed conversion therefore never leaves a truncated
//! PDF at the output path.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::output::ConversionStats;
use crate::pipeline::{decode, layout, render};
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Convert a text file at `input` into a PDF at `output`.
///
/// The conversion runs on the blocking thread pool; the input file is never
/// modified. On success the returned [`ConversionStats`] describe the
/// written document.
///
/// # Errors
/// - [`ConvertError::Read`] / [`ConvertError::Decode`]: input unreadable,
///   or not valid text under the chosen encoding
/// - [`ConvertError::Render`] / [`ConvertError::Write`]: PDF serialisation
///   failed, or the output path could not be written
pub async fn convert(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, ConvertError> {
    let input = input.as_ref().to_path_buf();
    let output = output.as_ref().to_path_buf();
    let config = config.clone();

    tokio::task::spawn_blocking(move || convert_sync(&input, &output, &config))
        .await
        .map_err(|e| ConvertError::Internal(format!("conversion task failed: {e}")))?
}

/// Blocking variant of [`convert`], usable without a tokio runtime.
pub fn convert_sync(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, ConvertError> {
    let start = Instant::now();
    let input = input.as_ref();
    let output = output.as_ref();

    let source = decode::read_source(input, config)?;
    let pages = layout::paginate(&source, config);
    let row_count = pages.iter().map(|p| p.rows.len()).sum();

    let title = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let bytes = render::render(&pages, title, config)?;

    write_atomic(output, &bytes)?;

    let stats = ConversionStats {
        line_count: source.lines.len(),
        row_count,
        page_count: pages.len(),
        encoding: source.encoding.name().to_string(),
        bytes_written: bytes.len() as u64,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "converted {} -> {} ({} lines, {} pages, {}, {}ms)",
        input.display(),
        output.display(),
        stats.line_count,
        stats.page_count,
        stats.encoding,
        stats.duration_ms
    );

    Ok(stats)
}

/// Derive the output filename from an input filename.
///
/// A case-insensitive `.txt` suffix is replaced with `.pdf`; any other name
/// gets `.pdf` appended. Deterministic and collision-agnostic: two distinct
/// inputs may map to the same output name, and callers that care must keep
/// input names unique.
pub fn derive_output_name(input_name: &str) -> String {
    let base = match input_name.len().checked_sub(4) {
        Some(cut)
            if input_name.is_char_boundary(cut)
                && input_name[cut..].eq_ignore_ascii_case(".txt") =>
        {
            &input_name[..cut]
        }
        _ => input_name,
    };
    format!("{base}.pdf")
}

/// Write `bytes` to `output` via a temp file in the same directory.
fn write_atomic(output: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
    let write_err = |source: std::io::Error| ConvertError::Write {
        path: output.to_path_buf(),
        source,
    };

    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.persist(output).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txt_suffix_becomes_pdf() {
        assert_eq!(derive_output_name("notes.txt"), "notes.pdf");
        assert_eq!(derive_output_name("NOTES.TXT"), "NOTES.pdf");
        assert_eq!(derive_output_name("a.b.txt"), "a.b.pdf");
    }

    #[test]
    fn non_txt_names_get_pdf_appended() {
        assert_eq!(derive_output_name("notes"), "notes.pdf");
        assert_eq!(derive_output_name("notes.text"), "notes.text.pdf");
        assert_eq!(derive_output_name(""), ".pdf");
    }

    #[test]
    fn only_the_suffix_is_replaced() {
        assert_eq!(derive_output_name("a.txt.bak"), "a.txt.bak.pdf");
        assert_eq!(derive_output_name(".txt"), ".pdf");
    }

    #[test]
    fn multibyte_names_survive_derivation() {
        assert_eq!(derive_output_name("r\u{e9}sum\u{e9}.txt"), "r\u{e9}sum\u{e9}.pdf");
        // A name shorter than ".txt" in bytes must not panic.
        assert_eq!(derive_output_name("\u{e9}"), "\u{e9}.pdf");
    }

    #[test]
    fn atomic_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn atomic_write_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.pdf");
        let err = write_atomic(&path, b"bytes").unwrap_err();
        assert!(matches!(err, ConvertError::Write { .. }), "got: {err}");
        assert!(!path.exists());
    }
}
