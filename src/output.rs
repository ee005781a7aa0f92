//! Conversion result types.

use serde::{Deserialize, Serialize};

/// Summary of a completed conversion.
///
/// Returned by [`crate::convert`] and [`crate::convert_sync`]; the CLI
/// prints it (optionally as JSON) and the gateway logs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of lines in the decoded source document.
    pub line_count: usize,

    /// Number of rendered rows after wrapping (equals `line_count` unless
    /// lines exceeded the wrap column, or the source was empty and the
    /// placeholder row was emitted).
    pub row_count: usize,

    /// Number of pages in the output document. Always at least 1.
    pub page_count: usize,

    /// Name of the encoding the source was decoded under (e.g. `"UTF-8"`,
    /// `"windows-1252"`).
    pub encoding: String,

    /// Size of the written PDF in bytes.
    pub bytes_written: u64,

    /// Wall-clock duration of the whole conversion in milliseconds.
    pub duration_ms: u64,
}
