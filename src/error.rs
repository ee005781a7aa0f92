//! Error types for the txt2pdf library.
//!
//! A single [`ConvertError`] enum covers every way a conversion can fail.
//! The variants mirror the three failure classes a caller has to tell apart:
//!
//! * `Read` / `Decode`: the source text could not be obtained. A `Decode`
//!   means the bytes were read fine but are not valid text under the chosen
//!   encoding; it is never downgraded to a best-effort lossy decode.
//! * `Render` / `Write`: the PDF could not be produced or could not reach
//!   its destination path. A failed write never leaves a partial file behind
//!   (output goes through a temp file, see [`crate::convert`]).
//! * `InvalidConfig`: the caller asked for something contradictory (zero
//!   printable height, unknown encoding label) before any I/O happened.
//!
//! Gateway-level validation failures (wrong extension, missing upload field)
//! are not part of this taxonomy: they are plain 400 responses built in the
//! route handlers and never reach the converter.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the txt2pdf library.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input file could not be opened or read.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input bytes are not valid text under the chosen encoding.
    #[error("'{path}' is not valid {encoding} text")]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    /// PDF document construction or serialisation failed.
    #[error("PDF rendering failed: {0}")]
    Render(String),

    /// The rendered document could not be written to the output path.
    #[error("failed to write output file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unexpected internal error (e.g. a panicked worker task).
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_display_names_path_and_encoding() {
        let e = ConvertError::Decode {
            path: PathBuf::from("notes.txt"),
            encoding: "UTF-8",
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.txt"), "got: {msg}");
        assert!(msg.contains("UTF-8"), "got: {msg}");
    }

    #[test]
    fn write_display_carries_source() {
        let e = ConvertError::Write {
            path: PathBuf::from("outputs/notes.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        let msg = e.to_string();
        assert!(msg.contains("outputs/notes.pdf"), "got: {msg}");
        assert!(msg.contains("no such directory"), "got: {msg}");
    }
}
