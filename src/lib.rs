//! # txt2pdf
//!
//! Convert plain-text files into paginated PDF documents, as a small web
//! service, a CLI, or a library call.
//!
//! ## Pipeline Overview
//!
//! ```text
//! .txt file
//!  │
//!  ├─ 1. Decode  read bytes, pick the encoding (detector or fixed label)
//!  ├─ 2. Layout  wrap long lines, distribute rows across A4 pages
//!  ├─ 3. Render  draw rows with printpdf (12 pt Helvetica, 10 mm advance)
//!  └─ 4. Write   serialise atomically (temp file + rename)
//! ```
//!
//! The HTTP gateway in [`gateway`] wraps the same pipeline behind an upload
//! form: `POST /` stages the file, converts it, and redirects to
//! `/download/<name>.pdf`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use txt2pdf::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let stats = convert("notes.txt", "notes.pdf", &config).await?;
//!     println!("{} pages from {} lines", stats.page_count, stats.line_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `txt2pdf` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! txt2pdf = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod detect;
pub mod error;
pub mod gateway;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, EncodingPolicy, GatewayConfig};
pub use convert::{convert, convert_sync, derive_output_name};
pub use detect::detect_encoding;
pub use error::ConvertError;
pub use gateway::{router, serve, AppState};
pub use output::ConversionStats;
