//! Configuration types for text-to-PDF conversion and the upload gateway.
//!
//! All behaviour is controlled through two explicit structs:
//! [`ConversionConfig`] (page geometry, font, encoding policy) built via its
//! [`ConversionConfigBuilder`], and [`GatewayConfig`] (directories, allowed
//! extensions, upload limits) passed into the HTTP layer at construction
//! time. There is no module-level mutable state; sharing a config across
//! requests is a plain `Arc` clone.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// How the converter chooses the text encoding of an input file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncodingPolicy {
    /// Run the byte-pattern detector over the file content; fall back to
    /// Windows-1252 when detection is inconclusive. (default)
    #[default]
    Detect,
    /// Always decode under the named encoding (a WHATWG label such as
    /// `"utf-8"` or `"windows-1252"`). An unknown label fails config
    /// validation at conversion time.
    Fixed(String),
}

/// Configuration for a single text-to-PDF conversion.
///
/// Built via [`ConversionConfig::builder()`] or [`ConversionConfig::default()`].
/// The defaults reproduce the fixed layout this service has always shipped:
/// A4 pages, 12 pt Helvetica, a 10 mm line advance, and wrapping at 90
/// columns.
///
/// The renderer uses the built-in Helvetica font, which only covers Latin
/// scripts. Input in other scripts still decodes (the detector picks the
/// encoding), but glyphs outside the font's repertoire will not render.
///
/// # Example
/// ```rust
/// use txt2pdf::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .font_size_pt(10.0)
///     .wrap_columns(Some(100))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Page width in millimetres. Default: 210 (A4 portrait).
    pub page_width_mm: f32,

    /// Page height in millimetres. Default: 297 (A4 portrait).
    pub page_height_mm: f32,

    /// Left margin in millimetres; text starts here on every row. Default: 10.
    pub margin_left_mm: f32,

    /// Top margin in millimetres. Default: 10.
    pub margin_top_mm: f32,

    /// Bottom margin in millimetres. A row that would land below this margin
    /// starts a new page instead. Default: 20.
    pub margin_bottom_mm: f32,

    /// Font size in points. Default: 12.
    pub font_size_pt: f32,

    /// Vertical advance per rendered row in millimetres. Default: 10.
    ///
    /// Together with the page height and vertical margins this fixes the
    /// rows-per-page count: `floor((height - top - bottom) / line_height)`,
    /// 26 with the defaults.
    pub line_height_mm: f32,

    /// Maximum characters per rendered row; longer source lines wrap onto
    /// continuation rows. `None` disables wrapping. Default: `Some(90)`.
    pub wrap_columns: Option<usize>,

    /// The single row rendered when the input file contains no lines at all.
    /// Default: `"The file is empty."`.
    pub empty_file_message: String,

    /// Encoding selection policy. Default: [`EncodingPolicy::Detect`].
    pub encoding: EncodingPolicy,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_left_mm: 10.0,
            margin_top_mm: 10.0,
            margin_bottom_mm: 20.0,
            font_size_pt: 12.0,
            line_height_mm: 10.0,
            wrap_columns: Some(90),
            empty_file_message: "The file is empty.".to_string(),
            encoding: EncodingPolicy::Detect,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }

    /// Number of rows that fit on one page with this geometry.
    pub fn lines_per_page(&self) -> usize {
        let printable = self.page_height_mm - self.margin_top_mm - self.margin_bottom_mm;
        if printable <= 0.0 || self.line_height_mm <= 0.0 {
            return 0;
        }
        (printable / self.line_height_mm) as usize
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn page_size_mm(mut self, width: f32, height: f32) -> Self {
        self.config.page_width_mm = width;
        self.config.page_height_mm = height;
        self
    }

    pub fn margins_mm(mut self, left: f32, top: f32, bottom: f32) -> Self {
        self.config.margin_left_mm = left;
        self.config.margin_top_mm = top;
        self.config.margin_bottom_mm = bottom;
        self
    }

    pub fn font_size_pt(mut self, pt: f32) -> Self {
        self.config.font_size_pt = pt.max(1.0);
        self
    }

    pub fn line_height_mm(mut self, mm: f32) -> Self {
        self.config.line_height_mm = mm;
        self
    }

    pub fn wrap_columns(mut self, columns: Option<usize>) -> Self {
        // A wrap column of 0 would loop forever; treat it as "no wrapping".
        self.config.wrap_columns = columns.filter(|&c| c > 0);
        self
    }

    pub fn empty_file_message(mut self, message: impl Into<String>) -> Self {
        self.config.empty_file_message = message.into();
        self
    }

    pub fn encoding(mut self, policy: EncodingPolicy) -> Self {
        self.config.encoding = policy;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ConvertError> {
        let c = &self.config;
        if c.page_width_mm <= 0.0 || c.page_height_mm <= 0.0 {
            return Err(ConvertError::InvalidConfig(format!(
                "page size must be positive, got {}x{} mm",
                c.page_width_mm, c.page_height_mm
            )));
        }
        if c.line_height_mm <= 0.0 {
            return Err(ConvertError::InvalidConfig(format!(
                "line height must be positive, got {} mm",
                c.line_height_mm
            )));
        }
        if c.lines_per_page() == 0 {
            return Err(ConvertError::InvalidConfig(format!(
                "margins leave no printable area ({} mm page, {} mm top, {} mm bottom, {} mm line)",
                c.page_height_mm, c.margin_top_mm, c.margin_bottom_mm, c.line_height_mm
            )));
        }
        Ok(self.config)
    }
}

/// Configuration for the upload/download gateway.
///
/// Replaces what would otherwise be hardcoded directory names and a global
/// allowed-extension set; the gateway receives this at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Staging directory for raw uploads. Default: `uploads`.
    pub upload_dir: PathBuf,

    /// Destination directory for rendered PDFs. Default: `outputs`.
    pub output_dir: PathBuf,

    /// Accepted upload extensions, lower-case, without the dot.
    /// Default: `{"txt"}`.
    pub allowed_extensions: BTreeSet<String>,

    /// Maximum accepted request body size in bytes. Default: 16 MiB.
    pub max_upload_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            output_dir: PathBuf::from("outputs"),
            allowed_extensions: BTreeSet::from(["txt".to_string()]),
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

impl GatewayConfig {
    /// Check whether an uploaded filename carries an accepted extension.
    ///
    /// A filename with no `.` at all is rejected outright.
    pub fn is_allowed(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => self.allowed_extensions.contains(&ext.to_ascii_lowercase()),
            None => false,
        }
    }

    /// Create the staging and output directories if they do not exist.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.upload_dir)?;
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_geometry_gives_26_lines_per_page() {
        // floor((297 - 10 - 20) / 10)
        assert_eq!(ConversionConfig::default().lines_per_page(), 26);
    }

    #[test]
    fn builder_rejects_zero_line_height() {
        let result = ConversionConfig::builder().line_height_mm(0.0).build();
        assert!(matches!(result, Err(ConvertError::InvalidConfig(_))));
    }

    #[test]
    fn builder_rejects_margins_swallowing_the_page() {
        let result = ConversionConfig::builder()
            .margins_mm(10.0, 150.0, 150.0)
            .build();
        assert!(matches!(result, Err(ConvertError::InvalidConfig(_))));
    }

    #[test]
    fn builder_zero_wrap_columns_means_no_wrapping() {
        let config = ConversionConfig::builder()
            .wrap_columns(Some(0))
            .build()
            .unwrap();
        assert_eq!(config.wrap_columns, None);
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let config = GatewayConfig::default();
        assert!(config.is_allowed("notes.txt"));
        assert!(config.is_allowed("NOTES.TXT"));
        assert!(config.is_allowed("archive.tar.txt"));
        assert!(!config.is_allowed("notes.pdf"));
        assert!(!config.is_allowed("notes"));
        assert!(!config.is_allowed(""));
    }

    #[test]
    fn gateway_defaults_match_served_layout() {
        let config = GatewayConfig::default();
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
        assert!(config.allowed_extensions.contains("txt"));
    }
}
