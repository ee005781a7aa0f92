//! Render stage: page plans → serialised PDF bytes.
//!
//! Drives `printpdf` with the built-in Helvetica font. Coordinates in
//! `printpdf` originate at the bottom-left corner, so the row cursor starts
//! at `page_height - margin_top - line_height` (the baseline of the first
//! row) and walks downward by one line advance per row.

use crate::config::ConversionConfig;
use crate::error::ConvertError;
use crate::pipeline::layout::PagePlan;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::BufWriter;

/// Serialise the laid-out pages into a PDF byte buffer.
pub fn render(
    pages: &[PagePlan],
    title: &str,
    config: &ConversionConfig,
) -> Result<Vec<u8>, ConvertError> {
    let width = Mm(config.page_width_mm.into());
    let height = Mm(config.page_height_mm.into());

    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ConvertError::Render(e.to_string()))?;

    let mut page_index = first_page;
    let mut layer_index = first_layer;

    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            let (p, l) = doc.add_page(width, height, "Layer 1");
            page_index = p;
            layer_index = l;
        }
        let layer = doc.get_page(page_index).get_layer(layer_index);

        let mut baseline = config.page_height_mm - config.margin_top_mm - config.line_height_mm;
        for row in &page.rows {
            if !row.is_empty() {
                layer.use_text(
                    row.as_str(),
                    config.font_size_pt.into(),
                    Mm(config.margin_left_mm.into()),
                    Mm(baseline.into()),
                    &font,
                );
            }
            baseline -= config.line_height_mm;
        }
    }

    let mut buf: Vec<u8> = Vec::new();
    {
        let mut writer = BufWriter::new(&mut buf);
        doc.save(&mut writer)
            .map_err(|e| ConvertError::Render(e.to_string()))?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(rows: &[&str]) -> PagePlan {
        PagePlan {
            rows: rows.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn render_produces_a_pdf_header() {
        let bytes = render(
            &[plan(&["Hello", "World"])],
            "notes",
            &ConversionConfig::default(),
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF-"), "missing PDF magic");
        assert!(bytes.len() > 100);
    }

    #[test]
    fn multi_page_output_is_larger_than_single_page() {
        let config = ConversionConfig::default();
        let one = render(&[plan(&["a"])], "t", &config).unwrap();
        let three = render(
            &[plan(&["a"]), plan(&["b"]), plan(&["c"])],
            "t",
            &config,
        )
        .unwrap();
        assert!(three.len() > one.len());
    }
}
