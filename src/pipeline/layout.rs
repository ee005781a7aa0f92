//! Layout stage: line sequence → pages of rows.
//!
//! Pure arithmetic, no PDF types. A page holds at most
//! [`ConversionConfig::lines_per_page`] rows; when a row would pass the
//! bottom margin the next row opens a new page. Source lines longer than the
//! wrap column are split into continuation rows at character boundaries.

use crate::config::ConversionConfig;
use crate::pipeline::decode::SourceDocument;

/// One output page: the rows to draw, top to bottom.
#[derive(Debug)]
pub struct PagePlan {
    pub rows: Vec<String>,
}

/// Distribute the source lines across pages.
///
/// An empty document still produces one page, carrying the configured
/// placeholder row. The result is never an empty vec.
pub fn paginate(source: &SourceDocument, config: &ConversionConfig) -> Vec<PagePlan> {
    let rows = if source.is_empty() {
        vec![config.empty_file_message.clone()]
    } else {
        source
            .lines
            .iter()
            .flat_map(|line| wrap_line(line, config.wrap_columns))
            .collect()
    };

    let per_page = config.lines_per_page().max(1);
    rows.chunks(per_page)
        .map(|chunk| PagePlan {
            rows: chunk.to_vec(),
        })
        .collect()
}

/// Split one source line into rendered rows at the wrap column.
///
/// Splits on character boundaries, not grapheme clusters; for monospaced
/// body text that is accurate enough and keeps this dependency-free.
fn wrap_line(line: &str, wrap_columns: Option<usize>) -> Vec<String> {
    let Some(limit) = wrap_columns else {
        return vec![line.to_string()];
    };

    if line.chars().count() <= limit {
        return vec![line.to_string()];
    }

    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(limit)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
