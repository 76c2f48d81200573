//! # Style System
//!
//! Paragraph and character styles consumed by the layout engine. This is
//! intentionally a small model: the properties that decide where lines
//! break and how they are finished, nothing more.
//!
//! Both styles are plain serde data types so callers can ship them as part
//! of a JSON layout request.

use serde::{Deserialize, Serialize};

/// Horizontal treatment of a finished line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Right,
    Center,
    Justified,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// Paragraph-level layout configuration.
///
/// Lengths (`left_margin`, `right_margin`, `first_line_indent`,
/// `hyphen_penalty`) are in the same unit as cluster widths, typically
/// points. `line_spacing` is a multiplier of the font size;
/// `min_word_spacing`/`max_word_spacing` are ratios of the natural space
/// width and bound how far expanding spaces may shrink or stretch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphStyle {
    pub alignment: Alignment,
    pub left_margin: f64,
    pub right_margin: f64,
    pub first_line_indent: f64,
    pub line_spacing: f64,
    pub min_word_spacing: f64,
    pub max_word_spacing: f64,
    pub hyphenate: bool,
    /// Maximum number of consecutive lines allowed to end in a visible
    /// soft hyphen.
    pub hyphen_consecutive_limit: u32,
    /// Additive badness applied to hyphenation break candidates, as a raw
    /// length in the same unit as x positions.
    pub hyphen_penalty: f64,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            alignment: Alignment::Left,
            left_margin: 0.0,
            right_margin: 0.0,
            first_line_indent: 0.0,
            line_spacing: 1.2,
            min_word_spacing: 1.0,
            max_word_spacing: 2.0,
            hyphenate: false,
            hyphen_consecutive_limit: 2,
            hyphen_penalty: 50.0,
        }
    }
}

/// Character-level configuration.
///
/// The layout engine itself reads only `font_size` (default line height
/// and hyphen-width fallback); the descriptive fields are consumed by the
/// shaper collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharStyle {
    pub font_size: f64,
    pub font_family: String,
    /// CSS-style weight, 100-900.
    pub font_weight: u32,
    pub font_style: FontStyle,
    pub letter_spacing: f64,
    /// BCP 47 language tag, used for hyphenation pattern selection.
    pub language: Option<String>,
}

impl Default for CharStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            font_family: "Helvetica".to_string(),
            font_weight: 400,
            font_style: FontStyle::Normal,
            letter_spacing: 0.0,
            language: None,
        }
    }
}

impl CharStyle {
    pub fn is_italic(&self) -> bool {
        matches!(self.font_style, FontStyle::Italic | FontStyle::Oblique)
    }
}
