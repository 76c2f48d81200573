//! # Galley
//!
//! A line-breaking and line-finishing engine for text frames.
//!
//! Most text layout code treats a paragraph as an infinite ribbon and
//! slices it afterwards. Galley does the opposite: **the column is the
//! fundamental unit of layout.** Every break decision — where a line
//! ends, whether a soft hyphen becomes visible, how trailing spaces are
//! folded away, how slack is distributed — is made against the column
//! boundary as a hard constraint, and text flows *into* columns until
//! text or space runs out.
//!
//! ## Architecture
//!
//! ```text
//! Input (text + styles)
//!       ↓
//!   [text]     — Shaper produces measured clusters with break flags;
//!                Hyphenator adds mid-word break points
//!       ↓
//!   [layout]   — LineControl fills one line at a time; the engine
//!                commits lines, rewinds to remembered breaks, and
//!                flows columns
//!       ↓
//!   LineSpec[] / ColumnSpec[] — positioned lines ready for drawing
//! ```
//!
//! Shaping and hyphenation are collaborator traits; the built-in
//! [`MetricShaper`] and [`DictionaryHyphenator`] make the engine usable
//! without any setup, and callers with a real shaper plug in their own.

pub mod error;
pub mod font;
pub mod layout;
pub mod style;
pub mod text;

pub use error::GalleyError;
pub use layout::{
    ColumnSpec, LayoutEngine, LayoutResult, LineSpec, MultiColumnResult, DEFAULT_COLUMN_GAP,
};
pub use style::{Alignment, CharStyle, FontStyle, ParagraphStyle};
pub use text::hyphen::{DictionaryHyphenator, Hyphenator, NoHyphenation};
pub use text::shaper::{MetricShaper, Shaper};
pub use text::{ClusterFlags, GlyphCluster};

use serde::Deserialize;

/// A complete layout request, deserializable from JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    pub text: String,
    pub width: f64,
    #[serde(default)]
    pub max_height: Option<f64>,
    #[serde(default)]
    pub paragraph: ParagraphStyle,
    #[serde(default)]
    pub chars: CharStyle,
}

/// Lay out text in a single column with default styles.
///
/// This is the quickest entry point; construct a [`LayoutEngine`] for
/// custom styles or collaborators.
pub fn layout(text: &str, width: f64) -> LayoutResult {
    LayoutEngine::new().layout(text, width, None)
}

/// Lay out a request described as JSON.
pub fn layout_json(json: &str) -> Result<LayoutResult, GalleyError> {
    let request: LayoutRequest = serde_json::from_str(json)?;
    let mut engine = LayoutEngine::new();
    engine.set_paragraph_style(request.paragraph);
    engine.set_char_style(request.chars);
    Ok(engine.layout(&request.text, request.width, request.max_height))
}
