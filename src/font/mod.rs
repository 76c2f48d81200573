//! # Font Metrics
//!
//! Measurement-only font support for the default shaper: advance widths
//! and vertical metrics, no rasterization and no embedding.
//!
//! A built-in Helvetica-compatible advance table covers the common case
//! with zero setup. TrueType/OpenType faces can be registered for real
//! metrics via ttf-parser; lookups snap weights to 400/700 and fall back
//! to the built-in face when a family is unknown.

use std::collections::HashMap;

use crate::error::GalleyError;
use crate::style::CharStyle;

/// Per-mille advance widths for ASCII 0x20..=0x7E, Helvetica metrics.
const BUILTIN_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, // 'A'..'P'
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'Q'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, // 'a'..'p'
    556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'q'..'z'
    334, 260, 334, 584, // '{'..'~'
];

const BUILTIN_DEFAULT_ADVANCE: u16 = 556;
const BUILTIN_ASCENDER: f64 = 0.718;
const BUILTIN_DESCENDER: f64 = 0.207;

/// Per-mille advance for a character in the built-in face.
fn builtin_advance(ch: char) -> u16 {
    let code = ch as u32;
    if (0x20..=0x7E).contains(&code) {
        BUILTIN_WIDTHS[(code - 0x20) as usize]
    } else {
        BUILTIN_DEFAULT_ADVANCE
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct FaceKey {
    family: String,
    weight: u32,
    italic: bool,
}

/// Parsed metrics of one TrueType/OpenType face.
#[derive(Debug, Clone)]
pub struct FaceMetrics {
    units_per_em: u16,
    advance_widths: HashMap<char, u16>,
    default_advance: u16,
    ascender: i16,
    descender: i16,
}

impl FaceMetrics {
    /// Parse metrics from raw font data.
    pub fn from_bytes(data: &[u8]) -> Result<Self, GalleyError> {
        let face = ttf_parser::Face::parse(data, 0)
            .map_err(|e| GalleyError::Font(format!("unparseable face data: {e}")))?;
        let units_per_em = face.units_per_em();
        let ascender = face.ascender();
        let descender = face.descender();

        let mut advance_widths = HashMap::new();
        let mut default_advance = 0u16;

        // Sample the BMP to build the width map
        for code in 32u32..=0xFFFF {
            if let Some(ch) = char::from_u32(code) {
                if let Some(glyph_id) = face.glyph_index(ch) {
                    let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0);
                    advance_widths.insert(ch, advance);
                    if ch == ' ' {
                        default_advance = advance;
                    }
                }
            }
        }

        if default_advance == 0 {
            default_advance = units_per_em / 2;
        }

        Ok(FaceMetrics {
            units_per_em,
            advance_widths,
            default_advance,
            ascender,
            descender,
        })
    }

    /// Advance width of a character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let w = self
            .advance_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance);
        (w as f64 / self.units_per_em as f64) * font_size
    }

    pub fn ascent(&self, font_size: f64) -> f64 {
        (self.ascender.max(0) as f64 / self.units_per_em as f64) * font_size
    }

    pub fn descent(&self, font_size: f64) -> f64 {
        (-(self.descender.min(0)) as f64 / self.units_per_em as f64) * font_size
    }
}

/// A registry of measurable faces keyed by family, weight, and slant.
///
/// Unknown families resolve to the built-in Helvetica-compatible face so
/// measurement never fails.
#[derive(Debug, Default)]
pub struct FontLibrary {
    faces: HashMap<FaceKey, FaceMetrics>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a TrueType/OpenType face for a family/weight/slant slot.
    pub fn register(
        &mut self,
        family: &str,
        weight: u32,
        italic: bool,
        data: &[u8],
    ) -> Result<(), GalleyError> {
        let metrics = FaceMetrics::from_bytes(data)?;
        self.faces.insert(
            FaceKey {
                family: family.to_string(),
                weight,
                italic,
            },
            metrics,
        );
        Ok(())
    }

    fn resolve(&self, family: &str, weight: u32, italic: bool) -> Option<&FaceMetrics> {
        let key = FaceKey {
            family: family.to_string(),
            weight,
            italic,
        };
        if let Some(face) = self.faces.get(&key) {
            return Some(face);
        }
        // Snap to the nearest registered conventional weight
        let snapped = if weight >= 600 { 700 } else { 400 };
        self.faces.get(&FaceKey {
            family: family.to_string(),
            weight: snapped,
            italic,
        })
    }

    /// Advance width of a character, letter spacing included.
    pub fn char_width(&self, ch: char, style: &CharStyle) -> f64 {
        let width = match self.resolve(&style.font_family, style.font_weight, style.is_italic()) {
            Some(face) => face.char_width(ch, style.font_size),
            None => builtin_advance(ch) as f64 / 1000.0 * style.font_size,
        };
        width + style.letter_spacing
    }

    pub fn ascent(&self, style: &CharStyle) -> f64 {
        match self.resolve(&style.font_family, style.font_weight, style.is_italic()) {
            Some(face) => face.ascent(style.font_size),
            None => BUILTIN_ASCENDER * style.font_size,
        }
    }

    pub fn descent(&self, style: &CharStyle) -> f64 {
        match self.resolve(&style.font_family, style.font_weight, style.is_italic()) {
            Some(face) => face.descent(style.font_size),
            None => BUILTIN_DESCENDER * style.font_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_space_width() {
        let lib = FontLibrary::new();
        let style = CharStyle::default();
        let w = lib.char_width(' ', &style);
        assert!((w - 3.336).abs() < 0.001);
    }

    #[test]
    fn test_builtin_unknown_family_falls_back() {
        let lib = FontLibrary::new();
        let mut style = CharStyle::default();
        let w1 = lib.char_width('A', &style);
        style.font_family = "NoSuchFace".to_string();
        let w2 = lib.char_width('A', &style);
        assert!((w1 - w2).abs() < 0.001);
    }

    #[test]
    fn test_builtin_non_ascii_uses_default_advance() {
        let lib = FontLibrary::new();
        let style = CharStyle::default();
        let w = lib.char_width('é', &style);
        assert!((w - 0.556 * 12.0).abs() < 0.001);
    }

    #[test]
    fn test_builtin_vertical_metrics() {
        let lib = FontLibrary::new();
        let style = CharStyle::default();
        assert!((lib.ascent(&style) - 0.718 * 12.0).abs() < 0.001);
        assert!((lib.descent(&style) - 0.207 * 12.0).abs() < 0.001);
    }

    #[test]
    fn test_letter_spacing_added() {
        let lib = FontLibrary::new();
        let mut style = CharStyle::default();
        let plain = lib.char_width('a', &style);
        style.letter_spacing = 1.5;
        let spaced = lib.char_width('a', &style);
        assert!((spaced - plain - 1.5).abs() < 0.001);
    }

    #[test]
    fn test_register_invalid_face_errors() {
        let mut lib = FontLibrary::new();
        let result = lib.register("Broken", 400, false, &[0, 1, 2, 3]);
        assert!(matches!(result, Err(GalleyError::Font(_))));
    }
}
