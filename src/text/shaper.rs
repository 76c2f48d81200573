//! # Shaping Contract
//!
//! The layout engine consumes pre-shaped clusters; producing them is the
//! job of a [`Shaper`]. The default [`MetricShaper`] builds one cluster
//! per character from font metrics and UAX #14 break analysis — enough
//! for measurement-accurate layout without OpenType shaping.

use unicode_linebreak::{linebreaks, BreakOpportunity};

use crate::font::FontLibrary;
use crate::style::CharStyle;
use crate::text::{ClusterFlags, GlyphCluster};

/// Produces the cluster sequence the layout engine consumes.
///
/// Contract: `LINE_BOUNDARY` marks every cluster after which a normal
/// (non-hyphenation) break is permitted; `EXPANDING_SPACE` marks
/// whitespace that participates in justification; `FIXED_SPACE` marks
/// non-breaking whitespace; `NO_BREAK_BEFORE`/`NO_BREAK_AFTER` mark
/// directional break restrictions. A cluster whose `text` is exactly
/// `"\n"` is a mandatory hard break and must not carry `LINE_BOUNDARY`.
pub trait Shaper {
    fn shape(&self, text: &str, style: &CharStyle) -> Vec<GlyphCluster>;

    /// Advance of the hyphen glyph that terminates a hyphenated line.
    /// `None` lets the engine fall back to a fraction of the font size.
    fn hyphen_advance(&self, _style: &CharStyle) -> Option<f64> {
        None
    }
}

/// Whether a line may not begin with this character (closing CJK
/// punctuation).
fn forbids_line_start(ch: char) -> bool {
    matches!(
        ch,
        '、' | '。' | '，' | '．' | '）' | '」' | '』' | '】' | '〕' | '！' | '？' | '：' | '；'
    )
}

/// Whether a line may not end with this character (opening CJK
/// punctuation).
fn forbids_line_end(ch: char) -> bool {
    matches!(ch, '（' | '「' | '『' | '【' | '〔')
}

/// Compute UAX#14 allowed break opportunities indexed by char position.
///
/// Returns a vec of length `text.chars().count()`. Entry `i` is true when
/// a break is allowed *before* char `i`. Mandatory breaks are excluded —
/// the layout driver handles `"\n"` clusters itself.
fn compute_allowed_breaks(text: &str) -> Vec<bool> {
    let char_count = text.chars().count();
    let mut result = vec![false; char_count];

    // linebreaks() yields (byte_offset, opportunity) where byte_offset is
    // the start of the next segment; convert byte offsets to char indices.
    let byte_to_char: Vec<usize> = {
        let mut map = vec![0usize; text.len() + 1];
        let mut char_idx = 0;
        for (byte_idx, _) in text.char_indices() {
            map[byte_idx] = char_idx;
            char_idx += 1;
        }
        map[text.len()] = char_idx;
        map
    };

    for (byte_offset, opp) in linebreaks(text) {
        if opp == BreakOpportunity::Allowed {
            let char_idx = byte_to_char[byte_offset];
            if char_idx < char_count {
                result[char_idx] = true;
            }
        }
    }

    result
}

/// The default shaper: one cluster per character, measured against a
/// [`FontLibrary`].
///
/// Soft hyphens (U+00AD) emit no cluster of their own; they mark the
/// preceding cluster `HYPHENATION_POSSIBLE` so the break chooser can
/// compete them against word boundaries.
#[derive(Debug, Default)]
pub struct MetricShaper {
    fonts: FontLibrary,
}

impl MetricShaper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fonts(fonts: FontLibrary) -> Self {
        Self { fonts }
    }

    pub fn fonts_mut(&mut self) -> &mut FontLibrary {
        &mut self.fonts
    }
}

impl Shaper for MetricShaper {
    fn shape(&self, text: &str, style: &CharStyle) -> Vec<GlyphCluster> {
        let chars: Vec<char> = text.chars().collect();
        let allowed = compute_allowed_breaks(text);
        let ascent = self.fonts.ascent(style);
        let descent = self.fonts.descent(style);

        let mut clusters: Vec<GlyphCluster> = Vec::with_capacity(chars.len());
        // Emitted cluster index per source char; None for folded chars.
        let mut char_to_cluster: Vec<Option<usize>> = vec![None; chars.len()];

        for (i, &ch) in chars.iter().enumerate() {
            // Soft hyphens are zero-width break marks, not content
            if ch == '\u{00AD}' {
                if let Some(prev) = clusters.last_mut() {
                    prev.set_flag(ClusterFlags::HYPHENATION_POSSIBLE);
                }
                continue;
            }

            // Carriage returns fold into the newline that follows
            if ch == '\r' {
                continue;
            }

            // Line and paragraph separators normalize to the hard-break
            // marker the driver recognizes
            let is_break = matches!(ch, '\n' | '\u{2028}' | '\u{2029}');

            let width = match ch {
                _ if is_break => 0.0,
                '\u{00A0}' | '\u{202F}' => self.fonts.char_width(' ', style),
                _ => self.fonts.char_width(ch, style),
            };
            let text = if is_break {
                "\n".to_string()
            } else {
                ch.to_string()
            };

            let mut cluster = GlyphCluster::new(i, i, text, width, ascent, descent);
            match ch {
                ' ' => cluster.set_flag(ClusterFlags::EXPANDING_SPACE),
                '\u{00A0}' | '\u{202F}' => cluster.set_flag(ClusterFlags::FIXED_SPACE),
                _ => {}
            }
            if forbids_line_start(ch) {
                cluster.set_flag(ClusterFlags::NO_BREAK_BEFORE);
            }
            if forbids_line_end(ch) {
                cluster.set_flag(ClusterFlags::NO_BREAK_AFTER);
            }

            char_to_cluster[i] = Some(clusters.len());
            clusters.push(cluster);
        }

        // A break allowed before char i permits ending a line after the
        // cluster of char i-1.
        for (i, &allowed_here) in allowed.iter().enumerate() {
            if !allowed_here || i == 0 {
                continue;
            }
            let Some(prev_idx) = char_to_cluster[i - 1] else {
                // The char before the opportunity was folded (soft
                // hyphen); its predecessor already carries the
                // hyphenation mark.
                continue;
            };
            let prev_allows = {
                let prev = &clusters[prev_idx];
                !prev.is_hard_break() && !prev.has_flag(ClusterFlags::NO_BREAK_AFTER)
            };
            let next_allows = char_to_cluster[i]
                .map(|idx| !clusters[idx].has_flag(ClusterFlags::NO_BREAK_BEFORE))
                .unwrap_or(true);
            if prev_allows && next_allows {
                clusters[prev_idx].set_flag(ClusterFlags::LINE_BOUNDARY);
            }
        }

        clusters
    }

    fn hyphen_advance(&self, style: &CharStyle) -> Option<f64> {
        Some(self.fonts.char_width('-', style))
    }
}
