//! # Column-Aware Layout Engine
//!
//! This is the heart of galley.
//!
//! The engine never lays text onto an infinite ribbon and slices it
//! afterwards. Every line is committed against the column boundary as a
//! hard constraint:
//!
//! 1. Feed clusters to the line state machine, one per step.
//! 2. Before placing a cluster, ask: "would the pen pass the effective
//!    right edge, even after shrinking the spaces?"
//! 3. If it fits: place it, and remember any break opportunity it offers.
//! 4. If it doesn't fit and a break is remembered: commit the line at the
//!    best break, fold trailing spaces into the hang, and rewind to the
//!    cluster after the break.
//! 5. If it doesn't fit and no break exists: force-break at the current
//!    cluster so layout always terminates.
//! 6. After each committed line, step the baseline; when a height budget
//!    is exhausted, hand the cursor to the next column (or report
//!    overflow).
//!
//! Single-column layout is exactly one segment; multi-column layout runs
//! the same segment routine once per column.

pub mod line;

use log::{debug, trace};

pub use line::LineSpec;
use line::LineControl;

use crate::style::{Alignment, CharStyle, ParagraphStyle};
use crate::text::hyphen::{DictionaryHyphenator, Hyphenator};
use crate::text::shaper::{MetricShaper, Shaper};
use crate::text::{ClusterFlags, GlyphCluster};

/// Default gap between adjacent columns.
pub const DEFAULT_COLUMN_GAP: f64 = 20.0;

/// First-baseline fallback when the starting cluster has no measured
/// ascent, as a fraction of the font size.
const ASCENT_FALLBACK_RATIO: f64 = 0.8;

/// Hyphen-advance fallback when the shaper provides none, as a fraction
/// of the font size.
const HYPHEN_WIDTH_RATIO: f64 = 0.3;

/// Result of a single-column layout call.
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    pub lines: Vec<LineSpec>,
    /// True iff the caller-supplied height budget prevented laying out
    /// all clusters.
    pub overflow: bool,
    /// Index of the last cluster included in the output; 0 for empty
    /// input.
    pub last_char_index: usize,
}

/// One column of a multi-column layout.
#[derive(Debug, Clone, Default)]
pub struct ColumnSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub lines: Vec<LineSpec>,
}

/// Result of a multi-column layout call. `columns.len()` always equals
/// the requested column count; columns the text never reached are empty.
#[derive(Debug, Clone, Default)]
pub struct MultiColumnResult {
    pub columns: Vec<ColumnSpec>,
    pub overflow: bool,
    pub last_char_index: usize,
}

/// Outcome of filling one segment (one column, or the whole text).
struct Segment {
    lines: Vec<LineSpec>,
    /// Index of the first cluster NOT consumed by this segment.
    cursor: usize,
}

/// The layout engine: drives the line state machine over a shaped
/// cluster sequence and flows the result into one or more columns.
pub struct LayoutEngine {
    shaper: Box<dyn Shaper>,
    hyphenator: Box<dyn Hyphenator>,
    paragraph: ParagraphStyle,
    chars: CharStyle,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    /// An engine with the default metric shaper and English dictionary
    /// hyphenation.
    pub fn new() -> Self {
        Self::with_collaborators(
            Box::new(MetricShaper::new()),
            Box::new(DictionaryHyphenator::default()),
        )
    }

    pub fn with_collaborators(shaper: Box<dyn Shaper>, hyphenator: Box<dyn Hyphenator>) -> Self {
        Self {
            shaper,
            hyphenator,
            paragraph: ParagraphStyle::default(),
            chars: CharStyle::default(),
        }
    }

    pub fn set_paragraph_style(&mut self, style: ParagraphStyle) {
        self.paragraph = style;
    }

    pub fn set_char_style(&mut self, style: CharStyle) {
        self.chars = style;
    }

    pub fn paragraph_style(&self) -> &ParagraphStyle {
        &self.paragraph
    }

    pub fn char_style(&self) -> &CharStyle {
        &self.chars
    }

    /// Lay text into a single column of the given width, optionally
    /// bounded by a height budget.
    pub fn layout(&self, text: &str, width: f64, max_height: Option<f64>) -> LayoutResult {
        let mut clusters = self.shaper.shape(text, &self.chars);
        if clusters.is_empty() {
            return LayoutResult::default();
        }
        if self.paragraph.hyphenate {
            self.hyphenator.add_hyphenation(&mut clusters);
        }

        let segment = self.fill_segment(&mut clusters, 0, 0.0, width, max_height, 0, true);
        LayoutResult {
            overflow: segment.cursor < clusters.len(),
            last_char_index: segment.cursor.saturating_sub(1),
            lines: segment.lines,
        }
    }

    /// Flow text through `column_count` columns of equal width carved out
    /// of `total_width`, each bounded by `column_height`.
    pub fn layout_columns(
        &self,
        text: &str,
        column_count: usize,
        total_width: f64,
        column_height: f64,
        column_gap: f64,
    ) -> MultiColumnResult {
        let count = column_count.max(1);
        let column_width = (total_width - (count - 1) as f64 * column_gap) / count as f64;

        let mut clusters = self.shaper.shape(text, &self.chars);
        if self.paragraph.hyphenate {
            self.hyphenator.add_hyphenation(&mut clusters);
        }

        let mut columns = Vec::with_capacity(count);
        let mut cursor = 0usize;
        for c in 0..count {
            let x_offset = c as f64 * (column_width + column_gap);
            let lines = if cursor < clusters.len() {
                let segment = self.fill_segment(
                    &mut clusters,
                    cursor,
                    x_offset,
                    column_width,
                    Some(column_height),
                    c,
                    c == 0,
                );
                cursor = segment.cursor;
                segment.lines
            } else {
                Vec::new()
            };
            columns.push(ColumnSpec {
                x: x_offset,
                y: 0.0,
                width: column_width,
                height: column_height,
                lines,
            });
        }

        if cursor < clusters.len() {
            debug!(
                "text exhausted {} columns with {} clusters unplaced",
                count,
                clusters.len() - cursor
            );
        }

        MultiColumnResult {
            overflow: cursor < clusters.len(),
            last_char_index: cursor.saturating_sub(1),
            columns,
        }
    }

    /// Fill one segment: drive the line state machine from `start` until
    /// the text or the height budget runs out.
    fn fill_segment(
        &self,
        clusters: &mut [GlyphCluster],
        start: usize,
        col_left: f64,
        col_width: f64,
        max_height: Option<f64>,
        column: usize,
        is_first_in_document: bool,
    ) -> Segment {
        let font_size = self.chars.font_size;
        let line_height = font_size * self.paragraph.line_spacing;
        let hyphen_width = self
            .shaper
            .hyphen_advance(&self.chars)
            .unwrap_or(HYPHEN_WIDTH_RATIO * font_size);

        let mut control = LineControl::new(self.paragraph.clone(), col_left, col_width, column);
        let first_ascent = clusters[start].ascent;
        control.set_baseline(if first_ascent > 0.0 {
            first_ascent
        } else {
            ASCENT_FALLBACK_RATIO * font_size
        });
        control.start_line(start, is_first_in_document);

        let exhausted = |control: &LineControl| -> bool {
            matches!(max_height, Some(limit) if control.baseline() > limit)
        };

        let mut lines = Vec::new();
        let mut consecutive_hyphens: u32 = 0;
        let mut i = start;
        while i < clusters.len() {
            // Mandatory break: commit whatever is on the line and step
            if clusters[i].is_hard_break() {
                if !control.is_empty() {
                    control.break_line(clusters, i - 1);
                    lines.push(self.commit_line(&mut control, clusters, true));
                }
                control.next_line(line_height);
                if exhausted(&control) {
                    debug!("column {column}: height budget exhausted at hard break");
                    return Segment { lines, cursor: i + 1 };
                }
                control.start_line(i + 1, false);
                i += 1;
                continue;
            }

            let projected_x = control.pen() + clusters[i].width;
            let overflow_now =
                projected_x - control.max_shrink() >= control.effective_right();

            // Soft break: cut at the remembered candidate and rewind
            if !control.is_empty() && overflow_now {
                if let Some(break_index) = control.break_index() {
                    if clusters[break_index].has_flag(ClusterFlags::HYPHENATION_POSSIBLE)
                        && control.break_is_hyphenation()
                        && consecutive_hyphens < self.paragraph.hyphen_consecutive_limit
                    {
                        clusters[break_index].set_flag(ClusterFlags::SOFT_HYPHEN_VISIBLE);
                        consecutive_hyphens += 1;
                    } else if clusters[break_index].has_flag(ClusterFlags::LINE_BOUNDARY) {
                        consecutive_hyphens = 0;
                    }

                    // Fold the trailing space run into the hang
                    let first = control.first_cluster();
                    let mut j = break_index;
                    loop {
                        if !clusters[j].has_flag(ClusterFlags::EXPANDING_SPACE) {
                            break;
                        }
                        clusters[j].set_flag(ClusterFlags::SUPPRESS_SPACE);
                        if j == first {
                            break;
                        }
                        j -= 1;
                    }

                    lines.push(self.commit_line(&mut control, clusters, false));
                    control.next_line(line_height);
                    if exhausted(&control) {
                        debug!("column {column}: height budget exhausted after soft break");
                        return Segment {
                            lines,
                            cursor: break_index + 1,
                        };
                    }
                    control.start_line(break_index + 1, false);
                    i = break_index + 1;
                    continue;
                }
            }

            control.add_cluster(&clusters[i]);
            if clusters[i].has_flag(ClusterFlags::LINE_BOUNDARY)
                && word_break_allowed(clusters, i)
            {
                control.remember_break(i, control.pen(), false);
            }
            if clusters[i].has_flag(ClusterFlags::HYPHENATION_POSSIBLE) {
                control.remember_break(i, control.pen() + hyphen_width, true);
            }

            // Overflowed with no admissible break: force a cut here
            if control.is_end_of_line(0.0) && control.break_index().is_none() {
                control.break_line(clusters, i);
                lines.push(self.commit_line(&mut control, clusters, false));
                control.next_line(line_height);
                if exhausted(&control) {
                    debug!("column {column}: height budget exhausted after forced break");
                    return Segment { lines, cursor: i + 1 };
                }
                control.start_line(i + 1, false);
                i += 1;
                continue;
            }

            i += 1;
        }

        // Terminate the last line
        if !control.is_empty() {
            control.break_line(clusters, clusters.len() - 1);
            lines.push(self.commit_line(&mut control, clusters, true));
        }

        Segment {
            lines,
            cursor: clusters.len(),
        }
    }

    /// Finish, justify/align, and copy out the current line. The last
    /// line of a paragraph is never justified.
    fn commit_line(
        &self,
        control: &mut LineControl,
        clusters: &[GlyphCluster],
        paragraph_end: bool,
    ) -> LineSpec {
        let stretch = control.stretch_budget();
        control.finish_line(clusters, control.effective_right());
        match self.paragraph.alignment {
            Alignment::Justified if !paragraph_end => control.justify_line(),
            Alignment::Justified => control.align_line(Alignment::Left),
            other => control.align_line(other),
        }
        let line = control.create_line_spec();
        trace!(
            "committed clusters {}..={} at y {:.2}, natural {:.2} of {:.2} (stretch budget {:.2})",
            line.first_cluster,
            line.last_cluster,
            line.y,
            line.natural_width,
            line.width,
            stretch
        );
        line
    }
}

/// A `LINE_BOUNDARY` candidate is admissible unless directional no-break
/// flags forbid it.
fn word_break_allowed(clusters: &[GlyphCluster], i: usize) -> bool {
    if clusters[i].has_flag(ClusterFlags::NO_BREAK_AFTER) {
        return false;
    }
    clusters
        .get(i + 1)
        .map(|next| !next.has_flag(ClusterFlags::NO_BREAK_BEFORE))
        .unwrap_or(true)
}
