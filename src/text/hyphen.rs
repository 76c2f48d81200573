//! # Hyphenation Contract
//!
//! A [`Hyphenator`] annotates a shaped cluster sequence with legal
//! mid-word break points. The default [`DictionaryHyphenator`] uses
//! Knuth-Liang patterns via `hypher`, selected by BCP 47 language tag.

use crate::text::{ClusterFlags, GlyphCluster};

/// Marks legal mid-word break points on a cluster sequence.
pub trait Hyphenator {
    /// Set `HYPHENATION_POSSIBLE` on zero or more clusters in place. The
    /// flag promises only that a break after the cluster is a legal
    /// hyphenation point.
    fn add_hyphenation(&self, clusters: &mut [GlyphCluster]);
}

/// The null hyphenator: never marks anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHyphenation;

impl Hyphenator for NoHyphenation {
    fn add_hyphenation(&self, _clusters: &mut [GlyphCluster]) {}
}

/// Map a BCP 47 language tag to a `hypher::Lang`.
///
/// Returns `None` for unsupported languages (which disables algorithmic
/// hyphenation). Defaults to English when no tag is provided.
fn resolve_lang(lang: Option<&str>) -> Option<hypher::Lang> {
    let tag = match lang {
        Some(t) => t,
        None => return Some(hypher::Lang::English),
    };
    let primary = tag.split('-').next().unwrap_or(tag).to_lowercase();
    match primary.as_str() {
        "af" => Some(hypher::Lang::Afrikaans),
        "sq" => Some(hypher::Lang::Albanian),
        "be" => Some(hypher::Lang::Belarusian),
        "bg" => Some(hypher::Lang::Bulgarian),
        "ca" => Some(hypher::Lang::Catalan),
        "hr" => Some(hypher::Lang::Croatian),
        "cs" => Some(hypher::Lang::Czech),
        "da" => Some(hypher::Lang::Danish),
        "nl" => Some(hypher::Lang::Dutch),
        "en" => Some(hypher::Lang::English),
        "et" => Some(hypher::Lang::Estonian),
        "fi" => Some(hypher::Lang::Finnish),
        "fr" => Some(hypher::Lang::French),
        "ka" => Some(hypher::Lang::Georgian),
        "de" => Some(hypher::Lang::German),
        "el" => Some(hypher::Lang::Greek),
        "hu" => Some(hypher::Lang::Hungarian),
        "is" => Some(hypher::Lang::Icelandic),
        "it" => Some(hypher::Lang::Italian),
        "ku" => Some(hypher::Lang::Kurmanji),
        "la" => Some(hypher::Lang::Latin),
        "lt" => Some(hypher::Lang::Lithuanian),
        "mn" => Some(hypher::Lang::Mongolian),
        "nb" | "nn" | "no" => Some(hypher::Lang::Norwegian),
        "pl" => Some(hypher::Lang::Polish),
        "pt" => Some(hypher::Lang::Portuguese),
        "ru" => Some(hypher::Lang::Russian),
        "sr" => Some(hypher::Lang::Serbian),
        "sk" => Some(hypher::Lang::Slovak),
        "sl" => Some(hypher::Lang::Slovenian),
        "es" => Some(hypher::Lang::Spanish),
        "sv" => Some(hypher::Lang::Swedish),
        "tr" => Some(hypher::Lang::Turkish),
        "tk" => Some(hypher::Lang::Turkmen),
        "uk" => Some(hypher::Lang::Ukrainian),
        _ => None,
    }
}

/// Pattern-based hyphenator over single-character word clusters.
///
/// Words are maximal runs of alphabetic one-character clusters; each
/// interior syllable boundary marks the cluster before it.
#[derive(Debug, Clone, Copy)]
pub struct DictionaryHyphenator {
    lang: hypher::Lang,
}

impl DictionaryHyphenator {
    pub fn new(lang: hypher::Lang) -> Self {
        Self { lang }
    }

    /// Construct for a BCP 47 language tag; `None` for unsupported tags.
    pub fn for_language(tag: Option<&str>) -> Option<Self> {
        resolve_lang(tag).map(Self::new)
    }

    fn mark_word(&self, clusters: &mut [GlyphCluster]) {
        let word: String = clusters.iter().map(|c| c.text.as_str()).collect();
        let syllables: Vec<&str> = hypher::hyphenate(&word, self.lang).collect();
        if syllables.len() < 2 {
            return;
        }

        let mut offset = 0;
        for syllable in &syllables[..syllables.len() - 1] {
            offset += syllable.chars().count();
            let last = &mut clusters[offset - 1];
            if !last.has_flag(ClusterFlags::NO_BREAK_AFTER) {
                last.set_flag(ClusterFlags::HYPHENATION_POSSIBLE);
            }
        }
    }
}

impl Default for DictionaryHyphenator {
    fn default() -> Self {
        Self::new(hypher::Lang::English)
    }
}

impl Hyphenator for DictionaryHyphenator {
    fn add_hyphenation(&self, clusters: &mut [GlyphCluster]) {
        let is_word_cluster = |c: &GlyphCluster| {
            let mut chars = c.text.chars();
            matches!((chars.next(), chars.next()), (Some(ch), None) if ch.is_alphabetic())
        };

        let mut i = 0;
        while i < clusters.len() {
            if !is_word_cluster(&clusters[i]) {
                i += 1;
                continue;
            }
            let start = i;
            while i < clusters.len() && is_word_cluster(&clusters[i]) {
                i += 1;
            }
            self.mark_word(&mut clusters[start..i]);
        }
    }
}
