//! Substring protection around the transliteration transform.
//!
//! Romanized catalogue text is full of spans that must survive a
//! Latin→Cyrillic transform byte-for-byte: Latin taxonomic names, inline
//! markup inherited from HTML exports, Roman numerals, scholarly
//! abbreviations, and the non-Russian halves of parallel titles. This module
//! finds those spans, replaces each with an opaque placeholder token before
//! the transform runs, and substitutes the original text back afterwards.
//!
//! Tokens have the form `<||N||>` with `N` unique within one call. They
//! contain no letters, so no substitution table can alter them and no
//! digraph can straddle a token edge.
//!
//! # Examples
//!
//! ```ignore
//! use marcgen::protect::{protect, reinstate};
//!
//! let masked = protect("Zhuki roda <i>Carabus</i> Sibiri", &[])?;
//! assert_eq!(masked.text, "Zhuki roda <||0||> Sibiri");
//!
//! // ... transform masked.text ...
//!
//! let restored = reinstate(&masked.text, &masked.spans);
//! assert_eq!(restored, "Zhuki roda <i>Carabus</i> Sibiri");
//! # Ok::<(), marcgen::error::MarcGenError>(())
//! ```

use crate::error::{MarcGenError, Result};
use crate::tables::{ACTIVE_LANGUAGE, ITALIC_WHITELIST, PROTECTED_DYNAMIC, PROTECTED_LITERALS};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Separator between the components of a parallel title.
const PARALLEL_SEPARATOR: &str = " = ";

lazy_static! {
    /// Inline italic span with its content captured.
    static ref ITALIC_SPAN: Regex = Regex::new(r"<i>(.*?)</i>").expect("italic pattern");
    /// Roman numerals of two or more letters.
    static ref ROMAN_GENERAL: Regex = Regex::new(r"\b[IVXLCDM]{2,}\b").expect("numeral pattern");
    /// The two single-letter numerals that collide with Cyrillic words.
    static ref ROMAN_STANDALONE: Regex = Regex::new(r"\b[IV]\b").expect("numeral pattern");
}

/// One protected region: the placeholder token and the literal it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedSpan {
    /// Placeholder of the form `<||N||>` inserted into the masked text.
    pub token: String,
    /// Original text the token stands for.
    pub literal: String,
}

/// Result of a protection pass over one string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Masked {
    /// Input text with every protected region replaced by its token.
    pub text: String,
    /// Token→literal pairs, in left-to-right text order.
    pub spans: Vec<ProtectedSpan>,
    /// The whole string is one protected region; skip the transform entirely.
    pub non_transliterable: bool,
}

impl Masked {
    fn unchanged(text: &str) -> Self {
        Masked {
            text: text.to_string(),
            spans: Vec::new(),
            non_transliterable: false,
        }
    }
}

/// Mask every protected region of `text` with placeholder tokens.
///
/// `parallel_languages` carries the per-component language tags of a
/// parallel title (components separated by `" = "`), aligned by position.
/// It is consulted only when the separator is actually present; pass `&[]`
/// for single-language strings such as names.
///
/// Protected regions are, in collection order: non-active-language
/// parallel-title components, italic spans not on the active-language
/// whitelist, bracketed fragments and other dynamic patterns, Roman
/// numerals, and the static literal list (taxonomic names, abbreviations,
/// markup markers). Overlapping candidates resolve longest-first.
///
/// A string that is in its entirety one protected region (typically a fully
/// bracketed title) comes back unchanged with `non_transliterable` set.
///
/// # Errors
///
/// `MismatchedPartCount` when a parallel title's component count disagrees
/// with its language-tag count; `UnsupportedLanguageComponent` when no
/// component is in the active language.
pub fn protect(text: &str, parallel_languages: &[&str]) -> Result<Masked> {
    if text.is_empty() {
        return Ok(Masked::unchanged(text));
    }

    let mut candidates: Vec<(usize, usize)> = Vec::new();

    collect_parallel_components(text, parallel_languages, &mut candidates)?;
    collect_italic_spans(text, &mut candidates);
    collect_dynamic_patterns(text, &mut candidates);
    collect_roman_numerals(text, &mut candidates);
    collect_static_literals(text, &mut candidates);

    if candidates.is_empty() {
        return Ok(Masked::unchanged(text));
    }

    let accepted = resolve_overlaps(candidates);

    // A single region spanning the whole trimmed string means there is
    // nothing left to transliterate.
    if accepted.len() == 1 {
        let (start, end) = accepted[0];
        if trim_boundary_punctuation(text) == &text[start..end] {
            return Ok(Masked {
                text: text.to_string(),
                spans: Vec::new(),
                non_transliterable: true,
            });
        }
    }

    let mut spans = Vec::with_capacity(accepted.len());
    let mut masked = String::with_capacity(text.len());
    let mut cursor = 0;
    for (n, &(start, end)) in accepted.iter().enumerate() {
        let token = format!("<||{n}||>");
        masked.push_str(&text[cursor..start]);
        masked.push_str(&token);
        spans.push(ProtectedSpan {
            token,
            literal: text[start..end].to_string(),
        });
        cursor = end;
    }
    masked.push_str(&text[cursor..]);

    Ok(Masked {
        text: masked,
        spans,
        non_transliterable: false,
    })
}

/// Substitute every token in `spans` back with its literal.
///
/// Order-independent: tokens are unique within one protection pass and
/// never overlap. Tokens absent from `text` are ignored.
#[must_use]
pub fn reinstate(text: &str, spans: &[ProtectedSpan]) -> String {
    let mut result = text.to_string();
    for span in spans {
        if result.contains(&span.token) {
            result = result.replace(&span.token, &span.literal);
        }
    }
    result
}

/// Split a parallel title and mark every non-active-language component.
fn collect_parallel_components(
    text: &str,
    languages: &[&str],
    out: &mut Vec<(usize, usize)>,
) -> Result<()> {
    if !text.contains(PARALLEL_SEPARATOR) {
        return Ok(());
    }

    let parts: Vec<&str> = text.split(PARALLEL_SEPARATOR).collect();
    if parts.len() != languages.len() {
        return Err(MarcGenError::MismatchedPartCount {
            parts: parts.len(),
            languages: languages.len(),
        });
    }
    if !languages.iter().any(|lang| *lang == ACTIVE_LANGUAGE) {
        return Err(MarcGenError::UnsupportedLanguageComponent(
            ACTIVE_LANGUAGE.to_string(),
        ));
    }

    let mut offset = 0;
    for (part, lang) in parts.iter().zip(languages) {
        if *lang != ACTIVE_LANGUAGE && !part.is_empty() {
            out.push((offset, offset + part.len()));
        }
        offset += part.len() + PARALLEL_SEPARATOR.len();
    }
    Ok(())
}

/// Mark italic spans whose content is not whitelisted as active-language.
///
/// Whitelisted spans stay exposed; their surrounding markup markers are
/// still picked up by the static literal list.
fn collect_italic_spans(text: &str, out: &mut Vec<(usize, usize)>) {
    for caps in ITALIC_SPAN.captures_iter(text) {
        if let (Some(whole), Some(content)) = (caps.get(0), caps.get(1)) {
            let key = content.as_str().trim().to_lowercase();
            if !ITALIC_WHITELIST.contains(key.as_str()) {
                out.push((whole.start(), whole.end()));
            }
        }
    }
}

/// Evaluate the dynamic patterns; only the matched capture joins the set.
fn collect_dynamic_patterns(text: &str, out: &mut Vec<(usize, usize)>) {
    for pattern in PROTECTED_DYNAMIC.iter() {
        for caps in pattern.captures_iter(text) {
            if let Some(m) = caps.get(1).or_else(|| caps.get(0)) {
                if !m.is_empty() {
                    out.push((m.start(), m.end()));
                }
            }
        }
    }
}

/// Mark Roman numerals.
///
/// Multi-letter numerals are always protected. The single letters `I` and
/// `V` double as common Cyrillic words when they open a clause, so a
/// standalone match is protected only mid-clause.
fn collect_roman_numerals(text: &str, out: &mut Vec<(usize, usize)>) {
    for m in ROMAN_GENERAL.find_iter(text) {
        out.push((m.start(), m.end()));
    }
    for m in ROMAN_STANDALONE.find_iter(text) {
        if !is_clause_initial(text, m.start()) {
            out.push((m.start(), m.end()));
        }
    }
}

/// Mark every boundary-valid occurrence of each static literal.
fn collect_static_literals(text: &str, out: &mut Vec<(usize, usize)>) {
    for lit in PROTECTED_LITERALS.iter() {
        if !text.contains(lit.text) {
            continue;
        }
        let mut from = 0;
        while let Some(rel) = text[from..].find(lit.text) {
            let start = from + rel;
            let end = start + lit.text.len();
            if lit.boundary_free || has_word_boundaries(text, start, end) {
                out.push((start, end));
            }
            from = end;
        }
    }
}

/// Whether a match at `pos` opens a clause (string start, or the first
/// non-whitespace character before it ends a sentence).
fn is_clause_initial(text: &str, pos: usize) -> bool {
    for c in text[..pos].chars().rev() {
        if c.is_whitespace() {
            continue;
        }
        return matches!(c, '.' | ';' | ':' | '!' | '?');
    }
    true
}

/// Whether the span `[start, end)` is delimited by non-word characters.
fn has_word_boundaries(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}

/// Keep the longest non-overlapping candidates, returned in text order.
fn resolve_overlaps(mut candidates: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    candidates.sort_by(|a, b| (b.1 - b.0).cmp(&(a.1 - a.0)).then(a.0.cmp(&b.0)));

    let mut accepted: Vec<(usize, usize)> = Vec::new();
    for c in candidates {
        if accepted.iter().all(|a| c.1 <= a.0 || c.0 >= a.1) {
            accepted.push(c);
        }
    }
    accepted.sort_unstable_by_key(|c| c.0);
    accepted
}

fn trim_boundary_punctuation(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':'))
}
