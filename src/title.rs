//! Title field (245) construction.
//!
//! Builds the complete title statement for one record: indicator pair,
//! transliterated title text with the subtitle boundary marked, the bracketed
//! medium designator, and the statement of responsibility. The result is the
//! exact field text handed downstream; this crate does not touch the record
//! the field lands in.
//!
//! # Examples
//!
//! ```
//! use marcgen::title::TitleBuilder;
//!
//! let title = TitleBuilder::new("The beetles of Russia : a survey", "eng").build();
//!
//! assert_eq!(title.title_text, "The beetles of Russia :$ba survey.");
//! assert_eq!(title.indicator1(), '0');
//! assert_eq!(title.indicator2(), '4');
//! ```

use crate::classify::{ClassifyContext, HeadingResult};
use crate::record_view::RecordView;
use crate::roundtrip::RoundTripEngine;
use crate::statement::{assemble, AuthorGroup, RoleGroup};
use crate::tables::{self, ACTIVE_LANGUAGE};
use memchr::memchr;
use serde::{Deserialize, Serialize};

/// Replacement for an empty or placeholder-only title.
const NO_TITLE: &str = "[No title]";
/// Separator marking an author statement embedded in the title.
const STATEMENT_SEPARATOR: &str = " / ";

/// A finished title field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleResult {
    /// Non-filing character count (0–4) consumed by a leading article.
    pub leading_article_count: u8,
    /// The record carries a 1xx main-entry heading.
    pub has_prior_heading_field: bool,
    /// Title proper with subtitle boundary and medium designator embedded.
    pub title_text: String,
    /// Bracketed medium designator, when any form token mapped.
    pub medium_designator: Option<String>,
    /// Statement of responsibility including its `" /$c"` prefix.
    pub statement_of_responsibility: Option<String>,
}

impl TitleResult {
    /// First indicator: `'1'` when a 1xx heading precedes this field.
    #[must_use]
    pub fn indicator1(&self) -> char {
        if self.has_prior_heading_field {
            '1'
        } else {
            '0'
        }
    }

    /// Second indicator: the non-filing count as a digit.
    #[must_use]
    pub fn indicator2(&self) -> char {
        char::from(b'0' + self.leading_article_count)
    }

    /// The exact field text handed downstream: title plus statement.
    #[must_use]
    pub fn rendered(&self) -> String {
        match &self.statement_of_responsibility {
            Some(statement) => format!("{}{statement}", self.title_text),
            None => self.title_text.clone(),
        }
    }
}

/// Builder over the record facts that shape one title field.
///
/// `language` is the record default language tag; `parallel_languages`
/// carries per-component tags when the title is a parallel (multi-language)
/// title. Everything else is optional: without an engine the title renders
/// untransliterated, without a main-entry heading the field reads as the
/// record's first entry point.
pub struct TitleBuilder<'a> {
    title: &'a str,
    language: &'a str,
    parallel_languages: &'a [&'a str],
    forms: &'a [&'a str],
    author_groups: &'a [AuthorGroup],
    role_groups: &'a [RoleGroup],
    record_id: Option<&'a str>,
    main_entry: Option<&'a HeadingResult>,
    engine: Option<&'a RoundTripEngine>,
    record: Option<&'a dyn RecordView>,
}

impl std::fmt::Debug for TitleBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TitleBuilder")
            .field("title", &self.title)
            .field("language", &self.language)
            .field("record_id", &self.record_id)
            .finish_non_exhaustive()
    }
}

impl<'a> TitleBuilder<'a> {
    /// Builder for a title in the given record default language.
    #[must_use]
    pub fn new(title: &'a str, language: &'a str) -> Self {
        TitleBuilder {
            title,
            language,
            parallel_languages: &[],
            forms: &[],
            author_groups: &[],
            role_groups: &[],
            record_id: None,
            main_entry: None,
            engine: None,
            record: None,
        }
    }

    /// Per-component language tags of a parallel title.
    #[must_use]
    pub fn parallel_languages(mut self, tags: &'a [&'a str]) -> Self {
        self.parallel_languages = tags;
        self
    }

    /// Form tokens mapped to the medium designator.
    #[must_use]
    pub fn forms(mut self, forms: &'a [&'a str]) -> Self {
        self.forms = forms;
        self
    }

    /// Author groups for statement assembly.
    #[must_use]
    pub fn author_groups(mut self, groups: &'a [AuthorGroup]) -> Self {
        self.author_groups = groups;
        self
    }

    /// Role groups for statement assembly.
    #[must_use]
    pub fn role_groups(mut self, groups: &'a [RoleGroup]) -> Self {
        self.role_groups = groups;
        self
    }

    /// Record identifier, consulted for per-record indicator overrides.
    #[must_use]
    pub fn record_id(mut self, id: &'a str) -> Self {
        self.record_id = Some(id);
        self
    }

    /// Main-entry classification result, used for the first indicator.
    #[must_use]
    pub fn main_entry(mut self, heading: &'a HeadingResult) -> Self {
        self.main_entry = Some(heading);
        self
    }

    /// Round-trip engine for active-language transliteration.
    #[must_use]
    pub fn engine(mut self, engine: &'a RoundTripEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Record view consulted by structural prefilters during statement
    /// name classification.
    #[must_use]
    pub fn record(mut self, record: &'a dyn RecordView) -> Self {
        self.record = Some(record);
        self
    }

    /// Build the title field.
    ///
    /// Infallible: a transliteration failure degrades to the
    /// untransliterated title (with a warning logged) rather than aborting
    /// the record.
    #[must_use]
    pub fn build(self) -> TitleResult {
        let trimmed = self.title.trim();
        let raw = if trimmed.is_empty() || trimmed == "-" {
            NO_TITLE
        } else {
            trimmed
        };

        // Pre-pass: an embedded author statement after " / " bypasses group
        // assembly and is passed through verbatim.
        let (head, tail) = match raw.find(STATEMENT_SEPARATOR) {
            Some(pos) => (
                raw[..pos].trim_end(),
                Some(&raw[pos + STATEMENT_SEPARATOR.len()..]),
            ),
            None => (raw, None),
        };

        let head = self.transliterated(head);

        let mut count = leading_article_count(&head, self.language);
        if let Some(explicit) = self.record_id.and_then(tables::indicator_override) {
            count = explicit;
        }

        let medium = medium_designator(self.forms);
        let mut title_text = render_title(&head, medium.as_deref());

        let mut ctx = ClassifyContext::new(self.language);
        if let Some(record) = self.record {
            ctx = ctx.record(record);
        }
        if let Some(engine) = self.engine {
            ctx = ctx.engine(engine);
        }
        let mut statement = assemble(self.author_groups, self.role_groups, tail, &ctx);

        // Terminal punctuation lands on the last rendered part.
        match statement.as_mut() {
            Some(statement) => close_punctuation(statement),
            None => close_punctuation(&mut title_text),
        }

        TitleResult {
            leading_article_count: count,
            has_prior_heading_field: self
                .main_entry
                .is_some_and(|h| h.tag().is_some_and(|t| t.starts_with('1'))),
            title_text,
            medium_designator: medium,
            statement_of_responsibility: statement,
        }
    }

    /// Title text in the record's vernacular, or unchanged when the record
    /// is not in the active language, no engine is attached, or the
    /// transliteration fails structurally.
    fn transliterated(&self, head: &str) -> String {
        if self.language != ACTIVE_LANGUAGE {
            return head.to_string();
        }
        let Some(engine) = self.engine else {
            return head.to_string();
        };
        match engine.transliterate(head, self.parallel_languages) {
            Ok(result) => result.cyrillic,
            Err(err) => {
                log::warn!("keeping title {head:?} untransliterated: {err}");
                head.to_string()
            }
        }
    }
}

/// Delimiter starting the subtitle section.
enum Subtitle {
    Colon,
    Semicolon,
}

/// First subtitle delimiter in the title: a `':'` or a `" ; "` sequence,
/// whichever comes first.
fn split_point(head: &str) -> Option<(usize, Subtitle)> {
    let colon = memchr(b':', head.as_bytes());
    let semicolon = head.find(" ; ");
    match (colon, semicolon) {
        (Some(c), Some(s)) if c < s => Some((c, Subtitle::Colon)),
        (Some(c), None) => Some((c, Subtitle::Colon)),
        (_, Some(s)) => Some((s, Subtitle::Semicolon)),
        (None, None) => None,
    }
}

/// Render the title proper: the subtitle boundary becomes `" :$b"` or
/// `" ;$b"` with surrounding input whitespace absorbed, and the medium
/// designator sits between title and boundary.
fn render_title(head: &str, medium: Option<&str>) -> String {
    let medium_part = medium.map(|m| format!("$h{m}")).unwrap_or_default();
    match split_point(head) {
        Some((pos, delimiter)) => {
            let (skip, marker) = match delimiter {
                Subtitle::Colon => (1, " :$b"),
                Subtitle::Semicolon => (3, " ;$b"),
            };
            let title_part = head[..pos].trim_end();
            let subtitle = head[pos + skip..].trim_start();
            format!("{title_part}{medium_part}{marker}{subtitle}")
        }
        None => format!("{head}{medium_part}"),
    }
}

/// Map form tokens to a deduplicated, alphabetically ordered, bracketed
/// medium designator. Unknown tokens are skipped.
fn medium_designator(forms: &[&str]) -> Option<String> {
    let mut mediums: Vec<&str> = forms
        .iter()
        .filter_map(|form| {
            let mapped = tables::FORM_MEDIUM.get(form.trim()).copied();
            if mapped.is_none() {
                log::debug!("form token {form:?} has no medium mapping; skipped");
            }
            mapped
        })
        .collect();
    if mediums.is_empty() {
        return None;
    }
    mediums.sort_unstable();
    mediums.dedup();
    Some(format!("[{}]", mediums.join(" ; ")))
}

/// Non-filing count: byte length of a known leading article (delimiter
/// included) in the title's language. Every table entry fits in 0–4.
fn leading_article_count(text: &str, language: &str) -> u8 {
    let Some(articles) = tables::leading_articles(language) else {
        return 0;
    };
    for article in articles {
        if text.len() > article.len() && text.starts_with(article) {
            #[allow(clippy::cast_possible_truncation)]
            return article.len() as u8;
        }
    }
    0
}

/// Close the field with a period unless it already ends in terminal
/// punctuation. Closing brackets and parentheses still take the period.
fn close_punctuation(text: &mut String) {
    if !matches!(
        text.chars().next_back(),
        Some('.' | '-' | ',' | ';' | ':')
    ) {
        text.push('.');
    }
}
