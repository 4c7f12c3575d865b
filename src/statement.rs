//! Statement-of-responsibility assembly.
//!
//! Contributor groups render into the statement section of the title field:
//! author groups first, then role groups, joined with `" ; "` and prefixed
//! with `" /$c"`. An explicit author statement embedded in the title after
//! `" / "` replaces group assembly entirely.
//!
//! Names inside a statement render in vernacular (Cyrillic) form when the
//! record is in the active language, and any subfield markers from
//! classification are flattened to plain comma-separated text; a statement
//! is transcription, not a heading.
//!
//! # Examples
//!
//! ```
//! use marcgen::classify::{ClassifyContext, NameComponent};
//! use marcgen::statement::{assemble, AuthorGroup};
//!
//! let groups = [AuthorGroup::new(vec![
//!     NameComponent::new("Jacobson").qualifier("G. G."),
//! ])];
//! let statement = assemble(&groups, &[], None, &ClassifyContext::new("eng"));
//!
//! assert_eq!(statement.as_deref(), Some(" /$cJacobson, G. G."));
//! ```

use crate::classify::{classify, ClassifyContext, NameComponent, NameForm};
use serde::{Deserialize, Serialize};

/// Entry that stands for "no name" in the legacy data.
const PLACEHOLDER: &str = "-";

/// Ordered run of contributors sharing one byline, with an optional trailing
/// role suffix such as `"eds."`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorGroup {
    /// Contributors in source order.
    pub names: Vec<NameComponent>,
    /// Role suffix applying to the whole group.
    pub group_role_suffix: Option<String>,
}

impl AuthorGroup {
    /// Group over the given names, with no role suffix.
    #[must_use]
    pub fn new(names: Vec<NameComponent>) -> Self {
        AuthorGroup {
            names,
            group_role_suffix: None,
        }
    }

    /// Set the trailing role suffix.
    #[must_use]
    pub fn role_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.group_role_suffix = Some(suffix.into());
        self
    }
}

/// A role label together with the contributors performing that role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGroup {
    /// Role label, e.g. `"ill."` or `"photogr."`.
    pub role: String,
    /// Contributors in source order.
    pub names: Vec<NameComponent>,
}

impl RoleGroup {
    /// Role group over the given names.
    #[must_use]
    pub fn new(role: impl Into<String>, names: Vec<NameComponent>) -> Self {
        RoleGroup {
            role: role.into(),
            names,
        }
    }
}

/// Assemble the statement of responsibility for one record.
///
/// `explicit_statement` is the verbatim tail the title pre-pass extracted
/// after `" / "`; when present (and non-blank) it bypasses group assembly
/// entirely. Otherwise author groups render first, then role groups, in
/// source order. Returns `None` when nothing contributes output; the
/// returned string always carries the `" /$c"` statement prefix.
#[must_use]
pub fn assemble(
    author_groups: &[AuthorGroup],
    role_groups: &[RoleGroup],
    explicit_statement: Option<&str>,
    ctx: &ClassifyContext<'_>,
) -> Option<String> {
    if let Some(tail) = explicit_statement {
        let tail = tail.trim();
        if tail.is_empty() {
            return None;
        }
        return Some(format!(" /$c{tail}"));
    }

    let ctx = ClassifyContext {
        form: NameForm::Vernacular,
        ..*ctx
    };

    let mut parts: Vec<String> = Vec::new();
    for group in author_groups {
        if let Some(rendered) = render_author_group(group, &ctx) {
            parts.push(rendered);
        }
    }
    for group in role_groups {
        if let Some(rendered) = render_role_group(group, &ctx) {
            parts.push(rendered);
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!(" /$c{}", parts.join(" ; ")))
    }
}

/// Render one author group: names joined with `", "`, then the group role
/// suffix. A group with no renderable name contributes nothing, even when a
/// suffix is present; a `"-"` suffix is a placeholder and never appended.
fn render_author_group(group: &AuthorGroup, ctx: &ClassifyContext<'_>) -> Option<String> {
    let names = statement_names(&group.names, ctx);
    if names.is_empty() {
        return None;
    }
    let mut rendered = names.join(", ");
    if let Some(suffix) = group.group_role_suffix.as_deref().map(str::trim) {
        if !suffix.is_empty() && suffix != PLACEHOLDER {
            rendered.push(' ');
            rendered.push_str(suffix);
        }
    }
    Some(rendered)
}

/// Render one role group: the role label, a space, and an and-list of its
/// names. A blank role label drops the group; a role with no renderable
/// names still contributes the bare label.
fn render_role_group(group: &RoleGroup, ctx: &ClassifyContext<'_>) -> Option<String> {
    let role = group.role.trim();
    if role.is_empty() {
        return None;
    }
    let names = statement_names(&group.names, ctx);
    if names.is_empty() {
        return Some(role.to_string());
    }
    Some(format!("{role} {}", and_list(&names)))
}

/// Classify each name for statement use: placeholders skipped, suppressed
/// results skipped, subfield markers flattened to comma-separated text.
fn statement_names(names: &[NameComponent], ctx: &ClassifyContext<'_>) -> Vec<String> {
    names
        .iter()
        .filter(|component| component.principal.trim() != PLACEHOLDER)
        .map(|component| classify(component, ctx))
        .filter(|heading| !heading.text.is_empty())
        .map(|heading| flatten_markers(&heading.text))
        .collect()
}

/// Comma-separated list with `"and"` before the final entry.
fn and_list(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [head @ .., last] => format!("{} and {last}", head.join(", ")),
    }
}

/// Replace each `$x` subfield marker with `", "`. Marker codes are lowercase
/// letters; a `$` followed by anything else is literal text.
fn flatten_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '$' && chars.peek().is_some_and(char::is_ascii_lowercase) {
            chars.next();
            out.push_str(", ");
        } else {
            out.push(c);
        }
    }
    out
}
