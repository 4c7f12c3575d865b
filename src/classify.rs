//! Name heading classification.
//!
//! Converts one structured name occurrence from the legacy catalogue into a
//! MARC heading fragment. Classification is a precedence chain over the
//! lookup tables; the first matching rule wins, so every component yields
//! exactly one [`FieldVariant`]. The variant is the explicit form of the
//! side-channel flags the legacy source used to choose 100 vs 110 vs 111:
//! callers read the field choice from the returned value, not from
//! cross-call state.
//!
//! Descriptors on personal names go through a secondary chain: compound
//! templates, then prefixes, suffixes, nobiliary particles, date shapes
//! (trailing slot only), relator terms, miscellany, and affiliations. A
//! descriptor matching nothing is dropped and recorded on the result for
//! data-quality review; dropping is never an error.
//!
//! Name components in the record's active transliteration language render
//! through the round-trip engine: ALA-LC Latin for heading fields,
//! reconstructed Cyrillic for statement-of-responsibility text. A
//! transliteration failure degrades to the untransliterated value and never
//! aborts the record.
//!
//! # Examples
//!
//! ```
//! use marcgen::classify::{classify, ClassifyContext, FieldVariant, NameComponent};
//!
//! let component = NameComponent::new("Jacobson")
//!     .qualifier("G. G.")
//!     .trailing("ed.");
//! let heading = classify(&component, &ClassifyContext::new("eng"));
//!
//! assert_eq!(heading.variant, FieldVariant::PersonalIndirect);
//! assert_eq!(heading.text, "Jacobson, G. G.$eeditor");
//! assert!(heading.promote_to_added);
//! assert_eq!(heading.tag(), Some("700"));
//! ```

use crate::record_view::RecordView;
use crate::roundtrip::RoundTripEngine;
use crate::tables::{self, normalize_for_lookup, ACTIVE_LANGUAGE};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Ordered subfield fragments of one heading; typical headings carry few.
type Fragments = SmallVec<[(char, String); 4]>;

/// Target romanization form for rendered names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameForm {
    /// ALA-LC Latin, the authority-compatible form used in heading fields.
    #[default]
    Authority,
    /// Reconstructed Cyrillic, used inside statements of responsibility.
    Vernacular,
}

/// One structured name occurrence from the legacy record.
///
/// `descriptor` is the name-attached descriptor slot (titles of address,
/// particles, affiliations); `trailing` is the trailing slot, which may also
/// carry a date range or a role abbreviation. A non-empty `qualifier` forces
/// indirect (surname-first) rendering unless the principal is a known
/// direct-order name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameComponent {
    /// Surname or sole name.
    pub principal: String,
    /// Forename or initials.
    pub qualifier: Option<String>,
    /// Descriptor attached to the name.
    pub descriptor: Option<String>,
    /// Trailing role or date-range descriptor.
    pub trailing: Option<String>,
    /// Explicit language tag overriding the record default.
    pub language_override: Option<String>,
}

impl NameComponent {
    /// Component with just a principal name.
    #[must_use]
    pub fn new(principal: impl Into<String>) -> Self {
        NameComponent {
            principal: principal.into(),
            ..NameComponent::default()
        }
    }

    /// Set the forename/initials qualifier.
    #[must_use]
    pub fn qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    /// Set the name-attached descriptor.
    #[must_use]
    pub fn descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.descriptor = Some(descriptor.into());
        self
    }

    /// Set the trailing descriptor.
    #[must_use]
    pub fn trailing(mut self, trailing: impl Into<String>) -> Self {
        self.trailing = Some(trailing.into());
        self
    }

    /// Override the record default language for this component.
    #[must_use]
    pub fn language_override(mut self, tag: impl Into<String>) -> Self {
        self.language_override = Some(tag.into());
        self
    }
}

/// Heading field variant chosen by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldVariant {
    /// Personal name in direct order (forename first).
    PersonalDirect,
    /// Personal name in indirect order (surname first).
    PersonalIndirect,
    /// Corporate body name.
    Corporate,
    /// Meeting or conference name.
    Meeting,
    /// Anonymous author placeholder.
    Anonymous,
    /// No heading is produced for this component.
    Suppressed,
}

/// Output of one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingResult {
    /// Chosen heading field variant.
    pub variant: FieldVariant,
    /// Rendered heading fragment with embedded subfield markers.
    pub text: String,
    /// Heading belongs in an added-entry (7xx) field, not a main entry.
    /// Set when the relator term is "editor" or "compiler".
    pub promote_to_added: bool,
    /// Descriptors that matched no lookup table and were dropped.
    ///
    /// Not an error; exposed so callers can count and report them for
    /// data-quality review.
    pub dropped_descriptors: Vec<String>,
}

impl HeadingResult {
    fn suppressed() -> Self {
        HeadingResult {
            variant: FieldVariant::Suppressed,
            text: String::new(),
            promote_to_added: false,
            dropped_descriptors: Vec::new(),
        }
    }

    /// MARC tag for this heading: the 1xx main-entry tag, or the 7xx
    /// added-entry tag when promoted. `None` when suppressed.
    #[must_use]
    pub fn tag(&self) -> Option<&'static str> {
        let (main, added) = match self.variant {
            FieldVariant::PersonalDirect
            | FieldVariant::PersonalIndirect
            | FieldVariant::Anonymous => ("100", "700"),
            FieldVariant::Corporate => ("110", "710"),
            FieldVariant::Meeting => ("111", "711"),
            FieldVariant::Suppressed => return None,
        };
        Some(if self.promote_to_added { added } else { main })
    }

    /// First indicator: name order for personal fields, direct order for
    /// corporate and meeting fields. Blank when suppressed.
    #[must_use]
    pub fn indicator1(&self) -> char {
        match self.variant {
            FieldVariant::PersonalDirect => '0',
            FieldVariant::PersonalIndirect | FieldVariant::Anonymous => '1',
            FieldVariant::Corporate | FieldVariant::Meeting => '2',
            FieldVariant::Suppressed => ' ',
        }
    }

    /// Second indicator. Blank for every field this crate emits.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn indicator2(&self) -> char {
        ' '
    }

    /// Whether classification produced no heading at all.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.variant == FieldVariant::Suppressed
    }
}

/// Record-level context for one classification call.
///
/// Carries the record's default language tag, an optional read-only record
/// view for structural prefilters, an optional round-trip engine for
/// active-language name forms, and the target [`NameForm`].
#[derive(Clone, Copy)]
pub struct ClassifyContext<'a> {
    pub(crate) language: &'a str,
    pub(crate) record: Option<&'a dyn RecordView>,
    pub(crate) engine: Option<&'a RoundTripEngine>,
    pub(crate) form: NameForm,
}

impl std::fmt::Debug for ClassifyContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifyContext")
            .field("language", &self.language)
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}

impl<'a> ClassifyContext<'a> {
    /// Context with the record's default language tag.
    #[must_use]
    pub fn new(language: &'a str) -> Self {
        ClassifyContext {
            language,
            record: None,
            engine: None,
            form: NameForm::Authority,
        }
    }

    /// Attach the record view consulted by structural prefilters.
    #[must_use]
    pub fn record(mut self, record: &'a dyn RecordView) -> Self {
        self.record = Some(record);
        self
    }

    /// Attach the round-trip engine used for active-language name forms.
    #[must_use]
    pub fn engine(mut self, engine: &'a RoundTripEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Select the target name form.
    #[must_use]
    pub fn form(mut self, form: NameForm) -> Self {
        self.form = form;
        self
    }

    /// Normalize a name value and, for active-language components with an
    /// engine attached, convert it to the target form.
    fn render_name(&self, value: &str, active: bool) -> String {
        let normalized = normalize_for_lookup(value);
        let trimmed = normalized.trim();
        match (active, self.engine) {
            (true, Some(engine)) => match self.form {
                NameForm::Authority => engine.authority_form(trimmed),
                NameForm::Vernacular => engine.vernacular_form(trimmed),
            },
            _ => trimmed.to_string(),
        }
    }
}

/// Classify one name component into a heading fragment.
///
/// The precedence chain, first match wins: no-heading placeholders,
/// anonymous tokens, known direct-order names, known bare surnames,
/// conference keywords, the qualifier-forces-indirect rule, and finally the
/// corporate fallback.
#[must_use]
pub fn classify(component: &NameComponent, ctx: &ClassifyContext<'_>) -> HeadingResult {
    let normalized = normalize_for_lookup(&component.principal);
    let principal = normalized.trim();

    if principal.is_empty() || tables::NO_HEADING.contains(principal) {
        return HeadingResult::suppressed();
    }
    if tables::ANONYMOUS_TOKENS.contains(principal) {
        return HeadingResult {
            variant: FieldVariant::Anonymous,
            text: "Anonymous".to_string(),
            promote_to_added: false,
            dropped_descriptors: Vec::new(),
        };
    }
    if tables::NAMES_IN_DIRECT_ORDER.contains(principal) {
        return render_personal(component, ctx, true);
    }
    if tables::SURNAME_ONLY.contains(principal) {
        return render_personal(component, ctx, false);
    }
    if is_meeting_name(principal) {
        return render_collective(component, ctx, FieldVariant::Meeting);
    }
    if component
        .qualifier
        .as_deref()
        .is_some_and(|q| !q.trim().is_empty())
    {
        return render_personal(component, ctx, false);
    }
    render_collective(component, ctx, FieldVariant::Corporate)
}

/// Conference keyword scan. "United States" together with "congress" names
/// a legislature, not a meeting; it falls through to the corporate rule.
fn is_meeting_name(principal: &str) -> bool {
    let lower = principal.to_lowercase();
    tables::CONFERENCE_KEYWORDS.iter().any(|keyword| {
        lower.contains(keyword) && !(*keyword == "congress" && principal.contains("United States"))
    })
}

fn is_active_language(component: &NameComponent, ctx: &ClassifyContext<'_>) -> bool {
    component
        .language_override
        .as_deref()
        .unwrap_or(ctx.language)
        == ACTIVE_LANGUAGE
}

/// Render a personal heading, direct or indirect order, and classify its
/// descriptors through the secondary chain.
fn render_personal(
    component: &NameComponent,
    ctx: &ClassifyContext<'_>,
    direct: bool,
) -> HeadingResult {
    let active = is_active_language(component, ctx);
    let qualifier = component
        .qualifier
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(|q| ctx.render_name(q, active));

    let mut name = ctx.render_name(&component.principal, active);
    if let Some(q) = &qualifier {
        if direct {
            name.push(' ');
        } else {
            name.push_str(", ");
        }
        name.push_str(q);
    }

    let mut fragments = Fragments::new();
    let mut dropped = Vec::new();
    let mut promote = false;

    for (slot, trailing) in [(&component.descriptor, false), (&component.trailing, true)] {
        let Some(descriptor) = slot.as_deref().map(str::trim).filter(|d| !d.is_empty()) else {
            continue;
        };
        match classify_descriptor(descriptor, trailing, ctx.record) {
            DescriptorOutcome::Compound(parts) => fragments.extend(parts),
            DescriptorOutcome::Prefix(prefix) => name = format!("{prefix} {name}"),
            DescriptorOutcome::Suffix(suffix) => {
                name.push_str(", ");
                name.push_str(&suffix);
            }
            DescriptorOutcome::Particle(particle) => {
                // "Principal, Qualifier particle": the particle closes the
                // inverted qualifier section.
                if qualifier.is_some() {
                    name.push(' ');
                } else {
                    name.push_str(", ");
                }
                name.push_str(&particle);
            }
            DescriptorOutcome::Date(date) => fragments.push(('d', date)),
            DescriptorOutcome::Relator(term) => {
                if term == "editor" || term == "compiler" {
                    promote = true;
                }
                fragments.push(('e', term.to_string()));
            }
            DescriptorOutcome::Misc(misc) => fragments.push(('c', format!("({misc})"))),
            DescriptorOutcome::Affiliation(affiliation) => fragments.push(('u', affiliation)),
            DescriptorOutcome::Dropped => {
                log::debug!("descriptor {descriptor:?} matched no lookup table; dropped");
                dropped.push(descriptor.to_string());
            }
        }
    }

    let mut text = name;
    for (code, value) in &fragments {
        text.push('$');
        text.push(*code);
        text.push_str(value);
    }

    HeadingResult {
        variant: if direct {
            FieldVariant::PersonalDirect
        } else {
            FieldVariant::PersonalIndirect
        },
        text,
        promote_to_added: promote,
        dropped_descriptors: dropped,
    }
}

/// Render a corporate or meeting heading.
///
/// The descriptor chain is scoped to personal names; descriptors found on a
/// collective name are recorded as dropped for review.
fn render_collective(
    component: &NameComponent,
    ctx: &ClassifyContext<'_>,
    variant: FieldVariant,
) -> HeadingResult {
    let active = is_active_language(component, ctx);
    let mut text = ctx.render_name(&component.principal, active);
    if let Some(q) = component
        .qualifier
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
    {
        text.push_str(", ");
        text.push_str(&ctx.render_name(q, active));
    }

    let mut dropped = Vec::new();
    for slot in [&component.descriptor, &component.trailing] {
        if let Some(descriptor) = slot.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            log::debug!("descriptor {descriptor:?} on a collective heading; dropped");
            dropped.push(descriptor.to_string());
        }
    }

    HeadingResult {
        variant,
        text,
        promote_to_added: false,
        dropped_descriptors: dropped,
    }
}

/// One descriptor's classification under the secondary precedence chain.
enum DescriptorOutcome {
    Compound(Fragments),
    Prefix(String),
    Suffix(String),
    Particle(String),
    Date(String),
    Relator(&'static str),
    Misc(String),
    Affiliation(String),
    Dropped,
}

fn classify_descriptor(
    descriptor: &str,
    trailing: bool,
    record: Option<&dyn RecordView>,
) -> DescriptorOutcome {
    let normalized = normalize_for_lookup(descriptor);
    let d = normalized.trim();

    if let Some(parts) = tables::COMPOUND_DESCRIPTORS.get(d) {
        return DescriptorOutcome::Compound(
            parts
                .iter()
                .map(|(code, value)| (*code, (*value).to_string()))
                .collect(),
        );
    }
    if tables::PREFIXES.contains(d) {
        return DescriptorOutcome::Prefix(d.to_string());
    }
    if tables::SUFFIXES.contains(d) {
        return DescriptorOutcome::Suffix(d.to_string());
    }
    if tables::PARTICLES.contains(d) {
        return DescriptorOutcome::Particle(d.to_string());
    }
    if trailing && tables::is_date_descriptor(d) {
        return DescriptorOutcome::Date(d.to_string());
    }
    if let Some(relator) = tables::match_relator(d, record) {
        return DescriptorOutcome::Relator(relator.term);
    }
    if tables::MISC_LIST.contains(d) {
        return DescriptorOutcome::Misc(d.to_string());
    }
    if tables::AFFILIATION_LIST.contains(d) {
        return DescriptorOutcome::Affiliation(d.to_string());
    }
    DescriptorOutcome::Dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_view::PathTree;

    fn ctx() -> ClassifyContext<'static> {
        ClassifyContext::new("eng")
    }

    // ---- precedence chain ----

    #[test]
    fn test_placeholder_principal_is_suppressed() {
        for principal in ["-", "--", "et al.", "[s.n.]"] {
            let heading = classify(&NameComponent::new(principal), &ctx());
            assert!(heading.is_suppressed(), "{principal}");
            assert!(heading.text.is_empty());
            assert_eq!(heading.tag(), None);
        }
    }

    #[test]
    fn test_empty_principal_is_suppressed() {
        assert!(classify(&NameComponent::new("  "), &ctx()).is_suppressed());
    }

    #[test]
    fn test_anonymous_token() {
        let heading = classify(&NameComponent::new("Anon."), &ctx());
        assert_eq!(heading.variant, FieldVariant::Anonymous);
        assert_eq!(heading.text, "Anonymous");
        assert_eq!(heading.tag(), Some("100"));
        assert_eq!(heading.indicator1(), '1');
    }

    #[test]
    fn test_direct_order_name() {
        let heading = classify(&NameComponent::new("Avicenna"), &ctx());
        assert_eq!(heading.variant, FieldVariant::PersonalDirect);
        assert_eq!(heading.text, "Avicenna");
        assert_eq!(heading.indicator1(), '0');
    }

    #[test]
    fn test_surname_only_name_takes_qualifier() {
        let heading = classify(
            &NameComponent::new("Motschulsky").qualifier("V. I."),
            &ctx(),
        );
        assert_eq!(heading.variant, FieldVariant::PersonalIndirect);
        assert_eq!(heading.text, "Motschulsky, V. I.");
        assert_eq!(heading.indicator1(), '1');
    }

    #[test]
    fn test_surname_only_without_qualifier() {
        let heading = classify(&NameComponent::new("Reitter"), &ctx());
        assert_eq!(heading.variant, FieldVariant::PersonalIndirect);
        assert_eq!(heading.text, "Reitter");
    }

    #[test]
    fn test_conference_keyword_makes_meeting() {
        let heading = classify(
            &NameComponent::new("International Entomological Congress"),
            &ctx(),
        );
        assert_eq!(heading.variant, FieldVariant::Meeting);
        assert_eq!(heading.tag(), Some("111"));
        assert_eq!(heading.indicator1(), '2');
    }

    #[test]
    fn test_united_states_congress_is_corporate() {
        let heading = classify(&NameComponent::new("United States Congress"), &ctx());
        assert_eq!(heading.variant, FieldVariant::Corporate);
        assert_eq!(heading.tag(), Some("110"));
    }

    #[test]
    fn test_qualifier_forces_indirect_order() {
        let heading = classify(&NameComponent::new("Ivanov").qualifier("I. I."), &ctx());
        assert_eq!(heading.variant, FieldVariant::PersonalIndirect);
        assert_eq!(heading.text, "Ivanov, I. I.");
    }

    #[test]
    fn test_bare_unknown_name_is_corporate() {
        let heading = classify(&NameComponent::new("Zoological Institute"), &ctx());
        assert_eq!(heading.variant, FieldVariant::Corporate);
        assert_eq!(heading.text, "Zoological Institute");
    }

    // ---- descriptor chain ----

    #[test]
    fn test_compound_descriptor_template() {
        let heading = classify(
            &NameComponent::new("Ivanov").qualifier("A.").descriptor("Sr SGM"),
            &ctx(),
        );
        assert_eq!(heading.text, "Ivanov, A.$cSr$uSGM");
        assert!(heading.dropped_descriptors.is_empty());
    }

    #[test]
    fn test_prefix_descriptor_renders_before_name() {
        let heading = classify(
            &NameComponent::new("Hill").qualifier("John").descriptor("Sir"),
            &ctx(),
        );
        assert_eq!(heading.text, "Sir Hill, John");
    }

    #[test]
    fn test_suffix_descriptor_appends_after_comma() {
        let heading = classify(
            &NameComponent::new("Smith").qualifier("John").descriptor("Jr."),
            &ctx(),
        );
        assert_eq!(heading.text, "Smith, John, Jr.");
    }

    #[test]
    fn test_particle_descriptor_closes_qualifier_section() {
        let heading = classify(
            &NameComponent::new("Beethoven")
                .qualifier("Ludwig")
                .descriptor("van"),
            &ctx(),
        );
        assert_eq!(heading.text, "Beethoven, Ludwig van");
    }

    #[test]
    fn test_trailing_date_renders_date_subfield() {
        let heading = classify(
            &NameComponent::new("Jacobson").qualifier("G. G.").trailing("1871-1926"),
            &ctx(),
        );
        assert_eq!(heading.text, "Jacobson, G. G.$d1871-1926");
    }

    #[test]
    fn test_attached_date_shape_is_not_a_date() {
        // Dates classify only in the trailing slot.
        let heading = classify(
            &NameComponent::new("Jacobson").qualifier("G. G.").descriptor("1871-1926"),
            &ctx(),
        );
        assert_eq!(heading.text, "Jacobson, G. G.");
        assert_eq!(heading.dropped_descriptors, vec!["1871-1926".to_string()]);
    }

    #[test]
    fn test_editor_relator_promotes_to_added_entry() {
        let heading = classify(
            &NameComponent::new("Ivanov").qualifier("I.").trailing("ed."),
            &ctx(),
        );
        assert_eq!(heading.text, "Ivanov, I.$eeditor");
        assert!(heading.promote_to_added);
        assert_eq!(heading.tag(), Some("700"));
    }

    #[test]
    fn test_compiler_relator_promotes_to_added_entry() {
        let heading = classify(
            &NameComponent::new("Ivanov").qualifier("I.").trailing("sost."),
            &ctx(),
        );
        assert_eq!(heading.text, "Ivanov, I.$ecompiler");
        assert!(heading.promote_to_added);
    }

    #[test]
    fn test_translator_relator_does_not_promote() {
        let heading = classify(
            &NameComponent::new("Ivanov").qualifier("I.").trailing("per."),
            &ctx(),
        );
        assert_eq!(heading.text, "Ivanov, I.$etranslator");
        assert!(!heading.promote_to_added);
        assert_eq!(heading.tag(), Some("100"));
    }

    #[test]
    fn test_illustrator_relator_matches_as_substring() {
        let heading = classify(
            &NameComponent::new("Ivanov").qualifier("I.").trailing("ill. in color"),
            &ctx(),
        );
        assert_eq!(heading.text, "Ivanov, I.$eillustrator");
        assert!(!heading.promote_to_added);
    }

    #[test]
    fn test_illustrator_not_prefilter_vetoes_state_abbreviation() {
        let heading = classify(
            &NameComponent::new("Ivanov").qualifier("I.").trailing("ill. Chicago, Ill."),
            &ctx(),
        );
        assert_eq!(heading.text, "Ivanov, I.");
        assert_eq!(
            heading.dropped_descriptors,
            vec!["ill. Chicago, Ill.".to_string()]
        );
    }

    #[test]
    fn test_cartographer_requires_form_node() {
        let component = NameComponent::new("Ivanov").qualifier("I.").trailing("cart.");

        let without = classify(&component, &ctx());
        assert_eq!(without.dropped_descriptors, vec!["cart.".to_string()]);

        let mut tree = PathTree::new();
        tree.push("fo", "map");
        let with = classify(&component, &ctx().record(&tree));
        assert_eq!(with.text, "Ivanov, I.$ecartographer");
    }

    #[test]
    fn test_misc_descriptor_renders_parenthetically() {
        let heading = classify(
            &NameComponent::new("Ivanov").qualifier("I.").descriptor("pseud."),
            &ctx(),
        );
        assert_eq!(heading.text, "Ivanov, I.$c(pseud.)");
    }

    #[test]
    fn test_affiliation_descriptor_renders_affiliation_subfield() {
        let heading = classify(
            &NameComponent::new("Ivanov").qualifier("I.").descriptor("Zool. Inst."),
            &ctx(),
        );
        assert_eq!(heading.text, "Ivanov, I.$uZool. Inst.");
    }

    #[test]
    fn test_both_descriptor_slots_render_in_order() {
        let heading = classify(
            &NameComponent::new("Jacobson")
                .qualifier("G. G.")
                .descriptor("Zool. Inst.")
                .trailing("1871-1926"),
            &ctx(),
        );
        assert_eq!(heading.text, "Jacobson, G. G.$uZool. Inst.$d1871-1926");
    }

    #[test]
    fn test_unknown_descriptor_is_dropped_and_recorded() {
        let heading = classify(
            &NameComponent::new("Ivanov").qualifier("I.").descriptor("mystery"),
            &ctx(),
        );
        assert_eq!(heading.text, "Ivanov, I.");
        assert_eq!(heading.dropped_descriptors, vec!["mystery".to_string()]);
    }

    #[test]
    fn test_collective_heading_records_descriptors_as_dropped() {
        let heading = classify(
            &NameComponent::new("Zoological Institute").descriptor("pseud."),
            &ctx(),
        );
        assert_eq!(heading.variant, FieldVariant::Corporate);
        assert_eq!(heading.dropped_descriptors, vec!["pseud.".to_string()]);
    }

    // ---- transliteration of active-language names ----

    #[test]
    fn test_active_language_heading_uses_authority_form() {
        let engine = RoundTripEngine::new();
        let heading = classify(
            &NameComponent::new("Gogol'").qualifier("N. V."),
            &ClassifyContext::new("rus").engine(&engine),
        );
        // BGN "Gogol'" round-trips through Гоголь to ALA-LC "Gogolʹ".
        assert_eq!(heading.text, "Gogolʹ, N. V.");
    }

    #[test]
    fn test_vernacular_form_renders_cyrillic() {
        let engine = RoundTripEngine::new();
        let heading = classify(
            &NameComponent::new("Chetyrkin").qualifier("S. S."),
            &ClassifyContext::new("rus")
                .engine(&engine)
                .form(NameForm::Vernacular),
        );
        assert_eq!(heading.text, "Четыркин, С. С.");
    }

    #[test]
    fn test_language_override_skips_transliteration() {
        let engine = RoundTripEngine::new();
        let heading = classify(
            &NameComponent::new("Jacobson")
                .qualifier("G.")
                .language_override("eng"),
            &ClassifyContext::new("rus").engine(&engine),
        );
        assert_eq!(heading.text, "Jacobson, G.");
    }

    #[test]
    fn test_entity_encoded_principal_normalizes() {
        let heading = classify(&NameComponent::new("Dvor&aacute;k").qualifier("A."), &ctx());
        assert_eq!(heading.text, "Dvorák, A.");
    }
}
