//! Static lookup tables for name classification and transliteration protection.
//!
//! Every catalogue this crate consults at runtime lives here: direct-order and
//! surname-only name lists, descriptor tables (prefixes, suffixes, nobiliary
//! particles, relator terms, miscellany, affiliations), the protected-string
//! list used by the substring protector, leading-article tables, the
//! form→medium designator map, and the per-record indicator override table.
//!
//! All tables are loaded once at first use into immutable, shared structures
//! and are safe for unrestricted concurrent reads. The data is fixed per
//! release; there is no runtime mutation path.
//!
//! Lookups are case-preserving. Entity-encoded input (named character
//! references such as `&eacute;`) is normalized via [`normalize_for_lookup`]
//! before comparison so that visually-identical strings compare equal
//! regardless of encoding origin.

use crate::record_view::RecordView;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use unicode_normalization::{is_nfc_quick, IsNormalized, UnicodeNormalization};

/// Language tag of the transliteration target (the record "active" language).
pub const ACTIVE_LANGUAGE: &str = "rus";

/// Prefilter attached to a relator-term synonym.
///
/// The legacy source encoded these as a string mini-language
/// (`label//ONLY:x`, `label//NOT:x`, `label//REQUIRES:path`); here each
/// operator is an explicit variant evaluated by [`Prefilter::satisfied`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prefilter {
    /// No additional condition; a substring match on the label suffices.
    None,
    /// The descriptor must equal the given string exactly (full-string match).
    Only(&'static str),
    /// The descriptor must not contain the given substring.
    Not(&'static str),
    /// The record must have a value at the given tree path.
    Requires(&'static str),
}

impl Prefilter {
    /// Evaluate this prefilter against a descriptor and the record it came from.
    ///
    /// A `Requires` condition with no record view available, or one naming a
    /// path the record does not carry, evaluates to `false` (no match) rather
    /// than erroring: an undefined structural condition must degrade, never
    /// propagate.
    #[must_use]
    pub fn satisfied(&self, descriptor: &str, record: Option<&dyn RecordView>) -> bool {
        match self {
            Prefilter::None => true,
            Prefilter::Only(exact) => descriptor == *exact,
            Prefilter::Not(substring) => !descriptor.contains(substring),
            Prefilter::Requires(path) => record.is_some_and(|r| r.has(path)),
        }
    }
}

/// A relator-term synonym: a legacy descriptor label mapped to the MARC
/// relator term it stands for, guarded by a prefilter.
#[derive(Debug, Clone)]
pub struct RelatorTerm {
    /// Legacy descriptor label matched against the candidate (substring,
    /// case-preserving; `Prefilter::Only` upgrades this to full-string).
    pub label: &'static str,
    /// Controlled-vocabulary relator term rendered into the `$e` subfield.
    pub term: &'static str,
    /// Guard condition evaluated before the match is accepted.
    pub prefilter: Prefilter,
}

impl RelatorTerm {
    /// Check whether a descriptor matches this synonym.
    ///
    /// The base rule is a case-preserving substring match on the label;
    /// `Only` prefilters replace it with a full-string comparison, the other
    /// operators add a veto on top of the substring match.
    #[must_use]
    pub fn matches(&self, descriptor: &str, record: Option<&dyn RecordView>) -> bool {
        match &self.prefilter {
            Prefilter::Only(_) => self.prefilter.satisfied(descriptor, record),
            _ => {
                descriptor.contains(self.label) && self.prefilter.satisfied(descriptor, record)
            },
        }
    }
}

/// A literal entry in the protected-string list.
///
/// `boundary_free` literals (markup tokens, mid-word fragments) are replaced
/// wherever they occur; all others are replaced only at word boundaries.
#[derive(Debug, Clone, Copy)]
pub struct ProtectedLiteral {
    /// The exact text to protect.
    pub text: &'static str,
    /// Replace without requiring word boundaries around the occurrence.
    pub boundary_free: bool,
}

lazy_static! {
    /// Personal names catalogued in direct order (no surname inversion).
    pub static ref NAMES_IN_DIRECT_ORDER: HashSet<&'static str> = [
        "Avicenna",
        "Linnaeus",
        "Aristotle",
        "Pliny the Elder",
        "Ivan IV",
        "Peter I",
        "Catherine II",
    ]
    .into_iter()
    .collect();

    /// Names known to be bare surnames even without a qualifier.
    pub static ref SURNAME_ONLY: HashSet<&'static str> = [
        "Motschulsky",
        "Semenov-Tian-Shansky",
        "Jacobson",
        "Reitter",
        "Fabricius",
        "Latreille",
        "Chetyrkin",
    ]
    .into_iter()
    .collect();

    /// Placeholder principals that must produce no heading at all.
    pub static ref NO_HEADING: HashSet<&'static str> = [
        "-",
        "--",
        "et al.",
        "[s.n.]",
        "various",
        "Various",
    ]
    .into_iter()
    .collect();

    /// Principals standing for an anonymous author.
    pub static ref ANONYMOUS_TOKENS: HashSet<&'static str> = [
        "Anon.",
        "Anonymous",
        "Anonymus",
        "anon.",
    ]
    .into_iter()
    .collect();

    /// Lowercased substrings marking a meeting/conference name.
    pub static ref CONFERENCE_KEYWORDS: Vec<&'static str> = vec![
        "congress",
        "conference",
        "symposium",
        "colloquium",
        "workshop",
        "s\"ezd",
        "soveshchanie",
    ];

    /// Descriptors rendered before the name (titles of address and rank).
    pub static ref PREFIXES: HashSet<&'static str> = [
        "Sir", "Dame", "Lady", "Lord", "Mrs.", "Miss", "Mme", "Mlle",
        "Dr.", "Prof.", "Rev.", "Capt.", "Col.", "Gen.", "Baron", "Graf",
    ]
    .into_iter()
    .collect();

    /// Descriptors appended to the name part after a comma.
    pub static ref SUFFIXES: HashSet<&'static str> = [
        "Jr.", "Sr.", "Esq.", "fils", "père", "II", "III", "IV",
    ]
    .into_iter()
    .collect();

    /// Nobiliary particles rendered between qualifier and principal.
    pub static ref PARTICLES: HashSet<&'static str> = [
        "van", "von", "de", "der", "den", "di", "da", "del", "della",
        "du", "la", "le", "ten", "ter", "zu", "zur",
        "van der", "van den", "von der", "de la",
    ]
    .into_iter()
    .collect();

    /// Hard-coded compound descriptor templates, checked before every other
    /// descriptor table. Each template expands to an ordered list of
    /// (subfield code, value) fragments.
    pub static ref COMPOUND_DESCRIPTORS: IndexMap<&'static str, &'static [(char, &'static str)]> = {
        let mut m: IndexMap<&'static str, &'static [(char, &'static str)]> = IndexMap::new();
        m.insert("Sr SGM", &[('c', "Sr"), ('u', "SGM")][..]);
        m.insert("Rev. S.J.", &[('c', "Rev."), ('u', "S.J.")][..]);
        m.insert("Br. O.F.M.", &[('c', "Br."), ('u', "O.F.M.")][..]);
        m.insert("Sr O.S.B.", &[('c', "Sr"), ('u', "O.S.B.")][..]);
        m
    };

    /// Relator-term synonyms in precedence order.
    ///
    /// Labels are legacy catalogue abbreviations, both English and romanized
    /// Russian. Ambiguous short labels carry `Only` (exact-match) prefilters;
    /// `ill.` carries a `Not` veto so the Illinois state abbreviation never
    /// reads as "illustrator"; `cart.` requires the record to carry a form
    /// node before "cartographer" is accepted.
    pub static ref RELATOR_TERMS: Vec<RelatorTerm> = vec![
        RelatorTerm { label: "eds.", term: "editor", prefilter: Prefilter::Only("eds.") },
        RelatorTerm { label: "ed.", term: "editor", prefilter: Prefilter::Only("ed.") },
        RelatorTerm { label: "red.", term: "editor", prefilter: Prefilter::Only("red.") },
        RelatorTerm { label: "otv. red.", term: "editor", prefilter: Prefilter::None },
        RelatorTerm { label: "glav. red.", term: "editor", prefilter: Prefilter::None },
        RelatorTerm { label: "comp.", term: "compiler", prefilter: Prefilter::Only("comp.") },
        RelatorTerm { label: "sost.", term: "compiler", prefilter: Prefilter::Only("sost.") },
        RelatorTerm { label: "tr.", term: "translator", prefilter: Prefilter::Only("tr.") },
        RelatorTerm { label: "per.", term: "translator", prefilter: Prefilter::Only("per.") },
        RelatorTerm { label: "transl.", term: "translator", prefilter: Prefilter::None },
        RelatorTerm { label: "ill.", term: "illustrator", prefilter: Prefilter::Not("Ill.") },
        RelatorTerm { label: "illus.", term: "illustrator", prefilter: Prefilter::None },
        RelatorTerm { label: "photogr.", term: "photographer", prefilter: Prefilter::None },
        RelatorTerm { label: "cart.", term: "cartographer", prefilter: Prefilter::Requires("fo") },
    ];

    /// Descriptors rendered parenthetically in a `$c` subfield.
    pub static ref MISC_LIST: HashSet<&'static str> = [
        "pseud.", "firm", "widow", "expedition member",
    ]
    .into_iter()
    .collect();

    /// Descriptors rendered as a `$u` affiliation subfield.
    pub static ref AFFILIATION_LIST: HashSet<&'static str> = [
        "SGM", "S.J.", "O.F.M.", "O.S.B.",
        "Zool. Inst.", "Acad. Sci.", "Ent. Soc. Amer.", "U.S.N.M.",
    ]
    .into_iter()
    .collect();

    /// Shapes a trailing descriptor may take to qualify as a date subfield.
    ///
    /// Shape-based rather than an exact list: open-ended year ranges cannot
    /// be enumerated.
    pub static ref DATE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"^\d{4}-\d{4}\??$").expect("date pattern"),
        Regex::new(r"^\d{4}-$").expect("date pattern"),
        Regex::new(r"^b\. ?\d{4}$").expect("date pattern"),
        Regex::new(r"^d\. ?\d{4}$").expect("date pattern"),
        Regex::new(r"^fl\. ?\d{4}(-\d{4})?$").expect("date pattern"),
        Regex::new(r"^ca\. ?\d{4}(-\d{4})?$").expect("date pattern"),
    ];

    /// Static protected-string list: text the transliterator must never touch.
    ///
    /// Taxonomic order names and Latin scholarly abbreviations appear verbatim
    /// in romanized titles and would be mangled by the Latin→Cyrillic table.
    /// Markup tokens are boundary-free: they sit flush against the words
    /// they wrap.
    pub static ref PROTECTED_LITERALS: Vec<ProtectedLiteral> = vec![
        ProtectedLiteral { text: "<i>", boundary_free: true },
        ProtectedLiteral { text: "</i>", boundary_free: true },
        ProtectedLiteral { text: "<sub>", boundary_free: true },
        ProtectedLiteral { text: "</sub>", boundary_free: true },
        ProtectedLiteral { text: "<sup>", boundary_free: true },
        ProtectedLiteral { text: "</sup>", boundary_free: true },
        ProtectedLiteral { text: "Coleoptera", boundary_free: false },
        ProtectedLiteral { text: "Lepidoptera", boundary_free: false },
        ProtectedLiteral { text: "Diptera", boundary_free: false },
        ProtectedLiteral { text: "Hymenoptera", boundary_free: false },
        ProtectedLiteral { text: "Hemiptera", boundary_free: false },
        ProtectedLiteral { text: "Orthoptera", boundary_free: false },
        ProtectedLiteral { text: "Odonata", boundary_free: false },
        ProtectedLiteral { text: "Trichoptera", boundary_free: false },
        ProtectedLiteral { text: "sp. nov.", boundary_free: false },
        ProtectedLiteral { text: "gen. nov.", boundary_free: false },
        ProtectedLiteral { text: "n. sp.", boundary_free: false },
        ProtectedLiteral { text: "op. cit.", boundary_free: false },
        ProtectedLiteral { text: "ibid.", boundary_free: false },
        ProtectedLiteral { text: "etc.", boundary_free: false },
        ProtectedLiteral { text: "e.g.", boundary_free: false },
        ProtectedLiteral { text: "i.e.", boundary_free: false },
        ProtectedLiteral { text: "cf.", boundary_free: false },
    ];

    /// Dynamic protected patterns. Only the matched capture of each pattern
    /// (group 1 when present, else the whole match) joins the literal list.
    ///
    /// The bracketed-fragment pattern is what makes a fully-bracketed title
    /// the dominant non-transliterable case.
    pub static ref PROTECTED_DYNAMIC: Vec<Regex> = vec![
        Regex::new(r"\[[^\[\]]*\]").expect("protected pattern"),
        Regex::new(r"\(([A-Z][a-z]+ [a-z]{3,})\)").expect("protected pattern"),
    ];

    /// Italic-span contents that are genuinely in the active language and
    /// must therefore be transliterated despite the markup.
    pub static ref ITALIC_WHITELIST: HashSet<&'static str> = [
        "sbornik", "trudy", "zhuki", "nasekomye",
    ]
    .into_iter()
    .collect();

    /// Leading articles per language, longest first, delimiter included.
    ///
    /// The matched prefix length is the non-filing character count; every
    /// entry fits the 0–4 indicator domain. Russian has no articles and no
    /// entry.
    pub static ref LEADING_ARTICLES: HashMap<&'static str, Vec<&'static str>> = {
        let mut m = HashMap::new();
        m.insert("eng", vec!["The ", "An ", "A "]);
        m.insert("fre", vec!["Les ", "Le ", "La ", "L'"]);
        m.insert("ger", vec!["Die ", "Der ", "Das "]);
        m
    };

    /// Form token → medium designator.
    pub static ref FORM_MEDIUM: IndexMap<&'static str, &'static str> = {
        let mut m = IndexMap::new();
        m.insert("mf", "microform");
        m.insert("mfiche", "microform");
        m.insert("mfilm", "microform");
        m.insert("el", "electronic resource");
        m.insert("cdrom", "electronic resource");
        m.insert("online", "electronic resource");
        m.insert("map", "cartographic material");
        m.insert("snd", "sound recording");
        m.insert("vid", "videorecording");
        m
    };

    /// Per-record leading-article overrides, keyed by record identifier.
    ///
    /// Corrects known language/script mismatches no automatic rule can
    /// resolve (e.g. a German title filed in a Russian-language record).
    /// Applied unconditionally when the record is listed.
    pub static ref INDICATOR_OVERRIDES: HashMap<&'static str, u8> = {
        let mut m = HashMap::new();
        m.insert("B45123", 0);
        m.insert("R08812", 4);
        m.insert("Z00734", 0);
        m.insert("K11206", 3);
        m
    };
}

/// Named character references the legacy HTML-derived data may carry.
static NAMED_ENTITIES: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&nbsp;", ' '),
    ("&eacute;", 'é'),
    ("&egrave;", 'è'),
    ("&ecirc;", 'ê'),
    ("&agrave;", 'à'),
    ("&acirc;", 'â'),
    ("&auml;", 'ä'),
    ("&ouml;", 'ö'),
    ("&uuml;", 'ü'),
    ("&ccedil;", 'ç'),
    ("&ntilde;", 'ñ'),
    ("&aacute;", 'á'),
    ("&iacute;", 'í'),
    ("&oacute;", 'ó'),
    ("&uacute;", 'ú'),
    ("&szlig;", 'ß'),
    ("&oslash;", 'ø'),
    ("&aring;", 'å'),
];

/// Normalize a string for table comparison.
///
/// Decodes the named character references the legacy data uses and applies
/// Unicode NFC, so `"Dvor&aacute;k"` and a precomposed `"Dvorák"` compare
/// equal. Returns the input unchanged (borrowed) when no work is needed.
#[must_use]
pub fn normalize_for_lookup(s: &str) -> Cow<'_, str> {
    let decoded: Cow<'_, str> = if s.contains('&') {
        let mut out = s.to_string();
        for (entity, ch) in NAMED_ENTITIES {
            if out.contains(entity) {
                out = out.replace(entity, &ch.to_string());
            }
        }
        Cow::Owned(out)
    } else {
        Cow::Borrowed(s)
    };

    match is_nfc_quick(decoded.chars()) {
        IsNormalized::Yes => decoded,
        _ => Cow::Owned(decoded.nfc().collect()),
    }
}

/// Check whether a trailing descriptor has a recognized date shape.
#[must_use]
pub fn is_date_descriptor(descriptor: &str) -> bool {
    DATE_PATTERNS.iter().any(|p| p.is_match(descriptor))
}

/// Leading-article table for a language tag, or `None` when the language has
/// no articles (or is unknown).
#[must_use]
pub fn leading_articles(language: &str) -> Option<&'static [&'static str]> {
    LEADING_ARTICLES.get(language).map(Vec::as_slice)
}

/// Explicit leading-article count for a record, when one is on file.
#[must_use]
pub fn indicator_override(record_id: &str) -> Option<u8> {
    INDICATOR_OVERRIDES.get(record_id).copied()
}

/// First relator-term synonym a descriptor matches, in table precedence order.
#[must_use]
pub fn match_relator(
    descriptor: &str,
    record: Option<&dyn RecordView>,
) -> Option<&'static RelatorTerm> {
    RELATOR_TERMS.iter().find(|rt| rt.matches(descriptor, record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_view::PathTree;

    #[test]
    fn test_prefilter_only_requires_exact_match() {
        let pf = Prefilter::Only("ed.");
        assert!(pf.satisfied("ed.", None));
        assert!(!pf.satisfied("edited", None));
        assert!(!pf.satisfied("med.", None));
    }

    #[test]
    fn test_prefilter_not_vetoes_substring() {
        let pf = Prefilter::Not("Ill.");
        assert!(pf.satisfied("ill. by author", None));
        assert!(!pf.satisfied("Springfield, Ill.", None));
    }

    #[test]
    fn test_prefilter_requires_degrades_without_record() {
        let pf = Prefilter::Requires("fo");
        assert!(!pf.satisfied("cart.", None));
    }

    #[test]
    fn test_prefilter_requires_reads_record() {
        let mut tree = PathTree::new();
        tree.push("fo", "map");
        let pf = Prefilter::Requires("fo");
        assert!(pf.satisfied("cart.", Some(&tree)));

        let empty = PathTree::new();
        assert!(!pf.satisfied("cart.", Some(&empty)));
    }

    #[test]
    fn test_match_relator_exact_only() {
        let rt = match_relator("ed.", None).expect("ed. is a relator");
        assert_eq!(rt.term, "editor");
        // Substring occurrences of an Only-guarded label do not match.
        assert!(match_relator("credited", None).is_none());
    }

    #[test]
    fn test_match_relator_not_prefilter() {
        assert!(match_relator("ill. in color", None).is_some());
        assert!(match_relator("Chicago, Ill.", None).is_none());
    }

    #[test]
    fn test_match_relator_requires_form_node() {
        assert!(match_relator("cart.", None).is_none());

        let mut tree = PathTree::new();
        tree.push("fo", "map");
        let rt = match_relator("cart.", Some(&tree)).expect("form node present");
        assert_eq!(rt.term, "cartographer");
    }

    #[test]
    fn test_date_descriptor_shapes() {
        assert!(is_date_descriptor("1880-1950"));
        assert!(is_date_descriptor("1880-"));
        assert!(is_date_descriptor("b. 1870"));
        assert!(is_date_descriptor("d. 1931"));
        assert!(is_date_descriptor("fl. 1920"));
        assert!(is_date_descriptor("ca. 1800-1860"));
        assert!(!is_date_descriptor("ed."));
        assert!(!is_date_descriptor("about 1900"));
    }

    #[test]
    fn test_entity_normalization_equates_encodings() {
        assert_eq!(normalize_for_lookup("Dvor&aacute;k"), "Dvorák");
        // Decomposed input (a + combining acute) folds to the precomposed form.
        assert_eq!(normalize_for_lookup("Dvora\u{0301}k"), "Dvorák");
        // Clean ASCII passes through borrowed.
        assert!(matches!(normalize_for_lookup("Smith"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_indicator_override_lookup() {
        assert_eq!(indicator_override("B45123"), Some(0));
        assert_eq!(indicator_override("R08812"), Some(4));
        assert_eq!(indicator_override("NOPE"), None);
    }

    #[test]
    fn test_leading_articles_per_language() {
        assert!(leading_articles("eng").is_some());
        assert!(leading_articles("rus").is_none());
        assert!(leading_articles("eng").unwrap().contains(&"The "));
    }
}
