//! Latin↔Cyrillic transliteration tables.
//!
//! The legacy catalogue stores Russian text romanized under BGN/PCGN. This
//! module reconstructs Cyrillic from that romanization, re-romanizes it for
//! the reversibility check, and produces the ALA-LC romanization used by
//! authority-compatible headings.
//!
//! The [`Transliterator`] trait keeps the three directions behind one seam
//! so the bundled [`BgnPcgnTable`] can be swapped for an external transform
//! without touching protection or reinstatement. Tables are plain string
//! substitution; they know nothing about protected spans, which is why the
//! protector must run first.
//!
//! Two context rules make well-formed BGN text round-trip exactly:
//!
//! * `е`/`ё` romanize as `ye`/`yë` word-initially and after vowels or
//!   separator signs, so a bare `e` in those positions can only be `э`.
//! * `й` and `ы` share the Latin `y`; a bare `y` is `й` after a vowel and
//!   `ы` otherwise.

/// The three transliteration directions field generation needs.
///
/// Implementations must be pure string functions, safe to share across
/// worker threads.
pub trait Transliterator: Send + Sync {
    /// Reverse-transliterate BGN/PCGN romanized text to Cyrillic.
    fn to_cyrillic(&self, latin: &str) -> String;

    /// Romanize Cyrillic under BGN/PCGN (the reversibility-check direction).
    fn to_latin_bgn(&self, cyrillic: &str) -> String;

    /// Romanize Cyrillic under ALA-LC, ligature-free convention.
    fn to_latin_loc(&self, cyrillic: &str) -> String;
}

/// Table-driven BGN/PCGN transliterator.
///
/// Longest-match-first, case-restoring. The soft and hard signs accept both
/// the ASCII apostrophe/quote the legacy flat files use and the modifier
/// prime letters; the BGN direction emits the ASCII forms, the ALA-LC
/// direction the modifier letters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BgnPcgnTable;

impl BgnPcgnTable {
    /// Create the table transliterator.
    #[must_use]
    pub fn new() -> Self {
        BgnPcgnTable
    }
}

/// One multi-character reverse rule. Tried longest-first before the
/// single-letter fallbacks.
struct ReverseRule {
    latin: &'static str,
    cyrillic: char,
}

const REVERSE_DIGRAPHS: &[ReverseRule] = &[
    ReverseRule { latin: "shch", cyrillic: 'щ' },
    ReverseRule { latin: "yë", cyrillic: 'ё' },
    ReverseRule { latin: "yu", cyrillic: 'ю' },
    ReverseRule { latin: "ya", cyrillic: 'я' },
    ReverseRule { latin: "ye", cyrillic: 'е' },
    ReverseRule { latin: "zh", cyrillic: 'ж' },
    ReverseRule { latin: "kh", cyrillic: 'х' },
    ReverseRule { latin: "ts", cyrillic: 'ц' },
    ReverseRule { latin: "ch", cyrillic: 'ч' },
    ReverseRule { latin: "sh", cyrillic: 'ш' },
];

impl Transliterator for BgnPcgnTable {
    fn to_cyrillic(&self, latin: &str) -> String {
        let chars: Vec<char> = latin.chars().collect();
        let folded: Vec<char> = chars.iter().map(|c| fold(*c)).collect();
        let mut out = String::with_capacity(latin.len());
        let mut last: Option<char> = None;
        let mut i = 0;

        while i < chars.len() {
            if let Some(rule) = REVERSE_DIGRAPHS
                .iter()
                .find(|r| window_matches(&folded, i, r.latin))
            {
                let mapped = cased(rule.cyrillic, chars[i]);
                out.push(mapped);
                last = Some(mapped);
                i += rule.latin.chars().count();
                continue;
            }

            let mapped = match folded[i] {
                // A bare "e" where е would have romanized as "ye" must be э.
                'e' => Some(if triggers_ye(last) { 'э' } else { 'е' }),
                // A bare "y" is й after a vowel, ы otherwise.
                'y' => Some(if follows_vowel(last) { 'й' } else { 'ы' }),
                other => reverse_single(other),
            };

            match mapped {
                Some(m) => {
                    let mc = cased(m, chars[i]);
                    out.push(mc);
                    last = Some(mc);
                }
                None => {
                    out.push(chars[i]);
                    last = Some(chars[i]);
                }
            }
            i += 1;
        }
        out
    }

    fn to_latin_bgn(&self, cyrillic: &str) -> String {
        let mut out = String::with_capacity(cyrillic.len() * 2);
        let mut prev: Option<char> = None;
        for c in cyrillic.chars() {
            match bgn_forward(fold(c), triggers_ye(prev)) {
                Some(s) => push_cased(&mut out, s, c),
                None => out.push(c),
            }
            prev = Some(c);
        }
        out
    }

    fn to_latin_loc(&self, cyrillic: &str) -> String {
        let mut out = String::with_capacity(cyrillic.len() * 2);
        for c in cyrillic.chars() {
            match loc_forward(fold(c)) {
                Some(s) => push_cased(&mut out, s, c),
                None => out.push(c),
            }
        }
        out
    }
}

/// Single-letter reverse fallbacks. `e` and `y` are contextual and handled
/// by the scanner itself.
fn reverse_single(c: char) -> Option<char> {
    Some(match c {
        'a' => 'а',
        'b' => 'б',
        'v' => 'в',
        'g' => 'г',
        'd' => 'д',
        'z' => 'з',
        'i' => 'и',
        'k' => 'к',
        'l' => 'л',
        'm' => 'м',
        'n' => 'н',
        'o' => 'о',
        'p' => 'п',
        'r' => 'р',
        's' => 'с',
        't' => 'т',
        'u' => 'у',
        'f' => 'ф',
        'ë' => 'ё',
        'ʹ' | '\'' => 'ь',
        'ʺ' | '"' => 'ъ',
        _ => return None,
    })
}

fn bgn_forward(c: char, ye_position: bool) -> Option<&'static str> {
    Some(match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => {
            if ye_position {
                "ye"
            } else {
                "e"
            }
        }
        'ё' => {
            if ye_position {
                "yë"
            } else {
                "ë"
            }
        }
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "\"",
        'ы' => "y",
        'ь' => "'",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    })
}

fn loc_forward(c: char) -> Option<&'static str> {
    Some(match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "ë",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "ĭ",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "ʺ",
        'ы' => "y",
        'ь' => "ʹ",
        'э' => "ė",
        'ю' => "iu",
        'я' => "ia",
        _ => return None,
    })
}

/// Whether the next е/ё romanizes with a `y` prefix: at a word start, after
/// any vowel, or after й/ъ/ь.
fn triggers_ye(prev: Option<char>) -> bool {
    match prev {
        None => true,
        Some(c) if !c.is_alphabetic() => true,
        Some(c) => matches!(
            fold(c),
            'а' | 'е' | 'ё' | 'и' | 'о' | 'у' | 'ы' | 'э' | 'ю' | 'я' | 'й' | 'ъ' | 'ь'
        ),
    }
}

fn follows_vowel(prev: Option<char>) -> bool {
    prev.is_some_and(|c| {
        matches!(
            fold(c),
            'а' | 'е' | 'ё' | 'и' | 'о' | 'у' | 'ы' | 'э' | 'ю' | 'я'
        )
    })
}

fn window_matches(folded: &[char], start: usize, pattern: &str) -> bool {
    let mut j = start;
    for pc in pattern.chars() {
        if folded.get(j) != Some(&pc) {
            return false;
        }
        j += 1;
    }
    true
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn cased(c: char, model: char) -> char {
    if model.is_uppercase() {
        c.to_uppercase().next().unwrap_or(c)
    } else {
        c
    }
}

fn push_cased(out: &mut String, s: &str, model: char) {
    if model.is_uppercase() {
        let mut cs = s.chars();
        if let Some(first) = cs.next() {
            out.extend(first.to_uppercase());
            out.push_str(cs.as_str());
        }
    } else {
        out.push_str(s);
    }
}
