//! Integration tests for the transliteration round trip.
//!
//! Exercises the engine end to end: substring protection, Latin-to-Cyrillic
//! reconstruction, the BGN/PCGN reversibility check, and the ALA-LC
//! romanization, over realistic catalogue strings.

use marcgen::error::MarcGenError;

mod common;

#[test]
fn test_catalogue_titles_round_trip() {
    let engine = common::create_test_engine();
    let cases = [
        ("Opredelitel' zhukov", "Определитель жуков"),
        ("Entomologicheskoye obozreniye", "Энтомологическое обозрение"),
        (
            "Trudy Russkogo entomologicheskogo obshchestva",
            "Труды Русского энтомологического общества",
        ),
    ];

    for (latin, cyrillic) in cases {
        let result = engine.transliterate(latin, &[]).unwrap();
        assert_eq!(result.cyrillic, cyrillic, "{latin}");
        assert_eq!(result.forward_check_latin, latin);
        assert!(!result.reversibility_failed, "{latin}");
    }
}

#[test]
fn test_markup_span_survives_transform() {
    let engine = common::create_test_engine();
    let result = engine
        .transliterate("Zhuki roda <i>Carabus</i> Rossii", &[])
        .unwrap();

    assert_eq!(result.cyrillic, "Жуки рода <i>Carabus</i> России");
    assert_eq!(result.latin_loc, "Zhuki roda <i>Carabus</i> Rossii");
    assert!(!result.reversibility_failed);
}

#[test]
fn test_taxonomy_survives_inside_subtitle() {
    let engine = common::create_test_engine();
    let result = engine
        .transliterate("Opredelitel' zhukov : Coleoptera Rossii", &[])
        .unwrap();

    assert_eq!(result.cyrillic, "Определитель жуков : Coleoptera России");
}

#[test]
fn test_roman_numeral_protection_is_contextual() {
    let engine = common::create_test_engine();

    // Multi-letter numerals are always protected.
    let result = engine.transliterate("Trudy XIV s\"yezda", &[]).unwrap();
    assert_eq!(result.cyrillic, "Труды XIV съезда");
    assert!(!result.reversibility_failed);

    // A standalone I mid-clause is a numeral.
    let result = engine.transliterate("Pëtr I, imperator", &[]).unwrap();
    assert_eq!(result.cyrillic, "Пётр I, император");

    // A clause-initial I is the Cyrillic conjunction and transliterates.
    let result = engine.transliterate("I snova o zhukakh", &[]).unwrap();
    assert_eq!(result.cyrillic, "И снова о жуках");
}

#[test]
fn test_fully_bracketed_title_is_non_transliterable() {
    let engine = common::create_test_engine();
    let result = engine.transliterate("[Otchet za 1905 god]", &[]).unwrap();

    assert_eq!(result.cyrillic, "[Otchet za 1905 god]");
    assert_eq!(result.forward_check_latin, "[Otchet za 1905 god]");
    assert_eq!(result.latin_loc, "[Otchet za 1905 god]");
    assert!(!result.reversibility_failed);
}

#[test]
fn test_loc_and_bgn_romanizations_diverge() {
    let engine = common::create_test_engine();
    let result = engine.transliterate("Yevgeniy Chetyrkin", &[]).unwrap();

    assert_eq!(result.cyrillic, "Евгений Четыркин");
    assert_eq!(result.forward_check_latin, "Yevgeniy Chetyrkin");
    assert_eq!(result.latin_loc, "Evgeniĭ Chetyrkin");
}

#[test]
fn test_soft_sign_renders_per_convention() {
    let engine = common::create_test_engine();
    let result = engine.transliterate("Gogol'", &[]).unwrap();

    assert_eq!(result.cyrillic, "Гоголь");
    assert_eq!(result.forward_check_latin, "Gogol'");
    assert_eq!(result.latin_loc, "Gogolʹ");
}

#[test]
fn test_reversibility_advisory_does_not_block_output() {
    let engine = common::create_test_engine();

    // Word-initial ё romanizes as "yë"; a bare "Ë" there cannot round-trip.
    let flagged = engine.transliterate("Ëlkino", &[]).unwrap();
    assert!(flagged.reversibility_failed);
    assert_eq!(flagged.cyrillic, "Ёлкино");
    assert_eq!(flagged.forward_check_latin, "Yëlkino");

    // Written with the digraph, the same name round-trips cleanly.
    let clean = engine.transliterate("Yëlkino", &[]).unwrap();
    assert!(!clean.reversibility_failed);
    assert_eq!(clean.cyrillic, "Ёлкино");
}

#[test]
fn test_parallel_title_errors_surface() {
    let engine = common::create_test_engine();

    let err = engine
        .transliterate("Zagolovok = Title", &["rus"])
        .unwrap_err();
    assert_eq!(
        err,
        MarcGenError::MismatchedPartCount {
            parts: 2,
            languages: 1
        }
    );

    let err = engine
        .transliterate("Titel = Title", &["ger", "eng"])
        .unwrap_err();
    assert!(matches!(err, MarcGenError::UnsupportedLanguageComponent(_)));
}

#[test]
fn test_batch_isolates_failures() {
    let engine = common::create_test_engine();
    let batch: Vec<(&str, &[&str])> = vec![
        ("Opredelitel' zhukov", &[]),
        // Parallel separator with no language tags fails this item only.
        ("Zagolovok = Title", &[]),
        ("Moskva", &[]),
    ];

    let results = engine.transliterate_batch(&batch);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().cyrillic, "Определитель жуков");
    assert!(matches!(
        results[1],
        Err(MarcGenError::MismatchedPartCount {
            parts: 2,
            languages: 0
        })
    ));
    assert_eq!(results[2].as_ref().unwrap().cyrillic, "Москва");
}

#[test]
fn test_batch_carries_per_item_languages() {
    let engine = common::create_test_engine();
    let rus_eng = ["rus", "eng"];
    let batch: Vec<(&str, &[&str])> = vec![
        ("Zhuki Rossii = The beetles of Russia", rus_eng.as_slice()),
        ("Moskva", &[]),
    ];

    let results = engine.transliterate_batch(&batch);
    assert_eq!(
        results[0].as_ref().unwrap().cyrillic,
        "Жуки России = The beetles of Russia"
    );
    assert_eq!(results[1].as_ref().unwrap().cyrillic, "Москва");
}

#[test]
fn test_name_helpers_degrade_on_structural_errors() {
    let engine = common::create_test_engine();

    // A name cannot carry a parallel separator; the helpers keep the input
    // rather than failing the heading.
    assert_eq!(
        engine.vernacular_form("Zagolovok = Title"),
        "Zagolovok = Title"
    );
    assert_eq!(
        engine.authority_form("Zagolovok = Title"),
        "Zagolovok = Title"
    );
}

#[test]
fn test_protection_cache_counts_single_language_calls() {
    let engine = common::create_test_engine();
    assert_eq!(engine.cached_protections(), 0);

    engine.transliterate("Ivanov", &[]).unwrap();
    engine.transliterate("Ivanov", &[]).unwrap();
    assert_eq!(engine.cached_protections(), 1);

    engine.transliterate("Petrov", &[]).unwrap();
    assert_eq!(engine.cached_protections(), 2);

    // Parallel-title calls depend on the language list and bypass the cache.
    engine
        .transliterate("Zhuki Rossii = The beetles of Russia", &["rus", "eng"])
        .unwrap();
    assert_eq!(engine.cached_protections(), 2);
}
