//! Common test helpers shared across the integration test suite.

use marcgen::classify::NameComponent;
use marcgen::record_view::PathTree;
use marcgen::roundtrip::RoundTripEngine;

/// Creates a round-trip engine backed by the bundled BGN/PCGN tables.
///
/// Engines are cheap to construct; each test gets its own so protection
/// caches never leak between tests.
pub fn create_test_engine() -> RoundTripEngine {
    RoundTripEngine::new()
}

/// Creates a name component with a principal and a qualifier, the shape
/// most catalogue name occurrences take.
#[allow(dead_code)]
pub fn name(principal: &str, qualifier: &str) -> NameComponent {
    NameComponent::new(principal).qualifier(qualifier)
}

/// Creates a record view carrying a single form token.
///
/// The `"fo"` node is what structural relator prefilters consult.
#[allow(dead_code)]
pub fn record_with_form(form: &str) -> PathTree {
    let mut tree = PathTree::new();
    tree.push("fo", form);
    tree
}

/// Creates a realistic record view with identifier, forms, and title
/// language, for tests exercising more than one record fact at once.
#[allow(dead_code)]
pub fn create_realistic_record() -> PathTree {
    let mut tree = PathTree::new();
    tree.push("id", "R08812");
    tree.push("fo", "mfiche");
    tree.push("fo", "el");
    tree.push("tl", "rus");
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use marcgen::record_view::RecordView;

    #[test]
    fn test_create_test_engine_starts_cold() {
        let engine = create_test_engine();
        assert_eq!(engine.cached_protections(), 0);
    }

    #[test]
    fn test_realistic_record_has_expected_nodes() {
        let record = create_realistic_record();
        assert!(record.has("fo"));
        assert_eq!(record.value("id"), Some("R08812"));
        assert_eq!(record.values("fo"), &["mfiche", "el"]);
    }
}
