//! Transliteration round-trip engine.
//!
//! Composes the substring protector with a [`Transliterator`] and verifies
//! every conversion by romanizing the generated Cyrillic back to BGN/PCGN
//! and comparing it, case-insensitively, against the masked input. A
//! mismatch never fails the conversion; it sets an advisory flag and emits
//! a warning for manual review.
//!
//! The engine also produces the ALA-LC romanization of the generated
//! Cyrillic, which heading generation uses for authority-compatible name
//! forms.
//!
//! # Examples
//!
//! ```ignore
//! use marcgen::roundtrip::RoundTripEngine;
//!
//! let engine = RoundTripEngine::new();
//! let result = engine.transliterate("Zhuki (Coleoptera) Sibiri", &[])?;
//!
//! assert_eq!(result.cyrillic, "Жуки (Coleoptera) Сибири");
//! assert!(!result.reversibility_failed);
//! # Ok::<(), marcgen::error::MarcGenError>(())
//! ```

use crate::error::Result;
use crate::protect::{protect, reinstate, Masked};
use crate::translit::{BgnPcgnTable, Transliterator};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Protection results for repeated single-language strings (mostly names)
/// are memoized up to this many entries. Recomputing is always safe.
const PROTECT_CACHE_CAP: usize = 10_000;

/// Outcome of one round-trip conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransliterationResult {
    /// The reconstructed Cyrillic value, protected spans reinstated.
    pub cyrillic: String,
    /// BGN/PCGN romanization of the generated Cyrillic, spans reinstated.
    pub forward_check_latin: String,
    /// The forward check did not reproduce the input. Advisory only.
    pub reversibility_failed: bool,
    /// ALA-LC romanization of the generated Cyrillic, spans reinstated.
    pub latin_loc: String,
}

/// Protection plus transform plus verification, behind one handle.
///
/// Safe to share across worker threads; all methods take `&self`.
pub struct RoundTripEngine {
    transform: Box<dyn Transliterator>,
    protect_cache: RwLock<HashMap<String, Arc<Masked>>>,
}

impl std::fmt::Debug for RoundTripEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundTripEngine").finish_non_exhaustive()
    }
}

impl Default for RoundTripEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundTripEngine {
    /// Engine backed by the bundled BGN/PCGN table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_transform(Box::new(BgnPcgnTable::new()))
    }

    /// Engine backed by a caller-supplied transform.
    #[must_use]
    pub fn with_transform(transform: Box<dyn Transliterator>) -> Self {
        RoundTripEngine {
            transform,
            protect_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Convert one romanized string to Cyrillic with verification.
    ///
    /// `parallel_languages` carries per-component language tags for parallel
    /// titles (see [`protect`]); pass `&[]` for single-language strings.
    /// A string the protector marks non-transliterable (typically a fully
    /// bracketed title) comes back unchanged in all three forms.
    ///
    /// # Errors
    ///
    /// Propagates the protector's parallel-title errors. A failed
    /// reversibility check is not an error; it sets
    /// [`TransliterationResult::reversibility_failed`].
    pub fn transliterate(
        &self,
        latin: &str,
        parallel_languages: &[&str],
    ) -> Result<TransliterationResult> {
        let masked = self.protect_cached(latin, parallel_languages)?;

        if masked.non_transliterable {
            return Ok(TransliterationResult {
                cyrillic: latin.to_string(),
                forward_check_latin: latin.to_string(),
                reversibility_failed: false,
                latin_loc: latin.to_string(),
            });
        }

        let cyrillic_masked = self.transform.to_cyrillic(&masked.text);
        let forward_masked = self.transform.to_latin_bgn(&cyrillic_masked);
        let reversibility_failed =
            forward_masked.to_lowercase() != masked.text.to_lowercase();
        if reversibility_failed {
            log::warn!(
                "transliteration of {latin:?} is not reversible: forward check produced {forward_masked:?}"
            );
        }

        Ok(TransliterationResult {
            cyrillic: reinstate(&cyrillic_masked, &masked.spans),
            forward_check_latin: reinstate(&forward_masked, &masked.spans),
            reversibility_failed,
            latin_loc: reinstate(&self.transform.to_latin_loc(&cyrillic_masked), &masked.spans),
        })
    }

    /// Convert many independent strings in parallel.
    ///
    /// Each batch item is `(text, parallel_languages)`. Results come back in
    /// input order. Per-call token counters and span maps keep the items
    /// fully isolated; a failure in one item never affects its neighbors.
    pub fn transliterate_batch(
        &self,
        batch: &[(&str, &[&str])],
    ) -> Vec<Result<TransliterationResult>> {
        batch
            .par_iter()
            .map(|(text, languages)| self.transliterate(text, languages))
            .collect()
    }

    /// Cyrillic form of an active-language value, or the value itself when
    /// protection fails. Classification uses this for statement names.
    #[must_use]
    pub fn vernacular_form(&self, latin: &str) -> String {
        match self.transliterate(latin, &[]) {
            Ok(result) => result.cyrillic,
            Err(err) => {
                log::debug!("keeping {latin:?} untransliterated: {err}");
                latin.to_string()
            }
        }
    }

    /// ALA-LC form of an active-language value, or the value itself when
    /// protection fails. Classification uses this for heading names.
    #[must_use]
    pub fn authority_form(&self, latin: &str) -> String {
        match self.transliterate(latin, &[]) {
            Ok(result) => result.latin_loc,
            Err(err) => {
                log::debug!("keeping {latin:?} untransliterated: {err}");
                latin.to_string()
            }
        }
    }

    /// Number of memoized protection results, for diagnostics.
    #[must_use]
    pub fn cached_protections(&self) -> usize {
        self.protect_cache.read().map_or(0, |cache| cache.len())
    }

    /// Protection with memoization for the single-language case.
    ///
    /// Parallel-title calls bypass the cache since their result depends on
    /// the language list. A poisoned lock degrades to recomputation.
    fn protect_cached(&self, latin: &str, parallel_languages: &[&str]) -> Result<Arc<Masked>> {
        if !parallel_languages.is_empty() {
            return Ok(Arc::new(protect(latin, parallel_languages)?));
        }

        if let Ok(cache) = self.protect_cache.read() {
            if let Some(hit) = cache.get(latin) {
                return Ok(Arc::clone(hit));
            }
        }

        let masked = Arc::new(protect(latin, &[])?);
        if let Ok(mut cache) = self.protect_cache.write() {
            if cache.len() < PROTECT_CACHE_CAP {
                cache.insert(latin.to_string(), Arc::clone(&masked));
            }
        }
        Ok(masked)
    }
}
