//! Error types for MARC field generation.
//!
//! This module provides the [`MarcGenError`] type for all field-generation
//! operations and the [`Result`] convenience type.
//!
//! Structural errors abort only the transliteration of the single affected
//! string; they never abort classification or assembly of the surrounding
//! record. Callers fall back to the untransliterated value where a field is
//! required, or skip where it is optional.

use thiserror::Error;

/// Error type for all field-generation operations.
///
/// Represents data inconsistencies detected while preparing a string for
/// transliteration or while validating generated output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarcGenError {
    /// A parallel title's component count disagrees with its language list.
    ///
    /// Raised when a title contains `" = "`-separated parallel components but
    /// the caller-supplied language list has a different length. Surfaced to
    /// the caller, never auto-corrected.
    #[error("parallel title has {parts} component(s) but {languages} language tag(s)")]
    MismatchedPartCount {
        /// Number of `" = "`-separated title components.
        parts: usize,
        /// Number of caller-supplied language tags.
        languages: usize,
    },

    /// A parallel title has no component in the active transliteration language.
    ///
    /// Every parallel title must carry exactly one component in the record's
    /// active language; a list without one is a data inconsistency, not a
    /// pass-through case.
    #[error("parallel title has no component in the active language '{0}'")]
    UnsupportedLanguageComponent(String),

    /// A generated indicator fell outside the MARC21 domain for its field.
    #[error("invalid indicator for field {tag}: {detail}")]
    InvalidIndicator {
        /// Field tag the indicator belongs to.
        tag: String,
        /// Description of the violation.
        detail: String,
    },
}

/// Convenience type alias for [`std::result::Result`] with [`MarcGenError`].
pub type Result<T> = std::result::Result<T, MarcGenError>;
