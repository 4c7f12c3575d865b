#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # marcgen: MARC field generation
//!
//! A Rust library for generating MARC21 name-heading and title fields from
//! legacy catalogue records, including reversible reconstruction of Cyrillic
//! text from BGN/PCGN romanization.
//!
//! ## Quick Start
//!
//! ### Classifying Names
//!
//! ```ignore
//! use marcgen::classify::{classify, ClassifyContext, NameComponent};
//!
//! let component = NameComponent::new("Jacobson")
//!     .qualifier("G. G.")
//!     .trailing("ed.");
//! let heading = classify(&component, &ClassifyContext::new("eng"));
//!
//! assert_eq!(heading.tag(), Some("700"));
//! assert_eq!(heading.text, "Jacobson, G. G.$eeditor");
//! ```
//!
//! ### Building Title Fields
//!
//! ```ignore
//! use marcgen::roundtrip::RoundTripEngine;
//! use marcgen::title::TitleBuilder;
//!
//! let engine = RoundTripEngine::new();
//! let title = TitleBuilder::new("Zhuki (Coleoptera) Rossii", "rus")
//!     .engine(&engine)
//!     .build();
//!
//! // The taxonomic name survives transliteration untouched.
//! assert_eq!(title.title_text, "Жуки (Coleoptera) России.");
//! ```
//!
//! ### Round-Trip Transliteration
//!
//! ```ignore
//! use marcgen::roundtrip::RoundTripEngine;
//!
//! let engine = RoundTripEngine::new();
//! let result = engine.transliterate("Trudy Russkogo entomologicheskogo obshchestva", &[])?;
//!
//! assert!(!result.reversibility_failed);
//! println!("{}", result.cyrillic);
//! ```
//!
//! ## Modules
//!
//! - [`classify`] — Name heading classification (`NameComponent`, `HeadingResult`)
//! - [`statement`] — Statement-of-responsibility assembly
//! - [`title`] — Title field construction (`TitleBuilder`, `TitleResult`)
//! - [`roundtrip`] — Transliteration engine with reversibility checking
//! - [`translit`] — BGN/PCGN and ALA-LC transliteration tables
//! - [`protect`] — Substring protection for non-transliterable spans
//! - [`tables`] — Static lookup tables (names, descriptors, articles, media)
//! - [`record_view`] — Read-only record access for structural prefilters
//! - [`validation`] — Indicator validation for generated fields
//! - [`error`] — Error types and result type
//!
//! ## Field Support
//!
//! - **100/110/111** — Main-entry personal, corporate, and meeting headings
//! - **700/710/711** — Added-entry counterparts for promoted headings
//! - **245** — Title statement with indicators, subtitle boundary, medium
//!   designator, and statement of responsibility

pub mod classify;
pub mod error;
pub mod protect;
pub mod record_view;
pub mod roundtrip;
pub mod statement;
pub mod tables;
pub mod title;
pub mod translit;
pub mod validation;

pub use classify::{
    classify, ClassifyContext, FieldVariant, HeadingResult, NameComponent, NameForm,
};
pub use error::{MarcGenError, Result};
pub use protect::{protect, reinstate, Masked, ProtectedSpan};
pub use record_view::{PathTree, RecordView};
pub use roundtrip::{RoundTripEngine, TransliterationResult};
pub use statement::{assemble, AuthorGroup, RoleGroup};
pub use tables::{Prefilter, ProtectedLiteral, RelatorTerm};
pub use title::{TitleBuilder, TitleResult};
pub use translit::{BgnPcgnTable, Transliterator};
pub use validation::{IndicatorRules, IndicatorValidation, IndicatorValidator};
