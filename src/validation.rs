//! Indicator validation for generated fields.
//!
//! Downstream collaborators insert the rendered text into MARC records; this
//! module checks, before handoff, that a generated indicator pair sits inside
//! the MARC21 domain of the fields this crate emits: the 100/110/111 heading
//! fields, their 700/710/711 added-entry counterparts, and the 245 title
//! statement.

use crate::classify::HeadingResult;
use crate::error::{MarcGenError, Result};
use crate::title::TitleResult;
use std::collections::HashMap;

/// Validation rules for a field's indicators.
#[derive(Debug, Clone)]
pub struct IndicatorRules {
    /// Tag this rule applies to.
    pub tag: String,
    /// Validation for the first indicator.
    pub indicator1: IndicatorValidation,
    /// Validation for the second indicator.
    pub indicator2: IndicatorValidation,
}

/// Validation rule for a single indicator position.
#[derive(Debug, Clone)]
pub enum IndicatorValidation {
    /// Indicator is undefined; blank (#) is required.
    Undefined,
    /// Indicator must be one of the specified values.
    Values(Vec<char>),
    /// Indicator must be a digit within the specified range.
    DigitRange {
        /// Minimum digit value (0-9).
        min: u8,
        /// Maximum digit value (0-9).
        max: u8,
    },
}

impl IndicatorValidation {
    /// Check if the given character is valid for this indicator.
    #[must_use]
    pub fn is_valid(&self, c: char) -> bool {
        match self {
            IndicatorValidation::Undefined => c == '#' || c == ' ',
            IndicatorValidation::Values(values) => values.contains(&c),
            IndicatorValidation::DigitRange { min, max } => {
                if let Some(digit) = c.to_digit(10) {
                    #[allow(clippy::cast_possible_truncation)]
                    let d = digit as u8;
                    d >= *min && d <= *max
                } else {
                    false
                }
            },
        }
    }
}

/// Validator for the indicator pairs of generated fields.
#[derive(Debug)]
pub struct IndicatorValidator {
    rules: HashMap<String, IndicatorRules>,
}

impl IndicatorValidator {
    /// Create a new validator with MARC21 rules for the generated fields.
    #[must_use]
    pub fn new() -> Self {
        IndicatorValidator {
            rules: Self::build_rules(),
        }
    }

    /// Build MARC21 indicator rules for the fields this crate generates.
    fn build_rules() -> HashMap<String, IndicatorRules> {
        let mut rules = HashMap::new();

        // 100/700 - Personal name
        // Ind1: 0=Forename, 1=Surname, 3=Family name
        // Ind2: undefined on 100; 700 distinguishes analytical entries
        rules.insert(
            "100".to_string(),
            IndicatorRules {
                tag: "100".to_string(),
                indicator1: IndicatorValidation::Values(vec!['0', '1', '3']),
                indicator2: IndicatorValidation::Undefined,
            },
        );
        rules.insert(
            "700".to_string(),
            IndicatorRules {
                tag: "700".to_string(),
                indicator1: IndicatorValidation::Values(vec!['0', '1', '3']),
                indicator2: IndicatorValidation::Values(vec!['#', ' ', '2']),
            },
        );

        // 110/710 - Corporate name
        // Ind1: 1=Jurisdiction, 2=Name in direct order
        rules.insert(
            "110".to_string(),
            IndicatorRules {
                tag: "110".to_string(),
                indicator1: IndicatorValidation::Values(vec!['1', '2']),
                indicator2: IndicatorValidation::Undefined,
            },
        );
        rules.insert(
            "710".to_string(),
            IndicatorRules {
                tag: "710".to_string(),
                indicator1: IndicatorValidation::Values(vec!['1', '2']),
                indicator2: IndicatorValidation::Values(vec!['#', ' ', '2']),
            },
        );

        // 111/711 - Meeting name
        // Ind1: 0=Inverted name, 1=Jurisdiction, 2=Name in direct order
        rules.insert(
            "111".to_string(),
            IndicatorRules {
                tag: "111".to_string(),
                indicator1: IndicatorValidation::Values(vec!['0', '1', '2']),
                indicator2: IndicatorValidation::Undefined,
            },
        );
        rules.insert(
            "711".to_string(),
            IndicatorRules {
                tag: "711".to_string(),
                indicator1: IndicatorValidation::Values(vec!['0', '1', '2']),
                indicator2: IndicatorValidation::Values(vec!['#', ' ', '2']),
            },
        );

        // 245 - Title statement
        // Ind1: 0=No added entry, 1=Added entry
        // Ind2: 0-9 nonfiling characters
        rules.insert(
            "245".to_string(),
            IndicatorRules {
                tag: "245".to_string(),
                indicator1: IndicatorValidation::Values(vec!['0', '1']),
                indicator2: IndicatorValidation::DigitRange { min: 0, max: 9 },
            },
        );

        rules
    }

    /// Validate an indicator pair against the rules for a tag.
    ///
    /// Tags without a rule are accepted: this validator only knows the
    /// fields the crate generates.
    ///
    /// # Errors
    ///
    /// [`MarcGenError::InvalidIndicator`] when either indicator falls
    /// outside the field's MARC21 domain.
    pub fn validate_indicators(&self, tag: &str, indicator1: char, indicator2: char) -> Result<()> {
        let Some(rule) = self.rules.get(tag) else {
            return Ok(());
        };

        if !rule.indicator1.is_valid(indicator1) {
            return Err(MarcGenError::InvalidIndicator {
                tag: tag.to_string(),
                detail: format!("first indicator '{indicator1}' is not allowed"),
            });
        }
        if !rule.indicator2.is_valid(indicator2) {
            return Err(MarcGenError::InvalidIndicator {
                tag: tag.to_string(),
                detail: format!("second indicator '{indicator2}' is not allowed"),
            });
        }
        Ok(())
    }

    /// Validate a classified heading. Suppressed headings emit no field and
    /// always pass.
    ///
    /// # Errors
    ///
    /// [`MarcGenError::InvalidIndicator`] when the heading's indicator pair
    /// falls outside its field's MARC21 domain.
    pub fn validate_heading(&self, heading: &HeadingResult) -> Result<()> {
        let Some(tag) = heading.tag() else {
            return Ok(());
        };
        self.validate_indicators(tag, heading.indicator1(), heading.indicator2())
    }

    /// Validate a built title field.
    ///
    /// # Errors
    ///
    /// [`MarcGenError::InvalidIndicator`] when the title's indicator pair
    /// falls outside the 245 domain.
    pub fn validate_title(&self, title: &TitleResult) -> Result<()> {
        self.validate_indicators("245", title.indicator1(), title.indicator2())
    }

    /// Rules on file for a tag, when the crate generates that field.
    #[must_use]
    pub fn rules_for(&self, tag: &str) -> Option<&IndicatorRules> {
        self.rules.get(tag)
    }
}

impl Default for IndicatorValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, ClassifyContext, NameComponent};
    use crate::title::TitleBuilder;

    #[test]
    fn test_validation_rules_exist_for_generated_fields() {
        let validator = IndicatorValidator::new();
        for tag in ["100", "110", "111", "245", "700", "710", "711"] {
            assert!(validator.rules_for(tag).is_some(), "{tag}");
        }
        assert!(validator.rules_for("650").is_none());
    }

    #[test]
    fn test_personal_name_indicators() {
        let validator = IndicatorValidator::new();
        assert!(validator.validate_indicators("100", '0', ' ').is_ok());
        assert!(validator.validate_indicators("100", '1', ' ').is_ok());
        assert!(validator.validate_indicators("100", '2', ' ').is_err());
        assert!(validator.validate_indicators("100", '1', '4').is_err());
    }

    #[test]
    fn test_corporate_and_meeting_indicators() {
        let validator = IndicatorValidator::new();
        assert!(validator.validate_indicators("110", '2', ' ').is_ok());
        assert!(validator.validate_indicators("110", '0', ' ').is_err());
        assert!(validator.validate_indicators("111", '2', ' ').is_ok());
        assert!(validator.validate_indicators("111", '3', ' ').is_err());
    }

    #[test]
    fn test_added_entry_indicators() {
        let validator = IndicatorValidator::new();
        assert!(validator.validate_indicators("700", '1', ' ').is_ok());
        assert!(validator.validate_indicators("700", '1', '2').is_ok());
        assert!(validator.validate_indicators("700", '1', '7').is_err());
    }

    #[test]
    fn test_title_indicators() {
        let validator = IndicatorValidator::new();
        assert!(validator.validate_indicators("245", '0', '0').is_ok());
        assert!(validator.validate_indicators("245", '1', '4').is_ok());
        assert!(validator.validate_indicators("245", '2', '0').is_err());
        assert!(validator.validate_indicators("245", '1', 'x').is_err());
    }

    #[test]
    fn test_unknown_tag_is_accepted() {
        let validator = IndicatorValidator::new();
        assert!(validator.validate_indicators("650", 'z', 'z').is_ok());
    }

    #[test]
    fn test_invalid_indicator_error_names_the_field() {
        let validator = IndicatorValidator::new();
        let err = validator.validate_indicators("245", '9', '0').unwrap_err();
        assert!(err.to_string().contains("245"));
        assert!(err.to_string().contains("first indicator"));
    }

    #[test]
    fn test_every_classified_heading_validates() {
        let validator = IndicatorValidator::new();
        let ctx = ClassifyContext::new("eng");
        for component in [
            NameComponent::new("Avicenna"),
            NameComponent::new("Jacobson").qualifier("G. G."),
            NameComponent::new("Jacobson").qualifier("G. G.").trailing("ed."),
            NameComponent::new("International Entomological Congress"),
            NameComponent::new("Zoological Institute"),
            NameComponent::new("Anon."),
            NameComponent::new("-"),
        ] {
            let heading = classify(&component, &ctx);
            assert!(
                validator.validate_heading(&heading).is_ok(),
                "{:?}",
                heading.variant
            );
        }
    }

    #[test]
    fn test_built_title_validates() {
        let validator = IndicatorValidator::new();
        let title = TitleBuilder::new("The Beetles of Russia", "eng").build();
        assert!(validator.validate_title(&title).is_ok());
    }

    #[test]
    fn test_digit_range_rejects_non_digits() {
        let range = IndicatorValidation::DigitRange { min: 0, max: 9 };
        assert!(range.is_valid('0'));
        assert!(range.is_valid('9'));
        assert!(!range.is_valid('#'));
        assert!(!range.is_valid('a'));
    }
}