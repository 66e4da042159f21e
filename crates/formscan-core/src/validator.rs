// File: src/validator.rs
// Purpose: Single-pass form validation over extracted input records

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::ValidatorConfig;
use crate::record::{extract_records, FormContainer, InputRecord};
use crate::result::{ValidationError, ValidationResult};
use crate::rules::RuleSet;

/// What happens to a field whose kind has no registered rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKindPolicy {
    /// The field fails and contributes an error
    #[default]
    Reject,
    /// The field is ignored
    Skip,
}

/// Check one record against a rule set.
///
/// False when the record has no kind, when the kind is not registered, or when
/// the value does not match the whole pattern.
pub fn validate_item(record: &InputRecord, rules: &RuleSet) -> bool {
    match record.validation_kind.as_deref() {
        Some(kind) => rules.evaluate(kind, &record.value),
        None => false,
    }
}

/// Validates forms against a fixed rule set
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    rules: RuleSet,
    policy: UnknownKindPolicy,
}

impl FormValidator {
    pub fn new(rules: RuleSet, policy: UnknownKindPolicy) -> Self {
        Self { rules, policy }
    }

    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new(config.rule_set(), config.validator.unknown_kind)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn policy(&self) -> UnknownKindPolicy {
        self.policy
    }

    /// Validate every input of `form`, reading its values once
    pub fn validate_form<F: FormContainer + ?Sized>(&self, form: &F) -> ValidationResult {
        self.validate_records(extract_records(form))
    }

    /// Validate records in order, one error per failing record
    pub fn validate_records<I>(&self, records: I) -> ValidationResult
    where
        I: IntoIterator<Item = InputRecord>,
    {
        let mut result = ValidationResult::new();
        let mut scanned = 0usize;

        for record in records {
            scanned += 1;

            if self.is_skipped(&record) {
                trace!(field = %record.name, "no rule registered, skipping");
                continue;
            }

            if !validate_item(&record, &self.rules) {
                trace!(
                    field = %record.name,
                    kind = record.validation_kind.as_deref().unwrap_or("<none>"),
                    "field failed validation"
                );
                result.push(ValidationError::new(record.name, record.value));
            }
        }

        debug!(
            fields = scanned,
            errors = result.errors().len(),
            "validated form"
        );

        result
    }

    fn is_skipped(&self, record: &InputRecord) -> bool {
        self.policy == UnknownKindPolicy::Skip
            && !record
                .validation_kind
                .as_deref()
                .is_some_and(|kind| self.rules.contains(kind))
    }
}

/// Validate `form` with both built-in rules, rejecting unknown kinds
pub fn validate_form<F: FormContainer + ?Sized>(form: &F) -> ValidationResult {
    FormValidator::default().validate_form(form)
}
