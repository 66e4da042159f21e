// File: src/rules.rs
// Purpose: Validation kinds and the rule set that maps kind names to patterns

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// One or more ASCII letters, any case. Not `(?i)`: its Unicode case folding
// also matches the Kelvin sign and long s.
static ALPHABETICAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

// One or more ASCII digits
static NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// A validation kind declared on a field through its `data-validation` marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationKind {
    Alphabetical,
    Numeric,
}

impl ValidationKind {
    /// Every kind with a built-in rule, in declaration order
    pub const ALL: [ValidationKind; 2] = [ValidationKind::Alphabetical, ValidationKind::Numeric];

    /// Marker value as it appears in markup
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationKind::Alphabetical => "alphabetical",
            ValidationKind::Numeric => "numeric",
        }
    }

    /// Anchored pattern for this kind
    pub fn pattern(&self) -> &'static Regex {
        match self {
            ValidationKind::Alphabetical => &ALPHABETICAL_REGEX,
            ValidationKind::Numeric => &NUMERIC_REGEX,
        }
    }

    /// True when the whole value matches this kind's pattern
    pub fn matches(&self, value: &str) -> bool {
        self.pattern().is_match(value)
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a marker names no known kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown validation kind '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for ValidationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValidationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// The set of kinds a validator accepts.
///
/// Lookup is exact and case-sensitive on the marker: `"Numeric"` is not
/// registered. Kinds outside the set have no rule, so any value declared with
/// them fails evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    kinds: Vec<ValidationKind>,
}

impl RuleSet {
    /// Both built-in rules: `alphabetical` and `numeric`
    pub fn standard() -> Self {
        Self {
            kinds: ValidationKind::ALL.to_vec(),
        }
    }

    /// A rule set restricted to the given kinds
    pub fn only(kinds: impl IntoIterator<Item = ValidationKind>) -> Self {
        let mut set = Vec::new();
        for kind in kinds {
            if !set.contains(&kind) {
                set.push(kind);
            }
        }
        Self { kinds: set }
    }

    /// Registered kinds, in registration order
    pub fn kinds(&self) -> &[ValidationKind] {
        &self.kinds
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Resolve a marker to its registered kind
    pub fn lookup(&self, kind: &str) -> Option<ValidationKind> {
        self.kinds.iter().copied().find(|k| k.as_str() == kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.lookup(kind).is_some()
    }

    /// True iff `kind` is registered and `value` fully matches its pattern
    pub fn evaluate(&self, kind: &str, value: &str) -> bool {
        match self.lookup(kind) {
            Some(kind) => kind.matches(value),
            None => false,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
