//! Field extraction
//!
//! A form is anything that can hand out its input elements in document order.
//! Each element is read once into an [`InputRecord`] per validation pass.

use serde::{Deserialize, Serialize};

/// An input-like element: a name, a current value and an optional
/// validation-kind marker.
pub trait InputElement {
    fn name(&self) -> String;

    fn value(&self) -> String;

    /// The declared validation kind, `None` when the marker is absent
    fn validation_kind(&self) -> Option<String>;
}

/// A form-like container exposing its input elements in document order
pub trait FormContainer {
    type Input: InputElement;

    fn inputs(&self) -> Vec<Self::Input>;
}

/// Snapshot of one field, taken at validation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    #[serde(default)]
    pub name: String,
    /// Exposed as `type` to browser callers
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub validation_kind: Option<String>,
    pub value: String,
}

impl InputRecord {
    pub fn new(
        name: impl Into<String>,
        validation_kind: Option<&str>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            validation_kind: validation_kind.map(str::to_string),
            value: value.into(),
        }
    }

    /// Read a record from an element without touching it
    pub fn from_element<E: InputElement + ?Sized>(element: &E) -> Self {
        Self {
            name: element.name(),
            validation_kind: element.validation_kind(),
            value: element.value(),
        }
    }
}

/// One record per input element of `form`, in document order
pub fn extract_records<F: FormContainer + ?Sized>(form: &F) -> Vec<InputRecord> {
    form.inputs()
        .iter()
        .map(InputRecord::from_element)
        .collect()
}

/// Records for an arbitrary list of elements, in the order given
pub fn create_validation_queries<'a, E, I>(inputs: I) -> Vec<InputRecord>
where
    E: InputElement + 'a,
    I: IntoIterator<Item = &'a E>,
{
    inputs.into_iter().map(InputRecord::from_element).collect()
}
