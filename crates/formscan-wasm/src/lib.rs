//! formscan WASM
//!
//! WebAssembly bindings that validate live HTML forms in the browser.
//! Inputs are read through `querySelectorAll("input")` and classified by their
//! `data-validation` attribute, using the same rules as the server side.

use formscan_core::{
    FormContainer, FormValidator, InputElement, InputRecord, RuleSet, UnknownKindPolicy,
    ValidationKind, ValidationResult,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

/// Attribute read as the validation marker
pub const MARKER_ATTRIBUTE: &str = "data-validation";

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// A live `<input>` element
pub struct DomInput(HtmlInputElement);

impl InputElement for DomInput {
    fn name(&self) -> String {
        self.0.name()
    }

    fn value(&self) -> String {
        self.0.value()
    }

    fn validation_kind(&self) -> Option<String> {
        self.0.get_attribute(MARKER_ATTRIBUTE)
    }
}

/// Inputs of a live container element, read once with `querySelectorAll("input")`.
///
/// Any element works as the container; it does not have to be a `<form>`.
pub struct DomForm {
    inputs: Vec<HtmlInputElement>,
}

impl DomForm {
    /// Snapshot the inputs under `container`; a failed query is an error
    pub fn read(container: &Element) -> Result<Self, JsValue> {
        Self::query(container, "input")
    }

    /// Snapshot the input elements matching `selector` under `container`
    pub fn query(container: &Element, selector: &str) -> Result<Self, JsValue> {
        let nodes = container.query_selector_all(selector)?;

        let inputs = (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
            .collect();

        Ok(Self { inputs })
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl FormContainer for DomForm {
    type Input = DomInput;

    fn inputs(&self) -> Vec<DomInput> {
        self.inputs.iter().cloned().map(DomInput).collect()
    }
}

/// Validation result handed to JavaScript
#[wasm_bindgen]
pub struct FormValidationResult {
    inner: ValidationResult,
}

#[wasm_bindgen]
impl FormValidationResult {
    /// True when no field failed
    #[wasm_bindgen(getter, js_name = isValid)]
    pub fn is_valid(&self) -> bool {
        self.inner.is_valid()
    }

    /// One `Error` per failing field, in document order
    #[wasm_bindgen(getter)]
    pub fn errors(&self) -> js_sys::Array {
        self.inner
            .errors()
            .iter()
            .map(|error| JsValue::from(js_sys::Error::new(&error.message())))
            .collect()
    }

    /// Plain-object form: `{ isValid, errors: [{ name, value, message }] }`
    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner)?)
    }
}

impl From<ValidationResult> for FormValidationResult {
    fn from(inner: ValidationResult) -> Self {
        Self { inner }
    }
}

/// Options accepted by `validateFormWith`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOptions {
    #[serde(default)]
    pub unknown_kind: UnknownKindPolicy,
    #[serde(default)]
    pub kinds: Option<Vec<String>>,
}

impl ValidateOptions {
    fn validator(&self) -> FormValidator {
        let rules = self
            .kinds
            .as_deref()
            .map(rule_set_from_names)
            .unwrap_or_default();
        FormValidator::new(rules, self.unknown_kind)
    }
}

/// Rule set for the given kind names; names without a built-in rule are dropped
pub fn rule_set_from_names<S: AsRef<str>>(names: &[S]) -> RuleSet {
    RuleSet::only(
        names
            .iter()
            .filter_map(|name| name.as_ref().parse::<ValidationKind>().ok()),
    )
}

/// Validate every input under `form` with the standard rules
///
/// # Example (JavaScript)
/// ```javascript
/// const result = validateForm(document.querySelector('.test-form'));
/// if (!result.isValid) {
///     result.errors.forEach(e => console.log(e.message));
/// }
/// ```
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(form: &Element) -> Result<FormValidationResult, JsValue> {
    let form = DomForm::read(form)?;
    Ok(FormValidator::default().validate_form(&form).into())
}

/// Validate a form with options `{ unknownKind: "reject" | "skip", kinds: string[] }`
#[wasm_bindgen(js_name = validateFormWith)]
pub fn validate_form_with(
    form: &Element,
    options: JsValue,
) -> Result<FormValidationResult, JsValue> {
    let options: ValidateOptions = if options.is_undefined() || options.is_null() {
        ValidateOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse options: {}", e)))?
    };

    let form = DomForm::read(form)?;
    Ok(options.validator().validate_form(&form).into())
}

/// Map input elements to `{ name, type, value }` objects
///
/// Accepts an array of inputs or a `NodeList`.
#[wasm_bindgen(js_name = createValidationQueries)]
pub fn create_validation_queries(inputs: JsValue) -> Result<JsValue, JsValue> {
    let elements = js_sys::Array::from(&inputs);
    let mut records = Vec::with_capacity(elements.length() as usize);

    for element in elements.iter() {
        let input = element
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| JsValue::from_str("createValidationQueries expects input elements"))?;
        records.push(InputRecord::from_element(&DomInput(input)));
    }

    Ok(serde_wasm_bindgen::to_value(&records)?)
}

/// Check one `{ type, value }` object against the standard rules, or only the
/// kinds listed in `kinds` when given
#[wasm_bindgen(js_name = validateItem)]
pub fn validate_item(validation: JsValue, kinds: JsValue) -> Result<bool, JsValue> {
    let record: InputRecord = serde_wasm_bindgen::from_value(validation)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse validation: {}", e)))?;

    let rules = if kinds.is_undefined() || kinds.is_null() {
        RuleSet::standard()
    } else {
        let names: Vec<String> = serde_wasm_bindgen::from_value(kinds)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse kinds: {}", e)))?;
        rule_set_from_names(&names)
    };

    Ok(formscan_core::validate_item(&record, &rules))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_set_from_names() {
        let rules = rule_set_from_names(&["alphabetical", "foo"]);
        assert_eq!(rules, RuleSet::only([ValidationKind::Alphabetical]));
        assert!(rule_set_from_names::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_default_options_use_standard_rules() {
        let validator = ValidateOptions::default().validator();
        assert_eq!(validator.rules(), &RuleSet::standard());
        assert_eq!(validator.policy(), UnknownKindPolicy::Reject);
    }

    #[test]
    fn test_options_restrict_kinds() {
        let options = ValidateOptions {
            unknown_kind: UnknownKindPolicy::Skip,
            kinds: Some(vec!["numeric".to_string()]),
        };
        let validator = options.validator();
        assert_eq!(validator.rules(), &RuleSet::only([ValidationKind::Numeric]));
        assert_eq!(validator.policy(), UnknownKindPolicy::Skip);
    }
}
