//! formscan core
//!
//! Validates form fields against the rule named by their `data-validation`
//! marker. `alphabetical` fields must hold one or more letters and `numeric`
//! fields one or more digits; every other field fails unless the validator
//! is configured to skip it.
//!
//! ```
//! use formscan_core::{validate_form, HtmlForm};
//!
//! let markup = r#"
//!     <form class="test-form">
//!         <input name="first-name" data-validation="alphabetical" value="!!!">
//!         <input name="age" data-validation="numeric" value="42">
//!     </form>
//! "#;
//!
//! let form = HtmlForm::find(markup, ".test-form").unwrap();
//! let result = validate_form(&form);
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.messages(), vec!["!!! is not a valid first-name value"]);
//! ```

pub mod config;
pub mod html;
pub mod record;
pub mod result;
pub mod rules;
pub mod validator;

pub use config::{MarkupConfig, RulesConfig, ValidatorConfig};
pub use html::{HtmlError, HtmlForm, HtmlInput};
pub use record::{create_validation_queries, extract_records, FormContainer, InputElement, InputRecord};
pub use result::{ValidationError, ValidationResult};
pub use rules::{RuleSet, UnknownKind, ValidationKind};
pub use validator::{validate_form, validate_item, FormValidator, UnknownKindPolicy};
