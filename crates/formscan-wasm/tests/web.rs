//! Browser tests against a live DOM. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use formscan_wasm::{create_validation_queries, DomForm, validate_form, validate_form_with, validate_item};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlFormElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

const FORM_HTML: &str = r#"
    <input name="first-name" type="text" data-validation="alphabetical">
    <input name="age" type="text" data-validation="numeric">
"#;

fn test_form() -> HtmlFormElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let form: HtmlFormElement = document.create_element("form").unwrap().dyn_into().unwrap();
    form.set_class_name("test-form");
    form.set_inner_html(FORM_HTML);
    form
}

fn input(form: &HtmlFormElement, name: &str) -> HtmlInputElement {
    form.query_selector(&format!("input[name=\"{}\"]", name))
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn fill(form: &HtmlFormElement, name: &str, age: &str) {
    input(form, "first-name").set_value(name);
    input(form, "age").set_value(age);
}

fn messages(errors: &js_sys::Array) -> Vec<String> {
    errors
        .iter()
        .map(|e| {
            let error: js_sys::Error = e.dyn_into().expect("errors are Error objects");
            String::from(error.message())
        })
        .collect()
}

fn get(object: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(object, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn test_valid_form() {
    let form = test_form();
    fill(&form, "Bob", "42");

    let result = validate_form(&form).unwrap();

    assert!(result.is_valid());
    assert_eq!(result.errors().length(), 0);
}

#[wasm_bindgen_test]
fn test_invalid_name() {
    let form = test_form();
    fill(&form, "!!!", "42");

    let result = validate_form(&form).unwrap();

    assert!(!result.is_valid());
    assert_eq!(messages(&result.errors()), vec!["!!! is not a valid first-name value"]);
}

#[wasm_bindgen_test]
fn test_invalid_age() {
    let form = test_form();
    fill(&form, "Greg", "a");

    let result = validate_form(&form).unwrap();

    assert!(!result.is_valid());
    assert_eq!(messages(&result.errors()), vec!["a is not a valid age value"]);
}

#[wasm_bindgen_test]
fn test_multiple_invalid_fields() {
    let form = test_form();
    fill(&form, "!!!", "a");

    let result = validate_form(&form).unwrap();

    assert_eq!(
        messages(&result.errors()),
        vec!["!!! is not a valid first-name value", "a is not a valid age value"]
    );
}

#[wasm_bindgen_test]
fn test_any_container_element_is_accepted() {
    let document = web_sys::window().unwrap().document().unwrap();
    let container: Element = document.create_element("div").unwrap();
    container.set_inner_html(FORM_HTML);
    for (name, value) in [("first-name", "!!!"), ("age", "42")] {
        let input: HtmlInputElement = container
            .query_selector(&format!("input[name=\"{}\"]", name))
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap();
        input.set_value(value);
    }

    let result = validate_form(&container).unwrap();

    assert_eq!(messages(&result.errors()), vec!["!!! is not a valid first-name value"]);
}

#[wasm_bindgen_test]
fn test_failed_input_query_is_an_error() {
    let form = test_form();

    assert!(DomForm::query(&form, "input[").is_err());
    assert_eq!(DomForm::read(&form).unwrap().len(), 2);
}

#[wasm_bindgen_test]
fn test_validate_form_with_skip() {
    let form = test_form();
    fill(&form, "!!!", "42");
    input(&form, "first-name")
        .set_attribute("data-validation", "foo")
        .unwrap();

    let options = js_sys::Object::new();
    js_sys::Reflect::set(&options, &"unknownKind".into(), &"skip".into()).unwrap();

    let result = validate_form_with(&form, options.into()).unwrap();
    assert!(result.is_valid());

    let strict = validate_form_with(&form, JsValue::UNDEFINED).unwrap();
    assert!(!strict.is_valid());
}

#[wasm_bindgen_test]
fn test_create_validation_queries() {
    let form = test_form();
    fill(&form, "Bob", "42");

    let inputs = js_sys::Array::of2(&input(&form, "first-name"), &input(&form, "age"));
    let validations: js_sys::Array = create_validation_queries(inputs.into())
        .unwrap()
        .dyn_into()
        .unwrap();

    assert_eq!(validations.length(), 2);

    let first = validations.get(0);
    assert_eq!(get(&first, "name").as_string().as_deref(), Some("first-name"));
    assert_eq!(get(&first, "type").as_string().as_deref(), Some("alphabetical"));
    assert_eq!(get(&first, "value").as_string().as_deref(), Some("Bob"));

    let second = validations.get(1);
    assert_eq!(get(&second, "name").as_string().as_deref(), Some("age"));
    assert_eq!(get(&second, "type").as_string().as_deref(), Some("numeric"));
    assert_eq!(get(&second, "value").as_string().as_deref(), Some("42"));
}

#[wasm_bindgen_test]
fn test_create_validation_queries_from_node_list() {
    let form = test_form();
    let nodes = form.query_selector_all("input").unwrap();

    let validations: js_sys::Array = create_validation_queries(nodes.into())
        .unwrap()
        .dyn_into()
        .unwrap();

    assert_eq!(validations.length(), 2);
}

fn item(kind: &str, value: &str) -> JsValue {
    let object = js_sys::Object::new();
    js_sys::Reflect::set(&object, &"type".into(), &kind.into()).unwrap();
    js_sys::Reflect::set(&object, &"value".into(), &value.into()).unwrap();
    object.into()
}

#[wasm_bindgen_test]
fn test_validate_item() {
    let alphabetical_only = || -> JsValue { js_sys::Array::of1(&"alphabetical".into()).into() };

    assert!(validate_item(item("alphabetical", "Bob"), alphabetical_only()).unwrap());
    assert!(!validate_item(item("alphabetical", "42"), alphabetical_only()).unwrap());
    assert!(!validate_item(item("foo", "42"), alphabetical_only()).unwrap());
    assert!(!validate_item(item("numeric", "42"), alphabetical_only()).unwrap());
    assert!(validate_item(item("numeric", "42"), JsValue::UNDEFINED).unwrap());
}
