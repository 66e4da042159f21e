//! HTML form reader
//!
//! Reads `<form>` elements and their `<input>` children out of markup so that
//! rendered pages and fixtures can be validated without a browser. Only what
//! validation needs is kept: form attributes and input attributes, in
//! document order.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::config::MarkupConfig;
use crate::record::{FormContainer, InputElement};

// Start of a comment, or of a form, input or raw-text element tag
static TAG_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<!--|<(/?)(form|input|script|style|textarea|title)(?:[\s/>]|$)").unwrap()
});

// Elements whose content is text, never markup
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Errors raised while reading forms out of markup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HtmlError {
    #[error("no <form> element found")]
    NoForm,

    #[error("no <form> element with class '{0}'")]
    FormNotFound(String),

    #[error("<form> starting at byte {0} is never closed")]
    UnterminatedForm(usize),

    #[error("unterminated <{tag}> tag starting at byte {offset}")]
    UnterminatedTag { tag: String, offset: usize },
}

/// Attributes of one element, names lowercased, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// First value of `name`; a valueless attribute reads as ""
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// An `<input>` element read from markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlInput {
    attributes: Attributes,
    marker_attribute: String,
}

impl HtmlInput {
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Overwrite the current value, like assigning `input.value`
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.attributes.set("value", value);
    }
}

impl InputElement for HtmlInput {
    fn name(&self) -> String {
        self.attributes.get("name").unwrap_or_default().to_string()
    }

    fn value(&self) -> String {
        self.attributes.get("value").unwrap_or_default().to_string()
    }

    fn validation_kind(&self) -> Option<String> {
        self.attributes.get(&self.marker_attribute).map(str::to_string)
    }
}

/// A `<form>` element and its inputs. Clones are independent copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlForm {
    attributes: Attributes,
    inputs: Vec<HtmlInput>,
}

impl HtmlForm {
    /// Every form in `markup`, in document order
    pub fn parse_all(markup: &str) -> Result<Vec<HtmlForm>, HtmlError> {
        Self::parse_all_with(markup, &MarkupConfig::default())
    }

    /// Like [`HtmlForm::parse_all`], reading markers from the configured attribute
    pub fn parse_all_with(markup: &str, config: &MarkupConfig) -> Result<Vec<HtmlForm>, HtmlError> {
        let forms = Scanner::new(markup, &config.marker_attribute).run()?;
        debug!(forms = forms.len(), "parsed forms from markup");
        Ok(forms)
    }

    /// The first form in `markup`
    pub fn parse(markup: &str) -> Result<HtmlForm, HtmlError> {
        Self::parse_all(markup)?
            .into_iter()
            .next()
            .ok_or(HtmlError::NoForm)
    }

    /// The first form carrying `class`; a leading `.` is accepted
    pub fn find(markup: &str, class: &str) -> Result<HtmlForm, HtmlError> {
        Self::find_with(markup, class, &MarkupConfig::default())
    }

    pub fn find_with(markup: &str, class: &str, config: &MarkupConfig) -> Result<HtmlForm, HtmlError> {
        let class = class.strip_prefix('.').unwrap_or(class);
        Self::parse_all_with(markup, config)?
            .into_iter()
            .find(|form| form.attributes.has_class(class))
            .ok_or_else(|| HtmlError::FormNotFound(class.to_string()))
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn inputs(&self) -> &[HtmlInput] {
        &self.inputs
    }

    /// First input named `name`
    pub fn input(&self, name: &str) -> Option<&HtmlInput> {
        self.inputs.iter().find(|input| input.name() == name)
    }

    pub fn input_mut(&mut self, name: &str) -> Option<&mut HtmlInput> {
        self.inputs.iter_mut().find(|input| input.name() == name)
    }

    /// Set the value of the first input named `name`; false when there is none
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.input_mut(name) {
            Some(input) => {
                input.set_value(value);
                true
            }
            None => false,
        }
    }
}

impl FormContainer for HtmlForm {
    type Input = HtmlInput;

    fn inputs(&self) -> Vec<HtmlInput> {
        self.inputs.clone()
    }
}

struct Scanner<'a> {
    src: &'a str,
    marker_attribute: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str, marker_attribute: &'a str) -> Self {
        Self {
            src,
            marker_attribute,
        }
    }

    fn run(&self) -> Result<Vec<HtmlForm>, HtmlError> {
        let mut forms = Vec::new();
        let mut open: Option<(usize, HtmlForm)> = None;
        let mut pos = 0;

        while let Some(caps) = TAG_START.captures_at(self.src, pos) {
            let Some(whole) = caps.get(0) else {
                break;
            };
            let offset = whole.start();

            let (Some(slash), Some(tag)) = (caps.get(1), caps.get(2)) else {
                // Comment: an unclosed one runs to the end of the document
                pos = self.src[whole.end()..]
                    .find("-->")
                    .map(|i| whole.end() + i + 3)
                    .unwrap_or(self.src.len());
                continue;
            };
            let tag_name = tag.as_str().to_ascii_lowercase();
            let closing = !slash.as_str().is_empty();

            let (attributes, end) = self.read_attributes(tag.end(), &tag_name, offset)?;
            pos = end;

            if !closing && RAW_TEXT_ELEMENTS.contains(&tag_name.as_str()) {
                pos = self.raw_text_end(end, &tag_name);
                continue;
            }

            match (tag_name.as_str(), closing) {
                ("form", false) => {
                    // Nested form start tags are ignored, as browsers do
                    if open.is_none() {
                        open = Some((
                            offset,
                            HtmlForm {
                                attributes,
                                inputs: Vec::new(),
                            },
                        ));
                    }
                }
                ("form", true) => {
                    if let Some((_, form)) = open.take() {
                        forms.push(form);
                    }
                }
                ("input", false) => {
                    if let Some((_, form)) = open.as_mut() {
                        form.inputs.push(HtmlInput {
                            attributes,
                            marker_attribute: self.marker_attribute.to_string(),
                        });
                    }
                }
                _ => {}
            }
        }

        if let Some((offset, _)) = open {
            return Err(HtmlError::UnterminatedForm(offset));
        }

        Ok(forms)
    }

    /// Start of the `</tag` that closes a raw-text element, or the end of input
    fn raw_text_end(&self, from: usize, tag: &str) -> usize {
        let closing = format!("</{}", tag);
        self.src[from..]
            .to_ascii_lowercase()
            .find(&closing)
            .map(|i| from + i)
            .unwrap_or(self.src.len())
    }

    /// Read attributes from `start` up to the closing `>`; returns the byte after it
    fn read_attributes(
        &self,
        start: usize,
        tag: &str,
        offset: usize,
    ) -> Result<(Attributes, usize), HtmlError> {
        let bytes = self.src.as_bytes();
        let unterminated = || HtmlError::UnterminatedTag {
            tag: tag.to_string(),
            offset,
        };
        let mut attributes = Attributes::default();
        let mut i = start;

        loop {
            while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
                i += 1;
            }
            if i >= bytes.len() {
                return Err(unterminated());
            }
            if bytes[i] == b'>' {
                return Ok((attributes, i + 1));
            }

            let name_start = i;
            while i < bytes.len()
                && !bytes[i].is_ascii_whitespace()
                && !matches!(bytes[i], b'=' | b'>' | b'/')
            {
                i += 1;
            }
            let name = self.src[name_start..i].to_ascii_lowercase();

            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }

            if i < bytes.len() && bytes[i] == b'=' {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                if i >= bytes.len() {
                    return Err(unterminated());
                }

                let value = if bytes[i] == b'"' || bytes[i] == b'\'' {
                    let quote = bytes[i];
                    let value_start = i + 1;
                    let len = bytes[value_start..]
                        .iter()
                        .position(|&b| b == quote)
                        .ok_or_else(unterminated)?;
                    i = value_start + len + 1;
                    &self.src[value_start..value_start + len]
                } else {
                    let value_start = i;
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                        i += 1;
                    }
                    &self.src[value_start..i]
                };

                if !attributes.0.iter().any(|(key, _)| *key == name) {
                    attributes.0.push((name, decode_entities(value)));
                }
            } else if !name.is_empty() && !attributes.0.iter().any(|(key, _)| *key == name) {
                attributes.0.push((name, String::new()));
            }
        }
    }
}

fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }

    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
