use serde::{Deserialize, Serialize};

// ============================================================================
// Field descriptors produced by the snapshot extractor
// ============================================================================

/// Input kind as reported by the page (`type` attribute, or tag name for
/// `textarea` / `select`).
///
/// Deserializes leniently from any raw type string; unknown types become
/// `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Number,
    Date,
    Url,
    Password,
    Checkbox,
    Radio,
    Textarea,
    Select,
    Other,
}

impl From<String> for FieldKind {
    fn from(raw: String) -> Self {
        FieldKind::from_input_type(&raw)
    }
}

impl FieldKind {
    /// Map a raw `type` attribute or tag name onto a kind.
    pub fn from_input_type(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "text" | "search" | "" => FieldKind::Text,
            "email" => FieldKind::Email,
            "tel" => FieldKind::Tel,
            "number" => FieldKind::Number,
            "date" | "datetime-local" | "datetime" => FieldKind::Date,
            "url" => FieldKind::Url,
            "password" => FieldKind::Password,
            "checkbox" => FieldKind::Checkbox,
            "radio" => FieldKind::Radio,
            "textarea" => FieldKind::Textarea,
            "select" | "select-one" | "select-multiple" => FieldKind::Select,
            _ => FieldKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Url => "url",
            FieldKind::Password => "password",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
            FieldKind::Textarea => "textarea",
            FieldKind::Select => "select",
            FieldKind::Other => "other",
        }
    }

    /// Radio groups and selects are the only kinds the choice explorer cycles.
    pub fn is_choice(&self) -> bool {
        matches!(self, FieldKind::Radio | FieldKind::Select)
    }
}

/// One `<option>` of a select, or one radio of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub text: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

/// A single discovered form input and its provenance.
///
/// Created by the extractor with default provenance; `conditional`,
/// `discovered_at_iteration` and `triggered_by` are stamped once by the
/// discovery loop or the choice explorer when the field is first detected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub kind: FieldKind,

    #[serde(default)]
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dom_id: Option<String>,

    /// Radio group name (the `name` attribute), when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default = "default_visible", skip_serializing)]
    pub visible: bool,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choice_options: Vec<ChoiceOption>,

    #[serde(default)]
    pub conditional: bool,

    #[serde(default)]
    pub discovered_at_iteration: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_by: Option<String>,
}

fn default_visible() -> bool {
    true
}

impl FieldDescriptor {
    pub fn new(kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            dom_id: None,
            group: None,
            visible: true,
            required: false,
            choice_options: Vec::new(),
            conditional: false,
            discovered_at_iteration: 0,
            triggered_by: None,
        }
    }

    pub fn with_dom_id(mut self, id: impl Into<String>) -> Self {
        self.dom_id = Some(id.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_options(mut self, options: Vec<ChoiceOption>) -> Self {
        self.choice_options = options;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Value injected into a field by `FormPage::apply_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FillValue {
    Text(String),
    Checked,
    Choice(usize),
}
