use super::field_model::{FieldDescriptor, FieldKind, FillValue};

pub const EMAIL_VALUE: &str = "user@example.com";
pub const TEL_VALUE: &str = "+1234567890";
pub const NUMBER_VALUE: &str = "42";
pub const DATE_VALUE: &str = "2024-01-01";
pub const URL_VALUE: &str = "https://example.com";
pub const PASSWORD_VALUE: &str = "TestPass123!";
pub const TEXTAREA_VALUE: &str = "This is a test textarea content for form validation.";

/// Deterministic, type-valid synthetic value for a field.
///
/// Returns `None` when the field cannot be filled (a select with no options).
/// Values never depend on anything but the descriptor, so repeated runs
/// drive the page identically.
pub fn dummy_value(field: &FieldDescriptor) -> Option<FillValue> {
    let value = match field.kind {
        FieldKind::Email => FillValue::Text(EMAIL_VALUE.into()),
        FieldKind::Tel => FillValue::Text(TEL_VALUE.into()),
        FieldKind::Number => FillValue::Text(NUMBER_VALUE.into()),
        FieldKind::Date => FillValue::Text(DATE_VALUE.into()),
        FieldKind::Url => FillValue::Text(URL_VALUE.into()),
        FieldKind::Password => FillValue::Text(PASSWORD_VALUE.into()),
        FieldKind::Textarea => FillValue::Text(TEXTAREA_VALUE.into()),
        FieldKind::Checkbox => FillValue::Checked,
        FieldKind::Radio => FillValue::Choice(0),
        FieldKind::Select => match field.choice_options.len() {
            0 => return None,
            // Option 0 is usually a "Please select" placeholder
            1 => FillValue::Choice(0),
            _ => FillValue::Choice(1),
        },
        FieldKind::Text | FieldKind::Other => FillValue::Text(text_value(&field.label)),
    };

    Some(value)
}

/// Label-aware value for free-text inputs.
fn text_value(label: &str) -> String {
    let l = label.to_lowercase();

    if l.contains("email") {
        return EMAIL_VALUE.into();
    }
    if l.contains("phone") || l.contains("mobile") {
        return TEL_VALUE.into();
    }
    if l.contains("zip") || l.contains("postal") || l.contains("postcode") {
        return "90210".into();
    }
    if l.contains("website") || l.contains("url") {
        return URL_VALUE.into();
    }
    if l.contains("name") {
        return "Jane Doe".into();
    }

    "test".into()
}
