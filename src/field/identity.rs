use super::field_model::{FieldDescriptor, FieldKind};

/// Substrings that mark an id as framework-generated rather than hand-authored.
const UNSTABLE_ID_PATTERNS: &[&str] = &["input", "tel-input"];

/// Trim, lowercase, and collapse every run of non-alphanumerics into `_`.
pub fn normalize_token(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_run = false;

    for c in raw.trim().to_lowercase().chars() {
        if c.is_alphanumeric() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }

    out
}

pub fn is_unstable_id(id: &str) -> bool {
    let lower = id.to_lowercase();
    UNSTABLE_ID_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Stable identity key: `{kind}_{label}` or `{kind}_{label}_{id}` when the
/// DOM id looks hand-authored.
pub fn field_key(field: &FieldDescriptor) -> String {
    let kind = field.kind.as_str();
    let label = normalize_token(&field.label);

    let stable_id = field
        .dom_id
        .as_deref()
        .filter(|id| !id.trim().is_empty() && !is_unstable_id(id))
        .map(normalize_token);

    match stable_id {
        Some(id) => format!("{kind}_{label}_{id}"),
        None => format!("{kind}_{label}"),
    }
}

/// Secondary match used by the collision rule: trimmed lowercase label plus kind.
pub fn label_kind_key(field: &FieldDescriptor) -> (String, FieldKind) {
    (field.label.trim().to_lowercase(), field.kind)
}
