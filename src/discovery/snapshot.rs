use tracing::debug;

use crate::browser::error::PageError;
use crate::browser::page::FormPage;
use crate::field::field_model::FieldDescriptor;

/// Current visible fields of the page.
///
/// Hidden descriptors are dropped here so they never enter the inventory,
/// whatever the extractor reports.
pub fn take_snapshot(page: &mut dyn FormPage) -> Result<Vec<FieldDescriptor>, PageError> {
    let raw = page.extract_visible_fields()?;
    let total = raw.len();

    let visible: Vec<FieldDescriptor> = raw.into_iter().filter(|f| f.visible).collect();

    debug!(total, visible = visible.len(), "snapshot taken");
    Ok(visible)
}
