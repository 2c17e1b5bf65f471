use crate::browser::error::PageError;
use crate::field::field_model::{ChoiceOption, FieldDescriptor, FillValue};

// ============================================================================
// FormPage trait: the only capability the discovery engine needs from a page
// ============================================================================

/// A live form the engine can observe and drive.
///
/// Implemented by `BrowserSession` for real pages and by scripted doubles in
/// tests. Every mutating call must return only after the page's reactive
/// logic has had a chance to settle; the engine does no waiting of its own.
pub trait FormPage {
    /// Current input fields, in document order.
    ///
    /// Implementations should already drop hidden fields; the engine filters
    /// `visible == false` again at the snapshot boundary.
    fn extract_visible_fields(&mut self) -> Result<Vec<FieldDescriptor>, PageError>;

    /// Inject a value and fire input/change/blur notifications.
    fn apply_value(&mut self, field: &FieldDescriptor, value: &FillValue) -> Result<(), PageError>;

    /// Select the option at `index` (select option or radio of the group) and
    /// fire a change notification.
    fn select_option(&mut self, field: &FieldDescriptor, index: usize) -> Result<(), PageError>;

    /// Concrete options of a choice field in document order.
    ///
    /// Selects carry their options in the descriptor. Radio groups usually
    /// need a page query, so implementations override this for radios.
    fn choice_options(&mut self, field: &FieldDescriptor) -> Result<Vec<ChoiceOption>, PageError> {
        Ok(field.choice_options.clone())
    }
}
