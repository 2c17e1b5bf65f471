mod common;

use form_discovery::discovery::fill_driver::fill_fields;
use form_discovery::field::field_model::{ChoiceOption, FieldDescriptor, FieldKind, FillValue};
use form_discovery::field::fill::{DATE_VALUE, EMAIL_VALUE, TEL_VALUE, dummy_value};

use crate::common::scripted_page::{Reveal, ScriptedPage};

fn options(n: usize) -> Vec<ChoiceOption> {
    (0..n)
        .map(|i| ChoiceOption::new(format!("v{}", i), format!("Option {}", i)))
        .collect()
}

// =========================================================================
// Canned values
// =========================================================================

#[test]
fn dummy_values_are_type_valid() {
    let cases = [
        (FieldKind::Email, FillValue::Text(EMAIL_VALUE.into())),
        (FieldKind::Tel, FillValue::Text(TEL_VALUE.into())),
        (FieldKind::Number, FillValue::Text("42".into())),
        (FieldKind::Date, FillValue::Text(DATE_VALUE.into())),
        (FieldKind::Url, FillValue::Text("https://example.com".into())),
        (FieldKind::Checkbox, FillValue::Checked),
        (FieldKind::Radio, FillValue::Choice(0)),
    ];

    for (kind, expected) in cases {
        let field = FieldDescriptor::new(kind, "Anything");
        assert_eq!(dummy_value(&field), Some(expected), "kind {:?}", kind);
    }
}

#[test]
fn date_value_is_iso_formatted() {
    let parts: Vec<&str> = DATE_VALUE.split('-').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0].len(), 4);
    assert!(EMAIL_VALUE.contains('@'));
}

#[test]
fn text_values_follow_label() {
    let name = FieldDescriptor::new(FieldKind::Text, "Full name");
    let zip = FieldDescriptor::new(FieldKind::Text, "Postal code");
    let other = FieldDescriptor::new(FieldKind::Text, "Favourite colour");

    assert_eq!(dummy_value(&name), Some(FillValue::Text("Jane Doe".into())));
    assert_eq!(dummy_value(&zip), Some(FillValue::Text("90210".into())));
    assert_eq!(dummy_value(&other), Some(FillValue::Text("test".into())));
}

#[test]
fn select_skips_placeholder_option() {
    let empty = FieldDescriptor::new(FieldKind::Select, "Title");
    let single = FieldDescriptor::new(FieldKind::Select, "Title").with_options(options(1));
    let several = FieldDescriptor::new(FieldKind::Select, "Title").with_options(options(3));

    assert_eq!(dummy_value(&empty), None);
    assert_eq!(dummy_value(&single), Some(FillValue::Choice(0)));
    assert_eq!(dummy_value(&several), Some(FillValue::Choice(1)));
}

#[test]
fn dummy_values_are_deterministic() {
    let field = FieldDescriptor::new(FieldKind::Textarea, "Cover letter");
    assert_eq!(dummy_value(&field), dummy_value(&field.clone()));
}

// =========================================================================
// fill_fields
// =========================================================================

#[test]
fn radio_group_is_filled_once() {
    let mut page = ScriptedPage::new();
    let fields = vec![
        FieldDescriptor::new(FieldKind::Radio, "Yes").with_group("consent"),
        FieldDescriptor::new(FieldKind::Radio, "No").with_group("consent"),
        FieldDescriptor::new(FieldKind::Text, "City"),
    ];

    let report = fill_fields(&mut page, &fields);

    assert_eq!(report.filled, 1, "Only City resolves on this page");
    assert_eq!(report.failed, 1, "The unscripted radio has no options");
    assert_eq!(report.skipped, 1, "Second radio of the group skipped");
    assert_eq!(page.apply_calls.len(), 2);
}

#[test]
fn failing_field_does_not_stop_the_pass() {
    let mut page = ScriptedPage::new()
        .text("First name", Reveal::Always)
        .text("Last name", Reveal::Always)
        .text("City", Reveal::Always);
    page.failing_fills.insert("Last name".into());

    let fields = vec![
        FieldDescriptor::new(FieldKind::Text, "First name"),
        FieldDescriptor::new(FieldKind::Text, "Last name"),
        FieldDescriptor::new(FieldKind::Text, "City"),
    ];

    let report = fill_fields(&mut page, &fields);

    assert_eq!(report.filled, 2);
    assert_eq!(report.failed, 1);
    let labels: Vec<&str> = page.apply_calls.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(labels, vec!["First name", "Last name", "City"]);
}

#[test]
fn empty_select_is_skipped_without_page_call() {
    let mut page = ScriptedPage::new();
    let fields = vec![FieldDescriptor::new(FieldKind::Select, "Region")];

    let report = fill_fields(&mut page, &fields);

    assert_eq!(report.skipped, 1);
    assert!(page.apply_calls.is_empty());
}
