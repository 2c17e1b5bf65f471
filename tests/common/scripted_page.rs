use std::collections::{HashMap, HashSet};

use form_discovery::{ChoiceOption, FieldDescriptor, FieldKind, FillValue, FormPage, PageError};

// ============================================================================
// Deterministic FormPage double with scripted reveal rules
// ============================================================================

/// When a scripted field is visible.
#[derive(Debug, Clone)]
pub enum Reveal {
    Always,
    /// Once the field with this label has been given a value
    AfterFilled(&'static str),
    /// While the choice field with this label has this option selected
    WhenSelected(&'static str, &'static str),
}

#[derive(Debug, Clone)]
pub struct ScriptedField {
    pub descriptor: FieldDescriptor,
    pub reveal: Reveal,
    /// Options reported by `choice_options` for radio groups
    pub radio_options: Vec<ChoiceOption>,
}

/// A form whose fields appear and disappear according to `Reveal` rules.
///
/// Records every interaction so tests can assert on what the engine did.
#[derive(Debug, Default)]
pub struct ScriptedPage {
    fields: Vec<ScriptedField>,
    filled: HashSet<String>,
    selected: HashMap<String, String>,

    /// Reveal one more "Generated N" text field per fill round, forever
    pub endless: bool,
    /// Append the extract count to every DOM id, like a re-rendering framework
    pub churn_ids: bool,
    pub failing_fills: HashSet<String>,
    pub failing_selects: HashSet<String>,
    pub failing_option_queries: HashSet<String>,
    /// Extraction fails once this many snapshots have been taken
    pub fail_extract_after: Option<usize>,

    pub extract_calls: usize,
    pub apply_calls: Vec<(String, FillValue)>,
    pub select_calls: Vec<(String, usize)>,
}

impl ScriptedPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, descriptor: FieldDescriptor, reveal: Reveal) -> Self {
        self.fields.push(ScriptedField {
            descriptor,
            reveal,
            radio_options: Vec::new(),
        });
        self
    }

    pub fn text(self, label: &'static str, reveal: Reveal) -> Self {
        self.field(FieldDescriptor::new(FieldKind::Text, label), reveal)
    }

    pub fn radio_group(
        mut self,
        label: &'static str,
        group: &'static str,
        options: &[&str],
        reveal: Reveal,
    ) -> Self {
        self.fields.push(ScriptedField {
            descriptor: FieldDescriptor::new(FieldKind::Radio, label).with_group(group),
            reveal,
            radio_options: options.iter().map(|o| ChoiceOption::new(*o, *o)).collect(),
        });
        self
    }

    pub fn select(self, label: &'static str, options: &[&str], reveal: Reveal) -> Self {
        let options = options.iter().map(|o| ChoiceOption::new(*o, *o)).collect();
        self.field(
            FieldDescriptor::new(FieldKind::Select, label).with_options(options),
            reveal,
        )
    }

    pub fn endless(mut self) -> Self {
        self.endless = true;
        self
    }

    pub fn select_calls_for(&self, label: &str) -> usize {
        self.select_calls.iter().filter(|(l, _)| l == label).count()
    }

    /// Labels currently visible, in document order.
    pub fn visible_labels(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| self.is_visible(&f.reveal) && f.descriptor.visible)
            .map(|f| f.descriptor.label.clone())
            .collect()
    }

    fn is_visible(&self, reveal: &Reveal) -> bool {
        match reveal {
            Reveal::Always => true,
            Reveal::AfterFilled(label) => self.filled.contains(*label),
            Reveal::WhenSelected(label, option) => {
                self.selected.get(*label).map(String::as_str) == Some(*option)
            }
        }
    }

    fn options_of(&self, field: &FieldDescriptor) -> Vec<ChoiceOption> {
        self.fields
            .iter()
            .find(|f| f.descriptor.label == field.label && f.descriptor.kind == field.kind)
            .map(|f| {
                if field.kind == FieldKind::Radio {
                    f.radio_options.clone()
                } else {
                    f.descriptor.choice_options.clone()
                }
            })
            .unwrap_or_default()
    }

    fn choose(&mut self, field: &FieldDescriptor, index: usize) -> Result<(), PageError> {
        let options = self.options_of(field);
        let option = options.get(index).ok_or_else(|| PageError::StaleField {
            field: field.label.clone(),
            reason: format!("no option at index {}", index),
        })?;
        self.selected.insert(field.label.clone(), option.text.clone());
        Ok(())
    }
}

impl FormPage for ScriptedPage {
    fn extract_visible_fields(&mut self) -> Result<Vec<FieldDescriptor>, PageError> {
        if let Some(limit) = self.fail_extract_after {
            if self.extract_calls >= limit {
                return Err(PageError::Closed("target page has been closed".into()));
            }
        }
        self.extract_calls += 1;

        let mut out: Vec<FieldDescriptor> = self
            .fields
            .iter()
            .filter(|f| !f.descriptor.visible || self.is_visible(&f.reveal))
            .map(|f| f.descriptor.clone())
            .collect();

        if self.endless {
            let generated = self
                .filled
                .iter()
                .filter(|l| l.starts_with("Generated "))
                .count();
            for i in 0..=generated {
                out.push(FieldDescriptor::new(FieldKind::Text, format!("Generated {}", i)));
            }
        }

        if self.churn_ids {
            let n = self.extract_calls;
            for field in &mut out {
                if let Some(id) = field.dom_id.take() {
                    field.dom_id = Some(format!("{}-{}", id, n));
                }
            }
        }

        Ok(out)
    }

    fn apply_value(&mut self, field: &FieldDescriptor, value: &FillValue) -> Result<(), PageError> {
        self.apply_calls.push((field.label.clone(), value.clone()));

        if self.failing_fills.contains(&field.label) {
            return Err(PageError::StaleField {
                field: field.label.clone(),
                reason: "element is detached".into(),
            });
        }

        if let FillValue::Choice(index) = value {
            self.choose(field, *index)?;
        }
        self.filled.insert(field.label.clone());
        Ok(())
    }

    fn select_option(&mut self, field: &FieldDescriptor, index: usize) -> Result<(), PageError> {
        self.select_calls.push((field.label.clone(), index));

        if self.failing_selects.contains(&field.label) {
            return Err(PageError::StaleField {
                field: field.label.clone(),
                reason: "element is detached".into(),
            });
        }

        self.choose(field, index)
    }

    fn choice_options(&mut self, field: &FieldDescriptor) -> Result<Vec<ChoiceOption>, PageError> {
        if self.failing_option_queries.contains(&field.label) {
            return Err(PageError::Protocol {
                command: "choice_options".into(),
                error: "evaluation failed".into(),
            });
        }
        Ok(self.options_of(field))
    }
}
