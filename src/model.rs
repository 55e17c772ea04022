use crate::{ItemValue, SelectConfig};
use std::rc::Rc;

/// Host side of the two-way binding: the externally owned model value.
pub trait ModelBinding {
    /// Current value; `None` (or `ItemValue::Null`) when nothing is bound yet.
    fn model_value(&self) -> Option<ItemValue>;
    fn set_model_value(&mut self, value: ItemValue);
}

/// What the trigger and overlay show about the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayState {
    pub selected_label: Option<String>,
    pub selected_id: Option<i64>,
    /// The current selection is the sentinel record, so there is nothing to go back to.
    pub close_button_hidden: bool,
}

impl DisplayState {
    pub fn from_record(record: Option<&ItemValue>, config: &SelectConfig) -> Self {
        let Some(record) = record.filter(|r| !r.is_null()) else {
            return Self::default();
        };
        let selected_id = record.int_field(&config.id_field);
        Self {
            selected_label: record.label_field(&config.text_field),
            selected_id,
            close_button_hidden: selected_id == Some(config.sentinel_id),
        }
    }
}

/// Keeps [`DisplayState`] a projection of the bound model value.
#[derive(Debug)]
pub struct ModelSynchronizer<B> {
    binding: B,
    config: Rc<SelectConfig>,
    display: DisplayState,
}

impl<B: ModelBinding> ModelSynchronizer<B> {
    pub fn new(binding: B, config: Rc<SelectConfig>) -> Self {
        Self {
            binding,
            config,
            display: DisplayState::default(),
        }
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn binding(&self) -> &B {
        &self.binding
    }

    pub fn binding_mut(&mut self) -> &mut B {
        &mut self.binding
    }

    pub fn refresh_from_model(&mut self) -> &DisplayState {
        let model = self.binding.model_value();
        self.display = DisplayState::from_record(model.as_ref(), &self.config);
        tracing::debug!(
            label = ?self.display.selected_label,
            id = ?self.display.selected_id,
            "display state refreshed from model"
        );
        &self.display
    }

    /// Record a pick: display state follows the item and the item is written to the model.
    pub fn apply_selection(&mut self, item: ItemValue) {
        self.display = DisplayState::from_record(Some(&item), &self.config);
        self.binding.set_model_value(item);
    }

    /// The bound value currently is the sentinel record.
    pub fn model_is_sentinel(&self) -> bool {
        self.binding
            .model_value()
            .and_then(|v| v.int_field(&self.config.id_field))
            == Some(self.config.sentinel_id)
    }
}
