use crate::{ItemValue, SelectConfig};
use icu_collator::{Collator, CollatorOptions};
use icu_provider::DataLocale;
use indexmap::IndexMap;
use std::{cmp::Ordering, fmt};

/// The options a control lists, as an ordered key -> record mapping.
///
/// Keyed objects keep their keys; positional arrays are keyed by index ("0", "1", ...).
/// Both shapes are folded into this one representation when the collection is built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionCollection {
    records: IndexMap<String, ItemValue>,
}

impl OptionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an object or an array value. Any other shape yields an empty collection.
    pub fn from_value(value: ItemValue) -> Self {
        let records = match value {
            ItemValue::Object(map) => map,
            ItemValue::Array(values) => values
                .into_iter()
                .enumerate()
                .map(|(idx, v)| (idx.to_string(), v))
                .collect(),
            other => {
                tracing::debug!(kind = other.type_name(), "options value is not a collection");
                IndexMap::new()
            }
        };
        Self { records }
    }

    pub fn from_records(records: impl IntoIterator<Item = ItemValue>) -> Self {
        Self::from_value(ItemValue::Array(records.into_iter().collect()))
    }

    pub fn parse_json5(text: &str) -> anyhow::Result<Self> {
        Ok(Self::from_value(ItemValue::parse_json5(text)?))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ItemValue> {
        self.records.get(key)
    }

    /// Look up the record a display key points at.
    /// Id keys are looked up as collection keys, matching how the sorted sequence is rendered.
    pub fn resolve(&self, key: &DisplayKey) -> Option<&ItemValue> {
        match key {
            DisplayKey::Key(k) => self.records.get(k),
            DisplayKey::Id(id) => self.records.get(&id.to_string()),
        }
    }
}

/// One element of the ordered sequence a control renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DisplayKey {
    /// A collection key (unsorted listing).
    Key(String),
    /// A record's parsed id (sorted listing).
    Id(i64),
}

impl fmt::Display for DisplayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayKey::Key(k) => f.write_str(k),
            DisplayKey::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Compute the ordered display keys for `options`: sentinel records removed, optionally sorted
/// by text. Sorted sequences carry record ids, unsorted ones carry collection keys.
pub fn normalize(options: &OptionCollection, config: &SelectConfig) -> Vec<DisplayKey> {
    let mut snapshot = options.records.clone();
    snapshot.retain(|_, record| record.int_field(&config.id_field) != Some(config.sentinel_id));

    if !config.sort {
        return snapshot.into_keys().map(DisplayKey::Key).collect();
    }

    // Labels are rendered once up front; the comparator only borrows them.
    let mut labeled: Vec<(String, ItemValue)> = snapshot
        .into_values()
        .map(|record| {
            let label = record.label_field(&config.text_field).unwrap_or_default();
            (label, record)
        })
        .collect();
    let collator = LabelCollator::new();
    labeled.sort_by(|(a, _), (b, _)| collator.compare(a, b));

    labeled
        .iter()
        .filter_map(|(_, record)| {
            let id = record.int_field(&config.id_field);
            if id.is_none() {
                tracing::debug!(
                    record = %record.to_json5_compact(),
                    "record without an integer id left out of sorted listing"
                );
            }
            id.map(DisplayKey::Id)
        })
        .collect()
}

/// Locale-aware label ordering (root collation: accents and case are secondary to the base
/// letters, lowercase sorts before uppercase).
pub struct LabelCollator {
    collator: Option<Collator>,
}

impl LabelCollator {
    pub fn new() -> Self {
        let collator = match Collator::try_new(&DataLocale::default(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(err) => {
                tracing::warn!(error = ?err, "collator unavailable; sorting by case-folded text");
                None
            }
        };
        Self { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => case_folded_compare(a, b),
        }
    }
}

impl Default for LabelCollator {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive ordering; ties put lowercase first so the order is total.
fn case_folded_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
