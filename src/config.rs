use crate::statics;
use anyhow::Context;
use serde::Deserialize;
use std::{fs, path::Path};

/// Resolved control configuration. Immutable once the control is built.
///
/// Field names on the wire follow the markup attribute vocabulary
/// (`emptyItemId`, `itemTextField`, ...); anything omitted falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectConfig {
    /// Header text of the overlay.
    pub title: String,
    /// Id of the record that means "nothing selected"; it is never listed.
    #[serde(rename = "emptyItemId")]
    pub sentinel_id: i64,
    /// Sort listed records by their text field.
    pub sort: bool,
    #[serde(rename = "itemTextField")]
    pub text_field: String,
    #[serde(rename = "itemIdField")]
    pub id_field: String,
    /// Open the overlay on startup when the bound value is the sentinel record.
    #[serde(rename = "autoInitOnEmpty")]
    pub auto_present_on_empty: bool,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            title: statics::EN_DEFAULT_TITLE.to_string(),
            sentinel_id: statics::DEFAULT_SENTINEL_ID,
            sort: false,
            text_field: statics::DEFAULT_TEXT_FIELD.to_string(),
            id_field: statics::DEFAULT_ID_FIELD.to_string(),
            auto_present_on_empty: false,
        }
    }
}

impl SelectConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_sentinel_id(mut self, sentinel_id: i64) -> Self {
        self.sentinel_id = sentinel_id;
        self
    }

    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_fields(mut self, id_field: impl Into<String>, text_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self.text_field = text_field.into();
        self
    }

    pub fn with_auto_present_on_empty(mut self, enabled: bool) -> Self {
        self.auto_present_on_empty = enabled;
        self
    }

    pub fn parse_json5(text: &str) -> anyhow::Result<Self> {
        json5::from_str::<Self>(text).context("parsing select config")
    }

    pub fn load_path(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading {path:?}"))?;
        Self::parse_json5(&text).with_context(|| format!("loading config from {path:?}"))
    }
}
