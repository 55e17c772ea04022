// Central place for defaults, UI strings and other non-localized constants.
// Keep these out of the component modules to reduce duplication and make tweaks safer.

use std::time::Duration;

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_DEFAULT_TITLE: &str = "Please select";
pub const EN_BTN_BACK: &str = "Back";

// Default record field names.
pub const DEFAULT_TEXT_FIELD: &str = "text";
pub const DEFAULT_ID_FIELD: &str = "id";

// Id that means "nothing selected" unless configured otherwise.
pub const DEFAULT_SENTINEL_ID: i64 = 0;

// Selections are ignored until this much time has passed since the last scroll.
pub const SELECT_DEBOUNCE: Duration = Duration::from_millis(150);

// Animation tag handed to the presentation layer.
pub const ANIMATION_SLIDE_IN_RIGHT: &str = "slide-in-right";

pub const EN_LITERAL_TRUE: &str = "true";
pub const EN_LITERAL_FALSE: &str = "false";
