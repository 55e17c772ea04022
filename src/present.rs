use crate::{DisplayKey, ItemValue, statics};

/// Options passed along with overlay content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentOptions {
    pub animation: &'static str,
}

impl Default for PresentOptions {
    fn default() -> Self {
        Self {
            animation: statics::ANIMATION_SLIDE_IN_RIGHT,
        }
    }
}

/// Everything a presenter needs to draw the list overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayContent {
    pub title: String,
    pub close_button_hidden: bool,
    pub rows: Vec<OverlayRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRow {
    pub key: DisplayKey,
    pub label: Option<String>,
    /// The record handed back on click.
    pub record: ItemValue,
    /// Row id matches the current selection (checkmark).
    pub checked: bool,
}

/// Presentation layer that can build and show an overlay.
///
/// The overlay reports scrolls and row clicks back through
/// [`SelectList::on_scroll`](crate::SelectList::on_scroll) and
/// [`SelectList::select`](crate::SelectList::select) / [`SelectList::select_key`](crate::SelectList::select_key).
/// Implementations must not call back into the control synchronously from these methods.
pub trait Presenter {
    type Handle: OverlayHandle;

    fn present(
        &mut self,
        content: OverlayContent,
        options: &PresentOptions,
    ) -> anyhow::Result<Self::Handle>;
}

pub trait OverlayHandle {
    fn show(&mut self) -> anyhow::Result<()>;
    fn dismiss(&mut self) -> anyhow::Result<()>;
}
