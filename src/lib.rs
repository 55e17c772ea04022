//! Core state logic for a selectable-list overlay control.
//! Normalizes option data into a display order, guards selections against scroll gestures,
//! and keeps the displayed selection in sync with an externally owned model value.
//! Rendering and the host binding are supplied by the caller through [`Presenter`] and
//! [`ModelBinding`].

mod config;
mod control;
mod controller;
mod error;
mod model;
pub mod options;
mod present;
pub mod statics;
mod value;

pub use config::SelectConfig;
pub use control::{Scheduler, SelectList, SharedSelectList, TickQueue};
pub use controller::{Clock, SelectOutcome, SelectionController, SystemClock};
pub use error::SelectError;
pub use model::{DisplayState, ModelBinding, ModelSynchronizer};
pub use options::{DisplayKey, OptionCollection};
pub use present::{OverlayContent, OverlayHandle, OverlayRow, PresentOptions, Presenter};
pub use value::{ItemNumber, ItemValue};
