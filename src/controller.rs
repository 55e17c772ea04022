use crate::{
    ItemValue, ModelBinding, ModelSynchronizer, OverlayContent, OverlayHandle, PresentOptions,
    Presenter, SelectError, statics,
};
use std::time::Instant;

/// Source of "now" for the scroll debounce.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// What happened to a selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Model written and overlay closed.
    Selected,
    /// Too soon after a scroll; overlay left open.
    Debounced,
    /// No overlay is open.
    NotOpen,
    /// The clicked key does not resolve to an option.
    Unknown,
}

/// Open/select/close state of the overlay plus the scroll debounce.
pub struct SelectionController<P: Presenter, C> {
    presenter: P,
    clock: C,
    overlay: Option<P::Handle>,
    last_scroll: Option<Instant>,
}

impl<P: Presenter, C: Clock> SelectionController<P, C> {
    pub fn new(presenter: P, clock: C) -> Self {
        Self {
            presenter,
            clock,
            overlay: None,
            last_scroll: None,
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn is_open(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn present(
        &mut self,
        content: OverlayContent,
        options: &PresentOptions,
    ) -> Result<(), SelectError> {
        if self.is_open() {
            tracing::debug!("overlay already open");
            return Ok(());
        }

        let rows = content.rows.len();
        let mut handle = self
            .presenter
            .present(content, options)
            .map_err(SelectError::Present)?;
        if let Err(err) = handle.show() {
            // The presenter built a surface we will not track; release it.
            if let Err(dismiss_err) = handle.dismiss() {
                tracing::warn!(error = ?dismiss_err, "releasing an overlay that failed to show");
            }
            return Err(SelectError::Show(err));
        }
        self.overlay = Some(handle);
        tracing::debug!(rows, animation = options.animation, "overlay opened");
        Ok(())
    }

    pub fn on_scroll(&mut self) {
        self.last_scroll = Some(self.clock.now());
    }

    /// A release right after a scroll is not a tap on the row under the finger.
    fn in_scroll_window(&self) -> bool {
        self.last_scroll.is_some_and(|at| {
            self.clock.now().saturating_duration_since(at) <= statics::SELECT_DEBOUNCE
        })
    }

    pub fn select<B: ModelBinding>(
        &mut self,
        item: ItemValue,
        sync: &mut ModelSynchronizer<B>,
    ) -> Result<SelectOutcome, SelectError> {
        if !self.is_open() {
            return Ok(SelectOutcome::NotOpen);
        }
        if self.in_scroll_window() {
            tracing::debug!("selection ignored: too close to last scroll");
            return Ok(SelectOutcome::Debounced);
        }

        sync.apply_selection(item);
        self.dismiss()?;
        Ok(SelectOutcome::Selected)
    }

    pub fn dismiss(&mut self) -> Result<(), SelectError> {
        let Some(handle) = self.overlay.as_mut() else {
            return Ok(());
        };
        handle.dismiss().map_err(SelectError::Dismiss)?;
        self.overlay = None;
        self.last_scroll = None;
        tracing::debug!("overlay closed");
        Ok(())
    }
}
