use crate::{
    Clock, DisplayKey, DisplayState, ItemValue, ModelBinding, ModelSynchronizer,
    OptionCollection, OverlayContent, OverlayRow, PresentOptions, Presenter, SelectConfig,
    SelectError, SelectOutcome, SelectionController, SystemClock, options::normalize,
};
use std::{cell::RefCell, collections::VecDeque, rc::Rc};

/// Runs a task on a later turn of the host's event loop.
pub trait Scheduler {
    fn defer(&mut self, task: Box<dyn FnOnce()>);
}

/// FIFO of deferred tasks, drained one turn at a time by the host loop.
#[derive(Default)]
pub struct TickQueue {
    tasks: VecDeque<Box<dyn FnOnce()>>,
}

impl TickQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run the tasks queued before this call. Tasks deferred while running wait for the next turn.
    pub fn run_pending(&mut self) -> usize {
        let tasks = std::mem::take(&mut self.tasks);
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }
}

impl Scheduler for TickQueue {
    fn defer(&mut self, task: Box<dyn FnOnce()>) {
        self.tasks.push_back(task);
    }
}

pub type SharedSelectList<P, B, C = SystemClock> = Rc<RefCell<SelectList<P, B, C>>>;

/// The select-list control: options, overlay and bound model wired together.
pub struct SelectList<P: Presenter, B, C = SystemClock> {
    config: Rc<SelectConfig>,
    options: OptionCollection,
    keys: Vec<DisplayKey>,
    controller: SelectionController<P, C>,
    sync: ModelSynchronizer<B>,
    disposed: bool,
}

impl<P: Presenter, B: ModelBinding> SelectList<P, B> {
    pub fn new(config: SelectConfig, options: OptionCollection, presenter: P, binding: B) -> Self {
        Self::with_clock(config, options, presenter, binding, SystemClock)
    }
}

impl<P: Presenter, B: ModelBinding, C: Clock> SelectList<P, B, C> {
    pub fn with_clock(
        config: SelectConfig,
        options: OptionCollection,
        presenter: P,
        binding: B,
        clock: C,
    ) -> Self {
        let config = Rc::new(config);
        let keys = normalize(&options, &config);
        Self {
            controller: SelectionController::new(presenter, clock),
            sync: ModelSynchronizer::new(binding, Rc::clone(&config)),
            config,
            options,
            keys,
            disposed: false,
        }
    }

    pub fn into_shared(self) -> SharedSelectList<P, B, C> {
        Rc::new(RefCell::new(self))
    }

    /// Refresh from the model now, and once more on the next scheduler turn so values the host
    /// binds late are picked up. The second refresh may auto-open the overlay.
    ///
    /// The deferred task only holds a weak reference; a dropped or disposed control is left alone.
    pub fn initialize<S: Scheduler + ?Sized>(this: &Rc<RefCell<Self>>, scheduler: &mut S)
    where
        Self: 'static,
    {
        this.borrow_mut().refresh_from_model();

        let weak = Rc::downgrade(this);
        scheduler.defer(Box::new(move || {
            let Some(rc) = weak.upgrade() else {
                tracing::debug!("select list dropped before deferred refresh");
                return;
            };
            let Ok(mut list) = rc.try_borrow_mut() else {
                tracing::warn!("select list busy during deferred refresh; skipped");
                return;
            };
            if let Err(err) = list.deferred_refresh() {
                tracing::warn!(error = ?err, "auto-present on empty failed");
            }
        }));
    }

    fn deferred_refresh(&mut self) -> Result<(), SelectError> {
        if self.disposed {
            tracing::debug!("select list disposed before deferred refresh");
            return Ok(());
        }
        self.refresh_from_model();
        if self.config.auto_present_on_empty && self.sync.model_is_sentinel() {
            tracing::debug!("model holds the empty item; presenting");
            self.present()?;
        }
        Ok(())
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    pub fn options(&self) -> &OptionCollection {
        &self.options
    }

    pub fn ordered_keys(&self) -> &[DisplayKey] {
        &self.keys
    }

    pub fn display(&self) -> &DisplayState {
        self.sync.display()
    }

    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn presenter(&self) -> &P {
        self.controller.presenter()
    }

    pub fn binding(&self) -> &B {
        self.sync.binding()
    }

    pub fn binding_mut(&mut self) -> &mut B {
        self.sync.binding_mut()
    }

    /// The host replaced the option collection.
    pub fn set_options(&mut self, options: OptionCollection) {
        self.keys = normalize(&options, &self.config);
        self.options = options;
        tracing::debug!(listed = self.keys.len(), "options recomputed");
    }

    pub fn refresh_from_model(&mut self) -> &DisplayState {
        self.sync.refresh_from_model()
    }

    /// The host reassigned the model value outside of [`SelectList::select`].
    pub fn notify_external_model_changed(&mut self) {
        self.sync.refresh_from_model();
    }

    /// Rows for the overlay, in display order. Keys that no longer resolve are skipped.
    pub fn overlay_content(&self) -> OverlayContent {
        let display = self.sync.display();
        let rows = self
            .keys
            .iter()
            .filter_map(|key| {
                let Some(record) = self.options.resolve(key) else {
                    tracing::debug!(%key, "display key does not resolve to an option");
                    return None;
                };
                let id = record.int_field(&self.config.id_field);
                Some(OverlayRow {
                    key: key.clone(),
                    label: record.label_field(&self.config.text_field),
                    record: record.clone(),
                    checked: id.is_some() && id == display.selected_id,
                })
            })
            .collect();

        OverlayContent {
            title: self.config.title.clone(),
            close_button_hidden: display.close_button_hidden,
            rows,
        }
    }

    pub fn present(&mut self) -> Result<(), SelectError> {
        if self.disposed {
            return Ok(());
        }
        let content = self.overlay_content();
        self.controller.present(content, &PresentOptions::default())
    }

    pub fn on_scroll(&mut self) {
        self.controller.on_scroll();
    }

    pub fn select(&mut self, item: ItemValue) -> Result<SelectOutcome, SelectError> {
        self.controller.select(item, &mut self.sync)
    }

    /// Select the option a clicked row's key points at.
    pub fn select_key(&mut self, key: &DisplayKey) -> Result<SelectOutcome, SelectError> {
        let Some(item) = self.options.resolve(key).cloned() else {
            return Ok(SelectOutcome::Unknown);
        };
        self.select(item)
    }

    pub fn dismiss(&mut self) -> Result<(), SelectError> {
        self.controller.dismiss()
    }

    /// Tear down: cancels the pending deferred refresh and closes an open overlay.
    pub fn dispose(&mut self) -> Result<(), SelectError> {
        self.disposed = true;
        self.controller.dismiss()
    }
}
