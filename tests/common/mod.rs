#![allow(dead_code)]

use select_overlay::{
    Clock, ItemValue, ModelBinding, OptionCollection, OverlayContent, OverlayHandle,
    PresentOptions, Presenter, SelectConfig, SelectList,
};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::{Duration, Instant},
};

/// Everything the fake presenter saw, shared with the test body.
#[derive(Debug, Default)]
pub struct ScreenLog {
    pub presented: Vec<(OverlayContent, PresentOptions)>,
    pub shown: usize,
    pub dismissed: usize,
    pub fail_present: bool,
    pub fail_show: bool,
}

#[derive(Clone, Default)]
pub struct FakeScreen(pub Rc<RefCell<ScreenLog>>);

pub struct FakeOverlay(Rc<RefCell<ScreenLog>>);

impl Presenter for FakeScreen {
    type Handle = FakeOverlay;

    fn present(
        &mut self,
        content: OverlayContent,
        options: &PresentOptions,
    ) -> anyhow::Result<FakeOverlay> {
        let mut log = self.0.borrow_mut();
        if log.fail_present {
            anyhow::bail!("overlay template missing");
        }
        log.presented.push((content, options.clone()));
        Ok(FakeOverlay(Rc::clone(&self.0)))
    }
}

impl OverlayHandle for FakeOverlay {
    fn show(&mut self) -> anyhow::Result<()> {
        let mut log = self.0.borrow_mut();
        if log.fail_show {
            anyhow::bail!("surface detached");
        }
        log.shown += 1;
        Ok(())
    }

    fn dismiss(&mut self) -> anyhow::Result<()> {
        self.0.borrow_mut().dismissed += 1;
        Ok(())
    }
}

/// Host-owned model slot; the test keeps a clone to reassign it from outside.
#[derive(Clone, Default)]
pub struct MemoryBinding(pub Rc<RefCell<Option<ItemValue>>>);

impl MemoryBinding {
    pub fn holding(value: ItemValue) -> Self {
        Self(Rc::new(RefCell::new(Some(value))))
    }

    pub fn set(&self, value: Option<ItemValue>) {
        *self.0.borrow_mut() = value;
    }

    pub fn get(&self) -> Option<ItemValue> {
        self.0.borrow().clone()
    }
}

impl ModelBinding for MemoryBinding {
    fn model_value(&self) -> Option<ItemValue> {
        self.get()
    }

    fn set_model_value(&mut self, value: ItemValue) {
        self.set(Some(value));
    }
}

#[derive(Clone)]
pub struct ManualClock(Rc<Cell<Instant>>);

impl ManualClock {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(Instant::now())))
    }

    pub fn advance_ms(&self, ms: u64) {
        self.0.set(self.0.get() + Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

pub fn record(text: &str) -> ItemValue {
    ItemValue::parse_json5(text).expect("record fixture parses")
}

pub fn options(text: &str) -> OptionCollection {
    OptionCollection::parse_json5(text).expect("options fixture parses")
}

pub const FRUIT: &str = "{
    a: { id: 0, text: 'None' },
    b: { id: 2, text: 'Banana' },
    c: { id: 1, text: 'Apple' },
}";

pub struct Harness {
    pub list: SelectList<FakeScreen, MemoryBinding, ManualClock>,
    pub screen: Rc<RefCell<ScreenLog>>,
    pub model: MemoryBinding,
    pub clock: ManualClock,
}

pub fn harness(config: SelectConfig, opts: OptionCollection, model: MemoryBinding) -> Harness {
    let screen = FakeScreen::default();
    let clock = ManualClock::new();
    let list = SelectList::with_clock(config, opts, screen.clone(), model.clone(), clock.clone());
    Harness {
        list,
        screen: screen.0,
        model,
        clock,
    }
}
