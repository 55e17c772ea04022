use pretty_assertions::assert_eq;

use select_overlay::{
    DisplayKey, DisplayState, SelectConfig, SelectError, SelectOutcome, statics,
};

mod common;

use common::{MemoryBinding, harness, options, record};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[test]
fn present_builds_rows_from_ordered_keys() -> Result<()> {
    let model = MemoryBinding::holding(record("{ id: 2, text: 'Banana' }"));
    let mut h = harness(
        SelectConfig::default().with_title("Fruit"),
        options(common::FRUIT),
        model,
    );
    h.list.refresh_from_model();
    h.list.present()?;
    assert!(h.list.is_open());

    let log = h.screen.borrow();
    assert_eq!(log.presented.len(), 1);
    assert_eq!(log.shown, 1);
    let (content, present_options) = &log.presented[0];
    assert_eq!(present_options.animation, statics::ANIMATION_SLIDE_IN_RIGHT);
    assert_eq!(content.title, "Fruit");
    assert!(!content.close_button_hidden);

    let rows: Vec<(String, Option<&str>, bool)> = content
        .rows
        .iter()
        .map(|r| (r.key.to_string(), r.label.as_deref(), r.checked))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("b".to_string(), Some("Banana"), true),
            ("c".to_string(), Some("Apple"), false),
        ]
    );
    Ok(())
}

#[test]
fn select_after_quiet_period_writes_model_and_closes() -> Result<()> {
    let mut h = harness(
        SelectConfig::default(),
        options(common::FRUIT),
        MemoryBinding::default(),
    );
    h.list.present()?;
    h.list.on_scroll();
    h.clock.advance_ms(200);

    let apple = record("{ id: 1, text: 'Apple' }");
    assert_eq!(h.list.select(apple.clone())?, SelectOutcome::Selected);
    assert!(!h.list.is_open());
    assert_eq!(h.model.get(), Some(apple));
    assert_eq!(
        h.list.display(),
        &DisplayState {
            selected_label: Some("Apple".to_string()),
            selected_id: Some(1),
            close_button_hidden: false,
        }
    );
    assert_eq!(h.screen.borrow().dismissed, 1);
    Ok(())
}

#[test]
fn rapid_selects_after_scroll_are_ignored() -> Result<()> {
    let mut h = harness(
        SelectConfig::default(),
        options(common::FRUIT),
        MemoryBinding::default(),
    );
    h.list.present()?;
    h.list.on_scroll();

    h.clock.advance_ms(40);
    assert_eq!(
        h.list.select(record("{ id: 1, text: 'Apple' }"))?,
        SelectOutcome::Debounced
    );
    h.clock.advance_ms(40);
    assert_eq!(
        h.list.select(record("{ id: 2, text: 'Banana' }"))?,
        SelectOutcome::Debounced
    );

    assert!(h.list.is_open());
    assert_eq!(h.model.get(), None);
    assert_eq!(h.list.display(), &DisplayState::default());
    assert_eq!(h.screen.borrow().dismissed, 0);

    // A new scroll restarts the window.
    h.clock.advance_ms(100);
    h.list.on_scroll();
    h.clock.advance_ms(100);
    assert_eq!(
        h.list.select(record("{ id: 2, text: 'Banana' }"))?,
        SelectOutcome::Debounced
    );
    h.clock.advance_ms(60);
    assert_eq!(
        h.list.select(record("{ id: 2, text: 'Banana' }"))?,
        SelectOutcome::Selected
    );
    Ok(())
}

#[test]
fn scroll_window_resets_when_overlay_closes() -> Result<()> {
    let mut h = harness(
        SelectConfig::default(),
        options(common::FRUIT),
        MemoryBinding::default(),
    );
    h.list.present()?;
    h.list.on_scroll();
    h.list.dismiss()?;
    assert!(!h.list.is_open());
    assert_eq!(h.model.get(), None);

    h.list.present()?;
    assert_eq!(
        h.list.select(record("{ id: 2, text: 'Banana' }"))?,
        SelectOutcome::Selected
    );
    Ok(())
}

#[test]
fn select_while_closed_is_a_noop() -> Result<()> {
    let mut h = harness(
        SelectConfig::default(),
        options(common::FRUIT),
        MemoryBinding::default(),
    );
    assert_eq!(
        h.list.select(record("{ id: 2, text: 'Banana' }"))?,
        SelectOutcome::NotOpen
    );
    assert_eq!(h.model.get(), None);
    h.list.dismiss()?;
    assert_eq!(h.screen.borrow().dismissed, 0);
    Ok(())
}

#[test]
fn select_key_resolves_unsorted_and_sorted_keys() -> Result<()> {
    let mut h = harness(
        SelectConfig::default(),
        options(common::FRUIT),
        MemoryBinding::default(),
    );
    h.list.present()?;
    let key = h.list.ordered_keys()[1].clone();
    assert_eq!(key, DisplayKey::Key("c".to_string()));
    assert_eq!(h.list.select_key(&key)?, SelectOutcome::Selected);
    assert_eq!(h.model.get(), Some(record("{ id: 1, text: 'Apple' }")));

    // Sorted listings carry ids; they resolve when the collection is keyed by id.
    let mut h = harness(
        SelectConfig::default().with_sort(true),
        options("{ '1': { id: 1, text: 'Zed' }, '2': { id: 2, text: 'Amy' } }"),
        MemoryBinding::default(),
    );
    h.list.present()?;
    assert_eq!(h.list.ordered_keys(), &[DisplayKey::Id(2), DisplayKey::Id(1)]);
    assert_eq!(h.list.select_key(&DisplayKey::Id(2))?, SelectOutcome::Selected);
    assert_eq!(h.list.display().selected_label.as_deref(), Some("Amy"));

    h.list.present()?;
    assert_eq!(
        h.list.select_key(&DisplayKey::Id(42))?,
        SelectOutcome::Unknown
    );
    assert!(h.list.is_open());
    Ok(())
}

#[test]
fn selecting_a_record_with_missing_fields_degrades() -> Result<()> {
    let mut h = harness(
        SelectConfig::default(),
        options(common::FRUIT),
        MemoryBinding::default(),
    );
    h.list.present()?;
    let odd = record("{ label: 'no id or text' }");
    assert_eq!(h.list.select(odd.clone())?, SelectOutcome::Selected);
    assert_eq!(h.model.get(), Some(odd));
    assert_eq!(h.list.display(), &DisplayState::default());
    Ok(())
}

#[test]
fn presenter_failures_propagate_and_leave_closed() {
    let mut h = harness(
        SelectConfig::default(),
        options(common::FRUIT),
        MemoryBinding::default(),
    );
    h.screen.borrow_mut().fail_present = true;
    let err = h.list.present().unwrap_err();
    assert!(matches!(err, SelectError::Present(_)));
    assert!(!h.list.is_open());

    h.screen.borrow_mut().fail_present = false;
    h.screen.borrow_mut().fail_show = true;
    let err = h.list.present().unwrap_err();
    assert!(matches!(err, SelectError::Show(_)));
    assert_eq!(err.to_string(), "showing the overlay failed");
    assert!(!h.list.is_open());
    {
        // The overlay built for the failed show is released again.
        let log = h.screen.borrow();
        assert_eq!(log.presented.len(), 1);
        assert_eq!(log.dismissed, log.presented.len());
    }

    // Recoverable by presenting again.
    h.screen.borrow_mut().fail_show = false;
    h.list.present().unwrap();
    assert!(h.list.is_open());
}

#[test]
fn options_change_recomputes_keys_and_rows() -> Result<()> {
    let mut h = harness(
        SelectConfig::default(),
        options(common::FRUIT),
        MemoryBinding::default(),
    );
    assert_eq!(h.list.ordered_keys().len(), 2);

    h.list.set_options(options("[{ id: 0, text: 'None' }, { id: 9, text: 'Kiwi' }]"));
    assert_eq!(h.list.ordered_keys(), &[DisplayKey::Key("1".to_string())]);

    let content = h.list.overlay_content();
    assert_eq!(content.rows.len(), 1);
    assert_eq!(content.rows[0].label.as_deref(), Some("Kiwi"));
    Ok(())
}
