//! The experimental-API advisory emitted through the `log` facade.

use std::cell::RefCell;

use common_config::SelectionConfig;
use log::{Level, LevelFilter, Log, Metadata, Record};
use tabula_axis::{AxisSelector, columns};
use tabula_core::Axis;

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Collects records emitted on the current test thread.
struct Capture;

impl Log for Capture {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        RECORDS.with(|r| r.borrow_mut().push((record.level(), record.args().to_string())));
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture;

/// Warnings logged while running `f`.
fn warnings(f: impl FnOnce()) -> Vec<String> {
    // Another test may have installed the logger already.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
    RECORDS.with(|r| r.borrow_mut().clear());
    f();
    RECORDS.with(|r| {
        r.borrow()
            .iter()
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, message)| message.clone())
            .collect()
    })
}

#[test]
fn test_default_selector_warns_once() {
    let logged = warnings(|| {
        let c = AxisSelector::new(Axis::Columns);
        let _ = c.level(0usize).dtype();
        let _ = c.label("x") | c.label("y");
    });
    assert_eq!(logged.len(), 1, "{logged:?}");
    assert!(logged[0].contains("experimental"), "{}", logged[0]);

    assert_eq!(warnings(|| drop(columns())).len(), 1);
}

#[test]
fn test_experimental_opt_in_is_silent() {
    let quiet = SelectionConfig::default().with_experimental(true);
    let logged = warnings(|| {
        let c = AxisSelector::with_config(Axis::Index, quiet);
        let _ = c.label(0i64);
    });
    assert!(logged.is_empty(), "{logged:?}");
}
