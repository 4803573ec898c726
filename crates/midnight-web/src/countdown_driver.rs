use crate::dom;
use midnight_core::{CountdownDisplay, CountdownEngine, LocalTime, WallClock, COUNTDOWN_TICK_MS};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const RING_CIRCUMFERENCE: f32 = 283.0;

/// Wall clock backed by `js_sys::Date`. The timezone reading round-trips
/// through a locale-formatted string, same approximation as the original
/// page: second granularity, imprecise across DST boundaries.
pub struct JsWallClock;

impl WallClock for JsWallClock {
    fn utc_now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn local_now(&self, timezone: &str) -> Option<LocalTime> {
        let opts = js_sys::Object::new();
        js_sys::Reflect::set(&opts, &"timeZone".into(), &timezone.into()).ok()?;
        js_sys::Reflect::set(&opts, &"hour12".into(), &false.into()).ok()?;
        let formatted: String = js_sys::Date::new_0()
            .to_locale_string("en-US", &opts.into())
            .into();
        match LocalTime::parse_en_us(&formatted) {
            Ok(t) => Some(t),
            Err(e) => {
                log::warn!("{e}");
                None
            }
        }
    }
}

/// Drives the countdown engine on a 10ms interval and paints the timer,
/// hundredths, label, and progress ring. The interval clears itself once the
/// target is reached; switching timezone restarts the engine and interval.
pub struct CountdownDriver {
    engine: Rc<RefCell<CountdownEngine>>,
    interval_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    on_midnight: Rc<RefCell<Box<dyn FnMut()>>>,
}

impl CountdownDriver {
    pub fn start(timezone: &str, on_midnight: impl FnMut() + 'static) -> Self {
        let driver = Self {
            engine: Rc::new(RefCell::new(CountdownEngine::new(timezone))),
            interval_id: Rc::new(Cell::new(None)),
            tick: Rc::new(RefCell::new(None)),
            on_midnight: Rc::new(RefCell::new(Box::new(on_midnight))),
        };
        driver.install_interval();
        driver
    }

    pub fn set_timezone(&self, timezone: &str) {
        self.engine.borrow_mut().set_timezone(timezone);
        // The interval may have been cleared by a previous Reached transition.
        if self.interval_id.get().is_none() {
            self.install_interval();
        }
    }

    pub fn stop(&self) {
        if let (Some(w), Some(id)) = (web::window(), self.interval_id.take()) {
            w.clear_interval_with_handle(id);
        }
        self.tick.borrow_mut().take();
    }

    fn install_interval(&self) {
        let engine = self.engine.clone();
        let interval_id = self.interval_id.clone();
        let on_midnight = self.on_midnight.clone();
        let closure = Closure::wrap(Box::new(move || {
            let tick = engine.borrow_mut().tick(&JsWallClock);
            let test_mode = engine.borrow().is_test_mode();
            if let Some(document) = dom::window_document() {
                render_display(&document, &tick.display, test_mode);
            }
            if tick.reached {
                log::info!("countdown reached zero");
                if let (Some(w), Some(id)) = (web::window(), interval_id.take()) {
                    w.clear_interval_with_handle(id);
                }
                (on_midnight.borrow_mut())();
            }
        }) as Box<dyn FnMut()>);
        if let Some(w) = web::window() {
            if let Ok(id) = w.set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                COUNTDOWN_TICK_MS,
            ) {
                self.interval_id.set(Some(id));
            }
        }
        *self.tick.borrow_mut() = Some(closure);
    }
}

fn render_display(document: &web::Document, display: &CountdownDisplay, test_mode: bool) {
    dom::set_text(
        document,
        "countdown-timer",
        &format!(
            "{:02}:{:02}:{:02}",
            display.hours, display.minutes, display.seconds
        ),
    );
    dom::set_text(
        document,
        "countdown-hundredths",
        &format!("{:02}", display.hundredths),
    );
    dom::set_text(
        document,
        "countdown-label",
        if test_mode {
            "Testing Celebration"
        } else {
            "Hours : Mins : Secs"
        },
    );
    let offset = RING_CIRCUMFERENCE - RING_CIRCUMFERENCE * display.progress / 100.0;
    dom::set_attr(
        document,
        "progress-ring",
        "stroke-dashoffset",
        &format!("{offset:.1}"),
    );
}
