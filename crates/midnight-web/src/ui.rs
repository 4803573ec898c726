use crate::audio::{self, BgMusic};
use crate::countdown_driver::{CountdownDriver, JsWallClock};
use crate::dom;
use crate::storage;
use midnight_core::{
    celebration_year, pick_floating_message, Settings, WallClock, WishLedger, TEST_MODE, TIMEZONES,
};
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Fill the timezone select from the fixed option list.
pub fn populate_timezones(document: &web::Document, active: &str) {
    if let Some(select) = document.get_element_by_id("timezone-select") {
        for (value, label) in TIMEZONES {
            if let Ok(option) = document.create_element("option") {
                let _ = option.set_attribute("value", value);
                if value == active {
                    let _ = option.set_attribute("selected", "");
                }
                option.set_text_content(Some(label));
                let _ = select.append_child(&option);
            }
        }
    }
}

pub fn wire_settings(
    document: &web::Document,
    settings: Rc<RefCell<Settings>>,
    bg_music: Rc<BgMusic>,
) {
    {
        let settings = settings.clone();
        let bg_music = bg_music.clone();
        dom::add_click_listener(document, "mute-toggle", move || {
            settings.borrow_mut().toggle_mute();
            bg_music.apply(&settings.borrow());
            if let Some(doc) = dom::window_document() {
                let muted = settings.borrow().is_muted;
                dom::set_text(&doc, "mute-toggle", if muted { "muted" } else { "sound" });
            }
        });
    }
    {
        let settings = settings.clone();
        let bg_music = bg_music.clone();
        dom::add_event_listener(document, "volume-slider", "input", move |_| {
            if let Some(doc) = dom::window_document() {
                if let Some(v) = dom::input_value(&doc, "volume-slider") {
                    if let Ok(v) = v.parse::<f32>() {
                        settings.borrow_mut().set_volume(v);
                        bg_music.apply(&settings.borrow());
                    }
                }
            }
        });
    }
    {
        let settings = settings.clone();
        dom::add_click_listener(document, "effects-toggle", move || {
            settings.borrow_mut().toggle_reduce_effects();
            if let Some(doc) = dom::window_document() {
                let reduced = settings.borrow().reduce_effects;
                dom::set_text(
                    &doc,
                    "effects-label",
                    if reduced { "Safe Mode" } else { "Full FX" },
                );
            }
        });
    }
}

pub fn wire_timezone_select(
    document: &web::Document,
    settings: Rc<RefCell<Settings>>,
    driver: Rc<CountdownDriver>,
) {
    dom::add_event_listener(document, "timezone-select", "change", move |_| {
        if let Some(doc) = dom::window_document() {
            if let Some(tz) = dom::input_value(&doc, "timezone-select") {
                log::info!("timezone -> {tz}");
                settings.borrow_mut().set_timezone(tz.clone());
                driver.set_timezone(&tz);
            }
        }
    });
}

pub fn wire_wish_form(
    document: &web::Document,
    ledger: Rc<RefCell<WishLedger>>,
    rng: Rc<RefCell<StdRng>>,
) {
    dom::add_click_listener(document, "wish-open", move || {
        if let Some(doc) = dom::window_document() {
            dom::show(&doc, "wish-modal");
        }
    });
    dom::add_click_listener(document, "wish-close", move || {
        if let Some(doc) = dom::window_document() {
            dom::hide(&doc, "wish-modal");
        }
    });
    dom::add_click_listener(document, "wish-submit", move || {
        let doc = match dom::window_document() {
            Some(d) => d,
            None => return,
        };
        let name = dom::input_value(&doc, "wish-name").unwrap_or_default();
        let text = dom::input_value(&doc, "wish-text").unwrap_or_default();
        let now = js_sys::Date::now() as i64;
        // Empty input: no-op, the form stays open with no error message.
        let submitted = ledger
            .borrow_mut()
            .submit(&name, &text, now, &mut rng.borrow_mut());
        if let Ok(wish) = submitted {
            storage::save_ledger(&ledger.borrow());
            update_marquee(&doc, &ledger.borrow());
            dom::set_text(
                &doc,
                "wish-status",
                &format!("Thank you, {}! Your wish is kept in the night sky.", wish.name),
            );
            dom::clear_input(&doc, "wish-name");
            dom::clear_input(&doc, "wish-text");
            dom::set_timeout(2500, || {
                if let Some(doc) = dom::window_document() {
                    dom::hide(&doc, "wish-modal");
                    dom::set_text(&doc, "wish-status", "");
                }
            });
        }
    });
}

/// Scrolling wall of the most recent wishes.
pub fn update_marquee(document: &web::Document, ledger: &WishLedger) {
    let line = ledger
        .recent(10)
        .iter()
        .map(|w| format!("{}: {}", w.name, w.text))
        .collect::<Vec<_>>()
        .join("   •   ");
    dom::set_text(document, "wish-marquee", &line);
}

/// Random ambient message every 10 seconds, visible for 5.
pub fn wire_floating_messages(document: &web::Document, rng: Rc<RefCell<StdRng>>) {
    fn show_random(doc: &web::Document, rng: &Rc<RefCell<StdRng>>) {
        let msg = pick_floating_message(&mut *rng.borrow_mut());
        dom::set_text(doc, "floating-message", msg);
        dom::show(doc, "floating-message");
        dom::set_timeout(5_000, || {
            if let Some(doc) = dom::window_document() {
                dom::hide(&doc, "floating-message");
            }
        });
    }

    show_random(document, &rng);
    let closure = Closure::wrap(Box::new(move || {
        if let Some(doc) = dom::window_document() {
            show_random(&doc, &rng);
        }
    }) as Box<dyn FnMut()>);
    if let Some(w) = web::window() {
        let _ = w.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            10_000,
        );
    }
    closure.forget();
}

/// The year the celebration rings in, read from the countdown's own timezone
/// so a viewer whose local clock already rolled over is not off by one. Test
/// mode and unreadable zones fall back to the browser-local year.
fn display_year(timezone: &str) -> i32 {
    let from_zone = if timezone == TEST_MODE {
        None
    } else {
        JsWallClock
            .local_now(timezone)
            .map(|t| celebration_year(&t))
    };
    from_zone.unwrap_or_else(|| js_sys::Date::new_0().get_full_year() as i32 + 1)
}

/// Visual/audio switch for the moment the countdown reaches zero: swap the
/// countdown panel for the title, greet the remembered user, pop the
/// celebration cue, shake briefly, then reveal the sign-off line.
pub fn run_midnight_sequence(
    document: &web::Document,
    settings: &Settings,
    ledger: &WishLedger,
) {
    let year = display_year(&settings.active_timezone);
    dom::set_text(document, "midnight-year", &year.to_string());
    let greeting = match ledger.user_name() {
        Some(name) => format!("Happy New Year, {name}"),
        None => "Happy New Year".to_string(),
    };
    dom::set_text(document, "midnight-greeting", &greeting);
    dom::hide(document, "countdown-panel");
    dom::show(document, "midnight-panel");

    audio::play_celebration(settings);

    if let Some(body) = document.body() {
        let _ = body.class_list().add_1("shake");
        dom::set_timeout(2_000, || {
            if let Some(doc) = dom::window_document() {
                if let Some(body) = doc.body() {
                    let _ = body.class_list().remove_1("shake");
                }
            }
        });
    }
    dom::set_timeout(4_000, || {
        if let Some(doc) = dom::window_document() {
            dom::show(&doc, "secondary-message");
        }
    });
}
