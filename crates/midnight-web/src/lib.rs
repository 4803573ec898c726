#![cfg(target_arch = "wasm32")]
use midnight_core::{Settings, WishLedger};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod audio;
mod countdown_driver;
mod dom;
mod frame;
mod storage;
mod ui;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("midnight-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let settings = Rc::new(RefCell::new(Settings::default()));
    let ledger = Rc::new(RefCell::new(storage::load_ledger()));
    ui::update_marquee(&document, &ledger.borrow());

    // Everything audible and animated waits for the explicit start click so
    // the browser treats playback as user-initiated.
    static STARTED: AtomicBool = AtomicBool::new(false);
    let settings_start = settings.clone();
    let ledger_start = ledger.clone();
    dom::add_click_listener(&document, "start-button", move || {
        if STARTED.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(doc) = dom::window_document() {
            dom::hide(&doc, "welcome-overlay");
            if let Err(e) = begin(&doc, settings_start.clone(), ledger_start.clone()) {
                log::error!("celebration start error: {:?}", e);
            }
        }
    });

    Ok(())
}

fn begin(
    document: &web::Document,
    settings: Rc<RefCell<Settings>>,
    ledger: Rc<RefCell<WishLedger>>,
) -> anyhow::Result<()> {
    let bg_music = Rc::new(audio::BgMusic::new());
    bg_music.apply(&settings.borrow());

    let midnight = Rc::new(Cell::new(false));
    let sfx = Rc::new(audio::build_sfx_pool());
    let rng = Rc::new(RefCell::new(StdRng::seed_from_u64(
        js_sys::Date::now() as u64,
    )));

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("fireworks-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #fireworks-canvas"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let view = Rc::new(frame::FireworksView::new(
        canvas,
        settings.clone(),
        midnight.clone(),
        sfx,
    )?);

    let midnight_flag = midnight.clone();
    let settings_mid = settings.clone();
    let ledger_mid = ledger.clone();
    let on_midnight = move || {
        midnight_flag.set(true);
        if let Some(doc) = dom::window_document() {
            ui::run_midnight_sequence(&doc, &settings_mid.borrow(), &ledger_mid.borrow());
        }
    };
    let driver = Rc::new(countdown_driver::CountdownDriver::start(
        &settings.borrow().active_timezone,
        on_midnight,
    ));

    ui::populate_timezones(document, &settings.borrow().active_timezone);
    ui::wire_settings(document, settings.clone(), bg_music);
    ui::wire_timezone_select(document, settings, driver.clone());
    ui::wire_wish_form(document, ledger, rng.clone());
    ui::wire_floating_messages(document, rng);
    wire_page_teardown(view, driver);

    log::info!("celebration running");
    Ok(())
}

/// Tear the loop and interval down when the page goes away. Also keeps the
/// view and driver alive for the page lifetime by owning their `Rc`s.
fn wire_page_teardown(
    view: Rc<frame::FireworksView>,
    driver: Rc<countdown_driver::CountdownDriver>,
) {
    let closure = Closure::wrap(Box::new(move || {
        view.shutdown();
        driver.stop();
    }) as Box<dyn FnMut()>);
    if let Some(w) = web::window() {
        let _ = w.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
