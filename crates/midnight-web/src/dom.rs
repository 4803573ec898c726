use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Wire a named DOM event ("change", "input", ...) on an element. Long-lived
/// listeners; the closure is forgotten deliberately.
#[inline]
pub fn add_event_listener(
    document: &web::Document,
    element_id: &str,
    event: &str,
    mut handler: impl FnMut(web::Event) + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(
            Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>,
        );
        let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn set_attr(document: &web::Document, element_id: &str, name: &str, value: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let _ = el.set_attribute(name, value);
    }
}

#[inline]
pub fn show(document: &web::Document, element_id: &str) {
    set_attr(document, element_id, "style", "");
}

#[inline]
pub fn hide(document: &web::Document, element_id: &str) {
    set_attr(document, element_id, "style", "display:none");
}

#[inline]
pub fn input_value(document: &web::Document, element_id: &str) -> Option<String> {
    let el = document.get_element_by_id(element_id)?;
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(area) = el.dyn_ref::<web::HtmlTextAreaElement>() {
        return Some(area.value());
    }
    if let Some(select) = el.dyn_ref::<web::HtmlSelectElement>() {
        return Some(select.value());
    }
    None
}

#[inline]
pub fn clear_input(document: &web::Document, element_id: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
            input.set_value("");
        } else if let Some(area) = el.dyn_ref::<web::HtmlTextAreaElement>() {
            area.set_value("");
        }
    }
}

/// Size the canvas backing store to the full viewport. A resize implicitly
/// clears the canvas; the fade pass repaints it within a frame.
pub fn sync_canvas_to_viewport(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let width = w
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = w
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        canvas.set_width(width.max(1.0) as u32);
        canvas.set_height(height.max(1.0) as u32);
    }
}

/// One-shot delayed callback. Used for cosmetic UI sequencing only; the
/// crackle charges are scheduled inside the animation loop instead so they
/// die with it.
pub fn set_timeout(ms: i32, mut handler: impl FnMut() + 'static) {
    if let Some(w) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms,
        );
        closure.forget();
    }
}
