use crate::audio::AudioClip;
use crate::dom;
use glam::Vec2;
use instant::Instant;
use midnight_core::{
    ambient_origin, crackle_pop, generate_burst, roll_ambient, Fireworks, Particle, Settings,
    SfxPool, CRACKLE_POP_GAIN,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A crackle micro-burst waiting for its fuse. Owned by the loop: dropped en
/// masse on teardown rather than living in free-running timers.
struct PendingCrackle {
    fire_at: Instant,
    origin: Vec2,
}

struct FrameState {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    fireworks: Fireworks,
    crackles: Vec<PendingCrackle>,
    rng: StdRng,
    settings: Rc<RefCell<Settings>>,
    midnight: Rc<Cell<bool>>,
    sfx: Rc<SfxPool<AudioClip>>,
}

impl FrameState {
    fn frame(&mut self) {
        let (reduce, volume, muted) = {
            let s = self.settings.borrow();
            (s.reduce_effects, s.volume, s.is_muted)
        };
        let midnight = self.midnight.get();
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;

        // Fade pass: semi-transparent rectangle over last frame for the
        // trail effect; tighter, darker trails once midnight hits.
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_shadow_blur(0.0);
        self.ctx.set_fill_style_str(if midnight {
            "rgba(5, 2, 15, 0.25)"
        } else {
            "rgba(5, 5, 16, 0.2)"
        });
        self.ctx.fill_rect(0.0, 0.0, width, height);

        self.fire_due_crackles(volume, muted);

        if roll_ambient(&mut self.rng, midnight, reduce) {
            let origin = ambient_origin(&mut self.rng, width as f32, height as f32);
            self.burst_at(origin);
        }

        self.fireworks.step(&mut self.rng);

        let FrameState {
            fireworks,
            ctx,
            rng,
            ..
        } = self;
        for p in fireworks.particles() {
            draw_particle(ctx, p, rng);
        }
    }

    /// One burst with the default shape logic, gated by the live-particle
    /// cap. Used for both ambient and click bursts.
    fn burst_at(&mut self, origin: Vec2) {
        let (reduce, volume, muted) = {
            let s = self.settings.borrow();
            (s.reduce_effects, s.volume, s.is_muted)
        };
        if !self.fireworks.can_burst(reduce) {
            return;
        }
        let plan = generate_burst(origin, None, self.midnight.get(), reduce, &mut self.rng);
        let now = Instant::now();
        for charge in &plan.crackles {
            self.crackles.push(PendingCrackle {
                fire_at: now + Duration::from_secs_f32(charge.delay_ms / 1000.0),
                origin: charge.origin,
            });
        }
        self.sfx.play(volume, plan.sfx_gain, muted, &mut self.rng);
        self.fireworks.absorb(plan.particles);
    }

    fn fire_due_crackles(&mut self, volume: f32, muted: bool) {
        let now = Instant::now();
        let mut i = 0;
        while i < self.crackles.len() {
            if self.crackles[i].fire_at <= now {
                let charge = self.crackles.swap_remove(i);
                let pops = crackle_pop(charge.origin, &mut self.rng);
                self.fireworks.absorb(pops);
                self.sfx.play(volume, CRACKLE_POP_GAIN, muted, &mut self.rng);
            } else {
                i += 1;
            }
        }
    }
}

fn draw_particle(ctx: &web::CanvasRenderingContext2d, p: &Particle, rng: &mut impl Rng) {
    ctx.save();
    ctx.set_global_alpha(p.render_alpha(rng) as f64);
    ctx.set_fill_style_str(p.color);
    if p.has_glow() {
        ctx.set_shadow_blur(8.0);
        ctx.set_shadow_color(p.color);
    }
    ctx.begin_path();
    let _ = ctx.arc(
        p.pos.x as f64,
        p.pos.y as f64,
        p.size as f64,
        0.0,
        std::f64::consts::TAU,
    );
    ctx.fill();
    ctx.restore();
}

/// Owns the rendering loop and its listeners. `shutdown` cancels the frame
/// callback, detaches the resize/click listeners, and drops any pending
/// crackle charges so nothing keeps running afterwards.
pub struct FireworksView {
    state: Rc<RefCell<FrameState>>,
    canvas: web::HtmlCanvasElement,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    resize_closure: Closure<dyn FnMut()>,
    click_closure: Closure<dyn FnMut(web::MouseEvent)>,
}

impl FireworksView {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        settings: Rc<RefCell<Settings>>,
        midnight: Rc<Cell<bool>>,
        sfx: Rc<SfxPool<AudioClip>>,
    ) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        dom::sync_canvas_to_viewport(&canvas);

        let state = Rc::new(RefCell::new(FrameState {
            canvas: canvas.clone(),
            ctx,
            fireworks: Fireworks::new(),
            crackles: Vec::new(),
            rng: StdRng::seed_from_u64(js_sys::Date::now() as u64),
            settings,
            midnight,
            sfx,
        }));

        let canvas_resize = canvas.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            dom::sync_canvas_to_viewport(&canvas_resize);
        }) as Box<dyn FnMut()>);
        if let Some(w) = web::window() {
            let _ = w.add_event_listener_with_callback(
                "resize",
                resize_closure.as_ref().unchecked_ref(),
            );
        }

        let state_click = state.clone();
        let click_closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let origin = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            state_click.borrow_mut().burst_at(origin);
        }) as Box<dyn FnMut(_)>);
        let _ = canvas
            .add_event_listener_with_callback("click", click_closure.as_ref().unchecked_ref());

        let view = Self {
            state,
            canvas,
            raf_id: Rc::new(Cell::new(None)),
            tick: Rc::new(RefCell::new(None)),
            resize_closure,
            click_closure,
        };
        view.start_loop();
        Ok(view)
    }

    fn start_loop(&self) {
        let tick = self.tick.clone();
        let tick_inner = self.tick.clone();
        let raf_id = self.raf_id.clone();
        let state = self.state.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            state.borrow_mut().frame();
            if let (Some(w), Some(cb)) = (web::window(), tick_inner.borrow().as_ref()) {
                if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    raf_id.set(Some(id));
                }
            }
        }) as Box<dyn FnMut()>));
        if let (Some(w), Some(cb)) = (web::window(), self.tick.borrow().as_ref()) {
            if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                self.raf_id.set(Some(id));
            }
        }
    }

    pub fn shutdown(&self) {
        if let Some(w) = web::window() {
            if let Some(id) = self.raf_id.take() {
                let _ = w.cancel_animation_frame(id);
            }
            let _ = w.remove_event_listener_with_callback(
                "resize",
                self.resize_closure.as_ref().unchecked_ref(),
            );
        }
        let _ = self.canvas.remove_event_listener_with_callback(
            "click",
            self.click_closure.as_ref().unchecked_ref(),
        );
        self.tick.borrow_mut().take();
        self.state.borrow_mut().crackles.clear();
        log::info!("fireworks view shut down");
    }
}
