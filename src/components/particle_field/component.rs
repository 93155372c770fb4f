//! Leptos component wrapping the particle field canvas.
//!
//! The component creates an HTML canvas element and wires keyboard listeners
//! on the window for runtime tuning. An animation loop runs via
//! `requestAnimationFrame`, advancing the simulation and rendering each
//! frame the clock accepts. When the component is disposed the loop stops
//! at its next frame and removes its window listeners.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, Window};

use super::config::FieldConfig;
use super::render::{self, ParticleLayer};
use super::state::{FieldState, StopSignal};
use super::theme::Theme;

/// Bundles simulation state with the drawing resources it renders through.
struct FieldContext {
	state: FieldState,
	layer: ParticleLayer,
	theme: Theme,
}

type Callback<T> = Rc<RefCell<Option<Closure<T>>>>;

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn as_function<T: ?Sized>(cb: &Closure<T>) -> &js_sys::Function {
	cb.as_ref().unchecked_ref()
}

/// Window listeners registered by the component, for removal on shutdown.
type Listeners = Rc<RefCell<Vec<(&'static str, js_sys::Function)>>>;

fn listen<T: ?Sized>(
	window: &Window,
	listeners: &Listeners,
	event: &'static str,
	cb: &Callback<T>,
) {
	if let Some(ref cb) = *cb.borrow() {
		let function = as_function(cb);
		if window.add_event_listener_with_callback(event, function).is_ok() {
			listeners.borrow_mut().push((event, function.clone()));
		}
	}
}

fn detach(listeners: &Listeners) {
	let Some(window) = web_sys::window() else {
		return;
	};
	for (event, function) in listeners.borrow_mut().drain(..) {
		let _ = window.remove_event_listener_with_callback(event, &function);
	}
}

/// Renders the animated particle field on a canvas element.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport and resize with the window.
/// Explicit `width`/`height` override automatic sizing.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(into)] config: Signal<FieldConfig>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<FieldContext>>> = Rc::new(RefCell::new(None));
	let animate: Callback<dyn FnMut(f64)> = Rc::new(RefCell::new(None));
	let resize_cb: Callback<dyn FnMut()> = Rc::new(RefCell::new(None));
	let keydown_cb: Callback<dyn FnMut(KeyboardEvent)> = Rc::new(RefCell::new(None));
	let keyup_cb: Callback<dyn FnMut(KeyboardEvent)> = Rc::new(RefCell::new(None));
	let blur_cb: Callback<dyn FnMut()> = Rc::new(RefCell::new(None));
	let listeners: Listeners = Rc::new(RefCell::new(Vec::new()));
	let stop = StopSignal::default();

	on_cleanup({
		let stop = stop.clone();
		move || stop.stop()
	});

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("spoiler-field: no window available");
			return;
		};
		let Some(document) = window.document() else {
			warn!("spoiler-field: no document available");
			return;
		};

		let (w, h) = if fullscreen {
			viewport_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("spoiler-field: canvas has no 2d context");
				return;
			}
		};
		let Some(layer) = ParticleLayer::new(&document, w, h) else {
			warn!("spoiler-field: failed to create particle layer");
			return;
		};

		let mut state = FieldState::new(&config.get_untracked(), w, h);
		state.stop = stop.clone();
		*context.borrow_mut() = Some(FieldContext {
			state,
			layer,
			theme: Theme::default(),
		});
		info!("spoiler-field: canvas mounted at {}x{}", w, h);

		if fullscreen {
			let (context_resize, canvas_resize) = (context.clone(), canvas.clone());
			*resize_cb.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().and_then(|win| viewport_size(&win)) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
					c.layer.resize(nw, nh);
				}
			}));
			listen(&window, &listeners, "resize", &resize_cb);
		}

		let context_kd = context.clone();
		*keydown_cb.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			if let Some(ref mut c) = *context_kd.borrow_mut() {
				c.state.keys.key_down(&ev.key(), ev.repeat());
			}
		}));
		let context_ku = context.clone();
		*keyup_cb.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			if let Some(ref mut c) = *context_ku.borrow_mut() {
				c.state.keys.key_up(&ev.key());
			}
		}));
		let context_blur = context.clone();
		*blur_cb.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_blur.borrow_mut() {
				c.state.keys.clear();
			}
		}));
		listen(&window, &listeners, "keydown", &keydown_cb);
		listen(&window, &listeners, "keyup", &keyup_cb);
		listen(&window, &listeners, "blur", &blur_cb);

		let (context_anim, animate_inner) = (context.clone(), animate.clone());
		let (stop_anim, listeners_anim) = (stop.clone(), listeners.clone());
		*animate.borrow_mut() = Some(Closure::new(move |now: f64| {
			if stop_anim.is_stopped() {
				detach(&listeners_anim);
				context_anim.borrow_mut().take();
				info!("spoiler-field: animation loop stopped");
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				if let Some(stats) = c.state.advance(now) {
					let overlay = c.state.show_stats.then_some(&stats);
					render::render(&ctx, &c.layer, &c.state.field, &c.theme, overlay);
				}
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(as_function(cb));
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(as_function(cb));
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			style="display: block;"
		/>
	}
}
