use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use super::render;
use super::simulation::SimulationParameters;
use super::state::StellarGraphState;
use super::types::GraphData;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Everything the animation loop and the resize listener share. The frame
/// callback holds a clone of `animate` to reschedule itself, so the slot has
/// to be emptied on teardown or the closure, the context and the session
/// are never freed.
#[derive(Clone, Default)]
struct LoopHandles {
	state: Rc<RefCell<Option<StellarGraphState>>>,
	animate: FrameCallback,
	resize_cb: FrameCallback,
	frame_id: Rc<Cell<Option<i32>>>,
	stopped: Rc<Cell<bool>>,
}

impl LoopHandles {
	fn teardown(&self) {
		self.stopped.set(true);
		if let Some(ref mut s) = *self.state.borrow_mut() {
			s.stop();
		}

		if let Some(window) = web_sys::window() {
			if let Some(id) = self.frame_id.take() {
				let _ = window.cancel_animation_frame(id);
			}
			if let Some(ref cb) = *self.resize_cb.borrow() {
				if let Err(err) =
					window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
				{
					error!("could not remove resize listener: {err:?}");
				}
			}
		}

		self.animate.borrow_mut().take();
		self.resize_cb.borrow_mut().take();
		self.state.borrow_mut().take();
	}
}

/// Fresh entropy for each session; the layout only needs to look random.
fn session_rng() -> StdRng {
	let word = || (js_sys::Math::random() * u32::MAX as f64) as u64;
	StdRng::seed_from_u64(word() << 32 | word())
}

fn global_window() -> Result<Window, JsValue> {
	web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn window_size(window: &Window) -> Result<(f64, f64), JsValue> {
	let width = window.inner_width()?.as_f64().unwrap_or(800.0);
	let height = window.inner_height()?.as_f64().unwrap_or(600.0);
	Ok((width, height))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
	canvas
		.get_context("2d")?
		.ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
		.dyn_into()
		.map_err(JsValue::from)
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Canvas view of the force-directed layout. Clicking a node reports its id
/// through `on_select`; the layout itself never sees the selection.
///
/// Unmounting cancels the pending frame, removes the window resize listener
/// and releases the session.
#[component]
pub fn StellarGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] selected: Signal<Option<String>>,
	#[prop(into)] on_select: Callback<String>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] params: Option<SimulationParameters>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handles = LoopHandles::default();
	let params = params.unwrap_or_default();

	let init = handles.clone();
	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		if init.stopped.get() {
			return;
		}

		// The loop is already running: swap in a session for the new data.
		if init.animate.borrow().is_some() {
			let mut slot = init.state.borrow_mut();
			let (w, h) = slot
				.as_ref()
				.map(|s| (s.width, s.height))
				.unwrap_or((canvas.width() as f64, canvas.height() as f64));
			let mut session = StellarGraphState::new(&graph, w, h, params.clone(), &mut session_rng());
			session.select(selected.get_untracked());
			*slot = Some(session);
			return;
		}

		let setup = || -> Result<(), JsValue> {
			let window = global_window()?;
			let (w, h) = if fullscreen {
				window_size(&window)?
			} else {
				let parent = canvas.parent_element();
				(
					width.unwrap_or_else(|| {
						parent.as_ref().map(|p| p.client_width() as f64).unwrap_or(800.0)
					}),
					height.unwrap_or_else(|| {
						parent.as_ref().map(|p| p.client_height() as f64).unwrap_or(600.0)
					}),
				)
			};
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);
			let ctx = context_2d(&canvas)?;

			let mut session = StellarGraphState::new(&graph, w, h, params.clone(), &mut session_rng());
			session.select(selected.get_untracked());
			*init.state.borrow_mut() = Some(session);

			if fullscreen {
				let (resize, canvas_resize) = (init.clone(), canvas.clone());
				*init.resize_cb.borrow_mut() = Some(Closure::new(move || {
					if resize.stopped.get() {
						return;
					}
					let Ok((nw, nh)) = global_window().and_then(|win| window_size(&win)) else {
						return;
					};
					canvas_resize.set_width(nw as u32);
					canvas_resize.set_height(nh as u32);
					if let Some(ref mut s) = *resize.state.borrow_mut() {
						s.resize(nw, nh, &mut session_rng());
					}
				}));
				if let Some(ref cb) = *init.resize_cb.borrow() {
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())?;
				}
			}

			let anim = init.clone();
			*init.animate.borrow_mut() = Some(Closure::new(move || {
				if anim.stopped.get() {
					return;
				}
				if let Some(ref mut s) = *anim.state.borrow_mut() {
					s.tick();
					render::render(s, &ctx);
				}
				if let Some(ref cb) = *anim.animate.borrow() {
					match web_sys::window()
						.map(|w| w.request_animation_frame(cb.as_ref().unchecked_ref()))
					{
						Some(Ok(id)) => anim.frame_id.set(Some(id)),
						_ => error!("could not schedule the next animation frame"),
					}
				}
			}));
			if let Some(ref cb) = *init.animate.borrow() {
				let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
				init.frame_id.set(Some(id));
			}
			debug!("animation loop started at {w}x{h}");
			Ok(())
		};

		if let Err(err) = setup() {
			error!("stellar graph setup failed: {err:?}");
		}
	});

	let selection = handles.clone();
	Effect::new(move |_| {
		let id = selected.get();
		if let Some(ref mut s) = *selection.state.borrow_mut() {
			s.select(id);
		}
	});

	// Cleanups must be Send; the wasm target is single-threaded, so the
	// handles never leave the thread that created them.
	let teardown = SendWrapper::new(handles.clone());
	on_cleanup(move || {
		teardown.teardown();
		info!("stellar graph unmounted, animation stopped");
	});

	let click = handles.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		let hit = click.state.borrow().as_ref().and_then(|s| {
			let idx = s.node_at_position(x, y)?;
			s.sim.node(idx).map(|node| node.id().to_owned())
		});
		if let Some(id) = hit {
			info!("node {id} selected");
			on_select.run(id);
		}
	};

	let hover = handles.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *hover.state.borrow_mut() {
			let hovered = s.node_at_position(x, y);
			if s.set_hover(hovered) {
				// `leptos::prelude` brings a `style` extension method into
				// scope that shadows the DOM one.
				let _ = HtmlElement::style(&canvas).set_property("cursor", s.cursor());
			}
		}
	};

	let leave = handles;
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *leave.state.borrow_mut() {
			s.set_hover(None);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="stellar-graph-canvas"
			on:click=on_click
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block;"
		/>
	}
}
