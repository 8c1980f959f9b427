//! Binds a [`FieldState`] to a canvas and the window's events.
//!
//! A [`FieldHost`] owns everything one mounted background needs: the state,
//! the frame loop and the `resize`/`mousemove`/`mouseout` listeners. Dropping
//! it detaches the listeners and cancels the next frame.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, Window};

use super::frame_loop::FrameLoop;
use super::state::FieldState;
use super::surface::{self, SurfaceError};
use super::types::FieldOptions;

/// An event listener on the window, removed on drop.
struct WindowListener {
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl WindowListener {
	fn attach(window: &Window, event: &'static str, callback: Closure<dyn FnMut(Event)>) -> Result<Self, SurfaceError> {
		window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(Self { event, callback })
	}
}

impl Drop for WindowListener {
	fn drop(&mut self) {
		if let Some(window) = web_sys::window() {
			let _ = window.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
		}
	}
}

/// A particle background running on one canvas.
pub struct FieldHost {
	state: Rc<RefCell<FieldState>>,
	frame_loop: FrameLoop,
	_listeners: Vec<WindowListener>,
}

impl FieldHost {
	/// Sizes `canvas` to the viewport, seeds the field and starts animating.
	///
	/// Fails without side effects on the page when the window or the 2D
	/// context is unavailable.
	pub fn mount(canvas: HtmlCanvasElement, options: FieldOptions) -> Result<Self, SurfaceError> {
		let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
		let (w, h) = surface::viewport_size(&window)?;
		let ctx = surface::context_2d(&canvas)?;
		surface::size_canvas(&canvas, w, h);

		let state = Rc::new(RefCell::new(FieldState::new(options, w, h, surface::entropy_seed())));
		let frame_loop = FrameLoop::start(state.clone(), ctx, surface::current_theme)?;

		let listeners = vec![
			WindowListener::attach(&window, "resize", on_resize(Rc::downgrade(&state), canvas))?,
			WindowListener::attach(&window, "mousemove", on_pointer_move(Rc::downgrade(&state)))?,
			WindowListener::attach(&window, "mouseout", on_pointer_out(Rc::downgrade(&state)))?,
		];

		info!(
			"particle-field: mounted {} particles on {}x{} canvas",
			state.borrow().field.len(),
			w,
			h
		);

		Ok(Self {
			state,
			frame_loop,
			_listeners: listeners,
		})
	}

	/// Frames drawn since mounting.
	pub fn frames(&self) -> u64 {
		self.frame_loop.frames()
	}

	pub fn is_running(&self) -> bool {
		self.frame_loop.is_running()
	}

	pub fn particle_count(&self) -> usize {
		self.state.borrow().field.len()
	}

	/// Shared simulation state. The handle stops resolving once the host is dropped.
	pub fn state(&self) -> Weak<RefCell<FieldState>> {
		Rc::downgrade(&self.state)
	}

	/// Stops the animation. Listeners stay attached until the host is dropped.
	pub fn stop(&self) {
		self.frame_loop.stop();
	}
}

impl Drop for FieldHost {
	fn drop(&mut self) {
		self.frame_loop.stop();
		debug!("particle-field: host released");
	}
}

fn on_resize(state: Weak<RefCell<FieldState>>, canvas: HtmlCanvasElement) -> Closure<dyn FnMut(Event)> {
	Closure::new(move |_: Event| {
		// The host may already be gone when a queued resize event fires.
		let Some(state) = state.upgrade() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		let Ok((w, h)) = surface::viewport_size(&window) else {
			return;
		};
		surface::size_canvas(&canvas, w, h);
		if let Ok(mut s) = state.try_borrow_mut() {
			s.resize(w, h);
		}
	})
}

fn on_pointer_move(state: Weak<RefCell<FieldState>>) -> Closure<dyn FnMut(Event)> {
	Closure::new(move |ev: Event| {
		let (Some(state), Some(ev)) = (state.upgrade(), ev.dyn_ref::<MouseEvent>()) else {
			return;
		};
		if let Ok(mut s) = state.try_borrow_mut() {
			s.pointer.move_to(ev.client_x() as f64, ev.client_y() as f64);
		}
	})
}

fn on_pointer_out(state: Weak<RefCell<FieldState>>) -> Closure<dyn FnMut(Event)> {
	Closure::new(move |ev: Event| {
		let (Some(state), Some(ev)) = (state.upgrade(), ev.dyn_ref::<MouseEvent>()) else {
			return;
		};
		// A null related target means the pointer left the window itself.
		if ev.related_target().is_some() {
			return;
		}
		if let Ok(mut s) = state.try_borrow_mut() {
			s.pointer.leave();
		}
	})
}
