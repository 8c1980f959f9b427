//! Frame scheduling.
//!
//! [`FrameDriver`] decides whether a frame runs and does the update+draw work;
//! [`FrameLoop`] ties it to `requestAnimationFrame`. Each callback schedules
//! the next one only after its frame is fully drawn, and a stopped driver
//! draws nothing even if the browser still delivers a queued callback.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use super::render::{self, Painter};
use super::state::FieldState;
use super::surface::SurfaceError;
use super::theme::ThemeMode;

/// Run/stop switch and frame counter for the animation.
#[derive(Debug, Default)]
pub struct FrameDriver {
	running: bool,
	frames: u64,
}

impl FrameDriver {
	pub fn start(&mut self) {
		self.running = true;
	}

	pub fn stop(&mut self) {
		self.running = false;
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Number of frames drawn so far.
	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// Updates every particle, then draws the frame.
	///
	/// Returns whether another frame should be scheduled. A stopped driver
	/// returns `false` without touching `state` or `painter`.
	pub fn tick<P: Painter + ?Sized>(&mut self, state: &mut FieldState, painter: &mut P, mode: ThemeMode) -> bool {
		if !self.running {
			return false;
		}
		state.tick();
		render::render(state, painter, mode);
		self.frames += 1;
		true
	}
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A running `requestAnimationFrame` loop over one canvas.
///
/// Dropping the loop stops it.
pub struct FrameLoop {
	driver: Rc<RefCell<FrameDriver>>,
	pending: Rc<Cell<Option<i32>>>,
	callback: FrameCallback,
}

impl FrameLoop {
	/// Starts animating `state` onto `ctx`. `theme` is consulted every frame.
	pub fn start<T>(state: Rc<RefCell<FieldState>>, mut ctx: CanvasRenderingContext2d, theme: T) -> Result<Self, SurfaceError>
	where
		T: Fn() -> ThemeMode + 'static,
	{
		let window = web_sys::window().ok_or(SurfaceError::NoWindow)?;
		let driver = Rc::new(RefCell::new(FrameDriver::default()));
		let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let (driver_cb, pending_cb, callback_inner) = (driver.clone(), pending.clone(), callback.clone());

		*callback.borrow_mut() = Some(Closure::new(move || {
			pending_cb.set(None);
			let more = driver_cb.borrow_mut().tick(&mut state.borrow_mut(), &mut ctx, theme());
			if !more {
				return;
			}
			let Some(win) = web_sys::window() else {
				return;
			};
			if let Some(ref cb) = *callback_inner.borrow() {
				match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
					Ok(id) => pending_cb.set(Some(id)),
					Err(e) => warn!("particle-field: failed to schedule frame: {:?}", e),
				}
			}
		}));

		driver.borrow_mut().start();
		if let Some(ref cb) = *callback.borrow() {
			let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
			pending.set(Some(id));
		}

		Ok(Self {
			driver,
			pending,
			callback,
		})
	}

	pub fn is_running(&self) -> bool {
		self.driver.borrow().is_running()
	}

	pub fn frames(&self) -> u64 {
		self.driver.borrow().frames()
	}

	/// Stops the loop and cancels the pending frame request. Idempotent.
	pub fn stop(&self) {
		let was_running = self.driver.borrow().is_running();
		self.driver.borrow_mut().stop();
		if let Some(id) = self.pending.take() {
			if let Some(win) = web_sys::window() {
				let _ = win.cancel_animation_frame(id);
			}
		}
		// Releases the closure's reference to itself.
		self.callback.borrow_mut().take();
		if was_running {
			debug!("particle-field: frame loop stopped after {} frames", self.frames());
		}
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.stop();
	}
}
