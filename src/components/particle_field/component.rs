//! Leptos component rendering the particle background behind its children.
//!
//! The canvas is mounted once the element exists; the animation runs until the
//! component is cleaned up. If the canvas cannot be animated the children are
//! still rendered on a plain background.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use send_wrapper::SendWrapper;
use web_sys::HtmlCanvasElement;

use super::host::FieldHost;
use super::types::FieldOptions;

/// Full-viewport animated particle field with `children` drawn on top.
///
/// Options are read once at mount; missing options use [`FieldOptions::default`].
#[component]
pub fn ParticleBackground(
	#[prop(optional)] options: Option<FieldOptions>,
	children: Children,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let host: Rc<RefCell<Option<FieldHost>>> = Rc::new(RefCell::new(None));
	let host_init = host.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if host_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match FieldHost::mount(canvas, options.clone().unwrap_or_default()) {
			Ok(mounted) => *host_init.borrow_mut() = Some(mounted),
			Err(e) => warn!("particle-field: animation disabled: {}", e),
		}
	});

	let host_cleanup = SendWrapper::new(host);
	on_cleanup(move || {
		let host = host_cleanup.take();
		let mounted = host.borrow_mut().take();
		if let Some(mounted) = mounted {
			info!("particle-field: unmounting after {} frames", mounted.frames());
			drop(mounted);
		}
	});

	view! {
		<div class="particle-background" style="position: relative; width: 100%; min-height: 100vh; overflow: hidden;">
			<canvas
				node_ref=canvas_ref
				class="particle-background-canvas"
				aria-hidden="true"
				style="position: fixed; inset: 0; width: 100%; height: 100%; z-index: 0; display: block; pointer-events: none;"
			/>
			<div class="particle-background-content" style="position: relative; z-index: 1;">
				{children()}
			</div>
		</div>
	}
}
