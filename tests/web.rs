#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use leptos::mount::mount_to;
use leptos::prelude::*;
use particle_backdrop::components::particle_field::{FieldState, FrameLoop, ThemeMode, surface};
use particle_backdrop::{FieldHost, FieldOptions, ParticleBackground};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Event, HtmlCanvasElement, HtmlElement, MouseEvent};

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
	let document = web_sys::window().unwrap().document().unwrap();
	let canvas = document
		.create_element("canvas")
		.unwrap()
		.dyn_into::<HtmlCanvasElement>()
		.unwrap();
	document.body().unwrap().append_child(&canvas).unwrap();
	canvas
}

async fn sleep(ms: i32) {
	let promise = js_sys::Promise::new(&mut |resolve, _| {
		web_sys::window()
			.unwrap()
			.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
			.unwrap();
	});
	JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test(async)]
async fn frames_stop_after_stop() {
	let canvas = canvas();
	let ctx = surface::context_2d(&canvas).unwrap();
	let options = FieldOptions {
		particle_count: 20,
		..FieldOptions::default()
	};
	let state = Rc::new(RefCell::new(FieldState::new(options, 300.0, 200.0, 11)));
	let frame_loop = FrameLoop::start(state.clone(), ctx, || ThemeMode::Dark).unwrap();

	sleep(200).await;
	assert!(frame_loop.frames() > 0);

	frame_loop.stop();
	let stopped_at = frame_loop.frames();
	let positions = state.borrow().field.particles.clone();
	sleep(200).await;

	assert!(!frame_loop.is_running());
	assert_eq!(frame_loop.frames(), stopped_at);
	assert_eq!(state.borrow().field.particles, positions);
}

#[wasm_bindgen_test(async)]
async fn host_sizes_canvas_to_viewport() {
	let canvas = canvas();
	let host = FieldHost::mount(canvas.clone(), FieldOptions::default()).unwrap();
	let window = web_sys::window().unwrap();
	let (w, h) = surface::viewport_size(&window).unwrap();

	assert_eq!(canvas.width(), w as u32);
	assert_eq!(canvas.height(), h as u32);
	assert_eq!(host.particle_count(), FieldOptions::default().particle_count);

	sleep(100).await;
	assert!(host.frames() > 0);
	drop(host);
}

#[wasm_bindgen_test]
fn resize_reseeds_at_same_count() {
	let canvas = canvas();
	let options = FieldOptions {
		particle_count: 40,
		..FieldOptions::default()
	};
	let host = FieldHost::mount(canvas.clone(), options).unwrap();
	host.stop();
	let state = host.state().upgrade().unwrap();
	let before = state.borrow().field.particles.clone();
	canvas.set_width(7);

	let window = web_sys::window().unwrap();
	window.dispatch_event(&Event::new("resize").unwrap()).unwrap();

	let (w, _) = surface::viewport_size(&window).unwrap();
	assert_eq!(canvas.width(), w as u32);
	let after = state.borrow().field.particles.clone();
	assert_eq!(after.len(), 40);
	assert_ne!(after, before);
	drop(state);
	drop(host);
}

#[wasm_bindgen_test(async)]
async fn dropped_host_ignores_window_events() {
	let canvas = canvas();
	let host = FieldHost::mount(canvas.clone(), FieldOptions::default()).unwrap();
	sleep(100).await;
	host.stop();
	let stopped_at = host.frames();
	sleep(100).await;
	assert_eq!(host.frames(), stopped_at);

	let state = host.state();
	drop(host);
	assert!(state.upgrade().is_none());

	canvas.set_width(7);
	let window = web_sys::window().unwrap();
	window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
	window.dispatch_event(&MouseEvent::new("mousemove").unwrap()).unwrap();
	sleep(100).await;

	assert_eq!(canvas.width(), 7);
	assert!(state.upgrade().is_none());
}

#[wasm_bindgen_test(async)]
async fn children_render_when_canvas_cannot_animate() {
	let document = web_sys::window().unwrap().document().unwrap();
	let parent = document
		.create_element("div")
		.unwrap()
		.dyn_into::<HtmlElement>()
		.unwrap();
	document.body().unwrap().append_child(&parent).unwrap();

	let handle = mount_to(parent.clone(), || {
		view! {
			<ParticleBackground>
				<p id="degraded-child">"still here"</p>
			</ParticleBackground>
		}
	});

	// The host mounts in a deferred effect, so the canvas can be bound to
	// another context type first.
	let canvas = parent
		.query_selector(".particle-background-canvas")
		.unwrap()
		.unwrap()
		.dyn_into::<HtmlCanvasElement>()
		.unwrap();
	let claimed = ["bitmaprenderer", "webgl"]
		.into_iter()
		.any(|kind| matches!(canvas.get_context(kind), Ok(Some(_))));
	assert!(claimed, "no non-2d canvas context available");
	assert!(surface::context_2d(&canvas).is_err());

	sleep(100).await;

	let child = parent.query_selector("#degraded-child").unwrap().unwrap();
	assert_eq!(child.text_content().as_deref(), Some("still here"));
	// Untouched default size: the host never mounted.
	assert_eq!(canvas.width(), 300);

	drop(handle);
	assert!(parent.query_selector("#degraded-child").unwrap().is_none());
}

#[wasm_bindgen_test]
fn theme_follows_root_class() {
	let root = web_sys::window()
		.unwrap()
		.document()
		.unwrap()
		.document_element()
		.unwrap();
	root.class_list().remove_1(surface::DARK_CLASS).unwrap();
	assert_eq!(surface::current_theme(), ThemeMode::Light);
	assert_eq!(surface::toggle_theme().unwrap(), ThemeMode::Dark);
	assert_eq!(surface::current_theme(), ThemeMode::Dark);
	root.class_list().remove_1(surface::DARK_CLASS).unwrap();
}
