//! Browser entry point.
//!
//! The page supplies a `<canvas>` and a tall scrolling body. Scroll events
//! sample `document.body.getBoundingClientRect().top` and feed it to the
//! engine; frames run on `requestAnimationFrame`, each one requesting the
//! next.
//!
//! ```js
//! import init, { run_on_canvas } from "./pkg/moonscape.js";
//! await init();
//! await run_on_canvas("bg");
//! ```

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::{
    assets::{decode_texture, TextureImage, TextureSet},
    gpu::render_context::RenderContext,
    input::InputEvent,
    options::Options,
    renderer::SceneRenderer,
    scene::TextureSource,
    SceneEngine,
};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Install the panic hook and console logger.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Run the scene on the canvas with element id `canvas_id`, using default
/// options. Resolves once the first frame has been scheduled.
///
/// # Errors
///
/// Rejects if the canvas is missing or the GPU context cannot be created.
#[wasm_bindgen]
#[allow(clippy::future_not_send, clippy::needless_pass_by_value)]
pub async fn run_on_canvas(canvas_id: String) -> Result<(), JsValue> {
    run_with_options(&canvas_id, Options::default()).await
}

/// Run the scene with options parsed from a TOML string.
///
/// # Errors
///
/// Rejects if the options fail to parse, or for the reasons
/// [`run_on_canvas`] rejects.
#[wasm_bindgen]
#[allow(clippy::future_not_send, clippy::needless_pass_by_value)]
pub async fn run_on_canvas_with_toml(
    canvas_id: String,
    toml: String,
) -> Result<(), JsValue> {
    let options = Options::from_toml_str(&toml)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    run_with_options(&canvas_id, options).await
}

fn js_err(msg: &str) -> JsValue {
    JsValue::from_str(msg)
}

fn browser_window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| js_err("no global window"))
}

/// Viewport size in CSS pixels.
fn logical_size(window: &web_sys::Window) -> (u32, u32) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}

/// Match the canvas backing store to the viewport at device resolution.
fn fit_canvas(
    window: &web_sys::Window,
    canvas: &web_sys::HtmlCanvasElement,
) -> (u32, u32) {
    let (width, height) = logical_size(window);
    let ratio = window.device_pixel_ratio();
    let physical = (
        (f64::from(width) * ratio) as u32,
        (f64::from(height) * ratio) as u32,
    );
    canvas.set_width(physical.0);
    canvas.set_height(physical.1);
    physical
}

fn scroll_offset(document: &web_sys::Document) -> Option<f32> {
    document
        .body()
        .map(|body| body.get_bounding_client_rect().top() as f32)
}

#[allow(clippy::future_not_send)]
async fn fetch_texture(
    window: &web_sys::Window,
    path: &Path,
) -> Result<TextureImage, JsValue> {
    let url = path.to_string_lossy();
    let response: web_sys::Response =
        JsFuture::from(window.fetch_with_str(&url))
            .await?
            .dyn_into()?;
    if !response.ok() {
        return Err(js_err(&format!("{url}: HTTP {}", response.status())));
    }
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    decode_texture(&bytes, path).map_err(|e| js_err(&e.to_string()))
}

/// Fetch every texture the scene references. Failures are logged and the
/// texture renders with its default.
#[allow(clippy::future_not_send)]
async fn fetch_textures(
    window: &web_sys::Window,
    sources: Vec<TextureSource>,
) -> TextureSet {
    let mut set = TextureSet::new();
    for source in sources {
        match fetch_texture(window, source.path()).await {
            Ok(image) => set.insert(source, image),
            Err(e) => log::warn!(
                "{}: {e:?}; rendering untextured",
                source.path().display()
            ),
        }
    }
    set
}

fn request_frame(callback: &FrameCallback) {
    let Ok(window) = browser_window() else {
        return;
    };
    if let Some(closure) = callback.borrow().as_ref() {
        if let Err(e) =
            window.request_animation_frame(closure.as_ref().unchecked_ref())
        {
            log::error!("requestAnimationFrame failed: {e:?}");
        }
    }
}

fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut() + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut()>::new(handler);
    target.add_event_listener_with_callback(
        event,
        closure.as_ref().unchecked_ref(),
    )?;
    closure.forget();
    Ok(())
}

#[allow(clippy::future_not_send)]
async fn run_with_options(
    canvas_id: &str,
    options: Options,
) -> Result<(), JsValue> {
    let window = browser_window()?;
    let document =
        window.document().ok_or_else(|| js_err("no document"))?;
    let canvas: web_sys::HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| js_err(&format!("no element #{canvas_id}")))?
        .dyn_into()?;

    let physical = fit_canvas(&window, &canvas);
    let fps_log_interval = options.display.fps_log_interval;
    let engine = SceneEngine::with_offset(
        options,
        logical_size(&window),
        scroll_offset(&document).unwrap_or(0.0),
    );

    let context = RenderContext::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        physical,
    )
    .await
    .map_err(|e| js_err(&e.to_string()))?;
    let images =
        fetch_textures(&window, TextureSet::sources(&engine.context().scene))
            .await;
    log::info!("loaded {} texture(s)", images.len());
    let renderer = SceneRenderer::new(context, images, fps_log_interval)
        .map_err(|e| js_err(&e.to_string()))?;

    let engine = Rc::new(RefCell::new(engine));
    let renderer = Rc::new(RefCell::new(renderer));

    {
        let engine = Rc::clone(&engine);
        let document = document.clone();
        listen(&window, "scroll", move || {
            if let Some(offset) = scroll_offset(&document) {
                let _ = engine
                    .borrow_mut()
                    .handle_input(InputEvent::Scroll { offset });
            }
        })?;
    }

    {
        let engine = Rc::clone(&engine);
        let renderer = Rc::clone(&renderer);
        let window_handle = window.clone();
        listen(&window, "resize", move || {
            let (width, height) = fit_canvas(&window_handle, &canvas);
            renderer.borrow_mut().resize(width, height);
            let (width, height) = logical_size(&window_handle);
            let _ = engine
                .borrow_mut()
                .handle_input(InputEvent::Resized { width, height });
        })?;
    }

    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let next = Rc::clone(&callback);
    *callback.borrow_mut() = Some(Closure::new(move || {
        let mut schedule = || request_frame(&next);
        let mut renderer = renderer.borrow_mut();
        match engine.borrow_mut().frame(&mut *renderer, &mut schedule) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                renderer.reconfigure();
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
    }));
    request_frame(&callback);
    Ok(())
}
