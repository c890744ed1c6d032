//! WebAssembly bindings for Statecanvas
//!
//! Browser hosts drive an [`Editor`] over an SVG live surface. Symbol and
//! name prompts go through `window.prompt` with the editor's message and
//! default, and clearing asks `window.confirm` first.

use wasm_bindgen::prelude::*;

use crate::automaton::{Editor, ExportedImage};
use crate::core::{
    CallbackPrompt, DeclinePrompt, DiagramError, Mode, Point, PointerEvent, TextPrompt,
};
use crate::render::SvgSurface;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = window, js_name = prompt)]
    fn window_prompt(message: &str, default: &str) -> Option<String>;

    #[wasm_bindgen(js_namespace = window, js_name = confirm)]
    fn window_confirm(message: &str) -> bool;
}

fn browser_prompt() -> impl TextPrompt {
    CallbackPrompt::new(
        |message: &str, default: &str| window_prompt(message, default),
        |message: &str| window_confirm(message),
    )
}

fn js_error(err: DiagramError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Initialize WASM module
///
/// Sets up panic hooks and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

/// Editor handle exposed to JavaScript
#[wasm_bindgen]
pub struct WasmEditor {
    inner: Editor<SvgSurface>,
}

#[wasm_bindgen]
impl WasmEditor {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> WasmEditor {
        WasmEditor {
            inner: Editor::svg(width, height),
        }
    }

    /// Switch tool mode by name (`move`, `addState`, ...)
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: Mode = mode.parse().map_err(js_error)?;
        self.inner.set_mode(mode);
        Ok(())
    }

    #[wasm_bindgen(js_name = setCustomNames)]
    pub fn set_custom_names(&mut self, enabled: bool) {
        self.inner.set_custom_names(enabled);
    }

    /// Pointer press; may open a browser prompt for a symbol or name
    pub fn press(&mut self, x: f64, y: f64) -> bool {
        self.inner
            .pointer(PointerEvent::Press(Point::new(x, y)), &mut browser_prompt())
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.inner
            .pointer(PointerEvent::Move(Point::new(x, y)), &mut DeclinePrompt)
    }

    pub fn release(&mut self, x: f64, y: f64) -> bool {
        self.inner
            .pointer(PointerEvent::Release(Point::new(x, y)), &mut DeclinePrompt)
    }

    pub fn leave(&mut self) -> bool {
        self.inner.pointer(PointerEvent::Leave, &mut DeclinePrompt)
    }

    /// Clear the diagram after a browser confirmation
    pub fn clear(&mut self) -> bool {
        self.inner.clear(&mut browser_prompt())
    }

    /// CSS cursor name for the current interaction
    pub fn cursor(&self) -> String {
        self.inner.cursor().to_string()
    }

    /// Live surface as SVG markup
    pub fn svg(&self) -> String {
        self.inner.surface().to_svg()
    }

    /// PNG export with its download name and content type; throws when the
    /// diagram is empty
    #[wasm_bindgen(js_name = exportPng)]
    pub fn export_png(&self) -> Result<WasmExport, JsValue> {
        self.inner
            .export_png()
            .map(|image| WasmExport { image })
            .map_err(js_error)
    }

    /// Model snapshot as JSON
    #[wasm_bindgen(js_name = modelJson)]
    pub fn model_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.inner.model()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Exported image handed to the browser download
#[wasm_bindgen]
pub struct WasmExport {
    image: ExportedImage,
}

#[wasm_bindgen]
impl WasmExport {
    #[wasm_bindgen(getter, js_name = fileName)]
    pub fn file_name(&self) -> String {
        self.image.file_name.clone()
    }

    #[wasm_bindgen(getter, js_name = contentType)]
    pub fn content_type(&self) -> String {
        self.image.content_type.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.image.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.image.height
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.image.bytes.clone()
    }
}
