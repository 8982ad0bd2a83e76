//! Browser layer for the docsim comparison client.
//!
//! Contract validation, result projection, and the submission
//! lifecycle live in `docsim-core`; this crate binds them to the page:
//! upload slots with drag and drop, the multipart round trip to the
//! comparison service, and DOM rendering of the verdict.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { CompareApp } from './pkg/docsim_wasm.js';
//!
//! await init();
//! // "" = same-origin deployment; pass a base URL otherwise.
//! const app = CompareApp.mount("");
//! ```
//!
//! The page must carry the element ids listed in [`app`]; nothing is
//! located by sibling position.

pub mod app;
pub mod render;
pub mod submit;
pub mod upload;

use wasm_bindgen::prelude::*;

pub use app::CompareApp;
pub use upload::UploadSlot;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
