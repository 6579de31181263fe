//! Skylight Web - the page in the browser
//!
//! Builds the page shell in the DOM from the `PageRoot` fragment, then runs
//! the Bevy app against the canvas it created.

pub mod dom;

use skylight_core::{page_root, ViewerConfig};
use skylight_scene::{build_app, PageShell};
use wasm_bindgen::prelude::*;

/// Entry point for WASM module
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    let config = ViewerConfig::default();

    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(config.log.max_level())
            .build(),
    );

    let page = page_root();
    dom::mount_page(&page, &config.window).map_err(|e| JsValue::from_str(&e.to_string()))?;

    build_app(&config, &page, PageShell::Dom).run();
    Ok(())
}
