//! Dejapaw capture overlay (Leptos + WASM)

mod api;
mod app;
mod components;
mod dom;
mod extension;
mod logger;
mod session;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);

    match overlay_container() {
        Ok(container) => leptos::mount::mount_to(container, app::App).forget(),
        Err(e) => log::error!("overlay could not be mounted: {}", e),
    }
}

/// 既存のコンテナを使い回し、無ければ body 末尾に作る
fn overlay_container() -> Result<web_sys::HtmlElement, String> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or("document is not available")?;

    let container = match document.get_element_by_id(app::CONTAINER_ID) {
        Some(existing) => existing,
        None => {
            let created = document
                .create_element("div")
                .map_err(|e| format!("{:?}", e))?;
            created.set_id(app::CONTAINER_ID);
            document
                .body()
                .ok_or("document has no body")?
                .append_child(&created)
                .map_err(|e| format!("{:?}", e))?;
            created
        }
    };

    container
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| "container is not an HTML element".to_string())
}
