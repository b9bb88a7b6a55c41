//! Browser binding over 3Dmol.js (feature `web`).
//!
//! [`ThreeDmolSurface`] implements [`RenderSurface`](crate::surface::RenderSurface)
//! on top of a `$3Dmol.GLViewer`. [`library_ready`] resolves once the
//! 3Dmol.js script has loaded, from the script's own `load` event.

mod bindings;
mod surface;

pub use surface::{ClickSink, ThreeDmolSurface};

use js_sys::{Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::catalog::RemoteId;
use crate::error::MolviewError;
use crate::fetch::remote_url;
use crate::input::FocusTarget;
use crate::options::FetchOptions;

/// Where 3Dmol.js is loaded from when the page does not ship it.
pub const THREEDMOL_SCRIPT: &str = "https://3Dmol.org/build/3Dmol-min.js";

/// Global the library installs on `window`.
const THREEDMOL_GLOBAL: &str = "$3Dmol";

fn js_error(value: &JsValue) -> MolviewError {
    MolviewError::Browser(format!("{value:?}"))
}

fn window() -> Result<web_sys::Window, MolviewError> {
    web_sys::window().ok_or_else(|| MolviewError::Browser("no global window".into()))
}

fn document() -> Result<web_sys::Document, MolviewError> {
    window()?
        .document()
        .ok_or_else(|| MolviewError::Browser("no document".into()))
}

fn library_loaded(window: &web_sys::Window) -> bool {
    Reflect::has(window, &JsValue::from_str(THREEDMOL_GLOBAL)).unwrap_or(false)
}

/// Install `console_log` and the panic hook. Safe to call more than once.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }
}

/// Resolve once `window.$3Dmol` exists.
///
/// If the library is missing, a `<script>` for [`THREEDMOL_SCRIPT`] is
/// appended and its `load`/`error` event settles the future.
///
/// # Errors
///
/// [`MolviewError::LibraryUnavailable`] if the script fails to load.
pub async fn library_ready() -> Result<(), MolviewError> {
    let window = window()?;
    if library_loaded(&window) {
        return Ok(());
    }

    let document = document()?;
    let script: web_sys::HtmlScriptElement = document
        .create_element("script")
        .map_err(|e| js_error(&e))?
        .dyn_into()
        .map_err(|_| MolviewError::Browser("not a script element".into()))?;
    script.set_src(THREEDMOL_SCRIPT);

    let loaded = Promise::new(&mut |resolve, reject| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });
    let body = document
        .body()
        .ok_or_else(|| MolviewError::Browser("no document body".into()))?;
    let _ = body.append_child(&script).map_err(|e| js_error(&e))?;

    log::debug!("waiting for {THREEDMOL_SCRIPT}");
    let _ = JsFuture::from(loaded).await.map_err(|_| {
        MolviewError::LibraryUnavailable(format!("failed to load {THREEDMOL_SCRIPT}"))
    })?;
    script.set_onload(None);
    script.set_onerror(None);

    if library_loaded(&window) {
        Ok(())
    } else {
        Err(MolviewError::LibraryUnavailable(format!(
            "{THREEDMOL_SCRIPT} loaded without defining {THREEDMOL_GLOBAL}"
        )))
    }
}

/// Download a structure with the browser's `fetch`.
///
/// HTTP 404 maps to [`MolviewError::NotFound`], other failures to
/// [`MolviewError::Fetch`].
///
/// # Errors
///
/// See above.
pub async fn fetch_text(
    remote: &RemoteId,
    options: &FetchOptions,
) -> Result<String, MolviewError> {
    let url = remote_url(remote, options);
    log::info!("Downloading {} from {url}...", remote.label());

    let transport = |e: JsValue| {
        MolviewError::Fetch(format!("failed to download {}: {e:?}", remote.label()))
    };
    let response: web_sys::Response = JsFuture::from(window()?.fetch_with_str(&url))
        .await
        .map_err(transport)?
        .dyn_into()
        .map_err(transport)?;

    match response.status() {
        404 => return Err(MolviewError::NotFound(remote.label())),
        status if !response.ok() => {
            return Err(MolviewError::Fetch(format!(
                "{} answered HTTP {status}",
                remote.label()
            )));
        }
        _ => {}
    }

    JsFuture::from(response.text().map_err(transport)?)
        .await
        .map_err(transport)?
        .as_string()
        .ok_or_else(|| MolviewError::Fetch("response body is not text".into()))
}

/// Trigger a client-side download of `href` (e.g. a data URI).
fn download(href: &str, file_name: &str) -> Result<(), MolviewError> {
    let anchor: web_sys::HtmlAnchorElement = document()?
        .create_element("a")
        .map_err(|e| js_error(&e))?
        .dyn_into()
        .map_err(|_| MolviewError::Browser("not an anchor element".into()))?;
    anchor.set_href(href);
    anchor.set_download(file_name);
    anchor.click();
    Ok(())
}

/// Where a key event was typed.
#[must_use]
pub fn focus_of(event: &web_sys::KeyboardEvent) -> FocusTarget {
    event
        .target()
        .and_then(|target| target.dyn_into::<web_sys::HtmlElement>().ok())
        .map_or(FocusTarget::Viewer, |element| {
            FocusTarget::from_element(&element.tag_name(), element.is_content_editable())
        })
}
