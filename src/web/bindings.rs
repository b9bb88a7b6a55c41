//! Raw bindings to the parts of 3Dmol.js the viewer uses.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `$3Dmol.GLViewer`.
    pub(crate) type GLViewer;

    /// `$3Dmol.GLModel`.
    pub(crate) type GLModel;

    #[wasm_bindgen(catch, js_namespace = ["$3Dmol"], js_name = createViewer)]
    pub(crate) fn create_viewer(
        element: &web_sys::HtmlElement,
        config: &JsValue,
    ) -> Result<GLViewer, JsValue>;

    #[wasm_bindgen(catch, method, js_name = addModel)]
    pub(crate) fn add_model(
        this: &GLViewer,
        data: &str,
        format: &str,
    ) -> Result<GLModel, JsValue>;

    #[wasm_bindgen(method, js_name = selectedAtoms)]
    pub(crate) fn model_atoms(this: &GLModel, selection: &JsValue) -> js_sys::Array;

    #[wasm_bindgen(method, js_name = selectedAtoms)]
    pub(crate) fn selected_atoms(this: &GLViewer, selection: &JsValue) -> js_sys::Array;

    #[wasm_bindgen(method, js_name = setStyle)]
    pub(crate) fn set_style(this: &GLViewer, selection: &JsValue, style: &JsValue);

    #[wasm_bindgen(method, js_name = setClickable)]
    pub(crate) fn set_clickable(
        this: &GLViewer,
        selection: &JsValue,
        clickable: bool,
        callback: &js_sys::Function,
    );

    #[wasm_bindgen(method, js_name = addLabel)]
    pub(crate) fn add_label(this: &GLViewer, text: &str, options: &JsValue);

    #[wasm_bindgen(method, js_name = removeAllLabels)]
    pub(crate) fn remove_all_labels(this: &GLViewer);

    #[wasm_bindgen(method, js_name = addCylinder)]
    pub(crate) fn add_cylinder(this: &GLViewer, spec: &JsValue);

    #[wasm_bindgen(method, js_name = removeAllShapes)]
    pub(crate) fn remove_all_shapes(this: &GLViewer);

    #[wasm_bindgen(method, js_name = setBackgroundColor)]
    pub(crate) fn set_background_color(this: &GLViewer, color: &str);

    #[wasm_bindgen(method, js_name = zoomTo)]
    pub(crate) fn zoom_to(this: &GLViewer);

    /// `axis` is an axis name, or `false` to stop.
    #[wasm_bindgen(method)]
    pub(crate) fn spin(this: &GLViewer, axis: &JsValue, speed: f64);

    #[wasm_bindgen(method)]
    pub(crate) fn render(this: &GLViewer);

    #[wasm_bindgen(catch, method, js_name = pngURI)]
    pub(crate) fn png_uri(this: &GLViewer) -> Result<String, JsValue>;

    #[wasm_bindgen(method)]
    pub(crate) fn clear(this: &GLViewer);
}
