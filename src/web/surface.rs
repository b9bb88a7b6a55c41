use std::rc::Rc;

use js_sys::Reflect;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::bindings::{self, GLViewer};
use super::{js_error, library_ready};
use crate::catalog::StructureFormat;
use crate::error::MolviewError;
use crate::measure::{LabeledAtom, Point3};
use crate::options::{Background, ColorScheme, SpinOptions, StyleId};
use crate::surface::{CylinderSpec, LabelSpec, RenderSurface};

/// Receives atoms picked on the surface.
pub type ClickSink = Rc<dyn Fn(LabeledAtom)>;

/// A 3Dmol.js viewer bound to one container element.
pub struct ThreeDmolSurface {
    viewer: GLViewer,
    on_click: ClickSink,
    click_handler: Option<Closure<dyn FnMut(JsValue)>>,
}

impl std::fmt::Debug for ThreeDmolSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreeDmolSurface")
            .field("picking", &self.click_handler.is_some())
            .finish_non_exhaustive()
    }
}

fn js_value(value: &Value) -> Result<JsValue, MolviewError> {
    js_sys::JSON::parse(&value.to_string()).map_err(|e| js_error(&e))
}

fn point_json(p: Point3) -> Value {
    json!({ "x": p.x, "y": p.y, "z": p.z })
}

fn all_atoms() -> JsValue {
    js_sys::Object::new().into()
}

fn field(atom: &JsValue, name: &str) -> Option<JsValue> {
    Reflect::get(atom, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Atom fields read off a 3Dmol atom object. The objects themselves hold
/// cyclic references (bonds, model) and cannot be serialized whole.
const ATOM_FIELDS: [&str; 8] =
    ["x", "y", "z", "elem", "resn", "resi", "chain", "serial"];

/// Copy the fields the viewer cares about into a plain object and decode
/// it through [`LabeledAtom`]'s serde impl.
fn decode_atom(atom: &JsValue) -> Option<LabeledAtom> {
    let plain = js_sys::Object::new();
    for name in ATOM_FIELDS {
        if let Some(value) = field(atom, name) {
            let _ = Reflect::set(&plain, &JsValue::from_str(name), &value);
        }
    }
    let text = String::from(js_sys::JSON::stringify(&plain).ok()?);
    serde_json::from_str(&text)
        .map_err(|e| log::warn!("unreadable atom {text}: {e}"))
        .ok()
}

impl ThreeDmolSurface {
    /// Create a viewer inside `container`. The library must be loaded.
    ///
    /// # Errors
    ///
    /// [`MolviewError::LibraryUnavailable`] if `createViewer` throws.
    pub fn new(
        container: &web_sys::HtmlElement,
        background: Background,
        on_click: ClickSink,
    ) -> Result<Self, MolviewError> {
        let config = js_value(&json!({ "backgroundColor": background.hex() }))?;
        let viewer = bindings::create_viewer(container, &config).map_err(|e| {
            MolviewError::LibraryUnavailable(format!("createViewer failed: {e:?}"))
        })?;
        Ok(Self {
            viewer,
            on_click,
            click_handler: None,
        })
    }

    /// Wait for 3Dmol.js, then create a viewer. Feed this to
    /// [`ViewerSession::initialize`](crate::session::ViewerSession::initialize).
    ///
    /// # Errors
    ///
    /// [`MolviewError::LibraryUnavailable`] if the script fails to load.
    pub async fn create(
        container: web_sys::HtmlElement,
        background: Background,
        on_click: ClickSink,
    ) -> Result<Self, MolviewError> {
        library_ready().await?;
        Self::new(&container, background, on_click)
    }
}

impl RenderSurface for ThreeDmolSurface {
    fn clear(&mut self) {
        self.viewer.remove_all_labels();
        self.viewer.remove_all_shapes();
        self.viewer.clear();
    }

    fn load_structure(
        &mut self,
        data: &str,
        format: StructureFormat,
    ) -> Result<usize, MolviewError> {
        let model = self
            .viewer
            .add_model(data, format.as_str())
            .map_err(|e| MolviewError::StructureLoad(format!("{e:?}")))?;
        Ok(model.model_atoms(&all_atoms()).length() as usize)
    }

    fn atoms(&self) -> Vec<LabeledAtom> {
        self.viewer
            .selected_atoms(&all_atoms())
            .iter()
            .filter_map(|atom| decode_atom(&atom))
            .collect()
    }

    fn set_style(&mut self, style: StyleId, colors: ColorScheme) {
        match js_value(&style.style_json(colors)) {
            Ok(spec) => self.viewer.set_style(&all_atoms(), &spec),
            Err(e) => log::error!("style {} rejected: {e}", style.id()),
        }
    }

    fn set_background(&mut self, background: Background) {
        self.viewer.set_background_color(background.hex());
    }

    fn enable_picking(&mut self) {
        let sink = Rc::clone(&self.on_click);
        let handler = Closure::<dyn FnMut(JsValue)>::new(move |atom: JsValue| {
            match decode_atom(&atom) {
                Some(atom) => sink(atom),
                None => log::warn!("click on an atom without coordinates"),
            }
        });
        self.viewer.set_clickable(
            &all_atoms(),
            true,
            handler.as_ref().unchecked_ref(),
        );
        // The previous model's handler is gone with the model.
        self.click_handler = Some(handler);
    }

    fn zoom_to_fit(&mut self) {
        self.viewer.zoom_to();
    }

    fn add_label(&mut self, label: &LabelSpec) {
        let options = json!({
            "position": point_json(label.position),
            "fontSize": label.font_size,
            "fontColor": label.font_color,
            "backgroundColor": label.background_color,
            "backgroundOpacity": label.background_opacity,
        });
        match js_value(&options) {
            Ok(options) => self.viewer.add_label(&label.text, &options),
            Err(e) => log::error!("label rejected: {e}"),
        }
    }

    fn remove_labels(&mut self) {
        self.viewer.remove_all_labels();
    }

    fn add_cylinder(&mut self, cylinder: &CylinderSpec) {
        let spec = json!({
            "start": point_json(cylinder.start),
            "end": point_json(cylinder.end),
            "radius": cylinder.radius,
            "color": cylinder.color,
            "dashed": cylinder.dashed,
            "fromCap": 1,
            "toCap": 1,
        });
        match js_value(&spec) {
            Ok(spec) => self.viewer.add_cylinder(&spec),
            Err(e) => log::error!("cylinder rejected: {e}"),
        }
    }

    fn remove_shapes(&mut self) {
        self.viewer.remove_all_shapes();
    }

    fn set_spin(&mut self, spin: Option<&SpinOptions>) {
        match spin {
            Some(spin) => self
                .viewer
                .spin(&JsValue::from_str(spin.axis.as_str()), f64::from(spin.speed)),
            None => self.viewer.spin(&JsValue::FALSE, 1.0),
        }
    }

    fn render(&mut self) {
        self.viewer.render();
    }

    fn save_snapshot(&mut self, file_name: &str) -> Result<(), MolviewError> {
        let uri = self.viewer.png_uri().map_err(|e| js_error(&e))?;
        super::download(&uri, file_name)
    }

    fn release(&mut self) {
        self.viewer.clear();
        self.click_handler = None;
    }
}
