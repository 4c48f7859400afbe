//! Browser binding: an SVG [`Surface`] over the DOM and the `WebFretboard`
//! class exported to JavaScript.
//!
//! The host page does
//!
//! ```js
//! const fb = new WebFretboard(container, { drawDotOnHover: true }, coord => console.log(coord));
//! // ...
//! fb.remove();
//! ```
//!
//! Options use the same camelCase keys as [`FretboardConfig`]. The click
//! callback receives `{ string, fret }`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent};

use crate::config::{BoardCoordinate, FretboardConfig};
use crate::error::SurfaceError;
use crate::geom::Point;
use crate::input::PointerEvent;
use crate::scene::{Circle, Label, Line};
use crate::surface::Surface;
use crate::view::{ClickHandler, FretboardView};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Node handle issued by a [`DomSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomNodeId(u64);

/// A `<svg>` element appended to a container, drawn into with child elements.
pub struct DomSurface {
    document: Document,
    root: Element,
    next_id: u64,
    nodes: Vec<(DomNodeId, Element)>,
}

impl DomSurface {
    /// Create an `<svg>` of the given size and append it to `container`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the container has no document or the DOM
    /// rejects the element.
    pub fn attach(container: &Element, width: f64, height: f64) -> Result<Self, SurfaceError> {
        let document = container
            .owner_document()
            .ok_or_else(|| SurfaceError("container is not attached to a document".into()))?;
        let root = document.create_element_ns(Some(SVG_NS), "svg").map_err(js_err)?;
        set_attrs(
            &root,
            &[
                ("width", width.to_string()),
                ("height", height.to_string()),
                ("viewBox", format!("0 0 {width} {height}")),
                ("style", "border: 1px solid".to_owned()),
            ],
        )?;
        container.append_child(&root).map_err(js_err)?;
        Ok(Self { document, root, next_id: 0, nodes: Vec::new() })
    }

    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Take the `<svg>` element out of its container.
    pub fn detach(&self) {
        self.root.remove();
    }

    fn append(&mut self, tag: &str, attrs: &[(&str, String)], text: Option<&str>) -> Result<DomNodeId, SurfaceError> {
        let el = self.document.create_element_ns(Some(SVG_NS), tag).map_err(js_err)?;
        set_attrs(&el, attrs)?;
        if let Some(text) = text {
            el.set_text_content(Some(text));
        }
        self.root.append_child(&el).map_err(js_err)?;

        let id = DomNodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push((id, el));
        Ok(id)
    }
}

impl Surface for DomSurface {
    type NodeId = DomNodeId;

    fn add_line(&mut self, line: &Line) -> Result<DomNodeId, SurfaceError> {
        self.append(
            "line",
            &[
                ("x1", line.from.x.to_string()),
                ("y1", line.from.y.to_string()),
                ("x2", line.to.x.to_string()),
                ("y2", line.to.y.to_string()),
                ("stroke", line.stroke.clone()),
            ],
            None,
        )
    }

    fn add_circle(&mut self, circle: &Circle) -> Result<DomNodeId, SurfaceError> {
        self.append(
            "circle",
            &[
                ("cx", circle.center.x.to_string()),
                ("cy", circle.center.y.to_string()),
                ("r", circle.radius.to_string()),
                ("stroke", circle.stroke.clone()),
                ("fill", circle.fill.clone()),
            ],
            None,
        )
    }

    fn add_text(&mut self, label: &Label) -> Result<DomNodeId, SurfaceError> {
        self.append(
            "text",
            &[
                ("x", label.at.x.to_string()),
                ("y", label.at.y.to_string()),
                ("text-anchor", "middle".to_owned()),
                ("dominant-baseline", "middle".to_owned()),
                ("font-size", label.font_size.to_string()),
            ],
            Some(&label.text),
        )
    }

    fn remove_node(&mut self, id: DomNodeId) -> Result<(), SurfaceError> {
        if let Some(pos) = self.nodes.iter().position(|(node_id, _)| *node_id == id) {
            let (_, el) = self.nodes.remove(pos);
            el.remove();
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        for (_, el) in self.nodes.drain(..) {
            el.remove();
        }
        Ok(())
    }
}

type Listener = (&'static str, Closure<dyn FnMut(MouseEvent)>);

/// A fretboard mounted in a DOM container.
#[wasm_bindgen]
pub struct WebFretboard {
    view: Rc<RefCell<FretboardView<DomSurface>>>,
    root: Element,
    listeners: Vec<Listener>,
    num_strings: usize,
    num_frets: usize,
}

#[wasm_bindgen]
impl WebFretboard {
    /// Build a fretboard inside `container`.
    ///
    /// # Errors
    ///
    /// Throws if the options are invalid (nothing is attached in that case)
    /// or the DOM rejects an element or listener.
    #[wasm_bindgen(constructor)]
    pub fn new(container: &Element, opts: &JsValue, on_click: Option<js_sys::Function>) -> Result<WebFretboard, JsValue> {
        let config = parse_options(opts)?;
        config.validate().map_err(to_js)?;

        let surface = DomSurface::attach(container, config.width, config.height).map_err(to_js)?;
        let root = surface.root().clone();
        let view = match FretboardView::new(surface, config, on_click.map(js_click_handler)) {
            Ok(view) => view,
            Err(err) => {
                root.remove();
                return Err(to_js(err));
            }
        };

        let mut fretboard = Self {
            num_strings: view.num_strings(),
            num_frets: view.num_frets(),
            view: Rc::new(RefCell::new(view)),
            root,
            listeners: Vec::new(),
        };
        fretboard.listen("mousemove", PointerEvent::Move)?;
        fretboard.listen("click", PointerEvent::Click)?;
        fretboard.listen("mouseleave", |_| PointerEvent::Leave)?;
        Ok(fretboard)
    }

    #[wasm_bindgen(getter = numStrings)]
    pub fn num_strings(&self) -> usize {
        self.num_strings
    }

    #[wasm_bindgen(getter = numFrets)]
    pub fn num_frets(&self) -> usize {
        self.num_frets
    }

    /// Detach the fretboard and its listeners. Calling this again is a no-op.
    ///
    /// # Errors
    ///
    /// Throws if called from inside this fretboard's own click callback, or
    /// if the scene could not be cleared. Listeners stay attached in the
    /// latter case so the fretboard keeps working and removal can be retried.
    pub fn remove(&mut self) -> Result<(), JsValue> {
        let Ok(mut view) = self.view.try_borrow_mut() else {
            return Err(JsValue::from_str("fretboard is busy handling an event"));
        };
        if view.is_removed() {
            return Ok(());
        }
        view.remove().map_err(to_js)?;
        for (event, cb) in self.listeners.drain(..) {
            if let Err(err) = self.root.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
                tracing::warn!(event, error = ?err, "failed to remove fretboard listener");
            }
        }
        view.surface().detach();
        Ok(())
    }
}

impl WebFretboard {
    fn listen(&mut self, event: &'static str, make: impl Fn(Point) -> PointerEvent + 'static) -> Result<(), JsValue> {
        let view = Rc::clone(&self.view);
        let root = self.root.clone();
        let cb = Closure::wrap(Box::new(move |ev: MouseEvent| {
            let pointer = make(local_point(&root, &ev));
            let Ok(mut view) = view.try_borrow_mut() else {
                tracing::warn!(event, "fretboard event dropped: view is busy");
                return;
            };
            if let Err(err) = view.handle(pointer) {
                tracing::warn!(event, error = %err, "fretboard event failed");
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        self.root.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
        self.listeners.push((event, cb));
        Ok(())
    }
}

impl Drop for WebFretboard {
    fn drop(&mut self) {
        if let Err(err) = self.remove() {
            tracing::warn!(error = ?err, "fretboard dropped without clean removal");
        }
    }
}

/// Pointer position in the `<svg>` element's own coordinate space.
fn local_point(root: &Element, ev: &MouseEvent) -> Point {
    let rect = root.get_bounding_client_rect();
    Point::new(
        f64::from(ev.client_x()) - rect.left() - f64::from(root.client_left()),
        f64::from(ev.client_y()) - rect.top() - f64::from(root.client_top()),
    )
}

fn parse_options(opts: &JsValue) -> Result<FretboardConfig, JsValue> {
    if opts.is_undefined() || opts.is_null() {
        return Ok(FretboardConfig::default());
    }
    let json: String = js_sys::JSON::stringify(opts)?.into();
    FretboardConfig::from_json(&json).map_err(to_js)
}

fn js_click_handler(callback: js_sys::Function) -> ClickHandler {
    Box::new(move |coord: BoardCoordinate| {
        let arg = match coord_to_js(coord) {
            Ok(arg) => arg,
            Err(err) => {
                tracing::warn!(error = ?err, "failed to encode board coordinate");
                return;
            }
        };
        if let Err(err) = callback.call1(&JsValue::NULL, &arg) {
            tracing::warn!(error = ?err, "fretboard click callback threw");
        }
    })
}

fn coord_to_js(coord: BoardCoordinate) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(&coord).map_err(to_js)?;
    js_sys::JSON::parse(&json)
}

fn set_attrs(el: &Element, attrs: &[(&str, String)]) -> Result<(), SurfaceError> {
    for (name, value) in attrs {
        el.set_attribute(name, value).map_err(js_err)?;
    }
    Ok(())
}

fn js_err(err: JsValue) -> SurfaceError {
    SurfaceError(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
