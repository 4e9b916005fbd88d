//! Content-script wiring: the real document behind [`PageDom`], the
//! extension storage behind [`HistoryStore`], and the event listeners.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Object, Promise, WeakMap};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use super::dom::{ElementHandle, PageDom, Rect, StyleInspector};
use super::drag::Pointer;
use super::registry::{ElementRegistry, IdentityMap};
use super::session::{EditorSession, MouseInput};
use super::storage::HistoryStore;
use crate::config::EditorConfig;
use crate::error::{DomError, EditorError};
use crate::js_json::{from_js, to_js};
use crate::protocol::{AgentRequest, PanelNotice};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
    fn storage_local_set(items: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
    fn on_message_add_listener(listener: &Function);

    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime"], js_name = sendMessage)]
    fn runtime_send_message(message: &JsValue) -> Result<Promise, JsValue>;
}

/// Element ids in a `WeakMap`, so they die with their elements.
struct WeakIds(WeakMap);

impl IdentityMap<Element> for WeakIds {
    fn get(&self, element: &Element) -> Option<u32> {
        let key: &Object = element.as_ref();
        self.0.get(key).as_f64().map(|id| id as u32)
    }

    fn set(&mut self, element: &Element, id: u32) {
        let key: &Object = element.as_ref();
        self.0.set(key, &JsValue::from(id));
    }
}

/// The live document, with a side table from handles to elements.
pub struct WebDom {
    document: Document,
    elements: ElementRegistry<Element, WeakIds>,
}

impl WebDom {
    pub fn new() -> Result<Self, DomError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(DomError::NoDocument)?;
        Ok(Self {
            document,
            elements: ElementRegistry::new(WeakIds(WeakMap::new())),
        })
    }

    /// Handle for an element the user pressed on, kept for the page's
    /// lifetime so history can still reach it.
    pub fn handle_for(&mut self, element: &Element) -> ElementHandle {
        self.elements.retain(element)
    }

    fn element(&self, handle: ElementHandle) -> Result<&Element, DomError> {
        self.elements.get(handle).ok_or(DomError::UnknownElement(handle))
    }

    fn html_element(&self, handle: ElementHandle) -> Result<&HtmlElement, DomError> {
        self.element(handle)?
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| DomError::Js(format!("element {handle} has no inline style")))
    }

    fn body(&self) -> Result<HtmlElement, DomError> {
        self.document.body().ok_or(DomError::NoDocument)
    }
}

impl StyleInspector for WebDom {
    fn tag_name(&self, element: ElementHandle) -> Result<String, DomError> {
        Ok(self.element(element)?.tag_name())
    }

    fn class_list(&self, element: ElementHandle) -> Result<Vec<String>, DomError> {
        let list = self.element(element)?.class_list();
        Ok((0..list.length()).filter_map(|i| list.item(i)).collect())
    }

    fn computed_style(&self, element: ElementHandle, css_property: &str) -> Result<String, DomError> {
        let window = web_sys::window().ok_or(DomError::NoDocument)?;
        let style = window
            .get_computed_style(self.element(element)?)?
            .ok_or_else(|| DomError::Js("no computed style".into()))?;
        Ok(style.get_property_value(css_property)?)
    }

    fn bounding_rect(&self, element: ElementHandle) -> Result<Rect, DomError> {
        let rect = self.element(element)?.get_bounding_client_rect();
        Ok(Rect::new(rect.x(), rect.y(), rect.width(), rect.height()))
    }

    fn inner_html(&self, element: ElementHandle) -> Result<String, DomError> {
        Ok(self.element(element)?.inner_html())
    }

    fn is_attached(&self, element: ElementHandle) -> bool {
        self.elements.get(element).is_some_and(|e| e.is_connected())
    }
}

impl PageDom for WebDom {
    fn inline_style(&self, element: ElementHandle, css_property: &str) -> Result<String, DomError> {
        Ok(self.html_element(element)?.style().get_property_value(css_property)?)
    }

    fn set_inline_style(
        &mut self,
        element: ElementHandle,
        css_property: &str,
        value: &str,
        important: bool,
    ) -> Result<(), DomError> {
        let priority = if important { "important" } else { "" };
        self.html_element(element)?
            .style()
            .set_property_with_priority(css_property, value, priority)?;
        Ok(())
    }

    fn add_class(&mut self, element: ElementHandle, class: &str) -> Result<(), DomError> {
        Ok(self.element(element)?.class_list().add_1(class)?)
    }

    fn remove_class(&mut self, element: ElementHandle, class: &str) -> Result<(), DomError> {
        Ok(self.element(element)?.class_list().remove_1(class)?)
    }

    fn set_body_class(&mut self, class: &str, on: bool) -> Result<(), DomError> {
        let list = self.body()?.class_list();
        if on {
            list.add_1(class)?;
        } else {
            list.remove_1(class)?;
        }
        Ok(())
    }

    fn set_body_cursor(&mut self, cursor: &str) -> Result<(), DomError> {
        self.body()?.style().set_property("cursor", cursor)?;
        Ok(())
    }

    fn query_all(&mut self, selector: &str) -> Result<Vec<ElementHandle>, DomError> {
        let nodes = self.document.query_selector_all(selector)?;
        let found = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|n| n.dyn_into::<Element>().ok());
        Ok(self.elements.observe(found))
    }
}

/// `chrome.storage.local`, written fire-and-forget.
pub struct ChromeStore;

impl HistoryStore for ChromeStore {
    fn save(&mut self, record: Map<String, Value>) -> Result<(), EditorError> {
        let items = to_js(&record).map_err(|e| EditorError::Storage(format!("{e:?}")))?;
        let promise = storage_local_set(&items).map_err(|e| EditorError::Storage(format!("{e:?}")))?;
        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                warn!(?err, "storage write failed");
            }
        });
        Ok(())
    }
}

type Session = EditorSession<WebDom, ChromeStore>;

/// Keeps the session and its listeners alive for the page's lifetime.
struct PageAgent {
    _session: Rc<RefCell<Session>>,
    _listeners: Vec<Closure<dyn FnMut(MouseEvent)>>,
    _on_message: Closure<dyn FnMut(JsValue, JsValue, Function) -> bool>,
}

thread_local! {
    static AGENT: RefCell<Option<PageAgent>> = const { RefCell::new(None) };
}

/// Create the session for this page and hook it up. Calling it again is a
/// no-op.
pub fn start(config: EditorConfig) -> Result<(), JsValue> {
    if AGENT.with(|agent| agent.borrow().is_some()) {
        debug!("page agent already running");
        return Ok(());
    }

    let dom = WebDom::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let document = dom.document.clone();
    let session = Rc::new(RefCell::new(EditorSession::new(dom, ChromeStore, config)));

    let mut listeners = Vec::new();

    let s = session.clone();
    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        if s.borrow().on_click() {
            event.prevent_default();
            event.stop_propagation();
        }
    });
    document.add_event_listener_with_callback_and_bool("click", on_click.as_ref().unchecked_ref(), true)?;
    listeners.push(on_click);

    let s = session.clone();
    let on_mouse_down = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let outcome = {
            let mut session = s.borrow_mut();
            let target = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|el| session.dom_mut().handle_for(&el));
            session.on_mouse_down(MouseInput {
                target,
                pointer: pointer_of(&event),
                alt_key: event.alt_key(),
            })
        };
        match outcome {
            Ok(outcome) => {
                if outcome.prevent_default {
                    event.prevent_default();
                }
                if let Some(notice) = outcome.notice {
                    notify_panel(&notice);
                }
            }
            Err(err) => warn!(error = %err, "mousedown failed"),
        }
    });
    document.add_event_listener_with_callback("mousedown", on_mouse_down.as_ref().unchecked_ref())?;
    listeners.push(on_mouse_down);

    let s = session.clone();
    let on_mouse_move = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        if let Err(err) = s.borrow_mut().on_mouse_move(pointer_of(&event), event.time_stamp()) {
            warn!(error = %err, "mousemove failed");
        }
    });
    document.add_event_listener_with_callback("mousemove", on_mouse_move.as_ref().unchecked_ref())?;
    listeners.push(on_mouse_move);

    let s = session.clone();
    let on_mouse_up = Closure::<dyn FnMut(MouseEvent)>::new(move |_event: MouseEvent| {
        if let Err(err) = s.borrow_mut().on_mouse_up() {
            warn!(error = %err, "mouseup failed");
        }
    });
    document.add_event_listener_with_callback("mouseup", on_mouse_up.as_ref().unchecked_ref())?;
    listeners.push(on_mouse_up);

    let s = session.clone();
    let on_message = Closure::<dyn FnMut(JsValue, JsValue, Function) -> bool>::new(
        move |message: JsValue, _sender: JsValue, send_response: Function| {
            let request = match from_js(&message).map(AgentRequest::from_value) {
                Ok(Ok(Some(request))) => request,
                Ok(Ok(None)) => return false,
                Ok(Err(err)) => {
                    warn!(error = %err, "malformed request");
                    return false;
                }
                Err(err) => {
                    warn!(?err, "unreadable message");
                    return false;
                }
            };
            let reply = s.borrow_mut().handle(request);
            match reply.to_json() {
                Ok(Some(body)) => match to_js(&body) {
                    Ok(body) => {
                        if let Err(err) = send_response.call1(&JsValue::NULL, &body) {
                            debug!(?err, "sendResponse failed");
                        }
                    }
                    Err(err) => warn!(?err, "could not encode reply"),
                },
                Ok(None) => {}
                Err(err) => warn!(error = %err, "could not encode reply"),
            }
            false
        },
    );
    on_message_add_listener(on_message.as_ref().unchecked_ref());

    info!("page agent started");
    AGENT.with(|agent| {
        *agent.borrow_mut() = Some(PageAgent {
            _session: session,
            _listeners: listeners,
            _on_message: on_message,
        });
    });
    Ok(())
}

fn pointer_of(event: &MouseEvent) -> Pointer {
    Pointer::new(event.client_x(), event.client_y())
}

fn notify_panel(notice: &PanelNotice) {
    let message = match to_js(notice) {
        Ok(message) => message,
        Err(err) => {
            warn!(?err, "could not encode notice");
            return;
        }
    };
    match runtime_send_message(&message) {
        Ok(promise) => spawn_local(async move {
            // Rejected when the panel is closed.
            if let Err(err) = JsFuture::from(promise).await {
                debug!(?err, "panel not listening");
            }
        }),
        Err(err) => debug!(?err, "sendMessage failed"),
    }
}
