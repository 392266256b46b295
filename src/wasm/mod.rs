//! WASM bindings for the pager

mod dom;
mod listener;
mod logger;

pub use dom::{DomBrowser, DomDocument, DomTabBar, DomView, JsTabBar};

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement, KeyboardEvent, KeyboardEventInit, Window};

use crate::config::{HistoryStrategy, PagerConfig, PagerOptions};
use crate::error::{PagerError, Result};
use crate::input::PagingKey;
use crate::pages::PageRef;
use crate::persist;
use crate::render::{markup, STYLESHEET, STYLESHEET_ID};
use crate::tabs::{RevealedTabs, TabBar};
use crate::PageController;

use listener::EventListener;

/// Controller wired to the DOM.
pub type DomController = PageController<DomTabBar, DomView, DomBrowser>;

type SharedController = Rc<RefCell<DomController>>;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route `log` output to the console at `level` ("error" through "trace").
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    logger::init(level.parse().unwrap_or(log::LevelFilter::Info));
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Run `f` unless the controller is already handling an event.
fn with_controller<R>(controller: &SharedController, f: impl FnOnce(&mut DomController) -> R) -> Option<R> {
    match controller.try_borrow_mut() {
        Ok(mut controller) => Some(f(&mut controller)),
        Err(_) => {
            log::warn!("pager busy; nested event dropped");
            None
        }
    }
}

/// JS page reference: numbers, digit strings or filenames.
fn page_ref_from_js(value: &JsValue) -> PageRef {
    if let Some(n) = value.as_f64() {
        PageRef::from_number(n)
    } else if let Some(text) = value.as_string() {
        PageRef::from(text)
    } else {
        PageRef::Name(format!("{:?}", value))
    }
}

fn register(
    controller: &SharedController,
    frame: &Window,
    forwarder: &js_sys::Function,
) -> Result<RevealedTabs> {
    let document = DomDocument::from_frame(frame, forwarder)?;
    with_controller(controller, |c| c.register_frame(&document)).unwrap_or_else(|| Ok(RevealedTabs::new()))
}

/// Start page from `?p=` or the cookie, when resuming.
fn resume_page(window: &Window, document: &Document, config: &PagerConfig) -> Option<PageRef> {
    let search = window.location().search().unwrap_or_default();
    let param = match &config.history {
        HistoryStrategy::PushQuery { param } => Some(param.as_str()),
        HistoryStrategy::None => None,
    };
    let cookie_name = config.cookie.as_ref().map(|c| c.name.as_str());
    persist::resume_page(
        &config.source,
        &search,
        param,
        &dom::cookie_header(document),
        cookie_name,
    )
}

/// WASM-exposed pager
#[wasm_bindgen]
pub struct WasmPager {
    controller: SharedController,
    frame: Window,
    forwarder: Rc<Closure<dyn FnMut(KeyboardEvent)>>,
    registration: Closure<dyn FnMut()>,
    _listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl WasmPager {
    /// Build a pager in `container` driving `tab_bar`'s visible content frame.
    ///
    /// Throws on invalid options before touching the page.
    #[wasm_bindgen(constructor)]
    pub fn new(container: Element, tab_bar: JsTabBar, options: JsValue) -> std::result::Result<WasmPager, JsValue> {
        let options: PagerOptions = if options.is_undefined() || options.is_null() {
            PagerOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options).map_err(PagerError::from)?
        };
        let config = options.validate()?;
        Ok(Self::mount(container, tab_bar, config)?)
    }

    /// Go to a page; returns 0 when the reference does not resolve.
    pub fn page(&self, page_ref: JsValue, path: Option<String>) -> u32 {
        let page_ref = page_ref_from_js(&page_ref);
        with_controller(&self.controller, |c| c.goto_page(page_ref, path.as_deref()))
            .flatten()
            .unwrap_or(0)
    }

    /// Resolve without navigating; 0 when not found.
    #[wasm_bindgen(js_name = getPageNum)]
    pub fn get_page_num(&self, page_ref: JsValue) -> u32 {
        let page_ref = page_ref_from_js(&page_ref);
        self.controller
            .try_borrow()
            .ok()
            .and_then(|c| c.resolve(page_ref))
            .unwrap_or(0)
    }

    #[wasm_bindgen(getter, js_name = currentPage)]
    pub fn current_page(&self) -> u32 {
        self.controller.try_borrow().map(|c| c.current_page()).unwrap_or(0)
    }

    #[wasm_bindgen(getter, js_name = maxPage)]
    pub fn max_page(&self) -> u32 {
        self.controller.try_borrow().map(|c| c.max_page()).unwrap_or(0)
    }

    pub fn first(&self) -> u32 {
        with_controller(&self.controller, |c| c.first()).flatten().unwrap_or(0)
    }

    pub fn previous(&self) -> u32 {
        with_controller(&self.controller, |c| c.previous()).flatten().unwrap_or(0)
    }

    pub fn next(&self) -> u32 {
        with_controller(&self.controller, |c| c.next()).flatten().unwrap_or(0)
    }

    pub fn last(&self) -> u32 {
        with_controller(&self.controller, |c| c.last()).flatten().unwrap_or(0)
    }

    /// Run the conditional-tab handshake against the frame's current document.
    ///
    /// Returns the names of the revealed tabs.
    #[wasm_bindgen(js_name = registerFrame)]
    pub fn register_frame(&self) -> std::result::Result<js_sys::Array, JsValue> {
        let function: &js_sys::Function = (*self.forwarder).as_ref().unchecked_ref();
        let revealed = register(&self.controller, &self.frame, function)?;
        Ok(revealed.iter().map(|name| JsValue::from_str(name)).collect())
    }

    /// Function the content frame calls once it is ready.
    #[wasm_bindgen(js_name = registrationCallback)]
    pub fn registration_callback(&self) -> js_sys::Function {
        self.registration.as_ref().unchecked_ref::<js_sys::Function>().clone()
    }

    /// Snapshot of the pager state (returns JSON)
    pub fn state(&self) -> JsValue {
        let Ok(controller) = self.controller.try_borrow() else {
            return JsValue::NULL;
        };
        let snapshot = PagerSnapshot {
            current_page: controller.current_page(),
            max_page: controller.max_page(),
            toc: controller.toc().map(<[String]>::to_vec),
            target: controller.target_for(controller.current_page()),
        };
        serde_wasm_bindgen::to_value(&snapshot).unwrap_or(JsValue::NULL)
    }
}

impl WasmPager {
    fn mount(container: Element, tab_bar: JsTabBar, mut config: PagerConfig) -> Result<WasmPager> {
        let no_window = || PagerError::Js {
            message: "no window".to_string(),
        };
        let window = web_sys::window().ok_or_else(no_window)?;
        let document = window.document().ok_or_else(no_window)?;

        if config.resume && config.start_page.is_none() {
            config.start_page = resume_page(&window, &document, &config);
        }

        // `paint` settles which tab is displayed.
        let mut tabs = DomTabBar::new(tab_bar);
        tabs.paint();

        let frame_element = dom::find_content_frame(&window, &tabs.container())?;
        let main_tab = frame_element.parent_element().ok_or(PagerError::NoContentFrame)?;
        let frame = frame_element.content_window().ok_or(PagerError::NoContentFrame)?;

        dom::inject_stylesheet(&document, STYLESHEET_ID, STYLESHEET)?;
        container
            .insert_adjacent_html(
                "beforeend",
                &markup(config.controls, config.glyphs, config.source.max_page()),
            )
            .map_err(|err| PagerError::js(&err))?;

        let view = DomView::bind(&container, config.controls)?;
        let buttons = view.buttons().to_vec();
        let slider = view.slider().clone();
        let browser = DomBrowser::new(window.clone(), frame.clone());

        let controller: SharedController = Rc::new(RefCell::new(PageController::new(
            config, tabs, view, browser, main_tab,
        )));

        let mut listeners = Vec::with_capacity(buttons.len() + 3);
        for (control, button) in buttons {
            let controller = Rc::clone(&controller);
            listeners.push(EventListener::new(&button, "click", move |_: Event| {
                with_controller(&controller, |c| c.activate(control));
            })?);
        }

        // `change` covers range controls that never fire `input`.
        for kind in ["input", "change"] {
            let controller = Rc::clone(&controller);
            let slider_el: HtmlInputElement = slider.clone();
            listeners.push(EventListener::new(&slider, kind, move |_: Event| {
                let value = slider_el.value();
                with_controller(&controller, |c| c.slider_commit(&value));
            })?);
        }

        {
            let controller = Rc::clone(&controller);
            let host = document.clone();
            listeners.push(EventListener::new(&document, "keydown", move |event: Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let focus = dom::focus_of(&host);
                with_controller(&controller, |c| c.handle_key(&event.key(), focus));
            })?);
        }

        let forwarder = {
            let host = document.clone();
            Rc::new(Closure::wrap(Box::new(move |event: KeyboardEvent| {
                let Some(key) = PagingKey::from_key(&event.key()) else {
                    return;
                };
                let init = KeyboardEventInit::new();
                init.set_key(key.key());
                let dispatched = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
                    .and_then(|forwarded| host.dispatch_event(&forwarded));
                if let Err(err) = dispatched {
                    log::warn!("forwarding {}: {:?}", key.key(), err);
                }
            }) as Box<dyn FnMut(KeyboardEvent)>))
        };

        let registration = {
            let controller = Rc::clone(&controller);
            let frame = frame.clone();
            let forwarder = Rc::clone(&forwarder);
            Closure::wrap(Box::new(move || {
                let function: &js_sys::Function = (*forwarder).as_ref().unchecked_ref();
                if let Err(err) = register(&controller, &frame, function) {
                    log::error!("frame registration failed: {}", err);
                }
            }) as Box<dyn FnMut()>)
        };

        Ok(WasmPager {
            controller,
            frame,
            forwarder,
            registration,
            _listeners: listeners,
        })
    }
}

/// Serializable pager state for JS
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagerSnapshot {
    pub current_page: u32,
    pub max_page: u32,
    pub toc: Option<Vec<String>>,
    pub target: Option<String>,
}
