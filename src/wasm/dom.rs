//! DOM implementations of the host traits

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlDocument, HtmlElement, HtmlIFrameElement, HtmlInputElement, Node,
    Window,
};

use crate::config::{ControlSet, FragmentTransfer};
use crate::error::{PagerError, Result};
use crate::input::Focus;
use crate::persist::{self, Browser};
use crate::render::{Control, PagerView};
use crate::tabs::{ConditionalFragment, ContentDocument, TabBar};

/// Id of the tab bar's own stylesheet; ours goes right after it.
const TAB_BAR_STYLESHEET: &str = "style#injected-stylesheet-curvy-tabs";

#[wasm_bindgen]
extern "C" {
    /// Tab bar object supplied by the host page.
    pub type JsTabBar;

    #[wasm_bindgen(method)]
    fn paint(this: &JsTabBar);

    #[wasm_bindgen(method)]
    fn reset(this: &JsTabBar);

    #[wasm_bindgen(method)]
    fn show(this: &JsTabBar, name: &str);

    #[wasm_bindgen(method)]
    fn select(this: &JsTabBar, tab: &Element);

    #[wasm_bindgen(method, catch, js_name = getTab)]
    fn get_tab(this: &JsTabBar, name: &str) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(method, getter)]
    fn container(this: &JsTabBar) -> Element;
}

fn js_err(value: JsValue) -> PagerError {
    PagerError::js(&value)
}

fn missing(selector: &str) -> PagerError {
    PagerError::MissingElement {
        selector: selector.to_string(),
    }
}

/// Add `<style id="injected-stylesheet-{id}">` to `document` once.
pub fn inject_stylesheet(document: &Document, id: &str, css: &str) -> Result<()> {
    let id = format!("injected-stylesheet-{}", id);
    let head = document.head().ok_or_else(|| missing("head"))?;
    if head
        .query_selector(&format!("style#{}", id))
        .map_err(js_err)?
        .is_some()
    {
        return Ok(());
    }

    let reference = head
        .query_selector(TAB_BAR_STYLESHEET)
        .map_err(js_err)?
        .and_then(|el| el.next_element_sibling())
        .map(Node::from);

    let style = document.create_element("style").map_err(js_err)?;
    style.set_id(&id);
    style.set_inner_html(css);
    head.insert_before(&style, reference.as_ref())
        .map_err(js_err)?;
    Ok(())
}

/// First `src`-less frame in `container` that is displayed.
pub fn find_content_frame(window: &Window, container: &Element) -> Result<HtmlIFrameElement> {
    let frames = container
        .query_selector_all("iframe:not([src])")
        .map_err(js_err)?;
    for index in 0..frames.length() {
        let Some(frame) = frames
            .item(index)
            .and_then(|node| node.dyn_into::<HtmlIFrameElement>().ok())
        else {
            continue;
        };
        let display = window
            .get_computed_style(&frame)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("display").ok())
            .unwrap_or_default();
        if display != "none" {
            return Ok(frame);
        }
    }
    Err(PagerError::NoContentFrame)
}

/// Classify the focused element of `document`.
pub fn focus_of(document: &Document) -> Focus {
    match document.active_element() {
        Some(el) => {
            let input_type = el.dyn_ref::<HtmlInputElement>().map(|input| input.type_());
            Focus::from_element(&el.tag_name(), input_type.as_deref())
        }
        None => Focus::Other,
    }
}

/// `document.cookie`, or empty when unavailable.
pub fn cookie_header(document: &Document) -> String {
    document
        .dyn_ref::<HtmlDocument>()
        .and_then(|doc| doc.cookie().ok())
        .unwrap_or_default()
}

/// The host page's tab bar.
pub struct DomTabBar {
    inner: JsTabBar,
}

impl DomTabBar {
    pub fn new(inner: JsTabBar) -> Self {
        Self { inner }
    }

    pub fn container(&self) -> Element {
        self.inner.container()
    }
}

impl TabBar for DomTabBar {
    type Tab = Element;
    type Fragment = Element;

    fn paint(&mut self) {
        self.inner.paint();
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn show(&mut self, name: &str) {
        self.inner.show(name);
    }

    fn select(&mut self, tab: &Element) {
        self.inner.select(tab);
    }

    fn get_tab(&self, name: &str) -> Option<Element> {
        self.inner
            .get_tab(name)
            .ok()
            .and_then(|tab| tab.dyn_into::<Element>().ok())
    }

    fn fill_companion(
        &mut self,
        tab: &Element,
        fragment: &Element,
        transfer: FragmentTransfer,
    ) -> Result<()> {
        let body = tab
            .query_selector("iframe")
            .map_err(js_err)?
            .and_then(|el| el.dyn_into::<HtmlIFrameElement>().ok())
            .and_then(|frame| frame.content_document())
            .and_then(|doc| doc.body())
            .ok_or_else(|| missing("iframe body"))?;

        match transfer {
            FragmentTransfer::Copy => body.set_inner_html(&fragment.inner_html()),
            FragmentTransfer::Move => {
                body.set_inner_html("");
                // Snapshot first: the live collection shrinks as nodes move.
                let children = fragment.children();
                let nodes: Vec<Element> = (0..children.length())
                    .filter_map(|i| children.item(i))
                    .collect();
                for node in nodes {
                    body.append_child(&node).map_err(js_err)?;
                }
            }
        }
        Ok(())
    }
}

/// Pager chrome injected into the host container.
pub struct DomView {
    slider: HtmlInputElement,
    current: HtmlElement,
    max: HtmlElement,
    buttons: Vec<(Control, Element)>,
}

impl DomView {
    /// Find the injected elements inside `container`.
    pub fn bind(container: &Element, controls: ControlSet) -> Result<Self> {
        let slider = container
            .query_selector(".page-slider")
            .map_err(js_err)?
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .ok_or_else(|| missing(".page-slider"))?;

        let numbers = container
            .query_selector_all(".page-number")
            .map_err(js_err)?;
        let number = |index: u32| {
            numbers
                .item(index)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
                .ok_or_else(|| missing(".page-number"))
        };
        let current = number(0)?;
        let max = number(1)?;

        let mut buttons = Vec::with_capacity(controls.controls().len());
        for &control in controls.controls() {
            let selector = format!(".page-button[data-control=\"{}\"]", control.key());
            let button = container
                .query_selector(&selector)
                .map_err(js_err)?
                .ok_or_else(|| missing(&selector))?;
            buttons.push((control, button));
        }

        Ok(Self {
            slider,
            current,
            max,
            buttons,
        })
    }

    pub fn slider(&self) -> &HtmlInputElement {
        &self.slider
    }

    pub fn buttons(&self) -> &[(Control, Element)] {
        &self.buttons
    }
}

impl PagerView for DomView {
    fn set_max_page(&mut self, max_page: u32) {
        let text = max_page.to_string();
        self.max.set_inner_text(&text);
        self.slider.set_max(&text);
    }

    fn set_current_page(&mut self, page: u32) {
        let text = page.to_string();
        self.current.set_inner_text(&text);
        self.slider.set_value(&text);
    }

    fn set_control_enabled(&mut self, control: Control, enabled: bool) {
        let Some((_, button)) = self.buttons.iter().find(|(c, _)| *c == control) else {
            return;
        };
        if let Err(err) = button
            .class_list()
            .toggle_with_force(control.enabled_class(), enabled)
        {
            log::warn!("toggling {:?}: {:?}", control, err);
        }
    }
}

/// Host window plus the content frame's window.
pub struct DomBrowser {
    window: Window,
    frame: Window,
}

impl DomBrowser {
    pub fn new(window: Window, frame: Window) -> Self {
        Self { window, frame }
    }
}

impl Browser for DomBrowser {
    fn navigate_frame(&mut self, url: &str) {
        if let Err(err) = self.frame.location().set_href(url) {
            log::warn!("navigating frame to {}: {:?}", url, err);
        }
    }

    fn push_history(&mut self, param: &str, page: u32) {
        let location = self.window.location();
        let (Ok(origin), Ok(pathname)) = (location.origin(), location.pathname()) else {
            log::warn!("location unavailable; history not updated");
            return;
        };
        let url = persist::history_url(&origin, &pathname, param, page);
        let pushed = self
            .window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(&url)));
        if let Err(err) = pushed {
            log::warn!("pushing {}: {:?}", url, err);
        }
    }

    fn write_cookie(&mut self, name: &str, value: &str, days: u32) {
        let expires = js_sys::Date::new(&JsValue::from_f64(persist::expiry_millis(
            persist::now_millis(),
            days,
        )));
        let cookie = persist::cookie_string(name, value, &String::from(expires.to_utc_string()));
        let written = self
            .window
            .document()
            .and_then(|doc| doc.dyn_into::<HtmlDocument>().ok())
            .map(|doc| doc.set_cookie(&cookie));
        match written {
            Some(Ok(())) => {}
            Some(Err(err)) => log::warn!("writing cookie {}: {:?}", name, err),
            None => log::warn!("no HTML document; cookie {} not written", name),
        }
    }
}

/// The document loaded in the content frame at registration time.
pub struct DomDocument<'a> {
    document: Document,
    window: Window,
    forwarder: &'a js_sys::Function,
}

impl<'a> DomDocument<'a> {
    /// `forwarder` is the pager's single key-forwarding callback.
    pub fn from_frame(frame: &Window, forwarder: &'a js_sys::Function) -> Result<Self> {
        let document = frame.document().ok_or(PagerError::NoContentFrame)?;
        Ok(Self {
            document,
            window: frame.clone(),
            forwarder,
        })
    }
}

impl ContentDocument for DomDocument<'_> {
    type Fragment = Element;

    fn inject_stylesheet(&self, id: &str, css: &str) -> Result<()> {
        inject_stylesheet(&self.document, id, css)
    }

    fn forward_paging_keys(&self) -> Result<()> {
        // Re-adding the same function object is a no-op in the DOM.
        self.window
            .add_event_listener_with_callback("keydown", self.forwarder)
            .map_err(js_err)
    }

    fn conditional_fragments(&self, class_name: &str) -> Vec<ConditionalFragment<Element>> {
        let found = self.document.get_elements_by_class_name(class_name);
        (0..found.length())
            .filter_map(|i| found.item(i))
            .map(|el| ConditionalFragment {
                tab_name: el.get_attribute("name").unwrap_or_default(),
                content: el,
            })
            .collect()
    }
}
