//! Stylesheet and markup injected into the pager container

use crate::config::{ControlSet, GlyphSet};
use crate::render::Control;

/// Id suffix of the shared stylesheet; one copy per document.
pub const STYLESHEET_ID: &str = "curvy-tabs-pager";

pub const STYLESHEET: &str = r#"
.curvy-tabs-container iframe {
    position: absolute;
    top: 0;
    left: 0;
    width: 100%;
    height: calc(100% + 16px);
    border: 0;
}
.page-number {
    display: inline-block;
    width: 2em;
    text-align: center;
}
.page-slider {
    margin-left: .5em;
    width: 50px;
    vertical-align: middle;
}
.page-button {
    color: #d8d8d8;
    user-select: none;
    cursor: pointer;
    border: 1px solid transparent;
    border-radius: 5px;
    padding: 3px 5px 1px 5px;
}
.page-button-enabled-first, .page-button-enabled-prev,
.page-button-enabled-next, .page-button-enabled-last {
    color: black;
}
.page-button-enabled:hover, .page-button-enabled:active {
    border: 1px solid grey;
}
.page-button-enabled-first:active, .page-button-enabled-prev:active {
    padding-left: 3px;
    padding-right: 7px;
}
.page-button-enabled-next:active, .page-button-enabled-last:active {
    padding-left: 7px;
    padding-right: 3px;
}
"#;

impl GlyphSet {
    pub fn glyph(self, control: Control) -> &'static str {
        match (self, control) {
            (GlyphSet::Triangles, Control::First) => "&#x23ee;",
            (GlyphSet::Triangles, Control::Previous) => "&#x25c0;",
            (GlyphSet::Triangles, Control::Next) => "&#x25ba;",
            (GlyphSet::Triangles, Control::Last) => "&#x23ed;",
            (GlyphSet::Ascii, Control::First) => "|&lt;",
            (GlyphSet::Ascii, Control::Previous) => "&lt;",
            (GlyphSet::Ascii, Control::Next) => "&gt;",
            (GlyphSet::Ascii, Control::Last) => "&gt;|",
        }
    }
}

fn title(control: Control) -> &'static str {
    match control {
        Control::First => "Click to go to first page",
        Control::Previous => "Click to go to previous page (or press left-arrow key)",
        Control::Next => "Click to go to next page (or press right-arrow key)",
        Control::Last => "Click to go to last page",
    }
}

fn button(out: &mut String, control: Control, glyphs: GlyphSet) {
    out.push_str(&format!(
        "<span class=\"page-button page-button-enabled\" data-control=\"{}\" title=\"{}\">{}</span>\n",
        control.key(),
        title(control),
        glyphs.glyph(control),
    ));
}

/// Buttons, range control and counters, in visual order.
pub fn markup(controls: ControlSet, glyphs: GlyphSet, max_page: u32) -> String {
    let mut out = String::from("\n");
    let (backward, forward): (Vec<Control>, Vec<Control>) =
        controls.controls().iter().copied().partition(|c| c.is_backward());

    for control in backward {
        button(&mut out, control, glyphs);
    }
    out.push_str(&format!(
        "Page <input class=\"page-slider\" type=\"range\" min=\"1\" max=\"{}\" value=\"1\">\n",
        max_page
    ));
    out.push_str("<b class=\"page-number\"></b> of <b class=\"page-number\"></b>\n");
    for control in forward {
        button(&mut out, control, glyphs);
    }
    out
}
