use crate::models::BlockId;
use wasm_bindgen::JsCast;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

impl From<web_sys::DomRect> for Rect {
    fn from(r: web_sys::DomRect) -> Self {
        Self::new(r.left(), r.top(), r.width(), r.height())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectionInfo {
    pub collapsed: bool,
    /// Viewport-relative bounding box of the first range.
    pub rect: Rect,
}

/// An editable text region as the interaction controller sees it.
pub trait TextSurface {
    /// Plain text, used for the empty check and the slash trigger.
    fn text_content(&self) -> String;

    /// Inline markup, which is what the store keeps.
    fn html_content(&self) -> String;

    /// Viewport-relative box of the region.
    fn region_rect(&self) -> Rect;

    fn scroll_y(&self) -> f64;

    fn selection(&self) -> Option<SelectionInfo>;

    /// Focus the region and collapse the caret to its end.
    fn focus_at_end(&self);
}

/// `TextSurface` over a live contentEditable element.
#[derive(Clone)]
pub struct DomSurface {
    el: web_sys::HtmlElement,
}

impl DomSurface {
    pub fn new(el: web_sys::HtmlElement) -> Self {
        Self { el }
    }

    /// Look up a block's editable region by its DOM id.
    pub fn for_block(id: &BlockId) -> Option<Self> {
        web_sys::window()?
            .document()?
            .get_element_by_id(&id.dom_id())?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()
            .map(Self::new)
    }

    pub fn element(&self) -> &web_sys::HtmlElement {
        &self.el
    }

    pub fn set_html(&self, html: &str) {
        if self.el.inner_html() != html {
            self.el.set_inner_html(html);
        }
    }
}

impl TextSurface for DomSurface {
    fn text_content(&self) -> String {
        self.el.text_content().unwrap_or_default()
    }

    fn html_content(&self) -> String {
        self.el.inner_html()
    }

    fn region_rect(&self) -> Rect {
        self.el.get_bounding_client_rect().into()
    }

    fn scroll_y(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.scroll_y().ok())
            .unwrap_or(0.0)
    }

    fn selection(&self) -> Option<SelectionInfo> {
        let sel = web_sys::window()?.get_selection().ok().flatten()?;
        if sel.is_collapsed() || sel.range_count() == 0 {
            return Some(SelectionInfo {
                collapsed: true,
                rect: Rect::default(),
            });
        }
        let range = sel.get_range_at(0).ok()?;
        Some(SelectionInfo {
            collapsed: false,
            rect: range.get_bounding_client_rect().into(),
        })
    }

    fn focus_at_end(&self) {
        let _ = self.el.focus();

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let Ok(range) = document.create_range() else {
            return;
        };
        if range.select_node_contents(&self.el).is_err() {
            return;
        }
        range.collapse_with_to_start(false);

        if let Ok(Some(sel)) = window.get_selection() {
            let _ = sel.remove_all_ranges();
            let _ = sel.add_range(&range);
        }
    }
}
