//! DOM draw target.

use leptos::*;
use wasm_bindgen::JsValue;

use crashviz::render::{DrawTarget, RenderError, RenderResult};

/// A `<div>` a renderer mounts its SVG into
pub struct DomTarget {
    id: &'static str,
    node: NodeRef<html::Div>,
}

impl DomTarget {
    pub fn new(id: &'static str, node: NodeRef<html::Div>) -> Self {
        Self { id, node }
    }

    fn element(&self) -> RenderResult<HtmlElement<html::Div>> {
        self.node
            .get_untracked()
            .ok_or_else(|| RenderError::target(self.id, "container is not mounted"))
    }
}

impl DrawTarget for DomTarget {
    fn id(&self) -> &str {
        self.id
    }

    fn clear(&mut self) -> RenderResult<()> {
        self.element()?.set_inner_html("");
        Ok(())
    }

    fn mount(&mut self, markup: &str) -> RenderResult<()> {
        self.element()?.set_inner_html(markup);
        Ok(())
    }
}

/// Report a draw failure on the browser console
pub fn report_error(chart: &str, error: &RenderError) {
    let message = format!("{} failed: {}", chart, error);
    web_sys::console::error_1(&JsValue::from_str(&message));
}
