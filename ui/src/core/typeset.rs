//! Bridge to KaTeX's `renderMathInElement`.
//!
//! When the renderer never loads, widgets keep showing raw markup with the
//! TeX delimiters intact. That is the degraded state, not an error.

use super::readiness::MathReadiness;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter {
    pub left: &'static str,
    pub right: &'static str,
    pub display: bool,
}

/// Delimiters recognised in concept and overview content.
pub const CONTENT_DELIMITERS: &[Delimiter] = &[
    Delimiter { left: "$$", right: "$$", display: true },
    Delimiter { left: "$", right: "$", display: false },
    Delimiter { left: "\\(", right: "\\)", display: false },
    Delimiter { left: "\\[", right: "\\]", display: true },
];

/// Delimiters recognised in practice problems and grading feedback.
pub const PROBLEM_DELIMITERS: &[Delimiter] = &[
    Delimiter { left: "$", right: "$", display: false },
    Delimiter { left: "$$", right: "$$", display: true },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypesetOutcome {
    Rendered,
    /// The renderer or the target element is missing.
    Unavailable,
}

/// Handle the widgets receive through context.
#[derive(Clone, Default)]
pub struct MathRenderer {
    readiness: MathReadiness,
}

impl MathRenderer {
    pub fn new(readiness: MathReadiness) -> Self {
        Self { readiness }
    }

    pub fn readiness(&self) -> &MathReadiness {
        &self.readiness
    }

    /// Waits for the renderer, then typesets the element with DOM id `element_id`.
    pub async fn typeset(&self, element_id: &str, delimiters: &[Delimiter]) -> TypesetOutcome {
        if !self.readiness.wait().await {
            return TypesetOutcome::Unavailable;
        }
        render_math_in_element(element_id, delimiters)
    }
}

#[cfg(target_arch = "wasm32")]
fn render_math_in_element(element_id: &str, delimiters: &[Delimiter]) -> TypesetOutcome {
    use js_sys::{Array, Function, Object, Reflect};
    use wasm_bindgen::{JsCast, JsValue};

    let Some(window) = web_sys::window() else {
        return TypesetOutcome::Unavailable;
    };
    let Some(render) = Reflect::get(&window, &JsValue::from_str("renderMathInElement"))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
    else {
        return TypesetOutcome::Unavailable;
    };
    let Some(element) = window
        .document()
        .and_then(|doc| doc.get_element_by_id(element_id))
    else {
        tracing::debug!(element_id, "typeset target not mounted");
        return TypesetOutcome::Unavailable;
    };

    let list = Array::new();
    for delimiter in delimiters {
        let entry = Object::new();
        let _ = Reflect::set(&entry, &"left".into(), &delimiter.left.into());
        let _ = Reflect::set(&entry, &"right".into(), &delimiter.right.into());
        let _ = Reflect::set(&entry, &"display".into(), &delimiter.display.into());
        list.push(&entry);
    }
    let options = Object::new();
    let _ = Reflect::set(&options, &"delimiters".into(), &list);
    let _ = Reflect::set(&options, &"throwOnError".into(), &false.into());

    match render.call2(&JsValue::NULL, &element, &options) {
        Ok(_) => TypesetOutcome::Rendered,
        Err(err) => {
            tracing::warn!(?err, element_id, "renderMathInElement threw");
            TypesetOutcome::Unavailable
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn render_math_in_element(element_id: &str, delimiters: &[Delimiter]) -> TypesetOutcome {
    tracing::debug!(element_id, delimiters = delimiters.len(), "no math renderer off the web");
    TypesetOutcome::Unavailable
}

/// Resolves `readiness` as soon as KaTeX's auto-render extension is usable:
/// immediately if it already is, otherwise on the `load` event of the
/// `<script id="katex-auto-render">` tag. Abandons it when that can never
/// happen, so typeset tasks finish with [`TypesetOutcome::Unavailable`].
pub fn watch_math_renderer(readiness: &MathReadiness) {
    #[cfg(target_arch = "wasm32")]
    {
        use js_sys::{Function, Reflect};
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::{JsCast, JsValue};

        let Some(window) = web_sys::window() else {
            readiness.abandon();
            return;
        };
        let present = Reflect::get(&window, &JsValue::from_str("renderMathInElement"))
            .map(|f| f.is_instance_of::<Function>())
            .unwrap_or(false);
        if present {
            readiness.resolve();
            return;
        }

        let Some(script) = window
            .document()
            .and_then(|doc| doc.get_element_by_id("katex-auto-render"))
        else {
            tracing::warn!("KaTeX auto-render script not found; math stays unrendered");
            readiness.abandon();
            return;
        };
        let on_load = {
            let readiness = readiness.clone();
            Closure::once_into_js(move || readiness.resolve())
        };
        let on_error = {
            let readiness = readiness.clone();
            Closure::once_into_js(move || {
                tracing::warn!("KaTeX auto-render script failed to load");
                readiness.abandon();
            })
        };
        let watched = script
            .add_event_listener_with_callback("load", on_load.unchecked_ref())
            .and_then(|()| script.add_event_listener_with_callback("error", on_error.unchecked_ref()));
        if let Err(err) = watched {
            tracing::warn!(?err, "could not watch KaTeX script");
            readiness.abandon();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        readiness.abandon();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn content_delimiters_prefer_display_dollars() {
        assert_eq!(CONTENT_DELIMITERS[0].left, "$$");
        assert!(CONTENT_DELIMITERS[0].display);
        assert_eq!(CONTENT_DELIMITERS.len(), 4);
    }

    #[test]
    fn native_typesetting_degrades() {
        let renderer = MathRenderer::new(MathReadiness::resolved());
        let outcome = block_on(renderer.typeset("concept-1", CONTENT_DELIMITERS));
        assert_eq!(outcome, TypesetOutcome::Unavailable);
    }

    #[test]
    fn unwatchable_renderer_does_not_block_typesetting() {
        let readiness = MathReadiness::pending();
        let renderer = MathRenderer::new(readiness.clone());
        watch_math_renderer(&readiness);
        let outcome = block_on(renderer.typeset("overview", CONTENT_DELIMITERS));
        assert_eq!(outcome, TypesetOutcome::Unavailable);
        assert!(!readiness.is_ready());
    }
}
