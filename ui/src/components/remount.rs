use dioxus::prelude::*;

/// Wraps `children` in a `div` that is thrown away and rebuilt whenever
/// `epoch` changes.
///
/// Keys only take effect between list siblings, so the wrapper is rendered
/// as a one-item keyed list. Markup that a script rewrote in place (KaTeX
/// swaps text nodes for its own spans) is then replaced rather than patched.
#[component]
pub fn Remount(epoch: u64, #[props(into)] class: String, children: Element) -> Element {
    rsx! {
        for epoch in std::iter::once(epoch) {
            div { key: "{epoch}", class: "{class}", {children.clone()} }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use dioxus::dioxus_core::{Mutation, ScopeId};

    use super::*;

    thread_local! {
        static EPOCH: Cell<u64> = const { Cell::new(0) };
        static LABEL: Cell<&'static str> = const { Cell::new("first") };
    }

    fn app() -> Element {
        let epoch = EPOCH.with(Cell::get);
        let label = LABEL.with(Cell::get);
        rsx! {
            Remount { epoch, class: "body",
                p { "{label}" }
            }
        }
    }

    fn rerender(dom: &mut VirtualDom) -> Vec<Mutation> {
        dom.mark_dirty(ScopeId::APP);
        dom.render_immediate_to_vec().edits
    }

    #[test]
    fn same_epoch_patches_and_new_epoch_rebuilds() {
        EPOCH.with(|e| e.set(0));
        LABEL.with(|l| l.set("first"));
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        assert!(dioxus_ssr::render(&dom).contains("first"));

        LABEL.with(|l| l.set("second"));
        let edits = rerender(&mut dom);
        assert!(edits
            .iter()
            .any(|m| matches!(m, Mutation::SetText { value, .. } if value == "second")));
        assert!(!edits
            .iter()
            .any(|m| matches!(m, Mutation::LoadTemplate { .. })));

        EPOCH.with(|e| e.set(1));
        LABEL.with(|l| l.set("third"));
        let edits = rerender(&mut dom);
        assert!(!edits.iter().any(|m| matches!(m, Mutation::SetText { .. })));
        assert!(edits
            .iter()
            .any(|m| matches!(m, Mutation::LoadTemplate { .. })));
        assert!(dioxus_ssr::render(&dom).contains("third"));
    }
}
