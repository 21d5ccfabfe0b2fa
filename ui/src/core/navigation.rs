//! Concept navigation events and the bus that carries them.
//!
//! Widgets never read the URL fragment on their own. The host bridges
//! `hashchange` into a [`NavigationBus`], navigation controls publish clicks
//! straight onto it, and each widget subscribes with the identifiers it owns.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use serde::{Deserialize, Serialize};

/// Reserved identifier of the discipline overview.
pub const OVERVIEW_ID: &str = "overview";

/// Opaque, URL-safe concept identifier. Used verbatim as cache key and
/// query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptId(String);

impl ConceptId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn overview() -> Self {
        Self(OVERVIEW_ID.to_string())
    }

    /// Derives the identifier named by a URL fragment, `"overview"` when the
    /// fragment is missing or empty.
    pub fn from_fragment(fragment: Option<&str>) -> Self {
        let raw = fragment.unwrap_or_default();
        let trimmed = raw.strip_prefix('#').unwrap_or(raw).trim();
        if trimmed.is_empty() {
            Self::overview()
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn is_overview(&self) -> bool {
        self.0 == OVERVIEW_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::borrow::Borrow<str> for ConceptId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// What prompted a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCause {
    /// A navigation control was clicked.
    Click,
    /// The widget mounted and read the current fragment.
    InitialLoad,
    /// Browser back/forward changed the fragment.
    History,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    pub id: ConceptId,
    pub cause: NavigationCause,
}

impl NavigationEvent {
    pub fn new(id: ConceptId, cause: NavigationCause) -> Self {
        Self { id, cause }
    }
}

struct Subscriber {
    owned: HashSet<ConceptId>,
    tx: UnboundedSender<NavigationEvent>,
}

/// Single-threaded fan-out of [`NavigationEvent`]s to the widgets owning the
/// named identifier. Cheap to clone; clones share subscribers.
#[derive(Clone, Default)]
pub struct NavigationBus {
    subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl NavigationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers interest in `owned`. Dropping the receiver unsubscribes on
    /// the next publish.
    pub fn subscribe(
        &self,
        owned: impl IntoIterator<Item = ConceptId>,
    ) -> UnboundedReceiver<NavigationEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.borrow_mut().push(Subscriber {
            owned: owned.into_iter().collect(),
            tx,
        });
        rx
    }

    /// Delivers `event` to every live subscriber owning its identifier and
    /// returns how many received it.
    pub fn publish(&self, event: NavigationEvent) -> usize {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|sub| !sub.tx.is_closed());

        let mut delivered = 0;
        for sub in subscribers.iter() {
            if sub.owned.contains(&event.id) && sub.tx.unbounded_send(event.clone()).is_ok() {
                delivered += 1;
            }
        }
        if delivered == 0 {
            tracing::debug!(id = %event.id, "navigation event has no owner");
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .borrow()
            .iter()
            .filter(|sub| !sub.tx.is_closed())
            .count()
    }
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static NATIVE_FRAGMENT: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// The current URL fragment without the leading `#`, if any.
pub fn current_fragment() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let hash = web_sys::window()?.location().hash().ok()?;
        let trimmed = hash.trim_start_matches('#');
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        NATIVE_FRAGMENT.with(|f| f.borrow().clone())
    }
}

/// Records `id` as the URL fragment with `history.pushState`, which adds a
/// history entry without firing `hashchange`.
pub fn push_fragment(id: &ConceptId) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return;
        };
        let url = format!("#{id}");
        if let Err(err) =
            history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
        {
            tracing::warn!(?err, %id, "pushState failed");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        NATIVE_FRAGMENT.with(|f| *f.borrow_mut() = Some(id.to_string()));
    }
}

/// Forwards browser back/forward fragment changes onto `bus` for the rest of
/// the page's life.
pub fn bridge_fragment_changes(bus: NavigationBus) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        let Some(window) = web_sys::window() else {
            return;
        };
        let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            let id = ConceptId::from_fragment(current_fragment().as_deref());
            bus.publish(NavigationEvent::new(id, NavigationCause::History));
        });
        if let Err(err) = window
            .add_event_listener_with_callback("hashchange", listener.as_ref().unchecked_ref())
        {
            tracing::warn!(?err, "could not listen for hashchange");
            return;
        }
        listener.forget();
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = bus;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(id: &str) -> NavigationEvent {
        NavigationEvent::new(ConceptId::new(id), NavigationCause::Click)
    }

    #[test]
    fn empty_fragment_means_overview() {
        assert!(ConceptId::from_fragment(None).is_overview());
        assert!(ConceptId::from_fragment(Some("")).is_overview());
        assert!(ConceptId::from_fragment(Some("#")).is_overview());
        assert_eq!(
            ConceptId::from_fragment(Some("#dot-product")).as_str(),
            "dot-product"
        );
    }

    #[test]
    fn events_reach_only_owning_subscribers() {
        let bus = NavigationBus::new();
        let mut algebra = bus.subscribe([ConceptId::overview(), ConceptId::new("dot-product")]);
        let mut trig = bus.subscribe([ConceptId::new("unit-circle")]);

        assert_eq!(bus.publish(click("dot-product")), 1);
        assert_eq!(bus.publish(click("unit-circle")), 1);
        assert_eq!(bus.publish(click("limits")), 0);

        assert_eq!(algebra.try_recv().unwrap(), click("dot-product"));
        assert!(algebra.try_recv().is_err());
        assert_eq!(trig.try_recv().unwrap(), click("unit-circle"));
    }

    #[test]
    fn dropped_receivers_are_pruned() {
        let bus = NavigationBus::new();
        let rx = bus.subscribe([ConceptId::overview()]);
        assert_eq!(bus.subscriber_count(), 1);
        drop(rx);
        assert_eq!(bus.publish(click(OVERVIEW_ID)), 0);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn concept_ids_look_up_by_str() {
        let bus = NavigationBus::new();
        let rx = bus.subscribe([ConceptId::new("limits")]);
        assert_eq!(bus.subscriber_count(), 1);
        let ids: HashSet<ConceptId> = [ConceptId::new("limits")].into_iter().collect();
        assert!(ids.contains("limits"));
        drop(rx);
    }

    #[test]
    fn pushed_fragment_reads_back() {
        push_fragment(&ConceptId::new("cross-product"));
        assert_eq!(current_fragment().as_deref(), Some("cross-product"));
    }
}
