//! Which of overview / concept is on screen, and which navigation control is
//! selected.

use crate::core::navigation::{ConceptId, NavigationCause};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Overview,
    Concept(ConceptId),
}

/// An accepted navigation, stamped with the request generation it opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub generation: u64,
    pub id: ConceptId,
}

impl Navigation {
    pub fn target(&self) -> ViewState {
        if self.id.is_overview() {
            ViewState::Overview
        } else {
            ViewState::Concept(self.id.clone())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewStateController {
    controls: Vec<ConceptId>,
    active: Option<ConceptId>,
    generation: u64,
}

impl ViewStateController {
    /// `controls` lists the navigation controls in display order. The
    /// overview control always exists and comes first.
    pub fn new(controls: impl IntoIterator<Item = ConceptId>) -> Self {
        let mut all = vec![ConceptId::overview()];
        for id in controls {
            if !all.contains(&id) {
                all.push(id);
            }
        }
        Self {
            controls: all,
            active: None,
            generation: 0,
        }
    }

    pub fn controls(&self) -> &[ConceptId] {
        &self.controls
    }

    pub fn owns(&self, id: &ConceptId) -> bool {
        self.controls.contains(id)
    }

    /// Makes `id` active and opens a new generation. Returns `None` when
    /// nothing should happen: `id` names no control, or a history event
    /// merely echoes the identifier already shown.
    pub fn navigate_to(&mut self, id: &ConceptId, cause: NavigationCause) -> Option<Navigation> {
        if !self.owns(id) {
            tracing::debug!(%id, "ignoring navigation to unknown concept");
            return None;
        }
        if cause == NavigationCause::History && self.active.as_ref() == Some(id) {
            return None;
        }

        self.active = Some(id.clone());
        self.generation += 1;
        Some(Navigation {
            generation: self.generation,
            id: id.clone(),
        })
    }

    pub fn active(&self) -> Option<&ConceptId> {
        self.active.as_ref()
    }

    pub fn is_selected(&self, id: &ConceptId) -> bool {
        self.active.as_ref() == Some(id)
    }

    pub fn state(&self) -> ViewState {
        match &self.active {
            Some(id) if !id.is_overview() => ViewState::Concept(id.clone()),
            _ => ViewState::Overview,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ViewStateController {
        ViewStateController::new([ConceptId::new("dot-product"), ConceptId::new("cross-product")])
    }

    #[test]
    fn overview_control_is_always_first() {
        let c = controller();
        assert_eq!(c.controls()[0], ConceptId::overview());
        assert_eq!(c.controls().len(), 3);
        assert_eq!(c.state(), ViewState::Overview);
    }

    #[test]
    fn selection_is_exclusive() {
        let mut c = controller();
        c.navigate_to(&ConceptId::new("dot-product"), NavigationCause::Click);
        assert!(c.is_selected(&ConceptId::new("dot-product")));
        c.navigate_to(&ConceptId::new("cross-product"), NavigationCause::Click);
        assert!(!c.is_selected(&ConceptId::new("dot-product")));
        assert!(c.is_selected(&ConceptId::new("cross-product")));
        assert_eq!(c.state(), ViewState::Concept(ConceptId::new("cross-product")));
    }

    #[test]
    fn unknown_identifiers_are_ignored() {
        let mut c = controller();
        c.navigate_to(&ConceptId::overview(), NavigationCause::InitialLoad);
        assert!(c
            .navigate_to(&ConceptId::new("eigenvalues"), NavigationCause::Click)
            .is_none());
        assert_eq!(c.active(), Some(&ConceptId::overview()));
        assert_eq!(c.generation(), 1);
    }

    #[test]
    fn history_echo_is_dropped_but_clicks_redispatch() {
        let mut c = controller();
        let id = ConceptId::new("dot-product");
        let first = c.navigate_to(&id, NavigationCause::Click).unwrap();
        assert!(c.navigate_to(&id, NavigationCause::History).is_none());
        let again = c.navigate_to(&id, NavigationCause::Click).unwrap();
        assert!(again.generation > first.generation);
        assert!(!c.is_current(first.generation));
        assert!(c.is_current(again.generation));
    }

    #[test]
    fn history_back_to_overview_switches_state() {
        let mut c = controller();
        c.navigate_to(&ConceptId::new("dot-product"), NavigationCause::InitialLoad);
        let nav = c
            .navigate_to(&ConceptId::overview(), NavigationCause::History)
            .unwrap();
        assert_eq!(nav.target(), ViewState::Overview);
        assert_eq!(c.state(), ViewState::Overview);
    }
}
