//! Navigation → cache → fetch → panel.
//!
//! [`ContentController`] is synchronous: navigating either resolves from the
//! cache immediately or hands back a [`FetchRequest`]. The caller runs
//! [`fetch`] wherever it likes and reports back through
//! [`ContentController::complete`], which drops results from superseded
//! generations on the floor (after caching them).

use std::collections::BTreeMap;

use api::{ApiError, ConceptPayload, ContentSource, OverviewPayload};
use tracing::{debug, warn};

use super::cache::{CachedContent, ContentCache};
use super::render::{ConceptView, Panel};
use super::view_state::{ViewState, ViewStateController};
use crate::core::navigation::{ConceptId, NavigationEvent};

/// A fetch the controller is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub id: ConceptId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Overview(OverviewPayload),
    Concept(ConceptPayload),
}

pub struct ContentController {
    discipline_id: String,
    problems: BTreeMap<String, Vec<String>>,
    view_state: ViewStateController,
    cache: ContentCache,
    panel: Panel,
    /// Bumped on every panel change; keys the rendered wrapper.
    render_epoch: u64,
}

impl ContentController {
    pub fn new(
        discipline_id: impl Into<String>,
        controls: impl IntoIterator<Item = ConceptId>,
        problems: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            discipline_id: discipline_id.into(),
            problems,
            view_state: ViewStateController::new(controls),
            cache: ContentCache::new(),
            panel: Panel::Loading { overview: true },
            render_epoch: 0,
        }
    }

    pub fn discipline_id(&self) -> &str {
        &self.discipline_id
    }

    pub fn view_state(&self) -> &ViewStateController {
        &self.view_state
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn render_epoch(&self) -> u64 {
        self.render_epoch
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    /// Applies a navigation event. Returns the fetch to perform on a cache miss.
    pub fn navigate(&mut self, event: &NavigationEvent) -> Option<FetchRequest> {
        let navigation = self.view_state.navigate_to(&event.id, event.cause)?;
        debug!(id = %navigation.id, generation = navigation.generation, cause = ?event.cause, "navigate");

        match self.cache.get(navigation.id.as_str()).cloned() {
            Some(content) => {
                let panel = self.panel_for(&navigation.id, &content);
                self.show(panel);
                None
            }
            None => {
                self.show(Panel::Loading {
                    overview: navigation.id.is_overview(),
                });
                Some(FetchRequest {
                    generation: navigation.generation,
                    id: navigation.id,
                })
            }
        }
    }

    /// Records the outcome of `request`. Successful payloads are cached even
    /// when stale; only the current generation changes the panel. Returns
    /// whether the panel changed.
    pub fn complete(&mut self, request: &FetchRequest, result: Result<Fetched, ApiError>) -> bool {
        let current = self.view_state.is_current(request.generation);
        match result {
            Ok(fetched) => {
                let content = match fetched {
                    Fetched::Overview(payload) => {
                        CachedContent::Overview(payload.overview.unwrap_or_default())
                    }
                    Fetched::Concept(payload) => CachedContent::Concept(payload),
                };
                let panel = self.panel_for(&request.id, &content);
                self.cache.put(request.id.clone(), content);
                if current {
                    self.show(panel);
                } else {
                    debug!(id = %request.id, generation = request.generation, "cached stale response");
                }
                current
            }
            Err(err) => {
                warn!(id = %request.id, error = %err, "content unavailable");
                if !current {
                    return false;
                }
                let panel = if request.id.is_overview() {
                    Panel::OverviewUnavailable
                } else {
                    Panel::ConceptUnavailable
                };
                self.show(panel);
                true
            }
        }
    }

    pub fn state(&self) -> ViewState {
        self.view_state.state()
    }

    fn show(&mut self, panel: Panel) {
        self.panel = panel;
        self.render_epoch += 1;
    }

    fn panel_for(&self, id: &ConceptId, content: &CachedContent) -> Panel {
        match content {
            CachedContent::Overview(text) => Panel::overview(text),
            CachedContent::Concept(payload) => {
                let problems = self.problems.get(id.as_str()).map(Vec::as_slice);
                Panel::Concept(ConceptView::from_payload(payload, problems))
            }
        }
    }
}

/// Performs `request` against `source`. The overview never touches the
/// concept endpoint.
pub async fn fetch<S: ContentSource>(
    source: &S,
    discipline_id: &str,
    request: &FetchRequest,
) -> Result<Fetched, ApiError> {
    if request.id.is_overview() {
        source
            .fetch_overview(discipline_id)
            .await
            .map(Fetched::Overview)
    } else {
        source
            .fetch_concept(discipline_id, request.id.as_str())
            .await
            .map(Fetched::Concept)
    }
}
