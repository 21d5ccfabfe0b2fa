//! The math-content viewer: concept navigation, cached fetching and
//! rendering of overview and concept panels.

pub mod cache;
pub mod loader;
pub mod render;
pub mod view_state;

mod view;
pub use view::{ConceptBody, ConceptNav, ContentPanel, MathContent, OverviewBody};
