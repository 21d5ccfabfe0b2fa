//! Practice-problem widget.

pub mod answer;
pub mod machine;

mod view;
pub use view::{PracticeProblem, PracticeProblemList};
