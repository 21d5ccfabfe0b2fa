mod discipline;
pub use discipline::{ConfigErrorPanel, DisciplinePage};
