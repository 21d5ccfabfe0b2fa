//! Platform glue and small building blocks shared by every widget.

pub mod config;
pub mod context;
pub mod format;
pub mod navigation;
pub mod platform;
pub mod readiness;
pub mod timing;
pub mod typeset;
