//! Login modal and the signed-in signal it raises.

pub mod state;

mod view;
pub use view::{LoginModal, LOGIN_SUCCESS_EVENT};
