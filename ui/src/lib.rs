//! Shared UI crate for the MathYou widgets: the concept viewer, practice
//! problems, login modal and site header, plus the platform glue they share.

pub mod auth;
pub mod content;
pub mod core;
pub mod i18n;
pub mod practice;
pub mod views;

pub mod components {
    mod remount;
    mod site_navbar;
    pub use remount::Remount;
    pub use site_navbar::SiteNavbar;
}
