//! Print-Shop
//!
//! Storefront core for custom printed apparel: loads product templates from
//! the shop backend, runs the customization session for the selected
//! template (quality, size, design upload, personalization) and keeps the
//! shopping cart. Rendering is left to the host; every user action returns
//! plain data or a `Notification`.

pub mod backend;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod domain;
pub mod session;
pub mod storefront;

pub use storefront::{Notification, NotificationKind, Storefront, StorefrontError};
