//! Storefront backend integration
//!
//! The backend is an external PHP service exposing a product list and a
//! design upload endpoint. The core depends only on the `StorefrontApi`
//! trait; `PhpBackend` is the HTTP implementation.

pub mod traits;
pub mod http_client;
pub mod models;
mod client;

pub use traits::{ApiError, ApiResult, StorefrontApi};
pub use http_client::HttpClient;
pub use models::BaseProduct;
pub use client::PhpBackend;
