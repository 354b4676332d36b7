//! Contract for the storefront backend
//!
//! The core only ever talks to the backend through `StorefrontApi`, so the
//! HTTP implementation can be swapped for an in-memory one in tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{DesignFile, TemplateId, UploadedDesign};
use super::models::BaseProduct;

// ============================================================================
// Error Types
// ============================================================================

/// Backend error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    /// The backend answered but reported `success: false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("No products returned from API")]
    EmptyCatalog,
}

/// Result type for backend operations
pub type ApiResult<T> = Result<T, ApiError>;

// ============================================================================
// Backend Trait
// ============================================================================

#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Fetch the product list. Callers only use the first entry.
    async fn fetch_products(&self) -> ApiResult<Vec<BaseProduct>>;

    /// Upload a design file, optionally tagged with the template it is for
    async fn upload_design(
        &self,
        file: &DesignFile,
        product_id: Option<TemplateId>,
    ) -> ApiResult<UploadedDesign>;
}
