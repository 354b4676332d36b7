//! PHP backend client
//!
//! Implements `StorefrontApi` against `products.php` and
//! `upload-designs.php`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use crate::config::ApiSettings;
use crate::domain::{DesignFile, TemplateId, UploadedDesign};
use super::http_client::HttpClient;
use super::models::{ApiEnvelope, BaseProduct, ProductsData, UploadData};
use super::traits::{ApiError, ApiResult, StorefrontApi};

/// Client for the storefront's PHP endpoints
pub struct PhpBackend {
    http: HttpClient,
    products_endpoint: String,
    upload_endpoint: String,
}

impl PhpBackend {
    pub fn new(settings: &ApiSettings) -> ApiResult<Self> {
        let http = HttpClient::new(settings)?;
        info!(base_url = %http.base_url(), "Backend client configured");

        Ok(PhpBackend {
            http,
            products_endpoint: settings.products_endpoint.clone(),
            upload_endpoint: settings.upload_endpoint.clone(),
        })
    }

    fn design_form(file: &DesignFile, product_id: Option<TemplateId>) -> ApiResult<Form> {
        let part = Part::stream(file.content.clone())
            .file_name(file.filename.clone())
            .mime_str(&file.mime_type)?;

        let mut form = Form::new().part("design_file", part);
        if let Some(id) = product_id {
            form = form.text("product_id", id.to_string());
        }
        Ok(form)
    }

    /// Unwrap a products response; an empty list counts as a failure
    fn products_from(envelope: ApiEnvelope<ProductsData>) -> ApiResult<Vec<BaseProduct>> {
        let products = envelope.into_data()?.products;
        if products.is_empty() {
            return Err(ApiError::EmptyCatalog);
        }
        Ok(products)
    }

    fn design_from(envelope: ApiEnvelope<UploadData>) -> ApiResult<UploadedDesign> {
        envelope.into_data()?.into_design()
    }
}

#[async_trait]
impl StorefrontApi for PhpBackend {
    async fn fetch_products(&self) -> ApiResult<Vec<BaseProduct>> {
        let envelope: ApiEnvelope<ProductsData> = self.http.get_json(&self.products_endpoint).await?;
        let products = Self::products_from(envelope)?;

        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    async fn upload_design(
        &self,
        file: &DesignFile,
        product_id: Option<TemplateId>,
    ) -> ApiResult<UploadedDesign> {
        let form = Self::design_form(file, product_id)?;

        debug!(
            filename = %file.filename,
            size = file.size(),
            product_id = ?product_id,
            "Uploading design"
        );

        let envelope: ApiEnvelope<UploadData> = self.http.post_multipart(&self.upload_endpoint, form).await?;
        Self::design_from(envelope)
    }
}
