//! Storefront
//!
//! The application shell: owns the backend client, the loaded catalog, the
//! customization session and the cart, and exposes one method per user
//! action. Every mutation goes through `&mut self`, so actions are applied
//! one at a time; a backend call holds the borrow until it resolves and its
//! result is applied only afterwards.

mod notification;

pub use notification::{Notification, NotificationKind};

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::backend::StorefrontApi;
use crate::cart::{CartError, CartLedger, LineItem, LineItemId, QuantityChange};
use crate::catalog::{CatalogLoader, TemplateCatalog};
use crate::checkout::{self, CheckoutError, OrderConfirmation, OrderProcessor};
use crate::domain::{DesignFile, GarmentSize, Money, PreviewMode, QualityTier, Template, TemplateId};
use crate::session::{
    ColorRole, CustomizationSession, ImageSlot, SessionError, TextField, UploadPolicy,
    ValidationError,
};

/// Failures surfaced to the user. None of them leave partial state behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorefrontError {
    #[error("Template not found: {0}")]
    TemplateNotFound(TemplateId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

impl From<&StorefrontError> for Notification {
    fn from(err: &StorefrontError) -> Self {
        Notification::error(err.to_string())
    }
}

pub struct Storefront<A: StorefrontApi> {
    api: A,
    catalog: TemplateCatalog,
    session: CustomizationSession,
    cart: CartLedger,
    policy: UploadPolicy,
}

impl<A: StorefrontApi> Storefront<A> {
    pub fn new(api: A, catalog: TemplateCatalog, policy: UploadPolicy) -> Self {
        Storefront {
            api,
            catalog,
            session: CustomizationSession::new(),
            cart: CartLedger::new(),
            policy,
        }
    }

    /// Load the catalog and return a ready storefront
    pub async fn bootstrap(api: A, policy: UploadPolicy) -> Self {
        let catalog = CatalogLoader::new(&api).load().await;
        info!(templates = catalog.len(), fallback = catalog.is_fallback(), "Storefront ready");
        Self::new(api, catalog, policy)
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn session(&self) -> &CustomizationSession {
        &self.session
    }

    pub fn cart(&self) -> &CartLedger {
        &self.cart
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    // ------------------------------------------------------------------
    // Designer
    // ------------------------------------------------------------------

    /// Open the designer for a template
    pub fn select_template(&mut self, id: TemplateId) -> Result<&Template, StorefrontError> {
        let template = self
            .catalog
            .get(id)
            .ok_or(StorefrontError::TemplateNotFound(id))?;
        self.session.open(template);

        self.session
            .template()
            .map(Arc::as_ref)
            .ok_or(StorefrontError::Session(SessionError::NoTemplate))
    }

    pub fn close_designer(&mut self) {
        self.session.close();
    }

    /// Pick a quality tier by name; returns the new price
    pub fn select_quality(&mut self, value: &str) -> Result<Money, StorefrontError> {
        let quality: QualityTier = value.parse().map_err(ValidationError::from)?;
        self.session.set_quality(quality);
        Ok(self.session.current_price())
    }

    pub fn select_size(&mut self, value: &str) -> Result<GarmentSize, StorefrontError> {
        let size: GarmentSize = value.parse().map_err(ValidationError::from)?;
        self.session.set_size(size);
        Ok(size)
    }

    pub fn toggle_preview(&mut self) -> PreviewMode {
        self.session.toggle_preview_mode()
    }

    /// Validate and upload a design for the open template.
    ///
    /// Validation failures abort before the backend is contacted. A failed
    /// upload is not an error: the design is kept as a local-only preview.
    pub async fn upload_design(&mut self, file: DesignFile) -> Result<Notification, StorefrontError> {
        let template = self.session.template().cloned().ok_or(SessionError::NoTemplate)?;
        let meta = file.meta();
        self.policy.check_design(&meta, Some(&template))?;

        match self.api.upload_design(&file, Some(template.id)).await {
            Ok(uploaded) => {
                info!(design_id = %uploaded.id, filename = %meta.filename, "Design uploaded");
                self.session.attach_design(&meta, Some(uploaded))?;
                Ok(Notification::success("Upload complete"))
            }
            Err(e) => {
                warn!(error = %e, filename = %meta.filename, "Upload failed or backend not available, using local-only design");
                self.session.attach_design(&meta, None)?;
                Ok(Notification::info("Preview only (not uploaded to server)"))
            }
        }
    }

    pub fn remove_design(&mut self) -> Notification {
        self.session.remove_design();
        Notification::success("Design removed.")
    }

    /// Attach a local image to one of the auxiliary slots
    pub fn attach_image(&mut self, slot: ImageSlot, file: &DesignFile) -> Result<Notification, StorefrontError> {
        let meta = file.meta();
        self.policy.check_image(slot, &meta)?;
        self.session.attach_image(slot, &meta)?;
        Ok(Notification::success("Image uploaded successfully!"))
    }

    pub fn remove_image(&mut self, slot: ImageSlot) -> Option<Notification> {
        self.session
            .remove_image(slot)
            .map(|_| Notification::success("Image removed."))
    }

    pub fn set_last_name(&mut self, value: &str) -> Result<Notification, StorefrontError> {
        self.require_open()?;
        let name = self.session.personalization_mut().set_last_name(value)?;
        Ok(Notification::success(format!("Last name set to \"{}\"", name)))
    }

    /// Set or clear the school or team name
    pub fn set_text(&mut self, field: TextField, value: &str) -> Result<Notification, StorefrontError> {
        self.require_open()?;
        let message = match self.session.personalization_mut().set_text(field, value) {
            Some(text) => format!("{} set to \"{}\"", field.label(), text),
            None => format!("{} cleared.", field.label()),
        };
        Ok(Notification::success(message))
    }

    pub fn set_color(&mut self, role: ColorRole, value: &str) -> Result<Notification, StorefrontError> {
        self.require_open()?;
        let color = self.session.personalization_mut().set_color(role, value)?;
        Ok(Notification::success(format!("{} set to {}", role.label(), color)))
    }

    fn require_open(&self) -> Result<(), SessionError> {
        if self.session.is_open() {
            Ok(())
        } else {
            Err(SessionError::NoTemplate)
        }
    }

    // ------------------------------------------------------------------
    // Cart
    // ------------------------------------------------------------------

    /// Add the current configuration to the cart and close the designer
    pub fn add_to_cart(&mut self) -> Result<LineItemId, StorefrontError> {
        let id = self.cart.add_item(&self.session)?.id();
        self.session.close();
        Ok(id)
    }

    pub fn remove_from_cart(&mut self, id: LineItemId) -> Option<LineItem> {
        self.cart.remove_item(id)
    }

    pub fn update_quantity(&mut self, id: LineItemId, quantity: i64) -> Result<QuantityChange, StorefrontError> {
        Ok(self.cart.set_quantity(id, quantity)?)
    }

    pub async fn checkout<P: OrderProcessor + ?Sized>(
        &mut self,
        processor: &P,
    ) -> Result<OrderConfirmation, StorefrontError> {
        Ok(checkout::checkout(&mut self.cart, processor).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ApiError, ApiResult, BaseProduct};
    use crate::checkout::UnavailableCheckout;
    use crate::domain::UploadedDesign;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory backend; products and uploads succeed or fail on demand
    #[derive(Default)]
    struct MockApi {
        products_down: bool,
        uploads_down: bool,
        upload_calls: AtomicUsize,
    }

    #[async_trait]
    impl StorefrontApi for MockApi {
        async fn fetch_products(&self) -> ApiResult<Vec<BaseProduct>> {
            if self.products_down {
                return Err(ApiError::Status { status: 500, message: "boom".to_string() });
            }
            Ok(vec![BaseProduct {
                id: Some("5".to_string()),
                name: Some("Backend Tee".to_string()),
                base_price: Some(19.99),
                max_file_size: Some(10_485_760.0),
                ..Default::default()
            }])
        }

        async fn upload_design(&self, _file: &DesignFile, product_id: Option<TemplateId>) -> ApiResult<UploadedDesign> {
            self.upload_calls.fetch_add(1, Ordering::SeqCst);
            if self.uploads_down {
                return Err(ApiError::Rejected("Upload failed".to_string()));
            }
            Ok(UploadedDesign {
                id: format!("d-{}", product_id.map(|id| id.0).unwrap_or_default()),
                url: None,
            })
        }
    }

    fn storefront(api: MockApi) -> Storefront<MockApi> {
        tokio_test::block_on(Storefront::bootstrap(api, UploadPolicy::default()))
    }

    fn png(size: usize) -> DesignFile {
        DesignFile::new("design.png", "image/png", vec![0u8; size])
    }

    #[test]
    fn test_bootstrap_with_backend_down() {
        let shop = storefront(MockApi { products_down: true, ..Default::default() });
        assert!(shop.catalog().is_fallback());
        assert_eq!(shop.catalog().len(), 8);
    }

    #[test]
    fn test_select_unknown_template() {
        let mut shop = storefront(MockApi::default());
        assert_eq!(
            shop.select_template(TemplateId(42)).unwrap_err(),
            StorefrontError::TemplateNotFound(TemplateId(42))
        );
        assert!(!shop.session().is_open());
    }

    #[test]
    fn test_reopen_resets_quality_and_design() {
        let mut shop = storefront(MockApi::default());
        shop.select_template(TemplateId(1)).unwrap();
        assert_eq!(shop.select_quality("performance").unwrap(), Money::from_cents(2399));
        tokio_test::block_on(shop.upload_design(png(512))).unwrap();
        assert!(shop.session().design().is_some());

        shop.select_template(TemplateId(2)).unwrap();
        assert_eq!(shop.session().quality(), QualityTier::Premium);
        assert!(shop.session().design().is_none());
        assert_eq!(shop.session().current_price(), Money::from_cents(1999));
    }

    #[test]
    fn test_unknown_option_rejected_without_change() {
        let mut shop = storefront(MockApi::default());
        shop.select_template(TemplateId(1)).unwrap();
        shop.select_size("youth-m").unwrap();

        assert!(matches!(
            shop.select_quality("deluxe"),
            Err(StorefrontError::Validation(ValidationError::UnknownOption(_)))
        ));
        assert!(shop.select_size("giant").is_err());
        assert_eq!(shop.session().quality(), QualityTier::Premium);
        assert_eq!(shop.session().size(), GarmentSize::YouthM);
    }

    #[test]
    fn test_invalid_upload_never_reaches_backend() {
        let api = MockApi::default();
        let mut shop = storefront(api);
        shop.select_template(TemplateId(1)).unwrap();

        let jpeg = DesignFile::new("photo.jpg", "image/jpeg", vec![0u8; 64]);
        let err = tokio_test::block_on(shop.upload_design(jpeg)).unwrap_err();
        assert!(matches!(err, StorefrontError::Validation(ValidationError::UnsupportedFileType { .. })));

        let huge = png(15 * 1024 * 1024);
        let err = tokio_test::block_on(shop.upload_design(huge)).unwrap_err();
        assert!(matches!(err, StorefrontError::Validation(ValidationError::FileTooLarge { .. })));

        assert_eq!(shop.api.upload_calls.load(Ordering::SeqCst), 0);
        assert!(shop.session().design().is_none());
    }

    #[test]
    fn test_confirmed_upload() {
        let mut shop = storefront(MockApi::default());
        shop.select_template(TemplateId(3)).unwrap();

        let note = tokio_test::block_on(shop.upload_design(png(100))).unwrap();
        assert_eq!(note.kind, NotificationKind::Success);
        assert_eq!(shop.session().design().unwrap().server_id.as_deref(), Some("d-3"));
    }

    #[test]
    fn test_failed_upload_degrades_to_local_design() {
        let mut shop = storefront(MockApi { uploads_down: true, ..Default::default() });
        shop.select_template(TemplateId(1)).unwrap();

        let note = tokio_test::block_on(shop.upload_design(png(100))).unwrap();
        assert_eq!(note.kind, NotificationKind::Info);
        assert!(shop.session().design().unwrap().is_local_only());

        shop.remove_design();
        assert!(shop.session().design().is_none());

        let id = shop.add_to_cart().unwrap();
        assert_eq!(shop.cart().get(id).unwrap().quantity(), 1);
        assert!(!shop.session().is_open());
    }

    #[test]
    fn test_upload_requires_open_template() {
        let mut shop = storefront(MockApi::default());
        let err = tokio_test::block_on(shop.upload_design(png(10))).unwrap_err();
        assert_eq!(err, StorefrontError::Session(SessionError::NoTemplate));
    }

    #[test]
    fn test_add_to_cart_without_selection() {
        let mut shop = storefront(MockApi::default());
        let err = shop.add_to_cart().unwrap_err();
        assert_eq!(err, StorefrontError::Cart(CartError::NoSelection));
        assert_eq!(Notification::from(&err).message, "No template selected");
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_personalization_and_images() {
        let mut shop = storefront(MockApi::default());
        assert!(shop.set_last_name("Lee").is_err());

        shop.select_template(TemplateId(1)).unwrap();
        assert!(matches!(
            shop.set_last_name(" "),
            Err(StorefrontError::Validation(ValidationError::EmptyField(_)))
        ));
        assert_eq!(shop.set_last_name("Lee").unwrap().message, "Last name set to \"Lee\"");
        assert_eq!(shop.set_text(TextField::SchoolName, "").unwrap().message, "School name cleared.");
        assert!(shop.set_color(ColorRole::School, "#00ff00").is_ok());
        assert!(shop.set_color(ColorRole::FontOutline, "green").is_err());

        let jpeg = DesignFile::new("team.jpg", "image/jpeg", vec![1u8; 10]);
        assert!(shop.attach_image(ImageSlot::ImageOne, &jpeg).is_ok());
        assert!(shop.remove_image(ImageSlot::ImageOne).is_some());
        assert!(shop.remove_image(ImageSlot::ImageOne).is_none());
    }

    #[test]
    fn test_cart_flow_and_checkout() {
        let mut shop = storefront(MockApi::default());

        shop.select_template(TemplateId(1)).unwrap();
        let first = shop.add_to_cart().unwrap();

        shop.select_template(TemplateId(2)).unwrap();
        shop.select_quality("performance").unwrap();
        shop.add_to_cart().unwrap();

        assert_eq!(shop.update_quantity(first, 2).unwrap(), QuantityChange::Updated(2));
        assert!(shop.update_quantity(first, 100).is_err());
        assert_eq!(shop.cart().total(), Money::from_cents(6397));

        let err = tokio_test::block_on(shop.checkout(&UnavailableCheckout)).unwrap_err();
        assert!(matches!(err, StorefrontError::Checkout(CheckoutError::Unavailable(_))));
        assert_eq!(shop.cart().len(), 2);

        assert!(shop.remove_from_cart(first).is_some());
        assert_eq!(shop.cart().len(), 1);
    }
}
