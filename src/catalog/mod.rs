//! Template catalog
//!
//! Loads the base garment product from the backend (falling back to a
//! built-in product when that fails) and expands it into the fixed list of
//! display templates shown in the storefront grid.

use std::sync::Arc;
use tracing::{info, warn};

use crate::backend::{BaseProduct, StorefrontApi};
use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::domain::{Money, PrintSpec, Template, TemplateId};

/// Price used when the base product has none
pub const FALLBACK_BASE_PRICE: Money = Money::from_cents(1999);
pub const FALLBACK_PRINT_WIDTH_IN: f64 = 12.0;
pub const FALLBACK_PRINT_HEIGHT_IN: f64 = 16.0;
pub const FALLBACK_MIN_DPI: u32 = 150;

const TEMPLATE_KEY: &str = "front-logo";
const TEMPLATE_DESCRIPTION: &str = "Clean left chest logo on a premium T-shirt.";

/// Display metadata of one generated template
struct Variant {
    name: &'static str,
    image_url: &'static str,
    mockup_url: &'static str,
}

const VARIANTS: [Variant; 8] = [
    Variant {
        name: "Volleyball Template 1",
        image_url: "img/templates/voll1_sample.jpg",
        mockup_url: "img/mock-ups/sample1-mockup.png",
    },
    Variant {
        name: "Basketball Template 1",
        image_url: "img/templates/bask1_sample.jpg",
        mockup_url: "img/mock-ups/sample2-mockup.png",
    },
    Variant {
        name: "Football Template 1",
        image_url: "img/templates/foot1_sample.jpg",
        mockup_url: "img/mock-ups/sample1-mockup.png",
    },
    Variant {
        name: "Football Template 3",
        image_url: "img/templates/foot3_sample.jpg",
        mockup_url: "img/mock-ups/sample1-mockup.png",
    },
    Variant {
        name: "Hockey Template 1",
        image_url: "img/templates/hockey1_sample.jpg",
        mockup_url: "img/mock-ups/sample1-mockup.png",
    },
    Variant {
        name: "Volleyball Template 2",
        image_url: "img/templates/voll1_sample.jpg",
        mockup_url: "img/mock-ups/sample1-mockup.png",
    },
    Variant {
        name: "Basketball Template 2",
        image_url: "img/templates/bask1_sample.jpg",
        mockup_url: "img/mock-ups/sample1-mockup.png",
    },
    Variant {
        name: "Football Template 2",
        image_url: "img/templates/foot3_sample.jpg",
        mockup_url: "img/mock-ups/sample1-mockup.png",
    },
];

/// Number of templates every catalog contains
pub const TEMPLATE_COUNT: usize = VARIANTS.len();

/// Built-in base product used when the backend is unavailable
pub fn fallback_base_product() -> BaseProduct {
    BaseProduct {
        id: Some("999".to_string()),
        name: Some("Premium T-Shirt".to_string()),
        description: Some("Soft 100% cotton unisex T-shirt with a smooth print surface.".to_string()),
        base_price: Some(FALLBACK_BASE_PRICE.as_decimal()),
        print_area_width: Some(FALLBACK_PRINT_WIDTH_IN),
        print_area_height: Some(FALLBACK_PRINT_HEIGHT_IN),
        min_dpi: Some(FALLBACK_MIN_DPI as f64),
        max_file_size: Some(DEFAULT_MAX_FILE_SIZE as f64),
        product_type: Some("tshirt".to_string()),
    }
}

/// Positive value or nothing; zero counts as unset
fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Print constraints and price of a base product, with fallbacks applied
fn resolve_pricing(base: &BaseProduct) -> (Money, PrintSpec) {
    let price = positive(base.base_price)
        .and_then(Money::from_decimal)
        .unwrap_or(FALLBACK_BASE_PRICE);

    let print = PrintSpec {
        area_width_in: positive(base.print_area_width).unwrap_or(FALLBACK_PRINT_WIDTH_IN),
        area_height_in: positive(base.print_area_height).unwrap_or(FALLBACK_PRINT_HEIGHT_IN),
        min_dpi: positive(base.min_dpi)
            .map(|dpi| dpi.round() as u32)
            .unwrap_or(FALLBACK_MIN_DPI),
        max_file_size: positive(base.max_file_size)
            .map(|size| size as u64)
            .unwrap_or(DEFAULT_MAX_FILE_SIZE),
    };

    (price, print)
}

/// Expand one base product into the display templates.
///
/// Only display metadata varies; price and print constraints are copied
/// from the base product. Ids are assigned 1..=N in order.
pub fn expand_templates(base: &BaseProduct) -> Vec<Template> {
    let (base_price, print) = resolve_pricing(base);
    let product_type = base
        .product_type
        .clone()
        .unwrap_or_else(|| "tshirt".to_string());

    VARIANTS
        .iter()
        .enumerate()
        .map(|(index, variant)| Template {
            id: TemplateId(index as u32 + 1),
            template_key: TEMPLATE_KEY.to_string(),
            name: variant.name.to_string(),
            description: TEMPLATE_DESCRIPTION.to_string(),
            product_type: product_type.clone(),
            base_price,
            print: print.clone(),
            image_url: variant.image_url.to_string(),
            mockup_url: variant.mockup_url.to_string(),
        })
        .collect()
}

/// Loaded templates, kept for the lifetime of the storefront
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Arc<Template>>,
    from_fallback: bool,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<Template>, from_fallback: bool) -> Self {
        TemplateCatalog {
            templates: templates.into_iter().map(Arc::new).collect(),
            from_fallback,
        }
    }

    pub fn get(&self, id: TemplateId) -> Option<Arc<Template>> {
        self.templates.iter().find(|t| t.id == id).cloned()
    }

    pub fn templates(&self) -> &[Arc<Template>] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Whether the built-in base product was used
    pub fn is_fallback(&self) -> bool {
        self.from_fallback
    }
}

/// Builds the template catalog from the backend
pub struct CatalogLoader<'a, A: StorefrontApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: StorefrontApi + ?Sized> CatalogLoader<'a, A> {
    pub fn new(api: &'a A) -> Self {
        CatalogLoader { api }
    }

    /// Fetch the base product once and expand it. Never fails: any backend
    /// problem substitutes the built-in base product.
    pub async fn load(&self) -> TemplateCatalog {
        let (base, from_fallback) = match self.api.fetch_products().await {
            Ok(products) => match products.into_iter().next() {
                Some(first) => (first, false),
                None => {
                    warn!("No products returned from API, using sample base product");
                    (fallback_base_product(), true)
                }
            },
            Err(e) => {
                warn!(error = %e, "Error loading products, using sample base product");
                (fallback_base_product(), true)
            }
        };

        let templates = expand_templates(&base);
        info!(
            count = templates.len(),
            base_product = base.name.as_deref().unwrap_or("unnamed"),
            fallback = from_fallback,
            "Built templates from base product"
        );

        TemplateCatalog::new(templates, from_fallback)
    }
}
