//! Print-Shop headless shell
//!
//! Loads configuration, connects to the shop backend and builds the
//! template catalog, reporting what a storefront page would display.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use print_shop::backend::PhpBackend;
use print_shop::config::Settings;
use print_shop::session::UploadPolicy;
use print_shop::Storefront;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = Settings::load().context("Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.logging.filter))
        .context("Invalid log filter")?;
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if settings.logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!("Starting Print-Shop v{}", env!("CARGO_PKG_VERSION"));

    let backend = PhpBackend::new(&settings.api).context("Failed to configure backend client")?;
    let policy = UploadPolicy::from(&settings.uploads);
    let shop = Storefront::bootstrap(backend, policy).await;

    for template in shop.catalog().templates() {
        let (width_px, height_px) = template.print.recommended_pixels();
        info!(
            id = %template.id,
            name = %template.name,
            price = %template.base_price,
            print_area = %format!("{}\" x {}\"", template.print.area_width_in, template.print.area_height_in),
            min_dpi = template.print.min_dpi,
            recommended = %format!("{} x {}", width_px, height_px),
            max_file_size = %template.print.max_file_size_label(),
            "Template"
        );
    }

    info!(
        templates = shop.catalog().len(),
        fallback = shop.catalog().is_fallback(),
        cart_total = %shop.cart().total(),
        "Catalog loaded"
    );

    Ok(())
}
