//! Replace the contents of the configured stores with the sample rows.

use anyhow::Context;

use shopfloor_infra::{seed, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shopfloor_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let services = shopfloor_api::app::services::build_services(&config).await?;

    let report = seed::seed_sample_data(&services.orders, &services.inventory)
        .await
        .context("seeding failed")?;

    println!(
        "Seeded {} inventory items and {} orders (removed {} and {}).",
        report.items_inserted, report.orders_inserted, report.items_removed, report.orders_removed
    );
    Ok(())
}
