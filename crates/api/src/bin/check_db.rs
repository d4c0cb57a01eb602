//! Print the current contents of both stores.

use anyhow::Context;

use shopfloor_infra::{report::StoreReport, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shopfloor_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let services = shopfloor_api::app::services::build_services(&config).await?;

    let report = StoreReport::capture(&services.orders, &services.inventory)
        .await
        .context("failed to read stores")?;
    print!("{report}");
    Ok(())
}
