//! Demo: lists recipes page by page, then the session user's household.
//!
//! Point it at a server with `MEALPLAN_BASE_URL` (and `MEALPLAN_OAUTH2_TOKEN`
//! if the server wants one). An optional `mealplan.toml` next to the binary
//! is read as well.

use std::path::Path;

use api_framework::{QueryFilter, ResourceApi};
use mealplan_client::config::ClientConfig;
use mealplan_client::lifecycle::{setup_tracing, ApiSystem};
use mealplan_client::ClientError;
use tracing::{error, info, warn, Instrument};

const MAX_PAGES: u32 = 3;

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    setup_tracing();

    let config = ClientConfig::load(Some(Path::new("mealplan.toml")))?;
    info!(base_url = %config.base_url, "Starting meal plan client demo");

    let system = ApiSystem::new(&config)?;

    let span = tracing::info_span!("recipe_listing");
    async {
        let mut filter = QueryFilter::builder().limit(10).build();
        for _ in 0..MAX_PAGES {
            let page = system.recipes.list(&filter).await?;
            info!(
                page = page.page(),
                of = page.total_pages(),
                shown = page.len(),
                total = page.total_count(),
                "Fetched recipes"
            );
            for recipe in &page {
                info!(id = %recipe.id, name = %recipe.name, "Recipe");
            }
            match page.next_filter(&filter) {
                Some(next) => filter = next,
                None => break,
            }
        }
        Ok::<(), ClientError>(())
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("session");
    async {
        match system.users.get_self().await {
            Ok(user) => info!(user = %user.display_name(), "Signed in"),
            Err(e) => warn!(error = %e, "No session user"),
        }
        match system.households.active_household().await {
            Ok(household) => info!(household = %household.name, members = household.members.len(), "Active household"),
            Err(e) => error!(error = %e, "Could not load active household"),
        }
    }
    .instrument(span)
    .await;

    info!("Demo completed");
    Ok(())
}
