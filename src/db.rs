use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::accounts::repo::AccountsRepo;
use crate::config::AppConfig;
use crate::planner::repo::PlannerRepo;
use crate::support::repo::SupportRepo;

/// Every repository the HTTP layer needs, behind one object.
pub trait Store: AccountsRepo + PlannerRepo + SupportRepo {}

impl<T> Store for T where T: AccountsRepo + PlannerRepo + SupportRepo {}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pub db: PgPool,
}

impl PgStore {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        info!("migrations applied");
        Ok(())
    }
}
