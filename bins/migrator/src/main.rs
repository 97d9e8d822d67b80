//! Database migration runner.

use sea_orm_migration::prelude::*;

use lendview_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(Migrator).await;
}
