use catalog_query_api::{config::AppConfig, db::{Database, run_migrations}};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let db = Database::connect(&config.database_url, config.pool.clone()).await?;
    run_migrations(&db.orm()).await?;
    println!("Migrations applied");
    Ok(())
}
