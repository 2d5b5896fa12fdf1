use std::env;

use barberbook::db;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Startup error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let db_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://./data/barberbook.db".to_string());
    db::ensure_sqlite_dir(&db_url)?;

    let pool = db::connect(&db_url).await?;
    db::run_migrations(&pool).await?;

    log::info!("Schema ready at {db_url}");
    Ok(())
}
