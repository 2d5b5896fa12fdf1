use std::{fs, path::Path, str::FromStr};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::StoreError;

pub async fn connect(db_url: &str) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(db_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

pub fn ensure_sqlite_dir(db_url: &str) -> std::io::Result<()> {
    let Some(path) = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    let path = path.split('?').next().unwrap_or(path);
    let path = path.strip_prefix("file:").unwrap_or(path);
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }

    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_sqlite_dir_skips_memory_and_foreign_urls() {
        ensure_sqlite_dir("sqlite::memory:").unwrap();
        ensure_sqlite_dir("sqlite://:memory:").unwrap();
        ensure_sqlite_dir("postgres://localhost/app").unwrap();
    }

    #[test]
    fn ensure_sqlite_dir_creates_parent() {
        let dir = std::env::temp_dir()
            .join(format!("barberbook-test-{}", std::process::id()))
            .join("nested");
        let url = format!("sqlite://{}/store.db?mode=rwc", dir.display());
        ensure_sqlite_dir(&url).unwrap();
        assert!(dir.is_dir());
        let _ = fs::remove_dir_all(dir.parent().unwrap());
    }
}
