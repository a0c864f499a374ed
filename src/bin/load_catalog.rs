//! # 카탈로그 적재 도구
//!
//! 태그와 재료를 JSON 파일에서 읽어 DB에 넣습니다. 이미 있는 항목은 건너뜁니다.
//!
//! ```bash
//! cargo run --bin load-catalog -- --file data/catalog.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use foodgram::{db, services::catalog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(about = "Load the tag and ingredient catalog into the database")]
struct Args {
    /// 카탈로그 JSON 파일 경로
    #[arg(long, default_value = "data/catalog.json")]
    file: PathBuf,

    /// SQLite 데이터베이스 URL (없으면 DATABASE_URL 환경변수)
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foodgram=info,load_catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let raw = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let catalog: catalog::Catalog = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid catalog file {}", args.file.display()))?;

    let pool = db::connect(&args.database_url, 1).await?;
    db::migrate(&pool).await?;

    let report = catalog::load(&pool, &catalog).await?;
    tracing::info!(
        tags_inserted = report.tags_inserted,
        tags_skipped = report.tags_skipped,
        ingredients_inserted = report.ingredients_inserted,
        ingredients_skipped = report.ingredients_skipped,
        "catalog loaded from {}",
        args.file.display()
    );

    Ok(())
}
