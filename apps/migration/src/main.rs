//! Migration CLI tool.

use sea_orm_migration::prelude::*;

/// Resolve the store URL the same way the server does: `DATABASE_URL`
/// first, then `VITE_DATABASE_URL`. Blank values count as unset.
fn database_url<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    ["DATABASE_URL", "VITE_DATABASE_URL"]
        .into_iter()
        .filter_map(|name| lookup(name))
        .find(|url| !url.trim().is_empty())
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let Some(url) = database_url(|name| std::env::var(name).ok()) else {
        tracing::error!("DATABASE_URL is not set");
        std::process::exit(1);
    };

    // The migration CLI only reads DATABASE_URL.
    // SAFETY: no other threads exist yet; the runtime is built below.
    unsafe { std::env::set_var("DATABASE_URL", url) };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!("Failed to start async runtime: {err}");
            std::process::exit(1);
        }
    };

    runtime.block_on(cli::run_cli(migration::Migrator));
}
