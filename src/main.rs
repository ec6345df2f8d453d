//! NovaZone Academy backend server

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use novazone_backend::{
    academy::{seed, AcademyStore, StaticInsights},
    app::{build_router, AppState},
    auth::{JwtHandler, SessionGate, SqliteAccountStore, TokenDenylist},
    config::{load_env, resolve_data_path, Config},
    middleware::RateLimiter,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::{net::TcpListener, time::interval};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DENYLIST_SWEEP_SECS: u64 = 300;
const RATE_LIMIT_SWEEP_SECS: u64 = 120;

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    init_tracing();

    let config = Config::parse();

    info!("🎓 NovaZone Academy backend starting");
    if config.using_dev_secret() {
        warn!("⚠️ JWT_SECRET not set, using the development secret");
    }

    // Accounts and sessions
    let auth_db_path = resolve_data_path(&config.auth_db_path);
    let account_store = Arc::new(SqliteAccountStore::new(&auth_db_path)?);
    let jwt = Arc::new(JwtHandler::with_ttl(&config.jwt_secret, config.token_ttl()));
    let denylist = TokenDenylist::new();
    let gate = Arc::new(SessionGate::new(
        account_store.clone(),
        jwt,
        denylist.clone(),
        config.bcrypt_cost,
    )?);

    info!("🔐 Authentication initialized at: {}", auth_db_path);
    info!("👥 Existing accounts: {}", account_store.count()?);

    // Course catalog
    let academy_db_path = resolve_data_path(&config.academy_db_path);
    let academy = Arc::new(AcademyStore::new(&academy_db_path)?);
    info!("📚 Academy database initialized at: {}", academy_db_path);

    if config.enable_seed {
        info!("🌱 Seeding enabled, POST /api/seed-data is exposed");
        if academy.list_courses(&Default::default())?.is_empty() {
            seed::seed(&academy).context("Failed to seed empty catalog")?;
        }
    }

    let login_limiter = RateLimiter::new(config.login_rate_limit());

    tokio::spawn(denylist_sweep(denylist));
    tokio::spawn(rate_limit_sweep(login_limiter.clone()));

    let state = AppState {
        gate,
        academy,
        insights: Arc::new(StaticInsights),
        seed_enabled: config.enable_seed,
    };
    let app = build_router(state, login_limiter);

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("🎯 API server listening on {}", config.bind);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "novazone_backend=debug,novazone=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Forget revoked tokens once they would have expired anyway.
async fn denylist_sweep(denylist: TokenDenylist) {
    let mut ticker = interval(Duration::from_secs(DENYLIST_SWEEP_SECS));
    loop {
        ticker.tick().await;
        let purged = denylist.purge_expired(Utc::now().timestamp());
        if purged > 0 {
            info!("🧹 Purged {} expired revocations ({} remaining)", purged, denylist.len());
        }
    }
}

async fn rate_limit_sweep(limiter: RateLimiter) {
    let mut ticker = interval(Duration::from_secs(RATE_LIMIT_SWEEP_SECS));
    loop {
        ticker.tick().await;
        let removed = limiter.cleanup();
        if removed > 0 {
            debug!(
                "Dropped {} idle rate limit windows ({} clients tracked)",
                removed,
                limiter.tracked_clients()
            );
        }
    }
}
