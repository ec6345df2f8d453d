//! Runtime configuration: CLI flags with environment fallbacks

use clap::Parser;
use dotenv::dotenv;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::middleware::RateLimitConfig;

pub const DEV_JWT_SECRET: &str = "dev-secret-change-in-production-minimum-32-characters";

#[derive(Parser, Debug, Clone)]
#[command(name = "novazone")]
#[command(about = "NovaZone Academy backend - accounts, sessions and course catalog")]
pub struct Config {
    /// Address the HTTP server binds to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8001")]
    pub bind: String,

    /// Account database (relative paths resolve against the crate directory)
    #[arg(long, env = "AUTH_DB_PATH", default_value = "novazone_auth.db")]
    pub auth_db_path: String,

    /// Course catalog database
    #[arg(long, env = "ACADEMY_DB_PATH", default_value = "novazone_academy.db")]
    pub academy_db_path: String,

    /// HS256 signing secret
    #[arg(long, env = "JWT_SECRET", default_value = DEV_JWT_SECRET, hide_default_value = true)]
    pub jwt_secret: String,

    /// Session lifetime in hours (1 hour to 1 year)
    #[arg(
        long,
        env = "TOKEN_TTL_HOURS",
        default_value = "24",
        value_parser = clap::value_parser!(i64).range(1..=8760)
    )]
    pub token_ttl_hours: i64,

    /// bcrypt work factor
    #[arg(long, env = "BCRYPT_COST", default_value_t = bcrypt::DEFAULT_COST)]
    pub bcrypt_cost: u32,

    /// Login attempts allowed per client IP per minute
    #[arg(long, env = "LOGIN_RATE_LIMIT", default_value = "20")]
    pub login_rate_limit: u32,

    /// Expose POST /api/seed-data
    #[arg(long, env = "ENABLE_SEED")]
    pub enable_seed: bool,
}

impl Config {
    pub fn using_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours)
    }

    pub fn login_rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig {
            max_requests: self.login_rate_limit,
            window: Duration::from_secs(60),
        }
    }
}

/// Relative paths resolve against the crate directory, not the caller's cwd.
pub fn resolve_data_path(raw: &str) -> String {
    if raw == ":memory:" {
        return raw.to_string();
    }

    let p = PathBuf::from(raw);
    if p.is_absolute() {
        return p.to_string_lossy().to_string();
    }

    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(p)
        .to_string_lossy()
        .to_string()
}

/// Load `.env` from the cwd search path, then from the crate directory.
pub fn load_env() {
    let _ = dotenv();

    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}
