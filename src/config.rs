// src/config.rs

use std::env;

use dotenvy::dotenv;

/// Default lifetime of an unclaimed start marker: one day, matching the
/// session lifetime of issued tokens.
pub const DEFAULT_ATTEMPT_MARKER_TTL_SECS: i64 = 86_400;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub rust_log: String,
    pub listen_addr: String,
    /// Seconds after which an in-progress attempt held by another session
    /// is considered abandoned.
    pub attempt_marker_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://quizdom.db".to_string());

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set".to_string())?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let attempt_marker_ttl_secs =
            parse_marker_ttl(env::var("ATTEMPT_MARKER_TTL_SECS").ok().as_deref())?;

        Ok(Self {
            database_url,
            jwt_secret,
            rust_log,
            listen_addr,
            attempt_marker_ttl_secs,
        })
    }
}

/// Reads `ATTEMPT_MARKER_TTL_SECS`; unset falls back to the default.
///
/// Zero or negative values would let any session take over a live attempt,
/// so they are rejected.
pub fn parse_marker_ttl(raw: Option<&str>) -> Result<i64, String> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_ATTEMPT_MARKER_TTL_SECS);
    };

    let secs = raw
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("ATTEMPT_MARKER_TTL_SECS is not a number: {}", e))?;

    if secs <= 0 {
        return Err(format!(
            "ATTEMPT_MARKER_TTL_SECS must be positive, got {}",
            secs
        ));
    }

    Ok(secs)
}
