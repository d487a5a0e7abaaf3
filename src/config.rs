use anyhow::{Context, Result};
use clap::Parser;
use std::env;

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Campus fellowship content management API")]
pub struct Args {
    /// Host to bind to (overrides FELLOWSHIP_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides FELLOWSHIP_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Apply the schema and exit
    #[arg(long)]
    pub migrate: bool,

    /// Populate empty collections with baseline content and exit
    #[arg(long)]
    pub seed: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and the one-shot flags.
    pub fn from_env_and_args() -> Result<(Self, Args)> {
        // Parse CLI once
        let args = Args::parse();

        // --- Environment fallback ---
        let env_host = env::var("FELLOWSHIP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let env_port = match env::var("FELLOWSHIP_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing FELLOWSHIP_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => 3000,
            Err(err) => return Err(err).context("reading FELLOWSHIP_PORT"),
        };
        let env_db =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://./data/fellowship.db".into());

        // --- Merge ---
        let cfg = Self {
            host: args.host.clone().unwrap_or(env_host),
            port: args.port.unwrap_or(env_port),
            database_url: args.database_url.clone().unwrap_or(env_db),
        };

        Ok((cfg, args))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Connection settings for the R2 bucket that holds uploaded media.
///
/// Everything except `region` and `public_base_url` is required. Missing
/// variable names are collected so upload-dependent endpoints can report a
/// useful message instead of attempting a connection.
#[derive(Debug, Clone)]
pub struct ObjectStoreConfig {
    pub bucket: String,
    pub account_id: String,
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    /// Custom domain for serving media. When unset, URLs fall back to the
    /// provider's account-scoped form.
    pub public_base_url: Option<String>,
}

impl ObjectStoreConfig {
    /// Read the R2 settings from the environment, collecting every missing
    /// required variable rather than stopping at the first.
    pub fn from_env() -> std::result::Result<Self, Vec<&'static str>> {
        let mut missing = Vec::new();
        let mut require = |name: &'static str| match env::var(name) {
            Ok(value) if !value.is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let bucket = require("R2_BUCKET_NAME");
        let account_id = require("R2_ACCOUNT_ID");
        let endpoint = require("R2_ENDPOINT");
        let access_key_id = require("R2_ACCESS_KEY_ID");
        let secret_access_key = require("R2_SECRET_ACCESS_KEY");

        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(Self {
            bucket,
            account_id,
            endpoint,
            access_key_id,
            secret_access_key,
            region: env::var("R2_REGION").unwrap_or_else(|_| "auto".into()),
            public_base_url: env::var("R2_PUBLIC_BASE_URL")
                .ok()
                .filter(|v| !v.is_empty()),
        })
    }
}
