//! Bridge configuration: remote endpoint, credentials, and ledger location.
//!
//! Values resolve in priority order: environment variable, then the
//! pre-production sandbox default. The sandbox credentials below are the
//! public demo values for the MyNotary pre-production organization and are
//! only authorized against that organization.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Identifier of the demo organization on the pre-production environment.
const DEFAULT_ORGANIZATION_ID: i64 = 5204;

/// API key of the demo application. Only valid for organization 5204.
const DEFAULT_API_KEY: &str = "f8634dda-ae9e-438d-a535-e4214b0a8926";

/// Acting demo user (member of organization 5204).
const DEFAULT_USER_ID: i64 = 54354;

const DEFAULT_BASE_URL: &str = "https://api-preprod.mynotary.fr/api/v1";

/// Static configuration consumed by the client and body builders.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub base_url: String,
    pub api_key: String,
    pub organization_id: i64,
    pub user_id: i64,
    /// Durable slot holding the serialized association ledger.
    pub ledger_path: PathBuf,
}

impl BridgeConfig {
    /// Resolve configuration from the environment, falling back to the
    /// sandbox defaults.
    pub fn load() -> Result<Self> {
        let organization_id = env_i64("NOTARY_BRIDGE_ORGANIZATION_ID")?
            .unwrap_or(DEFAULT_ORGANIZATION_ID);
        let user_id = env_i64("NOTARY_BRIDGE_USER_ID")?.unwrap_or(DEFAULT_USER_ID);
        let base_url = env::var("NOTARY_BRIDGE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key =
            env::var("NOTARY_BRIDGE_API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string());
        let ledger_path = match env::var_os("NOTARY_BRIDGE_LEDGER") {
            Some(path) => PathBuf::from(path),
            None => default_ledger_path(),
        };

        Ok(BridgeConfig {
            base_url,
            api_key,
            organization_id,
            user_id,
            ledger_path,
        })
    }
}

fn env_i64(name: &str) -> Result<Option<i64>> {
    match env::var(name) {
        Ok(raw) => {
            let value = raw
                .parse::<i64>()
                .with_context(|| format!("parse {name} as integer: {raw}"))?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}

fn default_ledger_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("notary-bridge").join("associations.json"))
        .unwrap_or_else(|| PathBuf::from("associations.json"))
}
