use crate::error::BootstrapError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Environment prefix for every configuration key, e.g. `BOOTSTRAP_SUPABASE_URL`.
pub const ENV_PREFIX: &str = "BOOTSTRAP_";

/// Path under the project URL where remote procedures are exposed.
pub const RPC_PATH: &str = "rest/v1/rpc/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub supabase_url: String,
    pub service_key: String,
    pub proxy: Option<Url>,
    pub loglevel: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Local `supabase start` API gateway.
            supabase_url: "http://127.0.0.1:54321".to_string(),
            service_key: String::new(),
            proxy: None,
            loglevel: "info".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Defaults overlaid with `BOOTSTRAP_*` environment variables.
    pub fn load() -> Result<Self, BootstrapError> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, BootstrapError> {
        let cfg: Config = figment.extract()?;
        if cfg.service_key.trim().is_empty() {
            return Err(BootstrapError::MissingServiceKey);
        }
        cfg.rpc_base()?;
        Ok(cfg)
    }

    /// Base URL that procedure names are joined onto.
    pub fn rpc_base(&self) -> Result<Url, BootstrapError> {
        let mut base = Url::parse(self.supabase_url.trim())?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(base.join(RPC_PATH)?)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
