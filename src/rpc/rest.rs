use super::invoker::{Params, ProcedureInvoker};
use crate::config::Config;
use crate::error::{BootstrapError, RemoteError};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// Calls remote procedures over HTTP: `POST {base}/{procedure}` with the params as JSON body.
#[derive(Debug, Clone)]
pub struct RestRpcInvoker {
    client: reqwest::Client,
    base: Url,
}

impl RestRpcInvoker {
    /// Build an invoker with a preconfigured HTTP client.
    pub fn new(cfg: &Config) -> Result<Self, BootstrapError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(cfg.service_key.trim())
            .map_err(|_| BootstrapError::InvalidServiceKey)?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", cfg.service_key.trim()))
            .map_err(|_| BootstrapError::InvalidServiceKey)?;
        bearer.set_sensitive(true);
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("schema-bootstrap/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(cfg.connect_timeout())
            .timeout(cfg.request_timeout())
            .default_headers(headers);
        // Only the configured proxy is used; system proxy variables are ignored.
        builder = match cfg.proxy.as_ref() {
            Some(proxy_url) => builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?),
            None => builder.no_proxy(),
        };

        Ok(Self::with_client(builder.build()?, cfg.rpc_base()?))
    }

    /// `base` must end with `/` so procedure names join onto it.
    fn with_client(client: reqwest::Client, base: Url) -> Self {
        Self { client, base }
    }

    async fn call(&self, procedure: &str, params: Params) -> Result<Value, BootstrapError> {
        let url = self.base.join(procedure)?;
        debug!(procedure, url = %url, "invoking remote procedure");

        let resp = self.client.post(url).json(&params).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let error = RemoteError::from_body(status, &body);
            warn!(procedure, status = %status, error = %error, "remote procedure failed");
            return Err(BootstrapError::Remote { status, error });
        }

        // `void` procedures answer 204 with no body.
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl ProcedureInvoker for RestRpcInvoker {
    type Error = BootstrapError;

    async fn invoke(&self, procedure: &str, params: Params) -> Result<Value, Self::Error> {
        self.call(procedure, params).await
    }
}
