use reqwest::{ClientBuilder, Proxy};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::BuildError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// When `Some(false)`, proxies from the environment are ignored.
    pub trust_env: Option<bool>,
}

impl ProxyConfig {
    pub fn from_url(proxy_url: impl Into<String>) -> Self {
        Self {
            all: Some(proxy_url.into()),
            ..Self::default()
        }
    }

    pub fn with_auth(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.username = Some(username.into());
        self.password = password;
        self
    }

    pub fn has_auth(&self) -> bool {
        self.username.is_some()
    }

    /// Proxy URL with the configured credentials spliced in.
    fn authenticated_url(&self, proxy_url: &str) -> Result<String, BuildError> {
        let Some(user) = &self.username else {
            return Ok(proxy_url.to_string());
        };
        let mut parsed = Url::parse(proxy_url)?;
        parsed
            .set_username(user)
            .and_then(|_| parsed.set_password(self.password.as_deref()))
            .map_err(|_| BuildError::ProxyCredentials(proxy_url.to_string()))?;
        Ok(parsed.to_string())
    }

    pub(crate) fn apply_to_builder(&self, mut builder: ClientBuilder) -> Result<ClientBuilder, BuildError> {
        // no_proxy() also clears explicit proxies, so it must come first
        if self.trust_env == Some(false) {
            builder = builder.no_proxy();
        }

        if let Some(all) = &self.all {
            return Ok(builder.proxy(Proxy::all(self.authenticated_url(all)?)?));
        }
        if let Some(http) = &self.http {
            builder = builder.proxy(Proxy::http(self.authenticated_url(http)?)?);
        }
        if let Some(https) = &self.https {
            builder = builder.proxy(Proxy::https(self.authenticated_url(https)?)?);
        }
        Ok(builder)
    }
}
