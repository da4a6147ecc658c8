use reqwest::ClientBuilder;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SslVerify(bool);

impl SslVerify {
    pub fn new(verify: bool) -> Self {
        SslVerify(verify)
    }

    pub fn get(&self) -> bool {
        self.0
    }

    pub(crate) fn apply_to_builder(&self, builder: ClientBuilder) -> ClientBuilder {
        builder.danger_accept_invalid_certs(!self.0)
    }
}

impl Default for SslVerify {
    fn default() -> Self {
        SslVerify(true)
    }
}
