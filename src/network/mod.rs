// src/network/mod.rs
pub mod http_version;
pub mod proxy_config;
pub mod ssl_verify;

pub use http_version::HttpVersion;
pub use proxy_config::ProxyConfig;
pub use ssl_verify::SslVerify;
