//! HTTP transport for the Mira API.

pub mod headers;
pub mod http;

pub use http::MiraHttpClient;
