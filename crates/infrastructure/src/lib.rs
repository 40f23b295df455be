//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_rapid_client;
mod in_memory_rapid_gateway;

pub use http_rapid_client::HttpRapidClient;
pub use in_memory_rapid_gateway::InMemoryRapidGateway;
