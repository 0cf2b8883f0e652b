// Adapters layer: concrete implementations for external systems (sheet hosts, http server, http client).

pub mod client;
pub mod csv_host;
pub mod http;
pub mod memory;
