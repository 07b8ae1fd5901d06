mod client_ip;
mod http_server;

pub use client_ip::{client_ip, strip_port};
pub use http_server::{router, AppState, HealthResponse, HttpServer};
