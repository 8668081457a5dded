mod client;

pub use client::{ReqwestTransport, TransportResponse, VisTransport};
