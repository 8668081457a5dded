pub mod fallback;
pub mod handlers;
pub mod models;
pub mod parsers;
pub mod request;
pub mod routes;
pub mod vis_client;

pub use fallback::FallbackResult;
pub use vis_client::VisClient;
