pub mod server;
pub mod tournaments;
