mod server;
pub use server::EffectServer;

mod server_config;
pub use server_config::{InterestConfig, ServerConfig};
