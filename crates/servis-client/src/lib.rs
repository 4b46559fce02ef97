mod auth;
mod client;
mod config;
mod error;
mod payload;
mod session;
pub mod testing;
mod transport;

pub use auth::extract_token;
pub use client::{LoginOutcome, ServisClient, endpoints};
pub use config::{ClientConfig, ConfigError, read_config_file};
pub use error::{ApiError, ErrorKind};
pub use payload::{Address, CustomerPayload, LoginPayload, ProductPayload, RegisterPayload};
pub use session::{SessionError, SessionStore};
pub use transport::{Transport, TransportError, UreqTransport};
