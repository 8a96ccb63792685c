// multy-api: Async Rust client for the Zyxel Multy ZAPI router protocol

pub mod auth;
pub mod error;
pub mod transport;
pub mod zapi;

pub use auth::{Credentials, LoginShape, TokenPlacement};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use zapi::easy_setup::WifiSettings;
pub use zapi::mesh::LedState;
pub use zapi::nat::{ForwardProtocol, PortForwardRule};
pub use zapi::session::{Session, SessionState};
pub use zapi::{MultyClient, Operation};
