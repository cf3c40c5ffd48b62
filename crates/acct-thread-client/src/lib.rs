//! Client side of the account threading protocol.
//!
//! A [`MessageChannel`] carries JSON text to and from a ledger server. The
//! [`RequestCorrelator`] tags each request with a fresh id and waits for the
//! response carrying that id, and [`LedgerClient`] builds the two queries the
//! walker needs on top of both.

pub mod adapter;
pub mod channel;
pub mod config;
pub mod correlator;
pub mod error;
pub mod memory;
pub mod ws;

pub use adapter::LedgerClient;
pub use channel::MessageChannel;
pub use config::{ClientConfig, Endpoint, DEFAULT_ENDPOINT};
pub use correlator::RequestCorrelator;
pub use error::{ClientError, ClientResult};
pub use memory::InMemoryChannel;
pub use ws::WsChannel;
