//! Message types for walking an account's transaction thread.
//!
//! Defines the identifiers, the two request shapes, and a typed view over the
//! JSON responses returned by a ledger server. The server's responses are kept
//! verbatim so they can be reported exactly as received.

pub mod codec;
pub mod effect;
pub mod error;
pub mod message;
pub mod response;
pub mod types;

pub use codec::JsonCodec;
pub use effect::{CreatedEntry, EffectNode, EntryFields, ModifiedEntry, ACCOUNT_ROOT};
pub use error::{ProtocolError, ProtocolResult};
pub use message::{error_codes, LedgerIndex, LedgerQuery, TaggedQuery};
pub use response::{LedgerResponse, ServerError};
pub use types::{AccountId, RequestId, TransactionRef, ACCOUNT_ID_LEN, ACCOUNT_ID_PREFIX};
