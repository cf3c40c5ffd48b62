use acct_thread_client::ClientError;
use thiserror::Error;

/// Failures that abort a walk outright.
///
/// Ledger-side errors are not listed here: they end the walk normally with a
/// [`crate::WalkOutcome::Error`].
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("client error: {0}")]
    Client(#[from] ClientError),
}

pub type WalkResult<T> = Result<T, WalkError>;
