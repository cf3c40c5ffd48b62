use std::fmt;

use acct_thread_protocol::{error_codes, AccountId, LedgerResponse, ServerError, TransactionRef};

/// Why a walk ended before reaching the account's creation.
#[derive(Clone, Debug, PartialEq)]
pub enum StopReason {
    /// `account_info` itself failed.
    AccountLookup { account: AccountId, error: ServerError },
    /// The server does not have the transaction, usually for lack of history.
    InsufficientHistory { reference: TransactionRef },
    /// Any other error reported for a transaction lookup.
    Server { reference: TransactionRef, error: ServerError },
    /// The transaction came back without `meta.AffectedNodes`.
    MissingMetadata { response: LedgerResponse },
    /// The link points at a transaction already visited in this walk.
    Cycle { reference: TransactionRef },
}

/// Terminal state of a walk.
#[derive(Clone, Debug, PartialEq)]
pub enum WalkOutcome {
    /// Reached the transaction that created the account.
    Created { account: AccountId },
    /// The account root carries no `PreviousTxnID`.
    NoHistory { account: AccountId },
    /// No entry in the last transaction's metadata references the account.
    Exhausted { response: LedgerResponse },
    Error(StopReason),
}

impl WalkOutcome {
    /// True for the endings that are not a normal end of history.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, Self::Exhausted { .. } | Self::Error(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::NoHistory { .. } => "no-history",
            Self::Exhausted { .. } => "exhausted",
            Self::Error(_) => "error",
        }
    }
}

impl fmt::Display for WalkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { account } => write!(f, "Created Account {account}.  Done."),
            Self::NoHistory { account } => {
                write!(f, "No PreviousTxnID found for {account}.  No transactions found.")
            }
            Self::Exhausted { response } => write!(
                f,
                "No more modifying transactions found.  Unexpected stop.\n\nGot:\n{}",
                response.to_pretty()
            ),
            Self::Error(reason) => reason.fmt(f),
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccountLookup { account, error } => {
                writeln!(f, "No account_info for accountID {account}")?;
                if error.is(error_codes::ACT_MALFORMED) {
                    writeln!(f, "Did you mistype the accountID?")?;
                }
                write!(f, "{error}  Unexpected stop.")
            }
            Self::InsufficientHistory { .. } => write!(
                f,
                "Transaction not found. Does your server have enough history? Unexpected stop."
            ),
            Self::Server { error, .. } => write!(f, "{error}  Unexpected stop."),
            Self::MissingMetadata { response } => write!(
                f,
                "No AffectedNodes found in transaction.  Unexpected stop.\n\nGot:\n{}",
                response.to_pretty()
            ),
            Self::Cycle { reference } => write!(
                f,
                "Transaction {reference} was already visited.  Unexpected stop."
            ),
        }
    }
}

/// Result of a completed walk.
#[derive(Clone, Debug, PartialEq)]
pub struct WalkSummary {
    pub outcome: WalkOutcome,
    /// Transactions fetched, newest first.
    pub visited: Vec<TransactionRef>,
}

impl WalkSummary {
    pub fn transactions_fetched(&self) -> usize {
        self.visited.len()
    }
}
