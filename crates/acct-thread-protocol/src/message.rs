use serde::{Deserialize, Serialize};

use crate::types::{AccountId, RequestId, TransactionRef};

/// Which ledger a query is answered from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerIndex {
    #[default]
    Validated,
    Closed,
    Current,
}

/// The queries issued while threading an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum LedgerQuery {
    AccountInfo {
        account: AccountId,
        strict: bool,
        ledger_index: LedgerIndex,
    },
    Tx {
        transaction: TransactionRef,
    },
}

impl LedgerQuery {
    /// Strict account lookup against the latest validated ledger.
    pub fn account_info(account: AccountId) -> Self {
        Self::AccountInfo {
            account,
            strict: true,
            ledger_index: LedgerIndex::Validated,
        }
    }

    pub fn tx(transaction: TransactionRef) -> Self {
        Self::Tx { transaction }
    }

    pub fn command(&self) -> &'static str {
        match self {
            Self::AccountInfo { .. } => "account_info",
            Self::Tx { .. } => "tx",
        }
    }
}

/// A query together with the id its response must echo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedQuery {
    pub id: RequestId,
    #[serde(flatten)]
    pub query: LedgerQuery,
}

impl TaggedQuery {
    pub fn new(id: RequestId, query: LedgerQuery) -> Self {
        Self { id, query }
    }
}

/// Error codes the walker reacts to specifically.
pub mod error_codes {
    pub const ACT_MALFORMED: &str = "actMalformed";
    pub const ACT_NOT_FOUND: &str = "actNotFound";
    pub const TXN_NOT_FOUND: &str = "txnNotFound";
}
