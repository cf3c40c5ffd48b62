//! Typed view over the `AffectedNodes` list in a transaction's metadata.
//!
//! The list is heterogeneous and its entries carry many fields the walker
//! does not care about. Every field read here is optional: an entry that
//! lacks a field simply does not match, it is never an error.

use serde::Deserialize;
use serde_json::Value;

use crate::types::TransactionRef;

/// Ledger entry type of an account's base record.
pub const ACCOUNT_ROOT: &str = "AccountRoot";

/// The subset of entry fields the walker inspects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct EntryFields {
    #[serde(rename = "Account")]
    pub account: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CreatedEntry {
    #[serde(rename = "LedgerEntryType")]
    pub entry_type: Option<String>,
    #[serde(rename = "NewFields")]
    pub new_fields: Option<EntryFields>,
}

impl CreatedEntry {
    /// True when this entry is the account root of `account` coming into existence.
    pub fn creates_account(&self, account: &str) -> bool {
        self.entry_type.as_deref() == Some(ACCOUNT_ROOT)
            && self.new_fields.as_ref().and_then(|f| f.account.as_deref()) == Some(account)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ModifiedEntry {
    #[serde(rename = "LedgerEntryType")]
    pub entry_type: Option<String>,
    #[serde(rename = "FinalFields")]
    pub final_fields: Option<EntryFields>,
    #[serde(rename = "PreviousTxnID")]
    pub previous_txn_id: Option<TransactionRef>,
}

impl ModifiedEntry {
    /// The previous link for `account`, if this entry modified it and records one.
    pub fn previous_for(&self, account: &str) -> Option<&TransactionRef> {
        let owner = self.final_fields.as_ref()?.account.as_deref()?;
        if owner != account {
            return None;
        }
        self.previous_txn_id.as_ref()
    }
}

/// One entry of `AffectedNodes`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectNode {
    Created(CreatedEntry),
    Modified(ModifiedEntry),
    /// Deleted entries and anything unrecognised.
    Other,
}

impl EffectNode {
    /// Interpret one raw `AffectedNodes` element.
    ///
    /// Sub-objects with the wrong shape degrade to empty entries so that the
    /// scan can move on to the next element.
    pub fn from_value(value: &Value) -> Self {
        if let Some(created) = value.get("CreatedNode") {
            return Self::Created(CreatedEntry::deserialize(created).unwrap_or_default());
        }
        if let Some(modified) = value.get("ModifiedNode") {
            return Self::Modified(ModifiedEntry::deserialize(modified).unwrap_or_default());
        }
        Self::Other
    }
}
