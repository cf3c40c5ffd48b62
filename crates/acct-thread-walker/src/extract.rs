use acct_thread_protocol::{error_codes, AccountId, EffectNode, LedgerResponse, ServerError, TransactionRef};

/// Where the thread goes after one fetched transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Link {
    /// Follow this older transaction next.
    Next(TransactionRef),
    /// The transaction created the account; history is complete.
    Created,
    /// Nothing in the metadata references the account.
    Exhausted,
    /// The server answered `txnNotFound`.
    InsufficientHistory,
    /// The server answered with some other error.
    ServerError(ServerError),
    /// The response has no `meta.AffectedNodes` list.
    MissingMetadata,
}

/// Find the link preceding `response` in `account`'s thread.
///
/// Errors in the response take precedence, then a missing metadata list.
/// Otherwise entries are scanned in order and the first that applies wins:
/// the account root of `account` being created, or an entry modified for
/// `account` that records its previous transaction. An empty previous
/// reference ends the scan like an exhausted list.
pub fn next_link(response: &LedgerResponse, account: &AccountId) -> Link {
    if let Some(error) = response.error() {
        if error.is(error_codes::TXN_NOT_FOUND) {
            return Link::InsufficientHistory;
        }
        return Link::ServerError(error);
    }
    let Some(nodes) = response.affected_nodes() else {
        return Link::MissingMetadata;
    };
    for node in &nodes {
        match node {
            EffectNode::Created(entry) if entry.creates_account(account.as_str()) => {
                return Link::Created;
            }
            EffectNode::Modified(entry) => {
                if let Some(previous) = entry.previous_for(account.as_str()) {
                    if previous.is_empty() {
                        return Link::Exhausted;
                    }
                    return Link::Next(previous.clone());
                }
            }
            _ => {}
        }
    }
    Link::Exhausted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const ACCT: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const OTHER: &str = "rPEPPER7kfTD9w2To4CQk6UCfuHM9c6GDY";

    fn account() -> AccountId {
        ACCT.parse().unwrap()
    }

    fn tx(nodes: Value) -> LedgerResponse {
        LedgerResponse::from_value(json!({
            "result": {"meta": {"AffectedNodes": nodes, "TransactionResult": "tesSUCCESS"}}
        }))
        .unwrap()
    }

    fn modified(owner: &str, previous: &str) -> Value {
        json!({"ModifiedNode": {
            "LedgerEntryType": "AccountRoot",
            "FinalFields": {"Account": owner},
            "PreviousTxnID": previous
        }})
    }

    fn created(owner: &str) -> Value {
        json!({"CreatedNode": {"LedgerEntryType": "AccountRoot", "NewFields": {"Account": owner}}})
    }

    #[test]
    fn follows_modified_entry_for_account() {
        let r = tx(json!([modified(OTHER, "11"), modified(ACCT, "22")]));
        assert_eq!(next_link(&r, &account()), Link::Next(TransactionRef::new("22")));
    }

    #[test]
    fn first_match_wins() {
        let r = tx(json!([modified(ACCT, "33"), created(ACCT)]));
        assert_eq!(next_link(&r, &account()), Link::Next(TransactionRef::new("33")));
        let r = tx(json!([created(ACCT), modified(ACCT, "33")]));
        assert_eq!(next_link(&r, &account()), Link::Created);
    }

    #[test]
    fn creation_of_other_account_is_ignored() {
        let r = tx(json!([created(OTHER), modified(ACCT, "44")]));
        assert_eq!(next_link(&r, &account()), Link::Next(TransactionRef::new("44")));
    }

    #[test]
    fn entries_missing_fields_are_skipped() {
        let r = tx(json!([
            {"ModifiedNode": {"LedgerEntryType": "DirectoryNode"}},
            {"ModifiedNode": {"FinalFields": {"Account": ACCT}}},
            {"DeletedNode": {"FinalFields": {"Account": ACCT}}},
            modified(ACCT, "55")
        ]));
        assert_eq!(next_link(&r, &account()), Link::Next(TransactionRef::new("55")));
    }

    #[test]
    fn no_reference_is_exhausted() {
        let r = tx(json!([modified(OTHER, "66")]));
        assert_eq!(next_link(&r, &account()), Link::Exhausted);
        assert_eq!(next_link(&tx(json!([])), &account()), Link::Exhausted);
    }

    #[test]
    fn empty_previous_reference_is_exhausted() {
        let r = tx(json!([modified(ACCT, "")]));
        assert_eq!(next_link(&r, &account()), Link::Exhausted);
    }

    #[test]
    fn missing_metadata() {
        let r = LedgerResponse::from_value(json!({"result": {"hash": "77"}})).unwrap();
        assert_eq!(next_link(&r, &account()), Link::MissingMetadata);
    }

    #[test]
    fn txn_not_found_is_insufficient_history() {
        let r = LedgerResponse::from_value(json!({"error": "txnNotFound"})).unwrap();
        assert_eq!(next_link(&r, &account()), Link::InsufficientHistory);
    }

    #[test]
    fn other_errors_are_server_errors() {
        let r = LedgerResponse::from_value(json!({
            "error": "tooBusy",
            "error_message": "The server is too busy"
        }))
        .unwrap();
        match next_link(&r, &account()) {
            Link::ServerError(e) => assert_eq!(e.describe(), "The server is too busy"),
            other => panic!("unexpected link {other:?}"),
        }
    }
}
