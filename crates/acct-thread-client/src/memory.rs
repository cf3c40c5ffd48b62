//! In-memory ledger server for tests and embedding.

use std::collections::{HashMap, VecDeque};

use acct_thread_protocol::{error_codes, JsonCodec, LedgerQuery, TaggedQuery};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::channel::MessageChannel;
use crate::error::{ClientError, ClientResult};

/// A [`MessageChannel`] backed by canned responses.
///
/// Each request is answered immediately with the response registered for its
/// account or transaction, tagged with the request's id. Unknown accounts and
/// transactions get the server's not-found errors. Stray messages can be
/// queued ahead of the next answer to exercise correlation.
#[derive(Debug, Default)]
pub struct InMemoryChannel {
    inbound: VecDeque<String>,
    accounts: HashMap<String, Value>,
    transactions: HashMap<String, Value>,
    stray: VecDeque<String>,
    requests: Vec<TaggedQuery>,
    scripted: bool,
    hold_open: bool,
    closed: bool,
}

impl InMemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A channel that replays `messages` in order and never answers requests.
    pub fn scripted<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inbound: messages.into_iter().map(Into::into).collect(),
            scripted: true,
            ..Self::default()
        }
    }

    /// Register the `account_info` response body (without `id`) for `account`.
    pub fn with_account_info(mut self, account: &str, body: Value) -> Self {
        self.accounts.insert(account.to_string(), body);
        self
    }

    /// Register the `tx` response body (without `id`) for `hash`.
    pub fn with_transaction(mut self, hash: &str, body: Value) -> Self {
        self.transactions.insert(hash.to_string(), body);
        self
    }

    /// Deliver `message` before the answer to the next request.
    pub fn with_stray(mut self, message: impl Into<String>) -> Self {
        self.stray.push_back(message.into());
        self
    }

    /// Once drained, wait forever instead of reporting the channel closed.
    pub fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> &[TaggedQuery] {
        &self.requests
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn answer(&self, query: &TaggedQuery) -> Value {
        let body = match &query.query {
            LedgerQuery::AccountInfo { account, .. } => {
                self.accounts.get(account.as_str()).cloned().unwrap_or_else(|| {
                    json!({
                        "error": error_codes::ACT_NOT_FOUND,
                        "error_message": "Account not found.",
                        "status": "error",
                        "type": "response"
                    })
                })
            }
            LedgerQuery::Tx { transaction } => {
                self.transactions.get(transaction.as_str()).cloned().unwrap_or_else(|| {
                    json!({
                        "error": error_codes::TXN_NOT_FOUND,
                        "error_message": "Transaction not found.",
                        "status": "error",
                        "type": "response"
                    })
                })
            }
        };
        match body {
            Value::Object(mut map) => {
                map.insert("id".into(), json!(query.id));
                Value::Object(map)
            }
            other => other,
        }
    }
}

#[async_trait]
impl MessageChannel for InMemoryChannel {
    async fn send_text(&mut self, text: String) -> ClientResult<()> {
        if self.closed {
            return Err(ClientError::Transport("channel is closed".into()));
        }
        let query = JsonCodec::decode_query(&text)?;
        if !self.scripted {
            self.inbound.extend(self.stray.drain(..));
            let answer = self.answer(&query);
            self.inbound.push_back(answer.to_string());
        }
        self.requests.push(query);
        Ok(())
    }

    async fn recv_text(&mut self) -> ClientResult<Option<String>> {
        if let Some(msg) = self.inbound.pop_front() {
            return Ok(Some(msg));
        }
        if self.hold_open && !self.closed {
            return std::future::pending().await;
        }
        Ok(None)
    }

    async fn close(&mut self) -> ClientResult<()> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acct_thread_protocol::{RequestId, TransactionRef};

    fn send(query: LedgerQuery, id: u64) -> String {
        JsonCodec::encode(&TaggedQuery::new(RequestId::new(id), query)).unwrap()
    }

    #[tokio::test]
    async fn answers_registered_transaction() {
        let mut ch = InMemoryChannel::new()
            .with_transaction("AA", json!({"result": {"hash": "AA"}}));
        ch.send_text(send(LedgerQuery::tx(TransactionRef::new("AA")), 5)).await.unwrap();
        let reply: Value = serde_json::from_str(&ch.recv_text().await.unwrap().unwrap()).unwrap();
        assert_eq!(reply["id"], 5);
        assert_eq!(reply["result"]["hash"], "AA");
        assert_eq!(ch.requests().len(), 1);
    }

    #[tokio::test]
    async fn unknown_transaction_is_not_found() {
        let mut ch = InMemoryChannel::new();
        ch.send_text(send(LedgerQuery::tx(TransactionRef::new("BB")), 1)).await.unwrap();
        let reply: Value = serde_json::from_str(&ch.recv_text().await.unwrap().unwrap()).unwrap();
        assert_eq!(reply["error"], "txnNotFound");
    }

    #[tokio::test]
    async fn stray_messages_precede_answer() {
        let mut ch = InMemoryChannel::new().with_stray(r#"{"id":99}"#);
        ch.send_text(send(LedgerQuery::tx(TransactionRef::new("CC")), 1)).await.unwrap();
        assert_eq!(ch.recv_text().await.unwrap().unwrap(), r#"{"id":99}"#);
        assert!(ch.recv_text().await.unwrap().is_some());
        assert!(ch.recv_text().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn scripted_channel_does_not_answer() {
        let mut ch = InMemoryChannel::scripted([r#"{"id":9}"#]);
        ch.send_text(send(LedgerQuery::tx(TransactionRef::new("EE")), 1)).await.unwrap();
        assert_eq!(ch.requests().len(), 1);
        assert_eq!(ch.recv_text().await.unwrap().unwrap(), r#"{"id":9}"#);
        assert!(ch.recv_text().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn send_after_close_fails() {
        let mut ch = InMemoryChannel::new();
        ch.close().await.unwrap();
        assert!(ch.is_closed());
        let err = ch.send_text(send(LedgerQuery::tx(TransactionRef::new("DD")), 1)).await;
        assert!(matches!(err, Err(ClientError::Transport(_))));
    }

    #[tokio::test]
    async fn rejects_malformed_request() {
        let mut ch = InMemoryChannel::new();
        let err = ch.send_text("{}".into()).await.unwrap_err();
        assert!(matches!(err, ClientError::Protocol(_)));
    }
}
