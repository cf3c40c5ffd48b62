use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::effect::EffectNode;
use crate::error::{ProtocolError, ProtocolResult};
use crate::types::{RequestId, TransactionRef};

/// An error reported by the ledger server in place of a result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerError {
    pub code: String,
    pub message: Option<String>,
}

impl ServerError {
    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    /// Best human-readable text: the message if present and non-empty, else the code.
    pub fn describe(&self) -> &str {
        match self.message.as_deref() {
            Some(msg) if !msg.is_empty() => msg,
            _ => &self.code,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[derive(Deserialize)]
struct AccountInfoResult {
    account_data: Option<AccountRoot>,
}

#[derive(Deserialize)]
struct AccountRoot {
    #[serde(rename = "PreviousTxnID")]
    previous_txn_id: Option<TransactionRef>,
}

#[derive(Deserialize)]
struct TxResult {
    meta: Option<TxMeta>,
}

#[derive(Deserialize)]
struct TxMeta {
    #[serde(rename = "AffectedNodes")]
    affected_nodes: Option<Vec<Value>>,
}

/// A response from the ledger server.
///
/// The JSON object is kept as received so it can be printed verbatim; the
/// accessors below read the handful of fields the walker needs.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerResponse {
    body: Map<String, Value>,
}

impl LedgerResponse {
    pub fn new(body: Map<String, Value>) -> Self {
        Self { body }
    }

    /// Wrap a decoded JSON value; anything but an object is rejected.
    pub fn from_value(value: Value) -> ProtocolResult<Self> {
        match value {
            Value::Object(map) => Ok(Self::new(map)),
            other => Err(ProtocolError::Deserialization(format!(
                "expected a JSON object, got: {other}"
            ))),
        }
    }

    pub fn id(&self) -> Option<RequestId> {
        self.body.get("id").and_then(Value::as_u64).map(RequestId::new)
    }

    /// Drop the correlation id; it is noise once the response is matched.
    pub fn strip_id(&mut self) -> Option<Value> {
        self.body.shift_remove("id")
    }

    pub fn error(&self) -> Option<ServerError> {
        let code = match self.body.get("error")? {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let message = self
            .body
            .get("error_message")
            .and_then(Value::as_str)
            .map(str::to_string);
        Some(ServerError { code, message })
    }

    pub fn result(&self) -> Option<&Value> {
        self.body.get("result")
    }

    /// `result.account_data.PreviousTxnID` of an `account_info` response.
    pub fn previous_txn_id(&self) -> Option<TransactionRef> {
        let result = AccountInfoResult::deserialize(self.result()?).ok()?;
        result.account_data?.previous_txn_id
    }

    /// `result.meta.AffectedNodes` of a `tx` response, `None` if any level is missing.
    pub fn affected_nodes(&self) -> Option<Vec<EffectNode>> {
        let result = TxResult::deserialize(self.result()?).ok()?;
        let nodes = result.meta?.affected_nodes?;
        Some(nodes.iter().map(EffectNode::from_value).collect())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.body)
    }

    /// JSON indented by four spaces.
    pub fn to_pretty(&self) -> String {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        match self.body.serialize(&mut ser) {
            Ok(()) => String::from_utf8(out).unwrap_or_default(),
            Err(_) => Value::Object(self.body.clone()).to_string(),
        }
    }
}

impl From<Map<String, Value>> for LedgerResponse {
    fn from(body: Map<String, Value>) -> Self {
        Self::new(body)
    }
}
