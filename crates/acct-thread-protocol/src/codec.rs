use serde_json::Value;

use crate::error::{ProtocolError, ProtocolResult};
use crate::message::TaggedQuery;
use crate::response::LedgerResponse;

/// Codec for the JSON text messages exchanged with the ledger server.
pub struct JsonCodec;

impl JsonCodec {
    pub fn encode(query: &TaggedQuery) -> ProtocolResult<String> {
        serde_json::to_string(query).map_err(|e| ProtocolError::Serialization(e.to_string()))
    }

    /// Decode an inbound message. Anything other than a JSON object is rejected.
    pub fn decode(text: &str) -> ProtocolResult<LedgerResponse> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| ProtocolError::Deserialization(e.to_string()))?;
        LedgerResponse::from_value(value)
    }

    /// Decode a request; used by servers and test doubles.
    pub fn decode_query(text: &str) -> ProtocolResult<TaggedQuery> {
        serde_json::from_str(text).map_err(|e| ProtocolError::Deserialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::LedgerQuery;
    use crate::types::{RequestId, TransactionRef};

    #[test]
    fn encode_tx_request() {
        let q = TaggedQuery::new(RequestId::new(2), LedgerQuery::tx(TransactionRef::new("E3FE")));
        let text = JsonCodec::encode(&q).unwrap();
        assert_eq!(JsonCodec::decode_query(&text).unwrap(), q);
    }

    #[test]
    fn decode_response_object() {
        let r = JsonCodec::decode(r#"{"id":9,"result":{"status":"success"},"type":"response"}"#)
            .unwrap();
        assert_eq!(r.id(), Some(RequestId::new(9)));
        assert!(r.result().is_some());
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = JsonCodec::decode("not json").unwrap_err();
        assert!(matches!(err, ProtocolError::Deserialization(_)));
    }

    #[test]
    fn decode_rejects_non_object() {
        let err = JsonCodec::decode("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ProtocolError::Deserialization(_)));
    }

    #[test]
    fn decode_query_rejects_unknown_command() {
        assert!(JsonCodec::decode_query(r#"{"id":1,"command":"ledger"}"#).is_err());
    }
}
