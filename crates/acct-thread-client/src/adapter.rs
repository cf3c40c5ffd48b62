use acct_thread_protocol::{
    AccountId, JsonCodec, LedgerQuery, LedgerResponse, TaggedQuery, TransactionRef,
};
use tracing::{debug, info};

use crate::channel::MessageChannel;
use crate::config::ClientConfig;
use crate::correlator::RequestCorrelator;
use crate::error::ClientResult;
use crate::ws::WsChannel;

/// Issues ledger queries over a [`MessageChannel`].
///
/// Errors reported by the ledger (unknown account, missing transaction, ...)
/// come back as ordinary responses; only channel and decoding failures are
/// returned as `Err`.
#[derive(Debug)]
pub struct LedgerClient<C> {
    channel: C,
    correlator: RequestCorrelator,
    requests_sent: u64,
}

impl LedgerClient<WsChannel> {
    /// Open a WebSocket connection as described by `config`.
    pub async fn connect(config: &ClientConfig) -> ClientResult<Self> {
        let channel = WsChannel::connect(config).await?;
        Ok(Self::with_correlator(channel, RequestCorrelator::new(config.response_timeout)))
    }
}

impl<C: MessageChannel> LedgerClient<C> {
    pub fn new(channel: C) -> Self {
        Self::with_correlator(channel, RequestCorrelator::default())
    }

    pub fn with_correlator(channel: C, correlator: RequestCorrelator) -> Self {
        Self { channel, correlator, requests_sent: 0 }
    }

    /// Look up `account` in the latest validated ledger.
    pub async fn fetch_account_info(&mut self, account: &AccountId) -> ClientResult<LedgerResponse> {
        self.request(LedgerQuery::account_info(account.clone())).await
    }

    /// Look up a transaction by hash.
    pub async fn fetch_transaction(
        &mut self,
        reference: &TransactionRef,
    ) -> ClientResult<LedgerResponse> {
        self.request(LedgerQuery::tx(reference.clone())).await
    }

    async fn request(&mut self, query: LedgerQuery) -> ClientResult<LedgerResponse> {
        let id = self.correlator.next_id();
        let command = query.command();
        let text = JsonCodec::encode(&TaggedQuery::new(id, query))?;
        debug!(%id, command, "sending request");
        self.channel.send_text(text).await?;
        self.requests_sent += 1;

        let mut response = self.correlator.await_matching(&mut self.channel, id).await?;
        response.strip_id();
        debug!(%id, command, error = response.error().is_some(), "received response");
        Ok(response)
    }

    /// Number of queries sent on this connection.
    pub fn requests_sent(&self) -> u64 {
        self.requests_sent
    }

    pub fn correlator(&self) -> &RequestCorrelator {
        &self.correlator
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Release the underlying channel. Queries sent afterwards fail.
    pub async fn close(&mut self) -> ClientResult<()> {
        info!(requests = self.requests_sent, "closing ledger connection");
        self.channel.close().await
    }
}
