use std::time::Duration;

use acct_thread_protocol::{JsonCodec, LedgerResponse, RequestId};
use tracing::warn;

use crate::channel::MessageChannel;
use crate::error::{ClientError, ClientResult};

/// Issues request ids and picks the matching response off a channel.
///
/// Requests are never pipelined: the caller sends one request and waits for
/// its answer before sending the next. Messages carrying any other id are
/// logged and discarded.
#[derive(Debug)]
pub struct RequestCorrelator {
    last_id: u64,
    response_timeout: Option<Duration>,
    discarded: u64,
}

impl Default for RequestCorrelator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RequestCorrelator {
    pub fn new(response_timeout: Option<Duration>) -> Self {
        Self { last_id: 0, response_timeout, discarded: 0 }
    }

    /// A fresh id, greater than every id issued before. The first is 1.
    pub fn next_id(&mut self) -> RequestId {
        self.last_id += 1;
        RequestId::new(self.last_id)
    }

    pub fn response_timeout(&self) -> Option<Duration> {
        self.response_timeout
    }

    /// Number of inbound messages discarded because their id did not match.
    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    /// Receive until a message with `id` arrives.
    ///
    /// Without a response timeout this blocks for as long as the channel stays
    /// open and silent. Duplicate deliveries are not tracked: any message
    /// carrying `id` is accepted.
    pub async fn await_matching<C>(
        &mut self,
        channel: &mut C,
        id: RequestId,
    ) -> ClientResult<LedgerResponse>
    where
        C: MessageChannel + ?Sized,
    {
        let limit = self.response_timeout;
        match limit {
            None => self.receive_until(channel, id).await,
            Some(after) => tokio::time::timeout(after, self.receive_until(channel, id))
                .await
                .map_err(|_| ClientError::ResponseTimeout { id, after })?,
        }
    }

    async fn receive_until<C>(
        &mut self,
        channel: &mut C,
        id: RequestId,
    ) -> ClientResult<LedgerResponse>
    where
        C: MessageChannel + ?Sized,
    {
        loop {
            let text = channel
                .recv_text()
                .await?
                .ok_or(ClientError::ChannelClosed(id))?;
            let response = JsonCodec::decode(&text)?;
            match response.id() {
                Some(got) if got == id => return Ok(response),
                Some(got) => {
                    warn!(expected = %id, received = %got, "unexpected websocket message id");
                }
                None => {
                    warn!(expected = %id, "websocket message without an id");
                }
            }
            self.discarded += 1;
        }
    }
}
