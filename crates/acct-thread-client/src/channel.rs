use async_trait::async_trait;

use crate::error::ClientResult;

/// Ordered, bidirectional text channel to a ledger server.
#[async_trait]
pub trait MessageChannel: Send {
    async fn send_text(&mut self, text: String) -> ClientResult<()>;

    /// Next inbound message, or `None` once the peer has closed the channel.
    async fn recv_text(&mut self) -> ClientResult<Option<String>>;

    async fn close(&mut self) -> ClientResult<()>;
}

#[async_trait]
impl<C: MessageChannel + ?Sized> MessageChannel for Box<C> {
    async fn send_text(&mut self, text: String) -> ClientResult<()> {
        (**self).send_text(text).await
    }

    async fn recv_text(&mut self) -> ClientResult<Option<String>> {
        (**self).recv_text().await
    }

    async fn close(&mut self) -> ClientResult<()> {
        (**self).close().await
    }
}
