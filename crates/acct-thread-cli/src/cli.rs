use acct_thread_client::{Endpoint, DEFAULT_ENDPOINT};
use acct_thread_protocol::AccountId;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "acct-thread",
    about = "Walk back through an account's history and print every transaction that affected it, newest first",
    version,
    after_help = "If <SERVER> is omitted defaults to \"ws://s2.ripple.com:443\".\nTo capture results redirect stdout to a file."
)]
pub struct Cli {
    /// Account ID: starts with "r", 25 to 35 characters long
    pub account: AccountId,

    /// WebSocket server as ws://<server>:<port>
    #[arg(default_value = DEFAULT_ENDPOINT)]
    pub server: Endpoint,
}
