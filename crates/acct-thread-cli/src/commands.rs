use std::io::IsTerminal;
use std::process::ExitCode;

use acct_thread_client::{ClientConfig, ClientError, LedgerClient, MessageChannel};
use acct_thread_protocol::AccountId;
use acct_thread_walker::{ChainWalker, WalkReporter, WalkSummary};
use colored::Colorize;
use tracing::warn;

use crate::cli::Cli;
use crate::printer::ConsoleReporter;

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
    let config = ClientConfig::from_env(cli.server)?;

    let mut client = match LedgerClient::connect(&config).await {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{}\n", connect_failure(&err).red());
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut reporter = ConsoleReporter::stdio();
    let walked = thread_account(&mut client, &cli.account, &mut reporter).await;
    reporter.finish()?;
    walked?;
    Ok(ExitCode::SUCCESS)
}

/// Walk `account` and release the channel whatever the walk's result.
pub async fn thread_account<C, R>(
    client: &mut LedgerClient<C>,
    account: &AccountId,
    reporter: R,
) -> anyhow::Result<WalkSummary>
where
    C: MessageChannel,
    R: WalkReporter,
{
    let mut walker = ChainWalker::new(reporter);
    let walked = walker.walk(client, account).await;
    if let Err(e) = client.close().await {
        warn!(error = %e, "failed to close connection");
    }
    Ok(walked?)
}

fn connect_failure(err: &ClientError) -> String {
    match err {
        ClientError::Unreachable { endpoint, .. } => {
            format!("Unable to open connection to {endpoint}.")
        }
        ClientError::ConnectionRefused { endpoint } => format!("Connection to {endpoint} refused."),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acct_thread_client::InMemoryChannel;
    use acct_thread_walker::{RecordingReporter, WalkOutcome};
    use serde_json::json;

    const ACCT: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    fn account() -> AccountId {
        ACCT.parse().unwrap()
    }

    #[tokio::test]
    async fn channel_closed_after_walk() {
        let channel = InMemoryChannel::new().with_account_info(
            ACCT,
            json!({"result": {"account_data": {"Account": ACCT}}}),
        );
        let mut client = LedgerClient::new(channel);
        let mut reporter = RecordingReporter::new();
        let summary = thread_account(&mut client, &account(), &mut reporter).await.unwrap();
        assert_eq!(summary.outcome, WalkOutcome::NoHistory { account: account() });
        assert!(client.channel().is_closed());
    }

    #[tokio::test]
    async fn channel_closed_after_failed_walk() {
        let mut client = LedgerClient::new(InMemoryChannel::scripted(Vec::<String>::new()));
        let mut reporter = RecordingReporter::new();
        let result = thread_account(&mut client, &account(), &mut reporter).await;
        assert!(result.is_err());
        assert!(client.channel().is_closed());
    }

    #[test]
    fn connect_failure_messages() {
        let refused = ClientError::ConnectionRefused { endpoint: "ws://localhost:6006".into() };
        assert_eq!(connect_failure(&refused), "Connection to ws://localhost:6006 refused.");
        let unreachable = ClientError::Unreachable {
            endpoint: "ws://nowhere.invalid:443".into(),
            reason: "dns".into(),
        };
        assert_eq!(
            connect_failure(&unreachable),
            "Unable to open connection to ws://nowhere.invalid:443."
        );
    }
}
