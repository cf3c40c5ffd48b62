use std::collections::HashSet;

use acct_thread_client::{LedgerClient, MessageChannel};
use acct_thread_protocol::{AccountId, TransactionRef};
use tracing::{debug, info};

use crate::error::WalkResult;
use crate::extract::{next_link, Link};
use crate::outcome::{StopReason, WalkOutcome, WalkSummary};
use crate::report::WalkReporter;

/// Position of a walk in the account's thread.
#[derive(Clone, Debug)]
pub struct ChainState {
    current: TransactionRef,
    visited: Vec<TransactionRef>,
    seen: HashSet<TransactionRef>,
}

impl ChainState {
    pub fn new(start: TransactionRef) -> Self {
        Self { current: start, visited: Vec::new(), seen: HashSet::new() }
    }

    pub fn current(&self) -> &TransactionRef {
        &self.current
    }

    /// Mark the current transaction as fetched.
    fn record_fetch(&mut self) -> usize {
        self.seen.insert(self.current.clone());
        self.visited.push(self.current.clone());
        self.visited.len()
    }

    /// Move to an older transaction. Fails if it was already fetched.
    fn advance(&mut self, previous: TransactionRef) -> Result<(), TransactionRef> {
        if self.seen.contains(&previous) {
            return Err(previous);
        }
        self.current = previous;
        Ok(())
    }

    fn into_visited(self) -> Vec<TransactionRef> {
        self.visited
    }
}

/// Walks an account's history from newest to oldest.
///
/// One query is outstanding at a time: one `account_info`, then one `tx` per
/// link followed. Every response is handed to the reporter before it is
/// inspected.
#[derive(Debug)]
pub struct ChainWalker<R> {
    reporter: R,
}

impl<R: WalkReporter> ChainWalker<R> {
    pub fn new(reporter: R) -> Self {
        Self { reporter }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Walk `account`'s thread to a terminal state.
    ///
    /// Ledger errors end the walk with [`WalkOutcome::Error`]; only channel
    /// failures are returned as `Err`.
    pub async fn walk<C: MessageChannel>(
        &mut self,
        client: &mut LedgerClient<C>,
        account: &AccountId,
    ) -> WalkResult<WalkSummary> {
        let summary = self.run(client, account).await?;
        info!(
            %account,
            outcome = summary.outcome.label(),
            transactions = summary.transactions_fetched(),
            "walk finished"
        );
        self.reporter.finished(&summary.outcome);
        Ok(summary)
    }

    async fn run<C: MessageChannel>(
        &mut self,
        client: &mut LedgerClient<C>,
        account: &AccountId,
    ) -> WalkResult<WalkSummary> {
        let info = client.fetch_account_info(account).await?;
        self.reporter.account_info(account, &info);

        if let Some(error) = info.error() {
            let outcome =
                WalkOutcome::Error(StopReason::AccountLookup { account: account.clone(), error });
            return Ok(WalkSummary { outcome, visited: Vec::new() });
        }
        let Some(start) = info.previous_txn_id().filter(|r| !r.is_empty()) else {
            let outcome = WalkOutcome::NoHistory { account: account.clone() };
            return Ok(WalkSummary { outcome, visited: Vec::new() });
        };

        let mut state = ChainState::new(start);
        let outcome = loop {
            let reference = state.current().clone();
            debug!(%reference, "fetching transaction");
            let response = client.fetch_transaction(&reference).await?;
            let step = state.record_fetch();
            self.reporter.transaction(step, &reference, &response);

            match next_link(&response, account) {
                Link::Next(previous) => {
                    if let Err(reference) = state.advance(previous) {
                        break WalkOutcome::Error(StopReason::Cycle { reference });
                    }
                }
                Link::Created => break WalkOutcome::Created { account: account.clone() },
                Link::Exhausted => break WalkOutcome::Exhausted { response },
                Link::InsufficientHistory => {
                    break WalkOutcome::Error(StopReason::InsufficientHistory { reference });
                }
                Link::ServerError(error) => {
                    break WalkOutcome::Error(StopReason::Server { reference, error });
                }
                Link::MissingMetadata => {
                    break WalkOutcome::Error(StopReason::MissingMetadata { response });
                }
            }
        };
        Ok(WalkSummary { outcome, visited: state.into_visited() })
    }
}
