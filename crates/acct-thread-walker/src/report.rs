use acct_thread_protocol::{AccountId, LedgerResponse, TransactionRef};

use crate::outcome::WalkOutcome;

/// Receives each response as soon as the walker has it.
///
/// Responses arrive newest first and are delivered before the walker
/// inspects them.
pub trait WalkReporter {
    fn account_info(&mut self, account: &AccountId, response: &LedgerResponse);

    /// `step` counts fetched transactions from 1.
    fn transaction(&mut self, step: usize, reference: &TransactionRef, response: &LedgerResponse);

    fn finished(&mut self, outcome: &WalkOutcome);
}

impl<R: WalkReporter + ?Sized> WalkReporter for &mut R {
    fn account_info(&mut self, account: &AccountId, response: &LedgerResponse) {
        (**self).account_info(account, response)
    }

    fn transaction(&mut self, step: usize, reference: &TransactionRef, response: &LedgerResponse) {
        (**self).transaction(step, reference, response)
    }

    fn finished(&mut self, outcome: &WalkOutcome) {
        (**self).finished(outcome)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ReportEvent {
    AccountInfo(LedgerResponse),
    Transaction { step: usize, reference: TransactionRef, response: LedgerResponse },
    Finished(String),
}

/// Keeps every report in memory.
#[derive(Clone, Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<ReportEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// References of the reported transactions, in report order.
    pub fn transactions(&self) -> Vec<&TransactionRef> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Transaction { reference, .. } => Some(reference),
                _ => None,
            })
            .collect()
    }

    pub fn final_message(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            ReportEvent::Finished(msg) => Some(msg.as_str()),
            _ => None,
        })
    }
}

impl WalkReporter for RecordingReporter {
    fn account_info(&mut self, _account: &AccountId, response: &LedgerResponse) {
        self.events.push(ReportEvent::AccountInfo(response.clone()));
    }

    fn transaction(&mut self, step: usize, reference: &TransactionRef, response: &LedgerResponse) {
        self.events.push(ReportEvent::Transaction {
            step,
            reference: reference.clone(),
            response: response.clone(),
        });
    }

    fn finished(&mut self, outcome: &WalkOutcome) {
        self.events.push(ReportEvent::Finished(outcome.to_string()));
    }
}
