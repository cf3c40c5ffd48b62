use std::io::{self, Stderr, Stdout, Write};

use acct_thread_protocol::{AccountId, LedgerResponse, TransactionRef};
use acct_thread_walker::{WalkOutcome, WalkReporter};
use colored::Colorize;

use crate::spinner::Spinner;

const RULE_WIDTH: usize = 79;

/// Prints responses to `out` and drives the spinner on `progress`.
///
/// Write failures do not interrupt the walk; the first one is kept and
/// returned by [`ConsoleReporter::finish`].
pub struct ConsoleReporter<O: Write, E: Write> {
    out: O,
    spinner: Option<Spinner<E>>,
    error: Option<io::Error>,
}

impl ConsoleReporter<Stdout, Stderr> {
    /// Report to stdout, with a spinner on stderr when it is a terminal.
    pub fn stdio() -> Self {
        use std::io::IsTerminal;
        let stderr = io::stderr();
        let spinner = stderr.is_terminal().then(|| Spinner::new(stderr));
        Self::new(io::stdout(), spinner)
    }
}

impl<O: Write, E: Write> ConsoleReporter<O, E> {
    pub fn new(out: O, spinner: Option<Spinner<E>>) -> Self {
        Self { out, spinner, error: None }
    }

    fn keep(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }

    fn print_response(&mut self, response: &LedgerResponse) {
        let result = writeln!(self.out, "{}", response.to_pretty());
        self.keep(result);
    }

    /// Flush output and surface the first write error, if any.
    pub fn finish(&mut self) -> io::Result<()> {
        if let Some(spinner) = self.spinner.as_mut() {
            spinner.clear()?;
        }
        self.out.flush()?;
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn into_output(self) -> O {
        self.out
    }
}

impl<O: Write, E: Write> WalkReporter for ConsoleReporter<O, E> {
    fn account_info(&mut self, _account: &AccountId, response: &LedgerResponse) {
        self.print_response(response);
    }

    fn transaction(&mut self, _step: usize, _reference: &TransactionRef, response: &LedgerResponse) {
        if let Some(spinner) = self.spinner.as_mut() {
            let ticked = spinner.tick();
            self.keep(ticked);
        }
        let result = writeln!(self.out, "\n{}\n", "-".repeat(RULE_WIDTH));
        self.keep(result);
        self.print_response(response);
    }

    fn finished(&mut self, outcome: &WalkOutcome) {
        if let Some(spinner) = self.spinner.as_mut() {
            let cleared = spinner.clear();
            self.keep(cleared);
        }
        let message = outcome.to_string();
        let result = if outcome.is_unexpected() {
            writeln!(self.out, "{}", message.yellow())
        } else {
            writeln!(self.out, "{}", message.green())
        };
        self.keep(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> LedgerResponse {
        LedgerResponse::from_value(value).unwrap()
    }

    fn account() -> AccountId {
        "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh".parse().unwrap()
    }

    #[test]
    fn prints_rule_before_each_transaction() {
        colored::control::set_override(false);
        let mut r: ConsoleReporter<Vec<u8>, Vec<u8>> = ConsoleReporter::new(Vec::new(), None);
        r.account_info(&account(), &response(json!({"result": {"n": 0}})));
        r.transaction(1, &TransactionRef::new("B"), &response(json!({"result": {"n": 1}})));
        r.transaction(2, &TransactionRef::new("A"), &response(json!({"result": {"n": 2}})));
        r.finished(&WalkOutcome::Created { account: account() });
        r.finish().unwrap();

        let text = String::from_utf8(r.into_output()).unwrap();
        let rule = "-".repeat(79);
        assert_eq!(text.matches(&rule).count(), 2);
        let first = text.find("\"n\": 1").unwrap();
        let second = text.find("\"n\": 2").unwrap();
        assert!(text.find("\"n\": 0").unwrap() < first);
        assert!(first < second);
        assert!(text.contains(&format!("\n\n{rule}\n\n{{")));
        assert!(text.trim_end().ends_with("Done."));
    }

    #[test]
    fn spinner_ticks_per_transaction() {
        let spinner = Spinner::new(Vec::new());
        let mut r = ConsoleReporter::new(Vec::new(), Some(spinner));
        r.transaction(1, &TransactionRef::new("B"), &response(json!({})));
        r.transaction(2, &TransactionRef::new("A"), &response(json!({})));
        r.finished(&WalkOutcome::NoHistory { account: account() });
        r.finish().unwrap();
        let spinner = r.spinner.take().unwrap();
        assert_eq!(spinner.ticks(), 2);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_surface_on_finish() {
        let mut r: ConsoleReporter<Broken, Vec<u8>> = ConsoleReporter::new(Broken, None);
        r.account_info(&account(), &response(json!({})));
        let err = r.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
