//! Account thread walker.
//!
//! Starting from the `PreviousTxnID` recorded on an account's root entry, the
//! walker fetches each transaction in turn and follows the link left in its
//! metadata to the one before it, newest first, until the account's creation
//! or some other terminal condition is reached.
//!
//! - [`next_link`] decides, for one fetched transaction, where the thread goes next
//! - [`ChainWalker`] drives the queries and reports each response as it arrives
//! - [`WalkOutcome`] names the terminal state and renders its final message

pub mod error;
pub mod extract;
pub mod outcome;
pub mod report;
pub mod walker;

pub use error::{WalkError, WalkResult};
pub use extract::{next_link, Link};
pub use outcome::{StopReason, WalkOutcome, WalkSummary};
pub use report::{RecordingReporter, ReportEvent, WalkReporter};
pub use walker::{ChainState, ChainWalker};
