#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! Mailbox-driven units for tailing a file and validating console input
//!
//! Each unit runs as its own tokio task with a private FIFO inbox and
//! processes one message at a time. Units talk to each other only by
//! sending owned message values.
//!
//! - [`TailUnit`] owns a file handle and a byte cursor and forwards newly
//!   appended text to a reporter.
//! - [`ValidationUnit`] classifies input and acknowledges every request.

mod cursor;
mod tail;
mod validation;

pub use cursor::TailCursor;
pub use tail::{TailHandle, TailUnit};
pub use validation::{classify, ValidationClient, ValidationHandle, ValidationUnit};
