//! Reviewbot Core - branch-gated pull request reviewer assignment
//!
//! This crate holds everything that does not talk to GitHub directly: input
//! validation, the workflow event context, the runner output channels, and
//! the assignment step itself.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod runtime;
pub mod step;

pub use api::{Assignment, ReviewRequest, ReviewRequestResponse, ReviewerApi};
pub use config::{parse_list, Config, InputValues};
pub use context::{EventContext, EventKind, Repo};
pub use error::{Error, Result};
pub use runtime::{ActionsRuntime, MemoryRuntime, Runtime};
pub use step::{Outcome, SkipReason};
