//! A console front end for the external Claude Code agent.
//!
//! The binary forwards prompts to the agent and renders the streamed
//! responses. All agent behavior lives behind the [`eduagent_sdk`]
//! contract; this crate only assembles query options, runs the
//! interactive loop, and keeps a few running totals.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

mod command;
mod console;
mod session;

pub use command::Command;
pub use console::{
    LineOutcome, handle_line, print_farewell, print_greeting, print_help,
    print_stats, run_exchange,
};
pub use session::SessionStats;
