//! The contract between the console front end and the external coding agent.
//!
//! This crate defines the tagged message shapes the agent streams back, the
//! options bundle a query carries, and the client/stream traits a transport
//! has to implement. The agent itself stays an opaque external collaborator:
//! nothing in here knows how a response is produced, only what shapes it
//! arrives in.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to. The production
//! transport and the scripted test client live in their own crates.

#![deny(missing_docs)]

mod client;
mod error;
mod message;
mod options;

pub use client::*;
pub use error::*;
pub use message::*;
pub use options::*;
