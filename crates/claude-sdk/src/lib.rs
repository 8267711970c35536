//! An agent client backed by the Claude Code command-line program.
//!
//! The external agent is reached by spawning `claude` in streaming JSON
//! mode: one query becomes one subprocess invocation, and each line the
//! process writes to stdout is one tagged message. Conversation state is
//! kept on the agent's side; continuing a session is just a flag on the
//! next invocation.

#[macro_use]
extern crate tracing;

mod args;
mod stream;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::process::Stdio;

use eduagent_sdk::{AgentClient, AgentClientError, ErrorKind, QueryRequest};
use tokio::process::Command;

use args::build_args;
pub use stream::{ClaudeStream, JsonMessageStream};

/// The program spawned when no other is configured.
pub const DEFAULT_PROGRAM: &str = "claude";

/// Error type for [`ClaudeClient`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    pub(crate) fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl AgentClientError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Agent client that drives the Claude Code CLI subprocess.
#[derive(Clone, Debug)]
pub struct ClaudeClient {
    program: String,
}

impl ClaudeClient {
    /// Creates a client that spawns the default `claude` program.
    #[inline]
    pub fn new() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_owned(),
        }
    }

    /// Creates a client that spawns the given program instead.
    #[inline]
    pub fn with_program<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ClaudeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentClient for ClaudeClient {
    type Error = Error;
    type Stream = ClaudeStream;

    fn query(
        &self,
        req: &QueryRequest,
    ) -> impl Future<Output = Result<Self::Stream, Self::Error>> + Send + 'static
    {
        let program = self.program.clone();
        let args = build_args(req);

        async move {
            debug!("spawning {program} with {} args", args.len());
            let mut child = Command::new(&program)
                .args(&args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::inherit())
                .kill_on_drop(true)
                .spawn()
                .map_err(|err| {
                    Error::new(
                        format!("failed to spawn {program}: {err}"),
                        ErrorKind::Spawn,
                    )
                })?;

            let stdout = child.stdout.take().ok_or_else(|| {
                Error::new("child stdout was not captured", ErrorKind::Spawn)
            })?;
            Ok(ClaudeStream::from_child(child, stdout))
        }
    }
}
