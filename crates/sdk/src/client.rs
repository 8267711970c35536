use std::error::Error;
use std::pin::Pin;
use std::task::{self, Poll};

use crate::error::ErrorKind;
use crate::message::Message;
use crate::options::QueryOptions;

/// The error type for an agent client.
pub trait AgentClientError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// One query to dispatch to the agent.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryRequest {
    /// The user's free-text prompt.
    pub prompt: String,
    /// The configuration bundle for this query.
    pub options: QueryOptions,
}

/// The message stream produced by one query.
pub trait AgentStream: Sized + Send + 'static {
    /// The error type that may be returned by the stream.
    type Error: AgentClientError;

    /// Attempts to pull out the next message from the stream.
    ///
    /// # Return value
    ///
    /// - `Poll::Pending` means the stream is still waiting for the next
    ///   message. Implementations will ensure that the current task will
    ///   be notified when the next message may be ready.
    /// - `Poll::Ready(Ok(Some(message)))` means the stream has a message
    ///   to deliver, and may produce further messages on subsequent
    ///   `poll_next_message` calls.
    /// - `Poll::Ready(Ok(None))` means the stream has completed.
    /// - `Poll::Ready(Err(error))` means an error occurred; the stream
    ///   must not be polled again after it.
    ///
    /// Calling this method after completion should always return `None`.
    fn poll_next_message(
        self: Pin<&mut Self>,
        cx: &mut task::Context<'_>,
    ) -> Poll<Result<Option<Message>, Self::Error>>;
}

/// A type that can dispatch queries to the external agent.
///
/// Once the client is created, it should behave like a stateless object.
/// All conversation state lives on the agent's side; the client only
/// carries enough configuration to reach it.
pub trait AgentClient: Send + Sync {
    /// The error type that may be returned by the client.
    type Error: AgentClientError;

    /// The stream type produced by one query.
    type Stream: AgentStream<Error = Self::Error>;

    /// Dispatches one query and resolves to its message stream.
    fn query(
        &self,
        req: &QueryRequest,
    ) -> impl Future<Output = Result<Self::Stream, Self::Error>> + Send + 'static;
}
