//! A scripted fake agent for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::future::ready;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, ready};
use std::time::Duration;

use eduagent_sdk::{
    AgentClient, AgentClientError, AgentStream, ErrorKind, Message,
    QueryRequest,
};
use tokio::time::{Sleep, sleep};

pub use preset::*;

/// Error type for [`ScriptedClient`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Error {}

impl AgentClientError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// The stream replayed for one scripted exchange.
#[derive(Debug)]
pub struct ScriptedStream {
    items: VecDeque<Message>,
    failure: Option<(ErrorKind, String)>,
    delay: Duration,
    sleep: Option<Pin<Box<Sleep>>>,
}

impl AgentStream for ScriptedStream {
    type Error = Error;

    fn poll_next_message(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Result<Option<Message>, Self::Error>> {
        // SAFETY: This type does not require to be pinned.
        let this = unsafe { self.get_unchecked_mut() };
        if let Some(sleep) = &mut this.sleep {
            ready!(sleep.as_mut().poll(cx));
            this.sleep = None;

            if let Some((kind, message)) = this.failure.take() {
                return Poll::Ready(Err(Error { message, kind }));
            }
            return Poll::Ready(Ok(this.items.pop_front()));
        }
        this.sleep = Some(Box::pin(sleep(this.delay)));
        Pin::new(this).poll_next_message(cx)
    }
}

/// A local fake agent for testing purpose.
///
/// Before dispatching queries, you need to set up the script, which is the
/// ordered list of exchanges the fake agent will replay. The n-th query
/// replays the n-th exchange; querying past the end of the script returns
/// an error. Every received request is recorded so that tests can assert
/// on the prompts and options the front end actually sent.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    script: Vec<ScriptedExchange>,
    delay: Option<Duration>,
    next_exchange: Arc<AtomicUsize>,
    recorded: Arc<Mutex<Vec<QueryRequest>>>,
}

impl ScriptedClient {
    /// Appends an exchange to the script.
    #[inline]
    pub fn add_exchange(&mut self, exchange: ScriptedExchange) {
        self.script.push(exchange);
    }

    /// Sets the pacing delay between replayed messages.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns a copy of every request received so far, in arrival order.
    pub fn recorded_requests(&self) -> Vec<QueryRequest> {
        lock_unpoisoned(&self.recorded).clone()
    }
}

impl AgentClient for ScriptedClient {
    type Error = Error;
    type Stream = ScriptedStream;

    fn query(
        &self,
        req: &QueryRequest,
    ) -> impl Future<Output = Result<Self::Stream, Self::Error>> + Send + 'static
    {
        lock_unpoisoned(&self.recorded).push(req.clone());

        let idx = self.next_exchange.fetch_add(1, Ordering::SeqCst);
        let Some(exchange) = self.script.get(idx) else {
            return ready(Err(Error {
                message: "script exhausted".to_owned(),
                kind: ErrorKind::Other,
            }));
        };

        let delay = self.delay.unwrap_or(Duration::from_millis(1));
        let stream = match exchange {
            ScriptedExchange::Messages(messages) => ScriptedStream {
                items: messages.iter().cloned().collect(),
                failure: None,
                delay,
                sleep: None,
            },
            ScriptedExchange::Failure { kind, message } => ScriptedStream {
                items: VecDeque::new(),
                failure: Some((*kind, message.clone())),
                delay,
                sleep: None,
            },
        };
        ready(Ok(stream))
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
