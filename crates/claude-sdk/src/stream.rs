use std::pin::Pin;
use std::task::{Context, Poll, ready};

use eduagent_sdk::{AgentStream, ErrorKind, Message};
use pin_project_lite::pin_project;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout};

use crate::Error;

pin_project! {
    /// A message stream decoded from line-delimited JSON.
    ///
    /// Each non-blank line is one JSON-encoded message. The child handle,
    /// when present, is held for the lifetime of the stream so that
    /// dropping an abandoned stream also tears the subprocess down.
    pub struct JsonMessageStream<R> {
        #[pin]
        lines: Lines<R>,
        child: Option<Child>,
        done: bool,
    }
}

/// The message stream of one subprocess invocation.
pub type ClaudeStream = JsonMessageStream<BufReader<ChildStdout>>;

impl JsonMessageStream<BufReader<ChildStdout>> {
    pub(crate) fn from_child(child: Child, stdout: ChildStdout) -> Self {
        Self {
            lines: BufReader::new(stdout).lines(),
            child: Some(child),
            done: false,
        }
    }
}

#[cfg(test)]
impl<R: AsyncBufRead> JsonMessageStream<R> {
    fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            child: None,
            done: false,
        }
    }
}

impl<R> AgentStream for JsonMessageStream<R>
where
    R: AsyncBufRead + Send + 'static,
{
    type Error = Error;

    fn poll_next_message(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Result<Option<Message>, Self::Error>> {
        let mut this = self.project();
        if *this.done {
            return Poll::Ready(Ok(None));
        }

        loop {
            let line = match ready!(this.lines.as_mut().poll_next_line(cx)) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    *this.done = true;
                    // The process usually exits right after the result
                    // message; a nonzero status at EOF is only diagnostic.
                    if let Some(child) = this.child.as_mut() {
                        if let Ok(Some(status)) = child.try_wait() {
                            if !status.success() {
                                warn!("agent process exited with {status}");
                            }
                        }
                    }
                    return Poll::Ready(Ok(None));
                }
                Err(err) => {
                    *this.done = true;
                    return Poll::Ready(Err(Error::new(
                        format!("failed to read agent output: {err}"),
                        ErrorKind::Other,
                    )));
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            trace!("got agent line: {line}");

            match serde_json::from_str::<Message>(line) {
                Ok(message) => return Poll::Ready(Ok(Some(message))),
                Err(err) => {
                    *this.done = true;
                    return Poll::Ready(Err(Error::new(
                        format!("undecodable agent message: {err}"),
                        ErrorKind::Decode,
                    )));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::poll_fn;
    use std::pin::pin;

    use eduagent_sdk::AgentClientError;

    use super::*;

    async fn next(
        stream: &mut Pin<&mut JsonMessageStream<&'static [u8]>>,
    ) -> Result<Option<Message>, Error> {
        poll_fn(|cx| stream.as_mut().poll_next_message(cx)).await
    }

    #[tokio::test]
    async fn test_decodes_one_message_per_line() {
        let output: &[u8] = b"\
{\"type\":\"system\",\"subtype\":\"init\",\"model\":\"m\"}\n\
\n\
{\"type\":\"result\",\"subtype\":\"success\",\"total_cost_usd\":0.1,\"duration_ms\":5}\n";
        let mut stream = pin!(JsonMessageStream::from_reader(output));

        let Some(Message::System(init)) = next(&mut stream).await.unwrap()
        else {
            panic!("expected the init notice");
        };
        assert!(init.is_init());

        // The blank line is skipped.
        let Some(Message::Result(result)) = next(&mut stream).await.unwrap()
        else {
            panic!("expected the result");
        };
        assert!(result.is_success());

        assert!(next(&mut stream).await.unwrap().is_none());
        // Polling after completion keeps reporting completion.
        assert!(next(&mut stream).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_shapes_decode_to_other() {
        let output: &[u8] =
            b"{\"type\":\"stream_event\",\"event\":{\"delta\":\"x\"}}\n";
        let mut stream = pin!(JsonMessageStream::from_reader(output));
        assert_eq!(next(&mut stream).await.unwrap(), Some(Message::Other));
        assert!(next(&mut stream).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_undecodable_line_fails_the_stream() {
        let output: &[u8] = b"not json at all\n\
{\"type\":\"result\",\"subtype\":\"success\"}\n";
        let mut stream = pin!(JsonMessageStream::from_reader(output));

        let err = next(&mut stream).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        // The stream stays terminated after the error.
        assert!(next(&mut stream).await.unwrap().is_none());
    }
}
