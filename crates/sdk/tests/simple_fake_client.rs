use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::future::{poll_fn, ready};
use std::pin::{Pin, pin};
use std::task::{self, Poll, ready};
use std::time::Duration;

use eduagent_sdk::{
    AgentClient, AgentClientError, AgentStream, AssistantMessage,
    AssistantPayload, ContentBlock, ErrorKind, Message, QueryOptions,
    QueryRequest, ResultMessage,
};
use tokio::time::{Sleep, sleep};

#[derive(Debug)]
struct FakeClientError(ErrorKind);

impl Display for FakeClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for FakeClientError {}

impl AgentClientError for FakeClientError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

struct FakeStream {
    fake_items: VecDeque<Message>,
    sleep: Option<Pin<Box<Sleep>>>,
}

impl FakeStream {
    fn new(prompt: &str) -> Self {
        let chunks = format!("You said {prompt}")
            .split(' ')
            .map(|word| {
                Message::Assistant(AssistantMessage {
                    message: AssistantPayload {
                        content: vec![ContentBlock::Text {
                            text: format!("{word} "),
                        }],
                    },
                })
            })
            .collect::<VecDeque<_>>();
        let mut fake_items = chunks;
        fake_items.push_back(Message::Result(ResultMessage {
            subtype: "success".to_owned(),
            is_error: false,
            result: Some(format!("You said {prompt}")),
            total_cost_usd: Some(0.001),
            duration_ms: Some(10),
            errors: None,
        }));
        Self {
            fake_items,
            sleep: None,
        }
    }
}

impl AgentStream for FakeStream {
    type Error = FakeClientError;

    fn poll_next_message(
        self: Pin<&mut Self>,
        cx: &mut task::Context<'_>,
    ) -> Poll<Result<Option<Message>, Self::Error>> {
        // SAFETY: This type does not require to be pinned.
        let this = unsafe { self.get_unchecked_mut() };
        if let Some(sleep) = &mut this.sleep {
            ready!(sleep.as_mut().poll(cx));
            this.sleep = None;
            return Poll::Ready(Ok(this.fake_items.pop_front()));
        }
        this.sleep = Some(Box::pin(sleep(Duration::from_millis(1))));
        Pin::new(this).poll_next_message(cx)
    }
}

struct FakeClient;

impl AgentClient for FakeClient {
    type Error = FakeClientError;
    type Stream = FakeStream;

    fn query(
        &self,
        req: &QueryRequest,
    ) -> impl Future<Output = Result<Self::Stream, Self::Error>> + Send + 'static
    {
        ready(Ok(FakeStream::new(&req.prompt)))
    }
}

#[tokio::test]
async fn test_drain_fake_stream() {
    let client = FakeClient;
    let req = QueryRequest {
        prompt: "hello there".to_owned(),
        options: QueryOptions::default(),
    };
    let stream = client.query(&req).await.unwrap();
    let mut stream = pin!(stream);

    let mut text = String::new();
    let mut result = None;
    loop {
        let message = poll_fn(|cx| stream.as_mut().poll_next_message(cx))
            .await
            .unwrap();
        match message {
            Some(Message::Assistant(msg)) => {
                for block in &msg.message.content {
                    if let ContentBlock::Text { text: chunk } = block {
                        text.push_str(chunk);
                    }
                }
            }
            Some(Message::Result(msg)) => result = Some(msg),
            Some(_) => {}
            None => break,
        }
    }

    assert_eq!(text, "You said hello there ");
    let result = result.unwrap();
    assert!(result.is_success());
    assert_eq!(result.total_cost_usd, Some(0.001));

    // Polling after completion keeps reporting completion.
    let message = poll_fn(|cx| stream.as_mut().poll_next_message(cx))
        .await
        .unwrap();
    assert!(message.is_none());
}
