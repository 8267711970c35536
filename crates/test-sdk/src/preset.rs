use eduagent_sdk::{
    AssistantMessage, AssistantPayload, ContentBlock, ErrorKind, Message,
    ResultMessage, SystemMessage,
};

/// One scripted exchange: what the fake agent does for one query.
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptedExchange {
    /// Replay these messages in order, then end the stream.
    Messages(Vec<Message>),
    /// Fail the stream on its first poll.
    Failure {
        /// The kind of the replayed error.
        kind: ErrorKind,
        /// The replayed error message.
        message: String,
    },
}

impl ScriptedExchange {
    /// A minimal successful exchange: init notice, one text chunk, and a
    /// success result reporting the given cost and duration.
    pub fn reply(
        text: impl Into<String>,
        total_cost_usd: f64,
        duration_ms: u64,
    ) -> Self {
        let text = text.into();
        Self::Messages(vec![
            Message::System(SystemMessage {
                subtype: "init".to_owned(),
                model: Some("scripted-model".to_owned()),
                tools: Some(vec!["Read".to_owned(), "Bash".to_owned()]),
            }),
            Message::Assistant(AssistantMessage {
                message: AssistantPayload {
                    content: vec![ContentBlock::Text { text: text.clone() }],
                },
            }),
            Message::Result(ResultMessage {
                subtype: "success".to_owned(),
                is_error: false,
                result: Some(text),
                total_cost_usd: Some(total_cost_usd),
                duration_ms: Some(duration_ms),
                errors: None,
            }),
        ])
    }

    /// An exchange where the agent itself reports a logical failure.
    pub fn agent_failure(
        subtype: impl Into<String>,
        errors: impl Into<Vec<String>>,
    ) -> Self {
        Self::Messages(vec![Message::Result(ResultMessage {
            subtype: subtype.into(),
            is_error: true,
            result: None,
            total_cost_usd: None,
            duration_ms: None,
            errors: Some(errors.into()),
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_ends_with_success_result() {
        let ScriptedExchange::Messages(messages) =
            ScriptedExchange::reply("done", 0.5, 42)
        else {
            panic!("expected a message exchange");
        };
        let Some(Message::Result(result)) = messages.last() else {
            panic!("expected a trailing result");
        };
        assert!(result.is_success());
        assert_eq!(result.total_cost_usd, Some(0.5));
        assert_eq!(result.duration_ms, Some(42));
    }

    #[test]
    fn test_agent_failure_carries_subtype_and_errors() {
        let ScriptedExchange::Messages(messages) =
            ScriptedExchange::agent_failure(
                "error_max_turns",
                ["too many turns".to_owned()],
            )
        else {
            panic!("expected a message exchange");
        };
        let Some(Message::Result(result)) = messages.first() else {
            panic!("expected a result");
        };
        assert!(!result.is_success());
        assert_eq!(result.subtype, "error_max_turns");
        assert_eq!(result.errors, Some(vec!["too many turns".to_owned()]));
    }
}
