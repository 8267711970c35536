use serde::{Deserialize, Serialize};

/// The `subtype` value a successful result message carries.
pub const RESULT_SUBTYPE_SUCCESS: &str = "success";

/// A tagged message streamed back from the agent.
///
/// The tag set, field names and success/failure subtyping are a fixed
/// external contract. Shapes this crate doesn't recognize decode to
/// [`Message::Other`] so that newer agents don't break older front ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// A system notice, e.g. the `init` message that opens every stream.
    System(SystemMessage),
    /// An assistant turn carrying content blocks.
    Assistant(AssistantMessage),
    /// The final result of the exchange.
    Result(ResultMessage),
    /// Any unrecognized message shape.
    #[serde(other)]
    Other,
}

/// A system-level notice from the agent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMessage {
    /// Discriminates system notices; `init` is the only one rendered.
    pub subtype: String,
    /// The model serving this session, present on `init`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Names of the tools available to the agent, present on `init`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
}

impl SystemMessage {
    /// Returns whether this is the stream-opening `init` notice.
    #[inline]
    pub fn is_init(&self) -> bool {
        self.subtype == "init"
    }
}

/// An assistant turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    /// The inner message payload.
    pub message: AssistantPayload,
}

/// The payload of an assistant turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssistantPayload {
    /// Content blocks, in the order the model produced them.
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// One content block inside an assistant turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A plain text fragment.
    Text {
        /// The text itself, possibly a partial chunk.
        text: String,
    },
    /// The agent is invoking a tool.
    ToolUse {
        /// Tool invocation identifier.
        #[serde(default)]
        id: Option<String>,
        /// Name of the tool being invoked.
        name: String,
        /// Arguments passed to the tool.
        #[serde(default)]
        input: serde_json::Value,
    },
    /// Any unrecognized block kind.
    #[serde(other)]
    Other,
}

/// The final result of one exchange.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultMessage {
    /// `success`, or a failure discriminator such as `error_max_turns`.
    pub subtype: String,
    /// Set when the agent reports the exchange as failed.
    #[serde(default)]
    pub is_error: bool,
    /// The final result text, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Monetary cost of the exchange, in USD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost_usd: Option<f64>,
    /// Wall-clock duration of the exchange, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Error descriptions accompanying a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ResultMessage {
    /// Returns whether the agent reported this exchange as successful.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.subtype == RESULT_SUBTYPE_SUCCESS && !self.is_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_init_message() {
        let raw = r#"{
            "type": "system",
            "subtype": "init",
            "session_id": "b3ad-41",
            "model": "claude-sonnet-4-20250514",
            "tools": ["Read", "Edit", "Bash"]
        }"#;
        let Message::System(msg) = serde_json::from_str(raw).unwrap() else {
            panic!("expected a system message");
        };
        assert!(msg.is_init());
        assert_eq!(msg.model.as_deref(), Some("claude-sonnet-4-20250514"));
        assert_eq!(
            msg.tools,
            Some(vec![
                "Read".to_owned(),
                "Edit".to_owned(),
                "Bash".to_owned()
            ])
        );
    }

    #[test]
    fn test_decode_assistant_blocks() {
        let raw = r#"{
            "type": "assistant",
            "message": {
                "role": "assistant",
                "content": [
                    { "type": "text", "text": "Let me check." },
                    {
                        "type": "tool_use",
                        "id": "toolu_01",
                        "name": "Read",
                        "input": { "file_path": "README.md" }
                    },
                    { "type": "server_tool_use", "name": "web_search" }
                ]
            }
        }"#;
        let Message::Assistant(msg) = serde_json::from_str(raw).unwrap()
        else {
            panic!("expected an assistant message");
        };
        assert_eq!(msg.message.content.len(), 3);
        assert_eq!(
            msg.message.content[0],
            ContentBlock::Text {
                text: "Let me check.".to_owned(),
            }
        );
        let ContentBlock::ToolUse { name, .. } = &msg.message.content[1]
        else {
            panic!("expected a tool_use block");
        };
        assert_eq!(name, "Read");
        assert_eq!(msg.message.content[2], ContentBlock::Other);
    }

    #[test]
    fn test_decode_success_result() {
        let raw = r#"{
            "type": "result",
            "subtype": "success",
            "is_error": false,
            "result": "Done.",
            "total_cost_usd": 0.0421,
            "duration_ms": 15230,
            "num_turns": 4
        }"#;
        let Message::Result(msg) = serde_json::from_str(raw).unwrap() else {
            panic!("expected a result message");
        };
        assert!(msg.is_success());
        assert_eq!(msg.result.as_deref(), Some("Done."));
        assert_eq!(msg.total_cost_usd, Some(0.0421));
        assert_eq!(msg.duration_ms, Some(15230));
    }

    #[test]
    fn test_decode_failure_result() {
        let raw = r#"{
            "type": "result",
            "subtype": "error_max_turns",
            "is_error": true,
            "errors": ["turn limit reached"]
        }"#;
        let Message::Result(msg) = serde_json::from_str(raw).unwrap() else {
            panic!("expected a result message");
        };
        assert!(!msg.is_success());
        assert_eq!(msg.subtype, "error_max_turns");
        assert_eq!(msg.errors, Some(vec!["turn limit reached".to_owned()]));
    }

    #[test]
    fn test_success_subtype_with_error_flag_is_not_success() {
        let msg = ResultMessage {
            subtype: RESULT_SUBTYPE_SUCCESS.to_owned(),
            is_error: true,
            result: None,
            total_cost_usd: None,
            duration_ms: None,
            errors: None,
        };
        assert!(!msg.is_success());
    }

    #[test]
    fn test_unknown_message_decodes_to_other() {
        let raw = r#"{ "type": "stream_event", "event": {} }"#;
        let msg: Message = serde_json::from_str(raw).unwrap();
        assert_eq!(msg, Message::Other);
    }
}
