use eduagent_sdk::{QueryOptions, QueryOptionsBuilder, QueryRequest};

/// The system instructions sent with every query.
pub(crate) const SYSTEM_PROMPT: &str = include_str!("system_prompt.md");

/// Running totals and continuation state for one interactive session.
///
/// Counters only grow from success results and are zeroed by the clear
/// command; a failed exchange contributes nothing. The continuation flag
/// flips after the first exchange and stays set until the session is
/// cleared.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionStats {
    total_cost_usd: f64,
    total_duration_ms: u64,
    first_query: bool,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStats {
    /// Creates a fresh session.
    #[inline]
    pub fn new() -> Self {
        Self {
            total_cost_usd: 0.0,
            total_duration_ms: 0,
            first_query: true,
        }
    }

    /// Total accumulated cost in USD.
    #[inline]
    pub fn total_cost_usd(&self) -> f64 {
        self.total_cost_usd
    }

    /// Total accumulated duration in milliseconds.
    #[inline]
    pub fn total_duration_ms(&self) -> u64 {
        self.total_duration_ms
    }

    /// Whether the next query starts a fresh conversation.
    #[inline]
    pub fn is_fresh(&self) -> bool {
        self.first_query
    }

    /// Adds one successful exchange's reported cost and duration.
    pub fn record_success(&mut self, cost_usd: f64, duration_ms: u64) {
        self.total_cost_usd += cost_usd;
        self.total_duration_ms += duration_ms;
    }

    /// Marks the session as continuing; later queries reuse the prior
    /// conversation context.
    #[inline]
    pub fn mark_continuing(&mut self) {
        self.first_query = false;
    }

    /// Zeroes the counters and marks the session fresh again.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Builds the request for one query against this session's state.
    pub fn request(&self, prompt: impl Into<String>) -> QueryRequest {
        QueryRequest {
            prompt: prompt.into(),
            options: self.options(),
        }
    }

    fn options(&self) -> QueryOptions {
        QueryOptionsBuilder::new()
            .with_continue_session(!self.first_query)
            .with_system_prompt(SYSTEM_PROMPT)
            .build()
    }
}
