use std::fmt::Debug;

/// The model queries default to when none is configured.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// How the agent is allowed to use its tools.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PermissionMode {
    /// The agent asks for confirmation on sensitive operations.
    #[default]
    Default,
    /// File edits are applied without confirmation.
    AcceptEdits,
    /// The agent plans but does not execute.
    Plan,
    /// All permission prompts are bypassed.
    BypassPermissions,
}

impl PermissionMode {
    /// The wire spelling of this mode.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::AcceptEdits => "acceptEdits",
            Self::Plan => "plan",
            Self::BypassPermissions => "bypassPermissions",
        }
    }
}

/// Which built-in tool set the agent runs with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ToolPreset {
    /// The full coding tool set (file access, editing, shell).
    #[default]
    ClaudeCode,
}

/// The configuration bundle one query carries.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryOptions {
    /// Model identifier.
    pub model: String,
    /// Tool permission mode.
    pub permission_mode: PermissionMode,
    /// Tool preset selection.
    pub tool_preset: ToolPreset,
    /// Whether to continue the prior conversation context.
    pub continue_session: bool,
    /// System instructions describing the agent's role.
    pub system_prompt: String,
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptionsBuilder::new().build()
    }
}

/// Builder for [`QueryOptions`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOptionsBuilder {
    model: Option<String>,
    permission_mode: PermissionMode,
    tool_preset: ToolPreset,
    continue_session: bool,
    system_prompt: Option<String>,
}

impl QueryOptionsBuilder {
    /// Creates a builder with all defaults.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model to use.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the tool permission mode.
    #[inline]
    pub fn with_permission_mode(mut self, mode: PermissionMode) -> Self {
        self.permission_mode = mode;
        self
    }

    /// Sets the tool preset.
    #[inline]
    pub fn with_tool_preset(mut self, preset: ToolPreset) -> Self {
        self.tool_preset = preset;
        self
    }

    /// Sets whether to continue the prior conversation context.
    #[inline]
    pub fn with_continue_session(mut self, cont: bool) -> Self {
        self.continue_session = cont;
        self
    }

    /// Sets the system instructions.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Builds the options.
    #[inline]
    pub fn build(self) -> QueryOptions {
        QueryOptions {
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            permission_mode: self.permission_mode,
            tool_preset: self.tool_preset,
            continue_session: self.continue_session,
            system_prompt: self.system_prompt.unwrap_or_default(),
        }
    }
}
