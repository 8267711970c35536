use eduagent_sdk::{PermissionMode, QueryRequest, ToolPreset};

/// Maps a query request to the CLI argument vector.
///
/// The prompt always goes last so that user text can never be mistaken
/// for a flag.
pub(crate) fn build_args(req: &QueryRequest) -> Vec<String> {
    let options = &req.options;
    let mut args = vec![
        "--print".to_owned(),
        "--verbose".to_owned(),
        "--output-format".to_owned(),
        "stream-json".to_owned(),
        "--model".to_owned(),
        options.model.clone(),
    ];

    if options.permission_mode != PermissionMode::Default {
        args.push("--permission-mode".to_owned());
        args.push(options.permission_mode.as_str().to_owned());
    }

    match options.tool_preset {
        // The CLI ships this tool set by default, no flag needed.
        ToolPreset::ClaudeCode => {}
    }

    if options.continue_session {
        args.push("--continue".to_owned());
    }

    if !options.system_prompt.is_empty() {
        args.push("--append-system-prompt".to_owned());
        args.push(options.system_prompt.clone());
    }

    args.push(req.prompt.clone());
    args
}
