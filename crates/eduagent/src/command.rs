/// One line of interactive input, classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Leave the session.
    Exit,
    /// Show the usage panel.
    Help,
    /// Reset the session counters and continuation state.
    Clear,
    /// Show the session counters.
    Stats,
    /// Forward the line to the agent as-is.
    Query(String),
}

impl Command {
    /// Classifies one line of input. Returns `None` for blank lines.
    ///
    /// Commands are single words, case-insensitive, with an optional
    /// leading slash: `/exit`, `EXIT` and `q` all leave the session.
    /// Everything else is forwarded to the agent verbatim.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let word = trimmed.strip_prefix('/').unwrap_or(trimmed);
        if !word.contains(char::is_whitespace) {
            match word.to_ascii_lowercase().as_str() {
                "exit" | "quit" | "q" => return Some(Self::Exit),
                "help" | "h" | "?" => return Some(Self::Help),
                "clear" | "c" => return Some(Self::Clear),
                "stats" | "s" => return Some(Self::Stats),
                _ => {}
            }
        }

        Some(Self::Query(trimmed.to_owned()))
    }
}
