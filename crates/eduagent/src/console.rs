use std::future::poll_fn;
use std::io::Write as _;
use std::pin::pin;
use std::time::Duration;

use eduagent_sdk::{
    AgentClient, AgentClientError, AgentStream, ContentBlock, Message,
    ResultMessage, SystemMessage,
};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::select;
use tokio::time::sleep;

use crate::command::Command;
use crate::session::SessionStats;

const BAR_CHAR: &str = "▎";
const RULE_WIDTH: usize = 50;

/// What the interactive loop should do after one line of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineOutcome {
    /// Keep reading input.
    Continue,
    /// Leave the session.
    Exit,
}

/// Handles one line of interactive input.
///
/// Blank lines do nothing. Recognized commands act locally and are never
/// forwarded; any other line becomes one exchange with the agent, after
/// which the session is marked as continuing whether or not the exchange
/// succeeded.
pub async fn handle_line<C: AgentClient>(
    client: &C,
    stats: &mut SessionStats,
    line: &str,
) -> LineOutcome {
    match Command::parse(line) {
        None => LineOutcome::Continue,
        Some(Command::Exit) => LineOutcome::Exit,
        Some(Command::Help) => {
            print_help();
            LineOutcome::Continue
        }
        Some(Command::Clear) => {
            stats.clear();
            println!("{}🧹 Session cleared.", BAR_CHAR.bright_cyan());
            LineOutcome::Continue
        }
        Some(Command::Stats) => {
            print_stats(stats);
            LineOutcome::Continue
        }
        Some(Command::Query(prompt)) => {
            run_exchange(client, &prompt, stats).await;
            stats.mark_continuing();
            LineOutcome::Continue
        }
    }
}

/// Runs one exchange with the agent and renders its message stream.
///
/// Returns `false` when the call raised during dispatch or streaming; a
/// failed exchange leaves the counters untouched. An agent-reported
/// logical failure is rendered but still counts as a completed call.
pub async fn run_exchange<C: AgentClient>(
    client: &C,
    prompt: &str,
    stats: &mut SessionStats,
) -> bool {
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
    println!("{}📝 {}", BAR_CHAR.bright_cyan(), prompt.bright_white());

    let req = stats.request(prompt);
    let stream = match client.query(&req).await {
        Ok(stream) => stream,
        Err(err) => {
            report_stream_error(&err);
            println!("{}", "─".repeat(RULE_WIDTH).dimmed());
            return false;
        }
    };
    let mut stream = pin!(stream);

    let spinner_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    let mut spinner: Option<ProgressBar> = None;
    let mut completed = true;
    loop {
        // Create a new spinner if the previous one has been cleared.
        spinner
            .get_or_insert_with(|| {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(spinner_style.clone());
                spinner.set_message("🤔 Thinking...");
                spinner
            })
            .inc(1);

        let tick = sleep(Duration::from_millis(100));
        let message = select! {
            message = poll_fn(|cx| stream.as_mut().poll_next_message(cx)) => {
                message
            },
            _ = tick => {
                continue;
            }
        };

        // Clear the spinner before printing anything else.
        if let Some(spinner) = &spinner {
            spinner.finish_and_clear();
        }
        spinner = None;

        match message {
            Ok(Some(message)) => render_message(&message, stats),
            Ok(None) => break,
            Err(err) => {
                report_stream_error(&err);
                completed = false;
                break;
            }
        }
    }

    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
    completed
}

fn render_message(message: &Message, stats: &mut SessionStats) {
    match message {
        Message::System(msg) => render_system(msg),
        Message::Assistant(msg) => {
            for block in &msg.message.content {
                render_block(block);
            }
        }
        Message::Result(msg) => render_result(msg, stats),
        // Forward-compatibility: unrecognized shapes are ignored.
        Message::Other => {}
    }
}

fn render_system(msg: &SystemMessage) {
    if !msg.is_init() {
        return;
    }
    if let Some(model) = &msg.model {
        println!(
            "{}📦 Model: {}",
            BAR_CHAR.bright_cyan(),
            model.bright_white()
        );
    }
    if let Some(tools) = &msg.tools {
        if !tools.is_empty() {
            println!(
                "{}🔧 Available tools: {}",
                BAR_CHAR.bright_cyan(),
                tools.join(", ")
            );
        }
    }
}

fn render_block(block: &ContentBlock) {
    match block {
        ContentBlock::Text { text } => {
            print!("{text}");
            let _ = std::io::stdout().flush();
        }
        ContentBlock::ToolUse { name, .. } => {
            println!(
                "\n{}🔧 Using tool: {}",
                BAR_CHAR.bright_yellow(),
                name.bright_white()
            );
        }
        ContentBlock::Other => {}
    }
}

fn render_result(msg: &ResultMessage, stats: &mut SessionStats) {
    println!();
    if msg.is_success() {
        let cost = msg.total_cost_usd.unwrap_or_default();
        let duration = msg.duration_ms.unwrap_or_default();
        stats.record_success(cost, duration);

        if let Some(result) = &msg.result {
            if !result.is_empty() {
                println!("\n{}📊 {}", BAR_CHAR.bright_cyan(), result);
            }
        }
        println!(
            "{}💰 ${:.4} (session total ${:.4})",
            BAR_CHAR.bright_green(),
            cost,
            stats.total_cost_usd()
        );
        println!("{}⏱️ {duration}ms", BAR_CHAR.bright_green());
    } else {
        println!(
            "{}❌ Agent failed: {}",
            BAR_CHAR.bright_red(),
            msg.subtype
        );
        if let Some(errors) = &msg.errors {
            for err in errors {
                println!("{}  - {err}", BAR_CHAR.bright_red());
            }
        }
    }
}

fn report_stream_error<E: AgentClientError>(err: &E) {
    error!("agent call failed: {err}");
    eprintln!(
        "{}❌ Agent call failed ({:?}): {err}",
        BAR_CHAR.bright_red(),
        err.kind()
    );
}

/// Prints the startup banner.
pub fn print_greeting() {
    println!("🚀 eduagent — type /help for commands, /exit to leave");
}

/// Prints the static usage panel.
pub fn print_help() {
    println!("Commands:");
    println!("  /help, /h, /?     show this panel");
    println!("  /stats, /s        show session cost and duration");
    println!("  /clear, /c        reset counters, start a fresh conversation");
    println!("  /exit, /quit, /q  leave the session");
    println!("Anything else is sent to the agent.");
}

/// Prints the session counters and continuation state.
pub fn print_stats(stats: &SessionStats) {
    let state = if stats.is_fresh() { "fresh" } else { "continuing" };
    println!(
        "{}💰 Total cost: ${:.4}",
        BAR_CHAR.bright_cyan(),
        stats.total_cost_usd()
    );
    println!(
        "{}⏱️ Total duration: {}ms",
        BAR_CHAR.bright_cyan(),
        stats.total_duration_ms()
    );
    println!("{}🧭 Session: {state}", BAR_CHAR.bright_cyan());
}

/// Prints the farewell line and the final counters.
pub fn print_farewell(stats: &SessionStats) {
    println!("\n👋 Bye!");
    print_stats(stats);
}
