//! Console entry point for the agent front end.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::process::ExitCode;

use eduagent::{
    LineOutcome, SessionStats, handle_line, print_farewell, print_greeting,
    run_exchange,
};
use eduagent_claude_sdk::ClaudeClient;
use eduagent_sdk::AgentClient;
use tokio::io::{self, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::select;
use tokio::signal;

struct CliArgs {
    interactive: bool,
    prompt: Option<String>,
}

fn parse_args<I: Iterator<Item = String>>(args: I) -> CliArgs {
    let mut interactive = false;
    let mut words = Vec::new();
    for arg in args {
        match arg.as_str() {
            "-i" | "--interactive" => interactive = true,
            _ => words.push(arg),
        }
    }
    CliArgs {
        // The interactive flag wins even when prompt words are present.
        interactive: interactive || words.is_empty(),
        prompt: if words.is_empty() {
            None
        } else {
            Some(words.join(" "))
        },
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = parse_args(std::env::args().skip(1));
    let client = ClaudeClient::new();

    let result = if args.interactive {
        run_repl(&client).await.map(|()| ExitCode::SUCCESS)
    } else {
        run_single_shot(&client, args.prompt.as_deref().unwrap_or_default())
            .await
    };

    // The outermost handler: nothing may take the process down silently.
    match result {
        Ok(code) => code,
        Err(err) => {
            error!("unexpected error: {err}");
            eprintln!("unexpected error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run_single_shot<C: AgentClient>(
    client: &C,
    prompt: &str,
) -> io::Result<ExitCode> {
    let mut stats = SessionStats::new();
    if run_exchange(client, prompt, &mut stats).await {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn run_repl<C: AgentClient>(client: &C) -> io::Result<()> {
    print_greeting();

    let mut stats = SessionStats::new();
    let mut stdin = BufReader::new(io::stdin());

    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let line = select! {
            _ = signal::ctrl_c() => None,
            line = read_line(&mut stdin) => Some(line?),
        };
        let Some(line) = line else {
            interrupt_exit(&stats);
        };
        let Some(line) = line else {
            // EOF behaves like the exit command.
            break;
        };

        let outcome = select! {
            _ = signal::ctrl_c() => None,
            outcome = handle_line(client, &mut stats, &line) => Some(outcome),
        };
        let Some(outcome) = outcome else {
            interrupt_exit(&stats);
        };
        if outcome == LineOutcome::Exit {
            break;
        }
    }

    print_farewell(&stats);
    Ok(())
}

/// Leaves immediately on the operator's interrupt, bypassing the loop's
/// normal exit path.
fn interrupt_exit(stats: &SessionStats) -> ! {
    print_farewell(stats);
    std::process::exit(0);
}

async fn read_line<R: AsyncRead + Unpin>(
    stdin: &mut BufReader<R>,
) -> io::Result<Option<String>> {
    let mut line = String::new();
    let count = stdin.read_line(&mut line).await?;
    if count == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
