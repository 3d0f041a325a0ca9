use anyhow::{Context, Result};
use clap::Parser;
use day_planner::{Console, Flow, Settings, logging};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Console organizer for a single day's tasks.
#[derive(Debug, Parser)]
#[command(name = "planner", version)]
struct Args {
    /// Replay the sample day and exit
    #[arg(long)]
    demo: bool,

    /// Settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "day_planner=debug"
    #[arg(long, env = "DAY_PLANNER_LOG")]
    log: Option<String>,

    /// Do not print the "> " prompt
    #[arg(long)]
    quiet_prompt: bool,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(filter) = &args.log {
        settings.log_filter = filter.clone();
    }
    if args.quiet_prompt {
        settings.show_prompt = false;
    }
    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(&args)?;
    logging::init(&settings.log_filter);

    let mut console = Console::new(io::stdout(), &settings);

    if args.demo {
        console.run_demo().context("writing demo output")?;
        return Ok(());
    }

    println!("Day Planner - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        if settings.show_prompt {
            print!("> ");
            io::stdout().flush().context("flushing prompt")?;
        }
        line.clear();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                tracing::error!(%err, "failed to read from stdin");
                break;
            }
        }
        if console.execute(&line).context("writing command output")? == Flow::Quit {
            break;
        }
    }
    Ok(())
}
