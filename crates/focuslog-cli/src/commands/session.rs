use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Local;
use clap::Args;
use focuslog_core::error::Result;
use focuslog_core::{
    format_time, Config, DistractionType, ElapsedTime, SessionEvent, SessionReport, SessionStore,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Handle;

use crate::render;

#[derive(Args)]
pub struct SessionArgs {
    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,
}

const HELP: &str = "\
commands:
  q | quick        log a quick check
  d | distracted   log a moderate interruption
  m | major        log a major break
  s | status       show elapsed time and distraction count
  r | reset        discard this session and start over
  e | end          end the session and show the report
  h | help         show this help";

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Log(DistractionType),
    Status,
    Reset,
    End,
    Help,
    Empty,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => Input::Empty,
        "s" | "status" => Input::Status,
        "r" | "reset" => Input::Reset,
        "e" | "end" | "quit" | "exit" => Input::End,
        "h" | "help" | "?" => Input::Help,
        other => match other.parse::<DistractionType>() {
            Ok(kind) => Input::Log(kind),
            Err(_) => Input::Unknown(other.to_string()),
        },
    }
}

fn trace_event(event: &SessionEvent) {
    tracing::info!(?event, "session event");
}

pub fn run(args: SessionArgs, config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;
    let result = runtime.block_on(interactive(args, config));
    runtime.shutdown_background();
    result
}

async fn interactive(args: SessionArgs, config: &Config) -> Result<()> {
    let store = SessionStore::with_system_clock();
    let elapsed =
        ElapsedTime::with_tick_interval(store.clone(), Handle::current(), config.tick_interval());

    let latest = Arc::new(AtomicU64::new(0));
    let sink = latest.clone();
    let _elapsed_sub = elapsed.subscribe(move |secs| {
        sink.store(secs, Ordering::Relaxed);
        tracing::trace!(elapsed = %format_time(secs), "tick");
    });

    trace_event(&store.start_session());
    eprintln!("Focus session started at {}.", Local::now().format("%H:%M"));
    eprintln!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Log(kind) => {
                trace_event(&store.log_distraction(kind));
                let cfg = kind.config();
                eprintln!(
                    "{} {} logged at {}",
                    cfg.icon,
                    cfg.label,
                    format_time(latest.load(Ordering::Relaxed))
                );
            }
            Input::Status => {
                eprintln!(
                    "elapsed {}  distractions {}",
                    format_time(latest.load(Ordering::Relaxed)),
                    store.snapshot().distractions.len()
                );
            }
            Input::Reset => {
                trace_event(&store.reset());
                trace_event(&store.start_session());
                eprintln!("Session restarted.");
            }
            Input::End => break,
            Input::Help => eprintln!("{HELP}"),
            Input::Empty => {}
            Input::Unknown(other) => eprintln!("unknown command '{other}' (h for help)"),
        }
    }

    trace_event(&store.end_session());
    let report = SessionReport::from_state(&store.snapshot(), config.heatmap_interval());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::report_text(&report));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_input(" q "), Input::Log(DistractionType::QuickCheck));
        assert_eq!(parse_input("distracted"), Input::Log(DistractionType::GotDistracted));
        assert_eq!(parse_input("M"), Input::Log(DistractionType::MajorBreak));
        assert_eq!(parse_input("s"), Input::Status);
        assert_eq!(parse_input("end"), Input::End);
        assert_eq!(parse_input(""), Input::Empty);
        assert_eq!(parse_input("lunch"), Input::Unknown("lunch".into()));
    }
}
