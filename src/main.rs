//! TinyBoy runner (default binary).
//!
//! Without `--script` the game runs in the terminal, drawn from the bits it
//! sends over the display bus. With `--script` it runs headless against a
//! virtual clock and prints the final screen or a JSON snapshot.

use anyhow::{ensure, Context, Result};
use clap::Parser;

use tinyboy::engine::{Console, HeadlessPeripheral};
use tinyboy::input::{InputMode, InputScript, TickScheduler};
use tinyboy::term::TerminalPeripheral;
use tinyboy::types::{DEFAULT_SAMPLES, TICK_MS};

#[derive(Parser)]
#[command(name = "tinyboy", about = "TinyBoy handheld Tetris.")]
struct Args {
    #[arg(long, help = "Tick window in milliseconds")]
    #[arg(default_value_t = TICK_MS)]
    tick_ms: u32,

    #[arg(long, help = "Button polls per tick window (1 = single poll)")]
    #[arg(default_value_t = DEFAULT_SAMPLES)]
    samples: u32,

    #[arg(long, help = "Run headless with a button script, e.g. \"RR L+U D\"")]
    script: Option<String>,

    #[arg(long, help = "Polls each scripted pulse is held for")]
    #[arg(default_value_t = 1)]
    pulse: u32,

    #[arg(long, requires = "script", help = "Headless tick count (default: script length)")]
    ticks: Option<u64>,

    #[arg(long, requires = "script", help = "Print the final snapshot as JSON")]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    ensure!(args.tick_ms > 0, "--tick-ms must be at least 1");
    ensure!(args.pulse > 0, "--pulse must be at least 1");

    let scheduler = TickScheduler::new(args.tick_ms, InputMode::from_samples(args.samples));

    match &args.script {
        Some(src) => run_headless(&args, src, scheduler),
        None => run_terminal(scheduler),
    }
}

fn run_headless(args: &Args, src: &str, scheduler: TickScheduler) -> Result<()> {
    let script = InputScript::parse(src)
        .context("invalid --script")?
        .with_hold(args.pulse);
    let peripheral = HeadlessPeripheral::new(script);
    let ticks = args
        .ticks
        .unwrap_or_else(|| peripheral.ticks_for_script(scheduler.mode()));

    let mut console = Console::new(peripheral, scheduler);
    console.run_ticks(ticks);

    if args.json {
        let json = serde_json::to_string_pretty(&console.snapshot())
            .context("serialize snapshot")?;
        println!("{json}");
    } else {
        let session = console.session();
        print!("{}", console.peripheral().screen().to_ascii());
        println!(
            "ticks {}  score {}  lines {}  clock {}ms",
            console.ticks(),
            session.score(),
            session.lines(),
            console.peripheral().clock_ms()
        );
    }
    Ok(())
}

fn run_terminal(scheduler: TickScheduler) -> Result<()> {
    let peripheral = TerminalPeripheral::enter()?;
    let mut console = Console::new(peripheral, scheduler);

    console.run_while(|c| !c.peripheral().quit_requested());

    // Always try to restore terminal state before reporting.
    let failure = console.peripheral_mut().take_error();
    let restored = console.peripheral_mut().exit();
    if let Some(err) = failure {
        return Err(err.context("terminal session failed"));
    }
    restored
}
