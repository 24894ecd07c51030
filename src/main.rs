use std::io::Write;

use anyhow::Result;
use clap::Parser;

use kingside::engines::engine_trait::{EngineConfig, Options};
use kingside::repl::repl_top::run_repl;
use kingside::tables::attack_tables::init_attack_tables;
use kingside::uci::uci_top::run_stdio_loop;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Start the interactive console instead of the UCI loop
    #[arg(short, long)]
    interactive: bool,

    /// Milliseconds per move when `go` carries no limits
    #[arg(long, default_value_t = 5000)]
    movetime: u64,

    /// Depth limit when `go` carries no limits
    #[arg(long)]
    depth: Option<u8>,

    /// Print the board with Unicode piece glyphs
    #[arg(long)]
    fancy: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}: {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    })
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();

    let config = EngineConfig {
        default_options: Options {
            max_depth: args.depth,
            move_time_ms: Some(args.movetime),
            ..Options::default()
        },
        fancy: args.fancy,
    };

    // Build the magic tables before the first command arrives.
    init_attack_tables();

    if args.interactive {
        run_repl(config)?;
    } else {
        run_stdio_loop(config)?;
    }
    Ok(())
}
