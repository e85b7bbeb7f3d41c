use clap::Parser;
use log::info;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use termlife::config::LifeConfig;
use termlife::life;
use termlife::settings::Settings;

#[derive(Parser)]
#[command(name = "termlife")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(
    about = "Conway's Game of Life in the terminal (q, Esc or Ctrl-C to quit, space to pause)",
    long_about = None
)]
struct Cli {
    /// Seconds between generations
    #[arg(short, long, value_parser = parse_tick)]
    time: Option<Duration>,

    /// On average 1 in N cells start alive
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    density: Option<u32>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Config file (default: <config dir>/termlife/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn parse_tick(s: &str) -> Result<Duration, String> {
    let secs: f32 = s.parse().map_err(|e| format!("{}", e))?;
    match Duration::try_from_secs_f32(secs) {
        Ok(tick) if !tick.is_zero() => Ok(tick),
        _ => Err(format!("tick must be a positive number of seconds, got {}", s)),
    }
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let mut config = settings.apply(LifeConfig::default());
    if let Some(tick) = cli.time {
        config.tick = tick;
    }
    if let Some(density) = cli.density {
        config.density = density;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    info!("config: {:?}", config);
    life::run(config)
}
