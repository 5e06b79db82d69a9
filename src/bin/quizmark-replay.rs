use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use quizmark::{Config, Frame, MarkerObservation, QuizTracker, Tracking};

/// Replays a recorded marker log through the answer engine.
///
/// Each line is `ts_ms id x0 y0 x1 y1 x2 y2 x3 y3`; lines sharing a timestamp
/// form one frame. Blank lines and lines starting with `#` are ignored.
#[derive(Parser, Debug)]
#[command(name = "quizmark-replay")]
struct Args {
    /// Observation log
    input: PathBuf,

    /// YAML config overriding the engine defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn parse_line(line: &str) -> anyhow::Result<Option<(u64, MarkerObservation)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut it = line.split_whitespace();
    let ts: u64 = it.next().context("missing timestamp")?.parse()?;
    let id: u32 = it.next().context("missing marker id")?.parse()?;

    let coords = it
        .map(|v| v.parse::<f32>())
        .collect::<Result<Vec<_>, _>>()?;

    if coords.len() % 2 != 0 {
        bail!("odd number of corner coordinates");
    }

    let corners = coords.chunks(2).map(|c| [c[0], c[1]]).collect();

    Ok(Some((ts, MarkerObservation::new(id, corners))))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    let file = std::fs::File::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?;

    let mut frames: BTreeMap<u64, Vec<MarkerObservation>> = BTreeMap::new();
    for (no, line) in std::io::BufReader::new(file).lines().enumerate() {
        let line = line?;
        if let Some((ts, obs)) =
            parse_line(&line).with_context(|| format!("line {}", no + 1))?
        {
            frames.entry(ts).or_default().push(obs);
        }
    }

    let frames: Vec<Frame> = frames
        .into_iter()
        .map(|(ts, observations)| Frame::new(ts, observations))
        .collect();

    let mut tracker = QuizTracker::new(config.engine);

    for event in tracker.update(&frames) {
        println!("[{:>8} ms] {}", event.timestamp, event);
    }

    let board = tracker.board();
    println!("--- board ({} markers) ---", board.len());
    for entry in board.iter() {
        println!(
            "marker {:>4}: {}  (confirmed at {} ms)",
            entry.id, entry.answer, entry.confirmed_at
        );
    }

    Ok(())
}
