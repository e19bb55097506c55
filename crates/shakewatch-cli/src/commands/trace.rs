use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use clap::Subcommand;
use shakewatch_core::{
    synth_trace, AccelSample, FeedbackEffector, ScriptedSource, ShakeService,
};

#[derive(Subcommand)]
pub enum TraceAction {
    /// Replay a recorded JSONL trace through a full detector service
    Replay {
        /// Trace file, one sample per line
        #[arg(long)]
        input: PathBuf,
        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
    },
    /// Generate a synthetic 60 Hz trace with shake spikes
    Synth {
        /// Number of super-threshold spikes to place
        #[arg(long, default_value = "3")]
        shakes: u32,
        /// Trace length in seconds
        #[arg(long, default_value = "10")]
        duration_secs: u64,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Stands in for the platform vibrator during replay.
struct StderrFeedback;

impl FeedbackEffector for StderrFeedback {
    fn pulse(&self) {
        eprintln!("pulse");
    }
}

pub fn run(action: TraceAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TraceAction::Replay { input, json } => replay(&input, json),
        TraceAction::Synth {
            shakes,
            duration_secs,
            output,
        } => synth(shakes, duration_secs, output.as_deref()),
    }
}

fn load_trace(path: &std::path::Path) -> Result<Vec<AccelSample>, Box<dyn std::error::Error>> {
    let file = File::open(path)
        .map_err(|e| format!("cannot open trace {}: {e}", path.display()))?;
    let mut samples = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let sample: AccelSample = serde_json::from_str(&line)
            .map_err(|e| format!("bad sample on line {}: {e}", index + 1))?;
        samples.push(sample);
    }
    tracing::debug!(samples = samples.len(), path = %path.display(), "loaded trace");
    Ok(samples)
}

fn replay(input: &std::path::Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let samples = load_trace(input)?;
    let sample_count = samples.len();

    let shakes = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&shakes);
    let mut service = ShakeService::new(
        Box::new(ScriptedSource::new(samples)),
        Box::new(StderrFeedback),
    );
    service.add_listener(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
        if !json {
            println!("shake #{n}");
        }
    });

    // The scripted source drains the whole trace during enable.
    service.enable_listening()?;
    service.stop_listening();

    let detected = shakes.load(Ordering::SeqCst);
    if json {
        let summary = serde_json::json!({
            "samples": sample_count,
            "shakes": detected,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{sample_count} samples, {detected} shakes");
    }
    Ok(())
}

fn synth(
    shakes: u32,
    duration_secs: u64,
    output: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let trace = synth_trace(duration_secs * 1_000, shakes);

    let mut lines = String::new();
    for sample in &trace {
        lines.push_str(&serde_json::to_string(sample)?);
        lines.push('\n');
    }

    match output {
        Some(path) => {
            let mut file = File::create(path)
                .map_err(|e| format!("cannot create {}: {e}", path.display()))?;
            file.write_all(lines.as_bytes())?;
            eprintln!("wrote {} samples to {}", trace.len(), path.display());
        }
        None => print!("{lines}"),
    }
    Ok(())
}
