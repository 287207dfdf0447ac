//! Musou headless driver
//!
//! Usage: `musou [settings.json]`. Logging is controlled by `RUST_LOG`.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};

use musou::Settings;
use musou::platform::{
    AutopilotInput, IdleInput, InputSource, JsonLinesSink, LogSink, RenderSink, clock_for,
};
use musou::runner::run;

fn main() -> Result<()> {
    env_logger::init();

    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    log::info!(
        "Musou starting (seed {}, {} pacing, autopilot {})",
        settings.seed,
        settings.pacing.as_str(),
        if settings.autopilot { "on" } else { "off" }
    );

    let mut input: Box<dyn InputSource> = if settings.autopilot {
        Box::new(AutopilotInput::default())
    } else {
        Box::new(IdleInput)
    };
    let mut sink: Box<dyn RenderSink> = match &settings.trace_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating trace file {}", path.display()))?;
            Box::new(JsonLinesSink::new(BufWriter::new(file)))
        }
        None => Box::new(LogSink),
    };
    let mut clock = clock_for(settings.pacing);

    let summary = run(&settings, input.as_mut(), sink.as_mut(), clock.as_mut())?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
