//! Render sinks
//!
//! The core has no display of its own; each frame's draw list is handed to a
//! sink. Sinks here either log, discard, or trace frames as JSON lines.

use std::io::{self, Write};

use serde::Serialize;

use crate::sim::{RenderItem, Sprite};

/// Receives the draw list once per frame
pub trait RenderSink {
    fn submit(&mut self, frame: u64, items: &[RenderItem]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Discards every frame
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn submit(&mut self, _frame: u64, _items: &[RenderItem]) -> io::Result<()> {
        Ok(())
    }
}

/// Logs a one-line digest of each frame at trace level
#[derive(Debug, Default)]
pub struct LogSink;

impl RenderSink for LogSink {
    fn submit(&mut self, frame: u64, items: &[RenderItem]) -> io::Result<()> {
        if log::log_enabled!(log::Level::Trace) {
            let hud = items.iter().find_map(|item| match item.sprite {
                Sprite::Hud { score, health, .. } => Some((score, health)),
                _ => None,
            });
            if let Some((score, health)) = hud {
                log::trace!(
                    "frame {frame}: {} items, score {score}, health {health}",
                    items.len()
                );
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct TraceLine<'a> {
    frame: u64,
    items: &'a [RenderItem],
}

/// Writes one JSON object per frame
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn submit(&mut self, frame: u64, items: &[RenderItem]) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, &TraceLine { frame, items })?;
        self.out.write_all(b"\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
