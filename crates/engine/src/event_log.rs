//! JSON-lines event log
//!
//! Optional and append-only. Each record is one serde_json object followed by `\n`, so the
//! file can be tailed or loaded line by line. Nothing is written to the terminal.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use blockfall_types::LockEvent;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventRecord {
    SessionStart {
        t_ms: f64,
        seed: u32,
    },
    Lock {
        t_ms: f64,
        lines_cleared: u32,
        score_delta: u32,
        score: u32,
        lines: u32,
        level: u32,
        level_up: bool,
        game_over: bool,
    },
    Restart {
        t_ms: f64,
    },
    SessionEnd {
        t_ms: f64,
        score: u32,
        lines: u32,
        level: u32,
    },
}

impl EventRecord {
    pub fn lock(t_ms: f64, ev: &LockEvent) -> Self {
        EventRecord::Lock {
            t_ms,
            lines_cleared: ev.lines_cleared,
            score_delta: ev.score_delta,
            score: ev.score,
            lines: ev.lines,
            level: ev.level,
            level_up: ev.level_up,
            game_over: ev.game_over,
        }
    }
}

pub struct EventLog<W: Write> {
    out: W,
    buf: Vec<u8>,
}

impl EventLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(256),
        }
    }

    pub fn record(&mut self, rec: &EventRecord) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, rec).context("failed to encode event")?;
        self.buf.push(b'\n');
        self.out
            .write_all(&self.buf)
            .context("failed to write event log")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().context("failed to flush event log")
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_object_per_line() {
        let mut log = EventLog::new(Vec::new());
        log.record(&EventRecord::SessionStart { t_ms: 0.0, seed: 9 })
            .unwrap();
        log.record(&EventRecord::Restart { t_ms: 12.5 }).unwrap();

        let text = String::from_utf8(log.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "session_start");
        assert_eq!(first["seed"], 9);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["event"], "restart");
        assert_eq!(second["t_ms"], 12.5);
    }

    #[test]
    fn lock_record_copies_event() {
        let ev = LockEvent {
            lines_cleared: 2,
            score_delta: 100,
            score: 140,
            lines: 3,
            level: 1,
            level_up: false,
            game_over: false,
        };
        let rec = EventRecord::lock(5.0, &ev);
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v["event"], "lock");
        assert_eq!(v["lines_cleared"], 2);
        assert_eq!(v["score_delta"], 100);
        assert_eq!(v["level_up"], false);
    }

    #[test]
    fn open_appends_to_file() {
        let path = std::env::temp_dir().join(format!("blockfall-log-{}.jsonl", std::process::id()));
        let _ = std::fs::remove_file(&path);
        {
            let mut log = EventLog::open(&path).unwrap();
            log.record(&EventRecord::Restart { t_ms: 1.0 }).unwrap();
            log.flush().unwrap();
        }
        {
            let mut log = EventLog::open(&path).unwrap();
            log.record(&EventRecord::Restart { t_ms: 2.0 }).unwrap();
            log.flush().unwrap();
        }
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        let _ = std::fs::remove_file(&path);
    }
}
