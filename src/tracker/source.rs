//! Frame sources
//!
//! Either a live tracker subprocess or a recorded replay file; both feed
//! decoded frames into a bounded channel that the game loop drains.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{info, warn};

use super::frame::decode_line;
use crate::gesture::HandFrame;

/// Depth of the frame channel between the source task and the game loop.
pub const FRAME_CHANNEL_DEPTH: usize = 64;

/// Pacing for replayed recordings, roughly camera rate.
const REPLAY_FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Where tracked hand frames come from.
#[derive(Debug, Clone)]
pub enum FrameSource {
    /// Spawn a tracker command and read NDJSON from its stdout
    Command(String),
    /// Replay a recorded NDJSON file at camera rate
    Replay(PathBuf),
}

impl FrameSource {
    /// Start the source. Frames arrive on the returned channel until the
    /// source runs dry or the receiver is dropped.
    pub async fn start(self) -> Result<mpsc::Receiver<HandFrame>> {
        let (tx, rx) = mpsc::channel(FRAME_CHANNEL_DEPTH);

        match self {
            FrameSource::Command(command) => spawn_tracker(&command, tx)?,
            FrameSource::Replay(path) => spawn_replay(path, tx).await?,
        }

        Ok(rx)
    }
}

fn spawn_tracker(command: &str, tx: mpsc::Sender<HandFrame>) -> Result<()> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .context("tracker command is empty")?
        .to_string();
    let args: Vec<String> = parts.map(str::to_string).collect();

    let mut child = Command::new(&program)
        .args(&args)
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("failed to start tracker command '{program}'"))?;

    let stdout = child
        .stdout
        .take()
        .context("tracker stdout was not captured")?;

    info!("tracker process started: {}", program);

    tokio::spawn(async move {
        // The child rides along so kill_on_drop fires once the stream ends
        let _child = child;
        pump_lines(BufReader::new(stdout), tx, None).await;
        info!("tracker stream ended");
    });

    Ok(())
}

async fn spawn_replay(path: PathBuf, tx: mpsc::Sender<HandFrame>) -> Result<()> {
    let file = File::open(&path)
        .await
        .with_context(|| format!("failed to open replay file {}", path.display()))?;

    info!("replaying tracker frames from {}", path.display());

    tokio::spawn(async move {
        pump_lines(BufReader::new(file), tx, Some(REPLAY_FRAME_INTERVAL)).await;
        info!("replay ended");
    });

    Ok(())
}

/// Read lines, decode them, and forward the frames. A pace interval makes
/// the reader wait between lines so recordings play back at camera rate.
async fn pump_lines<R>(reader: BufReader<R>, tx: mpsc::Sender<HandFrame>, pace: Option<Duration>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = reader.lines();
    let mut pace = pace.map(interval);

    loop {
        if let Some(timer) = pace.as_mut() {
            timer.tick().await;
        }

        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(frame) = decode_line(&line) {
                    if tx.send(frame).await.is_err() {
                        // Receiver gone, the game loop has shut down
                        break;
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("tracker stream read failed: {}", e);
                break;
            }
        }
    }
}
