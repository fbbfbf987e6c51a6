//! Gesture flavor lines
//!
//! Each newly held gesture earns one short line of commentary on the HUD.
//! The line can come from an external text generator command; failures of
//! any kind fold into a fixed fallback so the HUD always has something to
//! say and the game never waits on the generator.

use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::warn;

use crate::gesture::Gesture;

/// Shown whenever the generator fails.
pub const FALLBACK_FLAVOR: &str = "What a gesture!";

/// A generator that has not answered by now is abandoned.
const GENERATOR_TIMEOUT: Duration = Duration::from_secs(10);

/// Where flavor lines come from.
#[derive(Debug, Clone)]
pub enum Oracle {
    /// Run a command with the prompt as its final argument and use the
    /// first line it prints
    Command(String),
    /// Built-in lines, no external process
    Canned,
}

impl Oracle {
    /// Produce a flavor line for a newly held gesture.
    ///
    /// Never fails: generator errors are logged and replaced by the
    /// fallback line.
    pub async fn flavor(&self, gesture: &Gesture) -> String {
        match self {
            Oracle::Command(command) => match run_generator(command, gesture).await {
                Ok(line) => line,
                Err(e) => {
                    warn!("flavor generation failed: {}", e);
                    FALLBACK_FLAVOR.to_string()
                }
            },
            Oracle::Canned => canned_flavor(&gesture.name).to_string(),
        }
    }
}

/// Prompt handed to the generator command.
pub fn build_prompt(gesture: &Gesture) -> String {
    format!(
        "In one short, playful sentence, react to a player showing {} ({}) \
         while steering a snake game. No emoji.",
        gesture.name, gesture.description
    )
}

async fn run_generator(command: &str, gesture: &Gesture) -> Result<String> {
    let prompt = build_prompt(gesture);

    let mut parts = command.split_whitespace();
    let program = parts.next().context("flavor command is empty")?;

    let output = timeout(
        GENERATOR_TIMEOUT,
        Command::new(program)
            .args(parts)
            .arg(&prompt)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .output(),
    )
    .await
    .context("flavor generator timed out")?
    .context("flavor generator failed to run")?;

    if !output.status.success() {
        anyhow::bail!("flavor generator exited with {}", output.status);
    }

    let line = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .to_string();

    if line.is_empty() {
        anyhow::bail!("flavor generator printed nothing");
    }

    Ok(line)
}

fn canned_flavor(name: &str) -> &'static str {
    match name {
        "Thumbs Up" => "Approval received, the snake slithers on with pride.",
        "Peace" => "Two fingers up, zero peace for that apple.",
        "OK" => "A perfect circle from a hand guiding a very long line.",
        "Rock" => "The snake headbangs quietly in your honor.",
        "Pointing" => "The snake goes where the finger points.",
        "Fist" => "The world holds its breath, and so does the snake.",
        "Shaka" => "Hang loose, the snake can wait.",
        "Spider-Man" => "Thwip. The snake is now mildly jealous of webs.",
        "Love Heart" => "A tiny heart for a snake with a big appetite.",
        "Vulcan" => "Live long and slither.",
        "High Five" => "An open palm, and the snake appreciates the enthusiasm.",
        _ => FALLBACK_FLAVOR,
    }
}
