//! Alarm feedback: vibration and tone sequences played when a countdown ends

use std::{io::Write, sync::Mutex, time::Duration};
use futures::future::join_all;
use tokio::{process::Command, runtime::Handle, time::{sleep, timeout}};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Vibration waveform in milliseconds: wait, vibrate, pause, vibrate, ...
pub const VIBRATION_PATTERN_MS: [u64; 6] = [0, 500, 200, 500, 200, 500];
/// Number of alarm tones per alarm
pub const TONE_REPEAT: usize = 3;
/// Length of a single tone
pub const TONE_DURATION: Duration = Duration::from_millis(400);
/// Gap between consecutive tones
pub const TONE_SPACING: Duration = Duration::from_millis(300);

/// Receives the countdown's alarm events.
///
/// Implementations must not block: the countdown never waits for feedback
/// to finish, and any error returned here is logged and dropped by the caller.
pub trait FeedbackDispatcher: Send + Sync {
    /// The countdown just reached zero
    fn on_alarm(&self) -> Result<(), String>;

    /// Stop whatever alarm feedback is still playing
    fn cancel_alarm(&self) -> Result<(), String>;
}

/// Feedback adapter that drives host commands.
///
/// `vibrate_command` is run once per vibration pulse with the pulse length in
/// milliseconds appended as the last argument (e.g. `termux-vibrate -d`).
/// `tone_command` is run once per tone; without one the terminal bell is rung.
#[derive(Debug, Default)]
pub struct SystemFeedback {
    tone_command: Option<Vec<String>>,
    vibrate_command: Option<Vec<String>>,
    active: Mutex<Option<CancellationToken>>,
}

impl SystemFeedback {
    pub fn new(tone_command: Option<String>, vibrate_command: Option<String>) -> Self {
        Self {
            tone_command: tone_command.as_deref().and_then(split_command),
            vibrate_command: vibrate_command.as_deref().and_then(split_command),
            active: Mutex::new(None),
        }
    }

    /// Check if an alarm sequence is currently playing
    pub fn is_playing(&self) -> bool {
        self.active
            .lock()
            .map(|active| active.as_ref().map_or(false, |token| !token.is_cancelled()))
            .unwrap_or(false)
    }
}

impl FeedbackDispatcher for SystemFeedback {
    fn on_alarm(&self) -> Result<(), String> {
        let handle = Handle::try_current()
            .map_err(|e| format!("No runtime available for alarm feedback: {}", e))?;

        let token = CancellationToken::new();
        let previous = self.active.lock()
            .map_err(|e| format!("Failed to lock feedback state: {}", e))?
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        info!("Playing alarm feedback");
        let tone = self.tone_command.clone();
        let vibrate = self.vibrate_command.clone();
        handle.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Alarm feedback cancelled");
                }
                _ = async {
                    tokio::join!(
                        play_vibration(vibrate.as_deref()),
                        play_tones(tone.as_deref()),
                    )
                } => {
                    debug!("Alarm feedback finished");
                    token.cancel();
                }
            }
        });

        Ok(())
    }

    fn cancel_alarm(&self) -> Result<(), String> {
        let token = self.active.lock()
            .map_err(|e| format!("Failed to lock feedback state: {}", e))?
            .take();

        if let Some(token) = token {
            if !token.is_cancelled() {
                info!("Cancelling alarm feedback");
            }
            token.cancel();
        }
        Ok(())
    }
}

/// Play the vibration waveform once
async fn play_vibration(command: Option<&[String]>) {
    for (index, &millis) in VIBRATION_PATTERN_MS.iter().enumerate() {
        let segment = Duration::from_millis(millis);
        if index % 2 == 0 {
            sleep(segment).await;
            continue;
        }

        match command {
            Some(argv) => {
                let pulse = run_command(argv, Some(millis));
                let (result, _) = tokio::join!(pulse, sleep(segment));
                if let Err(e) = result {
                    warn!("Vibration pulse failed: {}", e);
                }
            }
            None => {
                debug!("Vibrate {}ms (no vibrate command configured)", millis);
                sleep(segment).await;
            }
        }
    }
}

/// Play the alarm tone `TONE_REPEAT` times, one tone starting every `TONE_SPACING`
async fn play_tones(command: Option<&[String]>) {
    let tones = (0..TONE_REPEAT).map(|index| async move {
        sleep(TONE_SPACING * index as u32).await;
        match command {
            Some(argv) => match timeout(TONE_DURATION, run_command(argv, None)).await {
                Ok(Err(e)) => warn!("Alarm tone failed: {}", e),
                Ok(Ok(())) | Err(_) => {}
            },
            None => ring_bell(),
        }
    });
    join_all(tones).await;
}

fn ring_bell() {
    let mut stdout = std::io::stdout();
    if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
        warn!("Failed to ring terminal bell: {}", e);
    }
}

/// Run a feedback command, killing it if the sequence is cancelled
async fn run_command(argv: &[String], millis: Option<u64>) -> Result<(), String> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| "Empty feedback command".to_string())?;

    let mut command = Command::new(program);
    command.args(args).kill_on_drop(true);
    if let Some(millis) = millis {
        command.arg(millis.to_string());
    }

    let status = command
        .status()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", program, e))?;

    if !status.success() {
        return Err(format!("{} exited with {}", program, status));
    }
    Ok(())
}

fn split_command(command: &str) -> Option<Vec<String>> {
    let argv: Vec<String> = command.split_whitespace().map(str::to_string).collect();
    if argv.is_empty() {
        None
    } else {
        Some(argv)
    }
}
