use crate::domain::ports::Console;
use crate::utils::error::Result;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Background countdown that raises a flag once the limit elapses.
struct Countdown {
    expired: watch::Receiver<bool>,
    task: JoinHandle<()>,
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Tracks how long a round has been running and, for timed rounds,
/// cuts off a pending prompt when time runs out.
pub struct RoundClock {
    started: Instant,
    limit: Option<Duration>,
    countdown: Option<Countdown>,
}

impl RoundClock {
    pub fn untimed() -> Self {
        Self {
            started: Instant::now(),
            limit: None,
            countdown: None,
        }
    }

    /// Starts the countdown immediately. Must be called inside a tokio runtime.
    pub fn timed(limit: Duration) -> Self {
        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            tracing::info!("⏰ Round timer expired after {:?}", limit);
            let _ = tx.send(true);
        });
        Self {
            started: Instant::now(),
            limit: Some(limit),
            countdown: Some(Countdown { expired: rx, task }),
        }
    }

    pub fn is_timed(&self) -> bool {
        self.limit.is_some()
    }

    pub fn limit(&self) -> Option<Duration> {
        self.limit
    }

    pub fn expired(&self) -> bool {
        self.countdown
            .as_ref()
            .map(|c| *c.expired.borrow())
            .unwrap_or(false)
    }

    /// Elapsed time, capped at the limit for timed rounds.
    pub fn elapsed(&self) -> Duration {
        let elapsed = self.started.elapsed();
        match self.limit {
            Some(limit) => elapsed.min(limit),
            None => elapsed,
        }
    }

    /// Reads one line, or returns `None` if the countdown fires first.
    pub async fn read(&self, console: &mut dyn Console, prompt: &str) -> Result<Option<String>> {
        let Some(countdown) = &self.countdown else {
            return console.read_line(prompt).await.map(Some);
        };
        if self.expired() {
            return Ok(None);
        }

        let mut expired = countdown.expired.clone();
        tokio::select! {
            biased;
            _ = async {
                // 計時任務被取消時永遠不觸發
                if expired.wait_for(|done| *done).await.is_err() {
                    std::future::pending::<()>().await;
                }
            } => Ok(None),
            line = console.read_line(prompt) => line.map(Some),
        }
    }

    /// Stops the countdown; used when the round ends before the limit.
    pub fn stop(&mut self) {
        if let Some(countdown) = self.countdown.as_ref() {
            countdown.task.abort();
        }
    }
}

/// `"M minutes and S seconds"`, rounded to whole seconds.
pub fn time_label(duration: Duration) -> String {
    let total = duration.as_secs_f64().round() as u64;
    format!("{} minutes and {} seconds", total / 60, total % 60)
}
