//! Playback countdown abstraction.

use std::time::Duration;

use async_trait::async_trait;

/// Default playback window before a playing request is finished.
pub const PLAYBACK_DURATION: Duration = Duration::from_millis(20_000);

/// Countdown that paces playback of a playing request.
///
/// Injected into the session so tests never wait on the wall clock.
#[async_trait]
pub trait PlaybackTimer: Send + Sync {
    /// Length of one playback window.
    fn duration(&self) -> Duration;

    /// Wait out one playback window.
    async fn wait(&self);
}

/// Wall-clock timer with a fixed playback window.
pub struct FixedPlaybackTimer {
    duration: Duration,
}

impl FixedPlaybackTimer {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl Default for FixedPlaybackTimer {
    fn default() -> Self {
        Self::new(PLAYBACK_DURATION)
    }
}

#[async_trait]
impl PlaybackTimer for FixedPlaybackTimer {
    fn duration(&self) -> Duration {
        self.duration
    }

    async fn wait(&self) {
        tokio::time::sleep(self.duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn waits_for_the_configured_window() {
        let timer = FixedPlaybackTimer::new(Duration::from_secs(5));
        let started = tokio::time::Instant::now();

        timer.wait().await;

        assert_eq!(started.elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn default_window_is_twenty_seconds() {
        assert_eq!(FixedPlaybackTimer::default().duration(), Duration::from_secs(20));
    }
}
