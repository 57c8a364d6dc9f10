//! Periodic sunrise/sunset flip shown on the current-conditions screen.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SunEvent {
    Sunrise,
    Sunset,
}

impl SunEvent {
    pub fn label(&self) -> &'static str {
        match self {
            SunEvent::Sunrise => "Sunrise",
            SunEvent::Sunset => "Sunset",
        }
    }
}

/// Handle to the timer task. Dropping it stops the timer.
#[derive(Debug)]
pub struct SunToggle {
    showing_sunset: Arc<AtomicBool>,
    token: CancellationToken,
}

impl SunToggle {
    /// Must be called from within a tokio runtime.
    pub fn start(period: Duration) -> Self {
        let showing_sunset = Arc::new(AtomicBool::new(false));
        let token = CancellationToken::new();

        let flag = Arc::clone(&showing_sunset);
        let cancelled = token.clone();
        tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => {
                        debug!("sun toggle stopped");
                        break;
                    }
                    _ = ticks.tick() => {
                        flag.fetch_xor(true, Ordering::SeqCst);
                    }
                }
            }
        });

        Self { showing_sunset, token }
    }

    pub fn current(&self) -> SunEvent {
        if self.showing_sunset.load(Ordering::SeqCst) { SunEvent::Sunset } else { SunEvent::Sunrise }
    }

    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }
}

impl Drop for SunToggle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    const PERIOD: Duration = Duration::from_secs(10);
    const NUDGE: Duration = Duration::from_millis(50);

    #[tokio::test(start_paused = true)]
    async fn flips_every_period() {
        let toggle = SunToggle::start(PERIOD);
        assert_eq!(toggle.current(), SunEvent::Sunrise);

        sleep(PERIOD + NUDGE).await;
        assert_eq!(toggle.current(), SunEvent::Sunset);

        sleep(PERIOD).await;
        assert_eq!(toggle.current(), SunEvent::Sunrise);
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_toggle_never_changes() {
        let toggle = SunToggle::start(PERIOD);
        sleep(PERIOD + NUDGE).await;
        assert_eq!(toggle.current(), SunEvent::Sunset);

        toggle.stop();
        assert!(!toggle.is_running());
        sleep(PERIOD * 3).await;
        assert_eq!(toggle.current(), SunEvent::Sunset);
    }

    #[test]
    fn labels() {
        assert_eq!(SunEvent::Sunrise.label(), "Sunrise");
        assert_eq!(SunEvent::Sunset.label(), "Sunset");
    }
}
