/// Interval gate over the monotonic frame clock.
///
/// A `Cooldown` that has never fired is always ready.  Readiness is
/// `now - last >= interval`; only `reset` moves the last-fired mark.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cooldown {
    pub interval_ms: u64,
    pub last_ms: Option<u64>,
}

impl Cooldown {
    pub fn new(interval_ms: u64) -> Cooldown {
        Cooldown { interval_ms, last_ms: None }
    }

    /// A cooldown whose interval is counted from `now_ms`.
    pub fn started(interval_ms: u64, now_ms: u64) -> Cooldown {
        Cooldown { interval_ms, last_ms: Some(now_ms) }
    }

    pub fn ready(&self, now_ms: u64) -> bool {
        self.last_ms
            .map(|last| now_ms.saturating_sub(last) >= self.interval_ms)
            .unwrap_or(true)
    }

    pub fn reset(&mut self, now_ms: u64) {
        self.last_ms = Some(now_ms);
    }

    /// True while `now_ms` is within `window_ms` of the last reset.
    pub fn within(&self, now_ms: u64, window_ms: u64) -> bool {
        self.last_ms
            .map(|last| now_ms.saturating_sub(last) < window_ms)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cooldown_is_ready() {
        assert!(Cooldown::new(500).ready(0));
    }

    #[test]
    fn started_cooldown_waits_full_interval() {
        let c = Cooldown::started(2500, 0);
        assert!(!c.ready(2499));
        assert!(c.ready(2500));
    }

    #[test]
    fn within_window_after_reset() {
        let mut c = Cooldown::new(100);
        assert!(!c.within(50, 1000));
        c.reset(50);
        assert!(c.within(1049, 1000));
        assert!(!c.within(1050, 1000));
    }
}
