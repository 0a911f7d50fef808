// Spoken feedback
//
// Speech synthesis is outside the crate; phrases go to a FeedbackSink. The
// default sink logs them. A phrase is repeated only when it differs from the
// last one spoken or the cooldown has passed, so a pose held for many frames
// is not announced on every frame.

use std::time::{Duration, Instant};

pub trait FeedbackSink {
    /// Offer a phrase; returns true if it was actually announced
    fn announce(&mut self, phrase: &str, now: Instant) -> bool;
}

#[derive(Debug)]
pub struct PhraseRateLimiter {
    last_phrase: Option<String>,
    last_at: Option<Instant>,
    cooldown: Duration,
}

impl PhraseRateLimiter {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            last_phrase: None,
            last_at: None,
            cooldown,
        }
    }

    pub fn should_emit(&mut self, phrase: &str, now: Instant) -> bool {
        let phrase_changed = self
            .last_phrase
            .as_deref()
            .map(|last| last != phrase)
            .unwrap_or(true);
        let past_cooldown = self
            .last_at
            .map(|ts| now.saturating_duration_since(ts) >= self.cooldown)
            .unwrap_or(true);

        if phrase_changed || past_cooldown {
            self.last_phrase = Some(phrase.to_string());
            self.last_at = Some(now);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.last_phrase = None;
        self.last_at = None;
    }
}

/// Announces phrases through the log
#[derive(Debug)]
pub struct LogAnnouncer {
    limiter: PhraseRateLimiter,
    announced: u64,
}

impl LogAnnouncer {
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            limiter: PhraseRateLimiter::new(Duration::from_millis(cooldown_ms)),
            announced: 0,
        }
    }

    pub fn announced(&self) -> u64 {
        self.announced
    }
}

impl FeedbackSink for LogAnnouncer {
    fn announce(&mut self, phrase: &str, now: Instant) -> bool {
        if !self.limiter.should_emit(phrase, now) {
            return false;
        }
        self.announced += 1;
        tracing::info!("[Feedback] {}", phrase);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_phrase_waits_for_cooldown() {
        let mut limiter = PhraseRateLimiter::new(Duration::from_millis(1500));
        let t0 = Instant::now();

        assert!(limiter.should_emit("Step one, raise your hand up for pop", t0));
        assert!(!limiter.should_emit(
            "Step one, raise your hand up for pop",
            t0 + Duration::from_millis(500)
        ));
        assert!(limiter.should_emit(
            "Step one, raise your hand up for pop",
            t0 + Duration::from_millis(1500)
        ));
    }

    #[test]
    fn test_new_phrase_is_spoken_immediately() {
        let mut limiter = PhraseRateLimiter::new(Duration::from_secs(10));
        let t0 = Instant::now();
        assert!(limiter.should_emit("a", t0));
        assert!(limiter.should_emit("b", t0));
        assert!(limiter.should_emit("a", t0));
    }

    #[test]
    fn test_clear_forgets_last_phrase() {
        let mut limiter = PhraseRateLimiter::new(Duration::from_secs(10));
        let t0 = Instant::now();
        assert!(limiter.should_emit("a", t0));
        limiter.clear();
        assert!(limiter.should_emit("a", t0));
    }

    #[test]
    fn test_log_announcer_counts_announcements() {
        let mut announcer = LogAnnouncer::new(1_000);
        let t0 = Instant::now();
        announcer.announce("Bhajan: Rotate your hand", t0);
        announcer.announce("Bhajan: Rotate your hand", t0);
        assert_eq!(announcer.announced(), 1);
    }
}
