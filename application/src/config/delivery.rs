//! Delivery configuration: where content goes and how fast.

use newsquiz_domain::Language;
use rand::Rng;
use std::collections::BTreeMap;
use std::time::Duration;

/// Destination channels.
///
/// Good quizzes go to the channel of their language; rejected questions
/// and diagnostics go to the single log channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Destinations {
    pub channels: BTreeMap<Language, String>,
    pub log_channel: Option<String>,
}

impl Destinations {
    pub fn new(channels: BTreeMap<Language, String>, log_channel: Option<String>) -> Self {
        Self {
            channels,
            log_channel,
        }
    }

    pub fn channel_for(&self, language: &Language) -> Option<&str> {
        self.channels.get(language).map(String::as_str)
    }

    pub fn log_channel(&self) -> Option<&str> {
        self.log_channel.as_deref()
    }
}

/// Pause between consecutive poll sends.
///
/// Each pause is drawn uniformly from `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    min: Duration,
    max: Duration,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            min: Duration::from_secs(5),
            max: Duration::from_secs(9),
        }
    }
}

impl PacingPolicy {
    /// Bounds are swapped when given in the wrong order.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// No pause at all.
    pub fn none() -> Self {
        Self {
            min: Duration::ZERO,
            max: Duration::ZERO,
        }
    }

    pub fn is_none(&self) -> bool {
        self.max.is_zero()
    }

    pub fn next_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        Duration::from_millis(rng.gen_range(min_ms..=max_ms))
    }

    pub async fn pause(&self) {
        if self.is_none() {
            return;
        }
        let delay = self.next_delay(&mut rand::thread_rng());
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_default_pacing_is_five_to_nine_seconds() {
        let pacing = PacingPolicy::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let delay = pacing.next_delay(&mut rng);
            assert!(delay >= Duration::from_secs(5));
            assert!(delay <= Duration::from_secs(9));
        }
    }

    #[test]
    fn test_none_never_waits() {
        let pacing = PacingPolicy::none();
        assert!(pacing.is_none());
        assert_eq!(
            pacing.next_delay(&mut StdRng::seed_from_u64(1)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_swapped_bounds() {
        let pacing = PacingPolicy::new(Duration::from_secs(3), Duration::from_secs(1));
        assert_eq!(pacing, PacingPolicy::new(Duration::from_secs(1), Duration::from_secs(3)));
    }

    #[test]
    fn test_destinations_lookup() {
        let mut channels = BTreeMap::new();
        channels.insert(Language::english(), "@english_quiz".to_string());
        let destinations = Destinations::new(channels, Some("@log".to_string()));

        assert_eq!(destinations.channel_for(&Language::english()), Some("@english_quiz"));
        assert_eq!(destinations.channel_for(&Language::spanish()), None);
        assert_eq!(destinations.log_channel(), Some("@log"));
    }
}
