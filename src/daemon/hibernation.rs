use chrono::Duration;

/// Decides whether the time since the previous tick means the machine was
/// asleep rather than the loop simply running late.
pub struct HibernationDetector {
    threshold: Duration,
}

impl HibernationDetector {
    pub fn from_seconds(threshold_s: i64) -> Self {
        Self {
            threshold: Duration::seconds(threshold_s),
        }
    }

    pub fn is_gap(&self, elapsed: Duration) -> bool {
        elapsed > self.threshold
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::HibernationDetector;

    #[test]
    fn threshold_is_exclusive() {
        let detector = HibernationDetector::from_seconds(120);
        assert!(!detector.is_gap(Duration::seconds(60)));
        assert!(!detector.is_gap(Duration::seconds(120)));
        assert!(detector.is_gap(Duration::seconds(121)));
    }
}
