//! Timed spawn protection windows.

use std::time::{Duration, Instant};

use hashbrown::HashMap;

use crate::host::PlayerId;

/// Player to protection expiry.
#[derive(Debug, Clone)]
pub struct SpawnProtection {
    duration: Duration,
    expiries: HashMap<PlayerId, Instant>,
}

impl SpawnProtection {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            expiries: HashMap::new(),
        }
    }

    /// Protect `player` from `now` for the configured duration, replacing any
    /// earlier window. Returns the expiry.
    pub fn grant(&mut self, player: PlayerId, now: Instant) -> Instant {
        let expiry = now + self.duration;
        self.expiries.insert(player, expiry);
        expiry
    }

    /// Returns whether the player had a window.
    pub fn revoke(&mut self, player: PlayerId) -> bool {
        self.expiries.remove(&player).is_some()
    }

    #[must_use]
    pub fn expiry(&self, player: PlayerId) -> Option<Instant> {
        self.expiries.get(&player).copied()
    }

    /// Protected until strictly before the expiry instant.
    #[must_use]
    pub fn is_protected(&self, player: PlayerId, now: Instant) -> bool {
        self.expiries.get(&player).is_some_and(|&expiry| expiry > now)
    }

    /// Remove windows that have expired at `now`, returning their players in
    /// id order.
    pub fn sweep(&mut self, now: Instant) -> Vec<PlayerId> {
        let mut expired: Vec<PlayerId> = self
            .expiries
            .iter()
            .filter(|&(_, &expiry)| expiry <= now)
            .map(|(&player, _)| player)
            .collect();
        expired.sort_unstable();

        for player in &expired {
            self.expiries.remove(player);
        }
        expired
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expiries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_until_expiry() {
        let mut protection = SpawnProtection::new(Duration::from_secs(5));
        let t = Instant::now();
        let p = PlayerId(1);

        protection.grant(p, t);

        assert!(protection.is_protected(p, t + Duration::from_millis(4900)));
        assert!(protection.sweep(t + Duration::from_millis(4900)).is_empty());

        assert!(!protection.is_protected(p, t + Duration::from_secs(5)));
        assert_eq!(protection.sweep(t + Duration::from_secs(5)), vec![p]);
        assert!(protection.is_empty());
    }

    #[test]
    fn sweep_only_takes_expired() {
        let mut protection = SpawnProtection::new(Duration::from_secs(5));
        let t = Instant::now();

        protection.grant(PlayerId(2), t);
        protection.grant(PlayerId(1), t);
        protection.grant(PlayerId(3), t + Duration::from_secs(3));

        let expired = protection.sweep(t + Duration::from_secs(6));
        assert_eq!(expired, vec![PlayerId(1), PlayerId(2)]);
        assert!(protection.is_protected(PlayerId(3), t + Duration::from_secs(6)));
    }

    #[test]
    fn regrant_extends() {
        let mut protection = SpawnProtection::new(Duration::from_secs(5));
        let t = Instant::now();
        let p = PlayerId(1);

        protection.grant(p, t);
        let expiry = protection.grant(p, t + Duration::from_secs(4));
        assert_eq!(protection.expiry(p), Some(expiry));
        assert!(protection.is_protected(p, t + Duration::from_secs(6)));
    }

    #[test]
    fn revoke() {
        let mut protection = SpawnProtection::new(Duration::from_secs(5));
        let p = PlayerId(1);
        protection.grant(p, Instant::now());

        assert!(protection.revoke(p));
        assert!(!protection.revoke(p));
        assert_eq!(protection.len(), 0);
    }
}
