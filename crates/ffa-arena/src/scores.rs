//! Scoreboard counters with self-healing objectives.

use crate::host::{Host, PlayerId};
use crate::ops::Operators;

pub const KILLS: &str = "kills";
pub const DEATHS: &str = "deaths";
pub const KILLSTREAK: &str = "killstreak";
pub const PLAYTIME: &str = "playtime";
pub const LEADERBOARD: &str = "leaderboard";

/// Scoreboard access that creates missing objectives on first use and tells
/// operators about it.
pub struct Scores<'a, H: ?Sized> {
    host: &'a mut H,
    operators: &'a Operators,
}

impl<'a, H: Host + ?Sized> Scores<'a, H> {
    pub const fn new(host: &'a mut H, operators: &'a Operators) -> Self {
        Self { host, operators }
    }

    /// Make sure `objective` exists.
    pub fn ensure(&mut self, objective: &str) {
        if self.host.has_objective(objective) {
            return;
        }
        self.host.add_objective(objective, objective);
        self.operators.warn(
            &mut *self.host,
            &format!("Scoreboard objective '{objective}' was missing and has been created"),
        );
    }

    /// Current score, 0 when unset.
    pub fn get(&mut self, objective: &str, player: PlayerId) -> i32 {
        self.ensure(objective);
        self.host.score(objective, player).unwrap_or(0)
    }

    pub fn set(&mut self, objective: &str, player: PlayerId, value: i32) {
        self.ensure(objective);
        self.host.set_score(objective, player, value);
    }

    /// Add `delta` and return the new score.
    pub fn add(&mut self, objective: &str, player: PlayerId, delta: i32) -> i32 {
        let value = self.get(objective, player).saturating_add(delta);
        self.host.set_score(objective, player, value);
        value
    }

    pub fn clear(&mut self, objective: &str) {
        self.ensure(objective);
        self.host.clear_objective(objective);
    }
}

/// Kills per death, treating zero deaths as one.
#[must_use]
pub fn kd_ratio(kills: i32, deaths: i32) -> f64 {
    f64::from(kills) / f64::from(deaths.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kd() {
        assert!((kd_ratio(20, 0) - 20.0).abs() < f64::EPSILON);
        assert!((kd_ratio(30, 4) - 7.5).abs() < f64::EPSILON);
        assert!(kd_ratio(0, 3).abs() < f64::EPSILON);
    }
}
