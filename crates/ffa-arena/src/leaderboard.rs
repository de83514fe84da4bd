//! Top players by kill/death ratio.

use std::cmp::Ordering;

use tracing::debug;

use crate::config::LeaderboardConfig;
use crate::host::{Host, PlayerId};
use crate::ops::Operators;
use crate::scores::{DEATHS, KILLS, LEADERBOARD, Scores, kd_ratio};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standing {
    pub player: PlayerId,
    pub kills: i32,
    pub deaths: i32,
}

impl Standing {
    #[must_use]
    pub fn kd(&self) -> f64 {
        kd_ratio(self.kills, self.deaths)
    }
}

/// Best `size` standings with at least `min_kills`, best first.
///
/// Equal ratios rank the player with more kills first, then the lower id.
#[must_use]
pub fn rank(mut standings: Vec<Standing>, config: &LeaderboardConfig) -> Vec<Standing> {
    standings.retain(|s| s.kills >= config.min_kills);
    standings.sort_by(|a, b| {
        b.kd()
            .partial_cmp(&a.kd())
            .unwrap_or(Ordering::Equal)
            .then(b.kills.cmp(&a.kills))
            .then(a.player.cmp(&b.player))
    });
    standings.truncate(config.size);
    standings
}

/// Rewrite the leaderboard objective from the connected players' scores.
/// Rank 1 is the best player.
pub fn refresh<H: Host + ?Sized>(host: &mut H, operators: &Operators, config: &LeaderboardConfig) -> Vec<Standing> {
    let players = host.players();
    let mut scores = Scores::new(host, operators);

    let standings = players
        .into_iter()
        .map(|player| Standing {
            player,
            kills: scores.get(KILLS, player),
            deaths: scores.get(DEATHS, player),
        })
        .collect();
    let ranked = rank(standings, config);

    scores.clear(LEADERBOARD);
    for (index, standing) in ranked.iter().enumerate() {
        scores.set(LEADERBOARD, standing.player, index as i32 + 1);
    }

    debug!("Leaderboard refreshed with {} players", ranked.len());
    ranked
}
