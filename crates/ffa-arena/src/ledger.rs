//! Cumulative damage per victim, used to credit indirect kills.

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::host::PlayerId;

/// Damage one attacker has dealt one victim since the victim's last death.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    pub attacker: PlayerId,
    pub damage: f32,
}

/// Victim to attacker damage totals.
///
/// Contributions are kept in the order each attacker first hit the victim,
/// which is what breaks ties when two attackers dealt the same damage.
#[derive(Debug, Clone)]
pub struct DamageLedger {
    threshold: f32,
    victims: HashMap<PlayerId, SmallVec<[Contribution; 4]>>,
}

impl DamageLedger {
    /// Ledger crediting attackers with at least `threshold` damage.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            victims: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Add `amount` to the attacker's total against `victim`.
    ///
    /// Returns `false` and records nothing for non-positive or non-finite
    /// amounts and for self-inflicted damage.
    pub fn record(&mut self, victim: PlayerId, attacker: PlayerId, amount: f32) -> bool {
        if victim == attacker || !amount.is_finite() || amount <= 0.0 {
            return false;
        }

        let contributions = self.victims.entry(victim).or_default();
        match contributions.iter_mut().find(|c| c.attacker == attacker) {
            Some(contribution) => contribution.damage += amount,
            None => contributions.push(Contribution {
                attacker,
                damage: amount,
            }),
        }
        trace!("{attacker:?} dealt {amount} to {victim:?}");
        true
    }

    /// Contributions against `victim` in first-hit order.
    #[must_use]
    pub fn contributions(&self, victim: PlayerId) -> &[Contribution] {
        self.victims
            .get(&victim)
            .map(SmallVec::as_slice)
            .unwrap_or_default()
    }

    /// Total damage `attacker` has dealt `victim`.
    #[must_use]
    pub fn damage_dealt(&self, victim: PlayerId, attacker: PlayerId) -> f32 {
        self.contributions(victim)
            .iter()
            .find(|c| c.attacker == attacker)
            .map_or(0.0, |c| c.damage)
    }

    #[must_use]
    pub fn is_tracking(&self, victim: PlayerId) -> bool {
        self.victims.contains_key(&victim)
    }

    /// Number of victims with recorded damage.
    #[must_use]
    pub fn len(&self) -> usize {
        self.victims.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.victims.is_empty()
    }

    /// Pick who gets credit for `victim`'s death and drop the victim's entry.
    ///
    /// The attacker with the highest total at or above the threshold wins,
    /// earliest first hit breaking ties. Without one, the player who dealt
    /// the fatal blow (`direct`) is credited. A victim is never credited with
    /// their own death.
    pub fn resolve_killer(&mut self, victim: PlayerId, direct: Option<PlayerId>) -> Option<PlayerId> {
        let contributions = self.victims.remove(&victim).unwrap_or_default();

        let mut best: Option<Contribution> = None;
        for contribution in contributions.iter().filter(|c| c.damage >= self.threshold) {
            if best.is_none_or(|b| contribution.damage > b.damage) {
                best = Some(*contribution);
            }
        }

        best.map(|c| c.attacker)
            .or(direct)
            .filter(|&killer| killer != victim)
    }

    /// Drop everything involving `player`, as victim and as attacker.
    pub fn forget(&mut self, player: PlayerId) {
        self.victims.remove(&player);
        self.victims.retain(|_, contributions| {
            contributions.retain(|c| c.attacker != player);
            !contributions.is_empty()
        });
    }
}
