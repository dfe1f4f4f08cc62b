/// Session counters: score, distance, health, armour and turret ammo.
///
/// Only combat resolution and the progression controller mutate a
/// [`StatsKeeper`]; every mutator keeps the counters inside their ranges.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_ARMOUR, MAX_HEALTH, MAX_TURRET_AMMO, START_DISTANCE};
use crate::error::{GameError, GameResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsKeeper {
    score: u32,
    distance: i32,
    health: i32,
    armour: i32,
    turret_ammo: i32,
}

/// Plain numeric copy of a [`StatsKeeper`] for serialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub score: u32,
    pub distance: i32,
    pub health: i32,
    pub armour: i32,
    pub turret_ammo: i32,
}

impl Default for StatsKeeper {
    fn default() -> Self {
        StatsKeeper::new()
    }
}

impl StatsKeeper {
    pub fn new() -> StatsKeeper {
        StatsKeeper {
            score: 0,
            distance: START_DISTANCE,
            health: MAX_HEALTH,
            armour: MAX_ARMOUR,
            turret_ammo: MAX_TURRET_AMMO,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn distance(&self) -> i32 {
        self.distance
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn armour(&self) -> i32 {
        self.armour
    }

    pub fn turret_ammo(&self) -> i32 {
        self.turret_ammo
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Armour soaks the hit first; whatever it cannot absorb comes off health.
    pub fn take_damage(&mut self, amount: i32) {
        let amount = amount.max(0);
        let overflow = amount - self.armour;
        if overflow > 0 {
            self.armour = 0;
            self.health = (self.health - overflow).max(0);
        } else {
            self.armour -= amount;
        }
    }

    /// Returns false, changing nothing, when the armour is already full.
    pub fn regen_armour(&mut self) -> bool {
        if self.armour >= MAX_ARMOUR {
            return false;
        }
        self.armour += 1;
        true
    }

    /// Returns false, changing nothing, when the magazine is already full.
    pub fn regen_turret(&mut self) -> bool {
        if self.turret_ammo >= MAX_TURRET_AMMO {
            return false;
        }
        self.turret_ammo += 1;
        true
    }

    /// Takes one round for a turret shot.  Returns false when empty.
    pub fn consume_turret(&mut self) -> bool {
        if self.turret_ammo <= 0 {
            return false;
        }
        self.turret_ammo -= 1;
        true
    }

    pub fn travel(&mut self, km: i32) {
        self.distance -= km;
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            score: self.score,
            distance: self.distance,
            health: self.health,
            armour: self.armour,
            turret_ammo: self.turret_ammo,
        }
    }

    /// Rebuild a keeper from a snapshot, rejecting out-of-range counters.
    pub fn restore(snapshot: &StatsSnapshot) -> GameResult<StatsKeeper> {
        let in_range = (0..=MAX_HEALTH).contains(&snapshot.health)
            && (0..=MAX_ARMOUR).contains(&snapshot.armour)
            && (0..=MAX_TURRET_AMMO).contains(&snapshot.turret_ammo)
            && snapshot.distance <= START_DISTANCE;
        if !in_range {
            return Err(GameError::InvalidEntityState {
                context: "stats snapshot counters out of range",
            });
        }
        Ok(StatsKeeper {
            score: snapshot.score,
            distance: snapshot.distance,
            health: snapshot.health,
            armour: snapshot.armour,
            turret_ammo: snapshot.turret_ammo,
        })
    }

    /// True when every counter is within its documented range.
    pub fn is_consistent(&self) -> bool {
        (0..=MAX_HEALTH).contains(&self.health)
            && (0..=MAX_ARMOUR).contains(&self.armour)
            && (0..=MAX_TURRET_AMMO).contains(&self.turret_ammo)
    }
}
