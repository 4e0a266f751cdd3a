//! Per-hero combat state owned by the arena roster.

use arena_legends_core::{
    Archetype, CellCoord, HeroSnapshot, HeroStats, PlayerId, SPECIAL_COOLDOWN_TURNS,
    STARTING_HEALTH,
};

/// Lifecycle of a knight's war cry bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DamageBonus {
    None,
    /// Armed during the current turn; survives the end of that turn.
    Granted(u32),
    /// Carried into the following own turn; cleared when it ends.
    Active(u32),
}

/// Combat state of a single hero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hero {
    id: PlayerId,
    name: String,
    archetype: Archetype,
    stats: HeroStats,
    pub(crate) cell: Option<CellCoord>,
    health: u32,
    special_cooldown: u32,
    pending_defense: Option<u32>,
    bonus: DamageBonus,
    evasion_armed: bool,
}

impl Hero {
    pub(crate) fn new(id: PlayerId, name: String, archetype: Archetype) -> Self {
        Self {
            id,
            name,
            archetype,
            stats: archetype.stats(),
            cell: None,
            health: STARTING_HEALTH,
            special_cooldown: 0,
            pending_defense: None,
            bonus: DamageBonus::None,
            evasion_armed: false,
        }
    }

    /// Identifier of the hero.
    #[must_use]
    pub const fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name of the hero.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Archetype the hero was drafted as.
    #[must_use]
    pub const fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Immutable stat block derived from the archetype.
    #[must_use]
    pub const fn stats(&self) -> &HeroStats {
        &self.stats
    }

    /// Cell the hero stands on, `None` before placement or after elimination.
    #[must_use]
    pub const fn cell(&self) -> Option<CellCoord> {
        self.cell
    }

    /// Remaining health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Turns before the special power recharges.
    #[must_use]
    pub const fn special_cooldown(&self) -> u32 {
        self.special_cooldown
    }

    /// Reports whether a defense is raised.
    #[must_use]
    pub const fn is_defending(&self) -> bool {
        self.pending_defense.is_some()
    }

    /// Reports whether an evasion is armed against the next attack.
    #[must_use]
    pub const fn is_evasion_armed(&self) -> bool {
        self.evasion_armed
    }

    /// Reports whether the hero still has health left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Base damage plus any war cry bonus currently carried.
    #[must_use]
    pub const fn attack_damage(&self) -> u32 {
        match self.bonus {
            DamageBonus::None => self.stats.attack_damage,
            DamageBonus::Granted(bonus) | DamageBonus::Active(bonus) => {
                self.stats.attack_damage + bonus
            }
        }
    }

    /// Reports whether a war cry bonus is carried.
    #[must_use]
    pub const fn has_damage_bonus(&self) -> bool {
        !matches!(self.bonus, DamageBonus::None)
    }

    /// Applies incoming damage, consuming a raised defense.
    ///
    /// Returns the health actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let reduced = match self.pending_defense.take() {
            Some(defense) => amount.saturating_sub(defense),
            None => amount,
        };
        let lost = reduced.min(self.health);
        self.health -= lost;
        lost
    }

    /// Restores health up to the starting maximum.
    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(STARTING_HEALTH);
    }

    /// Raises the archetype's defense against the next hit.
    ///
    /// Returns the reduction that was armed.
    pub fn defend(&mut self) -> u32 {
        let value = self.stats.defense;
        self.pending_defense = Some(value);
        value
    }

    /// Starts the special power cooldown, returning `false` while recharging.
    pub fn use_special(&mut self) -> bool {
        if self.special_cooldown > 0 {
            return false;
        }
        self.special_cooldown = SPECIAL_COOLDOWN_TURNS;
        true
    }

    /// Advances the special power cooldown by one turn.
    pub fn tick_cooldown(&mut self) {
        self.special_cooldown = self.special_cooldown.saturating_sub(1);
    }

    /// Arms a war cry bonus for the rest of this turn and the next own turn.
    pub fn grant_damage_bonus(&mut self, bonus: u32) {
        self.bonus = DamageBonus::Granted(bonus);
    }

    /// Ages the war cry bonus at the end of the hero's own turn.
    ///
    /// Returns `true` when a carried bonus expired.
    pub fn end_own_turn(&mut self) -> bool {
        match self.bonus {
            DamageBonus::None => false,
            DamageBonus::Granted(bonus) => {
                self.bonus = DamageBonus::Active(bonus);
                false
            }
            DamageBonus::Active(_) => {
                self.bonus = DamageBonus::None;
                true
            }
        }
    }

    /// Arms an evasion against the next incoming attack.
    pub fn arm_evasion(&mut self) {
        self.evasion_armed = true;
    }

    /// Consumes an armed evasion, returning whether one was armed.
    pub fn consume_evasion(&mut self) -> bool {
        std::mem::take(&mut self.evasion_armed)
    }

    /// Captures an immutable snapshot of the hero.
    #[must_use]
    pub fn snapshot(&self) -> HeroSnapshot {
        HeroSnapshot {
            id: self.id,
            name: self.name.clone(),
            archetype: self.archetype,
            cell: self.cell,
            health: self.health,
            special_cooldown: self.special_cooldown,
            defending: self.is_defending(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Hero;
    use arena_legends_core::{Archetype, PlayerId};

    fn knight() -> Hero {
        Hero::new(PlayerId::new(0), "Player 1".to_owned(), Archetype::Knight)
    }

    #[test]
    fn defense_reduces_exactly_one_hit() {
        let mut hero = knight();
        assert_eq!(hero.defend(), 15);
        assert_eq!(hero.take_damage(25), 10);
        assert!(!hero.is_defending());
        assert_eq!(hero.take_damage(25), 25);
        assert_eq!(hero.health(), 65);
    }

    #[test]
    fn damage_never_drops_health_below_zero() {
        let mut hero = knight();
        assert_eq!(hero.take_damage(250), 100);
        assert_eq!(hero.health(), 0);
        assert!(!hero.is_alive());
    }

    #[test]
    fn heal_caps_at_starting_health() {
        let mut hero = knight();
        let _ = hero.take_damage(30);
        hero.heal(50);
        assert_eq!(hero.health(), 100);
    }

    #[test]
    fn special_cooldown_blocks_until_ticked_out() {
        let mut hero = knight();
        assert!(hero.use_special());
        assert!(!hero.use_special());
        for _ in 0..3 {
            hero.tick_cooldown();
        }
        assert!(hero.use_special());
    }

    #[test]
    fn war_cry_bonus_lasts_until_next_own_turn_ends() {
        let mut hero = knight();
        hero.grant_damage_bonus(15);
        assert_eq!(hero.attack_damage(), 40);
        assert!(!hero.end_own_turn());
        assert_eq!(hero.attack_damage(), 40);
        assert!(hero.end_own_turn());
        assert_eq!(hero.attack_damage(), 25);
        assert!(!hero.end_own_turn());
    }

    #[test]
    fn evasion_is_consumed_once() {
        let mut hero = knight();
        hero.arm_evasion();
        assert!(hero.consume_evasion());
        assert!(!hero.consume_evasion());
    }
}
