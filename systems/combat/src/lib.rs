#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Combat rules resolved against the arena.
//!
//! Every roll is drawn from the provided [`Dice`]. Outcomes are reported by
//! appending [`Event`] values; heroes reduced to zero health are removed from
//! the grid before the call returns.

use arena_legends_core::{
    Archetype, AttackOutcome, Dice, EngineFault, Event, PlayerId, RejectionReason,
    DODGE_THRESHOLD, KNIGHT_BONUS_DAMAGE, STORM_DAMAGE,
};
use arena_legends_world::Arena;
use tracing::{debug, info};

/// Combat resolver carrying the rule switches of a game.
#[derive(Clone, Copy, Debug, Default)]
pub struct Combat {
    dodge_evades_next_attack: bool,
}

impl Combat {
    /// Creates a resolver with informational dodges.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dodge_evades_next_attack: false,
        }
    }

    /// Makes a successful dodge cancel the next attack against the ninja.
    #[must_use]
    pub const fn with_dodge_evasion(mut self, enabled: bool) -> Self {
        self.dodge_evades_next_attack = enabled;
        self
    }

    /// Reports whether successful dodges arm an evasion.
    #[must_use]
    pub const fn dodge_evades_next_attack(&self) -> bool {
        self.dodge_evades_next_attack
    }

    /// Moves a ninja onto the cell it must strike `target` from.
    ///
    /// Other archetypes and adjacent targets need no move. Nothing changes
    /// when the position cannot be secured.
    pub fn secure_attack_position(
        &self,
        arena: &mut Arena,
        attacker: PlayerId,
        target: PlayerId,
        out_events: &mut Vec<Event>,
    ) -> Result<(), RejectionReason> {
        let hero = arena.hero(attacker);
        if hero.map(|hero| hero.archetype()) != Some(Archetype::Ninja) {
            return Ok(());
        }
        let from = hero.and_then(|hero| hero.cell());
        let to = arena.hero(target).and_then(|hero| hero.cell());
        let (Some(from), Some(to)) = (from, to) else {
            return Err(RejectionReason::NoTargetsInRange {
                archetype: Archetype::Ninja,
            });
        };

        let Some(position) = arena.ninja_attack_position(from, to) else {
            return Err(RejectionReason::AttackPathBlocked { cell: to });
        };
        if position == from {
            return Ok(());
        }
        if !arena.dash_to(attacker, position) {
            return Err(RejectionReason::AttackPathBlocked { cell: to });
        }

        debug!(
            player = attacker.get(),
            row = position.row(),
            column = position.column(),
            "ninja repositioned to strike"
        );
        out_events.push(Event::PlayerMoved {
            player: attacker,
            from,
            to: position,
        });
        Ok(())
    }

    /// Rolls and applies a single attack.
    ///
    /// An armed evasion turns the attack into a miss without a roll. Returns
    /// `true` when the target was eliminated.
    pub fn resolve_attack(
        &self,
        arena: &mut Arena,
        dice: &mut dyn Dice,
        attacker: PlayerId,
        target: PlayerId,
        out_events: &mut Vec<Event>,
    ) -> Result<bool, EngineFault> {
        let attacker_hero = arena
            .hero(attacker)
            .ok_or(EngineFault::UnknownPlayer { player: attacker })?;
        let base = attacker_hero.attack_damage();
        let critical = attacker_hero.stats().critical;

        let defender = arena
            .hero_mut(target)
            .filter(|hero| hero.is_alive())
            .ok_or(EngineFault::UnknownPlayer { player: target })?;
        if defender.consume_evasion() {
            info!(attacker = attacker.get(), target = target.get(), "attack evaded");
            out_events.push(Event::AttackEvaded { attacker, target });
            return Ok(false);
        }

        let roll = dice.roll();
        let outcome = AttackOutcome::classify(roll);
        let raw = match outcome {
            AttackOutcome::Miss => 0,
            AttackOutcome::Hit => base,
            AttackOutcome::Critical => critical.apply(base),
        };
        let damage = if raw > 0 { defender.take_damage(raw) } else { 0 };
        let remaining_health = defender.health();
        let eliminated = !defender.is_alive();

        info!(
            attacker = attacker.get(),
            target = target.get(),
            roll = roll.get(),
            ?outcome,
            damage,
            remaining_health,
            "attack resolved"
        );
        out_events.push(Event::AttackResolved {
            attacker,
            target,
            roll,
            outcome,
            damage,
            remaining_health,
        });

        if eliminated {
            eliminate(arena, target, out_events);
        }
        Ok(eliminated)
    }

    /// Rolls the hero's special power and applies its effect on success.
    ///
    /// The caller starts the cooldown before invoking this.
    pub fn resolve_special(
        &self,
        arena: &mut Arena,
        dice: &mut dyn Dice,
        player: PlayerId,
        out_events: &mut Vec<Event>,
    ) -> Result<(), EngineFault> {
        let hero = arena
            .hero(player)
            .ok_or(EngineFault::UnknownPlayer { player })?;
        let archetype = hero.archetype();
        let threshold = hero.stats().special_threshold;

        let roll = dice.roll();
        let success = roll.meets(threshold);
        info!(
            player = player.get(),
            power = archetype.special_name(),
            roll = roll.get(),
            success,
            "special activated"
        );
        out_events.push(Event::SpecialActivated {
            player,
            archetype,
            roll,
            success,
        });
        if !success {
            return Ok(());
        }

        match archetype {
            Archetype::Knight => {
                if let Some(hero) = arena.hero_mut(player) {
                    hero.grant_damage_bonus(KNIGHT_BONUS_DAMAGE);
                }
                out_events.push(Event::DamageBonusGranted {
                    player,
                    bonus: KNIGHT_BONUS_DAMAGE,
                });
            }
            Archetype::Ninja => {
                let Some(target) = arena.attackable_targets(player).first().copied() else {
                    debug!(player = player.get(), "no target for the double strike");
                    return Ok(());
                };
                if !self.resolve_attack(arena, dice, player, target, out_events)? {
                    let _ = self.resolve_attack(arena, dice, player, target, out_events)?;
                }
            }
            Archetype::Sorcerer => storm(arena, player, out_events),
        }
        Ok(())
    }

    /// Raises the hero's defense against the next hit.
    pub fn raise_defense(
        &self,
        arena: &mut Arena,
        player: PlayerId,
        out_events: &mut Vec<Event>,
    ) -> Result<(), EngineFault> {
        let hero = arena
            .hero_mut(player)
            .ok_or(EngineFault::UnknownPlayer { player })?;
        let value = hero.defend();
        debug!(player = player.get(), value, "defense raised");
        out_events.push(Event::DefenseRaised { player, value });
        Ok(())
    }

    /// Rolls a dodge for the hero.
    ///
    /// Returns whether the roll succeeded. Success only arms an evasion when
    /// dodge evasion is enabled.
    pub fn attempt_dodge(
        &self,
        arena: &mut Arena,
        dice: &mut dyn Dice,
        player: PlayerId,
        out_events: &mut Vec<Event>,
    ) -> Result<bool, EngineFault> {
        let hero = arena
            .hero_mut(player)
            .ok_or(EngineFault::UnknownPlayer { player })?;
        let roll = dice.roll();
        let success = roll.meets(DODGE_THRESHOLD);
        let evasion_armed = success && self.dodge_evades_next_attack;
        if evasion_armed {
            hero.arm_evasion();
        }

        info!(player = player.get(), roll = roll.get(), success, "dodge attempted");
        out_events.push(Event::DodgeAttempted {
            player,
            roll,
            success,
            evasion_armed,
        });
        Ok(success)
    }
}

fn storm(arena: &mut Arena, source: PlayerId, out_events: &mut Vec<Event>) {
    let victims: Vec<PlayerId> = arena
        .active_players()
        .iter()
        .copied()
        .filter(|id| *id != source)
        .collect();
    if victims.is_empty() {
        debug!(player = source.get(), "storm found no victims");
        return;
    }

    let mut fallen = Vec::new();
    for target in victims {
        let Some(hero) = arena.hero_mut(target).filter(|hero| hero.is_alive()) else {
            continue;
        };
        let damage = hero.take_damage(STORM_DAMAGE);
        let remaining_health = hero.health();
        out_events.push(Event::StormDamage {
            source,
            target,
            damage,
            remaining_health,
        });
        if !hero.is_alive() {
            fallen.push(target);
        }
    }

    for target in fallen {
        eliminate(arena, target, out_events);
    }
}

fn eliminate(arena: &mut Arena, player: PlayerId, out_events: &mut Vec<Event>) {
    if arena.remove_player(player) {
        info!(player = player.get(), "player eliminated");
        out_events.push(Event::PlayerEliminated { player });
    }
}
