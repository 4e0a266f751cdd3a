//! Game configuration.

use std::time::Duration;

use arena_legends_core::{CellCoord, Controller, HeroPool};

const DEFAULT_PLACEMENT_SEED: u64 = 0x5eed_a7e4_a1e9_e4d5;
const DEFAULT_DICE_SEED: u64 = 0x0d1c_e0f5_1de5_0006;

/// How heroes are put on the grid once the draft completes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// Four heroes take the corners; smaller games draw from a seeded shuffle.
    #[default]
    Automatic,
    /// Seat `n` is placed on the `n`-th listed cell.
    Fixed(Vec<CellCoord>),
}

/// Presentation pauses announced through `Event::Paused`.
///
/// Zero durations are never announced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pacing {
    before_interaction: Duration,
    between_decision_steps: Duration,
    between_turns: Duration,
}

impl Pacing {
    /// Creates a pacing profile from explicit pauses.
    #[must_use]
    pub const fn new(
        before_interaction: Duration,
        between_decision_steps: Duration,
        between_turns: Duration,
    ) -> Self {
        Self {
            before_interaction,
            between_decision_steps,
            between_turns,
        }
    }

    /// No pauses at all.
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, Duration::ZERO)
    }

    /// Table-top pacing: half a second before acting, one second between
    /// computer decision steps, one and a half seconds between turns.
    #[must_use]
    pub const fn classic() -> Self {
        Self::new(
            Duration::from_millis(500),
            Duration::from_millis(1000),
            Duration::from_millis(1500),
        )
    }

    /// Pause before a turn's interaction is enabled.
    #[must_use]
    pub const fn before_interaction(&self) -> Duration {
        self.before_interaction
    }

    /// Pause between the decision steps of a computer seat.
    #[must_use]
    pub const fn between_decision_steps(&self) -> Duration {
        self.between_decision_steps
    }

    /// Pause between a turn ending and the next one starting.
    #[must_use]
    pub const fn between_turns(&self) -> Duration {
        self.between_turns
    }
}

/// Configuration consumed by [`crate::Game::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    hero_pool: HeroPool,
    controllers: Vec<Controller>,
    placement: Placement,
    placement_seed: u64,
    dice_seed: u64,
    dodge_evades_next_attack: bool,
    pacing: Pacing,
}

impl GameConfig {
    /// Creates the default configuration: two heroes of each archetype,
    /// human seats, automatic placement, informational dodges, no pauses.
    #[must_use]
    pub fn new() -> Self {
        Self {
            hero_pool: HeroPool::default(),
            controllers: Vec::new(),
            placement: Placement::Automatic,
            placement_seed: DEFAULT_PLACEMENT_SEED,
            dice_seed: DEFAULT_DICE_SEED,
            dodge_evades_next_attack: false,
            pacing: Pacing::instant(),
        }
    }

    /// Replaces the hero pool.
    #[must_use]
    pub fn with_hero_pool(mut self, hero_pool: HeroPool) -> Self {
        self.hero_pool = hero_pool;
        self
    }

    /// Assigns controllers by seat; unlisted seats are human.
    #[must_use]
    pub fn with_controllers(mut self, controllers: Vec<Controller>) -> Self {
        self.controllers = controllers;
        self
    }

    /// Replaces the placement policy.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Seeds both the placement shuffle and the combat die.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.placement_seed = seed;
        self.dice_seed = seed.rotate_left(17) ^ DEFAULT_DICE_SEED;
        self
    }

    /// Makes successful dodges cancel the next attack against the ninja.
    #[must_use]
    pub fn with_dodge_evasion(mut self, enabled: bool) -> Self {
        self.dodge_evades_next_attack = enabled;
        self
    }

    /// Replaces the pacing profile.
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Heroes available to the draft.
    #[must_use]
    pub const fn hero_pool(&self) -> HeroPool {
        self.hero_pool
    }

    /// Controller of the provided zero-based seat.
    #[must_use]
    pub fn controller(&self, seat: usize) -> Controller {
        self.controllers
            .get(seat)
            .copied()
            .unwrap_or(Controller::Human)
    }

    /// Placement policy.
    #[must_use]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Seed of the placement shuffle.
    #[must_use]
    pub const fn placement_seed(&self) -> u64 {
        self.placement_seed
    }

    /// Seed of the combat die.
    #[must_use]
    pub const fn dice_seed(&self) -> u64 {
        self.dice_seed
    }

    /// Reports whether successful dodges arm an evasion.
    #[must_use]
    pub const fn dodge_evades_next_attack(&self) -> bool {
        self.dodge_evades_next_attack
    }

    /// Pacing profile.
    #[must_use]
    pub const fn pacing(&self) -> Pacing {
        self.pacing
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
