#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn engine for Arena Legends.
//!
//! [`Game`] walks through setup, the hero draft, order determination and the
//! playing rounds until at most one hero stands. Adapters drive it through
//! [`apply`] one [`Command`] at a time and read the outcome from the emitted
//! [`Event`] batch or the [`query`] functions.

mod config;
mod dice;

pub use config::{GameConfig, Pacing, Placement};
pub use dice::SeededDice;

use arena_legends_core::{
    ActionKind, Archetype, CellCoord, Command, Controller, Dice, DieFace, EngineFault, Event,
    GameMode, GameOutcome, HeroPool, OrderRoll, PauseReason, Phase, PlayerId, RejectionReason,
    MAX_PLAYERS, MIN_PLAYERS,
};
use arena_legends_system_combat::Combat;
use arena_legends_system_turn_order::{
    first_actor, next_actor, rank_order_rolls, seating_order, RoundLedger,
};
use arena_legends_world::Arena;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Action awaiting a cell click, with the cells that were highlighted for it.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PendingAction {
    action: ActionKind,
    highlighted: Vec<CellCoord>,
}

#[derive(Debug, Error)]
enum Refusal {
    #[error(transparent)]
    Rejected(#[from] RejectionReason),
    #[error(transparent)]
    Fault(#[from] EngineFault),
}

/// Represents the authoritative state of a game.
pub struct Game {
    config: GameConfig,
    dice: Box<dyn Dice>,
    combat: Combat,
    arena: Arena,
    phase: Phase,
    player_count: Option<u8>,
    awaiting_mode: bool,
    mode: GameMode,
    pool: HeroPool,
    picks: Vec<Archetype>,
    controllers: Vec<Controller>,
    seating: Vec<PlayerId>,
    round: u32,
    order_rolls: Vec<OrderRoll>,
    round_opener: Option<PlayerId>,
    ledger: RoundLedger,
    current: usize,
    pending: Option<PendingAction>,
    outcome: Option<GameOutcome>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("current", &self.current)
            .field("seating", &self.seating)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Creates a game whose rolls come from a die seeded by the config.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let dice = SeededDice::new(config.dice_seed());
        Self::with_dice(config, Box::new(dice))
    }

    /// Creates a game drawing attack, special and dodge rolls from `dice`.
    #[must_use]
    pub fn with_dice(config: GameConfig, dice: Box<dyn Dice>) -> Self {
        let combat = Combat::new().with_dodge_evasion(config.dodge_evades_next_attack());
        Self {
            pool: config.hero_pool(),
            config,
            dice,
            combat,
            arena: Arena::new(),
            phase: Phase::Setup,
            player_count: None,
            awaiting_mode: false,
            mode: GameMode::Individual,
            picks: Vec::new(),
            controllers: Vec::new(),
            seating: Vec::new(),
            round: 1,
            order_rolls: Vec::new(),
            round_opener: None,
            ledger: RoundLedger::new(1, PlayerId::new(0)),
            current: 0,
            pending: None,
            outcome: None,
        }
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), RejectionReason> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(RejectionReason::WrongPhase { actual: self.phase })
        }
    }

    fn select_player_count(&mut self, count: u8, out_events: &mut Vec<Event>) -> Result<(), Refusal> {
        self.expect_phase(Phase::Setup)?;
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(RejectionReason::InvalidPlayerCount { count }.into());
        }

        self.player_count = Some(count);
        info!(count, "player count selected");
        let mode_required = count == MAX_PLAYERS;
        out_events.push(Event::PlayerCountSelected {
            count,
            mode_required,
        });
        if mode_required {
            self.awaiting_mode = true;
        } else {
            self.awaiting_mode = false;
            self.mode = GameMode::Individual;
            self.begin_draft(out_events);
        }
        Ok(())
    }

    fn select_mode(&mut self, mode: GameMode, out_events: &mut Vec<Event>) -> Result<(), Refusal> {
        self.expect_phase(Phase::Setup)?;
        if !self.awaiting_mode {
            return Err(RejectionReason::ModeSelectionNotPending.into());
        }
        if mode != GameMode::Individual {
            return Err(RejectionReason::UnsupportedMode { mode }.into());
        }

        self.awaiting_mode = false;
        self.mode = mode;
        out_events.push(Event::ModeSelected { mode });
        self.begin_draft(out_events);
        Ok(())
    }

    fn begin_draft(&mut self, out_events: &mut Vec<Event>) {
        self.phase = Phase::HeroDraft;
        info!("hero draft started");
        out_events.push(Event::HeroSelectionRequested {
            seat: 0,
            pool: self.pool,
        });
    }

    fn select_hero(&mut self, archetype: Archetype, out_events: &mut Vec<Event>) -> Result<(), Refusal> {
        self.expect_phase(Phase::HeroDraft)?;
        if self.pool.remaining(archetype) == 0 {
            return Err(RejectionReason::HeroUnavailable { archetype }.into());
        }

        let count = self.player_count.unwrap_or(0);
        let seat = u8::try_from(self.picks.len()).unwrap_or(u8::MAX);
        let last_pick = seat.saturating_add(1) >= count;
        // A bad layout must fault before the pick lands.
        let cells = if last_pick {
            Some(self.starting_cells(count)?)
        } else {
            None
        };

        let _ = self.pool.take(archetype);
        self.picks.push(archetype);
        debug!(seat, archetype = archetype.label(), "hero picked");
        out_events.push(Event::HeroPicked { seat, archetype });

        match cells {
            Some(cells) => self.finish_draft(&cells, out_events),
            None => out_events.push(Event::HeroSelectionRequested {
                seat: seat.saturating_add(1),
                pool: self.pool,
            }),
        }
        Ok(())
    }

    fn finish_draft(&mut self, cells: &[CellCoord], out_events: &mut Vec<Event>) {
        let mut seats = Vec::with_capacity(self.picks.len());
        for (seat, (archetype, cell)) in self.picks.iter().zip(cells).enumerate() {
            let name = format!("Player {}", seat + 1);
            let controller = self.config.controller(seat);
            let player = self.arena.enlist(name.clone(), *archetype);
            self.controllers.push(controller);
            out_events.push(Event::PlayerEnlisted {
                player,
                name,
                archetype: *archetype,
                controller,
            });
            seats.push((player, *cell));
        }
        for (player, cell) in &seats {
            let placed = self.arena.place_player(*player, *cell);
            debug_assert!(placed, "starting cells are validated before the draft closes");
            out_events.push(Event::PlayerPlaced {
                player: *player,
                cell: *cell,
            });
        }

        self.seating = seating_order(&seats, self.arena.side());
        info!(order = ?self.seating, "seating order established");
        out_events.push(Event::SeatingOrderEstablished {
            order: self.seating.clone(),
        });
        self.begin_order_determination(1, out_events);
    }

    /// One distinct in-bounds cell per seat, or the first seat left without one.
    fn starting_cells(&self, count: u8) -> Result<Vec<CellCoord>, EngineFault> {
        let cells = self.placement_cells(usize::from(count));
        for seat in 0..count {
            let index = usize::from(seat);
            let usable = cells.get(index).map_or(false, |cell| {
                self.arena.contains(*cell) && !cells[..index].contains(cell)
            });
            if !usable {
                return Err(EngineFault::PlacementFailed {
                    player: PlayerId::new(u32::from(seat)),
                });
            }
        }
        Ok(cells.into_iter().take(usize::from(count)).collect())
    }

    fn placement_cells(&self, count: usize) -> Vec<CellCoord> {
        match self.config.placement() {
            Placement::Fixed(cells) => cells.clone(),
            Placement::Automatic if count == usize::from(MAX_PLAYERS) => {
                let last = self.arena.side().saturating_sub(1);
                vec![
                    CellCoord::new(0, 0),
                    CellCoord::new(0, last),
                    CellCoord::new(last, last),
                    CellCoord::new(last, 0),
                ]
            }
            Placement::Automatic => {
                let side = self.arena.side();
                let mut cells: Vec<CellCoord> = (0..side)
                    .flat_map(|row| (0..side).map(move |column| CellCoord::new(row, column)))
                    .collect();
                let mut rng = ChaCha8Rng::seed_from_u64(self.config.placement_seed());
                cells.shuffle(&mut rng);
                cells.truncate(count);
                cells
            }
        }
    }

    fn begin_order_determination(&mut self, round: u32, out_events: &mut Vec<Event>) {
        self.phase = Phase::OrderDetermination;
        self.round = round;
        self.order_rolls.clear();
        self.round_opener = None;
        self.pending = None;
        info!(round, "order determination started");
        out_events.push(Event::OrderDeterminationStarted { round });
        if let Some(player) = self.next_roller() {
            out_events.push(Event::OrderRollRequested { player });
        }
    }

    /// Living players roll in roster order.
    fn next_roller(&self) -> Option<PlayerId> {
        arena_legends_world::query::living_players(&self.arena)
            .into_iter()
            .find(|player| !self.order_rolls.iter().any(|roll| roll.player == *player))
    }

    fn outstanding_rolls(&self) -> usize {
        arena_legends_world::query::living_players(&self.arena)
            .into_iter()
            .filter(|player| !self.order_rolls.iter().any(|roll| roll.player == *player))
            .count()
    }

    fn submit_order_roll(&mut self, value: u8, out_events: &mut Vec<Event>) -> Result<(), Refusal> {
        self.expect_phase(Phase::OrderDetermination)?;
        let Some(player) = self.next_roller() else {
            return Err(RejectionReason::OrderAlreadyDetermined.into());
        };
        let face = DieFace::new(value).ok_or(RejectionReason::InvalidDieFace { value })?;

        self.order_rolls.push(OrderRoll { player, face });
        debug!(player = player.get(), face = face.get(), "order roll recorded");
        out_events.push(Event::OrderRollRecorded { player, face });

        if let Some(next) = self.next_roller() {
            out_events.push(Event::OrderRollRequested { player: next });
            return Ok(());
        }

        let Some(first) = first_actor(&self.order_rolls) else {
            return Ok(());
        };
        self.round_opener = Some(first);
        info!(round = self.round, first = first.get(), "first actor determined");
        out_events.push(Event::FirstActorDetermined {
            round: self.round,
            ranking: rank_order_rolls(&self.order_rolls),
            first,
        });
        Ok(())
    }

    fn start_round(&mut self, out_events: &mut Vec<Event>) -> Result<(), Refusal> {
        self.expect_phase(Phase::OrderDetermination)?;
        let remaining = self.outstanding_rolls();
        let first = match self.round_opener {
            Some(first) if remaining == 0 => first,
            _ => {
                return Err(RejectionReason::OrderRollsOutstanding {
                    remaining: u8::try_from(remaining).unwrap_or(u8::MAX),
                }
                .into())
            }
        };

        self.phase = Phase::Playing;
        self.ledger = RoundLedger::new(self.round, first);
        info!(round = self.round, "round started");
        out_events.push(Event::RoundStarted { round: self.round });
        self.start_turn(first, out_events)
    }

    fn start_turn(&mut self, player: PlayerId, out_events: &mut Vec<Event>) -> Result<(), Refusal> {
        let Some(hero) = self.arena.hero_mut(player) else {
            return Err(EngineFault::CurrentPlayerMissing {
                index: player.index(),
            }
            .into());
        };
        if !hero.is_alive() {
            return self.advance(player, out_events);
        }

        hero.tick_cooldown();
        self.current = player.index();
        self.pending = None;
        let controller = self.controller_of(player);
        info!(round = self.round, player = player.get(), ?controller, "turn started");
        out_events.push(Event::TurnStarted {
            round: self.round,
            player,
            controller,
        });
        self.pause(PauseReason::BeforeInteraction, out_events);
        Ok(())
    }

    fn current_actor(&self) -> Result<PlayerId, EngineFault> {
        self.arena
            .roster()
            .get(self.current)
            .map(|hero| hero.id())
            .ok_or(EngineFault::CurrentPlayerMissing {
                index: self.current,
            })
    }

    fn controller_of(&self, player: PlayerId) -> Controller {
        self.controllers
            .get(player.index())
            .copied()
            .unwrap_or(Controller::Human)
    }

    fn select_action(&mut self, action: ActionKind, out_events: &mut Vec<Event>) -> Result<(), Refusal> {
        self.expect_phase(Phase::Playing)?;
        let actor = self.current_actor()?;
        let Some(hero) = self.arena.hero(actor) else {
            return Err(EngineFault::UnknownPlayer { player: actor }.into());
        };
        let archetype = hero.archetype();
        let cooldown = hero.special_cooldown();

        match action {
            ActionKind::Move => {
                let cells = self.arena.accessible_cells(actor);
                if cells.is_empty() {
                    return Err(RejectionReason::NoAccessibleCells.into());
                }
                self.highlight(actor, action, cells, out_events);
                Ok(())
            }
            ActionKind::Attack => {
                let cells: Vec<CellCoord> = self
                    .arena
                    .attackable_targets(actor)
                    .into_iter()
                    .filter_map(|target| self.arena.hero(target).and_then(|hero| hero.cell()))
                    .collect();
                if cells.is_empty() {
                    return Err(RejectionReason::NoTargetsInRange { archetype }.into());
                }
                self.highlight(actor, action, cells, out_events);
                Ok(())
            }
            ActionKind::Special => {
                if cooldown > 0 {
                    return Err(RejectionReason::SpecialOnCooldown { turns: cooldown }.into());
                }
                self.pending = None;
                if let Some(hero) = self.arena.hero_mut(actor) {
                    let _ = hero.use_special();
                }
                self.combat
                    .resolve_special(&mut self.arena, self.dice.as_mut(), actor, out_events)?;
                self.finish_action(out_events)
            }
            ActionKind::Defend => {
                self.pending = None;
                self.combat.raise_defense(&mut self.arena, actor, out_events)?;
                self.end_turn(out_events)
            }
            ActionKind::Dodge => {
                if archetype != Archetype::Ninja {
                    return Err(RejectionReason::DodgeUnavailable.into());
                }
                self.pending = None;
                let _ = self
                    .combat
                    .attempt_dodge(&mut self.arena, self.dice.as_mut(), actor, out_events)?;
                self.end_turn(out_events)
            }
        }
    }

    fn highlight(
        &mut self,
        actor: PlayerId,
        action: ActionKind,
        cells: Vec<CellCoord>,
        out_events: &mut Vec<Event>,
    ) {
        debug!(player = actor.get(), ?action, cells = cells.len(), "cells highlighted");
        self.pending = Some(PendingAction {
            action,
            highlighted: cells.clone(),
        });
        out_events.push(Event::CellsHighlighted { action, cells });
        if self.controller_of(actor) == Controller::Computer {
            self.pause(PauseReason::BetweenDecisionSteps, out_events);
        }
    }

    fn click_cell(
        &mut self,
        cell: CellCoord,
        action: ActionKind,
        out_events: &mut Vec<Event>,
    ) -> Result<(), Refusal> {
        self.expect_phase(Phase::Playing)?;
        if !action.targets_cell() {
            return Err(RejectionReason::NotClickable { action }.into());
        }
        let Some(pending) = self.pending.as_ref() else {
            return Err(RejectionReason::NoActionSelected.into());
        };
        if pending.action != action {
            return Err(RejectionReason::ActionMismatch {
                selected: pending.action,
                clicked: action,
            }
            .into());
        }
        let highlighted = pending.highlighted.contains(&cell);
        let actor = self.current_actor()?;

        if action == ActionKind::Move {
            let live = self.arena.accessible_cells(actor).contains(&cell);
            report_divergence(actor, cell, highlighted, live);
            let from = self.arena.hero(actor).and_then(|hero| hero.cell());
            let Some(from) = from.filter(|_| live) else {
                return Err(RejectionReason::CellNotAccessible { cell }.into());
            };
            if !self.arena.move_player(actor, cell) {
                return Err(RejectionReason::CellNotAccessible { cell }.into());
            }

            info!(player = actor.get(), row = cell.row(), column = cell.column(), "player moved");
            out_events.push(Event::PlayerMoved {
                player: actor,
                from,
                to: cell,
            });
            return self.end_turn(out_events);
        }

        let target = self
            .arena
            .occupant(cell)
            .ok_or(RejectionReason::NoTargetAtCell { cell })?;
        let live = self.arena.attackable_targets(actor).contains(&target);
        report_divergence(actor, cell, highlighted, live);
        if !live {
            return Err(RejectionReason::TargetOutOfRange { cell }.into());
        }

        self.combat
            .secure_attack_position(&mut self.arena, actor, target, out_events)?;
        self.pending = None;
        let _ = self.combat.resolve_attack(
            &mut self.arena,
            self.dice.as_mut(),
            actor,
            target,
            out_events,
        )?;
        self.finish_action(out_events)
    }

    fn pass(&mut self, out_events: &mut Vec<Event>) -> Result<(), Refusal> {
        self.expect_phase(Phase::Playing)?;
        self.end_turn(out_events)
    }

    /// Ends the turn unless the resolution that just happened ended the game.
    fn finish_action(&mut self, out_events: &mut Vec<Event>) -> Result<(), Refusal> {
        if self.check_game_end(out_events) {
            return Ok(());
        }
        self.end_turn(out_events)
    }

    fn check_game_end(&mut self, out_events: &mut Vec<Event>) -> bool {
        let living = arena_legends_world::query::living_players(&self.arena);
        let outcome = match living.as_slice() {
            [] => GameOutcome::Draw,
            [winner] => GameOutcome::Winner(*winner),
            _ => return false,
        };

        self.phase = Phase::Ended;
        self.pending = None;
        self.outcome = Some(outcome);
        info!(?outcome, "game ended");
        out_events.push(Event::GameEnded { outcome });
        true
    }

    fn end_turn(&mut self, out_events: &mut Vec<Event>) -> Result<(), Refusal> {
        let actor = self.current_actor()?;
        self.pending = None;
        self.ledger.mark_acted(actor);
        if let Some(hero) = self.arena.hero_mut(actor) {
            if hero.end_own_turn() {
                out_events.push(Event::DamageBonusExpired { player: actor });
            }
        }

        debug!(player = actor.get(), "turn ended");
        out_events.push(Event::TurnEnded { player: actor });
        self.advance(actor, out_events)
    }

    /// Hands the turn to the next eligible seat or closes the round.
    fn advance(&mut self, from: PlayerId, out_events: &mut Vec<Event>) -> Result<(), Refusal> {
        let living = arena_legends_world::query::living_players(&self.arena);
        if self.ledger.is_complete(&living) {
            return self.complete_round(out_events);
        }
        if !self.seating.contains(&from) {
            return Err(EngineFault::PlayerNotSeated { player: from }.into());
        }

        let ledger = &self.ledger;
        let next = next_actor(&self.seating, from, ledger.first(), |candidate| {
            living.contains(&candidate) && !ledger.has_acted(candidate)
        });
        match next {
            Some(next) => {
                self.pause(PauseReason::BetweenTurns, out_events);
                self.start_turn(next, out_events)
            }
            None => self.complete_round(out_events),
        }
    }

    fn complete_round(&mut self, out_events: &mut Vec<Event>) -> Result<(), Refusal> {
        info!(round = self.round, "round completed");
        out_events.push(Event::RoundCompleted { round: self.round });
        self.pause(PauseReason::BetweenTurns, out_events);
        self.begin_order_determination(self.round.saturating_add(1), out_events);
        Ok(())
    }

    fn pause(&self, reason: PauseReason, out_events: &mut Vec<Event>) {
        let pacing = self.config.pacing();
        let duration = match reason {
            PauseReason::BeforeInteraction => pacing.before_interaction(),
            PauseReason::BetweenDecisionSteps => pacing.between_decision_steps(),
            PauseReason::BetweenTurns => pacing.between_turns(),
        };
        if !duration.is_zero() {
            out_events.push(Event::Paused { reason, duration });
        }
    }
}

fn report_divergence(actor: PlayerId, cell: CellCoord, highlighted: bool, live: bool) {
    if highlighted != live {
        warn!(
            player = actor.get(),
            row = cell.row(),
            column = cell.column(),
            highlighted,
            live,
            "highlighted cells diverge from live arena state"
        );
    }
}

/// Applies the provided command to the game, mutating state deterministically.
///
/// Refused commands leave the game untouched and emit
/// [`Event::CommandRejected`]. Invariant breaches abort the command, are
/// logged, and emit [`Event::EngineFault`].
pub fn apply(game: &mut Game, command: Command, out_events: &mut Vec<Event>) {
    let result = match command {
        Command::SelectPlayerCount { count } => game.select_player_count(count, out_events),
        Command::SelectMode { mode } => game.select_mode(mode, out_events),
        Command::SelectHero { archetype } => game.select_hero(archetype, out_events),
        Command::SubmitOrderRoll { face } => game.submit_order_roll(face, out_events),
        Command::StartRound => game.start_round(out_events),
        Command::SelectAction { action } => game.select_action(action, out_events),
        Command::ClickCell { cell, action } => game.click_cell(cell, action, out_events),
        Command::Pass => game.pass(out_events),
    };

    match result {
        Ok(()) => {}
        Err(Refusal::Rejected(reason)) => {
            debug!(%reason, "command rejected");
            out_events.push(Event::CommandRejected { reason });
        }
        Err(Refusal::Fault(fault)) => {
            error!(%fault, "engine fault");
            out_events.push(Event::EngineFault { fault });
        }
    }
}

/// Query functions that provide read-only access to the game state.
pub mod query {
    use super::Game;
    use arena_legends_core::{
        ActionKind, CellCoord, Controller, GameMode, GameOutcome, HeroPool, OrderRoll, Phase,
        PlayerId, RosterView,
    };
    use arena_legends_world::Arena;

    /// Current phase of the engine.
    #[must_use]
    pub fn phase(game: &Game) -> Phase {
        game.phase
    }

    /// One-based number of the current or upcoming round.
    #[must_use]
    pub fn round(game: &Game) -> u32 {
        game.round
    }

    /// Mode the game is played in.
    #[must_use]
    pub fn mode(game: &Game) -> GameMode {
        game.mode
    }

    /// Participant count, once chosen.
    #[must_use]
    pub fn player_count(game: &Game) -> Option<u8> {
        game.player_count
    }

    /// Heroes still available to the draft.
    #[must_use]
    pub fn hero_pool(game: &Game) -> HeroPool {
        game.pool
    }

    /// Seat expected to draft next, while the draft runs.
    #[must_use]
    pub fn drafting_seat(game: &Game) -> Option<u8> {
        if game.phase == Phase::HeroDraft {
            u8::try_from(game.picks.len()).ok()
        } else {
            None
        }
    }

    /// Provides read-only access to the arena.
    #[must_use]
    pub fn arena(game: &Game) -> &Arena {
        &game.arena
    }

    /// Captures a read-only view of every hero.
    #[must_use]
    pub fn roster_view(game: &Game) -> RosterView {
        arena_legends_world::query::roster_view(&game.arena)
    }

    /// Seating order fixed after placement.
    #[must_use]
    pub fn seating_order(game: &Game) -> &[PlayerId] {
        &game.seating
    }

    /// Player whose turn it is while playing.
    #[must_use]
    pub fn current_player(game: &Game) -> Option<PlayerId> {
        if game.phase == Phase::Playing {
            game.current_actor().ok()
        } else {
            None
        }
    }

    /// Who drives the provided player's decisions.
    #[must_use]
    pub fn controller(game: &Game, player: PlayerId) -> Controller {
        game.controller_of(player)
    }

    /// Player expected to submit the next order roll.
    #[must_use]
    pub fn next_roller(game: &Game) -> Option<PlayerId> {
        if game.phase == Phase::OrderDetermination {
            game.next_roller()
        } else {
            None
        }
    }

    /// Order rolls submitted so far this round, in submission order.
    #[must_use]
    pub fn order_rolls(game: &Game) -> &[OrderRoll] {
        &game.order_rolls
    }

    /// Players who already acted this round, in turn order.
    #[must_use]
    pub fn acted_this_round(game: &Game) -> &[PlayerId] {
        game.ledger.acted()
    }

    /// Action waiting for a cell click, if any.
    #[must_use]
    pub fn pending_action(game: &Game) -> Option<ActionKind> {
        game.pending.as_ref().map(|pending| pending.action)
    }

    /// Cells highlighted for the pending action.
    #[must_use]
    pub fn highlighted_cells(game: &Game) -> &[CellCoord] {
        game.pending
            .as_ref()
            .map_or(&[], |pending| pending.highlighted.as_slice())
    }

    /// Final result once the game ended.
    #[must_use]
    pub fn outcome(game: &Game) -> Option<GameOutcome> {
        game.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_legends_core::ScriptedDice;

    fn game() -> Game {
        Game::with_dice(GameConfig::new(), Box::new(ScriptedDice::default()))
    }

    fn run(game: &mut Game, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(game, command, &mut events);
        events
    }

    #[test]
    fn player_count_outside_range_is_rejected() {
        let mut game = game();

        for count in [0, 1, 5] {
            assert_eq!(
                run(&mut game, Command::SelectPlayerCount { count }),
                vec![Event::CommandRejected {
                    reason: RejectionReason::InvalidPlayerCount { count }
                }]
            );
        }
        assert_eq!(query::phase(&game), Phase::Setup);
    }

    #[test]
    fn mode_choice_only_applies_to_four_players() {
        let mut game = game();

        assert_eq!(
            run(
                &mut game,
                Command::SelectMode {
                    mode: GameMode::Individual
                }
            ),
            vec![Event::CommandRejected {
                reason: RejectionReason::ModeSelectionNotPending
            }]
        );

        let events = run(&mut game, Command::SelectPlayerCount { count: 3 });
        assert_eq!(query::phase(&game), Phase::HeroDraft);
        assert!(events.contains(&Event::HeroSelectionRequested {
            seat: 0,
            pool: HeroPool::default()
        }));
    }

    #[test]
    fn commands_outside_their_phase_are_rejected() {
        let mut game = game();

        assert_eq!(
            run(&mut game, Command::Pass),
            vec![Event::CommandRejected {
                reason: RejectionReason::WrongPhase {
                    actual: Phase::Setup
                }
            }]
        );
        assert_eq!(
            run(&mut game, Command::SubmitOrderRoll { face: 3 }),
            vec![Event::CommandRejected {
                reason: RejectionReason::WrongPhase {
                    actual: Phase::Setup
                }
            }]
        );
    }

    #[test]
    fn automatic_placement_uses_corners_for_four_players() {
        let mut game = game();
        let _ = run(&mut game, Command::SelectPlayerCount { count: 4 });
        let _ = run(
            &mut game,
            Command::SelectMode {
                mode: GameMode::Individual,
            },
        );
        for archetype in [
            Archetype::Ninja,
            Archetype::Knight,
            Archetype::Sorcerer,
            Archetype::Ninja,
        ] {
            let _ = run(&mut game, Command::SelectHero { archetype });
        }

        let cells: Vec<Option<CellCoord>> = query::roster_view(&game)
            .iter()
            .map(|hero| hero.cell)
            .collect();
        assert_eq!(
            cells,
            vec![
                Some(CellCoord::new(0, 0)),
                Some(CellCoord::new(0, 6)),
                Some(CellCoord::new(6, 6)),
                Some(CellCoord::new(6, 0)),
            ]
        );
        assert_eq!(
            query::seating_order(&game),
            &[
                PlayerId::new(0),
                PlayerId::new(1),
                PlayerId::new(2),
                PlayerId::new(3)
            ]
        );
        assert_eq!(query::phase(&game), Phase::OrderDetermination);
    }

    #[test]
    fn automatic_placement_is_seeded_and_distinct() {
        let place = |seed| {
            let mut game = Game::with_dice(
                GameConfig::new().with_seed(seed),
                Box::new(ScriptedDice::default()),
            );
            let _ = run(&mut game, Command::SelectPlayerCount { count: 3 });
            for archetype in [Archetype::Knight, Archetype::Ninja, Archetype::Sorcerer] {
                let _ = run(&mut game, Command::SelectHero { archetype });
            }
            query::roster_view(&game)
                .iter()
                .filter_map(|hero| hero.cell)
                .collect::<Vec<_>>()
        };

        let first = place(99);
        assert_eq!(first.len(), 3);
        assert_ne!(first[0], first[1]);
        assert_ne!(first[1], first[2]);
        assert_ne!(first[0], first[2]);
        assert_eq!(first, place(99));
    }

    #[test]
    fn fixed_placement_shorter_than_roster_is_a_fault() {
        let mut game = Game::with_dice(
            GameConfig::new().with_placement(Placement::Fixed(vec![CellCoord::new(0, 0)])),
            Box::new(ScriptedDice::default()),
        );
        let _ = run(&mut game, Command::SelectPlayerCount { count: 2 });
        let _ = run(
            &mut game,
            Command::SelectHero {
                archetype: Archetype::Knight,
            },
        );
        let events = run(
            &mut game,
            Command::SelectHero {
                archetype: Archetype::Knight,
            },
        );

        assert_eq!(
            events,
            vec![Event::EngineFault {
                fault: EngineFault::PlacementFailed {
                    player: PlayerId::new(1)
                }
            }]
        );
    }

    #[test]
    fn placement_fault_leaves_the_draft_open() {
        let mut game = Game::with_dice(
            GameConfig::new().with_placement(Placement::Fixed(vec![
                CellCoord::new(2, 2),
                CellCoord::new(2, 2),
            ])),
            Box::new(ScriptedDice::default()),
        );
        let _ = run(&mut game, Command::SelectPlayerCount { count: 2 });
        let _ = run(
            &mut game,
            Command::SelectHero {
                archetype: Archetype::Knight,
            },
        );
        let pool = query::hero_pool(&game);

        for _ in 0..2 {
            let events = run(
                &mut game,
                Command::SelectHero {
                    archetype: Archetype::Ninja,
                },
            );

            assert_eq!(
                events,
                vec![Event::EngineFault {
                    fault: EngineFault::PlacementFailed {
                        player: PlayerId::new(1)
                    }
                }]
            );
            assert_eq!(query::phase(&game), Phase::HeroDraft);
            assert_eq!(query::drafting_seat(&game), Some(1));
            assert_eq!(query::hero_pool(&game), pool);
            assert_eq!(query::roster_view(&game).iter().count(), 0);
            assert!(query::seating_order(&game).is_empty());
        }
    }

    #[test]
    fn pacing_is_announced_only_when_configured() {
        let mut game = Game::with_dice(
            GameConfig::new()
                .with_pacing(Pacing::classic())
                .with_placement(Placement::Fixed(vec![
                    CellCoord::new(0, 0),
                    CellCoord::new(6, 6),
                ])),
            Box::new(ScriptedDice::default()),
        );
        let _ = run(&mut game, Command::SelectPlayerCount { count: 2 });
        let _ = run(&mut game, Command::SelectHero { archetype: Archetype::Knight });
        let _ = run(&mut game, Command::SelectHero { archetype: Archetype::Knight });
        let _ = run(&mut game, Command::SubmitOrderRoll { face: 6 });
        let _ = run(&mut game, Command::SubmitOrderRoll { face: 1 });

        let events = run(&mut game, Command::StartRound);

        assert_eq!(
            events.last(),
            Some(&Event::Paused {
                reason: PauseReason::BeforeInteraction,
                duration: std::time::Duration::from_millis(500),
            })
        );
    }
}
