#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Arena Legends engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative arena, and pure systems. Adapters submit [`Command`] values
//! describing player intent, the game executes those commands via its `apply`
//! entry point, and then broadcasts [`Event`] values that presenters render
//! and computer players react to. Rejected intents never mutate state; they
//! come back as [`Event::CommandRejected`] carrying a [`RejectionReason`].

use std::{collections::VecDeque, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Arena Legends.";

/// Number of rows and columns of the square arena.
pub const GRID_SIZE: u32 = 7;

/// Health every hero starts with.
pub const STARTING_HEALTH: u32 = 100;

/// Turns a hero must wait after using a special power.
pub const SPECIAL_COOLDOWN_TURNS: u32 = 3;

/// Extra damage granted by a successful knight war cry.
pub const KNIGHT_BONUS_DAMAGE: u32 = 15;

/// Flat damage dealt to every other hero by a successful sorcerer storm.
pub const STORM_DAMAGE: u32 = 20;

/// Minimum face a ninja needs to dodge.
pub const DODGE_THRESHOLD: u8 = 4;

/// Copies of each archetype available in the default hero pool.
pub const DEFAULT_HERO_COPIES: u8 = 2;

/// Smallest supported number of participants.
pub const MIN_PLAYERS: u8 = 2;

/// Largest supported number of participants.
pub const MAX_PLAYERS: u8 = 4;

/// Commands that express every permissible player intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Chooses how many seats take part in the game.
    SelectPlayerCount {
        /// Number of participants requested.
        count: u8,
    },
    /// Chooses the play mode; only consulted for four-player games.
    SelectMode {
        /// Mode requested by the participants.
        mode: GameMode,
    },
    /// Drafts a hero for the seat currently picking.
    SelectHero {
        /// Archetype requested for the seat.
        archetype: Archetype,
    },
    /// Submits the next order-determination roll.
    SubmitOrderRoll {
        /// Raw die value produced by the random collaborator.
        face: u8,
    },
    /// Starts the round once every order roll has been ranked.
    StartRound,
    /// Selects the action the current actor intends to take.
    SelectAction {
        /// Action chosen by the current actor.
        action: ActionKind,
    },
    /// Commits a pending move or attack against the provided cell.
    ClickCell {
        /// Cell chosen on the arena grid.
        cell: CellCoord,
        /// Action tag attached to the click.
        action: ActionKind,
    },
    /// Ends the current turn without acting.
    Pass,
}

/// Events broadcast by the game after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms the participant count.
    PlayerCountSelected {
        /// Number of seats in the game.
        count: u8,
        /// Whether a play mode must be chosen before the draft opens.
        mode_required: bool,
    },
    /// Confirms the play mode.
    ModeSelected {
        /// Mode that became active.
        mode: GameMode,
    },
    /// Asks the provided seat to draft a hero.
    HeroSelectionRequested {
        /// Zero-based seat index.
        seat: u8,
        /// Heroes still available in the shared pool.
        pool: HeroPool,
    },
    /// Confirms a drafted hero.
    HeroPicked {
        /// Zero-based seat index.
        seat: u8,
        /// Archetype drafted by the seat.
        archetype: Archetype,
    },
    /// Announces a hero joining the roster once the draft completes.
    PlayerEnlisted {
        /// Identifier allocated to the hero.
        player: PlayerId,
        /// Display name of the hero.
        name: String,
        /// Archetype of the hero.
        archetype: Archetype,
        /// Who drives the hero's decisions.
        controller: Controller,
    },
    /// Confirms the initial placement of a hero.
    PlayerPlaced {
        /// Hero that was placed.
        player: PlayerId,
        /// Cell the hero occupies.
        cell: CellCoord,
    },
    /// Publishes the seating order fixed for the whole game.
    SeatingOrderEstablished {
        /// Players in seating order.
        order: Vec<PlayerId>,
    },
    /// Announces that the order of the provided round is being determined.
    OrderDeterminationStarted {
        /// Round whose first actor is being determined.
        round: u32,
    },
    /// Asks the provided player to roll for order.
    OrderRollRequested {
        /// Player expected to roll next.
        player: PlayerId,
    },
    /// Records an order roll.
    OrderRollRecorded {
        /// Player who rolled.
        player: PlayerId,
        /// Face rolled.
        face: DieFace,
    },
    /// Publishes the ranked order rolls and the round's first actor.
    FirstActorDetermined {
        /// Round the ranking applies to.
        round: u32,
        /// Rolls sorted by descending face, ties by submission order.
        ranking: Vec<OrderRoll>,
        /// Player who acts first this round.
        first: PlayerId,
    },
    /// Announces the start of a round.
    RoundStarted {
        /// One-based round number.
        round: u32,
    },
    /// Announces that a player's turn began.
    TurnStarted {
        /// Current round.
        round: u32,
        /// Player who may act.
        player: PlayerId,
        /// Who drives the player's decisions.
        controller: Controller,
    },
    /// Publishes the cells legal for the pending action.
    CellsHighlighted {
        /// Action the highlight belongs to.
        action: ActionKind,
        /// Cells the current actor may click.
        cells: Vec<CellCoord>,
    },
    /// Reports that a command was refused without changing any state.
    CommandRejected {
        /// Specific reason the command failed.
        reason: RejectionReason,
    },
    /// Confirms that a hero moved between two cells.
    PlayerMoved {
        /// Hero that moved.
        player: PlayerId,
        /// Cell occupied before the move.
        from: CellCoord,
        /// Cell occupied after the move.
        to: CellCoord,
    },
    /// Reports the resolution of a single attack roll.
    AttackResolved {
        /// Hero who attacked.
        attacker: PlayerId,
        /// Hero who was attacked.
        target: PlayerId,
        /// Face rolled for the attack.
        roll: DieFace,
        /// Classification of the roll.
        outcome: AttackOutcome,
        /// Health actually lost by the target.
        damage: u32,
        /// Target health after the attack.
        remaining_health: u32,
    },
    /// Reports that an armed evasion cancelled an attack.
    AttackEvaded {
        /// Hero who attacked.
        attacker: PlayerId,
        /// Hero who evaded.
        target: PlayerId,
    },
    /// Reports that a hero fell and left the arena.
    PlayerEliminated {
        /// Hero that was eliminated.
        player: PlayerId,
    },
    /// Reports a special power activation and its roll.
    ///
    /// A successful power with nothing to strike emits no further event.
    SpecialActivated {
        /// Hero who used the power.
        player: PlayerId,
        /// Archetype whose power was used.
        archetype: Archetype,
        /// Face rolled against the archetype threshold.
        roll: DieFace,
        /// Whether the roll met the threshold.
        success: bool,
    },
    /// Confirms that a knight armed a damage bonus.
    DamageBonusGranted {
        /// Knight receiving the bonus.
        player: PlayerId,
        /// Extra damage per hit.
        bonus: u32,
    },
    /// Confirms that a knight's damage bonus expired.
    DamageBonusExpired {
        /// Knight losing the bonus.
        player: PlayerId,
    },
    /// Reports storm damage dealt to a single hero.
    StormDamage {
        /// Sorcerer who cast the storm.
        source: PlayerId,
        /// Hero caught in the storm.
        target: PlayerId,
        /// Health actually lost.
        damage: u32,
        /// Target health after the storm.
        remaining_health: u32,
    },
    /// Confirms a raised defense.
    DefenseRaised {
        /// Hero who defends.
        player: PlayerId,
        /// Damage subtracted from the next hit.
        value: u32,
    },
    /// Reports a dodge attempt.
    DodgeAttempted {
        /// Ninja who attempted the dodge.
        player: PlayerId,
        /// Face rolled.
        roll: DieFace,
        /// Whether the roll met the dodge threshold.
        success: bool,
        /// Whether the success armed an evasion against the next attack.
        evasion_armed: bool,
    },
    /// Announces that the current turn ended.
    TurnEnded {
        /// Player whose turn ended.
        player: PlayerId,
    },
    /// Announces that every living player acted this round.
    RoundCompleted {
        /// Round that completed.
        round: u32,
    },
    /// Announces the end of the game.
    GameEnded {
        /// Final result.
        outcome: GameOutcome,
    },
    /// Asks presenters to hold before continuing.
    Paused {
        /// Moment of the flow the pause belongs to.
        reason: PauseReason,
        /// Length of the pause.
        duration: Duration,
    },
    /// Reports an internal invariant breach; the operation was aborted.
    EngineFault {
        /// Breach that was detected.
        fault: EngineFault,
    },
}

/// Play modes offered to four-player games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Every hero fights for themselves.
    Individual,
    /// Two teams of two; not available yet.
    Duo,
}

/// Phases of the turn engine, in lifecycle order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Choosing the participant count and mode.
    Setup,
    /// Seats draft heroes from the shared pool.
    HeroDraft,
    /// Players roll to decide who opens the round.
    OrderDetermination,
    /// Players take turns in seating order.
    Playing,
    /// At most one hero remains standing.
    Ended,
}

/// Who drives a seat's decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    /// Decisions arrive from a person through the boundary layer.
    Human,
    /// Decisions come from a computer strategy.
    Computer,
}

/// Actions a hero may take on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Step to an accessible cell.
    Move,
    /// Strike an attackable hero.
    Attack,
    /// Use the archetype's special power.
    Special,
    /// Raise a defense against the next hit.
    Defend,
    /// Attempt a dodge (ninja only).
    Dodge,
}

impl ActionKind {
    /// Reports whether the action is committed by clicking a grid cell.
    #[must_use]
    pub const fn targets_cell(self) -> bool {
        matches!(self, Self::Move | Self::Attack)
    }
}

/// Moments at which presenters may pace the flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauseReason {
    /// Before a turn's interaction is enabled.
    BeforeInteraction,
    /// Between the decision steps of a computer player.
    BetweenDecisionSteps,
    /// Between a turn ending and the next one starting.
    BetweenTurns,
}

/// Final result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Exactly one hero is left standing.
    Winner(PlayerId),
    /// Every hero fell.
    Draw,
}

/// Unique identifier assigned to a hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Creates a new player identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Roster index the identifier refers to.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Location of a single grid cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }

    /// Signed `(rows, columns)` offset leading from `self` to `other`.
    #[must_use]
    pub fn delta_to(self, other: CellCoord) -> (i32, i32) {
        (
            other.row as i32 - self.row as i32,
            other.column as i32 - self.column as i32,
        )
    }

    /// Applies a signed offset, returning `None` when either axis turns negative.
    ///
    /// The result is not bounds-checked against the arena.
    #[must_use]
    pub fn offset(self, rows: i32, columns: i32) -> Option<CellCoord> {
        let row = u32::try_from(i64::from(self.row) + i64::from(rows)).ok()?;
        let column = u32::try_from(i64::from(self.column) + i64::from(columns)).ok()?;
        Some(CellCoord::new(row, column))
    }

    /// Cell reached after `distance` steps in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction, distance: u32) -> Option<CellCoord> {
        let (rows, columns) = direction.delta();
        let distance = i32::try_from(distance).ok()?;
        self.offset(rows * distance, columns * distance)
    }
}

/// Cardinal directions a hero may travel or strike along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    North,
    /// Toward increasing row indices.
    South,
    /// Toward decreasing column indices.
    West,
    /// Toward increasing column indices.
    East,
}

impl Direction {
    /// Every cardinal direction in the order legality checks visit them.
    pub const ALL: [Direction; 4] = [Self::North, Self::South, Self::West, Self::East];

    /// Unit `(rows, columns)` offset of the direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::South => (1, 0),
            Self::West => (0, -1),
            Self::East => (0, 1),
        }
    }
}

/// Hero archetypes available in the draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Archetype {
    /// Sturdy melee fighter with a war cry.
    Knight,
    /// Agile skirmisher that strikes adjacent or exactly three cells away.
    Ninja,
    /// Ranged caster striking two or three cells down a line.
    Sorcerer,
}

impl Archetype {
    /// Every archetype in draft order.
    pub const ALL: [Archetype; 3] = [Self::Knight, Self::Ninja, Self::Sorcerer];

    /// Immutable stat block attached to the archetype.
    ///
    /// | archetype | move | attack range | damage | defense | special ≥ |
    /// |---|---|---|---|---|---|
    /// | knight | 1 | 1–1 | 25 | 15 | 3 |
    /// | ninja | 2 | 1 or 3 | 20 | 5 | 4 |
    /// | sorcerer | 1 | 2–3 | 30 | 3 | 3 |
    #[must_use]
    pub const fn stats(self) -> HeroStats {
        match self {
            Self::Knight => HeroStats {
                move_range: 1,
                min_attack_range: 1,
                max_attack_range: 1,
                attack_damage: 25,
                defense: 15,
                special_threshold: 3,
                critical: CriticalMultiplier::OneAndHalf,
            },
            Self::Ninja => HeroStats {
                move_range: 2,
                min_attack_range: 1,
                max_attack_range: 3,
                attack_damage: 20,
                defense: 5,
                special_threshold: 4,
                critical: CriticalMultiplier::OneAndHalf,
            },
            Self::Sorcerer => HeroStats {
                move_range: 1,
                min_attack_range: 2,
                max_attack_range: 3,
                attack_damage: 30,
                defense: 3,
                special_threshold: 3,
                critical: CriticalMultiplier::Double,
            },
        }
    }

    /// Human readable archetype name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Knight => "knight",
            Self::Ninja => "ninja",
            Self::Sorcerer => "sorcerer",
        }
    }

    /// Name of the archetype's special power.
    #[must_use]
    pub const fn special_name(self) -> &'static str {
        match self {
            Self::Knight => "war cry",
            Self::Ninja => "double strike",
            Self::Sorcerer => "arcane storm",
        }
    }
}

/// Stat block derived from an archetype at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeroStats {
    /// Exact number of cells covered by a move.
    pub move_range: u32,
    /// Smallest attack distance.
    pub min_attack_range: u32,
    /// Largest attack distance.
    pub max_attack_range: u32,
    /// Damage dealt by a normal hit.
    pub attack_damage: u32,
    /// Damage subtracted from the next hit while defending.
    pub defense: u32,
    /// Minimum face needed for the special power to succeed.
    pub special_threshold: u8,
    /// Scaling applied to damage on a critical hit.
    pub critical: CriticalMultiplier,
}

/// Damage scaling applied on a critical hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriticalMultiplier {
    /// ×1.5, rounded down.
    OneAndHalf,
    /// ×2.
    Double,
}

impl CriticalMultiplier {
    /// Scales the provided base damage.
    #[must_use]
    pub const fn apply(self, damage: u32) -> u32 {
        match self {
            Self::OneAndHalf => damage.saturating_mul(3) / 2,
            Self::Double => damage.saturating_mul(2),
        }
    }
}

/// Face of a six-sided die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DieFace(u8);

impl DieFace {
    /// Lowest face.
    pub const MIN: DieFace = DieFace(1);
    /// Highest face.
    pub const MAX: DieFace = DieFace(6);

    /// Validates a raw die value, returning `None` outside `1..=6`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Numeric value of the face.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Reports whether the face meets the provided threshold.
    #[must_use]
    pub const fn meets(&self, threshold: u8) -> bool {
        self.0 >= threshold
    }
}

/// Uniform six-sided random source consulted for every roll.
pub trait Dice {
    /// Rolls the die once.
    fn roll(&mut self) -> DieFace;
}

/// Die that replays a fixed script of faces, cycling once exhausted.
///
/// An empty script always yields [`DieFace::MIN`].
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    faces: VecDeque<DieFace>,
}

impl ScriptedDice {
    /// Creates a scripted die; raw values outside `1..=6` are dropped.
    #[must_use]
    pub fn from_faces<I>(faces: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        Self {
            faces: faces.into_iter().filter_map(DieFace::new).collect(),
        }
    }

    /// Appends faces to the end of the script.
    pub fn extend<I>(&mut self, faces: I)
    where
        I: IntoIterator<Item = u8>,
    {
        self.faces.extend(faces.into_iter().filter_map(DieFace::new));
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> DieFace {
        match self.faces.pop_front() {
            Some(face) => {
                self.faces.push_back(face);
                face
            }
            None => DieFace::MIN,
        }
    }
}

/// Classification of an attack roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// Faces 1–2: no damage.
    Miss,
    /// Faces 3–5: base damage.
    Hit,
    /// Face 6: scaled damage.
    Critical,
}

impl AttackOutcome {
    /// Classifies the provided attack roll.
    #[must_use]
    pub const fn classify(roll: DieFace) -> Self {
        match roll.get() {
            0..=2 => Self::Miss,
            3..=5 => Self::Hit,
            _ => Self::Critical,
        }
    }
}

/// Single order-determination roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderRoll {
    /// Player who rolled.
    pub player: PlayerId,
    /// Face rolled.
    pub face: DieFace,
}

/// Immutable representation of a single hero's state used for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSnapshot {
    /// Unique identifier assigned to the hero.
    pub id: PlayerId,
    /// Display name of the hero.
    pub name: String,
    /// Archetype of the hero.
    pub archetype: Archetype,
    /// Cell occupied by the hero, if it stands on the grid.
    pub cell: Option<CellCoord>,
    /// Remaining health.
    pub health: u32,
    /// Turns before the special power can be used again.
    pub special_cooldown: u32,
    /// Indicates whether a defense is raised against the next hit.
    pub defending: bool,
}

impl HeroSnapshot {
    /// Reports whether the hero still has health left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Read-only snapshot describing every hero of the roster.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterView {
    snapshots: Vec<HeroSnapshot>,
}

impl RosterView {
    /// Creates a new roster view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<HeroSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured hero snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &HeroSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of the provided hero.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&HeroSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }

    /// Hero standing on the provided cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<&HeroSnapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.cell == Some(cell))
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<HeroSnapshot> {
        self.snapshots
    }
}

/// Copies of each archetype still available to the draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeroPool {
    knights: u8,
    ninjas: u8,
    sorcerers: u8,
}

impl HeroPool {
    /// Creates a pool holding the provided copies of each archetype.
    #[must_use]
    pub const fn new(knights: u8, ninjas: u8, sorcerers: u8) -> Self {
        Self {
            knights,
            ninjas,
            sorcerers,
        }
    }

    /// Copies of the archetype still available.
    #[must_use]
    pub const fn remaining(&self, archetype: Archetype) -> u8 {
        match archetype {
            Archetype::Knight => self.knights,
            Archetype::Ninja => self.ninjas,
            Archetype::Sorcerer => self.sorcerers,
        }
    }

    /// Removes one copy of the archetype, returning `false` when none remain.
    pub fn take(&mut self, archetype: Archetype) -> bool {
        let slot = match archetype {
            Archetype::Knight => &mut self.knights,
            Archetype::Ninja => &mut self.ninjas,
            Archetype::Sorcerer => &mut self.sorcerers,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

impl Default for HeroPool {
    fn default() -> Self {
        Self::new(DEFAULT_HERO_COPIES, DEFAULT_HERO_COPIES, DEFAULT_HERO_COPIES)
    }
}

/// Reasons a command may be refused by the game.
///
/// Every rejection is recoverable: the state is exactly what it was before the
/// command arrived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum RejectionReason {
    /// The command does not apply to the current phase.
    #[error("command not available during {actual:?}")]
    WrongPhase {
        /// Phase the game is in.
        actual: Phase,
    },
    /// The participant count is outside the supported range.
    #[error("{count} players is not supported; choose between 2 and 4")]
    InvalidPlayerCount {
        /// Count that was requested.
        count: u8,
    },
    /// No mode choice is pending.
    #[error("no game mode choice is pending")]
    ModeSelectionNotPending,
    /// The mode exists but cannot be played yet.
    #[error("the {mode:?} mode is not available yet; choose the individual mode")]
    UnsupportedMode {
        /// Mode that was requested.
        mode: GameMode,
    },
    /// Every copy of the archetype has been drafted.
    #[error("no {} left in the hero pool", .archetype.label())]
    HeroUnavailable {
        /// Archetype that was requested.
        archetype: Archetype,
    },
    /// A die value outside `1..=6` was submitted.
    #[error("{value} is not a face of a six-sided die")]
    InvalidDieFace {
        /// Raw value submitted.
        value: u8,
    },
    /// Every living player already rolled for this round.
    #[error("every order roll has already been submitted")]
    OrderAlreadyDetermined,
    /// Some players still have to roll for order.
    #[error("{remaining} order roll(s) still outstanding")]
    OrderRollsOutstanding {
        /// Players that have not rolled yet.
        remaining: u8,
    },
    /// The current actor cannot reach any cell.
    #[error("no accessible cell for a move")]
    NoAccessibleCells,
    /// The current actor has nobody in range.
    #[error("no target in range for the {}", .archetype.label())]
    NoTargetsInRange {
        /// Archetype of the current actor.
        archetype: Archetype,
    },
    /// The special power is still recharging.
    #[error("special power available again in {turns} turn(s)")]
    SpecialOnCooldown {
        /// Turns until the power recharges.
        turns: u32,
    },
    /// Only ninjas can dodge.
    #[error("only the ninja can dodge")]
    DodgeUnavailable,
    /// A cell was clicked while no move or attack was selected.
    #[error("select a move or an attack first")]
    NoActionSelected,
    /// The click carries a tag other than the pending action.
    #[error("click for {clicked:?} does not match the selected {selected:?}")]
    ActionMismatch {
        /// Action that is pending.
        selected: ActionKind,
        /// Action the click was tagged with.
        clicked: ActionKind,
    },
    /// The action is not committed by clicking a cell.
    #[error("{action:?} is not committed by clicking a cell")]
    NotClickable {
        /// Action the click was tagged with.
        action: ActionKind,
    },
    /// The clicked cell is not reachable by the current actor.
    #[error("cell ({}, {}) is not accessible", .cell.row(), .cell.column())]
    CellNotAccessible {
        /// Cell that was clicked.
        cell: CellCoord,
    },
    /// Nobody stands on the clicked cell.
    #[error("no target at ({}, {})", .cell.row(), .cell.column())]
    NoTargetAtCell {
        /// Cell that was clicked.
        cell: CellCoord,
    },
    /// The hero on the clicked cell is out of range.
    #[error("target at ({}, {}) is out of range", .cell.row(), .cell.column())]
    TargetOutOfRange {
        /// Cell that was clicked.
        cell: CellCoord,
    },
    /// The ninja could not secure a position to strike from.
    #[error("the path toward ({}, {}) is blocked", .cell.row(), .cell.column())]
    AttackPathBlocked {
        /// Cell of the intended target.
        cell: CellCoord,
    },
}

/// Internal invariant breaches. These signal programming defects and are
/// never caused by player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum EngineFault {
    /// A player identifier does not resolve to a placed living hero.
    #[error("player {} is not in the arena", .player.get())]
    UnknownPlayer {
        /// Identifier that failed to resolve.
        player: PlayerId,
    },
    /// The current player index does not resolve to a roster entry.
    #[error("current player index {index} is out of range")]
    CurrentPlayerMissing {
        /// Index that failed to resolve.
        index: usize,
    },
    /// A player is absent from the seating order.
    #[error("player {} is missing from the seating order", .player.get())]
    PlayerNotSeated {
        /// Player that could not be found.
        player: PlayerId,
    },
    /// The arena refused to seat a hero during initial placement.
    #[error("player {} could not be placed", .player.get())]
    PlacementFailed {
        /// Player that could not be placed.
        player: PlayerId,
    },
}
