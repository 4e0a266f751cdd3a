#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Arena Legends adapters.

use anyhow::Result as AnyResult;
use arena_legends_core::{
    ActionKind, Archetype, AttackOutcome, CellCoord, Controller, Event, GameMode, GameOutcome,
    PlayerId, RosterView,
};
use std::{io::Write, thread};
use tracing::trace;

/// Hero as drawn on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeroPresentation {
    /// Identifier of the hero.
    pub player: PlayerId,
    /// Display name.
    pub name: String,
    /// Two-character token, archetype initial followed by seat number.
    pub glyph: String,
    /// Cell the hero stands on; `None` once eliminated.
    pub cell: Option<CellCoord>,
    /// Remaining health.
    pub health: u32,
}

/// Cells offered to the acting player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Highlight {
    /// Action the cells belong to.
    pub action: ActionKind,
    /// Highlighted cells.
    pub cells: Vec<CellCoord>,
}

/// Snapshot handed to presenters alongside each event batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    side: u32,
    heroes: Vec<HeroPresentation>,
    highlight: Option<Highlight>,
}

impl Scene {
    /// Builds a scene from the roster of a grid with `side` cells per edge.
    #[must_use]
    pub fn from_roster(side: u32, roster: &RosterView) -> Self {
        let heroes = roster
            .iter()
            .map(|hero| HeroPresentation {
                player: hero.id,
                name: hero.name.clone(),
                glyph: glyph(hero.archetype, hero.id),
                cell: hero.cell,
                health: hero.health,
            })
            .collect();
        Self {
            side,
            heroes,
            highlight: None,
        }
    }

    /// Attaches the cells currently offered for `action`.
    #[must_use]
    pub fn with_highlight(mut self, action: ActionKind, cells: &[CellCoord]) -> Self {
        self.highlight = if cells.is_empty() {
            None
        } else {
            Some(Highlight {
                action,
                cells: cells.to_vec(),
            })
        };
        self
    }

    /// Cells per grid edge.
    #[must_use]
    pub const fn side(&self) -> u32 {
        self.side
    }

    /// Every hero of the roster, eliminated ones included.
    #[must_use]
    pub fn heroes(&self) -> &[HeroPresentation] {
        &self.heroes
    }

    /// Highlight attached to the scene, if any.
    #[must_use]
    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    /// Hero standing on the provided cell.
    #[must_use]
    pub fn hero_at(&self, cell: CellCoord) -> Option<&HeroPresentation> {
        self.heroes.iter().find(|hero| hero.cell == Some(cell))
    }

    /// Display name of the player, falling back to its seat number.
    #[must_use]
    pub fn name_of(&self, player: PlayerId) -> String {
        self.heroes
            .iter()
            .find(|hero| hero.player == player)
            .map_or_else(|| format!("Player {}", player.get() + 1), |hero| hero.name.clone())
    }

    fn is_highlighted(&self, cell: CellCoord) -> bool {
        self.highlight
            .as_ref()
            .is_some_and(|highlight| highlight.cells.contains(&cell))
    }
}

fn glyph(archetype: Archetype, player: PlayerId) -> String {
    let initial = match archetype {
        Archetype::Knight => 'K',
        Archetype::Ninja => 'N',
        Archetype::Sorcerer => 'S',
    };
    format!("{initial}{}", player.get() + 1)
}

/// Titled notification shown to the players.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Short heading.
    pub title: String,
    /// Message text.
    pub body: String,
}

impl Message {
    fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Consumer of the engine's event batches.
pub trait Presenter {
    /// Presents one batch of events together with the scene they produced.
    fn present(&mut self, scene: &Scene, events: &[Event]) -> AnyResult<()>;
}

/// Draws the grid as text, one row per line.
///
/// Heroes show as their glyph, empty cells as `.`, and highlighted cells
/// carry a `*`.
#[must_use]
pub fn render_grid(scene: &Scene) -> String {
    let mut lines = Vec::with_capacity(scene.side as usize + 1);
    let mut header = String::from("   ");
    for column in 0..scene.side {
        header.push_str(&format!("{column:<3}"));
    }
    lines.push(header.trim_end().to_owned());

    for row in 0..scene.side {
        let mut line = format!("{row:<3}");
        for column in 0..scene.side {
            let cell = CellCoord::new(row, column);
            let marker = if scene.is_highlighted(cell) { '*' } else { ' ' };
            match scene.hero_at(cell) {
                Some(hero) => line.push_str(&format!("{}{marker}", hero.glyph)),
                None if marker == '*' => line.push_str("*  "),
                None => line.push_str(".  "),
            }
        }
        lines.push(line.trim_end().to_owned());
    }

    lines.join("\n")
}

/// Turns an event into the message a player would see, if it warrants one.
#[must_use]
pub fn describe(event: &Event, scene: &Scene) -> Option<Message> {
    let name = |player: &PlayerId| scene.name_of(*player);
    let message = match event {
        Event::PlayerCountSelected {
            count,
            mode_required: false,
        } => Message::new("Setup", format!("{count} players")),
        Event::PlayerCountSelected { count, .. } => Message::new(
            "Setup",
            format!("{count} players, choose a mode: individual or duo"),
        ),
        Event::ModeSelected { mode } => Message::new(
            "Setup",
            match mode {
                GameMode::Individual => "individual play",
                GameMode::Duo => "duo play",
            },
        ),
        Event::HeroSelectionRequested { seat, pool } => Message::new(
            "Hero draft",
            format!(
                "Player {} chooses: {} knight(s), {} ninja(s), {} sorcerer(s) left",
                u32::from(*seat) + 1,
                pool.remaining(Archetype::Knight),
                pool.remaining(Archetype::Ninja),
                pool.remaining(Archetype::Sorcerer)
            ),
        ),
        Event::HeroPicked { seat, archetype } => Message::new(
            "Hero draft",
            format!("Player {} drafts the {}", u32::from(*seat) + 1, archetype.label()),
        ),
        Event::PlayerEnlisted { .. } | Event::TurnEnded { .. } | Event::Paused { .. } => {
            return None
        }
        Event::PlayerPlaced { player, cell } => Message::new(
            "Placement",
            format!("{} enters at {}", name(player), cell_label(*cell)),
        ),
        Event::SeatingOrderEstablished { order } => Message::new(
            "Seating",
            order.iter().map(name).collect::<Vec<_>>().join(", "),
        ),
        Event::OrderDeterminationStarted { round } => {
            Message::new(format!("Round {round}"), "roll for the turn order")
        }
        Event::OrderRollRequested { player } => {
            Message::new("Turn order", format!("{} rolls", name(player)))
        }
        Event::OrderRollRecorded { player, face } => Message::new(
            "Turn order",
            format!("{} rolled {}", name(player), face.get()),
        ),
        Event::FirstActorDetermined { round, first, .. } => Message::new(
            "Turn order",
            format!("{} opens round {round}", name(first)),
        ),
        Event::RoundStarted { round } => Message::new(format!("Round {round}"), "fight!"),
        Event::TurnStarted {
            player, controller, ..
        } => Message::new(
            "Turn",
            format!(
                "{} to act ({})",
                name(player),
                match controller {
                    Controller::Human => "human",
                    Controller::Computer => "computer",
                }
            ),
        ),
        Event::CellsHighlighted { action, cells } => Message::new(
            "Choose a cell",
            format!("{} cell(s) to {}", cells.len(), action_label(*action)),
        ),
        Event::CommandRejected { reason } => Message::new("Not allowed", reason.to_string()),
        Event::PlayerMoved { player, from, to } => Message::new(
            "Move",
            format!(
                "{} moves from {} to {}",
                name(player),
                cell_label(*from),
                cell_label(*to)
            ),
        ),
        Event::AttackResolved {
            attacker,
            target,
            roll,
            outcome,
            damage,
            remaining_health,
        } => {
            let verdict = match outcome {
                AttackOutcome::Miss => "misses",
                AttackOutcome::Hit => "hits",
                AttackOutcome::Critical => "critically hits",
            };
            Message::new(
                "Attack",
                format!(
                    "{} rolls {} and {verdict} {} for {damage} ({remaining_health} hp left)",
                    name(attacker),
                    roll.get(),
                    name(target)
                ),
            )
        }
        Event::AttackEvaded { attacker, target } => Message::new(
            "Attack",
            format!("{} evades the attack of {}", name(target), name(attacker)),
        ),
        Event::PlayerEliminated { player } => {
            Message::new("Eliminated", format!("{} is out", name(player)))
        }
        Event::SpecialActivated {
            player,
            archetype,
            roll,
            success,
        } => Message::new(
            "Special",
            format!(
                "{} calls {}: rolled {}, {}",
                name(player),
                archetype.special_name(),
                roll.get(),
                if *success { "success" } else { "failure" }
            ),
        ),
        Event::DamageBonusGranted { player, bonus } => Message::new(
            "Special",
            format!("{} gains +{bonus} damage", name(player)),
        ),
        Event::DamageBonusExpired { player } => {
            Message::new("Special", format!("the war cry of {} fades", name(player)))
        }
        Event::StormDamage {
            target,
            damage,
            remaining_health,
            ..
        } => Message::new(
            "Special",
            format!(
                "the storm hits {} for {damage} ({remaining_health} hp left)",
                name(target)
            ),
        ),
        Event::DefenseRaised { player, value } => Message::new(
            "Defend",
            format!("{} raises defense by {value}", name(player)),
        ),
        Event::DodgeAttempted {
            player,
            roll,
            success,
            evasion_armed,
        } => {
            let result = match (*success, *evasion_armed) {
                (true, true) => "dodge ready against the next attack",
                (true, false) => "dodge succeeded",
                (false, _) => "dodge failed",
            };
            Message::new(
                "Dodge",
                format!("{} rolled {}: {result}", name(player), roll.get()),
            )
        }
        Event::RoundCompleted { round } => Message::new(format!("Round {round}"), "complete"),
        Event::GameEnded { outcome } => Message::new(
            "Game over",
            match outcome {
                GameOutcome::Winner(player) => format!("{} wins!", name(player)),
                GameOutcome::Draw => "nobody is left standing".to_owned(),
            },
        ),
        Event::EngineFault { fault } => Message::new("Engine fault", fault.to_string()),
    };
    Some(message)
}

fn cell_label(cell: CellCoord) -> String {
    format!("({}, {})", cell.row(), cell.column())
}

fn action_label(action: ActionKind) -> &'static str {
    match action {
        ActionKind::Move => "move",
        ActionKind::Attack => "attack",
        ActionKind::Special => "use the special power",
        ActionKind::Defend => "defend",
        ActionKind::Dodge => "dodge",
    }
}

fn redraws_grid(event: &Event) -> bool {
    matches!(
        event,
        Event::SeatingOrderEstablished { .. }
            | Event::RoundStarted { .. }
            | Event::CellsHighlighted { .. }
            | Event::PlayerMoved { .. }
            | Event::PlayerEliminated { .. }
    )
}

/// Presenter writing messages and the grid to any [`Write`] sink.
#[derive(Debug)]
pub struct TextPresenter<W> {
    out: W,
    honor_pauses: bool,
}

impl<W: Write> TextPresenter<W> {
    /// Creates a presenter that ignores pacing pauses.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self {
            out,
            honor_pauses: false,
        }
    }

    /// Makes the presenter sleep through `Event::Paused` notifications.
    #[must_use]
    pub fn with_pauses(mut self, enabled: bool) -> Self {
        self.honor_pauses = enabled;
        self
    }

    /// Consumes the presenter and returns its sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, scene: &Scene, events: &[Event]) -> AnyResult<()> {
        for event in events {
            if let Event::Paused { reason, duration } = event {
                trace!(?reason, ?duration, "pause");
                if self.honor_pauses {
                    thread::sleep(*duration);
                }
                continue;
            }
            if let Some(message) = describe(event, scene) {
                writeln!(self.out, "[{}] {}", message.title, message.body)?;
            }
        }

        if events.iter().any(redraws_grid) {
            writeln!(self.out, "{}", render_grid(scene))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_legends_core::{DieFace, HeroSnapshot, RejectionReason};

    fn snapshot(id: u32, archetype: Archetype, cell: Option<(u32, u32)>) -> HeroSnapshot {
        HeroSnapshot {
            id: PlayerId::new(id),
            name: format!("Player {}", id + 1),
            archetype,
            cell: cell.map(|(row, column)| CellCoord::new(row, column)),
            health: 100,
            special_cooldown: 0,
            defending: false,
        }
    }

    fn scene() -> Scene {
        Scene::from_roster(
            7,
            &RosterView::from_snapshots(vec![
                snapshot(0, Archetype::Knight, Some((0, 0))),
                snapshot(1, Archetype::Ninja, Some((0, 2))),
                snapshot(2, Archetype::Sorcerer, None),
            ]),
        )
    }

    #[test]
    fn grid_marks_heroes_and_highlights() {
        let scene = scene().with_highlight(
            ActionKind::Move,
            &[CellCoord::new(1, 0), CellCoord::new(0, 1)],
        );

        let grid = render_grid(&scene);
        let lines: Vec<&str> = grid.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "   0  1  2  3  4  5  6");
        assert_eq!(lines[1], "0  K1 *  N2 .  .  .  .");
        assert_eq!(lines[2], "1  *  .  .  .  .  .  .");
    }

    #[test]
    fn attack_targets_carry_the_marker_next_to_the_glyph() {
        let scene = scene().with_highlight(ActionKind::Attack, &[CellCoord::new(0, 2)]);

        assert!(render_grid(&scene).contains("N2*"));
    }

    #[test]
    fn eliminated_heroes_keep_their_names() {
        let scene = scene();

        assert!(scene.hero_at(CellCoord::new(6, 6)).is_none());
        assert_eq!(scene.name_of(PlayerId::new(2)), "Player 3");
        assert_eq!(scene.name_of(PlayerId::new(8)), "Player 9");
    }

    #[test]
    fn attack_results_read_naturally() {
        let message = describe(
            &Event::AttackResolved {
                attacker: PlayerId::new(0),
                target: PlayerId::new(1),
                roll: DieFace::new(6).expect("valid face"),
                outcome: AttackOutcome::Critical,
                damage: 37,
                remaining_health: 63,
            },
            &scene(),
        )
        .expect("attack is described");

        assert_eq!(message.title, "Attack");
        assert_eq!(
            message.body,
            "Player 1 rolls 6 and critically hits Player 2 for 37 (63 hp left)"
        );
    }

    #[test]
    fn four_player_setup_prompts_for_a_mode() {
        let prompt = |count: u8, mode_required: bool| {
            describe(
                &Event::PlayerCountSelected {
                    count,
                    mode_required,
                },
                &scene(),
            )
            .map(|message| message.body)
        };

        assert_eq!(prompt(3, false).as_deref(), Some("3 players"));
        assert_eq!(
            prompt(4, true).as_deref(),
            Some("4 players, choose a mode: individual or duo")
        );
    }

    #[test]
    fn text_presenter_writes_messages_then_grid() {
        let mut presenter = TextPresenter::new(Vec::new());
        let events = vec![
            Event::CommandRejected {
                reason: RejectionReason::NoActionSelected,
            },
            Event::TurnEnded {
                player: PlayerId::new(0),
            },
            Event::PlayerEliminated {
                player: PlayerId::new(2),
            },
        ];

        presenter
            .present(&scene(), &events)
            .expect("writing to a vec succeeds");
        let text = String::from_utf8(presenter.into_inner()).expect("utf-8 output");

        let mut lines = text.lines();
        assert!(lines
            .next()
            .is_some_and(|line| line.starts_with("[Not allowed] ")));
        assert_eq!(lines.next(), Some("[Eliminated] Player 3 is out"));
        assert_eq!(lines.next(), Some("   0  1  2  3  4  5  6"));
    }
}
