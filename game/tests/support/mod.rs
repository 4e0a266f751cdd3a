//! Shared helpers for the game scenario tests.

use arena_legends_core::{Archetype, CellCoord, Command, Event, GameMode, ScriptedDice};
use arena_legends_game::{apply, Game, GameConfig, Placement};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Installs a test subscriber once per process.
///
/// The level comes from `TEST_LOG`, then `RUST_LOG`, and stays at `warn`
/// otherwise.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Applies one command and returns the events it produced.
pub fn run(game: &mut Game, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    apply(game, command, &mut events);
    events
}

/// Drafts the provided heroes onto fixed cells with a scripted die.
///
/// The returned game waits for the first order roll.
pub fn drafted(heroes: &[(Archetype, (u32, u32))], faces: &[u8], config: GameConfig) -> Game {
    init_logging();
    let cells = heroes
        .iter()
        .map(|(_, (row, column))| CellCoord::new(*row, *column))
        .collect();
    let mut game = Game::with_dice(
        config.with_placement(Placement::Fixed(cells)),
        Box::new(ScriptedDice::from_faces(faces.iter().copied())),
    );

    let count = u8::try_from(heroes.len()).expect("player count fits");
    let _ = run(&mut game, Command::SelectPlayerCount { count });
    if count == 4 {
        let _ = run(
            &mut game,
            Command::SelectMode {
                mode: GameMode::Individual,
            },
        );
    }
    for (archetype, _) in heroes {
        let events = run(
            &mut game,
            Command::SelectHero {
                archetype: *archetype,
            },
        );
        assert!(
            !events
                .iter()
                .any(|event| matches!(event, Event::CommandRejected { .. })),
            "draft rejected: {events:?}"
        );
    }
    game
}

/// Submits the order rolls and starts the round.
pub fn open_round(game: &mut Game, rolls: &[u8]) -> Vec<Event> {
    for face in rolls {
        let _ = run(game, Command::SubmitOrderRoll { face: *face });
    }
    run(game, Command::StartRound)
}
