#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays an Arena Legends match.

mod input;

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result as AnyResult};
use arena_legends_core::{
    Archetype, Command, Controller, Dice, Event, GameMode, GameOutcome, HeroSnapshot, Phase,
    MAX_PLAYERS, WELCOME_BANNER,
};
use arena_legends_game::{apply, query, Game, GameConfig, Pacing, SeededDice};
use arena_legends_rendering::{Presenter, Scene, TextPresenter};
use arena_legends_system_tactics::{Greedy, Strategy};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::input::{parse_intent, Intent, HELP};

/// Play a match of Arena Legends in the terminal.
#[derive(Parser, Debug)]
#[command(name = "arena-legends")]
#[command(about = "Tactical hero duels on a 7x7 grid", long_about = None)]
struct Args {
    /// Number of heroes taking part (2 to 4)
    #[arg(long, default_value_t = 2)]
    players: u8,

    /// Hero drafted by each seat, in seat order; missing seats pick automatically
    #[arg(long = "hero", value_enum)]
    heroes: Vec<HeroArg>,

    /// One-based seat played from standard input (repeatable)
    #[arg(long = "human")]
    humans: Vec<u8>,

    /// Seed for placement, order rolls and combat dice
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Successful dodges cancel the next attack against the ninja
    #[arg(long)]
    dodge_evasion: bool,

    /// Wait between turns like a table-top game
    #[arg(long)]
    classic_pacing: bool,

    /// Stop an undecided match after this many rounds
    #[arg(long, default_value_t = 200)]
    max_rounds: u32,

    /// Print a JSON match summary instead of the text log
    #[arg(long)]
    json: bool,

    /// Log engine decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum HeroArg {
    Knight,
    Ninja,
    Sorcerer,
}

impl From<HeroArg> for Archetype {
    fn from(value: HeroArg) -> Self {
        match value {
            HeroArg::Knight => Self::Knight,
            HeroArg::Ninja => Self::Ninja,
            HeroArg::Sorcerer => Self::Sorcerer,
        }
    }
}

/// Machine-readable result of a match.
#[derive(Debug, Serialize)]
struct MatchSummary {
    seed: u64,
    rounds: u32,
    finished: bool,
    outcome: Option<GameOutcome>,
    heroes: Vec<HeroSnapshot>,
}

/// Everything the match loop needs besides the game itself.
struct Session {
    presenter: TextPresenter<Box<dyn Write>>,
    strategy: Greedy,
    order_dice: SeededDice,
    heroes: Vec<Archetype>,
    stdin: io::StdinLock<'static>,
}

impl Session {
    fn step(&mut self, game: &mut Game, command: Command) -> AnyResult<Vec<Event>> {
        let mut events = Vec::new();
        apply(game, command, &mut events);
        let mut scene = Scene::from_roster(query::arena(game).side(), &query::roster_view(game));
        if let Some(action) = query::pending_action(game) {
            scene = scene.with_highlight(action, query::highlighted_cells(game));
        }
        self.presenter.present(&scene, &events)?;
        Ok(events)
    }

    fn setup(&mut self, game: &mut Game, players: u8) -> AnyResult<()> {
        let events = self.step(game, Command::SelectPlayerCount { count: players })?;
        ensure_accepted(&events)?;
        if players == MAX_PLAYERS {
            let events = self.step(
                game,
                Command::SelectMode {
                    mode: GameMode::Individual,
                },
            )?;
            ensure_accepted(&events)?;
        }
        Ok(())
    }

    fn draft(&mut self, game: &mut Game) -> AnyResult<()> {
        let seat = query::drafting_seat(game).context("no seat is drafting")?;
        let archetype = match self.heroes.get(usize::from(seat)) {
            Some(archetype) => *archetype,
            None => self
                .strategy
                .choose_hero(&query::hero_pool(game), seat)
                .context("the hero pool ran dry")?,
        };
        let events = self.step(game, Command::SelectHero { archetype })?;
        ensure_accepted(&events)
    }

    fn determine_order(&mut self, game: &mut Game) -> AnyResult<()> {
        let command = match query::next_roller(game) {
            Some(_) => Command::SubmitOrderRoll {
                face: self.order_dice.roll().get(),
            },
            None => Command::StartRound,
        };
        let events = self.step(game, command)?;
        ensure_accepted(&events)
    }

    fn play_turn(&mut self, game: &mut Game) -> AnyResult<bool> {
        let actor = query::current_player(game).context("no player is acting")?;
        match query::controller(game, actor) {
            Controller::Computer => {
                let commands = self.strategy.decide(query::arena(game), actor);
                for command in commands {
                    let events = self.step(game, command)?;
                    if rejected(&events) {
                        warn!(player = actor.get(), "computer command refused; passing");
                        let _ = self.step(game, Command::Pass)?;
                        break;
                    }
                }
                Ok(true)
            }
            Controller::Human => {
                let view = query::roster_view(game);
                let name = view.get(actor).map_or("?", |hero| hero.name.as_str());
                eprint!("{name} > ");
                io::stderr().flush()?;
                let mut line = String::new();
                if self.stdin.read_line(&mut line)? == 0 {
                    bail!("standard input closed during a human turn");
                }

                match parse_intent(&line) {
                    Ok(Intent::Quit) => Ok(false),
                    Ok(intent) => {
                        for command in intent.commands() {
                            let events = self.step(game, command)?;
                            if rejected(&events) {
                                break;
                            }
                        }
                        Ok(true)
                    }
                    Err(error) => {
                        eprintln!("{error}");
                        Ok(true)
                    }
                }
            }
        }
    }
}

fn rejected(events: &[Event]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, Event::CommandRejected { .. }))
}

fn ensure_accepted(events: &[Event]) -> AnyResult<()> {
    for event in events {
        match event {
            Event::CommandRejected { reason } => bail!("{reason}"),
            Event::EngineFault { fault } => bail!("engine fault: {fault}"),
            _ => {}
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_config(args: &Args) -> AnyResult<GameConfig> {
    if let Some(seat) = args
        .humans
        .iter()
        .find(|seat| **seat == 0 || **seat > args.players)
    {
        bail!("--human {seat} is not a seat of a {}-player match", args.players);
    }
    let controllers = (1..=args.players)
        .map(|seat| {
            if args.humans.contains(&seat) {
                Controller::Human
            } else {
                Controller::Computer
            }
        })
        .collect();
    let pacing = if args.classic_pacing {
        Pacing::classic()
    } else {
        Pacing::instant()
    };

    Ok(GameConfig::new()
        .with_controllers(controllers)
        .with_seed(args.seed)
        .with_dodge_evasion(args.dodge_evasion)
        .with_pacing(pacing))
}

/// Entry point for the Arena Legends command-line interface.
fn main() -> AnyResult<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = build_config(&args)?;
    let out: Box<dyn Write> = if args.json {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout())
    };
    if !args.json {
        println!("{WELCOME_BANNER}");
        if !args.humans.is_empty() {
            println!("{HELP}");
        }
    }

    let mut session = Session {
        presenter: TextPresenter::new(out).with_pauses(args.classic_pacing),
        strategy: Greedy::new(),
        order_dice: SeededDice::new(args.seed.wrapping_add(1)),
        heroes: args.heroes.iter().copied().map(Archetype::from).collect(),
        stdin: io::stdin().lock(),
    };
    let mut game = Game::new(config);
    info!(seed = args.seed, players = args.players, "match starting");

    loop {
        match query::phase(&game) {
            Phase::Setup => session.setup(&mut game, args.players)?,
            Phase::HeroDraft => session.draft(&mut game)?,
            Phase::OrderDetermination if query::round(&game) > args.max_rounds => break,
            Phase::OrderDetermination => session.determine_order(&mut game)?,
            Phase::Playing => {
                if !session.play_turn(&mut game)? {
                    break;
                }
            }
            Phase::Ended => break,
        }
    }

    let summary = MatchSummary {
        seed: args.seed,
        rounds: query::round(&game),
        finished: query::phase(&game) == Phase::Ended,
        outcome: query::outcome(&game),
        heroes: query::roster_view(&game).into_vec(),
    };
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("failed to encode the match summary")?
        );
    } else if !summary.finished {
        println!("Match stopped after {} round(s) without a winner.", summary.rounds);
    }
    Ok(())
}
