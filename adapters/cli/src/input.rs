//! Parsing of the intents typed by human seats.

use anyhow::{anyhow, bail, Result as AnyResult};
use arena_legends_core::{ActionKind, CellCoord, Command};

/// Line typed at the prompt, resolved to engine commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Intent {
    /// Choose an action and, for moves and attacks, the cell.
    Act {
        action: ActionKind,
        cell: Option<CellCoord>,
    },
    Pass,
    Quit,
}

impl Intent {
    /// Commands the intent expands to.
    pub(crate) fn commands(self) -> Vec<Command> {
        match self {
            Self::Act { action, cell } => {
                let mut commands = vec![Command::SelectAction { action }];
                if let Some(cell) = cell {
                    commands.push(Command::ClickCell { cell, action });
                }
                commands
            }
            Self::Pass => vec![Command::Pass],
            Self::Quit => Vec::new(),
        }
    }
}

pub(crate) const HELP: &str =
    "commands: move <row> <column> | attack <row> <column> | special | defend | dodge | pass | quit";

/// Parses `move 2 3`, `attack 0 4`, `special`, `defend`, `dodge`, `pass` or `quit`.
pub(crate) fn parse_intent(line: &str) -> AnyResult<Intent> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        bail!("empty input; {HELP}");
    };

    let intent = match verb.to_ascii_lowercase().as_str() {
        "move" | "m" => targeted(ActionKind::Move, &mut words)?,
        "attack" | "a" => targeted(ActionKind::Attack, &mut words)?,
        "special" | "s" => plain(ActionKind::Special),
        "defend" | "d" => plain(ActionKind::Defend),
        "dodge" => plain(ActionKind::Dodge),
        "pass" | "p" => Intent::Pass,
        "quit" | "q" => Intent::Quit,
        other => bail!("unknown command `{other}`; {HELP}"),
    };
    if let Some(extra) = words.next() {
        bail!("unexpected `{extra}`; {HELP}");
    }
    Ok(intent)
}

const fn plain(action: ActionKind) -> Intent {
    Intent::Act { action, cell: None }
}

fn targeted<'a>(action: ActionKind, words: &mut impl Iterator<Item = &'a str>) -> AnyResult<Intent> {
    let mut coordinate = |axis: &str| -> AnyResult<u32> {
        let word = words
            .next()
            .ok_or_else(|| anyhow!("missing {axis}; {HELP}"))?;
        word.parse()
            .map_err(|_| anyhow!("`{word}` is not a valid {axis}"))
    };
    let row = coordinate("row")?;
    let column = coordinate("column")?;
    Ok(Intent::Act {
        action,
        cell: Some(CellCoord::new(row, column)),
    })
}
