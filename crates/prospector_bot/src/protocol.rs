//! Halite III text protocol.
//!
//! The engine talks to the bot over stdin/stdout, one record per line:
//!
//! **Handshake (engine -> bot):**
//!
//! ```text
//! {"NEW_ENTITY_ENERGY_COST":1000,"MAX_TURNS":400,...}
//! 2 0                 num_players my_id
//! 0 8 16              player_id shipyard_x shipyard_y
//! 1 24 16
//! 32 32               width height
//! 12 40 0 ...         height rows of width halite values
//! ```
//!
//! The bot answers with its name on one line.
//!
//! **Each turn (engine -> bot):**
//!
//! ```text
//! 5                   turn number
//! 0 1 0 4000          player_id num_ships num_dropoffs halite
//! 3 8 15 120          ship_id x y halite (num_ships lines)
//! 1 0 0 5000
//! 2                   num_updated_cells
//! 8 15 90             x y halite
//! 9 15 300
//! ```
//!
//! Dropoff lines (`id x y`) follow each player's ships; they are read and
//! discarded.
//!
//! **Commands (bot -> engine):** space-separated on one line, `m <id> <dir>`
//! with `dir` one of `n s e w o`, and `g` to spawn.

use std::io::BufRead;
use std::str::FromStr;

use prospector_core::prelude::*;

/// Errors while talking to the engine.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Reading from or writing to the engine failed.
    #[error("engine I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended in the middle of a record.
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof {
        /// What was being read.
        context: &'static str,
    },

    /// A line did not have the expected shape.
    #[error("line {line}: expected {expected}, got {found:?}")]
    Malformed {
        /// 1-based input line.
        line: usize,
        /// What the line should contain.
        expected: &'static str,
        /// The offending line.
        found: String,
    },

    /// A token was not an integer.
    #[error("line {line}: {token:?} is not a valid integer")]
    BadInt {
        /// 1-based input line.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// The constants line was not valid JSON.
    #[error("invalid constants line: {0}")]
    Constants(#[from] serde_json::Error),

    /// The received state could not be turned into a game model.
    #[error("invalid game state: {0}")]
    Game(#[from] GameError),
}

/// Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Line-oriented reader that tracks line numbers for error messages.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    buf: String,
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    /// Wrap a buffered reader.
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            buf: String::new(),
            line: 0,
        }
    }

    /// Number of lines consumed so far.
    pub const fn line_number(&self) -> usize {
        self.line
    }

    /// Next line without its terminator, or `None` at end of input.
    ///
    /// Blank lines are skipped.
    pub fn next_line(&mut self) -> Result<Option<&str>> {
        Ok(if self.advance()? {
            Some(self.buf.trim())
        } else {
            None
        })
    }

    /// Next line, treating end of input as an error.
    pub fn expect_line(&mut self, context: &'static str) -> Result<&str> {
        if !self.advance()? {
            return Err(ProtocolError::UnexpectedEof { context });
        }
        Ok(self.buf.trim())
    }

    /// Next line parsed as exactly `N` integers.
    pub fn ints<T: FromStr, const N: usize>(
        &mut self,
        context: &'static str,
    ) -> Result<[T; N]> {
        if !self.advance()? {
            return Err(ProtocolError::UnexpectedEof { context });
        }
        parse_ints(self.buf.trim(), self.line, context)
    }

    /// Next line parsed as exactly `count` integers.
    pub fn int_row<T: FromStr>(&mut self, count: usize, context: &'static str) -> Result<Vec<T>> {
        if !self.advance()? {
            return Err(ProtocolError::UnexpectedEof { context });
        }
        let line = self.buf.trim();
        let values = line
            .split_whitespace()
            .map(|token| parse_int(token, self.line))
            .collect::<Result<Vec<T>>>()?;
        if values.len() != count {
            return Err(ProtocolError::Malformed {
                line: self.line,
                expected: context,
                found: line.to_string(),
            });
        }
        Ok(values)
    }

    /// Load the next non-blank line into the buffer.
    fn advance(&mut self) -> Result<bool> {
        loop {
            self.buf.clear();
            if self.inner.read_line(&mut self.buf)? == 0 {
                return Ok(false);
            }
            self.line += 1;
            if !self.buf.trim().is_empty() {
                return Ok(true);
            }
        }
    }
}

fn parse_int<T: FromStr>(token: &str, line: usize) -> Result<T> {
    token.parse().map_err(|_| ProtocolError::BadInt {
        line,
        token: token.to_string(),
    })
}

/// Narrow a value read as `i64` to the field's own type.
///
/// Out-of-range values (a negative id or halite amount) are reported the
/// same way as tokens that are not integers at all.
fn narrow<T: TryFrom<i64>>(value: i64, line: usize) -> Result<T> {
    T::try_from(value).map_err(|_| ProtocolError::BadInt {
        line,
        token: value.to_string(),
    })
}

/// Parse a line that must hold exactly `N` integers.
pub fn parse_ints<T: FromStr, const N: usize>(
    line: &str,
    line_no: usize,
    expected: &'static str,
) -> Result<[T; N]> {
    let malformed = || ProtocolError::Malformed {
        line: line_no,
        expected,
        found: line.to_string(),
    };

    let mut tokens = line.split_whitespace();
    let mut values = Vec::with_capacity(N);
    for _ in 0..N {
        let token = tokens.next().ok_or_else(malformed)?;
        values.push(parse_int(token, line_no)?);
    }
    if tokens.next().is_some() {
        return Err(malformed());
    }
    values.try_into().map_err(|_| malformed())
}

/// Everything the engine sends before the first turn.
#[derive(Debug, Clone, PartialEq)]
pub struct GameStart {
    /// Rules constants.
    pub constants: GameConstants,
    /// This bot's player id.
    pub my_id: PlayerId,
    /// Each player's shipyard, in the order the engine listed them.
    pub shipyards: Vec<(PlayerId, Position)>,
    /// Initial halite map.
    pub map: GameMap,
}

/// Read the handshake block.
pub fn read_game_start<R: BufRead>(reader: &mut LineReader<R>) -> Result<GameStart> {
    let constants = GameConstants::from_json(reader.expect_line("constants")?)?;

    let [num_players, my_id]: [u32; 2] = reader.ints("num_players my_id")?;
    let mut shipyards = Vec::new();
    for _ in 0..num_players {
        let [id, x, y]: [i64; 3] = reader.ints("player_id shipyard_x shipyard_y")?;
        let line = reader.line_number();
        shipyards.push((
            PlayerId(narrow(id, line)?),
            Position::new(narrow(x, line)?, narrow(y, line)?),
        ));
    }

    let [width, height]: [i32; 2] = reader.ints("width height")?;
    if width <= 0 || height <= 0 {
        return Err(GameError::InvalidDimensions { width, height }.into());
    }
    let mut halite = Vec::new();
    for _ in 0..height {
        halite.extend(reader.int_row::<u32>(width as usize, "map row")?);
    }
    let map = GameMap::new(width, height, halite)?;

    Ok(GameStart {
        constants,
        my_id: PlayerId(my_id),
        shipyards,
        map,
    })
}

/// One turn's worth of engine input, before it is merged with the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Turn number.
    pub turn: u32,
    /// Per-player bank and ships; shipyards come from the handshake.
    pub players: Vec<FramePlayer>,
    /// Cells whose halite changed since the last frame.
    pub updates: Vec<(Position, u32)>,
}

/// One player's entry in a [`Frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePlayer {
    /// Player id.
    pub id: PlayerId,
    /// Banked halite.
    pub halite: u32,
    /// Ships alive this turn.
    pub ships: Vec<Ship>,
}

/// Read one turn frame, or `None` if input ended before it began.
pub fn read_frame<R: BufRead>(
    reader: &mut LineReader<R>,
    num_players: usize,
) -> Result<Option<Frame>> {
    let Some(line) = reader.next_line()? else {
        return Ok(None);
    };
    let line = line.to_string();
    let [turn]: [u32; 1] = parse_ints(&line, reader.line_number(), "turn number")?;

    let mut players = Vec::new();
    for _ in 0..num_players {
        let [id, num_ships, num_dropoffs, halite]: [u32; 4] =
            reader.ints("player_id num_ships num_dropoffs halite")?;
        let owner = PlayerId(id);

        let mut ships = Vec::new();
        for _ in 0..num_ships {
            let [ship_id, x, y, cargo]: [i64; 4] = reader.ints("ship_id x y halite")?;
            let line = reader.line_number();
            ships.push(Ship::new(
                ShipId(narrow(ship_id, line)?),
                owner,
                Position::new(narrow(x, line)?, narrow(y, line)?),
                narrow(cargo, line)?,
            ));
        }
        for _ in 0..num_dropoffs {
            let _: [i32; 3] = reader.ints("dropoff_id x y")?;
        }

        players.push(FramePlayer {
            id: owner,
            halite,
            ships,
        });
    }

    let [num_updates]: [usize; 1] = reader.ints("num_updated_cells")?;
    let mut updates = Vec::new();
    for _ in 0..num_updates {
        let [x, y, halite]: [i64; 3] = reader.ints("x y halite")?;
        let line = reader.line_number();
        updates.push((
            Position::new(narrow(x, line)?, narrow(y, line)?),
            narrow(halite, line)?,
        ));
    }

    Ok(Some(Frame {
        turn,
        players,
        updates,
    }))
}

/// Wire form of one command.
pub fn encode_command(command: &Command) -> String {
    match command {
        Command::Move { ship, direction } => format!("m {ship} {}", direction.as_char()),
        Command::Spawn => "g".to_string(),
    }
}

/// Wire form of a whole turn, without the line terminator.
pub fn encode_commands(commands: &[Command]) -> String {
    commands
        .iter()
        .map(encode_command)
        .collect::<Vec<_>>()
        .join(" ")
}
