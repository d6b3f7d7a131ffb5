//! Line protocol
//!
//! Newline-terminated, space-separated commands exchanged with remote
//! players. The rendering here is the interoperability contract with
//! existing clients, so every message serializes byte-for-byte: tile
//! codes are the two-character color/shape pairs from [`Tile`], and the
//! literal token `empty` stands in for a tile-less payload.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::Cell;
use crate::game::PlayerId;
use crate::moves::Placement;
use crate::tile::Tile;

pub const EMPTY_TOKEN: &str = "empty";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("empty line")]
    EmptyLine,
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("bad tile code {0:?}")]
    BadTileCode(String),
    #[error("bad number {0:?}")]
    BadNumber(String),
    #[error("missing argument for {0}")]
    MissingArgument(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Client registration request
    Hello { name: String },
    /// Registration acknowledgement with the assigned id
    Welcome { name: String, id: PlayerId },
    /// Game-start roster broadcast, closed by the think time in ms
    Names {
        roster: Vec<(String, PlayerId)>,
        think_time_ms: u64,
    },
    /// Tiles dealt or drawn for one player
    New { tiles: Vec<Tile> },
    /// Whose turn it is
    Next { player: PlayerId },
    /// A client's placement submission
    Move { places: Vec<Placement> },
    /// A client's trade submission; no tiles means a pass
    Trade { tiles: Vec<Tile> },
    /// Broadcast of the move just applied; no placements for a trade
    Turn {
        player: PlayerId,
        places: Vec<Placement>,
    },
    /// A player was removed, with the tile count returned to the bag
    Kick {
        player: PlayerId,
        tiles_returned: usize,
        reason: String,
    },
    Winner { player: PlayerId },
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Hello { name } => write!(f, "HELLO {name}"),
            Message::Welcome { name, id } => write!(f, "WELCOME {name} {id}"),
            Message::Names {
                roster,
                think_time_ms,
            } => {
                write!(f, "NAMES")?;
                for (name, id) in roster {
                    write!(f, " {name} {id}")?;
                }
                write!(f, " {think_time_ms}")
            }
            Message::New { tiles } => {
                write!(f, "NEW")?;
                write_tiles(f, tiles)
            }
            Message::Next { player } => write!(f, "NEXT {player}"),
            Message::Move { places } => {
                write!(f, "MOVE")?;
                write_places(f, places)
            }
            Message::Trade { tiles } => {
                write!(f, "TRADE")?;
                write_tiles(f, tiles)
            }
            Message::Turn { player, places } => {
                write!(f, "TURN {player}")?;
                write_places(f, places)
            }
            Message::Kick {
                player,
                tiles_returned,
                reason,
            } => write!(f, "KICK {player} {tiles_returned} {reason}"),
            Message::Winner { player } => write!(f, "WINNER {player}"),
        }
    }
}

fn write_tiles(f: &mut fmt::Formatter<'_>, tiles: &[Tile]) -> fmt::Result {
    if tiles.is_empty() {
        return write!(f, " {EMPTY_TOKEN}");
    }
    for tile in tiles {
        write!(f, " {tile}")?;
    }
    Ok(())
}

fn write_places(f: &mut fmt::Formatter<'_>, places: &[Placement]) -> fmt::Result {
    if places.is_empty() {
        return write!(f, " {EMPTY_TOKEN}");
    }
    for p in places {
        write!(f, " {} {} {}", p.tile, p.cell.row, p.cell.col)?;
    }
    Ok(())
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let command = tokens.next().ok_or(ProtocolError::EmptyLine)?;
        let rest: Vec<&str> = tokens.collect();
        match command {
            "HELLO" => Ok(Message::Hello {
                name: one_word(&rest, "HELLO")?.to_string(),
            }),
            "WELCOME" => {
                let name = rest
                    .first()
                    .ok_or(ProtocolError::MissingArgument("WELCOME"))?;
                let id = parse_number(rest.get(1), "WELCOME")?;
                Ok(Message::Welcome {
                    name: name.to_string(),
                    id,
                })
            }
            "NAMES" => parse_names(&rest),
            "NEW" => Ok(Message::New {
                tiles: parse_tiles(&rest)?,
            }),
            "NEXT" => Ok(Message::Next {
                player: parse_number(rest.first(), "NEXT")?,
            }),
            "MOVE" => Ok(Message::Move {
                places: parse_places(&rest)?,
            }),
            "TRADE" => Ok(Message::Trade {
                tiles: parse_tiles(&rest)?,
            }),
            "TURN" => {
                let player = parse_number(rest.first(), "TURN")?;
                Ok(Message::Turn {
                    player,
                    places: parse_places(&rest[1..])?,
                })
            }
            "KICK" => {
                let player = parse_number(rest.first(), "KICK")?;
                let tiles_returned = parse_number(rest.get(1), "KICK")?;
                Ok(Message::Kick {
                    player,
                    tiles_returned,
                    reason: rest[2..].join(" "),
                })
            }
            "WINNER" => Ok(Message::Winner {
                player: parse_number(rest.first(), "WINNER")?,
            }),
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }
}

fn one_word<'a>(rest: &[&'a str], command: &'static str) -> Result<&'a str, ProtocolError> {
    match rest {
        [word] => Ok(*word),
        _ => Err(ProtocolError::MissingArgument(command)),
    }
}

fn parse_number<T: FromStr>(
    token: Option<&&str>,
    command: &'static str,
) -> Result<T, ProtocolError> {
    let token = token.ok_or(ProtocolError::MissingArgument(command))?;
    token
        .parse()
        .map_err(|_| ProtocolError::BadNumber(token.to_string()))
}

fn parse_tile(token: &str) -> Result<Tile, ProtocolError> {
    Tile::from_code(token).ok_or_else(|| ProtocolError::BadTileCode(token.to_string()))
}

fn parse_tiles(rest: &[&str]) -> Result<Vec<Tile>, ProtocolError> {
    if rest == [EMPTY_TOKEN] {
        return Ok(Vec::new());
    }
    rest.iter().map(|t| parse_tile(t)).collect()
}

fn parse_places(rest: &[&str]) -> Result<Vec<Placement>, ProtocolError> {
    if rest == [EMPTY_TOKEN] {
        return Ok(Vec::new());
    }
    let mut places = Vec::with_capacity(rest.len() / 3);
    for triple in rest.chunks(3) {
        match triple {
            [code, row, col] => {
                let tile = parse_tile(code)?;
                let row: i16 = row
                    .parse()
                    .map_err(|_| ProtocolError::BadNumber(row.to_string()))?;
                let col: i16 = col
                    .parse()
                    .map_err(|_| ProtocolError::BadNumber(col.to_string()))?;
                places.push(Placement::new(tile, Cell::new(row, col)));
            }
            _ => return Err(ProtocolError::MissingArgument("placement triple")),
        }
    }
    if places.is_empty() {
        return Err(ProtocolError::MissingArgument("placement"));
    }
    Ok(places)
}

fn parse_names(rest: &[&str]) -> Result<Message, ProtocolError> {
    let (&last, pairs) = rest
        .split_last()
        .ok_or(ProtocolError::MissingArgument("NAMES"))?;
    let think_time_ms = last
        .parse()
        .map_err(|_| ProtocolError::BadNumber(last.to_string()))?;
    if pairs.len() % 2 != 0 {
        return Err(ProtocolError::MissingArgument("NAMES pair"));
    }
    let mut roster = Vec::with_capacity(pairs.len() / 2);
    for pair in pairs.chunks(2) {
        let id = pair[1]
            .parse()
            .map_err(|_| ProtocolError::BadNumber(pair[1].to_string()))?;
        roster.push((pair[0].to_string(), id));
    }
    Ok(Message::Names {
        roster,
        think_time_ms,
    })
}
