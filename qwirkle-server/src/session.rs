//! One running game over a set of registered connections
//!
//! The session task is the sole mutator of its `Game`; remote players only
//! ever see the wire protocol. Any malformed, illegal or missing
//! submission kicks the offending player, and the game continues until the
//! engine reports it over.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::time::{timeout, Duration};

use qwirkle_core::{Game, Message, MoveBatch, Placement, PlayerId};

use crate::ServerConfig;

/// A connection that has said HELLO but not yet been seated
pub(crate) struct Pending {
    pub(crate) name: String,
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Pending {
    pub(crate) fn new(stream: TcpStream) -> Self {
        let (read, writer) = stream.into_split();
        Pending {
            name: String::new(),
            lines: BufReader::new(read).lines(),
            writer,
        }
    }

    pub(crate) async fn read_line(&mut self) -> Option<String> {
        self.lines.next_line().await.ok().flatten()
    }

    pub(crate) async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        Ok(())
    }

    pub(crate) fn into_remote(self, id: PlayerId) -> Remote {
        Remote {
            id,
            name: self.name,
            lines: self.lines,
            writer: self.writer,
        }
    }
}

/// A seated player on the wire
pub(crate) struct Remote {
    pub(crate) id: PlayerId,
    pub(crate) name: String,
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Remote {
    pub(crate) async fn send(&mut self, message: &Message) -> anyhow::Result<()> {
        self.writer
            .write_all(format!("{message}\n").as_bytes())
            .await?;
        Ok(())
    }

    /// Next line within the deadline, or None on timeout/disconnect
    async fn recv(&mut self, deadline: Duration) -> Option<String> {
        match timeout(deadline, self.lines.next_line()).await {
            Ok(Ok(Some(line))) => Some(line),
            _ => None,
        }
    }
}

/// Drive a full game over the given connections. Seat order matches the
/// registration order, so remote ids line up with engine player ids.
pub(crate) async fn run_game(remotes: Vec<Remote>, config: ServerConfig) -> anyhow::Result<()> {
    let mut remotes = remotes;
    let names: Vec<String> = remotes.iter().map(|r| r.name.clone()).collect();
    let mut game = match config.seed {
        Some(seed) => Game::with_seed(names, seed)?,
        None => Game::new(names)?,
    };
    tracing::info!("starting a {}-player game", remotes.len());

    let roster = game
        .players()
        .iter()
        .map(|p| (p.name.clone(), p.id))
        .collect();
    broadcast(
        &mut remotes,
        &Message::Names {
            roster,
            think_time_ms: config.think_time_ms,
        },
    )
    .await;
    for remote in &mut remotes {
        let hand = game
            .player(remote.id)
            .map(|p| p.hand.clone())
            .unwrap_or_default();
        if let Err(e) = remote.send(&Message::New { tiles: hand }).await {
            tracing::warn!("failed to deal to {}: {e}", remote.name);
        }
    }

    // The engine advances one move at a time; a client has twice the
    // advertised think time before an absent move counts as a kick.
    let deadline = Duration::from_millis(config.think_time_ms * 2);
    while !game.is_over() {
        let current = game.current_player().id;
        broadcast(&mut remotes, &Message::Next { player: current }).await;

        let line = match remote_by_id(&mut remotes, current) {
            Some(remote) => remote.recv(deadline).await,
            None => None,
        };
        let batch = line.as_deref().and_then(parse_batch);
        match batch {
            None => {
                kick(&mut game, &mut remotes, current, "no move given").await;
            }
            Some(batch) => {
                let places = batch_places(&batch);
                match game.submit(batch) {
                    Ok(outcome) => {
                        tracing::info!(
                            "player {current} scored {} ({} tiles drawn)",
                            outcome.points,
                            outcome.drawn.len()
                        );
                        if let Some(remote) = remote_by_id(&mut remotes, current) {
                            let _ = remote.send(&Message::New { tiles: outcome.drawn }).await;
                        }
                        broadcast(
                            &mut remotes,
                            &Message::Turn {
                                player: current,
                                places,
                            },
                        )
                        .await;
                    }
                    Err(e) => {
                        kick(&mut game, &mut remotes, current, &e.to_string()).await;
                    }
                }
            }
        }
    }

    if let Some(winner) = game.winner() {
        tracing::info!("game over, winner is player {winner}");
        broadcast(&mut remotes, &Message::Winner { player: winner }).await;
    }
    Ok(())
}

/// Only move submissions are meaningful mid-game
fn parse_batch(line: &str) -> Option<MoveBatch> {
    match line.parse::<Message>().ok()? {
        Message::Move { places } => {
            let moves: Vec<_> = places.into_iter().map(qwirkle_core::Move::Place).collect();
            MoveBatch::from_moves(&moves).ok()
        }
        Message::Trade { tiles } => Some(MoveBatch::Trade(tiles)),
        _ => None,
    }
}

fn batch_places(batch: &MoveBatch) -> Vec<Placement> {
    match batch {
        MoveBatch::Place(places) => places.clone(),
        MoveBatch::Trade(_) => Vec::new(),
    }
}

fn remote_by_id(remotes: &mut [Remote], id: PlayerId) -> Option<&mut Remote> {
    remotes.iter_mut().find(|r| r.id == id)
}

async fn kick(game: &mut Game, remotes: &mut Vec<Remote>, player: PlayerId, reason: &str) {
    let tiles_returned = game.player(player).map_or(0, |p| p.hand.len());
    if let Some(report) = game.kick(player) {
        tracing::warn!("kicking {} ({reason})", report.name);
    }
    remotes.retain(|r| r.id != player);
    broadcast(
        remotes,
        &Message::Kick {
            player,
            tiles_returned,
            reason: reason.to_string(),
        },
    )
    .await;
}

async fn broadcast(remotes: &mut [Remote], message: &Message) {
    for remote in remotes.iter_mut() {
        if let Err(e) = remote.send(message).await {
            tracing::warn!("broadcast to {} failed: {e}", remote.name);
        }
    }
}
