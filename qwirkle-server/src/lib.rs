//! Qwirkle Server - networked games over the line protocol
//!
//! This crate provides the TCP backend:
//! - Registration handshake (HELLO / WELCOME) with name validation
//! - A lobby that starts a game once enough players are ready
//! - One session task per running game, driving the turn engine

mod session;

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use qwirkle_core::Message;

/// Longest a client may take over the registration line
const HELLO_TIMEOUT: Duration = Duration::from_secs(30);

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// Lobby size that triggers a game start
    pub players_per_game: usize,
    /// Advertised AI think time; a client gets twice this to answer
    pub think_time_ms: u64,
    /// Fixed bag seed for reproducible games
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8189,
            players_per_game: 4,
            think_time_ms: 5000,
            seed: None,
        }
    }
}

/// A bound listener plus its lobby. Splitting bind from run lets tests
/// bind port 0 and read the assigned address back.
pub struct QwirkleServer {
    listener: TcpListener,
    config: ServerConfig,
}

impl QwirkleServer {
    pub async fn bind(config: ServerConfig) -> anyhow::Result<Self> {
        anyhow::ensure!(
            (qwirkle_core::game::MIN_PLAYERS..=qwirkle_core::game::MAX_PLAYERS)
                .contains(&config.players_per_game),
            "players_per_game must be between {} and {}",
            qwirkle_core::game::MIN_PLAYERS,
            qwirkle_core::game::MAX_PLAYERS
        );
        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await?;
        Ok(QwirkleServer { listener, config })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections forever, filling the lobby and spawning a game
    /// session whenever it reaches the configured size
    pub async fn run(self) -> anyhow::Result<()> {
        let (ready_tx, mut ready_rx) = mpsc::channel::<session::Pending>(16);
        let listener = self.listener;
        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, peer)) => {
                        tracing::info!("new connection from {peer}");
                        let tx = ready_tx.clone();
                        tokio::spawn(handshake(stream, tx));
                    }
                    Err(e) => {
                        tracing::warn!("accept failed: {e}");
                    }
                }
            }
        });

        let mut lobby: Vec<session::Remote> = Vec::new();
        while let Some(pending) = ready_rx.recv().await {
            let id = lobby.len();
            let mut remote = pending.into_remote(id);
            if let Err(e) = remote
                .send(&Message::Welcome {
                    name: remote.name.clone(),
                    id,
                })
                .await
            {
                tracing::warn!("dropping {}: {e}", remote.name);
                continue;
            }
            tracing::info!("{} joined the lobby as player {id}", remote.name);
            lobby.push(remote);
            if lobby.len() == self.config.players_per_game {
                let players = std::mem::take(&mut lobby);
                let config = self.config.clone();
                tokio::spawn(async move {
                    if let Err(e) = session::run_game(players, config).await {
                        tracing::error!("game session failed: {e}");
                    }
                });
            }
        }
        Ok(())
    }
}

/// Bind and serve with the given configuration
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let server = QwirkleServer::bind(config).await?;
    tracing::info!("Qwirkle server listening on {}", server.local_addr()?);
    server.run().await
}

/// Read the HELLO line, validate the name and hand the connection to the
/// lobby. Invalid registrations get an INVALID line and are dropped.
async fn handshake(stream: TcpStream, ready: mpsc::Sender<session::Pending>) {
    let mut pending = session::Pending::new(stream);
    let line = match timeout(HELLO_TIMEOUT, pending.read_line()).await {
        Ok(Some(line)) => line,
        _ => {
            tracing::warn!("connection closed before registration");
            return;
        }
    };
    match line.parse::<Message>() {
        Ok(Message::Hello { name }) if valid_name(&name) => {
            pending.name = name;
            if ready.send(pending).await.is_err() {
                tracing::warn!("lobby is gone, dropping registration");
            }
        }
        _ => {
            tracing::warn!("rejected registration line {line:?}");
            let _ = pending.send_raw("INVALID").await;
        }
    }
}

/// Names are 1 to 16 ASCII letters, no spaces or digits
pub fn valid_name(name: &str) -> bool {
    (1..=16).contains(&name.len()) && name.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(valid_name("Alice"));
        assert!(valid_name("q"));
        assert!(valid_name("SixteenLettersXx"));
        assert!(!valid_name(""));
        assert!(!valid_name("SeventeenLettersXx"));
        assert!(!valid_name("has space"));
        assert!(!valid_name("digits123"));
        assert!(!valid_name("ümlaut"));
    }

    #[tokio::test]
    async fn test_bind_rejects_bad_lobby_size() {
        let config = ServerConfig {
            port: 0,
            players_per_game: 1,
            ..Default::default()
        };
        assert!(QwirkleServer::bind(config).await.is_err());
    }
}
