use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::time::Duration;

use madcards_engine::errors::GameError;
use madcards_engine::game::GameConfig;
use madcards_engine::logger::{GameLogger, GameRecord};
use madcards_engine::session::SessionCoordinator;
use madcards_engine::transport::Notice;
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::connection::{read_actions, write_line, write_notices};
use crate::transport::ChannelTransport;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 12345;

// Inbound lines waiting for the session; readers wait when it is full.
const INBOUND_BUFFER: usize = 64;
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct ServerConfig {
    host: String,
    port: u16,
    game: GameConfig,
    record: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT, GameConfig::default())
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16, game: GameConfig) -> Self {
        Self {
            host: host.into(),
            port,
            game,
            record: None,
        }
    }

    /// Loopback, any free port, fixed seed.
    pub fn for_tests(players: usize) -> Self {
        let game = GameConfig {
            seed: Some(7),
            ..GameConfig::with_players(players)
        };
        Self::new(DEFAULT_HOST, 0, game)
    }

    /// Appends the finished game's record to `path` as one JSON line.
    pub fn with_record(mut self, path: impl Into<PathBuf>) -> Self {
        self.record = Some(path.into());
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn game(&self) -> &GameConfig {
        &self.game
    }

    pub fn record(&self) -> Option<&Path> {
        self.record.as_deref()
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    BindError(#[source] std::io::Error),
    #[error("Connection error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Game error: {0}")]
    Game(#[from] GameError),
    #[error("Server task failed: {0}")]
    Task(String),
}

/// Hosts exactly one game: seats the configured number of players in
/// connection order, then runs the session until it ends.
#[derive(Debug, Clone)]
pub struct GameServer {
    config: ServerConfig,
}

impl GameServer {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        config.game().validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let bind_addr = Self::bind_addr(&self.config)?;
        let listener = TcpListener::bind(bind_addr)
            .await
            .map_err(ServerError::BindError)?;
        let addr = listener.local_addr()?;

        info!(
            %addr,
            players = self.config.game().players,
            "server listening; waiting for players"
        );

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(host_game(listener, self.config, shutdown_rx));

        Ok(ServerHandle::new(addr, shutdown_tx, task))
    }

    fn bind_addr(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
        let host = config.host();

        if let Ok(addr) = host.parse::<SocketAddr>() {
            return Ok(addr);
        }

        if let Ok(ip) = host.parse::<std::net::IpAddr>() {
            return Ok(SocketAddr::new(ip, config.port()));
        }

        let candidate = format!("{}:{}", host, config.port());
        let mut addrs = candidate.to_socket_addrs().map_err(|err| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`: {err}"))
        })?;

        addrs.next().ok_or_else(|| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`"))
        })
    }
}

async fn host_game(
    listener: TcpListener,
    config: ServerConfig,
    mut shutdown: oneshot::Receiver<()>,
) -> Result<Option<GameRecord>, ServerError> {
    let players = config.game().players;
    let streams = tokio::select! {
        seated = seat_players(&listener, players) => seated?,
        _ = &mut shutdown => {
            info!("shutdown before every seat was taken");
            return Ok(None);
        }
    };
    drop(listener);

    let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_BUFFER);
    let mut seats = Vec::with_capacity(players);
    let mut readers = Vec::with_capacity(players);
    let mut writers = Vec::with_capacity(players);
    for (player_id, stream) in streams.into_iter().enumerate() {
        let (read_half, write_half) = stream.into_split();
        let (seat_tx, seat_rx) = mpsc::unbounded_channel();
        writers.push(tokio::spawn(write_notices(player_id, write_half, seat_rx)));
        readers.push(tokio::spawn(read_actions(
            player_id,
            read_half,
            inbound_tx.clone(),
        )));
        seats.push(seat_tx);
    }
    drop(inbound_tx);

    let transport = ChannelTransport::new(seats, inbound_rx);
    let game = config.game().clone();
    let record_path = config.record().map(Path::to_path_buf);
    let mut session =
        tokio::task::spawn_blocking(move || play_session(&game, transport, record_path.as_deref()));

    let joined = tokio::select! {
        joined = &mut session => joined,
        _ = &mut shutdown => {
            info!("shutdown requested; closing player input");
            readers.iter().for_each(JoinHandle::abort);
            session.await
        }
    };

    readers.iter().for_each(JoinHandle::abort);
    for writer in writers {
        if tokio::time::timeout(DRAIN_TIMEOUT, writer).await.is_err() {
            warn!("timed out flushing final notices");
        }
    }

    let record = joined.map_err(|err| ServerError::Task(err.to_string()))??;
    Ok(Some(record))
}

async fn seat_players(
    listener: &TcpListener,
    players: usize,
) -> Result<Vec<TcpStream>, ServerError> {
    let mut streams = Vec::with_capacity(players);
    while streams.len() < players {
        let (mut stream, peer) = listener.accept().await?;
        let player_id = streams.len();
        if let Err(err) = write_line(&mut stream, &Notice::Welcome.to_string()).await {
            warn!(%peer, error = %err, "could not greet player; seat stays open");
            continue;
        }
        info!(%peer, player_id, seated = player_id + 1, players, "player connected");
        streams.push(stream);
    }
    Ok(streams)
}

fn play_session(
    game: &GameConfig,
    transport: ChannelTransport,
    record: Option<&Path>,
) -> Result<GameRecord, ServerError> {
    let mut logger = record.map(GameLogger::create).transpose()?;
    let mut coordinator = SessionCoordinator::new(game, transport)?;
    if let Some(logger) = logger.as_mut() {
        coordinator = coordinator.with_game_id(logger.next_id());
    }

    let result = coordinator.run()?;
    // Closes every seat queue so the writer tasks can finish.
    drop(coordinator);

    if let Some(logger) = logger.as_mut() {
        logger.write(&result)?;
        debug!(game_id = %result.game_id, "game record written");
    }
    Ok(result)
}

pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<Option<GameRecord>, ServerError>>>,
}

impl ServerHandle {
    fn new(
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<Result<Option<GameRecord>, ServerError>>,
    ) -> Self {
        Self {
            addr,
            shutdown: Some(shutdown),
            task: Some(task),
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    /// Waits for the game to finish. `None` means it never started.
    pub async fn wait(&mut self) -> Result<Option<GameRecord>, ServerError> {
        let Some(task) = self.task.as_mut() else {
            return Ok(None);
        };
        let joined = task.await;
        self.task = None;
        Self::flatten(joined)
    }

    /// Stops seating players or, mid-game, closes player input so the
    /// session ends as abandoned.
    pub async fn shutdown(mut self) -> Result<Option<GameRecord>, ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        match self.task.take() {
            Some(task) => Self::flatten(task.await),
            None => Ok(None),
        }
    }

    fn flatten(
        joined: Result<Result<Option<GameRecord>, ServerError>, tokio::task::JoinError>,
    ) -> Result<Option<GameRecord>, ServerError> {
        match joined {
            Ok(result) => result,
            Err(err) => Err(ServerError::Task(format!("server task join error: {err}"))),
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
