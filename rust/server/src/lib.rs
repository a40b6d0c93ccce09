pub mod connection;
pub mod logging;
pub mod server;
pub mod transport;

pub use logging::{init_logging, LogEntry, TestLogSubscriber};
pub use server::{
    GameServer, ServerConfig, ServerError, ServerHandle, DEFAULT_HOST, DEFAULT_PORT,
};
pub use transport::ChannelTransport;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_listens_on_the_classic_port() {
        let config = ServerConfig::default();

        assert_eq!(config.host(), DEFAULT_HOST);
        assert_eq!(config.port(), 12345);
        assert_eq!(config.game().players, 4);
        assert!(config.record().is_none());
    }
}
