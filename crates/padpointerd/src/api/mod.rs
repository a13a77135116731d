mod unix_sock;

use std::thread::JoinHandle;

pub use unix_sock::UnixSocket;

use bitcode::{Decode, Encode};
use crossbeam_channel::Sender;
use thiserror::Error;

/// Error type for api operations.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("socket io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("daemon rejected command: {0}")]
    Rejected(String),
    #[error("daemon closed the connection without a reply")]
    NoReply,
}

/// Convenient result alias for api operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// padpointerd api control command.
#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Activate,
    Deactivate,
}

/// padpointerd api transport.
/// Listener side receives commands from the outer world and forwards them
/// to the daemon, sender side delivers a command to a running daemon.
pub trait ApiTransport {
    fn listen_events(&self, tx: Sender<Command>) -> ApiResult<JoinHandle<()>>;
    fn send_event(&self, event: Command) -> ApiResult<()>;
}
