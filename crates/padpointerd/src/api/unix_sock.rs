use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use bitcode::{Decode, Encode};
use colored::Colorize;
use crossbeam_channel::Sender;

use super::{ApiError, ApiResult, ApiTransport, Command};
use crate::{print_debug, print_error, print_info};

const SOCKET_FILE_NAME: &str = "api.sock";
const MAX_FRAME_LEN: usize = 4096;

#[derive(Encode, Decode)]
struct SocketCommand {
    command: Command,
}

pub struct UnixSocket {
    socket_path: PathBuf,
}

impl UnixSocket {
    pub fn new<P: AsRef<Path>>(workspace_path: P) -> Self {
        let socket_path = workspace_path.as_ref().join(SOCKET_FILE_NAME);

        Self { socket_path }
    }

    pub fn path(&self) -> &Path {
        &self.socket_path
    }
}

impl UnixSocket {
    fn read_command(stream: &mut UnixStream) -> Result<Command, String> {
        let mut length_buffer = [0u8; 4];
        stream
            .read_exact(&mut length_buffer)
            .map_err(|_| "read failed".to_string())?;

        let length = u32::from_be_bytes(length_buffer) as usize;
        if length == 0 {
            return Err("empty".into());
        }
        if length > MAX_FRAME_LEN {
            return Err(format!("frame too large: {length}"));
        }

        let mut data_buffer = vec![0u8; length];
        stream
            .read_exact(&mut data_buffer)
            .map_err(|_| "read failed".to_string())?;

        bitcode::decode::<SocketCommand>(&data_buffer)
            .map(|cmd| cmd.command)
            .map_err(|err| err.to_string())
    }

    fn handle_connection(mut stream: UnixStream, tx: &Sender<Command>) {
        let reply = match Self::read_command(&mut stream) {
            Ok(command) => match tx.send(command) {
                Ok(()) => "OK\n".to_string(),
                Err(_) => "ERR daemon is shutting down\n".to_string(),
            },
            Err(err) => {
                print_error!("failed to decode command: {err}");
                format!("ERR {err}\n")
            }
        };
        let _ = stream.write_all(reply.as_bytes());
    }
}

impl ApiTransport for UnixSocket {
    fn listen_events(&self, tx: Sender<Command>) -> ApiResult<JoinHandle<()>> {
        let socket_path = self.socket_path.clone();
        if socket_path.exists() {
            fs::remove_file(&socket_path)?;
        }
        let listener = UnixListener::bind(&socket_path)?;
        print_info!("unix socket api listening at {}", socket_path.display());

        let handle = thread::Builder::new()
            .name("padpointerd-socket-api".into())
            .spawn(move || {
                for stream in listener.incoming() {
                    match stream {
                        Ok(stream) => {
                            Self::handle_connection(stream, &tx);
                        }
                        Err(e) => {
                            print_error!("control socket accept error: {}", e);
                            break;
                        }
                    }
                }
            })?;
        Ok(handle)
    }

    fn send_event(&self, event: Command) -> ApiResult<()> {
        let stream = UnixStream::connect(&self.socket_path)?;
        let encoded = bitcode::encode(&SocketCommand { command: event });
        let length = encoded.len() as u32;
        {
            let mut writer = BufWriter::new(&stream);
            writer.write_all(&length.to_be_bytes())?;
            writer.write_all(&encoded)?;
            writer.flush()?;
        }

        let mut reply = String::new();
        BufReader::new(&stream).read_line(&mut reply)?;
        let reply = reply.trim_end();
        print_debug!("api reply - {reply}");
        match reply {
            "OK" => Ok(()),
            "" => Err(ApiError::NoReply),
            other => Err(ApiError::Rejected(
                other.strip_prefix("ERR ").unwrap_or(other).to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossbeam_channel::unbounded;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        // Short path: unix socket paths are limited to ~100 bytes.
        let dir = std::env::temp_dir().join(format!("pp-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn command_reaches_listener() {
        let dir = scratch_dir("api");
        let socket = UnixSocket::new(&dir);
        let (tx, rx) = unbounded();
        let _handle = socket.listen_events(tx).expect("listen");

        socket.send_event(Command::Activate).expect("send activate");
        socket.send_event(Command::Deactivate).expect("send deactivate");

        let timeout = Duration::from_secs(1);
        assert_eq!(rx.recv_timeout(timeout), Ok(Command::Activate));
        assert_eq!(rx.recv_timeout(timeout), Ok(Command::Deactivate));
        let _ = fs::remove_dir_all(&dir);
    }

    fn raw_reply(socket: &UnixSocket, length: u32) -> String {
        let mut stream = UnixStream::connect(socket.path()).expect("connect");
        stream.write_all(&length.to_be_bytes()).expect("write length");
        let mut reply = String::new();
        BufReader::new(&stream).read_line(&mut reply).expect("reply");
        reply
    }

    #[test]
    fn malformed_frames_are_rejected() {
        let dir = scratch_dir("frames");
        let socket = UnixSocket::new(&dir);
        let (tx, rx) = unbounded();
        let _handle = socket.listen_events(tx).expect("listen");

        assert_eq!(raw_reply(&socket, 0), "ERR empty\n");
        assert_eq!(raw_reply(&socket, 1 << 20), "ERR frame too large: 1048576\n");
        assert!(rx.try_recv().is_err());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_daemon_is_io_error() {
        let dir = scratch_dir("missing");
        let socket = UnixSocket::new(&dir);
        assert!(matches!(
            socket.send_event(Command::Activate),
            Err(ApiError::IoError(_))
        ));
        let _ = fs::remove_dir_all(&dir);
    }
}
