use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::debug;

use crate::crawler::fetcher::{FetchError, IdentityRotator};

/// Requests a fresh Tor circuit through the control port.
#[derive(Debug, Clone)]
pub struct TorController {
    addr: String,
    password: Option<String>,
}

impl TorController {
    pub fn new(addr: impl Into<String>, password: Option<String>) -> Self {
        Self {
            addr: addr.into(),
            password,
        }
    }

    fn authenticate_command(&self) -> String {
        match &self.password {
            Some(pw) => format!(
                "AUTHENTICATE \"{}\"",
                pw.replace('\\', "\\\\").replace('"', "\\\"")
            ),
            None => "AUTHENTICATE".to_string(),
        }
    }
}

#[async_trait]
impl IdentityRotator for TorController {
    async fn rotate(&self) -> Result<(), FetchError> {
        let stream = TcpStream::connect(&self.addr).await?;
        let (read_half, mut write_half) = stream.into_split();
        let mut replies = BufReader::new(read_half).lines();

        for command in [self.authenticate_command(), "SIGNAL NEWNYM".to_string()] {
            write_half
                .write_all(format!("{command}\r\n").as_bytes())
                .await?;

            let reply = replies.next_line().await?.unwrap_or_default();
            if !reply.starts_with("250") {
                // keep the password out of errors
                let command = command.split(' ').next().unwrap_or_default().to_string();
                return Err(FetchError::ControlRejected { command, reply });
            }
        }

        write_half.write_all(b"QUIT\r\n").await?;
        debug!(addr = %self.addr, "Tor identity rotated");
        Ok(())
    }
}
