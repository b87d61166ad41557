/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::io;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use super::FtpControlChannel;
use crate::error::FtpCommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FtpCommand(&'static str);

impl FtpCommand {
    #[inline]
    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FtpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! ftp_commands {
    (
        $(
            $(#[$docs:meta])*
            ($konst:ident, $phrase:expr);
        )+
    ) => {
        impl FtpCommand {
        $(
            $(#[$docs])*
            pub(crate) const $konst: FtpCommand = FtpCommand($phrase);
        )+
        }
    };
}

ftp_commands! {
    /// a fake command for greeting
    (GREETING, "-");
    (AUTH_TLS, "AUTH TLS");
    (USER, "USER");
    (PASS, "PASS");
    (QUIT, "QUIT");
    (NOOP, "NOOP");
    (PWD, "PWD");
    (CWD, "CWD");
    (MKD, "MKD");
    (RMD, "RMD");
    (DELE, "DELE");
    (SIZE, "SIZE");
    (STAT_L, "STAT -l");
    (TYPE_A, "TYPE A");
    (TYPE_I, "TYPE I");
    (LIST, "LIST");
    (RETR, "RETR");
    (STOR, "STOR");
}

/// Build the command line text, without the line ending.
pub(crate) fn command_line(cmd: FtpCommand, param: Option<&str>) -> String {
    match param {
        Some(p) => {
            let mut line = String::with_capacity(cmd.0.len() + 1 + p.len());
            line.push_str(cmd.0);
            line.push(' ');
            line.push_str(p);
            line
        }
        None => cmd.0.to_string(),
    }
}

impl<T> FtpControlChannel<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    async fn send_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.stream.write_all(buf).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Send one command line. CR and LF are not allowed in `line`.
    pub(crate) async fn send_line(&mut self, line: &str) -> Result<(), FtpCommandError> {
        if memchr::memchr2(b'\r', b'\n', line.as_bytes()).is_some() {
            return Err(FtpCommandError::InvalidCommandText);
        }

        #[cfg(feature = "log-raw-io")]
        crate::debug::log_cmd(line);

        let mut buf: Vec<u8> = Vec::with_capacity(line.len() + 2);
        buf.extend_from_slice(line.as_bytes());
        buf.extend_from_slice(b"\r\n");

        self.send_all(buf.as_ref())
            .await
            .map_err(FtpCommandError::SendFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_line() {
        assert_eq!(command_line(FtpCommand::PWD, None), "PWD");
        assert_eq!(command_line(FtpCommand::CWD, Some("/pub")), "CWD /pub");
        assert_eq!(
            command_line(FtpCommand::STAT_L, Some("/pub")),
            "STAT -l /pub"
        );
    }
}
