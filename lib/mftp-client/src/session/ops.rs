/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::error::Error;
use std::str::FromStr;

use tokio::io::{AsyncRead, AsyncWrite};

use super::FtpSession;
use crate::control::{FtpCommand, command_line};
use crate::error::FtpCommandError;
use crate::{FtpConnectionProvider, FtpReply, FtpTransferType};

impl<CP, T, E> FtpSession<CP, T, E>
where
    CP: FtpConnectionProvider<T, E>,
    T: AsyncRead + AsyncWrite + Unpin,
    E: Error,
{
    async fn simple_command(
        &mut self,
        cmd: FtpCommand,
        param: Option<&str>,
    ) -> Result<FtpReply, FtpCommandError> {
        let line = command_line(cmd, param);
        self.exchange(&line, cmd.as_str()).await
    }

    pub async fn noop(&mut self) -> Result<FtpReply, FtpCommandError> {
        self.simple_command(FtpCommand::NOOP, None).await
    }

    pub async fn pwd(&mut self) -> Result<FtpReply, FtpCommandError> {
        self.simple_command(FtpCommand::PWD, None).await
    }

    pub async fn cwd(&mut self, path: &str) -> Result<FtpReply, FtpCommandError> {
        self.simple_command(FtpCommand::CWD, Some(path)).await
    }

    pub async fn mkd(&mut self, path: &str) -> Result<FtpReply, FtpCommandError> {
        self.simple_command(FtpCommand::MKD, Some(path)).await
    }

    pub async fn remove_dir(&mut self, path: &str) -> Result<FtpReply, FtpCommandError> {
        self.simple_command(FtpCommand::RMD, Some(path)).await
    }

    pub async fn delete(&mut self, path: &str) -> Result<FtpReply, FtpCommandError> {
        self.simple_command(FtpCommand::DELE, Some(path)).await
    }

    /// `STAT -l path`. Most servers send the listing inline as a
    /// multi-line reply.
    pub async fn stat_extended(&mut self, path: &str) -> Result<FtpReply, FtpCommandError> {
        self.simple_command(FtpCommand::STAT_L, Some(path)).await
    }

    pub async fn set_transfer_type(
        &mut self,
        transfer_type: FtpTransferType,
    ) -> Result<FtpReply, FtpCommandError> {
        let cmd = match transfer_type {
            FtpTransferType::Ascii => FtpCommand::TYPE_A,
            FtpTransferType::Image => FtpCommand::TYPE_I,
        };
        self.simple_command(cmd, None).await
    }

    /// Get the file size by `SIZE`.
    ///
    /// `None` is returned if the server refused the command or the reply
    /// message is not a number. The reply itself is kept as last reply.
    pub async fn size(&mut self, path: &str) -> Result<Option<u64>, FtpCommandError> {
        let reply = self.simple_command(FtpCommand::SIZE, Some(path)).await?;
        if !reply.is_positive_completion() {
            return Ok(None);
        }
        Ok(u64::from_str(reply.message().trim()).ok())
    }
}
