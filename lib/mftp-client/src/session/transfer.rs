/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::error::Error;

use tokio::io::{AsyncRead, AsyncWrite};

use super::FtpSession;
use crate::control::{FtpCommand, command_line};
use crate::error::{FtpCommandError, FtpDataChannelError, FtpTransferError};
use crate::transfer::FtpDataTransfer;
use crate::{FtpConnectionProvider, FtpPassiveAddress, FtpTransferReply, log_msg};

impl<CP, T, E> FtpSession<CP, T, E>
where
    CP: FtpConnectionProvider<T, E>,
    T: AsyncRead + AsyncWrite + Unpin,
    E: Error,
{
    /// Ask the server for a passive data port, using `PASV` or `CPSV` as
    /// configured.
    pub async fn passive(&mut self) -> Result<FtpPassiveAddress, FtpCommandError> {
        let cmd = self.config.passive_mode.as_command();
        let reply = self.exchange(cmd, "enter passive mode").await?;
        reply
            .parse_passive_address()
            .ok_or(FtpCommandError::InvalidPassiveReply(reply))
    }

    /// Run one data-bearing command.
    ///
    /// A passive port is negotiated and exactly one data connection is opened
    /// to the session host at that port before `line` is sent. The payload is
    /// uploaded if present, otherwise all data is downloaded. The completion
    /// reply is only read if the server answered `line` with a 1xx reply.
    pub async fn transfer_command(
        &mut self,
        line: &str,
        payload: Option<&[u8]>,
    ) -> Result<FtpTransferReply, FtpTransferError<E>> {
        let pasv_addr = self.passive().await?;
        let data_addr = self.server.with_port(pasv_addr.port());
        log_msg!(
            "open data connection to {} for passive address {}",
            data_addr,
            pasv_addr
        );

        let data_stream = match tokio::time::timeout(
            self.config.transfer.connect_timeout,
            self.conn_provider.new_data_connection(&data_addr),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(FtpTransferError::DataConnectFailed(e)),
            Err(_) => return Err(FtpTransferError::DataConnectTimedOut),
        };
        let data = FtpDataTransfer::new(data_stream, &self.config.transfer);

        let start = self.exchange(line, "start transfer").await?;
        if !start.is_positive_preliminary() {
            // the data connection is dropped unused
            return Ok(FtpTransferReply {
                start,
                output: None,
                end: None,
            });
        }

        let transferred =
            match tokio::time::timeout(self.config.transfer.transfer_timeout, data.transfer(payload))
                .await
            {
                Ok(r) => r,
                Err(_) => Err(FtpDataChannelError::TimedOut),
            };
        // the server sends a completion reply even if the transfer failed
        let end = self.read_more(line, "end transfer").await;
        let output = transferred?;
        let end = end?;

        let reply = FtpTransferReply {
            start,
            output: Some(output),
            end: Some(end),
        };
        self.last_reply = Some(reply.clone().into_reply());
        Ok(reply)
    }

    /// `LIST [path]`, the listing text is the output of the returned reply.
    pub async fn list(
        &mut self,
        path: Option<&str>,
    ) -> Result<FtpTransferReply, FtpTransferError<E>> {
        let line = command_line(FtpCommand::LIST, path);
        self.transfer_command(&line, None).await
    }

    /// `RETR path`, download the file content.
    pub async fn retrieve(&mut self, path: &str) -> Result<FtpTransferReply, FtpTransferError<E>> {
        let line = command_line(FtpCommand::RETR, Some(path));
        self.transfer_command(&line, None).await
    }

    /// `STOR path`, upload `payload` as the whole file content.
    pub async fn store(
        &mut self,
        path: &str,
        payload: &[u8],
    ) -> Result<FtpTransferReply, FtpTransferError<E>> {
        let line = command_line(FtpCommand::STOR, Some(path));
        self.transfer_command(&line, Some(payload)).await
    }
}
