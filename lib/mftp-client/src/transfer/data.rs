/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::FtpTransferOutput;
use crate::config::FtpTransferConfig;
use crate::error::FtpDataChannelError;

/// One exchange over a data connection.
pub(crate) struct FtpDataTransfer<T: AsyncRead + AsyncWrite> {
    io: T,
    max_download_size: usize,
}

impl<T> FtpDataTransfer<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(io: T, config: &FtpTransferConfig) -> Self {
        FtpDataTransfer {
            io,
            max_download_size: config.max_download_size,
        }
    }

    async fn send_all(&mut self, payload: &[u8]) -> Result<usize, FtpDataChannelError> {
        self.io
            .write_all(payload)
            .await
            .map_err(FtpDataChannelError::WriteFailed)?;
        self.io
            .flush()
            .await
            .map_err(FtpDataChannelError::WriteFailed)?;
        // the server only sends the completion reply after it sees eof
        self.io
            .shutdown()
            .await
            .map_err(FtpDataChannelError::WriteFailed)?;
        Ok(payload.len())
    }

    async fn recv_to_end(&mut self) -> Result<(Vec<u8>, bool), FtpDataChannelError> {
        let mut data = Vec::new();
        // read one more byte than allowed to find out about truncation
        let limit = self.max_download_size as u64 + 1;
        (&mut self.io)
            .take(limit)
            .read_to_end(&mut data)
            .await
            .map_err(FtpDataChannelError::ReadFailed)?;
        let truncated = data.len() > self.max_download_size;
        if truncated {
            data.truncate(self.max_download_size);
        }
        Ok((data, truncated))
    }

    /// Write `payload` if present, or read all data if not.
    ///
    /// The connection is dropped before returning in all cases.
    pub(crate) async fn transfer(
        mut self,
        payload: Option<&[u8]>,
    ) -> Result<FtpTransferOutput, FtpDataChannelError> {
        match payload {
            Some(payload) => {
                let nw = self.send_all(payload).await?;
                Ok(FtpTransferOutput::Sent(nw))
            }
            None => {
                let (data, truncated) = self.recv_to_end().await?;
                Ok(FtpTransferOutput::Received { data, truncated })
            }
        }
    }
}
