/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use thiserror::Error;

use super::FtpCommandError;

#[derive(Debug, Error)]
pub enum FtpDataChannelError {
    #[error("data write failed: {0:?}")]
    WriteFailed(io::Error),
    #[error("data read failed: {0:?}")]
    ReadFailed(io::Error),
    #[error("data transfer timed out")]
    TimedOut,
}

#[derive(Debug, Error)]
pub enum FtpTransferError<E: std::error::Error> {
    #[error("command error: {0}")]
    Command(#[from] FtpCommandError),
    #[error("data connect failed: {0:?}")]
    DataConnectFailed(E),
    #[error("timed out to connect data channel")]
    DataConnectTimedOut,
    #[error("data channel error: {0}")]
    DataChannel(#[from] FtpDataChannelError),
}
