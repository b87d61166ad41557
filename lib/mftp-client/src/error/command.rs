/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use thiserror::Error;

use super::FtpRawResponseError;
use crate::FtpReply;

#[derive(Debug, Error)]
pub enum FtpCommandError {
    #[error("control connection is closed")]
    NotConnected,
    #[error("command text contains line break")]
    InvalidCommandText,
    #[error("unable to send command: {0:?}")]
    SendFailed(io::Error),
    #[error("unable to recv reply: {0}")]
    RecvFailed(#[from] FtpRawResponseError),
    #[error("no passive address found in reply {0}")]
    InvalidPassiveReply(FtpReply),
}

impl FtpCommandError {
    /// The control connection can not be used any more.
    ///
    /// After a failed read part of a reply may still be unread, so the next
    /// reply read from the stream would not belong to the next command.
    pub(crate) fn breaks_control_channel(&self) -> bool {
        matches!(
            self,
            FtpCommandError::SendFailed(_) | FtpCommandError::RecvFailed(_)
        )
    }
}
