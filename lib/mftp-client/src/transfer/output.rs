/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::borrow::Cow;

use crate::FtpReply;

/// The message of an upload transfer, as nothing is read back from the
/// data connection.
pub const UPLOAD_ACK_MARKER: &str = "OK";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FtpTransferOutput {
    /// Number of bytes written to the data connection.
    Sent(usize),
    Received { data: Vec<u8>, truncated: bool },
}

impl FtpTransferOutput {
    /// The received bytes, empty for uploads.
    pub fn data(&self) -> &[u8] {
        match self {
            FtpTransferOutput::Sent(_) => &[],
            FtpTransferOutput::Received { data, .. } => data,
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, FtpTransferOutput::Received { truncated: true, .. })
    }

    /// The text form: the ack marker for uploads, the received data for
    /// downloads.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            FtpTransferOutput::Sent(_) => Cow::Borrowed(UPLOAD_ACK_MARKER),
            FtpTransferOutput::Received { data, .. } => String::from_utf8_lossy(data),
        }
    }
}

/// All replies and data of one data-bearing command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpTransferReply {
    pub(crate) start: FtpReply,
    pub(crate) output: Option<FtpTransferOutput>,
    pub(crate) end: Option<FtpReply>,
}

impl FtpTransferReply {
    /// The reply to the command itself, normally 1xx.
    #[inline]
    pub fn start_reply(&self) -> &FtpReply {
        &self.start
    }

    /// The completion reply sent after the data transfer.
    /// `None` if the server answered the command with a final reply.
    #[inline]
    pub fn end_reply(&self) -> Option<&FtpReply> {
        self.end.as_ref()
    }

    /// `None` if the data connection was not used.
    #[inline]
    pub fn output(&self) -> Option<&FtpTransferOutput> {
        self.output.as_ref()
    }

    pub fn final_reply(&self) -> &FtpReply {
        self.end.as_ref().unwrap_or(&self.start)
    }

    #[inline]
    pub fn code(&self) -> u16 {
        self.final_reply().code()
    }

    /// Flatten into one reply, with the code of the final reply and the
    /// transfer output as message.
    pub fn into_reply(self) -> FtpReply {
        match (self.output, self.end) {
            (Some(output), Some(end)) => FtpReply::new(end.code(), output.text()),
            (_, Some(end)) => end,
            (_, None) => self.start,
        }
    }
}
