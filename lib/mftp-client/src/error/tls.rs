/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use thiserror::Error;

use super::FtpCommandError;
use crate::FtpReply;

/// Errors of the `AUTH TLS` upgrade.
///
/// After `HandshakeFailed` or `HandshakeTimedOut` the control connection
/// is gone and the session is closed.
#[derive(Debug, Error)]
pub enum FtpTlsError {
    #[error("auth command failed: {0}")]
    Command(#[from] FtpCommandError),
    #[error("tls rejected by server: {0}")]
    Rejected(FtpReply),
    #[error("control connection is already encrypted")]
    AlreadyEncrypted,
    #[error("invalid tls server name {0}")]
    InvalidServerName(String),
    #[error("tls handshake failed: {0:?}")]
    HandshakeFailed(io::Error),
    #[error("tls handshake timed out")]
    HandshakeTimedOut,
}
