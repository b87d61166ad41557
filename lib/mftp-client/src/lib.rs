/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod addr;
mod config;
mod connection;
mod control;
mod debug;
mod error;
mod io;
mod reply;
mod session;
mod stream;
mod tls;
mod transfer;

pub use addr::{FTP_DEFAULT_PORT, FtpServerAddr, InvalidServerAddr};
pub use config::{FtpClientConfig, FtpControlConfig, FtpPassiveMode, FtpTransferConfig};
pub use connection::{FtpConnectionProvider, TcpConnectionProvider};
pub use debug::{FTP_DEBUG_LOG_LEVEL, FTP_DEBUG_LOG_TARGET, FtpDiagnosticSink, LogDiagnosticSink};
pub use error::{
    FtpCommandError, FtpConnectError, FtpDataChannelError, FtpRawResponseError, FtpTlsError,
    FtpTransferError,
};
pub use reply::{FtpPassiveAddress, FtpReply};
pub use session::{FtpSession, FtpTcpSession};
pub use tls::FtpTlsConfig;
pub use transfer::{FtpTransferOutput, FtpTransferReply, FtpTransferType, UPLOAD_ACK_MARKER};
