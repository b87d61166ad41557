/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use log::Level;

use crate::FtpReply;

pub const FTP_DEBUG_LOG_LEVEL: Level = Level::Debug;
pub const FTP_DEBUG_LOG_TARGET: &str = "mftp";

#[macro_export]
macro_rules! log_msg {
    ($s:literal, $($arg:tt)+) => (
        log::log!(target: $crate::FTP_DEBUG_LOG_TARGET, $crate::FTP_DEBUG_LOG_LEVEL, concat!(": ", $s), $($arg)+)
    )
}

/// Receiver of the command / reply pairs of a session.
///
/// Password text is masked before it reaches the sink.
pub trait FtpDiagnosticSink: Send {
    fn on_command(&mut self, cmd: &str);
    fn on_reply(&mut self, cmd: &str, reply: &FtpReply);
}

/// Forward diagnostics to the `log` facade.
#[derive(Debug, Default)]
pub struct LogDiagnosticSink;

impl FtpDiagnosticSink for LogDiagnosticSink {
    fn on_command(&mut self, cmd: &str) {
        log::log!(target: FTP_DEBUG_LOG_TARGET, FTP_DEBUG_LOG_LEVEL, "<*cmd*> {cmd}");
    }

    fn on_reply(&mut self, _cmd: &str, reply: &FtpReply) {
        log::log!(
            target: FTP_DEBUG_LOG_TARGET,
            FTP_DEBUG_LOG_LEVEL,
            "<*code*> {}",
            reply.code()
        );
        log::log!(
            target: FTP_DEBUG_LOG_TARGET,
            FTP_DEBUG_LOG_LEVEL,
            "<*message*> {}",
            reply.message()
        );
    }
}

pub(crate) fn mask_command(cmd: &str) -> &str {
    if cmd.len() > 5 && cmd.as_bytes()[..5].eq_ignore_ascii_case(b"PASS ") {
        "PASS ****"
    } else {
        cmd
    }
}

#[cfg(feature = "log-raw-io")]
#[inline]
pub(crate) fn log_cmd(cmd: &str) {
    log::log!(
        target: FTP_DEBUG_LOG_TARGET,
        FTP_DEBUG_LOG_LEVEL,
        "> {}",
        mask_command(cmd)
    );
}

#[cfg(feature = "log-raw-io")]
#[inline]
pub(crate) fn log_rsp(rsp: &str) {
    log::log!(
        target: FTP_DEBUG_LOG_TARGET,
        FTP_DEBUG_LOG_LEVEL,
        "< {}",
        rsp
    );
}
