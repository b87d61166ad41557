/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::time::Duration;

#[cfg(feature = "yaml")]
mod yaml;

const DEFAULT_MAX_LINE_LEN: usize = 2048;
const DEFAULT_MAX_MULTI_LINES: usize = 128;
const DEFAULT_MAX_DOWNLOAD_SIZE: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpControlConfig {
    pub(crate) max_line_len: usize,
    pub(crate) max_multi_lines: usize,
    pub(crate) command_timeout: Duration,
}

impl Default for FtpControlConfig {
    fn default() -> Self {
        FtpControlConfig {
            max_line_len: DEFAULT_MAX_LINE_LEN,
            max_multi_lines: DEFAULT_MAX_MULTI_LINES,
            command_timeout: Duration::from_secs(10),
        }
    }
}

impl FtpControlConfig {
    pub fn set_max_line_len(&mut self, len: usize) {
        // room for at least "<code> \r\n"
        self.max_line_len = len.max(6);
    }

    pub fn set_max_multi_lines(&mut self, lines: usize) {
        self.max_multi_lines = lines.max(1);
    }

    pub fn set_command_timeout(&mut self, timeout: Duration) {
        self.command_timeout = timeout;
    }

    #[inline]
    pub fn max_line_len(&self) -> usize {
        self.max_line_len
    }

    #[inline]
    pub fn max_multi_lines(&self) -> usize {
        self.max_multi_lines
    }

    #[inline]
    pub fn command_timeout(&self) -> Duration {
        self.command_timeout
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpTransferConfig {
    pub(crate) max_download_size: usize,
    pub(crate) connect_timeout: Duration,
    pub(crate) transfer_timeout: Duration,
}

impl Default for FtpTransferConfig {
    fn default() -> Self {
        FtpTransferConfig {
            max_download_size: DEFAULT_MAX_DOWNLOAD_SIZE,
            connect_timeout: Duration::from_secs(10),
            transfer_timeout: Duration::from_secs(60),
        }
    }
}

impl FtpTransferConfig {
    pub fn set_max_download_size(&mut self, size: usize) {
        self.max_download_size = size;
    }

    pub fn set_connect_timeout(&mut self, timeout: Duration) {
        self.connect_timeout = timeout;
    }

    pub fn set_transfer_timeout(&mut self, timeout: Duration) {
        self.transfer_timeout = timeout;
    }

    #[inline]
    pub fn max_download_size(&self) -> usize {
        self.max_download_size
    }
}

/// The command used to ask the server for a passive data port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FtpPassiveMode {
    #[default]
    Pasv,
    /// `CPSV`, the variant some servers use for encrypted data connections.
    Cpsv,
}

impl FtpPassiveMode {
    pub(crate) fn as_command(&self) -> &'static str {
        match self {
            FtpPassiveMode::Pasv => "PASV",
            FtpPassiveMode::Cpsv => "CPSV",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpClientConfig {
    pub(crate) control: FtpControlConfig,
    pub(crate) transfer: FtpTransferConfig,
    pub(crate) connect_timeout: Duration,
    pub(crate) greeting_timeout: Duration,
    pub(crate) passive_mode: FtpPassiveMode,
}

impl Default for FtpClientConfig {
    fn default() -> Self {
        FtpClientConfig {
            control: FtpControlConfig::default(),
            transfer: FtpTransferConfig::default(),
            connect_timeout: Duration::from_secs(30),
            greeting_timeout: Duration::from_secs(10),
            passive_mode: FtpPassiveMode::default(),
        }
    }
}

impl FtpClientConfig {
    #[inline]
    pub fn control(&self) -> &FtpControlConfig {
        &self.control
    }

    #[inline]
    pub fn control_mut(&mut self) -> &mut FtpControlConfig {
        &mut self.control
    }

    #[inline]
    pub fn transfer(&self) -> &FtpTransferConfig {
        &self.transfer
    }

    #[inline]
    pub fn transfer_mut(&mut self) -> &mut FtpTransferConfig {
        &mut self.transfer
    }

    pub fn set_connect_timeout(&mut self, timeout: Duration) {
        self.connect_timeout = timeout;
    }

    pub fn set_greeting_timeout(&mut self, timeout: Duration) {
        self.greeting_timeout = timeout;
    }

    pub fn set_passive_mode(&mut self, mode: FtpPassiveMode) {
        self.passive_mode = mode;
    }

    #[inline]
    pub fn passive_mode(&self) -> FtpPassiveMode {
        self.passive_mode
    }
}
