/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// One complete reply read from the control connection.
///
/// The code is not interpreted by the engine, callers decide what success
/// means for each command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpReply {
    code: u16,
    message: String,
}

impl FtpReply {
    pub fn new<M: Into<String>>(code: u16, message: M) -> Self {
        FtpReply {
            code,
            message: message.into(),
        }
    }

    #[inline]
    pub fn code(&self) -> u16 {
        self.code
    }

    /// The reply text with the status prefixes and line endings removed.
    /// Lines of multi-line replies are joined with `\n`.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn is_positive_preliminary(&self) -> bool {
        (100..200).contains(&self.code)
    }

    #[inline]
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    #[inline]
    pub fn is_positive_intermediate(&self) -> bool {
        (300..400).contains(&self.code)
    }

    #[inline]
    pub fn is_transient_negative(&self) -> bool {
        (400..500).contains(&self.code)
    }

    #[inline]
    pub fn is_permanent_negative(&self) -> bool {
        (500..600).contains(&self.code)
    }

    /// Decode the `(h1,h2,h3,h4,p1,p2)` tuple of a PASV / CPSV reply.
    pub fn parse_passive_address(&self) -> Option<FtpPassiveAddress> {
        FtpPassiveAddress::parse_reply_message(&self.message)
    }
}

impl fmt::Display for FtpReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.message)
    }
}

/// The data port announced by the server in passive mode.
///
/// Only the port is used to open the data connection, which always goes to
/// the host of the control connection. The announced ip is kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FtpPassiveAddress {
    announced_ip: Ipv4Addr,
    port: u16,
}

impl FtpPassiveAddress {
    #[inline]
    pub fn announced_ip(&self) -> Ipv4Addr {
        self.announced_ip
    }

    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }

    pub(crate) fn parse_reply_message(msg: &str) -> Option<Self> {
        let p_start = memchr::memchr(b'(', msg.as_bytes())?;
        let p_end = memchr::memchr(b')', &msg.as_bytes()[p_start..])? + p_start;

        let a: Vec<&str> = msg[p_start + 1..p_end].split(',').collect();
        if a.len() != 6 {
            return None;
        }

        let mut n = [0u8; 6];
        for (v, s) in n.iter_mut().zip(a) {
            *v = u8::from_str(s.trim()).ok()?;
        }

        Some(FtpPassiveAddress {
            announced_ip: Ipv4Addr::new(n[0], n[1], n[2], n[3]),
            port: ((n[4] as u16) << 8) + (n[5] as u16),
        })
    }
}

impl fmt::Display for FtpPassiveAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.announced_ip, self.port)
    }
}
