/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

pub const FTP_DEFAULT_PORT: u16 = 21;

/// Address of a ftp server, or of one of its passive data ports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FtpServerAddr {
    host: String,
    port: u16,
}

impl FtpServerAddr {
    pub fn new<H: Into<String>>(host: H, port: u16) -> Self {
        FtpServerAddr {
            host: host.into(),
            port,
        }
    }

    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The same host at another port.
    pub fn with_port(&self, port: u16) -> Self {
        FtpServerAddr {
            host: self.host.clone(),
            port,
        }
    }

    pub fn ip(&self) -> Option<IpAddr> {
        IpAddr::from_str(&self.host).ok()
    }
}

impl fmt::Display for FtpServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ip() {
            Some(IpAddr::V6(ip6)) => write!(f, "[{ip6}]:{}", self.port),
            _ => write!(f, "{}:{}", self.host, self.port),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidServerAddr;

impl fmt::Display for InvalidServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid ftp server address")
    }
}

impl std::error::Error for InvalidServerAddr {}

impl FromStr for FtpServerAddr {
    type Err = InvalidServerAddr;

    /// Accepts `host`, `host:port`, `[v6]` and `[v6]:port`.
    /// The standard ftp port is used if no port is given.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidServerAddr);
        }

        if let Some(left) = s.strip_prefix('[') {
            let Some((ip6, tail)) = left.split_once(']') else {
                return Err(InvalidServerAddr);
            };
            let ip6 = Ipv6Addr::from_str(ip6).map_err(|_| InvalidServerAddr)?;
            let port = match tail {
                "" => FTP_DEFAULT_PORT,
                _ => {
                    let p = tail.strip_prefix(':').ok_or(InvalidServerAddr)?;
                    u16::from_str(p).map_err(|_| InvalidServerAddr)?
                }
            };
            return Ok(FtpServerAddr::new(ip6.to_string(), port));
        }

        if let Ok(ip6) = Ipv6Addr::from_str(s) {
            return Ok(FtpServerAddr::new(ip6.to_string(), FTP_DEFAULT_PORT));
        }

        match s.rsplit_once(':') {
            Some((host, port)) => {
                if host.is_empty() {
                    return Err(InvalidServerAddr);
                }
                let port = u16::from_str(port).map_err(|_| InvalidServerAddr)?;
                Ok(FtpServerAddr::new(host, port))
            }
            None => Ok(FtpServerAddr::new(s, FTP_DEFAULT_PORT)),
        }
    }
}
