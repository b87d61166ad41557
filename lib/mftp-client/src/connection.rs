/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::error::Error;
use std::io;
use std::net::SocketAddr;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

use crate::FtpServerAddr;

#[async_trait]
pub trait FtpConnectionProvider<T: AsyncRead + AsyncWrite, E: Error> {
    async fn new_control_connection(&mut self, server: &FtpServerAddr) -> Result<T, E>;
    /// `data_addr` is the control connection host with the passive port.
    async fn new_data_connection(&mut self, data_addr: &FtpServerAddr) -> Result<T, E>;
}

/// Plain tcp connections.
///
/// Data connections go to the same ip the control connection was
/// established to, so a host name is resolved only once.
#[derive(Debug, Default)]
pub struct TcpConnectionProvider {
    remote_addr: Option<SocketAddr>,
}

impl TcpConnectionProvider {
    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.remote_addr
    }
}

#[async_trait]
impl FtpConnectionProvider<TcpStream, io::Error> for TcpConnectionProvider {
    async fn new_control_connection(&mut self, server: &FtpServerAddr) -> io::Result<TcpStream> {
        let mut err = io::Error::new(io::ErrorKind::AddrNotAvailable, "no addr resolved");
        for addr in tokio::net::lookup_host(server.to_string()).await? {
            match TcpStream::connect(addr).await {
                Ok(stream) => {
                    self.remote_addr = Some(addr);
                    return Ok(stream);
                }
                Err(e) => err = e,
            }
        }

        Err(err)
    }

    async fn new_data_connection(&mut self, data_addr: &FtpServerAddr) -> io::Result<TcpStream> {
        match self.remote_addr {
            Some(addr) => {
                let data_addr = SocketAddr::new(addr.ip(), data_addr.port());
                TcpStream::connect(data_addr).await
            }
            None => Err(io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                "no resolved server addr found",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn data_connection_uses_control_ip() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let control_port = listener.local_addr().unwrap().port();
        let data_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let data_port = data_listener.local_addr().unwrap().port();

        let mut provider = TcpConnectionProvider::default();
        let server = FtpServerAddr::new("127.0.0.1", control_port);
        let _control = provider.new_control_connection(&server).await.unwrap();
        let remote = provider.remote_addr().unwrap();
        assert_eq!(remote.port(), control_port);

        let data = provider
            .new_data_connection(&FtpServerAddr::new("ignored.invalid", data_port))
            .await
            .unwrap();
        assert_eq!(data.peer_addr().unwrap().port(), data_port);
    }

    #[tokio::test]
    async fn data_connection_without_control() {
        let mut provider = TcpConnectionProvider::default();
        let r = provider
            .new_data_connection(&FtpServerAddr::new("127.0.0.1", 21))
            .await;
        assert!(r.is_err());
    }
}
