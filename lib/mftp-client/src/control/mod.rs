/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use rustls_pki_types::ServerName;
use tokio::io::{AsyncRead, AsyncWrite, BufStream};
use tokio_rustls::TlsConnector;

use crate::FtpControlConfig;
use crate::stream::FtpControlStream;

mod response;

mod command;
pub(crate) use command::{FtpCommand, command_line};

pub(crate) struct FtpControlChannel<T>
where
    T: AsyncRead + AsyncWrite,
{
    config: FtpControlConfig,
    stream: BufStream<FtpControlStream<T>>,
}

impl<T> FtpControlChannel<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(stream: T, config: FtpControlConfig) -> Self {
        FtpControlChannel {
            config,
            stream: BufStream::new(FtpControlStream::Plain(stream)),
        }
    }

    #[inline]
    pub(crate) fn is_tls(&self) -> bool {
        self.stream.get_ref().is_tls()
    }

    /// Run the tls handshake over the current plain connection.
    ///
    /// The channel is consumed as nothing can be sent over it if the
    /// handshake fails half way.
    pub(crate) async fn into_tls(
        self,
        connector: TlsConnector,
        server_name: ServerName<'static>,
    ) -> io::Result<Self> {
        let config = self.config;
        match self.stream.into_inner() {
            FtpControlStream::Plain(stream) => {
                let tls_stream = connector.connect(server_name, stream).await?;
                Ok(FtpControlChannel {
                    config,
                    stream: BufStream::new(FtpControlStream::Tls(Box::new(tls_stream))),
                })
            }
            FtpControlStream::Tls(_) => Err(io::Error::other("already in tls mode")),
        }
    }
}
