/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio_rustls::client::TlsStream;

/// The control connection, either still plain or upgraded by `AUTH TLS`.
pub(crate) enum FtpControlStream<T> {
    Plain(T),
    Tls(Box<TlsStream<T>>),
}

impl<T> FtpControlStream<T> {
    pub(crate) fn is_tls(&self) -> bool {
        matches!(self, FtpControlStream::Tls(_))
    }
}

impl<T> AsyncRead for FtpControlStream<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            FtpControlStream::Plain(s) => Pin::new(s).poll_read(cx, buf),
            FtpControlStream::Tls(s) => Pin::new(s.as_mut()).poll_read(cx, buf),
        }
    }
}

impl<T> AsyncWrite for FtpControlStream<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            FtpControlStream::Plain(s) => Pin::new(s).poll_write(cx, buf),
            FtpControlStream::Tls(s) => Pin::new(s.as_mut()).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            FtpControlStream::Plain(s) => Pin::new(s).poll_flush(cx),
            FtpControlStream::Tls(s) => Pin::new(s.as_mut()).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            FtpControlStream::Plain(s) => Pin::new(s).poll_shutdown(cx),
            FtpControlStream::Tls(s) => Pin::new(s.as_mut()).poll_shutdown(cx),
        }
    }
}
