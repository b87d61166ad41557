/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::error::Error;
use std::io;
use std::marker::PhantomData;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

use crate::control::{FtpCommand, FtpControlChannel};
use crate::debug::mask_command;
use crate::error::{FtpCommandError, FtpConnectError, FtpTlsError};
use crate::{
    FtpClientConfig, FtpConnectionProvider, FtpDiagnosticSink, FtpReply, FtpServerAddr,
    FtpTlsConfig, LogDiagnosticSink, TcpConnectionProvider, log_msg,
};

mod ops;
mod transfer;


/// One ftp conversation over one control connection.
///
/// Every command is a full round trip on `&mut self`, so a session can only
/// run one exchange at a time.
pub struct FtpSession<CP, T, E>
where
    CP: FtpConnectionProvider<T, E>,
    T: AsyncRead + AsyncWrite + Unpin,
    E: Error,
{
    server: FtpServerAddr,
    config: Arc<FtpClientConfig>,
    conn_provider: CP,
    control: Option<FtpControlChannel<T>>,
    username: Option<String>,
    last_reply: Option<FtpReply>,
    diagnostics: Option<Box<dyn FtpDiagnosticSink>>,
    _phantom: PhantomData<E>,
}

pub type FtpTcpSession = FtpSession<TcpConnectionProvider, TcpStream, io::Error>;

impl FtpSession<TcpConnectionProvider, TcpStream, io::Error> {
    pub async fn connect_tcp(
        server: FtpServerAddr,
        config: Arc<FtpClientConfig>,
    ) -> Result<Self, FtpConnectError<io::Error>> {
        FtpSession::connect(server, TcpConnectionProvider::default(), config).await
    }
}

impl<CP, T, E> FtpSession<CP, T, E>
where
    CP: FtpConnectionProvider<T, E>,
    T: AsyncRead + AsyncWrite + Unpin,
    E: Error,
{
    /// Open the control connection and wait for the greeting reply.
    ///
    /// The greeting code is recorded but not checked.
    pub async fn connect(
        server: FtpServerAddr,
        mut conn_provider: CP,
        config: Arc<FtpClientConfig>,
    ) -> Result<Self, FtpConnectError<E>> {
        let stream = match tokio::time::timeout(
            config.connect_timeout,
            conn_provider.new_control_connection(&server),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(FtpConnectError::ConnectIoError(e)),
            Err(_) => return Err(FtpConnectError::ConnectTimedOut),
        };

        let mut control = FtpControlChannel::new(stream, config.control.clone());
        let greeting =
            match tokio::time::timeout(config.greeting_timeout, control.read_reply()).await {
                Ok(Ok(reply)) => reply,
                Ok(Err(e)) => return Err(FtpConnectError::GreetingFailed(e)),
                Err(_) => return Err(FtpConnectError::GreetingTimedOut),
            };
        log_msg!(
            "connected to {} with greeting code {}",
            server,
            greeting.code()
        );

        let mut session = FtpSession {
            server,
            config,
            conn_provider,
            control: Some(control),
            username: None,
            last_reply: None,
            diagnostics: Some(Box::new(LogDiagnosticSink)),
            _phantom: PhantomData,
        };
        session.record(FtpCommand::GREETING.as_str(), &greeting);
        Ok(session)
    }

    #[inline]
    pub fn server(&self) -> &FtpServerAddr {
        &self.server
    }

    #[inline]
    pub fn config(&self) -> &FtpClientConfig {
        &self.config
    }

    #[inline]
    pub fn connection_provider(&self) -> &CP {
        &self.conn_provider
    }

    /// The user name accepted by the last successful login.
    #[inline]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    #[inline]
    pub fn last_reply(&self) -> Option<&FtpReply> {
        self.last_reply.as_ref()
    }

    pub fn last_code(&self) -> Option<u16> {
        self.last_reply.as_ref().map(|r| r.code())
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_reply.as_ref().map(|r| r.message())
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.control.is_none()
    }

    pub fn is_tls(&self) -> bool {
        self.control.as_ref().map(|c| c.is_tls()).unwrap_or(false)
    }

    /// Replace the diagnostic sink. `None` turns diagnostics off.
    pub fn set_diagnostic_sink(&mut self, sink: Option<Box<dyn FtpDiagnosticSink>>) {
        self.diagnostics = sink;
    }

    fn record(&mut self, cmd: &str, reply: &FtpReply) {
        if let Some(sink) = self.diagnostics.as_mut() {
            sink.on_reply(mask_command(cmd), reply);
        }
        self.last_reply = Some(reply.clone());
    }

    fn handle_reply(
        &mut self,
        cmd: &str,
        r: Result<FtpReply, FtpCommandError>,
    ) -> Result<FtpReply, FtpCommandError> {
        match r {
            Ok(reply) => {
                self.record(cmd, &reply);
                Ok(reply)
            }
            Err(e) => {
                if e.breaks_control_channel() {
                    log::warn!(
                        target: crate::FTP_DEBUG_LOG_TARGET,
                        "control connection to {} closed: {e}",
                        self.server
                    );
                    self.control = None;
                }
                Err(e)
            }
        }
    }

    /// Send one command line and read its reply.
    async fn exchange(
        &mut self,
        line: &str,
        stage: &'static str,
    ) -> Result<FtpReply, FtpCommandError> {
        let Some(control) = self.control.as_mut() else {
            return Err(FtpCommandError::NotConnected);
        };
        if let Some(sink) = self.diagnostics.as_mut() {
            sink.on_command(mask_command(line));
        }

        let r = match control.send_line(line).await {
            Ok(_) => control
                .timed_read_reply(stage)
                .await
                .map_err(FtpCommandError::RecvFailed),
            Err(e) => Err(e),
        };
        self.handle_reply(line, r)
    }

    /// Read one more reply for `cmd` without sending anything.
    async fn read_more(
        &mut self,
        cmd: &str,
        stage: &'static str,
    ) -> Result<FtpReply, FtpCommandError> {
        let Some(control) = self.control.as_mut() else {
            return Err(FtpCommandError::NotConnected);
        };
        let r = control
            .timed_read_reply(stage)
            .await
            .map_err(FtpCommandError::RecvFailed);
        self.handle_reply(cmd, r)
    }

    /// Send `text` as one command line and read exactly one reply.
    pub async fn send_command(&mut self, text: &str) -> Result<FtpReply, FtpCommandError> {
        self.exchange(text, "send command").await
    }

    /// Send `AUTH TLS` and switch the control connection to tls.
    ///
    /// If the server does not accept the command the session stays usable
    /// in plain text. If the handshake fails the session is closed.
    pub async fn upgrade_to_tls(&mut self, tls: &FtpTlsConfig) -> Result<FtpReply, FtpTlsError> {
        match self.control.as_ref() {
            Some(control) if control.is_tls() => return Err(FtpTlsError::AlreadyEncrypted),
            Some(_) => {}
            None => return Err(FtpCommandError::NotConnected.into()),
        }
        let Some(server_name) = tls.server_name(self.server.host()) else {
            return Err(FtpTlsError::InvalidServerName(
                self.server.host().to_string(),
            ));
        };

        let reply = self
            .exchange(FtpCommand::AUTH_TLS.as_str(), "auth tls")
            .await?;
        if !reply.is_positive_completion() {
            return Err(FtpTlsError::Rejected(reply));
        }

        let Some(control) = self.control.take() else {
            return Err(FtpCommandError::NotConnected.into());
        };
        match tokio::time::timeout(
            self.config.control.command_timeout,
            control.into_tls(tls.connector(), server_name),
        )
        .await
        {
            Ok(Ok(control)) => {
                self.control = Some(control);
                log_msg!("control connection to {} is now in tls mode", self.server);
                Ok(reply)
            }
            Ok(Err(e)) => {
                log::warn!(
                    target: crate::FTP_DEBUG_LOG_TARGET,
                    "tls handshake with {} failed: {e}",
                    self.server
                );
                Err(FtpTlsError::HandshakeFailed(e))
            }
            Err(_) => Err(FtpTlsError::HandshakeTimedOut),
        }
    }

    /// Send `USER` and then `PASS`, returning both replies unchecked.
    pub async fn login(
        &mut self,
        user: &str,
        password: &str,
    ) -> Result<(FtpReply, FtpReply), FtpCommandError> {
        let user_line = crate::control::command_line(FtpCommand::USER, Some(user));
        let user_reply = self.exchange(&user_line, "send username").await?;
        let pass_line = crate::control::command_line(FtpCommand::PASS, Some(password));
        let pass_reply = self.exchange(&pass_line, "send password").await?;

        if pass_reply.code() == 230 || user_reply.code() == 230 {
            self.username = Some(user.to_string());
        }
        Ok((user_reply, pass_reply))
    }

    /// Send `QUIT` and close the control connection.
    ///
    /// Returns `Ok(None)` if the session is already closed.
    pub async fn quit(&mut self) -> Result<Option<FtpReply>, FtpCommandError> {
        if self.control.is_none() {
            return Ok(None);
        }
        let r = self.exchange(FtpCommand::QUIT.as_str(), "send quit").await;
        self.close();
        r.map(Some)
    }

    /// Drop the control connection without sending `QUIT`.
    pub fn close(&mut self) {
        if self.control.take().is_some() {
            log_msg!("closed control connection to {}", self.server);
        }
    }
}
