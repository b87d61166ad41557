/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use tokio::io::{AsyncRead, AsyncWrite};

use super::FtpControlChannel;
use crate::FtpReply;
use crate::error::FtpRawResponseError;
use crate::io::LimitedBufReadExt;

macro_rules! char_to_u16 {
    ($c:expr) => {
        ($c - b'0') as u16
    };
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    while end > 0 && matches!(line[end - 1], b'\r' | b'\n') {
        end -= 1;
    }
    &line[..end]
}

fn line_to_str(line: &[u8]) -> Result<&str, FtpRawResponseError> {
    std::str::from_utf8(line).map_err(|_| FtpRawResponseError::LineIsNotUtf8)
}

/// Collects the lines of one reply.
///
/// Lines before the first one with a reply code are kept as text of the
/// same reply. The reply ends at the first `<code><SP>` line, or directly
/// at a single line reply.
pub(super) struct FtpReplyParser {
    code: Option<u16>,
    end_prefix: [u8; 4],
    lines: Vec<String>,
    max_lines: usize,
}

impl FtpReplyParser {
    pub(super) fn new(max_lines: usize) -> Self {
        FtpReplyParser {
            code: None,
            end_prefix: [0; 4],
            lines: Vec::new(),
            max_lines,
        }
    }

    fn push_line(&mut self, msg: &[u8]) -> Result<(), FtpRawResponseError> {
        if self.lines.len() >= self.max_lines {
            return Err(FtpRawResponseError::TooManyLines);
        }
        let msg = line_to_str(msg)?;
        // do not trim whitespace at beginning
        self.lines.push(msg.trim_end().to_string());
        Ok(())
    }

    /// Returns the code and separator if `line` starts with a reply code in
    /// 100..=599 followed by a space, a hyphen, or nothing.
    fn parse_code(line: &[u8]) -> Option<(u16, u8)> {
        if line.len() < 3 || !line[..3].iter().all(u8::is_ascii_digit) {
            return None;
        }
        let sep = match line.get(3) {
            None | Some(b' ') => b' ',
            Some(b'-') => b'-',
            Some(_) => return None,
        };
        let code = char_to_u16!(line[0]) * 100 + char_to_u16!(line[1]) * 10 + char_to_u16!(line[2]);
        if !(100..600).contains(&code) {
            return None;
        }
        Some((code, sep))
    }

    /// Feed one received line. Returns true if the reply is complete.
    pub(super) fn feed_line(&mut self, line: &[u8]) -> Result<bool, FtpRawResponseError> {
        let line = trim_line_end(line);

        if self.code.is_none() {
            return match Self::parse_code(line) {
                Some((code, sep)) => {
                    self.code = Some(code);
                    self.end_prefix = [line[0], line[1], line[2], b' '];
                    self.push_line(line.get(4..).unwrap_or_default())?;
                    Ok(sep == b' ')
                }
                None => {
                    // not a reply line yet, keep it as part of this reply
                    self.push_line(line)?;
                    Ok(false)
                }
            };
        }

        if line.starts_with(&self.end_prefix) || line == &self.end_prefix[..3] {
            self.push_line(line.get(4..).unwrap_or_default())?;
            return Ok(true);
        }

        let mut continue_prefix = self.end_prefix;
        continue_prefix[3] = b'-';
        if line.starts_with(&continue_prefix) {
            self.push_line(&line[4..])?;
        } else {
            self.push_line(line)?;
        }
        Ok(false)
    }

    pub(super) fn finish(self) -> Option<FtpReply> {
        let code = self.code?;
        Some(FtpReply::new(code, self.lines.join("\n")))
    }
}

impl<T> FtpControlChannel<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    async fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<(), FtpRawResponseError> {
        buf.clear();

        let (found, len) = self
            .stream
            .limited_read_until(b'\n', self.config.max_line_len, buf)
            .await
            .map_err(FtpRawResponseError::ReadFailed)?;

        #[cfg(feature = "log-raw-io")]
        crate::debug::log_rsp(&String::from_utf8_lossy(buf));

        if found {
            Ok(())
        } else if len >= self.config.max_line_len {
            Err(FtpRawResponseError::LineTooLong)
        } else {
            // eof, with or without a partial line
            Err(FtpRawResponseError::ConnectionClosed)
        }
    }

    /// Read until one complete reply is received.
    ///
    /// The number of lines and the length of each line are bounded by the
    /// control config, so a stream that never sends the end line fails with
    /// `TooManyLines` or `ConnectionClosed` instead of being read forever.
    pub(crate) async fn read_reply(&mut self) -> Result<FtpReply, FtpRawResponseError> {
        let mut parser = FtpReplyParser::new(self.config.max_multi_lines);
        let mut buf = Vec::<u8>::with_capacity(self.config.max_line_len);
        loop {
            self.read_line(&mut buf).await?;
            if parser.feed_line(&buf)? {
                return parser
                    .finish()
                    .ok_or(FtpRawResponseError::ConnectionClosed);
            }
        }
    }

    pub(crate) async fn timed_read_reply(
        &mut self,
        stage: &'static str,
    ) -> Result<FtpReply, FtpRawResponseError> {
        match tokio::time::timeout(self.config.command_timeout, self.read_reply()).await {
            Ok(r) => r,
            Err(_) => Err(FtpRawResponseError::ReadResponseTimedOut(stage)),
        }
    }
}
