/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub(crate) trait LimitedBufReadExt: AsyncBufRead + Unpin {
    /// Read into `buf` until `delimiter` is found or `max_len` bytes are read.
    ///
    /// Returns whether the delimiter is found and the number of bytes read.
    /// `(false, 0)` means eof.
    async fn limited_read_until(
        &mut self,
        delimiter: u8,
        max_len: usize,
        buf: &mut Vec<u8>,
    ) -> io::Result<(bool, usize)> {
        let mut total = 0;
        loop {
            let available = self.fill_buf().await?;
            if available.is_empty() {
                return Ok((false, total));
            }

            let to_search = &available[..available.len().min(max_len - total)];
            if let Some(i) = memchr::memchr(delimiter, to_search) {
                buf.extend_from_slice(&to_search[..=i]);
                self.consume(i + 1);
                return Ok((true, total + i + 1));
            }

            let nr = to_search.len();
            buf.extend_from_slice(to_search);
            self.consume(nr);
            total += nr;
            if total >= max_len {
                return Ok((false, total));
            }
        }
    }
}

impl<R: AsyncBufRead + Unpin + ?Sized> LimitedBufReadExt for R {}
