/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod data;
pub(crate) use data::FtpDataTransfer;

mod output;
pub use output::{FtpTransferOutput, FtpTransferReply, UPLOAD_ACK_MARKER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FtpTransferType {
    Ascii,
    Image,
}
