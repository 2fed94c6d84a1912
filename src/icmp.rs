// SPDX-License-Identifier: Apache-2.0

use crate::{buffer::Buffer, ErrorContext, TrawlError};

pub const ICMP_HEADER_LEN: usize = 4;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct IcmpHeader {
    pub icmp_type: u8,
    pub code: u8,
    pub checksum: u16,
}

impl IcmpHeader {
    /// Decode type, code and checksum. Everything after them, including the
    /// rest-of-header word, is returned as payload.
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8]), TrawlError> {
        let mut buf = Buffer::new(data);
        let header = Self {
            icmp_type: buf.get_u8().context("Invalid ICMP type")?,
            code: buf.get_u8().context("Invalid ICMP code")?,
            checksum: buf.get_u16_be().context("Invalid ICMP checksum")?,
        };
        Ok((header, buf.remains()))
    }
}
