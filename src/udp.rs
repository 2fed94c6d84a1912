// SPDX-License-Identifier: Apache-2.0

use crate::{buffer::Buffer, ErrorContext, TrawlError};

pub const UDP_HEADER_LEN: usize = 8;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct UdpHeader {
    pub source_port: u16,
    pub destination_port: u16,
    /// Declared datagram length including this 8 bytes header.
    pub length: u16,
    pub checksum: u16,
}

impl UdpHeader {
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8]), TrawlError> {
        let mut buf = Buffer::new(data);
        let header = Self {
            source_port: buf.get_u16_be().context("Invalid UDP source port")?,
            destination_port: buf
                .get_u16_be()
                .context("Invalid UDP destination port")?,
            length: buf.get_u16_be().context("Invalid UDP length")?,
            checksum: buf.get_u16_be().context("Invalid UDP checksum")?,
        };
        Ok((header, buf.remains()))
    }
}
