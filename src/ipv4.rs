// SPDX-License-Identifier: Apache-2.0

use std::net::Ipv4Addr;

use crate::{buffer::Buffer, ErrorContext, ErrorKind, TrawlError};

pub const IPV4_MIN_HEADER_LEN: usize = 20;
pub const IPV4_MAX_HEADER_LEN: usize = 60;

pub const IPPROTO_ICMP: u8 = 1;
pub const IPPROTO_TCP: u8 = 6;
pub const IPPROTO_UDP: u8 = 17;

pub(crate) fn ip_protocol_name(protocol: u8) -> Option<&'static str> {
    match protocol {
        IPPROTO_ICMP => Some("ICMP"),
        IPPROTO_TCP => Some("TCP"),
        IPPROTO_UDP => Some("UDP"),
        _ => None,
    }
}

// RFC 791, flags are the top 3 bits of the 16 bits flags/fragment word
const FRAGMENT_OFFSET_MASK: u16 = 0x1fff;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Ipv4Header {
    /// High nibble of the first byte. Expected to be 4, kept as received.
    pub version: u8,
    /// IHL field multiplied by 4, within [20, 60].
    pub header_length: usize,
    pub type_of_service: u8,
    pub total_length: u16,
    pub identification: u16,
    /// Reserved, DF and MF bits in the low 3 bits.
    pub flags: u8,
    pub fragment_offset: u16,
    pub time_to_live: u8,
    pub protocol: u8,
    pub header_checksum: u16,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
}

impl Ipv4Header {
    /// Decode the IPv4 header and return the bytes following the declared
    /// header length. IP options are skipped.
    ///
    /// An unexpected version is not an error here, use [Self::validate] to
    /// find out about it.
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8]), TrawlError> {
        let mut buf = Buffer::new(data);
        if buf.remain_len() < IPV4_MIN_HEADER_LEN {
            return Err(TrawlError::new(
                ErrorKind::Truncated,
                format!(
                    "IPv4 header requires {IPV4_MIN_HEADER_LEN} bytes, got {}",
                    buf.remain_len()
                ),
            ));
        }
        let version_ihl = buf.get_u8().context("Invalid IPv4 version/IHL")?;
        let type_of_service =
            buf.get_u8().context("Invalid IPv4 type of service")?;
        let total_length =
            buf.get_u16_be().context("Invalid IPv4 total length")?;
        let identification =
            buf.get_u16_be().context("Invalid IPv4 identification")?;
        let flags_fragment =
            buf.get_u16_be().context("Invalid IPv4 flags")?;
        let time_to_live = buf.get_u8().context("Invalid IPv4 TTL")?;
        let protocol = buf.get_u8().context("Invalid IPv4 protocol")?;
        let header_checksum =
            buf.get_u16_be().context("Invalid IPv4 header checksum")?;
        let source = buf.get_ipv4().context("Invalid IPv4 source address")?;
        let destination =
            buf.get_ipv4().context("Invalid IPv4 destination address")?;

        let header_length = usize::from(version_ihl & 0x0f) * 4;
        if header_length < IPV4_MIN_HEADER_LEN {
            return Err(TrawlError::new(
                ErrorKind::MalformedField,
                format!(
                    "IPv4 header length {header_length} is smaller than \
                     {IPV4_MIN_HEADER_LEN}"
                ),
            ));
        }
        if header_length > data.len() {
            return Err(TrawlError::new(
                ErrorKind::Truncated,
                format!(
                    "IPv4 header length {header_length} exceeds the {} \
                     bytes available",
                    data.len()
                ),
            ));
        }
        buf.skip(header_length - IPV4_MIN_HEADER_LEN)
            .context("Invalid IPv4 options")?;

        let header = Self {
            version: version_ihl >> 4,
            header_length,
            type_of_service,
            total_length,
            identification,
            flags: (flags_fragment >> 13) as u8,
            fragment_offset: flags_fragment & FRAGMENT_OFFSET_MASK,
            time_to_live,
            protocol,
            header_checksum,
            source,
            destination,
        };
        log::trace!("Parsed IPv4 header {header:?}");
        Ok((header, buf.remains()))
    }

    /// Report anomalies that do not stop decoding.
    pub fn validate(&self) -> Result<(), TrawlError> {
        if self.version != 4 {
            return Err(TrawlError::new(
                ErrorKind::MalformedField,
                format!("IPv4 header carries version {}", self.version),
            ));
        }
        Ok(())
    }

    pub fn options_len(&self) -> usize {
        self.header_length - IPV4_MIN_HEADER_LEN
    }
}
