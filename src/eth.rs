// SPDX-License-Identifier: Apache-2.0

use crate::{buffer::Buffer, ErrorContext, MacAddress, TrawlError};

pub const ETH_HEADER_LEN: usize = 14;

pub const ETHERTYPE_IPV4: u16 = 0x0800;
pub const ETHERTYPE_ARP: u16 = 0x0806;
pub const ETHERTYPE_VLAN: u16 = 0x8100;
pub const ETHERTYPE_IPV6: u16 = 0x86dd;

pub(crate) fn ethertype_name(ethertype: u16) -> Option<&'static str> {
    match ethertype {
        ETHERTYPE_IPV4 => Some("IPv4"),
        ETHERTYPE_ARP => Some("ARP"),
        ETHERTYPE_VLAN => Some("VLAN"),
        ETHERTYPE_IPV6 => Some("IPv6"),
        _ => None,
    }
}

/// Ethernet II header: destination, source and ethertype in host order.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct EthernetHeader {
    pub destination: MacAddress,
    pub source: MacAddress,
    pub ether_type: u16,
}

impl EthernetHeader {
    /// Decode the 14 bytes link header, returning it with the bytes after it.
    pub fn parse(frame: &[u8]) -> Result<(Self, &[u8]), TrawlError> {
        let mut buf = Buffer::new(frame);
        let header = Self {
            destination: buf
                .get_mac()
                .context("Invalid ethernet destination address")?,
            source: buf.get_mac().context("Invalid ethernet source address")?,
            ether_type: buf.get_u16_be().context("Invalid ethertype")?,
        };
        Ok((header, buf.remains()))
    }

    pub fn is_ipv4(&self) -> bool {
        self.ether_type == ETHERTYPE_IPV4
    }
}
