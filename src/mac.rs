// SPDX-License-Identifier: Apache-2.0

use crate::{ErrorKind, TrawlError};

pub const ETH_ALEN: usize = libc::ETH_ALEN as usize;

/// Six raw bytes of a link layer address, rendered as `AA:BB:CC:DD:EE:FF`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub struct MacAddress([u8; ETH_ALEN]);

impl MacAddress {
    pub const BROADCAST: Self = Self([u8::MAX; ETH_ALEN]);

    pub const fn new(octets: [u8; ETH_ALEN]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; ETH_ALEN] {
        self.0
    }
}

impl From<[u8; ETH_ALEN]> for MacAddress {
    fn from(octets: [u8; ETH_ALEN]) -> Self {
        Self(octets)
    }
}

impl std::fmt::Display for MacAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let o = &self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl std::str::FromStr for MacAddress {
    type Err = TrawlError;

    fn from_str(mac: &str) -> Result<Self, TrawlError> {
        let invalid = || {
            TrawlError::new(
                ErrorKind::InvalidArgument,
                format!(
                    "Invalid MAC address {mac}, expecting format \
                     01:02:2A:2C:F7:04"
                ),
            )
        };
        let mut octets = [0u8; ETH_ALEN];
        let mut items = mac.split(':');
        for octet in octets.iter_mut() {
            let item = items.next().ok_or_else(invalid)?;
            if item.len() != 2 || !item.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(item, 16).map_err(|_| invalid())?;
        }
        if items.next().is_some() {
            return Err(invalid());
        }
        Ok(Self(octets))
    }
}
