// SPDX-License-Identifier: Apache-2.0

use std::net::Ipv4Addr;

use crate::{ErrorKind, MacAddress, TrawlError, ETH_ALEN};

/// Bounds checked read cursor over a captured frame.
///
/// Every decoder reads through this type only, so no decoder can touch bytes
/// outside of the frame it was handed. Slices returned borrow the original
/// frame instead of copying it.
#[derive(Debug, Clone)]
pub(crate) struct Buffer<'a> {
    index: usize,
    data: &'a [u8],
}

impl<'a> Buffer<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { index: 0, data }
    }

    pub(crate) fn remain_len(&self) -> usize {
        self.data.len().saturating_sub(self.index)
    }

    fn ensure(&self, len: usize) -> Result<(), TrawlError> {
        if self.remain_len() < len {
            Err(TrawlError::new(
                ErrorKind::Truncated,
                format!(
                    "need {len} bytes at offset {}, only {} remain",
                    self.index,
                    self.remain_len()
                ),
            ))
        } else {
            Ok(())
        }
    }

    /// Return the next `len` bytes and advance, or fail with
    /// [ErrorKind::Truncated] leaving the cursor untouched.
    pub(crate) fn get_bytes(
        &mut self,
        len: usize,
    ) -> Result<&'a [u8], TrawlError> {
        self.ensure(len)?;
        let ret = &self.data[self.index..self.index + len];
        self.index += len;
        Ok(ret)
    }

    pub(crate) fn skip(&mut self, len: usize) -> Result<(), TrawlError> {
        self.get_bytes(len).map(|_| ())
    }

    pub(crate) fn get_u8(&mut self) -> Result<u8, TrawlError> {
        Ok(self.get_bytes(1)?[0])
    }

    pub(crate) fn get_u16_be(&mut self) -> Result<u16, TrawlError> {
        let raw = self.get_bytes(2)?;
        Ok(u16::from_be_bytes([raw[0], raw[1]]))
    }

    pub(crate) fn get_u32_be(&mut self) -> Result<u32, TrawlError> {
        let raw = self.get_bytes(4)?;
        Ok(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    pub(crate) fn get_ipv4(&mut self) -> Result<Ipv4Addr, TrawlError> {
        let raw = self.get_bytes(4)?;
        Ok(Ipv4Addr::new(raw[0], raw[1], raw[2], raw[3]))
    }

    pub(crate) fn get_mac(&mut self) -> Result<MacAddress, TrawlError> {
        let raw = self.get_bytes(ETH_ALEN)?;
        let mut octets = [0u8; ETH_ALEN];
        octets.copy_from_slice(raw);
        Ok(MacAddress::new(octets))
    }

    /// All unconsumed bytes, without advancing.
    pub(crate) fn remains(&self) -> &'a [u8] {
        if self.index > self.data.len() {
            &[]
        } else {
            &self.data[self.index..]
        }
    }
}
