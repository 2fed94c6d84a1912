// SPDX-License-Identifier: Apache-2.0

use crate::{buffer::Buffer, ErrorContext, ErrorKind, TrawlError};

/// Ports, sequence, acknowledgment and the offset/flags word.
pub const TCP_FIXED_PREFIX_LEN: usize = 14;
pub const TCP_MIN_HEADER_LEN: usize = 20;
pub const TCP_MAX_HEADER_LEN: usize = 60;

const TCP_FLAG_URG: u16 = 1 << 5;
const TCP_FLAG_ACK: u16 = 1 << 4;
const TCP_FLAG_PSH: u16 = 1 << 3;
const TCP_FLAG_RST: u16 = 1 << 2;
const TCP_FLAG_SYN: u16 = 1 << 1;
const TCP_FLAG_FIN: u16 = 1;

/// Control bits held in the low 6 bits of the offset/flags word.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct TcpFlags {
    pub urg: bool,
    pub ack: bool,
    pub psh: bool,
    pub rst: bool,
    pub syn: bool,
    pub fin: bool,
}

impl TcpFlags {
    pub fn from_offset_flags(offset_flags: u16) -> Self {
        Self {
            urg: offset_flags & TCP_FLAG_URG > 0,
            ack: offset_flags & TCP_FLAG_ACK > 0,
            psh: offset_flags & TCP_FLAG_PSH > 0,
            rst: offset_flags & TCP_FLAG_RST > 0,
            syn: offset_flags & TCP_FLAG_SYN > 0,
            fin: offset_flags & TCP_FLAG_FIN > 0,
        }
    }
}

impl std::fmt::Display for TcpFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "URG: {}, ACK: {}, PSH: {}, RST: {}, SYN: {}, FIN: {}",
            u8::from(self.urg),
            u8::from(self.ack),
            u8::from(self.psh),
            u8::from(self.rst),
            u8::from(self.syn),
            u8::from(self.fin),
        )
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TcpHeader {
    pub source_port: u16,
    pub destination_port: u16,
    pub sequence_number: u32,
    pub acknowledgment_number: u32,
    /// Top 4 bits of the offset/flags word multiplied by 4.
    pub data_offset: usize,
    pub flags: TcpFlags,
    pub window_size: u16,
    pub checksum: u16,
    pub urgent_pointer: u16,
}

impl TcpHeader {
    /// Decode the TCP header. The returned payload starts at the declared
    /// data offset, so TCP options are skipped.
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8]), TrawlError> {
        let mut buf = Buffer::new(data);
        let source_port =
            buf.get_u16_be().context("Invalid TCP source port")?;
        let destination_port =
            buf.get_u16_be().context("Invalid TCP destination port")?;
        let sequence_number =
            buf.get_u32_be().context("Invalid TCP sequence number")?;
        let acknowledgment_number = buf
            .get_u32_be()
            .context("Invalid TCP acknowledgment number")?;
        let offset_flags =
            buf.get_u16_be().context("Invalid TCP offset and flags")?;

        let data_offset = usize::from(offset_flags >> 12) * 4;
        if data_offset < TCP_MIN_HEADER_LEN {
            return Err(TrawlError::new(
                ErrorKind::MalformedField,
                format!(
                    "TCP data offset {data_offset} is smaller than \
                     {TCP_MIN_HEADER_LEN}"
                ),
            ));
        }
        if data_offset > data.len() {
            return Err(TrawlError::new(
                ErrorKind::Truncated,
                format!(
                    "TCP data offset {data_offset} exceeds the {} bytes \
                     available",
                    data.len()
                ),
            ));
        }

        let window_size = buf.get_u16_be().context("Invalid TCP window")?;
        let checksum = buf.get_u16_be().context("Invalid TCP checksum")?;
        let urgent_pointer =
            buf.get_u16_be().context("Invalid TCP urgent pointer")?;
        buf.skip(data_offset - TCP_MIN_HEADER_LEN)
            .context("Invalid TCP options")?;

        let header = Self {
            source_port,
            destination_port,
            sequence_number,
            acknowledgment_number,
            data_offset,
            flags: TcpFlags::from_offset_flags(offset_flags),
            window_size,
            checksum,
            urgent_pointer,
        };
        log::trace!("Parsed TCP header {header:?}");
        Ok((header, buf.remains()))
    }
}
