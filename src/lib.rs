// SPDX-License-Identifier: Apache-2.0

mod buffer;
mod capture;
mod config;
mod decode;
mod error;
mod eth;
mod icmp;
mod ipv4;
mod mac;
mod payload;
mod promiscuous;
mod report;
mod socket;
mod tcp;
mod udp;

#[cfg(test)]
mod integ_tests;

pub use crate::capture::{capture, CaptureSummary, FrameSink, TextSink};
pub use crate::config::CaptureConfig;
pub use crate::decode::decode_frame;
pub use crate::error::{ErrorKind, TrawlError};
pub use crate::eth::{
    EthernetHeader, ETHERTYPE_ARP, ETHERTYPE_IPV4, ETHERTYPE_IPV6,
    ETHERTYPE_VLAN, ETH_HEADER_LEN,
};
pub use crate::icmp::{IcmpHeader, ICMP_HEADER_LEN};
pub use crate::ipv4::{
    Ipv4Header, IPPROTO_ICMP, IPPROTO_TCP, IPPROTO_UDP, IPV4_MAX_HEADER_LEN,
    IPV4_MIN_HEADER_LEN,
};
pub use crate::mac::{MacAddress, ETH_ALEN};
pub use crate::payload::{PayloadFormatter, PayloadLines, DEFAULT_LINE_WIDTH};
pub use crate::report::{
    render_report, FrameReport, Layer, LayerIssue, ReportDisplay,
    TransportHeader,
};
pub use crate::socket::{FrameSource, RawSocket};
pub use crate::tcp::{
    TcpFlags, TcpHeader, TCP_FIXED_PREFIX_LEN, TCP_MAX_HEADER_LEN,
    TCP_MIN_HEADER_LEN,
};
pub use crate::udp::{UdpHeader, UDP_HEADER_LEN};

pub(crate) use crate::error::ErrorContext;
