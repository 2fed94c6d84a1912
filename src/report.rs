// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write;

use crate::{
    eth::ethertype_name, ipv4::ip_protocol_name, EthernetHeader, IcmpHeader,
    Ipv4Header, PayloadFormatter, TcpHeader, TrawlError, UdpHeader,
    DEFAULT_LINE_WIDTH,
};

#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
pub enum Layer {
    Ethernet,
    Ipv4,
    Icmp,
    Tcp,
    Udp,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ethernet => write!(f, "Ethernet"),
            Self::Ipv4 => write!(f, "IPv4"),
            Self::Icmp => write!(f, "ICMP"),
            Self::Tcp => write!(f, "TCP"),
            Self::Udp => write!(f, "UDP"),
        }
    }
}

/// An error tagged with the layer it was raised at.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LayerIssue {
    pub layer: Layer,
    pub error: TrawlError,
}

impl LayerIssue {
    pub fn new(layer: Layer, error: TrawlError) -> Self {
        Self { layer, error }
    }
}

impl std::fmt::Display for LayerIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.layer, self.error)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TransportHeader {
    Icmp(IcmpHeader),
    Tcp(TcpHeader),
    Udp(UdpHeader),
}

impl TransportHeader {
    pub fn layer(&self) -> Layer {
        match self {
            Self::Icmp(_) => Layer::Icmp,
            Self::Tcp(_) => Layer::Tcp,
            Self::Udp(_) => Layer::Udp,
        }
    }
}

/// Everything decoded from one captured frame.
///
/// `ipv4` is only set when `ethernet` is, and `transport` only when `ipv4`
/// is. `payload` is the residual bytes at whatever depth decoding stopped:
/// after the deepest decoded header, or the bytes the failing layer was
/// handed. The report borrows the captured frame.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FrameReport<'a> {
    pub frame_len: usize,
    pub ethernet: Option<EthernetHeader>,
    pub ipv4: Option<Ipv4Header>,
    pub transport: Option<TransportHeader>,
    pub payload: &'a [u8],
    /// Anomalies that did not stop decoding.
    pub warnings: Vec<LayerIssue>,
    /// The layer that failed to decode, if any.
    pub error: Option<LayerIssue>,
}

impl<'a> FrameReport<'a> {
    pub(crate) fn new(frame: &'a [u8]) -> Self {
        Self {
            frame_len: frame.len(),
            ethernet: None,
            ipv4: None,
            transport: None,
            payload: frame,
            warnings: Vec::new(),
            error: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    pub fn deepest_layer(&self) -> Option<Layer> {
        if let Some(t) = self.transport.as_ref() {
            Some(t.layer())
        } else if self.ipv4.is_some() {
            Some(Layer::Ipv4)
        } else if self.ethernet.is_some() {
            Some(Layer::Ethernet)
        } else {
            None
        }
    }

    pub fn tcp(&self) -> Option<&TcpHeader> {
        match self.transport.as_ref() {
            Some(TransportHeader::Tcp(h)) => Some(h),
            _ => None,
        }
    }

    pub fn udp(&self) -> Option<&UdpHeader> {
        match self.transport.as_ref() {
            Some(TransportHeader::Udp(h)) => Some(h),
            _ => None,
        }
    }

    pub fn icmp(&self) -> Option<&IcmpHeader> {
        match self.transport.as_ref() {
            Some(TransportHeader::Icmp(h)) => Some(h),
            _ => None,
        }
    }

    /// Human readable rendering with payload lines wrapped at `width`.
    pub fn display_with_width(&self, width: usize) -> ReportDisplay<'_, 'a> {
        ReportDisplay {
            report: self,
            width,
        }
    }
}

impl std::fmt::Display for FrameReport<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(
            &self.display_with_width(DEFAULT_LINE_WIDTH),
            f,
        )
    }
}

pub struct ReportDisplay<'r, 'a> {
    report: &'r FrameReport<'a>,
    width: usize,
}

fn with_name(value: String, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{value} ({name})"),
        None => value,
    }
}

impl std::fmt::Display for ReportDisplay<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let report = self.report;
        writeln!(f, "Ethernet Frame: {} bytes", report.frame_len)?;
        if let Some(eth) = report.ethernet.as_ref() {
            writeln!(
                f,
                "\tDestination: {}, Source: {}, Protocol: {}",
                eth.destination,
                eth.source,
                with_name(
                    format!("{:#06x}", eth.ether_type),
                    ethertype_name(eth.ether_type)
                ),
            )?;
        }
        if let Some(ip) = report.ipv4.as_ref() {
            writeln!(f, "\tIPv4 Packet:")?;
            writeln!(
                f,
                "\t\tVersion: {}, Header Length: {}, TTL: {}",
                ip.version, ip.header_length, ip.time_to_live
            )?;
            writeln!(
                f,
                "\t\tProtocol: {}, Source: {}, Destination: {}",
                with_name(
                    ip.protocol.to_string(),
                    ip_protocol_name(ip.protocol)
                ),
                ip.source,
                ip.destination
            )?;
        }
        match report.transport.as_ref() {
            Some(TransportHeader::Icmp(icmp)) => {
                writeln!(f, "\tICMP Packet:")?;
                writeln!(
                    f,
                    "\t\tType: {}, Code: {}, Checksum: {}",
                    icmp.icmp_type, icmp.code, icmp.checksum
                )?;
            }
            Some(TransportHeader::Tcp(tcp)) => {
                writeln!(f, "\tTCP Segment:")?;
                writeln!(
                    f,
                    "\t\tSource Port: {}, Destination Port: {}",
                    tcp.source_port, tcp.destination_port
                )?;
                writeln!(
                    f,
                    "\t\tSequence: {}, Acknowledgment: {}",
                    tcp.sequence_number, tcp.acknowledgment_number
                )?;
                writeln!(f, "\t\tFlags:")?;
                writeln!(f, "\t\t\t{}", tcp.flags)?;
            }
            Some(TransportHeader::Udp(udp)) => {
                writeln!(f, "\tUDP Segment:")?;
                writeln!(
                    f,
                    "\t\tSource Port: {}, Destination Port: {}, Length: {}",
                    udp.source_port, udp.destination_port, udp.length
                )?;
            }
            None => (),
        }
        if !report.payload.is_empty() {
            let (title, prefix) = if report.transport.is_some() {
                ("\t\tData:", "\t\t\t")
            } else {
                ("\tData:", "\t\t")
            };
            writeln!(f, "{title}")?;
            let payload = PayloadFormatter::new(prefix, report.payload)
                .with_width(self.width);
            for line in payload.lines() {
                writeln!(f, "{line}")?;
            }
        }
        for warning in report.warnings.as_slice() {
            writeln!(f, "\tWarning: {warning}")?;
        }
        if let Some(error) = report.error.as_ref() {
            writeln!(f, "\tError: {error}")?;
        }
        Ok(())
    }
}

/// Render `report` into a `String`, wrapping payload at `width`.
pub fn render_report(report: &FrameReport<'_>, width: usize) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write!(out, "{}", report.display_with_width(width));
    out
}
