// SPDX-License-Identifier: Apache-2.0

use crate::{
    ipv4::{IPPROTO_ICMP, IPPROTO_TCP, IPPROTO_UDP},
    EthernetHeader, FrameReport, IcmpHeader, Ipv4Header, Layer, LayerIssue,
    TcpHeader, TransportHeader, TrawlError, UdpHeader,
};

/// Decode one captured frame as far as possible.
///
/// Never fails: a layer that cannot be decoded is recorded in
/// [FrameReport::error] and the headers above it are kept.
pub fn decode_frame(frame: &[u8]) -> FrameReport<'_> {
    log::trace!("Decoding frame of {} bytes: {frame:?}", frame.len());
    let mut report = FrameReport::new(frame);
    if let Err(issue) = decode_layers(frame, &mut report) {
        log::debug!("Frame decoded partially: {issue}");
        report.error = Some(issue);
    }
    report
}

fn at_layer(layer: Layer) -> impl FnOnce(TrawlError) -> LayerIssue {
    move |error| LayerIssue::new(layer, error)
}

fn decode_layers<'a>(
    frame: &'a [u8],
    report: &mut FrameReport<'a>,
) -> Result<(), LayerIssue> {
    let (eth, rest) =
        EthernetHeader::parse(frame).map_err(at_layer(Layer::Ethernet))?;
    report.ethernet = Some(eth);
    report.payload = rest;
    if !eth.is_ipv4() {
        log::trace!(
            "Ethertype {:#06x} is not IPv4, keeping it as payload",
            eth.ether_type
        );
        return Ok(());
    }

    let (ip, rest) = Ipv4Header::parse(rest).map_err(at_layer(Layer::Ipv4))?;
    if let Err(e) = ip.validate() {
        log::warn!("Decoding anomalous IPv4 header: {e}");
        report.warnings.push(LayerIssue::new(Layer::Ipv4, e));
    }
    report.ipv4 = Some(ip);
    report.payload = rest;

    let (transport, rest) = match ip.protocol {
        IPPROTO_ICMP => IcmpHeader::parse(rest)
            .map(|(h, rest)| (TransportHeader::Icmp(h), rest))
            .map_err(at_layer(Layer::Icmp))?,
        IPPROTO_TCP => TcpHeader::parse(rest)
            .map(|(h, rest)| (TransportHeader::Tcp(h), rest))
            .map_err(at_layer(Layer::Tcp))?,
        IPPROTO_UDP => UdpHeader::parse(rest)
            .map(|(h, rest)| (TransportHeader::Udp(h), rest))
            .map_err(at_layer(Layer::Udp))?,
        protocol => {
            log::trace!(
                "IP protocol {protocol} is not decoded, keeping it as payload"
            );
            return Ok(());
        }
    };
    report.transport = Some(transport);
    report.payload = rest;
    Ok(())
}
