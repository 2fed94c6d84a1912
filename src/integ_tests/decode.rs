// SPDX-License-Identifier: Apache-2.0

use std::net::Ipv4Addr;

use super::frames::{
    icmp_echo_frame, tcp_syn_frame, udp_frame, DST_IP, DST_MAC, SRC_IP,
    SRC_MAC, TTL,
};
use crate::{
    decode_frame, render_report, ErrorKind, Layer, MacAddress, TcpFlags,
    ETHERTYPE_IPV4, ETH_HEADER_LEN, IPPROTO_TCP, IPV4_MIN_HEADER_LEN,
    TCP_MIN_HEADER_LEN,
};

const PAYLOAD: &[u8] = &[0x01, 0x02, 0x03, 0x04, 0x05];

#[test]
fn decode_tcp_syn_end_to_end() {
    let frame = tcp_syn_frame(PAYLOAD);
    assert_eq!(frame.len(), 14 + 20 + 20 + 5);

    let report = decode_frame(&frame);
    assert!(report.is_complete());
    assert!(report.warnings.is_empty());

    let eth = report.ethernet.unwrap();
    assert_eq!(eth.source, MacAddress::new(SRC_MAC));
    assert_eq!(eth.destination, MacAddress::new(DST_MAC));
    assert_eq!(eth.ether_type, ETHERTYPE_IPV4);

    let ip = report.ipv4.unwrap();
    assert_eq!(ip.version, 4);
    assert_eq!(ip.header_length, 20);
    assert_eq!(ip.time_to_live, TTL);
    assert_eq!(ip.protocol, IPPROTO_TCP);
    assert_eq!(ip.source, Ipv4Addr::from(SRC_IP));
    assert_eq!(ip.destination, Ipv4Addr::from(DST_IP));
    assert_eq!(usize::from(ip.total_length), 20 + 20 + 5);

    let tcp = report.tcp().unwrap();
    assert_eq!(tcp.source_port, 443);
    assert_eq!(tcp.destination_port, 51000);
    assert_eq!(tcp.sequence_number, 0x1000_0001);
    assert_eq!(tcp.data_offset, 20);
    assert_eq!(tcp.window_size, 64240);
    assert_eq!(
        tcp.flags,
        TcpFlags {
            syn: true,
            ..Default::default()
        }
    );

    assert_eq!(report.payload, PAYLOAD);
    assert_eq!(report.deepest_layer(), Some(Layer::Tcp));
}

#[test]
fn decode_udp_datagram() {
    for k in [0usize, 1, 7, 8, 100] {
        let payload: Vec<u8> = (0..k).map(|i| i as u8).collect();
        let frame = udp_frame(&payload);
        let report = decode_frame(&frame);
        assert!(report.is_complete());
        let udp = report.udp().unwrap();
        assert_eq!(udp.source_port, 51000);
        assert_eq!(udp.destination_port, 53);
        assert_eq!(usize::from(udp.length), 8 + k);
        assert_eq!(report.payload.len(), k);
        assert_eq!(report.payload, payload.as_slice());
    }
}

#[test]
fn decode_icmp_echo_request() {
    let frame = icmp_echo_frame(b"ping");
    let report = decode_frame(&frame);
    assert!(report.is_complete());
    let icmp = report.icmp().unwrap();
    assert_eq!(icmp.icmp_type, 8);
    assert_eq!(icmp.code, 0);
    // identifier and sequence stay in the payload
    assert_eq!(report.payload, b"\x12\x34\x00\x07ping");
}

#[test]
fn truncation_fails_only_the_layer_cut_short() {
    let frame = tcp_syn_frame(PAYLOAD);
    let ip_start = ETH_HEADER_LEN;
    let tcp_start = ip_start + IPV4_MIN_HEADER_LEN;
    let payload_start = tcp_start + TCP_MIN_HEADER_LEN;

    for len in 0..=frame.len() {
        let report = decode_frame(&frame[..len]);
        let failed = report.error.as_ref().map(|i| (i.layer, i.error.kind()));
        if len < ip_start {
            assert_eq!(failed, Some((Layer::Ethernet, ErrorKind::Truncated)));
            assert!(report.ethernet.is_none());
        } else if len < tcp_start {
            assert_eq!(failed, Some((Layer::Ipv4, ErrorKind::Truncated)));
            assert!(report.ethernet.is_some());
            assert!(report.ipv4.is_none());
            assert_eq!(report.payload.len(), len - ip_start);
        } else if len < payload_start {
            assert_eq!(failed, Some((Layer::Tcp, ErrorKind::Truncated)));
            assert!(report.ipv4.is_some());
            assert!(report.transport.is_none());
            assert_eq!(report.payload.len(), len - tcp_start);
        } else {
            assert_eq!(failed, None, "length {len}");
            assert_eq!(report.payload.len(), len - payload_start);
        }
    }
}

#[test]
fn wrong_ip_version_is_a_warning() {
    let mut frame = udp_frame(b"x");
    frame[ETH_HEADER_LEN] = 0x55;
    let report = decode_frame(&frame);
    assert!(report.is_complete());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].layer, Layer::Ipv4);
    assert_eq!(report.warnings[0].error.kind(), ErrorKind::MalformedField);
    assert_eq!(report.ipv4.map(|i| i.version), Some(5));
    assert!(report.udp().is_some());
    assert!(render_report(&report, 80).contains("\tWarning: IPv4: "));
}

#[test]
fn malformed_tcp_offset_keeps_ip_layer() {
    let mut frame = tcp_syn_frame(PAYLOAD);
    // data offset 2 words
    frame[ETH_HEADER_LEN + IPV4_MIN_HEADER_LEN + 12] = 0x20;
    let report = decode_frame(&frame);
    let issue = report.error.as_ref().unwrap();
    assert_eq!(issue.layer, Layer::Tcp);
    assert_eq!(issue.error.kind(), ErrorKind::MalformedField);
    assert_eq!(report.deepest_layer(), Some(Layer::Ipv4));
    assert_eq!(report.payload.len(), TCP_MIN_HEADER_LEN + PAYLOAD.len());
}

#[test]
fn render_udp_frame() {
    let frame = udp_frame(&[0xca, 0xfe]);
    let text = render_report(&decode_frame(&frame), 80);
    assert_eq!(
        text,
        "Ethernet Frame: 44 bytes\n\
         \tDestination: 52:54:00:AB:CD:EF, Source: 52:54:00:12:34:56, \
         Protocol: 0x0800 (IPv4)\n\
         \tIPv4 Packet:\n\
         \t\tVersion: 4, Header Length: 20, TTL: 64\n\
         \t\tProtocol: 17 (UDP), Source: 192.0.2.1, Destination: \
         198.51.100.7\n\
         \tUDP Segment:\n\
         \t\tSource Port: 51000, Destination Port: 53, Length: 10\n\
         \t\tData:\n\
         \t\t\t\\xca\\xfe\n"
    );
}
