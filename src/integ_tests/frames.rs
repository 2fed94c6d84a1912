// SPDX-License-Identifier: Apache-2.0

// Frames encoded by etherparse, so the decoders are not only checked against
// bytes written by hand.

pub(crate) const SRC_MAC: [u8; 6] = [0x52, 0x54, 0x00, 0x12, 0x34, 0x56];
pub(crate) const DST_MAC: [u8; 6] = [0x52, 0x54, 0x00, 0xab, 0xcd, 0xef];
pub(crate) const SRC_IP: [u8; 4] = [192, 0, 2, 1];
pub(crate) const DST_IP: [u8; 4] = [198, 51, 100, 7];
pub(crate) const TTL: u8 = 64;

pub(crate) fn tcp_syn_frame(payload: &[u8]) -> Vec<u8> {
    let builder = etherparse::PacketBuilder::ethernet2(SRC_MAC, DST_MAC)
        .ipv4(SRC_IP, DST_IP, TTL)
        .tcp(443, 51000, 0x1000_0001, 64240)
        .syn();
    let mut frame = Vec::<u8>::with_capacity(builder.size(payload.len()));
    builder.write(&mut frame, payload).unwrap();
    frame
}

pub(crate) fn udp_frame(payload: &[u8]) -> Vec<u8> {
    let builder = etherparse::PacketBuilder::ethernet2(SRC_MAC, DST_MAC)
        .ipv4(SRC_IP, DST_IP, TTL)
        .udp(51000, 53);
    let mut frame = Vec::<u8>::with_capacity(builder.size(payload.len()));
    builder.write(&mut frame, payload).unwrap();
    frame
}

pub(crate) fn icmp_echo_frame(payload: &[u8]) -> Vec<u8> {
    let builder = etherparse::PacketBuilder::ethernet2(SRC_MAC, DST_MAC)
        .ipv4(SRC_IP, DST_IP, TTL)
        .icmpv4_echo_request(0x1234, 7);
    let mut frame = Vec::<u8>::with_capacity(builder.size(payload.len()));
    builder.write(&mut frame, payload).unwrap();
    frame
}
