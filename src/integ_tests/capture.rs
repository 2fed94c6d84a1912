// SPDX-License-Identifier: Apache-2.0

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;

use super::frames::{icmp_echo_frame, tcp_syn_frame, udp_frame};
use crate::{
    capture, CaptureConfig, ErrorKind, FrameReport, FrameSink, FrameSource,
    Layer, TextSink, TrawlError,
};

struct ReplaySource {
    frames: VecDeque<Result<Vec<u8>, TrawlError>>,
}

impl ReplaySource {
    fn new(frames: Vec<Result<Vec<u8>, TrawlError>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl FrameSource for ReplaySource {
    fn next_frame(&mut self) -> Result<Vec<u8>, TrawlError> {
        self.frames.pop_front().unwrap_or_else(|| {
            Err(TrawlError::new(
                ErrorKind::SourceUnavailable,
                "Replay exhausted".to_string(),
            ))
        })
    }
}

#[derive(Default)]
struct RecordingSink {
    seen: Vec<(Option<Layer>, Option<Layer>)>,
}

impl FrameSink for RecordingSink {
    fn report(&mut self, report: &FrameReport<'_>) -> Result<(), TrawlError> {
        self.seen.push((
            report.deepest_layer(),
            report.error.as_ref().map(|i| i.layer),
        ));
        Ok(())
    }
}

fn timeout() -> Result<Vec<u8>, TrawlError> {
    Err(TrawlError::new(ErrorKind::Timeout, "idle".to_string()))
}

#[test]
fn every_frame_is_reported_once() -> Result<(), TrawlError> {
    let mut truncated_udp = udp_frame(b"abc");
    truncated_udp.truncate(14 + 20 + 4);
    let mut source = ReplaySource::new(vec![
        Ok(tcp_syn_frame(b"hello")),
        timeout(),
        Ok(vec![0xff; 6]),
        Ok(truncated_udp),
        timeout(),
        Ok(icmp_echo_frame(&[])),
    ]);
    let mut config = CaptureConfig::new();
    config.set_max_frames(4);
    let mut sink = RecordingSink::default();

    let summary =
        capture(&mut source, &mut sink, &config, &AtomicBool::new(false))?;

    assert_eq!(summary.frames, 4);
    assert_eq!(summary.partial_frames, 2);
    assert_eq!(
        sink.seen,
        vec![
            (Some(Layer::Tcp), None),
            (None, Some(Layer::Ethernet)),
            (Some(Layer::Ipv4), Some(Layer::Udp)),
            (Some(Layer::Icmp), None),
        ]
    );
    Ok(())
}

#[test]
fn source_failure_ends_capture() {
    let mut source = ReplaySource::new(vec![Ok(udp_frame(b"a"))]);
    let mut sink = RecordingSink::default();
    let e = capture(
        &mut source,
        &mut sink,
        &CaptureConfig::new(),
        &AtomicBool::new(false),
    )
    .unwrap_err();
    assert_eq!(e.kind(), ErrorKind::SourceUnavailable);
    assert_eq!(sink.seen.len(), 1);
}

#[test]
fn text_sink_writes_one_block_per_frame() -> Result<(), TrawlError> {
    let mut source = ReplaySource::new(vec![
        Ok(udp_frame(b"a")),
        Ok(tcp_syn_frame(&[])),
    ]);
    let mut config = CaptureConfig::new();
    config.set_max_frames(2).set_payload_width(40);
    let mut sink = TextSink::new(Vec::new(), config.payload_width());
    capture(&mut source, &mut sink, &config, &AtomicBool::new(false))?;

    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(text.matches("Ethernet Frame:").count(), 2);
    assert!(text.contains("\tUDP Segment:\n"));
    assert!(text.contains("\tTCP Segment:\n"));
    assert!(text.contains("URG: 0, ACK: 0, PSH: 0, RST: 0, SYN: 1, FIN: 0"));
    Ok(())
}

#[test]
fn closure_can_act_as_sink() -> Result<(), TrawlError> {
    let mut source = ReplaySource::new(vec![
        Ok(icmp_echo_frame(b"ping")),
        timeout(),
        Ok(udp_frame(b"a")),
    ]);
    let mut config = CaptureConfig::new();
    config.set_max_frames(2);
    let mut payload_lens = Vec::new();
    let mut sink = |report: &FrameReport<'_>| -> Result<(), TrawlError> {
        payload_lens.push(report.payload.len());
        Ok(())
    };

    let summary =
        capture(&mut source, &mut sink, &config, &AtomicBool::new(false))?;

    assert_eq!(summary.frames, 2);
    assert_eq!(payload_lens, vec![8, 1]);
    Ok(())
}
