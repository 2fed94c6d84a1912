// SPDX-License-Identifier: Apache-2.0

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    decode_frame, CaptureConfig, ErrorKind, FrameReport, FrameSource,
    TrawlError,
};

/// Receiver of decoded frames, one call per captured frame.
pub trait FrameSink {
    fn report(&mut self, report: &FrameReport<'_>) -> Result<(), TrawlError>;
}

impl<F> FrameSink for F
where
    F: FnMut(&FrameReport<'_>) -> Result<(), TrawlError>,
{
    fn report(&mut self, report: &FrameReport<'_>) -> Result<(), TrawlError> {
        self(report)
    }
}

/// Writes the human readable rendering of every frame.
#[derive(Debug)]
pub struct TextSink<W: Write> {
    writer: W,
    width: usize,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W, width: usize) -> Self {
        Self { writer, width }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for TextSink<W> {
    fn report(&mut self, report: &FrameReport<'_>) -> Result<(), TrawlError> {
        writeln!(self.writer, "{}", report.display_with_width(self.width))?;
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct CaptureSummary {
    pub frames: u64,
    /// Frames with a layer that failed to decode.
    pub partial_frames: u64,
    /// Frames decoded with warnings.
    pub anomalous_frames: u64,
}

impl CaptureSummary {
    fn record(&mut self, report: &FrameReport<'_>) {
        self.frames += 1;
        if !report.is_complete() {
            self.partial_frames += 1;
        }
        if !report.warnings.is_empty() {
            self.anomalous_frames += 1;
        }
    }
}

impl std::fmt::Display for CaptureSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frames captured, {} partially decoded, {} with warnings",
            self.frames, self.partial_frames, self.anomalous_frames
        )
    }
}

/// Read, decode and report frames until `stop` is set, the configured frame
/// count is reached or the source fails.
///
/// `stop` is checked before every blocking read. Each frame is decoded on
/// its own and reported exactly once, whether or not it decoded fully.
pub fn capture<S, K>(
    source: &mut S,
    sink: &mut K,
    config: &CaptureConfig,
    stop: &AtomicBool,
) -> Result<CaptureSummary, TrawlError>
where
    S: FrameSource + ?Sized,
    K: FrameSink + ?Sized,
{
    let mut summary = CaptureSummary::default();
    loop {
        if stop.load(Ordering::SeqCst) {
            log::debug!("Capture stop requested");
            break;
        }
        if let Some(max) = config.max_frames {
            if summary.frames >= max {
                log::debug!("Captured {max} frames as requested");
                break;
            }
        }
        let frame = match source.next_frame() {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::Timeout => {
                log::trace!("{e}");
                continue;
            }
            Err(e) => {
                log::error!("Frame source failed: {e}");
                return Err(e);
            }
        };
        let report = decode_frame(&frame);
        summary.record(&report);
        if let Err(e) = sink.report(&report) {
            log::error!("Frame sink failed: {e}");
            return Err(e);
        }
    }
    Ok(summary)
}
