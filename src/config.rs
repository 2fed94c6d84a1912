// SPDX-License-Identifier: Apache-2.0

use crate::{ErrorKind, TrawlError, DEFAULT_LINE_WIDTH};

const DEFAULT_RECV_BUFFER_SIZE: usize = 65536;
const DEFAULT_SOCKET_TIMEOUT: u32 = 1;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CaptureConfig {
    /// Capture on all interfaces when not set.
    pub(crate) iface_name: Option<String>,
    pub(crate) promiscuous: bool,
    pub(crate) recv_buffer_size: usize,
    /// Seconds to wait for a frame before checking for shutdown, 0 for
    /// blocking forever.
    pub(crate) socket_timeout_sec: u32,
    pub(crate) payload_width: usize,
    pub(crate) max_frames: Option<u64>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            iface_name: None,
            promiscuous: false,
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
            socket_timeout_sec: DEFAULT_SOCKET_TIMEOUT,
            payload_width: DEFAULT_LINE_WIDTH,
            max_frames: None,
        }
    }
}

impl CaptureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_iface_name(&mut self, iface_name: &str) -> &mut Self {
        self.iface_name = Some(iface_name.to_string());
        self
    }

    pub fn set_promiscuous(&mut self, promiscuous: bool) -> &mut Self {
        self.promiscuous = promiscuous;
        self
    }

    pub fn set_recv_buffer_size(&mut self, size: usize) -> &mut Self {
        self.recv_buffer_size = size;
        self
    }

    // Set timeout in seconds
    pub fn set_socket_timeout(&mut self, timeout: u32) -> &mut Self {
        self.socket_timeout_sec = timeout;
        self
    }

    pub fn set_payload_width(&mut self, width: usize) -> &mut Self {
        self.payload_width = width;
        self
    }

    pub fn set_max_frames(&mut self, count: u64) -> &mut Self {
        self.max_frames = Some(count);
        self
    }

    pub fn iface_name(&self) -> Option<&str> {
        self.iface_name.as_deref()
    }

    pub fn payload_width(&self) -> usize {
        self.payload_width
    }

    pub fn max_frames(&self) -> Option<u64> {
        self.max_frames
    }

    pub(crate) fn validate(&self) -> Result<(), TrawlError> {
        if self.iface_name.as_deref() == Some("") {
            return Err(TrawlError::new(
                ErrorKind::InvalidArgument,
                "Interface name is empty".to_string(),
            ));
        }
        if self.promiscuous && self.iface_name.is_none() {
            return Err(TrawlError::new(
                ErrorKind::InvalidArgument,
                "Promiscuous mode requires an interface name".to_string(),
            ));
        }
        if self.recv_buffer_size == 0 {
            return Err(TrawlError::new(
                ErrorKind::InvalidArgument,
                "Receive buffer size cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}
