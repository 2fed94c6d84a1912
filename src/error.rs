// SPDX-License-Identifier: Apache-2.0

use nix::errno::Errno;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    /// Declared or required length exceeds the bytes available at a layer.
    Truncated,
    /// A header field is structurally inconsistent.
    MalformedField,
    /// The frame source cannot produce frames.
    SourceUnavailable,
    PermissionDenied,
    /// Receive timeout of the frame source expired without a frame.
    Timeout,
    InvalidArgument,
    IoError,
    Bug,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TrawlError {
    kind: ErrorKind,
    msg: String,
}

impl TrawlError {
    pub fn new(kind: ErrorKind, msg: String) -> Self {
        Self { kind, msg }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        self.msg.as_str()
    }
}

impl std::fmt::Display for TrawlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}

impl std::error::Error for TrawlError {}

pub(crate) trait ErrorContext<T> {
    fn context(self, msg: &str) -> Result<T, TrawlError>;
}

impl<T> ErrorContext<T> for Result<T, TrawlError> {
    fn context(self, msg: &str) -> Result<T, TrawlError> {
        self.map_err(|e| TrawlError::new(e.kind, format!("{msg}: {}", e.msg)))
    }
}

fn errno_to_kind(errno: Errno) -> ErrorKind {
    match errno {
        Errno::EPERM | Errno::EACCES => ErrorKind::PermissionDenied,
        // EWOULDBLOCK is the same value as EAGAIN on Linux
        Errno::EAGAIN => ErrorKind::Timeout,
        Errno::ENODEV | Errno::ENXIO | Errno::ENETDOWN => {
            ErrorKind::SourceUnavailable
        }
        _ => ErrorKind::IoError,
    }
}

impl From<Errno> for TrawlError {
    fn from(e: Errno) -> Self {
        Self::new(errno_to_kind(e), format!("{}", e))
    }
}

impl From<std::io::Error> for TrawlError {
    fn from(e: std::io::Error) -> Self {
        let kind = match e.raw_os_error() {
            Some(code) => errno_to_kind(Errno::from_raw(code)),
            None => match e.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    ErrorKind::PermissionDenied
                }
                std::io::ErrorKind::WouldBlock
                | std::io::ErrorKind::TimedOut => ErrorKind::Timeout,
                _ => ErrorKind::IoError,
            },
        };
        Self::new(kind, format!("IO error: {e}"))
    }
}
