// SPDX-License-Identifier: Apache-2.0

use std::os::fd::{AsRawFd, OwnedFd, RawFd};

use nix::{
    errno::Errno,
    sys::socket::{AddressFamily, MsgFlags, SockFlag, SockProtocol, SockType},
};

use crate::{
    promiscuous::enable_promiscuous_mode, CaptureConfig, ErrorKind,
    TrawlError,
};

const PACKET_HOST: u8 = 0; // a packet addressed to the local host

/// Anything able to hand out captured link layer frames one at a time.
pub trait FrameSource {
    /// Block until the next frame arrives.
    ///
    /// [ErrorKind::Timeout] means no frame arrived in time and the caller may
    /// simply ask again. Any other error means no more frames can be read.
    fn next_frame(&mut self) -> Result<Vec<u8>, TrawlError>;
}

/// Linux `AF_PACKET` raw socket receiving every ethertype.
#[derive(Debug)]
pub struct RawSocket {
    fd: OwnedFd,
    buffer: Vec<u8>,
}

impl AsRawFd for RawSocket {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

impl RawSocket {
    pub fn new(config: &CaptureConfig) -> Result<Self, TrawlError> {
        if let Err(e) = config.validate() {
            log::error!("{e}");
            return Err(e);
        }
        let fd = create_raw_eth_socket()?;

        if let Some(iface_name) = config.iface_name.as_deref() {
            let iface_index = get_iface_index(iface_name)?;
            bind_raw_socket(fd.as_raw_fd(), libc::ETH_P_ALL, iface_index)?;
            if config.promiscuous {
                enable_promiscuous_mode(fd.as_raw_fd(), iface_index)?;
            }
        }
        if config.socket_timeout_sec > 0 {
            set_socket_timeout(fd.as_raw_fd(), config.socket_timeout_sec)?;
        }

        log::debug!(
            "Raw socket {} created on {}",
            fd.as_raw_fd(),
            config.iface_name.as_deref().unwrap_or("all interfaces")
        );
        Ok(Self {
            fd,
            buffer: vec![0u8; config.recv_buffer_size],
        })
    }
}

impl FrameSource for RawSocket {
    fn next_frame(&mut self) -> Result<Vec<u8>, TrawlError> {
        let received = match nix::sys::socket::recv(
            self.fd.as_raw_fd(),
            &mut self.buffer,
            MsgFlags::empty(),
        ) {
            Ok(r) => r,
            // Interrupted by signal, let the caller check for shutdown
            Err(Errno::EINTR) | Err(Errno::EAGAIN) => {
                return Err(TrawlError::new(
                    ErrorKind::Timeout,
                    "No frame received from raw socket".to_string(),
                ));
            }
            Err(errno) => {
                let e = TrawlError::new(
                    ErrorKind::SourceUnavailable,
                    format!(
                        "Failed to receive from raw socket {}: {errno}",
                        self.fd.as_raw_fd()
                    ),
                );
                log::error!("{e}");
                return Err(e);
            }
        };
        if received == self.buffer.len() {
            log::debug!(
                "Frame filled the whole {} bytes receive buffer, it might be \
                 cut short",
                received
            );
        }
        log::trace!("Raw socket received {:?}", &self.buffer[..received]);
        Ok(self.buffer[..received].to_vec())
    }
}

fn create_raw_eth_socket() -> Result<OwnedFd, TrawlError> {
    nix::sys::socket::socket(
        AddressFamily::Packet,
        SockType::Raw,
        SockFlag::SOCK_CLOEXEC,
        Some(SockProtocol::EthAll),
    )
    .map_err(|errno| {
        let kind = match TrawlError::from(errno).kind() {
            ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::SourceUnavailable,
        };
        let e = TrawlError::new(
            kind,
            format!("Failed to create raw ethernet socket: {errno}"),
        );
        log::error!("{e}");
        e
    })
}

fn get_iface_index(iface_name: &str) -> Result<libc::c_int, TrawlError> {
    match nix::net::if_::if_nametoindex(iface_name) {
        Ok(index) => Ok(index as libc::c_int),
        Err(errno) => {
            let e = TrawlError::new(
                ErrorKind::SourceUnavailable,
                format!("Interface {iface_name} not found: {errno}"),
            );
            log::error!("{e}");
            Err(e)
        }
    }
}

fn bind_raw_socket(
    fd: RawFd,
    eth_protocol: libc::c_int,
    iface_index: libc::c_int,
) -> Result<(), TrawlError> {
    let socket_addr = libc::sockaddr_ll {
        sll_family: libc::AF_PACKET as libc::c_ushort,
        sll_protocol: (eth_protocol as libc::c_ushort).to_be(),
        sll_ifindex: iface_index,
        sll_hatype: libc::ARPHRD_ETHER as libc::c_ushort,
        sll_pkttype: PACKET_HOST as libc::c_uchar,
        sll_halen: 0,
        sll_addr: [0; 8],
    };

    let rc = unsafe {
        libc::bind(
            fd,
            (&socket_addr as *const libc::sockaddr_ll) as *const libc::sockaddr,
            std::mem::size_of::<libc::sockaddr_ll>() as libc::socklen_t,
        )
    };
    if rc != 0 {
        let errno = Errno::last();
        let e = TrawlError::new(
            ErrorKind::SourceUnavailable,
            format!(
                "Failed to bind raw socket to interface index \
                 {iface_index}: {errno}"
            ),
        );
        log::error!("{e}");
        return Err(e);
    }
    Ok(())
}

fn set_socket_timeout(fd: RawFd, timeout: u32) -> Result<(), TrawlError> {
    let tmo = libc::timeval {
        tv_sec: timeout.into(),
        tv_usec: 0,
    };
    let rc = unsafe {
        libc::setsockopt(
            fd,
            libc::SOL_SOCKET,
            libc::SO_RCVTIMEO,
            (&tmo as *const libc::timeval) as *const libc::c_void,
            std::mem::size_of::<libc::timeval>() as libc::socklen_t,
        )
    };
    if rc < 0 {
        let e = TrawlError::new(
            ErrorKind::Bug,
            format!(
                "Failed to set the recv timeout SO_RCVTIMEO to socket {}: {}",
                fd,
                Errno::last()
            ),
        );
        log::error!("{e}");
        return Err(e);
    }
    Ok(())
}
