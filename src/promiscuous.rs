// SPDX-License-Identifier: Apache-2.0

use std::os::fd::RawFd;

use nix::errno::Errno;

use crate::TrawlError;

pub(crate) fn enable_promiscuous_mode(
    fd: RawFd,
    iface_index: libc::c_int,
) -> Result<(), TrawlError> {
    let mreq = libc::packet_mreq {
        mr_ifindex: iface_index,
        mr_type: libc::PACKET_MR_PROMISC as libc::c_ushort,
        mr_alen: 0,
        mr_address: [0; 8],
    };

    let rc = unsafe {
        libc::setsockopt(
            fd,
            libc::SOL_PACKET,
            libc::PACKET_ADD_MEMBERSHIP,
            (&mreq as *const libc::packet_mreq) as *const libc::c_void,
            std::mem::size_of::<libc::packet_mreq>() as libc::socklen_t,
        )
    };
    if rc != 0 {
        let errno = Errno::last();
        let e = TrawlError::new(
            TrawlError::from(errno).kind(),
            format!(
                "Failed to set socket to promiscuous mode on interface \
                 index {iface_index}: {errno}"
            ),
        );
        log::error!("{e}");
        return Err(e);
    }
    log::debug!("Promiscuous mode enabled on interface index {iface_index}");
    Ok(())
}
