use nix::fcntl::OFlag;
use nix::pty::{grantpt, posix_openpt, ptsname_r, unlockpt, PtyMaster};

/// Pseudo-terminal standing in for a modem. The slave node at `path` is
/// what gets opened; keep `master` alive for as long as the slave is used.
pub struct VirtualModem {
    #[allow(dead_code)]
    pub master: PtyMaster,
    pub path: String,
}

pub fn virtual_modem() -> VirtualModem {
    let master = posix_openpt(OFlag::O_RDWR | OFlag::O_NOCTTY).expect("posix_openpt");
    grantpt(&master).expect("grantpt");
    unlockpt(&master).expect("unlockpt");
    let path = ptsname_r(&master).expect("ptsname_r");
    VirtualModem { master, path }
}
