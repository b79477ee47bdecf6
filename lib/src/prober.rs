//! Resolves the MAC address of a single IPv4 address

use pnet::util::MacAddr;
use std::{
    net::Ipv4Addr,
    sync::{mpsc, Arc},
    time::Duration,
};

use crate::{
    error::{ArpSweepError, Result},
    network::NetworkInterface,
    packet::wire::{self, Wire},
    scanners::{arp_scanner::ARPScanner, collect_replies, CancelToken},
    targets::ips::IPTargets,
};

/// Broadcasts one ARP request for `target` on `interface` and returns the
/// MAC address of the first matching reply, or `None` if nothing answered
/// within `timeout`
///
/// A raw datalink channel is opened for the duration of the call, which
/// usually requires root privileges.
///
/// Example
/// ```no_run
/// # use std::time::Duration;
/// # use arpsweep_lib::{network, prober};
/// let interface = network::get_default_interface().unwrap();
/// let mac = prober::resolve_mac(
///     &interface,
///     "192.168.1.1".parse().unwrap(),
///     Duration::from_secs(1),
/// )
/// .unwrap();
/// ```
pub fn resolve_mac(
    interface: &NetworkInterface,
    target: Ipv4Addr,
    timeout: Duration,
) -> Result<Option<MacAddr>> {
    if timeout.is_zero() {
        return Err(ArpSweepError::InvalidTimeout);
    }

    let wire = wire::default(interface)?;

    resolve_mac_on_wire(Arc::new(interface.clone()), wire, target, timeout)
}

/// Same as [`resolve_mac`] but probes over an already opened wire. The wire
/// is consumed and released before this returns.
pub fn resolve_mac_on_wire(
    interface: Arc<NetworkInterface>,
    wire: Wire,
    target: Ipv4Addr,
    timeout: Duration,
) -> Result<Option<MacAddr>> {
    if timeout.is_zero() {
        return Err(ArpSweepError::InvalidTimeout);
    }

    let (tx, rx) = mpsc::channel();
    let cancel = CancelToken::new();

    let scanner = ARPScanner::builder()
        .interface(interface)
        .wire(wire)
        .targets(IPTargets::from_ip(target))
        .timeout(timeout)
        .notifier(tx)
        .cancel(cancel.clone())
        .build()?;

    let mut mac = None;

    collect_replies(scanner, rx, |reply| {
        if mac.is_none() && reply.sender_ip == target {
            mac = Some(reply.sender_mac);
            // no need to sit out the rest of the window
            cancel.cancel();
        }
    })?;

    match mac {
        Some(m) => log::debug!("{} is at {}", target, m),
        None => log::debug!("no reply from {} within {:?}", target, timeout),
    }

    Ok(mac)
}

#[cfg(test)]
#[path = "./prober_tests.rs"]
mod tests;
