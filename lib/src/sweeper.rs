//! Sweeps a CIDR block for live hosts

use itertools::Itertools;
use std::{
    sync::{mpsc, Arc},
    time::Duration,
};

use crate::{
    error::{ArpSweepError, Result},
    network::NetworkInterface,
    packet::{
        arp_packet::ArpReply,
        wire::{self, Wire},
    },
    scanners::{arp_scanner::ARPScanner, collect_replies, DeviceRecord},
    targets::ips::IPTargets,
};

/// Broadcasts an ARP request for every host address in `cidr` and returns
/// one [`DeviceRecord`] per responding address
///
/// Replies are collected until `timeout` has passed since the last request
/// was sent. Records are ordered by the arrival of each address's first
/// reply; later replies from the same address are ignored.
///
/// # Errors
///
/// [`ArpSweepError::InvalidRange`] is returned for a malformed `cidr` before
/// any socket is opened.
///
/// Example
/// ```no_run
/// # use std::time::Duration;
/// # use arpsweep_lib::{network, sweeper};
/// let interface = network::get_default_interface().unwrap();
/// let devices = sweeper::scan_range(
///     &interface,
///     "192.168.1.0/24",
///     Duration::from_secs(1),
/// )
/// .unwrap();
/// for device in devices {
///     println!("{} {}", device.ip, device.mac);
/// }
/// ```
pub fn scan_range(
    interface: &NetworkInterface,
    cidr: &str,
    timeout: Duration,
) -> Result<Vec<DeviceRecord>> {
    let targets = IPTargets::from_cidr(cidr)?;

    if timeout.is_zero() {
        return Err(ArpSweepError::InvalidTimeout);
    }

    let wire = wire::default(interface)?;

    sweep(Arc::new(interface.clone()), wire, targets, timeout)
}

/// Same as [`scan_range`] but sweeps over an already opened wire. The wire is
/// consumed and released before this returns.
pub fn scan_range_on_wire(
    interface: Arc<NetworkInterface>,
    wire: Wire,
    cidr: &str,
    timeout: Duration,
) -> Result<Vec<DeviceRecord>> {
    let targets = IPTargets::from_cidr(cidr)?;
    sweep(interface, wire, targets, timeout)
}

fn sweep(
    interface: Arc<NetworkInterface>,
    wire: Wire,
    targets: Arc<IPTargets>,
    timeout: Duration,
) -> Result<Vec<DeviceRecord>> {
    if timeout.is_zero() {
        return Err(ArpSweepError::InvalidTimeout);
    }

    log::debug!("sweeping {} addresses", targets.len());

    let (tx, rx) = mpsc::channel();

    let scanner = ARPScanner::builder()
        .interface(interface)
        .wire(wire)
        .targets(targets)
        .timeout(timeout)
        .notifier(tx)
        .build()?;

    let mut replies = Vec::new();

    collect_replies(scanner, rx, |reply| replies.push(reply))?;

    let devices = dedup_first_seen(replies);

    log::debug!("found {} devices", devices.len());

    Ok(devices)
}

/// Collapses replies into device records keyed by IP, keeping the first
/// reply seen for each address and the order in which addresses first
/// replied
pub fn dedup_first_seen<I>(replies: I) -> Vec<DeviceRecord>
where
    I: IntoIterator<Item = ArpReply>,
{
    replies
        .into_iter()
        .unique_by(|reply| reply.sender_ip)
        .map(DeviceRecord::from)
        .collect()
}

#[cfg(test)]
#[path = "./sweeper_tests.rs"]
mod tests;
