//! Provides data structures and the shared ARP scanning primitive
//!
//! Both the single address prober and the range sweeper are built on the
//! [`arp_scanner::ARPScanner`]: construct requests, broadcast them, then
//! collect replies until a deadline.

#[cfg(test)]
use mockall::automock;

use pnet::util::MacAddr;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    net::Ipv4Addr,
    sync::{mpsc::Receiver, Arc, Condvar, Mutex, PoisonError},
    thread::JoinHandle,
    time::Duration,
};

use crate::{error::Result, packet::arp_packet::ArpReply};

/// The default time to wait for replies after the last request was sent
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

fn serialize_to_string<S, T>(
    val: &T,
    s: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: std::fmt::Display,
{
    s.serialize_str(&val.to_string())
}

fn deserialize_from_str<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let s = String::deserialize(d)?;
    s.parse::<T>().map_err(serde::de::Error::custom)
}

/// Data structure representing a device found on the network
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// IPv4 of the device
    pub ip: Ipv4Addr,
    /// MAC address of the device
    #[serde(
        serialize_with = "serialize_to_string",
        deserialize_with = "deserialize_from_str"
    )]
    pub mac: MacAddr,
}

impl From<ArpReply> for DeviceRecord {
    fn from(value: ArpReply) -> Self {
        Self {
            ip: value.sender_ip,
            mac: value.sender_mac,
        }
    }
}

impl Display for DeviceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.ip, self.mac)
    }
}

#[derive(Debug)]
/// Data structure representing a message that a device is being scanned
pub struct Scanning {
    /// IPv4 of the device
    pub ip: Ipv4Addr,
}

#[derive(Debug)]
/// Generic enum representing the various kinds of scanning messages over the
/// mpsc channel
pub enum ScanMessage {
    /// Indicates that scanning has completed
    Done,
    /// Send to inform that a device is about to be scanned
    Info(Scanning),
    /// Sent whenever an ARP reply is received from a targeted device
    ArpReply(ArpReply),
}

#[cfg_attr(test, automock)]
/// Trait used by all scanners
pub trait Scanner: Sync + Send {
    /// Performs network scanning
    fn scan(&self) -> Result<JoinHandle<Result<()>>>;
}

/// Signal used to end a scan's collection window early
///
/// Clones share the same state: cancelling one cancels all of them.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<(Mutex<bool>, Condvar)>);

impl CancelToken {
    /// Returns a new, not yet cancelled, token
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the token waking up anything waiting on it
    pub fn cancel(&self) {
        let (lock, cvar) = &*self.0;
        let mut cancelled = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *cancelled = true;
        cvar.notify_all();
    }

    /// Returns true once [`CancelToken::cancel`] has been called
    pub fn is_cancelled(&self) -> bool {
        let (lock, _) = &*self.0;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks for at most `timeout`, returning early if the token is
    /// cancelled. Returns true if the token was cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.0;
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = cvar
            .wait_timeout_while(guard, timeout, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

/// Runs `scanner` and feeds every ARP reply it reports to `on_reply` until
/// the scanner is done, then joins it
///
/// The scanner is consumed so that, once its threads are running, they hold
/// the only senders for `rx` and the only handles on the wire. The wire is
/// therefore released as soon as this returns.
pub fn collect_replies<S: Scanner, F: FnMut(ArpReply)>(
    scanner: S,
    rx: Receiver<ScanMessage>,
    mut on_reply: F,
) -> Result<()> {
    let handle = scanner.scan()?;
    drop(scanner);

    loop {
        match rx.recv() {
            Ok(ScanMessage::Done) => {
                log::debug!("scanning complete");
                break;
            }
            Ok(ScanMessage::ArpReply(reply)) => {
                log::debug!("received arp reply: {:?}", reply);
                on_reply(reply);
            }
            Ok(ScanMessage::Info(scanning)) => {
                log::trace!("scanning {}", scanning.ip);
            }
            // every sender hung up, the join below reports why
            Err(_) => break,
        }
    }

    handle.join()??;

    Ok(())
}

pub mod arp_scanner;

#[cfg(test)]
#[path = "./scanners_tests.rs"]
mod tests;
