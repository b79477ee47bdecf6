//! Provides helpers for creating, parsing and sending packets

use core::time;

use crate::error::Result;

pub mod arp_packet;
pub mod frame;
pub mod wire;

/// Default timing for throttling packet sends to prevent packet loss
pub const DEFAULT_PACKET_SEND_TIMING: time::Duration =
    time::Duration::from_micros(50);

/// How long a single read may block before control returns to the caller so
/// that deadlines and stop signals are observed
pub const READ_POLL_INTERVAL: time::Duration = time::Duration::from_millis(20);

/// Trait describing a packet reader
pub trait Reader: Send {
    /// Should return the next packet off of the wire, or `None` if nothing
    /// arrived within the reader's poll interval
    fn next_packet(&mut self) -> Result<Option<&[u8]>>;
}

/// Trait describing a packet sender
pub trait Sender: Send {
    /// Should send a packet over the wire
    fn send(&mut self, packet: &[u8]) -> Result<()>;
}

#[cfg(test)]
#[path = "./packet_tests.rs"]
#[doc(hidden)]
pub mod mocks;
