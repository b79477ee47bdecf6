//! Implements a default Wire using pnet

use pnet::datalink;
use std::{
    io,
    sync::{Arc, Mutex},
};

use crate::{
    error::{ArpSweepError, Result},
    network::NetworkInterface,
    packet::{Reader, Sender, READ_POLL_INTERVAL},
};

/// Represents a packet Sender and packet Reader tuple
///
/// The underlying datalink channel is closed once every clone of the wire
/// has been dropped.
#[derive(Clone)]
pub struct Wire(pub Arc<Mutex<dyn Sender>>, pub Arc<Mutex<dyn Reader>>);

/// A PNetReader implementation of packet Reader
pub struct PNetReader {
    receiver: Box<dyn datalink::DataLinkReceiver>,
}

// Implements the Reader trait for our PNet implementation
impl Reader for PNetReader {
    fn next_packet(&mut self) -> Result<Option<&[u8]>> {
        match self.receiver.next() {
            Ok(pkt) => Ok(Some(pkt)),
            Err(e) if is_read_timeout(&e) => Ok(None),
            Err(e) => Err(ArpSweepError::Receive(e.to_string())),
        }
    }
}

/// A PNetSender implementation of packet Sender
pub struct PNetSender {
    sender: Box<dyn datalink::DataLinkSender>,
}

// Implements the Sender trait for our PNet implementation
impl Sender for PNetSender {
    fn send(&mut self, packet: &[u8]) -> Result<()> {
        let opt = self.sender.send_to(packet, None);
        match opt {
            Some(res) => {
                Ok(res.map_err(|e| ArpSweepError::Send(e.to_string()))?)
            }
            None => Err(ArpSweepError::Send("failed to send packet".into())),
        }
    }
}

fn is_read_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

fn channel_error(interface: &NetworkInterface, e: io::Error) -> ArpSweepError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        ArpSweepError::Interface(format!(
            "permission denied on {}: must run with root privileges",
            interface.name
        ))
    } else {
        ArpSweepError::Interface(format!(
            "failed to open datalink channel on {}: {}",
            interface.name, e
        ))
    }
}

/// Returns the default wire for the provided interface
///
/// Reads on the returned wire block for at most [`READ_POLL_INTERVAL`].
///
/// Example
/// ```no_run
/// # use arpsweep_lib::network;
/// # use arpsweep_lib::packet::wire;
/// let interface = network::get_default_interface().unwrap();
/// let packet_wire = wire::default(&interface).unwrap();
/// ```
pub fn default(interface: &NetworkInterface) -> Result<Wire> {
    let cfg = datalink::Config {
        read_timeout: Some(READ_POLL_INTERVAL),
        ..Default::default()
    };

    let channel = match datalink::channel(&interface.into(), cfg) {
        Ok(datalink::Channel::Ethernet(tx, rx)) => Ok((tx, rx)),
        Ok(_) => Err(ArpSweepError::Interface(format!(
            "unsupported datalink channel type on {}",
            interface.name
        ))),
        Err(e) => Err(channel_error(interface, e)),
    }?;

    log::debug!("opened datalink channel on {}", interface.name);

    Ok(Wire(
        Arc::new(Mutex::new(PNetSender { sender: channel.0 })),
        Arc::new(Mutex::new(PNetReader {
            receiver: channel.1,
        })),
    ))
}

#[cfg(test)]
#[path = "./wire_tests.rs"]
mod tests;
