//! Provides helpers for creating ARP requests and parsing ARP replies

use derive_builder::Builder;
use pnet::{
    packet::{arp, ethernet},
    util,
};
use std::net;

use crate::error::{ArpSweepError, Result};

use super::frame::{ArpFrame, ArpHeader, EthernetHeader, ARP_FRAME_SIZE};

/// Represents a generator for raw ARP "who-has" requests
///
/// The request is always broadcast at the link layer, the ARP target
/// hardware address is left zeroed as it is the thing being asked for.
#[derive(Debug, Clone, Copy, Builder)]
#[builder(setter(into))]
pub struct ArpRequest {
    /// IP address of the host machine performing scanning
    source_ip: net::Ipv4Addr,
    /// MAC address of host machine performing scanning
    source_mac: util::MacAddr,
    /// IP address being resolved
    dest_ip: net::Ipv4Addr,
}

impl ArpRequest {
    /// Returns builder for ArpRequest
    pub fn builder() -> ArpRequestBuilder {
        ArpRequestBuilder::default()
    }

    /// The IP address this request asks about
    pub fn dest_ip(&self) -> net::Ipv4Addr {
        self.dest_ip
    }

    /// Returns the typed frame for this request
    pub fn to_frame(&self) -> ArpFrame {
        ArpFrame {
            ethernet: EthernetHeader {
                destination: util::MacAddr::broadcast(),
                source: self.source_mac,
                ethertype: ethernet::EtherTypes::Arp,
            },
            arp: ArpHeader {
                hardware_type: arp::ArpHardwareTypes::Ethernet,
                protocol_type: ethernet::EtherTypes::Ipv4,
                hw_addr_len: 6,
                proto_addr_len: 4,
                operation: arp::ArpOperations::Request,
                sender_hw_addr: self.source_mac,
                sender_proto_addr: self.source_ip,
                target_hw_addr: util::MacAddr::zero(),
                target_proto_addr: self.dest_ip,
            },
        }
    }

    /// Builds the raw bytes of this request ready to be put on the wire
    pub fn to_raw(&self) -> Result<[u8; ARP_FRAME_SIZE]> {
        let mut pkt_buf = [0u8; ARP_FRAME_SIZE];

        self.to_frame().write_to(&mut pkt_buf).ok_or_else(|| {
            ArpSweepError::Send(format!(
                "failed to build ARP request for {}",
                self.dest_ip
            ))
        })?;

        Ok(pkt_buf)
    }
}

/// An ARP reply received from a device on the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArpReply {
    /// MAC address of the responding device
    pub sender_mac: util::MacAddr,
    /// IPv4 address of the responding device
    pub sender_ip: net::Ipv4Addr,
}

impl ArpReply {
    /// Parses a raw frame, returning `None` for anything that is not a well
    /// formed Ethernet / IPv4 ARP reply
    pub fn parse(pkt: &[u8]) -> Option<Self> {
        let frame = ArpFrame::read_from(pkt)?;

        if !frame.arp.is_ethernet_ipv4()
            || frame.arp.operation != arp::ArpOperations::Reply
        {
            return None;
        }

        Some(Self {
            sender_mac: frame.arp.sender_hw_addr,
            sender_ip: frame.arp.sender_proto_addr,
        })
    }
}

#[cfg(test)]
#[doc(hidden)]
pub fn create_arp_reply(
    from_mac: util::MacAddr,
    from_ip: net::Ipv4Addr,
    to_mac: util::MacAddr,
    to_ip: net::Ipv4Addr,
) -> [u8; ARP_FRAME_SIZE] {
    let mut pkt_buf = [0u8; ARP_FRAME_SIZE];

    let frame = ArpFrame {
        ethernet: EthernetHeader {
            destination: to_mac,
            source: from_mac,
            ethertype: ethernet::EtherTypes::Arp,
        },
        arp: ArpHeader {
            hardware_type: arp::ArpHardwareTypes::Ethernet,
            protocol_type: ethernet::EtherTypes::Ipv4,
            hw_addr_len: 6,
            proto_addr_len: 4,
            operation: arp::ArpOperations::Reply,
            sender_hw_addr: from_mac,
            sender_proto_addr: from_ip,
            target_hw_addr: to_mac,
            target_proto_addr: to_ip,
        },
    };

    frame
        .write_to(&mut pkt_buf)
        .expect("failed to generate arp reply");

    pkt_buf
}

#[cfg(test)]
#[path = "./arp_packet_tests.rs"]
mod tests;
