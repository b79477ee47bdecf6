//! Fixed layout Ethernet and ARP headers
//!
//! Both headers are plain structs with explicit field types. Serialization
//! goes through pnet's packet views so every byte offset is defined by the
//! wire format rather than inferred at runtime.

use pnet::{
    packet::{
        arp::{self, ArpHardwareType, ArpOperation},
        ethernet::{self, EtherType},
        MutablePacket, Packet,
    },
    util::MacAddr,
};
use std::net::Ipv4Addr;

/// Size in bytes of an Ethernet II header
pub const ETHERNET_HEADER_SIZE: usize =
    ethernet::EthernetPacket::minimum_packet_size();

/// Size in bytes of an ARP header for Ethernet / IPv4
pub const ARP_HEADER_SIZE: usize = arp::ArpPacket::minimum_packet_size();

/// Size in bytes of a complete ARP frame (without trailing padding)
pub const ARP_FRAME_SIZE: usize = ETHERNET_HEADER_SIZE + ARP_HEADER_SIZE;

/// Link-layer header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader {
    /// Destination hardware address
    pub destination: MacAddr,
    /// Source hardware address
    pub source: MacAddr,
    /// Type of the encapsulated payload
    pub ethertype: EtherType,
}

/// ARP header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpHeader {
    /// Link-layer type (1 for Ethernet)
    pub hardware_type: ArpHardwareType,
    /// Protocol type (0x0800 for IPv4)
    pub protocol_type: EtherType,
    /// Length of a hardware address in bytes
    pub hw_addr_len: u8,
    /// Length of a protocol address in bytes
    pub proto_addr_len: u8,
    /// Request (1) or reply (2)
    pub operation: ArpOperation,
    /// Hardware address of the sender
    pub sender_hw_addr: MacAddr,
    /// Protocol address of the sender
    pub sender_proto_addr: Ipv4Addr,
    /// Hardware address of the target
    pub target_hw_addr: MacAddr,
    /// Protocol address of the target
    pub target_proto_addr: Ipv4Addr,
}

impl ArpHeader {
    /// Returns true if this header describes an Ethernet / IPv4 mapping
    pub fn is_ethernet_ipv4(&self) -> bool {
        self.hardware_type == arp::ArpHardwareTypes::Ethernet
            && self.protocol_type == ethernet::EtherTypes::Ipv4
            && self.hw_addr_len == 6
            && self.proto_addr_len == 4
    }
}

/// An ARP message wrapped in its Ethernet frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpFrame {
    /// Link-layer header
    pub ethernet: EthernetHeader,
    /// ARP payload
    pub arp: ArpHeader,
}

impl ArpFrame {
    /// Serializes the frame into `buf`. Returns `None` if `buf` is shorter
    /// than [`ARP_FRAME_SIZE`].
    pub fn write_to(&self, buf: &mut [u8]) -> Option<()> {
        let mut eth = ethernet::MutableEthernetPacket::new(buf)?;
        eth.set_destination(self.ethernet.destination);
        eth.set_source(self.ethernet.source);
        eth.set_ethertype(self.ethernet.ethertype);

        let mut pkt_arp = arp::MutableArpPacket::new(eth.payload_mut())?;
        pkt_arp.set_hardware_type(self.arp.hardware_type);
        pkt_arp.set_protocol_type(self.arp.protocol_type);
        pkt_arp.set_hw_addr_len(self.arp.hw_addr_len);
        pkt_arp.set_proto_addr_len(self.arp.proto_addr_len);
        pkt_arp.set_operation(self.arp.operation);
        pkt_arp.set_sender_hw_addr(self.arp.sender_hw_addr);
        pkt_arp.set_sender_proto_addr(self.arp.sender_proto_addr);
        pkt_arp.set_target_hw_addr(self.arp.target_hw_addr);
        pkt_arp.set_target_proto_addr(self.arp.target_proto_addr);

        Some(())
    }

    /// Parses an ARP frame. Returns `None` for truncated frames and for
    /// frames that do not carry ARP.
    pub fn read_from(buf: &[u8]) -> Option<Self> {
        let eth = ethernet::EthernetPacket::new(buf)?;

        if eth.get_ethertype() != ethernet::EtherTypes::Arp {
            return None;
        }

        let pkt_arp = arp::ArpPacket::new(eth.payload())?;

        Some(Self {
            ethernet: EthernetHeader {
                destination: eth.get_destination(),
                source: eth.get_source(),
                ethertype: eth.get_ethertype(),
            },
            arp: ArpHeader {
                hardware_type: pkt_arp.get_hardware_type(),
                protocol_type: pkt_arp.get_protocol_type(),
                hw_addr_len: pkt_arp.get_hw_addr_len(),
                proto_addr_len: pkt_arp.get_proto_addr_len(),
                operation: pkt_arp.get_operation(),
                sender_hw_addr: pkt_arp.get_sender_hw_addr(),
                sender_proto_addr: pkt_arp.get_sender_proto_addr(),
                target_hw_addr: pkt_arp.get_target_hw_addr(),
                target_proto_addr: pkt_arp.get_target_proto_addr(),
            },
        })
    }
}

#[cfg(test)]
#[path = "./frame_tests.rs"]
mod tests;
