//! Provides helpers for selecting the network interface to probe from

use pnet::{
    datalink::NetworkInterface as PNetNetworkInterface, ipnetwork::IpNetwork,
    util::MacAddr,
};
use std::net::{IpAddr, Ipv4Addr};

use crate::error::{ArpSweepError, Result};

/// Represents a network interface on current host
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkInterface {
    /// The name of the interface
    pub name: String,
    /// The description of the interface
    pub description: String,
    /// The cidr block associated with interface
    pub cidr: String,
    /// The assigned IPv4 address on the interface
    pub ipv4: Ipv4Addr,
    /// The IpNetwork of the interface
    pub ips: Vec<IpNetwork>,
    /// The MAC address of the interface
    pub mac: MacAddr,
    /// Any defined flags on the interface
    pub flags: u32,
    /// The index of the interface
    pub index: u32,
}

impl TryFrom<PNetNetworkInterface> for NetworkInterface {
    type Error = ArpSweepError;

    fn try_from(value: PNetNetworkInterface) -> Result<Self> {
        let mac = value.mac.ok_or_else(|| {
            ArpSweepError::Interface(format!(
                "failed to get mac address for interface {}",
                value.name
            ))
        })?;

        let (ipv4, cidr) =
            get_interface_ipv4_and_cidr(&value).ok_or_else(|| {
                ArpSweepError::Interface(format!(
                    "failed to get ip and cidr for interface {}",
                    value.name
                ))
            })?;

        Ok(Self {
            name: value.name,
            description: value.description,
            flags: value.flags,
            index: value.index,
            mac,
            ips: value.ips,
            cidr,
            ipv4,
        })
    }
}

impl From<&NetworkInterface> for PNetNetworkInterface {
    fn from(value: &NetworkInterface) -> Self {
        Self {
            name: value.name.clone(),
            flags: value.flags,
            description: value.description.clone(),
            index: value.index,
            ips: value.ips.clone(),
            mac: Some(value.mac),
        }
    }
}

/// Finds and returns a NetworkInterface by name for current host
pub fn get_interface(name: &str) -> Result<NetworkInterface> {
    let iface = pnet::datalink::interfaces()
        .into_iter()
        .find(|i| i.name == name)
        .ok_or_else(|| {
            ArpSweepError::Interface(format!(
                "could not find network interface: {name}"
            ))
        })?;
    NetworkInterface::try_from(iface)
}

/// Finds and returns the default NetworkInterface for current host: the
/// first interface that is up, is not loopback, and carries an IPv4 address
pub fn get_default_interface() -> Result<NetworkInterface> {
    let iface = pnet::datalink::interfaces()
        .into_iter()
        .find(is_candidate_interface)
        .ok_or_else(|| {
            ArpSweepError::Interface(
                "could not detect default network interface".into(),
            )
        })?;
    NetworkInterface::try_from(iface)
}

fn is_candidate_interface(iface: &PNetNetworkInterface) -> bool {
    iface.is_up()
        && !iface.is_loopback()
        && iface.mac.is_some()
        && iface.ips.iter().any(|i| i.is_ipv4())
}

fn get_interface_ipv4_and_cidr(
    interface: &PNetNetworkInterface,
) -> Option<(Ipv4Addr, String)> {
    let ipnet = interface.ips.iter().find(|i| i.is_ipv4())?;
    let IpAddr::V4(ip) = ipnet.ip() else {
        return None;
    };
    let base = ipnet.network();
    let prefix = ipnet.prefix();
    Some((ip, format!("{base}/{prefix}")))
}

#[cfg(test)]
#[doc(hidden)]
pub fn create_test_interface() -> NetworkInterface {
    NetworkInterface {
        name: "eth7".to_string(),
        description: "test interface".to_string(),
        cidr: "192.168.1.0/24".to_string(),
        ipv4: Ipv4Addr::new(192, 168, 1, 2),
        ips: vec!["192.168.1.2/24".parse().expect("valid ip network")],
        mac: MacAddr::new(0x02, 0x00, 0x00, 0x00, 0x00, 0x02),
        flags: 0,
        index: 7,
    }
}

#[cfg(test)]
#[path = "./network_tests.rs"]
mod tests;
