//! Provides helpers for expanding IP targets

use ipnet::Ipv4Net;
use std::{net, str::FromStr, sync::Arc};

use crate::error::{ArpSweepError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents the addresses targeted by a scan
///
/// Targets are either a single IPv4 address or every host of a CIDR block.
/// Only the blocks are stored; the host addresses inside them are produced
/// lazily when looping, so a /16 does not cost 65534 stored addresses.
///
/// # Examples
///
/// ```
/// # use std::net;
/// # use arpsweep_lib::error::Result;
/// # use arpsweep_lib::targets::ips::IPTargets;
/// let print_ip = |ip: net::Ipv4Addr| -> Result<()> {
///   println!("ip: {}", ip);
///   Ok(())
/// };
/// let ips = IPTargets::from_cidr("192.168.68.1/24").unwrap();
/// assert_eq!(ips.len(), 254);
/// ips.lazy_loop(print_ip).unwrap();
/// ```
pub struct IPTargets(Vec<Ipv4Net>, usize);

// Number of addresses hosts() yields for a block. The network and broadcast
// addresses are excluded except for /31 and /32.
fn host_count(block: &Ipv4Net) -> usize {
    let total = 1u64 << (32 - u32::from(block.prefix_len()));
    let hosts = if block.prefix_len() >= 31 { total } else { total - 2 };
    hosts as usize
}

impl IPTargets {
    /// Returns targets consisting of exactly one address
    pub fn from_ip(ip: net::Ipv4Addr) -> Arc<Self> {
        Arc::new(Self::from_blocks(vec![Ipv4Net::from(ip)]))
    }

    /// Returns targets for every host address of a CIDR block
    ///
    /// # Errors
    ///
    /// Returns [`ArpSweepError::InvalidRange`] if `cidr` is a bare address or
    /// not a valid CIDR block
    pub fn from_cidr(cidr: &str) -> Result<Arc<Self>> {
        let cidr = cidr.trim();
        if !cidr.contains('/') {
            return Err(ArpSweepError::InvalidRange {
                target: cidr.to_string(),
                reason: "expected CIDR notation such as 192.168.1.0/24"
                    .into(),
            });
        }
        let block = Ipv4Net::from_str(cidr).map_err(|e| {
            ArpSweepError::from_ipnet_addr_parse_error(cidr, e)
        })?;
        Ok(Arc::new(Self::from_blocks(vec![block])))
    }

    fn from_blocks(blocks: Vec<Ipv4Net>) -> Self {
        let len = blocks.iter().map(host_count).sum();
        Self(blocks, len)
    }

    /// Returns the number of addresses that will be targeted. For
    /// `192.168.0.1/24` this is 254
    pub fn len(&self) -> usize {
        self.1
    }

    /// Returns true if the list is empty
    pub fn is_empty(&self) -> bool {
        self.1 == 0
    }

    /// Returns true if `ip` falls inside any of the targeted blocks
    pub fn contains(&self, ip: &net::Ipv4Addr) -> bool {
        self.0.iter().any(|block| block.contains(ip))
    }

    /// Loops over every targeted address, stopping at the first error
    pub fn lazy_loop<F: FnMut(net::Ipv4Addr) -> Result<()>>(
        &self,
        mut cb: F,
    ) -> Result<()> {
        for block in self.0.iter() {
            for ip in block.hosts() {
                cb(ip)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "./ips_tests.rs"]
mod tests;
