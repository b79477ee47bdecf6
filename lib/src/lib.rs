//! Library package for resolving MAC addresses on a local IPv4 segment
//!
//! Two operations are provided, both built on the same ARP primitive of
//! broadcasting "who-has" requests and collecting replies until a deadline:
//!
//! - [`prober::resolve_mac`] resolves the MAC address of a single IP
//! - [`sweeper::scan_range`] lists every device answering in a CIDR block
//!
//! Opening the raw datalink channel usually requires root privileges.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//! use arpsweep_lib::{network, prober, sweeper};
//!
//! let interface = network::get_default_interface().unwrap();
//! let timeout = Duration::from_secs(1);
//!
//! if let Some(mac) =
//!     prober::resolve_mac(&interface, "192.168.1.1".parse().unwrap(), timeout)
//!         .unwrap()
//! {
//!     println!("gateway is at {mac}");
//! }
//!
//! let devices =
//!     sweeper::scan_range(&interface, &interface.cidr, timeout).unwrap();
//!
//! for device in devices {
//!     println!("{}\t{}", device.ip, device.mac);
//! }
//! ```

#![deny(missing_docs)]
pub mod error;
pub mod network;
pub mod packet;
pub mod prober;
pub mod scanners;
pub mod sweeper;
pub mod targets;
