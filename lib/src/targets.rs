//! Provides helpers for expanding scan targets

pub mod ips;
