//! Custom Error and Result types for this library

use std::{
    any::Any,
    sync::{mpsc::SendError, MutexGuard, PoisonError},
};
use thiserror::Error;

use crate::{
    packet::{arp_packet::ArpRequestBuilderError, Reader, Sender},
    scanners::{arp_scanner::ARPScannerBuilderError, ScanMessage},
};

/// Custom Error type for this library
#[derive(Error, Debug)]
pub enum ArpSweepError {
    /// The network interface or its raw datalink channel could not be used
    #[error("interface error: {_0}")]
    Interface(String),

    /// A frame could not be built or put on the wire
    #[error("send error: {_0}")]
    Send(String),

    /// A frame could not be read off the wire
    #[error("receive error: {_0}")]
    Receive(String),

    /// Target was not a valid IPv4 address or CIDR block
    #[error("invalid range {target:?}: {reason}")]
    InvalidRange {
        /// The offending input
        target: String,
        /// Why it was rejected
        reason: String,
    },

    /// Timeouts must be non-zero
    #[error("invalid timeout: must be greater than zero")]
    InvalidTimeout,

    /// Errors resulting from events channel
    #[error("failed to send notification message: {:#?}", _0)]
    NotifierSendError(#[from] SendError<Box<ScanMessage>>),

    /// Error obtaining lock on packet reader
    #[error("failed to get lock on packet reader: {_0}")]
    PacketReaderLock(String),

    /// Error obtaining lock on packet sender
    #[error("failed to get lock on packet sender: {_0}")]
    PacketSenderLock(String),

    /// Generic thread error
    #[error("thread error: {_0}")]
    ThreadError(String),

    /// Error generated during ARP request construction
    #[error("failed to build ARP request: {_0}")]
    ArpRequestBuild(#[from] ArpRequestBuilderError),

    /// Error resulting from failure to build ARP scanner
    #[error("failed to build arp scanner: {_0}")]
    ArpScannerBuild(#[from] ARPScannerBuilderError),
}

impl From<Box<dyn Any + Send>> for ArpSweepError {
    fn from(value: Box<dyn Any + Send>) -> Self {
        if let Some(s) = value.downcast_ref::<&'static str>() {
            Self::ThreadError(format!("Thread panicked with: {}", s))
        } else if let Some(s) = value.downcast_ref::<String>() {
            Self::ThreadError(format!("Thread panicked with: {}", s))
        } else {
            Self::ThreadError("Thread panicked with an unknown type".into())
        }
    }
}

impl<'a> From<PoisonError<MutexGuard<'a, dyn Reader + 'static>>>
    for ArpSweepError
{
    fn from(value: PoisonError<MutexGuard<'a, dyn Reader + 'static>>) -> Self {
        Self::PacketReaderLock(value.to_string())
    }
}

impl<'a> From<PoisonError<MutexGuard<'a, dyn Sender + 'static>>>
    for ArpSweepError
{
    fn from(value: PoisonError<MutexGuard<'a, dyn Sender + 'static>>) -> Self {
        Self::PacketSenderLock(value.to_string())
    }
}

impl ArpSweepError {
    /// Converter for std::net::AddrParseError
    pub fn from_net_addr_parse_error(
        target: &str,
        error: std::net::AddrParseError,
    ) -> Self {
        Self::InvalidRange {
            target: target.to_string(),
            reason: error.to_string(),
        }
    }

    /// Converter for ipnet::AddrParseError
    pub fn from_ipnet_addr_parse_error(
        target: &str,
        error: ipnet::AddrParseError,
    ) -> Self {
        Self::InvalidRange {
            target: target.to_string(),
            reason: error.to_string(),
        }
    }

    /// Converter for channel send errors
    pub fn from_channel_send_error(e: SendError<ScanMessage>) -> Self {
        ArpSweepError::NotifierSendError(SendError(Box::from(e.0)))
    }
}

/// Custom Result type for this library. All Errors exposed by this library
/// will be returned as [`ArpSweepError`]
pub type Result<T> = std::result::Result<T, ArpSweepError>;
