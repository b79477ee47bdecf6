//! Provides Scanner implementation for ARP scanning

use derive_builder::Builder;
use std::{
    sync::{
        mpsc::{self, TryRecvError},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::{
    error::{ArpSweepError, Result},
    network::NetworkInterface,
    packet::{
        self,
        arp_packet::{ArpReply, ArpRequest},
        wire::Wire,
    },
    scanners::{CancelToken, Scanning},
    targets::ips::IPTargets,
};

use super::{ScanMessage, Scanner};

/// Data structure representing an ARP scanner
///
/// One request is broadcast per target address. Replies from targeted
/// addresses are reported on the notifier until `timeout` has elapsed after
/// the last request went out, or until `cancel` is cancelled.
#[derive(Clone, Builder)]
#[builder(setter(into))]
pub struct ARPScanner {
    /// Network interface to use for scanning
    interface: Arc<NetworkInterface>,
    /// Wire for reading and sending packets on the wire
    wire: Wire,
    /// IP targets to scan
    targets: Arc<IPTargets>,
    /// Duration to wait for replies after the last request was sent
    timeout: Duration,
    /// Channel for sending scan results and status messages
    notifier: mpsc::Sender<ScanMessage>,
    /// Ends the collection window early when cancelled
    #[builder(default)]
    cancel: CancelToken,
}

impl ARPScanner {
    /// Returns builder for ARPScanner
    pub fn builder() -> ARPScannerBuilder {
        ARPScannerBuilder::default()
    }

    fn process_target(&self, target: std::net::Ipv4Addr) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Ok(());
        }

        // throttle packet sending to prevent packet loss
        thread::sleep(packet::DEFAULT_PACKET_SEND_TIMING);

        log::debug!("scanning ARP target: {}", target);

        let pkt_buf = ArpRequest::builder()
            .source_ip(self.interface.ipv4)
            .source_mac(self.interface.mac)
            .dest_ip(target)
            .build()?
            .to_raw()?;

        self.notifier
            .send(ScanMessage::Info(Scanning { ip: target }))
            .map_err(ArpSweepError::from_channel_send_error)?;

        let mut pkt_sender = self.wire.0.lock()?;

        // Send to the broadcast address
        pkt_sender.send(&pkt_buf)?;

        Ok(())
    }

    fn process_incoming_packet(&self, pkt: &[u8]) -> Result<()> {
        let Some(reply) = ArpReply::parse(pkt) else {
            return Ok(());
        };

        if !self.targets.contains(&reply.sender_ip) {
            log::debug!(
                "ignoring ARP reply from untargeted address {}",
                reply.sender_ip
            );
            return Ok(());
        }

        self.notifier
            .send(ScanMessage::ArpReply(reply))
            .map_err(ArpSweepError::from_channel_send_error)
    }

    fn read_loop(&self, done: mpsc::Receiver<()>) -> Result<()> {
        let mut reader = self.wire.1.lock()?;

        loop {
            // a hung up sender means the scan thread is gone too
            if !matches!(done.try_recv(), Err(TryRecvError::Empty)) {
                log::debug!("exiting arp packet reader");
                break;
            }

            let Some(pkt) = reader.next_packet()? else {
                continue;
            };

            self.process_incoming_packet(pkt)?;
        }

        Ok(())
    }

    // Implements packet reading in a separate thread so we can send and
    // receive packets simultaneously
    fn read_packets(&self, done: mpsc::Receiver<()>) -> JoinHandle<Result<()>> {
        let self_clone = self.clone();

        thread::spawn(move || -> Result<()> {
            let result = self_clone.read_loop(done);

            if let Err(e) = &result {
                log::error!("arp packet reader failed: {}", e);
                // nothing more will be collected, stop waiting for it
                self_clone.cancel.cancel();
            }

            result
        })
    }
}

// Implements the Scanner trait for ARPScanner
impl Scanner for ARPScanner {
    fn scan(&self) -> Result<JoinHandle<Result<()>>> {
        if self.timeout.is_zero() {
            return Err(ArpSweepError::InvalidTimeout);
        }

        log::debug!(
            "performing ARP scan on {} targets via {}",
            self.targets.len(),
            self.interface.name
        );
        log::debug!("timeout: {:?}", self.timeout);
        log::debug!("starting arp packet reader");

        let self_clone = self.clone();
        let (done_tx, done_rx) = mpsc::channel::<()>();

        let read_handle = self.read_packets(done_rx);

        // prevent blocking thread so messages can be freely sent to consumer
        let scan_handle = thread::spawn(move || -> Result<()> {
            let scan_result = self_clone
                .targets
                .lazy_loop(|t| self_clone.process_target(t));

            // the collection window opens once the last request is out
            if scan_result.is_ok() {
                self_clone.cancel.wait_timeout(self_clone.timeout);
            }

            // ignore errors here as the reader may already be dead due to
            // error, we'll catch any errors from that thread below and report
            let _ = done_tx.send(());

            let read_result = read_handle.join();

            // the reader has stopped, no reply can follow this message
            let done_result = self_clone
                .notifier
                .send(ScanMessage::Done)
                .map_err(ArpSweepError::from_channel_send_error);

            scan_result?;
            read_result??;
            done_result
        });

        Ok(scan_handle)
    }
}

#[cfg(test)]
#[path = "./arp_scanner_tests.rs"]
mod tests;
