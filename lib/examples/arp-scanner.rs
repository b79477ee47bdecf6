use std::{env, sync::mpsc, sync::Arc, time::Duration};

use arpsweep_lib::{
    network, packet,
    scanners::{arp_scanner::ARPScanner, DeviceRecord, ScanMessage, Scanner},
    targets::ips::IPTargets,
};

fn is_root() -> bool {
    match env::var("USER") {
        Ok(val) => val == "root",
        Err(_e) => false,
    }
}

fn main() {
    if !is_root() {
        panic!("permission denied: must run with root privileges");
    }
    let interface =
        network::get_default_interface().expect("cannot find interface");
    let wire =
        packet::wire::default(&interface).expect("failed to create wire");
    let targets =
        IPTargets::from_cidr(&interface.cidr).expect("failed to parse cidr");
    let (tx, rx) = mpsc::channel::<ScanMessage>();

    let scanner = ARPScanner::builder()
        .interface(Arc::new(interface))
        .wire(wire)
        .targets(targets)
        .timeout(Duration::from_secs(2))
        .notifier(tx)
        .build()
        .expect("failed to build scanner");

    let mut results: Vec<DeviceRecord> = Vec::new();

    let handle = scanner.scan().expect("failed to start scan");

    loop {
        let msg = rx.recv().expect("failed to poll for messages");

        match msg {
            ScanMessage::Done => {
                println!("scanning complete");
                break;
            }
            ScanMessage::ArpReply(reply) => results.push(reply.into()),
            _ => {
                println!("{:?}", msg)
            }
        }
    }

    match handle.join() {
        Ok(Err(e)) => panic!("error: {}", e),
        Err(e) => panic!("error: {:?}", e),
        Ok(Ok(())) => {}
    }

    println!("results: {:?}", results);
}
