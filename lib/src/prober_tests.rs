use std::time::Instant;

use super::*;
use crate::network::create_test_interface;
use crate::packet::arp_packet::create_arp_reply;
use crate::packet::mocks::FakeWire;

fn reply_from(ip: Ipv4Addr, mac: MacAddr) -> Vec<u8> {
    let interface = create_test_interface();
    create_arp_reply(mac, ip, interface.mac, interface.ipv4).to_vec()
}

fn interface() -> Arc<NetworkInterface> {
    Arc::new(create_test_interface())
}

#[test]
fn resolves_mac_of_responding_host() {
    let target = Ipv4Addr::new(10, 0, 0, 5);
    let mac = MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff);
    let fake = FakeWire::new(vec![(
        Duration::from_millis(10),
        reply_from(target, mac),
    )]);

    let res = resolve_mac_on_wire(
        interface(),
        fake.wire,
        target,
        Duration::from_secs(1),
    )
    .unwrap();

    assert_eq!(res.map(|m| m.to_string()), Some("aa:bb:cc:dd:ee:ff".into()));
}

#[test]
fn returns_as_soon_as_target_answers() {
    let target = Ipv4Addr::new(10, 0, 0, 5);
    let fake = FakeWire::new(vec![(
        Duration::from_millis(10),
        reply_from(target, MacAddr::new(2, 0, 0, 0, 0, 5)),
    )]);
    let timeout = Duration::from_secs(10);

    let start = Instant::now();
    let res = resolve_mac_on_wire(interface(), fake.wire, target, timeout);

    assert!(res.unwrap().is_some());
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[test]
fn returns_none_within_timeout_when_nobody_answers() {
    let fake = FakeWire::new(vec![]);
    let timeout = Duration::from_millis(200);

    let start = Instant::now();
    let res = resolve_mac_on_wire(
        interface(),
        fake.wire,
        Ipv4Addr::new(10, 0, 0, 5),
        timeout,
    );
    let elapsed = start.elapsed();

    assert_eq!(res.unwrap(), None);
    assert!(elapsed >= timeout);
    assert!(elapsed <= timeout + Duration::from_millis(50));
}

#[test]
fn ignores_replies_from_other_hosts() {
    let target = Ipv4Addr::new(10, 0, 0, 5);
    let fake = FakeWire::new(vec![
        (
            Duration::from_millis(5),
            reply_from(
                Ipv4Addr::new(10, 0, 0, 6),
                MacAddr::new(2, 0, 0, 0, 0, 6),
            ),
        ),
        (Duration::from_millis(5), vec![0xde, 0xad, 0xbe, 0xef]),
    ]);

    let res = resolve_mac_on_wire(
        interface(),
        fake.wire,
        target,
        Duration::from_millis(100),
    );

    assert_eq!(res.unwrap(), None);
}

#[test]
fn keeps_first_reply_when_target_answers_twice() {
    let target = Ipv4Addr::new(10, 0, 0, 5);
    let first = MacAddr::new(2, 0, 0, 0, 0, 1);
    let fake = FakeWire::new(vec![
        (Duration::from_millis(5), reply_from(target, first)),
        (
            Duration::from_millis(1),
            reply_from(target, MacAddr::new(2, 0, 0, 0, 0, 2)),
        ),
    ]);

    let res = resolve_mac_on_wire(
        interface(),
        fake.wire,
        target,
        Duration::from_millis(200),
    );

    assert_eq!(res.unwrap(), Some(first));
}

#[test]
fn repeated_probes_agree() {
    let target = Ipv4Addr::new(10, 0, 0, 5);
    let mac = MacAddr::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff);

    for _ in 0..3 {
        let fake = FakeWire::new(vec![(
            Duration::from_millis(5),
            reply_from(target, mac),
        )]);
        let res = resolve_mac_on_wire(
            interface(),
            fake.wire,
            target,
            Duration::from_millis(500),
        );
        assert_eq!(res.unwrap(), Some(mac));
    }
}

#[test]
fn releases_wire_after_success() {
    let target = Ipv4Addr::new(10, 0, 0, 5);
    let fake = FakeWire::new(vec![(
        Duration::from_millis(5),
        reply_from(target, MacAddr::new(2, 0, 0, 0, 0, 5)),
    )]);

    resolve_mac_on_wire(interface(), fake.wire, target, Duration::from_secs(1))
        .unwrap();

    assert!(fake.reader_dropped.is_dropped());
    assert!(fake.sender_dropped.is_dropped());
}

#[test]
fn releases_wire_after_timeout() {
    let fake = FakeWire::new(vec![]);

    resolve_mac_on_wire(
        interface(),
        fake.wire,
        Ipv4Addr::new(10, 0, 0, 5),
        Duration::from_millis(50),
    )
    .unwrap();

    assert!(fake.reader_dropped.is_dropped());
    assert!(fake.sender_dropped.is_dropped());
}

#[test]
fn releases_wire_after_send_error() {
    let fake = FakeWire::failing_sends();

    let res = resolve_mac_on_wire(
        interface(),
        fake.wire,
        Ipv4Addr::new(10, 0, 0, 5),
        Duration::from_millis(50),
    );

    assert!(matches!(res, Err(ArpSweepError::Send(_))));
    assert!(fake.reader_dropped.is_dropped());
    assert!(fake.sender_dropped.is_dropped());
}

#[test]
fn rejects_zero_timeout() {
    let fake = FakeWire::new(vec![]);

    let res = resolve_mac_on_wire(
        interface(),
        fake.wire,
        Ipv4Addr::new(10, 0, 0, 5),
        Duration::ZERO,
    );

    assert!(matches!(res, Err(ArpSweepError::InvalidTimeout)));
    assert!(fake.reader_dropped.is_dropped());
}
