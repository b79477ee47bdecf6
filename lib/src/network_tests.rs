use super::*;

fn pnet_interface(
    ips: Vec<&str>,
    mac: Option<MacAddr>,
) -> PNetNetworkInterface {
    PNetNetworkInterface {
        name: "eth7".to_string(),
        description: "test interface".to_string(),
        index: 7,
        mac,
        ips: ips.into_iter().map(|i| i.parse().unwrap()).collect(),
        // IFF_UP | IFF_BROADCAST | IFF_RUNNING
        flags: 0x1 | 0x2 | 0x40,
    }
}

#[test]
fn converts_from_pnet_interface() {
    let mac = MacAddr::new(0x02, 0x42, 0xac, 0x11, 0x00, 0x02);
    let iface =
        pnet_interface(vec!["fe80::1/64", "192.168.1.23/24"], Some(mac));

    let converted = NetworkInterface::try_from(iface).unwrap();

    assert_eq!(converted.name, "eth7");
    assert_eq!(converted.ipv4, Ipv4Addr::new(192, 168, 1, 23));
    assert_eq!(converted.cidr, "192.168.1.0/24");
    assert_eq!(converted.mac, mac);
    assert_eq!(converted.index, 7);
}

#[test]
fn returns_error_when_interface_has_no_mac() {
    let iface = pnet_interface(vec!["192.168.1.23/24"], None);
    let res = NetworkInterface::try_from(iface);
    assert!(matches!(res, Err(ArpSweepError::Interface(_))));
}

#[test]
fn returns_error_when_interface_has_no_ipv4() {
    let iface = pnet_interface(vec!["fe80::1/64"], Some(MacAddr::default()));
    let res = NetworkInterface::try_from(iface);
    assert!(matches!(res, Err(ArpSweepError::Interface(_))));
}

#[test]
fn converts_back_into_pnet_interface() {
    let mac = MacAddr::new(0x02, 0x42, 0xac, 0x11, 0x00, 0x02);
    let original = pnet_interface(vec!["10.0.0.2/8"], Some(mac));
    let converted = NetworkInterface::try_from(original.clone()).unwrap();

    let back: PNetNetworkInterface = (&converted).into();

    assert_eq!(back.name, original.name);
    assert_eq!(back.mac, Some(mac));
    assert_eq!(back.ips, original.ips);
    assert_eq!(back.flags, original.flags);
}

#[cfg(unix)]
#[test]
fn skips_loopback_and_down_interfaces() {
    let mut iface =
        pnet_interface(vec!["192.168.1.23/24"], Some(MacAddr::default()));
    assert!(is_candidate_interface(&iface));

    iface.flags |= 0x8; // IFF_LOOPBACK
    assert!(!is_candidate_interface(&iface));

    iface.flags = 0;
    assert!(!is_candidate_interface(&iface));
}

#[test]
fn returns_error_for_bogus_interface_name() {
    let res = get_interface("noop-not-a-real-iface");
    assert!(matches!(res, Err(ArpSweepError::Interface(_))));
}
