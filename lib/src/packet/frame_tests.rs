use super::*;

fn sample_frame() -> ArpFrame {
    ArpFrame {
        ethernet: EthernetHeader {
            destination: MacAddr::broadcast(),
            source: MacAddr::new(0x02, 0x00, 0x00, 0x00, 0x00, 0x01),
            ethertype: ethernet::EtherTypes::Arp,
        },
        arp: ArpHeader {
            hardware_type: arp::ArpHardwareTypes::Ethernet,
            protocol_type: ethernet::EtherTypes::Ipv4,
            hw_addr_len: 6,
            proto_addr_len: 4,
            operation: arp::ArpOperations::Request,
            sender_hw_addr: MacAddr::new(0x02, 0x00, 0x00, 0x00, 0x00, 0x01),
            sender_proto_addr: Ipv4Addr::new(10, 0, 0, 1),
            target_hw_addr: MacAddr::zero(),
            target_proto_addr: Ipv4Addr::new(10, 0, 0, 5),
        },
    }
}

#[test]
fn writes_fields_at_wire_offsets() {
    let mut buf = [0u8; ARP_FRAME_SIZE];
    sample_frame().write_to(&mut buf).unwrap();

    assert_eq!(&buf[0..6], &[0xff; 6]);
    assert_eq!(&buf[6..12], &[0x02, 0, 0, 0, 0, 0x01]);
    // ethertype ARP
    assert_eq!(&buf[12..14], &[0x08, 0x06]);
    // htype ethernet, ptype ipv4, hlen, plen, opcode request
    assert_eq!(&buf[14..22], &[0x00, 0x01, 0x08, 0x00, 6, 4, 0x00, 0x01]);
    assert_eq!(&buf[28..32], &[10, 0, 0, 1]);
    assert_eq!(&buf[32..38], &[0; 6]);
    assert_eq!(&buf[38..42], &[10, 0, 0, 5]);
}

#[test]
fn reads_back_written_frame() {
    let frame = sample_frame();
    let mut buf = [0u8; ARP_FRAME_SIZE];
    frame.write_to(&mut buf).unwrap();

    assert_eq!(ArpFrame::read_from(&buf), Some(frame));
}

#[test]
fn tolerates_ethernet_padding() {
    let frame = sample_frame();
    let mut buf = [0u8; 60];
    frame.write_to(&mut buf).unwrap();

    assert_eq!(ArpFrame::read_from(&buf), Some(frame));
}

#[test]
fn refuses_short_buffers() {
    let mut buf = [0u8; ARP_FRAME_SIZE - 1];
    assert!(sample_frame().write_to(&mut buf).is_none());
    assert!(ArpFrame::read_from(&buf).is_none());
}

#[test]
fn ignores_non_arp_ethertype() {
    let mut frame = sample_frame();
    frame.ethernet.ethertype = ethernet::EtherTypes::Ipv4;
    let mut buf = [0u8; ARP_FRAME_SIZE];
    frame.write_to(&mut buf).unwrap();

    assert!(ArpFrame::read_from(&buf).is_none());
}

#[test]
fn detects_ethernet_ipv4_mapping() {
    let mut frame = sample_frame();
    assert!(frame.arp.is_ethernet_ipv4());

    frame.arp.hw_addr_len = 8;
    assert!(!frame.arp.is_ethernet_ipv4());
}
