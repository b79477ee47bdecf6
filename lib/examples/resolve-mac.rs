use std::{env, net::Ipv4Addr, str::FromStr, time::Duration};

use arpsweep_lib::{network, prober};

fn main() {
    let target = env::args()
        .nth(1)
        .map(|arg| Ipv4Addr::from_str(&arg).expect("invalid ipv4 address"))
        .expect("usage: resolve-mac <ipv4>");

    let interface =
        network::get_default_interface().expect("cannot find interface");

    match prober::resolve_mac(&interface, target, Duration::from_secs(1)) {
        Ok(Some(mac)) => println!("{target} is at {mac}"),
        Ok(None) => println!("no reply from {target}"),
        Err(e) => panic!("error: {}", e),
    }
}
