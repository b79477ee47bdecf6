//! CLI for resolving MAC addresses and sweeping local networks with ARP
//!
//! # Examples
//!
//! ```bash
//! # help menu
//! sudo arpsweep --help
//!
//! # resolve a single address
//! sudo arpsweep 192.168.1.1
//!
//! # sweep a network
//! sudo arpsweep 192.168.1.0/24
//! ```
use arpsweep_lib::{
    error::ArpSweepError,
    network::{self, NetworkInterface},
    prober,
    scanners::{DeviceRecord, DEFAULT_TIMEOUT},
    sweeper,
    targets::ips::IPTargets,
};
use clap::Parser;
use color_eyre::eyre::Result;
use log::*;
use pnet::util::MacAddr;
use std::{net::Ipv4Addr, str::FromStr};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// CLI for resolving MAC addresses and sweeping local networks with ARP
struct Args {
    /// Target IPv4 address, or CIDR block to sweep (e.g. 192.168.1.0/24)
    target: String,

    /// How long to wait for replies, e.g. 500ms, 2s
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT.into())]
    timeout: humantime::Duration,

    /// Choose a specific network interface for the scan
    #[arg(short, long)]
    interface: Option<String>,

    /// Output results in json instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Only print results, no logs
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Prints debug logs including those from arpsweep-lib
    #[arg(long, default_value_t = false)]
    debug: bool,
}

#[doc(hidden)]
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    Host(Ipv4Addr),
    Range(String),
}

impl FromStr for Target {
    type Err = ArpSweepError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains('/') {
            IPTargets::from_cidr(s)?;
            return Ok(Target::Range(s.to_string()));
        }
        Ipv4Addr::from_str(s)
            .map(Target::Host)
            .map_err(|e| ArpSweepError::from_net_addr_parse_error(s, e))
    }
}

#[doc(hidden)]
fn initialize_logger(args: &Args) -> Result<()> {
    let filter = if args.quiet {
        simplelog::LevelFilter::Error
    } else if args.debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    // logs go to stderr so stdout only ever carries results
    simplelog::TermLogger::init(
        filter,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

#[doc(hidden)]
fn print_args(args: &Args, interface: &NetworkInterface) {
    info!("configuration:");
    info!("target:          {}", args.target);
    info!("timeout:         {}", args.timeout);
    info!("json:            {}", args.json);
    info!("interface:       {}", interface.name);
    info!("cidr:            {}", interface.cidr);
    info!("user_ip:         {}", interface.ipv4);
    info!("user_mac:        {}", interface.mac);
}

#[doc(hidden)]
fn select_interface(name: Option<&str>) -> Result<NetworkInterface> {
    let interface = match name {
        Some(name) => network::get_interface(name)?,
        None => network::get_default_interface()?,
    };
    Ok(interface)
}

#[doc(hidden)]
fn format_mac_result(
    args: &Args,
    target: Ipv4Addr,
    mac: Option<MacAddr>,
) -> Result<String> {
    if args.json {
        let record = mac.map(|mac| DeviceRecord { ip: target, mac });
        return Ok(serde_json::to_string(&record)?);
    }

    Ok(match mac {
        Some(mac) => format!("MAC address for {}: {}", target, mac),
        None => format!("Could not get MAC address for {}", target),
    })
}

#[doc(hidden)]
fn format_devices(args: &Args, devices: &[DeviceRecord]) -> Result<String> {
    if args.json {
        return Ok(serde_json::to_string(devices)?);
    }

    let mut lines = vec!["IP\t\t\tMAC Address".to_string(), "-".repeat(50)];

    for d in devices {
        lines.push(format!("{}\t\t{}", d.ip, d.mac));
    }

    Ok(lines.join("\n"))
}

#[doc(hidden)]
fn run(args: &Args) -> Result<()> {
    color_eyre::install()?;

    initialize_logger(args)?;

    let target = Target::from_str(&args.target)?;

    if args.timeout.is_zero() {
        return Err(ArpSweepError::InvalidTimeout.into());
    }

    let interface = select_interface(args.interface.as_deref())?;

    print_args(args, &interface);

    let output = match target {
        Target::Host(ip) => {
            info!("resolving {}...", ip);
            let mac = prober::resolve_mac(&interface, ip, *args.timeout)?;
            format_mac_result(args, ip, mac)?
        }
        Target::Range(cidr) => {
            info!("sweeping {}...", cidr);
            let devices =
                sweeper::scan_range(&interface, &cidr, *args.timeout)?;
            format_devices(args, &devices)?
        }
    };

    println!("{}", output);

    Ok(())
}

#[doc(hidden)]
fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        println!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
#[path = "./main_tests.rs"]
mod tests;
