// SPDX-License-Identifier: Apache-2.0

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use clap::{Arg, ArgAction};
use trawl::{
    capture, CaptureConfig, ErrorKind, RawSocket, TextSink, TrawlError,
};

const APP_NAME: &str = "trawl";

const ARG_IFNAME: &str = "ifname";
const ARG_PROMISC: &str = "promisc";
const ARG_COUNT: &str = "count";
const ARG_WIDTH: &str = "width";
const ARG_TIMEOUT: &str = "timeout";
const ARG_VERBOSE: &str = "verbose";
const DEFAULT_TIMEOUT_STR: &str = "1";
const DEFAULT_WIDTH_STR: &str = "80";

fn main() {
    let matches = clap::Command::new(APP_NAME)
        .version(clap::crate_version!())
        .about("Decode live Ethernet, IPv4, ICMP, TCP and UDP frames")
        .arg(
            Arg::new(ARG_IFNAME)
                .index(1)
                .help("Interface name, capture on all interfaces if omitted"),
        )
        .arg(
            Arg::new(ARG_PROMISC)
                .long(ARG_PROMISC)
                .short('p')
                .action(ArgAction::SetTrue)
                .help("Put the interface into promiscuous mode"),
        )
        .arg(
            Arg::new(ARG_COUNT)
                .long(ARG_COUNT)
                .short('c')
                .value_parser(clap::value_parser!(u64))
                .help("Exit after this many frames"),
        )
        .arg(
            Arg::new(ARG_WIDTH)
                .long(ARG_WIDTH)
                .short('w')
                .value_parser(clap::value_parser!(usize))
                .default_value(DEFAULT_WIDTH_STR)
                .help("Line width of the payload dump"),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .short('t')
                .value_parser(clap::value_parser!(u32))
                .default_value(DEFAULT_TIMEOUT_STR)
                .help(
                    "Seconds to wait for a frame before checking for \
                     Ctrl-C, 0 to block",
                ),
        )
        .arg(
            Arg::new(ARG_VERBOSE)
                .short('v')
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .get_matches();

    init_log(matches.get_count(ARG_VERBOSE));

    let mut config = CaptureConfig::new();
    if let Some(iface_name) = matches.get_one::<String>(ARG_IFNAME) {
        config.set_iface_name(iface_name);
    }
    config.set_promiscuous(matches.get_flag(ARG_PROMISC));
    if let Some(count) = matches.get_one::<u64>(ARG_COUNT) {
        config.set_max_frames(*count);
    }
    if let Some(width) = matches.get_one::<usize>(ARG_WIDTH) {
        config.set_payload_width(*width);
    }
    if let Some(timeout) = matches.get_one::<u32>(ARG_TIMEOUT) {
        config.set_socket_timeout(*timeout);
    }

    if let Err(e) = run(&config) {
        eprintln!("{e}");
        if e.kind() == ErrorKind::PermissionDenied {
            eprintln!("Raw packet capture requires root or CAP_NET_RAW");
        }
        std::process::exit(1);
    }
}

fn run(config: &CaptureConfig) -> Result<(), TrawlError> {
    let mut socket = RawSocket::new(config)?;

    let stop = Arc::new(AtomicBool::new(false));
    let s = stop.clone();
    ctrlc::set_handler(move || {
        s.store(true, Ordering::SeqCst);
    })
    .map_err(|e| {
        TrawlError::new(
            ErrorKind::Bug,
            format!("Failed to set Ctrl-C handler: {e}"),
        )
    })?;

    let mut sink =
        TextSink::new(std::io::stdout().lock(), config.payload_width());
    let summary = capture(&mut socket, &mut sink, config, &stop)?;
    eprintln!("{summary}");
    Ok(())
}

fn init_log(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter(Some(APP_NAME), level)
        .init();
}
