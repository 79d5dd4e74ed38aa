//!
//! Command-line utility to save an IPP Everywhere PPD file from a network printer
//!

#![allow(clippy::result_large_err)]

mod copy;
mod error;
mod resolve;
mod retrieve;

use std::{path::PathBuf, process};

use clap::Parser;
use log::debug;

use crate::{error::SavePpdError, retrieve::ClientOptions};

#[derive(Parser)]
#[clap(
    about = "Save an IPP Everywhere PPD file from a network printer",
    name = "saveppd",
    rename_all = "kebab-case"
)]
struct SavePpdParams {
    #[clap(help = "Destination PPD file")]
    output: PathBuf,

    #[clap(help = "Printer URI, either direct (ipp://host/ipp/print) or a DNS-SD service URI")]
    uri: String,

    #[clap(long = "ignore-tls-errors", short = 'i', help = "Ignore TLS handshake errors")]
    ignore_tls_errors: bool,

    #[clap(
        long = "ca-cert",
        short = 'c',
        help = "One or more additional CA certs in PEM or DER format"
    )]
    ca_certs: Vec<PathBuf>,

    #[clap(
        long = "timeout",
        short = 't',
        help = "Request timeout in seconds, default = no timeout"
    )]
    timeout: Option<u64>,
}

fn run(params: &SavePpdParams) -> Result<(), SavePpdError> {
    let options = ClientOptions {
        ignore_tls_errors: params.ignore_tls_errors,
        timeout: params.timeout,
        ca_certs: params.ca_certs.clone(),
    };

    let descriptor = retrieve::fetch_ppd(&params.uri, &options)?;
    copy::copy_file(&descriptor, &params.output)?;

    // the temporary descriptor is removed on drop as well; closing explicitly
    // only to log the failure
    if let Err(err) = descriptor.close() {
        debug!("unable to remove temporary descriptor: {err}");
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let params = SavePpdParams::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        process::exit(if err.use_stderr() { 1 } else { 0 });
    });

    if let Err(err) = run(&params) {
        eprintln!("saveppd: {err}");
        process::exit(1);
    }
}
