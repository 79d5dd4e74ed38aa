//!
//! Printer descriptor retrieval
//!
//! One pass over the wire: resolve the device URI if needed, send a single
//! Get-Printer-Attributes request and synthesize a PPD from the response
//! into a temporary file. The client, response and temporary file are all
//! scoped so they are released on every exit path.
//!
use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
    time::Duration,
};

use ipp::prelude::*;
use log::debug;
use ppd::{IppEverywherePpd, PpdSynthesizer};
use tempfile::TempPath;

use crate::{error::SavePpdError, resolve};

/// Client options collected from the command line
pub struct ClientOptions {
    pub ignore_tls_errors: bool,
    pub timeout: Option<u64>,
    pub ca_certs: Vec<PathBuf>,
}

/// Fetch the attributes of the printer at `device_uri` and synthesize a PPD
/// into a temporary file. The returned path removes the file when dropped.
pub fn fetch_ppd(device_uri: &str, options: &ClientOptions) -> Result<TempPath, SavePpdError> {
    let uri = if resolve::is_dnssd_uri(device_uri) {
        resolve::resolve(device_uri).map_err(|source| SavePpdError::ResolveError {
            uri: device_uri.to_owned(),
            source,
        })?
    } else {
        parse_device_uri(device_uri)?
    };

    let host = uri.host().unwrap_or_default().to_owned();
    let port = uri.port_u16().unwrap_or_else(|| default_port(&uri));

    let client = new_client(uri.clone(), options)?;
    let operation = IppOperationBuilder::get_printer_attributes(uri.clone()).build();

    debug!("sending Get-Printer-Attributes request to {uri}");

    let response = client.send(operation).map_err(|source| match source {
        IppError::ClientError(_) | IppError::IoError(_) => SavePpdError::ConnectError { host, port, source },
        other => SavePpdError::IppError(other),
    })?;

    let status = response.header().status_code();
    if !status.is_success() {
        return Err(SavePpdError::IppError(IppError::StatusError(status)));
    }

    write_descriptor(response.attributes())
}

fn new_client(uri: Uri, options: &ClientOptions) -> io::Result<IppClient> {
    let mut builder = IppClient::builder(uri).ignore_tls_errors(options.ignore_tls_errors);
    if let Some(timeout) = options.timeout {
        builder = builder.request_timeout(Duration::from_secs(timeout));
    }

    for cert in &options.ca_certs {
        builder = builder.ca_cert(fs::read(cert)?);
    }

    Ok(builder.build())
}

/// Parse a direct device URI, rejecting anything without a scheme and host
fn parse_device_uri(device_uri: &str) -> Result<Uri, SavePpdError> {
    device_uri
        .parse::<Uri>()
        .ok()
        .filter(|uri| uri.scheme().is_some() && uri.host().is_some())
        .ok_or_else(|| SavePpdError::BadUri(device_uri.to_owned()))
}

fn default_port(uri: &Uri) -> u16 {
    match uri.scheme_str() {
        Some("ipps") | Some("https") => 443,
        _ => 631,
    }
}

/// Synthesize the descriptor into a scoped temporary file
fn write_descriptor(attributes: &IppAttributes) -> Result<TempPath, SavePpdError> {
    let mut file = tempfile::Builder::new().prefix("saveppd-").suffix(".ppd").tempfile()?;
    IppEverywherePpd.synthesize(attributes, &mut file)?;
    file.flush()?;

    Ok(file.into_temp_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_device_uri() {
        assert!(parse_device_uri("ipp://printer.local/ipp/print").is_ok());
        assert!(matches!(parse_device_uri(""), Err(SavePpdError::BadUri(_))));
        assert!(matches!(parse_device_uri("/no/host"), Err(SavePpdError::BadUri(_))));
        assert!(matches!(parse_device_uri("not a uri"), Err(SavePpdError::BadUri(_))));
    }

    #[test]
    fn test_default_ports() {
        assert_eq!(default_port(&"ipp://host/ipp/print".parse().unwrap()), 631);
        assert_eq!(default_port(&"ipps://host/ipp/print".parse().unwrap()), 443);
    }

    #[test]
    fn test_write_descriptor_round_trip() {
        let mut attributes = IppAttributes::new();
        attributes.add(
            DelimiterTag::PrinterAttributes,
            IppAttribute::new(
                IppAttribute::MEDIA_SUPPORTED,
                IppValue::Keyword("iso_a4_210x297mm".to_owned()),
            ),
        );

        let path = write_descriptor(&attributes).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("*PPD-Adobe: \"4.3\""));

        let leftover = path.to_path_buf();
        drop(path);
        assert!(!leftover.exists());
    }

    #[test]
    fn test_write_descriptor_surfaces_synthesis_failure() {
        assert!(matches!(
            write_descriptor(&IppAttributes::new()),
            Err(SavePpdError::SynthesisError(_))
        ));
    }
}
