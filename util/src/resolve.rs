//!
//! DNS-SD printer URI resolution
//!
//! Printers advertised over mDNS are addressed with service URIs such as
//! `ipp://Example%20Printer._ipp._tcp.local/`. Before a connection can be
//! made the instance has to be resolved into a concrete host, port and
//! resource path, the latter coming from the `rp` TXT key of the service
//! record.
//!
use std::{
    net::IpAddr,
    time::{Duration, Instant},
};

use ipp::prelude::Uri;
use log::debug;
use mdns_sd::{ServiceDaemon, ServiceEvent, ServiceInfo};
use percent_encoding::percent_decode_str;

/// How long to wait for the service to show up on the network
const RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);

/// DNS-SD resolution error
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("bad service name \"{0}\"")]
    /// URI host is not an instance + service type pair
    BadServiceName(String),

    #[error(transparent)]
    /// mDNS daemon or browse failure
    MdnsError(#[from] mdns_sd::Error),

    #[error("no response within {} seconds", RESOLVE_TIMEOUT.as_secs())]
    /// Service did not resolve in time
    Timeout,

    #[error("service resolved without addresses")]
    /// Resolved record carried no usable address
    NoAddress,

    #[error(transparent)]
    /// Rebuilt URI is invalid
    InvalidUri(#[from] http::uri::InvalidUri),
}

/// Check whether the device URI needs DNS-SD resolution before use
pub fn is_dnssd_uri(uri: &str) -> bool {
    uri.contains("._tcp")
}

/// Resolve a DNS-SD printer URI into a directly connectable one
pub fn resolve(device_uri: &str) -> Result<Uri, ResolveError> {
    let host = device_uri
        .parse::<Uri>()
        .ok()
        .and_then(|uri| uri.host().map(ToOwned::to_owned))
        .ok_or_else(|| ResolveError::BadServiceName(device_uri.to_owned()))?;

    let (instance, service) = service_parts(&host).ok_or_else(|| ResolveError::BadServiceName(host.clone()))?;
    let scheme = if service.starts_with("_ipps") { "ipps" } else { "ipp" };
    let fullname = format!("{instance}.{service}");

    debug!("browsing {service} for \"{instance}\"");

    let daemon = ServiceDaemon::new()?;
    let receiver = daemon.browse(&service)?;
    let deadline = Instant::now() + RESOLVE_TIMEOUT;

    let resolved = loop {
        match receiver.recv_deadline(deadline) {
            Ok(ServiceEvent::ServiceResolved(info)) if info.get_fullname().eq_ignore_ascii_case(&fullname) => {
                break service_uri(scheme, &info);
            }
            Ok(_) => continue,
            Err(_) => break Err(ResolveError::Timeout),
        }
    };

    let _ = daemon.shutdown();
    resolved
}

/// Split a DNS-SD URI host into the percent-decoded instance name and the
/// browsable service type. A host without a domain defaults to `.local`.
fn service_parts(host: &str) -> Option<(String, String)> {
    let tcp = host.find("._tcp")?;
    let service_start = host[..tcp].rfind('.')?;
    let instance = &host[..service_start];
    if instance.is_empty() {
        return None;
    }

    let mut service = host[service_start + 1..].trim_end_matches('.').to_owned();
    if service.ends_with("._tcp") {
        service.push_str(".local");
    }
    service.push('.');

    let instance = percent_decode_str(instance).decode_utf8_lossy().into_owned();
    Some((instance, service))
}

fn service_uri(scheme: &str, info: &ServiceInfo) -> Result<Uri, ResolveError> {
    let address = info
        .get_addresses()
        .iter()
        .next()
        .copied()
        .ok_or(ResolveError::NoAddress)?;
    let resource = info.get_property_val_str("rp").unwrap_or("");

    debug!("resolved to {address}:{} resource \"{resource}\"", info.get_port());

    Ok(assemble(scheme, address, info.get_port(), resource)?)
}

/// Build the concrete printer URI from the resolved address, port and
/// resource path
fn assemble(scheme: &str, address: IpAddr, port: u16, resource: &str) -> Result<Uri, http::uri::InvalidUri> {
    let authority = match address {
        IpAddr::V4(_) => format!("{address}:{port}"),
        IpAddr::V6(_) => format!("[{address}]:{port}"),
    };

    format!("{scheme}://{authority}/{}", resource.trim_start_matches('/')).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_dnssd_uri() {
        assert!(is_dnssd_uri("ipp://Example%20Printer._ipp._tcp.local/"));
        assert!(is_dnssd_uri("ipps://Secure._ipps._tcp.local/"));
        assert!(!is_dnssd_uri("ipp://printer.local:631/ipp/print"));
    }

    #[test]
    fn test_service_parts() {
        let (instance, service) = service_parts("Example%20Printer._ipp._tcp.local").unwrap();
        assert_eq!(instance, "Example Printer");
        assert_eq!(service, "_ipp._tcp.local.");

        let (instance, service) = service_parts("Secure._ipps._tcp.local.").unwrap();
        assert_eq!(instance, "Secure");
        assert_eq!(service, "_ipps._tcp.local.");
    }

    #[test]
    fn test_service_parts_default_domain() {
        let (_, service) = service_parts("Printer._ipp._tcp").unwrap();
        assert_eq!(service, "_ipp._tcp.local.");
    }

    #[test]
    fn test_service_parts_rejects_incomplete_hosts() {
        assert_eq!(service_parts("printer.local"), None);
        assert_eq!(service_parts("._ipp._tcp.local"), None);
    }

    #[test]
    fn test_assemble() {
        let uri = assemble("ipp", "192.168.1.10".parse().unwrap(), 631, "ipp/print").unwrap();
        assert_eq!(uri.to_string(), "ipp://192.168.1.10:631/ipp/print");

        let uri = assemble("ipps", "fe80::1".parse().unwrap(), 443, "").unwrap();
        assert_eq!(uri.to_string(), "ipps://[fe80::1]:443/");
    }
}
