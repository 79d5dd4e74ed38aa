//!
//! saveppd error taxonomy
//!
use std::io;

use ipp::prelude::IppError;
use ppd::PpdError;

use crate::{copy::CopyError, resolve::ResolveError};

/// saveppd error
#[allow(clippy::large_enum_variant)]
#[derive(Debug, thiserror::Error)]
pub enum SavePpdError {
    #[error("unable to resolve \"{uri}\": {source}")]
    /// DNS-SD name resolution failed
    ResolveError { uri: String, source: ResolveError },

    #[error("bad printer URI \"{0}\"")]
    /// Device URI is malformed or lacks scheme or host
    BadUri(String),

    #[error("unable to connect to \"{host}:{port}\": {source}")]
    /// Transport-level connection failure
    ConnectError {
        host: String,
        port: u16,
        source: IppError,
    },

    #[error(transparent)]
    /// IPP protocol or status error
    IppError(#[from] IppError),

    #[error("unable to create PPD file: {0}")]
    /// Descriptor synthesis failure
    SynthesisError(#[from] PpdError),

    #[error(transparent)]
    /// File copy failure
    CopyError(#[from] CopyError),

    #[error(transparent)]
    /// Local I/O error
    IoError(#[from] io::Error),
}
