//!
//! PPD synthesis errors
//!
use std::io;

/// PPD synthesis error
#[derive(Debug, thiserror::Error)]
pub enum PpdError {
    #[error("no printer attributes in the response")]
    /// Response carried no printer attributes group
    NoPrinterAttributes,

    #[error("missing or unusable \"{0}\" attribute")]
    /// A required attribute is absent or carries no usable values
    MissingAttribute(&'static str),

    #[error(transparent)]
    /// Descriptor I/O error
    IoError(#[from] io::Error),
}
