//!
//! PPD descriptor generation from IPP Everywhere printer attributes.
//!
//! Modern network printers describe their capabilities through IPP attributes,
//! while a lot of print-processing software still consumes legacy PPD files.
//! This crate bridges the two: given the attribute groups of a
//! Get-Printer-Attributes response it writes a PPD covering media sizes,
//! duplex, color mode and resolution.
//!
//! The synthesis entry point is the [`PpdSynthesizer`] trait so that callers
//! can swap in a different descriptor builder without changing the plumbing.
//! [`IppEverywherePpd`] is the built-in implementation.
//!
//! Usage example:
//!
//!```rust
//! use ipp::{attribute::{IppAttribute, IppAttributes}, model::DelimiterTag, value::IppValue};
//! use ppd::{IppEverywherePpd, PpdSynthesizer};
//!
//! let mut attributes = IppAttributes::new();
//! attributes.add(
//!     DelimiterTag::PrinterAttributes,
//!     IppAttribute::new(
//!         IppAttribute::MEDIA_SUPPORTED,
//!         IppValue::Keyword("iso_a4_210x297mm".to_owned()),
//!     ),
//! );
//!
//! let mut descriptor = Vec::new();
//! IppEverywherePpd.synthesize(&attributes, &mut descriptor).unwrap();
//! assert!(descriptor.starts_with(b"*PPD-Adobe"));
//!```

pub mod error;
pub mod generator;
pub mod media;

pub use error::PpdError;
pub use generator::{IppEverywherePpd, PpdSynthesizer};
pub use media::MediaSize;
