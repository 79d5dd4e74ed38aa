//!
//! PPD generator for IPP Everywhere printers
//!
use std::{collections::HashMap, io::Write};

use ipp::{
    attribute::{IppAttribute, IppAttributes},
    model::DelimiterTag,
    value::IppValue,
};
use log::debug;

use crate::{error::PpdError, media::MediaSize};

/// Margin assumed when the printer does not report one, hundredths of millimeters
const DEFAULT_MARGIN: i32 = 635;

/// Resolution assumed when the printer does not report one, dots per inch
const DEFAULT_RESOLUTION: i32 = 600;

/// Descriptor synthesis seam: turns response attributes into a PPD byte stream
pub trait PpdSynthesizer {
    /// Write a complete PPD for the given response attributes
    fn synthesize(&self, attributes: &IppAttributes, out: &mut dyn Write) -> Result<(), PpdError>;
}

/// Built-in PPD generator covering media sizes, duplex, color mode and resolution
#[derive(Default)]
pub struct IppEverywherePpd;

impl PpdSynthesizer for IppEverywherePpd {
    fn synthesize(&self, attributes: &IppAttributes, out: &mut dyn Write) -> Result<(), PpdError> {
        let group = attributes
            .groups_of(DelimiterTag::PrinterAttributes)
            .next()
            .ok_or(PpdError::NoPrinterAttributes)?;
        let attrs = group.attributes();

        let sizes = keywords(attrs, IppAttribute::MEDIA_SUPPORTED)
            .iter()
            .filter_map(|name| MediaSize::from_pwg_name(name))
            .collect::<Vec<_>>();
        if sizes.is_empty() {
            return Err(PpdError::MissingAttribute(IppAttribute::MEDIA_SUPPORTED));
        }

        let default_size = first_keyword(attrs, IppAttribute::MEDIA_DEFAULT)
            .and_then(|name| sizes.iter().find(|size| size.pwg_name() == name))
            .unwrap_or(&sizes[0])
            .clone();

        debug!(
            "synthesizing PPD with {} media sizes, default {}",
            sizes.len(),
            default_size.ppd_name()
        );

        let make_and_model = text(attrs, IppAttribute::PRINTER_MAKE_AND_MODEL)
            .unwrap_or_else(|| "Unknown Printer".to_owned())
            .replace('"', "");
        let manufacturer = make_and_model.split_whitespace().next().unwrap_or("Unknown").to_owned();
        let color = boolean(attrs, IppAttribute::COLOR_SUPPORTED).unwrap_or(false);

        writeln!(out, "*PPD-Adobe: \"4.3\"")?;
        writeln!(out, "*FormatVersion: \"4.3\"")?;
        writeln!(out, "*FileVersion: \"{}\"", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "*LanguageVersion: English")?;
        writeln!(out, "*LanguageEncoding: ISOLatin1")?;
        writeln!(out, "*PSVersion: \"(3010.000) 0\"")?;
        writeln!(out, "*LanguageLevel: \"3\"")?;
        writeln!(out, "*FileSystem: False")?;
        writeln!(out, "*PCFileName: \"ippeve.ppd\"")?;
        writeln!(out, "*Manufacturer: \"{manufacturer}\"")?;
        writeln!(out, "*ModelName: \"{make_and_model}\"")?;
        writeln!(out, "*Product: \"({make_and_model})\"")?;
        writeln!(out, "*NickName: \"{make_and_model}, driverless\"")?;
        writeln!(out, "*ShortNickName: \"{make_and_model}\"")?;
        writeln!(out, "*ColorDevice: {}", if color { "True" } else { "False" })?;
        writeln!(out, "*DefaultColorSpace: {}", if color { "RGB" } else { "Gray" })?;
        if let Some(ppm) = integer(attrs, IppAttribute::PAGES_PER_MINUTE) {
            writeln!(out, "*Throughput: \"{ppm}\"")?;
        }
        writeln!(out, "*DefaultResolution: {}", resolution(attrs))?;

        self.write_media(out, attrs, &sizes, &default_size)?;
        self.write_color_model(out, attrs, color)?;
        self.write_duplex(out, attrs)?;

        Ok(())
    }
}

impl IppEverywherePpd {
    fn write_media(
        &self,
        out: &mut dyn Write,
        attrs: &HashMap<String, IppAttribute>,
        sizes: &[MediaSize],
        default_size: &MediaSize,
    ) -> Result<(), PpdError> {
        let bottom = margin_points(attrs, "media-bottom-margin-supported");
        let left = margin_points(attrs, "media-left-margin-supported");
        let right = margin_points(attrs, "media-right-margin-supported");
        let top = margin_points(attrs, "media-top-margin-supported");

        writeln!(out)?;
        writeln!(out, "*OpenUI *PageSize/Media Size: PickOne")?;
        writeln!(out, "*OrderDependency: 10 AnySetup *PageSize")?;
        writeln!(out, "*DefaultPageSize: {}", default_size.ppd_name())?;
        for size in sizes {
            writeln!(
                out,
                "*PageSize {}: \"<</PageSize[{} {}]>>setpagedevice\"",
                size.ppd_name(),
                size.width(),
                size.length()
            )?;
        }
        writeln!(out, "*CloseUI: *PageSize")?;

        writeln!(out)?;
        writeln!(out, "*OpenUI *PageRegion/Media Size: PickOne")?;
        writeln!(out, "*OrderDependency: 10 AnySetup *PageRegion")?;
        writeln!(out, "*DefaultPageRegion: {}", default_size.ppd_name())?;
        for size in sizes {
            writeln!(
                out,
                "*PageRegion {}: \"<</PageSize[{} {}]>>setpagedevice\"",
                size.ppd_name(),
                size.width(),
                size.length()
            )?;
        }
        writeln!(out, "*CloseUI: *PageRegion")?;

        writeln!(out)?;
        writeln!(out, "*DefaultImageableArea: {}", default_size.ppd_name())?;
        writeln!(out, "*DefaultPaperDimension: {}", default_size.ppd_name())?;
        for size in sizes {
            writeln!(
                out,
                "*ImageableArea {}: \"{:.1} {:.1} {:.1} {:.1}\"",
                size.ppd_name(),
                left,
                bottom,
                f64::from(size.width()) - right,
                f64::from(size.length()) - top
            )?;
        }
        for size in sizes {
            writeln!(
                out,
                "*PaperDimension {}: \"{} {}\"",
                size.ppd_name(),
                size.width(),
                size.length()
            )?;
        }

        Ok(())
    }

    fn write_color_model(
        &self,
        out: &mut dyn Write,
        attrs: &HashMap<String, IppAttribute>,
        color: bool,
    ) -> Result<(), PpdError> {
        let modes = keywords(attrs, IppAttribute::PRINT_COLOR_MODE_SUPPORTED);
        if !modes.contains(&"color") && !modes.contains(&"monochrome") {
            return Ok(());
        }

        let default_mode = first_keyword(attrs, IppAttribute::PRINT_COLOR_MODE_DEFAULT).unwrap_or("auto");
        let default_model = if default_mode == "color" || (default_mode == "auto" && color) {
            "RGB"
        } else {
            "Gray"
        };

        writeln!(out)?;
        writeln!(out, "*OpenUI *ColorModel/Color Mode: PickOne")?;
        writeln!(out, "*OrderDependency: 10 AnySetup *ColorModel")?;
        writeln!(out, "*DefaultColorModel: {default_model}")?;
        if modes.contains(&"monochrome") {
            writeln!(
                out,
                "*ColorModel Gray/Grayscale: \"<</cupsColorSpace 18/cupsBitsPerColor 8>>setpagedevice\""
            )?;
        }
        if modes.contains(&"color") {
            writeln!(
                out,
                "*ColorModel RGB/Color: \"<</cupsColorSpace 19/cupsBitsPerColor 8>>setpagedevice\""
            )?;
        }
        writeln!(out, "*CloseUI: *ColorModel")?;

        Ok(())
    }

    fn write_duplex(&self, out: &mut dyn Write, attrs: &HashMap<String, IppAttribute>) -> Result<(), PpdError> {
        let sides = keywords(attrs, IppAttribute::SIDES_SUPPORTED);
        if !sides.iter().any(|side| side.starts_with("two-sided")) {
            return Ok(());
        }

        let default_duplex = match first_keyword(attrs, IppAttribute::SIDES_DEFAULT) {
            Some("two-sided-long-edge") => "DuplexNoTumble",
            Some("two-sided-short-edge") => "DuplexTumble",
            _ => "None",
        };

        writeln!(out)?;
        writeln!(out, "*OpenUI *Duplex/2-Sided Printing: PickOne")?;
        writeln!(out, "*OrderDependency: 10 AnySetup *Duplex")?;
        writeln!(out, "*DefaultDuplex: {default_duplex}")?;
        writeln!(out, "*Duplex None/Off: \"<</Duplex false>>setpagedevice\"")?;
        writeln!(out, "*Duplex DuplexNoTumble/Long-Edge: \"<</Duplex true/Tumble false>>setpagedevice\"")?;
        writeln!(out, "*Duplex DuplexTumble/Short-Edge: \"<</Duplex true/Tumble true>>setpagedevice\"")?;
        writeln!(out, "*CloseUI: *Duplex")?;

        Ok(())
    }
}

fn keywords<'a>(attrs: &'a HashMap<String, IppAttribute>, name: &str) -> Vec<&'a str> {
    attrs
        .get(name)
        .map(|attr| {
            attr.value()
                .into_iter()
                .filter_map(|value| value.as_keyword())
                .map(String::as_str)
                .collect()
        })
        .unwrap_or_default()
}

fn first_keyword<'a>(attrs: &'a HashMap<String, IppAttribute>, name: &str) -> Option<&'a str> {
    attrs
        .get(name)
        .and_then(|attr| attr.value().into_iter().filter_map(|value| value.as_keyword()).next())
        .map(String::as_str)
}

fn text(attrs: &HashMap<String, IppAttribute>, name: &str) -> Option<String> {
    attrs
        .get(name)
        .map(|attr| attr.value().to_string())
        .filter(|value| !value.is_empty())
}

fn boolean(attrs: &HashMap<String, IppAttribute>, name: &str) -> Option<bool> {
    attrs.get(name).and_then(|attr| attr.value().as_boolean()).copied()
}

fn integer(attrs: &HashMap<String, IppAttribute>, name: &str) -> Option<i32> {
    attrs.get(name).and_then(|attr| attr.value().as_integer()).copied()
}

fn margin_points(attrs: &HashMap<String, IppAttribute>, name: &str) -> f64 {
    let hundredths = attrs
        .get(name)
        .and_then(|attr| {
            attr.value()
                .into_iter()
                .filter_map(|value| value.as_integer())
                .copied()
                .min()
        })
        .unwrap_or(DEFAULT_MARGIN);

    f64::from(hundredths) * 72.0 / 2540.0
}

fn resolution(attrs: &HashMap<String, IppAttribute>) -> String {
    let (xres, yres) = match attrs.get(IppAttribute::PRINTER_RESOLUTION_DEFAULT).map(IppAttribute::value) {
        Some(IppValue::Resolution {
            cross_feed,
            feed,
            units: 3,
        }) => (*cross_feed, *feed),
        // dots per centimeter
        Some(IppValue::Resolution {
            cross_feed,
            feed,
            units: 4,
        }) => (
            (f64::from(*cross_feed) * 2.54).round() as i32,
            (f64::from(*feed) * 2.54).round() as i32,
        ),
        _ => (DEFAULT_RESOLUTION, DEFAULT_RESOLUTION),
    };

    if xres == yres {
        format!("{xres}dpi")
    } else {
        format!("{xres}x{yres}dpi")
    }
}
