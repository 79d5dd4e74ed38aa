//!
//! PWG 5101.1 self-describing media size names
//!

/// Well-known PWG names with their traditional PPD size names
const PPD_NAMES: &[(&str, &str)] = &[
    ("iso_a3_297x420mm", "A3"),
    ("iso_a4_210x297mm", "A4"),
    ("iso_a5_148x210mm", "A5"),
    ("iso_a6_105x148mm", "A6"),
    ("iso_b5_176x250mm", "ISOB5"),
    ("iso_c5_162x229mm", "EnvC5"),
    ("iso_dl_110x220mm", "EnvDL"),
    ("jis_b5_182x257mm", "B5"),
    ("jpn_hagaki_100x148mm", "Postcard"),
    ("na_executive_7.25x10.5in", "Executive"),
    ("na_ledger_11x17in", "Tabloid"),
    ("na_legal_8.5x14in", "Legal"),
    ("na_letter_8.5x11in", "Letter"),
    ("na_monarch_3.875x7.5in", "EnvMonarch"),
    ("na_number-10_4.125x9.5in", "Env10"),
];

const POINTS_PER_MM: f64 = 72.0 / 25.4;
const POINTS_PER_INCH: f64 = 72.0;

/// Media size parsed from a PWG self-describing name, dimensions in points
#[derive(Clone, Debug, PartialEq)]
pub struct MediaSize {
    pwg_name: String,
    ppd_name: String,
    width: i32,
    length: i32,
}

impl MediaSize {
    /// Parse a self-describing name of the form `class_name_WxH{mm,in}`,
    /// e.g. `iso_a4_210x297mm`. Custom size ranges and names without an
    /// embedded dimension are rejected with `None`.
    pub fn from_pwg_name(name: &str) -> Option<MediaSize> {
        if name.starts_with("custom_") {
            return None;
        }

        let dimensions = name.rsplit('_').next()?;
        let (dimensions, unit_to_points) = if let Some(stripped) = dimensions.strip_suffix("mm") {
            (stripped, POINTS_PER_MM)
        } else if let Some(stripped) = dimensions.strip_suffix("in") {
            (stripped, POINTS_PER_INCH)
        } else {
            return None;
        };

        let (width, length) = dimensions.split_once('x')?;
        let width = width.parse::<f64>().ok()?;
        let length = length.parse::<f64>().ok()?;
        if width <= 0.0 || length <= 0.0 {
            return None;
        }

        let ppd_name = PPD_NAMES
            .iter()
            .find(|(pwg, _)| *pwg == name)
            .map(|(_, ppd)| (*ppd).to_owned())
            .unwrap_or_else(|| name.to_owned());

        Some(MediaSize {
            pwg_name: name.to_owned(),
            ppd_name,
            width: (width * unit_to_points).round() as i32,
            length: (length * unit_to_points).round() as i32,
        })
    }

    /// Return the original PWG name
    pub fn pwg_name(&self) -> &str {
        &self.pwg_name
    }

    /// Return the PPD size name, falling back to the PWG name for sizes
    /// without a traditional one
    pub fn ppd_name(&self) -> &str {
        &self.ppd_name
    }

    /// Return the width in points
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Return the length in points
    pub fn length(&self) -> i32 {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millimeter_size() {
        let size = MediaSize::from_pwg_name("iso_a4_210x297mm").unwrap();
        assert_eq!(size.ppd_name(), "A4");
        assert_eq!(size.width(), 595);
        assert_eq!(size.length(), 842);
    }

    #[test]
    fn test_inch_size() {
        let size = MediaSize::from_pwg_name("na_letter_8.5x11in").unwrap();
        assert_eq!(size.ppd_name(), "Letter");
        assert_eq!(size.width(), 612);
        assert_eq!(size.length(), 792);

        let size = MediaSize::from_pwg_name("na_legal_8.5x14in").unwrap();
        assert_eq!(size.ppd_name(), "Legal");
        assert_eq!(size.length(), 1008);
    }

    #[test]
    fn test_unknown_size_keeps_pwg_name() {
        let size = MediaSize::from_pwg_name("om_card_54x86mm").unwrap();
        assert_eq!(size.ppd_name(), "om_card_54x86mm");
        assert_eq!(size.width(), 153);
        assert_eq!(size.length(), 244);
    }

    #[test]
    fn test_custom_ranges_are_rejected() {
        assert_eq!(MediaSize::from_pwg_name("custom_min_76x127mm"), None);
        assert_eq!(MediaSize::from_pwg_name("custom_max_2159x3556mm"), None);
    }

    #[test]
    fn test_malformed_names_are_rejected() {
        assert_eq!(MediaSize::from_pwg_name(""), None);
        assert_eq!(MediaSize::from_pwg_name("iso_a4"), None);
        assert_eq!(MediaSize::from_pwg_name("na_letter_8.5x11"), None);
        assert_eq!(MediaSize::from_pwg_name("iso_a4_0x297mm"), None);
    }
}
