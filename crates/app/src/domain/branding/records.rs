//! Branding Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

pub const DEFAULT_PRIMARY_COLOR: &str = "#111827";
pub const DEFAULT_SECONDARY_COLOR: &str = "#f59e0b";

/// Fonts a tenant may pick for customer-facing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    #[default]
    Inter,
    Roboto,
    Lato,
    Montserrat,
    Poppins,
    OpenSans,
}

impl FontFamily {
    pub const ALL: [Self; 6] = [
        Self::Inter,
        Self::Roboto,
        Self::Lato,
        Self::Montserrat,
        Self::Poppins,
        Self::OpenSans,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inter => "inter",
            Self::Roboto => "roboto",
            Self::Lato => "lato",
            Self::Montserrat => "montserrat",
            Self::Poppins => "poppins",
            Self::OpenSans => "open-sans",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown font family `{0}`")]
pub struct UnknownFontFamily(pub String);

impl FromStr for FontFamily {
    type Err = UnknownFontFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|font| font.as_str() == normalised)
            .ok_or_else(|| UnknownFontFamily(s.to_string()))
    }
}

/// Branding Record
///
/// `updated_at` is `None` when the tenant has never customised its branding
/// and the defaults are being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandingRecord {
    pub primary_color: String,
    pub secondary_color: String,
    pub logo_url: Option<String>,
    pub font_family: FontFamily,
    pub updated_at: Option<Timestamp>,
}

impl Default for BrandingRecord {
    fn default() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            logo_url: None,
            font_family: FontFamily::default(),
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_family_parses_case_insensitively() {
        assert_eq!("Open-Sans".parse::<FontFamily>(), Ok(FontFamily::OpenSans));
        assert_eq!(" ROBOTO ".parse::<FontFamily>(), Ok(FontFamily::Roboto));
    }

    #[test]
    fn unknown_font_family_is_rejected() {
        assert_eq!(
            "comic-sans".parse::<FontFamily>(),
            Err(UnknownFontFamily("comic-sans".to_string()))
        );
    }

    #[test]
    fn font_family_round_trips_through_display() {
        for font in FontFamily::ALL {
            assert_eq!(font.to_string().parse::<FontFamily>(), Ok(font));
        }
    }

    #[test]
    fn default_branding_uses_house_theme() {
        let branding = BrandingRecord::default();

        assert_eq!(branding.primary_color, "#111827");
        assert_eq!(branding.secondary_color, "#f59e0b");
        assert_eq!(branding.logo_url, None);
        assert_eq!(branding.font_family, FontFamily::Inter);
        assert_eq!(branding.updated_at, None);
    }
}
