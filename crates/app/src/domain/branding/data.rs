//! Branding Data

use crate::domain::branding::records::FontFamily;

/// Branding Update Data, as submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandingUpdate {
    pub primary_color: String,
    pub secondary_color: String,
    pub logo_url: Option<String>,
    pub font_family: String,
}

/// Branding values that passed validation and are ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidBranding {
    pub primary_color: String,
    pub secondary_color: String,
    pub logo_url: Option<String>,
    pub font_family: FontFamily,
}

impl BrandingUpdate {
    /// Validate and normalise the update; the error names the offending field.
    pub(crate) fn validate(&self) -> Result<ValidBranding, &'static str> {
        let primary_color = normalise_hex_color(&self.primary_color).ok_or("primary_color")?;
        let secondary_color =
            normalise_hex_color(&self.secondary_color).ok_or("secondary_color")?;

        let logo_url = match self.logo_url.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(url) if is_http_url(url) => Some(url.to_string()),
            Some(_) => return Err("logo_url"),
        };

        let font_family = self
            .font_family
            .parse::<FontFamily>()
            .map_err(|_unknown| "font_family")?;

        Ok(ValidBranding {
            primary_color,
            secondary_color,
            logo_url,
            font_family,
        })
    }
}

/// `#rrggbb` in lower case, or `None` when `value` is not a six digit hex color.
pub fn normalise_hex_color(value: &str) -> Option<String> {
    let digits = value.trim().strip_prefix('#')?;

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    Some(format!("#{}", digits.to_ascii_lowercase()))
}

/// Absolute `http` or `https` URL with a non-empty host and no whitespace.
pub fn is_http_url(value: &str) -> bool {
    let lowered = value.to_ascii_lowercase();

    let Some(rest) = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
    else {
        return false;
    };

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();

    !host.is_empty() && !value.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update() -> BrandingUpdate {
        BrandingUpdate {
            primary_color: "#0F172A".to_string(),
            secondary_color: "#22c55e".to_string(),
            logo_url: Some("https://cdn.example.com/logo.png".to_string()),
            font_family: "Lato".to_string(),
        }
    }

    #[test]
    fn hex_colors_are_lower_cased() {
        assert_eq!(normalise_hex_color("#ABCDEF"), Some("#abcdef".to_string()));
        assert_eq!(normalise_hex_color(" #123abc "), Some("#123abc".to_string()));
    }

    #[test]
    fn malformed_hex_colors_are_rejected() {
        assert_eq!(normalise_hex_color("123abc"), None);
        assert_eq!(normalise_hex_color("#fff"), None);
        assert_eq!(normalise_hex_color("#gggggg"), None);
        assert_eq!(normalise_hex_color("#1234567"), None);
    }

    #[test]
    fn http_urls_are_accepted() {
        assert!(is_http_url("https://example.com/logo.png"));
        assert!(is_http_url("http://example.com"));
        assert!(is_http_url("HTTPS://EXAMPLE.COM/a?b=c"));
    }

    #[test]
    fn non_http_urls_are_rejected() {
        assert!(!is_http_url("ftp://example.com/logo.png"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("https:///logo.png"));
        assert!(!is_http_url("javascript:alert(1)"));
        assert!(!is_http_url("https://example.com/my logo.png"));
    }

    #[test]
    fn valid_update_is_normalised() {
        assert_eq!(
            update().validate(),
            Ok(ValidBranding {
                primary_color: "#0f172a".to_string(),
                secondary_color: "#22c55e".to_string(),
                logo_url: Some("https://cdn.example.com/logo.png".to_string()),
                font_family: FontFamily::Lato,
            })
        );
    }

    #[test]
    fn blank_logo_url_is_cleared() {
        let mut update = update();
        update.logo_url = Some("  ".to_string());

        assert_eq!(update.validate().map(|valid| valid.logo_url), Ok(None));
    }

    #[test]
    fn validation_names_the_invalid_field() {
        let mut bad_primary = update();
        bad_primary.primary_color = "red".to_string();
        assert_eq!(bad_primary.validate(), Err("primary_color"));

        let mut bad_secondary = update();
        bad_secondary.secondary_color = "#12345".to_string();
        assert_eq!(bad_secondary.validate(), Err("secondary_color"));

        let mut bad_logo = update();
        bad_logo.logo_url = Some("data:image/png;base64,AAAA".to_string());
        assert_eq!(bad_logo.validate(), Err("logo_url"));

        let mut bad_font = update();
        bad_font.font_family = "papyrus".to_string();
        assert_eq!(bad_font.validate(), Err("font_family"));
    }
}
