//! Dark/light classification of theme backgrounds.

use super::ThemeCatalog;
use crate::error::{Error, Result};
use std::fmt;

/// Background assumed for themes that declare none
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 0xff,
        g: 0xff,
        b: 0xff,
    };

    /// Parse `#rgb` or `#rrggbb`; the `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::invalid_color(hex));
        }

        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(Error::invalid_color(hex)),
        };

        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| Error::invalid_color(hex))
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Perceived brightness, 0.299 R + 0.587 G + 0.114 B
    pub fn luminance(&self) -> f64 {
        f64::from(self.weighted()) / 1000.0
    }

    /// Luminance scaled by 1000 so the threshold test stays exact
    fn weighted(&self) -> u32 {
        299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b)
    }

    pub fn brightness(&self) -> Brightness {
        if self.weighted() < 128_000 {
            Brightness::Dark
        } else {
            Brightness::Light
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Whether a background reads as dark or light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brightness {
    Dark,
    Light,
}

impl Brightness {
    pub fn is_dark(self) -> bool {
        self == Brightness::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Brightness::Dark => "dark",
            Brightness::Light => "light",
        }
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a background color, treating a missing one as white
pub fn classify(background: Option<&str>) -> Result<Brightness> {
    let rgb = match background {
        Some(hex) => Rgb::from_hex(hex)?,
        None => Rgb::WHITE,
    };
    Ok(rgb.brightness())
}

/// Look up a theme's background and classify it
pub fn brightness<C: ThemeCatalog + ?Sized>(catalog: &C, theme: &str) -> Result<Brightness> {
    let background = catalog.background(theme)?;
    classify(background.as_deref())
}

pub fn is_dark<C: ThemeCatalog + ?Sized>(catalog: &C, theme: &str) -> Result<bool> {
    Ok(brightness(catalog, theme)?.is_dark())
}
