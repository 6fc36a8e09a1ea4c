// theme.rs - Color themes

use egui::Color32;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::life::Shade;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
    Dartmouth,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("theme '{0}' not available, choose 'dark', 'light' or 'dartmouth'")]
pub struct UnknownTheme(pub String);

/// The three colors a theme draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub dying: Color32,
    pub alive: Color32,
    pub background: Color32,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Dark, Theme::Light, Theme::Dartmouth];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::Dartmouth => "dartmouth",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                dying: Color32::from_rgb(200, 200, 200),
                alive: Color32::from_rgb(255, 255, 255),
                background: Color32::from_rgb(0, 0, 0),
            },
            Theme::Light => Palette {
                dying: Color32::from_rgb(55, 55, 55),
                alive: Color32::from_rgb(0, 0, 0),
                background: Color32::from_rgb(255, 255, 255),
            },
            Theme::Dartmouth => Palette {
                dying: Color32::from_rgb(200, 200, 200),
                alive: Color32::from_rgb(255, 255, 255),
                background: Color32::from_rgb(0, 105, 62),
            },
        }
    }
}

impl Palette {
    /// Newborn cells share the alive color.
    pub fn color(&self, shade: Shade) -> Color32 {
        match shade {
            Shade::Alive | Shade::Born => self.alive,
            Shade::Dying => self.dying,
            Shade::Empty => self.background,
        }
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.name() == wanted)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
