use serde::Deserialize;

use crate::notification::IconVariant;

/// Red, green, blue and alpha channel of a color.
pub type Rgba = [u8; 4];

/// Replacement colors for the fill and outline areas of the tray icon.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct IconColors {
    pub fill: Rgba,
    pub outline: Rgba,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    new_mail: IconColors,
    some_mail: IconColors,
    no_mail: IconColors,
    indifferent: IconColors,
}

impl Palette {
    pub fn colors_for(&self, icon: IconVariant) -> IconColors {
        match icon {
            IconVariant::NewMail => self.new_mail,
            IconVariant::SomeMail => self.some_mail,
            IconVariant::NoMail => self.no_mail,
            IconVariant::Indifferent => self.indifferent,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        const TRANSPARENT: Rgba = [0, 0, 0, 0];
        const BRIGHT_YELLOW: Rgba = [255, 170, 29, 255];
        Self {
            new_mail: IconColors {
                fill: [238, 210, 2, 255],
                outline: BRIGHT_YELLOW,
            },
            some_mail: IconColors {
                fill: TRANSPARENT,
                outline: BRIGHT_YELLOW,
            },
            no_mail: IconColors {
                fill: [255, 255, 255, 255],
                outline: [127, 127, 127, 255],
            },
            indifferent: IconColors {
                fill: TRANSPARENT,
                outline: [255, 255, 255, 191],
            },
        }
    }
}
