/// An 8-bit RGBA colour. Stroke and fill colours are written to content
/// streams in the DeviceRGB colour space; alpha is carried along but not
/// emitted.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new, opaque colour. r, g, and b range from 0 to 255
    pub const fn rgb(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b, a: 255 }
    }

    /// Create a new colour with an explicit alpha. All components range from 0 to 255
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Colour {
        Colour { r, g, b, a }
    }

    /// The red, green and blue channels scaled to the 0.0 to 1.0 range
    pub fn normalised(&self) -> [f64; 3] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        ]
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from(c: (u8, u8, u8)) -> Self {
        Colour::rgb(c.0, c.1, c.2)
    }
}

impl From<[u8; 3]> for Colour {
    fn from(c: [u8; 3]) -> Self {
        let [r, g, b] = c;
        Colour::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for Colour {
    fn from(c: (u8, u8, u8, u8)) -> Self {
        Colour::rgba(c.0, c.1, c.2, c.3)
    }
}

impl From<[u8; 4]> for Colour {
    fn from(c: [u8; 4]) -> Self {
        let [r, g, b, a] = c;
        Colour::rgba(r, g, b, a)
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::rgb(0, 0, 0);
    pub const WHITE: Colour = Colour::rgb(255, 255, 255);
    pub const RED: Colour = Colour::rgb(255, 0, 0);
    pub const GREEN: Colour = Colour::rgb(0, 255, 0);
    pub const BLUE: Colour = Colour::rgb(0, 0, 255);
    pub const CYAN: Colour = Colour::rgb(0, 255, 255);
    pub const MAGENTA: Colour = Colour::rgb(255, 0, 255);
    pub const YELLOW: Colour = Colour::rgb(255, 255, 0);
}
