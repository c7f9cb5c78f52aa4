use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Integer pixel rectangle in root-window coordinates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect { x, y, width, height }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}{:+}{:+}", self.width, self.height, self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid geometry {0:?}, expected WIDTHxHEIGHT+X+Y")]
pub struct ParseRectError(String);

/// Parses X11-style geometry strings: `5120x1440+1920+0`, `1920x1080-1920+0`.
impl FromStr for Rect {
    type Err = ParseRectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRectError(s.to_string());
        let (width, rest) = s.split_once('x').ok_or_else(err)?;
        let offset_start = rest.find(['+', '-']).ok_or_else(err)?;
        let (height, offsets) = rest.split_at(offset_start);
        let y_start = offsets[1..].find(['+', '-']).map(|i| i + 1).ok_or_else(err)?;
        let (x, y) = offsets.split_at(y_start);
        Ok(Rect {
            x: x.parse().map_err(|_| err())?,
            y: y.parse().map_err(|_| err())?,
            width: width.parse().map_err(|_| err())?,
            height: height.parse().map_err(|_| err())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;

    #[test]
    fn parses_x11_geometry() {
        assert_eq!("5120x1440+1920+0".parse(), Ok(Rect::new(1920, 0, 5120, 1440)));
        assert_eq!("1920x1080-1920+0".parse(), Ok(Rect::new(-1920, 0, 1920, 1080)));
        assert!("1920x1080".parse::<Rect>().is_err());
        assert!("widex1080+0+0".parse::<Rect>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        let rect = Rect::new(-1920, 40, 1920, 1040);
        assert_eq!(rect.to_string(), "1920x1040-1920+40");
        assert_eq!(rect.to_string().parse(), Ok(rect));
    }
}
