//! Page formats and orientation

/// Physical page format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageFormat {
    /// ISO A4, 210 x 297 mm
    #[default]
    A4,
    /// US Letter, 8.5 x 11 in
    Letter,
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page dimensions in points (1/72 inch)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageFormat {
    /// Portrait dimensions in points
    fn portrait(self) -> PageSize {
        match self {
            PageFormat::A4 => PageSize {
                width: 595.28,
                height: 841.89,
            },
            PageFormat::Letter => PageSize {
                width: 612.0,
                height: 792.0,
            },
        }
    }

    /// Dimensions in points for the given orientation
    pub fn size(self, orientation: Orientation) -> PageSize {
        let portrait = self.portrait();
        match orientation {
            Orientation::Portrait => portrait,
            Orientation::Landscape => PageSize {
                width: portrait.height,
                height: portrait.width,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_portrait() {
        let size = PageFormat::A4.size(Orientation::Portrait);
        assert_eq!(size.width, 595.28);
        assert_eq!(size.height, 841.89);
    }

    #[test]
    fn test_a4_landscape_swaps_axes() {
        let size = PageFormat::A4.size(Orientation::Landscape);
        assert_eq!(size.width, 841.89);
        assert_eq!(size.height, 595.28);
    }

    #[test]
    fn test_letter_landscape() {
        let size = PageFormat::Letter.size(Orientation::Landscape);
        assert_eq!((size.width, size.height), (792.0, 612.0));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(PageFormat::default(), PageFormat::A4);
        assert_eq!(Orientation::default(), Orientation::Portrait);
    }
}
