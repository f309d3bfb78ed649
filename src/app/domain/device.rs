use std::fmt;

use serde::{Deserialize, Serialize};

/// One side of a device viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Fill the preview area (`100%`).
    Fluid,
    Pixels(u32),
}

impl Dimension {
    pub fn pixels(self) -> Option<u32> {
        match self {
            Dimension::Fluid => None,
            Dimension::Pixels(px) => Some(px),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Fluid => f.write_str("100%"),
            Dimension::Pixels(px) => write!(f, "{}px", px),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeviceKind {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 3] = [DeviceKind::Desktop, DeviceKind::Tablet, DeviceKind::Mobile];

    pub fn preset(self) -> &'static DevicePreset {
        match self {
            DeviceKind::Desktop => &DEVICES[0],
            DeviceKind::Tablet => &DEVICES[1],
            DeviceKind::Mobile => &DEVICES[2],
        }
    }
}

/// A named, fixed viewport size used to simulate a screen class in the preview.
#[derive(Debug, PartialEq, Eq)]
pub struct DevicePreset {
    pub kind: DeviceKind,
    pub name: &'static str,
    pub width: Dimension,
    pub height: Dimension,
}

pub static DEVICES: [DevicePreset; 3] = [
    DevicePreset {
        kind: DeviceKind::Desktop,
        name: "Desktop",
        width: Dimension::Fluid,
        height: Dimension::Fluid,
    },
    DevicePreset {
        kind: DeviceKind::Tablet,
        name: "Tablet",
        width: Dimension::Pixels(768),
        height: Dimension::Pixels(1024),
    },
    DevicePreset {
        kind: DeviceKind::Mobile,
        name: "Mobile",
        width: Dimension::Pixels(375),
        height: Dimension::Pixels(812),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_match_kind() {
        for kind in DeviceKind::ALL {
            assert_eq!(kind.preset().kind, kind);
        }
    }

    #[test]
    fn test_tablet_and_mobile_sizes() {
        let tablet = DeviceKind::Tablet.preset();
        assert_eq!(tablet.width, Dimension::Pixels(768));
        assert_eq!(tablet.height, Dimension::Pixels(1024));

        let mobile = DeviceKind::Mobile.preset();
        assert_eq!(mobile.width.pixels(), Some(375));
        assert_eq!(mobile.height.pixels(), Some(812));
    }

    #[test]
    fn test_dimension_display() {
        assert_eq!(Dimension::Fluid.to_string(), "100%");
        assert_eq!(Dimension::Pixels(768).to_string(), "768px");
    }
}
