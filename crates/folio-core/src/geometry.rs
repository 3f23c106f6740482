#![forbid(unsafe_code)]

//! Geometric primitives and viewport classification.

/// A point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: u32,
    /// Height in CSS pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a new viewport.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Height as a floating-point pixel count, for scroll arithmetic.
    #[inline]
    pub fn height_px(&self) -> f64 {
        f64::from(self.height)
    }

    /// Current orientation. A square viewport counts as portrait.
    #[inline]
    pub const fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Layout class derived from viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    /// Wide layout: custom cursor, pagination, drag-to-scroll.
    Desktop,
    /// Narrow layout: native behavior only.
    Mobile,
}

impl ViewportClass {
    /// Whether this is the desktop class.
    #[inline]
    pub const fn is_desktop(self) -> bool {
        matches!(self, Self::Desktop)
    }
}

/// Device orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Taller than wide, or square.
    Portrait,
    /// Wider than tall.
    Landscape,
}

/// Input-device class, used to pick reveal pacing and touch-only affordances.
///
/// How a host decides the class (user agent, pointer media queries) is its own
/// policy; the engine only consumes the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceClass {
    /// Mouse-driven device.
    #[default]
    Desktop,
    /// Touch-driven device.
    Touch,
}

impl DeviceClass {
    /// Whether this is a touch-class device.
    #[inline]
    pub const fn is_touch(self) -> bool {
        matches!(self, Self::Touch)
    }
}

/// Width threshold below which the layout is mobile.
pub const DEFAULT_DESKTOP_THRESHOLD: u32 = 812;

/// Viewport classification policy.
///
/// A viewport is desktop class iff `width > desktop_threshold`; a width exactly
/// at the threshold is mobile. Classification is a pure function of width, so
/// re-measuring an unchanged viewport never flips the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportConfig {
    /// Largest width that still counts as mobile.
    pub desktop_threshold: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            desktop_threshold: DEFAULT_DESKTOP_THRESHOLD,
        }
    }
}

impl ViewportConfig {
    /// Set the desktop threshold.
    #[must_use]
    pub const fn with_desktop_threshold(mut self, threshold: u32) -> Self {
        self.desktop_threshold = threshold;
        self
    }

    /// Classify a viewport.
    #[inline]
    #[must_use]
    pub const fn classify(&self, viewport: Viewport) -> ViewportClass {
        if viewport.width > self.desktop_threshold {
            ViewportClass::Desktop
        } else {
            ViewportClass::Mobile
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_boundary_is_mobile() {
        let cfg = ViewportConfig::default();
        assert_eq!(cfg.classify(Viewport::new(811, 900)), ViewportClass::Mobile);
        assert_eq!(cfg.classify(Viewport::new(812, 900)), ViewportClass::Mobile);
        assert_eq!(cfg.classify(Viewport::new(813, 900)), ViewportClass::Desktop);
    }

    #[test]
    fn classification_is_stable_under_remeasure() {
        let cfg = ViewportConfig::default().with_desktop_threshold(1000);
        let vp = Viewport::new(1000, 700);
        let first = cfg.classify(vp);
        for _ in 0..10 {
            assert_eq!(cfg.classify(vp), first);
        }
    }

    #[test]
    fn orientation_from_dimensions() {
        assert_eq!(Viewport::new(1280, 720).orientation(), Orientation::Landscape);
        assert_eq!(Viewport::new(390, 844).orientation(), Orientation::Portrait);
        assert_eq!(Viewport::new(500, 500).orientation(), Orientation::Portrait);
    }

    #[test]
    fn device_class_default_is_desktop() {
        assert!(!DeviceClass::default().is_touch());
        assert!(DeviceClass::Touch.is_touch());
    }
}
