//! Core types shared across the crate.

/// Raw timer ticks, the unit of every timer channel reload and count value.
pub type Ticks = u32;

/// Direction of a transition on the echo input pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Pin went low to high. Marks the start of the echo pulse.
    Rising,

    /// Pin went high to low. Marks the end of the echo pulse.
    Falling,
}

/// A measured distance to the nearest obstacle.
///
/// Produced once per measurement cycle by converting elapsed echo ticks and
/// overwritten on the next successful cycle. No history is kept.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Distance(f32);

impl Distance {
    /// Zero distance constant.
    pub const ZERO: Self = Distance(0.0);

    /// Creates a distance from centimeters.
    #[inline]
    pub const fn from_centimeters(cm: f32) -> Self {
        Distance(cm)
    }

    /// Returns the distance in centimeters.
    #[inline]
    pub const fn centimeters(&self) -> f32 {
        self.0
    }
}

/// One of the four physical digit positions of the display, left to right.
///
/// The display renders distances in a fixed `XXX.X` centimeter format, so
/// the rightmost position always carries the first decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitPosition {
    /// Leftmost position, hundreds of centimeters.
    Hundreds,
    /// Tens of centimeters.
    Tens,
    /// Units of centimeters. The decimal point is wired to this position.
    Units,
    /// Rightmost position, tenths of a centimeter.
    Tenths,
}

impl DigitPosition {
    /// The order in which the refresh loop scans the positions,
    /// rightmost first.
    pub const SCAN_ORDER: [DigitPosition; 4] = [
        DigitPosition::Tenths,
        DigitPosition::Units,
        DigitPosition::Tens,
        DigitPosition::Hundreds,
    ];

    /// Index of this position in left-to-right order.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            DigitPosition::Hundreds => 0,
            DigitPosition::Tens => 1,
            DigitPosition::Units => 2,
            DigitPosition::Tenths => 3,
        }
    }
}
