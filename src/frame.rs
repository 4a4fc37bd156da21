//! Distance-to-digit decomposition for the four-digit display.

use crate::types::{DigitPosition, Distance};

/// Distances at or above this value render as the all-nines saturation
/// marker; the display tops out at 999.9 cm.
pub const SATURATION_CM: f32 = 1000.0;

/// The four digit values of one refresh frame.
///
/// Each position holds a digit 0-9 or is blank. Frames are recomputed from
/// the current distance on every refresh pass and never persisted.
///
/// Decomposition is banded on the magnitude of the distance, with leading
/// positions blanked rather than zero-padded, and uses integer truncation
/// throughout (9.95 cm renders as "9.9", not "10.0"):
///
/// * `>= 1000` - saturation marker, all four positions show 9
/// * `[100, 1000)` - hundreds, tens, units and tenths all shown
/// * `[10, 100)` - hundreds blanked
/// * `[0, 10)` - hundreds and tens blanked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitFrame {
    digits: [Option<u8>; 4],
}

impl DigitFrame {
    /// Decomposes a distance into the digits of one frame.
    pub fn from_distance(distance: Distance) -> Self {
        let cm = distance.centimeters();

        let digits = if cm >= SATURATION_CM {
            [Some(9), Some(9), Some(9), Some(9)]
        } else if cm >= 100.0 {
            [
                Some(((cm / 100.0) as u32 % 10) as u8),
                Some(((cm / 10.0) as u32 % 10) as u8),
                Some((cm as u32 % 10) as u8),
                Some(((cm * 10.0) as u32 % 10) as u8),
            ]
        } else if cm >= 10.0 {
            [
                None,
                Some(((cm / 10.0) as u32 % 10) as u8),
                Some((cm as u32 % 10) as u8),
                Some(((cm * 10.0) as u32 % 10) as u8),
            ]
        } else {
            [
                None,
                None,
                Some((cm as u32 % 10) as u8),
                Some(((cm * 10.0) as u32 % 10) as u8),
            ]
        };

        Self { digits }
    }

    /// Returns the digit shown at `position`, or `None` when blanked.
    pub fn digit(&self, position: DigitPosition) -> Option<u8> {
        self.digits[position.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn frame(cm: f32) -> [Option<u8>; 4] {
        let frame = DigitFrame::from_distance(Distance::from_centimeters(cm));
        [
            frame.digit(DigitPosition::Hundreds),
            frame.digit(DigitPosition::Tens),
            frame.digit(DigitPosition::Units),
            frame.digit(DigitPosition::Tenths),
        ]
    }

    #[rstest]
    #[case(0.0, [None, None, Some(0), Some(0)])]
    #[case(0.4, [None, None, Some(0), Some(4)])]
    #[case(9.95, [None, None, Some(9), Some(9)])]
    #[case(10.0, [None, Some(1), Some(0), Some(0)])]
    #[case(56.78, [None, Some(5), Some(6), Some(7)])]
    #[case(99.95, [None, Some(9), Some(9), Some(9)])]
    #[case(100.0, [Some(1), Some(0), Some(0), Some(0)])]
    #[case(432.1, [Some(4), Some(3), Some(2), Some(1)])]
    #[case(999.9, [Some(9), Some(9), Some(9), Some(9)])]
    fn decomposition_bands_and_boundaries(
        #[case] cm: f32,
        #[case] expected: [Option<u8>; 4],
    ) {
        assert_eq!(frame(cm), expected);
    }

    #[rstest]
    #[case(1000.0)]
    #[case(1234.5)]
    #[case(100_000.0)]
    fn saturation_marker_fills_all_positions(#[case] cm: f32) {
        assert_eq!(frame(cm), [Some(9), Some(9), Some(9), Some(9)]);
    }

    #[test]
    fn truncates_instead_of_rounding() {
        // 9.95 stays in the lowest band and keeps tenths digit 9
        assert_eq!(frame(9.95), [None, None, Some(9), Some(9)]);
        assert_eq!(frame(0.19), [None, None, Some(0), Some(1)]);
    }

    #[test]
    fn every_position_is_addressable() {
        let frame = DigitFrame::from_distance(Distance::from_centimeters(432.1));
        assert_eq!(frame.digit(DigitPosition::Hundreds), Some(4));
        assert_eq!(frame.digit(DigitPosition::Tens), Some(3));
        assert_eq!(frame.digit(DigitPosition::Units), Some(2));
        assert_eq!(frame.digit(DigitPosition::Tenths), Some(1));
    }
}
