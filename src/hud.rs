//! Score display
//!
//! The HUD shows the score as five glyph images, ten-thousands first.

use crate::consts::SCORE_DISPLAY_MAX;

/// Number of digit slots on the HUD
pub const SCORE_DIGITS: usize = 5;

/// Split a score into display digits (ten-thousands ... units).
///
/// Scores past 99999 pin the display at 99999.
pub fn score_digits(score: u32) -> [u8; SCORE_DIGITS] {
    let mut value = score.min(SCORE_DISPLAY_MAX);
    let mut digits = [0u8; SCORE_DIGITS];
    for slot in digits.iter_mut().rev() {
        *slot = (value % 10) as u8;
        value /= 10;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert_eq!(score_digits(0), [0, 0, 0, 0, 0]);
        assert_eq!(score_digits(42), [0, 0, 0, 4, 2]);
        assert_eq!(score_digits(50_000), [5, 0, 0, 0, 0]);
    }

    #[test]
    fn test_display_pins_at_max() {
        assert_eq!(score_digits(123_456), [9, 9, 9, 9, 9]);
    }
}
