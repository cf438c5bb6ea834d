//! Per-field range predicates.
//!
//! Pure, stateless interval checks invoked before every field commit. Values
//! arrive as `i64` so that anything a line can express numerically fits; the
//! predicates decide whether it fits the field.

use crate::constants;

/// Animation numbers occupy 0..=2147483647.
pub const fn animation_number_in_range(value: i64) -> bool {
	0 <= value && value <= constants::ANIMATION_NUMBER_MAX
}

/// Sprite group and image numbers occupy -1..=65535, -1 meaning "no sprite".
pub const fn sprite_in_range(value: i64) -> bool {
	constants::SPRITE_MIN <= value && value <= constants::SPRITE_MAX
}

/// Positions occupy the full signed 32-bit range.
pub const fn position_in_range(value: i64) -> bool {
	i32::MIN as i64 <= value && value <= i32::MAX as i64
}

/// Display durations occupy -1..=2147483647, -1 meaning "hold forever".
pub const fn duration_in_range(value: i64) -> bool {
	constants::DURATION_MIN <= value && value <= i32::MAX as i64
}

/// Alpha channels occupy 0..=256.
pub const fn alpha_in_range(value: i64) -> bool {
	0 <= value && value <= constants::ALPHA_MAX
}

/// Loop start offsets occupy 0..=2147483647.
pub const fn loop_offset_in_range(value: i64) -> bool {
	0 <= value && value <= constants::LOOP_OFFSET.max_value() as i64
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_animation_number_bounds() {
		assert!(animation_number_in_range(0));
		assert!(animation_number_in_range(2147483647));
		assert!(!animation_number_in_range(-1));
		assert!(!animation_number_in_range(2147483648));
	}

	#[test]
	fn test_sprite_bounds() {
		assert!(sprite_in_range(-1));
		assert!(sprite_in_range(0));
		assert!(sprite_in_range(65535));
		assert!(!sprite_in_range(-2));
		assert!(!sprite_in_range(65536));
		assert!(!sprite_in_range(70000));
	}

	#[test]
	fn test_position_bounds() {
		assert!(position_in_range(i32::MIN as i64));
		assert!(position_in_range(i32::MAX as i64));
		assert!(!position_in_range(i32::MIN as i64 - 1));
		assert!(!position_in_range(i32::MAX as i64 + 1));
	}

	#[test]
	fn test_duration_bounds() {
		assert!(duration_in_range(-1));
		assert!(duration_in_range(i32::MAX as i64));
		assert!(!duration_in_range(-2));
		assert!(!duration_in_range(i32::MAX as i64 + 1));
	}

	#[test]
	fn test_alpha_bounds() {
		assert!(alpha_in_range(0));
		assert!(alpha_in_range(256));
		assert!(!alpha_in_range(-1));
		assert!(!alpha_in_range(257));
	}

	#[test]
	fn test_loop_offset_bounds() {
		assert!(loop_offset_in_range(0));
		assert!(loop_offset_in_range(2147483647));
		assert!(!loop_offset_in_range(-1));
		assert!(!loop_offset_in_range(2147483648));
	}
}
