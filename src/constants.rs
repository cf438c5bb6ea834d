//! AIR format constants.
//!
//! Packed word layouts, per-field validation bounds, and parser tuning values
//! shared across the crate.

use crate::bitfield::BitField;

// ── Sprite word (32 bits) ──
//
// Group and image are stored as raw 16-bit fields. The value -1 ("no sprite")
// does not live here; it is flagged in the extra word so that 65535 stays a
// legal sprite number.

/// Sprite group number, low 16 bits of the sprite word.
pub const SPRITE_GROUP: BitField = BitField::new(0, 16);

/// Sprite image number, high 16 bits of the sprite word.
pub const SPRITE_IMAGE: BitField = BitField::new(16, 16);

// ── Extra-parameter word (32 bits) ──

/// Horizontal facing flag.
pub const FLIP_H: BitField = BitField::flag(0);

/// Vertical facing flag.
pub const FLIP_V: BitField = BitField::flag(1);

/// Alpha source channel A (0..=256, 9 bits).
pub const ALPHA_A: BitField = BitField::new(2, 9);

/// Alpha source channel S (0..=256, 9 bits).
pub const ALPHA_S: BitField = BitField::new(11, 9);

/// Alpha destination channel D (0..=256, 9 bits).
pub const ALPHA_D: BitField = BitField::new(20, 9);

/// Marks the sprite group as unset (-1).
pub const DUMMY_GROUP: BitField = BitField::flag(29);

/// Marks the sprite image as unset (-1).
pub const DUMMY_IMAGE: BitField = BitField::flag(30);

// ── Loop word (32 bits) ──

/// Loop start element offset (0..=2147483647, 31 bits).
pub const LOOP_OFFSET: BitField = BitField::new(0, 31);

/// Set when the animation declared a `Loopstart` marker.
pub const LOOP_EXISTS: BitField = BitField::flag(31);

// ── Validation bounds ──

/// Smallest registrable sprite group/image number (-1 = no sprite).
pub const SPRITE_MIN: i64 = -1;

/// Largest registrable sprite group/image number.
pub const SPRITE_MAX: i64 = 65535;

/// Largest registrable alpha channel value.
pub const ALPHA_MAX: i64 = 256;

/// Smallest registrable display duration (-1 = infinite).
pub const DURATION_MIN: i64 = -1;

/// Largest registrable animation number.
pub const ANIMATION_NUMBER_MAX: i64 = i32::MAX as i64;

// ── Parser tuning ──

/// Default upper bound on input size (bytes) before a parse is refused.
pub const DEFAULT_MAX_INPUT_SIZE: u64 = 16 * 1024 * 1024;

/// Rough bytes-per-record figure used to derive frame capacity from input size.
pub const APPROX_BYTES_PER_RECORD: usize = 24;

/// Rough bytes-per-block figure used to derive header capacity from input size.
pub const APPROX_BYTES_PER_BLOCK: usize = 256;

/// Canonical file extension for animation scripts.
pub const AIR_EXTENSION: &str = "air";
