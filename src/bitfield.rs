//! Fixed-width bit-field codec.
//!
//! Frame parameters are stored densely: several small integers share one 32-bit
//! word, each occupying a declared (offset, width) span. This module provides the
//! generic pack/unpack primitive those words are built from.
//!
//! The codec never rejects a value. Anything wider than the declared field is
//! masked down on encode; range enforcement is the validator's job and happens
//! before a value reaches this layer. Within the declared width the round trip is
//! lossless: `decode(encode(word, x)) == x`.
//!
//! # Examples
//!
//! ```
//! use air_rs::bitfield::BitField;
//!
//! const LOW: BitField = BitField::new(0, 16);
//! const HIGH: BitField = BitField::new(16, 16);
//!
//! let word = HIGH.encode(LOW.encode(0, 12), 9000);
//! assert_eq!(LOW.decode(word), 12);
//! assert_eq!(HIGH.decode(word), 9000);
//! ```

/// A contiguous span of bits inside a packed 32-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
	offset: u32,
	width: u32,
}

impl BitField {
	/// Creates a field covering `width` bits starting at `offset`.
	///
	/// `offset + width` must not exceed 32.
	pub const fn new(offset: u32, width: u32) -> Self {
		assert!(width >= 1 && offset + width <= 32);
		Self { offset, width }
	}

	/// Creates a single-bit flag field at `offset`.
	pub const fn flag(offset: u32) -> Self {
		Self::new(offset, 1)
	}

	/// Bit offset of the field within its word.
	pub const fn offset(self) -> u32 {
		self.offset
	}

	/// Width of the field in bits.
	pub const fn width(self) -> u32 {
		self.width
	}

	/// In-place mask covering the field's bits.
	pub const fn mask(self) -> u32 {
		if self.width == 32 { u32::MAX } else { ((1u32 << self.width) - 1) << self.offset }
	}

	/// Largest value the field can hold.
	pub const fn max_value(self) -> u32 {
		self.mask() >> self.offset
	}

	/// Writes `value` into the field, leaving all other bits of `word` intact.
	///
	/// Values wider than the field are masked, not rejected.
	pub const fn encode(self, word: u32, value: u32) -> u32 {
		(word & !self.mask()) | ((value << self.offset) & self.mask())
	}

	/// Reads the field's value out of `word`.
	pub const fn decode(self, word: u32) -> u32 {
		(word & self.mask()) >> self.offset
	}

	/// Sets or clears a single-bit flag field.
	pub const fn encode_flag(self, word: u32, set: bool) -> u32 {
		self.encode(word, set as u32)
	}

	/// Reads a single-bit flag field.
	pub const fn decode_flag(self, word: u32) -> bool {
		self.decode(word) != 0
	}
}
