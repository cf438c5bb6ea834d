//! Animation headers: one per `[Begin Action]` block.
//!
//! A header owns a contiguous (start, count) slice of the store's flat frame
//! array instead of an embedded frame container. Loop state is packed into one
//! word: a 31-bit element offset plus an existence bit, mirroring the on-disk
//! `Loopstart` marker.

use crate::constants;

/// Immutable description of one parsed animation block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationHeader {
	id: u32,
	loop_word: u32,
	frame_start: u32,
	frame_count: u32,
}

impl AnimationHeader {
	/// Header backing the dummy animation view: id 0, no loop, no frames.
	pub(crate) const DUMMY: Self = Self { id: 0, loop_word: 0, frame_start: 0, frame_count: 0 };

	/// Creates a header for the block starting at `frame_start` with
	/// `frame_count` records. `loop_offset` is the element playback loops back
	/// to, when the block declared a `Loopstart` marker.
	pub fn new(id: u32, frame_start: usize, frame_count: usize, loop_offset: Option<u32>) -> Self {
		let loop_word = match loop_offset {
			Some(offset) => constants::LOOP_EXISTS
				.encode_flag(constants::LOOP_OFFSET.encode(0, offset), true),
			None => 0,
		};
		Self { id, loop_word, frame_start: frame_start as u32, frame_count: frame_count as u32 }
	}

	/// External animation number (0..=2147483647).
	pub fn id(&self) -> u32 {
		self.id
	}

	/// Returns `true` when the block declared a `Loopstart` marker.
	pub fn has_loop(&self) -> bool {
		constants::LOOP_EXISTS.decode_flag(self.loop_word)
	}

	/// Element offset playback loops back to. 0 when no loop was declared.
	pub fn loop_elem(&self) -> u32 {
		constants::LOOP_OFFSET.decode(self.loop_word)
	}

	/// Index of the first owned record in the flat frame array.
	pub fn frame_start(&self) -> usize {
		self.frame_start as usize
	}

	/// Number of owned records.
	pub fn frame_count(&self) -> usize {
		self.frame_count as usize
	}

	/// Returns `true` for a zero-frame block.
	pub fn is_empty(&self) -> bool {
		self.frame_count == 0
	}

	/// The packed loop word (31-bit offset plus existence bit).
	pub fn loop_word(&self) -> u32 {
		self.loop_word
	}
}

impl std::fmt::Display for AnimationHeader {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "[Begin Action {}] ({} frames", self.id, self.frame_count)?;
		if self.has_loop() {
			write!(f, ", loop at {}", self.loop_elem())?;
		}
		write!(f, ")")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_loop_word_round_trip() {
		let header = AnimationHeader::new(44, 10, 3, Some(2));
		assert!(header.has_loop());
		assert_eq!(header.loop_elem(), 2);
		assert_eq!(header.frame_start(), 10);
		assert_eq!(header.frame_count(), 3);
	}

	#[test]
	fn test_no_loop() {
		let header = AnimationHeader::new(44, 0, 5, None);
		assert!(!header.has_loop());
		assert_eq!(header.loop_elem(), 0);
		assert_eq!(header.loop_word(), 0);
	}

	#[test]
	fn test_loop_at_zero_is_still_a_loop() {
		// Offset 0 with the existence bit set must not collapse into "no loop".
		let header = AnimationHeader::new(1, 0, 2, Some(0));
		assert!(header.has_loop());
		assert_eq!(header.loop_elem(), 0);
		assert_ne!(header.loop_word(), 0);
	}

	#[test]
	fn test_max_loop_offset() {
		let header = AnimationHeader::new(1, 0, 1, Some(0x7FFF_FFFF));
		assert!(header.has_loop());
		assert_eq!(header.loop_elem(), 0x7FFF_FFFF);
	}

	#[test]
	fn test_empty_header() {
		let header = AnimationHeader::new(9, 4, 0, None);
		assert!(header.is_empty());
		assert_eq!(header.frame_count(), 0);
	}
}
