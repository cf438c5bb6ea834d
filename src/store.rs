//! Flat animation storage.
//!
//! Two parallel append-only arrays hold headers and frame records; each header
//! addresses its frames through a contiguous (start, count) slice of the frame
//! array. A hash index maps external animation numbers to dense header
//! positions for O(1) lookup and duplicate detection.
//!
//! [`register`](AnimationStore::register) is not collision-safe on its own: the
//! parser checks [`contains`](AnimationStore::contains) first and reports a
//! duplicate instead of registering. A fresh parse starts from
//! [`clear`](AnimationStore::clear); nothing is ever mutated in place after it
//! has been appended.

use std::collections::HashMap;

use crate::constants;
use crate::frame::FrameRecord;
use crate::header::AnimationHeader;

/// Append-only parallel storage for one parsed script.
#[derive(Debug, Clone, Default)]
pub struct AnimationStore {
	headers: Vec<AnimationHeader>,
	frames: Vec<FrameRecord>,
	index: HashMap<u32, usize>,
}

impl AnimationStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Grows capacity from an input-size hint in bytes.
	pub fn reserve(&mut self, input_bytes: usize) {
		self.frames.reserve(input_bytes / constants::APPROX_BYTES_PER_RECORD);
		let headers = input_bytes / constants::APPROX_BYTES_PER_BLOCK;
		self.headers.reserve(headers);
		self.index.reserve(headers);
	}

	/// Discards all headers, frames, and index entries.
	pub fn clear(&mut self) {
		self.headers.clear();
		self.frames.clear();
		self.index.clear();
	}

	/// Returns `true` when `id` is already registered.
	pub fn contains(&self, id: u32) -> bool {
		self.index.contains_key(&id)
	}

	/// Dense header position registered for `id`, if any.
	pub fn find(&self, id: u32) -> Option<usize> {
		self.index.get(&id).copied()
	}

	/// Registers `id` at the next header position and returns that position.
	///
	/// The caller must have checked [`contains`](Self::contains); registering a
	/// present id would overwrite its mapping. The position refers to the
	/// header the parser appends when the block is finalized.
	pub fn register(&mut self, id: u32) -> usize {
		let position = self.headers.len();
		self.index.insert(id, position);
		position
	}

	/// Appends a finalized header.
	pub fn push_header(&mut self, header: AnimationHeader) {
		self.headers.push(header);
	}

	/// Appends one frame record.
	pub fn push_frame(&mut self, frame: FrameRecord) {
		self.frames.push(frame);
	}

	/// All headers, in registration order.
	pub fn headers(&self) -> &[AnimationHeader] {
		&self.headers
	}

	/// The flat frame array.
	pub fn frames(&self) -> &[FrameRecord] {
		&self.frames
	}

	/// Header at dense position `position`.
	pub fn header_at(&self, position: usize) -> Option<&AnimationHeader> {
		self.headers.get(position)
	}

	/// The frame slice owned by `header`.
	pub fn frames_of(&self, header: &AnimationHeader) -> &[FrameRecord] {
		let start = header.frame_start().min(self.frames.len());
		let end = (start + header.frame_count()).min(self.frames.len());
		&self.frames[start..end]
	}

	/// Number of stored headers.
	pub fn len(&self) -> usize {
		self.headers.len()
	}

	/// Returns `true` when no animation has been stored.
	pub fn is_empty(&self) -> bool {
		self.headers.is_empty()
	}

	/// Current length of the flat frame array.
	pub fn frame_len(&self) -> usize {
		self.frames.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn frame(group: i32) -> FrameRecord {
		let mut f = FrameRecord::new();
		f.set_group(group);
		f
	}

	#[test]
	fn test_register_then_find() {
		let mut store = AnimationStore::new();
		assert!(!store.contains(200));

		let pos = store.register(200);
		assert_eq!(pos, 0);
		store.push_header(AnimationHeader::new(200, 0, 0, None));

		assert!(store.contains(200));
		assert_eq!(store.find(200), Some(0));
		assert_eq!(store.find(201), None);
	}

	#[test]
	fn test_headers_own_disjoint_slices() {
		let mut store = AnimationStore::new();

		store.register(0);
		store.push_frame(frame(1));
		store.push_frame(frame(2));
		store.push_header(AnimationHeader::new(0, 0, 2, None));

		store.register(1);
		store.push_frame(frame(3));
		store.push_header(AnimationHeader::new(1, 2, 1, None));

		let first = store.frames_of(&store.headers()[0]);
		let second = store.frames_of(&store.headers()[1]);
		assert_eq!(first.len(), 2);
		assert_eq!(second.len(), 1);
		assert_eq!(first[1].group(), 2);
		assert_eq!(second[0].group(), 3);
	}

	#[test]
	fn test_frames_of_clamps_to_storage() {
		let store = AnimationStore::new();
		let stray = AnimationHeader::new(1, 10, 5, None);
		assert!(store.frames_of(&stray).is_empty());
	}

	#[test]
	fn test_clear_empties_everything() {
		let mut store = AnimationStore::new();
		store.register(5);
		store.push_frame(frame(0));
		store.push_header(AnimationHeader::new(5, 0, 1, None));

		store.clear();
		assert!(store.is_empty());
		assert_eq!(store.frame_len(), 0);
		assert!(!store.contains(5));
	}

	#[test]
	fn test_reserve_is_a_hint_only() {
		let mut store = AnimationStore::new();
		store.reserve(4096);
		assert!(store.is_empty());
		assert!(store.frames.capacity() >= 4096 / constants::APPROX_BYTES_PER_RECORD);
	}
}
