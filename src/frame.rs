//! Frame records: one displayed-sprite line within an animation block.
//!
//! A record stores five machine words: a packed sprite word (group and image,
//! 16 bits each), two positions, a display duration, and a packed
//! extra-parameter word (facing flags, three 9-bit alpha channels, and the two
//! dummy-sprite flags marking group/image as unset).
//!
//! Setters mask values to their declared widths; range checking happens in the
//! parser before a value is committed here.
//!
//! # Examples
//!
//! ```
//! use air_rs::frame::FrameRecord;
//!
//! let mut frame = FrameRecord::new();
//! frame.set_group(12);
//! frame.set_image(3);
//! frame.set_duration(5);
//! frame.set_alpha_a(256);
//!
//! assert_eq!(frame.group(), 12);
//! assert_eq!(frame.image(), 3);
//! assert_eq!(frame.alpha_a(), 256);
//! assert!(!frame.is_dummy());
//! ```

use crate::constants;

/// One frame of an animation: sprite reference, position, duration, and
/// blend/facing parameters, bit-packed into five 32-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameRecord {
	sprite: u32,
	pos_x: i32,
	pos_y: i32,
	duration: i32,
	extra: u32,
}

impl FrameRecord {
	/// The sentinel record handed out by non-raising frame lookups.
	///
	/// Both sprite references answer -1 (unset), every other accessor yields
	/// zero or `false`, and [`is_dummy`](Self::is_dummy) is `true`. Never
	/// inserted into real storage.
	pub const DUMMY: Self = Self {
		sprite: 0,
		pos_x: 0,
		pos_y: 0,
		duration: 0,
		extra: constants::DUMMY_IMAGE.mask() | constants::DUMMY_GROUP.mask(),
	};

	/// Creates a zeroed record: sprite 0,0 at origin, zero duration, no flags.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sprite group number, or -1 when unset.
	pub fn group(&self) -> i32 {
		if constants::DUMMY_GROUP.decode_flag(self.extra) {
			-1
		} else {
			constants::SPRITE_GROUP.decode(self.sprite) as i32
		}
	}

	/// Sets the sprite group number. -1 marks the group as unset.
	pub fn set_group(&mut self, value: i32) {
		if value < 0 {
			self.sprite = constants::SPRITE_GROUP.encode(self.sprite, 0);
			self.extra = constants::DUMMY_GROUP.encode_flag(self.extra, true);
		} else {
			self.sprite = constants::SPRITE_GROUP.encode(self.sprite, value as u32);
			self.extra = constants::DUMMY_GROUP.encode_flag(self.extra, false);
		}
	}

	/// Sprite image number, or -1 when unset.
	pub fn image(&self) -> i32 {
		if constants::DUMMY_IMAGE.decode_flag(self.extra) {
			-1
		} else {
			constants::SPRITE_IMAGE.decode(self.sprite) as i32
		}
	}

	/// Sets the sprite image number. -1 marks the image as unset.
	pub fn set_image(&mut self, value: i32) {
		if value < 0 {
			self.sprite = constants::SPRITE_IMAGE.encode(self.sprite, 0);
			self.extra = constants::DUMMY_IMAGE.encode_flag(self.extra, true);
		} else {
			self.sprite = constants::SPRITE_IMAGE.encode(self.sprite, value as u32);
			self.extra = constants::DUMMY_IMAGE.encode_flag(self.extra, false);
		}
	}

	/// X position in pixels.
	pub fn pos_x(&self) -> i32 {
		self.pos_x
	}

	/// Sets the X position.
	pub fn set_pos_x(&mut self, value: i32) {
		self.pos_x = value;
	}

	/// Y position in pixels.
	pub fn pos_y(&self) -> i32 {
		self.pos_y
	}

	/// Sets the Y position.
	pub fn set_pos_y(&mut self, value: i32) {
		self.pos_y = value;
	}

	/// Display duration in ticks. -1 holds the frame forever.
	pub fn duration(&self) -> i32 {
		self.duration
	}

	/// Sets the display duration.
	pub fn set_duration(&mut self, value: i32) {
		self.duration = value;
	}

	/// Horizontal facing flag (`H`).
	pub fn flip_h(&self) -> bool {
		constants::FLIP_H.decode_flag(self.extra)
	}

	/// Sets the horizontal facing flag.
	pub fn set_flip_h(&mut self, value: bool) {
		self.extra = constants::FLIP_H.encode_flag(self.extra, value);
	}

	/// Vertical facing flag (`V`).
	pub fn flip_v(&self) -> bool {
		constants::FLIP_V.decode_flag(self.extra)
	}

	/// Sets the vertical facing flag.
	pub fn set_flip_v(&mut self, value: bool) {
		self.extra = constants::FLIP_V.encode_flag(self.extra, value);
	}

	/// Alpha source channel A (0..=256).
	pub fn alpha_a(&self) -> u16 {
		constants::ALPHA_A.decode(self.extra) as u16
	}

	/// Sets alpha channel A. Masked to 9 bits.
	pub fn set_alpha_a(&mut self, value: u16) {
		self.extra = constants::ALPHA_A.encode(self.extra, u32::from(value));
	}

	/// Alpha source channel S (0..=256).
	pub fn alpha_s(&self) -> u16 {
		constants::ALPHA_S.decode(self.extra) as u16
	}

	/// Sets alpha channel S. Masked to 9 bits.
	pub fn set_alpha_s(&mut self, value: u16) {
		self.extra = constants::ALPHA_S.encode(self.extra, u32::from(value));
	}

	/// Alpha destination channel D (0..=256).
	pub fn alpha_d(&self) -> u16 {
		constants::ALPHA_D.decode(self.extra) as u16
	}

	/// Sets alpha channel D. Masked to 9 bits.
	pub fn set_alpha_d(&mut self, value: u16) {
		self.extra = constants::ALPHA_D.encode(self.extra, u32::from(value));
	}

	/// Returns `true` when both sprite references are unset.
	pub fn is_dummy(&self) -> bool {
		constants::DUMMY_GROUP.decode_flag(self.extra)
			&& constants::DUMMY_IMAGE.decode_flag(self.extra)
	}

	/// The packed sprite word (group in the low 16 bits, image in the high 16).
	pub fn sprite_word(&self) -> u32 {
		self.sprite
	}

	/// The packed extra-parameter word (flags, alphas, dummy markers).
	pub fn extra_word(&self) -> u32 {
		self.extra
	}
}

impl std::fmt::Display for FrameRecord {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{},{}, {},{}, {}",
			self.group(),
			self.image(),
			self.pos_x,
			self.pos_y,
			self.duration
		)
	}
}
