//! Error types for AIR script parsing and lookup.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::ledger::ErrorEvent;

/// Closed enumeration of everything that can go wrong around an AIR script.
///
/// Each kind carries a fixed [`name`](Self::name) and [`message`](Self::message)
/// string so reports can quote them verbatim. Kinds covering filesystem
/// collaborators (search paths, report folders, log files) are part of the
/// enumeration so external code can record through the same ledger, even though
/// this crate itself only consumes an open stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
	/// Input file does not carry the `.air` extension.
	InvalidExtension,
	/// A configured search path does not exist.
	SearchPathNotFound,
	/// A configured output path does not exist.
	OutputPathNotFound,
	/// The named script was not found.
	FileNotFound,
	/// The script exceeds the configured size limit.
	FileTooLarge,
	/// The script exists but could not be opened.
	OpenFailed,
	/// Reading from the open stream failed mid-parse.
	ReadFailed,
	/// A report folder could not be created.
	FolderCreateFailed,
	/// The error-report file could not be opened.
	LogFileOpenFailed,
	/// Writing the error-report file failed.
	LogFileWriteFailed,
	/// The same animation number was registered twice in one script.
	DuplicateAnimation,
	/// Lookup of an animation number absent from the parsed script.
	MissingAnimation,
	/// Lookup of an internal header position that does not exist.
	IndexNotFound,
	/// Lookup of a frame element outside its animation's range.
	FrameNotFound,
	/// A block ended without registering a single frame.
	EmptyAnimation,
	/// Numeric text could not be converted to a value.
	ParseIntFailed,
	/// A line inside a block matched no recognized record shape.
	InvalidFormat,
	/// Animation number outside 0..=2147483647.
	RangeAnimationNumber,
	/// Sprite group outside -1..=65535.
	RangeSpriteGroup,
	/// Sprite image outside -1..=65535.
	RangeSpriteImage,
	/// X position outside the signed 32-bit range.
	RangePosX,
	/// Y position outside the signed 32-bit range.
	RangePosY,
	/// Display duration outside -1..=2147483647.
	RangeTime,
	/// Alpha channel A outside 0..=256.
	RangeAlphaA,
	/// Alpha channel S outside 0..=256.
	RangeAlphaS,
	/// Alpha channel D outside 0..=256.
	RangeAlphaD,
	/// Loop start offset outside 0..=2147483647.
	RangeLoopStart,
}

impl ErrorKind {
	/// Fixed parameter/category name, quoted verbatim in reports.
	pub const fn name(self) -> &'static str {
		match self {
			Self::InvalidExtension => "InvalidExtension",
			Self::SearchPathNotFound => "SearchPathNotFound",
			Self::OutputPathNotFound => "OutputPathNotFound",
			Self::FileNotFound => "FileNotFound",
			Self::FileTooLarge => "FileTooLarge",
			Self::OpenFailed => "OpenFailed",
			Self::ReadFailed => "ReadFailed",
			Self::FolderCreateFailed => "FolderCreateFailed",
			Self::LogFileOpenFailed => "LogFileOpenFailed",
			Self::LogFileWriteFailed => "LogFileWriteFailed",
			Self::DuplicateAnimation => "DuplicateAnimation",
			Self::MissingAnimation => "MissingAnimation",
			Self::IndexNotFound => "IndexNotFound",
			Self::FrameNotFound => "FrameNotFound",
			Self::EmptyAnimation => "EmptyAnimation",
			Self::ParseIntFailed => "ParseIntFailed",
			Self::InvalidFormat => "InvalidFormat",
			Self::RangeAnimationNumber => "BeginAction",
			Self::RangeSpriteGroup => "SpriteGroup",
			Self::RangeSpriteImage => "SpriteImage",
			Self::RangePosX => "PosX",
			Self::RangePosY => "PosY",
			Self::RangeTime => "Time",
			Self::RangeAlphaA => "AlphaA",
			Self::RangeAlphaS => "AlphaS",
			Self::RangeAlphaD => "AlphaD",
			Self::RangeLoopStart => "Loopstart",
		}
	}

	/// Fixed message string, quoted verbatim in reports.
	pub const fn message(self) -> &'static str {
		match self {
			Self::InvalidExtension => "the file does not carry the .air extension",
			Self::SearchPathNotFound => "the configured search path does not exist",
			Self::OutputPathNotFound => "the configured output path does not exist",
			Self::FileNotFound => "the animation script was not found",
			Self::FileTooLarge => "the animation script exceeds the size limit",
			Self::OpenFailed => "the animation script could not be opened",
			Self::ReadFailed => "reading the animation script did not complete normally",
			Self::FolderCreateFailed => "the report folder could not be created",
			Self::LogFileOpenFailed => "the error-report file could not be opened",
			Self::LogFileWriteFailed => "the error-report file could not be written",
			Self::DuplicateAnimation => "an animation is registered more than once",
			Self::MissingAnimation => "no animation is registered under this number",
			Self::IndexNotFound => "no animation occupies this position",
			Self::FrameNotFound => "the animation has no element at this position",
			Self::EmptyAnimation => "no animation content is registered",
			Self::ParseIntFailed => "the value could not be converted to a number",
			Self::InvalidFormat => "the line does not match any recognized record",
			Self::RangeAnimationNumber => {
				"the animation number exceeds the registrable range (0..=2147483647)"
			}
			Self::RangeSpriteGroup => {
				"the sprite group exceeds the registrable range (-1..=65535)"
			}
			Self::RangeSpriteImage => {
				"the sprite image exceeds the registrable range (-1..=65535)"
			}
			Self::RangePosX => {
				"the X position exceeds the registrable range (-2147483648..=2147483647)"
			}
			Self::RangePosY => {
				"the Y position exceeds the registrable range (-2147483648..=2147483647)"
			}
			Self::RangeTime => {
				"the display duration exceeds the registrable range (-1..=2147483647)"
			}
			Self::RangeAlphaA => "AlphaA exceeds the registrable range (0..=256)",
			Self::RangeAlphaS => "AlphaS exceeds the registrable range (0..=256)",
			Self::RangeAlphaD => "AlphaD exceeds the registrable range (0..=256)",
			Self::RangeLoopStart => {
				"the loop start exceeds the registrable range (0..=2147483647)"
			}
		}
	}
}

impl std::fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.name())
	}
}

/// Errors raised when parsing or querying AIR scripts.
#[derive(Debug, Error)]
pub enum AirError {
	/// A field or structural violation, raised under [`ErrorPolicy::Raise`].
	///
	/// [`ErrorPolicy::Raise`]: crate::ledger::ErrorPolicy::Raise
	#[error("{0}")]
	Invalid(ErrorEvent),

	/// Lookup of an animation number absent from the parsed script.
	#[error("animation {id} is not registered")]
	AnimationNotFound {
		/// The requested animation number.
		id: u32,
	},

	/// Lookup of a frame element outside its animation's slice.
	#[error("animation {id} has no element {elem}")]
	ElementNotFound {
		/// The requested animation number.
		id: u32,
		/// The requested element index within the animation.
		elem: usize,
	},

	/// Lookup of an internal header position that does not exist.
	#[error("no animation occupies position {position} (total: {total})")]
	PositionNotFound {
		/// The requested header position.
		position: usize,
		/// Number of headers actually stored.
		total: usize,
	},

	/// Input larger than the configured limit.
	#[error("animation script too large: {actual} bytes (limit: {limit})")]
	FileTooLarge {
		/// Size of the input in bytes.
		actual: u64,
		/// Configured size limit in bytes.
		limit: u64,
	},

	/// Input path without the `.air` extension.
	#[error("unsupported file extension: {}", path.display())]
	InvalidExtension {
		/// The offending path.
		path: PathBuf,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl AirError {
	/// The [`ErrorKind`] this failure corresponds to in the closed enumeration.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Invalid(event) => event.kind,
			Self::AnimationNotFound { .. } => ErrorKind::MissingAnimation,
			Self::ElementNotFound { .. } => ErrorKind::FrameNotFound,
			Self::PositionNotFound { .. } => ErrorKind::IndexNotFound,
			Self::FileTooLarge { .. } => ErrorKind::FileTooLarge,
			Self::InvalidExtension { .. } => ErrorKind::InvalidExtension,
			Self::IOError(err) if err.kind() == std::io::ErrorKind::NotFound => {
				ErrorKind::FileNotFound
			}
			Self::IOError(_) => ErrorKind::ReadFailed,
		}
	}
}
