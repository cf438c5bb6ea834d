//! AIR script facade: parsing entry points and bound-checked access.
//!
//! [`AirFile`] owns the results of one parse: the flat animation store and the
//! accumulated error events. Lookups come in three flavors, layered per the
//! dual error policy:
//!
//! - `Option`-bearing core accessors ([`animation`], [`frame`], ...);
//! - raising wrappers ([`get_animation`], [`get_frame`]) returning a typed
//!   error that carries the requested number;
//! - dummy-returning variants ([`animation_or_dummy`], [`frame_or_dummy`])
//!   yielding a sentinel whose accessors are all zero/false and whose
//!   `is_dummy` answers `true`, so callers can branch without failure
//!   propagation.
//!
//! [`animation`]: AirFile::animation
//! [`frame`]: AirFile::frame
//! [`get_animation`]: AirFile::get_animation
//! [`get_frame`]: AirFile::get_frame
//! [`animation_or_dummy`]: AirFile::animation_or_dummy
//! [`frame_or_dummy`]: AirFile::frame_or_dummy

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;

use crate::constants;
use crate::error::AirError;
use crate::frame::FrameRecord;
use crate::header::AnimationHeader;
use crate::ledger::ErrorEvent;
use crate::parse_config::ParseConfig;
use crate::parser::Parser;
use crate::store::AnimationStore;

/// Bound-checked read view of one animation.
///
/// Obtained from [`AirFile`] lookups. The dummy view returned by the
/// non-raising accessors answers [`is_dummy`](Self::is_dummy) with `true` and
/// zero/false from every other accessor.
#[derive(Debug, Clone, Copy)]
pub struct AnimationView<'a> {
	header: &'a AnimationHeader,
	frames: &'a [FrameRecord],
	dummy: bool,
}

impl<'a> AnimationView<'a> {
	fn new(header: &'a AnimationHeader, frames: &'a [FrameRecord]) -> Self {
		Self { header, frames, dummy: false }
	}

	/// The sentinel view standing in for "not found".
	pub fn dummy() -> Self {
		Self { header: &AnimationHeader::DUMMY, frames: &[], dummy: true }
	}

	/// External animation number. 0 for the dummy view.
	pub fn id(&self) -> u32 {
		self.header.id()
	}

	/// Returns `true` when the block declared a `Loopstart` marker.
	pub fn has_loop(&self) -> bool {
		self.header.has_loop()
	}

	/// Element offset playback loops back to. 0 when no loop was declared.
	pub fn loop_elem(&self) -> u32 {
		self.header.loop_elem()
	}

	/// Number of frames in this animation.
	pub fn frame_count(&self) -> usize {
		self.frames.len()
	}

	/// Returns `true` for a zero-frame animation.
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// The animation's frame records, in script order.
	pub fn frames(&self) -> &'a [FrameRecord] {
		self.frames
	}

	/// Frame at local offset `elem` within this animation.
	pub fn frame(&self, elem: usize) -> Option<&'a FrameRecord> {
		self.frames.get(elem)
	}

	/// The underlying header.
	pub fn header(&self) -> &'a AnimationHeader {
		self.header
	}

	/// Returns `true` for the sentinel view.
	pub fn is_dummy(&self) -> bool {
		self.dummy
	}
}

/// A parsed AIR script: headers, frame records, and the diagnostic ledger.
///
/// # Examples
///
/// ```
/// use air_rs::file::AirFile;
/// use air_rs::parse_config::ParseConfig;
///
/// let script = "\
/// [Begin Action 0] ; stand
/// 0,0, 0,0, 10
/// 0,1, 0,0, 10
/// Loopstart
/// 0,2, 0,0, -1
/// ";
///
/// let air = AirFile::from_text(script, &ParseConfig::default())?;
/// assert_eq!(air.len(), 1);
///
/// let stand = air.get_animation(0)?;
/// assert_eq!(stand.frame_count(), 3);
/// assert_eq!(stand.loop_elem(), 2);
/// # Ok::<(), air_rs::error::AirError>(())
/// ```
#[derive(Debug, Default)]
pub struct AirFile {
	store: AnimationStore,
	events: Vec<ErrorEvent>,
	config: ParseConfig,
}

impl AirFile {
	/// Creates an empty file under the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Opens and parses an animation script from the given path.
	///
	/// Structural checks run up front and short-circuit regardless of policy:
	/// the path must carry the `.air` extension, the file must exist and open,
	/// and its size must not exceed `config.max_input_size`.
	///
	/// # Errors
	///
	/// Returns an error if a structural check fails, or — under the raise
	/// policy — on the first field violation.
	///
	/// # Examples
	///
	/// ```no_run
	/// use air_rs::file::AirFile;
	/// use air_rs::parse_config::ParseConfig;
	///
	/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
	/// let air = AirFile::open("kfm.air", &ParseConfig::default())?;
	/// println!("{} animations", air.len());
	/// # Ok(())
	/// # }
	/// ```
	pub fn open(path: impl AsRef<Path>, config: &ParseConfig) -> Result<Self, AirError> {
		let path = path.as_ref();
		let is_air = path
			.extension()
			.is_some_and(|ext| ext.eq_ignore_ascii_case(constants::AIR_EXTENSION));
		if !is_air {
			return Err(AirError::InvalidExtension { path: path.to_path_buf() });
		}

		let file = std::fs::File::open(path)?;
		let size = file.metadata()?.len();
		if size > config.max_input_size {
			return Err(AirError::FileTooLarge { actual: size, limit: config.max_input_size });
		}

		debug!("parsing {} ({size} bytes)", path.display());
		Self::parse(BufReader::new(file), size as usize, config)
	}

	/// Parses an animation script from any reader.
	///
	/// The stream is consumed to its end. Size checking against
	/// `config.max_input_size` applies as the stream is read.
	///
	/// # Errors
	///
	/// Returns an error on read failure, oversized input, or — under the raise
	/// policy — on the first field violation.
	pub fn from_reader<R: Read>(reader: R, config: &ParseConfig) -> Result<Self, AirError> {
		let mut text = String::new();
		reader.take(config.max_input_size + 1).read_to_string(&mut text)?;
		if text.len() as u64 > config.max_input_size {
			return Err(AirError::FileTooLarge {
				actual: text.len() as u64,
				limit: config.max_input_size,
			});
		}
		Self::from_text(&text, config)
	}

	/// Parses an animation script held in memory.
	///
	/// # Errors
	///
	/// Returns an error on oversized input, or — under the raise policy — on
	/// the first field violation.
	pub fn from_text(text: &str, config: &ParseConfig) -> Result<Self, AirError> {
		if text.len() as u64 > config.max_input_size {
			return Err(AirError::FileTooLarge {
				actual: text.len() as u64,
				limit: config.max_input_size,
			});
		}
		Self::parse(text.as_bytes(), text.len(), config)
	}

	fn parse<R: BufRead>(reader: R, size_hint: usize, config: &ParseConfig) -> Result<Self, AirError> {
		let mut parser = Parser::new(*config);
		parser.reserve(size_hint);
		parser.parse_reader(reader)?;
		let (store, events) = parser.finish()?;
		Ok(Self { store, events, config: *config })
	}

	/// Discards all parsed data and diagnostics.
	pub fn clear(&mut self) {
		self.store.clear();
		self.events.clear();
	}

	/// Replaces the parsed contents with a fresh parse of `text`.
	///
	/// The replacement is atomic: on error the previous contents stay intact;
	/// a half-built parse is never observable.
	///
	/// # Errors
	///
	/// Same conditions as [`from_text`](Self::from_text).
	pub fn reload_from_text(&mut self, text: &str) -> Result<(), AirError> {
		let fresh = Self::from_text(text, &self.config)?;
		*self = fresh;
		Ok(())
	}

	/// Replaces the parsed contents with a fresh parse of `reader`.
	///
	/// Atomic in the same sense as [`reload_from_text`](Self::reload_from_text).
	///
	/// # Errors
	///
	/// Same conditions as [`from_reader`](Self::from_reader).
	pub fn reload_from_reader<R: Read>(&mut self, reader: R) -> Result<(), AirError> {
		let fresh = Self::from_reader(reader, &self.config)?;
		*self = fresh;
		Ok(())
	}

	/// The configuration this file was parsed under.
	pub fn config(&self) -> &ParseConfig {
		&self.config
	}

	/// Number of stored animations.
	pub fn len(&self) -> usize {
		self.store.len()
	}

	/// Returns `true` when no animation was stored.
	pub fn is_empty(&self) -> bool {
		self.store.is_empty()
	}

	/// All headers, in registration order.
	pub fn headers(&self) -> &[AnimationHeader] {
		self.store.headers()
	}

	/// The flat frame array shared by all animations.
	pub fn frames(&self) -> &[FrameRecord] {
		self.store.frames()
	}

	/// The underlying store.
	pub fn store(&self) -> &AnimationStore {
		&self.store
	}

	/// Violations accumulated during the parse, in source order.
	pub fn events(&self) -> &[ErrorEvent] {
		&self.events
	}

	/// Renders the accumulated events as a report string.
	///
	/// Writing the report anywhere is the caller's job.
	pub fn report(&self) -> String {
		crate::ledger::render_report(&self.events)
	}

	/// Looks up an animation by external number.
	pub fn animation(&self, id: u32) -> Option<AnimationView<'_>> {
		let position = self.store.find(id)?;
		self.animation_at(position)
	}

	/// Looks up an animation by dense internal position.
	pub fn animation_at(&self, position: usize) -> Option<AnimationView<'_>> {
		let header = self.store.header_at(position)?;
		Some(AnimationView::new(header, self.store.frames_of(header)))
	}

	/// Looks up an animation by external number, raising when absent.
	///
	/// # Errors
	///
	/// [`AirError::AnimationNotFound`] carrying the requested number.
	pub fn get_animation(&self, id: u32) -> Result<AnimationView<'_>, AirError> {
		self.animation(id).ok_or(AirError::AnimationNotFound { id })
	}

	/// Looks up an animation by internal position, raising when absent.
	///
	/// # Errors
	///
	/// [`AirError::PositionNotFound`] carrying the requested position.
	pub fn get_animation_at(&self, position: usize) -> Result<AnimationView<'_>, AirError> {
		self.animation_at(position)
			.ok_or(AirError::PositionNotFound { position, total: self.store.len() })
	}

	/// Looks up an animation by external number, substituting the dummy view
	/// when absent.
	pub fn animation_or_dummy(&self, id: u32) -> AnimationView<'_> {
		self.animation(id).unwrap_or_else(AnimationView::dummy)
	}

	/// Looks up one frame by animation number and local element offset.
	pub fn frame(&self, id: u32, elem: usize) -> Option<&FrameRecord> {
		self.animation(id)?.frame(elem)
	}

	/// Looks up one frame, raising when the animation or element is absent.
	///
	/// # Errors
	///
	/// [`AirError::AnimationNotFound`] when `id` is unknown, otherwise
	/// [`AirError::ElementNotFound`] carrying both requested values.
	pub fn get_frame(&self, id: u32, elem: usize) -> Result<&FrameRecord, AirError> {
		self.get_animation(id)?.frame(elem).ok_or(AirError::ElementNotFound { id, elem })
	}

	/// Looks up one frame, substituting [`FrameRecord::DUMMY`] when absent.
	pub fn frame_or_dummy(&self, id: u32, elem: usize) -> &FrameRecord {
		self.frame(id, elem).unwrap_or(&FrameRecord::DUMMY)
	}
}

impl std::fmt::Display for AirFile {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"AIR file ({} animations, {} frames, {} errors)",
			self.store.len(),
			self.store.frame_len(),
			self.events.len()
		)
	}
}
