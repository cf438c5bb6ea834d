//! Line-oriented AIR parser.
//!
//! The parser walks the input one line at a time through two states:
//!
//! - `ScanningForBlock`: only a `[Begin Action N]` line is meaningful; anything
//!   else is skipped. An out-of-range or duplicate animation number discards the
//!   whole block and keeps scanning.
//! - `InBlock`: a `Loopstart` marker records the loop offset (first marker
//!   wins), a parameter record is validated field by field and appended, a new
//!   begin line finalizes the open block and is re-processed, and anything else
//!   (blank lines, comments) is ignored.
//!
//! End of stream finalizes the last open block exactly like a begin line. A
//! zero-frame block is reported as an empty animation but still keeps its
//! header slot, matching the engine's original reader.
//!
//! Every numeric field runs through the range validator before it is committed;
//! under the log policy a violating field is recorded and substituted (sprite
//! references become unset, everything else becomes zero) and the parse
//! continues at field granularity.

use std::io::BufRead;
use std::sync::LazyLock;

use log::debug;
use regex::{Captures, Regex};

use crate::error::{AirError, ErrorKind};
use crate::frame::FrameRecord;
use crate::header::AnimationHeader;
use crate::ledger::{ErrorEvent, ErrorLedger};
use crate::parse_config::ParseConfig;
use crate::store::AnimationStore;
use crate::validate;

static BEGIN_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\s*\[Begin Action (-?\d+)\]\s*(?:;.*)?$").expect("begin-block pattern")
});

static LOOP_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\s*Loopstart\s*$").expect("loop-marker pattern"));

// Field order: group, image, posX, posY, duration, optional H/V flags, then up
// to three (tag, value) alpha pairs. A comma is permitted after the duration,
// after the flags, and between the first and second alpha pair only.
static RECORD_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"(?x)
		^\s*
		(-?\d+)\s*,\s*(-?\d+)\s*,\s*        # sprite group, image
		(-?\d+)\s*,\s*(-?\d+)\s*,\s*        # posX, posY
		(-?\d+)\s*,?\s*                     # duration
		(H?)\s*(V?)\s*,?\s*                 # facing flags
		([ADS]?)\s*(-?\d+)?\s*,?\s*         # alpha slot 1
		([ADS]?)\s*(-?\d+)?\s*              # alpha slot 2
		([ADS]?)\s*(-?\d+)?\s*$             # alpha slot 3
		",
	)
	.expect("frame-record pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	ScanningForBlock,
	InBlock,
}

/// An open block that has not been finalized yet.
#[derive(Debug)]
struct PendingBlock {
	id: u32,
	frame_start: usize,
	frames_seen: usize,
	loop_offset: Option<u32>,
}

/// Streaming line parser producing an [`AnimationStore`] and an event list.
///
/// Drive it with [`parse_reader`](Self::parse_reader) or line by line with
/// [`feed_line`](Self::feed_line), then call [`finish`](Self::finish) to
/// finalize the last open block and take the results.
///
/// # Examples
///
/// ```
/// use air_rs::parse_config::ParseConfig;
/// use air_rs::parser::Parser;
///
/// let script = "\
/// [Begin Action 0]
/// 0,0, 0,0, 5
/// ";
///
/// let mut parser = Parser::new(ParseConfig::default());
/// parser.parse_reader(script.as_bytes())?;
/// let (store, events) = parser.finish()?;
///
/// assert_eq!(store.len(), 1);
/// assert!(events.is_empty());
/// # Ok::<(), air_rs::error::AirError>(())
/// ```
#[derive(Debug)]
pub struct Parser {
	store: AnimationStore,
	ledger: ErrorLedger,
	state: State,
	pending: Option<PendingBlock>,
	line: usize,
}

impl Parser {
	/// Creates a parser operating under `config`'s error policy.
	pub fn new(config: ParseConfig) -> Self {
		Self {
			store: AnimationStore::new(),
			ledger: ErrorLedger::new(config.policy),
			state: State::ScanningForBlock,
			pending: None,
			line: 0,
		}
	}

	/// Grows storage capacity from an input-size hint in bytes.
	pub fn reserve(&mut self, input_bytes: usize) {
		self.store.reserve(input_bytes);
	}

	/// One-based number of the last line fed.
	pub fn line(&self) -> usize {
		self.line
	}

	/// Feeds every line of `reader` through the state machine.
	///
	/// # Errors
	///
	/// Returns the first violation under the raise policy, or any read failure
	/// regardless of policy.
	pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<(), AirError> {
		for line in reader.lines() {
			let line = line?;
			self.feed_line(&line)?;
		}
		Ok(())
	}

	/// Feeds a single line through the state machine.
	///
	/// # Errors
	///
	/// Returns the first violation under the raise policy.
	pub fn feed_line(&mut self, raw: &str) -> Result<(), AirError> {
		self.line += 1;
		let line = raw.trim_end_matches(['\r', '\n']);

		// A begin line always finalizes the open block first, then is
		// re-processed as the scanning transition.
		if let Some(caps) = BEGIN_RE.captures(line) {
			self.finalize_pending()?;
			return self.begin_block(&caps);
		}

		if self.state == State::InBlock {
			if LOOP_RE.is_match(line) {
				if let Some(pending) = self.pending.as_mut() {
					if pending.loop_offset.is_none() {
						pending.loop_offset = Some(pending.frames_seen as u32);
					}
				}
			} else if let Some(caps) = RECORD_RE.captures(line) {
				self.push_record(&caps)?;
			}
			// Anything else inside a block is a blank line or comment.
		}
		Ok(())
	}

	/// Finalizes the last open block and yields the store and event list.
	///
	/// # Errors
	///
	/// Under the raise policy a trailing empty block aborts here.
	pub fn finish(mut self) -> Result<(AnimationStore, Vec<ErrorEvent>), AirError> {
		self.finalize_pending()?;
		Ok((self.store, self.ledger.into_events()))
	}

	fn begin_block(&mut self, caps: &Captures<'_>) -> Result<(), AirError> {
		let id_text = &caps[1];

		let id = match id_text.parse::<i64>() {
			Ok(value) if validate::animation_number_in_range(value) => value as u32,
			// Unparsable digit strings are just very large numbers.
			_ => {
				return self
					.ledger
					.record(ErrorEvent::new(ErrorKind::RangeAnimationNumber, id_text, self.line));
			}
		};

		if self.store.contains(id) {
			return self.ledger.record(
				ErrorEvent::new(ErrorKind::DuplicateAnimation, id_text, self.line)
					.with_animation(id),
			);
		}

		let position = self.store.register(id);
		debug!("line {}: opening animation {} at position {}", self.line, id, position);
		self.pending = Some(PendingBlock {
			id,
			frame_start: self.store.frame_len(),
			frames_seen: 0,
			loop_offset: None,
		});
		self.state = State::InBlock;
		Ok(())
	}

	fn push_record(&mut self, caps: &Captures<'_>) -> Result<(), AirError> {
		let Some(pending) = self.pending.as_ref() else {
			return Ok(());
		};
		let (id, elem, line) = (pending.id, pending.frames_seen, self.line);
		let event = |kind: ErrorKind, value: &str| {
			ErrorEvent::new(kind, value, line).with_animation(id).with_element(elem)
		};

		let mut frame = FrameRecord::new();

		// Sprite references: violations substitute the unset value (-1).
		match parse_value(&caps[1]) {
			Some(v) if validate::sprite_in_range(v) => frame.set_group(v as i32),
			_ => {
				frame.set_group(-1);
				self.ledger.record(event(ErrorKind::RangeSpriteGroup, &caps[1]))?;
			}
		}
		match parse_value(&caps[2]) {
			Some(v) if validate::sprite_in_range(v) => frame.set_image(v as i32),
			_ => {
				frame.set_image(-1);
				self.ledger.record(event(ErrorKind::RangeSpriteImage, &caps[2]))?;
			}
		}

		// Positions and duration: violations substitute zero.
		match parse_value(&caps[3]) {
			Some(v) if validate::position_in_range(v) => frame.set_pos_x(v as i32),
			_ => self.ledger.record(event(ErrorKind::RangePosX, &caps[3]))?,
		}
		match parse_value(&caps[4]) {
			Some(v) if validate::position_in_range(v) => frame.set_pos_y(v as i32),
			_ => self.ledger.record(event(ErrorKind::RangePosY, &caps[4]))?,
		}
		match parse_value(&caps[5]) {
			Some(v) if validate::duration_in_range(v) => frame.set_duration(v as i32),
			_ => self.ledger.record(event(ErrorKind::RangeTime, &caps[5]))?,
		}

		if &caps[6] == "H" {
			frame.set_flip_h(true);
		}
		if &caps[7] == "V" {
			frame.set_flip_v(true);
		}

		// Alpha triplet: three positional (tag, value) slots; a slot without a
		// recognized tag contributes nothing, a later duplicate tag wins.
		for (tag_group, value_group) in [(8, 9), (10, 11), (12, 13)] {
			let tag = caps.get(tag_group).map_or("", |m| m.as_str());
			let kind = match tag {
				"A" => ErrorKind::RangeAlphaA,
				"S" => ErrorKind::RangeAlphaS,
				"D" => ErrorKind::RangeAlphaD,
				_ => continue,
			};

			let Some(text) = caps.get(value_group).map(|m| m.as_str()) else {
				// A tag with no numeric text counts as zero after being logged.
				self.ledger.record(event(ErrorKind::ParseIntFailed, tag))?;
				continue;
			};

			match parse_value(text) {
				Some(v) if validate::alpha_in_range(v) => match tag {
					"A" => frame.set_alpha_a(v as u16),
					"S" => frame.set_alpha_s(v as u16),
					_ => frame.set_alpha_d(v as u16),
				},
				_ => self.ledger.record(event(kind, text))?,
			}
		}

		self.store.push_frame(frame);
		if let Some(pending) = self.pending.as_mut() {
			pending.frames_seen += 1;
		}
		Ok(())
	}

	fn finalize_pending(&mut self) -> Result<(), AirError> {
		let Some(pending) = self.pending.take() else {
			return Ok(());
		};
		self.state = State::ScanningForBlock;

		if pending.frames_seen == 0 {
			self.ledger.record(
				ErrorEvent::new(ErrorKind::EmptyAnimation, "-", self.line)
					.with_animation(pending.id),
			)?;
		}

		debug!(
			"line {}: closing animation {} ({} frames)",
			self.line, pending.id, pending.frames_seen
		);
		self.store.push_header(AnimationHeader::new(
			pending.id,
			pending.frame_start,
			pending.frames_seen,
			pending.loop_offset,
		));
		Ok(())
	}
}

/// Digit strings too long for an i64 are out of every field's range.
fn parse_value(text: &str) -> Option<i64> {
	text.parse().ok()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ledger::ErrorPolicy;

	fn parse(text: &str, config: ParseConfig) -> (AnimationStore, Vec<ErrorEvent>) {
		let mut parser = Parser::new(config);
		parser.parse_reader(text.as_bytes()).unwrap();
		parser.finish().unwrap()
	}

	fn parse_logged(text: &str) -> (AnimationStore, Vec<ErrorEvent>) {
		parse(text, ParseConfig::logging())
	}

	#[test]
	fn test_single_block() {
		let (store, events) = parse_logged(
			"[Begin Action 200]\n\
			 0,1, 10,-20, 5\n\
			 0,2, 10,-20, 5, H\n",
		);

		assert!(events.is_empty());
		assert_eq!(store.len(), 1);
		let header = &store.headers()[0];
		assert_eq!(header.id(), 200);
		assert_eq!(header.frame_count(), 2);
		assert!(!header.has_loop());

		let frames = store.frames_of(header);
		assert_eq!(frames[0].image(), 1);
		assert_eq!(frames[0].pos_y(), -20);
		assert!(!frames[0].flip_h());
		assert!(frames[1].flip_h());
		assert!(!frames[1].flip_v());
	}

	#[test]
	fn test_spec_loop_and_empty_block() {
		let (store, events) = parse_logged(
			"[Begin Action 0]\n\
			 0,0,0,0,1,\n\
			 Loopstart\n\
			 1,0,0,0,1,\n\
			 [Begin Action 1]\n",
		);

		assert_eq!(store.len(), 2);

		let first = &store.headers()[0];
		assert_eq!(first.id(), 0);
		assert_eq!(first.frame_count(), 2);
		assert!(first.has_loop());
		assert_eq!(first.loop_elem(), 1);

		let second = &store.headers()[1];
		assert_eq!(second.id(), 1);
		assert!(second.is_empty());

		assert_eq!(events.len(), 1);
		assert_eq!(events[0].kind, ErrorKind::EmptyAnimation);
		assert_eq!(events[0].animation, Some(1));
	}

	#[test]
	fn test_first_loop_marker_wins() {
		let (store, _) = parse_logged(
			"[Begin Action 0]\n\
			 0,0,0,0,1\n\
			 Loopstart\n\
			 0,1,0,0,1\n\
			 Loopstart\n\
			 0,2,0,0,1\n",
		);

		let header = &store.headers()[0];
		assert_eq!(header.frame_count(), 3);
		assert!(header.has_loop());
		assert_eq!(header.loop_elem(), 1);
	}

	#[test]
	fn test_duplicate_block_is_discarded() {
		let (store, events) = parse_logged(
			"[Begin Action 7]\n\
			 0,0,0,0,1\n\
			 [Begin Action 7]\n\
			 5,5,0,0,1\n\
			 9,9,0,0,1\n",
		);

		assert_eq!(store.len(), 1);
		assert_eq!(store.headers()[0].frame_count(), 1);
		assert_eq!(store.frame_len(), 1, "the duplicate block's frames are never appended");

		let dup: Vec<_> =
			events.iter().filter(|e| e.kind == ErrorKind::DuplicateAnimation).collect();
		assert_eq!(dup.len(), 1);
		assert_eq!(dup[0].value, "7");
		assert_eq!(dup[0].line, 3);
	}

	#[test]
	fn test_out_of_range_animation_number_discards_block() {
		let (store, events) = parse_logged(
			"[Begin Action 2147483648]\n\
			 0,0,0,0,1\n\
			 [Begin Action -1]\n\
			 [Begin Action 3]\n\
			 0,0,0,0,1\n",
		);

		assert_eq!(store.len(), 1);
		assert_eq!(store.headers()[0].id(), 3);

		let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
		assert_eq!(kinds, vec![ErrorKind::RangeAnimationNumber, ErrorKind::RangeAnimationNumber]);
		assert_eq!(events[0].value, "2147483648");
		assert_eq!(events[1].value, "-1");
	}

	#[test]
	fn test_group_out_of_range_logged_and_substituted() {
		let (store, events) = parse_logged(
			"[Begin Action 0]\n\
			 70000,3, 1,2, 5\n",
		);

		let frames = store.frames_of(&store.headers()[0]);
		assert_eq!(frames.len(), 1);
		assert_eq!(frames[0].group(), -1);
		assert_eq!(frames[0].image(), 3);
		assert_eq!(frames[0].duration(), 5);

		assert_eq!(events.len(), 1);
		assert_eq!(events[0].kind, ErrorKind::RangeSpriteGroup);
		assert_eq!(events[0].value, "70000");
		assert_eq!(events[0].line, 2);
		assert_eq!(events[0].animation, Some(0));
		assert_eq!(events[0].element, Some(0));
	}

	#[test]
	fn test_group_out_of_range_raises_before_store() {
		let mut parser = Parser::new(ParseConfig::raising());
		parser.feed_line("[Begin Action 0]").unwrap();
		let err = parser.feed_line("70000,3, 1,2, 5").expect_err("raise policy must abort");

		match err {
			AirError::Invalid(event) => assert_eq!(event.kind, ErrorKind::RangeSpriteGroup),
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[test]
	fn test_overlong_digit_string_is_out_of_range() {
		let (store, events) = parse_logged(
			"[Begin Action 0]\n\
			 0,0, 99999999999999999999,0, 1\n",
		);

		let frames = store.frames_of(&store.headers()[0]);
		assert_eq!(frames[0].pos_x(), 0);
		assert_eq!(events.len(), 1);
		assert_eq!(events[0].kind, ErrorKind::RangePosX);
		assert_eq!(events[0].value, "99999999999999999999");
	}

	#[test]
	fn test_alpha_triplet() {
		let (store, events) = parse_logged(
			"[Begin Action 0]\n\
			 0,0,0,0,1, A256,S128 D1\n",
		);

		assert!(events.is_empty());
		let frame = &store.frames_of(&store.headers()[0])[0];
		assert_eq!(frame.alpha_a(), 256);
		assert_eq!(frame.alpha_s(), 128);
		assert_eq!(frame.alpha_d(), 1);
	}

	#[test]
	fn test_alpha_out_of_range_substituted_with_zero() {
		let (store, events) = parse_logged(
			"[Begin Action 0]\n\
			 0,0,0,0,1, A300\n",
		);

		let frame = &store.frames_of(&store.headers()[0])[0];
		assert_eq!(frame.alpha_a(), 0);
		assert_eq!(events.len(), 1);
		assert_eq!(events[0].kind, ErrorKind::RangeAlphaA);
		assert_eq!(events[0].value, "300");
	}

	#[test]
	fn test_alpha_tag_without_value_logged_as_conversion_failure() {
		let (store, events) = parse_logged(
			"[Begin Action 0]\n\
			 0,0,0,0,1, S\n",
		);

		let frame = &store.frames_of(&store.headers()[0])[0];
		assert_eq!(frame.alpha_s(), 0);
		assert_eq!(events.len(), 1);
		assert_eq!(events[0].kind, ErrorKind::ParseIntFailed);
		assert_eq!(events[0].value, "S");
	}

	#[test]
	fn test_duplicate_alpha_tag_later_wins() {
		let (store, events) = parse_logged(
			"[Begin Action 0]\n\
			 0,0,0,0,1, A10,A20\n",
		);

		assert!(events.is_empty());
		let frame = &store.frames_of(&store.headers()[0])[0];
		assert_eq!(frame.alpha_a(), 20);
	}

	#[test]
	fn test_unrecognized_lines_are_ignored() {
		let (store, events) = parse_logged(
			"; animation script\n\
			 stray text before any block\n\
			 [Begin Action 0] ; idle\n\
			 \n\
			 ; comment inside the block\n\
			 0,0,0,0,1\n\
			 this is not a record\n\
			 0,1,0,0,1\n",
		);

		assert!(events.is_empty());
		assert_eq!(store.headers()[0].frame_count(), 2);
	}

	#[test]
	fn test_frames_outside_any_block_are_skipped() {
		let (store, events) = parse_logged(
			"0,0,0,0,1\n\
			 Loopstart\n\
			 [Begin Action 0]\n\
			 0,0,0,0,1\n",
		);

		assert!(events.is_empty());
		assert_eq!(store.frame_len(), 1);
		assert_eq!(store.headers()[0].frame_count(), 1);
	}

	#[test]
	fn test_end_of_stream_finalizes_open_block() {
		let (store, events) = parse_logged("[Begin Action 12]\n");

		assert_eq!(store.len(), 1);
		assert!(store.headers()[0].is_empty());
		assert_eq!(events.len(), 1);
		assert_eq!(events[0].kind, ErrorKind::EmptyAnimation);
	}

	#[test]
	fn test_negative_sprite_and_infinite_duration() {
		let (store, events) = parse_logged(
			"[Begin Action 0]\n\
			 -1,-1, 0,0, -1\n",
		);

		assert!(events.is_empty());
		let frame = &store.frames_of(&store.headers()[0])[0];
		assert_eq!(frame.group(), -1);
		assert_eq!(frame.image(), -1);
		assert_eq!(frame.duration(), -1);
		assert!(frame.is_dummy());
	}

	#[test]
	fn test_crlf_input() {
		let (store, events) =
			parse_logged("[Begin Action 4]\r\nLoopstart\r\n0,0,0,0,1\r\n");

		assert!(events.is_empty());
		let header = &store.headers()[0];
		assert_eq!(header.id(), 4);
		assert!(header.has_loop());
		assert_eq!(header.loop_elem(), 0);
	}

	#[test]
	fn test_mixed_violations_keep_event_order() {
		let (_, events) = parse_logged(
			"[Begin Action 0]\n\
			 70000,0,0,0,1\n\
			 0,0,0,0,-2\n\
			 [Begin Action 0]\n",
		);

		let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
		assert_eq!(
			kinds,
			vec![
				ErrorKind::RangeSpriteGroup,
				ErrorKind::RangeTime,
				ErrorKind::DuplicateAnimation,
			]
		);
	}
}
