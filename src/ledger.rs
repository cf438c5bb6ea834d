//! Error ledger: ordered diagnostics with a dual raise/log policy.
//!
//! Every violation found during a parse goes through [`ErrorLedger::record`].
//! Under [`ErrorPolicy::Raise`] the first violation aborts the parse as a typed
//! error; under [`ErrorPolicy::Log`] the event is appended, the offending field
//! is substituted with a safe value upstream, and the parse continues. The
//! ledger also renders the accumulated events as a report string; writing that
//! report anywhere is a collaborator's job.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{AirError, ErrorKind};

/// How violations are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorPolicy {
	/// The first violation aborts with a typed [`AirError`].
	Raise,
	/// Violations are appended to the ledger and the parse continues.
	#[default]
	Log,
}

/// One recorded violation.
///
/// Carries the fixed error kind, the offending value as written in the script,
/// and the source line number, plus the owning animation number and element
/// index when the violation happened inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEvent {
	/// What went wrong.
	pub kind: ErrorKind,
	/// The offending value, verbatim from the script.
	pub value: String,
	/// One-based source line number.
	pub line: usize,
	/// Animation number owning the violation, when known.
	pub animation: Option<u32>,
	/// Zero-based element index within the animation, when known.
	pub element: Option<usize>,
}

impl ErrorEvent {
	/// Creates an event with no animation context.
	pub fn new(kind: ErrorKind, value: impl Into<String>, line: usize) -> Self {
		Self { kind, value: value.into(), line, animation: None, element: None }
	}

	/// Attaches the owning animation number.
	pub fn with_animation(mut self, id: u32) -> Self {
		self.animation = Some(id);
		self
	}

	/// Attaches the element index within the owning animation.
	pub fn with_element(mut self, element: usize) -> Self {
		self.element = Some(element);
		self
	}
}

impl std::fmt::Display for ErrorEvent {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "line {}: {}: {} (value: {})", self.line, self.kind, self.kind.message(), self.value)
	}
}

/// Ordered collection of violations for one parse.
#[derive(Debug, Clone, Default)]
pub struct ErrorLedger {
	policy: ErrorPolicy,
	events: Vec<ErrorEvent>,
}

impl ErrorLedger {
	/// Creates an empty ledger operating under `policy`.
	pub fn new(policy: ErrorPolicy) -> Self {
		Self { policy, events: Vec::new() }
	}

	/// The policy this ledger operates under.
	pub fn policy(&self) -> ErrorPolicy {
		self.policy
	}

	/// Records one violation.
	///
	/// # Errors
	///
	/// Under [`ErrorPolicy::Raise`] the event comes straight back as
	/// [`AirError::Invalid`]; nothing is appended.
	pub fn record(&mut self, event: ErrorEvent) -> Result<(), AirError> {
		warn!("{event}");
		match self.policy {
			ErrorPolicy::Raise => Err(AirError::Invalid(event)),
			ErrorPolicy::Log => {
				self.events.push(event);
				Ok(())
			}
		}
	}

	/// The recorded events, in source order.
	pub fn events(&self) -> &[ErrorEvent] {
		&self.events
	}

	/// Number of recorded events.
	pub fn len(&self) -> usize {
		self.events.len()
	}

	/// Returns `true` when nothing has been recorded.
	pub fn is_empty(&self) -> bool {
		self.events.is_empty()
	}

	/// Discards all recorded events.
	pub fn clear(&mut self) {
		self.events.clear();
	}

	/// Consumes the ledger, yielding the recorded events.
	pub fn into_events(self) -> Vec<ErrorEvent> {
		self.events
	}

	/// Renders the recorded events as a multi-line report string.
	pub fn report(&self) -> String {
		render_report(&self.events)
	}
}

/// Renders events as a multi-line report string.
///
/// The layout follows the engine's original error log: a count line, then one
/// stanza per event quoting the fixed parameter name and message.
pub fn render_report(events: &[ErrorEvent]) -> String {
	use std::fmt::Write;

	let mut out = String::new();
	let _ = writeln!(out, "error count: {}", events.len());
	if events.is_empty() {
		out.push_str("no errors were found\n");
		return out;
	}

	for event in events {
		let _ = writeln!(out);
		let _ = writeln!(out, "location: line {}", event.line);
		let _ = writeln!(
			out,
			"animation number: {}",
			event.animation.map_or_else(|| "-".to_string(), |id| id.to_string())
		);
		let _ = writeln!(
			out,
			"element number: {}",
			event.element.map_or_else(|| "-".to_string(), |elem| elem.to_string())
		);
		let _ = writeln!(out, "parameter: {}", event.kind.name());
		let _ = writeln!(out, "value: {}", event.value);
		let _ = writeln!(out, "detail: {}", event.kind.message());
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_log_policy_accumulates_in_order() {
		let mut ledger = ErrorLedger::new(ErrorPolicy::Log);
		ledger.record(ErrorEvent::new(ErrorKind::RangeAlphaA, "300", 3)).unwrap();
		ledger.record(ErrorEvent::new(ErrorKind::RangePosX, "9999999999", 8)).unwrap();

		assert_eq!(ledger.len(), 2);
		assert_eq!(ledger.events()[0].line, 3);
		assert_eq!(ledger.events()[1].kind, ErrorKind::RangePosX);
	}

	#[test]
	fn test_raise_policy_returns_first_violation() {
		let mut ledger = ErrorLedger::new(ErrorPolicy::Raise);
		let err = ledger
			.record(ErrorEvent::new(ErrorKind::DuplicateAnimation, "12", 40))
			.expect_err("raise policy must abort");

		match err {
			AirError::Invalid(event) => {
				assert_eq!(event.kind, ErrorKind::DuplicateAnimation);
				assert_eq!(event.line, 40);
			}
			other => panic!("unexpected error: {other:?}"),
		}
		assert!(ledger.is_empty());
	}

	#[test]
	fn test_report_empty() {
		let ledger = ErrorLedger::new(ErrorPolicy::Log);
		let report = ledger.report();
		assert!(report.starts_with("error count: 0"));
		assert!(report.contains("no errors were found"));
	}

	#[test]
	fn test_report_quotes_fixed_strings() {
		let mut ledger = ErrorLedger::new(ErrorPolicy::Log);
		ledger
			.record(
				ErrorEvent::new(ErrorKind::RangeSpriteGroup, "70000", 12)
					.with_animation(200)
					.with_element(4),
			)
			.unwrap();

		let report = ledger.report();
		assert!(report.contains("error count: 1"));
		assert!(report.contains("location: line 12"));
		assert!(report.contains("animation number: 200"));
		assert!(report.contains("element number: 4"));
		assert!(report.contains("parameter: SpriteGroup"));
		assert!(report.contains("value: 70000"));
		assert!(report.contains(ErrorKind::RangeSpriteGroup.message()));
	}

	#[test]
	fn test_event_without_context_prints_dashes() {
		let mut ledger = ErrorLedger::new(ErrorPolicy::Log);
		ledger.record(ErrorEvent::new(ErrorKind::RangeAnimationNumber, "-5", 1)).unwrap();

		let report = ledger.report();
		assert!(report.contains("animation number: -"));
		assert!(report.contains("element number: -"));
	}
}
