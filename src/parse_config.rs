//! Parse configuration.
//!
//! The engine's original reader kept the raise-vs-log switch and size limits in
//! process-wide settings; here they travel as an explicit value handed to the
//! facade at construction, so two parses with different policies can coexist.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::ledger::ErrorPolicy;

/// Configuration for one parse.
///
/// # Presets
///
/// - [`ParseConfig::default`]: log policy, 16 MiB size limit.
/// - [`ParseConfig::logging`]: same as default, spelled out.
/// - [`ParseConfig::raising`]: abort on the first violation.
///
/// # Examples
///
/// ```
/// use air_rs::parse_config::ParseConfig;
/// use air_rs::ledger::ErrorPolicy;
///
/// let config = ParseConfig::raising();
/// assert_eq!(config.policy, ErrorPolicy::Raise);
///
/// let config = ParseConfig { max_input_size: 1024, ..ParseConfig::default() };
/// assert_eq!(config.policy, ErrorPolicy::Log);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseConfig {
	/// How violations are surfaced during the parse and at access time.
	pub policy: ErrorPolicy,
	/// Upper bound on input size in bytes; larger inputs are refused up front.
	pub max_input_size: u64,
}

impl Default for ParseConfig {
	fn default() -> Self {
		Self { policy: ErrorPolicy::Log, max_input_size: constants::DEFAULT_MAX_INPUT_SIZE }
	}
}

impl ParseConfig {
	/// Creates a configuration with the given policy and the default size limit.
	pub fn new(policy: ErrorPolicy) -> Self {
		Self { policy, ..Self::default() }
	}

	/// Violations are accumulated in the ledger and substituted with safe
	/// values; the parse runs to the end of the stream.
	pub fn logging() -> Self {
		Self::new(ErrorPolicy::Log)
	}

	/// The first violation aborts the parse with a typed error.
	pub fn raising() -> Self {
		Self::new(ErrorPolicy::Raise)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_presets() {
		assert_eq!(ParseConfig::default().policy, ErrorPolicy::Log);
		assert_eq!(ParseConfig::logging().policy, ErrorPolicy::Log);
		assert_eq!(ParseConfig::raising().policy, ErrorPolicy::Raise);
		assert_eq!(ParseConfig::raising().max_input_size, constants::DEFAULT_MAX_INPUT_SIZE);
	}

	#[test]
	fn test_serde_round_trip() {
		let config = ParseConfig::raising();
		let json = serde_json::to_string(&config).unwrap();
		let back: ParseConfig = serde_json::from_str(&json).unwrap();
		assert_eq!(back, config);
	}
}
