//! AIR animation script support for 2D fighting-game engines.
//!
//! This crate parses the line-oriented AIR text format — animation definitions
//! referencing sprites with position, timing, facing, and blend parameters —
//! into a compact, randomly-accessible in-memory representation, validating
//! every numeric field against its registrable range along the way.
//!
//! # Format Overview
//!
//! An AIR script is a sequence of animation blocks. Each block runs from a
//! `[Begin Action N]` line to the next begin line or the end of the stream:
//!
//! ```text
//! [Begin Action 200]   ; standing
//! 0,0, 0,0, 10
//! 0,1, 0,0, 10
//! Loopstart
//! 0,2, 0,0, -1, H, A256,S128
//! ```
//!
//! Per record, in order: sprite group, sprite image, X/Y position, display
//! duration, optional `H`/`V` facing flags, then up to three alpha pairs
//! tagged `A`/`S`/`D`. Validation ranges:
//!
//! ```text
//! Field             Range                        Substitute on violation
//! ----------------  ---------------------------  -----------------------
//! animation number  0..=2147483647               block discarded
//! group / image     -1..=65535                   -1 (unset)
//! posX / posY       -2147483648..=2147483647     0
//! duration          -1..=2147483647              0
//! alpha A/S/D       0..=256                      0
//! ```
//!
//! # Storage Layout
//!
//! Parsed data lands in two parallel append-only arrays: headers and frame
//! records. Each header addresses its frames through a contiguous
//! (start, count) slice of the flat frame array, and frame parameters are
//! bit-packed into fixed-width words (see [`frame`] and [`bitfield`]).
//! A hash index maps external animation numbers to dense header positions.
//!
//! # Error Policy
//!
//! Every parse runs under one of two policies, chosen via
//! [`ParseConfig`](parse_config::ParseConfig):
//!
//! - **Raise**: the first violation aborts with a typed
//!   [`AirError`](error::AirError) carrying kind, offending value, and line.
//! - **Log**: violations are accumulated as [`ErrorEvent`](ledger::ErrorEvent)s
//!   with safe substitutes, and the parse continues to the end of the stream.
//!
//! Lookups follow the same duality: `Option`-bearing accessors, raising
//! wrappers, and dummy-returning variants.
//!
//! # Usage
//!
//! ## Parsing a script
//!
//! ```
//! use air_rs::prelude::*;
//!
//! let script = "\
//! [Begin Action 0]
//! 0,0, 0,0, 7
//! ";
//!
//! let air = AirFile::from_text(script, &ParseConfig::default())?;
//! let idle = air.get_animation(0)?;
//! assert_eq!(idle.frames()[0].duration(), 7);
//! # Ok::<(), AirError>(())
//! ```
//!
//! ## Tolerant parsing with a diagnostic report
//!
//! ```
//! use air_rs::prelude::*;
//!
//! let script = "\
//! [Begin Action 0]
//! 70000,0, 0,0, 1
//! ";
//!
//! let air = AirFile::from_text(script, &ParseConfig::logging())?;
//! assert_eq!(air.events().len(), 1);
//! println!("{}", air.report());
//! # Ok::<(), AirError>(())
//! ```
//!
//! ## Branch-free lookups
//!
//! ```
//! use air_rs::prelude::*;
//!
//! let air = AirFile::from_text("[Begin Action 0]\n0,0,0,0,1\n", &ParseConfig::default())?;
//!
//! let missing = air.animation_or_dummy(9999);
//! assert!(missing.is_dummy());
//! assert_eq!(missing.frame_count(), 0);
//! # Ok::<(), AirError>(())
//! ```

pub mod bitfield;
pub mod constants;
pub mod error;
pub mod file;
pub mod frame;
pub mod header;
pub mod ledger;
pub mod parse_config;
pub mod parser;
pub mod store;
pub mod validate;

/// `use air_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export main types at the crate root for convenience
pub use self::error::{AirError, ErrorKind};
pub use self::file::{AirFile, AnimationView};
pub use self::frame::FrameRecord;
pub use self::header::AnimationHeader;
pub use self::ledger::{ErrorEvent, ErrorLedger, ErrorPolicy};
pub use self::parse_config::ParseConfig;
pub use self::parser::Parser;
pub use self::store::AnimationStore;
