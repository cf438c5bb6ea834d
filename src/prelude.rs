//! Prelude module for `air-rs`.
//!
//! This module provides a convenient way to import commonly used types.
//!
//! # Examples
//!
//! ```
//! use air_rs::prelude::*;
//!
//! let config = ParseConfig::logging();
//! let air = AirFile::from_text("[Begin Action 0]\n0,0,0,0,1\n", &config)?;
//! assert_eq!(air.len(), 1);
//! # Ok::<(), AirError>(())
//! ```

#[doc(inline)]
pub use crate::error::{AirError, ErrorKind};

#[doc(inline)]
pub use crate::file::{AirFile, AnimationView};

#[doc(inline)]
pub use crate::frame::FrameRecord;

#[doc(inline)]
pub use crate::header::AnimationHeader;

#[doc(inline)]
pub use crate::ledger::{ErrorEvent, ErrorLedger, ErrorPolicy};

#[doc(inline)]
pub use crate::parse_config::ParseConfig;

#[doc(inline)]
pub use crate::parser::Parser;

#[doc(inline)]
pub use crate::store::AnimationStore;
