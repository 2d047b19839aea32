//! Attribute encoder.
//!
//! # Data Flow
//! ```text
//! [Attribute, ...]            (attribute.rs)
//!     → Color                 (color.rs)
//!     → "1;31"                escape_sequence()
//!     → ESC[1;31m msg ESC[0m  wrap() / write_to()
//!
//! runtime templates           (template.rs)
//!     → "%s=%d" + [Arg]       format_template()
//! ```
//!
//! # Design Decisions
//! - Pure and stateless; the only side effect is the optional write
//! - Every wrapped string ends with the reset sequence
//! - A framed message reaches the sink through one write call

pub mod attribute;
pub mod color;
pub mod template;

pub use attribute::{Attribute, ParseAttributeError};
pub use color::{Color, ESCAPE};
pub use template::{format_template, Arg};
