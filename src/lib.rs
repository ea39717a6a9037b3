//! RGB color parsing, conversion, and palette derivation.
//!
//! `iridescent` normalizes heterogeneous colorlike inputs — hex notations,
//! `rgb()`/`rgba()` strings, component sequences, key/value mappings,
//! embedded JSON, and CSS color names — into a canonical three-band
//! [`Color`], then builds format emitters and derived-color operations
//! (complement, mix, interpolation ranges, rainbow palettes, randomization)
//! on top of it.
//!
//! ```
//! use iridescent::Color;
//!
//! let coral = Color::parse("#ff7f50")?;
//! assert_eq!(coral.to_rgb_string(), "rgb(255, 127, 80)");
//! assert!(coral.compare("coral")?);
//!
//! let mixed = coral.mix([0, 0, 255])?;
//! assert_eq!(mixed.to_hex(), "#7f3fa7");
//!
//! let palette = Color::rainbow(3);
//! assert_eq!(palette[1].to_array(), [0, 255, 0]);
//! # Ok::<(), iridescent::ColorError>(())
//! ```
//!
//! Unknown names are delegated to an injectable [`NameResolver`]; the
//! default is a static table of the CSS named colors.

mod color;
mod named;
mod parse;

pub use color::Color;
pub use named::{CssNames, NameResolver};
pub use parse::{ColorError, ColorInput, Component};
