//! Colorlike input classification and normalization.
//!
//! Every accepted input shape is represented explicitly by [`ColorInput`] and
//! resolved to a three-band triple by an ordered match:
//!
//! 1. Another [`Color`] — copy its bands.
//! 2. A string holding valid JSON — reparse and restart from the decoded value.
//! 3. A sequence of three components.
//! 4. `rgb(n,n,n)` notation (whitespace-insensitive).
//! 5. `rgba(n,n,n,f)` notation; the alpha component is discarded.
//! 6. Six hex digits, optional leading `#`.
//! 7. Three hex digits, optional leading `#`, each digit doubled.
//! 8. Any other string — delegated to the [`NameResolver`], whose output is
//!    reclassified as a structured notation.
//! 9. A key/value mapping with loosely matched `r`/`red`, `g`/`green`,
//!    `b`/`blue` keys.
//!
//! After shape resolution each band is rounded to the nearest integer and
//! clamped into `[0, 255]`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::named::NameResolver;
use crate::Color;

static RGB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^rgb\((\d{1,3}),(\d{1,3}),(\d{1,3})\)$").unwrap());
static RGBA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^rgba\((\d{1,3}),(\d{1,3}),(\d{1,3}),\d(\.\d{0,9})?\)$").unwrap());
static LONG_HEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#?([0-9a-fA-F]{6})$").unwrap());
static SHORT_HEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#?([0-9a-fA-F]{3})$").unwrap());

/// Errors produced while normalizing a colorlike value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// A variadic-style construction received an argument count other than
    /// 0, 1, or 3.
    #[error("expected 0, 1, or 3 arguments, got {0}")]
    InvalidArgumentCount(usize),
    /// The resolved shape did not hold exactly three components.
    #[error("expected 3 color components, got {0}")]
    InvalidComponentCount(usize),
    /// The name resolver could not map the string to a structured notation.
    #[error("unresolvable color name: {0:?}")]
    UnresolvableColorName(String),
}

/// One element of a component sequence or of a three-argument construction.
///
/// Numbers are read as decimal values and truncated toward zero; text is read
/// as hexadecimal. The asymmetry mirrors the notations the components come
/// from: `[255, 0, 128]` versus `["ff", "00", "80"]`.
#[derive(Clone, Debug, PartialEq)]
pub enum Component {
    Number(f64),
    Text(String),
}

impl Component {
    /// Coerce to a raw band value. Text that is not valid hexadecimal
    /// coerces to 0.
    pub(crate) fn coerce(&self) -> f64 {
        match self {
            Component::Number(n) => n.trunc(),
            Component::Text(s) => u32::from_str_radix(s, 16).map(f64::from).unwrap_or(0.0),
        }
    }
}

macro_rules! component_from_number {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Component {
            fn from(value: $ty) -> Self {
                Component::Number(value as f64)
            }
        })*
    };
}

component_from_number!(u8, u16, u32, i8, i16, i32, i64, f32, f64);

impl From<&str> for Component {
    fn from(value: &str) -> Self {
        Component::Text(value.to_string())
    }
}

impl From<String> for Component {
    fn from(value: String) -> Self {
        Component::Text(value)
    }
}

/// A colorlike value: any input shape the normalizer accepts.
#[derive(Clone, Debug)]
pub enum ColorInput {
    /// An existing color; its bands are copied.
    Color(Color),
    /// An ordered sequence of components. Must resolve to exactly three.
    Sequence(Vec<Component>),
    /// A textual notation: rgb()/rgba() strings, hex notations, embedded
    /// JSON, or a color name for the resolver.
    Text(String),
    /// A key/value mapping with loosely matched band keys.
    Map(Vec<(String, f64)>),
}

impl From<Color> for ColorInput {
    fn from(color: Color) -> Self {
        ColorInput::Color(color)
    }
}

impl From<&Color> for ColorInput {
    fn from(color: &Color) -> Self {
        ColorInput::Color(*color)
    }
}

impl From<&str> for ColorInput {
    fn from(text: &str) -> Self {
        ColorInput::Text(text.to_string())
    }
}

impl From<String> for ColorInput {
    fn from(text: String) -> Self {
        ColorInput::Text(text)
    }
}

impl<C: Into<Component>, const N: usize> From<[C; N]> for ColorInput {
    fn from(items: [C; N]) -> Self {
        ColorInput::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Component>, B: Into<Component>, C: Into<Component>> From<(A, B, C)> for ColorInput {
    fn from((a, b, c): (A, B, C)) -> Self {
        ColorInput::Sequence(vec![a.into(), b.into(), c.into()])
    }
}

impl From<Vec<Component>> for ColorInput {
    fn from(items: Vec<Component>) -> Self {
        ColorInput::Sequence(items)
    }
}

impl From<Vec<(String, f64)>> for ColorInput {
    fn from(pairs: Vec<(String, f64)>) -> Self {
        ColorInput::Map(pairs)
    }
}

impl From<std::collections::HashMap<String, f64>> for ColorInput {
    fn from(map: std::collections::HashMap<String, f64>) -> Self {
        ColorInput::Map(map.into_iter().collect())
    }
}

impl From<Value> for ColorInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => {
                ColorInput::Sequence(items.iter().map(json_component).collect())
            }
            Value::Object(map) => {
                ColorInput::Map(map.iter().map(|(k, v)| (k.clone(), json_number(v))).collect())
            }
            Value::String(text) => ColorInput::Text(text),
            // A bare scalar carries no bands; it resolves to black.
            _ => ColorInput::Sequence(vec![
                Component::Number(0.0),
                Component::Number(0.0),
                Component::Number(0.0),
            ]),
        }
    }
}

fn json_component(value: &Value) -> Component {
    match value {
        Value::Number(n) => Component::Number(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => Component::Text(s.clone()),
        _ => Component::Number(0.0),
    }
}

fn json_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Round to the nearest integer, then clamp into `[0, 255]`.
///
/// NaN bands (possible through the degenerate single-step range, see
/// [`Color::range`]) saturate to 0.
pub(crate) fn clamp_band(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Normalize a colorlike value into a clamped band triple.
pub(crate) fn normalize(
    input: ColorInput,
    resolver: &dyn NameResolver,
) -> Result<[u8; 3], ColorError> {
    let triple = resolve(input, resolver, false)?;
    Ok(triple.map(clamp_band))
}

fn resolve(
    input: ColorInput,
    resolver: &dyn NameResolver,
    already_resolved: bool,
) -> Result<[f64; 3], ColorError> {
    match input {
        ColorInput::Color(color) => Ok([
            f64::from(color.r()),
            f64::from(color.g()),
            f64::from(color.b()),
        ]),
        ColorInput::Sequence(items) => {
            if items.len() != 3 {
                return Err(ColorError::InvalidComponentCount(items.len()));
            }
            Ok([items[0].coerce(), items[1].coerce(), items[2].coerce()])
        }
        ColorInput::Text(text) => {
            // The string may be a serialized colorlike; JSON takes priority
            // over every textual notation.
            if let Ok(value) = serde_json::from_str::<Value>(&text) {
                return resolve(ColorInput::from(value), resolver, already_resolved);
            }
            let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            match classify(&stripped) {
                Some(triple) => Ok(triple),
                None if already_resolved => {
                    Err(ColorError::UnresolvableColorName(stripped))
                }
                None => {
                    log::debug!("no structured notation matched {stripped:?}, consulting the name resolver");
                    match resolver.resolve(&stripped) {
                        Some(notation) => resolve(ColorInput::Text(notation), resolver, true),
                        None => Err(ColorError::UnresolvableColorName(stripped)),
                    }
                }
            }
        }
        ColorInput::Map(pairs) => {
            let mut triple = [0.0; 3];
            for (key, value) in pairs {
                if matches_role(&key, "r", "red") {
                    triple[0] = value;
                } else if matches_role(&key, "g", "green") {
                    triple[1] = value;
                } else if matches_role(&key, "b", "blue") {
                    triple[2] = value;
                }
            }
            Ok(triple)
        }
    }
}

/// Match a whitespace-stripped string against the structured textual
/// notations, in priority order.
fn classify(stripped: &str) -> Option<[f64; 3]> {
    if let Some(caps) = RGB_RE.captures(stripped).or_else(|| RGBA_RE.captures(stripped)) {
        let band = |i| caps.get(i).unwrap().as_str().parse().unwrap_or(0.0);
        return Some([band(1), band(2), band(3)]);
    }
    if let Some(caps) = LONG_HEX_RE.captures(stripped) {
        let hex = caps.get(1).unwrap().as_str();
        return Some([hex_pair(&hex[0..2]), hex_pair(&hex[2..4]), hex_pair(&hex[4..6])]);
    }
    if let Some(caps) = SHORT_HEX_RE.captures(stripped) {
        let mut bands = caps.get(1).unwrap().as_str().chars().map(|digit| {
            let mut pair = String::with_capacity(2);
            pair.push(digit);
            pair.push(digit);
            hex_pair(&pair)
        });
        return Some([bands.next().unwrap(), bands.next().unwrap(), bands.next().unwrap()]);
    }
    None
}

fn hex_pair(pair: &str) -> f64 {
    u32::from_str_radix(pair, 16).map(f64::from).unwrap_or(0.0)
}

/// A key fills a band role if it case-insensitively equals the bare letter or
/// contains the full band name.
fn matches_role(key: &str, letter: &str, word: &str) -> bool {
    key.eq_ignore_ascii_case(letter) || key.to_ascii_lowercase().contains(word)
}
