//! The RGB color entity: band accessors, format emitters, and the derived
//! palette operations built on top of normalization.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::named::{CssNames, NameResolver};
use crate::parse::{self, ColorError, ColorInput, Component};

/// The seven-anchor hue cycle sampled by [`Color::rainbow`]:
/// red, yellow, green, cyan, blue, magenta, and red again to close the loop.
const RAINBOW_ANCHORS: [[f64; 3]; 7] = [
    [255.0, 0.0, 0.0],
    [255.0, 255.0, 0.0],
    [0.0, 255.0, 0.0],
    [0.0, 255.0, 255.0],
    [0.0, 0.0, 255.0],
    [255.0, 0.0, 255.0],
    [255.0, 0.0, 0.0],
];

/// An RGB color with three integer bands in `[0, 255]`.
///
/// Construction always runs through the normalizer, so every band is rounded
/// and clamped and no partially valid color can exist. Alpha is accepted in
/// `rgba()` inputs but never stored; emitters re-emit it as 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    /// Build a color from three components, each coerced like a sequence
    /// element: decimal for numbers, hexadecimal for text.
    ///
    /// ```
    /// use iridescent::Color;
    ///
    /// assert_eq!(Color::new(255, 0, 128), Color::new(255, 0, "80"));
    /// ```
    pub fn new(r: impl Into<Component>, g: impl Into<Component>, b: impl Into<Component>) -> Self {
        Self {
            r: parse::clamp_band(r.into().coerce()),
            g: parse::clamp_band(g.into().coerce()),
            b: parse::clamp_band(b.into().coerce()),
        }
    }

    /// Normalize any colorlike value with the default [`CssNames`] resolver.
    pub fn parse(input: impl Into<ColorInput>) -> Result<Self, ColorError> {
        Self::parse_with(input, &CssNames)
    }

    /// Normalize any colorlike value, delegating unknown names to `resolver`.
    pub fn parse_with(
        input: impl Into<ColorInput>,
        resolver: &dyn NameResolver,
    ) -> Result<Self, ColorError> {
        let [r, g, b] = parse::normalize(input.into(), resolver)?;
        Ok(Self { r, g, b })
    }

    /// Variadic-style construction over a component slice: zero components
    /// make black, one is treated as a textual colorlike, three are the
    /// bands. Any other count is [`ColorError::InvalidArgumentCount`].
    pub fn from_args(args: &[Component]) -> Result<Self, ColorError> {
        match args {
            [] => Ok(Self::default()),
            [Component::Text(text)] => Self::parse(text.as_str()),
            [Component::Number(_)] => Ok(Self::default()),
            [r, g, b] => Ok(Self::new(r.clone(), g.clone(), b.clone())),
            _ => Err(ColorError::InvalidArgumentCount(args.len())),
        }
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    /// Alias for [`Color::r`].
    pub fn red(&self) -> u8 {
        self.r
    }

    /// Alias for [`Color::g`].
    pub fn green(&self) -> u8 {
        self.g
    }

    /// Alias for [`Color::b`].
    pub fn blue(&self) -> u8 {
        self.b
    }

    /// Replace the red band; the value is rounded and clamped.
    pub fn set_r(&mut self, value: f64) {
        self.r = parse::clamp_band(value);
    }

    /// Replace the green band; the value is rounded and clamped.
    pub fn set_g(&mut self, value: f64) {
        self.g = parse::clamp_band(value);
    }

    /// Replace the blue band; the value is rounded and clamped.
    pub fn set_b(&mut self, value: f64) {
        self.b = parse::clamp_band(value);
    }

    /// Alias for [`Color::set_r`].
    pub fn set_red(&mut self, value: f64) {
        self.set_r(value);
    }

    /// Alias for [`Color::set_g`].
    pub fn set_green(&mut self, value: f64) {
        self.set_g(value);
    }

    /// Alias for [`Color::set_b`].
    pub fn set_blue(&mut self, value: f64) {
        self.set_b(value);
    }

    /// The color with every band replaced by `255 - band`.
    pub fn complement(&self) -> Self {
        Self {
            r: 255 - self.r,
            g: 255 - self.g,
            b: 255 - self.b,
        }
    }

    /// Normalize `other` and test exact band equality.
    pub fn compare(&self, other: impl Into<ColorInput>) -> Result<bool, ColorError> {
        Ok(*self == Self::parse(other)?)
    }

    /// The per-band arithmetic mean of this color and `other`.
    pub fn mix(&self, other: impl Into<ColorInput>) -> Result<Self, ColorError> {
        let other = Self::parse(other)?;
        Ok(Self::new(
            (f64::from(self.r) + f64::from(other.r)) / 2.0,
            (f64::from(self.g) + f64::from(other.g)) / 2.0,
            (f64::from(self.b) + f64::from(other.b)) / 2.0,
        ))
    }

    /// `count` colors linearly interpolated from this color to `target`,
    /// inclusive of both endpoints.
    ///
    /// The first sample equals this color and the last equals the target
    /// exactly. `count == 1` is a degenerate edge case: the single sample
    /// sits at position 0/0 along the span, its NaN bands saturate to 0, and
    /// the result is one black color.
    pub fn range(&self, target: impl Into<ColorInput>, count: usize) -> Result<Vec<Self>, ColorError> {
        let target = Self::parse(target)?;
        let span = [
            f64::from(target.r) - f64::from(self.r),
            f64::from(target.g) - f64::from(self.g),
            f64::from(target.b) - f64::from(self.b),
        ];
        let last = count as f64 - 1.0;
        let mut colors = Vec::with_capacity(count);
        for i in 0..count {
            let position = i as f64 / last;
            colors.push(Self::new(
                f64::from(self.r) + span[0] * position,
                f64::from(self.g) + span[1] * position,
                f64::from(self.b) + span[2] * position,
            ));
        }
        Ok(colors)
    }

    /// `amount` colors sampled evenly along the fixed seven-anchor hue
    /// cycle. The conventional amount is 6, which reproduces the six
    /// distinct anchors exactly; `rainbow(3)` yields every second anchor
    /// (red, green, blue).
    pub fn rainbow(amount: usize) -> Vec<Self> {
        let step = (RAINBOW_ANCHORS.len() - 1) as f64 / amount as f64;
        let mut colors = Vec::with_capacity(amount);
        for i in 0..amount {
            let mult = step * i as f64;
            let source = RAINBOW_ANCHORS[mult.floor() as usize];
            let target = RAINBOW_ANCHORS[mult.floor() as usize + 1];
            let frac = mult.fract();
            colors.push(Self::new(
                source[0] + (target[0] - source[0]) * frac,
                source[1] + (target[1] - source[1]) * frac,
                source[2] + (target[2] - source[2]) * frac,
            ));
        }
        colors
    }

    /// A color with each band drawn independently from `[0, 255)`.
    ///
    /// The upper bound is exclusive, so 255 itself is never drawn.
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            r: rng.random_range(0..255),
            g: rng.random_range(0..255),
            b: rng.random_range(0..255),
        }
    }

    /// The bands as an ordered `[r, g, b]` triple.
    pub fn to_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Lowercase `#rrggbb` notation, each band zero-padded to two digits.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The 6-hex-digit concatenation read as a single hexadecimal integer.
    pub fn to_int(&self) -> u32 {
        u32::from(self.r) << 16 | u32::from(self.g) << 8 | u32::from(self.b)
    }

    /// A CSS declaration: `color: rgb(r, g, b);`.
    pub fn to_css(&self) -> String {
        format!("color: rgb({}, {}, {});", self.r, self.g, self.b)
    }

    /// `rgb(r, g, b)` notation.
    pub fn to_rgb_string(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// `rgba(r, g, b, 1)` notation; the alpha is always 1.
    pub fn to_rgba_string(&self) -> String {
        format!("rgba({}, {}, {}, 1)", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{r:{},g:{},b:{}}}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    /// Accepts any JSON colorlike value and runs it through the normalizer.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::parse(value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_coerces_and_clamps() {
        assert_eq!(Color::new(-20, 300, 12.7).to_array(), [0, 255, 12]);
        assert_eq!(Color::new("ff", "00", "80").to_array(), [255, 0, 128]);
    }

    #[test]
    fn test_setters_round_and_clamp() {
        let mut color = Color::default();
        color.set_r(12.7);
        color.set_g(-5.0);
        color.set_b(300.0);
        assert_eq!(color.to_array(), [13, 0, 255]);
        assert_eq!((color.red(), color.green(), color.blue()), (13, 0, 255));
    }

    #[test]
    fn test_from_args_arity() {
        assert_eq!(Color::from_args(&[]).unwrap(), Color::default());
        assert_eq!(
            Color::from_args(&[Component::Text("#ff0080".to_string())]).unwrap(),
            Color::new(255, 0, 128)
        );
        assert_eq!(
            Color::from_args(&[Component::Number(1.0), Component::Number(2.0), Component::Number(3.0)])
                .unwrap(),
            Color::new(1, 2, 3)
        );
        assert_eq!(
            Color::from_args(&[Component::Number(1.0), Component::Number(2.0)]),
            Err(ColorError::InvalidArgumentCount(2))
        );
    }

    #[test]
    fn test_complement_is_an_involution() {
        let color = Color::new(12, 150, 233);
        assert_eq!(color.complement().to_array(), [243, 105, 22]);
        assert_eq!(color.complement().complement(), color);
    }

    #[test]
    fn test_compare_is_reflexive_and_symmetric() {
        let a = Color::new(255, 0, 128);
        let b = Color::parse("#ff0080").unwrap();
        assert!(a.compare(a).unwrap());
        assert!(a.compare(b).unwrap());
        assert!(b.compare(a).unwrap());
        assert!(!a.compare("black").unwrap());
    }

    #[test]
    fn test_mix_truncates_half_steps() {
        let mixed = Color::new(255, 0, 0).mix([0, 0, 255]).unwrap();
        assert_eq!(mixed.to_array(), [127, 0, 127]);
        let same = Color::new(10, 20, 30).mix((10, 20, 30)).unwrap();
        assert_eq!(same.to_array(), [10, 20, 30]);
    }

    #[test]
    fn test_range_hits_both_endpoints() {
        let source = Color::new(255, 0, 0);
        let colors = source.range([0, 0, 255], 3).unwrap();
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], source);
        assert_eq!(colors[1].to_array(), [127, 0, 127]);
        assert_eq!(colors[2].to_array(), [0, 0, 255]);

        let colors = source.range("#123456", 7).unwrap();
        assert_eq!(colors[0], source);
        assert_eq!(colors[6], Color::parse("#123456").unwrap());
    }

    #[test]
    fn test_range_of_one_is_the_degenerate_black() {
        let colors = Color::new(255, 0, 0).range([0, 0, 255], 1).unwrap();
        assert_eq!(colors, vec![Color::default()]);
    }

    #[test]
    fn test_rainbow_reproduces_anchor_hues() {
        let hues = Color::rainbow(6);
        assert_eq!(
            hues.iter().map(Color::to_array).collect::<Vec<_>>(),
            vec![
                [255, 0, 0],
                [255, 255, 0],
                [0, 255, 0],
                [0, 255, 255],
                [0, 0, 255],
                [255, 0, 255],
            ]
        );
        assert_eq!(
            Color::rainbow(3).iter().map(Color::to_array).collect::<Vec<_>>(),
            vec![[255, 0, 0], [0, 255, 0], [0, 0, 255]]
        );
        assert_eq!(Color::rainbow(1), vec![Color::new(255, 0, 0)]);
        assert_eq!(Color::rainbow(12).len(), 12);
    }

    #[test]
    fn test_random_never_draws_255() {
        for _ in 0..100 {
            let color = Color::random();
            assert!(color.r() < 255 && color.g() < 255 && color.b() < 255);
        }
    }

    #[test]
    fn test_emitters() {
        let color = Color::new(255, 0, 128);
        assert_eq!(color.to_array(), [255, 0, 128]);
        assert_eq!(color.to_hex(), "#ff0080");
        assert_eq!(color.to_int(), 0xff0080);
        assert_eq!(color.to_css(), "color: rgb(255, 0, 128);");
        assert_eq!(color.to_rgb_string(), "rgb(255, 0, 128)");
        assert_eq!(color.to_rgba_string(), "rgba(255, 0, 128, 1)");
        assert_eq!(color.to_string(), "{r:255,g:0,b:128}");
    }

    #[test]
    fn test_hex_emitters_zero_pad() {
        assert_eq!(Color::new(1, 2, 3).to_hex(), "#010203");
        assert_eq!(Color::default().to_hex(), "#000000");
        assert_eq!(Color::default().to_int(), 0);
    }

    #[test]
    fn test_from_str() {
        let color: Color = "rgb(1, 2, 3)".parse().unwrap();
        assert_eq!(color.to_array(), [1, 2, 3]);
        assert!("notacolor".parse::<Color>().is_err());
    }
}
