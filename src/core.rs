use std::fmt;
use std::str::FromStr;

use crate::error::{InviewError, InviewResult};

pub use kurbo::{Point, Rect, Vec2};

/// Stable key for an observed page region.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RegionId(pub String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RegionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Milliseconds on the engine's monotonic timeline.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Self = Self(0);

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

/// Minimum visible-area fraction required to trigger a reveal.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Threshold(f64);

impl Threshold {
    pub const DEFAULT: Self = Self(0.1);

    pub fn new(fraction: f64) -> InviewResult<Self> {
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(InviewError::validation(format!(
                "threshold must be a finite fraction in [0, 1], got {fraction}"
            )));
        }
        Ok(Self(fraction))
    }

    pub fn fraction(self) -> f64 {
        self.0
    }

    /// `ratio >= threshold`, with threshold 0 treated as "any intersection at all".
    pub fn is_met(self, ratio: f64) -> bool {
        if self.0 == 0.0 {
            return ratio > 0.0;
        }
        ratio >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl<'de> serde::Deserialize<'de> for Threshold {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let fraction: f64 = serde::Deserialize::deserialize(deserializer)?;
        Self::new(fraction).map_err(serde::de::Error::custom)
    }
}

/// One edge of a root margin: absolute pixels or a percentage of the
/// corresponding viewport dimension.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarginValue {
    Px(f64),
    Percent(f64),
}

impl MarginValue {
    /// Resolves against the viewport dimension the edge applies to.
    pub fn resolve(self, dimension: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => dimension * pct / 100.0,
        }
    }
}

impl FromStr for MarginValue {
    type Err = InviewError;

    fn from_str(s: &str) -> InviewResult<Self> {
        let s = s.trim();
        let (number, ctor): (&str, fn(f64) -> Self) = if let Some(n) = s.strip_suffix("px") {
            (n, Self::Px)
        } else if let Some(n) = s.strip_suffix('%') {
            (n, Self::Percent)
        } else {
            return Err(InviewError::validation(format!(
                "margin value '{s}' must end in 'px' or '%'"
            )));
        };
        let v: f64 = number
            .trim()
            .parse()
            .map_err(|_| InviewError::validation(format!("margin value '{s}' is not a number")))?;
        if !v.is_finite() {
            return Err(InviewError::validation(format!(
                "margin value '{s}' must be finite"
            )));
        }
        Ok(ctor(v))
    }
}

impl fmt::Display for MarginValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}px"),
            Self::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

/// Expansion (positive) or contraction (negative) applied to the viewport
/// bounds before the intersection test, in box-model shorthand order.
///
/// Parses the same 1-4 value syntax the rendering environment uses:
/// `"0px"`, `"10px 5%"`, `"1px 2px 3px"`, `"1px 2px 3px 4px"`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    pub top: MarginValue,
    pub right: MarginValue,
    pub bottom: MarginValue,
    pub left: MarginValue,
}

impl RootMargin {
    pub const ZERO: Self = Self {
        top: MarginValue::Px(0.0),
        right: MarginValue::Px(0.0),
        bottom: MarginValue::Px(0.0),
        left: MarginValue::Px(0.0),
    };

    pub fn uniform(value: MarginValue) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for RootMargin {
    type Err = InviewError;

    fn from_str(s: &str) -> InviewResult<Self> {
        let values: Vec<MarginValue> = s
            .split_whitespace()
            .map(MarginValue::from_str)
            .collect::<InviewResult<_>>()?;
        // Shorthand expansion: 1 value = all, 2 = vertical/horizontal,
        // 3 = top/horizontal/bottom, 4 = top/right/bottom/left.
        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => {
                return Err(InviewError::validation(format!(
                    "root margin '{s}' must have 1 to 4 values"
                )));
            }
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl serde::Serialize for RootMargin {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for RootMargin {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: String = serde::Deserialize::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
