//! Die faces and the fixed d20 constants.

use crate::random::DiceSource;

/// Lowest face of the die.
pub const MIN_DICE_VALUE: u8 = 1;
/// Highest face of the die.
pub const MAX_DICE_VALUE: u8 = 20;

/// A face of a twenty-sided die.
///
/// A `Face` is always within `MIN_DICE_VALUE..=MAX_DICE_VALUE`.
///
/// ## Example
///
/// ```rust
/// use d20_core_view::Face;
///
/// assert_eq!(Face::new(20).map(Face::get), Some(20));
/// assert!(Face::new(0).is_none());
/// assert_eq!(Face::clamped(42).get(), 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Face(u8);

impl Face {
    /// The lowest face.
    pub const MIN: Face = Face(MIN_DICE_VALUE);
    /// The highest face.
    pub const MAX: Face = Face(MAX_DICE_VALUE);

    /// Create a face, returning `None` when `value` is off the die.
    pub fn new(value: u8) -> Option<Self> {
        (MIN_DICE_VALUE..=MAX_DICE_VALUE)
            .contains(&value)
            .then_some(Self(value))
    }

    /// Create a face, clamping `value` onto the die.
    pub fn clamped(value: u8) -> Self {
        Self(value.clamp(MIN_DICE_VALUE, MAX_DICE_VALUE))
    }

    /// Draw one face uniformly from `source`.
    pub fn draw(source: &mut dyn DiceSource) -> Self {
        Self::clamped(source.draw(MIN_DICE_VALUE, MAX_DICE_VALUE))
    }

    /// Numeric value of the face.
    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// A natural 20.
    #[inline]
    pub fn is_critical_hit(self) -> bool {
        self.0 == MAX_DICE_VALUE
    }

    /// A natural 1.
    #[inline]
    pub fn is_critical_miss(self) -> bool {
        self.0 == MIN_DICE_VALUE
    }

    /// Either boundary face.
    #[inline]
    pub fn is_critical(self) -> bool {
        self.is_critical_hit() || self.is_critical_miss()
    }
}

impl Default for Face {
    fn default() -> Self {
        Self::MIN
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Face> for u8 {
    fn from(face: Face) -> u8 {
        face.0
    }
}

impl TryFrom<u8> for Face {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Face::new(value).ok_or_else(|| {
            format!("die face {value} outside {MIN_DICE_VALUE}..={MAX_DICE_VALUE}")
        })
    }
}
