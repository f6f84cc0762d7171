use core::fmt;
use core::ops::{BitAnd, BitOr, Not};

/// A set of content categories.
///
/// The same representation serves two purposes on an [`ElementType`]:
/// its *content model* (which categories its children may belong to) and
/// its *member-of* set (which categories it belongs to itself). A parent can
/// contain a child exactly when the parent's model intersects the child's
/// member-of set.
///
/// Bits 0..=29 are free for schema-defined categories. The two high bits are
/// reserved for character data and for the document root.
///
/// [`ElementType`]: crate::ElementType
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Categories(u32);

impl Categories {
    /// No categories: an element with this model is empty.
    pub const EMPTY: Self = Self(0);
    /// Every category: an element with this model accepts anything.
    pub const ANY: Self = Self(u32::MAX);
    /// Character data.
    pub const PCDATA: Self = Self(1 << 30);
    /// The document element slot.
    pub const ROOT: Self = Self(1 << 31);

    /// Build a category set from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bits of this set.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if the two sets share at least one category.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true if every category of `other` is in this set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if the set has no categories.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// This set with every category of `other` removed.
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl BitOr for Categories {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Categories {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for Categories {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

impl fmt::Debug for Categories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EMPTY => write!(f, "Categories(EMPTY)"),
            Self::ANY => write!(f, "Categories(ANY)"),
            Self(bits) => write!(f, "Categories({bits:#034b})"),
        }
    }
}

/// Behavioural flags of an element type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ElementFlags(u8);

impl ElementFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// The element is reopened after being forced closed by an unrelated
    /// end tag (inline formatting such as `<b>` spanning a broken block).
    pub const RESTARTABLE: Self = Self(1);
    /// The element's content is raw text (`<script>`, `<style>`).
    pub const CDATA: Self = Self(1 << 1);
    /// End tags for descendants only mark them preclosed; they are popped
    /// when this element closes.
    pub const NO_FORCE_CLOSE: Self = Self(1 << 2);

    /// Build a flag set from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw bits of this set.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if every flag of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ElementFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for ElementFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(Self::RESTARTABLE) {
            names.push("RESTARTABLE");
        }
        if self.contains(Self::CDATA) {
            names.push("CDATA");
        }
        if self.contains(Self::NO_FORCE_CLOSE) {
            names.push("NO_FORCE_CLOSE");
        }
        write!(f, "ElementFlags({})", names.join(" | "))
    }
}
