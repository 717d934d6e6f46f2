//! Inline format flags and block alignment
//!
//! Text nodes carry formatting as a bitmask. The bits combine freely; the serializer nests them
//! in the fixed order given by [`TextFormat::NESTING`], so the same mask always yields the same
//! markup.

use serde::Deserialize;
use std::fmt;
use std::ops::BitOr;

/// Bitmask of inline formats on a text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct TextFormat(u32);

impl TextFormat {
    pub const PLAIN: Self = Self(0);
    pub const BOLD: Self = Self(1);
    pub const ITALIC: Self = Self(2);
    pub const STRIKETHROUGH: Self = Self(4);
    pub const UNDERLINE: Self = Self(8);
    pub const CODE: Self = Self(16);
    pub const SUPERSCRIPT: Self = Self(64);
    pub const SUBSCRIPT: Self = Self(128);

    /// Outermost first.
    pub const NESTING: [TextFormat; 7] = [
        Self::BOLD,
        Self::ITALIC,
        Self::STRIKETHROUGH,
        Self::UNDERLINE,
        Self::CODE,
        Self::SUPERSCRIPT,
        Self::SUBSCRIPT,
    ];

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when every bit of `other` is set in `self`.
    pub const fn contains(self, other: TextFormat) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub const fn is_plain(self) -> bool {
        self.0 == 0
    }

    /// The flags of [`NESTING`](Self::NESTING) that are set, outermost first.
    pub fn active(self) -> impl Iterator<Item = TextFormat> {
        Self::NESTING
            .into_iter()
            .filter(move |flag| self.contains(*flag))
    }
}

impl BitOr for TextFormat {
    type Output = TextFormat;

    fn bitor(self, rhs: Self) -> Self::Output {
        TextFormat(self.0 | rhs.0)
    }
}

/// Horizontal alignment of a paragraph or heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Maps the editor's keywords. Anything unrecognised (including `""` and `"start"`) is left.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "center" => Alignment::Center,
            "right" | "end" => Alignment::Right,
            "justify" => Alignment::Justify,
            _ => Alignment::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
