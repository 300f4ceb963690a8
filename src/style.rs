// SPDX-License-Identifier: MIT
//
// Attribute flags and style directives.
//
// A `StyleDirective` is a *delta*, not a state: a set of flags to turn on,
// a set to turn off, and optionally a foreground and background color. The
// buffer attaches directives to position ranges, and the renderer folds
// every active directive in insertion order to compute the net style at
// each character. A later directive can re-enable a flag an earlier one
// turned off, which is why added and removed travel separately instead of
// collapsing into one signed set.
//
// The builder is the only way a directive is assembled, and it maintains
// the one invariant the renderer relies on: no flag is ever in both the
// added and removed sets at once.

use crate::color::Color;
use crate::error::Error;

// ─── Attribute Flags ─────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes stored as a compact bitfield.
    ///
    /// These map directly to SGR (Select Graphic Rendition) parameters;
    /// the wire encoding (including the separate "off" codes) lives in
    /// [`ansi::attrs_on`](crate::ansi::attrs_on) and
    /// [`ansi::attrs_off`](crate::ansi::attrs_off). Combine with bitwise OR:
    ///
    /// ```
    /// use termstyle::style::Attr;
    ///
    /// let emphasis = Attr::BOLD | Attr::ITALIC;
    /// assert!(emphasis.contains(Attr::BOLD));
    /// assert!(!emphasis.contains(Attr::UNDERLINE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u16 {
        /// SGR 1 — increased intensity.
        const BOLD              = 1 << 0;
        /// SGR 2 — decreased intensity.
        const FAINT             = 1 << 1;
        /// SGR 3 — italic or oblique.
        const ITALIC            = 1 << 2;
        /// SGR 4 — single underline.
        const UNDERLINE         = 1 << 3;
        /// SGR 5 — blinking text.
        const BLINK             = 1 << 4;
        /// SGR 7 — swap foreground and background.
        const INVERT            = 1 << 5;
        /// SGR 9 — crossed-out text.
        const CROSSED_OUT       = 1 << 6;
        /// SGR 21 — double underline. Shares its off code (24) with
        /// [`UNDERLINE`](Self::UNDERLINE).
        const DOUBLY_UNDERLINED = 1 << 7;
        /// SGR 53 — overlined text.
        const OVERLINED         = 1 << 8;
    }
}

impl Attr {
    /// Construct from a raw bit pattern, rejecting undefined bits.
    ///
    /// This is the entry point for callers holding flag bits from outside
    /// the type system (wire formats, FFI, persisted state). In-crate code
    /// composes the named constants and never needs it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFlag`] when `bits` has any bit set outside
    /// the declared flag domain.
    pub fn from_raw(bits: u16) -> Result<Self, Error> {
        Self::from_bits(bits).ok_or(Error::InvalidFlag { bits })
    }
}

// ─── Style Directive ─────────────────────────────────────────────────────────

/// An immutable style delta: flags to add, flags to remove, and optional
/// foreground/background colors.
///
/// Directives are assembled with [`StyleBuilder`] and never mutated after
/// construction. Invariant (builder-enforced, never re-validated):
/// `added` and `removed` are disjoint.
///
/// ```
/// use termstyle::style::{Attr, StyleDirective};
/// use termstyle::color::Color;
///
/// let d = StyleDirective::builder()
///     .with(Attr::BOLD)
///     .without(Attr::ITALIC)
///     .foreground(Color::Palette(9))
///     .build();
/// assert!(d.added().contains(Attr::BOLD));
/// assert!(d.removed().contains(Attr::ITALIC));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct StyleDirective {
    added: Attr,
    removed: Attr,
    foreground: Option<Color>,
    background: Option<Color>,
}

impl StyleDirective {
    /// Start building a directive.
    #[inline]
    #[must_use]
    pub const fn builder() -> StyleBuilder {
        StyleBuilder::new()
    }

    /// The empty directive: no flags, no colors.
    ///
    /// Attaching it to a buffer creates a style range slot (useful as a
    /// position marker) but contributes nothing to the rendered output.
    #[inline]
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            added: Attr::empty(),
            removed: Attr::empty(),
            foreground: None,
            background: None,
        }
    }

    /// Shorthand for a directive that only turns flags on.
    #[inline]
    #[must_use]
    pub const fn flags(added: Attr) -> Self {
        Self {
            added,
            removed: Attr::empty(),
            foreground: None,
            background: None,
        }
    }

    /// Flags this directive turns on.
    #[inline]
    #[must_use]
    pub const fn added(self) -> Attr {
        self.added
    }

    /// Flags this directive turns off.
    #[inline]
    #[must_use]
    pub const fn removed(self) -> Attr {
        self.removed
    }

    /// Foreground color, if this directive asserts one.
    #[inline]
    #[must_use]
    pub const fn foreground(self) -> Option<Color> {
        self.foreground
    }

    /// Background color, if this directive asserts one.
    #[inline]
    #[must_use]
    pub const fn background(self) -> Option<Color> {
        self.background
    }

    /// Whether this directive changes nothing when rendered.
    #[inline]
    #[must_use]
    pub const fn is_plain(self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.foreground.is_none()
            && self.background.is_none()
    }

    /// Apply this directive's flag delta to an accumulated state.
    ///
    /// Removals land before additions, so a directive that both removes
    /// and re-adds a flag leaves it on.
    #[inline]
    #[must_use]
    pub fn fold_into(self, state: Attr) -> Attr {
        (state - self.removed) | self.added
    }
}

impl From<Attr> for StyleDirective {
    #[inline]
    fn from(added: Attr) -> Self {
        Self::flags(added)
    }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Fluent accumulator for [`StyleDirective`].
///
/// `with` and `without` are mirror operations: each moves the given flags
/// out of the opposite set, so the disjointness invariant holds by
/// construction no matter the call order.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleBuilder {
    added: Attr,
    removed: Attr,
    foreground: Option<Color>,
    background: Option<Color>,
}

impl StyleBuilder {
    /// An empty builder. Same as `StyleDirective::builder()`.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            added: Attr::empty(),
            removed: Attr::empty(),
            foreground: None,
            background: None,
        }
    }

    /// Turn `flags` on: clears them from the removed set, adds them to the
    /// added set.
    #[inline]
    #[must_use]
    pub const fn with(mut self, flags: Attr) -> Self {
        self.removed = self.removed.difference(flags);
        self.added = self.added.union(flags);
        self
    }

    /// Turn `flags` off: clears them from the added set, adds them to the
    /// removed set.
    #[inline]
    #[must_use]
    pub const fn without(mut self, flags: Attr) -> Self {
        self.added = self.added.difference(flags);
        self.removed = self.removed.union(flags);
        self
    }

    /// Use exactly `flags`: the added set becomes `flags` and the removed
    /// set becomes the complement of the flag domain *minus* INVERT.
    ///
    /// INVERT is exempt from the implicit complement — `exactly` never
    /// turns it off, and callers flip it explicitly with
    /// [`with`](Self::with)/[`without`](Self::without). An INVERT bit
    /// passed *in* `flags` is honored in the added set.
    #[inline]
    #[must_use]
    pub const fn exactly(mut self, flags: Attr) -> Self {
        self.added = flags;
        self.removed = Attr::all().difference(Attr::INVERT).difference(flags);
        self
    }

    /// Assert a foreground color.
    #[inline]
    #[must_use]
    pub const fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    /// Assert a background color.
    #[inline]
    #[must_use]
    pub const fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Freeze the accumulated state into an immutable directive.
    #[inline]
    #[must_use]
    pub const fn build(self) -> StyleDirective {
        StyleDirective {
            added: self.added,
            removed: self.removed,
            foreground: self.foreground,
            background: self.background,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
