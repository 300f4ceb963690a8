// SPDX-License-Identifier: MIT
//
// termstyle — styled-text buffer and ANSI escape rendering engine.
//
// A mutable character buffer that carries zero or more overlapping style
// annotations (attribute flags, foreground/background color) over arbitrary
// sub-ranges, plus the rendering pass that turns the annotated text into a
// control-code-augmented string for an ANSI-capable terminal.
//
// The interesting part is the invariants: style ranges survive insertion,
// deletion, and replacement at arbitrary offsets while staying positionally
// correct, and rendering computes the *net* effect of every still-active
// directive per character, emitting only the escape codes that transition
// from the previous character's effective style to the current one. Every
// escape code is earned.
//
// This crate intentionally avoids external TUI frameworks in favor of
// direct ANSI escape generation. It performs no terminal I/O of its own:
// the product is a string, and callers decide where it goes.

pub mod ansi;
pub mod buffer;
pub mod color;
pub mod error;
pub mod render;
pub mod style;

pub use buffer::{Extent, StyleRange, StyledBuffer};
pub use color::Color;
pub use error::Error;
pub use style::{Attr, StyleBuilder, StyleDirective};
