// SPDX-License-Identifier: MIT
//
// The rendering sweep — one left-to-right pass over the buffer.
//
// At every character the renderer knows the set of style ranges covering
// it (the active list, kept sorted by id so insertion order is precedence
// order) and emits only the escape fragments that *transition* from the
// previous character's effective style:
//
//   - Flags fold over the active list as `(state - removed) | added` per
//     directive, so a later-id range can re-enable a flag an earlier one
//     turned off. Only the flag diff against the previous position is
//     emitted — unchanged attributes cost zero bytes.
//
//   - A color channel resolves to the highest-id active range asserting
//     it. The fragment is re-emitted whenever a range boundary *touched*
//     the channel, even if the resolved value is unchanged. Deliberate;
//     see the re-emission note in DESIGN.md before tightening it.
//
// The expiry machinery runs once more at end-of-buffer, so a range closing
// exactly at the last character still gets its teardown fragments (a
// foreground range over the whole text emits its reset before the final
// SGR 0). Open-ended ranges never expire; the trailing full reset is what
// closes them out.
//
// Complexity is O(n·k) for n characters and k simultaneously active
// ranges. Terminal output keeps k small; no interval tree is warranted.

use crate::ansi;
use crate::buffer::{StyleRange, StyledBuffer};
use crate::color::Color;
use crate::style::{Attr, StyleDirective};

/// Which color channels a set of boundary events touched at one position.
#[derive(Clone, Copy, Default)]
struct Touched {
    fg: bool,
    bg: bool,
}

impl Touched {
    fn note(&mut self, directive: StyleDirective) {
        self.fg |= directive.foreground().is_some();
        self.bg |= directive.background().is_some();
    }
}

/// Render the buffer as plain text interspersed with the minimal escape
/// codes, bracketed by full style resets.
///
/// # Panics
///
/// Panics only on internal logic errors (the accumulated output is always
/// valid UTF-8).
#[must_use]
pub fn render_ansi(buffer: &StyledBuffer) -> String {
    let text = buffer.as_chars();
    let ranges = buffer.ranges();
    let len = text.len();

    let mut out: Vec<u8> = Vec::with_capacity(len * 4 + 16);
    ansi::reset(&mut out).ok();

    // Bucket activating ranges by start for O(1) "begins here" lookup.
    // The arena is in id order, so every bucket is too.
    let mut starts: Vec<Vec<usize>> = vec![Vec::new(); len];
    for (idx, range) in ranges.iter().enumerate() {
        if range.activates() && range.start() < len {
            starts[range.start()].push(idx);
        }
    }

    let mut active: Vec<usize> = Vec::new();
    let mut prev_flags = Attr::empty();

    for (i, &ch) in text.iter().enumerate() {
        let mut touched = expire(ranges, &mut active, i);

        // Admit ranges starting here, keeping the active list id-sorted.
        // (A range created early can start after one created late, so
        // admission order alone does not guarantee id order.)
        for &idx in &starts[i] {
            touched.note(ranges[idx].directive());
            let pos = active
                .binary_search_by(|&j| ranges[j].id().cmp(&ranges[idx].id()))
                .unwrap_or_else(|e| e);
            active.insert(pos, idx);
        }

        prev_flags = emit_transition(&mut out, ranges, &active, prev_flags, touched);

        let mut enc = [0u8; 4];
        out.extend_from_slice(ch.encode_utf8(&mut enc).as_bytes());
    }

    // End-of-buffer expiry: every bounded range still active closes here
    // and its teardown is emitted ahead of the final full reset.
    let touched = expire(ranges, &mut active, len);
    emit_transition(&mut out, ranges, &active, prev_flags, touched);

    ansi::reset(&mut out).ok();

    String::from_utf8(out).expect("escape output is valid UTF-8")
}

/// Drop every active range whose end is at or before `pos`, reporting
/// which color channels the expired directives touched.
fn expire(ranges: &[StyleRange], active: &mut Vec<usize>, pos: usize) -> Touched {
    let mut touched = Touched::default();
    active.retain(|&idx| {
        let expired = ranges[idx].end().is_some_and(|end| end <= pos);
        if expired {
            touched.note(ranges[idx].directive());
        }
        !expired
    });
    touched
}

/// Emit the fragments that move the terminal from `prev_flags` (and the
/// previously emitted colors) to the state the active list dictates.
/// Returns the new flag state.
fn emit_transition(
    out: &mut Vec<u8>,
    ranges: &[StyleRange],
    active: &[usize],
    prev_flags: Attr,
    touched: Touched,
) -> Attr {
    let flags = active
        .iter()
        .fold(Attr::empty(), |state, &idx| {
            ranges[idx].directive().fold_into(state)
        });

    if flags != prev_flags {
        ansi::attrs_off(out, prev_flags - flags).ok();
        ansi::attrs_on(out, flags - prev_flags).ok();
    }

    // Conservative re-emission: a boundary event on the channel forces the
    // fragment out even when the resolved value happens to be unchanged.
    // A channel no range asserts anymore falls back to the explicit
    // terminal-default reset.
    if touched.fg {
        let resolved = resolve(ranges, active, |d| d.foreground());
        ansi::fg(out, resolved.unwrap_or(Color::Default)).ok();
    }
    if touched.bg {
        let resolved = resolve(ranges, active, |d| d.background());
        ansi::bg(out, resolved.unwrap_or(Color::Default)).ok();
    }

    flags
}

/// The highest-id active assertion for one color channel, if any.
fn resolve(
    ranges: &[StyleRange],
    active: &[usize],
    channel: impl Fn(StyleDirective) -> Option<Color>,
) -> Option<Color> {
    active
        .iter()
        .filter_map(|&idx| channel(ranges[idx].directive()))
        .last()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
