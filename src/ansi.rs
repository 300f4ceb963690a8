// SPDX-License-Identifier: MIT
//
// ANSI escape fragment generation.
//
// Pure functions that write escape sequences to any `impl Write`. No state,
// no decisions about when to emit — that's the renderer's job. This module
// just knows the byte-level encoding of every terminal command we need, and
// it is exposed publicly so callers that want raw control codes (a console
// writer issuing a cursor move) can skip the buffer entirely.
//
// All cursor positions are 0-indexed in our API and converted to 1-indexed
// for the terminal (ANSI uses 1-based coordinates). Counts and coordinates
// are u16, palette indices and channels are u8, erase modes are enums —
// there is no out-of-domain input to reject.
//
// All functions return `io::Result` propagated from the underlying writer.
// In practice they never fail when writing to a Vec-backed buffer.

use std::io::{self, Write};

use crate::color::Color;
use crate::style::Attr;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor up `n` rows (CUU).
#[inline]
pub fn cursor_up(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}A")
}

/// Move the cursor down `n` rows (CUD).
#[inline]
pub fn cursor_down(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}B")
}

/// Move the cursor forward (right) `n` columns (CUF).
#[inline]
pub fn cursor_forward(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}C")
}

/// Move the cursor back (left) `n` columns (CUB).
#[inline]
pub fn cursor_back(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}D")
}

/// Move the cursor to the start of the line `n` rows down (CNL).
#[inline]
pub fn cursor_next_line(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}E")
}

/// Move the cursor to the start of the line `n` rows up (CPL).
#[inline]
pub fn cursor_previous_line(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}F")
}

/// Move the cursor to `col` in the current row (CHA).
///
/// Our columns are 0-indexed; the wire format is 1-indexed.
#[inline]
pub fn cursor_to_column(w: &mut impl Write, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{}G", col + 1)
}

/// Move the cursor to `(x, y)` using the CUP (Cursor Position) sequence.
///
/// Our coordinates are 0-indexed; ANSI CUP is 1-indexed.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", y + 1, x + 1)
}

/// Save the cursor position (SCP).
#[inline]
pub fn cursor_save(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[s")
}

/// Restore the saved cursor position (RCP).
#[inline]
pub fn cursor_restore(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[u")
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Erase ───────────────────────────────────────────────────────────────────

/// Region selector for [`clear_screen`] (ED — Erase in Display).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenClear {
    /// From the cursor to the end of the screen (ED 0).
    Below,
    /// From the start of the screen to the cursor (ED 1).
    Above,
    /// The entire screen (ED 2).
    All,
    /// The entire screen plus the scrollback buffer (ED 3).
    AllAndScrollback,
}

/// Region selector for [`clear_line`] (EL — Erase in Line).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClear {
    /// From the cursor to the end of the line (EL 0).
    ToEnd,
    /// From the start of the line to the cursor (EL 1).
    ToStart,
    /// The entire line (EL 2).
    All,
}

/// Erase a screen region.
#[inline]
pub fn clear_screen(w: &mut impl Write, mode: ScreenClear) -> io::Result<()> {
    let n: u8 = match mode {
        ScreenClear::Below => 0,
        ScreenClear::Above => 1,
        ScreenClear::All => 2,
        ScreenClear::AllAndScrollback => 3,
    };
    write!(w, "\x1b[{n}J")
}

/// Erase a line region.
#[inline]
pub fn clear_line(w: &mut impl Write, mode: LineClear) -> io::Result<()> {
    let n: u8 = match mode {
        LineClear::ToEnd => 0,
        LineClear::ToStart => 1,
        LineClear::All => 2,
    };
    write!(w, "\x1b[{n}K")
}

// ─── Scroll / Edit ───────────────────────────────────────────────────────────

/// Scroll the viewport up `n` rows (SU).
#[inline]
pub fn scroll_up(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}S")
}

/// Scroll the viewport down `n` rows (SD).
#[inline]
pub fn scroll_down(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}T")
}

/// Insert `n` blank lines at the cursor row (IL).
#[inline]
pub fn insert_lines(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}L")
}

/// Delete `n` lines starting at the cursor row (DL).
#[inline]
pub fn delete_lines(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}M")
}

/// Insert `n` blank characters at the cursor (ICH).
#[inline]
pub fn insert_chars(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}@")
}

/// Delete `n` characters at the cursor (DCH).
#[inline]
pub fn delete_chars(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}P")
}

// ─── Text Attributes ─────────────────────────────────────────────────────────

/// The SGR code pair (on, off) for each attribute flag, in emission order.
///
/// Two pairs share an off code: BOLD/FAINT both clear with 22 (normal
/// intensity) and UNDERLINE/DOUBLY_UNDERLINED both clear with 24
/// (not underlined). [`attrs_off`] dedups so a combined clear emits each
/// code once.
const SGR_CODES: &[(Attr, u8, u8)] = &[
    (Attr::BOLD, 1, 22),
    (Attr::FAINT, 2, 22),
    (Attr::ITALIC, 3, 23),
    (Attr::UNDERLINE, 4, 24),
    (Attr::BLINK, 5, 25),
    (Attr::INVERT, 7, 27),
    (Attr::CROSSED_OUT, 9, 29),
    (Attr::DOUBLY_UNDERLINED, 21, 24),
    (Attr::OVERLINED, 53, 55),
];

/// Emit SGR codes turning `attr` on as a single CSI sequence.
///
/// Multiple attributes are semicolon-separated: `\x1b[1;3;9m` for
/// bold + italic + crossed-out. Does nothing if no attributes are set.
pub fn attrs_on(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    emit_sgr(w, attr, |&(_, on, _)| on)
}

/// Emit SGR codes turning `attr` off as a single CSI sequence.
///
/// Shared off codes are emitted once: clearing bold + faint produces
/// `\x1b[22m`, not `\x1b[22;22m`. Does nothing if no attributes are set.
pub fn attrs_off(w: &mut impl Write, attr: Attr) -> io::Result<()> {
    emit_sgr(w, attr, |&(_, _, off)| off)
}

/// Shared encoder for [`attrs_on`]/[`attrs_off`]: one CSI sequence with
/// semicolon-joined, deduplicated codes for every flag present in `attr`.
fn emit_sgr(
    w: &mut impl Write,
    attr: Attr,
    code: impl Fn(&(Attr, u8, u8)) -> u8,
) -> io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    w.write_all(b"\x1b[")?;
    let mut seen = 0u64; // SGR codes here are all < 64
    let mut first = true;
    for entry in SGR_CODES {
        if !attr.contains(entry.0) {
            continue;
        }
        let n = code(entry);
        if seen & (1 << n) != 0 {
            continue;
        }
        seen |= 1 << n;
        if !first {
            w.write_all(b";")?;
        }
        write!(w, "{n}")?;
        first = false;
    }
    w.write_all(b"m")
}

// ─── Color ───────────────────────────────────────────────────────────────────

/// Set the foreground (text) color.
///
/// Uses compact SGR codes for the first 16 palette entries (30–37, 90–97),
/// the 256-color extended format for indices 16–255, and 24-bit color for
/// RGB. `Default` emits the dedicated foreground reset (SGR 39).
pub fn fg(w: &mut impl Write, color: Color) -> io::Result<()> {
    match color {
        Color::Default => w.write_all(b"\x1b[39m"),
        Color::Palette(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 30 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 90 + u16::from(idx - 8))
            } else {
                write!(w, "\x1b[38;5;{idx}m")
            }
        }
        Color::Rgb(r, g, b) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

/// Set the background color.
///
/// Same encoding strategy as [`fg`] but with BG-specific SGR codes
/// (40–47, 100–107, 48;5;N, 48;2;R;G;B). `Default` emits SGR 49.
pub fn bg(w: &mut impl Write, color: Color) -> io::Result<()> {
    match color {
        Color::Default => w.write_all(b"\x1b[49m"),
        Color::Palette(idx) => {
            if idx < 8 {
                write!(w, "\x1b[{}m", 40 + u16::from(idx))
            } else if idx < 16 {
                write!(w, "\x1b[{}m", 100 + u16::from(idx - 8))
            } else {
                write!(w, "\x1b[48;5;{idx}m")
            }
        }
        Color::Rgb(r, g, b) => write!(w, "\x1b[48;2;{r};{g};{b}m"),
    }
}

// ─── Reset ───────────────────────────────────────────────────────────────────

/// Reset all SGR attributes to terminal defaults (SGR 0).
///
/// This clears **everything**: intensity, italics, colors, underline.
/// Stateful emitters must invalidate their tracked state after this.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: run an emitter and return its output as a string.
    fn emit<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Cursor ──────────────────────────────────────────────────────────

    #[test]
    fn cursor_up_sequence() {
        assert_eq!(emit(|w| cursor_up(w, 3)), "\x1b[3A");
    }

    #[test]
    fn cursor_down_sequence() {
        assert_eq!(emit(|w| cursor_down(w, 1)), "\x1b[1B");
    }

    #[test]
    fn cursor_forward_sequence() {
        assert_eq!(emit(|w| cursor_forward(w, 12)), "\x1b[12C");
    }

    #[test]
    fn cursor_back_sequence() {
        assert_eq!(emit(|w| cursor_back(w, 2)), "\x1b[2D");
    }

    #[test]
    fn cursor_next_line_sequence() {
        assert_eq!(emit(|w| cursor_next_line(w, 2)), "\x1b[2E");
    }

    #[test]
    fn cursor_previous_line_sequence() {
        assert_eq!(emit(|w| cursor_previous_line(w, 4)), "\x1b[4F");
    }

    #[test]
    fn cursor_to_column_is_one_indexed_on_wire() {
        assert_eq!(emit(|w| cursor_to_column(w, 0)), "\x1b[1G");
        assert_eq!(emit(|w| cursor_to_column(w, 79)), "\x1b[80G");
    }

    #[test]
    fn cursor_to_origin() {
        assert_eq!(emit(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
    }

    #[test]
    fn cursor_to_position() {
        assert_eq!(emit(|w| cursor_to(w, 10, 20)), "\x1b[21;11H");
    }

    #[test]
    fn cursor_save_restore_sequences() {
        assert_eq!(emit(|w| cursor_save(w)), "\x1b[s");
        assert_eq!(emit(|w| cursor_restore(w)), "\x1b[u");
    }

    #[test]
    fn cursor_hide_show_sequences() {
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    // ── Erase ───────────────────────────────────────────────────────────

    #[test]
    fn clear_screen_modes() {
        assert_eq!(emit(|w| clear_screen(w, ScreenClear::Below)), "\x1b[0J");
        assert_eq!(emit(|w| clear_screen(w, ScreenClear::Above)), "\x1b[1J");
        assert_eq!(emit(|w| clear_screen(w, ScreenClear::All)), "\x1b[2J");
        assert_eq!(
            emit(|w| clear_screen(w, ScreenClear::AllAndScrollback)),
            "\x1b[3J"
        );
    }

    #[test]
    fn clear_line_modes() {
        assert_eq!(emit(|w| clear_line(w, LineClear::ToEnd)), "\x1b[0K");
        assert_eq!(emit(|w| clear_line(w, LineClear::ToStart)), "\x1b[1K");
        assert_eq!(emit(|w| clear_line(w, LineClear::All)), "\x1b[2K");
    }

    // ── Scroll / Edit ───────────────────────────────────────────────────

    #[test]
    fn scroll_sequences() {
        assert_eq!(emit(|w| scroll_up(w, 5)), "\x1b[5S");
        assert_eq!(emit(|w| scroll_down(w, 5)), "\x1b[5T");
    }

    #[test]
    fn line_edit_sequences() {
        assert_eq!(emit(|w| insert_lines(w, 2)), "\x1b[2L");
        assert_eq!(emit(|w| delete_lines(w, 2)), "\x1b[2M");
    }

    #[test]
    fn char_edit_sequences() {
        assert_eq!(emit(|w| insert_chars(w, 8)), "\x1b[8@");
        assert_eq!(emit(|w| delete_chars(w, 8)), "\x1b[8P");
    }

    // ── Attributes on ───────────────────────────────────────────────────

    #[test]
    fn attrs_on_empty_emits_nothing() {
        assert_eq!(emit(|w| attrs_on(w, Attr::empty())), "");
    }

    #[test]
    fn attrs_on_single_flags() {
        assert_eq!(emit(|w| attrs_on(w, Attr::BOLD)), "\x1b[1m");
        assert_eq!(emit(|w| attrs_on(w, Attr::FAINT)), "\x1b[2m");
        assert_eq!(emit(|w| attrs_on(w, Attr::ITALIC)), "\x1b[3m");
        assert_eq!(emit(|w| attrs_on(w, Attr::UNDERLINE)), "\x1b[4m");
        assert_eq!(emit(|w| attrs_on(w, Attr::BLINK)), "\x1b[5m");
        assert_eq!(emit(|w| attrs_on(w, Attr::INVERT)), "\x1b[7m");
        assert_eq!(emit(|w| attrs_on(w, Attr::CROSSED_OUT)), "\x1b[9m");
        assert_eq!(emit(|w| attrs_on(w, Attr::DOUBLY_UNDERLINED)), "\x1b[21m");
        assert_eq!(emit(|w| attrs_on(w, Attr::OVERLINED)), "\x1b[53m");
    }

    #[test]
    fn attrs_on_combined() {
        assert_eq!(
            emit(|w| attrs_on(w, Attr::BOLD | Attr::ITALIC | Attr::CROSSED_OUT)),
            "\x1b[1;3;9m"
        );
    }

    #[test]
    fn attrs_on_all() {
        assert_eq!(
            emit(|w| attrs_on(w, Attr::all())),
            "\x1b[1;2;3;4;5;7;9;21;53m"
        );
    }

    // ── Attributes off ──────────────────────────────────────────────────

    #[test]
    fn attrs_off_empty_emits_nothing() {
        assert_eq!(emit(|w| attrs_off(w, Attr::empty())), "");
    }

    #[test]
    fn attrs_off_single_flags() {
        assert_eq!(emit(|w| attrs_off(w, Attr::BOLD)), "\x1b[22m");
        assert_eq!(emit(|w| attrs_off(w, Attr::FAINT)), "\x1b[22m");
        assert_eq!(emit(|w| attrs_off(w, Attr::ITALIC)), "\x1b[23m");
        assert_eq!(emit(|w| attrs_off(w, Attr::UNDERLINE)), "\x1b[24m");
        assert_eq!(emit(|w| attrs_off(w, Attr::BLINK)), "\x1b[25m");
        assert_eq!(emit(|w| attrs_off(w, Attr::INVERT)), "\x1b[27m");
        assert_eq!(emit(|w| attrs_off(w, Attr::CROSSED_OUT)), "\x1b[29m");
        assert_eq!(emit(|w| attrs_off(w, Attr::DOUBLY_UNDERLINED)), "\x1b[24m");
        assert_eq!(emit(|w| attrs_off(w, Attr::OVERLINED)), "\x1b[55m");
    }

    #[test]
    fn attrs_off_dedups_shared_intensity_code() {
        // BOLD and FAINT both clear with SGR 22 — emitted once.
        assert_eq!(emit(|w| attrs_off(w, Attr::BOLD | Attr::FAINT)), "\x1b[22m");
    }

    #[test]
    fn attrs_off_dedups_shared_underline_code() {
        assert_eq!(
            emit(|w| attrs_off(w, Attr::UNDERLINE | Attr::DOUBLY_UNDERLINED)),
            "\x1b[24m"
        );
    }

    #[test]
    fn attrs_off_all_dedups() {
        assert_eq!(
            emit(|w| attrs_off(w, Attr::all())),
            "\x1b[22;23;24;25;27;29;55m"
        );
    }

    // ── Foreground Color ────────────────────────────────────────────────

    #[test]
    fn fg_default() {
        assert_eq!(emit(|w| fg(w, Color::Default)), "\x1b[39m");
    }

    #[test]
    fn fg_palette_standard() {
        assert_eq!(emit(|w| fg(w, Color::Palette(0))), "\x1b[30m");
        assert_eq!(emit(|w| fg(w, Color::Palette(7))), "\x1b[37m");
    }

    #[test]
    fn fg_palette_bright() {
        assert_eq!(emit(|w| fg(w, Color::Palette(8))), "\x1b[90m");
        assert_eq!(emit(|w| fg(w, Color::Palette(9))), "\x1b[91m");
        assert_eq!(emit(|w| fg(w, Color::Palette(15))), "\x1b[97m");
    }

    #[test]
    fn fg_palette_extended() {
        assert_eq!(emit(|w| fg(w, Color::Palette(16))), "\x1b[38;5;16m");
        assert_eq!(emit(|w| fg(w, Color::Palette(255))), "\x1b[38;5;255m");
    }

    #[test]
    fn fg_rgb() {
        assert_eq!(
            emit(|w| fg(w, Color::Rgb(255, 128, 0))),
            "\x1b[38;2;255;128;0m"
        );
    }

    // ── Background Color ────────────────────────────────────────────────

    #[test]
    fn bg_default() {
        assert_eq!(emit(|w| bg(w, Color::Default)), "\x1b[49m");
    }

    #[test]
    fn bg_palette_standard() {
        assert_eq!(emit(|w| bg(w, Color::Palette(2))), "\x1b[42m");
        assert_eq!(emit(|w| bg(w, Color::Palette(7))), "\x1b[47m");
    }

    #[test]
    fn bg_palette_bright() {
        assert_eq!(emit(|w| bg(w, Color::Palette(8))), "\x1b[100m");
        assert_eq!(emit(|w| bg(w, Color::Palette(15))), "\x1b[107m");
    }

    #[test]
    fn bg_palette_extended() {
        assert_eq!(emit(|w| bg(w, Color::Palette(200))), "\x1b[48;5;200m");
    }

    #[test]
    fn bg_rgb() {
        assert_eq!(
            emit(|w| bg(w, Color::Rgb(0, 100, 200))),
            "\x1b[48;2;0;100;200m"
        );
    }

    // ── Reset / Composition ─────────────────────────────────────────────

    #[test]
    fn reset_sequence() {
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    #[test]
    fn multiple_sequences_compose() {
        let mut buf = Vec::new();
        cursor_to(&mut buf, 5, 3).unwrap();
        fg(&mut buf, Color::Rgb(255, 0, 0)).unwrap();
        bg(&mut buf, Color::Palette(0)).unwrap();
        attrs_on(&mut buf, Attr::BOLD).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s, "\x1b[4;6H\x1b[38;2;255;0;0m\x1b[40m\x1b[1m");
    }
}
