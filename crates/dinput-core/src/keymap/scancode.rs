//! Key name to hardware scan code translation table.
//!
//! Reference: IBM PC/XT Scan Code Set 1, which is what `SendInput` expects in
//! `KEYBDINPUT::wScan` when `KEYEVENTF_SCANCODE` is set.
//!
//! # What is a scan code? (for beginners)
//!
//! A scan code identifies the *physical key* that was pressed, independent of
//! what character the active keyboard layout assigns to it.  Windows virtual
//! key codes (`VK_*`) are a layer above that.  Many DirectX games read scan
//! codes directly (through DirectInput or Raw Input), which is why input
//! synthesized with virtual key codes is often ignored by them.
//!
//! # Extended keys
//!
//! Keys that were added to the original 83-key keyboard (the right-hand Ctrl
//! and Alt, the dedicated navigation block, arrow keys, numpad Enter and `/`,
//! the Windows keys) send a `0xE0` prefix byte before their scan code.  In
//! `SendInput` that prefix is expressed by the `KEYEVENTF_EXTENDEDKEY` flag,
//! so each entry here stores the one-byte code plus an `extended` flag.  Left
//! and right Ctrl share scan code `0x1D` and differ only by that flag.
//!
//! # How this table works
//!
//! `SCANCODE_TABLE` is a compile-time slice of [`KeyDescriptor`]s.  Names are
//! lower-case; several aliases may map to the same physical key (`esc` and
//! `escape`).  [`super::KeyMapper`] builds a hash map from this slice the
//! first time a lookup happens.

use super::KeyDescriptor;

const fn key(name: &'static str, scan_code: u16) -> KeyDescriptor {
    KeyDescriptor {
        name,
        scan_code,
        extended: false,
    }
}

const fn ext(name: &'static str, scan_code: u16) -> KeyDescriptor {
    KeyDescriptor {
        name,
        scan_code,
        extended: true,
    }
}

/// Every supported key name and the scan code it resolves to.
pub(crate) const SCANCODE_TABLE: &[KeyDescriptor] = &[
    // ── Escape and function row ──────────────────────────────────────────────
    key("escape", 0x01),
    key("esc", 0x01),
    key("f1", 0x3B),
    key("f2", 0x3C),
    key("f3", 0x3D),
    key("f4", 0x3E),
    key("f5", 0x3F),
    key("f6", 0x40),
    key("f7", 0x41),
    key("f8", 0x42),
    key("f9", 0x43),
    key("f10", 0x44),
    key("f11", 0x57),
    key("f12", 0x58),
    ext("printscreen", 0x37),
    ext("prntscrn", 0x37),
    ext("prtsc", 0x37),
    ext("prtscr", 0x37),
    key("scrolllock", 0x46),
    key("pause", 0x45),
    // ── Digit row ────────────────────────────────────────────────────────────
    key("`", 0x29),
    key("1", 0x02),
    key("2", 0x03),
    key("3", 0x04),
    key("4", 0x05),
    key("5", 0x06),
    key("6", 0x07),
    key("7", 0x08),
    key("8", 0x09),
    key("9", 0x0A),
    key("0", 0x0B),
    key("-", 0x0C),
    key("=", 0x0D),
    key("backspace", 0x0E),
    // ── Navigation block (all extended) ──────────────────────────────────────
    ext("insert", 0x52),
    ext("home", 0x47),
    ext("pageup", 0x49),
    ext("pagedown", 0x51),
    ext("delete", 0x53),
    ext("del", 0x53),
    ext("end", 0x4F),
    ext("up", 0x48),
    ext("left", 0x4B),
    ext("down", 0x50),
    ext("right", 0x4D),
    // ── Numpad ───────────────────────────────────────────────────────────────
    // NumLock shares 0x45 with Pause; the extended flag tells them apart.
    ext("numlock", 0x45),
    ext("divide", 0x35),
    key("multiply", 0x37),
    key("subtract", 0x4A),
    key("add", 0x4E),
    key("decimal", 0x53),
    ext("numpadenter", 0x1C),
    key("numpad1", 0x4F),
    key("numpad2", 0x50),
    key("numpad3", 0x51),
    key("numpad4", 0x4B),
    key("numpad5", 0x4C),
    key("numpad6", 0x4D),
    key("numpad7", 0x47),
    key("numpad8", 0x48),
    key("numpad9", 0x49),
    key("numpad0", 0x52),
    // ── Top letter row ───────────────────────────────────────────────────────
    key("tab", 0x0F),
    key("q", 0x10),
    key("w", 0x11),
    key("e", 0x12),
    key("r", 0x13),
    key("t", 0x14),
    key("y", 0x15),
    key("u", 0x16),
    key("i", 0x17),
    key("o", 0x18),
    key("p", 0x19),
    key("[", 0x1A),
    key("]", 0x1B),
    key("\\", 0x2B),
    // ── Home row ─────────────────────────────────────────────────────────────
    key("capslock", 0x3A),
    key("a", 0x1E),
    key("s", 0x1F),
    key("d", 0x20),
    key("f", 0x21),
    key("g", 0x22),
    key("h", 0x23),
    key("j", 0x24),
    key("k", 0x25),
    key("l", 0x26),
    key(";", 0x27),
    key("'", 0x28),
    key("enter", 0x1C),
    key("return", 0x1C),
    // ── Bottom row ───────────────────────────────────────────────────────────
    key("shift", 0x2A),
    key("shiftleft", 0x2A),
    key("z", 0x2C),
    key("x", 0x2D),
    key("c", 0x2E),
    key("v", 0x2F),
    key("b", 0x30),
    key("n", 0x31),
    key("m", 0x32),
    key(",", 0x33),
    key(".", 0x34),
    key("/", 0x35),
    key("shiftright", 0x36),
    // ── Modifiers and space bar ──────────────────────────────────────────────
    key("ctrl", 0x1D),
    key("ctrlleft", 0x1D),
    ext("ctrlright", 0x1D),
    ext("win", 0x5B),
    ext("winleft", 0x5B),
    ext("winright", 0x5C),
    key("alt", 0x38),
    key("altleft", 0x38),
    ext("altright", 0x38),
    ext("apps", 0x5D),
    key(" ", 0x39),
    key("space", 0x39),
];
