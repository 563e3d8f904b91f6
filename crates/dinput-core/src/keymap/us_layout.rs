//! US QWERTY character to key translation used by `write`.
//!
//! A scan code names a physical key, not a character, so typing text needs a
//! second table: which key produces each character and whether shift must be
//! held while pressing it.  This table assumes the US layout.  On other
//! layouts (AZERTY, QWERTZ, ...) the same scan codes produce different
//! characters; callers who need exact text on those layouts should use the
//! unicode variants instead.

/// Returns the table name of the key that types `c` and whether shift is needed.
///
/// Returns `None` for characters with no key on a US keyboard (accented
/// letters, emoji, most control characters).
pub(crate) fn char_to_key_name(c: char) -> Option<(&'static str, bool)> {
    if c.is_ascii_uppercase() {
        return unshifted_name(c.to_ascii_lowercase()).map(|name| (name, true));
    }
    if let Some(base) = shifted_base(c) {
        return unshifted_name(base).map(|name| (name, true));
    }
    unshifted_name(c).map(|name| (name, false))
}

/// Returns `true` if typing `c` on a US keyboard requires holding shift.
pub(crate) fn needs_shift(c: char) -> bool {
    c.is_ascii_uppercase() || shifted_base(c).is_some()
}

/// Maps a shifted symbol to the character printed on the same key unshifted.
fn shifted_base(c: char) -> Option<char> {
    let base = match c {
        '~' => '`',
        '!' => '1',
        '@' => '2',
        '#' => '3',
        '$' => '4',
        '%' => '5',
        '^' => '6',
        '&' => '7',
        '*' => '8',
        '(' => '9',
        ')' => '0',
        '_' => '-',
        '+' => '=',
        '{' => '[',
        '}' => ']',
        '|' => '\\',
        ':' => ';',
        '"' => '\'',
        '<' => ',',
        '>' => '.',
        '?' => '/',
        _ => return None,
    };
    Some(base)
}

/// Maps an unshifted character to its table name.
fn unshifted_name(c: char) -> Option<&'static str> {
    let name = match c {
        'a' => "a",
        'b' => "b",
        'c' => "c",
        'd' => "d",
        'e' => "e",
        'f' => "f",
        'g' => "g",
        'h' => "h",
        'i' => "i",
        'j' => "j",
        'k' => "k",
        'l' => "l",
        'm' => "m",
        'n' => "n",
        'o' => "o",
        'p' => "p",
        'q' => "q",
        'r' => "r",
        's' => "s",
        't' => "t",
        'u' => "u",
        'v' => "v",
        'w' => "w",
        'x' => "x",
        'y' => "y",
        'z' => "z",
        '0' => "0",
        '1' => "1",
        '2' => "2",
        '3' => "3",
        '4' => "4",
        '5' => "5",
        '6' => "6",
        '7' => "7",
        '8' => "8",
        '9' => "9",
        '`' => "`",
        '-' => "-",
        '=' => "=",
        '[' => "[",
        ']' => "]",
        '\\' => "\\",
        ';' => ";",
        '\'' => "'",
        ',' => ",",
        '.' => ".",
        '/' => "/",
        ' ' => "space",
        '\n' => "enter",
        '\t' => "tab",
        _ => return None,
    };
    Some(name)
}
