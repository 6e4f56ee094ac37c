//! GSM 7-bit default alphabet and national language tables (3GPP TS 23.038 clause 6.2.1 and Annex A).
//! Table index equals the national language identifier used in UDH IEs 0x24 / 0x25.

/// Escape to the single shift table
pub const EXTENDED_ESCAPE: u8 = 0x1B;
/// Control code in the shift tables; never carries a language specific character
pub const RESERVED_CONTROL: u8 = 0x0D;
/// Placeholder for the escape position and for unused shift table entries
pub const UNUSED: char = '\u{ffff}';

pub const NL_IDENTIFIER_DEFAULT: u8 = 0;
pub const NL_IDENTIFIER_TURKISH: u8 = 1;
pub const NL_IDENTIFIER_SPANISH: u8 = 2;
pub const NL_IDENTIFIER_PORTUGUESE: u8 = 3;

/// Number of national language tables available
pub const NL_TABLE_COUNT: u8 = 4;

type Table = [char; 128];

const DEFAULT_LOCKING: Table = [
    '@', '£', '$', '¥', 'è', 'é', 'ù', 'ì', 'ò', 'Ç', '\n', 'Ø', 'ø', '\r', 'Å', 'å',
    'Δ', '_', 'Φ', 'Γ', 'Λ', 'Ω', 'Π', 'Ψ', 'Σ', 'Θ', 'Ξ', UNUSED, 'Æ', 'æ', 'ß', 'É',
    ' ', '!', '"', '#', '¤', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
    '¡', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ä', 'Ö', 'Ñ', 'Ü', '§',
    '¿', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ä', 'ö', 'ñ', 'ü', 'à',
];

/// Start from `base` and replace the listed positions
const fn patch_table(base: Table, entries: &[(u8, char)]) -> Table {
    let mut table = base;
    let mut i = 0;
    while i < entries.len() {
        table[entries[i].0 as usize] = entries[i].1;
        i += 1;
    }
    table
}

const fn shift_table(entries: &[(u8, char)]) -> Table {
    patch_table([UNUSED; 128], entries)
}

/// Annex A.3.1
const TURKISH_LOCKING: Table = patch_table(
    DEFAULT_LOCKING,
    &[
        (0x04, '€'), (0x07, 'ı'), (0x0B, 'Ğ'), (0x0C, 'ğ'),
        (0x1C, 'Ş'), (0x1D, 'ş'), (0x40, 'İ'), (0x60, 'ç'),
    ],
);

/// Annex A.3.3
const PORTUGUESE_LOCKING: Table = patch_table(
    DEFAULT_LOCKING,
    &[
        (0x04, 'ê'), (0x06, 'ú'), (0x07, 'í'), (0x08, 'ó'), (0x09, 'ç'),
        (0x0B, 'Ô'), (0x0C, 'ô'), (0x0E, 'Á'), (0x0F, 'á'),
        (0x12, 'ª'), (0x13, 'Ç'), (0x14, 'À'), (0x15, '∞'), (0x16, '^'),
        (0x17, '\\'), (0x18, '€'), (0x19, 'Ó'), (0x1A, '|'),
        (0x1C, 'Â'), (0x1D, 'â'), (0x1E, 'Ê'), (0x24, 'º'), (0x40, 'Í'),
        (0x5B, 'Ã'), (0x5C, 'Õ'), (0x5D, 'Ú'), (0x60, '~'),
        (0x7B, 'ã'), (0x7C, 'õ'), (0x7D, '`'),
    ],
);

/// Clause 6.2.1.1
const DEFAULT_SHIFT: Table = shift_table(&[
    (0x0A, '\u{000c}'), (0x14, '^'), (0x28, '{'), (0x29, '}'), (0x2F, '\\'),
    (0x3C, '['), (0x3D, '~'), (0x3E, ']'), (0x40, '|'), (0x65, '€'),
]);

/// Annex A.2.1
const TURKISH_SHIFT: Table = shift_table(&[
    (0x0A, '\u{000c}'), (0x14, '^'), (0x28, '{'), (0x29, '}'), (0x2F, '\\'),
    (0x3C, '['), (0x3D, '~'), (0x3E, ']'), (0x40, '|'),
    (0x47, 'Ğ'), (0x49, 'İ'), (0x53, 'Ş'), (0x63, 'ç'), (0x65, '€'),
    (0x67, 'ğ'), (0x69, 'ı'), (0x73, 'ş'),
]);

/// Annex A.2.2
const SPANISH_SHIFT: Table = shift_table(&[
    (0x09, 'ç'), (0x0A, '\u{000c}'), (0x14, '^'), (0x28, '{'), (0x29, '}'), (0x2F, '\\'),
    (0x3C, '['), (0x3D, '~'), (0x3E, ']'), (0x40, '|'),
    (0x41, 'Á'), (0x49, 'Í'), (0x4F, 'Ó'), (0x55, 'Ú'),
    (0x61, 'á'), (0x65, '€'), (0x69, 'í'), (0x6F, 'ó'), (0x75, 'ú'),
]);

/// Annex A.2.3
const PORTUGUESE_SHIFT: Table = shift_table(&[
    (0x05, 'ê'), (0x09, 'ç'), (0x0A, '\u{000c}'), (0x0B, 'Ô'), (0x0C, 'ô'),
    (0x0E, 'Á'), (0x0F, 'á'), (0x12, 'Φ'), (0x13, 'Γ'), (0x14, '^'),
    (0x15, 'Ω'), (0x16, 'Π'), (0x17, 'Ψ'), (0x18, 'Σ'), (0x19, 'Θ'), (0x1F, 'Ê'),
    (0x28, '{'), (0x29, '}'), (0x2F, '\\'), (0x3C, '['), (0x3D, '~'), (0x3E, ']'), (0x40, '|'),
    (0x41, 'À'), (0x49, 'Í'), (0x4F, 'Ó'), (0x55, 'Ú'), (0x5B, 'Ã'), (0x5C, 'Õ'),
    (0x61, 'Â'), (0x65, '€'), (0x69, 'í'), (0x6F, 'ó'), (0x75, 'ú'),
    (0x7B, 'ã'), (0x7C, 'õ'), (0x7F, 'â'),
]);

static LOCKING_SHIFT_TABLES: [&Table; NL_TABLE_COUNT as usize] = [
    &DEFAULT_LOCKING,
    &TURKISH_LOCKING,
    // Spanish has no locking shift table of its own
    &DEFAULT_LOCKING,
    &PORTUGUESE_LOCKING,
];

static SINGLE_SHIFT_TABLES: [&Table; NL_TABLE_COUNT as usize] = [
    &DEFAULT_SHIFT,
    &TURKISH_SHIFT,
    &SPANISH_SHIFT,
    &PORTUGUESE_SHIFT,
];

pub fn has_language_table(index: u8) -> bool {
    index < NL_TABLE_COUNT
}

/// Locking shift table for a national language identifier. Unknown identifiers map to the default table.
pub fn locking_table(index: u8) -> &'static Table {
    LOCKING_SHIFT_TABLES.get(index as usize).copied().unwrap_or(LOCKING_SHIFT_TABLES[0])
}

/// Single shift table for a national language identifier. Unknown identifiers map to the default table.
pub fn single_shift_table(index: u8) -> &'static Table {
    SINGLE_SHIFT_TABLES.get(index as usize).copied().unwrap_or(SINGLE_SHIFT_TABLES[0])
}

/// Position of `c` in `table`. The placeholder character is never found.
pub fn index_of(table: &Table, c: char) -> Option<u8> {
    if c == UNUSED {
        return None;
    }
    table.iter().position(|&t| t == c).map(|p| p as u8)
}

/// True when every character is representable in the default locking or single shift table
pub fn is_gsm_default_alphabet(text: &str) -> bool {
    text.chars()
        .all(|c| index_of(&DEFAULT_LOCKING, c).is_some() || index_of(&DEFAULT_SHIFT, c).is_some())
}
