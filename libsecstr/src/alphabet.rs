use phf::phf_map;

pub const UTF8_SPACE: u8 = 32;

/// The placeholder symbol used for positions that carry no secondary structure
pub const BLANK_SYMBOL: char = ' ';

/// WUSS symbols that mark an unpaired position
pub const UNPAIRED_SYMBOLS: [char; 6] = ['.', ',', ':', '_', '-', '~'];

/// maps from \<closing bracket\> -> \<opening bracket\>
pub const CLOSING_TO_OPENING_BRACKET: phf::Map<char, char> = phf_map! {
    ')' => '(',
    ']' => '[',
    '}' => '{',
    '>' => '<',
};

/// maps from \<opening bracket\> -> \<closing bracket\>
pub const OPENING_TO_CLOSING_BRACKET: phf::Map<char, char> = phf_map! {
    '(' => ')',
    '[' => ']',
    '{' => '}',
    '<' => '>',
};

/// Watson-Crick pairs, upper case, T treated as U
const CANONICAL_PAIRS: [(char, char); 6] = [
    ('A', 'U'),
    ('U', 'A'),
    ('C', 'G'),
    ('G', 'C'),
    ('A', 'T'),
    ('T', 'A'),
];

/// G:U wobble pairs, upper case, T treated as U
const WOBBLE_PAIRS: [(char, char); 4] = [('G', 'U'), ('U', 'G'), ('G', 'T'), ('T', 'G')];

/// Opening symbols are the brackets ([{< and the upper case letters used
/// for pseudoknots in WUSS notation.
pub fn is_opening_symbol(c: char) -> bool {
    c.is_ascii_uppercase() || OPENING_TO_CLOSING_BRACKET.contains_key(&c)
}

/// Closing symbols are the brackets )]}> and the lower case letters.
pub fn is_closing_symbol(c: char) -> bool {
    c.is_ascii_lowercase() || CLOSING_TO_OPENING_BRACKET.contains_key(&c)
}

pub fn is_secondary_structure_symbol(c: char) -> bool {
    is_opening_symbol(c) || is_closing_symbol(c)
}

pub fn is_unpaired_symbol(c: char) -> bool {
    UNPAIRED_SYMBOLS.contains(&c)
}

/// Returns the opening partner of a closing symbol, or the symbol itself
/// if it doesn't close a pair.
pub fn matching_opening_symbol(c: char) -> char {
    if c.is_ascii_lowercase() {
        return c.to_ascii_uppercase();
    }
    CLOSING_TO_OPENING_BRACKET.get(&c).copied().unwrap_or(c)
}

/// Returns the closing partner of an opening symbol, or the symbol itself
/// if it doesn't open a pair.
pub fn matching_closing_symbol(c: char) -> char {
    if c.is_ascii_uppercase() {
        return c.to_ascii_lowercase();
    }
    OPENING_TO_CLOSING_BRACKET.get(&c).copied().unwrap_or(c)
}

/// Replaces every character that isn't a pairing symbol with a space.
pub fn secondary_structure_state(notation: &str) -> String {
    notation
        .chars()
        .map(|c| {
            if is_secondary_structure_symbol(c) {
                c
            } else {
                BLANK_SYMBOL
            }
        })
        .collect()
}

/// Answers true for A:U, A:T and C:G in either order, ignoring case.
pub fn is_canonical_pair(first: char, second: char) -> bool {
    let pair = (first.to_ascii_uppercase(), second.to_ascii_uppercase());
    CANONICAL_PAIRS.contains(&pair)
}

/// Answers true for canonical pairs and the G:U (or G:T) wobble, ignoring case.
pub fn is_canonical_or_wobble_pair(first: char, second: char) -> bool {
    let pair = (first.to_ascii_uppercase(), second.to_ascii_uppercase());
    CANONICAL_PAIRS.contains(&pair) || WOBBLE_PAIRS.contains(&pair)
}
