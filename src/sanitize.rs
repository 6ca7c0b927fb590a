//! Input normalization for typed letters.

/// Polish letters accepted in addition to ASCII letters.
const POLISH_LETTERS: &str = "ąćęłńóśźżĄĆĘŁŃÓŚŹŻ";

/// Whether `c` belongs to the accepted alphabet (either case).
pub fn is_accepted(c: char) -> bool {
    c.is_ascii_alphabetic() || POLISH_LETTERS.contains(c)
}

/// Drop every character outside the alphabet, then lowercase.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|&c| is_accepted(c))
        .flat_map(char::to_lowercase)
        .collect()
}
