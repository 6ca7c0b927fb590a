//! Polish noun forms for counts.
//!
//! Polish uses three forms: one for exactly 1, a "few" form for counts ending
//! in 2-4 (except 12-14), and a "many" form for everything else.

/// The three grammatical forms of a single noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluralForms {
    pub one: &'static str,
    pub few: &'static str,
    pub many: &'static str,
}

impl PluralForms {
    /// Pick the form matching `count`.
    pub fn select(&self, count: u64) -> &'static str {
        if count == 1 {
            return self.one;
        }
        let last = count % 10;
        let last_two = count % 100;
        if (2..=4).contains(&last) && !(10..20).contains(&last_two) {
            self.few
        } else {
            self.many
        }
    }
}

pub const WORD: PluralForms = PluralForms {
    one: "słowo",
    few: "słowa",
    many: "słów",
};

pub const LETTER: PluralForms = PluralForms {
    one: "litera",
    few: "litery",
    many: "liter",
};

pub fn word_form(count: u64) -> &'static str {
    WORD.select(count)
}

pub fn letter_form(count: u64) -> &'static str {
    LETTER.select(count)
}
