//! Digit-box answer entry.
//!
//! Answers are typed one digit per box, right to left, the way a column sum
//! is worked on paper. The boxes serialise to a fixed-width string with a
//! space for every empty box, which [`parse_answer`](crate::scoring::parse_answer)
//! reads back by dropping the blanks.

use std::fmt;

/// A row of single-digit answer boxes with a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitEntry {
    slots: Vec<Option<char>>,
    cursor: usize,
}

impl DigitEntry {
    /// Empty boxes with the cursor on the rightmost (units) box.
    pub fn new(width: usize) -> Self {
        let width = width.max(1);
        Self {
            slots: vec![None; width],
            cursor: width - 1,
        }
    }

    /// Load an existing answer, right-aligned. Characters that are not digits
    /// become blanks; anything wider than the boxes keeps its rightmost part.
    pub fn from_answer(width: usize, answer: Option<&str>) -> Self {
        let mut entry = Self::new(width);
        let chars: Vec<char> = answer.unwrap_or_default().chars().collect();
        let width = entry.slots.len();
        let skip = chars.len().saturating_sub(width);
        let offset = width.saturating_sub(chars.len());
        for (i, c) in chars.into_iter().skip(skip).enumerate() {
            entry.slots[offset + i] = c.is_ascii_digit().then_some(c);
        }
        entry
    }

    /// Load a whole typed number, e.g. `"85"` or `" 8 5"`.
    ///
    /// Whitespace is dropped first so the digits land flush right. Returns
    /// `None` if anything other than digits and whitespace was typed, or if
    /// there are more digits than boxes.
    pub fn from_typed(width: usize, typed: &str) -> Option<Self> {
        let digits: String = typed.chars().filter(|c| !c.is_whitespace()).collect();
        if !digits.chars().all(|c| c.is_ascii_digit()) || digits.len() > width.max(1) {
            return None;
        }
        Some(Self::from_answer(width, Some(&digits)))
    }

    pub fn width(&self) -> usize {
        self.slots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn digit(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    /// Put `digit` in box `index` and move the cursor one box left.
    ///
    /// Returns `false` and changes nothing if `digit` is not `0-9` or the
    /// index is out of range.
    pub fn set(&mut self, index: usize, digit: char) -> bool {
        if !digit.is_ascii_digit() || index >= self.slots.len() {
            return false;
        }
        self.slots[index] = Some(digit);
        self.cursor = index.saturating_sub(1);
        true
    }

    /// Type a digit at the cursor.
    pub fn type_digit(&mut self, digit: char) -> bool {
        self.set(self.cursor, digit)
    }

    pub fn clear(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// Clear the box under the cursor, or step left if it is already empty.
    pub fn backspace(&mut self) {
        if self.slots[self.cursor].is_some() {
            self.slots[self.cursor] = None;
        } else {
            self.move_left();
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.slots.len() - 1);
    }

    pub fn is_blank(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// The answer string, spaces for empty boxes, or `None` if every box is
    /// empty.
    pub fn answer(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        Some(self.slots.iter().map(|s| s.unwrap_or(' ')).collect())
    }

    /// The boxes as `[_][8][5]`.
    pub fn render(&self) -> String {
        self.slots
            .iter()
            .map(|s| format!("[{}]", s.unwrap_or('_')))
            .collect()
    }
}

impl fmt::Display for DigitEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::parse_answer;

    #[test]
    fn new_entry_is_blank() {
        let entry = DigitEntry::new(3);
        assert_eq!(entry.width(), 3);
        assert_eq!(entry.cursor(), 2);
        assert!(entry.is_blank());
        assert_eq!(entry.answer(), None);
        assert_eq!(entry.render(), "[_][_][_]");
    }

    #[test]
    fn typing_fills_right_to_left() {
        let mut entry = DigitEntry::new(3);
        assert!(entry.type_digit('5'));
        assert!(entry.type_digit('8'));
        assert_eq!(entry.answer().as_deref(), Some(" 85"));
        assert_eq!(entry.render(), "[_][8][5]");
        assert_eq!(parse_answer(&entry.answer().unwrap()), Some(85));
    }

    #[test]
    fn set_rejects_non_digits() {
        let mut entry = DigitEntry::new(2);
        assert!(!entry.set(1, 'x'));
        assert!(!entry.set(5, '1'));
        assert!(entry.is_blank());
        assert_eq!(entry.cursor(), 1);
    }

    #[test]
    fn cursor_stays_on_leftmost_box() {
        let mut entry = DigitEntry::new(2);
        entry.type_digit('1');
        entry.type_digit('2');
        entry.type_digit('3');
        // The leftmost box takes every further digit.
        assert_eq!(entry.cursor(), 0);
        assert_eq!(entry.answer().as_deref(), Some("31"));
    }

    #[test]
    fn gaps_are_kept_as_blanks() {
        let mut entry = DigitEntry::new(3);
        entry.set(0, '1');
        entry.set(2, '4');
        assert_eq!(entry.answer().as_deref(), Some("1 4"));
        assert_eq!(parse_answer("1 4"), Some(14));
    }

    #[test]
    fn from_answer_right_aligns() {
        let entry = DigitEntry::from_answer(3, Some("7"));
        assert_eq!(entry.render(), "[_][_][7]");
        let entry = DigitEntry::from_answer(3, None);
        assert!(entry.is_blank());
        let entry = DigitEntry::from_answer(2, Some("1234"));
        assert_eq!(entry.answer().as_deref(), Some("34"));
    }

    #[test]
    fn from_typed_drops_whitespace() {
        let entry = DigitEntry::from_typed(3, " 8 5").unwrap();
        assert_eq!(entry.answer().as_deref(), Some(" 85"));
        assert!(DigitEntry::from_typed(3, "").unwrap().is_blank());
        assert!(DigitEntry::from_typed(3, "-4").is_none());
        assert!(DigitEntry::from_typed(3, "1000").is_none());
    }

    #[test]
    fn backspace_and_navigation() {
        let mut entry = DigitEntry::from_answer(3, Some("12"));
        entry.move_right();
        assert_eq!(entry.cursor(), 2);
        entry.backspace();
        assert_eq!(entry.digit(2), None);
        assert_eq!(entry.cursor(), 2);
        entry.backspace();
        assert_eq!(entry.cursor(), 1);
        entry.backspace();
        assert_eq!(entry.digit(1), None);
        entry.clear(0);
        assert_eq!(entry.answer(), None);
        entry.move_left();
        entry.move_left();
        entry.move_left();
        assert_eq!(entry.cursor(), 0);
    }
}
