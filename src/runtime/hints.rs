//! Menu hints: the (mnemonic, description) pairs shown in hint bars

use super::keys::Key;
use std::cmp::Ordering;

/// One hint bar entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuHint {
    pub key: Key,
    pub description: String,
}

impl MenuHint {
    pub fn new(key: Key, description: impl Into<String>) -> Self {
        Self {
            key,
            description: description.into(),
        }
    }

    /// Key label as rendered ("<Esc>" without the brackets)
    pub fn mnemonic(&self) -> String {
        self.key.name()
    }

    pub fn is_digit(&self) -> bool {
        self.key.digit().is_some()
    }
}

/// Display ordering: digit mnemonics first, by value, then everything else
/// by the key's natural code order.
fn display_order(a: &MenuHint, b: &MenuHint) -> Ordering {
    match (a.key.digit(), b.key.digit()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.key.cmp(&b.key),
    }
}

/// Hints kept in display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuHints(Vec<MenuHint>);

impl MenuHints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert and keep display order. A hint for an existing key replaces it.
    pub fn push(&mut self, hint: MenuHint) {
        self.0.retain(|h| h.key != hint.key);
        self.0.push(hint);
        self.sort();
    }

    /// Fold `other` in, its entries winning on key collision
    pub fn extend(&mut self, other: MenuHints) {
        for hint in other.0 {
            self.0.retain(|h| h.key != hint.key);
            self.0.push(hint);
        }
        self.sort();
    }

    fn sort(&mut self) {
        self.0.sort_by(display_order);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MenuHint> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<MenuHint> for MenuHints {
    fn from_iter<I: IntoIterator<Item = MenuHint>>(iter: I) -> Self {
        let mut hints = MenuHints(iter.into_iter().collect());
        hints.sort();
        hints
    }
}

impl<'a> IntoIterator for &'a MenuHints {
    type Item = &'a MenuHint;
    type IntoIter = std::slice::Iter<'a, MenuHint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mnemonics(hints: &MenuHints) -> Vec<String> {
        hints.iter().map(|h| h.mnemonic()).collect()
    }

    #[test]
    fn test_digits_sort_first_numerically() {
        let hints: MenuHints = [
            MenuHint::new(Key::Char('a'), "all"),
            MenuHint::new(Key::Char('9'), "nine"),
            MenuHint::new(Key::Char('1'), "one"),
            MenuHint::new(Key::Esc, "back"),
            MenuHint::new(Key::Ctrl('d'), "delete"),
            MenuHint::new(Key::F(2), "shell"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            mnemonics(&hints),
            vec!["1", "9", "Ctrl-D", "Esc", "a", "F2"]
        );
    }

    #[test]
    fn test_runes_by_code_point() {
        let hints: MenuHints = [
            MenuHint::new(Key::Char('j'), "down"),
            MenuHint::new(Key::Char('G'), "bottom"),
            MenuHint::new(Key::Char('?'), "help"),
        ]
        .into_iter()
        .collect();

        assert_eq!(mnemonics(&hints), vec!["?", "G", "j"]);
    }

    #[test]
    fn test_extend_replaces_same_key() {
        let mut hints: MenuHints = [MenuHint::new(Key::Enter, "open")].into_iter().collect();
        hints.extend([MenuHint::new(Key::Enter, "view")].into_iter().collect());
        hints.push(MenuHint::new(Key::Char('0'), "zero"));

        assert_eq!(hints.len(), 2);
        assert_eq!(hints.iter().next().unwrap().description, "zero");
        assert_eq!(hints.iter().nth(1).unwrap().description, "view");
    }
}
