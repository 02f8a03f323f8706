//! Change - "leave alone" or "overwrite" for one field of a partial update.
//!
//! There is no clear state; stored fields are either kept or replaced.

/// One field of a partial update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Change<T> {
    /// Keep the stored value.
    #[default]
    Keep,
    /// Replace the stored value.
    Set(T),
}

impl<T> Change<T> {
    /// Returns true when the stored value is left untouched.
    pub fn is_keep(&self) -> bool {
        matches!(self, Change::Keep)
    }

    /// Overwrite `current` when this is a `Set`.
    pub fn apply(self, current: &mut T) {
        if let Change::Set(value) = self {
            *current = value;
        }
    }

    /// Borrow the carried value, if any.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Change::Keep => None,
            Change::Set(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for Change<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Change::Keep, Change::Set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_leaves_value_untouched() {
        let mut year = 2020;
        Change::Keep.apply(&mut year);
        assert_eq!(year, 2020);
    }

    #[test]
    fn set_overwrites_value() {
        let mut name = "Asha".to_string();
        Change::Set("Ravi".to_string()).apply(&mut name);
        assert_eq!(name, "Ravi");
    }

    #[test]
    fn from_option() {
        assert_eq!(Change::<i32>::from(None), Change::Keep);
        assert_eq!(Change::from(Some(3)), Change::Set(3));
    }

    #[test]
    fn as_set_borrows_only_set_values() {
        assert_eq!(Change::<i32>::Keep.as_set(), None);
        assert_eq!(Change::Set(7).as_set(), Some(&7));
    }
}
