//! Edit filters - hooks that vet text before a field commits it

/// Outcome of filtering one insertion
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filtered {
    /// Text that may be committed, in original order
    pub text: String,
    /// True if any part of the insertion was dropped
    pub rejected: bool,
}

impl Filtered {
    pub fn accepted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rejected: false,
        }
    }
}

/// Inspects every insertion into a text field before it is committed
pub trait EditFilter {
    fn filter(&mut self, inserted: &str) -> Filtered;
}

/// Filter that lets everything through
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl EditFilter for AcceptAll {
    fn filter(&mut self, inserted: &str) -> Filtered {
        Filtered::accepted(inserted)
    }
}

/// Keeps ASCII digits `0`-`9` and drops everything else.
///
/// Unicode digits such as `'٣'` are rejected: the buffer must parse as a
/// plain decimal number.
#[derive(Clone, Copy, Debug, Default)]
pub struct DigitFilter;

impl EditFilter for DigitFilter {
    fn filter(&mut self, inserted: &str) -> Filtered {
        let text: String = inserted.chars().filter(char::is_ascii_digit).collect();
        let rejected = text.len() != inserted.len();
        Filtered { text, rejected }
    }
}
