//! [`ItemSet`] — the number / string / binary set container.
//!
//! A set is an insertion-ordered, duplicate-free list of scalar members. The
//! codec only needs three things from it: the member kind, the members as a
//! slice, and construction from decoded members.

use std::fmt;

/// Member kind of a set, mapping to the `N` / `S` / `B` scalar tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetKind {
    Number,
    String,
    Binary,
}

impl SetKind {
    /// Tag of the whole set (`"NS"`, `"SS"`, `"BS"`).
    pub fn set_tag(self) -> &'static str {
        match self {
            SetKind::Number => "NS",
            SetKind::String => "SS",
            SetKind::Binary => "BS",
        }
    }
}

impl fmt::Display for SetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.set_tag())
    }
}

/// A single set member.
#[derive(Debug, Clone, PartialEq)]
pub enum SetElement {
    Number(f64),
    Str(String),
    Binary(Vec<u8>),
}

impl SetElement {
    pub fn kind(&self) -> SetKind {
        match self {
            SetElement::Number(_) => SetKind::Number,
            SetElement::Str(_) => SetKind::String,
            SetElement::Binary(_) => SetKind::Binary,
        }
    }
}

impl From<f64> for SetElement {
    fn from(n: f64) -> Self {
        SetElement::Number(n)
    }
}

impl From<&str> for SetElement {
    fn from(s: &str) -> Self {
        SetElement::Str(s.to_string())
    }
}

impl From<String> for SetElement {
    fn from(s: String) -> Self {
        SetElement::Str(s)
    }
}

impl From<Vec<u8>> for SetElement {
    fn from(b: Vec<u8>) -> Self {
        SetElement::Binary(b)
    }
}

/// Set of numbers, strings or binaries.
///
/// Sets built through [`numbers`](ItemSet::numbers), [`strings`](ItemSet::strings)
/// or [`binaries`](ItemSet::binaries) carry their kind even when empty. Sets
/// built through [`from_elements`](ItemSet::from_elements) infer it, and have
/// no kind when empty or mixed.
#[derive(Debug, Clone, Default)]
pub struct ItemSet {
    declared: Option<SetKind>,
    elements: Vec<SetElement>,
}

impl ItemSet {
    /// Empty set of the given kind.
    pub fn new(kind: SetKind) -> Self {
        Self {
            declared: Some(kind),
            elements: Vec::new(),
        }
    }

    pub fn numbers<I: IntoIterator<Item = f64>>(items: I) -> Self {
        let mut set = Self::new(SetKind::Number);
        set.extend(items.into_iter().map(SetElement::Number));
        set
    }

    pub fn strings<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new(SetKind::String);
        set.extend(items.into_iter().map(|s| SetElement::Str(s.into())));
        set
    }

    pub fn binaries<I: IntoIterator<Item = Vec<u8>>>(items: I) -> Self {
        let mut set = Self::new(SetKind::Binary);
        set.extend(items.into_iter().map(SetElement::Binary));
        set
    }

    /// Untyped set; the kind is inferred from the members.
    pub fn from_elements<I: IntoIterator<Item = SetElement>>(items: I) -> Self {
        let mut set = Self::default();
        set.extend(items);
        set
    }

    /// Member kind, or `None` when it cannot be determined.
    pub fn kind(&self) -> Option<SetKind> {
        let first = match self.elements.first() {
            Some(e) => e.kind(),
            None => return self.declared,
        };
        let expected = self.declared.unwrap_or(first);
        self.elements
            .iter()
            .all(|e| e.kind() == expected)
            .then_some(expected)
    }

    /// Add a member. Returns `false` if an equal member is already present.
    pub fn insert(&mut self, element: SetElement) -> bool {
        if self.contains(&element) {
            return false;
        }
        self.elements.push(element);
        true
    }

    pub fn contains(&self, element: &SetElement) -> bool {
        self.elements.iter().any(|e| same_member(e, element))
    }

    /// Members in insertion order.
    pub fn elements(&self) -> &[SetElement] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<SetElement> {
        self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Extend<SetElement> for ItemSet {
    fn extend<I: IntoIterator<Item = SetElement>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

/// Order-insensitive: two sets are equal when they hold the same members and
/// agree on kind.
impl PartialEq for ItemSet {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind()
            && self.len() == other.len()
            && self.elements.iter().all(|e| other.contains(e))
    }
}

// NaN members compare equal to each other so a set never holds two of them.
fn same_member(a: &SetElement, b: &SetElement) -> bool {
    match (a, b) {
        (SetElement::Number(x), SetElement::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
        _ => a == b,
    }
}
