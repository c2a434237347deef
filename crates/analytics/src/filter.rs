use std::collections::BTreeSet;
use std::fmt;

/// Reads a text field from a record.
pub type TextField<T> = fn(&T) -> &str;

/// Reads a list-of-labels field from a record.
pub type ListField<T> = fn(&T) -> &[String];

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// A set of predicates over records of type `T`, combined with AND.
///
/// Builder methods that receive an inactive criterion (empty search text, no
/// selected value, empty selection) add nothing, so an empty `Filter` accepts
/// every record.
pub struct Filter<T> {
    predicates: Vec<Predicate<T>>,
}

impl<T: 'static> Filter<T> {
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Adds an arbitrary predicate.
    pub fn with(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Case-insensitive substring match of `needle` against any of `fields`.
    pub fn text(self, needle: &str, fields: &[TextField<T>]) -> Self {
        if needle.is_empty() || fields.is_empty() {
            return self;
        }
        let needle = needle.to_lowercase();
        let fields = fields.to_vec();
        self.with(move |record| {
            fields
                .iter()
                .any(|field| field(record).to_lowercase().contains(&needle))
        })
    }

    /// Case-insensitive substring match of the selected value against one field.
    pub fn contains(self, selected: Option<&str>, field: TextField<T>) -> Self {
        match selected {
            Some(value) if !value.is_empty() => {
                let value = value.to_lowercase();
                self.with(move |record| field(record).to_lowercase().contains(&value))
            }
            _ => self,
        }
    }

    /// Exact equality between the selected value and one field.
    pub fn equals<V>(self, selected: Option<V>, field: fn(&T) -> V) -> Self
    where
        V: PartialEq + Send + Sync + 'static,
    {
        match selected {
            Some(value) => self.with(move |record| field(record) == value),
            None => self,
        }
    }

    /// Passes when at least one label of the record, case-folded, is in `selected`.
    ///
    /// The selection is expected to be case-folded already.
    pub fn any_of(self, selected: &BTreeSet<String>, field: ListField<T>) -> Self {
        if selected.is_empty() {
            return self;
        }
        let selected = selected.clone();
        self.with(move |record| {
            field(record)
                .iter()
                .any(|label| selected.contains(&label.to_lowercase()))
        })
    }

    /// Number of active predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, record: &T) -> bool {
        self.predicates.iter().all(|predicate| predicate(record))
    }

    /// Returns the matching records in input order.
    pub fn apply<'a>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

impl<T: 'static> Default for Filter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("predicates", &self.predicates.len())
            .finish()
    }
}
