//! Index values and restartable index sets.

use std::fmt;
use std::ops::Range;
use std::rc::Rc;

/// A single index value a variable or constraint row is instantiated over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Index {
    Int(i64),
    Name(String),
    Tuple(Vec<Index>),
}

impl Index {
    /// Append `next` to this index, flattening into a single tuple.
    pub fn join(self, next: Index) -> Index {
        match self {
            Index::Tuple(mut parts) => {
                parts.push(next);
                Index::Tuple(parts)
            }
            head => Index::Tuple(vec![head, next]),
        }
    }

    /// Integer value, if this is an integer index.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Index::Int(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::Int(value) => write!(f, "{value}"),
            Index::Name(name) => f.write_str(name),
            Index::Tuple(parts) => {
                for (pos, part) in parts.iter().enumerate() {
                    if pos > 0 {
                        f.write_str("_")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for Index {
    fn from(value: i64) -> Self {
        Index::Int(value)
    }
}

impl From<i32> for Index {
    fn from(value: i32) -> Self {
        Index::Int(i64::from(value))
    }
}

/// Saturates at `i64::MAX`.
impl From<usize> for Index {
    fn from(value: usize) -> Self {
        Index::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Index {
    fn from(value: &str) -> Self {
        Index::Name(value.to_string())
    }
}

impl From<String> for Index {
    fn from(value: String) -> Self {
        Index::Name(value)
    }
}

impl<A: Into<Index>, B: Into<Index>> From<(A, B)> for Index {
    fn from((a, b): (A, B)) -> Self {
        a.into().join(b.into())
    }
}

type Producer = dyn Fn() -> Box<dyn Iterator<Item = Index>>;

/// A restartable sequence of index values.
///
/// Cloning is cheap and shares the underlying producer. Each call to
/// [`IndexSet::iter`] starts a new pass from the beginning; nothing is cached
/// between passes.
#[derive(Clone)]
pub struct IndexSet {
    producer: Rc<Producer>,
}

impl IndexSet {
    /// Build from any zero-argument closure returning a fresh iterator.
    pub fn from_fn<F, I>(producer: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = Index>,
        I::IntoIter: 'static,
    {
        Self {
            producer: Rc::new(move || -> Box<dyn Iterator<Item = Index>> {
                Box::new(producer().into_iter())
            }),
        }
    }

    /// Integer indices over a half-open range.
    pub fn range(range: Range<i64>) -> Self {
        Self::from_fn(move || range.clone().map(Index::Int))
    }

    /// An explicit, owned list of indices. Intended for small sets.
    pub fn values<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Index>,
    {
        let values: Rc<[Index]> = values.into_iter().map(Into::into).collect();
        Self::from_fn(move || {
            let values = Rc::clone(&values);
            (0..values.len()).map(move |pos| values[pos].clone())
        })
    }

    /// Start a new pass over the set.
    pub fn iter(&self) -> Box<dyn Iterator<Item = Index>> {
        (self.producer)()
    }

    /// Keep only indices matching `predicate`.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: Fn(&Index) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        Self::from_fn(move || {
            let predicate = Rc::clone(&predicate);
            self.iter().filter(move |index| predicate(index))
        })
    }

    /// Transform every index with `f`.
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(Index) -> Index + 'static,
    {
        let f = Rc::new(f);
        Self::from_fn(move || {
            let f = Rc::clone(&f);
            self.iter().map(move |index| f(index))
        })
    }

    /// Lazy cartesian product; `other` is restarted for every left element.
    pub fn product(self, other: IndexSet) -> Self {
        Self::from_fn(move || {
            let right = other.clone();
            self.iter()
                .flat_map(move |left| right.iter().map(move |next| left.clone().join(next)))
        })
    }

    /// At most the first `n` indices of every pass.
    pub fn take(self, n: usize) -> Self {
        Self::from_fn(move || self.iter().take(n))
    }
}

impl fmt::Debug for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexSet").finish_non_exhaustive()
    }
}
