use std::fmt::{self, Debug, Display};

/// Truncates the debug output of a value to a maximum length.
/// Used to keep long SQL statements from flooding the logs.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MaxLogLength<'a, T: Debug> {
    limit: Option<usize>,
    val: &'a T,
}

impl<'a, T: Debug> MaxLogLength<'a, T> {
    pub fn new(limit: Option<usize>, val: &'a T) -> Self {
        Self { limit, val }
    }
}

impl<'a, T: Debug> Debug for MaxLogLength<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt = format!("{:?}", self.val);

        match self.limit {
            Some(limit) if fmt.chars().count() > limit => {
                write!(f, "{}...", fmt.chars().take(limit).collect::<String>())
            }
            _ => write!(f, "{}", fmt),
        }
    }
}

impl<'a, T: Debug> Display for MaxLogLength<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}
