use crate::query::merge_foreign;

/// Owner of the current location's query string.
///
/// There is no push: filter changes replace the current entry so history stays clean.
pub trait Navigator {
    fn read(&self) -> String;

    fn replace(&mut self, query: &str);
}

/// In-memory location, e.g. the query of one HTTP request.
///
/// Keys other than the filter keys survive a replace, the way a router keeps them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QueryNavigator {
    query: String,
    replacements: usize,
}

impl QueryNavigator {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            replacements: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl Navigator for QueryNavigator {
    fn read(&self) -> String {
        self.query.clone()
    }

    fn replace(&mut self, query: &str) {
        self.query = merge_foreign(&self.query, query);
        self.replacements += 1;
    }
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn read(&self) -> String {
        (**self).read()
    }

    fn replace(&mut self, query: &str) {
        (**self).replace(query)
    }
}
