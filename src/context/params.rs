#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamStore {
    entries: Vec<(String, String)>,
}

impl ParamStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the first binding of `name`, or appends one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Appends a binding even when `name` is already bound.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_store_when_set_twice_then_overwrites_in_place() {
        let mut params = ParamStore::new();
        params.set(":id", "1");
        params.set(":name", "x");
        params.set(":id", "2");

        assert_eq!(params.len(), 2);
        assert_eq!(params.get(":id"), Some("2"));
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            vec![(":id", "2"), (":name", "x")]
        );
    }

    #[test]
    fn param_store_when_added_then_keeps_every_value() {
        let mut params = ParamStore::new();
        params.set(":splat", "a");
        params.add(":splat", "b");

        assert_eq!(params.get(":splat"), Some("a"));
        assert_eq!(params.get_all(":splat").collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
