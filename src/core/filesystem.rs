use indexmap::IndexMap;

/// In-memory workspace shared by the editor and the repository.
///
/// Files are flat `path -> content` entries kept in insertion order, so
/// `ls`, `git add .` and `git status` all see the same stable ordering.
/// Overwriting a path replaces its content in place; no previous version
/// is retained.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VirtualFs {
    files: IndexMap<String, String>,
}

impl VirtualFs {
    /// Create an empty filesystem.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a filesystem pre-populated with `(path, content)` pairs.
    pub fn from_seed<'a>(seed: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut fs = Self::empty();
        for (path, content) in seed {
            fs.write(path, content);
        }
        fs
    }

    /// Read the content at `path`.
    pub fn read(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Create or overwrite the file at `path`.
    pub fn write(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// All paths in insertion order.
    pub fn list(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).collect()
    }

    /// Iterate over `(path, content)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> VirtualFs {
        VirtualFs::from_seed([("counter.v", "module counter;"), ("README.md", "# readme")])
    }

    #[test]
    fn test_write_then_read() {
        let mut fs = VirtualFs::empty();
        fs.write("top.v", "module top; endmodule");
        assert_eq!(fs.read("top.v"), Some("module top; endmodule"));
    }

    #[test]
    fn test_read_missing() {
        assert_eq!(seeded().read("missing.v"), None);
        assert!(!seeded().exists("missing.v"));
    }

    #[test]
    fn test_overwrite_replaces_content() {
        let mut fs = seeded();
        fs.write("counter.v", "");
        assert_eq!(fs.read("counter.v"), Some(""));
        assert_eq!(fs.len(), 2);
    }

    #[test]
    fn test_list_insertion_order() {
        let mut fs = seeded();
        fs.write("alu.v", "module alu;");
        assert_eq!(fs.list(), vec!["counter.v", "README.md", "alu.v"]);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut fs = seeded();
        fs.write("alu.v", "module alu;");
        fs.write("counter.v", "module counter2;");
        assert_eq!(fs.list(), vec!["counter.v", "README.md", "alu.v"]);
    }

    #[test]
    fn test_empty_string_content_exists() {
        let mut fs = VirtualFs::empty();
        assert!(fs.is_empty());
        fs.write("blank.v", "");
        assert!(fs.exists("blank.v"));
        assert!(!fs.is_empty());
    }

    #[test]
    fn test_iter_pairs() {
        let fs = seeded();
        let pairs: Vec<_> = fs.iter().collect();
        assert_eq!(
            pairs,
            vec![("counter.v", "module counter;"), ("README.md", "# readme")]
        );
    }
}
