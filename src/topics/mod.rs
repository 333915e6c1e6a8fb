//! Topic storage and directory loading.
//!
//! A topic is a named markdown document. Topics are kept in insertion order
//! until a directory load, which sorts the whole store by name.

use std::path::Path;

use regex::{Regex, RegexBuilder};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// File names accepted by default; capture 1 is the topic name.
pub const DEFAULT_FILE_MATCH: &str = r"(.*)\.(md|markdown)$";

/// Title extracted by default: the first level-1 header.
pub const DEFAULT_TITLE_MATCH: &str = r"^ {0,3}# (.*)";

/// A named markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    pub title: String,
    pub content: String,
}

impl Topic {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Ordered topic collection keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TopicStore {
    topics: Vec<Topic>,
}

impl TopicStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a topic and return its index.
    ///
    /// A topic with the same name is replaced in place.
    pub fn add(&mut self, topic: Topic) -> usize {
        if let Some(index) = self.get_by_name(&topic.name) {
            debug!(name = %topic.name, "replacing topic");
            self.topics[index] = topic;
            return index;
        }
        self.topics.push(topic);
        self.topics.len() - 1
    }

    /// Index of the topic called `name`.
    pub fn get_by_name(&self, name: &str) -> Option<usize> {
        self.topics.iter().position(|topic| topic.name == name)
    }

    pub fn get(&self, index: usize) -> Option<&Topic> {
        self.topics.get(index)
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub const fn len(&self) -> usize {
        self.topics.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Sort topics by name (byte order). Invalidates previously returned indices.
    pub fn sort_by_name(&mut self) {
        self.topics.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Add every matching file in `path` (not recursive) and sort the store.
    ///
    /// `file_match` selects files by name, its first capture group naming the
    /// topic. `title_match` is applied line-wise to the content, its first
    /// capture group giving the title; topics without a title match are
    /// titled by their name. Files that cannot be read are skipped with a
    /// warning. Returns the number of topics added.
    ///
    /// # Errors
    /// Returns an error if a pattern is invalid or the directory cannot be
    /// listed. The store is left unchanged in that case.
    pub fn add_from_directory(
        &mut self,
        path: &Path,
        file_match: Option<&str>,
        title_match: Option<&str>,
    ) -> Result<usize> {
        let file_regex = compile(file_match.unwrap_or(DEFAULT_FILE_MATCH), false)?;
        let title_regex = compile(title_match.unwrap_or(DEFAULT_TITLE_MATCH), true)?;

        if !path.is_dir() {
            return Err(Error::NotADirectory(path.to_path_buf()));
        }
        let entries = std::fs::read_dir(path).map_err(|e| Error::io(path, e))?;

        let mut added = 0;
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            let Some(caps) = file_regex.captures(file_name) else {
                continue;
            };

            let file_path = entry.path();
            let content = match std::fs::read_to_string(&file_path) {
                Ok(content) => content,
                Err(err) => {
                    warn!(
                        path = %file_path.display(),
                        error = %err,
                        "failed to load markdown file"
                    );
                    continue;
                }
            };

            let name = caps
                .get(1)
                .or_else(|| caps.get(0))
                .map_or(file_name, |m| m.as_str())
                .to_string();
            let title = title_regex
                .captures(&content)
                .and_then(|caps| caps.get(1))
                .map_or_else(|| name.clone(), |m| m.as_str().trim_end().to_string());

            self.add(Topic {
                name,
                title,
                content,
            });
            added += 1;
        }

        self.sort_by_name();
        info!(path = %path.display(), added, total = self.len(), "loaded topics");
        Ok(added)
    }
}

fn compile(pattern: &str, multi_line: bool) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .multi_line(multi_line)
        .build()
        .map_err(|source| Error::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_add_and_lookup() {
        let mut store = TopicStore::new();
        assert_eq!(store.add(Topic::new("b", "B", "")), 0);
        assert_eq!(store.add(Topic::new("a", "A", "")), 1);
        assert_eq!(store.get_by_name("a"), Some(1));
        assert_eq!(store.get_by_name("missing"), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_replaces_same_name() {
        let mut store = TopicStore::new();
        store.add(Topic::new("a", "Old", "old"));
        assert_eq!(store.add(Topic::new("a", "New", "new")), 0);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().content, "new");
    }

    #[test]
    fn test_sort_by_name_is_byte_order() {
        let mut store = TopicStore::new();
        for name in ["beta", "Alpha", "alpha"] {
            store.add(Topic::new(name, name, ""));
        }
        store.sort_by_name();
        let names: Vec<&str> = store.topics().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "alpha", "beta"]);
    }

    #[test]
    fn test_load_directory_with_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "intro\n# Welcome\ntext").unwrap();
        fs::write(dir.path().join("Guide.markdown"), "no header here").unwrap();
        fs::write(dir.path().join("notes.txt"), "# Ignored").unwrap();

        let mut store = TopicStore::new();
        let added = store.add_from_directory(dir.path(), None, None).unwrap();
        assert_eq!(added, 2);

        let names: Vec<&str> = store.topics().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Guide", "README"]);
        assert_eq!(store.get(1).unwrap().title, "Welcome");
        assert_eq!(store.get(0).unwrap().title, "Guide");
    }

    #[test]
    fn test_load_directory_with_custom_patterns() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("page-one.txt"), "Title: First\nbody").unwrap();
        fs::write(dir.path().join("other.md"), "# Skipped").unwrap();

        let mut store = TopicStore::new();
        store
            .add_from_directory(dir.path(), Some(r"^page-(.*)\.txt$"), Some(r"^Title: (.*)$"))
            .unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().name, "one");
        assert_eq!(store.get(0).unwrap().title, "First");
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let dir = tempdir().unwrap();
        let mut store = TopicStore::new();
        store.add(Topic::new("kept", "Kept", ""));
        let err = store
            .add_from_directory(dir.path(), Some("(unclosed"), None)
            .unwrap_err();
        assert!(matches!(err, Error::Pattern { .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = tempdir().unwrap();
        let mut store = TopicStore::new();
        let err = store
            .add_from_directory(&dir.path().join("nope"), None, None)
            .unwrap_err();
        assert!(matches!(err, Error::NotADirectory(_)));
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.md"), "# Good").unwrap();
        fs::write(dir.path().join("bad.md"), [0xff, 0xfe, 0x00]).unwrap();

        let mut store = TopicStore::new();
        let added = store.add_from_directory(dir.path(), None, None).unwrap();
        assert_eq!(added, 1);
        assert_eq!(store.get_by_name("good"), Some(0));
    }
}
