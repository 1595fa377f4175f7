//! Case-insensitive prefix tree used for shell completion.
//!
//! Keys are matched on their lowercase form, but completions are returned the
//! way they were inserted, so `"git"` completes to `"GitHub"`.

use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Node {
    children: BTreeMap<char, Node>,
    /// The original spelling of the word ending here.
    word: Option<String>,
}

impl Node {
    fn collect(&self, out: &mut Vec<String>) {
        if let Some(word) = &self.word {
            out.push(word.clone());
        }
        for child in self.children.values() {
            child.collect(out);
        }
    }

    fn is_leaf(&self) -> bool {
        self.word.is_none() && self.children.is_empty()
    }
}

/// Prefix tree over completion candidates.
///
/// ```
/// use lockbox::trie::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("GitHub");
/// trie.insert("gitlab");
/// trie.insert("Email");
///
/// assert_eq!(trie.completions("git"), vec!["GitHub", "gitlab"]);
/// assert!(trie.contains("github"));
/// ```
#[derive(Debug, Default)]
pub struct Trie {
    root: Node,
    count: usize,
}

fn fold(word: &str) -> impl Iterator<Item = char> + '_ {
    word.chars().flat_map(char::to_lowercase)
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `word`. A word equal to an existing one ignoring case is not added twice.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }

        let mut node = &mut self.root;
        for ch in fold(word) {
            node = node.children.entry(ch).or_default();
        }

        if node.word.is_none() {
            node.word = Some(word.to_string());
            self.count += 1;
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.find(word).is_some_and(|node| node.word.is_some())
    }

    /// Removes `word` (ignoring case) and prunes empty branches.
    pub fn remove(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let path: Vec<char> = fold(word).collect();
        let removed = Self::remove_path(&mut self.root, &path);
        if removed {
            self.count -= 1;
        }
        removed
    }

    fn remove_path(node: &mut Node, path: &[char]) -> bool {
        match path.split_first() {
            None => node.word.take().is_some(),
            Some((ch, rest)) => {
                let Some(child) = node.children.get_mut(ch) else {
                    return false;
                };
                let removed = Self::remove_path(child, rest);
                if removed && child.is_leaf() {
                    node.children.remove(ch);
                }
                removed
            }
        }
    }

    /// All words starting with `prefix` (ignoring case), in lowercase order.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(node) = self.find(prefix) {
            node.collect(&mut out);
        }
        out
    }

    /// Replaces the contents with `words`.
    pub fn rebuild<'a, I>(&mut self, words: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.clear();
        for word in words {
            self.insert(word);
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clear(&mut self) {
        self.root = Node::default();
        self.count = 0;
    }

    fn find(&self, prefix: &str) -> Option<&Node> {
        let mut node = &self.root;
        for ch in fold(prefix) {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }
}
