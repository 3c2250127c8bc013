//! Weighted binary tree backing [`crate::Buffer`].
//!
//! Leaves hold runs of at most [`LEAF_MAX`] characters. Internal nodes cache
//! `weight` (characters under the left child) together with the subtree length,
//! depth and leaf count; those caches are refreshed bottom-up on the return path
//! of every edit, so only the nodes along the edited path are touched.
//!
//! Offsets throughout are Unicode scalar (char) indices, never bytes.

use crate::TextError;

/// Maximum characters stored in a single leaf.
pub(crate) const LEAF_MAX: usize = 64;

#[derive(Clone, Debug)]
pub(crate) enum Node {
    Leaf {
        text: String,
        chars: usize,
    },
    Internal {
        left: Box<Node>,
        right: Box<Node>,
        weight: usize,
        len: usize,
        depth: usize,
        leaves: usize,
    },
}

impl Default for Node {
    fn default() -> Self {
        Node::Leaf {
            text: String::new(),
            chars: 0,
        }
    }
}

/// Byte offset of the `char_idx`-th character (or `text.len()` past the end).
fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}

/// Cut `text` into leaves of at most `LEAF_MAX` chars.
fn chunk(text: &str) -> Vec<Node> {
    let mut out = Vec::with_capacity(text.len() / LEAF_MAX + 1);
    let mut start = 0usize;
    let mut count = 0usize;
    for (idx, _) in text.char_indices() {
        if count == LEAF_MAX {
            out.push(Node::leaf_counted(text[start..idx].to_string(), count));
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if count > 0 {
        out.push(Node::leaf_counted(text[start..].to_string(), count));
    }
    out
}

impl Node {
    fn leaf_counted(text: String, chars: usize) -> Node {
        debug_assert_eq!(text.chars().count(), chars);
        Node::Leaf { text, chars }
    }

    pub(crate) fn from_text(text: &str) -> Node {
        Node::build_balanced(chunk(text))
    }

    /// Pairwise bottom-up construction; depth is `ceil(log2(leaves))`.
    pub(crate) fn build_balanced(mut level: Vec<Node>) -> Node {
        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            let mut iter = level.into_iter();
            while let Some(left) = iter.next() {
                match iter.next() {
                    Some(right) => next.push(Node::join(left, right)),
                    None => next.push(left),
                }
            }
            level = next;
        }
        level.pop().unwrap_or_default()
    }

    fn join(left: Node, right: Node) -> Node {
        let mut node = Node::Internal {
            left: Box::new(left),
            right: Box::new(right),
            weight: 0,
            len: 0,
            depth: 0,
            leaves: 0,
        };
        node.refresh();
        node
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Node::Leaf { chars, .. } => *chars,
            Node::Internal { len, .. } => *len,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { depth, .. } => *depth,
        }
    }

    pub(crate) fn leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { leaves, .. } => *leaves,
        }
    }

    /// Recompute cached metadata from the direct children.
    fn refresh(&mut self) {
        if let Node::Internal {
            left,
            right,
            weight,
            len,
            depth,
            leaves,
        } = self
        {
            *weight = left.len();
            *len = *weight + right.len();
            *depth = 1 + left.depth().max(right.depth());
            *leaves = left.leaves() + right.leaves();
        }
    }

    /// Splice `fragment` (holding `added` chars, non-empty) at char offset `at`.
    /// Caller guarantees `at <= self.len()`.
    pub(crate) fn insert(&mut self, at: usize, fragment: &str, added: usize) {
        let replacement = match self {
            Node::Leaf { text, chars } => {
                let split = byte_offset(text, at);
                if *chars + added <= LEAF_MAX {
                    text.insert_str(split, fragment);
                    *chars += added;
                    None
                } else {
                    let tail = text.split_off(split);
                    let head = std::mem::take(text);
                    let tail_chars = *chars - at;
                    let mut parts = Vec::with_capacity(added / LEAF_MAX + 3);
                    if !head.is_empty() {
                        parts.push(Node::leaf_counted(head, at));
                    }
                    parts.extend(chunk(fragment));
                    if !tail.is_empty() {
                        parts.push(Node::leaf_counted(tail, tail_chars));
                    }
                    Some(Node::build_balanced(parts))
                }
            }
            Node::Internal {
                left,
                right,
                weight,
                ..
            } => {
                if at <= *weight {
                    left.insert(at, fragment, added);
                } else {
                    right.insert(at - *weight, fragment, added);
                }
                None
            }
        };
        match replacement {
            Some(node) => *self = node,
            None => self.refresh(),
        }
    }

    /// Remove chars in `[start, end)`. Caller guarantees `start < end <= self.len()`.
    /// Children emptied by the removal are collapsed and two small sibling leaves
    /// are merged back into one.
    pub(crate) fn remove(&mut self, start: usize, end: usize) {
        let replacement = match self {
            Node::Leaf { text, chars } => {
                let from = byte_offset(text, start);
                let to = from + byte_offset(&text[from..], end - start);
                text.replace_range(from..to, "");
                *chars -= end - start;
                None
            }
            Node::Internal {
                left,
                right,
                weight,
                ..
            } => {
                let w = *weight;
                if start < w {
                    left.remove(start, end.min(w));
                }
                if end > w {
                    right.remove(start.saturating_sub(w), end - w);
                }
                if left.len() == 0 {
                    Some(std::mem::take(right.as_mut()))
                } else if right.len() == 0 {
                    Some(std::mem::take(left.as_mut()))
                } else {
                    merge_small_leaves(left, right)
                }
            }
        };
        match replacement {
            Some(node) => *self = node,
            None => self.refresh(),
        }
    }

    /// Append the chars in `[start, end)` to `out`, descending only into
    /// subtrees that overlap the range.
    pub(crate) fn collect_range(&self, start: usize, end: usize, out: &mut String) {
        if start >= end {
            return;
        }
        match self {
            Node::Leaf { text, .. } => {
                let from = byte_offset(text, start);
                let to = from + byte_offset(&text[from..], end - start);
                out.push_str(&text[from..to]);
            }
            Node::Internal {
                left,
                right,
                weight,
                ..
            } => {
                let w = *weight;
                if start < w {
                    left.collect_range(start, end.min(w), out);
                }
                if end > w {
                    right.collect_range(start.saturating_sub(w), end - w, out);
                }
            }
        }
    }

    /// Move every non-empty leaf into `out` in order, coalescing neighbours
    /// while the combined run still fits in one leaf.
    pub(crate) fn drain_leaves(self, out: &mut Vec<Node>) {
        match self {
            Node::Leaf { text, chars } => {
                if chars == 0 {
                    return;
                }
                if let Some(Node::Leaf {
                    text: prev,
                    chars: prev_chars,
                }) = out.last_mut()
                    && *prev_chars + chars <= LEAF_MAX
                {
                    prev.push_str(&text);
                    *prev_chars += chars;
                    return;
                }
                out.push(Node::Leaf { text, chars });
            }
            Node::Internal { left, right, .. } => {
                left.drain_leaves(out);
                right.drain_leaves(out);
            }
        }
    }

    /// Recompute all cached metadata from scratch and compare with what is
    /// stored. Returns the true `(len, depth, leaves)` on success.
    pub(crate) fn verify(&self, is_root: bool) -> Result<(usize, usize, usize), TextError> {
        match self {
            Node::Leaf { text, chars } => {
                let actual = text.chars().count();
                if actual != *chars {
                    return Err(TextError::Corrupt(format!(
                        "leaf caches {chars} chars but holds {actual}"
                    )));
                }
                if actual == 0 && !is_root {
                    return Err(TextError::Corrupt("empty leaf below root".into()));
                }
                Ok((actual, 0, 1))
            }
            Node::Internal {
                left,
                right,
                weight,
                len,
                depth,
                leaves,
            } => {
                let (l_len, l_depth, l_leaves) = left.verify(false)?;
                let (r_len, r_depth, r_leaves) = right.verify(false)?;
                if *weight != l_len {
                    return Err(TextError::Corrupt(format!(
                        "weight {weight} but left subtree holds {l_len} chars"
                    )));
                }
                let true_len = l_len + r_len;
                let true_depth = 1 + l_depth.max(r_depth);
                let true_leaves = l_leaves + r_leaves;
                if *len != true_len || *depth != true_depth || *leaves != true_leaves {
                    return Err(TextError::Corrupt(format!(
                        "cached (len {len}, depth {depth}, leaves {leaves}) != actual ({true_len}, {true_depth}, {true_leaves})"
                    )));
                }
                Ok((true_len, true_depth, true_leaves))
            }
        }
    }
}

fn merge_small_leaves(left: &mut Node, right: &mut Node) -> Option<Node> {
    match (left, right) {
        (
            Node::Leaf {
                text: l_text,
                chars: l_chars,
            },
            Node::Leaf {
                text: r_text,
                chars: r_chars,
            },
        ) if *l_chars + *r_chars <= LEAF_MAX => {
            let mut text = std::mem::take(l_text);
            text.push_str(r_text.as_str());
            Some(Node::leaf_counted(text, *l_chars + *r_chars))
        }
        _ => None,
    }
}

/// In-order iterator over leaf contents.
pub struct Chunks<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(root: &'a Node) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Leaf { text, .. } => {
                    if !text.is_empty() {
                        return Some(text.as_str());
                    }
                }
                Node::Internal { left, right, .. } => {
                    self.stack.push(right);
                    self.stack.push(left);
                }
            }
        }
        None
    }
}
