// src/text/lines.rs
//
// Ordered list of owned lines with a movable cursor. Nodes live in an arena
// (`Vec` + free list) and link to each other by index, so the cursor is a
// plain value and there are no aliasing pointers to keep in sync.

use super::string::{Str, StrBuf};

#[derive(Debug, Clone)]
struct Node {
    line: StrBuf,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    BeforeStart,
    At { node: usize, index: usize },
    AfterEnd,
}

#[derive(Debug, Clone)]
pub struct LineList {
    nodes: Vec<Node>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    cursor: Cursor,
}

impl LineList {
    pub fn new() -> Self {
        LineList {
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            cursor: Cursor::BeforeStart,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn has_current(&self) -> bool {
        matches!(self.cursor, Cursor::At { .. })
    }

    /// Index of the current line, if the cursor is on one.
    pub fn position(&self) -> Option<usize> {
        match self.cursor {
            Cursor::At { index, .. } => Some(index),
            _ => None,
        }
    }

    pub fn current(&self) -> Option<Str<'_>> {
        match self.cursor {
            Cursor::At { node, .. } => Some(self.nodes[node].line.view()),
            _ => None,
        }
    }

    pub fn current_mut(&mut self) -> Option<&mut StrBuf> {
        match self.cursor {
            Cursor::At { node, .. } => Some(&mut self.nodes[node].line),
            _ => None,
        }
    }

    pub fn to_start(&mut self) {
        self.cursor = Cursor::BeforeStart;
    }

    pub fn to_end(&mut self) {
        self.cursor = Cursor::AfterEnd;
    }

    /// Moves the cursor to `pos`; negative positions count from the end.
    /// Positions outside the list park the cursor before the start or after
    /// the end.
    pub fn seek(&mut self, pos: isize) {
        let len = self.len as isize;
        let pos = if pos < 0 { pos + len } else { pos };
        if pos < 0 {
            self.to_start();
        } else if pos >= len {
            self.to_end();
        } else {
            let pos = pos as usize;
            if let Some(node) = self.node_at(pos) {
                self.cursor = Cursor::At { node, index: pos };
            }
        }
    }

    // walks from whichever end is nearer
    fn node_at(&self, pos: usize) -> Option<usize> {
        if pos >= self.len {
            return None;
        }
        if pos <= self.len - pos {
            let mut node = self.head?;
            for _ in 0..pos {
                node = self.nodes[node].next?;
            }
            Some(node)
        } else {
            let mut node = self.tail?;
            for _ in 0..(self.len - 1 - pos) {
                node = self.nodes[node].prev?;
            }
            Some(node)
        }
    }

    /// Steps forward; returns whether the cursor now sits on a line.
    pub fn advance(&mut self) -> bool {
        self.cursor = match self.cursor {
            Cursor::BeforeStart => match self.head {
                Some(node) => Cursor::At { node, index: 0 },
                None => Cursor::AfterEnd,
            },
            Cursor::At { node, index } => match self.nodes[node].next {
                Some(next) => Cursor::At { node: next, index: index + 1 },
                None => Cursor::AfterEnd,
            },
            Cursor::AfterEnd => Cursor::AfterEnd,
        };
        self.has_current()
    }

    /// Steps backward; returns whether the cursor now sits on a line.
    pub fn retreat(&mut self) -> bool {
        self.cursor = match self.cursor {
            Cursor::AfterEnd => match self.tail {
                Some(node) => Cursor::At { node, index: self.len - 1 },
                None => Cursor::BeforeStart,
            },
            Cursor::At { node, index } => match self.nodes[node].prev {
                Some(prev) => Cursor::At { node: prev, index: index - 1 },
                None => Cursor::BeforeStart,
            },
            Cursor::BeforeStart => Cursor::BeforeStart,
        };
        self.has_current()
    }

    fn alloc(&mut self, line: StrBuf, prev: Option<usize>, next: Option<usize>) -> usize {
        let node = Node { line, prev, next };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    // links a new node between `prev` and `next` and moves the cursor to it
    fn link(&mut self, line: StrBuf, prev: Option<usize>, next: Option<usize>, index: usize) {
        let node = self.alloc(line, prev, next);
        match prev {
            Some(p) => self.nodes[p].next = Some(node),
            None => self.head = Some(node),
        }
        match next {
            Some(n) => self.nodes[n].prev = Some(node),
            None => self.tail = Some(node),
        }
        self.len += 1;
        self.cursor = Cursor::At { node, index };
    }

    /// Inserts a copy of `line` before the cursor (at the front when the
    /// cursor is before the start, at the back when it is past the end).
    pub fn insert_before(&mut self, line: Str<'_>) {
        self.push_before(line.to_buf());
    }

    /// Inserts a copy of `line` after the cursor (at the front when the
    /// cursor is before the start, at the back when it is past the end).
    pub fn insert_after(&mut self, line: Str<'_>) {
        self.push_after(line.to_buf());
    }

    /// Owned variant of `insert_before`; takes the line without copying.
    pub fn push_before(&mut self, line: StrBuf) {
        match self.cursor {
            Cursor::BeforeStart => self.link(line, None, self.head, 0),
            Cursor::At { node, index } => {
                let prev = self.nodes[node].prev;
                self.link(line, prev, Some(node), index);
            }
            Cursor::AfterEnd => self.link(line, self.tail, None, self.len),
        }
    }

    /// Owned variant of `insert_after`; takes the line without copying.
    pub fn push_after(&mut self, line: StrBuf) {
        match self.cursor {
            Cursor::BeforeStart => self.link(line, None, self.head, 0),
            Cursor::At { node, index } => {
                let next = self.nodes[node].next;
                self.link(line, Some(node), next, index + 1);
            }
            Cursor::AfterEnd => self.link(line, self.tail, None, self.len),
        }
    }

    /// Unlinks the current line and hands it back. The cursor moves to the
    /// following line, or past the end.
    pub fn remove(&mut self) -> Option<StrBuf> {
        let Cursor::At { node, index } = self.cursor else {
            return None;
        };
        let (prev, next) = (self.nodes[node].prev, self.nodes[node].next);
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
        let line = std::mem::take(&mut self.nodes[node].line);
        self.nodes[node].prev = None;
        self.nodes[node].next = None;
        self.free.push(node);
        self.len -= 1;
        self.cursor = match next {
            Some(n) => Cursor::At { node: n, index },
            None => Cursor::AfterEnd,
        };
        Some(line)
    }

    /// Copies up to `count` lines starting at the cursor into a new list and
    /// leaves the cursor just past the copied range.
    pub fn slice(&mut self, count: usize) -> LineList {
        let mut out = LineList::new();
        if self.cursor == Cursor::BeforeStart {
            self.advance();
        }
        for _ in 0..count {
            let Some(line) = self.current() else { break };
            out.insert_after(line);
            self.advance();
        }
        out
    }

    /// All lines concatenated with `separator` between them.
    pub fn join(&self, separator: Str<'_>) -> StrBuf {
        let mut out = StrBuf::new();
        for (i, line) in self.iter().enumerate() {
            if i > 0 {
                out.append(separator);
            }
            out.append(line);
        }
        out
    }

    /// Line at `index` without moving the cursor.
    pub fn get(&self, index: usize) -> Option<Str<'_>> {
        self.node_at(index).map(|node| self.nodes[node].line.view())
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { list: self, node: self.head }
    }

    /// Iterates from `index` to the end without moving the cursor.
    pub fn iter_from(&self, index: usize) -> Iter<'_> {
        Iter { list: self, node: self.node_at(index) }
    }
}

impl Default for LineList {
    fn default() -> Self {
        LineList::new()
    }
}

impl<'a> FromIterator<Str<'a>> for LineList {
    fn from_iter<I: IntoIterator<Item = Str<'a>>>(iter: I) -> Self {
        let mut list = LineList::new();
        list.to_end();
        for line in iter {
            list.insert_after(line);
        }
        list
    }
}

pub struct Iter<'a> {
    list: &'a LineList,
    node: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Str<'a>;

    fn next(&mut self) -> Option<Str<'a>> {
        let node = &self.list.nodes[self.node?];
        self.node = node.next;
        Some(node.line.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(lines: &[&str]) -> LineList {
        lines.iter().map(|l| Str::new(l)).collect()
    }

    fn contents(list: &LineList) -> Vec<String> {
        list.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_new_list_is_empty() {
        let mut l = LineList::new();
        assert!(l.is_empty());
        assert_eq!(l.len(), 0);
        assert!(!l.has_current());
        assert!(l.current().is_none());
        assert!(l.remove().is_none());
        assert!(!l.advance());
        assert!(!l.advance());
        assert!(!l.retreat());
    }

    #[test]
    fn test_cursor_walks_and_stops_at_the_ends() {
        let mut l = list(&["a", "b", "c"]);
        l.to_start();
        let mut seen = Vec::new();
        while l.advance() {
            seen.push(l.current().map(|s| s.to_string()).unwrap_or_default());
        }
        assert_eq!(seen, ["a", "b", "c"]);
        assert!(!l.advance());
        assert!(!l.has_current());
        assert!(l.retreat());
        assert_eq!(l.current().unwrap(), "c");
        assert_eq!(l.position(), Some(2));

        l.to_start();
        assert!(!l.retreat());
        assert!(!l.retreat());
        assert!(l.advance());
        assert_eq!(l.current().unwrap(), "a");
    }

    #[test]
    fn test_seek() {
        let mut l = list(&["a", "b", "c", "d", "e"]);
        l.seek(3);
        assert_eq!(l.current().unwrap(), "d");
        l.seek(1);
        assert_eq!(l.current().unwrap(), "b");
        l.seek(-1);
        assert_eq!(l.current().unwrap(), "e");
        assert_eq!(l.position(), Some(4));
        l.seek(-6);
        assert!(!l.has_current());
        assert!(l.advance());
        assert_eq!(l.current().unwrap(), "a");
        l.seek(5);
        assert!(!l.has_current());
        assert!(l.retreat());
        assert_eq!(l.current().unwrap(), "e");
    }

    #[test]
    fn test_inserted_line_becomes_current() {
        let mut l = LineList::new();
        l.insert_before(Str::new("b"));
        assert_eq!(l.current().unwrap(), "b");
        l.insert_before(Str::new("a"));
        assert_eq!(l.current().unwrap(), "a");
        l.insert_after(Str::new("a2"));
        assert_eq!(l.current().unwrap(), "a2");
        assert_eq!(l.position(), Some(1));
        l.to_end();
        l.insert_before(Str::new("z"));
        assert_eq!(l.current().unwrap(), "z");
        l.to_start();
        l.insert_after(Str::new("0"));
        assert_eq!(l.current().unwrap(), "0");
        assert_eq!(contents(&l), ["0", "a", "a2", "b", "z"]);
    }

    #[test]
    fn test_insert_copies_the_line() {
        let mut source = StrBuf::from("orig");
        let mut l = LineList::new();
        l.insert_after(source.view());
        source.append(Str::new("inal"));
        assert_eq!(l.current().unwrap(), "orig");
    }

    #[test]
    fn test_remove_moves_to_following_line() {
        let mut l = list(&["a", "b", "c"]);
        l.seek(1);
        assert_eq!(l.remove().unwrap(), "b");
        assert_eq!(l.current().unwrap(), "c");
        assert_eq!(l.position(), Some(1));
        assert_eq!(l.remove().unwrap(), "c");
        assert!(!l.has_current());
        assert!(!l.advance());
        assert_eq!(contents(&l), ["a"]);
        assert_eq!(l.len(), 1);
    }

    #[test]
    fn test_removed_slots_are_reused() {
        let mut l = list(&["a", "b"]);
        l.seek(0);
        l.remove();
        l.insert_before(Str::new("x"));
        assert_eq!(l.nodes.len(), 2);
        assert_eq!(contents(&l), ["x", "b"]);
    }

    #[test]
    fn test_slice_copies_and_advances() {
        let mut l = list(&["a", "b", "c", "d"]);
        l.seek(1);
        let part = l.slice(2);
        assert_eq!(contents(&part), ["b", "c"]);
        assert_eq!(l.current().unwrap(), "d");
        let rest = l.slice(10);
        assert_eq!(contents(&rest), ["d"]);
        assert!(!l.has_current());
        assert!(l.slice(3).is_empty());
        assert_eq!(contents(&l), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_join() {
        let sep = Str::new("\n");
        assert_eq!(list(&[]).join(sep), "");
        assert_eq!(list(&["só"]).join(sep), "só");
        assert_eq!(list(&["a", "", "b"]).join(sep), "a\n\nb");
    }

    #[test]
    fn test_get_and_iter_from_leave_cursor_alone() {
        let mut l = list(&["a", "b", "c"]);
        l.seek(0);
        assert_eq!(l.get(2).unwrap(), "c");
        assert!(l.get(3).is_none());
        let tail: Vec<String> = l.iter_from(1).map(|s| s.to_string()).collect();
        assert_eq!(tail, ["b", "c"]);
        assert_eq!(l.iter_from(7).count(), 0);
        assert_eq!(l.position(), Some(0));
    }
}
