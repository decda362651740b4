// src/text/string.rs
//
// Character-indexed strings. `Str` is a borrowed view that can never outlive
// the bytes it points into; `StrBuf` owns its buffer and is the only type
// with mutating operations.
//
// Positions are character positions. A negative position counts from the
// end (-1 is the last character). Ranges that fall partly outside the
// string are clamped, never rejected.

use std::fmt;
use std::fs;
use std::path::Path;

use super::utf8::{self, Utf8Error};
use crate::error::Result;

/// Smallest buffer an owned string ever holds.
pub const MIN_ALLOC: usize = 8;

/// Clamps a single position to `0..=lim`.
fn clamp_pos(pos: isize, lim: usize) -> usize {
    let lim = lim as isize;
    let pos = if pos < 0 { pos + lim } else { pos };
    pos.clamp(0, lim) as usize
}

/// Clamps a `(pos, len)` range to a string of `lim` characters.
fn clamp_range(pos: isize, len: isize, lim: usize) -> (usize, usize) {
    let lim = lim as isize;
    let mut pos = pos;
    let mut len = len.max(0);
    if pos < 0 {
        pos += lim;
    }
    // still before the start: the overrun eats into the length
    if pos < 0 {
        len += pos;
        pos = 0;
    }
    if pos >= lim {
        pos = lim;
        len = 0;
    }
    if len > lim - pos {
        len = lim - pos;
    }
    (pos as usize, len.max(0) as usize)
}

#[derive(Clone, Copy, Default)]
pub struct Str<'a> {
    bytes: &'a [u8],
    chars: usize,
}

impl<'a> Str<'a> {
    /// Wraps `text` whose character count the caller already knows. O(1).
    pub fn from_parts(text: &'a str, chars: usize) -> Self {
        debug_assert_eq!(text.chars().count(), chars);
        Str { bytes: text.as_bytes(), chars }
    }

    pub fn new(text: &'a str) -> Self {
        Str { bytes: text.as_bytes(), chars: text.chars().count() }
    }

    /// Checked construction from raw bytes.
    pub fn try_from_bytes(bytes: &'a [u8]) -> std::result::Result<Self, Utf8Error> {
        let chars = utf8::count(bytes)?;
        Ok(Str { bytes, chars })
    }

    /// Like `try_from_bytes`, but malformed input yields an empty string.
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self::try_from_bytes(bytes).unwrap_or_default()
    }

    // bytes must be valid UTF-8 holding exactly `chars` characters
    fn raw(bytes: &'a [u8], chars: usize) -> Self {
        Str { bytes, chars }
    }

    pub fn len(&self) -> usize {
        self.chars
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn as_str(&self) -> &'a str {
        std::str::from_utf8(self.bytes).unwrap_or_default()
    }

    pub fn chars(&self) -> Chars<'a> {
        Chars { rest: self.bytes }
    }

    fn byte_offset(&self, pos: usize) -> usize {
        if pos >= self.chars {
            return self.bytes.len();
        }
        utf8::advance(self.bytes, pos)
    }

    /// Character at `pos`, or `None` when `pos` is outside the string.
    pub fn char_at(&self, pos: isize) -> Option<char> {
        let pos = if pos < 0 { pos + self.chars as isize } else { pos };
        if pos < 0 || pos as usize >= self.chars {
            return None;
        }
        let start = self.byte_offset(pos as usize);
        utf8::decode(&self.bytes[start..]).ok().map(|(ch, _)| ch)
    }

    /// View of `len` characters starting at `pos`, clamped to the string.
    pub fn slice(&self, pos: isize, len: isize) -> Str<'a> {
        let (pos, len) = clamp_range(pos, len, self.chars);
        if len == 0 {
            return Str::default();
        }
        let start = self.byte_offset(pos);
        let end = start + utf8::advance(&self.bytes[start..], len);
        Str::raw(&self.bytes[start..end], len)
    }

    fn tail(&self, pos: usize) -> Str<'a> {
        self.slice(pos as isize, self.chars as isize)
    }

    pub fn contains_char(&self, ch: char) -> bool {
        self.chars().any(|c| c == ch)
    }

    fn scan_forward(&self, pos: isize, set: Str<'_>, in_set: bool) -> Option<usize> {
        let pos = clamp_pos(pos, self.chars);
        if set.is_empty() {
            return Some(pos);
        }
        self.tail(pos)
            .chars()
            .position(|c| set.contains_char(c) == in_set)
            .map(|i| i + pos)
    }

    fn scan_backward(&self, pos: isize, set: Str<'_>, in_set: bool) -> Option<usize> {
        let pos = clamp_pos(pos, self.chars);
        if set.is_empty() {
            return Some(pos);
        }
        if self.is_empty() {
            return None;
        }
        let last = pos.min(self.chars - 1);
        self.slice(0, last as isize + 1)
            .chars()
            .enumerate()
            .filter(|&(_, c)| set.contains_char(c) == in_set)
            .map(|(i, _)| i)
            .last()
    }

    /// First position at or after `pos` holding a character from `set`.
    pub fn find_any(&self, pos: isize, set: Str<'_>) -> Option<usize> {
        self.scan_forward(pos, set, true)
    }

    /// First position at or after `pos` holding a character not in `set`.
    pub fn find_not_any(&self, pos: isize, set: Str<'_>) -> Option<usize> {
        self.scan_forward(pos, set, false)
    }

    /// Last position at or before `pos` holding a character from `set`.
    pub fn rfind_any(&self, pos: isize, set: Str<'_>) -> Option<usize> {
        self.scan_backward(pos, set, true)
    }

    /// Last position at or before `pos` holding a character not in `set`.
    pub fn rfind_not_any(&self, pos: isize, set: Str<'_>) -> Option<usize> {
        self.scan_backward(pos, set, false)
    }

    /// First position at or after `pos` where `needle` occurs. The empty
    /// needle matches at the clamped `pos`.
    pub fn find(&self, pos: isize, needle: Str<'_>) -> Option<usize> {
        let pos = clamp_pos(pos, self.chars);
        if needle.is_empty() {
            return Some(pos);
        }
        let start = self.byte_offset(pos);
        let haystack = &self.bytes[start..];
        let found = haystack
            .windows(needle.byte_len())
            .position(|w| w == needle.as_bytes())?;
        // a match of valid UTF-8 always begins on a character boundary
        utf8::count(&haystack[..found]).ok().map(|n| pos + n)
    }

    /// View without leading and trailing characters from `set`.
    pub fn trim(&self, set: Str<'_>) -> Str<'a> {
        let Some(first) = self.find_not_any(0, set) else {
            return Str::default();
        };
        let last = self.rfind_not_any(-1, set).unwrap_or(first);
        self.slice(first as isize, (last - first + 1) as isize)
    }

    /// Pieces of the string between characters from `separators`. A
    /// separator at the very end does not produce a trailing empty piece.
    pub fn split(&self, separators: Str<'_>) -> Vec<Str<'a>> {
        let mut pieces = Vec::new();
        // byte offset and character count of the piece being collected
        let mut start = 0;
        let mut chars = 0;
        let mut offset = 0;
        for ch in self.chars() {
            let next = offset + ch.len_utf8();
            if separators.contains_char(ch) {
                pieces.push(Str::raw(&self.bytes[start..offset], chars));
                start = next;
                chars = 0;
            } else {
                chars += 1;
            }
            offset = next;
        }
        if start < self.bytes.len() {
            pieces.push(Str::raw(&self.bytes[start..], chars));
        }
        pieces
    }

    pub fn to_buf(&self) -> StrBuf {
        StrBuf::copy(*self)
    }

    pub fn try_write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.bytes)?;
        Ok(())
    }

    /// Writes the string to `path`; a failed write is logged and dropped.
    pub fn write_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match self.try_write_file(path) {
            Ok(()) => tracing::info!(path = %path.display(), bytes = self.byte_len(), "wrote file"),
            Err(err) => tracing::warn!(path = %path.display(), "write failed: {}", err),
        }
    }
}

impl<'a> From<&'a str> for Str<'a> {
    fn from(text: &'a str) -> Self {
        Str::new(text)
    }
}

impl PartialEq for Str<'_> {
    fn eq(&self, other: &Str<'_>) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Str<'_> {}

impl PartialEq<&str> for Str<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl fmt::Display for Str<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Str<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

pub struct Chars<'a> {
    rest: &'a [u8],
}

impl Iterator for Chars<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let (ch, len) = utf8::decode(self.rest).ok()?;
        self.rest = &self.rest[len..];
        Some(ch)
    }
}

/// Owned, growable string.
///
/// The buffer size is a power of two, at least `MIN_ALLOC`, always larger
/// than the content (a zero byte follows the last character) and never more
/// than three times what the content needs once it outgrows the minimum.
#[derive(Clone)]
pub struct StrBuf {
    chars: usize,
    len: usize,
    mem: Box<[u8]>,
}

impl StrBuf {
    pub fn new() -> Self {
        let mut buf = StrBuf { chars: 0, len: 0, mem: Box::default() };
        buf.realloc(0);
        buf
    }

    pub fn copy(src: Str<'_>) -> Self {
        let mut buf = StrBuf { chars: 0, len: 0, mem: Box::default() };
        buf.realloc(src.byte_len());
        buf.mem[..src.byte_len()].copy_from_slice(src.as_bytes());
        buf.len = src.byte_len();
        buf.chars = src.len();
        buf.mem[buf.len] = 0;
        buf
    }

    pub fn view(&self) -> Str<'_> {
        Str::raw(&self.mem[..self.len], self.chars)
    }

    pub fn len(&self) -> usize {
        self.chars
    }

    pub fn byte_len(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.mem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }

    // grows by doubling, shrinks by halving while the buffer is more than
    // three times the requirement
    fn realloc(&mut self, required: usize) {
        let mut cap = self.mem.len().max(MIN_ALLOC);
        while cap <= required {
            cap *= 2;
        }
        while cap > MIN_ALLOC && cap > 3 * required {
            cap /= 2;
        }
        if cap != self.mem.len() {
            let mut mem = vec![0u8; cap].into_boxed_slice();
            let keep = self.len.min(cap - 1);
            mem[..keep].copy_from_slice(&self.mem[..keep]);
            self.mem = mem;
        }
    }

    fn byte_offset(&self, pos: usize) -> usize {
        self.view().byte_offset(pos)
    }

    pub fn insert(&mut self, pos: isize, other: Str<'_>) {
        let pos = clamp_pos(pos, self.chars);
        let n = other.byte_len();
        self.realloc(self.len + n);
        let at = self.byte_offset(pos);
        self.mem.copy_within(at..self.len, at + n);
        self.mem[at..at + n].copy_from_slice(other.as_bytes());
        self.len += n;
        self.chars += other.len();
        self.mem[self.len] = 0;
    }

    pub fn append(&mut self, other: Str<'_>) {
        self.insert(self.chars as isize, other);
    }

    pub fn remove_range(&mut self, pos: isize, len: isize) {
        let (pos, count) = clamp_range(pos, len, self.chars);
        let start = self.byte_offset(pos);
        let end = start + utf8::advance(&self.mem[start..self.len], count);
        self.mem.copy_within(end..self.len, start);
        self.len -= end - start;
        self.chars -= count;
        self.mem[self.len] = 0;
        self.realloc(self.len);
    }

    /// Appends copies of `filler` until the string holds `target` characters.
    pub fn pad_to(&mut self, target: usize, filler: Str<'_>) {
        if filler.is_empty() {
            return;
        }
        while self.chars < target {
            let missing = (target - self.chars) as isize;
            self.append(filler.slice(0, missing));
        }
    }

    /// Replaces `len` characters at `pos` with `with`. When `pos` lies
    /// outside the string, copies of `filler` bridge the gap first.
    pub fn replace_range(&mut self, pos: isize, len: isize, with: Str<'_>, filler: Str<'_>) {
        let mut pos = if pos < 0 { pos + self.chars as isize } else { pos };
        let mut len = len.max(0);

        if pos.saturating_add(len) < 0 {
            self.replace_before_start(pos, len, with, filler);
            return;
        }
        if pos < 0 {
            len += pos;
            pos = 0;
        }

        let chars = self.chars as isize;
        if pos > chars {
            self.pad_to(pos as usize, filler);
            self.append(with);
        } else if len >= chars - pos {
            self.remove_range(pos, chars - pos);
            self.append(with);
        } else {
            self.remove_range(pos, len);
            self.insert(pos, with);
        }
    }

    // the whole replaced range lies before the first character
    fn replace_before_start(&mut self, pos: isize, len: isize, with: Str<'_>, filler: Str<'_>) {
        self.insert(0, with);
        if filler.is_empty() {
            return;
        }
        let mut at = with.len() as isize;
        // the filler would have started at `pos`; skip what `len` replaced
        let mut fill_from = len % filler.len() as isize;
        let mut missing = (pos + len).saturating_neg();
        while missing > 0 {
            let piece = filler.slice(fill_from, missing);
            self.insert(at, piece);
            missing -= piece.len() as isize;
            at += piece.len() as isize;
            fill_from = 0;
        }
    }

    pub fn try_read_file(path: impl AsRef<Path>) -> Result<StrBuf> {
        let bytes = fs::read(path)?;
        let text = Str::try_from_bytes(&bytes)?;
        Ok(StrBuf::copy(text))
    }

    /// Reads the whole file at `path`. Missing, unreadable or malformed
    /// files yield an empty string.
    pub fn read_file(path: impl AsRef<Path>) -> StrBuf {
        let path = path.as_ref();
        match Self::try_read_file(path) {
            Ok(buf) => {
                tracing::info!(path = %path.display(), bytes = buf.byte_len(), "read file");
                buf
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "read failed, starting empty: {}", err);
                StrBuf::new()
            }
        }
    }

    #[cfg(test)]
    fn check(&self) {
        assert!(self.len >= self.chars);
        assert!(self.capacity() >= MIN_ALLOC);
        assert!(self.capacity().is_power_of_two());
        assert!(self.capacity() > self.len);
        assert!(self.capacity() < 4 * MIN_ALLOC.max(self.len + 1));
        assert_eq!(self.mem[self.len], 0);
        assert_eq!(utf8::count(&self.mem[..self.len]), Ok(self.chars));
    }
}

impl Default for StrBuf {
    fn default() -> Self {
        StrBuf::new()
    }
}

impl From<Str<'_>> for StrBuf {
    fn from(s: Str<'_>) -> Self {
        StrBuf::copy(s)
    }
}

impl From<&str> for StrBuf {
    fn from(s: &str) -> Self {
        StrBuf::copy(Str::new(s))
    }
}

impl PartialEq for StrBuf {
    fn eq(&self, other: &StrBuf) -> bool {
        self.view() == other.view()
    }
}

impl Eq for StrBuf {}

impl PartialEq<&str> for StrBuf {
    fn eq(&self, other: &&str) -> bool {
        self.view() == *other
    }
}

impl fmt::Display for StrBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}

impl fmt::Debug for StrBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.view(), f)
    }
}
