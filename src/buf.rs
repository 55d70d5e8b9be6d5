//! The mutable byte-string buffer.

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ptr;

use crate::alloc::{Allocator, DefaultAllocator};
use crate::error::{MutBufError, Result, Status};
use crate::render;
use crate::search;

/// Initial capacity for buffers created with [`MutBuf::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// A growable, exclusively owned byte-string buffer.
///
/// The storage keeps one reserved slot after the content for a zero
/// terminator, so `capacity >= len + 1` and `storage[len] == 0` hold
/// after every operation, including failed ones. Any mutating operation
/// may relocate the storage; pointers into the content are not stable.
///
/// Not safe for concurrent mutation without external synchronization;
/// `&mut self` on all mutators makes that a compile-time rule within
/// one process.
pub struct MutBuf<A: Allocator = DefaultAllocator> {
    storage: Box<[u8]>,
    len: usize,
    status: Status,
    alloc: A,
}

impl MutBuf<DefaultAllocator> {
    /// Creates a buffer with the default initial capacity.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if the initial block cannot be
    /// obtained.
    pub fn new() -> Result<Self> {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a buffer with the given initial capacity.
    ///
    /// The capacity includes the reserved terminator slot and must be
    /// at least 1.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if `capacity` is 0 or the block
    /// cannot be obtained.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_in(capacity, DefaultAllocator)
    }
}

impl<A: Allocator> MutBuf<A> {
    /// Creates a buffer with the default initial capacity, drawing
    /// storage from `alloc`.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if the initial block cannot be
    /// obtained.
    pub fn new_in(alloc: A) -> Result<Self> {
        Self::with_capacity_in(DEFAULT_CAPACITY, alloc)
    }

    /// Creates a buffer with the given initial capacity, drawing
    /// storage from `alloc`.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if `capacity` is 0 or the block
    /// cannot be obtained.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self> {
        if capacity == 0 {
            return Err(MutBufError::AllocationFailure { requested: 0 });
        }
        let Some(storage) = alloc.allocate(capacity) else {
            return Err(MutBufError::AllocationFailure {
                requested: capacity,
            });
        };
        Ok(MutBuf {
            storage,
            len: 0,
            status: Status::Ok,
            alloc,
        })
    }

    /// The buffer content, terminator excluded.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// The buffer content plus the trailing zero terminator, for
    /// consumers that expect terminated text.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.storage[..=self.len]
    }

    /// Count of logically used bytes, excluding the terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the buffer holds no content bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total allocated bytes, including the terminator slot.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Result of the most recent mutating operation.
    #[must_use]
    pub fn last_status(&self) -> Status {
        self.status
    }

    /// The allocation strategy this buffer draws from.
    #[must_use]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    fn fail_alloc(&mut self, requested: usize) -> MutBufError {
        self.status = Status::AllocationFailure;
        MutBufError::AllocationFailure { requested }
    }

    fn fail_range(&mut self) -> MutBufError {
        self.status = Status::OutOfRange;
        MutBufError::OutOfRange
    }

    /// Guarantees room for `required_len` content bytes plus the
    /// terminator.
    ///
    /// Grows to `max(capacity * 2, required_len + 1)` when the current
    /// block is too small; doubling keeps total copy work across N
    /// appends O(N). Content is never affected.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if a larger block is needed and
    /// cannot be obtained; the buffer is left exactly as it was.
    pub fn ensure_capacity(&mut self, required_len: usize) -> Result<()> {
        let Some(required) = required_len.checked_add(1) else {
            return Err(self.fail_alloc(usize::MAX));
        };
        if required > self.capacity() {
            let new_cap = required.max(self.capacity().saturating_mul(2));
            self.set_capacity(new_cap)?;
        }
        self.status = Status::Ok;
        Ok(())
    }

    /// Resizes the storage to exactly `new_cap` bytes.
    ///
    /// This is the single reallocation path every growth goes through.
    /// CAUTION: shrinking below `len + 1` TRUNCATES the content. `len`
    /// is clamped to `new_cap - 1` and the terminator rewritten there;
    /// callers that shrink must account for the dropped bytes.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if `new_cap` is 0 or the block
    /// cannot be obtained. On failure the storage, length, and capacity
    /// are left exactly as they were.
    pub fn set_capacity(&mut self, new_cap: usize) -> Result<()> {
        if new_cap == 0 {
            return Err(self.fail_alloc(0));
        }

        let old_cap = self.capacity();
        let block = mem::take(&mut self.storage);
        match self.alloc.reallocate(block, new_cap) {
            Ok(block) => {
                self.storage = block;
                if new_cap > old_cap {
                    log::trace!("grow storage: {old_cap} -> {new_cap} bytes");
                }
                if new_cap <= self.len {
                    log::debug!(
                        "shrink to {new_cap} truncates {} content bytes",
                        self.len - (new_cap - 1)
                    );
                    self.len = new_cap - 1;
                }
                self.storage[self.len] = 0;
                self.status = Status::Ok;
                Ok(())
            }
            Err(block) => {
                self.storage = block;
                Err(self.fail_alloc(new_cap))
            }
        }
    }

    /// Sets the logical length.
    ///
    /// Growing zero-fills the newly exposed bytes; shrinking truncates
    /// without touching the bytes past the new length. The terminator
    /// is rewritten at `new_len`.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if growth is needed and fails;
    /// the content is unchanged.
    pub fn set_len(&mut self, new_len: usize) -> Result<()> {
        self.ensure_capacity(new_len)?;
        if new_len > self.len {
            self.storage[self.len..new_len].fill(0);
        }
        self.len = new_len;
        self.storage[new_len] = 0;
        self.status = Status::Ok;
        Ok(())
    }

    /// Truncates to the empty string, keeping the capacity.
    pub fn clear(&mut self) {
        self.len = 0;
        self.storage[0] = 0;
        self.status = Status::Ok;
    }

    /// Appends `data` to the end of the buffer.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if growth fails; the content is
    /// unchanged.
    pub fn push_bytes(&mut self, data: &[u8]) -> Result<()> {
        let Some(new_len) = self.len.checked_add(data.len()) else {
            return Err(self.fail_alloc(usize::MAX));
        };
        self.ensure_capacity(new_len)?;
        self.storage[self.len..new_len].copy_from_slice(data);
        self.len = new_len;
        self.storage[new_len] = 0;
        self.status = Status::Ok;
        Ok(())
    }

    /// Appends a single byte.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if growth fails.
    pub fn push_byte(&mut self, byte: u8) -> Result<()> {
        self.ensure_capacity(self.len + 1)?;
        self.storage[self.len] = byte;
        self.len += 1;
        self.storage[self.len] = 0;
        self.status = Status::Ok;
        Ok(())
    }

    /// Appends a string slice.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if growth fails.
    pub fn push_str(&mut self, s: &str) -> Result<()> {
        self.push_bytes(s.as_bytes())
    }

    /// Appends the content of another buffer.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if growth fails.
    pub fn append<B: Allocator>(&mut self, other: &MutBuf<B>) -> Result<()> {
        self.push_bytes(other.as_bytes())
    }

    /// Appends formatted text.
    ///
    /// The required width is measured first with a zero-write probe,
    /// capacity is ensured once, then the text is rendered directly
    /// into the reserved tail. Nothing is appended on failure.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if growth fails;
    /// `MutBufError::OutOfRange` if a formatting implementation reports
    /// an error of its own.
    pub fn push_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        let mut probe = ProbeWriter { written: 0 };
        if fmt::Write::write_fmt(&mut probe, args).is_err() {
            return Err(self.fail_range());
        }

        let Some(new_len) = self.len.checked_add(probe.written) else {
            return Err(self.fail_alloc(usize::MAX));
        };
        self.ensure_capacity(new_len)?;

        let mut tail = TailWriter {
            target: &mut self.storage[self.len..new_len],
            written: 0,
        };
        if fmt::Write::write_fmt(&mut tail, args).is_err() || tail.written != probe.written {
            // restore the terminator over any partial render
            self.storage[self.len] = 0;
            return Err(self.fail_range());
        }
        self.len = new_len;
        self.storage[new_len] = 0;
        self.status = Status::Ok;
        Ok(())
    }

    /// Appends a signed integer in decimal.
    ///
    /// Single-digit values take a direct digit-to-ASCII path; larger
    /// magnitudes render through a fixed worst-case-width buffer.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if growth fails.
    pub fn push_i64(&mut self, value: i64) -> Result<()> {
        if (0..=9).contains(&value) {
            return self.push_byte(b'0' + value as u8);
        }
        let mut digits = [0u8; render::I64_WIDTH];
        self.push_bytes(render::render_i64(&mut digits, value))
    }

    /// Appends an unsigned integer in decimal.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if growth fails.
    pub fn push_u64(&mut self, value: u64) -> Result<()> {
        if value <= 9 {
            return self.push_byte(b'0' + value as u8);
        }
        let mut digits = [0u8; render::U64_WIDTH];
        self.push_bytes(render::render_u64(&mut digits, value))
    }

    /// Appends a float in fixed-point notation with `decimals` digits
    /// after the separator.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if growth fails.
    pub fn push_f64(&mut self, value: f64, decimals: usize) -> Result<()> {
        self.push_fmt(format_args!("{value:.decimals$}"))
    }

    /// Repeats the current content so it occurs `times` times in total.
    ///
    /// `times == 0` empties the buffer. The duplication block-copies
    /// from the original fragment only, never from the partially
    /// written output.
    ///
    /// # Errors
    ///
    /// `MutBufError::OutOfRange` if `times` is negative or the result
    /// length overflows; `MutBufError::AllocationFailure` if growth
    /// fails. The content is unchanged on any error.
    pub fn repeat(&mut self, times: isize) -> Result<()> {
        if times < 0 {
            return Err(self.fail_range());
        }
        if times == 0 || self.len == 0 {
            self.clear();
            return Ok(());
        }

        let fragment = self.len;
        let Some(new_len) = fragment.checked_mul(times.unsigned_abs()) else {
            return Err(self.fail_range());
        };
        self.ensure_capacity(new_len)?;

        if fragment == 1 {
            let byte = self.storage[0];
            self.storage[..new_len].fill(byte);
        } else {
            let mut dst = fragment;
            while dst < new_len {
                self.storage.copy_within(..fragment, dst);
                dst += fragment;
            }
        }
        self.len = new_len;
        self.storage[new_len] = 0;
        self.status = Status::Ok;
        Ok(())
    }

    /// Removes leading and trailing ASCII whitespace in place.
    ///
    /// An all-whitespace buffer becomes empty. Surviving bytes are
    /// shifted to the front with an overlap-tolerant move.
    pub fn trim(&mut self) {
        self.trim_sides(true, true);
    }

    /// Removes leading ASCII whitespace only.
    pub fn trim_start(&mut self) {
        self.trim_sides(true, false);
    }

    /// Removes trailing ASCII whitespace only.
    pub fn trim_end(&mut self) {
        self.trim_sides(false, true);
    }

    fn trim_sides(&mut self, start: bool, end: bool) {
        let content = &self.storage[..self.len];
        let mut from = 0;
        let mut to = self.len;
        if start {
            while from < to && content[from].is_ascii_whitespace() {
                from += 1;
            }
        }
        if end {
            while to > from && content[to - 1].is_ascii_whitespace() {
                to -= 1;
            }
        }

        let new_len = to - from;
        if from > 0 && new_len > 0 {
            self.storage.copy_within(from..to, 0);
        }
        self.len = new_len;
        self.storage[new_len] = 0;
        self.status = Status::Ok;
    }

    /// Uppercases the content byte-wise. ASCII only, not locale aware;
    /// bytes outside `a-z` are untouched.
    pub fn make_ascii_uppercase(&mut self) {
        self.storage[..self.len].make_ascii_uppercase();
        self.status = Status::Ok;
    }

    /// Lowercases the content byte-wise. ASCII only, not locale aware;
    /// bytes outside `A-Z` are untouched.
    pub fn make_ascii_lowercase(&mut self) {
        self.storage[..self.len].make_ascii_lowercase();
        self.status = Status::Ok;
    }

    /// Replaces every occurrence of `search` with `replace`, scanning
    /// left to right. Returns the number of replacements.
    pub fn replace_byte(&mut self, search: u8, replace: u8) -> usize {
        let mut count = 0;
        for byte in &mut self.storage[..self.len] {
            if *byte == search {
                *byte = replace;
                count += 1;
            }
        }
        self.status = Status::Ok;
        count
    }

    /// Position of the first occurrence of `needle`, if any.
    ///
    /// The empty needle matches at position 0.
    #[must_use]
    pub fn index_of(&self, needle: &[u8]) -> Option<usize> {
        search::find(self.as_bytes(), needle)
    }

    /// True if the content contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &[u8]) -> bool {
        self.index_of(needle).is_some()
    }

    /// True if the content begins with `prefix`. Length-bounded direct
    /// comparison, no scan.
    #[must_use]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.as_bytes().starts_with(prefix)
    }

    /// True if the content ends with `suffix`. Length-bounded direct
    /// comparison, no scan.
    #[must_use]
    pub fn ends_with(&self, suffix: &[u8]) -> bool {
        self.as_bytes().ends_with(suffix)
    }

    /// Orders two buffers byte-wise lexicographically over the common
    /// prefix, ties broken by length (shorter is less). The same
    /// instance compares equal to itself without scanning.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        if ptr::eq(self, other) {
            return Ordering::Equal;
        }
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl<A: Allocator + Clone> MutBuf<A> {
    /// Deep-copies the content into a fresh, independently owned buffer
    /// with exact-fit capacity, drawn from the same strategy.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if the strategy refuses the
    /// block.
    pub fn try_clone(&self) -> Result<Self> {
        Self::from_fragment(self.as_bytes(), self.alloc.clone())
    }

    /// Extracts `length` bytes starting at `index` into a fresh buffer.
    ///
    /// `length` is clamped to the available tail.
    ///
    /// # Errors
    ///
    /// `MutBufError::OutOfRange` if `index` is not inside the content;
    /// `MutBufError::AllocationFailure` if the piece cannot be
    /// allocated.
    pub fn substring(&self, index: usize, length: usize) -> Result<Self> {
        if index >= self.len {
            return Err(MutBufError::OutOfRange);
        }
        let end = index.saturating_add(length).min(self.len);
        Self::from_fragment(&self.storage[index..end], self.alloc.clone())
    }

    /// Splits on `separator` into at most `max_pieces` freshly owned
    /// buffers, each with exact-fit capacity.
    ///
    /// The separator search stops once `max_pieces - 1` pieces exist,
    /// so the final piece absorbs the rest of the content, separators
    /// included. An empty source or `max_pieces == 0` yields no pieces;
    /// a trailing separator yields a trailing empty piece. An empty
    /// separator matches before every byte, so it produces empty pieces
    /// until the limit bounds the run.
    ///
    /// # Errors
    ///
    /// `MutBufError::AllocationFailure` if a piece cannot be allocated.
    pub fn split(&self, max_pieces: usize, separator: &[u8]) -> Result<Vec<Self>> {
        let mut pieces = Vec::new();
        if self.is_empty() || max_pieces == 0 {
            return Ok(pieces);
        }

        let content = self.as_bytes();
        let mut from = 0;
        while pieces.len() + 1 < max_pieces {
            let Some(at) = search::find(&content[from..], separator) else {
                break;
            };
            pieces.push(Self::from_fragment(
                &content[from..from + at],
                self.alloc.clone(),
            )?);
            from += at + separator.len();
        }
        pieces.push(Self::from_fragment(&content[from..], self.alloc.clone())?);
        Ok(pieces)
    }

    fn from_fragment(fragment: &[u8], alloc: A) -> Result<Self> {
        let mut piece = Self::with_capacity_in(fragment.len() + 1, alloc)?;
        piece.push_bytes(fragment)?;
        Ok(piece)
    }
}

impl<A: Allocator> PartialEq for MutBuf<A> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other) || self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator> Eq for MutBuf<A> {}

impl<A: Allocator> PartialOrd for MutBuf<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A: Allocator> Ord for MutBuf<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl<A: Allocator> fmt::Write for MutBuf<A> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.as_bytes()).map_err(|_| fmt::Error)
    }
}

impl<A: Allocator> fmt::Display for MutBuf<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&String::from_utf8_lossy(self.as_bytes()), f)
    }
}

impl<A: Allocator> fmt::Debug for MutBuf<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MutBuf {{ len: {}, capacity: {}, status: {:?}, content: {:?} }}",
            self.len,
            self.capacity(),
            self.status,
            String::from_utf8_lossy(self.as_bytes()),
        )
    }
}

/// Zero-write probe measuring the rendered width of format arguments.
struct ProbeWriter {
    written: usize,
}

impl fmt::Write for ProbeWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.written += s.len();
        Ok(())
    }
}

/// Renders format arguments directly into a reserved storage tail.
struct TailWriter<'a> {
    target: &'a mut [u8],
    written: usize,
}

impl fmt::Write for TailWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let end = self.written + bytes.len();
        if end > self.target.len() {
            return Err(fmt::Error);
        }
        self.target[self.written..end].copy_from_slice(bytes);
        self.written = end;
        Ok(())
    }
}
