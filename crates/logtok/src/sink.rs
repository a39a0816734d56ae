use alloc::vec::Vec;

/// Bounded destination for token identifiers.
///
/// The scanner checks [`remaining`](IdSink::remaining) before every
/// [`push`](IdSink::push) and stops as soon as it reaches zero.
pub trait IdSink {
    /// Number of further identifiers the sink accepts.
    fn remaining(&self) -> usize;

    /// Appends one identifier. A push into a full sink is dropped.
    fn push(&mut self, id: u32);
}

/// Writes identifiers into a caller-owned slice, front to back.
///
/// The slice length is the capacity. Entries past [`len`](SliceSink::len)
/// are never written.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u32],
    len: usize,
}

impl<'a> SliceSink<'a> {
    /// Wraps `buf`; nothing is written until the first push.
    pub fn new(buf: &'a mut [u32]) -> Self {
        Self { buf, len: 0 }
    }

    /// Identifiers written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The written prefix of the slice.
    #[must_use]
    pub fn written(&self) -> &[u32] {
        &self.buf[..self.len]
    }
}

impl IdSink for SliceSink<'_> {
    #[inline]
    fn remaining(&self) -> usize {
        self.buf.len() - self.len
    }

    #[inline]
    fn push(&mut self, id: u32) {
        if let Some(slot) = self.buf.get_mut(self.len) {
            *slot = id;
            self.len += 1;
        }
    }
}

/// Appends identifiers to a `Vec`, accepting at most `limit` of them.
///
/// Existing contents of the vector are kept and do not count against the
/// limit, so one vector can collect several lines back to back.
#[derive(Debug)]
pub struct VecSink<'a> {
    vec: &'a mut Vec<u32>,
    limit: usize,
    pushed: usize,
}

impl<'a> VecSink<'a> {
    /// Appends to `vec`, stopping after `limit` identifiers.
    pub fn new(vec: &'a mut Vec<u32>, limit: usize) -> Self {
        Self {
            vec,
            limit,
            pushed: 0,
        }
    }

    /// Identifiers appended by this sink.
    #[must_use]
    pub fn pushed(&self) -> usize {
        self.pushed
    }
}

impl IdSink for VecSink<'_> {
    #[inline]
    fn remaining(&self) -> usize {
        self.limit - self.pushed
    }

    #[inline]
    fn push(&mut self, id: u32) {
        if self.pushed < self.limit {
            self.vec.push(id);
            self.pushed += 1;
        }
    }
}
