/// Fixed-capacity FIFO series backed by a ring buffer.
///
/// Pushing beyond capacity evicts the oldest entry. `snapshot` returns a fresh
/// ordered copy (oldest first) so callers can iterate while the series keeps
/// mutating.
#[derive(Debug, Clone)]
pub struct BoundedSeries<T> {
    buffer: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T: Clone> BoundedSeries<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "series capacity must be > 0");
        Self {
            buffer: vec![None; capacity],
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append to the tail, evicting the head once full.
    pub fn push(&mut self, item: T) {
        let cap = self.buffer.len();
        if self.len < cap {
            let tail = (self.head + self.len) % cap;
            self.buffer[tail] = Some(item);
            self.len += 1;
        } else {
            self.buffer[self.head] = Some(item);
            self.head = (self.head + 1) % cap;
        }
    }

    pub fn last(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        let idx = (self.head + self.len - 1) % self.buffer.len();
        self.buffer[idx].as_ref()
    }

    /// Ordered copy of the current contents, oldest to newest.
    pub fn snapshot(&self) -> Vec<T> {
        let cap = self.buffer.len();
        (0..self.len)
            .filter_map(|i| self.buffer[(self.head + i) % cap].clone())
            .collect()
    }
}
