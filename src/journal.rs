/// Ordered list of completed session durations, in seconds.
///
/// Entries are only ever appended or removed by index; insertion order is
/// display order and duplicates are fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Journal {
    entries: Vec<u64>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, seconds: u64) {
        self.entries.push(seconds);
    }

    /// Remove the entry at `index`, shifting later entries down by one.
    /// Out of range is a no-op and returns `None`.
    pub fn delete(&mut self, index: usize) -> Option<u64> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Sum of all entries, recomputed on every call.
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, secs| acc.saturating_add(*secs))
    }

    pub fn entries(&self) -> &[u64] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<u64> {
        self.entries.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<u64>> for Journal {
    fn from(entries: Vec<u64>) -> Self {
        Self { entries }
    }
}
