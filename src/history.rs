use crate::painting::PaintingRecord;

/// Linear viewing history. Fetching while stepped back discards whatever
/// lay ahead of the current position.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<PaintingRecord>,
    current_index: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PaintingRecord) -> &PaintingRecord {
        let keep = self.current_index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push(record);

        let index = self.entries.len() - 1;
        self.current_index = Some(index);
        &self.entries[index]
    }

    pub fn can_go_back(&self) -> bool {
        self.current_index.map_or(false, |i| i > 0)
    }

    /// True exactly when the first entry is showing.
    pub fn back_disabled(&self) -> bool {
        self.current_index == Some(0)
    }

    pub fn go_back(&mut self) -> Option<&PaintingRecord> {
        if self.can_go_back() {
            if let Some(ref mut current) = self.current_index {
                *current -= 1;
                return self.entries.get(*current);
            }
        }
        None
    }

    pub fn current(&self) -> Option<&PaintingRecord> {
        self.current_index.and_then(|i| self.entries.get(i))
    }

    pub fn position(&self) -> Option<usize> {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
