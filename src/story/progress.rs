/// Largest value a tracker can hold.
pub const PROGRESS_COMPLETE: u8 = 100;

/// One 0..=100 progress value per slide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressBank {
    values: Vec<u8>,
}

impl ProgressBank {
    pub fn new(slide_count: usize) -> Self {
        Self {
            values: vec![0; slide_count],
        }
    }

    pub fn get(&self, index: usize) -> u8 {
        self.values.get(index).copied().unwrap_or(0)
    }

    /// Out-of-range indices are ignored; values above 100 are clamped.
    pub fn set(&mut self, index: usize, value: u8) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value.min(PROGRESS_COMPLETE);
        }
    }

    pub fn reset(&mut self, index: usize) {
        self.set(index, 0);
    }

    /// Mark everything before `active` as viewed and everything after as
    /// unseen. The active tracker itself is left alone.
    pub fn activate(&mut self, active: usize) {
        for (index, slot) in self.values.iter_mut().enumerate() {
            if index < active {
                *slot = PROGRESS_COMPLETE;
            } else if index > active {
                *slot = 0;
            }
        }
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }
}
