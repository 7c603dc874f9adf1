use image::RgbImage;

/// Undo/redo history made of full bitmap snapshots
#[derive(Debug, Clone)]
pub struct History {
    /// Snapshots that can be restored by undo, most recent last
    undo_stack: Vec<RgbImage>,
    /// Snapshots that can be restored by redo, most recent last
    redo_stack: Vec<RgbImage>,
    /// Oldest snapshots are dropped past this depth
    max_steps: usize,
}

impl History {
    /// Creates an empty history keeping at most `max_steps` undo snapshots
    pub fn new(max_steps: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_steps: max_steps.max(1),
        }
    }

    /// Record the state before a mutation. Clears the redo stack.
    pub fn record(&mut self, snapshot: RgbImage) {
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > self.max_steps {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Swap `current` for the most recent undo snapshot.
    ///
    /// Returns false and leaves `current` alone when there is nothing to undo.
    pub fn undo(&mut self, current: &mut RgbImage) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        let newer = std::mem::replace(current, previous);
        self.redo_stack.push(newer);
        log::debug!(
            "undo: {} undo / {} redo snapshots left",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        true
    }

    /// Swap `current` for the most recent redo snapshot.
    ///
    /// Returns false and leaves `current` alone when there is nothing to redo.
    pub fn redo(&mut self, current: &mut RgbImage) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let older = std::mem::replace(current, next);
        self.undo_stack.push(older);
        log::debug!(
            "redo: {} undo / {} redo snapshots left",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        true
    }

    /// Returns true if there are snapshots that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are snapshots that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn filled(value: u8) -> RgbImage {
        RgbImage::from_pixel(2, 2, Rgb([value, value, value]))
    }

    #[test]
    fn test_undo_redo_swaps_snapshots() {
        let mut history = History::new(10);
        let mut current = filled(1);

        history.record(current.clone());
        current = filled(2);

        assert!(history.undo(&mut current));
        assert_eq!(current, filled(1));
        assert!(history.can_redo());

        assert!(history.redo(&mut current));
        assert_eq!(current, filled(2));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut history = History::new(10);
        let mut current = filled(7);

        assert!(!history.undo(&mut current));
        assert!(!history.redo(&mut current));
        assert_eq!(current, filled(7));
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new(10);
        let mut current = filled(1);

        history.record(current.clone());
        current = filled(2);
        history.undo(&mut current);
        assert_eq!(history.redo_len(), 1);

        history.record(current.clone());
        assert_eq!(history.redo_len(), 0);
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn test_depth_is_bounded() {
        let mut history = History::new(3);
        for value in 0..5 {
            history.record(filled(value));
        }
        assert_eq!(history.undo_len(), 3);

        let mut current = filled(99);
        history.undo(&mut current);
        history.undo(&mut current);
        history.undo(&mut current);
        // The two oldest snapshots were dropped
        assert_eq!(current, filled(2));
        assert!(!history.can_undo());
    }
}
