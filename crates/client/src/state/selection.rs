use shared::ObjectId;

/// Single-object selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<ObjectId>,
}

impl SelectionState {
    /// Currently selected object
    pub fn primary(&self) -> Option<&ObjectId> {
        self.selected.as_ref()
    }

    /// Check if an object is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Select an object (replaces previous selection)
    pub fn select(&mut self, id: ObjectId) {
        self.selected = Some(id);
    }

    /// Clear selection
    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_replaces() {
        let mut sel = SelectionState::default();
        sel.select("a".into());
        sel.select("b".into());
        assert!(sel.is_selected("b"));
        assert!(!sel.is_selected("a"));
        assert_eq!(sel.primary().map(String::as_str), Some("b"));
    }

    #[test]
    fn test_clear() {
        let mut sel = SelectionState::default();
        sel.select("a".into());
        sel.clear();
        assert!(sel.is_empty());
        assert!(sel.primary().is_none());
    }
}
