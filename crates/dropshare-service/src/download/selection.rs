//! Which files of a granted share the visitor wants.

/// Per-item checkboxes plus "select all".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSelection {
    selected: Vec<bool>,
}

impl DownloadSelection {
    /// Nothing selected out of `len` items.
    pub fn new(len: usize) -> Self {
        Self {
            selected: vec![false; len],
        }
    }

    /// Number of items to choose from.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether there are no items at all.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Flip one item. Out-of-range indexes are ignored.
    pub fn toggle(&mut self, index: usize) {
        if let Some(flag) = self.selected.get_mut(index) {
            *flag = !*flag;
        }
    }

    /// Select one item.
    pub fn select(&mut self, index: usize) {
        if let Some(flag) = self.selected.get_mut(index) {
            *flag = true;
        }
    }

    /// Select everything when anything is unselected, otherwise clear.
    pub fn toggle_all(&mut self) {
        let target = !self.all_selected();
        self.selected.iter_mut().for_each(|f| *f = target);
    }

    /// Whether the item at `index` is selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    /// Whether every item is selected.
    pub fn all_selected(&self) -> bool {
        !self.selected.is_empty() && self.selected.iter().all(|f| *f)
    }

    /// Selected indexes, ascending.
    pub fn indices(&self) -> Vec<usize> {
        self.selected
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.then_some(i))
            .collect()
    }

    /// Batch download is only offered with at least one item selected.
    pub fn can_download(&self) -> bool {
        self.selected.iter().any(|f| *f)
    }
}
