/// "Load more" windowing over a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    initial: usize,
    step: usize,
    visible: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(9, 6)
    }
}

impl Pager {
    pub fn new(initial: usize, step: usize) -> Self {
        Self { initial, step, visible: initial }
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Back to the first page. Called whenever the query or category changes.
    pub fn reset(&mut self) {
        self.visible = self.initial;
    }

    pub fn load_more(&mut self) {
        self.visible = self.visible.saturating_add(self.step);
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible < total
    }

    pub fn window<'s, T>(&self, items: &'s [T]) -> &'s [T] {
        &items[..self.visible.min(items.len())]
    }
}
