/// Header cart icon with its item counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartIcon {
    counter: usize,
}

impl CartIcon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn render(&mut self, count: usize) {
        self.counter = count;
    }
}
