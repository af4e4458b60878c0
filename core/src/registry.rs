use crate::signal::Signal;

/// Ordered collection of signals with a single selection cursor. Insertion
/// order is display order and animation order.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    signals: Vec<Signal>,
    selected: Option<usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<Signal> {
        self.selected.map(|i| self.signals[i])
    }

    /// Appends a signal and selects it. Returns the new index.
    pub fn add(&mut self, signal: Signal) -> usize {
        self.signals.push(signal);
        let index = self.signals.len() - 1;
        self.selected = Some(index);
        index
    }

    /// A valid index becomes the selection and its signal is returned so the
    /// caller can mirror the fields into its edit state. An out-of-range
    /// index clears the selection.
    pub fn select(&mut self, index: usize) -> Option<Signal> {
        if index < self.signals.len() {
            self.selected = Some(index);
            Some(self.signals[index])
        } else {
            self.selected = None;
            None
        }
    }

    /// The only mutation path for existing signals.
    pub fn selected_mut(&mut self) -> Option<&mut Signal> {
        self.selected.map(|i| &mut self.signals[i])
    }

    /// Removes the signal at `index`, shifting later positions down.
    /// Unconditionally clears the selection, whichever index was removed.
    pub fn remove(&mut self, index: usize) -> Option<Signal> {
        self.selected = None;
        if index < self.signals.len() {
            Some(self.signals.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.signals.clear();
        self.selected = None;
    }
}
