//! Single-slot memoization keyed by a dependency value

/// Caches the last computed value together with the dependency key that
/// produced it. A different key triggers recomputation; nothing else does.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
    computations: usize,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: None,
            computations: 0,
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        let entry = match self.slot.take() {
            Some((cached, value)) if cached == key => (cached, value),
            _ => {
                self.computations += 1;
                (key, compute())
            }
        };
        &self.slot.insert(entry).1
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    /// How many times the value was (re)computed
    pub fn computations(&self) -> usize {
        self.computations
    }
}
