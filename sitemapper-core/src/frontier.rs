use crate::canonical::NormalizedUrl;
use std::collections::VecDeque;

/// FIFO of URLs waiting for a visit. Insertion order is crawl order.
///
/// No dedup happens here; the engine decides what gets pushed.
#[derive(Debug, Default, Clone)]
pub struct Frontier {
    queue: VecDeque<NormalizedUrl>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, url: NormalizedUrl) {
        self.queue.push_back(url);
    }

    pub fn pop_front(&mut self) -> Option<NormalizedUrl> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NormalizedUrl> {
        self.queue.iter()
    }
}
