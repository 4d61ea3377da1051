/// Binary min-heap over a contiguous `Vec`.
///
/// The smallest element by `Ord` sits at index 0. Children of `i` live at
/// `2i + 1` and `2i + 2`.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    items: Vec<T>,
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> MinHeap<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let top = self.items.swap_remove(0);
        self.sift_down(0);
        Some(top)
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.items[parent] <= self.items[index] {
                break;
            }
            self.items.swap(parent, index);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.items[left] < self.items[smallest] {
                smallest = left;
            }
            if right < len && self.items[right] < self.items[smallest] {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.items.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T: Ord> FromIterator<T> for MinHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        for item in iter {
            heap.push(item);
        }
        heap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T: Ord>(mut heap: MinHeap<T>) -> Vec<T> {
        let mut out = Vec::with_capacity(heap.len());
        while let Some(item) = heap.pop() {
            out.push(item);
        }
        out
    }

    #[test]
    fn test_pop_empty() {
        let mut heap: MinHeap<u32> = MinHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.pop(), None);
        assert_eq!(heap.peek(), None);
    }

    #[test]
    fn test_pops_in_ascending_order() {
        let heap: MinHeap<u32> = [9, 3, 7, 1, 8, 2, 6, 5, 4].into_iter().collect();
        assert_eq!(drain(heap), vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_duplicates_kept() {
        let heap: MinHeap<u32> = [2, 1, 2, 1].into_iter().collect();
        assert_eq!(drain(heap), vec![1, 1, 2, 2]);
    }

    #[test]
    fn test_peek_tracks_minimum() {
        let mut heap = MinHeap::with_capacity(4);
        heap.push(10);
        assert_eq!(heap.peek(), Some(&10));
        heap.push(4);
        assert_eq!(heap.peek(), Some(&4));
        heap.push(7);
        assert_eq!(heap.peek(), Some(&4));
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn test_interleaved_push_pop() {
        let mut heap = MinHeap::new();
        heap.push(5);
        heap.push(3);
        assert_eq!(heap.pop(), Some(3));
        heap.push(1);
        heap.push(4);
        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), Some(4));
        assert_eq!(heap.pop(), Some(5));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn test_tuple_ordering_breaks_ties() {
        let heap: MinHeap<(u32, u32)> = [(1, 2), (0, 9), (1, 0)].into_iter().collect();
        assert_eq!(drain(heap), vec![(0, 9), (1, 0), (1, 2)]);
    }
}
