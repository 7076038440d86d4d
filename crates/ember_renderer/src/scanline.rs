//! Scanline work distribution.
//!
//! Rows are handed out through a single atomic cursor: each worker claims
//! the next unclaimed row until the cursor passes the image height. Workers
//! that finish early simply claim more rows, so the load balances itself.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Shared row counter.
#[derive(Debug)]
pub struct RowCursor {
    next: AtomicUsize,
    height: usize,
}

impl RowCursor {
    /// Create a cursor over rows `0..height`.
    pub fn new(height: usize) -> Self {
        Self {
            next: AtomicUsize::new(0),
            height,
        }
    }

    /// Claim the next row, or `None` once every row has been handed out.
    #[inline]
    pub fn claim(&self) -> Option<usize> {
        let row = self.next.fetch_add(1, Ordering::Relaxed);
        (row < self.height).then_some(row)
    }

    /// Number of rows handed out so far.
    pub fn claimed(&self) -> usize {
        self.next.load(Ordering::Relaxed).min(self.height)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Stop handing out rows. Remaining rows are never claimed.
    pub fn close(&self) {
        self.next.fetch_max(self.height, Ordering::Relaxed);
    }

    /// True once every row has been claimed or the cursor is closed.
    pub fn is_exhausted(&self) -> bool {
        self.claimed() >= self.height
    }
}

/// A finished row, in render order (row 0 is the bottom of the image).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    /// Claimed row index
    pub row: usize,
    /// Tonemapped pixels, left to right
    pub pixels: Vec<[u8; 3]>,
}

impl RenderedRow {
    pub fn new(row: usize, pixels: Vec<[u8; 3]>) -> Self {
        Self { row, pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_sequence() {
        let cursor = RowCursor::new(3);
        assert_eq!(cursor.claim(), Some(0));
        assert_eq!(cursor.claim(), Some(1));
        assert_eq!(cursor.claimed(), 2);
        assert_eq!(cursor.claim(), Some(2));
        assert_eq!(cursor.claim(), None);
        assert_eq!(cursor.claim(), None);
        assert_eq!(cursor.claimed(), 3);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_close_stops_claims() {
        let cursor = RowCursor::new(5);
        assert_eq!(cursor.claim(), Some(0));

        cursor.close();
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.claim(), None);
    }

    #[test]
    fn test_empty_cursor() {
        let cursor = RowCursor::new(0);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.claim(), None);
    }

    #[test]
    fn test_every_row_claimed_once() {
        let height = 257;

        for threads in 1..=8 {
            let cursor = RowCursor::new(height);
            let claimed: Vec<Vec<usize>> = std::thread::scope(|s| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        s.spawn(|| {
                            let mut rows = Vec::new();
                            while let Some(row) = cursor.claim() {
                                rows.push(row);
                            }
                            rows
                        })
                    })
                    .collect();
                handles.into_iter().map(|h| h.join().unwrap()).collect()
            });

            let mut all: Vec<usize> = claimed.into_iter().flatten().collect();
            all.sort_unstable();
            assert_eq!(all, (0..height).collect::<Vec<_>>(), "{threads} threads");
        }
    }
}
