//! Round-robin traversal over `[peers, discovered nodes]`.
//!
//! Each position in the combined pool is visited twice, first with a
//! findNode query and then with a getPeers query, before moving on. Every
//! completed pass over the combined pool rotates to the next authorized
//! supernode.

/// Query type selected by the cursor for a discovery cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    /// Search the target for the desired supernode's raw address.
    FindNode,
    /// Ask the target for its peers.
    GetPeers,
}

/// One resolved cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorStep {
    /// Index into the concatenation of peers then discovered nodes.
    pub index: usize,
    /// Query to send to that node.
    pub phase: QueryPhase,
    /// Supernode rotation counter; reduce modulo the registry length.
    pub supernode: usize,
}

/// Traversal position plus supernode rotation counter.
///
/// Only moves forward. The offset wraps when it passes the end of the
/// combined pool, and each wrap advances the supernode counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalCursor {
    offset: usize,
    phase: QueryPhase,
    supernode: usize,
}

impl Default for TraversalCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl TraversalCursor {
    /// Start at offset 0 with a findNode query.
    pub fn new() -> Self {
        Self {
            offset: 0,
            phase: QueryPhase::FindNode,
            supernode: 0,
        }
    }

    /// Resolve the current position against a combined pool of
    /// `combined_len` entries and advance.
    ///
    /// Returns `None` without moving when the combined pool is empty.
    pub fn next_step(&mut self, combined_len: usize) -> Option<CursorStep> {
        if combined_len == 0 {
            return None;
        }

        if self.offset >= combined_len {
            let passes = self.offset / combined_len;
            self.supernode = self.supernode.wrapping_add(passes);
            self.offset %= combined_len;
        }

        let step = CursorStep {
            index: self.offset,
            phase: self.phase,
            supernode: self.supernode,
        };

        match self.phase {
            QueryPhase::FindNode => self.phase = QueryPhase::GetPeers,
            QueryPhase::GetPeers => {
                self.phase = QueryPhase::FindNode;
                self.offset += 1;
            }
        }

        Some(step)
    }

    /// Current supernode rotation counter.
    pub fn supernode(&self) -> usize {
        self.supernode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(cursor: &mut TraversalCursor, len: usize, n: usize) -> Vec<CursorStep> {
        (0..n).filter_map(|_| cursor.next_step(len)).collect()
    }

    #[test]
    fn test_starts_with_find_node_at_zero() {
        let mut cursor = TraversalCursor::new();
        let step = cursor.next_step(3).unwrap();

        assert_eq!(step.index, 0);
        assert_eq!(step.phase, QueryPhase::FindNode);
        assert_eq!(step.supernode, 0);
    }

    #[test]
    fn test_alternates_phase_per_position() {
        let mut cursor = TraversalCursor::new();
        let got: Vec<(usize, QueryPhase)> = steps(&mut cursor, 3, 4)
            .into_iter()
            .map(|s| (s.index, s.phase))
            .collect();

        assert_eq!(
            got,
            vec![
                (0, QueryPhase::FindNode),
                (0, QueryPhase::GetPeers),
                (1, QueryPhase::FindNode),
                (1, QueryPhase::GetPeers),
            ]
        );
    }

    #[test]
    fn test_wrap_advances_supernode_once_per_pass() {
        let mut cursor = TraversalCursor::new();
        let all = steps(&mut cursor, 2, 10);

        let supernodes: Vec<usize> = all.iter().map(|s| s.supernode).collect();
        assert_eq!(supernodes, vec![0, 0, 0, 0, 1, 1, 1, 1, 2, 2]);

        let indices: Vec<usize> = all.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 0, 1, 1, 0, 0, 1, 1, 0, 0]);
    }

    #[test]
    fn test_empty_pool_does_not_move() {
        let mut cursor = TraversalCursor::new();
        assert!(cursor.next_step(0).is_none());
        assert_eq!(cursor, TraversalCursor::new());
    }

    #[test]
    fn test_shrinking_pool_counts_every_pass() {
        let mut cursor = TraversalCursor::new();
        // Walk to offset 6 over a large pool
        steps(&mut cursor, 100, 12);
        // Pool shrank to 2 entries: offset 6 is three full passes in
        let step = cursor.next_step(2).unwrap();
        assert_eq!(step.index, 0);
        assert_eq!(step.supernode, 3);
    }
}
