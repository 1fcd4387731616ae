//! Core Session implementation

use thiserror::Error;
use tracing::debug;

/// Errors returned by undo/redo operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

/// Session state for one conversation
///
/// `S` is the snapshot type (committed after each successful mutation),
/// `P` is the pending payload type (a question parked until answered).
#[derive(Debug, Clone)]
pub struct Session<S, P> {
    /// Committed snapshots, oldest first; the last entry is the current state
    undo: Vec<S>,
    /// Snapshots popped by undo, available for redo until the next commit
    redo: Vec<S>,
    /// At most one unanswered payload (last request wins)
    pending: Option<P>,
    /// Highest turn sequence number observed so far
    last_seq: u64,
}

impl<S, P> Default for Session<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, P> Session<S, P> {
    /// Create an empty session
    pub fn new() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            pending: None,
            last_seq: 0,
        }
    }

    /// Commit a new snapshot as the current state
    ///
    /// Clears the redo stack: once the conversation moves forward, the
    /// abandoned branch is gone.
    pub fn commit(&mut self, snapshot: S) {
        debug!(depth = self.undo.len(), "Session::commit: called");
        self.undo.push(snapshot);
        self.redo.clear();
    }

    /// The current snapshot, if any has been committed
    pub fn current(&self) -> Option<&S> {
        self.undo.last()
    }

    /// Number of committed snapshots
    pub fn depth(&self) -> usize {
        self.undo.len()
    }

    /// Park a pending payload, displacing any unanswered prior one
    ///
    /// Returns the displaced payload so the caller can log the overwrite.
    pub fn set_pending(&mut self, payload: P) -> Option<P> {
        debug!(had_pending = self.pending.is_some(), "Session::set_pending: called");
        self.pending.replace(payload)
    }

    /// Take the pending payload, leaving the slot empty
    pub fn take_pending(&mut self) -> Option<P> {
        self.pending.take()
    }

    /// Peek at the pending payload without consuming it
    pub fn pending(&self) -> Option<&P> {
        self.pending.as_ref()
    }

    /// Drop any pending payload without answering it
    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    /// Whether a turn sequence is already out of date, without recording it
    ///
    /// Lets a caller bail out before doing any work (or any mutation) on a
    /// turn that has been superseded.
    pub fn is_stale(&self, seq: u64) -> bool {
        seq < self.last_seq
    }

    /// Last-write-wins turn guard
    ///
    /// Returns `true` if `seq` is at least as new as anything seen so far
    /// (and records it); `false` means the turn is stale and its result must
    /// be discarded without mutating the session.
    pub fn observe_turn(&mut self, seq: u64) -> bool {
        if seq < self.last_seq {
            debug!(seq, last_seq = self.last_seq, "Session::observe_turn: stale turn rejected");
            return false;
        }
        self.last_seq = seq;
        true
    }

    /// Allocate the next turn sequence number
    pub fn next_seq(&self) -> u64 {
        self.last_seq + 1
    }
}

impl<S, P> Session<S, P>
where
    S: Clone,
{
    /// Step back to the previous snapshot, returning it
    ///
    /// Requires at least two committed snapshots: the current one moves to
    /// the redo stack and the one before it becomes current.
    pub fn undo(&mut self) -> Result<S, SessionError> {
        debug!(depth = self.undo.len(), "Session::undo: called");
        if self.undo.len() < 2 {
            return Err(SessionError::NothingToUndo);
        }
        let current = self.undo.pop().expect("len checked above");
        self.redo.push(current);
        Ok(self.undo.last().expect("len checked above").clone())
    }

    /// Re-apply the most recently undone snapshot, returning it
    pub fn redo(&mut self) -> Result<S, SessionError> {
        debug!(redo_depth = self.redo.len(), "Session::redo: called");
        let snapshot = self.redo.pop().ok_or(SessionError::NothingToRedo)?;
        self.undo.push(snapshot.clone());
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session<Vec<&'static str>, String> {
        Session::new()
    }

    #[test]
    fn test_undo_restores_previous_snapshot() {
        let mut s = session();
        s.commit(vec!["tee"]);
        s.commit(vec!["tee", "jeans"]);
        s.commit(vec!["blouse", "jeans"]);

        assert_eq!(s.undo().unwrap(), vec!["tee", "jeans"]);
        assert_eq!(s.undo().unwrap(), vec!["tee"]);
        assert_eq!(s.undo(), Err(SessionError::NothingToUndo));
    }

    #[test]
    fn test_redo_replays_undone_snapshot() {
        let mut s = session();
        s.commit(vec!["tee"]);
        s.commit(vec!["blouse"]);

        s.undo().unwrap();
        assert_eq!(s.redo().unwrap(), vec!["blouse"]);
        assert_eq!(s.current(), Some(&vec!["blouse"]));
        assert_eq!(s.redo(), Err(SessionError::NothingToRedo));
    }

    #[test]
    fn test_commit_clears_redo_stack() {
        let mut s = session();
        s.commit(vec!["tee"]);
        s.commit(vec!["blouse"]);
        s.undo().unwrap();

        s.commit(vec!["sweater"]);
        assert_eq!(s.redo(), Err(SessionError::NothingToRedo));
        assert_eq!(s.current(), Some(&vec!["sweater"]));
    }

    #[test]
    fn test_empty_session_has_nothing_to_undo() {
        let mut s = session();
        assert_eq!(s.undo(), Err(SessionError::NothingToUndo));
        assert_eq!(s.redo(), Err(SessionError::NothingToRedo));
        assert_eq!(s.current(), None);
    }

    #[test]
    fn test_single_commit_has_nothing_to_undo() {
        // One snapshot means there is no earlier state to return to
        let mut s = session();
        s.commit(vec!["tee"]);
        assert_eq!(s.undo(), Err(SessionError::NothingToUndo));
    }

    #[test]
    fn test_pending_slot_is_last_request_wins() {
        let mut s = session();
        assert!(s.set_pending("first question".to_string()).is_none());
        let displaced = s.set_pending("second question".to_string());
        assert_eq!(displaced.as_deref(), Some("first question"));
        assert_eq!(s.pending().map(String::as_str), Some("second question"));

        assert_eq!(s.take_pending().as_deref(), Some("second question"));
        assert!(s.pending().is_none());
    }

    #[test]
    fn test_observe_turn_rejects_stale_sequences() {
        let mut s = session();
        assert!(s.observe_turn(1));
        assert!(s.observe_turn(3));
        assert!(!s.observe_turn(2));
        // Equal sequence is not stale (idempotent retry of the same turn)
        assert!(s.observe_turn(3));
        assert_eq!(s.next_seq(), 4);
    }

    #[test]
    fn test_is_stale_does_not_record() {
        let mut s = session();
        assert!(s.observe_turn(5));
        assert!(s.is_stale(4));
        assert!(!s.is_stale(5));
        assert!(!s.is_stale(9));
        // peeking at 9 must not advance the guard
        assert!(s.observe_turn(6));
    }
}
