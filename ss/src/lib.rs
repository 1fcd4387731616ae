//! SessionStore - per-conversation session state
//!
//! Holds what a single conversation is allowed to remember between turns:
//! an undo/redo stack of state snapshots, at most one pending payload
//! (a question waiting on the user's answer), and a monotonic turn guard
//! that rejects stale results.
//!
//! The store is generic over the snapshot type `S` and the pending payload
//! type `P` so it carries no domain knowledge of its own. Rules it enforces:
//!
//! - Snapshots are committed only by the caller (after a successful mutation);
//!   every commit clears the redo stack.
//! - The pending slot is last-request-wins: setting it silently displaces any
//!   unanswered prior payload.
//! - `observe_turn` is a last-write-wins guard keyed by a caller-supplied turn
//!   sequence number. A turn that resolves out of order is rejected before it
//!   can mutate anything.
//!
//! # Example
//!
//! ```
//! use sessionstore::Session;
//!
//! let mut session: Session<Vec<&str>, String> = Session::new();
//! session.commit(vec!["tee"]);
//! session.commit(vec!["tee", "jeans"]);
//! let restored = session.undo().unwrap();
//! assert_eq!(restored, vec!["tee"]);
//! ```

mod registry;
mod session;

pub use registry::SessionRegistry;
pub use session::{Session, SessionError};
