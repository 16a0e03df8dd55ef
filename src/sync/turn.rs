use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Current owner of the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// No worker is active; the dispatcher may grant the next turn.
    Idle,

    /// The worker with this id (1-based) is allowed to print.
    Held(usize),
}

/// State protected by the turn mutex.
struct Inner {
    token: Token,
    cursor: usize,
}

/// Shared turn token and read cursor.
///
/// `TurnState` is created once before any worker is spawned and shared
/// through an `Arc` by the dispatcher and all workers. It owns the single
/// mutex guarding the token and cursor, plus two condition variables:
///
/// - `turn_ready`: workers wait on it for their id to be granted,
/// - `turn_done`: the dispatcher waits on it for the token to return to idle.
///
/// No operation here can fail; they can only block.
pub struct TurnState {
    inner: Mutex<Inner>,
    turn_ready: Condvar,
    turn_done: Condvar,

    /// Length of the shared text, used to keep the cursor bounded.
    len: NonZeroUsize,
}

impl TurnState {
    /// Creates an idle turn state with the cursor at offset 0.
    pub fn new(len: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                token: Token::Idle,
                cursor: 0,
            }),
            turn_ready: Condvar::new(),
            turn_done: Condvar::new(),
            len,
        }
    }

    /// Blocks until the token names `id` or `stop` is set.
    ///
    /// On success the mutex stays locked inside the returned [`Turn`] for as
    /// long as the caller holds it. Dropping the turn hands the token back to
    /// the dispatcher.
    ///
    /// Returns `None` when `stop` was observed and the turn is not held.
    pub fn wait_for_turn(&self, id: usize, stop: &AtomicBool) -> Option<Turn<'_>> {
        let guard = self
            .turn_ready
            .wait_while(self.lock(), |inner| {
                inner.token != Token::Held(id) && !stop.load(Ordering::Acquire)
            })
            .unwrap_or_else(PoisonError::into_inner);

        if guard.token != Token::Held(id) {
            return None;
        }

        Some(Turn {
            state: self,
            guard,
            id,
        })
    }

    /// Grants the turn to worker `next` and wakes every waiting worker.
    ///
    /// Only the dispatcher calls this, and only while the token is idle.
    pub fn advance_turn(&self, next: usize) {
        let mut inner = self.lock();
        debug_assert_eq!(inner.token, Token::Idle, "turn granted while held");
        inner.token = Token::Held(next);
        drop(inner);

        self.turn_ready.notify_all();
    }

    /// Blocks until the active worker has returned the token to idle.
    pub fn wait_idle(&self) {
        let _inner = self
            .turn_done
            .wait_while(self.lock(), |inner| inner.token != Token::Idle)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Returns the current read offset into the text.
    pub fn read_cursor(&self) -> usize {
        self.lock().cursor
    }

    /// Moves the cursor forward by `n` bytes, wrapping at the text length.
    pub fn advance_cursor(&self, n: usize) {
        let mut inner = self.lock();
        inner.cursor = wrap_cursor(inner.cursor, n, self.len);
    }

    /// Returns the token and cursor as seen under the mutex.
    pub fn snapshot(&self) -> (Token, usize) {
        let inner = self.lock();
        (inner.token, inner.cursor)
    }

    /// Wakes every worker so it re-evaluates its wait predicate.
    ///
    /// Call after setting a stop flag passed to
    /// [`wait_for_turn`](Self::wait_for_turn). The mutex is taken before
    /// notifying: a worker that has just checked its stop flag under the
    /// lock is then guaranteed to be waiting.
    pub fn wake_all(&self) {
        drop(self.lock());
        self.turn_ready.notify_all();
    }

    /// Locks the state.
    ///
    /// A worker that panics while printing poisons the mutex, but the token
    /// and cursor are still consistent because the turn is released on drop.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An active turn, holding the turn mutex.
///
/// Dropping the turn resets the token to idle and notifies the dispatcher,
/// so a worker can never leave the token set to its own id.
pub struct Turn<'a> {
    state: &'a TurnState,
    guard: MutexGuard<'a, Inner>,
    id: usize,
}

impl Turn<'_> {
    /// Id of the worker holding this turn.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Cursor value at the start of this turn.
    pub fn cursor(&self) -> usize {
        self.guard.cursor
    }

    /// Hands the token back to the dispatcher.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for Turn<'_> {
    fn drop(&mut self) {
        self.guard.token = Token::Idle;
        self.state.turn_done.notify_one();
    }
}

fn wrap_cursor(cursor: usize, n: usize, len: NonZeroUsize) -> usize {
    let len = len.get();
    (cursor + n % len) % len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_wrap_cursor_stays_bounded() {
        assert_eq!(wrap_cursor(0, 3, len(6)), 3);
        assert_eq!(wrap_cursor(3, 3, len(6)), 0);
        assert_eq!(wrap_cursor(2, 5, len(3)), 1);
        assert_eq!(wrap_cursor(4, 0, len(6)), 4);
        assert_eq!(wrap_cursor(5, usize::MAX, len(7)), (5 + usize::MAX % 7) % 7);
    }

    #[test]
    fn test_stop_releases_waiting_worker() {
        let state = TurnState::new(len(4));
        let stop = AtomicBool::new(true);

        assert!(state.wait_for_turn(1, &stop).is_none());
        assert_eq!(state.snapshot(), (Token::Idle, 0));
    }

    #[test]
    fn test_held_turn_wins_over_stop() {
        let state = TurnState::new(len(4));
        let stop = AtomicBool::new(true);

        state.advance_turn(2);
        let turn = state.wait_for_turn(2, &stop).expect("turn should be held");
        assert_eq!(turn.id(), 2);
        turn.release();

        assert_eq!(state.snapshot().0, Token::Idle);
    }
}
