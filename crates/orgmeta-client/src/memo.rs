//! Per-instance at-most-once computation cells.

use std::future::Future;

use tokio::sync::OnceCell;

/// A memoization slot: unset until the first successful computation, then
/// holds that value for the owner's lifetime.
///
/// The unset state is the cell's own initialized flag, never a sentinel
/// value of `T` — so `T` may be `Option`, `bool`, or `Value::Null` without
/// a stored "empty" result being mistaken for an unset cell.
#[derive(Debug)]
pub struct MemoCell<T> {
    cell: OnceCell<T>,
}

impl<T> MemoCell<T> {
    /// An unset cell.
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// The stored value, if set. Never triggers computation.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Return the stored value, running `f` first if the cell is unset.
    ///
    /// `f` runs at most once per cell regardless of how many times this is
    /// called.
    pub async fn get_or_compute<F, Fut>(&self, f: F) -> &T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        self.cell.get_or_init(f).await
    }

    /// Fallible form of [`get_or_compute`](Self::get_or_compute).
    ///
    /// An `Err` leaves the cell unset (a later call retries); an `Ok` value
    /// is stored exactly once.
    pub async fn get_or_try_compute<F, Fut, E>(&self, f: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.cell.get_or_try_init(f).await
    }
}

impl<T> Default for MemoCell<T> {
    fn default() -> Self {
        Self::new()
    }
}
