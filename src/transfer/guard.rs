//! In-process balance guard
//!
//! Serializes the lock-and-update section of transfers inside one process.
//! Row locks taken in ascending id order remain the correctness mechanism;
//! the guard only bounds how many transfers queue on the database at once.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// How transfers are serialized before touching balances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardMode {
    /// One mutex for every transfer in the process
    #[default]
    Global,
    /// One mutex per unordered account pair
    PerPair,
    /// Rely on database row locks alone
    None,
}

type PairKey = (i64, i64);

enum Inner {
    Global(Arc<Mutex<()>>),
    PerPair(Arc<DashMap<PairKey, Arc<Mutex<()>>>>),
    None,
}

/// Guard owned by the transfer coordinator
pub struct BalanceGuard {
    inner: Inner,
}

impl BalanceGuard {
    pub fn new(mode: GuardMode) -> Self {
        let inner = match mode {
            GuardMode::Global => Inner::Global(Arc::new(Mutex::new(()))),
            GuardMode::PerPair => Inner::PerPair(Arc::new(DashMap::new())),
            GuardMode::None => Inner::None,
        };
        Self { inner }
    }

    pub fn mode(&self) -> GuardMode {
        match self.inner {
            Inner::Global(_) => GuardMode::Global,
            Inner::PerPair(_) => GuardMode::PerPair,
            Inner::None => GuardMode::None,
        }
    }

    /// Wait for the section covering accounts `a` and `b`
    ///
    /// The returned permit releases the section when dropped.
    pub async fn enter(&self, a: i64, b: i64) -> GuardPermit {
        match &self.inner {
            Inner::Global(lock) => GuardPermit::Global(lock.clone().lock_owned().await),
            Inner::PerPair(locks) => {
                let key = (a.min(b), a.max(b));
                // Clone the Arc out so no map shard is held across the await.
                let lock = locks
                    .entry(key)
                    .or_insert_with(|| Arc::new(Mutex::new(())))
                    .clone();
                let guard = lock.lock_owned().await;
                GuardPermit::PerPair(PairPermit {
                    guard: Some(guard),
                    key,
                    locks: locks.clone(),
                })
            }
            Inner::None => GuardPermit::None,
        }
    }

    /// Number of pair mutexes currently allocated
    pub fn pair_slots(&self) -> usize {
        match &self.inner {
            Inner::PerPair(locks) => locks.len(),
            _ => 0,
        }
    }
}

impl std::fmt::Debug for BalanceGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalanceGuard")
            .field("mode", &self.mode())
            .finish()
    }
}

/// Held for the duration of one lock-and-update section
#[must_use = "the section is released as soon as the permit is dropped"]
#[allow(dead_code)]
pub enum GuardPermit {
    Global(OwnedMutexGuard<()>),
    PerPair(PairPermit),
    None,
}

pub struct PairPermit {
    guard: Option<OwnedMutexGuard<()>>,
    key: PairKey,
    locks: Arc<DashMap<PairKey, Arc<Mutex<()>>>>,
}

impl Drop for PairPermit {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the map holds the mutex now: nobody is waiting on this pair.
        self.locks
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}
