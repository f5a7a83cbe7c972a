//! Per-channel context store
//!
//! Every channel owns at most one live [`DialogueContext`]. A turn checks the
//! context out for its whole duration, so turns on the same channel run one
//! after another while different channels proceed in parallel.

use super::{Dialect, DialogueContext};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

type Slot = Arc<Mutex<DialogueContext>>;

/// Exclusive access to one channel's context for the length of a turn
pub struct ContextGuard {
    slot: Slot,
    guard: OwnedMutexGuard<DialogueContext>,
}

impl Deref for ContextGuard {
    type Target = DialogueContext;

    fn deref(&self) -> &DialogueContext {
        &self.guard
    }
}

impl DerefMut for ContextGuard {
    fn deref_mut(&mut self) -> &mut DialogueContext {
        &mut self.guard
    }
}

#[derive(Default)]
pub struct ChannelContextStore {
    contexts: RwLock<HashMap<String, Slot>>,
}

impl ChannelContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the live context of `channel`, creating a fresh one in INIT if
    /// the channel has none. `dialect` only applies to new contexts.
    pub async fn checkout(&self, channel: &str, dialect: Dialect) -> ContextGuard {
        loop {
            let slot = self.slot(channel, dialect).await;
            let guard = slot.clone().lock_owned().await;

            // The slot may have been finished or evicted while we waited.
            if !self.is_current(channel, &slot).await {
                continue;
            }
            if guard.is_final() {
                // Left behind by an interrupted turn
                self.remove_slot(channel, &slot).await;
                continue;
            }
            return ContextGuard { slot, guard };
        }
    }

    /// End a turn. A context that reached FINAL is dropped from the store
    /// before its lock is released.
    pub async fn release(&self, guard: ContextGuard) {
        if guard.is_final() && self.remove_slot(guard.channel(), &guard.slot).await {
            tracing::debug!(channel = %guard.channel(), "context finished");
        }
    }

    /// Drop the context of `channel` regardless of its state, e.g. when the
    /// channel was archived.
    pub async fn evict(&self, channel: &str) -> bool {
        self.contexts.write().await.remove(channel).is_some()
    }

    #[cfg(test)]
    pub async fn contains(&self, channel: &str) -> bool {
        self.contexts.read().await.contains_key(channel)
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.contexts.read().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.contexts.read().await.is_empty()
    }

    async fn slot(&self, channel: &str, dialect: Dialect) -> Slot {
        {
            let contexts = self.contexts.read().await;
            if let Some(slot) = contexts.get(channel) {
                return slot.clone();
            }
        }

        let mut contexts = self.contexts.write().await;
        contexts
            .entry(channel.to_string())
            .or_insert_with(|| {
                tracing::debug!(channel, ?dialect, "new dialogue context");
                Arc::new(Mutex::new(DialogueContext::new(channel, dialect)))
            })
            .clone()
    }

    async fn is_current(&self, channel: &str, slot: &Slot) -> bool {
        self.contexts
            .read()
            .await
            .get(channel)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
    }

    /// Remove `channel` only if it still maps to `slot`.
    async fn remove_slot(&self, channel: &str, slot: &Slot) -> bool {
        let mut contexts = self.contexts.write().await;
        if contexts
            .get(channel)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
        {
            contexts.remove(channel);
            true
        } else {
            false
        }
    }
}
