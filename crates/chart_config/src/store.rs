use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::merge::Merge;
use crate::value::{ConfigPath, ConfigValue, PathMutation, Patchable};

/// Upper bound on mutations handed out between two [`ConfigStore::settle`]
/// calls. A dispatch handler that keeps writing back into the store would
/// otherwise never let the queue drain.
pub const MAX_DRAIN_MUTATIONS: usize = 1024;

/// A config tree that can be owned by a [`ConfigStore`].
pub trait Configurable: Clone + Patchable {
    /// Tween "from" state captured before the first pending mutation.
    type Snapshot;

    fn validate(&self) -> Result<(), ConfigError>;
    fn snapshot(&self) -> Self::Snapshot;
    /// One mutation per leaf that differs between `self` and `next`.
    fn diff(&self, next: &Self) -> Vec<PathMutation>;
}

/// Observable owner of a config tree.
///
/// Every accepted write is applied to the tree, reported to the registered
/// listener and queued. The owning chart drains the queue with
/// [`next_mutation`](Self::next_mutation) and maps each path onto a render
/// stage. Writes made while the queue is draining land behind the mutation
/// being handled, so handlers never observe a half-dispatched state.
pub struct ConfigStore<C: Configurable> {
    config: C,
    previous: Option<C::Snapshot>,
    pending: VecDeque<PathMutation>,
    drained: usize,
    listener: Option<Box<dyn FnMut(&PathMutation)>>,
}

impl<C: Configurable> ConfigStore<C> {
    pub fn new(config: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            previous: None,
            pending: VecDeque::new(),
            drained: 0,
            listener: None,
        })
    }

    /// Builds `defaults` merged with `overrides` and validates the result.
    pub fn with_overrides(mut defaults: C, overrides: C::Patch) -> Result<Self, ConfigError>
    where
        C: Merge,
    {
        defaults.merge(overrides);
        Self::new(defaults)
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Registers the single change listener, replacing any previous one.
    pub fn on_change(&mut self, listener: impl FnMut(&PathMutation) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Writes `value` at the dotted `path`.
    ///
    /// The write is validated against the whole tree first; a rejected write
    /// leaves the config untouched and notifies nobody.
    pub fn apply(
        &mut self,
        path: &str,
        value: impl Into<ConfigValue>,
    ) -> Result<(), ConfigError> {
        let path = ConfigPath::parse(path)?;
        let value = value.into();
        let mut next = self.config.clone();
        next.set(&path.segments(), value.clone())
            .map_err(|failure| failure.at(&path))?;
        next.validate()?;

        self.commit(next, vec![PathMutation { path, value }]);
        Ok(())
    }

    /// Merges a partial override and reports one mutation per changed leaf.
    pub fn apply_patch(&mut self, patch: C::Patch) -> Result<usize, ConfigError>
    where
        C: Merge,
    {
        let mut next = self.config.clone();
        next.merge(patch);
        next.validate()?;
        let mutations = self.config.diff(&next);
        let count = mutations.len();
        self.commit(next, mutations);
        Ok(count)
    }

    fn commit(&mut self, next: C, mutations: Vec<PathMutation>) {
        if mutations.is_empty() {
            return;
        }
        if self.previous.is_none() {
            self.previous = Some(self.config.snapshot());
        }
        self.config = next;
        for mutation in mutations {
            debug!(path = %mutation.path, "config mutation");
            if let Some(listener) = self.listener.as_mut() {
                listener(&mutation);
            }
            self.pending.push_back(mutation);
        }
    }

    /// Pops the next queued mutation, in write order.
    pub fn next_mutation(&mut self) -> Option<PathMutation> {
        if self.drained >= MAX_DRAIN_MUTATIONS && !self.pending.is_empty() {
            warn!(
                dropped = self.pending.len(),
                "config mutations kept re-queuing; dropping the rest of the queue"
            );
            self.pending.clear();
            return None;
        }
        let next = self.pending.pop_front();
        if next.is_some() {
            self.drained += 1;
        }
        next
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// State before the first mutation since the last [`settle`](Self::settle).
    pub fn previous(&self) -> Option<&C::Snapshot> {
        self.previous.as_ref()
    }

    /// Marks the triggered re-render as complete and drops the snapshot.
    pub fn settle(&mut self) {
        self.previous = None;
        self.drained = 0;
    }
}
