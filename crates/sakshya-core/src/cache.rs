//! Process-wide memo of classifier verdicts.
//!
//! Keys are built from actor and action text only, so two distinct events
//! with identical wording share a verdict. Entries never expire.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::{comparison::ComparisonResult, event::Event};

/// `"actor1:action1|actor2:action2"`, lower-cased. Order-sensitive.
pub fn cache_key(e1: &Event, e2: &Event) -> String {
  format!("{}:{}|{}:{}", e1.actor, e1.action, e2.actor, e2.action).to_lowercase()
}

#[derive(Debug, Default)]
pub struct ComparisonCache {
  entries: Mutex<HashMap<String, ComparisonResult>>,
}

impl ComparisonCache {
  pub fn new() -> Self { Self::default() }

  /// A previously stored verdict for this wording, addressed to `e1`/`e2`.
  pub fn get(&self, e1: &Event, e2: &Event) -> Option<ComparisonResult> {
    let key = cache_key(e1, e2);
    self.entries.lock().get(&key).map(|hit| hit.rebind(e1, e2))
  }

  pub fn insert(&self, e1: &Event, e2: &Event, result: ComparisonResult) {
    self.entries.lock().insert(cache_key(e1, e2), result);
  }

  pub fn len(&self) -> usize { self.entries.lock().len() }

  pub fn is_empty(&self) -> bool { self.entries.lock().is_empty() }
}
