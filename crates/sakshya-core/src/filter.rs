//! Comparability filter. Decides, without a model call, whether two events
//! are worth classifying at all.
//!
//! Actions are bucketed by [`categorize`] and the pair is then judged by a
//! fixed rule list in [`actions_compatible`]. Actors are checked first; an
//! actor mismatch rejects the pair outright.

use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::event::Event;

// ─── Categories ──────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActionCategory {
  Presence,
  Movement,
  Absence,
  Violence,
  Weapon,
  Aftermath,
  Other,
}

/// Keyword table, in lookup order. The first category with any keyword
/// contained in the action wins.
///
/// Absence is probed before presence and movement: its phrases are negations
/// of theirs ("not present" contains "present", "left before" contains
/// "left") and would otherwise never be reached.
pub const ACTION_KEYWORDS: &[(ActionCategory, &[&str])] = &[
  (ActionCategory::Absence, &[
    "was not present",
    "not present",
    "not there",
    "absent",
    "left before",
    "nowhere",
    "did not see",
    "not seen",
  ]),
  (ActionCategory::Presence, &[
    "was present",
    "was inside",
    "standing",
    "present",
    "arrived",
    "sitting",
    "seen at",
    "at the spot",
  ]),
  (ActionCategory::Movement, &[
    "came out", "went", "walking", "running", "fled", "escaped", "entered",
    "left", "moving",
  ]),
  (ActionCategory::Violence, &[
    "assaulted",
    "hit",
    "stabbed",
    "beat",
    "attacked",
    "slapped",
    "kicked",
    "shot",
    "fired",
  ]),
  (ActionCategory::Weapon, &[
    "held knife",
    "used stick",
    "armed",
    "carrying",
    "brandished",
    "took out",
  ]),
  (ActionCategory::Aftermath, &[
    "was bleeding",
    "was lying",
    "fell down",
    "unconscious",
    "died",
  ]),
];

/// Bucket a free-text action phrase. Case-insensitive substring match.
pub fn categorize(action: &str) -> ActionCategory {
  if action.is_empty() {
    return ActionCategory::Other;
  }
  let act = action.to_lowercase();
  ACTION_KEYWORDS
    .iter()
    .find(|(_, keywords)| keywords.iter().any(|k| act.contains(k)))
    .map(|(cat, _)| *cat)
    .unwrap_or(ActionCategory::Other)
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// Whether two actor strings plausibly name the same person.
///
/// An empty actor on either side passes: the other statement may be filling
/// the gap. Otherwise equality or containment ("Accused A" vs "A").
pub fn actors_consistent(actor1: &str, actor2: &str) -> bool {
  if actor1.is_empty() || actor2.is_empty() {
    return true;
  }
  let a1 = actor1.trim().to_lowercase();
  let a2 = actor2.trim().to_lowercase();
  a1 == a2 || a1.contains(&a2) || a2.contains(&a1)
}

/// Whether two actions fall in categories worth classifying against each
/// other.
pub fn actions_compatible(action1: &str, action2: &str) -> bool {
  use ActionCategory::*;

  let c1 = categorize(action1);
  let c2 = categorize(action2);
  let located = |c: ActionCategory| matches!(c, Presence | Movement);

  // Presence and movement corroborate each other.
  if located(c1) && located(c2) {
    return false;
  }
  // Denial of presence against an assertion of it.
  if (c1 == Absence && located(c2)) || (c2 == Absence && located(c1)) {
    return true;
  }
  if c1 == Absence && c2 == Absence {
    return false;
  }
  if c1 == c2 {
    return true;
  }
  matches!((c1, c2), (Violence, Weapon) | (Weapon, Violence))
}

/// The full gate: actor check, then action-category check.
pub fn should_compare(
  action1: &str,
  action2: &str,
  actor1: &str,
  actor2: &str,
) -> bool {
  actors_consistent(actor1, actor2) && actions_compatible(action1, action2)
}

/// [`should_compare`] over two events.
pub fn should_compare_events(e1: &Event, e2: &Event) -> bool {
  should_compare(&e1.action, &e2.action, &e1.actor, &e2.actor)
}
