//! Prompt templates.
//!
//! Absent optional event fields render as `None`.

use sakshya_core::{
  event::{Event, StatementType},
  language::Language,
};

fn or_none(field: &Option<String>) -> &str { field.as_deref().unwrap_or("None") }

pub fn extraction_prompt(statement_type: StatementType, text: &str) -> String {
  format!(
    r#"
You are a legal analysis assistant trained to extract FACTUAL EVENTS
from criminal witness statements.

This task is purely extractive.
You must NOT infer, assume, or add facts.

STATEMENT TYPE: {statement_type}

WITNESS STATEMENT TEXT:
{text}

====================
LEGAL EXTRACTION RULES
====================

1. Extract ONLY factual assertions about the incident.
2. Ignore:
   - Procedural narration (e.g., "I stated before police", "I was asked")
   - Legal conclusions or opinions
   - Emotions or beliefs (e.g., "I think", "I believe")
3. Treat EACH of the following as separate events if they appear:
   - Presence at the scene
   - Physical action (assault, hit, stab, push, threaten)
   - Possession or use of a weapon
   - Movement (arrived, ran away, stood nearby)
4. Do NOT merge multiple actions into one event.
5. Do NOT guess missing details.

====================
EVENT FIELDS (STRICT)
====================

For EACH event, extract:

- actor: Who performed the action or was present?
- action: A short verb phrase (e.g., "assaulted", "was standing", "held knife")
- target: Who or what the action was directed at (null if not applicable)
- time: Exact or approximate time if explicitly mentioned (null if not)
- location: Place if explicitly mentioned (null if not)
- source_sentence: Copy the EXACT sentence from the text

====================
OUTPUT FORMAT (MANDATORY)
====================

Return a VALID JSON object ONLY.

{{
  "events": [
    {{
      "actor": "...",
      "action": "...",
      "target": "... or null",
      "time": "... or null",
      "location": "... or null",
      "source_sentence": "..."
    }}
  ]
}}

DO NOT:
- Add explanations
- Add extra keys
- Output anything outside JSON
"#
  )
}

pub fn comparison_prompt(e1: &Event, e2: &Event) -> String {
  let (type_1, actor_1, action_1) = (e1.statement_type, &e1.actor, &e1.action);
  let (target_1, time_1, location_1) =
    (or_none(&e1.target), or_none(&e1.time), or_none(&e1.location));
  let (type_2, actor_2, action_2) = (e2.statement_type, &e2.actor, &e2.action);
  let (target_2, time_2, location_2) =
    (or_none(&e2.target), or_none(&e2.time), or_none(&e2.location));

  format!(
    r#"
You are a legal reasoning assistant assisting in cross-examination preparation.

You are comparing TWO extracted events attributed to the SAME WITNESS,
recorded at DIFFERENT procedural stages.

Your task is NOT to decide truth.
Your task is ONLY to classify semantic consistency.

====================
EVENT 1 ({type_1})
====================
Actor: {actor_1}
Action: {action_1}
Target: {target_1}
Time: {time_1}
Location: {location_1}

====================
EVENT 2 ({type_2})
====================
Actor: {actor_2}
Action: {action_2}
Target: {target_2}
Time: {time_2}
Location: {location_2}

====================
LEGAL CLASSIFICATION RULES
====================

Classify the relationship as EXACTLY ONE of the following:

1. contradiction
   - Direct conflict in participation or facts
   - Example:
     "A assaulted B" vs "A was only standing nearby"
     "A stabbed B" vs "A did not assault B"

2. omission
   - One event mentions a fact that the other is silent about
   - Use ONLY when:
     - The silence does NOT negate the fact
     - FIR silence is treated cautiously
   - Example:
     FIR mentions assault, later statement adds weapon

3. consistent
   - Both events assert compatible facts
   - Minor wording differences allowed

4. minor_discrepancy
   - Slight differences in:
     - Time (e.g., 4:00 PM vs 4:30 PM)
     - Location description
   - Does NOT affect the core act

====================
CRITICAL LEGAL GUIDELINES
====================

- Presence vs participation mismatch → CONTRADICTION
- Active assault vs passive presence → CONTRADICTION
- Weapon mismatch → CONTRADICTION or MATERIAL (explain)
- FIR omissions are COMMON and should NOT automatically be contradictions
- If unsure, choose the LESS severe classification

====================
OUTPUT FORMAT (STRICT)
====================

Return ONLY valid JSON:

{{
  "classification": "contradiction | omission | consistent | minor_discrepancy",
  "explanation": "Brief legal reasoning (1–2 sentences)"
}}

DO NOT:
- Mention guilt or credibility
- Use speculative language
- Output anything outside JSON
"#
  )
}

pub fn translation_prompt(text: &str, from: Language, to: Language) -> String {
  if to == Language::En {
    let source = from.name();
    format!(
      "You are a professional legal translator.\n\
       Translate the following {source} legal text into English.\n\
       Preserve the legal meaning, sentence structure, and tone.\n\
       Do NOT summarize. Provide a direct translation.\n\
       \n\
       Text:\n\
       {text}\n"
    )
  } else {
    let target = to.name();
    format!(
      "Translate the following text into {target}.\n\
       Preserve legal terminology and tone.\n\
       \n\
       Text:\n\
       {text}\n"
    )
  }
}

#[cfg(test)]
mod tests {
  use sakshya_core::event::EventDraft;

  use super::*;

  #[test]
  fn extraction_prompt_embeds_type_and_text() {
    let p = extraction_prompt(StatementType::Section164, "A hit B at 9 pm.");
    assert!(p.contains("STATEMENT TYPE: Section 164"));
    assert!(p.contains("A hit B at 9 pm."));
    assert!(p.contains("\"events\": ["));
  }

  #[test]
  fn comparison_prompt_renders_missing_fields_as_none() {
    let e1 = Event::from_draft(StatementType::Fir, 1, EventDraft {
      actor: "A".into(),
      action: "hit".into(),
      target: Some("B".into()),
      time: Some("9 pm".into()),
      ..Default::default()
    });
    let e2 = Event::from_draft(StatementType::CourtDeposition, 1, EventDraft {
      actor: "A".into(),
      action: "stood nearby".into(),
      ..Default::default()
    });
    let p = comparison_prompt(&e1, &e2);
    assert!(p.contains("EVENT 1 (FIR)"));
    assert!(p.contains("Target: B\nTime: 9 pm\nLocation: None"));
    assert!(p.contains("EVENT 2 (Court Deposition)"));
    assert!(p.contains("Action: stood nearby\nTarget: None"));
  }

  #[test]
  fn translation_prompt_direction() {
    let to_en = translation_prompt("पाठ", Language::Hi, Language::En);
    assert!(to_en.contains("Hindi legal text into English"));
    assert!(to_en.ends_with("पाठ\n"));
    let from_en = translation_prompt("text", Language::En, Language::Ta);
    assert!(from_en.starts_with("Translate the following text into Tamil."));
  }
}
