//! Statement text normalisation.

/// Collapse every run of whitespace (including newlines) to a single space
/// and trim the ends.
pub fn clean_text(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn collapses_whitespace() {
    assert_eq!(
      clean_text("  On 12.03.2024\n\n at   about 9 pm,\tA arrived.  "),
      "On 12.03.2024 at about 9 pm, A arrived."
    );
    assert_eq!(clean_text("\n \t"), "");
  }
}
