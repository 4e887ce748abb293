//! Compiled phrase matching for mixed-script complaint text.
//!
//! Patterns compile once at protocol construction and are reused across
//! every evaluation. Latin-script patterns match at word boundaries only,
//! so "stab" never fires inside "stable"; Arabic-script patterns match by
//! substring containment, because colloquial Arabic complaints are not
//! reliably word-tokenized (clitics and prefixes attach directly to the
//! word: "بيتشنج" must still hit "تشنج").

/// How a compiled pattern is applied to complaint text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Whole-word/phrase match: both ends of the hit must sit at a string
    /// edge or next to a non-alphanumeric character.
    WordBounded,
    /// Plain substring containment.
    Substring,
}

/// A single surface-form pattern, lowercased and mode-classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    text: String,
    mode: MatchMode,
}

impl Pattern {
    /// Compiles a raw surface form.
    ///
    /// The mode is chosen from the script: any Arabic codepoint switches
    /// the pattern to substring matching.
    pub fn compile(raw: &str) -> Self {
        let mode = if contains_arabic(raw) {
            MatchMode::Substring
        } else {
            MatchMode::WordBounded
        };
        Self {
            text: raw.to_lowercase(),
            mode,
        }
    }

    /// Returns the lowercased pattern text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the matching mode chosen at compile time.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Tests this pattern against complaint text.
    ///
    /// `text` must already be normalized with [`normalize`].
    pub fn matches(&self, text: &str) -> bool {
        match self.mode {
            MatchMode::Substring => text.contains(&self.text),
            MatchMode::WordBounded => word_bounded(text, &self.text),
        }
    }
}

/// An ordered list of compiled patterns.
///
/// Scan order is declaration order; the first hit wins, so cheaper or more
/// specific phrases should be listed first.
#[derive(Debug, Clone)]
pub struct PhraseSet {
    patterns: Vec<Pattern>,
}

impl PhraseSet {
    /// Compiles a list of raw surface forms.
    pub fn compile<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: raw.into_iter().map(|s| Pattern::compile(s.as_ref())).collect(),
        }
    }

    /// Returns true if any pattern matches the normalized text.
    pub fn any_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(text))
    }

    /// Returns every matching pattern in declaration order, each at most once.
    pub fn matching<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a Pattern> {
        self.patterns.iter().filter(move |p| p.matches(text))
    }

    /// Number of compiled patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if the set holds no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Normalizes complaint text for matching.
///
/// Lowercasing covers the Latin-script case-insensitivity requirement and
/// leaves Arabic text untouched (Arabic has no case).
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

/// Returns true if the string contains any Arabic-script codepoint.
fn contains_arabic(s: &str) -> bool {
    s.chars().any(|c| {
        matches!(c,
            '\u{0600}'..='\u{06FF}'
                | '\u{0750}'..='\u{077F}'
                | '\u{08A0}'..='\u{08FF}'
                | '\u{FB50}'..='\u{FDFF}'
                | '\u{FE70}'..='\u{FEFF}'
        )
    })
}

/// Whole-word/phrase containment check.
fn word_bounded(haystack: &str, needle: &str) -> bool {
    for (idx, _) in haystack.match_indices(needle) {
        let before_ok = haystack[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[idx + needle.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_patterns_are_word_bounded() {
        let stab = Pattern::compile("stab");
        assert_eq!(stab.mode(), MatchMode::WordBounded);
        assert!(stab.matches("stab wound to chest"));
        assert!(stab.matches("a stab."));
        assert!(!stab.matches("vitals are stable"));
        assert!(!stab.matches("unstable angina"));
    }

    #[test]
    fn test_word_boundary_on_plurals() {
        let peanut = Pattern::compile("peanut");
        assert!(!peanut.matches("i ate peanuts"));
        assert!(peanut.matches("allergic to peanut butter"));
    }

    #[test]
    fn test_phrase_with_apostrophe() {
        let pattern = Pattern::compile("can't breathe");
        assert!(pattern.matches(&normalize("Help, I CAN'T BREATHE")));
    }

    #[test]
    fn test_case_insensitive_via_normalize() {
        let pattern = Pattern::compile("Chest Pain");
        assert!(pattern.matches(&normalize("CHEST PAIN since morning")));
        assert!(pattern.matches(&normalize("chest pain")));
    }

    #[test]
    fn test_arabic_patterns_match_by_substring() {
        let pattern = Pattern::compile("تشنج");
        assert_eq!(pattern.mode(), MatchMode::Substring);
        // Clitic prefix and plural suffix both still match.
        assert!(pattern.matches("بيتشنج على الأرض"));
        assert!(pattern.matches("عنده تشنجات"));
        assert!(!pattern.matches("صداع شديد"));
    }

    #[test]
    fn test_mixed_phrase_counts_as_arabic() {
        // One Arabic codepoint is enough to opt out of word bounding.
        let pattern = Pattern::compile("مغص");
        assert!(pattern.matches("بطني بتوجعني ومغص شديد"));
    }

    #[test]
    fn test_burn_does_not_hit_heartburn() {
        let burn = Pattern::compile("burn");
        assert!(!burn.matches("bad heartburn after meals"));
        assert!(burn.matches("burn on left arm"));
    }

    #[test]
    fn test_phrase_set_matching_order() {
        let set = PhraseSet::compile(["fever", "chills", "حمى"]);
        let hits: Vec<&str> = set
            .matching("fever and chills tonight")
            .map(|p| p.as_str())
            .collect();
        assert_eq!(hits, vec!["fever", "chills"]);
    }

    #[test]
    fn test_empty_text_matches_nothing() {
        let set = PhraseSet::compile(["fever", "حمى"]);
        assert!(!set.any_match(""));
    }
}
