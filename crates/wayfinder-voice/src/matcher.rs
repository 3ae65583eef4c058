//! Transcript to destination resolution.
//!
//! A fixed, ordered rule table scanned linearly: the first rule with any
//! keyword appearing as a substring of the case-folded transcript wins.
//! Declaration order is therefore the tie-break, so reordering the default
//! table changes how overlapping keywords resolve. A transcript naming
//! several destinations fires only the first-declared rule; callers wanting
//! better behavior should extend the rule model, not reorder this table.
//!
//! A linear scan is fine at four rules. The table is an explicit slice so
//! it can be swapped for a normalized keyword index later without touching
//! the public contract.

use wayfinder_types::{
    Location, ANNA_UNIVERSITY, CENTRAL_CHENNAI, GUINDY_STATION, MARINA_BEACH,
};

/// One matcher rule: any keyword present selects the location.
#[derive(Debug, Clone)]
pub struct DestinationRule {
    keywords: Vec<String>,
    location: Location,
}

impl DestinationRule {
    /// Builds a rule; keywords are case-folded once here so `resolve` can
    /// compare without re-folding.
    pub fn new(keywords: &[&str], location: Location) -> Self {
        Self {
            keywords: keywords.iter().map(|kw| kw.to_lowercase()).collect(),
            location,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// Resolves free-text transcripts against an ordered rule table.
#[derive(Debug, Clone)]
pub struct TranscriptMatcher {
    rules: Vec<DestinationRule>,
}

impl TranscriptMatcher {
    pub fn new(rules: Vec<DestinationRule>) -> Self {
        Self { rules }
    }

    /// The built-in rule table. Order is load-bearing: it is the tie-break.
    pub fn with_default_rules() -> Self {
        Self::new(vec![
            DestinationRule::new(&["marina", "beach"], MARINA_BEACH),
            DestinationRule::new(&["anna", "university", "uni"], ANNA_UNIVERSITY),
            DestinationRule::new(&["guindy", "station"], GUINDY_STATION),
            DestinationRule::new(&["central", "starting"], CENTRAL_CHENNAI),
        ])
    }

    /// Maps a transcript to a known destination.
    ///
    /// Pure: no side effects, deterministic for a given rule table. Returns
    /// `None` when no rule matches; an unmatched utterance is not an error.
    pub fn resolve(&self, transcript: &str) -> Option<&Location> {
        let folded = transcript.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| folded.contains(kw.as_str())))
            .map(DestinationRule::location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_keyword_selects_its_rule() {
        let matcher = TranscriptMatcher::with_default_rules();
        let cases = [
            ("take me to marina beach please", 2),
            ("anna", 3),
            ("head to the university", 3),
            ("guindy please", 4),
            ("drop me at the station", 4),
            ("back to central", 1),
            ("starting point", 1),
        ];
        for (transcript, expected_id) in cases {
            assert_eq!(
                matcher.resolve(transcript).map(|l| l.id),
                Some(expected_id),
                "transcript: {:?}",
                transcript
            );
        }
    }

    #[test]
    fn unmatched_transcript_is_none() {
        let matcher = TranscriptMatcher::with_default_rules();
        assert_eq!(matcher.resolve("asdf"), None);
        assert_eq!(matcher.resolve("take me home"), None);
    }

    #[test]
    fn empty_transcript_is_none() {
        let matcher = TranscriptMatcher::with_default_rules();
        assert_eq!(matcher.resolve(""), None);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let matcher = TranscriptMatcher::with_default_rules();
        assert_eq!(matcher.resolve("MARINA BEACH!").map(|l| l.id), Some(2));
        assert_eq!(matcher.resolve("Guindy Station").map(|l| l.id), Some(4));
    }

    // Regression: the tie-break is declaration order; a reordered table
    // must show up as a failure here.
    #[test]
    fn first_declared_rule_wins_on_overlap() {
        let matcher = TranscriptMatcher::with_default_rules();
        // Mentions both Central (rule 4) and Marina (rule 1).
        assert_eq!(
            matcher.resolve("from central chennai to marina beach").map(|l| l.id),
            Some(2)
        );
        // Mentions both Anna (rule 2) and Guindy (rule 3).
        assert_eq!(
            matcher.resolve("anna university then guindy station").map(|l| l.id),
            Some(3)
        );
    }

    #[test]
    fn keyword_inside_a_longer_word_still_matches() {
        // Substring semantics are part of the contract, quirks included.
        let matcher = TranscriptMatcher::with_default_rules();
        assert_eq!(matcher.resolve("the beachfront").map(|l| l.id), Some(2));
    }

    #[test]
    fn custom_rule_order_changes_the_winner() {
        let matcher = TranscriptMatcher::new(vec![
            DestinationRule::new(&["central"], CENTRAL_CHENNAI),
            DestinationRule::new(&["marina"], MARINA_BEACH),
        ]);
        assert_eq!(
            matcher.resolve("central or marina").map(|l| l.id),
            Some(1)
        );
    }
}
