//! Vowel-group syllable guesser.
//!
//! Counts maximal runs of `a e i o u y` as syllable nuclei, then applies a
//! table of English spelling corrections. Each rule fires at most once per
//! word. Imprecise by nature; the pronunciation dictionary is authoritative
//! where it has an entry.

use regex::Regex;
use std::sync::LazyLock;

/// A vowel run, the heuristic syllable nucleus.
static VOWEL_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[aeiouy]+").expect("valid regex"));

/// Spellings that over-count by one nucleus.
static SUBTRACT: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        // give, love, bone, ride
        r"[^aeiou]e$",
        // bared, liked, called, tricked, bashed, matched
        r"[aeiou](?:cc|ff|gg|hh|kk|ll|mm|nn|pp|rr|ss|vv|ww|zz|[cfghklmnprsvwz]|ck|sh|[rt]ch)e[ds]$",
        // absolutely, nicely, likeness, basement, hopeless, tastefully
        r".e(?:ly|less(?:ly)?|ness?|ful(?:ly)?|ments?)$",
        // action, fiction
        r"ion",
        // special, initial, physician
        r"[ct]ia[nl]",
        // illustrious, but not spacious or anxious
        r"[^cx]iou",
        // amnesia
        r"sia$",
        // dialogue, intrigue
        r".gue$",
    ])
});

/// Spellings that under-count by one nucleus.
static ADD: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        // alias, phobia
        r"i[aiou]",
        // salient, gradient, transient
        r"[dls]ien",
        // -Vble and -mble
        r"[aeiouym]ble$",
        // agreeable
        r"[aeiou]{3}",
        r"^mc",
        // racism
        r"ism$",
        // bubble, cattle, cackle, sample, angle
        r"(?:bb|cc|dd|ff|gg|hh|jj|kk|ll|mm|nn|pp|qq|rr|ss|tt|vv|ww|xx|zz|--|ck|mp|ng)le$",
        // couldnt
        r"dnt$",
        // annoying, layer
        r"[aeiou]y[aeiou]",
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
}

/// Estimate the syllables in `word`.
///
/// Returns 0 when `word` has no letters at all, otherwise at least 1.
pub fn guess(word: &str) -> usize {
    if !word.chars().any(char::is_alphabetic) {
        return 0;
    }
    if word.chars().count() == 1 {
        return 1;
    }

    let word = word.to_lowercase().replace('\'', "");

    let nuclei = VOWEL_RUN.find_iter(&word).count();
    let over = SUBTRACT.iter().filter(|re| re.is_match(&word)).count();
    let under = ADD.iter().filter(|re| re.is_match(&word)).count();

    (nuclei + under).saturating_sub(over).max(1)
}
