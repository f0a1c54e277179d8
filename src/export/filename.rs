//! Filesystem-safe slugs from chapter titles.

use deunicode::deunicode_char;

use crate::config::DEFAULT_MAX_SLUG_CHARS;

/// Turn a title into a lowercase, `_`-separated file name component.
///
/// Keeps whole words only, stopping at the first word that would bring the
/// total (separators excluded) to 50 characters or more.
///
/// # Examples
///
/// ```
/// use chapnb::export::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Chapter One"), "chapter_one");
/// assert_eq!(sanitize_filename("Ünïcödé: Straße"), "unicode_strasse");
/// assert_eq!(sanitize_filename("docs/Getting Started"), "getting_started");
/// assert_eq!(sanitize_filename("!!!"), "");
/// ```
pub fn sanitize_filename(title: &str) -> String {
    sanitize_filename_with_limit(title, DEFAULT_MAX_SLUG_CHARS)
}

/// [`sanitize_filename`] with an explicit bound on kept characters.
pub fn sanitize_filename_with_limit(title: &str, max_chars: usize) -> String {
    let ascii = transliterate(title).to_ascii_lowercase();

    let base = match ascii.rfind(|c: char| c == '/' || c == '\\') {
        Some(pos) => &ascii[pos + 1..],
        None => ascii.as_str(),
    };

    let replaced: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_digit() || c.is_ascii_lowercase() {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut kept = Vec::new();
    let mut count = 0;
    for word in replaced.split('_').filter(|w| !w.is_empty()) {
        if count + word.len() >= max_chars {
            break;
        }
        count += word.len();
        kept.push(word);
    }

    kept.join("_").trim_end_matches('_').to_string()
}

/// Replace non-ASCII characters with their closest ASCII spelling,
/// dropping those that have none.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
        } else if let Some(ascii) = deunicode_char(c) {
            out.push_str(ascii);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_simple_title() {
        assert_eq!(sanitize_filename("Chapter One"), "chapter_one");
        assert_eq!(sanitize_filename("  Hello,   World!  "), "hello_world");
    }

    #[test]
    fn test_numbers_kept() {
        assert_eq!(sanitize_filename("Python 3.12 Basics"), "python_3_12_basics");
    }

    #[test]
    fn test_transliteration() {
        assert_eq!(sanitize_filename("Café Crème"), "cafe_creme");
        assert_eq!(sanitize_filename("Ærøskøbing"), "aeroskobing");
    }

    #[test]
    fn test_path_prefix_stripped() {
        assert_eq!(sanitize_filename("a/b/Intro"), "intro");
        assert_eq!(sanitize_filename("C:\\Users\\Notes"), "notes");
        assert_eq!(sanitize_filename("trailing/"), "");
    }

    #[test]
    fn test_empty() {
        assert_eq!(sanitize_filename(""), "");
        assert_eq!(sanitize_filename("   "), "");
        assert_eq!(sanitize_filename("___"), "");
    }

    #[test]
    fn test_truncates_on_word_boundary() {
        assert_eq!(
            sanitize_filename_with_limit("hello world wonderful universe", 15),
            "hello_world"
        );
        assert_eq!(
            sanitize_filename_with_limit("hello world wonderful universe", 19),
            "hello_world"
        );
        assert_eq!(
            sanitize_filename_with_limit("hello world wonderful universe", 20),
            "hello_world_wonderful"
        );
    }

    #[test]
    fn test_stops_at_first_word_that_does_not_fit() {
        // "ab" would still fit after "toolongword" is rejected, but words
        // after the cut are never kept.
        assert_eq!(sanitize_filename_with_limit("one toolongword ab", 10), "one");
    }

    #[test]
    fn test_default_bound() {
        let title = "The Quick Brown Fox Jumps Over The Lazy Dog And Keeps On Running Far Away";
        let slug = sanitize_filename(title);
        assert_eq!(slug, "the_quick_brown_fox_jumps_over_the_lazy_dog_and_keeps_on");
        assert!(slug.replace('_', "").len() < 50);
    }

    #[test]
    fn test_first_word_too_long() {
        let title = "a".repeat(60);
        assert_eq!(sanitize_filename(&title), "");
    }

    proptest! {
        #[test]
        fn prop_bounded_and_trimmed(title in "\\PC{0,120}") {
            let slug = sanitize_filename(&title);
            prop_assert!(slug.replace('_', "").len() < 50);
            prop_assert!(!slug.starts_with('_'));
            prop_assert!(!slug.ends_with('_'));
            prop_assert!(!slug.contains("__"));
            prop_assert!(slug.chars().all(|c| c == '_' || c.is_ascii_digit() || c.is_ascii_lowercase()));
        }

        #[test]
        fn prop_deterministic(title in "\\PC{0,60}") {
            prop_assert_eq!(sanitize_filename(&title), sanitize_filename(&title));
        }

        #[test]
        fn prop_whole_words_only(words in proptest::collection::vec("[a-z]{1,12}", 0..12), limit in 1usize..60) {
            let title = words.join(" ");
            let slug = sanitize_filename_with_limit(&title, limit);
            let kept: Vec<&str> = slug.split('_').filter(|w| !w.is_empty()).collect();
            prop_assert!(kept.len() <= words.len());
            for (word, original) in kept.iter().zip(&words) {
                prop_assert_eq!(*word, original.as_str());
            }
        }
    }
}
