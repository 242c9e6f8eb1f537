//! Natural sort keys: `file2` sorts before `file10`.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

static DIGIT_RUN: OnceLock<Regex> = OnceLock::new();

fn digit_run() -> &'static Regex {
    DIGIT_RUN.get_or_init(|| Regex::new("[0-9]+").expect("digit run pattern is valid"))
}

/// An unsigned integer of any length, stored as its decimal digits.
///
/// Leading zeros are dropped on construction so that `007` and `7` compare
/// equal. Ordering is by digit count first, then digit by digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digits(String);

impl Digits {
    fn from_run(run: &str) -> Self {
        let trimmed = run.trim_start_matches('0');
        if trimmed.is_empty() {
            Self("0".to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for Digits {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Digits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    /// A maximal non-digit run, lower-cased
    Text(String),
    /// A maximal digit run, compared by value
    Number(Digits),
}

/// Comparison key for natural ordering of file names.
///
/// The token sequence always starts with a `Text` token and alternates
/// `Text`/`Number`, with empty `Text` tokens where the name starts or ends with
/// digits. Two keys therefore never compare a number against text at the same
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NaturalKey(Vec<Token>);

impl NaturalKey {
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }
}

/// Derive the natural sort key for `name`.
pub fn natural_key(name: &str) -> NaturalKey {
    let mut tokens = Vec::new();
    let mut last = 0;

    for run in digit_run().find_iter(name) {
        tokens.push(Token::Text(name[last..run.start()].to_lowercase()));
        tokens.push(Token::Number(Digits::from_run(run.as_str())));
        last = run.end();
    }
    tokens.push(Token::Text(name[last..].to_lowercase()));

    NaturalKey(tokens)
}

/// Compare two names naturally, breaking ties on the raw string.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a)
        .cmp(&natural_key(b))
        .then_with(|| a.cmp(b))
}

/// Sort names in place in natural order.
pub fn sort_natural(names: &mut [String]) {
    names.sort_by_cached_key(|name| (natural_key(name), name.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    fn num(s: &str) -> Token {
        Token::Number(Digits::from_run(s))
    }

    #[test]
    fn test_numeric_runs_compare_by_value() {
        assert!(natural_key("file2") < natural_key("file10"));
        assert!(natural_key("file10") > natural_key("file9"));
        assert!(natural_key("img_1.png") < natural_key("img_2.png"));
        assert!(natural_key("ep 9 part 2") < natural_key("ep 10 part 1"));
    }

    #[test]
    fn test_text_runs_are_case_folded() {
        assert_eq!(natural_key("ABC"), natural_key("abc"));
        assert!(natural_key("Banana") > natural_key("apple"));
    }

    #[test]
    fn test_token_shape() {
        assert_eq!(
            natural_key("file10.txt").tokens(),
            &[text("file"), num("10"), text(".txt")]
        );
        assert_eq!(
            natural_key("10abc").tokens(),
            &[text(""), num("10"), text("abc")]
        );
        assert_eq!(
            natural_key("track7").tokens(),
            &[text("track"), num("7"), text("")]
        );
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(natural_key("").tokens(), &[text("")]);
    }

    #[test]
    fn test_leading_zeros_compare_equal() {
        assert_eq!(natural_key("a007"), natural_key("a7"));
        assert_eq!(natural_key("a000"), natural_key("a0"));
        // raw string decides the tie
        assert_eq!(natural_cmp("a007", "a7"), Ordering::Less);
    }

    #[test]
    fn test_numbers_longer_than_u64() {
        let small = "x18446744073709551615";
        let big = "x18446744073709551616";
        let bigger = "x100000000000000000000000";
        assert!(natural_key(small) < natural_key(big));
        assert!(natural_key(big) < natural_key(bigger));
    }

    #[test]
    fn test_sort_natural() {
        let mut names = vec![
            "file10.txt".to_string(),
            "file2.txt".to_string(),
            "File1.txt".to_string(),
            "file1.txt".to_string(),
        ];
        sort_natural(&mut names);
        assert_eq!(
            names,
            vec!["File1.txt", "file1.txt", "file2.txt", "file10.txt"]
        );
    }

    proptest! {
        #[test]
        fn prop_numbers_order_by_value(a in 0u64..1_000_000, b in 0u64..1_000_000) {
            let left = natural_key(&format!("file{}", a));
            let right = natural_key(&format!("file{}", b));
            prop_assert_eq!(left.cmp(&right), a.cmp(&b));
        }

        #[test]
        fn prop_key_alternates_text_and_number(name in ".{0,24}") {
            let key = natural_key(&name);
            for (i, token) in key.tokens().iter().enumerate() {
                if i % 2 == 0 {
                    prop_assert!(matches!(token, Token::Text(_)));
                } else {
                    prop_assert!(matches!(token, Token::Number(_)));
                }
            }
            prop_assert_eq!(key.tokens().len() % 2, 1);
        }
    }
}
