use std::time::{Duration, Instant};

/// Runs `f` and returns its result together with the wall-clock time it took.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

/// Splits a leading uppercase letter off `word`, returning the lowercased
/// word and whether it was capitalised.
pub fn decapitalize(word: &str) -> (String, bool) {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            let mut lowered: String = first.to_lowercase().collect();
            lowered.push_str(chars.as_str());
            (lowered, true)
        }
        _ => (word.to_string(), false),
    }
}

/// Uppercases the first character of `word`.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_returns_result() {
        let (value, elapsed) = timed(|| 40 + 2);
        assert_eq!(value, 42);
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn test_decapitalize() {
        assert_eq!(decapitalize("Hello"), ("hello".to_string(), true));
        assert_eq!(decapitalize("hello"), ("hello".to_string(), false));
        assert_eq!(decapitalize("ÉCOLE"), ("éCOLE".to_string(), true));
        assert_eq!(decapitalize(""), (String::new(), false));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hello"), "Hello");
        assert_eq!(capitalize("école"), "École");
        assert_eq!(capitalize(""), "");
    }
}
