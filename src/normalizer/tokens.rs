//! Word-boundary tokenizer: runs of word characters, and every other
//! character as a token of its own

/// Word characters are alphanumerics and the underscore
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Split `text` into word runs and single non-word characters.
/// Concatenating the tokens yields `text` again.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut run_start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if is_word_char(ch) {
            run_start.get_or_insert(idx);
            continue;
        }
        if let Some(start) = run_start.take() {
            tokens.push(&text[start..idx]);
        }
        tokens.push(&text[idx..idx + ch.len_utf8()]);
    }
    if let Some(start) = run_start {
        tokens.push(&text[start..]);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_words_and_punctuation() {
        assert_eq!(
            tokenize(r#""Hello," she said."#),
            vec!["\"", "Hello", ",", "\"", " ", "she", " ", "said", "."]
        );
    }

    #[test]
    fn test_underscores_stay_in_word_runs() {
        assert_eq!(tokenize("_hello_ world"), vec!["_hello_", " ", "world"]);
    }

    #[test]
    fn test_each_space_is_a_token() {
        assert_eq!(tokenize("a  b"), vec!["a", " ", " ", "b"]);
    }

    #[test]
    fn test_unicode_letters() {
        assert_eq!(tokenize("café—naïve"), vec!["café", "—", "naïve"]);
        assert!(tokenize("").is_empty());
    }
}
