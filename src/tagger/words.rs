//! Word stamping helpers for the tagger

use crate::markup::{EM_DASH, ITALIC_CLOSE, ITALIC_OPEN, NBSP};

/// Split leading `&nbsp;` indentation markers from the text they indent
pub fn split_indent(text: &str) -> (&str, &str) {
    let mut rest = text;
    while let Some(stripped) = rest.strip_prefix(NBSP) {
        rest = stripped;
    }
    text.split_at(text.len() - rest.len())
}

pub fn em_dashes(word: &str) -> String {
    word.replace("--", EM_DASH)
}

/// Keeps `<i>` spans balanced inside each word tag.
///
/// Emphasis that crosses word or line boundaries is closed at the end of
/// every word and reopened at the start of the next one.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmphasisBalancer {
    open: bool,
}

impl EmphasisBalancer {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn balance(&mut self, word: &str) -> String {
        let mut out = String::with_capacity(word.len() + ITALIC_OPEN.len() + ITALIC_CLOSE.len());
        if self.open {
            out.push_str(ITALIC_OPEN);
        }

        let mut rest = word;
        loop {
            let next_open = rest.find(ITALIC_OPEN);
            let next_close = rest.find(ITALIC_CLOSE);
            let (idx, is_open_tag) = match (next_open, next_close) {
                (Some(o), Some(c)) if o < c => (o, true),
                (_, Some(c)) => (c, false),
                (Some(o), None) => (o, true),
                (None, None) => break,
            };
            out.push_str(&rest[..idx]);
            if is_open_tag {
                if !self.open {
                    out.push_str(ITALIC_OPEN);
                    self.open = true;
                }
                rest = &rest[idx + ITALIC_OPEN.len()..];
            } else {
                if self.open {
                    out.push_str(ITALIC_CLOSE);
                    self.open = false;
                }
                rest = &rest[idx + ITALIC_CLOSE.len()..];
            }
        }
        out.push_str(rest);

        if self.open {
            out.push_str(ITALIC_CLOSE);
        }
        out.replace("<i></i>", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_indent() {
        assert_eq!(split_indent("&nbsp;&nbsp;Tyger"), ("&nbsp;&nbsp;", "Tyger"));
        assert_eq!(split_indent("Tyger"), ("", "Tyger"));
        assert_eq!(split_indent("&nbsp;"), ("&nbsp;", ""));
    }

    #[test]
    fn test_balanced_word_untouched() {
        let mut balancer = EmphasisBalancer::default();
        assert_eq!(balancer.balance("<i>hello</i>"), "<i>hello</i>");
        assert_eq!(balancer.balance("plain"), "plain");
        assert!(!balancer.is_open());
    }

    #[test]
    fn test_span_across_words() {
        let mut balancer = EmphasisBalancer::default();
        assert_eq!(balancer.balance("<i>Arma"), "<i>Arma</i>");
        assert!(balancer.is_open());
        assert_eq!(balancer.balance("virumque"), "<i>virumque</i>");
        assert_eq!(balancer.balance("cano</i>,"), "<i>cano</i>,");
        assert!(!balancer.is_open());
        assert_eq!(balancer.balance("Troiae"), "Troiae");
    }

    #[test]
    fn test_stray_close_is_dropped() {
        let mut balancer = EmphasisBalancer::default();
        assert_eq!(balancer.balance("word</i>"), "word");
    }

    #[test]
    fn test_em_dashes() {
        assert_eq!(em_dashes("so--then"), "so\u{2014}then");
    }
}
