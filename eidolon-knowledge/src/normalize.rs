//! Text normalization shared by the loader and both matchers.

/// Normalize a message or pattern for matching.
///
/// Case-folds, collapses whitespace runs to a single space, and treats
/// punctuation as a word separator, so "Hello,friend" compares equal to
/// "hello friend". An apostrophe inside a word contracts instead of
/// splitting ("don't" becomes "dont"). The identical function runs at load
/// time and at match time, so pattern comparison is a plain equality test
/// per request.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    let mut prev_alphanumeric = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
            prev_alphanumeric = true;
            continue;
        }

        // An intra-word apostrophe contracts; every other non-alphanumeric
        // character, punctuation included, separates words.
        if matches!(ch, '\'' | '\u{2019}')
            && prev_alphanumeric
            && chars.peek().is_some_and(|next| next.is_alphanumeric())
        {
            continue;
        }

        pending_space = true;
        prev_alphanumeric = false;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(normalize("  Hello  "), "hello");
    }

    #[test]
    fn collapses_inner_whitespace() {
        assert_eq!(normalize("who \t are\n\n you"), "who are you");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(normalize("Hello, friend!"), "hello friend");
        assert_eq!(normalize("what should I do... when afraid?"), "what should i do when afraid");
    }

    #[test]
    fn punctuation_separates_joined_words() {
        assert_eq!(normalize("Hello,friend"), "hello friend");
        assert_eq!(normalize("memento.mori"), "memento mori");
        assert_eq!(normalize("wait...what"), "wait what");
    }

    #[test]
    fn intra_word_apostrophes_contract() {
        assert_eq!(normalize("don't"), "dont");
        assert_eq!(normalize("don\u{2019}t"), "dont");
        assert_eq!(normalize("'quoted'"), "quoted");
        assert_eq!(normalize("rock 'n' roll"), "rock n roll");
    }

    #[test]
    fn handles_non_ascii() {
        assert_eq!(normalize("Grüß DICH"), "grüß dich");
    }

    #[test]
    fn empty_and_punctuation_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!..."), "");
        assert_eq!(normalize("   "), "");
    }
}
