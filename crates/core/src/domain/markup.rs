/// Escapes the angle brackets of backend-provided text before it reaches any
/// renderer. Other characters pass through untouched.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_markup;

    #[test]
    fn script_tag_is_neutralized() {
        assert_eq!(escape_markup("<script>"), "&lt;script&gt;");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_markup("1 2\n3 & 4"), "1 2\n3 & 4");
    }

    #[test]
    fn comparison_operators_are_escaped() {
        assert_eq!(escape_markup("a < b > c"), "a &lt; b &gt; c");
    }
}
