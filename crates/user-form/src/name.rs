//! Person name normalisation.

/// Capitalise the first character of every whitespace-delimited word.
///
/// Leading and trailing whitespace is stripped first. The rest of each word
/// and the whitespace between words are kept as typed. Applying the function
/// to its own output returns the same string.
///
/// # Examples
///
/// ```
/// use user_form::capitalize_words;
///
/// assert_eq!(capitalize_words("  john paul  "), "John Paul");
/// assert_eq!(capitalize_words("ada McLovelace"), "Ada McLovelace");
/// ```
#[must_use]
pub fn capitalize_words(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut normalised = String::with_capacity(trimmed.len());
    let mut at_word_start = true;
    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            normalised.push(ch);
        } else if at_word_start {
            at_word_start = false;
            normalised.extend(ch.to_uppercase());
        } else {
            normalised.push(ch);
        }
    }
    normalised
}
