/// Lowercases, drops everything that is not alphanumeric or whitespace, and trims.
/// An absent input normalizes to the empty string. Whitespace left at the
/// edges once punctuation is gone is trimmed too, so `"! mars"` becomes `"mars"`.
pub fn normalize<'a>(text: impl Into<Option<&'a str>>) -> String {
    let Some(text) = text.into() else {
        return String::new();
    };

    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Loose match between a free-text answer and the expected one.
///
/// Accepts equality, a verbose answer that contains the expected one
/// ("it is the pacific ocean"), and a partial answer contained in the
/// expected one ("pacific"). Both substring directions are intentional.
pub fn is_correct(user_text: &str, expected_answer: &str) -> bool {
    let user = normalize(user_text);
    let expected = normalize(expected_answer);
    if user.is_empty() {
        return false;
    }

    user == expected || user.contains(&expected) || expected.contains(&user)
}

/// Uppercases the first letter of every run of letters and lowercases the rest,
/// e.g. "william shakespeare" -> "William Shakespeare", "h2o" -> "H2O".
pub fn title_case(text: &str) -> String {
    let mut previous_is_letter = false;
    let mut titled = String::with_capacity(text.len());
    for c in text.chars() {
        if previous_is_letter {
            titled.extend(c.to_lowercase());
        } else {
            titled.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }
    titled
}
