//! Name casing for generated types and files

use convert_case::{Case, Casing};

/// `user_profile` -> `UserProfile`, `.model` -> `Model`
pub fn pascal_case(input: &str) -> String {
    words(input).to_case(Case::Pascal)
}

/// `UserProfile` -> `user-profile`
pub fn kebab_case(input: &str) -> String {
    words(input).to_case(Case::Kebab)
}

// Punctuation such as the dot in `.model` is a word break, not part of a word.
fn words(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect()
}
