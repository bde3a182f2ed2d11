//! Human-readable labels from raw identifiers

/// Turn a camel-case or concatenated identifier into a label
///
/// A space is inserted at every lower→upper transition, before the last
/// capital of an uppercase run that is followed by a lowercase letter, and
/// at every letter→non-letter transition, whitespace included. The first
/// character is then capitalized.
///
/// ```
/// use cfm_mapping::humanize;
///
/// assert_eq!(humanize("redSofaBed").unwrap(), "Red Sofa Bed");
/// assert_eq!(humanize("XMLParser").unwrap(), "XML Parser");
/// ```
///
/// # Errors
///
/// Returns [`crate::Error::EmptyIdentifier`] for an empty input.
pub fn humanize(identifier: &str) -> crate::Result<String> {
    let chars: Vec<char> = identifier.chars().collect();
    if chars.is_empty() {
        return Err(crate::Error::EmptyIdentifier);
    }

    let mut label = String::with_capacity(identifier.len() + 4);
    for (i, &current) in chars.iter().enumerate() {
        if i > 0 && splits_before(chars[i - 1], current, chars.get(i + 1).copied()) {
            label.push(' ');
        }
        label.push(current);
    }

    let mut rest = label.chars();
    let first = rest.next().map(char::to_uppercase);
    Ok(first.into_iter().flatten().chain(rest).collect())
}

fn splits_before(previous: char, current: char, next: Option<char>) -> bool {
    if previous.is_lowercase() && current.is_uppercase() {
        return true;
    }
    if previous.is_uppercase() && current.is_uppercase() && next.is_some_and(char::is_lowercase) {
        return true;
    }
    previous.is_alphabetic() && !current.is_alphabetic()
}
