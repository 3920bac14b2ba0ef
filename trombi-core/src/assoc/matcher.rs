use crate::domain::Person;

fn occurs(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    !needle.is_empty() && haystack.contains(&needle)
}

/// True when the file name carries both the person's names, or their reference.
/// Case-insensitive substring test; blank fields never match.
pub fn matches(person: &Person, file_name: &str) -> bool {
    let name = file_name.to_lowercase();
    (occurs(&name, &person.first_name) && occurs(&name, &person.last_name))
        || occurs(&name, &person.reference)
}

/// First person, in slice order, accepted by `eligible` and matching `file_name`.
pub fn find_match<'a>(
    persons: &'a [Person],
    file_name: &str,
    eligible: impl Fn(&Person) -> bool,
) -> Option<&'a Person> {
    persons
        .iter()
        .find(|p| eligible(p) && matches(p, file_name))
}
