use crate::model::User;

/// True if `needle` (already lower-cased) occurs in the user's name, email or company name.
pub fn matches(user: &User, needle: &str) -> bool {
    user.name.to_lowercase().contains(needle)
        || user.email.to_lowercase().contains(needle)
        || user.company.name.to_lowercase().contains(needle)
}

/// Case-insensitive filter over name, email and company name. An empty term keeps everything.
pub fn filter_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    let q = term.to_lowercase();
    if q.is_empty() {
        return users.iter().collect();
    }
    users.iter().filter(|u| matches(u, &q)).collect()
}
