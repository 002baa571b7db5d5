use serde::Serialize;

/// A single user row as the engine sees it. Built once at the fetch
/// boundary and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Record {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub country: String,
}

impl Record {
    pub fn new(
        first: &str,
        last: &str,
        email: &str,
        phone: &str,
        city: &str,
        country: &str,
    ) -> Self {
        Self {
            full_name: join_name(first, last),
            email: email.to_string(),
            phone: phone.to_string(),
            city: city.to_string(),
            country: country.to_string(),
        }
    }

    pub fn location(&self) -> String {
        match (self.city.is_empty(), self.country.is_empty()) {
            (false, false) => format!("{}, {}", self.city, self.country),
            (false, true) => self.city.clone(),
            (true, false) => self.country.clone(),
            (true, true) => String::new(),
        }
    }
}

fn join_name(first: &str, last: &str) -> String {
    let first = first.trim();
    let last = last.trim();
    if last.is_empty() {
        return first.to_string();
    }
    if first.is_empty() {
        return last.to_string();
    }
    format!("{first} {last}")
}
