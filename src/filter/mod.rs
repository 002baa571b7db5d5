use std::fmt;

use serde::Serialize;

use crate::directory::Record;

/// Which record fields a search term is matched against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterScope {
    #[default]
    All,
    Name,
    Email,
    Phone,
    Location,
}

impl FilterScope {
    pub const ALL: [FilterScope; 5] = [
        FilterScope::All,
        FilterScope::Name,
        FilterScope::Email,
        FilterScope::Phone,
        FilterScope::Location,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all" | "any" | "*" => Some(Self::All),
            "name" => Some(Self::Name),
            "email" | "mail" => Some(Self::Email),
            "phone" | "tel" => Some(Self::Phone),
            "location" | "loc" | "city" | "country" => Some(Self::Location),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Location => "location",
        }
    }
}

impl fmt::Display for FilterScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A case-folded search term bound to a scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchPredicate {
    needle: String,
    scope: FilterScope,
}

impl SearchPredicate {
    pub fn new(term: &str, scope: FilterScope) -> Self {
        Self {
            needle: term.to_lowercase(),
            scope,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        if self.is_empty() {
            return true;
        }
        match self.scope {
            FilterScope::All => {
                self.hit(&record.full_name)
                    || self.hit(&record.email)
                    || self.hit(&record.city)
                    || self.hit(&record.country)
                    || self.hit(&record.phone)
            }
            FilterScope::Name => self.hit(&record.full_name),
            FilterScope::Email => self.hit(&record.email),
            FilterScope::Phone => self.hit(&record.phone),
            FilterScope::Location => self.hit(&record.city) || self.hit(&record.country),
        }
    }

    fn hit(&self, field: &str) -> bool {
        field.to_lowercase().contains(&self.needle)
    }
}

/// Projects `source` onto the records matching `term` within `scope`,
/// keeping source order. An empty term keeps everything.
pub fn evaluate(source: &[Record], term: &str, scope: FilterScope) -> Vec<Record> {
    let predicate = SearchPredicate::new(term, scope);
    if predicate.is_empty() {
        return source.to_vec();
    }
    source
        .iter()
        .filter(|r| predicate.matches(r))
        .cloned()
        .collect()
}
