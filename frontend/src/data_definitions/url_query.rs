//! The raw archive query string carried by archive routes.

use std::fmt::Display;

/// Everything after the `?` of an archive URL, kept verbatim.
///
/// Decoding happens in the archive itself, so unknown parameters survive a
/// round-trip through the router untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArchiveUrlQuery(pub String);

impl From<&str> for ArchiveUrlQuery {
    fn from(value: &str) -> Self {
        ArchiveUrlQuery(value.trim_start_matches('?').to_string())
    }
}

impl From<String> for ArchiveUrlQuery {
    fn from(value: String) -> Self {
        ArchiveUrlQuery::from(value.as_str())
    }
}

// Display the query in a way that can be parsed by From<&str>
impl Display for ArchiveUrlQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn leading_question_mark_is_dropped() {
        let query = ArchiveUrlQuery::from("?q=gutter&mt=metal");
        assert_eq!(query.to_string(), "q=gutter&mt=metal");
        assert_eq!(ArchiveUrlQuery::from(query.to_string().as_str()), query);
    }

    #[test]
    fn unknown_parameters_are_kept_verbatim() {
        let query = ArchiveUrlQuery::from(String::from("utm_source=mail&q=roof%20repair"));
        assert_eq!(query, ArchiveUrlQuery("utm_source=mail&q=roof%20repair".to_string()));
        assert_eq!(ArchiveUrlQuery::default().to_string(), "");
    }
}
