use serde::ser::{Serialize, SerializeMap, Serializer};

/// Sorted, deduplicated domains of one genre
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreResult {
    pub name: String,
    pub domains: Vec<String>,
}

/// Genre results in run order.
///
/// Serializes as a JSON object keyed by genre name, keys in run order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreResults {
    genres: Vec<GenreResult>,
}

impl GenreResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a genre, replacing an earlier result of the same name in place
    pub fn insert(&mut self, result: GenreResult) {
        match self.genres.iter_mut().find(|g| g.name == result.name) {
            Some(existing) => *existing = result,
            None => self.genres.push(result),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.genres
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.domains.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GenreResult> {
        self.genres.iter()
    }

    /// Every domain, genre by genre, in list order
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.genres
            .iter()
            .flat_map(|g| g.domains.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }
}

impl FromIterator<GenreResult> for GenreResults {
    fn from_iter<I: IntoIterator<Item = GenreResult>>(iter: I) -> Self {
        let mut results = Self::new();
        for result in iter {
            results.insert(result);
        }
        results
    }
}

impl Serialize for GenreResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.genres.len()))?;
        for genre in &self.genres {
            map.serialize_entry(&genre.name, &genre.domains)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre(name: &str, domains: &[&str]) -> GenreResult {
        GenreResult {
            name: name.to_string(),
            domains: domains.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_serializes_in_run_order() {
        let results: GenreResults = [
            genre("gambling", &["casino.com"]),
            genre("adult", &["a-site.com", "b-site.com"]),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&results).unwrap();
        assert_eq!(
            json,
            r#"{"gambling":["casino.com"],"adult":["a-site.com","b-site.com"]}"#
        );
    }

    #[test]
    fn test_insert_replaces_same_name() {
        let mut results = GenreResults::new();
        results.insert(genre("drugs", &["old.com"]));
        results.insert(genre("drugs", &["new.com"]));
        assert_eq!(results.len(), 1);
        assert_eq!(results.get("drugs").unwrap().to_vec(), vec!["new.com"]);
    }

    #[test]
    fn test_domains_flattens_in_order() {
        let results: GenreResults = [genre("a", &["x1.com", "x2.com"]), genre("b", &["y1.com"])]
            .into_iter()
            .collect();
        let all: Vec<_> = results.domains().collect();
        assert_eq!(all, vec!["x1.com", "x2.com", "y1.com"]);
    }
}
