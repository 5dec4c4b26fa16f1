//! Destination explorer: a fixed catalogue searched on the client.

use crate::models::Destination;

const CATALOGUE: [(&str, &str, &str); 14] = [
    ("1", "Paris", "/images/paris.png"),
    ("2", "Tokyo", "/images/tokyo.png"),
    ("3", "New York", "/images/nyc.png"),
    ("4", "Mumbai", "/images/mumbai.png"),
    ("5", "Sydney", "/images/sydney.png"),
    ("6", "Rome", "/images/rome.png"),
    ("7", "Bogota", "/images/bogota.png"),
    ("8", "Cairo", "/images/cairo.png"),
    ("9", "Bangalore", "/images/bangalore.png"),
    ("10", "Istanbul", "/images/istanbul.png"),
    ("11", "Bangkok", "/images/bangkok.png"),
    ("12", "Mexico City", "/images/mexicocity.png"),
    ("13", "Moscow", "/images/moscow.png"),
    ("14", "Tijuana", "/images/tijuana.png"),
];

pub fn catalogue() -> Vec<Destination> {
    CATALOGUE
        .iter()
        .map(|(id, name, image)| Destination {
            id: id.to_string(),
            name: name.to_string(),
            image: image.to_string(),
        })
        .collect()
}

/// Case-insensitive substring match on the name. An empty term keeps everything.
pub fn filter<'a>(destinations: &'a [Destination], term: &str) -> Vec<&'a Destination> {
    let needle = term.trim().to_lowercase();
    destinations
        .iter()
        .filter(|d| d.name.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExploreView {
    pub destinations: Vec<Destination>,
    pub search: String,
}

impl Default for ExploreView {
    fn default() -> Self {
        Self { destinations: catalogue(), search: String::new() }
    }
}

impl ExploreView {
    pub fn visible(&self) -> Vec<&Destination> {
        filter(&self.destinations, &self.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest(name: &str) -> Destination {
        Destination { id: name.into(), name: name.into(), image: String::new() }
    }

    #[test]
    fn filter_is_a_case_insensitive_substring_match() {
        let list = vec![dest("Tokyo"), dest("Rome")];
        let names: Vec<&str> = filter(&list, "to").iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Tokyo"]);

        let upper: Vec<&str> = filter(&list, "ROM").iter().map(|d| d.name.as_str()).collect();
        assert_eq!(upper, vec!["Rome"]);
    }

    #[test]
    fn empty_term_keeps_the_whole_catalogue() {
        let view = ExploreView::default();
        assert_eq!(view.visible().len(), 14);
    }

    #[test]
    fn catalogue_search_matches_inside_names() {
        let view = ExploreView { search: "ban".into(), ..ExploreView::default() };
        let names: Vec<&str> = view.visible().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Bangalore", "Bangkok"]);
    }

    #[test]
    fn no_match_is_empty() {
        let view = ExploreView { search: "zzz".into(), ..ExploreView::default() };
        assert!(view.visible().is_empty());
    }
}
