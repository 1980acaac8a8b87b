//! Communities and keywords searched per disaster type.

use crate::common::DisasterType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerms {
    pub communities: Vec<String>,
    pub keywords: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Lookup for a disaster type string. Unknown types fall back to the general
/// news communities and use the type itself as the only keyword.
pub fn search_terms(disaster_type: &str) -> SearchTerms {
    let Ok(kind) = disaster_type.parse::<DisasterType>() else {
        return SearchTerms {
            communities: owned(&["news", "worldnews", "disaster"]),
            keywords: vec![disaster_type.to_string()],
        };
    };

    let (communities, keywords): (&[&str], &[&str]) = match kind {
        DisasterType::Flood => (
            &["news", "worldnews", "disaster", "weather", "floods"],
            &["flood", "flooding", "heavy rain", "inundation"],
        ),
        DisasterType::Earthquake => (
            &["news", "worldnews", "disaster", "earthquakes"],
            &["earthquake", "tremor", "seismic", "aftershock"],
        ),
        DisasterType::Cyclone => (
            &["news", "worldnews", "disaster", "weather", "hurricanes"],
            &["cyclone", "hurricane", "typhoon", "storm surge"],
        ),
        DisasterType::Wildfire => (
            &["news", "worldnews", "disaster", "wildfires"],
            &["wildfire", "forest fire", "bushfire", "fire containment"],
        ),
        DisasterType::Landslide => (
            &["news", "worldnews", "disaster", "geology"],
            &["landslide", "mudslide", "debris flow", "rockfall"],
        ),
    };

    SearchTerms {
        communities: owned(communities),
        keywords: owned(keywords),
    }
}

/// `(k1 OR k2 OR ...) {location} -inurl:(signup OR login)`
pub fn build_query(keywords: &[String], location: &str) -> String {
    format!(
        "({}) {} -inurl:(signup OR login)",
        keywords.join(" OR "),
        location
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flood_terms() {
        let terms = search_terms("flood");
        assert_eq!(
            terms.communities,
            vec!["news", "worldnews", "disaster", "weather", "floods"]
        );
        assert_eq!(terms.keywords.len(), 4);
    }

    #[test]
    fn test_unknown_type_falls_back() {
        let terms = search_terms("volcano");
        assert_eq!(terms.communities, vec!["news", "worldnews", "disaster"]);
        assert_eq!(terms.keywords, vec!["volcano"]);
    }

    #[test]
    fn test_query_format() {
        let terms = search_terms("earthquake");
        assert_eq!(
            build_query(&terms.keywords, "Kathmandu"),
            "(earthquake OR tremor OR seismic OR aftershock) Kathmandu -inurl:(signup OR login)"
        );
    }
}
