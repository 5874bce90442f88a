//! Nearby facility locator.
//!
//! Resolves to a map search link. Locations are used exactly as typed; no
//! geocoding and no HTML escaping here.

use super::{FeatureHandler, FeatureKind};
use crate::matcher::normalize;
use crate::templates::{FACILITY_PROMPT, MAPS_SEARCH_BASE};
use crate::types::FeatureRequest;
use regex::Regex;
use std::sync::LazyLock;

static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{5,6})\b").expect("valid postal code pattern"));

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:in|at|near|my city is)\s+([a-zA-Z\s]+)").expect("valid location pattern")
});

static FACILITY_INTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(hospital|clinic|doctor|medical center|emergency room)\b")
        .expect("valid facility intent pattern")
});

static SEARCH_INTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(find|search|where|nearest|nearby)\b").expect("valid search intent pattern")
});

/// Words that follow "in"/"at" without naming a place ("in pain")
const NOT_A_LOCATION: &[&str] = &[
    "pain",
    "trouble",
    "danger",
    "bed",
    "hospital",
    "clinic",
    "emergency",
    "need",
    "love",
    "doubt",
    "general",
    "particular",
    "mind",
    "fact",
];

/// Map search URL for a location
pub fn maps_link(location: &str) -> String {
    format!(
        "{}hospitals+near+{}",
        MAPS_SEARCH_BASE,
        location.replace(' ', "+")
    )
}

/// HTML answer carrying the map link
pub fn render_facility_link(location: &str) -> String {
    let link = maps_link(location);
    format!(
        "Here is a list of medical facilities near <strong>{loc}</strong>:<br><br><a href='{link}' target='_blank' style='color: #00bfa5; font-weight: bold; text-decoration: none;'>📍 Click here to view Hospitals in {loc} on Google Maps</a><br><br><em>Please call ahead to confirm availability.</em>",
        loc = location,
        link = link
    )
}

/// Facility locator feature handler
#[derive(Debug, Clone)]
pub struct FacilityLocator {
    stoplist: Vec<String>,
}

impl FacilityLocator {
    pub fn new<I, S>(stoplist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stoplist: stoplist
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(NOT_A_LOCATION)
    }

    fn is_plausible_location(&self, location: &str) -> bool {
        !self.stoplist.iter().any(|w| w == location) && location.chars().count() > 2
    }
}

impl Default for FacilityLocator {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FeatureHandler for FacilityLocator {
    fn kind(&self) -> FeatureKind {
        FeatureKind::Facility
    }

    fn try_handle(&self, input: &str) -> FeatureRequest {
        // A bare postal code answers the location question on its own
        if let Some(caps) = POSTAL_CODE.captures(input) {
            return FeatureRequest::Resolved(render_facility_link(&caps[1]));
        }

        let normalized = normalize(input);
        let location = LOCATION
            .captures(&normalized)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string());

        if FACILITY_INTENT.is_match(&normalized) {
            if let Some(location) = &location {
                return FeatureRequest::Resolved(render_facility_link(location));
            }
            if SEARCH_INTENT.is_match(&normalized) {
                return FeatureRequest::NeedsInput(FACILITY_PROMPT.to_string());
            }
        }

        match location {
            Some(location) if self.is_plausible_location(&location) => {
                FeatureRequest::Resolved(render_facility_link(&location))
            }
            _ => FeatureRequest::NoMatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(input: &str) -> FeatureRequest {
        FacilityLocator::builtin().try_handle(input)
    }

    #[test]
    fn test_maps_link() {
        assert_eq!(
            maps_link("new delhi"),
            "https://www.google.com/maps/search/hospitals+near+new+delhi"
        );
    }

    #[test]
    fn test_bare_postal_code() {
        assert_eq!(
            handle("226016"),
            FeatureRequest::Resolved(render_facility_link("226016"))
        );
        assert_eq!(
            handle("my zip is 90210 thanks"),
            FeatureRequest::Resolved(render_facility_link("90210"))
        );
    }

    #[test]
    fn test_postal_code_needs_standalone_token() {
        // 7 digits is not a postal code
        assert_eq!(handle("call 1234567"), FeatureRequest::NoMatch);
    }

    #[test]
    fn test_intent_with_location() {
        assert_eq!(
            handle("Find a hospital in New Delhi"),
            FeatureRequest::Resolved(render_facility_link("new delhi"))
        );
        assert_eq!(
            handle("clinic near Lucknow?"),
            FeatureRequest::Resolved(render_facility_link("lucknow"))
        );
    }

    #[test]
    fn test_intent_without_location_asks() {
        assert_eq!(
            handle("Where is the nearest hospital?"),
            FeatureRequest::NeedsInput(FACILITY_PROMPT.to_string())
        );
    }

    #[test]
    fn test_intent_without_search_words_passes() {
        assert_eq!(handle("should I see a doctor for my cough"), FeatureRequest::NoMatch);
    }

    #[test]
    fn test_bare_location_answer() {
        assert_eq!(
            handle("I am in London"),
            FeatureRequest::Resolved(render_facility_link("london"))
        );
        assert_eq!(
            handle("my city is Pune"),
            FeatureRequest::Resolved(render_facility_link("pune"))
        );
    }

    #[test]
    fn test_stoplist_and_short_locations() {
        assert_eq!(handle("I am in pain"), FeatureRequest::NoMatch);
        assert_eq!(handle("I'm in bed all day"), FeatureRequest::Resolved(render_facility_link("bed all day")));
        assert_eq!(handle("at ny"), FeatureRequest::NoMatch);
    }

    #[test]
    fn test_no_preposition() {
        assert_eq!(handle("I have knee pain"), FeatureRequest::NoMatch);
        assert_eq!(handle("My eyes feel tired"), FeatureRequest::NoMatch);
    }
}
