use crate::models::{Item, RecommendationSet, User};

/// Content-based filter over declared preferences.
///
/// An item qualifies when any focus entry is a case-insensitive substring of
/// its industry, or its country equals the preferred region ignoring case.
/// Missing item fields never match.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    industries: Vec<String>,
    country: Option<String>,
}

impl ContentFilter {
    pub fn for_user(user: &User) -> Self {
        let industries = user
            .focus
            .iter()
            .map(|focus| focus.to_lowercase())
            .collect();
        let country = user
            .geographic_preferences
            .as_deref()
            .map(str::to_lowercase);

        Self {
            industries,
            country,
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.industry_matches(item) || self.country_matches(item)
    }

    fn industry_matches(&self, item: &Item) -> bool {
        let Some(industry) = item.industry.as_deref() else {
            return false;
        };
        let industry = industry.to_lowercase();
        self.industries
            .iter()
            .any(|focus| industry.contains(focus.as_str()))
    }

    fn country_matches(&self, item: &Item) -> bool {
        match (self.country.as_deref(), item.country.as_deref()) {
            (Some(preferred), Some(country)) => preferred == country.to_lowercase(),
            _ => false,
        }
    }

    pub fn recommend(&self, catalog: &[Item]) -> RecommendationSet {
        catalog
            .iter()
            .filter(|item| self.matches(item))
            .map(|item| item.id.clone())
            .collect()
    }
}
