//! Category and region catalogues for news generation.

use crate::core::error::DomainError;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub const CATEGORIES: &[&str] = &[
    "Sport",
    "Disaster",
    "Innovation",
    "Science",
    "Environment",
    "Technology",
    "Healthcare",
    "Politics",
];

pub const REGIONS: &[&str] = &[
    "Europe",
    "Asia",
    "Africa",
    "North America",
    "South America",
    "India",
    "Russia",
];

/// The category/region pair a single story must cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsAssignment {
    pub news_id: usize,
    pub category: String,
    pub region: String,
}

/// Draw `count` distinct categories and `count` distinct regions and pair them.
///
/// Sampling is without replacement on both sides, so no two stories share a
/// category or a region.
pub fn assign_news<R: Rng + ?Sized>(
    count: usize,
    rng: &mut R,
) -> Result<Vec<NewsAssignment>, DomainError> {
    let available = CATEGORIES.len().min(REGIONS.len());
    if count > available {
        return Err(DomainError::CatalogueTooSmall {
            requested: count,
            available,
        });
    }

    let categories: Vec<&str> = CATEGORIES.choose_multiple(rng, count).copied().collect();
    let regions: Vec<&str> = REGIONS.choose_multiple(rng, count).copied().collect();

    Ok(categories
        .into_iter()
        .zip(regions)
        .enumerate()
        .map(|(i, (category, region))| NewsAssignment {
            news_id: i + 1,
            category: category.to_string(),
            region: region.to_string(),
        })
        .collect())
}
