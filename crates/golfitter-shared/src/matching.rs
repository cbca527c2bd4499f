//! Pro golfer matching.
//!
//! Scores a user's body measurements against a fixed set of reference
//! profiles using a weighted sum of absolute differences.

use serde::{Deserialize, Serialize};

use crate::constants::{ARM_LENGTH_WEIGHT, HEIGHT_WEIGHT, STRENGTH_WEIGHT, WEIGHT_WEIGHT};

/// The four attributes collected from the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurements {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub arm_length_cm: f64,
    /// Self-assessed strength, 1 (lowest) to 5 (highest).
    pub strength_level: u8,
}

/// The four clubs recommended by a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubSet {
    pub driver: String,
    pub iron: String,
    pub wedge: String,
    pub putter: String,
}

/// A reference pro golfer. Seed data only; never mutated at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchProfile {
    pub id: String,
    pub name: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub arm_length_cm: f64,
    pub strength_level: u8,
    /// Portrait asset reference.
    pub image: String,
    /// Reference swing video asset.
    pub video: String,
    pub clubs: ClubSet,
    pub achievements: Vec<String>,
}

impl MatchProfile {
    pub fn measurements(&self) -> BodyMeasurements {
        BodyMeasurements {
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            arm_length_cm: self.arm_length_cm,
            strength_level: self.strength_level,
        }
    }
}

/// A candidate paired with its distance to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch<'a> {
    pub profile: &'a MatchProfile,
    pub score: f64,
}

/// Weighted distance between the user and a profile. Lower is closer.
pub fn match_score(user: &BodyMeasurements, profile: &MatchProfile) -> f64 {
    (user.height_cm - profile.height_cm).abs() * HEIGHT_WEIGHT
        + (user.weight_kg - profile.weight_kg).abs() * WEIGHT_WEIGHT
        + (user.arm_length_cm - profile.arm_length_cm).abs() * ARM_LENGTH_WEIGHT
        + (f64::from(user.strength_level) - f64::from(profile.strength_level)).abs()
            * STRENGTH_WEIGHT
}

/// Pick the closest profile. Ties keep the earliest candidate.
///
/// Returns `None` only when `candidates` is empty.
pub fn find_best_match<'a>(
    user: &BodyMeasurements,
    candidates: &'a [MatchProfile],
) -> Option<&'a MatchProfile> {
    let mut best: Option<(&MatchProfile, f64)> = None;

    for candidate in candidates {
        let score = match_score(user, candidate);
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }

    best.map(|(profile, _)| profile)
}

/// Every candidate with its score, closest first. Equal scores keep input
/// order.
pub fn rank_matches<'a>(
    user: &BodyMeasurements,
    candidates: &'a [MatchProfile],
) -> Vec<RankedMatch<'a>> {
    let mut ranked: Vec<RankedMatch<'a>> = candidates
        .iter()
        .map(|profile| RankedMatch {
            profile,
            score: match_score(user, profile),
        })
        .collect();
    ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
    ranked
}
