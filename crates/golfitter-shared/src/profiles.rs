//! Built-in reference profiles.

use crate::matching::{ClubSet, MatchProfile};

fn clubs(driver: &str, iron: &str, wedge: &str, putter: &str) -> ClubSet {
    ClubSet {
        driver: driver.to_string(),
        iron: iron.to_string(),
        wedge: wedge.to_string(),
        putter: putter.to_string(),
    }
}

/// The fixed candidate set used by the fitting flow.
pub fn seed_profiles() -> Vec<MatchProfile> {
    vec![
        MatchProfile {
            id: "pro-1".to_string(),
            name: "Takumi Hayashi".to_string(),
            height_cm: 183.0,
            weight_kg: 82.0,
            arm_length_cm: 92.0,
            strength_level: 5,
            image: "/images/pros/hayashi.jpg".to_string(),
            video: "/videos/pros/hayashi-driver.mp4".to_string(),
            clubs: clubs(
                "Titleist TSR3 9.0°",
                "Titleist T100 (4-PW)",
                "Vokey SM10 56°",
                "Scotty Cameron Phantom X 5",
            ),
            achievements: vec![
                "Japan Open champion".to_string(),
                "Tour driving distance leader".to_string(),
            ],
        },
        MatchProfile {
            id: "pro-2".to_string(),
            name: "Daniel Rowe".to_string(),
            height_cm: 175.0,
            weight_kg: 72.0,
            arm_length_cm: 86.0,
            strength_level: 4,
            image: "/images/pros/rowe.jpg".to_string(),
            video: "/videos/pros/rowe-iron.mp4".to_string(),
            clubs: clubs(
                "TaylorMade Qi10 10.5°",
                "TaylorMade P770 (4-PW)",
                "Milled Grind 4 58°",
                "Spider Tour X",
            ),
            achievements: vec![
                "Three-time tour winner".to_string(),
                "Greens-in-regulation leader".to_string(),
            ],
        },
        MatchProfile {
            id: "pro-3".to_string(),
            name: "Misaki Okada".to_string(),
            height_cm: 165.0,
            weight_kg: 58.0,
            arm_length_cm: 78.0,
            strength_level: 3,
            image: "/images/pros/okada.jpg".to_string(),
            video: "/videos/pros/okada-driver.mp4".to_string(),
            clubs: clubs(
                "Ping G430 Max 10.5°",
                "Ping i230 (5-PW)",
                "Ping Glide 4.0 54°",
                "Ping Anser 2",
            ),
            achievements: vec![
                "Women's Open runner-up".to_string(),
                "Season scoring average leader".to_string(),
            ],
        },
        MatchProfile {
            id: "pro-4".to_string(),
            name: "Marcus Lindqvist".to_string(),
            height_cm: 190.0,
            weight_kg: 92.0,
            arm_length_cm: 96.0,
            strength_level: 5,
            image: "/images/pros/lindqvist.jpg".to_string(),
            video: "/videos/pros/lindqvist-driver.mp4".to_string(),
            clubs: clubs(
                "Callaway Paradym Ai Smoke 8.0°",
                "Callaway Apex CB (3-PW)",
                "Jaws Raw 60°",
                "Odyssey White Hot OG #7",
            ),
            achievements: vec!["European tour winner".to_string()],
        },
        MatchProfile {
            id: "pro-5".to_string(),
            name: "Kenta Mori".to_string(),
            height_cm: 170.0,
            weight_kg: 66.0,
            arm_length_cm: 82.0,
            strength_level: 3,
            image: "/images/pros/mori.jpg".to_string(),
            video: "/videos/pros/mori-wedge.mp4".to_string(),
            clubs: clubs(
                "Srixon ZX5 Mk II 10.5°",
                "Srixon ZX7 (4-PW)",
                "Cleveland RTX 6 52°",
                "Bettinardi Queen B 6",
            ),
            achievements: vec![
                "Short-game specialist of the year".to_string(),
                "Two-time amateur champion".to_string(),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_unique_and_strength_in_range() {
        let profiles = seed_profiles();
        let ids: HashSet<&str> = profiles.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), profiles.len());
        assert!(profiles.iter().all(|p| (1..=5).contains(&p.strength_level)));
    }
}
