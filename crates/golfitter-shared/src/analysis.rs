//! Swing analysis results.
//!
//! There is no vision pipeline behind these: every result comes from one of
//! the fixed presets below.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Result shapes
// ---------------------------------------------------------------------------

/// Score and coaching text for one aspect of the swing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricResult {
    pub score: u8,
    pub feedback: String,
    pub recommendation: String,
}

/// Summary analysis of a single swing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub tempo: MetricResult,
    pub posture: MetricResult,
    pub balance: MetricResult,
    pub club_path: MetricResult,
    pub improvements: Vec<String>,
    pub strengths: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempoDetails {
    pub backswing_speed: f64,
    pub downswing_speed: f64,
    pub rhythm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostureDetails {
    pub spine_angle: f64,
    pub shoulder_alignment: f64,
    pub hip_position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceDetails {
    pub weight_distribution: f64,
    pub center_of_gravity: f64,
    pub stability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubPathDetails {
    pub takeaway: f64,
    pub backswing: f64,
    pub downswing: f64,
    pub follow_through: f64,
}

/// A metric with its per-phase breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedMetric<D> {
    pub score: u8,
    pub details: D,
    pub feedback: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedMetrics {
    pub tempo: DetailedMetric<TempoDetails>,
    pub posture: DetailedMetric<PostureDetails>,
    pub balance: DetailedMetric<BalanceDetails>,
    pub club_path: DetailedMetric<ClubPathDetails>,
}

/// Breakdown shown in the detailed analysis view and graphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAnalysis {
    pub overall_score: u8,
    pub detailed_metrics: DetailedMetrics,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

// ---------------------------------------------------------------------------
// Score bands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLevel {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl ScoreLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Self::Excellent,
            80..=89 => Self::Good,
            70..=79 => Self::Fair,
            _ => Self::NeedsWork,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsWork => "Needs work",
        }
    }
}

/// Badge style for a score chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
}

impl BadgeVariant {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Self::Default,
            80..=89 => Self::Secondary,
            _ => Self::Destructive,
        }
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Which canned result to hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisPreset {
    #[default]
    Standard,
    High,
    Low,
}

fn metric(score: u8, feedback: &str, recommendation: &str) -> MetricResult {
    MetricResult {
        score,
        feedback: feedback.to_string(),
        recommendation: recommendation.to_string(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The canned summary for `preset`.
pub fn mock_analysis(preset: AnalysisPreset) -> AnalysisResult {
    match preset {
        AnalysisPreset::Standard => AnalysisResult {
            overall_score: 85,
            tempo: metric(90, "Tempo is good", "Keep your current tempo"),
            posture: metric(80, "Posture has room to improve", "Straighten your spine"),
            balance: metric(85, "Balance is good", "Keep your current balance"),
            club_path: metric(
                75,
                "Club path has room to improve",
                "Focus on an inside-out path",
            ),
            improvements: strings(&["Improve posture", "Correct the club path"]),
            strengths: strings(&["Good tempo", "Stable balance"]),
        },
        AnalysisPreset::High => AnalysisResult {
            overall_score: 95,
            tempo: metric(95, "Tempo is excellent", "Keep your current tempo"),
            posture: metric(90, "Posture is good", "Keep your current posture"),
            balance: metric(95, "Balance is excellent", "Keep your current balance"),
            club_path: metric(90, "Club path is good", "Keep your current club path"),
            improvements: strings(&["Further refine accuracy"]),
            strengths: strings(&["Superb tempo", "Perfect balance", "Ideal posture"]),
        },
        AnalysisPreset::Low => AnalysisResult {
            overall_score: 65,
            tempo: metric(
                60,
                "Tempo has room to improve",
                "Practice your tempo with a metronome",
            ),
            posture: metric(
                70,
                "Posture has room to improve",
                "Straighten your spine and relax your shoulders",
            ),
            balance: metric(
                65,
                "Balance has room to improve",
                "Stabilize your center of gravity",
            ),
            club_path: metric(
                60,
                "Club path has room to improve",
                "Focus on an inside-out swing path",
            ),
            improvements: strings(&[
                "Improve tempo",
                "Correct posture",
                "Improve balance",
                "Correct the club path",
            ]),
            strengths: strings(&["Understands the basic swing motion"]),
        },
    }
}

/// The canned per-phase breakdown used by the detailed view.
pub fn mock_detailed_analysis() -> DetailedAnalysis {
    let summary = mock_analysis(AnalysisPreset::Standard);
    DetailedAnalysis {
        overall_score: summary.overall_score,
        detailed_metrics: DetailedMetrics {
            tempo: DetailedMetric {
                score: summary.tempo.score,
                details: TempoDetails {
                    backswing_speed: 85.0,
                    downswing_speed: 92.0,
                    rhythm: 88.0,
                },
                feedback: summary.tempo.feedback,
                recommendation: summary.tempo.recommendation,
            },
            posture: DetailedMetric {
                score: summary.posture.score,
                details: PostureDetails {
                    spine_angle: 78.0,
                    shoulder_alignment: 82.0,
                    hip_position: 80.0,
                },
                feedback: summary.posture.feedback,
                recommendation: summary.posture.recommendation,
            },
            balance: DetailedMetric {
                score: summary.balance.score,
                details: BalanceDetails {
                    weight_distribution: 86.0,
                    center_of_gravity: 84.0,
                    stability: 85.0,
                },
                feedback: summary.balance.feedback,
                recommendation: summary.balance.recommendation,
            },
            club_path: DetailedMetric {
                score: summary.club_path.score,
                details: ClubPathDetails {
                    takeaway: 80.0,
                    backswing: 76.0,
                    downswing: 72.0,
                    follow_through: 74.0,
                },
                feedback: summary.club_path.feedback,
                recommendation: summary.club_path.recommendation,
            },
        },
        strengths: summary.strengths,
        improvements: summary.improvements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_levels() {
        assert_eq!(ScoreLevel::from_score(100), ScoreLevel::Excellent);
        assert_eq!(ScoreLevel::from_score(90), ScoreLevel::Excellent);
        assert_eq!(ScoreLevel::from_score(89), ScoreLevel::Good);
        assert_eq!(ScoreLevel::from_score(70), ScoreLevel::Fair);
        assert_eq!(ScoreLevel::from_score(69), ScoreLevel::NeedsWork);
    }

    #[test]
    fn test_badge_variants() {
        assert_eq!(BadgeVariant::from_score(95), BadgeVariant::Default);
        assert_eq!(BadgeVariant::from_score(80), BadgeVariant::Secondary);
        assert_eq!(BadgeVariant::from_score(79), BadgeVariant::Destructive);
    }

    #[test]
    fn test_presets_have_expected_overall_scores() {
        assert_eq!(mock_analysis(AnalysisPreset::Standard).overall_score, 85);
        assert_eq!(mock_analysis(AnalysisPreset::High).overall_score, 95);
        assert_eq!(mock_analysis(AnalysisPreset::Low).overall_score, 65);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(mock_analysis(AnalysisPreset::Standard)).unwrap();
        assert_eq!(json["overallScore"], 85);
        assert_eq!(json["clubPath"]["score"], 75);
    }

    #[test]
    fn test_detailed_matches_summary() {
        let detailed = mock_detailed_analysis();
        assert_eq!(detailed.overall_score, 85);
        assert_eq!(detailed.detailed_metrics.club_path.score, 75);
    }
}
