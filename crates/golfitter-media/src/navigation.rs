//! Query parameters the comparison view is opened with.
//!
//! - `videos`: JSON list of `{src, title}` slides
//! - `index`: slide to show first
//! - `returnTo`: where the back button leads

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

const PARAM_VIDEOS: &str = "videos";
const PARAM_INDEX: &str = "index";
const PARAM_RETURN_TO: &str = "returnTo";

const RESULTS_HREF: &str = "/?currentStep=results";
const COMPARISON_PATH: &str = "/swing-comparison";

#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Invalid videos parameter: {0}")]
    InvalidVideos(#[from] serde_json::Error),
}

/// One slide of the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSource {
    pub src: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReturnTo {
    /// Back to the comparison screen, keeping the current parameters.
    #[serde(rename = "swing-comparison")]
    SwingComparison,
    /// Back to the fitting results (any other tag, or none).
    #[default]
    #[serde(rename = "results")]
    Results,
}

impl ReturnTo {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("swing-comparison") => Self::SwingComparison,
            _ => Self::Results,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::SwingComparison => "swing-comparison",
            Self::Results => "results",
        }
    }
}

/// Where the back button goes and what it says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackTarget {
    pub href: String,
    pub label: &'static str,
}

/// Parsed parameters of a comparison view.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRoute {
    pub videos: Vec<SlideSource>,
    pub initial_index: usize,
    pub return_to: ReturnTo,
    /// Raw parameters, kept in order for the way back.
    params: Vec<(String, String)>,
}

impl ComparisonRoute {
    /// Parse already-decoded `(key, value)` pairs.
    ///
    /// A missing `videos` parameter means no slides. An unparsable `index`
    /// falls back to the first slide; an out-of-range one is clamped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, NavigationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let params: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        let videos: Vec<SlideSource> = match get(PARAM_VIDEOS) {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(raw)?,
            _ => Vec::new(),
        };

        let requested = match get(PARAM_INDEX) {
            Some(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
                warn!(value = raw, "Invalid slide index, starting at first slide");
                0
            }),
            None => 0,
        };
        let initial_index = requested.min(videos.len().saturating_sub(1));

        let return_to = ReturnTo::from_tag(get(PARAM_RETURN_TO));

        Ok(Self {
            videos,
            initial_index,
            return_to,
            params,
        })
    }

    /// Build the query string that opens a comparison view.
    pub fn query_for(
        videos: &[SlideSource],
        initial_index: usize,
        return_to: ReturnTo,
    ) -> Result<String, NavigationError> {
        let json = serde_json::to_string(videos)?;
        Ok(encode_pairs(&[
            (PARAM_VIDEOS.to_string(), json),
            (PARAM_INDEX.to_string(), initial_index.to_string()),
            (PARAM_RETURN_TO.to_string(), return_to.as_tag().to_string()),
        ]))
    }

    /// The original parameters, re-encoded.
    pub fn query_string(&self) -> String {
        encode_pairs(&self.params)
    }

    pub fn back_target(&self) -> BackTarget {
        match self.return_to {
            ReturnTo::SwingComparison => BackTarget {
                href: format!("{COMPARISON_PATH}?{}", self.query_string()),
                label: "Back to comparison",
            },
            ReturnTo::Results => BackTarget {
                href: RESULTS_HREF.to_string(),
                label: "Back to analysis",
            },
        }
    }

    /// Whether the player should show the comparison controls.
    pub fn is_comparison(&self) -> bool {
        self.videos.len() > 1
    }
}

fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides() -> Vec<SlideSource> {
        vec![
            SlideSource {
                src: "blob:golfitter/1".into(),
                title: "Your swing".into(),
            },
            SlideSource {
                src: "/videos/pros/rowe-iron.mp4".into(),
                title: "Pro swing".into(),
            },
        ]
    }

    #[test]
    fn test_parse_full_route() {
        let json = serde_json::to_string(&slides()).unwrap();
        let route = ComparisonRoute::from_pairs([
            ("videos", json.as_str()),
            ("index", "1"),
            ("returnTo", "swing-comparison"),
        ])
        .unwrap();

        assert_eq!(route.videos, slides());
        assert_eq!(route.initial_index, 1);
        assert_eq!(route.return_to, ReturnTo::SwingComparison);
        assert!(route.is_comparison());
    }

    #[test]
    fn test_index_clamped_and_defaulted() {
        let json = serde_json::to_string(&slides()).unwrap();
        let route =
            ComparisonRoute::from_pairs([("videos", json.as_str()), ("index", "9")]).unwrap();
        assert_eq!(route.initial_index, 1);

        let route =
            ComparisonRoute::from_pairs([("videos", json.as_str()), ("index", "abc")]).unwrap();
        assert_eq!(route.initial_index, 0);

        let empty = ComparisonRoute::from_pairs(Vec::<(String, String)>::new()).unwrap();
        assert!(empty.videos.is_empty());
        assert_eq!(empty.initial_index, 0);
        assert!(!empty.is_comparison());
    }

    #[test]
    fn test_invalid_videos_json() {
        let err = ComparisonRoute::from_pairs([("videos", "[{not json")]).unwrap_err();
        assert!(matches!(err, NavigationError::InvalidVideos(_)));
    }

    #[test]
    fn test_back_target_results_by_default() {
        let route = ComparisonRoute::from_pairs([("returnTo", "somewhere")]).unwrap();
        let back = route.back_target();
        assert_eq!(back.href, "/?currentStep=results");
        assert_eq!(back.label, "Back to analysis");
    }

    #[test]
    fn test_back_target_keeps_params_for_comparison() {
        let query = ComparisonRoute::query_for(&slides(), 0, ReturnTo::SwingComparison).unwrap();
        let route = ComparisonRoute::from_pairs([
            ("videos", serde_json::to_string(&slides()).unwrap()),
            ("index", "0".to_string()),
            ("returnTo", "swing-comparison".to_string()),
        ])
        .unwrap();

        let back = route.back_target();
        assert_eq!(back.href, format!("/swing-comparison?{query}"));
        assert_eq!(back.label, "Back to comparison");
    }
}
