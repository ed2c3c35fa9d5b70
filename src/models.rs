// Data model for backend analysis payloads.
//
// Everything here is transient view state deserialized from one `/analyze`
// response; nothing is persisted. The shapes mirror what the backend emits
// for both supported platforms, so several fields are optional and the
// per-uploader stats are an open string -> count mapping.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Analysis result
// ---------------------------------------------------------------------------

/// One complete backend analysis for a single creator identifier.
///
/// Fully replaced on every primary search; the competitor list grows at the
/// front as the user adds rows (see [`Competitor::from_result`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Backend-reported platform tag, e.g. "bilibili" or "youtube".
    pub platform: String,
    pub target_uploader: TargetUploader,
    #[serde(default)]
    pub competitors: Vec<Competitor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetUploader {
    pub info: UploaderInfo,
    /// Open aggregate-stat mapping. Known keys include `archive_view`
    /// (total views) and `likes` (total likes); absent keys read as 0.
    #[serde(default)]
    pub stats: HashMap<String, u64>,
    pub current_video: VideoInfo,
}

impl TargetUploader {
    /// Read an aggregate stat by key, treating absent keys as 0.
    pub fn stat(&self, key: &str) -> u64 {
        self.stats.get(key).copied().unwrap_or(0)
    }
}

/// Immutable uploader snapshot from one backend call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploaderInfo {
    pub name: String,
    /// Avatar URL.
    pub face: String,
    /// Bio line; not all platforms provide one.
    #[serde(default)]
    pub sign: Option<String>,
    pub follower: u64,
    #[serde(default)]
    pub fans: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    #[serde(default)]
    pub desc: Option<String>,
    /// Thumbnail URL.
    pub pic: String,
    pub stat: VideoStat,
    /// Publish time as Unix seconds.
    #[serde(default)]
    pub pubdate: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStat {
    pub view: u64,
    pub danmaku: u64,
    pub reply: u64,
    pub favorite: u64,
    pub coin: u64,
    pub share: u64,
    pub like: u64,
}

// ---------------------------------------------------------------------------
// Competitor
// ---------------------------------------------------------------------------

/// One row in the competitor table.
///
/// Rows arriving inside the initial backend payload keep their original
/// order; rows the user adds are synthesized client-side from a secondary
/// lookup and prepended, newest first. No dedup by `mid` or `name` is
/// attempted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    /// Platform-numeric uploader id; 0 when unknown (always the case for
    /// client-derived rows, since the generic result shape carries no id).
    #[serde(default)]
    pub mid: u64,
    pub name: String,
    pub face: String,
    pub follower: u64,
    pub video_title: String,
    pub video_view: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Competitor {
    /// Reduce a secondary lookup result to one competitor row.
    ///
    /// `name`, `face`, and `follower` come from the uploader info;
    /// `video_title` and `video_view` from the latest video. `link` is set
    /// to the raw input identifier only when that input itself looks like
    /// an absolute URL (an `http` scheme prefix); searches by name or
    /// platform ID produce linkless rows, since the result shape carries no
    /// canonical profile URL to substitute.
    pub fn from_result(identifier: &str, result: &AnalysisResult) -> Self {
        let info = &result.target_uploader.info;
        let video = &result.target_uploader.current_video;
        Competitor {
            mid: 0,
            name: info.name.clone(),
            face: info.face.clone(),
            follower: info.follower,
            video_title: video.title.clone(),
            video_view: video.stat.view,
            link: identifier
                .starts_with("http")
                .then(|| identifier.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::test_fixtures::sample_result;
    use super::*;

    /// A response body shaped like what the backend actually returns.
    const FULL_PAYLOAD: &str = r#"{
        "platform": "bilibili",
        "target_uploader": {
            "info": {
                "name": "TechChannel",
                "face": "https://i0.example.com/face.jpg",
                "sign": "Weekly hardware teardowns",
                "follower": 2500000,
                "fans": 2500000
            },
            "stats": { "archive_view": 340000000, "likes": 21000000 },
            "current_video": {
                "title": "We took apart a mainframe",
                "desc": "Part 1 of 3",
                "pic": "https://i0.example.com/cover.jpg",
                "stat": {
                    "view": 1200000,
                    "danmaku": 8000,
                    "reply": 4100,
                    "favorite": 56000,
                    "coin": 30000,
                    "share": 9000,
                    "like": 190000
                },
                "pubdate": 1717000000
            }
        },
        "competitors": [
            {
                "mid": 12345,
                "name": "RivalChannel",
                "face": "https://i0.example.com/rival.jpg",
                "follower": 1800000,
                "video_title": "Mainframes are overrated",
                "video_view": 900000,
                "link": "https://space.bilibili.com/12345"
            }
        ]
    }"#;

    #[test]
    fn deserialize_full_payload() {
        let result: AnalysisResult = serde_json::from_str(FULL_PAYLOAD).unwrap();
        assert_eq!(result.platform, "bilibili");
        assert_eq!(result.target_uploader.info.name, "TechChannel");
        assert_eq!(result.target_uploader.info.follower, 2_500_000);
        assert_eq!(result.target_uploader.stat("archive_view"), 340_000_000);
        assert_eq!(result.target_uploader.current_video.stat.view, 1_200_000);
        assert_eq!(
            result.target_uploader.current_video.pubdate,
            Some(1_717_000_000)
        );
        assert_eq!(result.competitors.len(), 1);
        assert_eq!(result.competitors[0].mid, 12345);
        assert_eq!(
            result.competitors[0].link.as_deref(),
            Some("https://space.bilibili.com/12345")
        );
    }

    #[test]
    fn deserialize_minimal_payload() {
        // Optional fields absent: sign, fans, desc, pubdate, stats,
        // competitors, competitor mid/link.
        let body = r#"{
            "platform": "youtube",
            "target_uploader": {
                "info": {
                    "name": "SmallChannel",
                    "face": "https://yt.example.com/face.jpg",
                    "follower": 900
                },
                "current_video": {
                    "title": "first video",
                    "pic": "https://yt.example.com/cover.jpg",
                    "stat": {
                        "view": 12,
                        "danmaku": 0,
                        "reply": 1,
                        "favorite": 0,
                        "coin": 0,
                        "share": 0,
                        "like": 3
                    }
                }
            }
        }"#;
        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.target_uploader.info.sign, None);
        assert_eq!(result.target_uploader.info.fans, None);
        assert_eq!(result.target_uploader.current_video.desc, None);
        assert_eq!(result.target_uploader.current_video.pubdate, None);
        assert!(result.target_uploader.stats.is_empty());
        assert_eq!(result.target_uploader.stat("archive_view"), 0);
        assert!(result.competitors.is_empty());
    }

    #[test]
    fn deserialize_ignores_unknown_fields() {
        let body = r#"{
            "platform": "bilibili",
            "schema_version": 4,
            "target_uploader": {
                "info": {
                    "name": "X",
                    "face": "f",
                    "follower": 1,
                    "level": 6
                },
                "current_video": {
                    "title": "t",
                    "pic": "p",
                    "stat": {
                        "view": 1, "danmaku": 0, "reply": 0, "favorite": 0,
                        "coin": 0, "share": 0, "like": 0,
                        "his_rank": 99
                    }
                }
            }
        }"#;
        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.target_uploader.info.name, "X");
    }

    #[test]
    fn stat_reads_known_keys_and_zeroes_missing() {
        let result = sample_result("A");
        assert_eq!(result.target_uploader.stat("archive_view"), 120_000_000);
        assert_eq!(result.target_uploader.stat("likes"), 8_400_000);
        assert_eq!(result.target_uploader.stat("does_not_exist"), 0);
    }

    // -- Competitor derivation --

    #[test]
    fn from_result_copies_uploader_and_video_fields() {
        let result = sample_result("Rival");
        let comp = Competitor::from_result("https://space.bilibili.com/99", &result);
        assert_eq!(comp.mid, 0);
        assert_eq!(comp.name, "Rival");
        assert_eq!(comp.face, "https://cdn.example.com/face.jpg");
        assert_eq!(comp.follower, 1_234_567);
        assert_eq!(comp.video_title, "Rival's latest upload");
        assert_eq!(comp.video_view, 654_321);
    }

    #[test]
    fn from_result_links_url_input() {
        let result = sample_result("Rival");
        let comp = Competitor::from_result("https://www.youtube.com/@rival", &result);
        assert_eq!(
            comp.link.as_deref(),
            Some("https://www.youtube.com/@rival")
        );

        let comp = Competitor::from_result("http://example.com/ch", &result);
        assert_eq!(comp.link.as_deref(), Some("http://example.com/ch"));
    }

    #[test]
    fn from_result_leaves_name_and_id_input_linkless() {
        let result = sample_result("Rival");
        assert_eq!(Competitor::from_result("RivalChannel", &result).link, None);
        assert_eq!(Competitor::from_result("12345", &result).link, None);
        assert_eq!(Competitor::from_result("@rival", &result).link, None);
    }

    #[test]
    fn competitor_round_trips_through_json() {
        let result = sample_result("Rival");
        let comp = Competitor::from_result("12345", &result);
        let json = serde_json::to_string(&comp).unwrap();
        // Linkless rows serialize without a null link field.
        assert!(!json.contains("link"));
        let back: Competitor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, comp);
    }
}
