/*!
 * Media library model.
 *
 * A media item is either a movie carrying its own subtitle tracks or a series
 * whose tracks hang off individual episodes.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::formats::SubtitleFormat;
use crate::language_utils;

/// A subtitle file attached to a movie or an episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleTrack {
    pub id: String,
    /// Display name of the language
    pub language: String,
    /// ISO 639-1 or 639-2 code
    pub language_code: String,
    pub format: SubtitleFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub number: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub subtitles: Vec<SubtitleTrack>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: String,
    pub number: u32,
    pub title: String,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// A movie or a series, tagged by `type` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaItem {
    Movie {
        id: String,
        title: String,
        year: u16,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default)]
        subtitles: Vec<SubtitleTrack>,
    },
    Series {
        id: String,
        title: String,
        year: u16,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default)]
        seasons: Vec<Season>,
    },
}

impl MediaItem {
    pub fn id(&self) -> &str {
        match self {
            MediaItem::Movie { id, .. } | MediaItem::Series { id, .. } => id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            MediaItem::Movie { title, .. } | MediaItem::Series { title, .. } => title,
        }
    }

    /// Every subtitle track: the movie's own, or those of all episodes in
    /// season and episode order
    pub fn subtitle_tracks(&self) -> Vec<&SubtitleTrack> {
        match self {
            MediaItem::Movie { subtitles, .. } => subtitles.iter().collect(),
            MediaItem::Series { seasons, .. } => seasons
                .iter()
                .flat_map(|season| season.episodes.iter())
                .flat_map(|episode| episode.subtitles.iter())
                .collect(),
        }
    }

    pub fn find_track(&self, track_id: &str) -> Option<&SubtitleTrack> {
        self.subtitle_tracks().into_iter().find(|track| track.id == track_id)
    }

    /// Tracks in a language, matching 2- and 3-letter codes for the same language
    pub fn tracks_for_language(&self, code: &str) -> Vec<&SubtitleTrack> {
        self.subtitle_tracks()
            .into_iter()
            .filter(|track| language_utils::language_codes_match(&track.language_code, code))
            .collect()
    }

    /// Look up an episode by season and episode number; `None` for movies
    pub fn episode(&self, season_number: u32, episode_number: u32) -> Option<&Episode> {
        match self {
            MediaItem::Movie { .. } => None,
            MediaItem::Series { seasons, .. } => seasons
                .iter()
                .find(|season| season.number == season_number)?
                .episodes
                .iter()
                .find(|episode| episode.number == episode_number),
        }
    }
}
