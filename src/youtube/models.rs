use serde::{Deserialize, Serialize};

/// Title, id and description of one video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDescription {
    pub title: String,
    pub video_id: String,
    pub description: String,
}

/// `search.list` response page
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
    pub next_page_token: Option<String>,
}

impl SearchListResponse {
    /// Continuation token, treating an empty string as the last page
    pub fn continuation(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Ids of the video results on this page
    ///
    /// Search results can also be channels or playlists; those carry no
    /// `videoId` and are skipped.
    pub fn video_ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| item.id.video_id.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: Option<String>,
}

/// `videos.list` response
#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
pub struct Video {
    pub id: String,
    pub snippet: Snippet,
}

#[derive(Debug, Deserialize)]
pub struct Snippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl From<Video> for VideoDescription {
    fn from(video: Video) -> Self {
        Self {
            title: video.snippet.title,
            video_id: video.id,
            description: video.snippet.description,
        }
    }
}

/// Error body returned by Google APIs
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}
