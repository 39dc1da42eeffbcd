use std::path::{Path, PathBuf};

use super::error::Result;
use super::models::VideoDescription;

/// Characters that are not allowed in file names on common platforms
const FORBIDDEN_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Longest file stem in bytes; with `.txt` the name stays well under the
/// 255-byte limit of common filesystems
const MAX_STEM_BYTES: usize = 196;

/// Turn a video title into a file stem
///
/// Strips path separators and other reserved characters. A title that is
/// nothing but reserved characters falls back to the video id. Long titles
/// are cut at a character boundary.
pub fn sanitize_title(video: &VideoDescription) -> String {
    let mut sanitized = String::new();
    for c in video.title.chars().filter(|c| !FORBIDDEN_CHARS.contains(c)) {
        if sanitized.len() + c.len_utf8() > MAX_STEM_BYTES {
            break;
        }
        sanitized.push(c);
    }

    if sanitized.trim().is_empty() {
        video.video_id.clone()
    } else {
        sanitized
    }
}

/// Text file contents for one video
pub fn render(video: &VideoDescription) -> String {
    format!(
        "Video Title: {}\nVideo ID: {}\nDescription:\n{}\n",
        video.title, video.video_id, video.description
    )
}

/// Write one `<title>.txt` per video into `folder`
///
/// The folder is created if needed. Videos whose sanitized titles collide
/// overwrite each other, last one wins. Returns the written paths.
pub async fn save_descriptions(
    folder: &Path,
    videos: &[VideoDescription],
) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(folder).await?;

    let mut written = Vec::with_capacity(videos.len());
    for video in videos {
        let path = folder.join(format!("{}.txt", sanitize_title(video)));
        tokio::fs::write(&path, render(video)).await?;
        tracing::debug!("Wrote {:?}", path);
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn video(title: &str, id: &str, description: &str) -> VideoDescription {
        VideoDescription {
            title: title.to_string(),
            video_id: id.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_sanitize_title_strips_reserved_chars() {
        let v = video(r#"How/To: "Cook" <Rice>? a|b\c*"#, "id1", "");
        assert_eq!(sanitize_title(&v), "HowTo Cook Rice abc");
    }

    #[test]
    fn test_sanitize_title_keeps_unicode() {
        let v = video("Café ☕ review", "id1", "");
        assert_eq!(sanitize_title(&v), "Café ☕ review");
    }

    #[test]
    fn test_sanitize_title_falls_back_to_id() {
        let v = video("???", "abc123", "");
        assert_eq!(sanitize_title(&v), "abc123");
    }

    #[test]
    fn test_sanitize_title_caps_multibyte_length() {
        let v = video(&"料".repeat(100), "id1", "");
        let stem = sanitize_title(&v);

        assert!(stem.len() + ".txt".len() <= 200);
        assert_eq!(stem, "料".repeat(65));
    }

    #[test]
    fn test_sanitize_title_short_titles_untouched() {
        let title = "a".repeat(100);
        assert_eq!(sanitize_title(&video(&title, "id1", "")), title);
    }

    #[tokio::test]
    async fn test_save_descriptions_long_cjk_title() {
        let temp_dir = TempDir::new().unwrap();
        let videos = vec![
            video(&"料".repeat(100), "a1", "long"),
            video("After", "b2", "still written"),
        ];

        let written = save_descriptions(temp_dir.path(), &videos).await.unwrap();

        assert_eq!(written.len(), 2);
        let contents = std::fs::read_to_string(&written[0]).unwrap();
        assert!(contents.starts_with(&format!("Video Title: {}\n", "料".repeat(100))));
        assert!(temp_dir.path().join("After.txt").exists());
    }

    #[test]
    fn test_render_format() {
        let v = video("Title", "abc123", "Line 1\nLine 2");
        assert_eq!(
            render(&v),
            "Video Title: Title\nVideo ID: abc123\nDescription:\nLine 1\nLine 2\n"
        );
    }

    #[tokio::test]
    async fn test_save_descriptions_creates_folder() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("out/descriptions");
        let videos = vec![
            video("First: intro", "a1", "hello"),
            video("Second", "b2", "world"),
        ];

        let written = save_descriptions(&folder, &videos).await.unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(written[0], folder.join("First intro.txt"));
        let contents = std::fs::read_to_string(&written[0]).unwrap();
        assert_eq!(
            contents,
            "Video Title: First: intro\nVideo ID: a1\nDescription:\nhello\n"
        );
    }

    #[tokio::test]
    async fn test_save_descriptions_colliding_titles_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let videos = vec![video("Same?", "a1", "one"), video("Same", "b2", "two")];

        save_descriptions(temp_dir.path(), &videos).await.unwrap();

        let contents = std::fs::read_to_string(temp_dir.path().join("Same.txt")).unwrap();
        assert!(contents.contains("Video ID: b2"));
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_save_descriptions_empty_list() {
        let temp_dir = TempDir::new().unwrap();
        let written = save_descriptions(temp_dir.path(), &[]).await.unwrap();
        assert!(written.is_empty());
    }
}
