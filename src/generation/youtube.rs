//! Local validation of YouTube video URLs.

use url::Url;

use super::UrlValidation;

const VIDEO_ID_LEN: usize = 11;

fn is_video_id(candidate: &str) -> bool {
    candidate.len() == VIDEO_ID_LEN
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Extract the video id from a watch, short, embed or youtu.be link.
pub fn youtube_video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

    let candidate = match host {
        "youtu.be" => url.path_segments()?.next().map(str::to_string),
        "youtube.com" | "music.youtube.com" => {
            let mut segments = url.path_segments()?;
            match segments.next() {
                Some("watch") => url
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned()),
                Some("shorts") | Some("embed") | Some("live") => {
                    segments.next().map(str::to_string)
                }
                _ => None,
            }
        }
        _ => return None,
    }?;

    is_video_id(&candidate).then_some(candidate)
}

/// Validate URL syntax and that it points at a YouTube video.
pub fn validate_youtube_url(raw: &str) -> UrlValidation {
    let trimmed = raw.trim();
    let url = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(_) => return UrlValidation::invalid("Invalid URL format"),
    };

    if !matches!(url.scheme(), "http" | "https") {
        return UrlValidation::invalid("URL must use http or https");
    }

    let is_youtube = url
        .host_str()
        .map(|host| host == "youtu.be" || host.ends_with("youtube.com"))
        .unwrap_or(false);
    if !is_youtube {
        return UrlValidation::invalid("Invalid YouTube URL");
    }

    match youtube_video_id(&url) {
        Some(_) => UrlValidation::valid(),
        None => UrlValidation::invalid("Could not find a video id in the YouTube URL"),
    }
}
