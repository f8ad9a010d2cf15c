//! Reshapes upstream unlock responses into the parse envelope
//!
//! Upstream bodies are untyped and vary per platform. Every read below is an
//! explicit presence and type check; a field of the wrong type is treated as
//! absent. Media URLs are passed through exactly as the upstream sent them.

use indexmap::IndexMap;
use serde_json::Value;

use super::platform::Platform;
use crate::constants::{CODE_BAD_REQUEST, MSG_UPSTREAM_REJECTED, UPSTREAM_SUCCESS_CODE};
use crate::models::{ParseData, ParseResult};

/// Which media field a platform branch settled on.
enum Media {
    Url(String),
    Images(Vec<String>),
    ImgUrl(Vec<String>),
    QualityUrls(IndexMap<String, String>),
}

/// Returns true when the upstream reported success in its top-level `code`.
fn is_success(response: &Value) -> bool {
    response
        .get("code")
        .and_then(Value::as_f64)
        .is_some_and(|code| code == UPSTREAM_SUCCESS_CODE)
}

pub fn normalize(platform: Platform, response: &Value) -> ParseResult {
    if !is_success(response) {
        return ParseResult::failure(CODE_BAD_REQUEST, MSG_UPSTREAM_REJECTED);
    }

    let payload = response.get("data");
    let mut data = ParseData {
        author: text_field(payload, "author"),
        title: text_field(payload, "title"),
        description: text_field(payload, "description"),
        ..Default::default()
    };

    match select_media(platform, payload) {
        Some(Media::Url(url)) => data.url = Some(url),
        Some(Media::Images(images)) => data.images = Some(images),
        Some(Media::ImgUrl(imgurl)) => data.imgurl = Some(imgurl),
        Some(Media::QualityUrls(quality_urls)) => data.quality_urls = Some(quality_urls),
        None => {}
    }

    ParseResult::success(data)
}

fn select_media(platform: Platform, payload: Option<&Value>) -> Option<Media> {
    let url = || string_field(payload, "url").map(Media::Url);

    match platform {
        Platform::Douyin => url().or_else(|| list_field(payload, "images").map(Media::Images)),
        Platform::Xiaohongshu => list_field(payload, "imgurl").map(Media::ImgUrl).or_else(url),
        Platform::Weibo => map_field(payload, "quality_urls")
            .map(Media::QualityUrls)
            .or_else(url),
        Platform::Bilibili | Platform::Pipix | Platform::Qishui => url(),
    }
}

/// String at `key`, empty included.
fn text_field(payload: Option<&Value>, key: &str) -> Option<String> {
    payload?.get(key)?.as_str().map(str::to_string)
}

/// Non-empty string at `key`.
fn string_field(payload: Option<&Value>, key: &str) -> Option<String> {
    payload?
        .get(key)?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// String elements of the array at `key`; `None` when there are none.
fn list_field(payload: Option<&Value>, key: &str) -> Option<Vec<String>> {
    let items: Vec<String> = payload?
        .get(key)?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();

    (!items.is_empty()).then_some(items)
}

/// String-valued entries of the object at `key`, in upstream order.
fn map_field(payload: Option<&Value>, key: &str) -> Option<IndexMap<String, String>> {
    let entries: IndexMap<String, String> = payload?
        .get(key)?
        .as_object()?
        .iter()
        .filter_map(|(label, url)| url.as_str().map(|url| (label.clone(), url.to_string())))
        .collect();

    (!entries.is_empty()).then_some(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CODE_OK;
    use serde_json::json;

    fn data_of(result: ParseResult) -> ParseData {
        assert_eq!(result.code, CODE_OK, "unexpected failure: {:?}", result.msg);
        result.data.expect("success carries data")
    }

    #[test]
    fn non_success_code_is_rejected_regardless_of_payload() {
        for response in [
            json!({ "code": 201, "data": { "url": "https://cdn.example.com/a.mp4" } }),
            json!({ "code": "200", "data": { "url": "https://cdn.example.com/a.mp4" } }),
            json!({ "code": -1, "msg": "upstream exploded" }),
            json!({ "data": { "url": "https://cdn.example.com/a.mp4" } }),
            json!(null),
            json!([]),
        ] {
            for platform in Platform::ALL {
                let result = normalize(platform, &response);
                assert_eq!(result, ParseResult::failure(400, "解析失败，请检查链接是否正确"));
            }
        }
    }

    #[test]
    fn copies_metadata_verbatim() {
        let response = json!({
            "code": 200,
            "data": {
                "author": "作者",
                "title": "标题",
                "description": "描述",
                "url": "http://cdn.example.com/v.mp4?sign=abc"
            }
        });
        let data = data_of(normalize(Platform::Bilibili, &response));
        assert_eq!(data.author.as_deref(), Some("作者"));
        assert_eq!(data.title.as_deref(), Some("标题"));
        assert_eq!(data.description.as_deref(), Some("描述"));
        assert_eq!(data.url.as_deref(), Some("http://cdn.example.com/v.mp4?sign=abc"));
    }

    #[test]
    fn metadata_keeps_empty_strings() {
        let response = json!({
            "code": 200,
            "data": { "author": "", "title": "", "description": 7, "url": "u" }
        });
        let data = data_of(normalize(Platform::Bilibili, &response));
        assert_eq!(data.author.as_deref(), Some(""));
        assert_eq!(data.title.as_deref(), Some(""));
        assert!(data.description.is_none());
        assert_eq!(data.url.as_deref(), Some("u"));
    }

    #[test]
    fn douyin_prefers_url_over_images() {
        let response = json!({
            "code": 200,
            "data": { "url": "https://cdn.example.com/v.mp4", "images": ["https://cdn.example.com/1.jpg"] }
        });
        let data = data_of(normalize(Platform::Douyin, &response));
        assert_eq!(data.url.as_deref(), Some("https://cdn.example.com/v.mp4"));
        assert!(data.images.is_none());
    }

    #[test]
    fn douyin_falls_back_to_images() {
        let images = vec![
            "https://cdn.example.com/1.jpg".to_string(),
            "https://cdn.example.com/2.jpg".to_string(),
        ];
        let response = json!({ "code": 200, "data": { "images": images.clone() } });
        let data = data_of(normalize(Platform::Douyin, &response));
        assert_eq!(data.images, Some(images));
        assert!(data.url.is_none());
    }

    #[test]
    fn xiaohongshu_prefers_imgurl_then_url() {
        let both = json!({
            "code": 200,
            "data": { "imgurl": ["https://ci.example.com/1.webp"], "url": "https://cdn.example.com/v.mp4" }
        });
        let data = data_of(normalize(Platform::Xiaohongshu, &both));
        assert_eq!(data.imgurl, Some(vec!["https://ci.example.com/1.webp".to_string()]));
        assert!(data.url.is_none());

        let video_only = json!({ "code": 200, "data": { "url": "https://cdn.example.com/v.mp4" } });
        let data = data_of(normalize(Platform::Xiaohongshu, &video_only));
        assert_eq!(data.url.as_deref(), Some("https://cdn.example.com/v.mp4"));
        assert!(data.imgurl.is_none());
    }

    #[test]
    fn weibo_quality_urls_are_copied_unchanged() {
        let response = json!({
            "code": 200,
            "data": {
                "quality_urls": {
                    "高清 1080P": "https://f.video.example.com/1080.mp4?a=1",
                    "标清 480P": "https://f.video.example.com/480.mp4",
                    "流畅 360P": "http://f.video.example.com/360.mp4"
                }
            }
        });
        let data = data_of(normalize(Platform::Weibo, &response));
        let quality_urls = data.quality_urls.expect("quality urls");
        let pairs: Vec<(&str, &str)> = quality_urls
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("高清 1080P", "https://f.video.example.com/1080.mp4?a=1"),
                ("标清 480P", "https://f.video.example.com/480.mp4"),
                ("流畅 360P", "http://f.video.example.com/360.mp4"),
            ]
        );
        assert!(data.url.is_none());
    }

    #[test]
    fn weibo_quality_urls_drop_non_string_values() {
        let response = json!({
            "code": 200,
            "data": {
                "quality_urls": {
                    "高清 1080P": "https://f.video.example.com/1080.mp4",
                    "bitrate": 2500,
                    "backup": null,
                    "标清 480P": "https://f.video.example.com/480.mp4"
                }
            }
        });
        let data = data_of(normalize(Platform::Weibo, &response));
        let labels: Vec<&str> = data
            .quality_urls
            .as_ref()
            .expect("quality urls")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(labels, vec!["高清 1080P", "标清 480P"]);
    }

    #[test]
    fn weibo_falls_back_to_url() {
        let response = json!({ "code": 200, "data": { "quality_urls": {}, "url": "https://f.video.example.com/v.mp4" } });
        let data = data_of(normalize(Platform::Weibo, &response));
        assert!(data.quality_urls.is_none());
        assert_eq!(data.url.as_deref(), Some("https://f.video.example.com/v.mp4"));
    }

    #[test]
    fn single_url_platforms_ignore_other_shapes() {
        let response = json!({
            "code": 200,
            "data": { "images": ["https://cdn.example.com/1.jpg"], "imgurl": ["x"], "quality_urls": { "hd": "y" } }
        });
        for platform in [Platform::Bilibili, Platform::Pipix, Platform::Qishui] {
            assert_eq!(data_of(normalize(platform, &response)), ParseData::default());
        }
    }

    #[test]
    fn missing_media_is_not_an_error() {
        let response = json!({ "code": 200, "data": { "title": "only a title" } });
        let data = data_of(normalize(Platform::Douyin, &response));
        assert_eq!(data.title.as_deref(), Some("only a title"));
        assert!(data.url.is_none() && data.images.is_none());

        let bare = json!({ "code": 200 });
        assert_eq!(data_of(normalize(Platform::Weibo, &bare)), ParseData::default());
    }

    #[test]
    fn wrongly_typed_fields_count_as_absent() {
        let response = json!({
            "code": 200.0,
            "data": { "author": 42, "title": null, "url": ["not", "a", "string"], "images": [1, 2, "https://cdn.example.com/3.jpg"] }
        });
        let data = data_of(normalize(Platform::Douyin, &response));
        assert!(data.author.is_none() && data.title.is_none() && data.url.is_none());
        assert_eq!(data.images, Some(vec!["https://cdn.example.com/3.jpg".to_string()]));
    }
}
