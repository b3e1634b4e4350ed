use super::*;

const LISTING: &str = r#"{
  "kind": "Listing",
  "data": {
    "children": [
      {"data": {"url": "https://i.redd.it/good.jpg", "post_hint": "image", "is_video": false, "over_18": false}},
      {"data": {"url": "https://i.redd.it/video.jpg", "post_hint": "image", "is_video": true, "over_18": false}},
      {"data": {"url": "https://i.redd.it/nsfw.png", "post_hint": "image", "is_video": false, "over_18": true}},
      {"data": {"url": "https://example.com/article", "post_hint": "link", "is_video": false, "over_18": false}},
      {"data": {"url": "https://i.redd.it/nohint.png"}},
      {"data": {"url": "https://i.redd.it/page.html", "post_hint": "image"}}
    ]
  }
}"#;

#[test]
fn listing_filter_keeps_only_safe_still_images() {
    let listing: Listing = serde_json::from_str(LISTING).unwrap();
    let kept: Vec<String> = listing
        .data
        .children
        .into_iter()
        .map(|c| c.data)
        .filter(Post::is_candidate)
        .map(|p| p.url)
        .collect();
    assert_eq!(kept, vec!["https://i.redd.it/good.jpg".to_string()]);
}

#[test]
fn empty_listing_parses() {
    let listing: Listing = serde_json::from_str(r#"{"data": {}}"#).unwrap();
    assert!(listing.data.children.is_empty());
}

#[test]
fn fallback_comes_from_configured_list() {
    let client = RedditClient::with_base_url(reqwest::Client::new(), "http://127.0.0.1:9/")
        .with_fallbacks(vec!["https://fallback/a.png".to_string()]);
    assert_eq!(client.base_url, "http://127.0.0.1:9");
    assert_eq!(client.pick_fallback().unwrap(), "https://fallback/a.png");

    let empty = client.with_fallbacks(Vec::new());
    assert!(matches!(empty.pick_fallback(), Err(SpudcatError::Fetch(_))));
}

#[test]
fn default_subreddits_and_fallbacks() {
    let client = RedditClient::new(reqwest::Client::new());
    assert_eq!(client.subreddits, vec!["potato", "PotatoesAreFunny", "potatoes"]);
    assert!(client.fallbacks.iter().all(|u| is_image_url(u)));
}
