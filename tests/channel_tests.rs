// Tests for channel identifier normalization.
//
// The three-way branch (handle / channel ID / bare string) decides which
// live-page URL the resolver hands to yt-dlp, so each arm is pinned here.

use vedika::ChannelId;

#[test]
fn test_handle_builds_handle_url() {
    let channel = ChannelId::new("@newsfirst");
    assert_eq!(
        channel.page_url(),
        "https://www.youtube.com/@newsfirst/live"
    );
}

#[test]
fn test_channel_id_builds_channel_url() {
    let channel = ChannelId::new("UC4aX2kAqqJcLbZLQ7c9wMGg");
    assert_eq!(
        channel.page_url(),
        "https://www.youtube.com/channel/UC4aX2kAqqJcLbZLQ7c9wMGg/live"
    );
}

#[test]
fn test_bare_string_treated_as_handle() {
    let channel = ChannelId::new("newsfirst");
    assert_eq!(
        channel.page_url(),
        "https://www.youtube.com/@newsfirst/live"
    );
}

#[test]
fn test_handle_marker_wins_over_channel_prefix() {
    // "@UC..." is a handle that happens to start with the ID prefix
    let channel = ChannelId::new("@UCnews");
    assert_eq!(channel.page_url(), "https://www.youtube.com/@UCnews/live");
}

#[test]
fn test_whitespace_is_trimmed() {
    let channel = ChannelId::new("  @newsfirst  ");
    assert_eq!(channel.as_str(), "@newsfirst");
}

#[test]
fn test_slug_replaces_unsafe_characters() {
    assert_eq!(ChannelId::new("@newsfirst").slug(), "-newsfirst");
    assert_eq!(
        ChannelId::new("UC4aX2kAqqJcLbZLQ7c9wMGg").slug(),
        "UC4aX2kAqqJcLbZLQ7c9wMGg"
    );
    assert_eq!(ChannelId::new("some channel/v2").slug(), "some-channel-v2");
}
