//! Social signal extraction: fetch, then run the text heuristics.

use sitesmith_core::{
    SocialBrandSignal, SocialContentSignal, SocialMedia, SocialProfile, SocialSignalSet,
};

use crate::analysis::{
    detect_aesthetic, detect_color_words, detect_posting_style, detect_themes, detect_tone,
    rank_hashtags, DEFAULT_TONE, NEUTRAL_PALETTE,
};
use crate::client::{MediaItem, ProfileResponse, SocialClient, MAX_MEDIA_ITEMS};

/// Reduce a handle, `@handle` or profile URL to the bare handle.
///
/// Returns `None` when nothing usable remains.
#[must_use]
pub fn normalize_handle(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let candidate = if trimmed.contains('/') {
        trimmed
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .split('/')
            .rfind(|segment| !segment.is_empty())
            .unwrap_or_default()
    } else {
        trimmed
    };
    let handle = candidate.trim_start_matches('@');
    let valid = !handle.is_empty()
        && handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    valid.then(|| handle.to_string())
}

/// Fetch and analyze a social profile.
///
/// `None` when there is no client (credential not configured), the handle is
/// unusable, or the profile fetch fails. A failed media fetch degrades to an
/// empty media list.
pub async fn extract_social_signals(
    client: Option<&SocialClient>,
    raw_handle: &str,
) -> Option<SocialSignalSet> {
    let Some(client) = client else {
        tracing::debug!("social credential not configured; skipping social extraction");
        return None;
    };
    let Some(handle) = normalize_handle(raw_handle) else {
        tracing::warn!(handle = %raw_handle, "unusable social handle");
        return None;
    };

    let profile = match client.fetch_profile(&handle).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(handle = %handle, error = %e, "social profile fetch failed");
            return None;
        }
    };

    let media = match client.fetch_recent_media(&handle, MAX_MEDIA_ITEMS).await {
        Ok(media) => media,
        Err(e) => {
            tracing::warn!(
                handle = %handle,
                error = %e,
                "social media fetch failed; continuing without media"
            );
            Vec::new()
        }
    };

    let signals = analyze_social(&handle, profile, media);
    tracing::debug!(
        handle = %handle,
        tone = %signals.brand.tone,
        media = signals.media.len(),
        color_hits = signals.brand.color_hits.len(),
        "social signals extracted"
    );
    Some(signals)
}

/// Pure analysis of an already-fetched profile and media list.
#[must_use]
pub fn analyze_social(
    handle: &str,
    profile: ProfileResponse,
    media: Vec<MediaItem>,
) -> SocialSignalSet {
    let captions: Vec<&str> = media.iter().filter_map(|m| m.caption.as_deref()).collect();
    let caption_text = captions.join("\n");
    let combined = format!("{}\n{caption_text}", profile.biography);

    let color_hits = detect_color_words(&combined);
    let palette = if color_hits.is_empty() {
        NEUTRAL_PALETTE.iter().map(|c| (*c).to_string()).collect()
    } else {
        color_hits.clone()
    };

    let brand = SocialBrandSignal {
        color_hits,
        palette,
        tone: detect_tone(&combined).unwrap_or(DEFAULT_TONE).to_string(),
        aesthetic: detect_aesthetic(&combined),
    };

    let content = SocialContentSignal {
        hashtags: rank_hashtags(captions.iter().copied()),
        themes: detect_themes(&caption_text),
        posting_style: detect_posting_style(&caption_text).to_string(),
    };

    let display_name = [&profile.full_name, &profile.username]
        .into_iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or(handle)
        .to_string();

    let mut ranked_media: Vec<SocialMedia> = media
        .iter()
        .filter(|m| !m.image_url.trim().is_empty())
        .map(|m| SocialMedia {
            url: m.image_url.trim().to_string(),
            caption: m.caption.clone().unwrap_or_default(),
            engagement: m.like_count,
        })
        .collect();
    // Stable: equal engagement keeps feed order.
    ranked_media.sort_by(|a, b| b.engagement.cmp(&a.engagement));

    SocialSignalSet {
        handle: handle.to_string(),
        profile: SocialProfile {
            display_name,
            bio: profile.biography.trim().to_string(),
            follower_count: profile.follower_count,
            post_count: profile.media_count,
            avatar_url: profile.profile_pic_url.filter(|u| !u.trim().is_empty()),
        },
        brand,
        content,
        media: ranked_media,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(url: &str, caption: &str, likes: u64) -> MediaItem {
        MediaItem {
            image_url: url.to_string(),
            caption: Some(caption.to_string()),
            like_count: likes,
        }
    }

    #[test]
    fn normalize_handle_accepts_common_forms() {
        assert_eq!(normalize_handle("@acme.bakes").as_deref(), Some("acme.bakes"));
        assert_eq!(
            normalize_handle("https://www.instagram.com/acme_bakes/?hl=en").as_deref(),
            Some("acme_bakes")
        );
        assert_eq!(normalize_handle("  acme  ").as_deref(), Some("acme"));
        assert_eq!(normalize_handle("@"), None);
        assert_eq!(normalize_handle("not a handle"), None);
    }

    #[tokio::test]
    async fn no_client_means_no_signals() {
        assert!(extract_social_signals(None, "acme").await.is_none());
    }

    #[test]
    fn analysis_combines_bio_and_captions() {
        let profile = ProfileResponse {
            username: "acme".to_string(),
            full_name: "Acme Bakery".to_string(),
            biography: "Cozy family bakery. Sage and cream everything.".to_string(),
            follower_count: 1200,
            media_count: 88,
            profile_pic_url: Some("https://cdn.example.com/avatar.jpg".to_string()),
        };
        let items = vec![
            media("https://cdn.example.com/1.jpg", "Fresh brunch menu #bakery", 10),
            media("https://cdn.example.com/2.jpg", "Behind the scenes #bakery #local", 50),
            media("", "no image", 999),
        ];

        let set = analyze_social("acme", profile, items);

        assert_eq!(set.profile.display_name, "Acme Bakery");
        assert_eq!(set.profile.post_count, 88);
        assert_eq!(set.brand.tone, "warm");
        assert_eq!(set.brand.color_hits, vec!["#87a96b", "#fffdd0"]);
        assert_eq!(set.brand.palette, set.brand.color_hits);
        assert_eq!(set.content.hashtags[0].tag, "bakery");
        assert_eq!(set.content.hashtags[0].count, 2);
        assert_eq!(set.content.themes, vec!["food", "local"]);
        assert_eq!(set.content.posting_style, "behind-the-scenes");
        assert_eq!(set.media.len(), 2);
        assert_eq!(set.media[0].engagement, 50);
        assert_eq!(set.media[1].url, "https://cdn.example.com/1.jpg");
    }

    #[test]
    fn no_color_words_falls_back_to_neutral_palette() {
        let set = analyze_social("acme", ProfileResponse::default(), Vec::new());
        assert!(set.brand.color_hits.is_empty());
        assert_eq!(set.brand.palette, NEUTRAL_PALETTE.to_vec());
        assert_eq!(set.brand.tone, DEFAULT_TONE);
        assert_eq!(set.content.posting_style, "mixed");
        assert_eq!(set.profile.display_name, "acme");
        assert!(set.media.is_empty());
    }
}
