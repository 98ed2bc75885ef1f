//! Priority-resolution fusion of extracted signals into a [`BrandProfile`].
//!
//! Each attribute family walks its own precedence chain
//! (user, social, markup, competitors, default) and records the tier that
//! produced it. Families resolve independently, so a profile can carry user
//! colors next to competitor fonts. The last tier always draws on the catalog,
//! which makes the result total.

use sitesmith_core::color::{darken, lighten, normalize_hex, SYNTHESIS_OFFSET};
use sitesmith_core::{
    BrandProfile, Catalog, CategoryDefaults, ColorPalette, CompetitorPatternSet, ContactDetails,
    ContentSpec, ImageSet, IndustryContext, LayoutSpec, LogoSpec, MarkupSignalSet,
    RawExtractionInput, SocialSignalSet, SourceTier, Sourced, StylePreset, ToneProfile,
    Typography,
};
use sitesmith_social::detect_tone;

use crate::matcher::match_style_preset;

/// Wordmark text when the request has no business name.
pub const FALLBACK_BUSINESS_NAME: &str = "Your Business";

const COMPACT_SECTION_COUNT: usize = 8;
const AIRY_SECTION_COUNT: usize = 3;

/// Everything the extractors produced for one request. Any source may be
/// absent.
#[derive(Debug, Clone, Default)]
pub struct ExtractedSignals {
    pub markup: Option<MarkupSignalSet>,
    pub social: Option<SocialSignalSet>,
    pub competitors: Option<CompetitorPatternSet>,
}

/// Shared lookups for one fusion pass.
struct FusionContext<'a> {
    input: &'a RawExtractionInput,
    signals: &'a ExtractedSignals,
    category: &'a CategoryDefaults,
    /// Preset matched from the user's notes and tone, else the category preset.
    preset: &'a StylePreset,
    user_matched_preset: bool,
    /// Preset behind every default-tier value.
    category_preset: &'a StylePreset,
    business_name: String,
}

impl FusionContext<'_> {
    fn location(&self) -> Option<&str> {
        self.input
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    fn default_tagline(&self) -> String {
        self.category.render_tagline(
            &self.business_name,
            &self.input.category,
            self.location(),
        )
    }

    fn default_description(&self) -> String {
        self.category.render_description(
            &self.business_name,
            &self.input.category,
            self.location(),
        )
    }
}

/// Fuse `input` and `signals` into a fully populated profile.
///
/// Pure and deterministic: the same arguments always give the same profile.
#[must_use]
pub fn fuse_brand_profile(
    input: &RawExtractionInput,
    signals: &ExtractedSignals,
    catalog: &Catalog,
) -> BrandProfile {
    let category = catalog.category(&input.category);
    let style = match_style_preset(catalog, &input.preferences.style_text(), &input.category);
    let business_name = non_blank(&input.business_name)
        .unwrap_or(FALLBACK_BUSINESS_NAME)
        .to_string();

    let ctx = FusionContext {
        input,
        signals,
        category,
        preset: style.preset,
        user_matched_preset: style.matched,
        category_preset: catalog.category_preset(&input.category),
        business_name,
    };

    let profile = BrandProfile {
        business_name: ctx.business_name.clone(),
        category: non_blank(&input.category)
            .unwrap_or(&category.key)
            .to_string(),
        location: ctx.location().map(str::to_string),
        slug: input.slug(),
        style_preset: ctx.preset.name.clone(),
        colors: resolve_colors(&ctx),
        fonts: resolve_fonts(&ctx),
        layout: resolve_layout(&ctx),
        tone: resolve_tone(&ctx),
        content: resolve_content(&ctx),
        images: resolve_images(&ctx),
        contact: resolve_contact(&ctx),
        industry: resolve_industry(&ctx),
    };

    tracing::debug!(
        slug = %profile.slug,
        preset = %profile.style_preset,
        colors = %profile.colors.source,
        fonts = %profile.fonts.source,
        layout = %profile.layout.source,
        tone = %profile.tone.source,
        content = %profile.content.source,
        images = %profile.images.source,
        "brand profile fused"
    );
    profile
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn non_blank_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .filter_map(|v| non_blank(v))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

fn resolve_colors(ctx: &FusionContext<'_>) -> Sourced<ColorPalette> {
    let user: Vec<String> = ctx
        .input
        .preferences
        .colors
        .iter()
        .filter_map(|c| normalize_hex(c))
        .collect();
    if user.len() >= 2 {
        return Sourced::new(palette_from_list(&user, ctx.category), SourceTier::User);
    }

    if let Some(social) = &ctx.signals.social {
        if social.brand.color_hits.len() >= 2 {
            return Sourced::new(
                palette_from_list(&social.brand.color_hits, ctx.category),
                SourceTier::Social,
            );
        }
    }

    if let Some(markup) = &ctx.signals.markup {
        let roles = &markup.palette.roles;
        if let Some(primary) = &roles.primary {
            let palette = ColorPalette {
                secondary: roles
                    .secondary
                    .clone()
                    .unwrap_or_else(|| darken(primary, SYNTHESIS_OFFSET)),
                accent: roles
                    .accent
                    .clone()
                    .unwrap_or_else(|| lighten(primary, SYNTHESIS_OFFSET)),
                background: roles
                    .background
                    .clone()
                    .unwrap_or_else(|| default_background(ctx.category)),
                text: roles
                    .text
                    .clone()
                    .unwrap_or_else(|| default_text(ctx.category)),
                primary: primary.clone(),
            };
            return Sourced::new(palette, SourceTier::Markup);
        }
    }

    if let Some(competitors) = &ctx.signals.competitors {
        if competitors.colors.len() >= 2 {
            return Sourced::new(
                palette_from_list(&competitors.colors, ctx.category),
                SourceTier::Competitors,
            );
        }
    }

    let p = &ctx.category.palette;
    Sourced::new(
        ColorPalette {
            primary: p[0].clone(),
            secondary: p[1].clone(),
            accent: p[2].clone(),
            background: p[3].clone(),
            text: p[4].clone(),
        },
        SourceTier::Default,
    )
}

/// Brand colors from an ordered list (primary, secondary, accent). The
/// page-level background and text colors come from the category palette.
fn palette_from_list(colors: &[String], category: &CategoryDefaults) -> ColorPalette {
    let primary = colors[0].clone();
    let secondary = colors
        .get(1)
        .cloned()
        .unwrap_or_else(|| darken(&primary, SYNTHESIS_OFFSET));
    let accent = colors
        .get(2)
        .cloned()
        .unwrap_or_else(|| lighten(&primary, SYNTHESIS_OFFSET));
    ColorPalette {
        primary,
        secondary,
        accent,
        background: default_background(category),
        text: default_text(category),
    }
}

fn default_background(category: &CategoryDefaults) -> String {
    category.palette[3].clone()
}

fn default_text(category: &CategoryDefaults) -> String {
    category.palette[4].clone()
}

// ---------------------------------------------------------------------------
// Fonts and layout
// ---------------------------------------------------------------------------

fn resolve_fonts(ctx: &FusionContext<'_>) -> Sourced<Typography> {
    let typography = |heading: &str, body: &str| Typography {
        heading: heading.to_string(),
        body: body.to_string(),
    };

    if ctx.user_matched_preset {
        let t = &ctx.preset.typography;
        return Sourced::new(typography(&t.heading, &t.body), SourceTier::User);
    }

    if let Some(markup) = &ctx.signals.markup {
        let heading = markup.fonts.heading.as_deref().or(markup.fonts.body.as_deref());
        let body = markup.fonts.body.as_deref().or(markup.fonts.heading.as_deref());
        if let (Some(heading), Some(body)) = (heading, body) {
            return Sourced::new(typography(heading, body), SourceTier::Markup);
        }
    }

    if let Some(competitors) = &ctx.signals.competitors {
        if let Some(first) = competitors.fonts.first() {
            let body = competitors.fonts.get(1).unwrap_or(first);
            return Sourced::new(typography(first, body), SourceTier::Competitors);
        }
    }

    let t = &ctx.category_preset.typography;
    Sourced::new(typography(&t.heading, &t.body), SourceTier::Default)
}

fn spacing_for_sections(section_count: usize) -> &'static str {
    if section_count >= COMPACT_SECTION_COUNT {
        "compact"
    } else if section_count <= AIRY_SECTION_COUNT {
        "airy"
    } else {
        "balanced"
    }
}

fn resolve_layout(ctx: &FusionContext<'_>) -> Sourced<LayoutSpec> {
    let bundle = &ctx.category_preset.layout;

    if let Some(markup) = &ctx.signals.markup {
        let layout = &markup.layout;
        return Sourced::new(
            LayoutSpec {
                style: layout.style.clone(),
                hero_style: layout.hero_style.clone(),
                nav_style: layout.nav_style.clone(),
                spacing: spacing_for_sections(layout.section_count).to_string(),
                card_style: bundle.card_style.clone(),
            },
            SourceTier::Markup,
        );
    }

    if let Some(competitors) = &ctx.signals.competitors {
        return Sourced::new(
            LayoutSpec {
                style: competitors.layout_style.clone(),
                hero_style: competitors.hero_style.clone(),
                nav_style: competitors.nav_style.clone(),
                spacing: bundle.spacing.clone(),
                card_style: bundle.card_style.clone(),
            },
            SourceTier::Competitors,
        );
    }

    Sourced::new(
        LayoutSpec {
            style: bundle.style.clone(),
            hero_style: bundle.hero_style.clone(),
            nav_style: bundle.nav_style.clone(),
            spacing: bundle.spacing.clone(),
            card_style: bundle.card_style.clone(),
        },
        SourceTier::Default,
    )
}

// ---------------------------------------------------------------------------
// Tone and content
// ---------------------------------------------------------------------------

fn resolve_tone(ctx: &FusionContext<'_>) -> Sourced<ToneProfile> {
    let vibe = ctx.category_preset.vibe.clone();

    if let Some(tone) = ctx.input.preferences.tone.as_deref().and_then(non_blank) {
        return Sourced::new(
            ToneProfile {
                label: tone.to_lowercase(),
                aesthetic: ctx.category.aesthetic.clone(),
                vibe: ctx.preset.vibe.clone(),
            },
            SourceTier::User,
        );
    }

    if let Some(social) = &ctx.signals.social {
        return Sourced::new(
            ToneProfile {
                label: social.brand.tone.clone(),
                aesthetic: social.brand.aesthetic.clone(),
                vibe,
            },
            SourceTier::Social,
        );
    }

    if let Some(markup) = &ctx.signals.markup {
        let text = [
            markup.content.tagline.as_deref(),
            markup.content.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
        if let Some(label) = detect_tone(&text) {
            return Sourced::new(
                ToneProfile {
                    label: label.to_string(),
                    aesthetic: ctx.category.aesthetic.clone(),
                    vibe,
                },
                SourceTier::Markup,
            );
        }
    }

    Sourced::new(
        ToneProfile {
            label: ctx.category.tone.clone(),
            aesthetic: ctx.category.aesthetic.clone(),
            vibe,
        },
        SourceTier::Default,
    )
}

fn resolve_content(ctx: &FusionContext<'_>) -> Sourced<ContentSpec> {
    let category = ctx.category;
    let defaults = ContentSpec {
        tagline: ctx.default_tagline(),
        description: ctx.default_description(),
        services: category.services.clone(),
        trust_signals: category.trust_signals.clone(),
        calls_to_action: vec![category.call_to_action.clone()],
    };
    let or_default = |list: Vec<String>, fallback: &Vec<String>| {
        if list.is_empty() {
            fallback.clone()
        } else {
            list
        }
    };

    let prefs = &ctx.input.preferences;
    let services = non_blank_list(&prefs.services);
    let usps = non_blank_list(&prefs.usps);
    if !services.is_empty() || !usps.is_empty() {
        // USPs lead the trust signals so they reach the copy.
        let extra: Vec<String> = defaults
            .trust_signals
            .iter()
            .filter(|t| !usps.iter().any(|u| u.eq_ignore_ascii_case(t)))
            .cloned()
            .collect();
        let mut trust_signals = usps;
        trust_signals.extend(extra);
        return Sourced::new(
            ContentSpec {
                services: or_default(services, &defaults.services),
                trust_signals,
                ..defaults
            },
            SourceTier::User,
        );
    }

    if let Some(bio) = ctx
        .signals
        .social
        .as_ref()
        .and_then(|s| non_blank(&s.profile.bio))
    {
        return Sourced::new(
            ContentSpec {
                description: bio.to_string(),
                ..defaults
            },
            SourceTier::Social,
        );
    }

    if let Some(markup) = &ctx.signals.markup {
        let fragments = &markup.content;
        let has_copy = fragments.tagline.is_some()
            || fragments.description.is_some()
            || !fragments.service_candidates.is_empty();
        if has_copy {
            return Sourced::new(
                ContentSpec {
                    tagline: fragments.tagline.clone().unwrap_or(defaults.tagline),
                    description: fragments
                        .description
                        .clone()
                        .unwrap_or(defaults.description),
                    services: or_default(fragments.service_candidates.clone(), &defaults.services),
                    trust_signals: or_default(
                        fragments.trust_signals.clone(),
                        &defaults.trust_signals,
                    ),
                    calls_to_action: or_default(
                        fragments.calls_to_action.clone(),
                        &defaults.calls_to_action,
                    ),
                },
                SourceTier::Markup,
            );
        }
    }

    if let Some(competitors) = &ctx.signals.competitors {
        if !competitors.trust_signals.is_empty() {
            return Sourced::new(
                ContentSpec {
                    trust_signals: competitors.trust_signals.clone(),
                    ..defaults
                },
                SourceTier::Competitors,
            );
        }
    }

    Sourced::new(defaults, SourceTier::Default)
}

// ---------------------------------------------------------------------------
// Images, contact, industry
// ---------------------------------------------------------------------------

fn resolve_images(ctx: &FusionContext<'_>) -> Sourced<ImageSet> {
    let stock = &ctx.category.stock_images;
    let wordmark = || LogoSpec::Wordmark {
        text: ctx.business_name.clone(),
    };
    let logo_from = |url: Option<&String>| {
        url.map_or_else(wordmark, |url| LogoSpec::Image { url: url.clone() })
    };

    if let Some(social) = &ctx.signals.social {
        if social.profile.avatar_url.is_some() || !social.media.is_empty() {
            let media: Vec<String> = social.media.iter().map(|m| m.url.clone()).collect();
            return Sourced::new(
                ImageSet {
                    logo: logo_from(social.profile.avatar_url.as_ref()),
                    hero: media.first().cloned().unwrap_or_else(|| stock.hero.clone()),
                    gallery: if media.is_empty() {
                        stock.gallery.clone()
                    } else {
                        media
                    },
                },
                SourceTier::Social,
            );
        }
    }

    if let Some(markup) = &ctx.signals.markup {
        let images = &markup.images;
        if images.logo.is_some() || images.hero.is_some() || !images.gallery.is_empty() {
            return Sourced::new(
                ImageSet {
                    logo: logo_from(images.logo.as_ref()),
                    hero: images.hero.clone().unwrap_or_else(|| stock.hero.clone()),
                    gallery: if images.gallery.is_empty() {
                        stock.gallery.clone()
                    } else {
                        images.gallery.clone()
                    },
                },
                SourceTier::Markup,
            );
        }
    }

    Sourced::new(
        ImageSet {
            logo: wordmark(),
            hero: stock.hero.clone(),
            gallery: stock.gallery.clone(),
        },
        SourceTier::Default,
    )
}

fn resolve_contact(ctx: &FusionContext<'_>) -> Sourced<ContactDetails> {
    let user = &ctx.input.contact;
    let clean = |v: &Option<String>| v.as_deref().and_then(non_blank).map(str::to_string);
    let user_phone = clean(&user.phone);
    let user_email = clean(&user.email);
    let user_address = clean(&user.address);

    let markup = ctx.signals.markup.as_ref().map(|m| &m.content);
    let markup_phone = markup.and_then(|c| c.phone.clone());
    let markup_email = markup.and_then(|c| c.email.clone());

    let base = ContactDetails {
        business_name: ctx.business_name.clone(),
        location: ctx.location().map(str::to_string),
        phone: None,
        email: None,
        address: None,
    };

    if user_phone.is_some() || user_email.is_some() || user_address.is_some() {
        return Sourced::new(
            ContactDetails {
                phone: user_phone.or(markup_phone),
                email: user_email.or(markup_email),
                address: user_address,
                ..base
            },
            SourceTier::User,
        );
    }

    if markup_phone.is_some() || markup_email.is_some() {
        return Sourced::new(
            ContactDetails {
                phone: markup_phone,
                email: markup_email,
                ..base
            },
            SourceTier::Markup,
        );
    }

    Sourced::new(base, SourceTier::Default)
}

fn resolve_industry(ctx: &FusionContext<'_>) -> Sourced<IndustryContext> {
    let category = ctx.category;
    let prefs = &ctx.input.preferences;
    let usps = non_blank_list(&prefs.usps);

    let mut must_have_elements: Vec<String> = ctx
        .signals
        .competitors
        .as_ref()
        .map(|c| c.insights.clone())
        .unwrap_or_default();
    must_have_elements.extend(category.must_haves.iter().cloned());

    let source = if ctx.signals.competitors.is_some() {
        SourceTier::Competitors
    } else if !usps.is_empty() {
        SourceTier::User
    } else {
        SourceTier::Default
    };

    let differentiators = if usps.is_empty() {
        category.trust_signals.clone()
    } else {
        usps
    };
    let target_audience = prefs
        .target_customers
        .as_deref()
        .and_then(non_blank)
        .unwrap_or(&category.target_audience)
        .to_string();

    Sourced::new(
        IndustryContext {
            category: category.key.clone(),
            must_have_elements,
            differentiators,
            target_audience,
        },
        source,
    )
}

#[cfg(test)]
#[path = "fusion_test.rs"]
mod tests;
