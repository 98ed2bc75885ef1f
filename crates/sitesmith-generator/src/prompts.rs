//! Prompt text for the research, brief and artifact stages.
//!
//! Every resolved attribute family is rendered together with a phrase naming
//! where it came from, so the service can weigh client-provided values over
//! industry defaults.

use std::fmt::Write as _;

use sitesmith_core::{BrandProfile, LogoSpec, SourceTier};

/// Provenance phrase for a source tier.
#[must_use]
pub fn provenance_phrase(tier: SourceTier) -> &'static str {
    match tier {
        SourceTier::User => "provided directly by the client",
        SourceTier::Social => "extracted from the client's social profile",
        SourceTier::Markup => "extracted from the client's existing website",
        SourceTier::Competitors => "derived from competitor websites",
        SourceTier::Default => "selected as industry defaults",
    }
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

/// Business context shared by every stage prompt.
#[must_use]
pub fn business_context(profile: &BrandProfile) -> String {
    let mut out = String::new();
    let location = profile.location.as_deref().unwrap_or("not specified");

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Business name: {}", profile.business_name);
    let _ = writeln!(out, "Category: {}", profile.category);
    let _ = writeln!(out, "Location: {location}");
    let _ = writeln!(out, "Style preset: {}", profile.style_preset);

    let colors = &profile.colors;
    let _ = writeln!(
        out,
        "\nColors ({}): primary {}, secondary {}, accent {}, background {}, text {}",
        provenance_phrase(colors.source),
        colors.value.primary,
        colors.value.secondary,
        colors.value.accent,
        colors.value.background,
        colors.value.text,
    );

    let fonts = &profile.fonts;
    let _ = writeln!(
        out,
        "Typography ({}): headings in {}, body in {}",
        provenance_phrase(fonts.source),
        fonts.value.heading,
        fonts.value.body,
    );

    let layout = &profile.layout;
    let _ = writeln!(
        out,
        "Layout ({}): {} page, {} hero, {} navigation, {} spacing, {} cards",
        provenance_phrase(layout.source),
        layout.value.style,
        layout.value.hero_style,
        layout.value.nav_style,
        layout.value.spacing,
        layout.value.card_style,
    );

    let tone = &profile.tone;
    let _ = writeln!(
        out,
        "Tone ({}): {}; aesthetic: {}; vibe: {}",
        provenance_phrase(tone.source),
        tone.value.label,
        tone.value.aesthetic,
        tone.value.vibe,
    );

    let content = &profile.content;
    let _ = writeln!(
        out,
        "\nContent ({}):\n- Tagline: {}\n- Description: {}\n- Services: {}\n- Trust signals: {}\n- Calls to action: {}",
        provenance_phrase(content.source),
        content.value.tagline,
        content.value.description,
        join_or(&content.value.services, "none listed"),
        join_or(&content.value.trust_signals, "none listed"),
        join_or(&content.value.calls_to_action, "none listed"),
    );

    let images = &profile.images;
    let logo = match &images.value.logo {
        LogoSpec::Image { url } => format!("image at {url}"),
        LogoSpec::Wordmark { text } => format!("text wordmark \"{text}\""),
    };
    let _ = writeln!(
        out,
        "\nImages ({}):\n- Logo: {logo}\n- Hero image: {}\n- Gallery: {}",
        provenance_phrase(images.source),
        images.value.hero,
        join_or(&images.value.gallery, "none"),
    );

    let contact = &profile.contact;
    let _ = writeln!(
        out,
        "\nContact ({}):\n- Phone: {}\n- Email: {}\n- Address: {}",
        provenance_phrase(contact.source),
        contact.value.phone.as_deref().unwrap_or("not provided"),
        contact.value.email.as_deref().unwrap_or("not provided"),
        contact.value.address.as_deref().unwrap_or("not provided"),
    );

    let industry = &profile.industry;
    let _ = writeln!(
        out,
        "\nIndustry context ({}):\n- Target audience: {}\n- Must-have elements: {}\n- Differentiators: {}",
        provenance_phrase(industry.source),
        industry.value.target_audience,
        join_or(&industry.value.must_have_elements, "none"),
        join_or(&industry.value.differentiators, "none"),
    );

    out
}

#[must_use]
pub fn research_prompt(profile: &BrandProfile) -> String {
    let location = profile.location.as_deref().unwrap_or("their service area");
    format!(
        "You are a brand strategist researching a small business before its website is designed.\n\n\
         {context}\n\
         Write concise research notes on:\n\
         1. What customers of a {category} in {location} look for when choosing a provider.\n\
         2. Visual conventions in this industry and where this business can stand out.\n\
         3. Positioning and messaging angles that fit the tone above.\n\
         Answer in plain prose with short headed sections.",
        context = business_context(profile),
        category = profile.category,
    )
}

#[must_use]
pub fn brief_prompt(profile: &BrandProfile, research: &str) -> String {
    let research = if research.trim().is_empty() {
        "No research notes are available; rely on the business context."
    } else {
        research
    };
    format!(
        "You are a senior web designer writing a design brief for a single-page website.\n\n\
         {context}\n\
         Research notes:\n{research}\n\n\
         Write a structured brief covering: color palette usage, typography, page layout and \
         section order, content strategy for each section, and the differentiators to emphasize. \
         Values provided by the client take priority over industry defaults.",
        context = business_context(profile),
    )
}

#[must_use]
pub fn artifact_prompt(profile: &BrandProfile, brief: &str) -> String {
    let brief = if brief.trim().is_empty() {
        "No design brief is available; derive the design from the business context."
    } else {
        brief
    };
    format!(
        "You are an expert front-end developer. Build the complete website for this business.\n\n\
         {context}\n\
         Design brief:\n{brief}\n\n\
         Hard constraints:\n\
         - Output one self-contained HTML document, starting with <!DOCTYPE html> and ending with </html>.\n\
         - Inline all CSS and JavaScript; link only to the listed image URLs and web fonts.\n\
         - Navigation uses internal anchor links (#section-id) only.\n\
         - Do not use emoji or decorative glyphs.\n\
         - Do not use placeholder content such as lorem ipsum or example.com contact details; \
         omit anything that is not provided.\n\
         - Output only the document, with no commentary before or after it.",
        context = business_context(profile),
    )
}
