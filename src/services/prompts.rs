//! Prompt builders for content generation.
//!
//! The phrases in `markers` identify each prompt kind; the offline client keys
//! its canned answers on them.

use crate::models::{BusinessProfile, ContentTemplate, Platform};

pub mod markers {
    pub const REASONING: &str = "Explain in business terms";
    pub const CONTENT_TEMPLATE: &str = "Format the output as a JSON object";
    pub const PERSONA: &str = "customer persona";
    pub const RISKS: &str = "potential risks";
    pub const STRATEGY: &str = "strategic next step";
}

pub fn reasoning(business: &BusinessProfile, platform: Platform) -> String {
    format!(
        "You are a micro-business marketing consultant. {} why {} is a good marketing \
         channel for a {} business whose primary goal is {}.\n\
         Business description: {}\n\
         Answer in two or three persuasive, concrete sentences.",
        markers::REASONING,
        platform,
        business.business_type,
        business.goal,
        describe(business),
    )
}

pub fn content_template(
    business: &BusinessProfile,
    platform: Platform,
    seed: Option<&ContentTemplate>,
) -> String {
    let mut prompt = format!(
        "You are a social media copywriter. Write one {} post for a {} business \
         with the goal of {}.\n\
         Business description: {}\n",
        platform,
        business.business_type,
        business.goal,
        describe(business),
    );

    if let Some(seed) = seed {
        prompt.push_str(&format!(
            "Use this existing template as a starting point:\nHook: {}\nCaption: {}\nCTA: {}\nHashtags: {}\n",
            seed.hook,
            seed.caption,
            seed.cta,
            seed.hashtags.join(" "),
        ));
    }

    prompt.push_str(&format!(
        "{} with the string fields \"hook\", \"caption\", \"cta\" and a \"hashtags\" array. \
         Return only the JSON.",
        markers::CONTENT_TEMPLATE
    ));
    prompt
}

pub fn persona(business: &BusinessProfile) -> String {
    format!(
        "In one or two sentences, describe the ideal {} for a {} business located in {}.\n\
         Business description: {}",
        markers::PERSONA,
        business.business_type,
        if business.is_online_only() {
            "no particular place (online only)"
        } else {
            business.location.as_str()
        },
        describe(business),
    )
}

pub fn risks(platform: Platform) -> String {
    format!(
        "List the three biggest {} a micro-business faces when relying on {} for marketing. \
         Put each risk on its own line with no extra commentary.",
        markers::RISKS,
        platform
    )
}

pub fn strategy(business: &BusinessProfile, platform: Platform) -> String {
    format!(
        "A {} business with a monthly marketing budget of ${:.2} will focus on {}. \
         Suggest one concrete {} they can take this week, in two sentences.",
        business.business_type,
        business.budget,
        platform,
        markers::STRATEGY
    )
}

fn describe(business: &BusinessProfile) -> &str {
    let description = business.description.trim();
    if description.is_empty() {
        "(not provided)"
    } else {
        description
    }
}
