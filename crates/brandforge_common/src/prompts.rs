//! Prompt templates sent to the text generation providers
//!
//! The orchestration core treats these as opaque strings; keeping them in one
//! place makes the wording reviewable without touching the engine.

/// Prompt for brand name/tagline candidates. The provider must answer with a
/// raw JSON array of {name, tagline, score} objects.
pub fn identity_prompt(idea: &str, industry: &str, tone: &str) -> String {
    format!(
        r#"Act as a professional branding agency.
Generate 3 unique brand names and taglines for a business with this description: "{idea}".
Industry: {industry}.
Tone: {tone}.

IMPORTANT: Brand names must be:
- Simple and easy to understand
- Clear and memorable
- Use common English words or simple combinations
- Avoid complex jargon or made-up words
- Clearly convey the brand's purpose or values

Return ONLY a JSON array with objects containing "name", "tagline", and an "score" (integer 1-100 indicating naming strength).
Example: [{{"name": "X", "tagline": "Y", "score": 90}}]
Do not output any markdown code blocks, just the raw JSON."#
    )
}

/// Prompt for three platform-specific social posts as a raw JSON array.
pub fn social_prompt(idea: &str, name: &str) -> String {
    format!(
        r#"Generate 3 social media posts for a new brand named "{name}".
Business Idea: {idea}.
Platforms: LinkedIn, Twitter, Instagram.
Return ONLY a JSON array of objects with keys: "platform", "content", "hashtags" (list of strings).
Do not include markdown formatting."#
    )
}

pub fn email_prompt(name: &str, idea: &str) -> String {
    format!("Write a short warm welcome email for a new customer of {name}, a brand about {idea}.")
}

pub fn summary_prompt(idea: &str) -> String {
    format!("Summarize this brand description into a concise 2-sentence elevator pitch: '{idea}'")
}

/// System prompt for the conversational branding assistant.
pub fn chat_system_prompt(context: &str) -> String {
    format!(
        r#"You are an elite AI Branding Consultant for the platform 'BrandForge'.
Your goal is to help users refine their brand identity, tagline, and strategy.

Context about user's brand so far: {context}

**RESPONSE GUIDELINES:**
1. **Be Structured**: Use short paragraphs, bullet points, and clear headings.
2. **Be Actionable**: Give concrete advice, not generic fluff.
3. **Use Formatting**: Use **bold** for key terms and headlines.
4. **Keep it Concise**: Avoid walls of text. Optimize for readability.

Example Format:
**Observation**
Your idea is strong because...

**Suggestions**
• Tip 1
• Tip 2

**Next Step**
Shall we refine the tagline?"#
    )
}

/// Prompt for the nine-area strategy report. The structure below is the
/// contract the normalizer validates against.
pub fn strategy_prompt(business_idea: &str) -> String {
    format!(
        r#"You are a senior startup strategist, brand positioning expert, and growth marketing consultant with decades of experience guiding new businesses to stand out in competitive markets.

Analyze the business idea and provide strategic insights to help the brand differentiate, identify its ideal audience, and apply effective marketing strategies.

IMPORTANT:
Base insights on common industry patterns, market behavior, and consumer trends — do NOT reference specific company names.

==================================================
BUSINESS IDEA:
{business_idea}

==================================================
OUTPUT STRUCTURE (STRICT FORMAT)
==================================================

You MUST return ONLY a valid JSON object with the following structure. Do not include any markdown code blocks, explanations, or additional text:

{{
  "industry_category": "Primary industry and sub-category",
  "market_offerings": ["Feature 1", "Feature 2", "Feature 3"],
  "saturation_level": "LOW or MODERATE or HIGH",
  "saturation_explanation": "One-line explanation of saturation level",
  "differentiation_opportunities": [
    "Opportunity 1 focusing on unmet needs",
    "Opportunity 2 focusing on underserved groups",
    "Opportunity 3 focusing on emerging trends"
  ],
  "value_positioning": [
    "Positioning idea 1",
    "Positioning idea 2"
  ],
  "target_audience": {{
    "demographics": "Age, location, income level, etc.",
    "behaviors": "Lifestyle traits and behavior patterns",
    "pain_points": "Specific problems they face",
    "why_choose": "Why they would choose this brand"
  }},
  "attraction_strategy": {{
    "messaging_style": "Recommended messaging approach",
    "emotional_triggers": "Key emotional appeals to use",
    "trust_building": "How to build credibility",
    "content_tone": "Recommended tone and voice"
  }},
  "marketing_strategies": {{
    "platforms": "Best social media and marketing channels",
    "content_strategy": "Content types and themes to create",
    "collaborations": "Influencer and partnership opportunities",
    "retention": "Customer loyalty and retention tactics"
  }},
  "strategic_advice": "Concise expert guidance to avoid being generic and build a strong brand identity"
}}

==================================================
QUALITY RULES
==================================================

• Be precise and realistic
• Avoid generic advice
• Focus on actionable insights
• Provide strategic clarity
• Keep output structured and professional
• Return ONLY the JSON object, no markdown formatting"#
    )
}
