//! Capability fallback resolver
//!
//! One resolver method per generated capability. Each method walks its
//! provider chain strictly in order and converts every provider error into
//! a silent advance to the next tier. The last tier of every chain is a
//! local deterministic synthesis that cannot fail, so resolver methods are
//! total: callers never see an error, only a provenance tag saying which
//! tier answered.

use crate::logo::{build_logo_prompt, placeholder_logo, DEFAULT_PRIMARY_COLOR};
use crate::normalize;
use crate::provider::{ChatMessage, GenerationBackend};
use async_trait::async_trait;
use brandforge_common::prompts;
use brandforge_common::{
    credential, AttractionStrategyData, BrandIdentity, ForgeConfig, LogoArtifact,
    MarketingStrategiesData, SocialContent, StrategyAnalysis, TargetAudienceData, Tone,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

/// Timeout for lightweight classification calls.
const CLASSIFY_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for ordinary chat-completion calls.
const TEXT_TIMEOUT: Duration = Duration::from_secs(30);
/// Timeout for the long-form strategy report.
const STRATEGY_TIMEOUT: Duration = Duration::from_secs(60);
/// Timeout for image generation.
const IMAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// The welcome email goes to a larger model than the other text steps.
const EMAIL_MODEL: &str = "llama-3.3-70b-versatile";

// ============================================================================
// Tiers and provenance
// ============================================================================

/// Which tier of a fallback chain satisfied a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Live answer from the capability's primary provider.
    Primary,
    /// Live answer from a secondary provider.
    Secondary,
    /// No credential configured; synthesized up-front without a call.
    Simulation,
    /// Every fallible tier failed; deterministic local synthesis.
    Placeholder,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Simulation => "simulation",
            Self::Placeholder => "placeholder",
        }
    }
}

/// A resolved capability value plus the tier that produced it.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub value: T,
    pub tier: Tier,
}

impl<T> Resolved<T> {
    pub fn primary(value: T) -> Self {
        Self { value, tier: Tier::Primary }
    }

    pub fn simulation(value: T) -> Self {
        Self { value, tier: Tier::Simulation }
    }

    pub fn placeholder(value: T) -> Self {
        Self { value, tier: Tier::Placeholder }
    }
}

// ============================================================================
// Simulation and placeholder tiers
// ============================================================================

pub const SENTIMENT_SIMULATION: &str =
    "Sentiment Analysis (Simulation): Positive. Add HF_API_KEY for real analysis.";
pub const SENTIMENT_INCONCLUSIVE: &str = "Sentiment analysis inconclusive.";
pub const SENTIMENT_UNAVAILABLE: &str = "Sentiment analysis currently unavailable.";
pub const EMAIL_FAILURE: &str = "Welcome email generation failed.";
pub const SUMMARY_FAILURE: &str = "Summarization failed.";
pub const CHAT_SIMULATION: &str =
    "I am the AI Branding Assistant. (Simulation Mode: Configure GROQ_API_KEY to chat)";

/// Clearly labeled identity candidates for credential-less operation.
pub fn simulated_identities() -> Vec<BrandIdentity> {
    vec![
        BrandIdentity {
            name: "SimuBrand".to_string(),
            tagline: "Simulation Mode Active".to_string(),
            score: 85,
        },
        BrandIdentity {
            name: "MockForge".to_string(),
            tagline: "Please add API Keys".to_string(),
            score: 88,
        },
        BrandIdentity {
            name: "DemoCo".to_string(),
            tagline: "Real AI Coming Soon".to_string(),
            score: 90,
        },
    ]
}

/// Sentinel post used when no live social content could be generated.
pub fn fallback_social() -> Vec<SocialContent> {
    vec![SocialContent {
        platform: "Error".to_string(),
        content: "Please configure GROQ_API_KEY in .env".to_string(),
        hashtags: vec!["#ConfigNeeded".to_string()],
    }]
}

pub fn simulated_email(name: &str) -> String {
    format!("Welcome to {name}! (Simulation Mode)")
}

pub fn simulated_summary(idea: &str) -> String {
    let head: String = idea.chars().take(50).collect();
    format!("Summary (Simulation): {head}... (Add GROQ_API_KEY for real summary)")
}

/// Deterministic strategy report for credential-less and failed runs.
pub fn mock_strategy() -> StrategyAnalysis {
    StrategyAnalysis {
        industry_category: "Technology / SaaS".to_string(),
        market_offerings: vec![
            "Cloud-based solutions".to_string(),
            "Mobile applications".to_string(),
            "Analytics dashboards".to_string(),
        ],
        saturation_level: "MODERATE".to_string(),
        saturation_explanation: "Growing market with established players but room for innovation"
            .to_string(),
        differentiation_opportunities: vec![
            "Focus on underserved niche markets".to_string(),
            "Leverage emerging AI technologies".to_string(),
            "Provide superior customer experience".to_string(),
        ],
        value_positioning: vec![
            "The most user-friendly solution in the market".to_string(),
            "Affordable premium quality for small businesses".to_string(),
        ],
        target_audience: TargetAudienceData {
            demographics: "Ages 25-45, urban professionals, middle to upper income".to_string(),
            behaviors: "Tech-savvy, value efficiency, prefer digital solutions".to_string(),
            pain_points: "Time constraints, complex existing solutions, high costs".to_string(),
            why_choose: "Simplicity, affordability, and modern design".to_string(),
        },
        attraction_strategy: AttractionStrategyData {
            messaging_style: "Clear, benefit-focused, and empowering".to_string(),
            emotional_triggers: "Time savings, stress reduction, professional growth".to_string(),
            trust_building: "Customer testimonials, free trials, transparent pricing".to_string(),
            content_tone: "Professional yet approachable, educational".to_string(),
        },
        marketing_strategies: MarketingStrategiesData {
            platforms: "LinkedIn, Instagram, Product Hunt, industry forums".to_string(),
            content_strategy: "How-to guides, case studies, product demos, behind-the-scenes"
                .to_string(),
            collaborations: "Industry micro-influencers, complementary SaaS tools".to_string(),
            retention: "Loyalty programs, regular feature updates, community building".to_string(),
        },
        strategic_advice: "Focus on solving one specific problem exceptionally well before \
                           expanding. Build a strong community around your product and let \
                           customer success drive your marketing."
            .to_string(),
    }
}

// ============================================================================
// Resolver trait
// ============================================================================

/// The capability surface the orchestrator consumes.
///
/// Production code uses [`CapabilityResolver`]; tests substitute fakes
/// (see [`RecordingResolver`]) to observe the arguments each phase passes
/// downstream.
#[async_trait]
pub trait BrandResolver: Send + Sync {
    async fn resolve_identity(
        &self,
        idea: &str,
        industry: &str,
        tone_label: &str,
    ) -> Resolved<Vec<BrandIdentity>>;

    async fn resolve_social(&self, idea: &str, name: &str) -> Resolved<Vec<SocialContent>>;

    async fn resolve_email(&self, name: &str, idea: &str) -> Resolved<String>;

    async fn resolve_sentiment(&self, idea: &str) -> Resolved<String>;

    async fn resolve_summary(&self, idea: &str) -> Resolved<String>;

    async fn resolve_logo(
        &self,
        name: &str,
        industry: &str,
        tone: Tone,
        palette: &[String],
    ) -> LogoArtifact;

    async fn resolve_chat(&self, message: &str, context: &str) -> Resolved<String>;

    async fn resolve_strategy(&self, idea: &str) -> Resolved<StrategyAnalysis>;
}

// ============================================================================
// Production resolver
// ============================================================================

/// Image tiers in chain order; the placeholder terminal tier is implicit
/// and always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageProvider {
    Stability,
    Gemini,
}

/// Resolver over live providers, constructor-injected into the
/// orchestrator together with its credential configuration and image
/// chain. No ambient state.
pub struct CapabilityResolver {
    backend: Arc<dyn GenerationBackend>,
    config: ForgeConfig,
    image_chain: Vec<ImageProvider>,
    seed: Option<u64>,
}

impl CapabilityResolver {
    pub fn new(config: ForgeConfig, backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            config,
            image_chain: vec![ImageProvider::Stability, ImageProvider::Gemini],
            seed: None,
        }
    }

    /// Override the image provider chain (the placeholder tier stays
    /// terminal regardless).
    pub fn with_image_chain(mut self, chain: Vec<ImageProvider>) -> Self {
        self.image_chain = chain;
        self
    }

    /// Pin the random source used for prompt variation and placeholder
    /// synthesis. Tests use this to assert exact output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn groq_key(&self) -> Option<&str> {
        credential(&self.config.groq_api_key)
    }

    async fn groq(
        &self,
        key: &str,
        messages: Vec<ChatMessage>,
        model: Option<&str>,
        temperature: f64,
        max_tokens: Option<u32>,
        timeout: Duration,
    ) -> Result<String, brandforge_common::ProviderError> {
        self.backend
            .chat_completion(
                Some(key),
                model.unwrap_or(&self.config.groq_model),
                &messages,
                temperature,
                max_tokens,
                timeout,
            )
            .await
    }
}

#[async_trait]
impl BrandResolver for CapabilityResolver {
    async fn resolve_identity(
        &self,
        idea: &str,
        industry: &str,
        tone_label: &str,
    ) -> Resolved<Vec<BrandIdentity>> {
        let Some(key) = self.groq_key() else {
            debug!("No text credential; identity resolves in simulation mode");
            return Resolved::simulation(simulated_identities());
        };

        let prompt = prompts::identity_prompt(idea, industry, tone_label);
        let outcome = self
            .groq(key, vec![ChatMessage::user(prompt)], None, 0.7, None, TEXT_TIMEOUT)
            .await
            .and_then(|text| normalize::parse_identities(&text));

        match outcome {
            Ok(candidates) => Resolved::primary(candidates),
            Err(e) => {
                warn!("Identity generation failed, using local candidates: {}", e);
                Resolved::placeholder(simulated_identities())
            }
        }
    }

    async fn resolve_social(&self, idea: &str, name: &str) -> Resolved<Vec<SocialContent>> {
        let Some(key) = self.groq_key() else {
            debug!("No text credential; social content resolves in simulation mode");
            return Resolved::simulation(fallback_social());
        };

        let prompt = prompts::social_prompt(idea, name);
        let outcome = self
            .groq(key, vec![ChatMessage::user(prompt)], None, 0.7, None, TEXT_TIMEOUT)
            .await
            .and_then(|text| normalize::parse_social_posts(&text));

        match outcome {
            Ok(posts) => Resolved::primary(posts),
            Err(e) => {
                warn!("Social content generation failed, using sentinel post: {}", e);
                Resolved::placeholder(fallback_social())
            }
        }
    }

    async fn resolve_email(&self, name: &str, idea: &str) -> Resolved<String> {
        let Some(key) = self.groq_key() else {
            debug!("No text credential; email copy resolves in simulation mode");
            return Resolved::simulation(simulated_email(name));
        };

        let prompt = prompts::email_prompt(name, idea);
        match self
            .groq(
                key,
                vec![ChatMessage::user(prompt)],
                Some(EMAIL_MODEL),
                0.7,
                None,
                TEXT_TIMEOUT,
            )
            .await
        {
            Ok(body) => Resolved::primary(body),
            Err(e) => {
                warn!("Email generation failed: {}", e);
                Resolved::placeholder(EMAIL_FAILURE.to_string())
            }
        }
    }

    async fn resolve_sentiment(&self, idea: &str) -> Resolved<String> {
        let Some(key) = credential(&self.config.hf_api_key) else {
            debug!("No classifier credential; sentiment resolves in simulation mode");
            return Resolved::simulation(SENTIMENT_SIMULATION.to_string());
        };

        match self.backend.classify(Some(key), idea, CLASSIFY_TIMEOUT).await {
            Ok(document) => match normalize::parse_sentiment(&document) {
                Ok(line) => Resolved::primary(line),
                Err(e) => {
                    warn!("Classifier answered with an unexpected shape: {}", e);
                    Resolved::placeholder(SENTIMENT_INCONCLUSIVE.to_string())
                }
            },
            Err(e) => {
                warn!("Sentiment classification failed: {}", e);
                Resolved::placeholder(SENTIMENT_UNAVAILABLE.to_string())
            }
        }
    }

    async fn resolve_summary(&self, idea: &str) -> Resolved<String> {
        let Some(key) = self.groq_key() else {
            debug!("No text credential; summary resolves in simulation mode");
            return Resolved::simulation(simulated_summary(idea));
        };

        let prompt = prompts::summary_prompt(idea);
        match self
            .groq(key, vec![ChatMessage::user(prompt)], None, 0.5, None, TEXT_TIMEOUT)
            .await
        {
            Ok(pitch) => Resolved::primary(pitch),
            Err(e) => {
                warn!("Summarization failed: {}", e);
                Resolved::placeholder(SUMMARY_FAILURE.to_string())
            }
        }
    }

    async fn resolve_logo(
        &self,
        name: &str,
        industry: &str,
        tone: Tone,
        palette: &[String],
    ) -> LogoArtifact {
        let primary_color = palette
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_PRIMARY_COLOR.to_string());
        let mut rng = self.rng();
        let prompt = build_logo_prompt(name, industry, tone, &primary_color, &mut rng);

        for provider in &self.image_chain {
            match provider {
                ImageProvider::Stability => {
                    let Some(key) = credential(&self.config.stability_api_key) else {
                        debug!("No primary image credential; skipping tier");
                        continue;
                    };
                    let seed: u32 = rng.gen();
                    match self
                        .backend
                        .text_to_image(Some(key), &prompt, seed, IMAGE_TIMEOUT)
                        .await
                    {
                        Ok(b64) => {
                            return LogoArtifact {
                                url: format!("data:image/png;base64,{b64}"),
                                prompt,
                                service: "stability".to_string(),
                            }
                        }
                        Err(e) => warn!("Primary image provider failed: {}", e),
                    }
                }
                ImageProvider::Gemini => {
                    let Some(key) = credential(&self.config.gemini_api_key) else {
                        debug!("No secondary image credential; skipping tier");
                        continue;
                    };
                    match self
                        .backend
                        .text_to_image_secondary(Some(key), &prompt, IMAGE_TIMEOUT)
                        .await
                    {
                        Ok(url) => {
                            return LogoArtifact {
                                url,
                                prompt,
                                service: "gemini".to_string(),
                            }
                        }
                        Err(e) => debug!("Secondary image provider deferred: {}", e),
                    }
                }
            }
        }

        placeholder_logo(name, &primary_color, prompt, &mut rng)
    }

    async fn resolve_chat(&self, message: &str, context: &str) -> Resolved<String> {
        let Some(key) = self.groq_key() else {
            debug!("No text credential; chat resolves in simulation mode");
            return Resolved::simulation(CHAT_SIMULATION.to_string());
        };

        let messages = vec![
            ChatMessage::system(prompts::chat_system_prompt(context)),
            ChatMessage::user(message),
        ];
        match self.groq(key, messages, None, 0.7, None, TEXT_TIMEOUT).await {
            Ok(reply) => Resolved::primary(reply),
            Err(e) => {
                warn!("Chat reply failed: {}", e);
                Resolved::placeholder(format!("Chat Error: {e}"))
            }
        }
    }

    async fn resolve_strategy(&self, idea: &str) -> Resolved<StrategyAnalysis> {
        let Some(key) = self.groq_key() else {
            debug!("No text credential; strategy resolves in simulation mode");
            return Resolved::simulation(mock_strategy());
        };

        let prompt = prompts::strategy_prompt(idea);
        let outcome = self
            .groq(
                key,
                vec![ChatMessage::user(prompt)],
                None,
                0.7,
                Some(2000),
                STRATEGY_TIMEOUT,
            )
            .await
            .and_then(|text| normalize::parse_strategy(&text));

        match outcome {
            Ok(report) => Resolved::primary(report),
            Err(e) => {
                warn!("Strategy analysis failed, using canned report: {}", e);
                Resolved::placeholder(mock_strategy())
            }
        }
    }
}

// ============================================================================
// Recording resolver (testing)
// ============================================================================

/// One downstream call observed by [`RecordingResolver`]: the capability
/// and the brand name it was handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedCall {
    pub capability: &'static str,
    pub name: String,
}

/// Test double that answers every capability deterministically and records
/// which canonical name each downstream step received.
pub struct RecordingResolver {
    identities: Vec<BrandIdentity>,
    calls: Mutex<Vec<ObservedCall>>,
}

impl RecordingResolver {
    pub fn with_identities(identities: Vec<BrandIdentity>) -> Self {
        Self {
            identities,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn observed(&self) -> Vec<ObservedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, capability: &'static str, name: &str) {
        self.calls.lock().unwrap().push(ObservedCall {
            capability,
            name: name.to_string(),
        });
    }
}

#[async_trait]
impl BrandResolver for RecordingResolver {
    async fn resolve_identity(
        &self,
        _idea: &str,
        _industry: &str,
        _tone_label: &str,
    ) -> Resolved<Vec<BrandIdentity>> {
        Resolved::simulation(self.identities.clone())
    }

    async fn resolve_social(&self, _idea: &str, name: &str) -> Resolved<Vec<SocialContent>> {
        self.record("social", name);
        Resolved::simulation(fallback_social())
    }

    async fn resolve_email(&self, name: &str, _idea: &str) -> Resolved<String> {
        self.record("email", name);
        Resolved::simulation(simulated_email(name))
    }

    async fn resolve_sentiment(&self, _idea: &str) -> Resolved<String> {
        Resolved::simulation(SENTIMENT_SIMULATION.to_string())
    }

    async fn resolve_summary(&self, idea: &str) -> Resolved<String> {
        Resolved::simulation(simulated_summary(idea))
    }

    async fn resolve_logo(
        &self,
        name: &str,
        _industry: &str,
        _tone: Tone,
        palette: &[String],
    ) -> LogoArtifact {
        self.record("logo", name);
        let color = palette
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_PRIMARY_COLOR.to_string());
        let mut rng = StdRng::seed_from_u64(0);
        placeholder_logo(name, &color, format!("logo prompt for {name}"), &mut rng)
    }

    async fn resolve_chat(&self, _message: &str, _context: &str) -> Resolved<String> {
        Resolved::simulation(CHAT_SIMULATION.to_string())
    }

    async fn resolve_strategy(&self, _idea: &str) -> Resolved<StrategyAnalysis> {
        Resolved::simulation(mock_strategy())
    }
}
