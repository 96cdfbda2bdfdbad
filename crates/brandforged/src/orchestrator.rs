//! Brand kit orchestration
//!
//! The fixed dependency graph, phase by phase:
//!
//! 1. Identity (blocking) — candidate 0's name becomes canonical.
//! 2. Palette (pure lookup, keyed by tone).
//! 3. Fan-out (join semantics) — social, logo, sentiment, summary, email.
//!    The logo consumes the palette's primary color; sentiment and summary
//!    only need the raw idea; social and email need the canonical name.
//! 4. Assembly — one complete kit, built atomically.
//!
//! Every branch is total via the fallback resolver, and the whole pipeline
//! runs under one end-to-end deadline: a branch that outlives the budget is
//! short-circuited straight to its terminal deterministic tier, so the join
//! always completes and the caller always gets a full kit.

use crate::logo::{build_logo_prompt, placeholder_logo, DEFAULT_PRIMARY_COLOR};
use crate::resolver::{
    fallback_social, simulated_identities, BrandResolver, Resolved, EMAIL_FAILURE,
    SENTIMENT_UNAVAILABLE, SUMMARY_FAILURE,
};
use brandforge_common::{
    palette_for, BrandKit, BrandRequest, LogoArtifact, RegenerateLogoRequest, StrategyAnalysis,
    Tone,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{info, warn};

pub struct Orchestrator {
    resolver: Arc<dyn BrandResolver>,
    deadline: Duration,
}

impl Orchestrator {
    pub fn new(resolver: Arc<dyn BrandResolver>, deadline: Duration) -> Self {
        Self { resolver, deadline }
    }

    fn remaining(&self, start: Instant) -> Duration {
        self.deadline.saturating_sub(start.elapsed())
    }

    /// Run one branch under the remaining end-to-end budget; on expiry,
    /// substitute the branch's terminal tier instead of failing the kit.
    async fn bounded<T, F>(
        &self,
        start: Instant,
        label: &str,
        fut: F,
        terminal: impl FnOnce() -> T,
    ) -> T
    where
        F: Future<Output = T>,
    {
        match timeout(self.remaining(start), fut).await {
            Ok(value) => value,
            Err(_) => {
                warn!("Deadline elapsed; {} short-circuits to its terminal tier", label);
                terminal()
            }
        }
    }

    /// Build a complete brand kit. Total: provider failures degrade tier by
    /// tier inside the resolver and never surface here.
    pub async fn build_brand_kit(&self, request: &BrandRequest) -> BrandKit {
        let start = Instant::now();
        let idea = request.business_idea.as_str();
        let industry = request.industry.as_str();
        let tone = Tone::parse(&request.tone);

        info!("Building brand kit: industry '{}', tone {}", industry, tone.as_str());

        // Phase 1: identity. Everything downstream keys off candidate 0.
        let identity = self
            .bounded(
                start,
                "identity",
                self.resolver.resolve_identity(idea, industry, &request.tone),
                || Resolved::placeholder(simulated_identities()),
            )
            .await;
        let name = identity.value[0].name.clone();
        info!("Canonical name '{}' ({})", name, identity.tier.as_str());

        // Phase 2: palette. Pure lookup; the first color feeds the logo.
        let palette = palette_for(tone);

        // Phase 3: fan-out. Five independent branches, joined before
        // assembly; a slow branch cannot starve the others.
        let (social, logo, sentiment, summary, email) = tokio::join!(
            self.bounded(
                start,
                "social content",
                self.resolver.resolve_social(idea, &name),
                || Resolved::placeholder(fallback_social()),
            ),
            self.bounded(
                start,
                "logo",
                self.resolver.resolve_logo(&name, industry, tone, &palette),
                || terminal_logo(&name, industry, tone, &palette),
            ),
            self.bounded(
                start,
                "sentiment",
                self.resolver.resolve_sentiment(idea),
                || Resolved::placeholder(SENTIMENT_UNAVAILABLE.to_string()),
            ),
            self.bounded(
                start,
                "summary",
                self.resolver.resolve_summary(idea),
                || Resolved::placeholder(SUMMARY_FAILURE.to_string()),
            ),
            self.bounded(
                start,
                "email copy",
                self.resolver.resolve_email(&name, idea),
                || Resolved::placeholder(EMAIL_FAILURE.to_string()),
            ),
        );

        info!(
            "Fan-out resolved in {:?}: social {}, logo {}, sentiment {}, summary {}, email {}",
            start.elapsed(),
            social.tier.as_str(),
            logo.service,
            sentiment.tier.as_str(),
            summary.tier.as_str(),
            email.tier.as_str(),
        );

        // Phase 4: assembly. Constructed once, after every branch resolved.
        BrandKit {
            identity: identity.value,
            description: format!("A revolutionary {industry} startup focusing on {idea}."),
            social_media: social.value,
            email_copy: email.value,
            logo,
            sentiment_analysis: sentiment.value,
            color_palette: palette,
            brand_summary: summary.value,
        }
    }

    /// Regenerate only the logo, reusing the image fallback chain.
    pub async fn regenerate_logo(&self, request: &RegenerateLogoRequest) -> LogoArtifact {
        let tone = Tone::parse(&request.tone);
        self.resolver
            .resolve_logo(&request.name, &request.industry, tone, &request.color_palette)
            .await
    }

    pub async fn chat(&self, message: &str, context: &str) -> String {
        self.resolver.resolve_chat(message, context).await.value
    }

    pub async fn analyze_strategy(&self, idea: &str) -> StrategyAnalysis {
        self.resolver.resolve_strategy(idea).await.value
    }
}

/// Terminal logo tier for a branch cut off by the deadline: same local
/// synthesis the resolver chain ends in, with a fresh random source.
fn terminal_logo(name: &str, industry: &str, tone: Tone, palette: &[String]) -> LogoArtifact {
    let color = palette
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_PRIMARY_COLOR.to_string());
    let mut rng = StdRng::from_entropy();
    let prompt = build_logo_prompt(name, industry, tone, &color, &mut rng);
    placeholder_logo(name, &color, prompt, &mut rng)
}
