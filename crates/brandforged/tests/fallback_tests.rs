//! Fallback chain tests
//!
//! Every capability resolver is exercised against a scripted backend: no
//! network, no credentials, fully deterministic. The property under test
//! throughout is totality — whatever the providers do, the resolver returns
//! a schema-complete value with an honest provenance tag.

use brandforge_common::{ForgeConfig, ProviderError, Tone};
use brandforged::resolver::{
    mock_strategy, CHAT_SIMULATION, EMAIL_FAILURE, SENTIMENT_INCONCLUSIVE, SENTIMENT_SIMULATION,
    SENTIMENT_UNAVAILABLE, SUMMARY_FAILURE,
};
use brandforged::{BackendCall, BrandResolver, CapabilityResolver, FakeBackend, Tier};
use serde_json::json;
use std::sync::Arc;

const IDENTITY_JSON: &str = r#"[
    {"name": "EcoVibe", "tagline": "Sustainably Yours.", "score": 95},
    {"name": "GreenSip", "tagline": "Drink Different.", "score": 88},
    {"name": "PureFlow", "tagline": "Clarity in Every Drop.", "score": 82}
]"#;

fn offline() -> ForgeConfig {
    ForgeConfig::default()
}

fn all_keys() -> ForgeConfig {
    ForgeConfig {
        groq_api_key: Some("gsk_test".to_string()),
        stability_api_key: Some("sk_test".to_string()),
        hf_api_key: Some("hf_test".to_string()),
        gemini_api_key: Some("gm_test".to_string()),
        ..ForgeConfig::default()
    }
}

fn resolver(config: ForgeConfig, backend: FakeBackend) -> (CapabilityResolver, Arc<FakeBackend>) {
    let backend = Arc::new(backend);
    (
        CapabilityResolver::new(config, backend.clone()),
        backend,
    )
}

// ============================================================================
// Simulation tier (no credentials)
// ============================================================================

/// Without a text credential the identity chain answers up-front, without
/// touching the backend.
#[tokio::test]
async fn test_identity_without_credential_simulates() {
    let (resolver, backend) = resolver(offline(), FakeBackend::rejecting());

    let resolved = resolver.resolve_identity("bottles", "retail", "Playful").await;

    assert_eq!(resolved.tier, Tier::Simulation);
    assert_eq!(resolved.value[0].name, "SimuBrand");
    assert!(backend.calls().is_empty());
}

/// Every credential-gated text capability degrades to its labeled
/// simulation without network activity.
#[tokio::test]
async fn test_text_capabilities_without_credentials_simulate() {
    let (resolver, backend) = resolver(offline(), FakeBackend::rejecting());

    let social = resolver.resolve_social("bottles", "EcoVibe").await;
    let email = resolver.resolve_email("EcoVibe", "bottles").await;
    let sentiment = resolver.resolve_sentiment("bottles").await;
    let summary = resolver.resolve_summary("bottles").await;
    let chat = resolver.resolve_chat("help", "").await;
    let strategy = resolver.resolve_strategy("bottles").await;

    assert_eq!(social.tier, Tier::Simulation);
    assert_eq!(social.value[0].platform, "Error");
    assert_eq!(email.value, "Welcome to EcoVibe! (Simulation Mode)");
    assert_eq!(sentiment.value, SENTIMENT_SIMULATION);
    assert!(summary.value.starts_with("Summary (Simulation): bottles"));
    assert_eq!(chat.value, CHAT_SIMULATION);
    assert_eq!(strategy.value, mock_strategy());
    assert!(backend.calls().is_empty());
}

/// The logo chain skips both image tiers when neither has a credential and
/// lands on the local placeholder.
#[tokio::test]
async fn test_logo_without_credentials_is_placeholder() {
    let (resolver, backend) = resolver(offline(), FakeBackend::rejecting());
    let palette = vec!["#ff6b6b".to_string()];

    let logo = resolver.resolve_logo("EcoVibe", "retail", Tone::Playful, &palette).await;

    assert_eq!(logo.service, "placeholder");
    assert!(logo.url.starts_with("https://placehold.co/"));
    assert!(!logo.prompt.is_empty());
    assert!(backend.calls().is_empty());
}

// ============================================================================
// Primary tier (live parse)
// ============================================================================

/// A fenced identity payload from the provider parses into primary-tier
/// candidates.
#[tokio::test]
async fn test_identity_live_success() {
    let fenced = format!("```json\n{IDENTITY_JSON}\n```");
    let (resolver, _) = resolver(all_keys(), FakeBackend::rejecting().with_chat_response(&fenced));

    let resolved = resolver.resolve_identity("bottles", "retail", "Playful").await;

    assert_eq!(resolved.tier, Tier::Primary);
    assert_eq!(resolved.value.len(), 3);
    assert_eq!(resolved.value[0].name, "EcoVibe");
}

/// Live social posts parse and platform labels are canonicalized.
#[tokio::test]
async fn test_social_live_success_canonicalizes_platforms() {
    let payload = r##"[
        {"platform": "linkedin", "content": "We launched!", "hashtags": ["#launch"]},
        {"platform": "TWITTER", "content": "Hello world", "hashtags": []}
    ]"##;
    let (resolver, _) = resolver(all_keys(), FakeBackend::rejecting().with_chat_response(payload));

    let resolved = resolver.resolve_social("bottles", "EcoVibe").await;

    assert_eq!(resolved.tier, Tier::Primary);
    assert_eq!(resolved.value[0].platform, "LinkedIn");
    assert_eq!(resolved.value[1].platform, "Twitter");
}

/// The welcome email goes out to its dedicated larger model.
#[tokio::test]
async fn test_email_uses_dedicated_model() {
    let (resolver, backend) = resolver(
        all_keys(),
        FakeBackend::rejecting().with_chat_response("Welcome aboard!"),
    );

    let resolved = resolver.resolve_email("EcoVibe", "bottles").await;

    assert_eq!(resolved.tier, Tier::Primary);
    assert_eq!(resolved.value, "Welcome aboard!");
    match &backend.calls()[0] {
        BackendCall::Chat { model, prompt } => {
            assert_eq!(model, "llama-3.3-70b-versatile");
            assert!(prompt.contains("EcoVibe"));
        }
        other => panic!("expected chat call, got {other:?}"),
    }
}

/// A well-shaped classifier document becomes the formatted sentiment line.
#[tokio::test]
async fn test_sentiment_live_success() {
    let document = json!([[{"label": "POSITIVE", "score": 0.9987}]]);
    let (resolver, _) = resolver(
        all_keys(),
        FakeBackend::rejecting().with_classify(Ok(document)),
    );

    let resolved = resolver.resolve_sentiment("great bottles").await;

    assert_eq!(resolved.tier, Tier::Primary);
    assert_eq!(resolved.value, "Detected Sentiment: POSITIVE (99.9%)");
}

/// A live image answer is wrapped as an inline data URL with stability
/// provenance.
#[tokio::test]
async fn test_logo_primary_tier_success() {
    let (resolver, backend) = resolver(
        all_keys(),
        FakeBackend::rejecting().with_image(Ok("aWNvbg==".to_string())),
    );
    let palette = vec!["#0f172a".to_string()];

    let logo = resolver.resolve_logo("EcoVibe", "finance", Tone::Professional, &palette).await;

    assert_eq!(logo.service, "stability");
    assert_eq!(logo.url, "data:image/png;base64,aWNvbg==");
    assert!(matches!(backend.calls()[0], BackendCall::Image { .. }));
}

/// A valid strategy report resolves at the primary tier.
#[tokio::test]
async fn test_strategy_live_success() {
    let payload = serde_json::to_string(&mock_strategy()).unwrap();
    let (resolver, _) = resolver(all_keys(), FakeBackend::rejecting().with_chat_response(&payload));

    let resolved = resolver.resolve_strategy("bottles").await;

    assert_eq!(resolved.tier, Tier::Primary);
    assert_eq!(resolved.value.saturation_level, "MODERATE");
}

// ============================================================================
// Placeholder tier (provider failure)
// ============================================================================

/// Garbage provider text degrades identity to the local candidates.
#[tokio::test]
async fn test_identity_unparseable_output_degrades() {
    let (resolver, _) = resolver(
        all_keys(),
        FakeBackend::rejecting().with_chat_response("I have no names for you today."),
    );

    let resolved = resolver.resolve_identity("bottles", "retail", "Playful").await;

    assert_eq!(resolved.tier, Tier::Placeholder);
    assert_eq!(resolved.value[0].name, "SimuBrand");
}

/// Schema-violating identity output (score out of range) also degrades —
/// never a partially-populated record.
#[tokio::test]
async fn test_identity_contract_violation_degrades() {
    let payload = r#"[{"name": "X", "tagline": "Y", "score": 400}]"#;
    let (resolver, _) = resolver(all_keys(), FakeBackend::rejecting().with_chat_response(payload));

    let resolved = resolver.resolve_identity("bottles", "retail", "Playful").await;

    assert_eq!(resolved.tier, Tier::Placeholder);
}

/// Classifier shape violations and transport failures map to distinct
/// placeholder lines.
#[tokio::test]
async fn test_sentiment_failure_modes() {
    let flat = json!({"label": "POSITIVE", "score": 0.9});
    let (shape_resolver, _) = resolver(
        all_keys(),
        FakeBackend::rejecting().with_classify(Ok(flat)),
    );
    let resolved = shape_resolver.resolve_sentiment("bottles").await;
    assert_eq!(resolved.tier, Tier::Placeholder);
    assert_eq!(resolved.value, SENTIMENT_INCONCLUSIVE);

    let (reject_resolver, _) = resolver(all_keys(), FakeBackend::rejecting());
    let resolved = reject_resolver.resolve_sentiment("bottles").await;
    assert_eq!(resolved.tier, Tier::Placeholder);
    assert_eq!(resolved.value, SENTIMENT_UNAVAILABLE);
}

/// Full logo chain walk: primary rejects, secondary defers, placeholder
/// answers. Both live tiers must have been attempted.
#[tokio::test]
async fn test_logo_chain_walks_to_placeholder() {
    let (resolver, backend) = resolver(
        all_keys(),
        FakeBackend::rejecting()
            .with_image(Err(ProviderError::rejected(500, "overloaded")))
            .with_image_secondary(Err(ProviderError::Empty)),
    );
    let palette = vec!["#6366f1".to_string()];

    let logo = resolver.resolve_logo("EcoVibe", "technology", Tone::Innovative, &palette).await;

    assert_eq!(logo.service, "placeholder");
    assert!(!logo.url.is_empty());
    let calls = backend.calls();
    assert!(matches!(calls[0], BackendCall::Image { .. }));
    assert!(matches!(calls[1], BackendCall::ImageSecondary { .. }));
}

/// With every fallible tier failing, each chain still satisfies its full
/// target schema.
#[tokio::test]
async fn test_all_chains_total_under_rejection() {
    let (resolver, _) = resolver(all_keys(), FakeBackend::rejecting());
    let palette = vec!["#000000".to_string()];

    let identity = resolver.resolve_identity("bottles", "retail", "Playful").await;
    let social = resolver.resolve_social("bottles", "EcoVibe").await;
    let email = resolver.resolve_email("EcoVibe", "bottles").await;
    let summary = resolver.resolve_summary("bottles").await;
    let chat = resolver.resolve_chat("help", "ctx").await;
    let strategy = resolver.resolve_strategy("bottles").await;
    let logo = resolver.resolve_logo("EcoVibe", "retail", Tone::Playful, &palette).await;

    assert!(!identity.value.is_empty());
    assert!(identity.value.iter().all(|c| !c.name.is_empty() && !c.tagline.is_empty()));
    assert!(!social.value.is_empty());
    assert_eq!(email.value, EMAIL_FAILURE);
    assert_eq!(summary.value, SUMMARY_FAILURE);
    assert!(chat.value.starts_with("Chat Error:"));
    assert!(!strategy.value.market_offerings.is_empty());
    assert!(!logo.url.is_empty());
    assert!(!logo.prompt.is_empty());

    for tier in [identity.tier, social.tier, email.tier, summary.tier, chat.tier, strategy.tier] {
        assert_eq!(tier, Tier::Placeholder);
    }
}

/// The image chain is injected configuration: a substitute chain without
/// the primary tier must never touch it.
#[tokio::test]
async fn test_substitute_image_chain_skips_primary() {
    let backend = Arc::new(FakeBackend::rejecting().with_image(Ok("aWNvbg==".to_string())));
    let resolver = CapabilityResolver::new(all_keys(), backend.clone())
        .with_image_chain(vec![brandforged::ImageProvider::Gemini]);

    let logo = resolver
        .resolve_logo("EcoVibe", "retail", Tone::Playful, &["#ff6b6b".to_string()])
        .await;

    // Secondary defers, so the chain lands on the placeholder; the primary
    // tier was configured out and must not have been called.
    assert_eq!(logo.service, "placeholder");
    assert!(backend
        .calls()
        .iter()
        .all(|c| !matches!(c, BackendCall::Image { .. })));
}

/// Chain decisions are per-call: a provider that recovers between calls
/// serves the primary tier again.
#[tokio::test]
async fn test_tier_choice_is_per_call() {
    let (resolver, _) = resolver(
        all_keys(),
        FakeBackend::rejecting().with_chat_sequence(vec![
            Ok(IDENTITY_JSON.to_string()),
            Err(ProviderError::rejected(503, "overloaded")),
            Ok(IDENTITY_JSON.to_string()),
        ]),
    );

    let first = resolver.resolve_identity("bottles", "retail", "Playful").await;
    let second = resolver.resolve_identity("bottles", "retail", "Playful").await;
    let third = resolver.resolve_identity("bottles", "retail", "Playful").await;

    assert_eq!(first.tier, Tier::Primary);
    assert_eq!(second.tier, Tier::Placeholder);
    assert_eq!(third.tier, Tier::Primary);
}

// ============================================================================
// Seeded determinism
// ============================================================================

/// Pinning the resolver seed makes placeholder logos reproducible.
#[tokio::test]
async fn test_seeded_logo_is_reproducible() {
    let palette = vec!["#ff6b6b".to_string()];
    let build = || async {
        let backend = Arc::new(FakeBackend::rejecting());
        CapabilityResolver::new(offline(), backend)
            .with_seed(7)
            .resolve_logo("EcoVibe", "retail", Tone::Playful, &palette)
            .await
    };

    let first = build().await;
    let second = build().await;
    assert_eq!(first, second);
}

/// Different seeds may vary the layout but never the invariants.
#[tokio::test]
async fn test_unseeded_logo_still_total() {
    let backend = Arc::new(FakeBackend::rejecting());
    let resolver = CapabilityResolver::new(offline(), backend);

    let logo = resolver.resolve_logo("EcoVibe", "retail", Tone::Playful, &[]).await;

    assert_eq!(logo.service, "placeholder");
    assert!(!logo.url.is_empty());
    assert!(!logo.prompt.is_empty());
}
