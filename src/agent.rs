/// Resolve the agent identity from the environment.
///
/// Checks `WARDEN_AGENT` env var. Returns `None` if unset,
/// letting callers decide whether to fall back or require an explicit id.
pub fn resolve_agent() -> Option<String> {
    std::env::var("WARDEN_AGENT").ok().filter(|s| !s.is_empty())
}

/// Auto-generated fallback for contexts that require an agent id.
pub fn generated_fallback() -> String {
    let token = uuid::Uuid::new_v4().simple().to_string();
    format!("agent-{}", &token[..8])
}
