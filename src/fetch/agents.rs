//! Randomized client-identity pool.
//!
//! One realistic browser User-Agent is sampled independently per request;
//! no session affinity. Injected into the fetcher so tests can pin it to a
//! single fixed value.

use rand::seq::SliceRandom;

const FALLBACK_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:133.0) Gecko/20100101 Firefox/133.0";

/// Pool of User-Agent strings to sample from.
#[derive(Debug, Clone)]
pub struct UserAgentPool {
    agents: Vec<String>,
}

impl Default for UserAgentPool {
    /// Current-generation desktop browsers across the three major platforms.
    fn default() -> Self {
        Self::new(
            [
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) \
                 Gecko/20100101 Firefox/133.0",
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) \
                 Gecko/20100101 Firefox/133.0",
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 \
                 (KHTML, like Gecko) Version/18.1 Safari/605.1.15",
                FALLBACK_AGENT,
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        )
    }
}

impl UserAgentPool {
    /// Build a pool from explicit agent strings.
    pub fn new(agents: Vec<String>) -> Self {
        Self { agents }
    }

    /// Single-entry pool, handy for deterministic tests.
    pub fn fixed(agent: impl Into<String>) -> Self {
        Self::new(vec![agent.into()])
    }

    /// Sample one agent uniformly at random.
    pub fn sample(&self) -> &str {
        self.agents
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or(FALLBACK_AGENT)
    }
}
