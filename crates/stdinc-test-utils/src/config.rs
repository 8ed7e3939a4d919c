//! Configuration builders for tests.
//!
//! Use [`TestConfigBuilder`] to create customised [`AppConfig`] values without
//! repeating boilerplate across crate boundaries.

use stdinc_config::AppConfig;

/// Fluent builder for [`AppConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .namespace_prefix("TMCompiler")
///     .without_defaults()
///     .header("vector", &["std::vector"])
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: AppConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn namespace_prefix(mut self, prefix: &str) -> Self {
        self.config.project.namespace_prefix = Some(prefix.to_string());
        self
    }

    /// Drop the built-in header table.
    pub fn without_defaults(mut self) -> Self {
        self.config.headers.use_defaults = false;
        self
    }

    /// Add (or extend) a header entry.
    pub fn header(mut self, header: &str, symbols: &[&str]) -> Self {
        self.config
            .headers
            .provides
            .entry(header.to_string())
            .or_default()
            .extend(symbols.iter().map(|s| s.to_string()));
        self
    }

    pub fn output_format(mut self, format: &str) -> Self {
        self.config.output.format = format.to_string();
        self
    }

    pub fn show_clean(mut self, show: bool) -> Self {
        self.config.output.show_clean = show;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
