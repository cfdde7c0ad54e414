// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Directory Harness
// Description: Client construction for live system-tests.
// Purpose: Build audited clients aimed at the configured directory.
// Dependencies: system-tests, user-directory-client
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use system_tests::config::SystemTestConfig;
use user_directory_client::DirectoryClient;
use user_directory_client::DirectoryClientConfig;
use user_directory_client::DirectoryFileAuditSink;

use super::artifacts::TestReporter;

/// Request timeout used when no override is configured.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Live test context: configuration, reporter, and an audited client.
pub struct DirectoryHarness {
    /// Loaded system-test configuration.
    pub config: SystemTestConfig,
    /// Artifact reporter for the running test.
    pub reporter: TestReporter,
    /// Client aimed at the configured base URL.
    pub client: DirectoryClient,
}

impl DirectoryHarness {
    /// Loads configuration and builds a client whose audit log lands in the run root.
    pub fn new(test_name: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = SystemTestConfig::load()?;
        let reporter = TestReporter::new(&config, test_name)?;
        let sink = DirectoryFileAuditSink::new(&reporter.artifacts().audit_log())?;
        let client_config = DirectoryClientConfig {
            timeout_ms: Some(config.timeout_ms_or(DEFAULT_TIMEOUT)),
            ..DirectoryClientConfig::for_base_url(config.base_url.clone())
        };
        let client = DirectoryClient::new(&client_config)?.with_audit_sink(Arc::new(sink));
        Ok(Self {
            config,
            reporter,
            client,
        })
    }

    /// Marks the test as passed.
    pub fn pass(mut self, notes: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
        self.reporter.finish("pass", notes)?;
        Ok(())
    }
}
