//! Bundle configuration
//!
//! Every URL and directory name the bundler relies on lives here so the
//! pipeline can be pointed at local fixtures in tests.

use crate::helpers::build::ExecutablePolicy;
use std::path::PathBuf;

/// Name of the application repository (and the final application directory)
pub const REPO_NAME: &str = "xmlui-invoice";

/// Branch the application archive is taken from
pub const BRANCH_NAME: &str = "main";

const APP_ARCHIVE_BASE: &str = "https://codeload.github.com/jonudell";
const COMPONENT_ARCHIVE_URL: &str = "https://codeload.github.com/xmlui-com/xmlui/zip/refs/heads/main";
const TOOL_RELEASE_BASE: &str = "https://github.com/jonudell/xmlui-mcp/releases/download/v1.0.0/";
const SERVER_RELEASE_BASE: &str =
    "https://github.com/JonUdell/xmlui-test-server/releases/download/v1.0.0/";

/// URL fragment identifying the private component repository
const PRIVATE_REPO_MARKER: &str = "codeload.github.com/xmlui-com/xmlui";

/// Environment variable holding the private-repository credential
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// A subtree copied out of the component library into the `mcp` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRule {
    /// Path relative to the extracted component-library root
    pub from: PathBuf,
    /// Path relative to the `mcp` directory
    pub to: PathBuf,
}

impl CopyRule {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Everything the pipeline needs to know besides the platform and the
/// install directory.
#[derive(Debug, Clone)]
pub struct BundleConfig {
    pub repo_name: String,
    pub branch: String,
    /// Archive of the application repository (zip)
    pub app_archive_url: String,
    /// Archive of the component library repository (zip)
    pub component_archive_url: String,
    /// Release directory the platform tool archives are published under
    pub tool_release_base: String,
    /// Release directory the platform server archives are published under
    pub server_release_base: String,
    /// Downloads whose URL contains this marker carry the credential
    pub private_repo_marker: String,
    pub token_env_var: String,
    /// Prefix of the single top-level directory in the component archive
    pub component_root_prefix: String,
    pub component_staging_dir: String,
    pub tool_staging_dir: String,
    pub mcp_dir: String,
    pub component_copies: Vec<CopyRule>,
    /// Startup script shipped in the server archive
    pub start_script: String,
    pub executables: ExecutablePolicy,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            repo_name: REPO_NAME.to_string(),
            branch: BRANCH_NAME.to_string(),
            app_archive_url: format!(
                "{}/{}/zip/refs/heads/{}",
                APP_ARCHIVE_BASE, REPO_NAME, BRANCH_NAME
            ),
            component_archive_url: COMPONENT_ARCHIVE_URL.to_string(),
            tool_release_base: TOOL_RELEASE_BASE.to_string(),
            server_release_base: SERVER_RELEASE_BASE.to_string(),
            private_repo_marker: PRIVATE_REPO_MARKER.to_string(),
            token_env_var: TOKEN_ENV_VAR.to_string(),
            component_root_prefix: "xmlui-".to_string(),
            component_staging_dir: "xmlui-source".to_string(),
            tool_staging_dir: "mcpTmp".to_string(),
            mcp_dir: "mcp".to_string(),
            component_copies: vec![
                CopyRule::new("docs/pages/components", "docs/pages/components"),
                CopyRule::new("xmlui/src/components", "src/components"),
            ],
            start_script: "start.sh".to_string(),
            executables: ExecutablePolicy::default(),
        }
    }
}
