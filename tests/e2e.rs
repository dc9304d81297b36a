//! End-to-end tests for the bundle pipeline.
//!
//! Every download is served from memory (or a local mock server), so these
//! tests exercise extraction and layout assembly against real filesystems
//! without touching the network.

mod common;

use common::*;
use std::path::Path;
use tempfile::TempDir;
use xmlui_bundler::{
    AssetKind, BundleConfig, Bundler, Error, HttpFetcher, Platform, Step, resolve_asset,
};

const TOOL_BASE: &str = "mem://releases/xmlui-mcp/v1.0.0/";
const SERVER_BASE: &str = "mem://releases/xmlui-test-server/v1.0.0/";

fn test_config() -> BundleConfig {
    BundleConfig {
        app_archive_url: "mem://codeload/jonudell/xmlui-invoice/zip/refs/heads/main".to_string(),
        component_archive_url: "mem://codeload/xmlui-com/xmlui/zip/refs/heads/main".to_string(),
        tool_release_base: TOOL_BASE.to_string(),
        server_release_base: SERVER_BASE.to_string(),
        private_repo_marker: "mem://codeload/xmlui-com/xmlui".to_string(),
        ..BundleConfig::default()
    }
}

fn asset_url(kind: AssetKind, platform: Platform, config: &BundleConfig) -> String {
    let base = match kind {
        AssetKind::Tool => &config.tool_release_base,
        AssetKind::Server => &config.server_release_base,
    };
    resolve_asset(kind, platform, base).url
}

/// A fetcher serving all four archives for `platform`, each in the format its URL implies.
fn full_fetcher(platform: Platform, config: &BundleConfig, tool_files: &[(&str, &str)]) -> MemoryFetcher {
    let tool = resolve_asset(AssetKind::Tool, platform, &config.tool_release_base);
    let server = resolve_asset(AssetKind::Server, platform, &config.server_release_base);

    let tool_body = match tool.format {
        xmlui_bundler::ArchiveFormat::Zip => zip_archive(tool_files),
        xmlui_bundler::ArchiveFormat::TarGz => tar_gz_archive(tool_files),
    };
    let server_body = match server.format {
        xmlui_bundler::ArchiveFormat::Zip => zip_archive(SERVER_FILES),
        xmlui_bundler::ArchiveFormat::TarGz => tar_gz_archive(SERVER_FILES),
    };

    MemoryFetcher::new()
        .serve(config.app_archive_url.clone(), app_archive())
        .serve(config.component_archive_url.clone(), component_archive())
        .serve(tool.url, tool_body)
        .serve(server.url, server_body)
}

fn install_dir(temp: &TempDir) -> std::path::PathBuf {
    temp.path().join("bundle")
}

#[test]
fn test_linux_bundle_layout() {
    let temp = TempDir::new().unwrap();
    let platform = Platform::parse("linux", "x86_64");
    let config = test_config();
    let fetcher = full_fetcher(platform, &config, UNIX_TOOL_FILES);

    let summary = Bundler::new(config, fetcher, platform, install_dir(&temp))
        .with_bundler_name("xmlui-bundler")
        .run()
        .unwrap();

    let root = install_dir(&temp);
    assert_eq!(
        file_tree(&root),
        vec![
            "cleanup.sh",
            "mcp/docs/pages/components/Button.md",
            "mcp/docs/pages/components/Table.md",
            "mcp/prepare-binaries.sh",
            "mcp/run-mcp-client.sh",
            "mcp/src/components/Button/Button.tsx",
            "mcp/src/components/Table/Table.tsx",
            "mcp/xmlui-mcp",
            "mcp/xmlui-mcp-client",
            "xmlui-invoice/index.html",
            "xmlui-invoice/start.sh",
            "xmlui-invoice/xmlui-test-server",
            "xmlui-invoice/xmlui/Main.xmlui",
        ]
    );

    assert_eq!(summary.app_dir, root.join("xmlui-invoice"));
    assert_eq!(summary.mcp_dir, root.join("mcp"));
    assert_eq!(summary.components_copied, 4);
    assert!(summary.tools.skipped.is_empty());
    assert_eq!(summary.cleanup_script, Some(root.join("cleanup.sh")));

    // Staging directories are gone.
    assert!(!root.join("xmlui-source").exists());
    assert!(!root.join("mcpTmp").exists());

    // Content survives byte for byte.
    assert_eq!(
        std::fs::read_to_string(root.join("mcp/src/components/Button/Button.tsx")).unwrap(),
        "export const Button = 1;"
    );
    assert_eq!(
        std::fs::read_to_string(root.join("xmlui-invoice/start.sh")).unwrap(),
        "#!/bin/sh\n./xmlui-test-server\n"
    );

    #[cfg(unix)]
    {
        for exe in [
            "xmlui-invoice/start.sh",
            "xmlui-invoice/xmlui-test-server",
            "mcp/xmlui-mcp",
            "mcp/xmlui-mcp-client",
            "mcp/prepare-binaries.sh",
            "mcp/run-mcp-client.sh",
            "cleanup.sh",
        ] {
            assert!(is_executable(&root.join(exe)), "{exe} should be executable");
        }
        assert!(!is_executable(&root.join("xmlui-invoice/index.html")));
    }
}

#[test]
fn test_mac_bundle_uses_tar_gz_assets() {
    let temp = TempDir::new().unwrap();
    let platform = Platform::parse("macos", "aarch64");
    let config = test_config();
    let fetcher = full_fetcher(platform, &config, UNIX_TOOL_FILES);

    Bundler::new(config.clone(), fetcher, platform, install_dir(&temp))
        .run()
        .unwrap();

    let root = install_dir(&temp);
    assert!(root.join("mcp/xmlui-mcp").is_file());
    assert!(root.join("xmlui-invoice/xmlui-test-server").is_file());
    assert!(asset_url(AssetKind::Tool, platform, &config).ends_with("xmlui-mcp-mac-arm.tar.gz"));
}

#[test]
fn test_windows_bundle_layout() {
    let temp = TempDir::new().unwrap();
    let platform = Platform::parse("windows", "x86_64");
    let config = test_config();
    let fetcher = full_fetcher(platform, &config, WINDOWS_TOOL_FILES);

    let summary = Bundler::new(config, fetcher, platform, install_dir(&temp))
        .with_bundler_name("xmlui-bundler.exe")
        .run()
        .unwrap();

    let root = install_dir(&temp);
    let tree = file_tree(&root);
    assert!(tree.contains(&"cleanup.bat".to_string()));
    assert!(!tree.contains(&"cleanup.sh".to_string()));
    assert!(tree.contains(&"mcp/xmlui-mcp.exe".to_string()));
    assert!(tree.contains(&"mcp/run-mcp-client.bat".to_string()));
    assert!(summary.tools.skipped.is_empty());

    let script = std::fs::read_to_string(root.join("cleanup.bat")).unwrap();
    assert!(script.contains("del \"xmlui-bundler.exe\""));
}

#[test]
fn test_missing_tool_file_is_skipped_not_fatal() {
    let temp = TempDir::new().unwrap();
    let platform = Platform::parse("linux", "x86_64");
    let config = test_config();
    let partial: Vec<(&str, &str)> = UNIX_TOOL_FILES
        .iter()
        .copied()
        .filter(|(name, _)| *name != "prepare-binaries.sh")
        .collect();
    let fetcher = full_fetcher(platform, &config, &partial);

    let summary = Bundler::new(config, fetcher, platform, install_dir(&temp))
        .run()
        .unwrap();

    assert_eq!(summary.tools.skipped, vec!["prepare-binaries.sh".to_string()]);
    assert_eq!(summary.tools.moved.len(), 3);
    let root = install_dir(&temp);
    assert!(!root.join("mcp/prepare-binaries.sh").exists());
    assert!(root.join("xmlui-invoice/start.sh").is_file());
    assert!(root.join("cleanup.sh").is_file());
}

#[test]
fn test_stray_root_dirs_move_under_mcp() {
    let temp = TempDir::new().unwrap();
    let root = install_dir(&temp);
    std::fs::create_dir_all(root.join("docs")).unwrap();
    std::fs::write(root.join("docs/notes.md"), "stray docs").unwrap();
    std::fs::create_dir_all(root.join("src")).unwrap();
    std::fs::write(root.join("src/extra.ts"), "stray src").unwrap();

    let platform = Platform::parse("linux", "x86_64");
    let config = test_config();
    let fetcher = full_fetcher(platform, &config, UNIX_TOOL_FILES);
    Bundler::new(config, fetcher, platform, root.clone())
        .run()
        .unwrap();

    assert!(!root.join("docs").exists());
    assert!(!root.join("src").exists());
    assert_eq!(
        std::fs::read_to_string(root.join("mcp/docs/notes.md")).unwrap(),
        "stray docs"
    );
    assert_eq!(
        std::fs::read_to_string(root.join("mcp/src/extra.ts")).unwrap(),
        "stray src"
    );
    assert!(root.join("mcp/docs/pages/components/Button.md").is_file());
}

#[test]
fn test_failure_halts_later_steps() {
    let temp = TempDir::new().unwrap();
    let platform = Platform::parse("linux", "x86_64");
    let config = test_config();
    // Only the application archive is available.
    let fetcher = MemoryFetcher::new().serve(config.app_archive_url.clone(), app_archive());

    let bundler = Bundler::new(config, fetcher, platform, install_dir(&temp));
    let err = bundler.run().unwrap_err();

    assert_eq!(err.step, Step::Components);
    assert!(matches!(err.source, Error::RequestFailed { status: 404, .. }));
    assert!(err.to_string().contains("step 2/5"));

    // Step 1 output is left in place; nothing after step 2 ran.
    let root = bundler.install_dir();
    assert_eq!(root, install_dir(&temp));
    assert!(root.join("xmlui-invoice/index.html").is_file());
    assert!(!root.join("cleanup.sh").exists());
    assert!(!root.join("mcp/xmlui-mcp").exists());
}

#[test]
fn test_app_archive_without_repo_dir_is_layout_error() {
    let temp = TempDir::new().unwrap();
    let platform = Platform::parse("linux", "x86_64");
    let config = test_config();
    let fetcher = MemoryFetcher::new().serve(
        config.app_archive_url.clone(),
        zip_archive(&[("some-other-repo-main/index.html", "x")]),
    );

    let err = Bundler::new(config, fetcher, platform, install_dir(&temp))
        .run()
        .unwrap_err();

    assert_eq!(err.step, Step::App);
    assert!(matches!(err.source, Error::Layout(_)), "got {:?}", err.source);
}

#[test]
fn test_corrupt_tool_archive_is_archive_error() {
    let temp = TempDir::new().unwrap();
    let platform = Platform::parse("linux", "x86_64");
    let config = test_config();
    let tool_url = asset_url(AssetKind::Tool, platform, &config);
    let fetcher = MemoryFetcher::new()
        .serve(config.app_archive_url.clone(), app_archive())
        .serve(config.component_archive_url.clone(), component_archive())
        .serve(tool_url, b"this is not a zip".to_vec());

    let err = Bundler::new(config, fetcher, platform, install_dir(&temp))
        .run()
        .unwrap_err();

    assert_eq!(err.step, Step::Tools);
    assert!(matches!(err.source, Error::ArchiveFormat { .. }), "got {:?}", err.source);
}

#[test]
fn test_unknown_platform_uses_default_assets() {
    let temp = TempDir::new().unwrap();
    let platform = Platform::parse("haiku", "x86_64");
    let config = test_config();
    let fetcher = full_fetcher(platform, &config, UNIX_TOOL_FILES);

    Bundler::new(config.clone(), fetcher, platform, install_dir(&temp))
        .run()
        .unwrap();

    let root = install_dir(&temp);
    assert!(root.join("mcp/xmlui-mcp").is_file());
    assert!(asset_url(AssetKind::Server, platform, &config).ends_with("xmlui-test-server-mac-arm.tar.gz"));
}

// ==================== Over HTTP ====================

mod http {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount(server: &MockServer, route: &str, body: Vec<u8>) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .expect(1)
            .mount(server)
            .await;
    }

    fn http_config(server: &MockServer) -> BundleConfig {
        let base = server.uri();
        BundleConfig {
            app_archive_url: format!("{base}/jonudell/xmlui-invoice/zip/refs/heads/main"),
            component_archive_url: format!("{base}/xmlui-com/xmlui/zip/refs/heads/main"),
            tool_release_base: format!("{base}/mcp/"),
            server_release_base: format!("{base}/server/"),
            private_repo_marker: format!("{base}/xmlui-com/xmlui"),
            ..BundleConfig::default()
        }
    }

    #[tokio::test]
    async fn test_pipeline_over_http() {
        let server = MockServer::start().await;
        let platform = Platform::parse("linux", "x86_64");

        mount(&server, "/jonudell/xmlui-invoice/zip/refs/heads/main", app_archive()).await;
        mount(&server, "/xmlui-com/xmlui/zip/refs/heads/main", component_archive()).await;
        mount(&server, "/mcp/xmlui-mcp-linux-amd64.zip", zip_archive(UNIX_TOOL_FILES)).await;
        mount(
            &server,
            "/server/xmlui-test-server-linux-amd64.tar.gz",
            tar_gz_archive(SERVER_FILES),
        )
        .await;

        let temp = TempDir::new().unwrap();
        let config = http_config(&server);
        let fetcher = HttpFetcher::with_token(&config, None);
        let summary = Bundler::new(config, fetcher, platform, install_dir(&temp))
            .run()
            .unwrap();

        assert!(summary.app_dir.join("start.sh").is_file());
        assert!(summary.mcp_dir.join("src/components/Table/Table.tsx").is_file());
        assert!(Path::new(&install_dir(&temp)).join("cleanup.sh").is_file());
    }

    #[tokio::test]
    async fn test_private_401_stops_at_components() {
        let server = MockServer::start().await;
        let platform = Platform::parse("linux", "x86_64");

        mount(&server, "/jonudell/xmlui-invoice/zip/refs/heads/main", app_archive()).await;
        Mock::given(method("GET"))
            .and(path("/xmlui-com/xmlui/zip/refs/heads/main"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let config = http_config(&server);
        let fetcher = HttpFetcher::with_token(&config, None);
        let err = Bundler::new(config, fetcher, platform, install_dir(&temp))
            .run()
            .unwrap_err();

        assert_eq!(err.step, Step::Components);
        assert!(matches!(err.source, Error::Authentication { status: 401, .. }));
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }
}
