//! Test fixtures - in-memory archives shaped like the real downloads.

#![allow(dead_code)]

use std::io::{Cursor, Write};

/// Build a zip archive from `(path, content)` pairs. Paths ending in `/` become directories.
pub fn zip_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
    }
    zip.finish().unwrap().into_inner()
}

/// Build a gzip-compressed tar archive from `(path, content)` pairs.
pub fn tar_gz_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, content.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

/// The application repository as codeload serves it: one `<repo>-<branch>` directory.
pub fn app_archive() -> Vec<u8> {
    zip_archive(&[
        ("xmlui-invoice-main/", ""),
        ("xmlui-invoice-main/index.html", "<html><App/></html>"),
        ("xmlui-invoice-main/xmlui/Main.xmlui", "<App>invoices</App>"),
    ])
}

/// The component library repository; only two subtrees of it are kept.
pub fn component_archive() -> Vec<u8> {
    zip_archive(&[
        ("xmlui-main/", ""),
        ("xmlui-main/README.md", "# XMLUI"),
        ("xmlui-main/docs/pages/intro.md", "not a component page"),
        ("xmlui-main/docs/pages/components/Button.md", "# Button"),
        ("xmlui-main/docs/pages/components/Table.md", "# Table"),
        ("xmlui-main/xmlui/src/components/Button/Button.tsx", "export const Button = 1;"),
        ("xmlui-main/xmlui/src/components/Table/Table.tsx", "export const Table = 1;"),
        ("xmlui-main/xmlui/src/index.ts", "export {};"),
    ])
}

/// Unix tool archive contents (served as zip for Linux).
pub const UNIX_TOOL_FILES: &[(&str, &str)] = &[
    ("xmlui-mcp", "mcp binary"),
    ("xmlui-mcp-client", "client binary"),
    ("prepare-binaries.sh", "#!/bin/sh\n"),
    ("run-mcp-client.sh", "#!/bin/sh\n./xmlui-mcp-client\n"),
    ("LICENSE", "MIT"),
];

/// Windows tool archive contents.
pub const WINDOWS_TOOL_FILES: &[(&str, &str)] = &[
    ("xmlui-mcp.exe", "MZ mcp"),
    ("xmlui-mcp-client.exe", "MZ client"),
    ("run-mcp-client.bat", "@echo off\r\n"),
];

/// Server archive contents, extracted straight into the application directory.
pub const SERVER_FILES: &[(&str, &str)] = &[
    ("xmlui-test-server", "server binary"),
    ("start.sh", "#!/bin/sh\n./xmlui-test-server\n"),
];
