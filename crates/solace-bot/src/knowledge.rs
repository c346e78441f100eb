// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static policy document loading.
//!
//! The knowledge source is a fixed, unranked body of policy text loaded once
//! at process start and included whole in every assembled context. There is
//! no passage selection or ranking.

use std::path::Path;

use tracing::{error, info, warn};

/// Placeholder when no policy documents are present.
pub const NO_DOCUMENTS: &str = "No additional documentation available.";

/// Placeholder when reading the documents failed.
pub const LOAD_ERROR: &str = "Error loading support documents.";

/// The document files loaded from the configured directory, with the banner
/// prepended to each.
const DOCUMENTS: [(&str, &str); 2] = [
    ("terms_and_conditions.txt", "=== TERMS AND CONDITIONS ==="),
    ("support_guide.txt", "=== SUPPORT GUIDE ==="),
];

/// Load the combined policy text from `dir`.
///
/// Missing files are skipped; if none exist the [`NO_DOCUMENTS`] placeholder
/// is returned. A read error on a present file degrades the whole knowledge
/// body to [`LOAD_ERROR`] rather than failing startup.
pub async fn load_documents(dir: &Path) -> String {
    let mut combined = String::new();

    for (file, banner) in DOCUMENTS {
        let path = dir.join(file);
        if !path.exists() {
            continue;
        }
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                combined.push_str(banner);
                combined.push('\n');
                combined.push_str(&text);
                combined.push_str("\n\n");
                info!(file, "loaded policy document");
            }
            Err(e) => {
                error!(file, error = %e, "failed to read policy document");
                return LOAD_ERROR.to_string();
            }
        }
    }

    if combined.is_empty() {
        warn!(dir = %dir.display(), "no policy documents found");
        return NO_DOCUMENTS.to_string();
    }

    combined
}
