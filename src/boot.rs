use log::{error, info, warn};
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::ContentKind;

/// Run all boot checks. Call this before Rocket launches.
/// Creates missing directories and warns about missing assets.
/// Returns the number of errors encountered.
pub fn run(config: &SiteConfig) -> u32 {
    info!("Boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Directories ─────────────────────────────────
    let content_root = Path::new(&config.content_dir);
    let mut dirs = vec![Path::new(&config.static_dir).to_path_buf()];
    for kind in ContentKind::ALL {
        dirs.push(content_root.join(kind.dir_name()));
    }
    for dir in &dirs {
        if !dir.exists() {
            match fs::create_dir_all(dir) {
                Ok(_) => info!("  Created directory: {}", dir.display()),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir.display(), e);
                    errors += 1;
                }
            }
        }
    }

    // ── 2. Images referenced from metadata ─────────────
    for (label, path) in [
        ("default Open Graph image", &config.default_og_image),
        ("organization logo", &config.organization.logo.path),
    ] {
        if let Some(file) = static_file(config, path) {
            if !Path::new(&file).exists() {
                warn!("  Missing {}: {} (served as {})", label, file, path);
                warnings += 1;
            }
        }
    }

    // ── 3. Mail relay ──────────────────────────────────
    if !config.mail.enabled {
        warn!("  Mail relay disabled: form submissions will only be logged");
        warnings += 1;
    }

    info!(
        "Boot check complete: {} error(s), {} warning(s)",
        errors, warnings
    );
    errors
}

/// Local file behind a site path, for paths served from the static dir.
/// Absolute URLs point elsewhere and yield None.
fn static_file(config: &SiteConfig, path: &str) -> Option<String> {
    if url::Url::parse(path).is_ok() {
        return None;
    }
    Some(format!(
        "{}/{}",
        config.static_dir.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}
