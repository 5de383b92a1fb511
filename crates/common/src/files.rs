//! Links to files the backend stores for uploaded materials

/// Turn a stored `file_path` into a URL a browser can open.
///
/// Absolute `http(s)` URLs (object storage) pass through; local paths such
/// as `uploads/materials/x.pdf` are served by the backend itself. A missing
/// path renders as an inert `#` link.
pub fn file_url(api_base: &str, file_path: Option<&str>) -> String {
    let Some(path) = file_path.map(str::trim).filter(|p| !p.is_empty()) else {
        return "#".to_string();
    };

    let lower = path.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return path.to_string();
    }

    let base = api_base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
