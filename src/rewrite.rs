//! Playlist rewriting.
//!
//! An HLS playlist fetched from a remote origin references its segments and
//! nested playlists either relative to itself or with absolute URLs. This
//! module rewrites those references into self-referencing proxy URLs, so the
//! player issues every follow-up fetch against the proxy and nested playlists
//! get rewritten recursively. Pure string-to-string, no I/O.

use regex::Regex;
use std::sync::LazyLock;

/// Route the rewritten references point back to.
pub const PROXY_ROUTE: &str = "/api/proxy";

// Absolute media URL embedded in a playlist line. Commas and whitespace
// terminate the URL so trailing attributes on the line survive the rewrite.
static ABSOLUTE_MEDIA_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^,\s]+\.(?:ts|m3u8)").expect("valid regex"));

/// Directory prefix of `target_url`, truncated after its final `/`.
fn base_path(target_url: &str) -> &str {
    match target_url.rfind('/') {
        Some(idx) => &target_url[..idx + 1],
        None => "",
    }
}

/// Wrap an absolute URL in a proxy URL.
fn proxy_url(absolute_url: &str) -> String {
    format!("{}?url={}", PROXY_ROUTE, urlencoding::encode(absolute_url))
}

/// Rewrite every media reference in `body` into a proxy URL.
///
/// Per line:
/// - lines without a `.ts` or `.m3u8` substring pass through verbatim, which
///   keeps directive lines like `#EXTINF` and `#EXT-X-VERSION` intact;
/// - lines starting with `http` have each embedded absolute media URL
///   replaced in place, preserving surrounding text;
/// - remaining non-comment lines are relative references: the whole line is
///   resolved against the directory of `target_url` and replaced;
/// - `#` comment lines that merely mention `.ts`/`.m3u8` are left alone.
pub fn rewrite_playlist(target_url: &str, body: &str) -> String {
    let base = base_path(target_url);

    body.split('\n')
        .map(|line| {
            if !line.contains(".ts") && !line.contains(".m3u8") {
                return line.to_string();
            }
            if line.starts_with("http") {
                ABSOLUTE_MEDIA_URL
                    .replace_all(line, |caps: &regex::Captures| proxy_url(&caps[0]))
                    .into_owned()
            } else if !line.starts_with('#') {
                proxy_url(&format!("{}{}", base, line.trim()))
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
