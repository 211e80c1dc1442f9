//! Marker-based code injection.
//!
//! Entry-point templates carry comment lines such as `// marker:routes` or
//! `# marker:imports`. [`inject_by_marker`] splices a payload in right below
//! the first such line. It is plain text editing, not parsing: only the first
//! occurrence is used, repeated calls inject repeatedly, and a payload that
//! itself contains the marker is not guarded against.

use thiserror::Error;

/// Comment prefixes tried in order when looking for a marker.
const COMMENT_PREFIXES: [&str; 2] = ["//", "#"];

/// Token that follows the comment prefix.
pub const MARKER_TOKEN: &str = "marker:";

/// The marker line was not found in the content.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("INJECTION_MARKER_MISSING: {marker}")]
pub struct MarkerMissing {
    pub marker: String,
}

/// Insert `payload` on the line after `<prefix> marker:<marker>`.
///
/// An empty payload is a no-op. On a missing marker nothing is produced and
/// the caller keeps the content it already has.
pub fn inject_by_marker(content: &str, marker: &str, payload: &str) -> Result<String, MarkerMissing> {
    if payload.is_empty() {
        return Ok(content.to_string());
    }

    let found = COMMENT_PREFIXES.iter().find_map(|prefix| {
        let token = format!("{prefix} {MARKER_TOKEN}{marker}");
        content.match_indices(&token).map(|(at, _)| at).find(|at| {
            // `marker:routes` must not match `marker:routes_extra`.
            !content[at + token.len()..]
                .starts_with(|c: char| c.is_alphanumeric() || c == '_' || c == '-')
        })
    });

    let Some(start) = found else {
        return Err(MarkerMissing {
            marker: format!("{MARKER_TOKEN}{marker}"),
        });
    };

    let payload = format!("{}\n", payload.trim_end_matches(['\r', '\n']));
    let mut out = String::with_capacity(content.len() + payload.len() + 1);

    match content[start..].find('\n') {
        Some(offset) => {
            let split = start + offset + 1;
            out.push_str(&content[..split]);
            out.push_str(&payload);
            out.push_str(&content[split..]);
        }
        None => {
            // Marker on the last line without a terminator.
            out.push_str(content);
            out.push('\n');
            out.push_str(&payload);
        }
    }
    Ok(out)
}
