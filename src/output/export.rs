// Recommendation export — the plain-text listing written to disk.
//
// Format, one line each, newline-terminated:
//
//   Recommended Products:
//   - <title> (Similarity Score: <score>)
//
// Scores are written the way a shortest round-trip float repr prints them:
// whole numbers keep one decimal ("1.0"), tiny magnitudes use a two-digit
// exponent ("1e-05").

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::ranking::ranker::RecommendationResult;

pub const HEADER: &str = "Recommended Products:";

/// Render a score for the listing.
pub fn format_score(score: f64) -> String {
    if !score.is_finite() {
        return if score.is_nan() {
            "nan".to_string()
        } else if score > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    if score != 0.0 && score.abs() < 1e-4 {
        // Rust prints "1e-5"; the listing wants "1e-05"
        let raw = format!("{score:e}");
        return match raw.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(d) => ("-", d),
                    None => ("+", exp),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => raw,
        };
    }
    if score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        format!("{score}")
    }
}

/// Render the full listing.
pub fn format_recommendations(result: &RecommendationResult) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for rec in result.iter() {
        out.push_str(&format!(
            "- {} (Similarity Score: {})\n",
            rec.title,
            format_score(rec.score)
        ));
    }
    out
}

/// Write the listing to `path`, creating parent directories.
///
/// Returns the path written, for display.
pub fn write_recommendations(result: &RecommendationResult, path: &str) -> Result<String> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    std::fs::write(path, format_recommendations(result))
        .with_context(|| format!("Failed to write recommendations to {path}"))?;

    info!(path, entries = result.len(), "Exported recommendations");
    Ok(path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::ranker::Recommendation;

    fn result(entries: &[(&str, f64)]) -> RecommendationResult {
        RecommendationResult {
            entries: entries
                .iter()
                .map(|(t, s)| Recommendation {
                    title: t.to_string(),
                    score: *s,
                })
                .collect(),
        }
    }

    #[test]
    fn test_exact_listing() {
        assert_eq!(
            format_recommendations(&result(&[("B", 0.5)])),
            "Recommended Products:\n- B (Similarity Score: 0.5)\n"
        );
    }

    #[test]
    fn test_empty_listing_is_header_only() {
        assert_eq!(
            format_recommendations(&RecommendationResult::default()),
            "Recommended Products:\n"
        );
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(1.0), "1.0");
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(0.5), "0.5");
        assert_eq!(format_score(0.7071067811865475), "0.7071067811865475");
        assert_eq!(format_score(0.00001), "1e-05");
        assert_eq!(format_score(0.000025), "2.5e-05");
        assert_eq!(format_score(0.0001), "0.0001");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("reviewmatch-export-{}", std::process::id()));
        let path = dir.join("nested").join("recs.txt");
        let path_str = path.to_str().unwrap();

        let written = write_recommendations(&result(&[("Kettle", 1.0)]), path_str).unwrap();
        assert_eq!(written, path_str);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Recommended Products:\n- Kettle (Similarity Score: 1.0)\n"
        );

        std::fs::remove_dir_all(&dir).ok();
    }
}
