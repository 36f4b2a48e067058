use std::{fs, path::Path};

use crate::{error::AppResult, models::RecommendationSet};

const STYLE: &str = "body { font-family: Arial, sans-serif; } \
table { width: 50%; margin: auto; border-collapse: collapse; } \
th, td { border: 1px solid #ddd; padding: 8px; text-align: center; } \
th { background-color: #f4f4f4; }";

/// Renders recommendations as a standalone HTML page
///
/// Users and movies are shown 1-based. Scores are printed with `precision`
/// decimal places.
pub fn render_html(set: &RecommendationSet, precision: usize) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<title>Movie Recommendations</title>\n");
    html.push_str(&format!("<style>{}</style>\n", STYLE));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<h2 style='text-align: center;'>Top {} Recommended Movies for User {}</h2>\n",
        set.top_n,
        set.target_user + 1
    ));
    html.push_str("<table>\n<tr><th>Rank</th><th>Movie ID</th><th>Predicted Rating</th></tr>\n");

    for (rank, rec) in set.recommendations.iter().enumerate() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>Movie {}</td><td>{:.*}</td></tr>\n",
            rank + 1,
            rec.movie_index + 1,
            precision,
            rec.predicted_score
        ));
    }

    html.push_str("</table>\n</body>\n</html>\n");
    html
}

/// Writes the HTML report to `path`, replacing any existing file
pub fn write_html_report(
    set: &RecommendationSet,
    path: impl AsRef<Path>,
    precision: usize,
) -> AppResult<()> {
    let path = path.as_ref();
    fs::write(path, render_html(set, precision))?;

    tracing::info!(
        path = %path.display(),
        target_user = set.target_user,
        rows = set.recommendations.len(),
        "Recommendation report written"
    );

    Ok(())
}
