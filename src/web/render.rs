use crate::domain::entities::recommendation::Recommendation;
use std::fmt::Write;

/// Renders the single page: the query form plus either a result or a message.
pub fn page(query: &str, recommendation: Option<&Recommendation>, error: Option<&str>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Find your starter Pokemon</title>\n</head>\n<body>\n\
         <h1>Find your starter Pokemon</h1>\n",
    );
    let _ = write!(
        html,
        "<form method=\"post\" action=\"/\">\n\
         <textarea name=\"query_text\" rows=\"3\" cols=\"60\" \
         placeholder=\"Describe the Pokemon you're looking for\">{}</textarea>\n\
         <button type=\"submit\">Recommend</button>\n</form>\n",
        escape(query)
    );

    if let Some(message) = error {
        let _ = writeln!(html, "<p class=\"error\">{}</p>", escape(message));
    }

    if let Some(r) = recommendation {
        let _ = writeln!(html, "<section class=\"result\">\n<h2>{}</h2>", escape(&r.name));
        match &r.image_url {
            Some(url) => {
                let _ = writeln!(html, "<img src=\"{}\" alt=\"{}\">", escape(url), escape(&r.name));
            }
            None => html.push_str("<div class=\"placeholder\">No image available</div>\n"),
        }
        let _ = writeln!(html, "<p class=\"explanation\">{}</p>", escape(&r.explanation));
        let _ = writeln!(html, "<p class=\"description\">{}</p>\n</section>", escape(&r.description));
    }

    html.push_str("</body>\n</html>\n");
    html
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
