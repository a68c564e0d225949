//! Weighted text relevance for blog search.
//!
//! Scores fall in `[0, 1)`. Title matches weigh 1.0 and content matches 0.4,
//! mirroring the `A`/`B` weights given to the PostgreSQL `tsvector`. Every
//! query term must appear somewhere in the document, otherwise the score is 0.

/// Results scoring below this are dropped.
pub const MIN_RELEVANCE: f32 = 0.1;

pub const TITLE_WEIGHT: f32 = 1.0;
pub const CONTENT_WEIGHT: f32 = 0.4;

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Relevance of a document with `title` and `content` to `query`.
pub fn relevance(title: &str, content: &str, query: &str) -> f32 {
    let terms: Vec<String> = tokens(query).collect();
    if terms.is_empty() {
        return 0.0;
    }

    let title_tokens: Vec<String> = tokens(title).collect();
    let content_tokens: Vec<String> = tokens(content).collect();

    let mut raw = 0.0_f32;
    for term in &terms {
        let in_title = title_tokens.iter().filter(|t| *t == term).count() as f32;
        let in_content = content_tokens.iter().filter(|t| *t == term).count() as f32;
        if in_title == 0.0 && in_content == 0.0 {
            return 0.0;
        }
        raw += TITLE_WEIGHT * in_title + CONTENT_WEIGHT * in_content;
    }

    // Normalise by term count so longer queries are not favoured, then squash into [0, 1).
    let per_term = raw / terms.len() as f32;
    per_term / (per_term + 1.0)
}

/// Whether a score clears [`MIN_RELEVANCE`].
pub fn is_relevant(score: f32) -> bool {
    score >= MIN_RELEVANCE
}
