use chrono::NaiveDate;

/// Failure taxonomy for one extraction attempt.
///
/// Parsing-level problems are not represented here: a document with no
/// recognizable headings, or a heading no rule matches, degrades to a
/// best-effort result and a log line, never an error.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error(
        "no workbook page for the week of {monday}: predicted id {predicted_id} was not found \
         and the index lookup discovered nothing"
    )]
    NotFoundAfterFallback {
        monday: NaiveDate,
        predicted_id: i64,
    },
    #[error("transport failure for {url}: {reason}")]
    Transport { url: String, reason: String },
    #[error("empty document at {url}")]
    EmptyDocument { url: String },
}

impl ExtractError {
    pub(crate) fn transport(url: &url::Url, err: &reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}

pub type ExtractResult<T> = Result<T, ExtractError>;
