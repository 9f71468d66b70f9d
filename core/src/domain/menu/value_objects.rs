use url::Url;

use crate::domain::common::entities::app_errors::CoreError;

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "data"];

/// Validated input of a menu parsing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMenuInput {
    menu_url: String,
}

impl ParseMenuInput {
    /// Accepts anything the vision model can fetch: an absolute http(s) URL
    /// or an inline `data:` image.
    pub fn new(menu_url: Option<String>) -> Result<Self, CoreError> {
        let menu_url = menu_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or(CoreError::MissingMenuUrl)?;

        let parsed = Url::parse(&menu_url).map_err(|_| CoreError::InvalidMenuUrl)?;
        if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
            return Err(CoreError::InvalidMenuUrl);
        }

        Ok(Self { menu_url })
    }

    pub fn menu_url(&self) -> &str {
        &self.menu_url
    }

    /// Shortened URL for log lines, inline images can be megabytes long.
    pub fn log_url(&self) -> String {
        const MAX_LOGGED_CHARS: usize = 96;
        match self.menu_url.char_indices().nth(MAX_LOGGED_CHARS) {
            Some((end, _)) => format!("{}...", &self.menu_url[..end]),
            None => self.menu_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
}
