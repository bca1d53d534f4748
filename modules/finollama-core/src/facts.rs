use ai_client::{truncate_to_char_boundary, AiError, TextModel};
use tracing::{info, warn};

/// Build the fixed fact-check prompt around the article text.
pub fn fact_check_prompt(article: &str) -> String {
    format!(
        r#"{article}

I wish to get return a json object with
following property

1. "50_words_summary" : summary in 50 words

2. "list_of_facts" : list of facts where each fact has following properties
  (i) "fact" : the fact string
  (ii) "accurate" : accurate, accurate but context required, misleading
  (iii) "explanation" : explanation if not accurate/misleading or context required

sort list of facts in descending order means more misleading
should be on top and more accurate on bottom

strictly return only a json object of all this nothing else,
inside a single ```json fenced code block.

please make sure json object you return is valid.
"#
    )
}

/// Sends article text to a [`TextModel`] with the fact-check prompt.
pub struct LlmFactExtractor<M> {
    model: M,
    max_article_bytes: usize,
}

impl<M: TextModel> LlmFactExtractor<M> {
    pub fn new(model: M, max_article_bytes: usize) -> Self {
        Self {
            model,
            max_article_bytes,
        }
    }

    /// One model call, no retries. The reply is returned unmodified.
    pub async fn extract_facts(&self, text: &str) -> Result<String, AiError> {
        let article = truncate_to_char_boundary(text, self.max_article_bytes);
        if article.len() < text.len() {
            warn!(
                original_bytes = text.len(),
                kept_bytes = article.len(),
                "Article truncated before fact check"
            );
        }

        info!(model = self.model.model(), bytes = article.len(), "Requesting fact check");
        let reply = self.model.complete(&fact_check_prompt(article)).await?;
        info!(model = self.model.model(), reply_bytes = reply.len(), "Fact check received");
        Ok(reply)
    }
}
