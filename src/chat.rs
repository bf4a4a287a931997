//! The chat boundary: one model call per user turn, with a total fallback.
//!
//! Nothing in here throws across the boundary. Whatever goes wrong on the
//! live path (missing key, transport, bad envelope, empty choices), the
//! caller still gets a usable reply from the demo responder.

use crate::api_connection::connection::ApiConnectionError;
use crate::api_connection::endpoints::{ChatCompletionRequest, ChatMessage, Provider};
use crate::demo_responder;
use crate::recipe_parser::{self, Recipe, RegionFilter, RECIPE_CLOSE, RECIPE_OPEN};

/// How many prior turns accompany each request.
pub const HISTORY_WINDOW: usize = 10;

#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub text: String,
    pub recipe: Option<Recipe>,
    /// False whenever the reply came from the offline demo responder.
    pub is_live: bool,
}

fn system_prompt(region: RegionFilter) -> String {
    let region_line = match region {
        RegionFilter::All => String::new(),
        RegionFilter::Only(region) => format!(
            "The user is currently browsing {} cuisine; favor it when suggesting dishes.\n",
            region.label()
        ),
    };
    format!(
        "You are a warm, knowledgeable cooking assistant.\n\
        {region_line}\
        Answer conversationally. When, and only when, you present one complete recipe, embed \
        it as a single JSON object between {open} and {close} markers, with no markdown \
        fences around the JSON. The object must use these properties:\n\
        - \"name\": string\n\
        - \"region\": one of italian, french, spanish, greek, middle eastern, indian, chinese, \
        japanese, korean, thai, vietnamese, mexican, american, international\n\
        - \"cuisine\": string\n\
        - \"description\": string\n\
        - \"prepTime\" and \"cookTime\": human-readable durations like \"20 minutes\"\n\
        - \"servings\": positive integer\n\
        - \"difficulty\": \"Easy\", \"Medium\", or \"Hard\"\n\
        - \"ingredients\": array of objects with \"name\", \"amount\", \"unit\", and optional \
        \"notes\"\n\
        - \"instructions\": array of strings\n\
        - \"tips\": array of strings (optional)\n\
        - \"tags\": array of strings\n\
        Keep any commentary outside the markers.",
        region_line = region_line,
        open = RECIPE_OPEN,
        close = RECIPE_CLOSE,
    )
}

fn build_request(
    message: &str,
    region: RegionFilter,
    history: &[ChatMessage],
    model: &str,
) -> ChatCompletionRequest {
    let recent = history.len().saturating_sub(HISTORY_WINDOW);
    let mut messages = Vec::with_capacity(history.len() - recent + 2);
    messages.push(ChatMessage {
        role: "system".to_string(),
        content: system_prompt(region),
    });
    messages.extend(history[recent..].iter().cloned());
    messages.push(ChatMessage {
        role: "user".to_string(),
        content: message.to_string(),
    });

    ChatCompletionRequest {
        model: model.to_string(),
        messages,
        temperature: Some(0.7),
        max_tokens: Some(1536),
    }
}

/// Produces the assistant's reply for one user turn.
///
/// With no credential the demo responder answers directly. With one, a
/// single completion request is made and its text run through the recipe
/// parser; every failure class degrades to the demo responder.
pub async fn respond(
    message: &str,
    region: RegionFilter,
    history: &[ChatMessage],
    credential: Option<&str>,
    model_override: Option<String>,
) -> ChatOutcome {
    let Some(api_key) = credential.filter(|key| !key.trim().is_empty()) else {
        return demo_outcome(message, region);
    };

    let provider = Provider::openrouter(api_key, model_override);
    let request = build_request(message, region, history, provider.model());

    match live_reply(&provider, request).await {
        Ok(raw_text) => {
            let parsed = recipe_parser::parse(&raw_text);
            ChatOutcome {
                text: parsed.prose,
                recipe: parsed.recipe,
                is_live: true,
            }
        }
        Err(err) => {
            log::warn!("live chat call failed, using demo responder: {}", err);
            demo_outcome(message, region)
        }
    }
}

async fn live_reply(
    provider: &Provider,
    request: ChatCompletionRequest,
) -> Result<String, ApiConnectionError> {
    let response = provider.call_chat_completion(request).await?;
    let choice = response
        .choices
        .first()
        .ok_or(ApiConnectionError::EmptyResponse)?;
    Ok(choice.message.content.clone())
}

fn demo_outcome(message: &str, region: RegionFilter) -> ChatOutcome {
    let reply = demo_responder::respond(message, region);
    ChatOutcome {
        text: reply.text,
        recipe: reply.recipe,
        is_live: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_parser::Region;

    fn turns(n: usize) -> Vec<ChatMessage> {
        (0..n)
            .map(|i| ChatMessage {
                role: if i % 2 == 0 { "user" } else { "assistant" }.to_string(),
                content: format!("turn {}", i),
            })
            .collect()
    }

    #[test]
    fn test_request_carries_last_ten_turns() {
        let history = turns(25);
        let request = build_request("newest", RegionFilter::All, &history, "some/model");
        // system + 10 history + new user message
        assert_eq!(request.messages.len(), 12);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].content, "turn 15");
        assert_eq!(request.messages.last().unwrap().content, "newest");
    }

    #[test]
    fn test_short_history_is_sent_whole() {
        let history = turns(3);
        let request = build_request("hi", RegionFilter::All, &history, "some/model");
        assert_eq!(request.messages.len(), 5);
    }

    #[test]
    fn test_system_prompt_mentions_selected_region() {
        let request = build_request(
            "hi",
            RegionFilter::Only(Region::Korean),
            &[],
            "some/model",
        );
        assert!(request.messages[0].content.contains("Korean"));
        assert!(request.messages[0].content.contains(RECIPE_OPEN));
    }

    #[tokio::test]
    async fn test_missing_credential_uses_demo_responder() {
        let outcome = respond("vegetarian dinner", RegionFilter::All, &[], None, None).await;
        assert!(!outcome.is_live);
        let recipe = outcome.recipe.expect("demo recipe expected");
        assert!(recipe.tags.iter().any(|t| t == "vegetarian"));
    }

    #[tokio::test]
    async fn test_blank_credential_counts_as_absent() {
        let outcome = respond("hello", RegionFilter::All, &[], Some("   "), None).await;
        assert!(!outcome.is_live);
    }
}
