//! Natural-language remediation advice from an external language model.
//!
//! Advice is decoration for the report only. It never decides compliance,
//! and any failure collapses to [`ADVICE_UNAVAILABLE`].

use tracing::{debug, warn};

use crate::config::AdvisoryConfig;
use crate::error::{AuditError, Result};
use crate::math::color_parse::parse_color;
use crate::types::{Rgb, TargetLevel};

pub const ADVICE_UNAVAILABLE: &str = "AI advice unavailable";

#[derive(Debug, Clone, Copy)]
pub struct ExplainRequest<'a> {
    pub text: &'a str,
    pub foreground: &'a str,
    pub background: &'a str,
    pub ratio: f64,
    pub target: TargetLevel,
}

/// A remediation explainer. Implementations make one attempt per call.
pub trait Advisor: Send + Sync {
    fn explain(&self, request: &ExplainRequest<'_>) -> Result<String>;
}

/// Stands in when no advisory service is configured.
pub struct NoAdvisor;

impl Advisor for NoAdvisor {
    fn explain(&self, _request: &ExplainRequest<'_>) -> Result<String> {
        Err(AuditError::Advisory("no advisory service configured".into()))
    }
}

/// Ask `advisor`, degrading every failure to the static placeholder.
pub fn explain_or_fallback(advisor: &dyn Advisor, request: &ExplainRequest<'_>) -> String {
    match advisor.explain(request) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            debug!("advisory service returned an empty answer");
            ADVICE_UNAVAILABLE.to_string()
        }
        Err(err) => {
            warn!(error = %err, "advisory explanation unavailable");
            ADVICE_UNAVAILABLE.to_string()
        }
    }
}

pub fn build_prompt(request: &ExplainRequest<'_>) -> String {
    format!(
        "You are an accessibility expert.\n\
         \n\
         Text: \"{text}\"\n\
         Foreground: {fg}\n\
         Background: {bg}\n\
         Current contrast ratio: {ratio:.2}\n\
         Target WCAG level: {target}\n\
         \n\
         Suggest a WCAG-compliant foreground color.\n\
         Explain WHY this color improves accessibility.\n\
         \n\
         Respond in this format:\n\
         Color: #HEXCODE\n\
         Explanation: <professional explanation>\n",
        text = request.text,
        fg = request.foreground,
        bg = request.background,
        ratio = request.ratio,
        target = request.target,
    )
}

/// Structured view of an answer in the prompt's `Color:` / `Explanation:` format.
#[derive(Debug, Clone, PartialEq)]
pub struct Advice {
    pub color: Option<Rgb>,
    pub explanation: String,
}

impl Advice {
    /// Whether the advised color actually reaches `required` on `background`.
    pub fn meets(&self, background: Rgb, required: f64) -> Option<bool> {
        self.color
            .map(|c| crate::math::wcag::contrast_ratio(c, background) >= required)
    }
}

pub fn parse_advice(answer: &str) -> Advice {
    let mut color = None;
    let mut explanation: Option<String> = None;

    for (i, line) in answer.lines().enumerate() {
        let trimmed = line.trim().trim_start_matches(['*', '-', ' ']);
        if color.is_none() {
            if let Some(value) = strip_label(trimmed, "color:") {
                color = parse_advised_color(value.trim_matches(|c: char| c == '*' || c.is_whitespace()));
                continue;
            }
        }
        if let Some(value) = strip_label(trimmed, "explanation:") {
            let rest: Vec<&str> = answer.lines().skip(i + 1).collect();
            let mut text = value.trim_start_matches(['*', ' ']).trim().to_string();
            if !rest.is_empty() {
                text.push('\n');
                text.push_str(&rest.join("\n"));
            }
            explanation = Some(text.trim().to_string());
            break;
        }
    }

    Advice {
        color,
        explanation: explanation.unwrap_or_else(|| answer.trim().to_string()),
    }
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    head.eq_ignore_ascii_case(label).then(|| &line[label.len()..])
}

/// Models answer in any CSS notation, named colors included.
fn parse_advised_color(value: &str) -> Option<Rgb> {
    parse_color(value).or_else(|| {
        let [r, g, b, _] = csscolorparser::parse(value).ok()?.to_rgba8();
        Some(Rgb::new(r, g, b))
    })
}

/// Build the configured advisor, or `None` when advice is switched off.
pub fn advisor_from_config(config: &AdvisoryConfig) -> Option<Box<dyn Advisor>> {
    if !config.enabled {
        return None;
    }

    #[cfg(feature = "gemini")]
    {
        match gemini::GeminiAdvisor::from_config(config) {
            Ok(advisor) => Some(Box::new(advisor) as Box<dyn Advisor>),
            Err(err) => {
                warn!(error = %err, "advisory service disabled");
                Some(Box::new(NoAdvisor) as Box<dyn Advisor>)
            }
        }
    }

    #[cfg(not(feature = "gemini"))]
    {
        warn!("advisory requested but this build lacks the `gemini` feature");
        Some(Box::new(NoAdvisor))
    }
}

#[cfg(feature = "gemini")]
pub mod gemini {
    use std::time::Duration;

    use serde::Deserialize;

    use super::{build_prompt, Advisor, ExplainRequest};
    use crate::config::AdvisoryConfig;
    use crate::error::{AuditError, Result};

    const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

    /// Google Generative Language API over a blocking client. No retries.
    pub struct GeminiAdvisor {
        client: reqwest::blocking::Client,
        model: String,
        api_key: String,
    }

    impl GeminiAdvisor {
        pub fn from_config(config: &AdvisoryConfig) -> Result<Self> {
            let api_key = std::env::var(&config.api_key_env)
                .ok()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| AuditError::Advisory(format!("{} is not set", config.api_key_env)))?;
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .map_err(|e| AuditError::Advisory(e.to_string()))?;
            Ok(Self {
                client,
                model: config.model.clone(),
                api_key,
            })
        }
    }

    #[derive(Deserialize)]
    struct GenerateResponse {
        #[serde(default)]
        candidates: Vec<Candidate>,
    }

    #[derive(Deserialize)]
    struct Candidate {
        content: Content,
    }

    #[derive(Deserialize)]
    struct Content {
        #[serde(default)]
        parts: Vec<Part>,
    }

    #[derive(Deserialize)]
    struct Part {
        text: Option<String>,
    }

    impl Advisor for GeminiAdvisor {
        fn explain(&self, request: &ExplainRequest<'_>) -> Result<String> {
            let body = serde_json::json!({
                "contents": [{ "parts": [{ "text": build_prompt(request) }] }]
            });
            let response: GenerateResponse = self
                .client
                .post(format!("{ENDPOINT}/{}:generateContent", self.model))
                .query(&[("key", self.api_key.as_str())])
                .json(&body)
                .send()
                .and_then(|r| r.error_for_status())
                .and_then(|r| r.json())
                .map_err(|e| AuditError::Advisory(e.to_string()))?;

            response
                .candidates
                .into_iter()
                .flat_map(|c| c.content.parts)
                .find_map(|p| p.text)
                .ok_or_else(|| AuditError::Advisory("response carried no text".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(&'static str);

    impl Advisor for Canned {
        fn explain(&self, _request: &ExplainRequest<'_>) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn request() -> ExplainRequest<'static> {
        ExplainRequest {
            text: "Subscribe",
            foreground: "rgb(204, 204, 204)",
            background: "rgb(255, 255, 255)",
            ratio: 1.6059,
            target: TargetLevel::Aa,
        }
    }

    #[test]
    fn prompt_carries_request_fields() {
        let prompt = build_prompt(&request());
        assert!(prompt.starts_with("You are an accessibility expert."));
        assert!(prompt.contains("Text: \"Subscribe\""));
        assert!(prompt.contains("Foreground: rgb(204, 204, 204)"));
        assert!(prompt.contains("Current contrast ratio: 1.61"));
        assert!(prompt.contains("Target WCAG level: AA"));
        assert!(prompt.contains("Color: #HEXCODE"));
    }

    #[test]
    fn failure_degrades_to_placeholder() {
        assert_eq!(explain_or_fallback(&NoAdvisor, &request()), ADVICE_UNAVAILABLE);
        assert_eq!(explain_or_fallback(&Canned("  \n"), &request()), ADVICE_UNAVAILABLE);
    }

    #[test]
    fn success_is_trimmed() {
        assert_eq!(explain_or_fallback(&Canned("  Use #595959.\n"), &request()), "Use #595959.");
    }

    #[test]
    fn parses_structured_answer() {
        let advice = parse_advice("Color: #595959\nExplanation: Darker gray reaches 7:1.\nIt stays on-brand.");
        assert_eq!(advice.color, Some(Rgb::gray(0x59)));
        assert_eq!(advice.explanation, "Darker gray reaches 7:1.\nIt stays on-brand.");
        assert_eq!(advice.meets(Rgb::WHITE, 4.5), Some(true));
    }

    #[test]
    fn parses_markdown_and_named_colors() {
        let advice = parse_advice("**Color:** navy\n**Explanation:** Navy is dark.");
        assert_eq!(advice.color, Some(Rgb::new(0, 0, 128)));
        assert_eq!(advice.explanation, "Navy is dark.");
    }

    #[test]
    fn unstructured_answer_kept_whole() {
        let advice = parse_advice("Try a darker gray.");
        assert_eq!(advice.color, None);
        assert_eq!(advice.explanation, "Try a darker gray.");
        assert_eq!(advice.meets(Rgb::WHITE, 4.5), None);
    }

    #[test]
    fn disabled_config_builds_no_advisor() {
        assert!(advisor_from_config(&AdvisoryConfig::default()).is_none());
    }
}
