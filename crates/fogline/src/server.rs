//! MCP (Model Context Protocol) server.
//!
//! Exposes the readability analysis to AI assistants over stdio. Every tool
//! delegates to `fogline_core` and answers with JSON text content, except
//! `get_info` which also offers plain text.
//!
//! Text arguments are checked against the input limit before any work is
//! done; oversized input is an `invalid_params` error.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use fogline_core::{AbbreviationSet, Config, ReadabilityReport, sentence, syllable};

use crate::commands::analyze::gate_failures;

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeTextParams {
    /// The text to analyze.
    pub text: String,
    /// Highest acceptable Flesch-Kincaid grade.
    pub max_grade: Option<f64>,
    /// Lowest acceptable Flesch Reading Ease.
    pub min_flesch: Option<f64>,
}

/// Parameters for the `split_sentences` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SplitSentencesParams {
    /// The text to split.
    pub text: String,
    /// Extra abbreviations whose trailing period does not end a sentence.
    #[serde(default)]
    pub abbreviations: Vec<String>,
}

/// Parameters for the `count_syllables` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CountSyllablesParams {
    /// Words to count.
    pub words: Vec<String>,
}

#[derive(Serialize)]
struct AnalyzeTextOutput {
    #[serde(flatten)]
    summary: fogline_core::ReadabilitySummary,
    failures: Vec<String>,
}

#[derive(Serialize)]
struct SyllableCount<'a> {
    word: &'a str,
    syllables: usize,
}

fn json_content<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// MCP server for fogline's readability tools.
#[derive(Clone)]
pub struct FoglineServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    abbreviations: AbbreviationSet,
    max_input_bytes: Option<usize>,
}

impl Default for FoglineServer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[tool_router]
impl FoglineServer {
    /// Create a server using the configured abbreviations and input limit.
    pub fn from_config(config: &Config) -> Self {
        Self {
            tool_router: Self::tool_router(),
            abbreviations: config.abbreviation_set(),
            max_input_bytes: config.input_limit(),
        }
    }

    fn check_size(&self, bytes: usize) -> Result<(), McpError> {
        fogline_core::check_input_size(bytes, self.max_input_bytes)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }

    /// Get package information.
    #[tool(description = "Get fogline's name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        if params.format == "json" {
            return json_content(&serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
            }));
        }
        let text = format!(
            "{} v{}\n{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_DESCRIPTION"),
        );
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Full readability report.
    #[tool(
        description = "Analyze English text. Returns paragraph, sentence, word and syllable counts plus Flesch Reading Ease, Flesch-Kincaid grade and Gunning Fog index. Optional gates are reported in `failures`."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn analyze_text(
        &self,
        Parameters(params): Parameters<AnalyzeTextParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size(params.text.len())?;

        let report = ReadabilityReport::with_options(
            &params.text,
            &self.abbreviations,
            syllable::estimator(),
        );
        let summary = report.to_summary();
        let failures = gate_failures(&summary, params.max_grade, params.min_flesch);

        tracing::info!(
            tool = "analyze_text",
            words = summary.words,
            kincaid = summary.kincaid,
            "MCP tool completed"
        );
        json_content(&AnalyzeTextOutput { summary, failures })
    }

    /// Sentence splitting.
    #[tool(
        description = "Split English text into sentences, keeping abbreviations such as 'Dr.' and 'U.S.' intact. Returns a JSON array of strings."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", text_len = params.text.len()))]
    fn split_sentences(
        &self,
        Parameters(params): Parameters<SplitSentencesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size(params.text.len())?;

        let sentences = if params.abbreviations.is_empty() {
            sentence::sentences(&params.text, &self.abbreviations)
        } else {
            let mut set = self.abbreviations.clone();
            set.extend(&params.abbreviations);
            sentence::sentences(&params.text, &set)
        };

        tracing::info!(tool = "split_sentences", count = sentences.len(), "MCP tool completed");
        json_content(&sentences)
    }

    /// Per-word syllable counts.
    #[tool(description = "Count syllables in each of the given words.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", words = params.words.len()))]
    fn count_syllables(
        &self,
        Parameters(params): Parameters<CountSyllablesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_size(params.words.iter().map(String::len).sum())?;

        let counts: Vec<SyllableCount<'_>> = params
            .words
            .iter()
            .map(|word| SyllableCount {
                word,
                syllables: syllable::syllables(word),
            })
            .collect();
        json_content(&counts)
    }
}

#[tool_handler]
impl ServerHandler for FoglineServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Scores the readability of English text and splits it into sentences.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn text_of(result: &CallToolResult) -> &str {
        result
            .content
            .first()
            .and_then(|c| match &c.raw {
                RawContent::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .expect("text content")
    }

    fn json_of(result: &CallToolResult) -> serde_json::Value {
        serde_json::from_str(text_of(result)).expect("valid JSON")
    }

    #[test]
    fn server_info_names_the_package() {
        let info = ServerHandler::get_info(&FoglineServer::default());
        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("readability"));
    }

    #[test]
    fn get_info_text_and_json() {
        let server = FoglineServer::default();

        let text = server
            .get_info(Parameters(GetInfoParams {
                format: "text".to_string(),
            }))
            .unwrap();
        assert!(text_of(&text).contains(env!("CARGO_PKG_VERSION")));

        let json = server
            .get_info(Parameters(GetInfoParams {
                format: "json".to_string(),
            }))
            .unwrap();
        assert_eq!(json_of(&json)["name"], env!("CARGO_PKG_NAME"));
    }

    #[test]
    fn analyze_text_reports_counts() {
        let server = FoglineServer::default();
        let result = server
            .analyze_text(Parameters(AnalyzeTextParams {
                text: "The cat sat on the mat. The dog ran fast.".to_string(),
                max_grade: None,
                min_flesch: None,
            }))
            .unwrap();

        let json = json_of(&result);
        assert_eq!(json["sentences"], 2);
        assert_eq!(json["words"], 10);
        assert!(json["flesch"].as_f64().is_some());
        assert!(json["failures"].as_array().unwrap().is_empty());
    }

    #[test]
    fn analyze_text_reports_gate_failures() {
        let server = FoglineServer::default();
        let result = server
            .analyze_text(Parameters(AnalyzeTextParams {
                text: "Organizational restructuring necessitated interdepartmental communication."
                    .to_string(),
                max_grade: Some(6.0),
                min_flesch: Some(60.0),
            }))
            .unwrap();
        assert_eq!(json_of(&result)["failures"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn split_sentences_keeps_abbreviations() {
        let server = FoglineServer::default();
        let result = server
            .split_sentences(Parameters(SplitSentencesParams {
                text: "I was born in the U.S.S.R. My parents were from the U.S. This is not weird."
                    .to_string(),
                abbreviations: Vec::new(),
            }))
            .unwrap();
        let json = json_of(&result);
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert_eq!(json[0], "I was born in the U.S.S.R.");
    }

    #[test]
    fn split_sentences_accepts_extra_abbreviations() {
        let server = FoglineServer::default();
        let text = "See fig. 3 for details. Then stop.";

        let plain = server
            .split_sentences(Parameters(SplitSentencesParams {
                text: text.to_string(),
                abbreviations: Vec::new(),
            }))
            .unwrap();
        assert_eq!(json_of(&plain).as_array().unwrap().len(), 3);

        let extended = server
            .split_sentences(Parameters(SplitSentencesParams {
                text: text.to_string(),
                abbreviations: vec!["fig".to_string()],
            }))
            .unwrap();
        assert_eq!(json_of(&extended).as_array().unwrap().len(), 2);
    }

    #[test]
    fn count_syllables_per_word() {
        let server = FoglineServer::default();
        let result = server
            .count_syllables(Parameters(CountSyllablesParams {
                words: vec!["hello".to_string(), "world".to_string()],
            }))
            .unwrap();
        let json = json_of(&result);
        assert_eq!(json[0]["word"], "hello");
        assert_eq!(json[0]["syllables"], 2);
        assert_eq!(json[1]["syllables"], 1);
    }

    #[test]
    fn oversized_text_is_rejected() {
        let config = Config {
            max_input_bytes: Some(8),
            ..Config::default()
        };
        let server = FoglineServer::from_config(&config);
        let err = server
            .analyze_text(Parameters(AnalyzeTextParams {
                text: "This text is longer than eight bytes.".to_string(),
                max_grade: None,
                min_flesch: None,
            }))
            .unwrap_err();
        assert!(err.message.contains("input too large"));
    }
}
