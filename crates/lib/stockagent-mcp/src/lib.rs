//! MCP server implementation for stockagent-mcp.
//!
//! This crate wires the portfolio lookup and the question classifier into
//! rmcp tool handlers and exposes the runners used by the daemon.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, tool_handler};
use rmcp::model::{ServerCapabilities, ServerInfo};
use stockagent_core::{KeywordClassifier, PortfolioLookup};

pub const SERVER_NAME: &str = "StockAgent";

/// Tool names in registration order, as listed in the startup banner.
pub const TOOL_SUMMARIES: &[(&str, &str)] = &[
    ("get_portfolio", "포트폴리오 정보 조회"),
    ("is_portfolio_question", "포트폴리오 관련 질문 확인"),
];

const SERVER_INSTRUCTIONS: &str = r"StockAgent answers questions about the user's own stock portfolio.

Workflow:
1. Call `is_portfolio_question` with the user's question. It returns `is_portfolio_related`,
   a `reason`, and the `detected_keywords` that matched.
2. Only when the question is about the user's own holdings, call `get_portfolio`.
   - `access_key` selects the user record. Omit it to use the server default.
   - `source` is a JSON document location (http(s) URL or local path). Omit it to use the
     server default.

Notes:
- Portfolio records are returned unchanged; their structure is defined by the data source.
- General market questions, investment advice, and unrelated questions should not call
  `get_portfolio`.";

/// MCP server wrapper around the portfolio lookup and classifier.
#[derive(Clone)]
pub struct StockAgentMcp {
    tool_router: ToolRouter<Self>,
    lookup: Arc<PortfolioLookup>,
    classifier: Arc<KeywordClassifier>,
}

impl StockAgentMcp {
    /// Creates a new server taking ownership of the lookup and classifier.
    #[must_use]
    pub fn new(lookup: PortfolioLookup, classifier: KeywordClassifier) -> Self {
        Self::with_shared(Arc::new(lookup), Arc::new(classifier))
    }

    /// Creates a new server from shared handles.
    #[must_use]
    pub fn with_shared(lookup: Arc<PortfolioLookup>, classifier: Arc<KeywordClassifier>) -> Self {
        Self {
            tool_router: Self::tool_router_portfolio(),
            lookup,
            classifier,
        }
    }

    pub(crate) fn lookup(&self) -> &PortfolioLookup {
        &self.lookup
    }

    pub(crate) fn classifier(&self) -> &KeywordClassifier {
        &self.classifier
    }
}

#[tool_handler]
impl ServerHandler for StockAgentMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use stockagent_core::{LookupDefaults, PortfolioLoader};

    use super::*;

    pub fn test_server(defaults: LookupDefaults) -> StockAgentMcp {
        let loader = PortfolioLoader::new(Duration::from_secs(5)).expect("client should build");
        StockAgentMcp::new(
            PortfolioLookup::new(loader, defaults),
            KeywordClassifier::default(),
        )
    }

    #[test]
    fn registers_both_tools() {
        let server = test_server(LookupDefaults::default());
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();

        let mut expected: Vec<String> = TOOL_SUMMARIES
            .iter()
            .map(|(name, _)| (*name).to_string())
            .collect();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn advertises_tools_capability() {
        let info = test_server(LookupDefaults::default()).get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(
            info.instructions
                .as_deref()
                .is_some_and(|text| text.contains("get_portfolio"))
        );
    }
}
