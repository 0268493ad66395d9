use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::StockAgentMcp;
use crate::helpers;

/// Parameters for classifying a user question.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PortfolioQuestionParams {
    /// The question the user asked.
    pub question: String,
}

/// Parameters for fetching a portfolio record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetPortfolioParams {
    /// Unique identifier of the user whose portfolio is requested. Defaults to the server's key.
    #[serde(default)]
    pub access_key: Option<String>,
    /// JSON document location, either an http(s) URL or a local path. Defaults to the server's source.
    #[serde(default)]
    pub source: Option<String>,
}

#[tool_router(router = tool_router_portfolio, vis = "pub")]
impl StockAgentMcp {
    #[tool(description = "Checks whether the user's question is about their own portfolio. \
Returns is_portfolio_related (boolean), reason (string), and detected_keywords (list of matched keywords).")]
    async fn is_portfolio_question(
        &self,
        Parameters(params): Parameters<PortfolioQuestionParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let result = self.classifier().classify(&params.question);
        Ok(CallToolResult::success(vec![Content::json(result)?]))
    }

    #[tool(description = "Fetches the user's stock portfolio (holdings, quantities, invested amounts). \
Use only when the user asks about their own portfolio, holdings, or investment performance. \
Do not use for general stock or market information, unrelated questions, or investment advice.")]
    async fn get_portfolio(
        &self,
        Parameters(params): Parameters<GetPortfolioParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let record = self
            .lookup()
            .lookup(params.access_key.as_deref(), params.source.as_deref())
            .await
            .map_err(helpers::map_portfolio_err)?;
        Ok(CallToolResult::success(vec![Content::json(record)?]))
    }
}
