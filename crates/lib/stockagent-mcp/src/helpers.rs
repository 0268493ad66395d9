use std::borrow::Cow;

use rmcp::ErrorData;
use rmcp::model::ErrorCode;
use stockagent_core::PortfolioError;
use tracing::warn;

pub fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn map_portfolio_err(err: PortfolioError) -> ErrorData {
    warn!(error = %err, "portfolio lookup failed");
    let not_found = matches!(
        err,
        PortfolioError::KeyNotFound { .. } | PortfolioError::FileNotFound { .. }
    ) || err.status() == Some(404);
    let code = if not_found {
        ErrorCode::RESOURCE_NOT_FOUND
    } else {
        ErrorCode::INTERNAL_ERROR
    };
    mcp_err(code, err.to_string())
}
