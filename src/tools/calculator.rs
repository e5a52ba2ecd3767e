use crate::tools::registry::Tool;
use crate::tools::sanitizer::{sanitize, SanitizedExpression};
use crate::types::{ParamKind, ParamSpec, ToolResult, ToolSpec};
use async_trait::async_trait;

/// Registered name of the calculator tool.
pub const TOOL_NAME: &str = "calculate";

/// Stable error code carried by failed calculator results.
pub const EVALUATION_ERROR: &str = "EvaluationError";

pub struct Calculator;

impl Calculator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Numerically evaluate a sanitized expression.
///
/// The evaluator covers the standard operators, the common unary functions
/// (`sqrt`, `sin`, `cos`, `ln`, ...) and the constants `pi` and `e`; `log`
/// and `pow` are registered on top since models reach for both. Malformed
/// input, division by zero, and domain errors all come back as a typed
/// error result; nothing escapes the tool boundary.
pub fn evaluate(expression: &SanitizedExpression) -> ToolResult {
    let mut context = meval::Context::new();
    context.func("log", f64::ln);
    context.func2("pow", f64::powf);

    match meval::eval_str_with_context(expression.as_str(), context) {
        Ok(value) if value.is_finite() => ToolResult::ok(TOOL_NAME, format_number(value)),
        Ok(value) => {
            let class = if value.is_nan() {
                "domain error"
            } else {
                "division by zero or overflow"
            };
            tracing::debug!(expression = %expression, class, "expression did not evaluate to a finite number");
            ToolResult::failure(TOOL_NAME, EVALUATION_ERROR)
        }
        Err(e) => {
            tracing::debug!(expression = %expression, error = %e, "expression failed to parse or evaluate");
            ToolResult::failure(TOOL_NAME, EVALUATION_ERROR)
        }
    }
}

/// Render a result without a spurious trailing fraction: `4`, not `4.0`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[async_trait]
impl Tool for Calculator {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: TOOL_NAME.to_string(),
            description: "Evaluate a mathematical expression and return the numeric result"
                .to_string(),
            parameters: vec![ParamSpec::required("expression", ParamKind::String)],
        }
    }

    async fn execute(&self, args: &serde_json::Map<String, serde_json::Value>) -> ToolResult {
        let Some(raw) = args.get("expression").and_then(|v| v.as_str()) else {
            return ToolResult::failure(TOOL_NAME, EVALUATION_ERROR);
        };

        // Sanitization is idempotent, so re-applying it here keeps the
        // evaluate contract honest even if the caller already stripped.
        evaluate(&sanitize(raw))
    }
}
