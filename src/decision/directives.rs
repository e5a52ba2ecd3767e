//! The system-directive template handed to the model collaborator.
//!
//! The template is an explicit, versioned value passed into the decision
//! procedure rather than process-wide prompt state, so directive changes
//! can be tested independently of dispatch.

use crate::types::ToolSpec;

/// Identifier of the current directive wording.
pub const DIRECTIVE_VERSION: &str = "v2";

/// Renders the fixed instruction set plus the registered tool schemas into
/// one system-directive string. Rendering is deterministic: the same specs
/// in the same order always produce the same text.
#[derive(Debug, Clone)]
pub struct DirectiveTemplate {
    version: &'static str,
}

impl DirectiveTemplate {
    /// The template at [`DIRECTIVE_VERSION`].
    pub fn current() -> Self {
        Self {
            version: DIRECTIVE_VERSION,
        }
    }

    pub fn version(&self) -> &str {
        self.version
    }

    pub fn render(&self, specs: &[ToolSpec]) -> String {
        let mut out = String::from(
            "You are a helpful voice assistant.\n\
             \n\
             RULES:\n\
             1. ARITHMETIC: any request for a math calculation - including ones phrased \
             as plain questions (\"what is the square root of 16\") - MUST be answered \
             with a JSON tool call to 'calculate'. Never answer arithmetic in prose.\n\
             2. RESEARCH: when the user asks to find papers or search the literature, \
             use 'search'.\n\
             3. OTHER: for everything else (capitals, jokes, history), respond normally \
             in text and do not use tools.\n\
             4. Only the tools listed below exist. Never invent or reference any other tool.\n\
             5. After a tool call, the final reply must contain only the answer - never \
             name the tool used or describe the steps taken.\n\
             \n\
             TOOL CALL FORMAT:\n\
             {\"function\": \"<tool name>\", \"arguments\": {\"<parameter>\": \"<value>\"}}\n\
             \n\
             AVAILABLE TOOLS:\n",
        );

        for (i, spec) in specs.iter().enumerate() {
            let params: Vec<String> = spec
                .parameters
                .iter()
                .map(|p| {
                    format!(
                        "{}: {}{}",
                        p.name,
                        p.kind.as_str(),
                        if p.required { "" } else { ", optional" }
                    )
                })
                .collect();
            out.push_str(&format!(
                "{}. {}({}) - {}\n",
                i + 1,
                spec.name,
                params.join(", "),
                spec.description
            ));
        }

        out.push_str(
            "\nEXAMPLES:\n\
             User: \"Calculate 25 * 4\"\n\
             Assistant: {\"function\": \"calculate\", \"arguments\": {\"expression\": \"25*4\"}}\n\
             \n\
             User: \"What is the square root of 144?\"\n\
             Assistant: {\"function\": \"calculate\", \"arguments\": {\"expression\": \"sqrt(144)\"}}\n\
             \n\
             User: \"Find papers on quantum computing\"\n\
             Assistant: {\"function\": \"search\", \"arguments\": {\"query\": \"quantum computing\"}}\n\
             \n\
             User: \"What is the capital of Canada?\"\n\
             Assistant: The capital of Canada is Ottawa.\n\
             \n\
             Do not explain your tools. Use one when the rules require it; otherwise just speak.",
        );

        out
    }
}

impl Default for DirectiveTemplate {
    fn default() -> Self {
        Self::current()
    }
}
