use crate::types::{AppError, Result, ToolResult, ToolSpec};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// A named, schema-described capability the dispatcher can invoke.
///
/// Tools are uniform over `{spec, validate_args, execute}`, so adding one
/// never touches dispatch control flow. `execute` reports failure through
/// the [`ToolResult`] it returns; errors never cross the tool boundary.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Declarative schema of this tool.
    fn spec(&self) -> ToolSpec;

    /// Check the arguments against the spec before execution.
    fn validate_args(&self, args: &serde_json::Map<String, serde_json::Value>) -> Result<()> {
        let spec = self.spec();
        for param in &spec.parameters {
            match args.get(&param.name) {
                Some(value) if param.kind.matches(value) => {}
                Some(_) => {
                    return Err(AppError::MalformedArguments(format!(
                        "parameter '{}' of tool '{}' must be a {}",
                        param.name,
                        spec.name,
                        param.kind.as_str()
                    )));
                }
                None if param.required => {
                    return Err(AppError::MalformedArguments(format!(
                        "tool '{}' is missing required parameter '{}'",
                        spec.name, param.name
                    )));
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Run the tool over validated arguments.
    async fn execute(&self, args: &serde_json::Map<String, serde_json::Value>) -> ToolResult;
}

impl std::fmt::Debug for dyn Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.spec().name)
            .finish()
    }
}

/// Registry of available tools, keyed by name.
///
/// Built once at startup and never mutated afterwards, which makes shared
/// unsynchronized reads across concurrent turns safe. Specs are handed out
/// in registration order so prompt construction stays deterministic.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create a registry with the built-in tool set (calculator, search).
    pub fn with_builtin_tools(
        search_provider: Arc<dyn crate::tools::search::SearchProvider>,
    ) -> Self {
        let mut registry = Self::new();

        registry
            .register(Arc::new(crate::tools::calculator::Calculator::new()))
            .expect("builtin tool names are unique");
        registry
            .register(Arc::new(crate::tools::search::SearchTool::new(
                search_provider,
            )))
            .expect("builtin tool names are unique");

        registry
    }

    /// Register a tool. Fails if a tool with the same name already exists.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.spec().name;
        if self.index.contains_key(&name) {
            return Err(AppError::DuplicateToolName(name));
        }
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Look up a tool by name.
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn Tool>> {
        self.index
            .get(name)
            .map(|&i| Arc::clone(&self.tools[i]))
            .ok_or_else(|| AppError::UnknownTool(name.to_string()))
    }

    /// All tool specs, in registration order, stable across calls.
    pub fn all_specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|tool| tool.spec()).collect()
    }

    /// Registered tool names, in registration order.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|tool| tool.spec().name).collect()
    }

    /// Check if a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
}
