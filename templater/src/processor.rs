use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use ast::{AstNode, Block, Expr};
use errors::{RegistrationError, ResolutionError, TemplateError, spanned};
use functions::{Function, default_function, is_valid_name};
use parser::parse;
use span::Spanned;
use tracing::{debug, trace};
use types::Value;

use crate::{ProcessorOptions, VarResolver};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Expand templates
///
/// Holds the variable resolvers, tried in registration order, and the
/// functions registered on top of the default table. Evaluation keeps no
/// state on the processor so a shared reference can process templates
/// concurrently.
pub struct TemplateProcessor {
    options: ProcessorOptions,
    var_resolvers: Vec<Box<dyn VarResolver>>,
    functions: HashMap<String, Arc<dyn Function>>,
}

impl Default for TemplateProcessor {
    fn default() -> Self {
        Self::new(ProcessorOptions::default())
    }
}

impl TemplateProcessor {
    pub fn new(options: ProcessorOptions) -> Self {
        Self {
            options,
            var_resolvers: vec![],
            functions: HashMap::new(),
        }
    }

    pub fn with_resolver(resolver: impl VarResolver + 'static, options: ProcessorOptions) -> Self {
        let mut processor = Self::new(options);
        processor.add_var_resolver(resolver);
        processor
    }

    pub fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    pub fn strict_var_resolve(&self) -> bool {
        self.options.strict_var_resolve
    }

    pub fn set_strict_var_resolve(&mut self, strict: bool) {
        self.options.strict_var_resolve = strict;
    }

    /// Add a resolver tried after the ones already added
    pub fn add_var_resolver(&mut self, resolver: impl VarResolver + 'static) {
        self.var_resolvers.push(Box::new(resolver));
    }

    /// Register a function, shadowing a default function of the same name
    pub fn add_function(
        &mut self,
        name: &str,
        function: impl Function + 'static,
    ) -> Result<(), RegistrationError> {
        let name = name.to_lowercase();

        if !is_valid_name(&name) {
            return Err(RegistrationError::InvalidFunctionName(name));
        }

        if self.functions.contains_key(&name) {
            return Err(RegistrationError::FunctionAlreadyRegistered(name));
        }

        debug!(name = name.as_str(), "registered function");
        self.functions.insert(name, Arc::new(function));

        Ok(())
    }

    /// Registered function, or default function, named `name`
    pub fn function(&self, name: &str) -> Option<Arc<dyn Function>> {
        let name = name.trim().to_lowercase();

        self.functions
            .get(&name)
            .cloned()
            .or_else(|| default_function(&name))
    }

    /// Resolve a variable reference, `name#specifier` or `name`
    pub async fn resolve_var(&self, name: &str) -> Result<Option<Value>, ResolutionError> {
        let name = name.trim().to_lowercase();
        let (name, specifier) = match name.split_once('#') {
            Some((name, specifier)) => (name, Some(specifier)),
            None => (name.as_str(), None),
        };

        for resolver in &self.var_resolvers {
            let resolved = resolver.resolve(name, specifier).await.map_err(|err| {
                ResolutionError::VariableResolverFailed {
                    name: name.to_string(),
                    message: err.to_string(),
                }
            })?;

            if let Some(value) = resolved.filter(|value| !value.is_null()) {
                trace!(name, specifier, "resolved variable");
                return Ok(Some(value));
            }
        }

        trace!(name, specifier, "unresolved variable");
        Ok(None)
    }

    /// Call a function by name, `None` if there is no such function
    pub async fn resolve_function(
        &self,
        name: &str,
        input: Value,
        args: Vec<Value>,
    ) -> Result<Option<Value>, ResolutionError> {
        let Some(function) = self.function(name) else {
            return Ok(None);
        };

        trace!(name, args = args.len(), "calling function");

        function
            .call(input, args, self.options.formatting())
            .await
            .map(Some)
            .map_err(|source| ResolutionError::FunctionFailed {
                name: name.to_string(),
                source,
            })
    }

    /// Expand `input`
    ///
    /// The first failing block aborts the expansion. Resolution errors are
    /// spanned to the block that failed.
    pub async fn process(&self, input: &str) -> Result<String, Spanned<TemplateError>> {
        let ast = parse(input, &self.options.tokenize)?;

        debug!(nodes = ast.len(), "processing template");

        let mut output = String::with_capacity(input.len());

        for (node, span) in ast {
            match node {
                AstNode::RawText(text) => output.push_str(&text),
                AstNode::Block(block) => {
                    let text = self
                        .eval_block(&block)
                        .await
                        .map_err(|err| spanned(err, span))?;
                    output.push_str(&text);
                }
            }
        }

        Ok(output)
    }

    async fn eval_block(&self, block: &Block) -> Result<String, ResolutionError> {
        let mut value = self.eval_head(&block.head).await?;

        if block.optional && value.is_empty() {
            trace!(block = %block, "skipped optional block");
            return Ok(String::new());
        }

        for filter in &block.filters {
            value = self.eval_filter(value, filter).await?;
        }

        Ok(self.options.formatting().format(&value))
    }

    /// Evaluate an expression with no input: a block head or an argument
    fn eval_head<'a>(&'a self, expr: &'a Expr) -> BoxFuture<'a, Result<Value, ResolutionError>> {
        Box::pin(async move {
            match expr {
                Expr::String(value) | Expr::Number(value) => Ok(Value::String(value.clone())),
                Expr::Function { name, args } => {
                    let args = self.eval_args(args).await?;
                    self.call(name, Value::Null, args).await
                }
                Expr::FunctionOrVariable(name) => {
                    if let Some(value) = self.resolve_var(name).await? {
                        return Ok(value);
                    }

                    match self.resolve_function(name, Value::Null, vec![]).await? {
                        Some(value) if !value.is_null() => Ok(value),
                        _ if self.strict_var_resolve() => {
                            Err(ResolutionError::UnresolvedVariable(name.clone()))
                        }
                        _ => Ok(Value::Null),
                    }
                }
            }
        })
    }

    /// Apply a filter, always a function call receiving `input`
    async fn eval_filter(&self, input: Value, expr: &Expr) -> Result<Value, ResolutionError> {
        match expr {
            Expr::FunctionOrVariable(name) => self.call(name, input, vec![]).await,
            Expr::Function { name, args } => {
                let args = self.eval_args(args).await?;
                self.call(name, input, args).await
            }
            Expr::String(_) | Expr::Number(_) => {
                Err(ResolutionError::UnknownFunction(expr.to_string()))
            }
        }
    }

    async fn eval_args(&self, args: &[Expr]) -> Result<Vec<Value>, ResolutionError> {
        let mut values = Vec::with_capacity(args.len());

        for arg in args {
            values.push(self.eval_head(arg).await?);
        }

        Ok(values)
    }

    async fn call(
        &self,
        name: &str,
        input: Value,
        args: Vec<Value>,
    ) -> Result<Value, ResolutionError> {
        self.resolve_function(name, input, args)
            .await?
            .ok_or_else(|| ResolutionError::UnknownFunction(name.to_string()))
    }
}
