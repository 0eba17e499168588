//! Single-pass structural extraction of hook, state, context and store facts.
//!
//! Every call expression in the module is visited exactly once. Calls whose
//! callee is a bare identifier are classified against the fixed vocabulary in
//! `vocabulary`; everything else is walked through without being recorded.
//!
//! The visitor owns its accumulator. Nothing is shared between files, so one
//! `FileAnalyzer` per file can run on any thread.

use std::collections::HashSet;

use swc_common::{Span, Spanned};
use swc_ecma_ast::{ArrowExpr, CallExpr, Callee, Expr, ExprOrSpread, Function, VarDeclarator};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::extract::render::{
    BindingPattern, COMPLEX_EXPRESSION, dependency_name, render_initial_value, render_selector,
    selector_source, unwrap_expr,
};
use crate::core::extract::vocabulary::{HookKind, StoreBinding, StoreEntry, store_binding};
use crate::core::parsers::jsx::ParsedJSX;
use crate::core::{ContextInfo, HookInfo, StateInfo, StoreInfo};

/// Knobs for the extraction traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Record a HookInfo for every hook call site instead of once per hook
    /// name, and extract state/context facts from every call.
    ///
    /// Off by default: one entry per hook name, which is what downstream
    /// consumers of the JSON output expect.
    pub record_every_call: bool,
}

/// A state declaration together with the scope its references are counted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedState {
    pub info: StateInfo,
    /// Span of the innermost function enclosing the `useState` call, or the
    /// module span for top-level calls.
    pub scope: Span,
}

/// Result of extracting a single file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileExtraction {
    pub hooks: Vec<HookInfo>,
    pub states: Vec<ExtractedState>,
    pub contexts: Vec<ContextInfo>,
    pub store_usage: Vec<StoreInfo>,
}

/// Visitor collecting component facts from one parsed file.
///
/// # Usage
///
/// ```ignore
/// let parsed = parse_source(code, "Counter.tsx")?;
/// let extraction = FileAnalyzer::new(&parsed, ExtractOptions::default()).analyze();
/// ```
pub struct FileAnalyzer<'a> {
    parsed: &'a ParsedJSX,
    options: ExtractOptions,

    /// Spans of enclosing functions/arrows, innermost last.
    scopes: Vec<Span>,

    /// Pattern of the declarator whose initializer is the call with this span.
    pending_binding: Option<(Span, BindingPattern)>,

    /// Hook names already recorded.
    seen_hooks: HashSet<String>,

    hooks: Vec<HookInfo>,
    states: Vec<ExtractedState>,
    contexts: Vec<ContextInfo>,
    store_usage: Vec<StoreInfo>,
}

impl<'a> FileAnalyzer<'a> {
    pub fn new(parsed: &'a ParsedJSX, options: ExtractOptions) -> Self {
        Self {
            parsed,
            options,
            scopes: Vec::new(),
            pending_binding: None,
            seen_hooks: HashSet::new(),
            hooks: Vec::new(),
            states: Vec::new(),
            contexts: Vec::new(),
            store_usage: Vec::new(),
        }
    }

    /// Main entry point: walk the module once and return the collected facts.
    pub fn analyze(mut self) -> FileExtraction {
        let parsed = self.parsed;
        self.scopes.push(parsed.module.span);
        parsed.module.visit_with(&mut self);
        FileExtraction {
            hooks: self.hooks,
            states: self.states,
            contexts: self.contexts,
            store_usage: self.store_usage,
        }
    }

    fn current_scope(&self) -> Span {
        self.scopes
            .last()
            .copied()
            .unwrap_or(self.parsed.module.span)
    }

    fn with_scope<F>(&mut self, span: Span, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.scopes.push(span);
        f(self);
        self.scopes.pop();
    }

    /// The binding pattern for `call`, if the call initializes a declarator.
    fn take_binding(&mut self, call: Span) -> Option<BindingPattern> {
        if self
            .pending_binding
            .as_ref()
            .is_some_and(|(span, _)| *span == call)
        {
            return self.pending_binding.take().map(|(_, pat)| pat);
        }
        None
    }

    fn classify_call(&mut self, name: &str, call: &CallExpr, binding: Option<&BindingPattern>) {
        if let Some(kind) = HookKind::classify(name) {
            self.record_hook(name, kind, call, binding);
        }
        if let Some(store) = store_binding(name) {
            self.record_store(store, call, binding);
        }
    }

    // ============================================================
    // Hooks
    // ============================================================

    fn record_hook(
        &mut self,
        name: &str,
        kind: HookKind,
        call: &CallExpr,
        binding: Option<&BindingPattern>,
    ) {
        let first_call = self.seen_hooks.insert(name.to_string());
        if !first_call && !self.options.record_every_call {
            return;
        }

        let dependencies = match kind {
            HookKind::WithDependencies => dependency_array(call),
            _ => None,
        };

        self.hooks.push(HookInfo {
            name: name.to_string(),
            call_location: self.parsed.location(call.span),
            dependencies,
            value: binding.map(BindingPattern::render),
        });

        match kind {
            HookKind::State => {
                if let Some(state) = self.extract_state(call, binding) {
                    self.states.push(state);
                }
            }
            HookKind::Context => {
                if let Some(context) = self.extract_context(call, binding)
                    && !self.contexts.iter().any(|c| c.name == context.name)
                {
                    self.contexts.push(context);
                }
            }
            HookKind::WithDependencies | HookKind::Plain => {}
        }
    }

    /// `const [value, setValue] = useState(initial)`.
    fn extract_state(
        &self,
        call: &CallExpr,
        binding: Option<&BindingPattern>,
    ) -> Option<ExtractedState> {
        let binding = binding?;
        if binding.array_len() < 2 {
            return None;
        }
        let name = binding.array_element(0)?;
        let setter = binding.array_element(1)?;

        let initial_value = plain_arg(call, 0).and_then(render_initial_value);

        Some(ExtractedState {
            info: StateInfo {
                name: name.to_string(),
                setter: setter.to_string(),
                initial_value,
                usage_count: None,
            },
            scope: self.current_scope(),
        })
    }

    /// `const value = useContext(SomeContext)`.
    fn extract_context(
        &self,
        call: &CallExpr,
        binding: Option<&BindingPattern>,
    ) -> Option<ContextInfo> {
        if call.args.len() != 1 {
            return None;
        }
        let Expr::Ident(token) = plain_arg(call, 0)? else {
            return None;
        };
        let name = token.sym.to_string();

        let context_type = call
            .type_args
            .as_ref()
            .and_then(|args| args.params.first())
            .and_then(|ty| self.parsed.snippet(ty.span()));

        let value = binding.map(|pat| format!("{} from {}", pat.render(), name));

        Some(ContextInfo {
            name,
            usage_locations: vec![self.parsed.location(call.span)],
            context_type,
            value,
        })
    }

    // ============================================================
    // External stores
    // ============================================================

    fn record_store(
        &mut self,
        store: StoreBinding,
        call: &CallExpr,
        binding: Option<&BindingPattern>,
    ) {
        let index = match self.store_usage.iter().position(|s| s.kind == store.kind) {
            Some(index) => index,
            None => {
                self.store_usage.push(StoreInfo::new(store.kind));
                self.store_usage.len() - 1
            }
        };
        let bucket = &mut self.store_usage[index];

        match store.entry {
            StoreEntry::Action(marker) => {
                bucket.add_action(marker);
            }
            StoreEntry::Selector => {
                let source = selector_source(plain_arg(call, 0));
                let keys = binding.and_then(BindingPattern::object_keys);
                bucket.add_selector(render_selector(&source, keys));
            }
        }
    }
}

impl Visit for FileAnalyzer<'_> {
    fn visit_function(&mut self, node: &Function) {
        self.with_scope(node.span, |this| node.visit_children_with(this));
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.with_scope(node.span, |this| node.visit_children_with(this));
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        if let Some(init) = &node.init
            && let Expr::Call(call) = unwrap_expr(init)
            && let Some(pattern) = BindingPattern::from_pat(&node.name)
        {
            self.pending_binding = Some((call.span, pattern));
        }
        node.visit_children_with(self);
        self.pending_binding = None;
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        let binding = self.take_binding(node.span);
        if let Callee::Expr(callee) = &node.callee
            && let Expr::Ident(ident) = &**callee
        {
            self.classify_call(&ident.sym, node, binding.as_ref());
        }
        node.visit_children_with(self);
    }
}

/// Argument `index` of `call`, unless it is a spread.
fn plain_arg(call: &CallExpr, index: usize) -> Option<&Expr> {
    call.args
        .get(index)
        .filter(|arg| arg.spread.is_none())
        .map(|arg| &*arg.expr)
}

/// Dependencies of an effect/memo/callback hook, when its second argument is
/// an array literal.
fn dependency_array(call: &CallExpr) -> Option<Vec<String>> {
    let Expr::Array(array) = plain_arg(call, 1)? else {
        return None;
    };
    Some(
        array
            .elems
            .iter()
            .flatten()
            .map(|elem: &ExprOrSpread| match elem.spread {
                Some(_) => COMPLEX_EXPRESSION.to_string(),
                None => dependency_name(&elem.expr),
            })
            .collect(),
    )
}
