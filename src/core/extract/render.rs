//! Pure textual renderings of binding patterns and small expressions.
//!
//! Everything here is a function of the syntax node alone; no traversal state
//! is involved, so each rendering is tested in isolation.

use swc_ecma_ast::{
    ArrowExpr, BlockStmt, BlockStmtOrExpr, Callee, Expr, Function, Lit, MemberProp, ObjectPatProp,
    Pat, PropName, Stmt,
};

/// Dependency placeholder for a call whose callee is not a bare identifier.
pub const ANONYMOUS_CALLEE: &str = "anonymous";

/// Dependency placeholder for any expression that is neither an identifier nor a call.
pub const COMPLEX_EXPRESSION: &str = "complex";

/// Selector placeholder when the selector argument has no stable textual identity.
pub const ANONYMOUS_SELECTOR: &str = "selector";

/// The closed set of binding shapes a hook result can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingPattern {
    /// `const value = useX()`
    Ident(String),
    /// `const [a, b] = useX()`. Holes and non-identifier elements are `None`
    /// so positions are preserved.
    Array(Vec<Option<String>>),
    /// `const { a, b: renamed, c = 1 } = useX()`. Holds the property keys.
    Object(Vec<String>),
}

impl BindingPattern {
    /// Classify a declarator pattern. Other shapes yield `None`.
    pub fn from_pat(pat: &Pat) -> Option<Self> {
        match pat {
            Pat::Ident(binding) => Some(BindingPattern::Ident(binding.id.sym.to_string())),
            Pat::Array(array) => Some(BindingPattern::Array(
                array
                    .elems
                    .iter()
                    .map(|elem| match elem {
                        Some(Pat::Ident(binding)) => Some(binding.id.sym.to_string()),
                        _ => None,
                    })
                    .collect(),
            )),
            Pat::Object(object) => Some(BindingPattern::Object(
                object
                    .props
                    .iter()
                    .filter_map(|prop| match prop {
                        ObjectPatProp::KeyValue(kv) => match &kv.key {
                            PropName::Ident(key) => Some(key.sym.to_string()),
                            _ => None,
                        },
                        ObjectPatProp::Assign(assign) => Some(assign.key.sym.to_string()),
                        ObjectPatProp::Rest(_) => None,
                    })
                    .collect(),
            )),
            _ => None,
        }
    }

    /// Human-readable rendering: `value`, `[a, b]`, `{ a, b }`.
    pub fn render(&self) -> String {
        match self {
            BindingPattern::Ident(name) => name.clone(),
            BindingPattern::Array(elems) => {
                let names: Vec<&str> = elems.iter().flatten().map(String::as_str).collect();
                format!("[{}]", names.join(", "))
            }
            BindingPattern::Object(keys) => render_keys(keys),
        }
    }

    /// Element at `index` of an array pattern, if it is an identifier.
    pub fn array_element(&self, index: usize) -> Option<&str> {
        match self {
            BindingPattern::Array(elems) => elems.get(index)?.as_deref(),
            _ => None,
        }
    }

    /// Number of positions in an array pattern (holes included).
    pub fn array_len(&self) -> usize {
        match self {
            BindingPattern::Array(elems) => elems.len(),
            _ => 0,
        }
    }

    pub fn object_keys(&self) -> Option<&[String]> {
        match self {
            BindingPattern::Object(keys) => Some(keys),
            _ => None,
        }
    }
}

fn render_keys(keys: &[String]) -> String {
    if keys.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", keys.join(", "))
    }
}

/// Render a state initializer as literal text.
///
/// Strings are double-quoted, numbers keep their source text, booleans and
/// `null` render as keywords, and any array/object literal collapses to `[]`/`{}`.
/// Other expressions have no rendering.
pub fn render_initial_value(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s
            .value
            .as_str()
            .and_then(|value| serde_json::to_string(value).ok()),
        Expr::Lit(Lit::Num(num)) => Some(
            num.raw
                .as_ref()
                .map(|raw| raw.to_string())
                .unwrap_or_else(|| num.value.to_string()),
        ),
        Expr::Lit(Lit::Bool(b)) => Some(b.value.to_string()),
        Expr::Lit(Lit::Null(_)) => Some("null".to_string()),
        Expr::Array(_) => Some("[]".to_string()),
        Expr::Object(_) => Some("{}".to_string()),
        Expr::Paren(paren) => render_initial_value(&paren.expr),
        _ => None,
    }
}

/// Textual identity of a dependency-array element.
pub fn dependency_name(expr: &Expr) -> String {
    match expr {
        Expr::Ident(ident) => ident.sym.to_string(),
        Expr::Call(call) => match &call.callee {
            Callee::Expr(callee) => match &**callee {
                Expr::Ident(ident) => ident.sym.to_string(),
                _ => ANONYMOUS_CALLEE.to_string(),
            },
            _ => ANONYMOUS_CALLEE.to_string(),
        },
        _ => COMPLEX_EXPRESSION.to_string(),
    }
}

/// Dotted path of an identifier or non-computed member chain (`state.user.name`).
pub fn member_path(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::Member(member) => {
            let MemberProp::Ident(prop) = &member.prop else {
                return None;
            };
            let object = member_path(&member.obj)?;
            Some(format!("{}.{}", object, prop.sym))
        }
        Expr::Paren(paren) => member_path(&paren.expr),
        _ => None,
    }
}

/// Identity of a store-hook's first argument.
///
/// `selectUser` → `selectUser`, `state => state.user` → `state.user`,
/// anything without a stable path → [`ANONYMOUS_SELECTOR`].
pub fn selector_source(expr: Option<&Expr>) -> String {
    let Some(expr) = expr else {
        return ANONYMOUS_SELECTOR.to_string();
    };
    let path = match expr {
        Expr::Arrow(arrow) => arrow_result_path(arrow),
        Expr::Fn(fn_expr) => function_result_path(&fn_expr.function),
        other => member_path(other),
    };
    path.unwrap_or_else(|| ANONYMOUS_SELECTOR.to_string())
}

/// Render a store selector, appending destructured keys when present:
/// `state.user -> { user, loading }`.
pub fn render_selector(source: &str, destructured: Option<&[String]>) -> String {
    match destructured {
        Some(keys) => format!("{} -> {}", source, render_keys(keys)),
        None => source.to_string(),
    }
}

fn arrow_result_path(arrow: &ArrowExpr) -> Option<String> {
    match &*arrow.body {
        BlockStmtOrExpr::Expr(expr) => member_path(expr),
        BlockStmtOrExpr::BlockStmt(block) => block_result_path(block),
    }
}

fn function_result_path(function: &Function) -> Option<String> {
    function.body.as_ref().and_then(block_result_path)
}

fn block_result_path(block: &BlockStmt) -> Option<String> {
    match block.stmts.as_slice() {
        [Stmt::Return(ret)] => ret.arg.as_deref().and_then(member_path),
        _ => None,
    }
}

/// Strip wrappers that do not change which call initializes a binding:
/// parentheses, `await`, and TypeScript assertions.
pub fn unwrap_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(e) => unwrap_expr(&e.expr),
        Expr::Await(e) => unwrap_expr(&e.arg),
        Expr::TsAs(e) => unwrap_expr(&e.expr),
        Expr::TsSatisfies(e) => unwrap_expr(&e.expr),
        Expr::TsNonNull(e) => unwrap_expr(&e.expr),
        Expr::TsTypeAssertion(e) => unwrap_expr(&e.expr),
        Expr::TsConstAssertion(e) => unwrap_expr(&e.expr),
        _ => expr,
    }
}
