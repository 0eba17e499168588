//! In-process props provider reading declarations from the parsed file.
//!
//! Sources, in order:
//! - the type annotation of the component's first parameter
//!   (`function Button({ size }: ButtonProps)`),
//! - the declarator annotation (`const Button: React.FC<ButtonProps> = ...`),
//! - for untyped components, the keys of a destructured first parameter.
//!
//! Type references are resolved against interfaces and type aliases declared
//! in the same file. Anything declared elsewhere is out of reach without a
//! type checker and yields no props.

use anyhow::Result;
use swc_common::{BytePos, Span, Spanned, comments::Comment};
use swc_ecma_ast::{
    ArrowExpr, BlockStmtOrExpr, Decl, DefaultDecl, Expr, Function, Lit, Module, ModuleDecl,
    ModuleItem, ObjectPatProp, Pat, PropName, Stmt, TsEntityName, TsType, TsTypeElement,
    TsUnionOrIntersectionType,
};

use super::{PropsDoc, PropsProvider, PropsRequest};
use crate::core::extract::count_references;
use crate::core::parsers::jsx::ParsedJSX;
use crate::core::PropInfo;

/// Type text used when a prop has no annotation.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Alias chains longer than this are not followed.
const MAX_ALIAS_DEPTH: usize = 8;

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinProps;

impl PropsProvider for BuiltinProps {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn fetch(&self, request: &PropsRequest<'_>) -> Result<PropsDoc> {
        let parsed = request.parsed;
        let Some(decl) = find_component(&parsed.module, request.identity.binding.as_deref())
        else {
            return Ok(PropsDoc::default());
        };

        let description = parsed
            .comments
            .leading_doc(decl.doc_pos)
            .and_then(clean_doc_comment);

        let bindings = decl.param.map(prop_bindings).unwrap_or_default();

        let declared = decl
            .param
            .and_then(param_type)
            .or(decl.declared_type)
            .map(|ty| {
                let mut members = Vec::new();
                collect_members(&parsed.module, ty, 0, &mut members);
                members
            });

        let mut props: Vec<PropInfo> = match declared {
            Some(members) => members
                .into_iter()
                .filter_map(|member| describe_member(parsed, member))
                .collect(),
            None => bindings
                .iter()
                .map(|binding| PropInfo {
                    name: binding.key.clone(),
                    prop_type: UNKNOWN_TYPE.to_string(),
                    required: binding.default.is_none(),
                    default_value: None,
                    description: None,
                    usage_count: None,
                })
                .collect(),
        };

        for prop in &mut props {
            let Some(binding) = bindings.iter().find(|b| b.key == prop.name) else {
                continue;
            };
            if let Some(default) = binding.default {
                prop.default_value = parsed.snippet(default);
            }
            if let Some(local) = &binding.local {
                prop.usage_count = Some(count_references(&parsed.module, decl.body, local));
            }
        }

        Ok(PropsDoc { props, description })
    }
}

/// The pieces of a component declaration the provider reads.
struct ComponentDecl<'m> {
    param: Option<&'m Pat>,
    declared_type: Option<&'m TsType>,
    /// Span of the component function, where prop references are counted.
    body: Span,
    /// Position leading doc comments attach to.
    doc_pos: BytePos,
}

/// Find the top-level declaration of the component named `binding`, or the
/// anonymous default export when `binding` is `None`.
fn find_component<'m>(module: &'m Module, binding: Option<&str>) -> Option<ComponentDecl<'m>> {
    module.body.iter().find_map(|item| {
        let doc_pos = item.span().lo;
        match item {
            ModuleItem::Stmt(Stmt::Decl(decl)) => from_decl(decl, binding?, doc_pos),
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                from_decl(&export.decl, binding?, doc_pos)
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => match &export.decl {
                DefaultDecl::Fn(fn_expr)
                    if fn_expr.ident.as_ref().map(|i| &*i.sym) == binding =>
                {
                    Some(from_function(&fn_expr.function, None, doc_pos))
                }
                _ => None,
            },
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) if binding.is_none() => {
                from_expr(&export.expr, None, doc_pos)
            }
            _ => None,
        }
    })
}

fn from_decl<'m>(decl: &'m Decl, name: &str, doc_pos: BytePos) -> Option<ComponentDecl<'m>> {
    match decl {
        Decl::Fn(fn_decl) if &*fn_decl.ident.sym == name => {
            Some(from_function(&fn_decl.function, None, doc_pos))
        }
        Decl::Var(var) => var.decls.iter().find_map(|declarator| {
            let Pat::Ident(ident) = &declarator.name else {
                return None;
            };
            if &*ident.id.sym != name {
                return None;
            }
            // `const Button: FC<ButtonProps> = ...` carries the props type
            // in the annotation's first type argument.
            let declared_type = ident.type_ann.as_ref().and_then(|ann| match &*ann.type_ann {
                TsType::TsTypeRef(type_ref) => type_ref
                    .type_params
                    .as_ref()
                    .and_then(|params| params.params.first())
                    .map(|ty| &**ty),
                _ => None,
            });
            from_expr(declarator.init.as_deref()?, declared_type, doc_pos)
        }),
        _ => None,
    }
}

fn from_expr<'m>(
    expr: &'m Expr,
    declared_type: Option<&'m TsType>,
    doc_pos: BytePos,
) -> Option<ComponentDecl<'m>> {
    match expr {
        Expr::Arrow(arrow) => Some(from_arrow(arrow, declared_type, doc_pos)),
        Expr::Fn(fn_expr) => Some(from_function(&fn_expr.function, declared_type, doc_pos)),
        Expr::Paren(paren) => from_expr(&paren.expr, declared_type, doc_pos),
        _ => None,
    }
}

fn from_function<'m>(
    function: &'m Function,
    declared_type: Option<&'m TsType>,
    doc_pos: BytePos,
) -> ComponentDecl<'m> {
    ComponentDecl {
        param: function.params.first().map(|param| &param.pat),
        declared_type,
        body: function.span,
        doc_pos,
    }
}

fn from_arrow<'m>(
    arrow: &'m ArrowExpr,
    declared_type: Option<&'m TsType>,
    doc_pos: BytePos,
) -> ComponentDecl<'m> {
    let body = match &*arrow.body {
        BlockStmtOrExpr::BlockStmt(block) => block.span,
        BlockStmtOrExpr::Expr(expr) => expr.span(),
    };
    ComponentDecl {
        param: arrow.params.first(),
        declared_type,
        body,
        doc_pos,
    }
}

/// Type annotation attached to the first parameter.
fn param_type(pat: &Pat) -> Option<&TsType> {
    let ann = match pat {
        Pat::Ident(ident) => ident.type_ann.as_ref(),
        Pat::Object(object) => object.type_ann.as_ref(),
        Pat::Assign(assign) => return param_type(&assign.left),
        _ => None,
    }?;
    Some(&*ann.type_ann)
}

/// Flatten a props type into its property signatures.
fn collect_members<'m>(
    module: &'m Module,
    ty: &'m TsType,
    depth: usize,
    out: &mut Vec<&'m TsTypeElement>,
) {
    if depth > MAX_ALIAS_DEPTH {
        return;
    }
    match ty {
        TsType::TsTypeLit(lit) => out.extend(lit.members.iter()),
        TsType::TsParenthesizedType(paren) => collect_members(module, &paren.type_ann, depth, out),
        TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsIntersectionType(
            intersection,
        )) => {
            for part in &intersection.types {
                collect_members(module, part, depth, out);
            }
        }
        TsType::TsTypeRef(type_ref) => {
            let TsEntityName::Ident(name) = &type_ref.type_name else {
                return;
            };
            for decl in module_decls(module) {
                match decl {
                    Decl::TsInterface(interface) if interface.id.sym == name.sym => {
                        out.extend(interface.body.body.iter());
                        return;
                    }
                    Decl::TsTypeAlias(alias) if alias.id.sym == name.sym => {
                        collect_members(module, &alias.type_ann, depth + 1, out);
                        return;
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

/// Top-level declarations, exported or not.
fn module_decls(module: &Module) -> impl Iterator<Item = &Decl> {
    module.body.iter().filter_map(|item| match item {
        ModuleItem::Stmt(Stmt::Decl(decl)) => Some(decl),
        ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => Some(&export.decl),
        _ => None,
    })
}

fn describe_member(parsed: &ParsedJSX, member: &TsTypeElement) -> Option<PropInfo> {
    let TsTypeElement::TsPropertySignature(signature) = member else {
        return None;
    };
    let name = match &*signature.key {
        Expr::Ident(ident) => ident.sym.to_string(),
        Expr::Lit(Lit::Str(s)) => s.value.as_str()?.to_string(),
        _ => return None,
    };
    let prop_type = signature
        .type_ann
        .as_ref()
        .and_then(|ann| parsed.snippet(ann.type_ann.span()))
        .unwrap_or_else(|| UNKNOWN_TYPE.to_string());
    let description = parsed
        .comments
        .leading_doc(signature.span.lo)
        .and_then(clean_doc_comment);

    Some(PropInfo {
        name,
        prop_type,
        required: !signature.optional,
        default_value: None,
        description,
        usage_count: None,
    })
}

/// A destructured prop in the component's parameter pattern.
struct PropBinding {
    key: String,
    /// Local name the prop is bound to, when it is a plain identifier.
    local: Option<String>,
    /// Span of the default value expression.
    default: Option<Span>,
}

fn prop_bindings(pat: &Pat) -> Vec<PropBinding> {
    let pat = match pat {
        Pat::Assign(assign) => &*assign.left,
        other => other,
    };
    let Pat::Object(object) = pat else {
        return Vec::new();
    };
    object
        .props
        .iter()
        .filter_map(|prop| match prop {
            ObjectPatProp::Assign(assign) => Some(PropBinding {
                key: assign.key.sym.to_string(),
                local: Some(assign.key.sym.to_string()),
                default: assign.value.as_ref().map(|value| value.span()),
            }),
            ObjectPatProp::KeyValue(kv) => {
                let PropName::Ident(key) = &kv.key else {
                    return None;
                };
                let (local, default) = match &*kv.value {
                    Pat::Ident(ident) => (Some(ident.id.sym.to_string()), None),
                    Pat::Assign(assign) => match &*assign.left {
                        Pat::Ident(ident) => {
                            (Some(ident.id.sym.to_string()), Some(assign.right.span()))
                        }
                        _ => (None, Some(assign.right.span())),
                    },
                    _ => (None, None),
                };
                Some(PropBinding {
                    key: key.sym.to_string(),
                    local,
                    default,
                })
            }
            ObjectPatProp::Rest(_) => None,
        })
        .collect()
}

/// Text of a `/** ... */` block without comment markers and `@tag` lines.
pub fn clean_doc_comment(comment: &Comment) -> Option<String> {
    let lines: Vec<&str> = comment
        .text
        .lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .take_while(|line| !line.starts_with('@'))
        .collect();
    let text = lines.join("\n").trim().to_string();
    (!text.is_empty()).then_some(text)
}
