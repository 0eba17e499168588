//! Component identity resolution.
//!
//! Decides which single component name a file exports, or that the file is not
//! a component at all. Non-component modules (utilities, custom hooks,
//! type-only files) are filtered out here purely by naming convention.
//!
//! Rules, applied in one traversal in document order:
//! 1. A function declaration with a PascalCase name.
//! 2. A variable declarator with a PascalCase name initialized with an arrow
//!    function or function expression.
//! 3. When neither fired, an anonymous default-exported function falls back
//!    to the file's PascalCase base name.
//!
//! When a rule 1/2 name and a PascalCase file name disagree, both are kept:
//! `"Found (FileName)"`.

use swc_ecma_ast::{
    DefaultDecl, ExportDefaultDecl, ExportDefaultExpr, Expr, FnDecl, Module, Pat, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::utils::{file_stem, is_pascal_case};

/// Outcome of identity resolution for a component file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentIdentity {
    /// Display name, possibly the composite `"Found (FileName)"`.
    pub name: String,
    /// The declared binding the name came from. `None` when the name was
    /// taken from the file name of an anonymous default export.
    pub binding: Option<String>,
}

/// Resolve the component name for `file_path`, or `None` if the file does not
/// define a component.
pub fn resolve_component_name(file_path: &str, module: &Module) -> Option<String> {
    resolve_identity(file_path, module).map(|identity| identity.name)
}

/// Like [`resolve_component_name`], also reporting which binding matched.
pub fn resolve_identity(file_path: &str, module: &Module) -> Option<ComponentIdentity> {
    let mut finder = CandidateFinder::default();
    module.visit_with(&mut finder);

    let stem = file_stem(file_path).filter(|stem| is_pascal_case(stem));

    match finder.candidate {
        Some(found) => {
            let name = match stem {
                Some(stem) if stem != found => format!("{} ({})", found, stem),
                _ => found.clone(),
            };
            Some(ComponentIdentity {
                name,
                binding: Some(found),
            })
        }
        None if finder.anonymous_default_export => stem.map(|stem| ComponentIdentity {
            name: stem.to_string(),
            binding: None,
        }),
        None => None,
    }
}

#[derive(Default)]
struct CandidateFinder {
    candidate: Option<String>,
    anonymous_default_export: bool,
}

impl CandidateFinder {
    fn offer(&mut self, name: &str) {
        if self.candidate.is_none() && is_pascal_case(name) {
            self.candidate = Some(name.to_string());
        }
    }
}

impl Visit for CandidateFinder {
    fn visit_fn_decl(&mut self, node: &FnDecl) {
        self.offer(&node.ident.sym);
        node.visit_children_with(self);
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        if let Pat::Ident(binding) = &node.name
            && let Some(init) = &node.init
            && matches!(&**init, Expr::Arrow(_) | Expr::Fn(_))
        {
            self.offer(&binding.id.sym);
        }
        node.visit_children_with(self);
    }

    fn visit_export_default_decl(&mut self, node: &ExportDefaultDecl) {
        // `export default function Name() {}` is a declaration in source but an
        // expression node in the tree.
        if let DefaultDecl::Fn(fn_expr) = &node.decl {
            match &fn_expr.ident {
                Some(ident) => self.offer(&ident.sym),
                None => self.anonymous_default_export = true,
            }
        }
        node.visit_children_with(self);
    }

    fn visit_export_default_expr(&mut self, node: &ExportDefaultExpr) {
        match unwrap_parens(&node.expr) {
            Expr::Arrow(_) => self.anonymous_default_export = true,
            Expr::Fn(fn_expr) => match &fn_expr.ident {
                Some(ident) => self.offer(&ident.sym),
                None => self.anonymous_default_export = true,
            },
            _ => {}
        }
        node.visit_children_with(self);
    }
}

fn unwrap_parens(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_parens(&paren.expr),
        _ => expr,
    }
}
