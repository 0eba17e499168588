//! Scope-bounded reference counting.
//!
//! Each call is a fresh traversal restricted to one scope span. Component
//! bodies are small, so re-walking per variable is cheaper to reason about
//! than a shared index.

use swc_common::{Span, Spanned};
use swc_ecma_ast::{Expr, Module, ModuleItem, Prop, SimpleAssignTarget, Stmt};
use swc_ecma_visit::{Visit, VisitWith};

/// Count expression-position references to `name` inside `scope`.
///
/// Binding positions (declarations, destructuring patterns, parameters) are
/// never counted, so a variable's own declaration does not count as a use.
/// Shorthand object properties (`{ count }`) and assignment targets
/// (`count = 3`) do count.
pub fn count_references(module: &Module, scope: Span, name: &str) -> usize {
    let mut counter = UsageCounter {
        scope,
        name,
        count: 0,
    };
    module.visit_with(&mut counter);
    counter.count
}

struct UsageCounter<'a> {
    scope: Span,
    name: &'a str,
    count: usize,
}

impl UsageCounter<'_> {
    fn overlaps(&self, span: Span) -> bool {
        span.is_dummy() || (span.lo < self.scope.hi && self.scope.lo < span.hi)
    }

    fn contains(&self, span: Span) -> bool {
        self.scope.lo <= span.lo && span.hi <= self.scope.hi
    }
}

impl Visit for UsageCounter<'_> {
    fn visit_module_item(&mut self, item: &ModuleItem) {
        if self.overlaps(item.span()) {
            item.visit_children_with(self);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        if self.overlaps(stmt.span()) {
            stmt.visit_children_with(self);
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        if !self.overlaps(expr.span()) {
            return;
        }
        if let Expr::Ident(ident) = expr
            && &*ident.sym == self.name
            && self.contains(ident.span)
        {
            self.count += 1;
        }
        expr.visit_children_with(self);
    }

    fn visit_prop(&mut self, prop: &Prop) {
        if let Prop::Shorthand(ident) = prop
            && &*ident.sym == self.name
            && self.contains(ident.span)
        {
            self.count += 1;
        }
        prop.visit_children_with(self);
    }

    fn visit_simple_assign_target(&mut self, target: &SimpleAssignTarget) {
        if let SimpleAssignTarget::Ident(binding) = target
            && &*binding.id.sym == self.name
            && self.contains(binding.id.span)
        {
            self.count += 1;
        }
        target.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use swc_ecma_ast::{Decl, ModuleItem, Stmt};

    use super::*;
    use crate::core::parsers::jsx::parse_source;

    fn fn_span(module: &Module, index: usize) -> Span {
        match &module.body[index] {
            ModuleItem::Stmt(Stmt::Decl(Decl::Fn(f))) => f.function.span,
            other => panic!("expected function declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_counts_jsx_references() {
        let code = r#"
            function Counter() {
                const [n, setN] = useState(0);
                return <div>{n}{n}</div>;
            }
        "#;
        let parsed = parse_source(code, "Counter.tsx").unwrap();
        let scope = fn_span(&parsed.module, 0);
        assert_eq!(count_references(&parsed.module, scope, "n"), 2);
        assert_eq!(count_references(&parsed.module, scope, "setN"), 0);
    }

    #[test]
    fn test_counts_calls_shorthand_and_nested_closures() {
        let code = r#"
            function Form() {
                const [value, setValue] = useState("");
                const submit = () => send({ value });
                return <input value={value} onChange={e => setValue(e.target.value)} />;
            }
        "#;
        let parsed = parse_source(code, "Form.tsx").unwrap();
        let scope = fn_span(&parsed.module, 0);
        assert_eq!(count_references(&parsed.module, scope, "value"), 2);
        assert_eq!(count_references(&parsed.module, scope, "setValue"), 1);
    }

    #[test]
    fn test_references_outside_scope_are_ignored() {
        let code = r#"
            function A() {
                const [open, setOpen] = useState(false);
                return open;
            }
            function B() {
                return open && open;
            }
        "#;
        let parsed = parse_source(code, "A.tsx").unwrap();
        assert_eq!(count_references(&parsed.module, fn_span(&parsed.module, 0), "open"), 1);
        assert_eq!(count_references(&parsed.module, fn_span(&parsed.module, 1), "open"), 2);
    }

    #[test]
    fn test_member_property_names_are_not_references() {
        let code = r#"
            function View() {
                const [user, setUser] = useState(null);
                return props.user ? user.name : null;
            }
        "#;
        let parsed = parse_source(code, "View.tsx").unwrap();
        let scope = fn_span(&parsed.module, 0);
        assert_eq!(count_references(&parsed.module, scope, "user"), 1);
    }

    #[test]
    fn test_assignment_targets_are_references() {
        let code = r#"
            function Tally() {
                let [n, setN] = useState(0);
                n = 3;
                n += 1;
                return <p>{n}</p>;
            }
        "#;
        let parsed = parse_source(code, "Tally.tsx").unwrap();
        let scope = fn_span(&parsed.module, 0);
        assert_eq!(count_references(&parsed.module, scope, "n"), 3);
    }
}
