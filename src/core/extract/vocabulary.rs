//! The closed vocabulary of framework call names the extractor recognizes.
//!
//! Names are matched exactly against these tables. The tables are versioned
//! with the crate and are not user-extensible.

use crate::core::StoreKind;

/// Prefix shared by every hook call.
pub const HOOK_PREFIX: &str = "use";

/// Action marker recorded for dispatch-style store bindings.
pub const DISPATCH_ACTION: &str = "dispatch";

/// Hooks with special extraction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    /// `useState`: yields a StateInfo.
    State,
    /// `useContext`: yields a ContextInfo.
    Context,
    /// Effect/memo/callback hooks whose second argument is a dependency array.
    WithDependencies,
    /// Any other `use*` call.
    Plain,
}

impl HookKind {
    /// Classify a callee name. Returns `None` for non-hook calls.
    pub fn classify(name: &str) -> Option<Self> {
        let rest = name.strip_prefix(HOOK_PREFIX)?;
        // `use`, `useFoo`, `use2D`; not `user` or `useless`.
        if rest
            .chars()
            .next()
            .is_some_and(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit()))
        {
            return None;
        }
        Some(match name {
            "useState" => HookKind::State,
            "useContext" => HookKind::Context,
            "useEffect" | "useLayoutEffect" | "useInsertionEffect" | "useMemo"
            | "useCallback" => HookKind::WithDependencies,
            _ => HookKind::Plain,
        })
    }
}

/// What a store-binding call contributes to its StoreInfo bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEntry {
    /// A rendered selector expression.
    Selector,
    /// A fixed action marker.
    Action(&'static str),
}

/// A recognized external-store binding call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreBinding {
    pub kind: StoreKind,
    pub entry: StoreEntry,
}

const STORE_BINDINGS: &[(&str, StoreBinding)] = &[
    (
        "useSelector",
        StoreBinding {
            kind: StoreKind::Redux,
            entry: StoreEntry::Selector,
        },
    ),
    (
        "useDispatch",
        StoreBinding {
            kind: StoreKind::Redux,
            entry: StoreEntry::Action(DISPATCH_ACTION),
        },
    ),
    (
        "useRecoilState",
        StoreBinding {
            kind: StoreKind::Recoil,
            entry: StoreEntry::Selector,
        },
    ),
    (
        "useRecoilValue",
        StoreBinding {
            kind: StoreKind::Recoil,
            entry: StoreEntry::Selector,
        },
    ),
    (
        "useStore",
        StoreBinding {
            kind: StoreKind::Zustand,
            entry: StoreEntry::Selector,
        },
    ),
    (
        "useAtom",
        StoreBinding {
            kind: StoreKind::Jotai,
            entry: StoreEntry::Selector,
        },
    ),
];

/// Look up a callee name in the store-binding table.
pub fn store_binding(name: &str) -> Option<StoreBinding> {
    STORE_BINDINGS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, binding)| *binding)
}
