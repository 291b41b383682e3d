//! # Name Resolution
//!
//! Display names for argument and local rows, from three ranked sources:
//!
//! 1. the decompiler/live method-info pipeline, which answers asynchronously
//!    (a `NewMethodInfo` event re-attempts resolution without touching tree
//!    structure);
//! 2. declared metadata, arguments only: names the implicit receiver and
//!    maps the remaining indices onto the formal parameter list;
//! 3. the debug-symbol file, locals only: raw slot names wrapped as
//!    `[name]` to signal a low-level rather than source-level identifier.
//!
//! Each source runs at most once per tree lifetime, tracked by per-source
//! flags on the tree itself (never process-wide state). A source that found
//! nothing still counts as attempted and is not retried until the tree is
//! rebuilt from empty.

use crate::tree::LocalsTree;
use crate::types::MethodKey;

/// One parameter name reported by the decompiler/live source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterName
{
    /// Display name (may be empty for the hidden receiver).
    pub name: String,
    /// This entry is the hidden `this`/receiver parameter.
    pub is_hidden_receiver: bool,
}

/// Everything the decompiler/live source knows about one method.
///
/// `None` lists mean "nothing known yet"; the source may fill them in later
/// and raise a new-method-info notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodNames
{
    /// Parameter names, indexed by argument position (receiver included).
    pub parameters: Option<Vec<ParameterName>>,
    /// Raw local-slot names, indexed by local slot.
    pub raw_locals: Option<Vec<Option<String>>>,
    /// Decompiler-inferred local names, indexed by local slot.
    pub decompiler_locals: Option<Vec<Option<String>>>,
}

/// Formal signature from declared metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature
{
    /// The method has no implicit receiver.
    pub is_static: bool,
    /// Formal parameter names, receiver excluded.
    pub parameter_names: Vec<Option<String>>,
}

/// Decompiler/live method-info source (ranked first).
pub trait MethodNameSource
{
    /// Current knowledge about the method behind `key`.
    fn method_names(&self, key: MethodKey) -> MethodNames;
}

/// Declared-metadata source (argument fallback).
pub trait MethodMetadataSource
{
    /// Formal signature of the method behind `key`, if resolvable.
    fn method_signature(&self, key: MethodKey) -> Option<MethodSignature>;
}

/// Debug-symbol-file source (local fallback).
pub trait SymbolFileSource
{
    /// Raw local-slot names recorded in the symbol file, if present.
    fn local_names(&self, key: MethodKey) -> Option<Vec<Option<String>>>;
}

/// Run the full ranked resolution pass after a structural sync.
pub(crate) fn resolve_slot_names(
    tree: &mut LocalsTree,
    metadata: &dyn MethodMetadataSource,
    names: &dyn MethodNameSource,
    symbols: &dyn SymbolFileSource,
)
{
    resolve_from_method_info(tree, names);
    if !tree.name_flags.provider_arg_names && !tree.name_flags.metadata_arg_names {
        resolve_args_from_metadata(tree, metadata);
    }
    if !tree.name_flags.provider_local_names && !tree.name_flags.symbol_file_local_names {
        resolve_locals_from_symbol_file(tree, symbols);
    }
}

/// Re-attempt resolution from the decompiler/live source.
///
/// Also invoked directly when a new-method-info notification fires, without
/// any structural rebuild. Commits each half (arguments, locals) only once
/// the source actually produced data for it, so a later notification can
/// still land.
pub(crate) fn resolve_from_method_info(tree: &mut LocalsTree, names: &dyn MethodNameSource)
{
    let Some(identity) = tree.identity else {
        return;
    };
    if tree.name_flags.provider_arg_names && tree.name_flags.provider_local_names {
        return;
    }
    let Some(key) = identity.method_key() else {
        return;
    };

    let info = names.method_names(key);

    if !tree.name_flags.provider_arg_names {
        if let Some(parameters) = &info.parameters {
            tree.name_flags.provider_arg_names = true;
            for slot in &mut tree.slots {
                let Some(index) = slot.kind().argument_index() else {
                    continue;
                };
                let Some(param) = parameters.get(index as usize) else {
                    continue;
                };
                slot.set_name(param.name.clone(), param.is_hidden_receiver);
            }
        }
    }

    if !tree.name_flags.provider_local_names && (info.raw_locals.is_some() || info.decompiler_locals.is_some()) {
        tree.name_flags.provider_local_names = true;
        for slot in &mut tree.slots {
            let Some(index) = slot.kind().local_index() else {
                continue;
            };
            let index = index as usize;
            let decompiler_name = info
                .decompiler_locals
                .as_ref()
                .and_then(|locals| locals.get(index).cloned())
                .flatten();
            let raw_name = info
                .raw_locals
                .as_ref()
                .and_then(|locals| locals.get(index).cloned())
                .flatten();
            // A raw slot name without a decompiler surface name is shown
            // bracketed, to mark it as a low-level identifier.
            let name = match decompiler_name {
                Some(name) => Some(name),
                None => raw_name.filter(|name| !name.is_empty()).map(|name| format!("[{name}]")),
            };
            match name {
                Some(name) if !name.is_empty() => slot.set_name(name, false),
                _ => {}
            }
        }
    }
}

/// Argument fallback: declared metadata.
///
/// Argument 0 of an instance method is the implicit receiver; it gets an
/// empty display name and the receiver mark instead of a positional lookup.
/// All other indices map into the formal parameter list, shifted by one for
/// instance methods to account for the receiver.
fn resolve_args_from_metadata(tree: &mut LocalsTree, metadata: &dyn MethodMetadataSource)
{
    if tree.name_flags.metadata_arg_names {
        return;
    }
    tree.name_flags.metadata_arg_names = true;

    let Some(key) = tree.identity.and_then(|identity| identity.method_key()) else {
        return;
    };
    let Some(signature) = metadata.method_signature(key) else {
        return;
    };

    for slot in &mut tree.slots {
        let Some(index) = slot.kind().argument_index() else {
            continue;
        };
        let is_receiver = index == 0 && !signature.is_static;
        if is_receiver {
            slot.set_name(String::new(), true);
        } else {
            let formal = if signature.is_static {
                index as usize
            } else {
                index as usize - 1
            };
            if let Some(Some(name)) = signature.parameter_names.get(formal) {
                slot.set_name(name.clone(), false);
            }
        }
    }
}

/// Local fallback: raw names from the debug-symbol file, bracketed.
fn resolve_locals_from_symbol_file(tree: &mut LocalsTree, symbols: &dyn SymbolFileSource)
{
    if tree.name_flags.symbol_file_local_names {
        return;
    }
    tree.name_flags.symbol_file_local_names = true;

    let Some(key) = tree.identity.and_then(|identity| identity.method_key()) else {
        return;
    };
    let Some(raw_names) = symbols.local_names(key) else {
        return;
    };

    for slot in &mut tree.slots {
        let Some(index) = slot.kind().local_index() else {
            continue;
        };
        if let Some(Some(name)) = raw_names.get(index as usize) {
            if !name.is_empty() {
                slot.set_name(format!("[{name}]"), false);
            }
        }
    }
}
