//! Inspector settings snapshot and change classification.
//!
//! The core consults these flags but does not own or persist them; the host
//! delivers a fresh snapshot with every
//! [`crate::events::InspectorEvent::SettingsChanged`] notification. Which
//! flag changed decides how much work a refresh costs: most flags only touch
//! presentation, but the evaluation/visibility flags change which children a
//! value row would produce and therefore force a full tree rebuild.

/// Snapshot of the settings the inspection core consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectorSettings
{
    /// Render integral values in hexadecimal.
    pub use_hexadecimal: bool,
    /// Syntax-highlight rendered values.
    pub syntax_highlight: bool,
    /// Allow property evaluation and function calls while paused.
    pub property_eval_and_calls: bool,
    /// Use the debuggee's string-conversion function for display.
    pub use_string_conversion: bool,
    /// Allow nested evaluation for string conversion at all.
    pub can_evaluate_to_string: bool,
    /// Debugger-browsable attributes may hide properties and fields.
    pub browsable_attributes_can_hide: bool,
    /// Compiler-generated attributes may hide fields.
    pub compiler_generated_can_hide: bool,
    /// Show namespaces in rendered type names.
    pub show_namespaces: bool,
    /// Show metadata tokens in rendered type names.
    pub show_tokens: bool,
    /// Use language keywords for primitive type names.
    pub show_type_keywords: bool,
}

impl Default for InspectorSettings
{
    fn default() -> Self
    {
        Self {
            use_hexadecimal: false,
            syntax_highlight: true,
            property_eval_and_calls: true,
            use_string_conversion: true,
            can_evaluate_to_string: true,
            browsable_attributes_can_hide: true,
            compiler_generated_can_hide: true,
            show_namespaces: true,
            show_tokens: false,
            show_type_keywords: true,
        }
    }
}

/// Which settings flag a change notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsChange
{
    /// [`InspectorSettings::use_hexadecimal`] changed.
    UseHexadecimal,
    /// [`InspectorSettings::syntax_highlight`] changed.
    SyntaxHighlight,
    /// [`InspectorSettings::property_eval_and_calls`] changed.
    PropertyEvalAndCalls,
    /// [`InspectorSettings::use_string_conversion`] changed.
    UseStringConversion,
    /// [`InspectorSettings::browsable_attributes_can_hide`] changed.
    BrowsableAttributes,
    /// [`InspectorSettings::compiler_generated_can_hide`] changed.
    CompilerGeneratedAttributes,
    /// [`InspectorSettings::show_namespaces`] changed.
    ShowNamespaces,
    /// [`InspectorSettings::show_tokens`] changed.
    ShowTokens,
    /// [`InspectorSettings::show_type_keywords`] changed.
    ShowTypeKeywords,
}

impl SettingsChange
{
    /// Whether this change invalidates tree structure, not just presentation.
    ///
    /// Evaluation and attribute-visibility flags decide which child rows a
    /// value produces, so flipping them discards the tree and rebuilds.
    #[must_use]
    pub const fn requires_recreate(self) -> bool
    {
        matches!(
            self,
            SettingsChange::PropertyEvalAndCalls
                | SettingsChange::BrowsableAttributes
                | SettingsChange::CompilerGeneratedAttributes
        )
    }
}

/// Resolved type-rendering options derived from a settings snapshot.
///
/// Recomputed whenever a relevant flag changes; the presentation layer reads
/// these when it redraws type fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypePrinterOptions
{
    /// Include namespaces in type names.
    pub show_namespaces: bool,
    /// Include metadata tokens.
    pub show_tokens: bool,
    /// Use language keywords for primitives.
    pub show_type_keywords: bool,
    /// Render numbers in decimal (the inverse of hex display).
    pub use_decimal: bool,
    /// Show element counts for array values.
    pub show_array_value_sizes: bool,
}

impl TypePrinterOptions
{
    /// Derive rendering options from a settings snapshot.
    #[must_use]
    pub const fn from_settings(settings: &InspectorSettings) -> Self
    {
        Self {
            show_namespaces: settings.show_namespaces,
            show_tokens: settings.show_tokens,
            show_type_keywords: settings.show_type_keywords,
            use_decimal: !settings.use_hexadecimal,
            show_array_value_sizes: true,
        }
    }
}
