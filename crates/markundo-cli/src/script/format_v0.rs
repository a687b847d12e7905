//! Script Format v0 schema
//!
//! Defines the YAML structure of a replay script

use serde::{Deserialize, Serialize};

/// Top-level script file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Top-level element of the initial document
    pub document: ScriptElement,

    /// Editing steps, applied in order after the engine attaches
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<ScriptStep>,
}

/// Element definition with its attributes, text and nested elements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScriptElement {
    pub name: String,

    /// Attributes in document order
    #[serde(default)]
    pub attributes: Vec<ScriptAttribute>,

    /// Text content, placed before any child element
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub children: Vec<ScriptElement>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScriptAttribute {
    pub name: String,
    pub value: String,
}

/// One editing step
///
/// Unit steps are written as a bare word (`- undo`), the others as a
/// single-key map (`- set: {path: Wix/Product, attribute: Id, value: Bar}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStep {
    /// Open a new transaction
    Begin,

    /// Insert a new element or text node under `parent`
    ///
    /// Without `first` or `after` the node is appended.
    Insert {
        parent: String,
        #[serde(default)]
        element: Option<ScriptElement>,
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        first: bool,
        /// Sibling path, relative to `parent`, to insert after
        #[serde(default)]
        after: Option<String>,
    },

    /// Remove an element, or one of its attributes
    Remove {
        path: String,
        #[serde(default)]
        attribute: Option<String>,
    },

    /// Set an attribute value, or the element's text when no attribute is named
    Set {
        path: String,
        #[serde(default)]
        attribute: Option<String>,
        value: String,
    },

    Undo,
    Redo,
    Clear,

    /// Undo transactions until `to` remain
    Rollback { to: usize },
}
