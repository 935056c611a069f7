//! Navigation outline nodes.

use serde::{Deserialize, Serialize};

use crate::model::DeclarationKind;

fn is_false(value: &bool) -> bool {
    !*value
}

/// One entry of the collapsible outline shown beside a review.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NavigationNode {
    pub label: String,
    /// Definition id the entry navigates to.
    pub id: String,
    pub kind: DeclarationKind,
    #[serde(default)]
    pub children: Vec<NavigationNode>,
    pub visible: bool,
    /// Some descendant is linked to from elsewhere in the document.
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_inner_navigation: bool,
}

impl NavigationNode {
    pub fn new(label: impl Into<String>, id: impl Into<String>, kind: DeclarationKind) -> Self {
        Self {
            label: label.into(),
            id: id.into(),
            kind,
            children: Vec::new(),
            visible: true,
            has_inner_navigation: false,
        }
    }

    /// Find a node by id in this subtree.
    pub fn find(&self, id: &str) -> Option<&NavigationNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Number of nodes in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(NavigationNode::count).sum::<usize>()
    }
}
