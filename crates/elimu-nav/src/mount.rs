//! The single node the current view is mounted into.

use crate::view::ViewNode;

/// Holds at most one view subtree.
///
/// Mounting replaces whatever was there, so nodes from a previous view never
/// linger next to the new one.
#[derive(Debug, Clone, Default)]
pub struct MountPoint {
    id: String,
    content: Option<ViewNode>,
    mounts: u64,
}

impl MountPoint {
    /// Empty mount point with a DOM-style id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: None,
            mounts: 0,
        }
    }

    /// Mount point id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Replace the mounted subtree.
    pub fn mount(&mut self, view: ViewNode) {
        self.content = Some(view);
        self.mounts += 1;
    }

    /// Fill the slot `slot` of the mounted view.
    ///
    /// Returns `false` when nothing is mounted or the view has no such slot.
    pub fn fill_slot(&mut self, slot: &str, node: ViewNode) -> bool {
        match self.content.as_mut().and_then(|view| view.slot_mut(slot)) {
            Some(target) => {
                target.replace_children(node);
                true
            }
            None => false,
        }
    }

    /// Currently mounted subtree.
    #[must_use]
    pub fn content(&self) -> Option<&ViewNode> {
        self.content.as_ref()
    }

    /// HTML of the mounted subtree, empty when nothing is mounted.
    #[must_use]
    pub fn html(&self) -> String {
        self.content.as_ref().map(ViewNode::to_html).unwrap_or_default()
    }

    /// How many times a view has been mounted.
    #[must_use]
    pub fn mount_count(&self) -> u64 {
        self.mounts
    }
}
