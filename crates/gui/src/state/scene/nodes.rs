//! Annotation nodes and unique naming

use shared::ElementRef;

use super::MeshScene;

/// A text label node anchored at a world-space point
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationNode {
    pub anchor: [f64; 3],
    pub text: String,
    /// Element the label points at
    pub target: ElementRef,
}

impl MeshScene {
    fn name_taken(&self, name: &str) -> bool {
        self.nodes.contains_key(name) || self.meshes.iter().any(|m| m.name == name)
    }

    /// `<base><n>` with the smallest free n >= 1
    pub(crate) fn numbered_name(&mut self, base: &str) -> String {
        let start = self.name_hints.get(base).copied().unwrap_or(1);
        let found = (start..).find(|n| !self.name_taken(&format!("{base}{n}")));
        match found {
            Some(n) => {
                self.name_hints.insert(base.to_string(), n);
                format!("{base}{n}")
            }
            None => base.to_string(),
        }
    }

    /// `name` itself if free, otherwise the next numbered variant
    pub(crate) fn unique_name(&mut self, name: &str) -> String {
        if self.name_taken(name) {
            self.numbered_name(name)
        } else {
            name.to_string()
        }
    }

    pub(crate) fn insert_node(&mut self, name: String, node: AnnotationNode) {
        self.nodes.insert(name, node);
    }

    pub(crate) fn remove_node(&mut self, name: &str) -> Option<AnnotationNode> {
        let node = self.nodes.remove(name)?;
        self.free_suffix(name);
        Some(node)
    }

    /// Lower the hint of every base `name` could have been numbered from
    fn free_suffix(&mut self, name: &str) {
        let digits = name.bytes().rev().take_while(u8::is_ascii_digit).count();
        for split in name.len() - digits..name.len() {
            let (base, suffix) = name.split_at(split);
            if suffix.starts_with('0') {
                continue;
            }
            let Ok(n) = suffix.parse::<usize>() else {
                continue;
            };
            if let Some(hint) = self.name_hints.get_mut(base) {
                *hint = (*hint).min(n);
            }
        }
    }
}
