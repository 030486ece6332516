//! Annotation set manager.
//!
//! Owns the live labels and the set of tracked (renamed) node names. A pass
//! always goes through [`AnnotationSet::retract_all`] before creating new
//! labels, so at most one label set is live at a time.

use std::collections::BTreeSet;

use shared::{AnnotateError, Annotation, AnnotationName, ElementRef};

use crate::host::SceneHost;

pub const DEFAULT_PREFIX: &str = "annotation";

#[derive(Debug, Clone)]
pub struct AnnotationSet {
    /// Name prefix shared by every annotation this set creates
    prefix: String,
    /// Names that no longer carry the prefix but still belong to us
    tracked: BTreeSet<AnnotationName>,
    live: Vec<Annotation>,
}

impl Default for AnnotationSet {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl AnnotationSet {
    pub fn new(prefix: &str) -> Self {
        let prefix = match prefix.trim() {
            "" => DEFAULT_PREFIX,
            p => p,
        };
        Self {
            prefix: prefix.to_string(),
            tracked: BTreeSet::new(),
            live: Vec::new(),
        }
    }

    pub fn live(&self) -> &[Annotation] {
        &self.live
    }

    #[cfg(test)]
    pub(crate) fn tracked(&self) -> &BTreeSet<AnnotationName> {
        &self.tracked
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Place a label at `anchor` and re-select `owner` so the user's selection
    /// context survives the annotation burst.
    pub fn create(
        &mut self,
        host: &mut dyn SceneHost,
        owner: &ElementRef,
        anchor: [f64; 3],
        text: &str,
    ) -> Result<AnnotationName, AnnotateError> {
        let name = host.create_annotation(&self.prefix, anchor, text, owner)?;
        host.select(owner);
        tracing::debug!("Annotated {owner} as {name}: {text}");
        self.live.push(Annotation {
            name: name.clone(),
            owner: owner.clone(),
            anchor,
            label: text.to_string(),
        });
        Ok(name)
    }

    /// Delete every annotation node carrying the prefix, every tracked name and
    /// every live name. Names that are already gone are not an error.
    /// Returns how many nodes were actually removed.
    pub fn retract_all(&mut self, host: &mut dyn SceneHost) -> usize {
        let mut doomed: BTreeSet<AnnotationName> = host
            .annotation_names()
            .into_iter()
            .filter(|n| n.starts_with(&self.prefix))
            .collect();
        doomed.extend(self.tracked.iter().cloned());
        doomed.extend(self.live.iter().map(|a| a.name.clone()));

        let removed = doomed.iter().filter(|name| host.delete_node(name)).count();
        if removed > 0 {
            tracing::debug!("Retracted {removed} annotations");
        }
        self.live.clear();
        self.tracked.clear();
        removed
    }

    /// Rename one annotation node. Old and new names are tracked so the next
    /// retraction removes it even though the prefix no longer matches.
    pub fn rename(
        &mut self,
        host: &mut dyn SceneHost,
        name: &str,
        new_text: &str,
    ) -> Result<AnnotationName, AnnotateError> {
        let index = self.live.iter().position(|a| a.name == name);
        self.rename_node(host, name, index, new_text)
    }

    /// Rename every live annotation as a group. Stops at the first rejection;
    /// annotations renamed before it keep their new names.
    pub fn rename_all(
        &mut self,
        host: &mut dyn SceneHost,
        new_text: &str,
    ) -> Result<Vec<AnnotationName>, AnnotateError> {
        (0..self.live.len())
            .map(|i| {
                let name = self.live[i].name.clone();
                self.rename_node(host, &name, Some(i), new_text)
            })
            .collect()
    }

    fn rename_node(
        &mut self,
        host: &mut dyn SceneHost,
        name: &str,
        index: Option<usize>,
        new_text: &str,
    ) -> Result<AnnotationName, AnnotateError> {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return Err(AnnotateError::InvalidName(new_text.to_string()));
        }
        if host.is_geometry_name(new_text) {
            return Err(AnnotateError::NameCollision(new_text.to_string()));
        }
        let assigned = host.rename_node(name, new_text)?;
        self.tracked.insert(name.to_string());
        self.tracked.insert(assigned.clone());
        if let Some(annotation) = index.and_then(|i| self.live.get_mut(i)) {
            annotation.name = assigned.clone();
        }
        tracing::debug!("Renamed annotation {name} to {assigned}");
        Ok(assigned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::state::scene::MeshScene;

    fn scene() -> MeshScene {
        MeshScene::new(vec![fixtures::unit_cube("cube")])
    }

    fn annotate(set: &mut AnnotationSet, host: &mut MeshScene, n: usize) {
        for i in 0..n {
            let owner = ElementRef::vertex("cube", i);
            set.create(host, &owner, [i as f64, 0.0, 0.0], "label").unwrap();
        }
    }

    #[test]
    fn test_create_names_with_prefix_and_reselects_owner() {
        let mut host = scene();
        let mut set = AnnotationSet::default();
        let owner = ElementRef::face("cube", 3);
        let name = set.create(&mut host, &owner, [0.5; 3], "x").unwrap();
        assert_eq!(name, "annotation1");
        assert_eq!(host.selection(), vec![owner.clone()]);
        assert_eq!(set.live()[0].owner, owner);
        assert_eq!(host.nodes()["annotation1"].text, "x");
    }

    #[test]
    fn test_create_on_missing_target_is_stale() {
        let mut host = scene();
        let mut set = AnnotationSet::default();
        let err = set
            .create(&mut host, &ElementRef::vertex("ghost", 0), [0.0; 3], "x")
            .unwrap_err();
        assert!(matches!(err, AnnotateError::StaleReference(_)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_retract_all_is_idempotent() {
        let mut host = scene();
        let mut set = AnnotationSet::default();
        annotate(&mut set, &mut host, 3);
        assert_eq!(set.retract_all(&mut host), 3);
        assert_eq!(set.retract_all(&mut host), 0);
        assert!(host.nodes().is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn test_retract_tolerates_nodes_already_gone() {
        let mut host = scene();
        let mut set = AnnotationSet::default();
        annotate(&mut set, &mut host, 2);
        assert!(host.delete_node("annotation1"));
        assert_eq!(set.retract_all(&mut host), 1);
    }

    #[test]
    fn test_retract_sweeps_foreign_prefixed_nodes() {
        let mut host = scene();
        let cube = ElementRef::object("cube");
        host.create_annotation("annotation", [0.0; 3], "stray", &cube).unwrap();
        host.create_annotation("note", [0.0; 3], "keep", &cube).unwrap();
        let mut set = AnnotationSet::default();
        assert_eq!(set.retract_all(&mut host), 1);
        assert_eq!(host.annotation_names(), vec!["note1".to_string()]);
    }

    #[test]
    fn test_renamed_group_is_still_retracted() {
        let mut host = scene();
        let mut set = AnnotationSet::default();
        annotate(&mut set, &mut host, 2);
        let renamed = set.rename(&mut host, "annotation1", "MyLabel").unwrap();
        assert_eq!(renamed, "MyLabel");
        assert!(set.tracked().contains("MyLabel"));
        assert!(set.tracked().contains("annotation1"));

        assert_eq!(set.retract_all(&mut host), 2);
        assert!(host.nodes().is_empty());
    }

    #[test]
    fn test_rename_all_numbers_duplicates() {
        let mut host = scene();
        let mut set = AnnotationSet::default();
        annotate(&mut set, &mut host, 3);
        let names = set.rename_all(&mut host, "MyLabel").unwrap();
        assert_eq!(names, vec!["MyLabel", "MyLabel1", "MyLabel2"]);
        assert_eq!(set.live()[1].name, "MyLabel1");
        assert_eq!(set.retract_all(&mut host), 3);
    }

    #[test]
    fn test_rename_collision_keeps_name() {
        let mut host = scene();
        let mut set = AnnotationSet::default();
        annotate(&mut set, &mut host, 1);
        let err = set.rename(&mut host, "annotation1", "cube").unwrap_err();
        assert_eq!(err, AnnotateError::NameCollision("cube".to_string()));
        assert!(host.nodes().contains_key("annotation1"));
        assert_eq!(set.live()[0].name, "annotation1");
    }

    #[test]
    fn test_rename_blank_rejected() {
        let mut host = scene();
        let mut set = AnnotationSet::default();
        annotate(&mut set, &mut host, 1);
        assert!(matches!(
            set.rename(&mut host, "annotation1", "   "),
            Err(AnnotateError::InvalidName(_))
        ));
    }
}
