//! Selection mode reconciler.
//!
//! A small state machine driven by host events and tool-window actions. Every
//! pass retracts the whole annotation set first, then samples the current
//! selection for each enabled display mode and creates one label per sample.

use shared::{
    AnnotateError, AnnotationName, DisplayMode, ElementRef, Granularity, LabelStyle, Precision,
    SampleKind,
};

use crate::annotations::AnnotationSet;
use crate::host::{HostEventKind, ListenerId, SceneHost};
use crate::sampler;
use crate::state::settings::ToolSettings;
use crate::state::toggles::ModeToggles;
use crate::surface::{Advisory, ToolSurface, ToolView};

/// Reconciler phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No geometry or nothing selected: advisory shown, no annotation work
    Idle,
    /// Controls shown, passes run on every trigger
    Active,
    /// Tool window closed, everything torn down
    Closed,
}

/// What asks the reconciler to act
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// Selection changed in the host
    Selection,
    /// Geometry was edited in the host
    Geometry,
    Toggle { mode: DisplayMode, on: bool },
    Precision(Precision),
    /// Re-run the current modes
    Reload,
    /// Remove every annotation without re-creating
    DeleteAll,
    /// Undo the last scene edit, then resync
    Undo,
    /// Rename the live annotation group
    Rename(String),
    /// Tool window closed
    Close,
}

/// Result of one display mode within a pass
#[derive(Debug, Clone, PartialEq)]
pub struct ModeOutcome {
    pub mode: DisplayMode,
    pub created: Vec<AnnotationName>,
    /// Elements that could not be sampled and were skipped
    pub skipped: Vec<(ElementRef, AnnotateError)>,
    /// Set when the whole mode was given up
    pub abandoned: Option<AnnotateError>,
}

impl ModeOutcome {
    fn new(mode: DisplayMode) -> Self {
        Self {
            mode,
            created: Vec::new(),
            skipped: Vec::new(),
            abandoned: None,
        }
    }

    /// Message for the user, if this mode needs one
    pub fn advisory(&self) -> Option<Advisory> {
        match &self.abandoned {
            Some(AnnotateError::InvalidElementKind { expected, .. }) => {
                Some(Advisory::SelectKind(*expected))
            }
            Some(_) => Some(Advisory::NothingPlaced(self.mode)),
            None if self.created.is_empty() && !self.skipped.is_empty() => {
                Some(Advisory::NothingPlaced(self.mode))
            }
            None => None,
        }
    }
}

/// Summary of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassReport {
    /// Annotations removed at the start of the pass
    pub retracted: usize,
    pub modes: Vec<ModeOutcome>,
}

impl PassReport {
    fn retraction(retracted: usize) -> Self {
        Self {
            retracted,
            modes: Vec::new(),
        }
    }

    /// Annotations created by the pass
    pub fn created(&self) -> usize {
        self.modes.iter().map(|m| m.created.len()).sum()
    }

    pub fn skipped(&self) -> usize {
        self.modes.iter().map(|m| m.skipped.len()).sum()
    }

    pub fn outcome(&self, mode: DisplayMode) -> Option<&ModeOutcome> {
        self.modes.iter().find(|m| m.mode == mode)
    }
}

pub struct Reconciler {
    phase: Phase,
    toggles: ModeToggles,
    precision: Precision,
    listeners: Vec<ListenerId>,
    passes: u64,
}

impl Reconciler {
    pub fn new(settings: &ToolSettings) -> Self {
        Self {
            phase: Phase::Idle,
            toggles: ModeToggles::new(settings.toggle_policy),
            precision: settings.precision,
            listeners: Vec::new(),
            passes: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn toggles(&self) -> &ModeToggles {
        &self.toggles
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Number of annotation passes run so far
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Pick the initial phase from the host state
    pub fn start(
        &mut self,
        host: &mut dyn SceneHost,
        annotations: &mut AnnotationSet,
        surface: &mut dyn ToolSurface,
    ) -> Option<PassReport> {
        let report = if Self::ready(host) {
            Some(self.enter_active(host, annotations, surface))
        } else {
            self.enter_idle(host, annotations, surface);
            None
        };
        host.poll_events();
        report
    }

    /// Drain host events; resync once if any of them is ours
    pub fn pump(
        &mut self,
        host: &mut dyn SceneHost,
        annotations: &mut AnnotationSet,
        surface: &mut dyn ToolSurface,
    ) -> Option<PassReport> {
        let events = host.poll_events();
        if self.phase == Phase::Closed {
            return None;
        }
        let ours = events.iter().any(|e| self.listeners.contains(&e.listener));
        if !ours {
            return None;
        }
        let report = self.sync(host, annotations, surface);
        // selection churn from re-selecting owners during the pass
        host.poll_events();
        report
    }

    pub fn handle(
        &mut self,
        trigger: Trigger,
        host: &mut dyn SceneHost,
        annotations: &mut AnnotationSet,
        surface: &mut dyn ToolSurface,
    ) -> Option<PassReport> {
        if self.phase == Phase::Closed {
            return None;
        }
        let report = match trigger {
            Trigger::Selection | Trigger::Geometry => self.sync(host, annotations, surface),
            Trigger::Toggle { mode, on } => {
                if self.toggles.set(mode, on) {
                    self.refresh(host, annotations, surface)
                } else {
                    None
                }
            }
            Trigger::Precision(precision) => {
                if precision != self.precision {
                    self.precision = precision;
                    self.refresh(host, annotations, surface)
                } else {
                    None
                }
            }
            Trigger::Reload => self.refresh(host, annotations, surface),
            Trigger::DeleteAll => Some(PassReport::retraction(annotations.retract_all(host))),
            Trigger::Undo => {
                if !host.undo() {
                    tracing::info!("Nothing to undo");
                }
                self.sync(host, annotations, surface)
            }
            Trigger::Rename(text) => {
                match annotations.rename_all(host, &text) {
                    Ok(names) => tracing::info!("Renamed {} annotations to {text}", names.len()),
                    Err(AnnotateError::NameCollision(_)) => surface.advise(Advisory::NameTaken),
                    Err(AnnotateError::InvalidName(_)) => surface.advise(Advisory::InvalidName),
                    Err(e) => tracing::warn!("Rename stopped: {e}"),
                }
                None
            }
            Trigger::Close => Some(self.close(host, annotations, surface)),
        };
        host.poll_events();
        report
    }

    fn ready(host: &dyn SceneHost) -> bool {
        host.has_geometry() && !host.selection().is_empty()
    }

    /// Move to whichever phase the host state calls for
    fn sync(
        &mut self,
        host: &mut dyn SceneHost,
        annotations: &mut AnnotationSet,
        surface: &mut dyn ToolSurface,
    ) -> Option<PassReport> {
        match (self.phase, Self::ready(host)) {
            (Phase::Idle, true) => Some(self.enter_active(host, annotations, surface)),
            (Phase::Active, false) => Some(self.enter_idle(host, annotations, surface)),
            (Phase::Active, true) => Some(self.reconcile(host, annotations, surface)),
            (Phase::Idle, false) | (Phase::Closed, _) => None,
        }
    }

    fn refresh(
        &mut self,
        host: &mut dyn SceneHost,
        annotations: &mut AnnotationSet,
        surface: &mut dyn ToolSurface,
    ) -> Option<PassReport> {
        match self.phase {
            Phase::Active => Some(self.reconcile(host, annotations, surface)),
            Phase::Idle | Phase::Closed => None,
        }
    }

    fn listen(&mut self, host: &mut dyn SceneHost, kinds: &[HostEventKind]) {
        self.unlisten(host);
        self.listeners = kinds.iter().map(|k| host.subscribe(*k)).collect();
    }

    fn unlisten(&mut self, host: &mut dyn SceneHost) {
        for id in self.listeners.drain(..) {
            host.unsubscribe(id);
        }
    }

    fn enter_idle(
        &mut self,
        host: &mut dyn SceneHost,
        annotations: &mut AnnotationSet,
        surface: &mut dyn ToolSurface,
    ) -> PassReport {
        let retracted = annotations.retract_all(host);
        surface.clear_advisories();
        self.listen(
            host,
            &[HostEventKind::SomethingSelected, HostEventKind::GeometryChanged],
        );
        self.phase = Phase::Idle;
        surface.show_view(ToolView::Idle(Advisory::NoGeometry.to_string()));
        tracing::info!("Waiting for a polygon selection");
        PassReport::retraction(retracted)
    }

    fn enter_active(
        &mut self,
        host: &mut dyn SceneHost,
        annotations: &mut AnnotationSet,
        surface: &mut dyn ToolSurface,
    ) -> PassReport {
        self.listen(
            host,
            &[
                HostEventKind::NothingSelected,
                HostEventKind::SelectionChanged,
                HostEventKind::GeometryChanged,
            ],
        );
        self.phase = Phase::Active;
        surface.show_view(ToolView::Controls);
        tracing::info!("Selection found, annotation controls active");
        self.reconcile(host, annotations, surface)
    }

    fn close(
        &mut self,
        host: &mut dyn SceneHost,
        annotations: &mut AnnotationSet,
        surface: &mut dyn ToolSurface,
    ) -> PassReport {
        let retracted = annotations.retract_all(host);
        surface.clear_advisories();
        self.unlisten(host);
        self.phase = Phase::Closed;
        surface.show_view(ToolView::Closed);
        tracing::info!("Tool closed, listeners released");
        PassReport::retraction(retracted)
    }

    /// One full retract-then-recreate pass
    fn reconcile(
        &mut self,
        host: &mut dyn SceneHost,
        annotations: &mut AnnotationSet,
        surface: &mut dyn ToolSurface,
    ) -> PassReport {
        self.passes += 1;
        surface.clear_advisories();
        let mut report = PassReport::retraction(annotations.retract_all(host));
        let selection = host.selection();
        if selection.is_empty() {
            return report;
        }

        let modes: Vec<DisplayMode> = self.toggles.active_modes().collect();
        for mode in modes {
            let outcome = self.annotate_mode(mode, &selection, host, annotations);
            if let Some(advisory) = outcome.advisory() {
                surface.advise(advisory);
            }
            report.modes.push(outcome);
        }

        if host.selection() != selection {
            host.set_selection(&selection);
        }
        tracing::info!(
            "Pass {}: retracted {}, created {}, skipped {}",
            self.passes,
            report.retracted,
            report.created(),
            report.skipped()
        );
        report
    }

    fn annotate_mode(
        &self,
        mode: DisplayMode,
        selection: &[ElementRef],
        host: &mut dyn SceneHost,
        annotations: &mut AnnotationSet,
    ) -> ModeOutcome {
        let mut outcome = ModeOutcome::new(mode);
        let targets = match targets(mode, selection, host) {
            Ok(targets) => targets,
            Err(e) => {
                tracing::warn!("{} abandoned: {e}", mode.display_name());
                outcome.abandoned = Some(e);
                return outcome;
            }
        };

        for (owner, target) in targets {
            match self.annotate_one(mode, &owner, &target, host, annotations) {
                Ok(name) => outcome.created.push(name),
                Err(e) if e.is_skippable() => {
                    tracing::warn!("Skipping {target}: {e}");
                    outcome.skipped.push((target, e));
                }
                Err(e) => {
                    tracing::warn!("{} abandoned at {target}: {e}", mode.display_name());
                    outcome.abandoned = Some(e);
                    break;
                }
            }
        }
        outcome
    }

    fn annotate_one(
        &self,
        mode: DisplayMode,
        owner: &ElementRef,
        target: &ElementRef,
        host: &mut dyn SceneHost,
        annotations: &mut AnnotationSet,
    ) -> Result<AnnotationName, AnnotateError> {
        let sample = sampler::sample(host, target, mode.sample_kind(), self.precision)?;
        let anchor = match mode.sample_kind() {
            // the normal is the label; the label sits on its vertex
            SampleKind::VertexNormal => {
                let vertex = target.anchor_vertex().unwrap_or_else(|| target.clone());
                self.precision.round3(host.point_position(&vertex)?)
            }
            _ => sample.position,
        };
        let text = match mode.label_style() {
            LabelStyle::Coordinates => sample.label(),
            LabelStyle::ComponentName => target.to_string(),
        };
        annotations.create(host, owner, anchor, &text)
    }
}

/// (owner, target) pairs a mode annotates for the current selection.
/// Whole-object modes walk every component of the first selected object;
/// single-component modes take the selection as is.
fn targets(
    mode: DisplayMode,
    selection: &[ElementRef],
    host: &dyn SceneHost,
) -> Result<Vec<(ElementRef, ElementRef)>, AnnotateError> {
    match mode.granularity() {
        Granularity::WholeObject => {
            let source = selection.first().ok_or(AnnotateError::EmptyElementSet)?;
            let object = source.object_name();
            let kind = mode.sample_kind().required_kind();
            let count = host.count(object, kind)?;
            Ok((0..count)
                .filter_map(|i| ElementRef::component(object, kind, i))
                .map(|target| (source.clone(), target))
                .collect())
        }
        Granularity::SingleComponent => Ok(selection
            .iter()
            .map(|e| (e.clone(), e.clone()))
            .collect()),
    }
}
