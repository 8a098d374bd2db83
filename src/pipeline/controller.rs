//! Render controller: owns host-side preview state.

use std::sync::Arc;

use tracing::{debug, warn};

use super::event::{ObserverId, Observers, PreviewEvent};
use super::state::PipelineState;
use crate::config::{self, Config};
use crate::error::PreviewError;
use crate::fault::{FaultBridge, FaultEntry, RuntimeFaultLog};
use crate::file::{ContentType, VirtualFileSet, parse_generation_response};
use crate::host::{ContextId, FrameDocument, IsolationHost};
use crate::instrument::{has_head, inject_preamble, preamble};
use crate::resolve::resolve_entry;
use crate::resource::{GenerationResources, ResourceMaterializer};
use crate::rewrite::rewrite_references;

/// Host-side owner of the preview.
///
/// Holds the current [`VirtualFileSet`], the pipeline state, the blocking
/// error text and the [`RuntimeFaultLog`]. Every call to
/// [`set_files`](Self::set_files) runs the whole pipeline synchronously:
///
/// 1. release the previous generation's resources
/// 2. clear the fault log
/// 3. resolve → rewrite → instrument → render
///
/// Faults keep arriving through the [`FaultBridge`] after the call returns.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(BlobStore::new());
/// let mut preview = RenderController::new(HeadlessHost::default(), Arc::clone(&store));
///
/// preview.subscribe(|event| println!("{event:?}"));
/// preview.set_files(files);
///
/// match preview.state() {
///     PipelineState::Ready => println!("{}", preview.fault_summary()),
///     PipelineState::Error => eprintln!("{}", preview.error().unwrap_or_default()),
///     _ => {}
/// }
/// ```
pub struct RenderController<H: IsolationHost, M: ResourceMaterializer> {
    config: Config,
    host: H,
    materializer: M,
    files: VirtualFileSet,
    state: PipelineState,
    error: Option<String>,
    generation: u64,
    document: Option<FrameDocument>,
    resources: GenerationResources,
    log: Arc<RuntimeFaultLog>,
    bridge: FaultBridge,
    observers: Observers,
}

impl<H: IsolationHost, M: ResourceMaterializer> RenderController<H, M> {
    /// Create a controller using the global configuration.
    pub fn new(host: H, materializer: M) -> Self {
        Self::with_config(host, materializer, config::get().clone())
    }

    /// Create a controller with an explicit configuration.
    pub fn with_config(host: H, materializer: M, config: Config) -> Self {
        let log = Arc::new(RuntimeFaultLog::new());
        let observers = Observers::new();
        let bridge = FaultBridge::with_observers(Arc::clone(&log), config.stale_faults, observers.clone());
        Self {
            config,
            host,
            materializer,
            files: VirtualFileSet::new(),
            state: PipelineState::Idle,
            error: None,
            generation: 0,
            document: None,
            resources: GenerationResources::new(),
            log,
            bridge,
            observers,
        }
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Register a change observer.
    pub fn subscribe(&self, observer: impl Fn(&PreviewEvent) + Send + Sync + 'static) -> ObserverId {
        self.observers.subscribe(observer)
    }

    /// Remove a change observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Message-delivery entry point to wire into the platform's listener.
    ///
    /// The bridge lives as long as the controller; clones share its state.
    pub fn fault_bridge(&self) -> FaultBridge {
        self.bridge.clone()
    }

    /// Current file set.
    #[inline]
    pub fn files(&self) -> &VirtualFileSet {
        &self.files
    }

    /// Current pipeline state.
    #[inline]
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Blocking error text, set while in [`PipelineState::Error`].
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of render attempts so far.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Document assigned by the last successful render.
    pub fn document(&self) -> Option<&FrameDocument> {
        self.document.as_ref()
    }

    /// Execution context currently accepted by the fault bridge.
    pub fn context(&self) -> Option<ContextId> {
        self.bridge.context()
    }

    /// Shared fault log.
    #[inline]
    pub fn fault_log(&self) -> &Arc<RuntimeFaultLog> {
        &self.log
    }

    /// Fault entries in arrival order.
    pub fn faults(&self) -> Vec<FaultEntry> {
        self.log.snapshot()
    }

    /// `"N runtime errors"` for the header badge.
    pub fn fault_summary(&self) -> String {
        self.log.summary().to_string()
    }

    /// Configuration in effect.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The isolation host.
    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the isolation host.
    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The resource materializer.
    #[inline]
    pub fn materializer(&self) -> &M {
        &self.materializer
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Replace the file set wholesale and re-render.
    ///
    /// An empty set is not rendered: the controller returns to
    /// [`PipelineState::Idle`] with no error.
    pub fn set_files(&mut self, files: VirtualFileSet) -> PipelineState {
        self.files = files;
        self.observers.notify(&PreviewEvent::FilesChanged { count: self.files.len() });
        self.render()
    }

    /// Apply a generation-service response body as the new file set.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Generation`] if the body is unusable. The
    /// current file set and preview are left untouched.
    pub fn apply_generation_response(&mut self, body: &str) -> Result<PipelineState, PreviewError> {
        let files = parse_generation_response(body)?;
        Ok(self.set_files(files))
    }

    /// Replace the content of every file at `path`, then re-render.
    pub fn edit_file(&mut self, path: &str, content: &str) -> PipelineState {
        let files = self.files.with_content(path, content);
        self.set_files(files)
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    fn render(&mut self) -> PipelineState {
        self.transition(PipelineState::Idle);
        self.error = None;

        // The frame must not outlive the resources it points at.
        self.unload();

        if self.files.is_empty() {
            self.resources.release_all(&self.materializer);
            return self.state;
        }

        self.generation += 1;
        self.resources.begin(self.generation, &self.materializer);

        self.transition(PipelineState::Resolving);
        self.log.clear();
        self.observers.notify(&PreviewEvent::FaultsCleared);

        match self.run_pipeline() {
            Ok(document) => {
                self.document = Some(document);
                self.transition(PipelineState::Ready);
            }
            Err(e) => {
                warn!(generation = self.generation, error = %e, "preview pipeline failed");
                self.unload();
                self.error = Some(e.visible_message());
                self.transition(PipelineState::Error);
            }
        }
        self.state
    }

    fn run_pipeline(&mut self) -> Result<FrameDocument, PreviewError> {
        let entry = resolve_entry(&self.files)?;
        let (entry_path, entry_html) = (entry.path.clone(), entry.content.clone());
        debug!(generation = self.generation, entry = %entry_path, "resolved entry document");

        self.transition(PipelineState::Rewriting);
        let rewritten = rewrite_references(&entry_html, &self.files, &self.materializer, &mut self.resources)?;
        debug!(
            substituted = rewritten.substituted().count(),
            unresolved = rewritten.unresolved().count(),
            "rewrote references"
        );

        self.transition(PipelineState::Instrumenting);
        let html = if self.config.instrument {
            if !has_head(&rewritten.html) {
                debug!(entry = %entry_path, "no <head> tag, fault capture not installed");
            }
            let tag = self.config.stale_faults.tags_generation().then_some(self.generation);
            inject_preamble(&rewritten.html, &preamble(tag))
        } else {
            rewritten.html
        };

        self.transition(PipelineState::Rendering);
        let locator = self
            .materializer
            .materialize(&html, ContentType::Markup)
            .map_err(|e| PreviewError::materialize(&entry_path, e.0))?;
        self.resources.track(locator.clone());

        let document = FrameDocument {
            generation: self.generation,
            locator,
            html,
            sandbox: self.config.sandbox.clone(),
        };
        let context = self.host.assign(&document)?;
        self.bridge.attach(context, self.generation);
        debug!(generation = self.generation, %context, sandbox = %document.sandbox, "assigned document");

        Ok(document)
    }

    fn unload(&mut self) {
        self.bridge.detach();
        self.host.clear();
        self.document = None;
    }

    fn transition(&mut self, to: PipelineState) {
        let from = self.state;
        if from == to {
            return;
        }
        if !from.can_transition(to) {
            warn!(%from, %to, "unexpected pipeline transition");
        }
        debug!(%from, %to, "pipeline state");
        self.state = to;
        self.observers.notify(&PreviewEvent::StateChanged { from, to });
    }
}

impl<H: IsolationHost, M: ResourceMaterializer> Drop for RenderController<H, M> {
    fn drop(&mut self) {
        self.unload();
        self.resources.release_all(&self.materializer);
    }
}
