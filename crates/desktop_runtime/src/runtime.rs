//! Runtime controller owning the window registry and wiring reducer effects to storage, the
//! taskbar, and the presentation adapter.
//!
//! Every operation runs synchronously to completion. Failures never escape: a rejected action is
//! logged and leaves the desktop unchanged.

use crate::{
    config::DesktopConfig,
    drag::DragController,
    file_open::text_window_content,
    host::{DesktopHostContext, HeadlessSurface, WindowSurface},
    model::{DesktopState, PointerPosition, WindowDeclaration, WindowId},
    persistence::WindowStateStorage,
    quick_search::resolve_quick_search,
    reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect},
    taskbar::{AlternatePrompt, Taskbar},
};

/// Owned desktop controller. There is exactly one per desktop and no ambient global.
pub struct DesktopRuntime {
    state: DesktopState,
    drag: DragController,
    taskbar: Taskbar,
    storage: WindowStateStorage,
    surface: Box<dyn WindowSurface>,
}

impl DesktopRuntime {
    pub fn new(
        config: DesktopConfig,
        host: DesktopHostContext,
        surface: Box<dyn WindowSurface>,
    ) -> Self {
        log::debug!("desktop runtime using {} storage", host.strategy_name);
        let storage = WindowStateStorage::new(host.durable, host.session, config.storage_key.clone());
        Self {
            state: DesktopState::new(config),
            drag: DragController::default(),
            taskbar: Taskbar::default(),
            storage,
            surface,
        }
    }

    /// Runtime with in-memory storage and no rendering surface.
    pub fn headless() -> Self {
        Self::new(
            DesktopConfig::default(),
            DesktopHostContext::in_memory(),
            Box::new(HeadlessSurface),
        )
    }

    /// Registers the statically declared windows, restores the saved snapshot onto them, and
    /// renders the taskbar. Returns the ids of the registered windows in declaration order.
    pub fn boot(
        &mut self,
        declarations: impl IntoIterator<Item = WindowDeclaration>,
    ) -> Vec<WindowId> {
        let registered: Vec<WindowId> = declarations
            .into_iter()
            .filter_map(|declaration| self.state.register_static(declaration))
            .collect();

        if let Some(snapshot) = self.storage.load() {
            let applied = self.state.apply_snapshot(&snapshot);
            log::debug!("restored {applied} of {} saved windows", snapshot.len());
        }

        for window in &self.state.windows {
            self.surface.mount(window);
            self.surface.repaint(window);
        }
        self.sync_taskbar();
        registered
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn storage(&self) -> &WindowStateStorage {
        &self.storage
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn active_window_id(&self) -> Option<&WindowId> {
        self.state.active_window_id()
    }

    pub fn open(&mut self, window_id: &WindowId) -> bool {
        self.dispatch(DesktopAction::Open {
            window_id: window_id.clone(),
        })
    }

    pub fn close(&mut self, window_id: &WindowId) -> bool {
        self.dispatch(DesktopAction::Close {
            window_id: window_id.clone(),
        })
    }

    pub fn minimize(&mut self, window_id: &WindowId) -> bool {
        self.dispatch(DesktopAction::Minimize {
            window_id: window_id.clone(),
        })
    }

    pub fn toggle_minimize(&mut self, window_id: &WindowId) -> bool {
        self.dispatch(DesktopAction::ToggleMinimize {
            window_id: window_id.clone(),
        })
    }

    pub fn bring_to_front(&mut self, window_id: &WindowId) -> bool {
        self.dispatch(DesktopAction::BringToFront {
            window_id: window_id.clone(),
        })
    }

    /// Creates a dynamic window and returns its id.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Option<WindowId> {
        self.apply(DesktopAction::Create {
            title: title.into(),
            content: content.into(),
        })
        .into_iter()
        .find_map(|effect| match effect {
            RuntimeEffect::MountWindow(id) => Some(id),
            _ => None,
        })
    }

    /// Opens a picked text file in a new window titled with the file name.
    pub fn open_text_file(&mut self, name: &str, text: &str) -> Option<WindowId> {
        self.create(name, text_window_content(text))
    }

    /// Resolves the quick-search query and brings up the browser window. Returns the URL to
    /// load, or `None` for a blank query.
    pub fn quick_search(&mut self, query: &str) -> Option<String> {
        let url = resolve_quick_search(query)?;
        let browser = WindowId::from(self.state.config.browser_window_id.as_str());
        if !self.open(&browser) {
            log::warn!("quick search resolved to {url} but no browser window is registered");
        }
        Some(url)
    }

    pub fn show_desktop(&mut self) {
        self.dispatch(DesktopAction::ShowDesktop);
    }

    /// Pointer-down on a window title bar.
    pub fn begin_drag(&mut self, window_id: &WindowId, pointer: PointerPosition) -> bool {
        let rendered = self.surface.rendered_position(window_id);
        self.dispatch(DesktopAction::BeginDrag {
            window_id: window_id.clone(),
            pointer,
            rendered,
        })
    }

    pub fn drag_move(&mut self, pointer: PointerPosition) {
        self.dispatch(DesktopAction::UpdateDrag { pointer });
    }

    /// Pointer-up or pointer-cancel.
    pub fn end_drag(&mut self) {
        self.dispatch(DesktopAction::EndDrag);
    }

    /// Flips the persistence flag and immediately re-saves into the newly selected backend.
    pub fn set_persist_enabled(&mut self, enabled: bool) {
        self.storage.set_persist_enabled(enabled);
        self.storage.save(&self.state.snapshot());
    }

    /// Primary click on a taskbar button.
    pub fn taskbar_click(&mut self, window_id: &WindowId) -> bool {
        match self.taskbar.click(window_id) {
            Some(action) => self.dispatch(action),
            None => {
                log::warn!("no taskbar button for window `{window_id}`");
                false
            }
        }
    }

    /// Secondary taskbar action; the caller shows the prompt and reports the user's choice to
    /// [`Self::resolve_alternate`].
    pub fn taskbar_alternate(&self, window_id: &WindowId) -> Option<AlternatePrompt> {
        self.taskbar.alternate_action(window_id)
    }

    pub fn resolve_alternate(&mut self, prompt: AlternatePrompt, confirmed: bool) -> bool {
        self.dispatch(prompt.resolve(confirmed))
    }

    /// Applies `action`, returning whether it was accepted.
    pub fn dispatch(&mut self, action: DesktopAction) -> bool {
        match reduce_desktop(&mut self.state, &mut self.drag, action) {
            Ok(effects) => {
                self.run_effects(&effects);
                true
            }
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }

    fn apply(&mut self, action: DesktopAction) -> Vec<RuntimeEffect> {
        match reduce_desktop(&mut self.state, &mut self.drag, action) {
            Ok(effects) => {
                self.run_effects(&effects);
                effects
            }
            Err(err) => {
                self.report(&err);
                Vec::new()
            }
        }
    }

    fn report(&self, err: &ReducerError) {
        log::warn!("desktop action ignored: {err}");
    }

    fn run_effects(&mut self, effects: &[RuntimeEffect]) {
        let mut persist = false;
        for effect in effects {
            match effect {
                RuntimeEffect::PersistLayout => persist = true,
                RuntimeEffect::MountWindow(id) => {
                    if let Some(window) = self.state.window(id) {
                        self.surface.mount(window);
                    }
                }
                RuntimeEffect::UnmountWindow(id) => self.surface.unmount(id),
                RuntimeEffect::RepaintWindow(id) => {
                    if let Some(window) = self.state.window(id) {
                        self.surface.repaint(window);
                    }
                }
            }
        }
        if persist {
            self.storage.save(&self.state.snapshot());
        }
        self.sync_taskbar();
    }

    fn sync_taskbar(&mut self) {
        self.taskbar.sync(&self.state);
        self.surface.render_taskbar(self.taskbar.buttons());
    }
}

impl std::fmt::Debug for DesktopRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DesktopRuntime")
            .field("state", &self.state)
            .field("drag", &self.drag)
            .field("taskbar", &self.taskbar)
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}
