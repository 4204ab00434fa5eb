//! In-memory fake for the window manager

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use brewpos_notify::{NotifyError, Result, WindowId, WindowManager, WindowMessage};

/// A [`WindowManager`] over an in-memory window list
///
/// Records every focus, post, and open call so tests can assert the
/// focus-existing-or-open-new click semantics.
#[derive(Clone, Default)]
pub struct FakeWindowManager {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    open: Vec<WindowId>,
    next_id: u64,
    focused: Vec<WindowId>,
    posted: Vec<(WindowId, WindowMessage)>,
    opened_urls: Vec<String>,
}

impl FakeWindowManager {
    /// Create a manager with no open windows
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a window that was already open before the test began
    pub fn open_existing(&self) -> WindowId {
        let mut state = self.state.lock().unwrap();
        let id = WindowId(state.next_id);
        state.next_id += 1;
        state.open.push(id);
        id
    }

    /// Windows focused so far, in call order
    pub fn focused(&self) -> Vec<WindowId> {
        self.state.lock().unwrap().focused.clone()
    }

    /// Messages posted so far, with their target windows
    pub fn posted(&self) -> Vec<(WindowId, WindowMessage)> {
        self.state.lock().unwrap().posted.clone()
    }

    /// Urls passed to `open` so far
    pub fn opened_urls(&self) -> Vec<String> {
        self.state.lock().unwrap().opened_urls.clone()
    }
}

#[async_trait]
impl WindowManager for FakeWindowManager {
    async fn open_windows(&self) -> Vec<WindowId> {
        self.state.lock().unwrap().open.clone()
    }

    async fn focus(&self, window: WindowId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.open.contains(&window) {
            return Err(NotifyError::window_failed(format!(
                "no such window: {window:?}"
            )));
        }
        state.focused.push(window);
        Ok(())
    }

    async fn post(&self, window: WindowId, message: &WindowMessage) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.open.contains(&window) {
            return Err(NotifyError::window_failed(format!(
                "no such window: {window:?}"
            )));
        }
        state.posted.push((window, message.clone()));
        Ok(())
    }

    async fn open(&self, url: &str) -> Result<WindowId> {
        let mut state = self.state.lock().unwrap();
        let id = WindowId(state.next_id);
        state.next_id += 1;
        state.open.push(id);
        state.opened_urls.push(url.to_string());
        Ok(id)
    }
}
