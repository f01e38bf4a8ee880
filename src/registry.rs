//! Ordered catalog of dialog adapters
//!
//! Order is priority: richer GUI pickers come before terminal fallbacks, and
//! the orchestrator always takes the first adapter whose probe succeeds.

use std::fmt;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::adapter::{DialogAdapter, GtkPicker, Kdialog, Launcher, Osascript};

#[derive(Clone, Default)]
pub struct Registry {
    adapters: Vec<Arc<dyn DialogAdapter>>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl Registry {
    pub fn new(adapters: Vec<Arc<dyn DialogAdapter>>) -> Self {
        Self { adapters }
    }

    /// Every supported picker, in priority order
    pub fn builtin() -> Self {
        Self::new(vec![
            Arc::new(GtkPicker::zenity()),
            Arc::new(Kdialog),
            Arc::new(GtkPicker::yad()),
            Arc::new(GtkPicker::qarma()),
            Arc::new(GtkPicker::matedialog()),
            Arc::new(Osascript),
            Arc::new(Launcher::rofi()),
            Arc::new(Launcher::fzf()),
            Arc::new(Launcher::dmenu()),
        ])
    }

    /// Append an adapter with the lowest priority
    pub fn push(&mut self, adapter: impl DialogAdapter + 'static) {
        self.adapters.push(Arc::new(adapter));
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.adapters.iter().map(|a| a.name().to_string()).collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn DialogAdapter>> {
        self.adapters.iter().find(|a| a.name() == name).cloned()
    }

    /// Move the named adapter to the front. Returns false if it is unknown.
    pub fn prioritize(&mut self, name: &str) -> bool {
        match self.adapters.iter().position(|a| a.name() == name) {
            Some(index) => {
                let adapter = self.adapters.remove(index);
                self.adapters.insert(0, adapter);
                true
            }
            None => false,
        }
    }

    /// First adapter whose probe succeeds
    pub fn select(&self) -> Option<Arc<dyn DialogAdapter>> {
        let selected = self.adapters.iter().find(|a| a.probe()).cloned();
        if let Some(adapter) = &selected {
            debug!("Selected dialog tool: {}", adapter.name());
        }
        selected
    }

    /// [`select`](Self::select) on a blocking worker, keeping PATH lookups
    /// off the async executor
    pub async fn first_available(&self) -> Option<Arc<dyn DialogAdapter>> {
        let registry = self.clone();
        match tokio::task::spawn_blocking(move || registry.select()).await {
            Ok(selected) => selected,
            Err(e) => {
                warn!("Tool selection failed: {}", e);
                None
            }
        }
    }

    /// Names of every adapter whose probe succeeds, in registry order.
    ///
    /// Probes run concurrently on blocking workers since each one may touch
    /// the filesystem.
    pub async fn available(&self) -> Vec<String> {
        let probes = self.adapters.iter().map(|adapter| {
            let adapter = Arc::clone(adapter);
            tokio::task::spawn_blocking(move || adapter.probe())
        });
        let results = join_all(probes).await;

        self.adapters
            .iter()
            .zip(results)
            .filter_map(|(adapter, result)| match result {
                Ok(true) => Some(adapter.name().to_string()),
                Ok(false) => None,
                Err(e) => {
                    warn!("Probe for {} failed: {}", adapter.name(), e);
                    None
                }
            })
            .collect()
    }
}
