//! Application state module

use std::{fmt, path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};

use crate::domain::{
    dispatcher::MailDispatcher,
    mail::{MailComposer, TemplateRenderer},
    settings::SettingsManagement,
};

/// Global application state
#[derive(Clone)]
pub struct AppState<D, S, R>
where
    D: MailDispatcher,
    S: SettingsManagement,
    R: TemplateRenderer,
{
    /// The time the server started
    pub start_time: DateTime<Utc>,

    /// Mail dispatcher
    pub dispatcher: Arc<D>,

    /// Mail settings service
    pub settings: Arc<S>,

    /// Renders request templates before dispatch
    pub composer: MailComposer<R>,
}

impl<D, S, R> AppState<D, S, R>
where
    D: MailDispatcher,
    S: SettingsManagement,
    R: TemplateRenderer,
{
    /// Create a new application state; inline images are read only from `image_root`
    pub fn new(dispatcher: D, settings: S, renderer: R, image_root: Option<PathBuf>) -> Self {
        Self {
            start_time: Utc::now(),
            dispatcher: Arc::new(dispatcher),
            settings: Arc::new(settings),
            composer: MailComposer::new(Arc::new(renderer), image_root),
        }
    }
}

impl<D, S, R> fmt::Debug for AppState<D, S, R>
where
    D: MailDispatcher,
    S: SettingsManagement,
    R: TemplateRenderer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("start_time", &self.start_time)
            .field("dispatcher", &"MailDispatcher")
            .field("settings", &"SettingsManagement")
            .field("composer", &"MailComposer")
            .finish()
    }
}
