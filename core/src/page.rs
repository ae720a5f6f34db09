//! Page context shared by every widget

use std::rc::Rc;

use tickdown_types::WidgetConfig;

use crate::scheduler::Scheduler;
use crate::target::Document;

/// Capabilities of one document instance: element lookup, host timers and
/// widget configuration.
///
/// Cheap to clone; widgets keep their own copy.
#[derive(Clone)]
pub struct Page {
    document: Rc<dyn Document>,
    scheduler: Rc<dyn Scheduler>,
    config: Rc<WidgetConfig>,
}

impl Page {
    /// Create a page context with the default widget configuration
    pub fn new(document: Rc<dyn Document>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self::with_config(document, scheduler, WidgetConfig::default())
    }

    pub fn with_config(
        document: Rc<dyn Document>,
        scheduler: Rc<dyn Scheduler>,
        config: WidgetConfig,
    ) -> Self {
        Self {
            document,
            scheduler,
            config: Rc::new(config),
        }
    }

    pub fn document(&self) -> &dyn Document {
        self.document.as_ref()
    }

    pub fn scheduler(&self) -> &dyn Scheduler {
        self.scheduler.as_ref()
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
