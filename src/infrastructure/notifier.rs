use log::warn;

use crate::errors::{Notice, Notifier};

/// Delivers notices through the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        warn!("{notice}");
    }
}
