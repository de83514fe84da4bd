//! Operator diagnostics.

use tracing::warn;

use crate::host::Host;

/// Players allowed to see server diagnostics in chat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operators {
    names: Vec<String>,
}

impl Operators {
    #[must_use]
    pub const fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Log `message` and send it to every connected operator.
    pub fn warn<H: Host + ?Sized>(&self, host: &mut H, message: &str) {
        warn!("{message}");

        let recipients: Vec<_> = host
            .players()
            .into_iter()
            .filter(|&player| host.name(player).is_some_and(|name| self.contains(name)))
            .collect();

        let text = format!("§c[FFA] {message}");
        for player in recipients {
            host.send_message(player, &text);
        }
    }
}
