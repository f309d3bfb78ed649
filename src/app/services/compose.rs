use std::time::Duration;

use super::debounce::{Debouncer, Ticket};
use crate::app::domain::source::{Pane, SourceSet};

/// Build the preview document from the three sources.
///
/// Sources are embedded verbatim. A script containing `</script>` (or a style
/// containing `</style>`) closes its region early; that is left as is.
pub fn compose_preview(html: &str, css: &str, js: &str) -> String {
    format!(
        "\n<html>\n  <body>{html}</body>\n  <style>{css}</style>\n  \
         <script>{js}</script>\n</html>\n"
    )
}

pub fn compose_sources(sources: &SourceSet) -> String {
    compose_preview(&sources.html, &sources.css, &sources.js)
}

/// Outcome of a pane's settle timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// A newer edit superseded this timer.
    Stale,
    /// The pane settled on the text it already had.
    Unchanged,
    /// The pane settled on new text; schedule `ComposeDue` with this ticket.
    Changed(Ticket),
}

/// The automatic compose path: one debouncer per pane, then a second
/// coalescing stage so panes that settle close together compose once.
pub struct ComposePipeline {
    panes: [Debouncer<String>; 3],
    stage: Debouncer<()>,
}

impl ComposePipeline {
    pub fn new(initial: &SourceSet, settle: Duration, coalesce: Duration) -> Self {
        Self {
            panes: Pane::ALL.map(|pane| Debouncer::new(initial.get(pane).to_string(), settle)),
            stage: Debouncer::new((), coalesce),
        }
    }

    pub fn settle_delay(&self) -> Duration {
        self.panes[0].interval()
    }

    pub fn compose_delay(&self) -> Duration {
        self.stage.interval()
    }

    /// Record live text for a pane. Schedule `SourceSettled(pane, ticket)` after
    /// [`Self::settle_delay`].
    pub fn edit(&mut self, pane: Pane, text: String) -> Ticket {
        self.panes[pane.index()].push(text)
    }

    pub fn settle(&mut self, pane: Pane, ticket: Ticket) -> Settled {
        let debouncer = &mut self.panes[pane.index()];
        match debouncer.fire(ticket) {
            None => Settled::Stale,
            Some(previous) if previous == *debouncer.settled() => Settled::Unchanged,
            Some(_) => Settled::Changed(self.stage.push(())),
        }
    }

    /// Ask for a compose of the current settled values, e.g. at startup.
    pub fn request_compose(&mut self) -> Ticket {
        self.stage.push(())
    }

    /// Drop any compose still waiting on its timer, e.g. when a manual refresh
    /// has already published newer text.
    pub fn cancel_compose(&mut self) {
        self.stage.cancel();
    }

    /// Compose from the settled values if `ticket` is the latest compose request.
    pub fn compose_due(&mut self, ticket: Ticket) -> Option<String> {
        self.stage.fire(ticket)?;
        Some(compose_preview(
            self.settled(Pane::Html),
            self.settled(Pane::Css),
            self.settled(Pane::Js),
        ))
    }

    pub fn settled(&self, pane: Pane) -> &str {
        self.panes[pane.index()].settled()
    }

    pub fn is_pending(&self, pane: Pane) -> bool {
        self.panes[pane.index()].is_pending()
    }
}
