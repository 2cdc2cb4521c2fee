//! Session engine: runs the router and carries out its side effects.

use std::sync::Arc;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::dialogue::NavigationNode;
use crate::localization::t_lang;
use crate::menu;
use crate::router::{self, Effect, Event, Reply};
use crate::sink::ReportSink;

/// Result of handling one event for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub next: NavigationNode,
    pub reply: Option<Reply>,
}

/// Shared, read-only handler state: the catalog and the report sink
pub struct Housekeeper {
    catalog: Arc<Catalog>,
    sink: Arc<dyn ReportSink>,
}

impl Housekeeper {
    pub fn new(catalog: Arc<Catalog>, sink: Arc<dyn ReportSink>) -> Self {
        Self { catalog, sink }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Handle `event` for a session currently at `node`.
    ///
    /// A report is only confirmed once the sink accepted it. If the sink fails,
    /// the session stays on the last form step with every answer kept, and the
    /// user is told to resend the photo or text.
    pub async fn handle(&self, node: &NavigationNode, event: &Event) -> Outcome {
        let transition = router::transition(&self.catalog, node, event);

        match transition.effect {
            Some(Effect::SubmitReport(record)) => match self.sink.append(&record).await {
                Ok(()) => {
                    info!(
                        location = %record.location,
                        sub_location = record.sub_location.as_str(),
                        sink = self.sink.name(),
                        "Problem report stored"
                    );
                    Outcome {
                        next: transition.next,
                        reply: transition.reply,
                    }
                }
                Err(e) => {
                    warn!(
                        location = %record.location,
                        sink = self.sink.name(),
                        error = %e,
                        "Problem report not stored, keeping the form"
                    );
                    let lang = event.lang();
                    Outcome {
                        next: node.clone(),
                        reply: Some(Reply {
                            text: t_lang("problem-report-failed", lang),
                            options: menu::render(&self.catalog, node, lang),
                        }),
                    }
                }
            },
            Some(Effect::CleaningLogged(record)) => {
                info!(
                    location = %record.location,
                    kind = record.kind.as_str(),
                    reporter = %record.reporter.display(),
                    "Cleaning done"
                );
                Outcome {
                    next: transition.next,
                    reply: transition.reply,
                }
            }
            None => Outcome {
                next: transition.next,
                reply: transition.reply,
            },
        }
    }
}
