//! Events command.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use keptn_api::EventFilter;
use keptn_models::{EventKind, EventType, KeptnContextExtendedCe};
use tabled::Tabled;
use tracing::debug;

use crate::output::{print_info, print_output};

use super::CommandContext;

/// Events command.
#[derive(Debug, Args)]
pub struct EventsCommand {
    #[command(subcommand)]
    command: EventsSubcommand,
}

#[derive(Debug, Subcommand)]
enum EventsSubcommand {
    /// List events matching a filter, following all pages.
    List(EventsListArgs),
}

#[derive(Debug, Args)]
struct EventsListArgs {
    #[arg(long)]
    project: Option<String>,

    #[arg(long)]
    stage: Option<String>,

    #[arg(long)]
    service: Option<String>,

    /// Filter by full event type name.
    #[arg(long = "type", conflicts_with = "task")]
    event_type: Option<String>,

    /// Filter by task name; combine with --kind.
    #[arg(long, requires = "kind")]
    task: Option<String>,

    /// Task phase used with --task.
    #[arg(long, value_enum)]
    kind: Option<KindArg>,

    /// Filter by Keptn context.
    #[arg(long = "context")]
    keptn_context: Option<String>,

    #[arg(long)]
    event_id: Option<String>,

    /// Events per page requested from the datastore.
    #[arg(long)]
    page_size: Option<u32>,

    /// Stop after this many pages (0 fetches all).
    #[arg(long, default_value = "0")]
    pages: u32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Triggered,
    Started,
    StatusChanged,
    Finished,
}

impl From<KindArg> for EventKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Triggered => EventKind::Triggered,
            KindArg::Started => EventKind::Started,
            KindArg::StatusChanged => EventKind::StatusChanged,
            KindArg::Finished => EventKind::Finished,
        }
    }
}

impl EventsListArgs {
    fn filter(&self) -> EventFilter {
        let event_type = self.event_type.clone().or_else(|| {
            self.task
                .as_ref()
                .zip(self.kind)
                .map(|(task, kind)| EventType::new(task.clone(), kind.into()).to_string())
        });

        EventFilter {
            project: self.project.clone(),
            stage: self.stage.clone(),
            service: self.service.clone(),
            event_type,
            keptn_context: self.keptn_context.clone(),
            event_id: self.event_id.clone(),
            page_size: self.page_size,
            number_of_pages: Some(self.pages),
        }
    }
}

#[derive(Debug, Clone, Tabled)]
struct EventRow {
    #[tabled(rename = "ID")]
    id: String,

    #[tabled(rename = "Time")]
    time: String,

    #[tabled(rename = "Type")]
    event_type: String,

    #[tabled(rename = "Context")]
    context: String,

    #[tabled(rename = "Source")]
    source: String,
}

impl From<&KeptnContextExtendedCe> for EventRow {
    fn from(event: &KeptnContextExtendedCe) -> Self {
        Self {
            id: display_option(event.id.as_deref()),
            time: event
                .time
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "-".to_string()),
            event_type: display_option(Some(event.event_type.as_str())),
            context: display_option(event.shkeptncontext.as_deref()),
            source: display_option(Some(event.source.as_str())),
        }
    }
}

fn display_option(opt: Option<&str>) -> String {
    opt.filter(|s| !s.is_empty()).unwrap_or("-").to_string()
}

impl EventsCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            EventsSubcommand::List(args) => list_events(ctx, args).await,
        }
    }
}

async fn list_events(ctx: CommandContext, args: EventsListArgs) -> Result<()> {
    let handler = ctx.handler()?;
    let filter = args.filter();
    debug!(?filter, "Listing events");

    let events = handler.get_events(&filter).await?;

    if filter.page_cap().is_some() {
        print_info(&format!(
            "Fetched at most {} page(s); more events may exist.",
            args.pages
        ));
    }

    let rows: Vec<EventRow> = events.iter().map(EventRow::from).collect();
    print_output(&rows, &events, ctx.format);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        args: EventsListArgs,
    }

    fn parse(argv: &[&str]) -> EventsListArgs {
        let mut full = vec!["test"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    #[test]
    fn test_filter_from_flags() {
        let filter = parse(&["--project", "sockshop", "--context", "ctx-1", "--pages", "2"]).filter();
        assert_eq!(filter.project.as_deref(), Some("sockshop"));
        assert_eq!(filter.keptn_context.as_deref(), Some("ctx-1"));
        assert_eq!(filter.page_cap(), Some(2));
        assert!(filter.stage.is_none());
    }

    #[test]
    fn test_task_and_kind_build_type() {
        let filter = parse(&["--task", "deployment", "--kind", "status-changed"]).filter();
        assert_eq!(
            filter.event_type.as_deref(),
            Some("sh.keptn.event.deployment.status.changed")
        );
    }

    #[test]
    fn test_task_requires_kind() {
        assert!(TestCli::try_parse_from(["test", "--task", "deployment"]).is_err());
    }

    #[test]
    fn test_default_pages_is_unbounded() {
        assert_eq!(parse(&[]).filter().page_cap(), None);
    }

    #[test]
    fn test_event_row() {
        let mut event = KeptnContextExtendedCe::new("sh.keptn.event.deployment.started", "helm");
        event.id = Some("evt-1".to_string());
        let row = EventRow::from(&event);
        assert_eq!(row.id, "evt-1");
        assert_eq!(row.time, "-");
        assert_eq!(row.context, "-");
        assert_eq!(row.source, "helm");
    }

    #[test]
    fn test_event_row_without_source_or_type() {
        let event = KeptnContextExtendedCe::new("", "");
        let row = EventRow::from(&event);
        assert_eq!(row.event_type, "-");
        assert_eq!(row.source, "-");
    }
}
