use caws_core::ExplorerContext;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DynamodbCommands;
use crate::output::output;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct DynamodbSearchResponse {
    source: &'static str,
    region: Option<String>,
    group: Option<String>,
}

pub fn handle(action: &DynamodbCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        DynamodbCommands::Search(args) => {
            let context = ExplorerContext::from_parts(args.region.as_deref(), args.group.as_deref())?;
            tracing::debug!(source = context.source(), "resolved dynamodb search context");
            output(&search_response(&context), flags.format)
        }
    }
}

fn search_response(context: &ExplorerContext) -> DynamodbSearchResponse {
    DynamodbSearchResponse {
        source: context.source(),
        region: context.region().map(str::to_string),
        group: context.table_info().map(|(_, group)| group.to_string()),
    }
}
