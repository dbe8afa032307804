mod config;
mod render;

use std::{num::NonZeroUsize, path::PathBuf, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    CallOutcome, ControllerOptions, HttpResourceClient, LoadOutcome, PaginationMode, QueryChange,
    RemoteResourceController, ResourceApi, Session, UiError,
};
use serde_json::Value;
use shared::{
    domain::{Filter, Record},
    protocol::{SortDirection, SortSpec},
    records::{Customer, Employee, Media, Template, User},
};
use tracing_subscriber::EnvFilter;

use crate::config::{load_settings, Settings};

#[derive(Parser, Debug)]
#[command(name = "admin", about = "Manage admin console records from the terminal")]
struct Cli {
    /// Config file; defaults to ./admin.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true)]
    token: Option<String>,
    #[arg(long, global = true)]
    page_size: Option<NonZeroUsize>,
    /// Let the backend filter and paginate.
    #[arg(long, global = true)]
    server_pagination: bool,
    #[command(subcommand)]
    resource: Resource,
}

#[derive(Subcommand, Debug)]
enum Resource {
    Employees(ResourceArgs),
    Customers(ResourceArgs),
    Templates(ResourceArgs),
    Users(ResourceArgs),
    Media(ResourceArgs),
}

#[derive(Args, Debug)]
struct ResourceArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of records.
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long, default_value = "all")]
        status: String,
        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// `field` or `field,asc|desc`.
        #[arg(long, value_parser = parse_sort)]
        sort: Option<SortSpec>,
    },
    Stats,
    Show {
        id: String,
    },
    /// Create a record from a JSON object of draft fields.
    Create {
        #[arg(long)]
        json: String,
    },
    /// Merge a JSON object of fields into an existing record and save it.
    Update {
        id: String,
        #[arg(long)]
        json: String,
    },
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(v) = cli.api_url {
        settings.api_url = v;
    }
    if let Some(v) = cli.token {
        settings.token = Some(v);
    }
    if let Some(v) = cli.page_size {
        settings.page_size = v;
    }
    if cli.server_pagination {
        settings.pagination = PaginationMode::Server;
    }

    let client = Arc::new(
        HttpResourceClient::new(&settings.api_url)
            .with_context(|| format!("invalid api url '{}'", settings.api_url))?,
    );
    let session = Session::with_token(settings.token.clone().unwrap_or_default());

    match cli.resource {
        Resource::Employees(args) => run::<Employee>(client, session, &settings, args.command).await,
        Resource::Customers(args) => run::<Customer>(client, session, &settings, args.command).await,
        Resource::Templates(args) => run::<Template>(client, session, &settings, args.command).await,
        Resource::Users(args) => run::<User>(client, session, &settings, args.command).await,
        Resource::Media(args) => run::<Media>(client, session, &settings, args.command).await,
    }
}

async fn run<R: Record>(
    api: Arc<HttpResourceClient>,
    session: Session,
    settings: &Settings,
    command: Command,
) -> Result<()> {
    let api: Arc<dyn ResourceApi<R>> = api;
    // Lookups by id need the whole collection, whatever the configured mode.
    let pagination = match command {
        Command::List { .. } => settings.pagination,
        _ => PaginationMode::Client,
    };
    let controller = RemoteResourceController::with_options(
        api,
        session,
        ControllerOptions {
            pagination,
            page_size: settings.page_size,
            ..ControllerOptions::default()
        },
    );

    match command {
        Command::List {
            search,
            category,
            status,
            page,
            sort,
        } => {
            let category: Filter<R::Category> = category
                .parse()
                .with_context(|| format!("invalid --category for {}", R::KIND))?;
            let status: Filter<R::Status> = status
                .parse()
                .with_context(|| format!("invalid --status for {}", R::KIND))?;
            let change = controller
                .update_query(|query, _| {
                    query.set_search_text(&search);
                    query.set_category_filter(category);
                    query.set_status_filter(status);
                    query.set_sort(sort);
                })
                .await;
            match change {
                QueryChange::Reloaded(outcome) => expect_loaded(outcome)?,
                _ => expect_loaded(controller.load_list().await)?,
            }
            // The page count is only known once the first page is in.
            let paged = controller.set_page(page.saturating_sub(1)).await;
            if let QueryChange::Reloaded(outcome) = paged {
                expect_loaded(outcome)?;
            }
            print!("{}", render::list_page(&controller.view().await));
        }
        Command::Stats => {
            let stats = expect_done(controller.load_stats().await)?;
            print!("{}", render::stats(&stats));
        }
        Command::Show { id } => {
            open_by_id(&controller, &id).await?;
            let view = controller.view().await;
            let record = view
                .modal
                .record()
                .ok_or_else(|| anyhow!("{id} is not open"))?;
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        Command::Create { json } => {
            let patch = parse_patch(&json)?;
            controller.open_create().await?;
            let mut merged = Ok(());
            controller
                .update_create_draft(|draft| merged = merge_into(draft, &patch))
                .await?;
            merged?;
            let created = expect_done(controller.submit_create().await?)?;
            println!("created {} {}", R::KIND.singular(), created.id());
        }
        Command::Update { id, json } => {
            let patch = parse_patch(&json)?;
            open_by_id(&controller, &id).await?;
            controller.edit_selected().await?;
            let mut merged = Ok(());
            controller
                .update_draft(|draft| merged = merge_into(draft, &patch))
                .await?;
            merged?;
            let updated = expect_done(controller.save_edit().await?)?;
            println!("updated {} {}", R::KIND.singular(), updated.id());
        }
        Command::Delete { id, yes } => {
            open_by_id(&controller, &id).await?;
            controller.request_delete().await?;
            if !yes {
                controller.cancel().await?;
                bail!("refusing to delete {} {id} without --yes", R::KIND.singular());
            }
            expect_done(controller.confirm_delete().await?)?;
            println!("deleted {} {id}", R::KIND.singular());
        }
    }
    Ok(())
}

async fn open_by_id<R: Record>(controller: &RemoteResourceController<R>, id: &str) -> Result<()> {
    expect_loaded(controller.load_list().await)?;
    let record_id = controller
        .view()
        .await
        .records
        .iter()
        .map(|record| record.id().clone())
        .find(|record_id| record_id.to_string() == id)
        .ok_or_else(|| anyhow!("no {} with id {id}", R::KIND.singular()))?;
    controller.open_record(&record_id).await?;
    Ok(())
}

fn expect_loaded(outcome: LoadOutcome) -> Result<()> {
    match outcome {
        LoadOutcome::Applied { .. } => Ok(()),
        LoadOutcome::Failed(err) => Err(explain(err)),
        other => bail!("list load did not complete: {other:?}"),
    }
}

fn expect_done<T>(outcome: CallOutcome<T>) -> Result<T> {
    match outcome {
        CallOutcome::Done(value) => Ok(value),
        CallOutcome::Failed(err) => Err(explain(err)),
        CallOutcome::Deferred => bail!("session is not ready"),
        CallOutcome::Abandoned => bail!("request abandoned"),
    }
}

fn explain(err: UiError) -> anyhow::Error {
    if err.requires_reauth() {
        anyhow!(err).context("set ADMIN_TOKEN or pass --token to sign in")
    } else {
        anyhow!(err)
    }
}

fn parse_patch(raw: &str) -> Result<serde_json::Map<String, Value>> {
    match serde_json::from_str(raw).context("--json must be valid JSON")? {
        Value::Object(fields) => Ok(fields),
        _ => bail!("--json must be a JSON object"),
    }
}

/// Overlays `patch` on the draft's JSON form and reads it back.
fn merge_into<D>(draft: &mut D, patch: &serde_json::Map<String, Value>) -> Result<()>
where
    D: serde::Serialize + serde::de::DeserializeOwned,
{
    let mut value = serde_json::to_value(&*draft)?;
    let Value::Object(fields) = &mut value else {
        bail!("draft is not a JSON object");
    };
    for (key, field) in patch {
        fields.insert(key.clone(), field.clone());
    }
    *draft = serde_json::from_value(value).context("patched draft does not fit the record")?;
    Ok(())
}

fn parse_sort(raw: &str) -> Result<SortSpec, String> {
    let (field, direction) = match raw.split_once(',') {
        Some((field, direction)) => (field, direction),
        None => (raw, "asc"),
    };
    let field = field.trim();
    if field.is_empty() {
        return Err("sort field must not be empty".into());
    }
    match direction.trim().to_ascii_lowercase().as_str() {
        "asc" => Ok(SortSpec::asc(field)),
        "desc" => Ok(SortSpec::desc(field)),
        other => Err(format!(
            "unknown sort direction '{other}', expected {} or {}",
            SortDirection::Asc.as_str(),
            SortDirection::Desc.as_str()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::records::{Department, EmployeeDraft};

    #[test]
    fn sort_accepts_field_with_optional_direction() {
        assert_eq!(parse_sort("lastName"), Ok(SortSpec::asc("lastName")));
        assert_eq!(parse_sort("hireDate, DESC"), Ok(SortSpec::desc("hireDate")));
        assert!(parse_sort("name,sideways").is_err());
        assert!(parse_sort(",asc").is_err());
    }

    #[test]
    fn patch_merges_over_existing_draft() {
        let mut draft = EmployeeDraft {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john.doe@example.com".into(),
            ..EmployeeDraft::default()
        };
        let patch = parse_patch(r#"{"email":"john@corp.example","department":"finance"}"#)
            .expect("patch");

        merge_into(&mut draft, &patch).expect("merge");

        assert_eq!(draft.first_name, "John");
        assert_eq!(draft.email, "john@corp.example");
        assert_eq!(draft.department, Department::Finance);
    }

    #[test]
    fn bad_patch_leaves_draft_alone() {
        let mut draft = EmployeeDraft::default();
        let patch = parse_patch(r#"{"department":"astronomy"}"#).expect("patch");

        assert!(merge_into(&mut draft, &patch).is_err());
        assert_eq!(draft, EmployeeDraft::default());
        assert!(parse_patch("[1, 2]").is_err());
    }

    #[test]
    fn cli_parses_nested_resource_commands() {
        let cli = Cli::try_parse_from([
            "admin",
            "--token",
            "t",
            "employees",
            "list",
            "--category",
            "engineering",
            "--sort",
            "lastName,desc",
        ])
        .expect("parse");

        assert_eq!(cli.token.as_deref(), Some("t"));
        match cli.resource {
            Resource::Employees(ResourceArgs {
                command: Command::List { category, sort, page, .. },
            }) => {
                assert_eq!(category, "engineering");
                assert_eq!(sort, Some(SortSpec::desc("lastName")));
                assert_eq!(page, 1);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
