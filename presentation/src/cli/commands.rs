//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use estatedesk_application::SearchTarget;
use estatedesk_domain::{DocumentFilter, DocumentKind, DocumentStatus, ProjectId};
use std::path::PathBuf;

/// CLI arguments for estatedesk
#[derive(Parser, Debug)]
#[command(name = "estatedesk")]
#[command(author, version, about = "Property portfolio desk: structures, deals and documents")]
#[command(long_about = r#"
estatedesk talks to the property backend's action API to browse projects and
enter deals.

Deals (property sales, contracts, offer letters and tenant assignments) are
entered through multi-step wizards. A wizard is driven by a TOML script that
names the project, properties, parties and terms; every step is validated
before the next one opens.

Configuration files are loaded from (in priority order):
1. ESTATEDESK_* environment variables (e.g. ESTATEDESK_API__BASE_URL)
2. --config <path>        Explicit config file
3. ./estatedesk.toml      Project-level config
4. ~/.config/estatedesk/config.toml   Global config

Example:
  estatedesk search projects "green valley"
  estatedesk availability "Green Valley"
  estatedesk wizard sale.toml --dry-run
  estatedesk documents list --kind offer_letter --status active
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search projects, owners, agents or buyers
    Search {
        /// What to search
        #[arg(value_enum)]
        target: TargetArg,
        /// Search text
        query: String,
    },

    /// Show the blocks, floors, units and houses of a project
    Structure {
        /// Project name
        project: String,
    },

    /// Show available/booked/sold counts per block and floor
    Availability {
        /// Project name
        project: String,
    },

    /// List payment plan templates
    Templates,

    /// List or delete documents
    Documents {
        #[command(subcommand)]
        action: DocumentsCommand,
    },

    /// Run a wizard from a TOML script
    Wizard {
        /// Path to the wizard script
        script: PathBuf,

        /// Print the payload instead of submitting it
        #[arg(long)]
        dry_run: bool,

        /// Print the payment schedule (or lease) preview
        #[arg(long)]
        schedule: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DocumentsCommand {
    /// List documents, newest first
    List {
        #[arg(long, value_enum)]
        kind: Option<KindArg>,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        /// Only documents of this project id
        #[arg(long, value_name = "ID")]
        project: Option<u64>,
    },

    /// Delete a document by id
    Delete { id: u64 },
}

impl DocumentsCommand {
    /// Filter described by `documents list` flags
    pub fn filter(&self) -> DocumentFilter {
        match self {
            DocumentsCommand::List {
                kind,
                status,
                project,
            } => DocumentFilter {
                kind: kind.map(Into::into),
                status: status.map(Into::into),
                project_id: project.map(ProjectId),
            },
            DocumentsCommand::Delete { .. } => DocumentFilter::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetArg {
    Projects,
    Owners,
    Agents,
    Buyers,
}

impl From<TargetArg> for SearchTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Projects => SearchTarget::Projects,
            TargetArg::Owners => SearchTarget::Owners,
            TargetArg::Agents => SearchTarget::Agents,
            TargetArg::Buyers => SearchTarget::Buyers,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum KindArg {
    OfferLetter,
    Contract,
    Lease,
    Other,
}

impl From<KindArg> for DocumentKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::OfferLetter => DocumentKind::OfferLetter,
            KindArg::Contract => DocumentKind::Contract,
            KindArg::Lease => DocumentKind::Lease,
            KindArg::Other => DocumentKind::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    Accepted,
    Signed,
    Expired,
}

impl From<StatusArg> for DocumentStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => DocumentStatus::Active,
            StatusArg::Accepted => DocumentStatus::Accepted,
            StatusArg::Signed => DocumentStatus::Signed,
            StatusArg::Expired => DocumentStatus::Expired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wizard_command() {
        let cli = Cli::parse_from(["estatedesk", "-vv", "wizard", "sale.toml", "--dry-run"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Wizard {
                script,
                dry_run,
                schedule,
            }) => {
                assert_eq!(script, PathBuf::from("sale.toml"));
                assert!(dry_run);
                assert!(!schedule);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_documents_list_filter() {
        let cli = Cli::parse_from([
            "estatedesk",
            "documents",
            "list",
            "--kind",
            "offer_letter",
            "--status",
            "active",
            "--project",
            "4",
        ]);
        let Some(Command::Documents { action }) = cli.command else {
            panic!("expected documents command");
        };
        let filter = action.filter();
        assert_eq!(filter.kind, Some(DocumentKind::OfferLetter));
        assert_eq!(filter.status, Some(DocumentStatus::Active));
        assert_eq!(filter.project_id, Some(ProjectId(4)));
    }

    #[test]
    fn test_search_target_conversion() {
        let cli = Cli::parse_from(["estatedesk", "search", "buyers", "ana@"]);
        let Some(Command::Search { target, query }) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(SearchTarget::from(target), SearchTarget::Buyers);
        assert_eq!(query, "ana@");
    }
}
