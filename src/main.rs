use ads_search::client::encode_advanced;
use ads_search::config::{default_config_path, find_config_file, load_config, save_config, Config};
use ads_search::links::{ResourceKind, ResourceLocator};
use ads_search::models::{AdvancedSearchCriteria, ListLogic, Lookup, ResultSet, TextLogic};
use ads_search::session::Session;
use ads_search::ui::{self, Status};
use ads_search::utils::LabelPolicy;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// ADS Search - query the NASA ADS literature service and fetch BibTeX records
#[derive(Parser, Debug)]
#[command(name = "ads-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "hongkongkiwi")]
#[command(about = "Query the NASA ADS literature service and fetch BibTeX records", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Plain)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Fixed-width listing (human-readable)
    Plain,
    /// JSON format (machine-readable)
    Json,
}

/// Combinator for authors and objects
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ListLogicArg {
    Or,
    And,
}

impl From<ListLogicArg> for ListLogic {
    fn from(arg: ListLogicArg) -> Self {
        match arg {
            ListLogicArg::Or => ListLogic::Or,
            ListLogicArg::And => ListLogic::And,
        }
    }
}

/// Combinator for title and abstract words
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum TextLogicArg {
    Or,
    And,
    /// `+word` and `-word` markers
    Simple,
    /// Full boolean expression
    Bool,
}

impl From<TextLogicArg> for TextLogic {
    fn from(arg: TextLogicArg) -> Self {
        match arg {
            TextLogicArg::Or => TextLogic::Or,
            TextLogicArg::And => TextLogic::And,
            TextLogicArg::Simple => TextLogic::Simple,
            TextLogicArg::Bool => TextLogic::Bool,
        }
    }
}

/// Advanced search criteria
#[derive(Args, Debug)]
struct CriteriaArgs {
    /// Search the astronomy database
    #[arg(long)]
    astronomy: bool,

    /// Search the physics database
    #[arg(long)]
    physics: bool,

    /// Search the arXiv preprint database
    #[arg(long)]
    preprints: bool,

    /// Author as "Surname, I." (repeatable)
    #[arg(long, short)]
    author: Vec<String>,

    #[arg(long, value_enum, default_value_t = ListLogicArg::Or)]
    author_logic: ListLogicArg,

    /// Start of the date range, as YYYY or MM/YYYY
    #[arg(long, value_parser = parse_month_year)]
    since: Option<(Option<u8>, u16)>,

    /// End of the date range, as YYYY or MM/YYYY
    #[arg(long, value_parser = parse_month_year)]
    until: Option<(Option<u8>, u16)>,

    /// Object name
    #[arg(long)]
    object: Option<String>,

    /// Resolve the object through SIMBAD
    #[arg(long)]
    simbad: bool,

    /// Resolve the object through NED
    #[arg(long)]
    ned: bool,

    /// Resolve the object through ADS objects
    #[arg(long)]
    ads_objects: bool,

    #[arg(long, value_enum, default_value_t = ListLogicArg::Or)]
    object_logic: ListLogicArg,

    /// Title words
    #[arg(long)]
    title: Option<String>,

    #[arg(long, value_enum, default_value_t = TextLogicArg::Or)]
    title_logic: TextLogicArg,

    /// Abstract words
    #[arg(long = "abstract")]
    abstract_text: Option<String>,

    #[arg(long, value_enum, default_value_t = TextLogicArg::Or)]
    abstract_logic: TextLogicArg,
}

impl CriteriaArgs {
    fn into_criteria(self) -> AdvancedSearchCriteria {
        let mut criteria = AdvancedSearchCriteria::new()
            .databases(self.astronomy, self.physics, self.preprints)
            .author_logic(self.author_logic.into())
            .catalogs(self.simbad, self.ned, self.ads_objects)
            .object_logic(self.object_logic.into())
            .title(self.title.unwrap_or_default(), self.title_logic.into())
            .abstract_text(self.abstract_text.unwrap_or_default(), self.abstract_logic.into());

        for author in self.author {
            criteria = criteria.author(author);
        }
        if let Some(object) = self.object {
            criteria = criteria.object(object);
        }
        if let Some((month, year)) = self.since {
            criteria = criteria.since(month, year);
        }
        if let Some((month, year)) = self.until {
            criteria = criteria.until(month, year);
        }

        criteria
    }
}

/// Parse `YYYY` or `MM/YYYY`
fn parse_month_year(s: &str) -> Result<(Option<u8>, u16), String> {
    let (month, year) = match s.split_once('/') {
        Some((month, year)) => (Some(month), year),
        None => (None, s),
    };

    let year = year
        .trim()
        .parse::<u16>()
        .map_err(|_| format!("invalid year: {}", year))?;
    let month = month
        .map(|m| match m.trim().parse::<u8>() {
            Ok(m) if (1..=12).contains(&m) => Ok(m),
            _ => Err(format!("invalid month: {}", m)),
        })
        .transpose()?;

    Ok((month, year))
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search with a free-text query
    #[command(alias = "s")]
    Search {
        /// Query in ADS search syntax, e.g. 'author:"Quataert, E." year:2008'
        query: String,
    },

    /// Search with structured criteria through the classic search form
    Advanced {
        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Print the encoded advanced query without sending it
    Encode {
        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Search, then fetch the BibTeX record of one result
    #[command(alias = "cite")]
    Bibtex {
        /// Query in ADS search syntax
        query: String,

        /// Result index (1-based) or bibcode
        selection: String,

        /// Keep the exported label instead of an author-year label
        #[arg(long)]
        verbatim: bool,
    },

    /// Print the resolver URL for a record
    Link {
        /// Bibcode
        identifier: String,

        /// journal, article, arxiv-preprint, data-archive, simbad or ned
        kind: String,
    },

    /// Show abstract, journal and citation count for a record
    Show {
        /// Bibcode
        identifier: String,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let config = match &config_path {
        Some(path) if path.exists() => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        _ => Config::default(),
    };

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ads_search={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = config_path.as_ref().filter(|p| p.exists()) {
        tracing::debug!("Using config file: {}", path.display());
    }

    let output = cli.output;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Search { query } => {
            let mut session = Session::from_config(&config)?;
            let results = session.search(&query).await?;
            print_results(results, &query, output, quiet)?;
            if output == OutputFormat::Plain {
                println!("{}", session.listing().text());
            }
        }

        Commands::Advanced { criteria } => {
            let criteria = criteria.into_criteria();
            let mut session = Session::from_config(&config)?;
            let results = session.search_advanced(&criteria).await?;
            print_results(results, "advanced search", output, quiet)?;
            if output == OutputFormat::Plain {
                println!("{}", session.listing().text());
            }
        }

        Commands::Encode { criteria } => {
            let criteria = criteria.into_criteria();
            let encoded = encode_advanced(&criteria);
            match output {
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "url": format!("{}?{}", config.api.classic_url, encoded),
                        "query": encoded,
                    });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                OutputFormat::Plain => println!("{}", encoded),
            }
        }

        Commands::Bibtex {
            query,
            selection,
            verbatim,
        } => {
            let policy = if verbatim {
                LabelPolicy::Verbatim
            } else {
                config.citation.label_policy
            };

            let mut session = Session::from_config(&config)?;
            let count = session.search(&query).await?.len();
            if !quiet {
                ui::print_search_header(&query, count);
            }

            let key: Lookup = selection.parse()?;
            let record = session.resolve_citation_with(key, policy).await?;
            match output {
                OutputFormat::Json => {
                    let value = serde_json::json!({ "selection": selection, "bibtex": record });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                OutputFormat::Plain => println!("{}", record.trim_end()),
            }
        }

        Commands::Link { identifier, kind } => {
            let kind: ResourceKind = kind.parse()?;
            if let ResourceKind::Unknown(name) = &kind {
                if !quiet {
                    ui::print_status(
                        Status::Warning,
                        &format!("Unknown resource kind '{}', link type left empty", name),
                    );
                }
            }

            let url = ResourceLocator::new(&config.api.link_url).url(&identifier, &kind);
            match output {
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "identifier": identifier,
                        "kind": kind.name(),
                        "url": url,
                    });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                OutputFormat::Plain => println!("{}", url),
            }
        }

        Commands::Show { identifier } => {
            let session = Session::from_config(&config)?;
            let details = session.fetch_details(identifier.as_str()).await?;
            match output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&details)?),
                OutputFormat::Plain => {
                    for line in ui::format_details(&details) {
                        println!("{}", line);
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            ConfigCommands::Init { force } => {
                let Some(path) = cli.config.clone().or_else(default_config_path) else {
                    bail!("No configuration directory available; pass --config <path>");
                };
                if path.exists() && !force {
                    bail!("{} already exists (use --force to overwrite)", path.display());
                }

                let mut defaults = Config::default();
                defaults.api.token = None;
                save_config(&defaults, &path)?;

                if !quiet {
                    ui::print_status(
                        Status::Success,
                        &format!("Wrote {}", path.display()),
                    );
                }
            }
            ConfigCommands::Show => {
                let mut shown = config.clone();
                if shown.api.token().is_some() {
                    shown.api.token = Some("********".to_string());
                }
                match output {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&shown)?),
                    OutputFormat::Plain => print!("{}", toml::to_string_pretty(&shown)?),
                }
            }
        },
    }

    Ok(())
}

/// Print a result set: JSON as a whole, plain as a header before the listing
fn print_results(results: &ResultSet, label: &str, output: OutputFormat, quiet: bool) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(results)?),
        OutputFormat::Plain => {
            if !quiet {
                ui::print_search_header(label, results.len());
            }
            if results.is_empty() && !quiet {
                ui::print_status(Status::Info, "No results");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_with_global_flags() {
        let cli = Cli::try_parse_from(["ads-search", "search", "author:quataert", "-o", "json", "-q"])
            .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Search { query } if query == "author:quataert"));
    }

    #[test]
    fn test_parse_bibtex() {
        let cli = Cli::try_parse_from(["ads-search", "bibtex", "buoyancy", "2", "--verbatim"]).unwrap();

        match cli.command {
            Commands::Bibtex {
                query,
                selection,
                verbatim,
            } => {
                assert_eq!(query, "buoyancy");
                assert_eq!(selection.parse::<Lookup>().unwrap(), Lookup::Index(2));
                assert!(verbatim);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_advanced_flags_into_criteria() {
        let cli = Cli::try_parse_from([
            "ads-search",
            "encode",
            "--astronomy",
            "-a",
            "Quataert, E.",
            "--since",
            "03/2005",
            "--until",
            "2010",
            "--title",
            "buoyancy",
            "--title-logic",
            "simple",
        ])
        .unwrap();

        let Commands::Encode { criteria } = cli.command else {
            panic!("expected encode");
        };
        let criteria = criteria.into_criteria();
        assert!(criteria.astronomy);
        assert_eq!(criteria.authors, vec!["Quataert, E."]);
        assert_eq!(criteria.dates.start_month, Some(3));
        assert_eq!(criteria.dates.start_year, Some(2005));
        assert_eq!(criteria.dates.end_year, Some(2010));
        assert_eq!(criteria.title_logic, TextLogic::Simple);
    }

    #[test]
    fn test_parse_month_year() {
        assert_eq!(parse_month_year("2008"), Ok((None, 2008)));
        assert_eq!(parse_month_year("12/1999"), Ok((Some(12), 1999)));
        assert!(parse_month_year("13/1999").is_err());
        assert!(parse_month_year("soon").is_err());
    }
}
