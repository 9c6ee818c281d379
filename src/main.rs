use analyzer::{Registry, StrategyReport};
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use configuration::{Config, LogFormat, init_logging, load_config};
use core_types::{
    DetectorCategory, DetectorMeta, MarketRegime, StrategyConfig, StrategyDraft, TradingStyle,
};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;

/// The main entry point for the Stratagem strategy checker.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    // A .env file is optional; it only carries STRATAGEM__* overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    let _log_guard = init_logging(&config.logging)?;

    let registry = Registry::builtin().context("builtin detector tables are inconsistent")?;
    tracing::debug!(
        detectors = registry.catalog.len(),
        aliases = registry.aliases.len(),
        "Registry loaded."
    );

    // Execute the appropriate command
    match cli.command {
        Commands::Check(args) => handle_check(args, &registry, &config),
        Commands::Catalog(args) => {
            handle_catalog(args, &registry);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Presets(args) => handle_presets(args, &registry).map(|_| ExitCode::SUCCESS),
        Commands::Styles(args) => handle_styles(args, &registry).map(|_| ExitCode::SUCCESS),
        Commands::Suggest(args) => handle_suggest(args, &registry, &config).map(|_| ExitCode::SUCCESS),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Checks trading-strategy detector selections before they reach the scanner.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./stratagem.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured log output format.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and score a strategy. Exits with status 1 when it is invalid.
    Check(CheckArgs),
    /// List the detector catalog.
    Catalog(CatalogArgs),
    /// List presets, or show one preset's detectors.
    Presets(PresetsArgs),
    /// List trading styles, or show one style's recommendations.
    Styles(StylesArgs),
    /// Suggest detectors that pair well with a selection.
    Suggest(SuggestArgs),
}

#[derive(Parser)]
struct CheckArgs {
    /// Comma-separated detector ids or aliases (e.g. "regime,bos,fvg").
    #[arg(long, value_delimiter = ',', required_unless_present = "file")]
    detectors: Vec<String>,

    /// Minimum reward-to-risk ratio.
    #[arg(long)]
    min_rr: Option<Decimal>,

    /// Minimum signal score.
    #[arg(long)]
    min_score: Option<Decimal>,

    /// Entry timeframe (e.g. "M15").
    #[arg(long)]
    entry_tf: Option<String>,

    /// Comma-separated trend timeframes (e.g. "H1,H4").
    #[arg(long, value_delimiter = ',')]
    trend_tf: Vec<String>,

    /// The trading style the strategy is meant for.
    #[arg(long)]
    style: Option<TradingStyle>,

    /// The market regime the strategy targets (trending_up, trending_down, ranging).
    #[arg(long)]
    regime: Option<MarketRegime>,

    /// Read a JSON draft ({"detectors": [...], "config": {...}}) instead of flags.
    #[arg(long, conflicts_with = "detectors")]
    file: Option<PathBuf>,

    /// Print the full report as JSON.
    #[arg(long)]
    json: bool,
}

impl CheckArgs {
    fn draft(&self) -> StrategyDraft {
        StrategyDraft::new(self.detectors.iter().cloned()).with_config(StrategyConfig {
            min_rr: self.min_rr,
            min_score: self.min_score,
            entry_tf: self.entry_tf.clone(),
            trend_tf: self.trend_tf.clone(),
            style: self.style,
            regime: self.regime,
            rejected: Vec::new(),
        })
    }
}

#[derive(Parser)]
struct CatalogArgs {
    /// Only show one category (gate, trigger or confluence).
    #[arg(long)]
    category: Option<DetectorCategory>,

    /// Case-insensitive search over ids, labels, descriptions and tags.
    #[arg(long)]
    search: Option<String>,
}

#[derive(Parser)]
struct PresetsArgs {
    /// Show the detectors of a single preset.
    #[arg(long)]
    name: Option<String>,
}

#[derive(Parser)]
struct StylesArgs {
    /// Show a single style in detail.
    #[arg(long)]
    style: Option<TradingStyle>,
}

#[derive(Parser)]
struct SuggestArgs {
    /// Comma-separated detector ids or aliases.
    #[arg(long, value_delimiter = ',', required = true)]
    detectors: Vec<String>,

    /// Maximum number of suggestions.
    #[arg(long, default_value_t = 5)]
    limit: usize,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_check(args: CheckArgs, registry: &Registry, config: &Config) -> anyhow::Result<ExitCode> {
    let analyzer = registry.analyzer(config)?;

    let report = match &args.file {
        Some(path) => {
            let payload = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            analyzer.analyze_json(&payload)?
        }
        None => analyzer.analyze(&args.draft()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(if report.validation.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn handle_catalog(args: CatalogArgs, registry: &Registry) {
    let catalog = &registry.catalog;
    let detectors: Vec<&DetectorMeta> = match (&args.search, args.category) {
        (Some(query), category) => catalog
            .search(query)
            .into_iter()
            .filter(|d| category.is_none_or(|c| d.category == c))
            .collect(),
        (None, Some(category)) => catalog.list_by_category(category),
        (None, None) => catalog.iter().collect(),
    };

    let mut table = new_table(vec!["Id", "Category", "Label", "Impact", "Cost", "Status", "Aliases"]);
    for detector in &detectors {
        let status = match (detector.implemented, detector.required) {
            (false, _) => "planned",
            (true, true) => "required",
            (true, false) => "ready",
        };
        table.add_row(vec![
            detector.id.clone(),
            detector.category.to_string(),
            detector.label_primary.clone(),
            detector.impact.to_string(),
            detector.cost.to_string(),
            status.to_string(),
            registry.aliases.aliases_of(&detector.id).join(", "),
        ]);
    }
    println!("{table}");

    let counts = catalog.counts();
    println!(
        "{} of {} detectors shown ({} gates, {} triggers, {} confluence in the catalog)",
        detectors.len(),
        counts.total,
        counts.gate,
        counts.trigger,
        counts.confluence
    );
}

fn handle_presets(args: PresetsArgs, registry: &Registry) -> anyhow::Result<()> {
    let catalog = &registry.catalog;

    if let Some(name) = &args.name {
        let preset = catalog
            .preset(name)
            .with_context(|| format!("unknown preset '{name}'"))?;
        println!("{} - {}", preset.name, preset.description);

        let mut table = new_table(vec!["Id", "Category", "Label"]);
        for id in &preset.detectors {
            let detector = catalog.require(id)?;
            table.add_row(vec![
                detector.id.clone(),
                detector.category.to_string(),
                detector.label_primary.clone(),
            ]);
        }
        println!("{table}");
        return Ok(());
    }

    let mut table = new_table(vec!["Name", "Detectors", "Difficulty", "Min R:R", "Symbols", "Timeframes"]);
    for preset in catalog.presets() {
        let (min_rr, symbols, timeframes) = match &preset.recommended {
            Some(settings) => (
                settings.min_rr.to_string(),
                settings.symbols.join(", "),
                settings.timeframes.join(", "),
            ),
            None => (String::new(), String::new(), String::new()),
        };
        table.add_row(vec![
            preset.name.clone(),
            preset.detectors.len().to_string(),
            preset.difficulty.map(|d| d.to_string()).unwrap_or_default(),
            min_rr,
            symbols,
            timeframes,
        ]);
    }
    println!("{table}");
    Ok(())
}

fn handle_styles(args: StylesArgs, registry: &Registry) -> anyhow::Result<()> {
    let catalog = &registry.catalog;

    let Some(style) = args.style else {
        let mut table = new_table(vec!["Style", "Label", "Difficulty", "Recommended", "Min R:R"]);
        for profile in catalog.styles() {
            table.add_row(vec![
                profile.style.to_string(),
                profile.label.clone(),
                profile.difficulty.to_string(),
                profile.recommended().count().to_string(),
                profile.settings.min_rr.to_string(),
            ]);
        }
        println!("{table}");
        return Ok(());
    };

    let profile = catalog
        .style_profile(style)
        .with_context(|| format!("no profile for style '{style}'"))?;
    println!("{} - {}", profile.label, profile.description);
    println!("Best conditions: {}", profile.best_conditions.join(", "));

    let mut table = new_table(vec!["Detector", "Fit", "Note"]);
    for id in profile.recommended() {
        table.add_row(vec![id.to_string(), "recommended".to_string(), String::new()]);
    }
    for id in &profile.incompatible {
        let reason = catalog.incompatibility_reason(id, style).unwrap_or_default();
        table.add_row(vec![id.clone(), "avoid".to_string(), reason]);
    }
    println!("{table}");
    Ok(())
}

fn handle_suggest(args: SuggestArgs, registry: &Registry, config: &Config) -> anyhow::Result<()> {
    let analyzer = registry.analyzer(config)?;
    let normalized = analyzer.normalizer().normalize_list(&args.detectors);
    if !normalized.unknown.is_empty() {
        println!("Ignoring unknown detectors: {}", normalized.unknown.join(", "));
    }

    let suggestions = registry.synergy.suggest(&normalized.canonical, args.limit);
    if suggestions.is_empty() {
        println!("No further detectors pair well with this selection.");
        return Ok(());
    }

    let mut table = new_table(vec!["Detector", "Avg synergy", "Reason"]);
    for suggestion in suggestions {
        table.add_row(vec![
            suggestion.detector,
            suggestion.avg_synergy.to_string(),
            suggestion.reason,
        ]);
    }
    println!("{table}");
    Ok(())
}

// ==============================================================================
// Rendering
// ==============================================================================

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn print_report(report: &StrategyReport) {
    println!("Detectors: {}", report.canonical_detectors.join(", "));
    if !report.unknown.is_empty() {
        println!("Unknown:   {}", report.unknown.join(", "));
    }
    let verdict = match (report.validation.ok, report.is_acceptable()) {
        (false, _) => "INVALID",
        (true, false) => "VALID (blocking conflicts)",
        (true, true) => "VALID",
    };
    println!("Status:    {verdict}");
    println!("Health:    {} ({})", report.health.total, report.health.grade);
    if let Some(style) = report.suggested_style {
        println!("Style:     looks like {style}");
    }
    let regimes: Vec<&str> = report.compatible_regimes.iter().map(|r| r.label()).collect();
    if !regimes.is_empty() {
        println!("Regimes:   {}", regimes.join(", "));
    }

    let mut scores = new_table(vec!["Dimension", "Score"]);
    for (dimension, score) in &report.health.dimensions {
        scores.add_row(vec![dimension.to_string(), score.to_string()]);
    }
    println!("{scores}");

    let validation = &report.validation;
    if !validation.errors.is_empty() || !validation.warnings.is_empty() {
        let mut issues = new_table(vec!["Severity", "Code", "Message"]);
        for issue in validation.errors.iter().chain(&validation.warnings) {
            issues.add_row(vec![
                format!("{:?}", issue.severity),
                issue.code.to_string(),
                issue.message.clone(),
            ]);
        }
        println!("{issues}");
    }

    if !report.synergies.is_empty() || !report.conflicts.is_empty() {
        let mut pairs = new_table(vec!["Pair", "Kind", "Reason"]);
        for edge in &report.synergies {
            pairs.add_row(vec![
                format!("{} + {}", edge.a, edge.b),
                format!("synergy {}", edge.score),
                edge.reason.clone().unwrap_or_default(),
            ]);
        }
        for edge in &report.conflicts {
            pairs.add_row(vec![
                format!("{} + {}", edge.a, edge.b),
                format!("conflict ({})", edge.severity),
                edge.reason.clone(),
            ]);
        }
        println!("{pairs}");
    }

    if !report.suggestions.is_empty() {
        let names: Vec<String> = report
            .suggestions
            .iter()
            .map(|s| format!("{} ({})", s.detector, s.avg_synergy))
            .collect();
        println!("Consider adding: {}", names.join(", "));
    }
}
