use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{error, info};

use dz_import_simulator::{
    domain::{simulate, CalculationRequest, ConsumptionTaxPolicyKind, RateOverrides, RuleSet},
    infra::{export, model_directory::ModelDirectory},
    presentation::{
        phrase, render_guidance, render_models, render_summary, render_vehicle, Locale, Phrase,
    },
    util::persistence::{load_settings, save_settings},
};

/// Estimate whether a vehicle can be imported into Algeria and what it costs.
#[derive(Debug, Parser)]
#[command(name = "dz-import-sim", author, version, about, long_about = None)]
struct Args {
    /// Calculation request (JSON)
    #[arg(short = 'r', long = "request")]
    request: PathBuf,

    /// Output language (fr or en)
    #[arg(short = 'l', long = "locale")]
    locale: Option<Locale>,

    /// Official rate, DZD per EUR
    #[arg(long = "rate")]
    rate: Option<Decimal>,

    /// Parallel market rate, DZD per EUR
    #[arg(long = "parallel-rate")]
    parallel_rate: Option<Decimal>,

    /// VAT percentage
    #[arg(long = "vat")]
    vat: Option<Decimal>,

    /// Consumption tax policy for mid-size diesel engines
    #[arg(long = "tic-policy", value_enum)]
    tic_policy: Option<TicPolicy>,

    /// List the models known for this make
    #[arg(short = 'm', long = "make")]
    make: Option<String>,

    /// Write the report as JSON
    #[arg(long = "export-json")]
    export_json: Option<PathBuf>,

    /// Write the report as a one-row CSV spreadsheet
    #[arg(long = "export-csv")]
    export_csv: Option<PathBuf>,

    /// Persist locale, rates and policy for later runs
    #[arg(long = "save-settings")]
    save_settings: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TicPolicy {
    Flat,
    Tiered,
}

impl From<TicPolicy> for ConsumptionTaxPolicyKind {
    fn from(value: TicPolicy) -> Self {
        match value {
            TicPolicy::Flat => ConsumptionTaxPolicyKind::Flat,
            TicPolicy::Tiered => ConsumptionTaxPolicyKind::Tiered,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dz_import_simulator=info,dz_import_sim=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(locale) = args.locale {
        settings.locale = locale;
    }
    if let Some(policy) = args.tic_policy {
        settings.consumption_tax = policy.into();
    }
    settings.rates = RateOverrides {
        conversion_rate: args.rate,
        vat_rate_percent: args.vat,
        parallel_market_rate: args.parallel_rate,
    }
    .apply(settings.rates);
    let locale = settings.locale;

    let raw = fs::read_to_string(&args.request)
        .with_context(|| format!("reading {}", args.request.display()))?;
    let request: CalculationRequest = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.request.display()))?;

    let today = OffsetDateTime::now_utc().date();
    let validated = request
        .validate(today, settings.rates)
        .context("invalid calculation request")?;

    let rules = RuleSet::CURRENT.with_consumption_tax(settings.consumption_tax.policy());
    let report = simulate(&validated, &rules);

    println!("{}", phrase(Phrase::Title, locale));
    println!();
    print!("{}", render_vehicle(&validated.profile, validated.status, locale));
    println!();
    print!("{}", render_summary(&report, locale));

    if let Some(make) = args.make.as_deref() {
        let directory = match settings.lookup_base_url.as_deref() {
            Some(base) => ModelDirectory::with_base_url(base),
            None => ModelDirectory::new(),
        };
        let models = match directory {
            Ok(directory) => directory.models_or_empty(make).await,
            Err(err) => {
                error!("[models] failed to initialise lookup client: {err}");
                Vec::new()
            }
        };
        println!();
        print!("{}", render_models(make, &models, locale));
    }

    println!();
    print!("{}", render_guidance(locale));

    let mut export_failed = false;
    if let Some(path) = args.export_json.as_deref() {
        if let Err(err) = export::write_json(&report, path) {
            error!("[export] JSON export to {} failed: {err}", path.display());
            export_failed = true;
        }
    }
    if let Some(path) = args.export_csv.as_deref() {
        if let Err(err) = export::write_csv(&report, locale, path) {
            error!("[export] spreadsheet export to {} failed: {err}", path.display());
            export_failed = true;
        }
    }

    if args.save_settings {
        let path = save_settings(&settings).context("saving settings")?;
        info!("settings stored in {}", path.display());
    }

    if export_failed {
        anyhow::bail!("one or more exports failed; the summary above is still valid");
    }
    Ok(())
}
