use clap::{Parser, Subcommand, ValueEnum};
use lazylp_core::{
    Comparison, LpWriter, ModelRegistry, ObjectiveSense, VarKind, Variable, WriteStats,
    WriterConfig,
};
use lazylp_expr::{Coefficients, ExprError, FnCoefficients, Index, IndexSet, TermStream};
use lazylp_tools::{MemoryProbe, StageMeasurement, enable_logging};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{File, create_dir_all};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

const DEFAULT_CASES: [usize; 4] = [1_000, 10_000, 100_000, 1_000_000];
const SCHEMA_VERSION: u32 = 1;
const MIB: f64 = 1024.0 * 1024.0;

#[derive(Parser, Debug)]
#[command(author, version, about = "lazylp streaming write benchmarks")]
struct Cli {
    /// Log filter (falls back to LAZYLP_TRACE)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build synthetic models, write them, and save JSONL artifacts
    Run(RunArgs),
    /// Render a summary of a JSONL artifact
    Report(ReportArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Comma-separated list of variable counts
    #[arg(long, value_delimiter = ',', value_parser = positive)]
    cases: Option<Vec<usize>>,

    /// Run a single case with this variable count
    #[arg(long, conflicts_with = "cases", value_parser = positive)]
    variables: Option<usize>,

    /// Number of constraint rows (defaults to 1% of the variables)
    #[arg(long, value_parser = positive)]
    constraints: Option<usize>,

    /// Maximum expression line width
    #[arg(
        long,
        value_parser = positive,
        default_value_t = lazylp_core::config::DEFAULT_EXPRESSION_WIDTH
    )]
    width: usize,

    /// Also write BOUNDS/GENERAL/BINARY sections
    #[arg(long)]
    declarations: bool,

    /// Number of repetitions per case
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    repetitions: u32,

    /// JSONL output artifact path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory for the written LP files
    #[arg(long)]
    lp_dir: Option<PathBuf>,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Input JSONL benchmark artifact
    #[arg(long)]
    input: PathBuf,

    /// Output format for stdout
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Ndjson,
}

#[derive(Debug, Clone)]
struct CaseConfig {
    name: String,
    variables: usize,
    constraints: usize,
}

#[derive(Debug)]
struct CaseExecution {
    stages: Vec<StageMeasurement>,
    written: WriteStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BenchRecord {
    schema_version: u32,
    run_id: String,
    case_name: String,
    repetition: u32,
    variables: usize,
    constraints: usize,
    stage: String,
    duration_ms: f64,
    rss_delta_bytes: Option<i64>,
    lines: u64,
    bytes: u64,
    terms: u64,
}

#[derive(Debug, Clone, Serialize)]
struct SummaryRow {
    case_name: String,
    stage: String,
    samples: usize,
    mean_duration_ms: f64,
    max_duration_ms: f64,
    mean_rss_delta_bytes: Option<f64>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    enable_logging(cli.log.as_deref())?;
    match cli.command {
        Command::Run(args) => run_command(args),
        Command::Report(args) => report_command(args),
    }
}

fn run_command(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let run_id = run_id();
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("artifacts/bench/{run_id}.jsonl")));
    let lp_dir = args
        .lp_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("artifacts/bench/{run_id}")));
    create_dir_all(&lp_dir)?;

    let writer = LpWriter::new(
        WriterConfig::new()
            .with_expression_width(args.width)
            .with_declarations(args.declarations),
    );

    let mut records = Vec::new();
    for case in resolve_cases(&args) {
        for rep_idx in 0..args.repetitions {
            let path = lp_dir.join(format!("{}_rep_{}.lp", case.name, rep_idx + 1));
            let execution = execute_case(&case, &writer, &path)?;
            records.extend(case_records(&run_id, &case, rep_idx + 1, &execution));
        }
    }

    write_records_jsonl(&output_path, &records)?;
    render_output(args.format, &records)?;
    println!("artifact: {}", output_path.display());

    Ok(())
}

fn report_command(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let records = load_records_jsonl(&args.input)?;
    render_output(args.format, &records)?;
    Ok(())
}

fn resolve_cases(args: &RunArgs) -> Vec<CaseConfig> {
    let variables = match (args.variables, &args.cases) {
        (Some(variables), _) => vec![variables],
        (None, Some(cases)) => cases.clone(),
        (None, None) => DEFAULT_CASES.to_vec(),
    };
    variables
        .into_iter()
        .map(|variables| CaseConfig {
            name: format!("vars_{variables}"),
            variables,
            constraints: args.constraints.unwrap_or((variables / 100).max(1)),
        })
        .collect()
}

fn positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be greater than zero".to_string()),
        Ok(n) => Ok(n),
        Err(err) => Err(err.to_string()),
    }
}

/// Build, estimate and write one synthetic covering model.
fn execute_case(
    case: &CaseConfig,
    writer: &LpWriter,
    path: &Path,
) -> Result<CaseExecution, Box<dyn std::error::Error>> {
    let mut probe = MemoryProbe::new();

    let registry = probe.measure("declare", || {
        build_cover_model(case.variables, case.constraints)
    })?;
    let estimated = probe.measure("estimate", || writer.estimate(&registry))?;
    probe.measure("write", || writer.write(&registry, path))?;

    tracing::info!(
        component = "bench",
        operation = "execute_case",
        status = "success",
        case = %case.name,
        lines = estimated.lines,
        bytes = estimated.bytes,
        terms = estimated.terms,
        "Benchmark case complete"
    );

    Ok(CaseExecution {
        stages: probe.take_stages(),
        written: estimated,
    })
}

/// `x` binary over `0..variables` with a cyclic cost, one covering row per
/// constraint index taking every `constraints`-th `x`, plus a capacity on
/// a continuous slack `s`.
fn build_cover_model(
    variables: usize,
    constraints: usize,
) -> Result<ModelRegistry, Box<dyn std::error::Error>> {
    let n = variables as i64;
    let m = constraints as i64;
    let mut registry = ModelRegistry::new();

    registry.declare_variable(Variable::binary("x", IndexSet::range(0..n)))?;
    registry.declare_variable(
        Variable::new("s", VarKind::NonNegativeReal)
            .with_upper_bound(variables as f64)
            .with_default_index(IndexSet::range(0..m)),
    )?;

    let cost: Rc<dyn Coefficients> = Rc::new(FnCoefficients(|index: &Index| {
        index.as_int().map(|i| (i % 13 + 1) as f64)
    }));
    let objective = registry.make_sum("x", Some(cost), None)?;
    let slack = registry.make_sum("s", None, None)?;
    registry.set_objective(vec![objective, slack], ObjectiveSense::Min)?;

    let cover = TermStream::from_fn("x", move |row: Option<&Index>| {
        let start = row.and_then(Index::as_int).unwrap_or(0);
        (start..n)
            .step_by(m as usize)
            .map(|j| Ok::<_, ExprError>(format!("x_{j}")))
    });
    registry.add_constraint(
        cover,
        Comparison::GreaterEqual,
        1,
        Some(IndexSet::range(0..m)),
        Some("cover"),
    )?;

    let everything = registry.make_sum("x", None, None)?;
    let capacity = registry.make_sum("s", None, None)?;
    registry.add_constraint(
        vec![everything, capacity],
        Comparison::LessEqual,
        variables as f64 / 2.0,
        None,
        Some("capacity"),
    )?;

    Ok(registry)
}

fn case_records(
    run_id: &str,
    case: &CaseConfig,
    repetition: u32,
    execution: &CaseExecution,
) -> Vec<BenchRecord> {
    execution
        .stages
        .iter()
        .map(|measurement| BenchRecord {
            schema_version: SCHEMA_VERSION,
            run_id: run_id.to_string(),
            case_name: case.name.clone(),
            repetition,
            variables: case.variables,
            constraints: case.constraints,
            stage: measurement.stage.clone(),
            duration_ms: measurement.duration_ms,
            rss_delta_bytes: measurement.rss_delta_bytes(),
            lines: execution.written.lines,
            bytes: execution.written.bytes,
            terms: execution.written.terms,
        })
        .collect()
}

fn render_output(
    format: OutputFormat,
    records: &[BenchRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Table => print_summary_table(&summarize_records(records)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Ndjson => {
            for record in records {
                println!("{}", serde_json::to_string(record)?);
            }
        }
    }
    Ok(())
}

/// One row per (case, stage), in case then stage order.
fn summarize_records(records: &[BenchRecord]) -> Vec<SummaryRow> {
    let mut groups: BTreeMap<(&str, &str), Vec<&BenchRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.case_name.as_str(), record.stage.as_str()))
            .or_default()
            .push(record);
    }

    groups
        .into_iter()
        .map(|((case_name, stage), samples)| {
            let durations = samples.iter().map(|record| record.duration_ms);
            let deltas: Vec<f64> = samples
                .iter()
                .filter_map(|record| record.rss_delta_bytes)
                .map(|delta| delta as f64)
                .collect();
            SummaryRow {
                case_name: case_name.to_string(),
                stage: stage.to_string(),
                samples: samples.len(),
                mean_duration_ms: durations.clone().sum::<f64>() / samples.len() as f64,
                max_duration_ms: durations.fold(0.0, f64::max),
                mean_rss_delta_bytes: (!deltas.is_empty())
                    .then(|| deltas.iter().sum::<f64>() / deltas.len() as f64),
            }
        })
        .collect()
}

fn print_summary_table(rows: &[SummaryRow]) {
    println!(
        "{:<16} {:<10} {:>7} {:>12} {:>12} {:>14}",
        "case", "stage", "samples", "mean_ms", "max_ms", "rss_delta_mb"
    );
    for row in rows {
        let rss = row
            .mean_rss_delta_bytes
            .map_or_else(|| "-".to_string(), |bytes| format!("{:.3}", bytes / MIB));
        println!(
            "{:<16} {:<10} {:>7} {:>12.3} {:>12.3} {:>14}",
            row.case_name,
            row.stage,
            row.samples,
            row.mean_duration_ms,
            row.max_duration_ms,
            rss,
        );
    }
}

fn write_records_jsonl(
    path: &Path,
    records: &[BenchRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

fn load_records_jsonl(path: &Path) -> Result<Vec<BenchRecord>, Box<dyn std::error::Error>> {
    let reader = BufReader::new(File::open(path)?);
    let records = serde_json::Deserializer::from_reader(reader)
        .into_iter::<BenchRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

fn run_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis());
    format!("bench_{millis}")
}
