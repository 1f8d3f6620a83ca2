mod script;

use script::{Line, Step, SyntaxError};
use serde::Serialize;
use std::io::{Read, Write};
use tracing_subscriber::EnvFilter;
use waypath::Graph;
use waypath::path::{describe_no_path, format_weight};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Syntax(SyntaxError),
    /// Engine errors already reported per line; carries how many lines failed.
    Failed(usize),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Syntax(err) => write!(f, "{err}"),
            CliError::Failed(n) if *n == 1 => write!(f, "1 step failed"),
            CliError::Failed(n) => write!(f, "{n} steps failed"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<SyntaxError> for CliError {
    fn from(value: SyntaxError) -> Self {
        Self::Syntax(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Command {
    #[default]
    Run,
    Check,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    json: bool,
    pretty: bool,
    keep_going: bool,
}

fn usage() -> &'static str {
    "waypath-cli\n\
\n\
USAGE:\n\
  waypath-cli [run] [--json] [--pretty] [--keep-going] [<path>|-]\n\
  waypath-cli check [--json] [--pretty] [<path>|-]\n\
\n\
SCRIPT:\n\
  node <id>                 add a node\n\
  edge <a> <b> <weight>     add an edge, or replace its weight\n\
  path <source> <target>    print the shortest path\n\
  neighbors <id>            print adjacent nodes and weights\n\
  distances <source>        print every shortest distance from <source>\n\
  clear                     remove all nodes and edges\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the script is read from stdin.\n\
  - Lines starting with '#' are comments.\n\
  - A failing step is reported as 'line N: <error>' on stderr. Without --keep-going the\n\
    run stops at the first failure.\n\
  - Set RUST_LOG (e.g. RUST_LOG=waypath=debug) for engine diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "run" => args.command = Command::Run,
            "check" => args.command = Command::Check,
            "--json" => args.json = true,
            "--pretty" => {
                args.json = true;
                args.pretty = true;
            }
            "--keep-going" => args.keep_going = true,
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(out: &mut impl Write, value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

#[derive(Serialize)]
#[serde(tag = "query", rename_all = "snake_case")]
enum QueryOut<'a> {
    Path {
        source: &'a str,
        target: &'a str,
        path: Option<&'a [String]>,
        total_weight: Option<f64>,
    },
    Neighbors {
        node: &'a str,
        neighbors: Vec<NeighborOut<'a>>,
    },
    Distances {
        source: &'a str,
        distances: Vec<DistanceOut<'a>>,
    },
}

#[derive(Serialize)]
struct NeighborOut<'a> {
    node: &'a str,
    weight: f64,
}

#[derive(Serialize)]
struct DistanceOut<'a> {
    node: &'a str,
    distance: f64,
}

#[derive(Serialize)]
struct CheckOut {
    nodes: usize,
    edges: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct RunOptions {
    json: bool,
    pretty: bool,
    keep_going: bool,
    /// Apply mutations only; skip every query.
    mutations_only: bool,
}

/// Applies `lines` to `graph`, writing query results to `out` and per-line failures to `err`.
fn execute(
    lines: &[Line],
    graph: &mut Graph,
    opts: RunOptions,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<(), CliError> {
    let mut failed = 0usize;
    for line in lines {
        tracing::debug!(line = line.number, step = ?line.step, "applying step");
        let result = apply(&line.step, graph, opts, out);
        match result {
            Ok(()) => {}
            Err(StepError::Engine(e)) => {
                writeln!(err, "line {}: {e}", line.number)?;
                failed += 1;
                if !opts.keep_going {
                    break;
                }
            }
            Err(StepError::Cli(e)) => return Err(e),
        }
    }
    if failed > 0 {
        return Err(CliError::Failed(failed));
    }
    Ok(())
}

enum StepError {
    Engine(waypath::Error),
    Cli(CliError),
}

impl From<waypath::Error> for StepError {
    fn from(value: waypath::Error) -> Self {
        Self::Engine(value)
    }
}

impl From<CliError> for StepError {
    fn from(value: CliError) -> Self {
        Self::Cli(value)
    }
}

impl From<std::io::Error> for StepError {
    fn from(value: std::io::Error) -> Self {
        Self::Cli(CliError::Io(value))
    }
}

fn apply(
    step: &Step,
    graph: &mut Graph,
    opts: RunOptions,
    out: &mut impl Write,
) -> Result<(), StepError> {
    match step {
        Step::Node(id) => {
            graph.add_node(id.as_str());
        }
        Step::Edge { a, b, weight } => graph.add_edge(a, b, *weight)?,
        Step::Clear => graph.clear(),
        _ if opts.mutations_only => {}
        Step::Path { source, target } => {
            let found = waypath::shortest_path(graph, source, target)?;
            if opts.json {
                let q = QueryOut::Path {
                    source,
                    target,
                    path: found.as_ref().map(|p| p.nodes()),
                    total_weight: found.as_ref().map(|p| p.total_weight()),
                };
                write_json(out, &q, opts.pretty)?;
            } else {
                match found {
                    Some(p) => writeln!(out, "{}", p.describe())?,
                    None => writeln!(out, "{}", describe_no_path(source, target))?,
                }
            }
        }
        Step::Neighbors(id) => {
            let neighbors = graph.neighbors(id)?;
            if opts.json {
                let q = QueryOut::Neighbors {
                    node: id,
                    neighbors: neighbors
                        .iter()
                        .map(|&(node, weight)| NeighborOut { node, weight })
                        .collect(),
                };
                write_json(out, &q, opts.pretty)?;
            } else if neighbors.is_empty() {
                writeln!(out, "{id}: (no neighbors)")?;
            } else {
                let listed: Vec<String> = neighbors
                    .iter()
                    .map(|&(node, weight)| format!("{node} ({})", format_weight(weight)))
                    .collect();
                writeln!(out, "{id}: {}", listed.join(", "))?;
            }
        }
        Step::Distances(source) => {
            let tree = waypath::dijkstra(graph, source)?;
            let distances = tree.distances();
            if opts.json {
                let q = QueryOut::Distances {
                    source,
                    distances: distances
                        .iter()
                        .map(|&(node, distance)| DistanceOut { node, distance })
                        .collect(),
                };
                write_json(out, &q, opts.pretty)?;
            } else {
                let listed: Vec<String> = distances
                    .iter()
                    .map(|&(node, d)| format!("{node}={}", format_weight(d)))
                    .collect();
                writeln!(out, "distances from {source}: {}", listed.join(", "))?;
            }
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let lines = script::parse(&text)?;

    let mut graph = Graph::new();
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    match args.command {
        Command::Run => {
            let opts = RunOptions {
                json: args.json,
                pretty: args.pretty,
                keep_going: args.keep_going,
                mutations_only: false,
            };
            execute(&lines, &mut graph, opts, &mut out, &mut err)
        }
        Command::Check => {
            let opts = RunOptions {
                mutations_only: true,
                ..Default::default()
            };
            execute(&lines, &mut graph, opts, &mut out, &mut err)?;
            if args.json {
                let summary = CheckOut {
                    nodes: graph.node_count(),
                    edges: graph.edge_count(),
                };
                write_json(&mut out, &summary, args.pretty)?;
            } else {
                writeln!(
                    out,
                    "nodes: {}, edges: {}",
                    graph.node_count(),
                    graph.edge_count()
                )?;
            }
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("waypath-cli")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    fn run_script(text: &str, opts: RunOptions) -> (Result<(), CliError>, String, String) {
        let lines = script::parse(text).unwrap();
        let mut graph = Graph::new();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = execute(&lines, &mut graph, opts, &mut out, &mut err);
        (
            res,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    const SCENARIO: &str = "\
node A
node B
node C
node D
edge A B 1
edge B C 2
edge A C 4
edge C D 1
node E
path A D
path A E
";

    #[test]
    fn parses_command_flags_and_input() {
        let args = parse_args(&argv(&["check", "--json", "graph.txt"])).unwrap();
        assert_eq!(args.command, Command::Check);
        assert!(args.json);
        assert_eq!(args.input.as_deref(), Some("graph.txt"));

        let args = parse_args(&argv(&["--pretty", "-"])).unwrap();
        assert_eq!(args.command, Command::Run);
        assert!(args.json && args.pretty);
        assert_eq!(args.input.as_deref(), Some("-"));

        assert!(matches!(
            parse_args(&argv(&["a.txt", "b.txt"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["--bogus"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn text_output_uses_result_messages() {
        let (res, out, err) = run_script(SCENARIO, RunOptions::default());
        assert!(res.is_ok());
        assert_eq!(
            out,
            "The shortest path from A to D is [A, B, C, D] with a total weight of 4.\n\
             No path found between A and E.\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn json_output_has_one_object_per_query() {
        let opts = RunOptions {
            json: true,
            ..Default::default()
        };
        let (res, out, _) = run_script(SCENARIO, opts);
        assert!(res.is_ok());

        let values: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(
            values[0],
            serde_json::json!({
                "query": "path",
                "source": "A",
                "target": "D",
                "path": ["A", "B", "C", "D"],
                "total_weight": 4.0
            })
        );
        assert_eq!(values[1]["path"], serde_json::Value::Null);
        assert_eq!(values[1]["total_weight"], serde_json::Value::Null);
    }

    #[test]
    fn first_failure_stops_the_run() {
        let text = "node A\nedge A Z 1\npath A A\n";
        let (res, out, err) = run_script(text, RunOptions::default());
        assert!(matches!(res, Err(CliError::Failed(1))));
        assert!(out.is_empty());
        assert_eq!(err, "line 2: unknown node: Z\n");
    }

    #[test]
    fn keep_going_reports_every_failure() {
        let text = "node A\nedge A A 1\nedge A Z -2\npath A Q\npath A A\n";
        let opts = RunOptions {
            keep_going: true,
            ..Default::default()
        };
        let (res, out, err) = run_script(text, opts);
        assert!(matches!(res, Err(CliError::Failed(3))));
        assert_eq!(
            out,
            "The shortest path from A to A is [A] with a total weight of 0.\n"
        );
        assert_eq!(
            err,
            "line 2: self-loop on node A is not allowed\n\
             line 3: invalid edge weight -2: weights must be finite and non-negative\n\
             line 4: unknown node: Q\n"
        );
    }

    #[test]
    fn neighbors_and_distances_are_listed() {
        let text = "node A\nnode B\nnode C\nnode D\nedge A B 1\nedge A C 2.5\n\
                    neighbors A\nneighbors D\ndistances B\n";
        let (res, out, _) = run_script(text, RunOptions::default());
        assert!(res.is_ok());
        assert_eq!(
            out,
            "A: B (1), C (2.5)\n\
             D: (no neighbors)\n\
             distances from B: B=0, A=1, C=3.5\n"
        );
    }

    #[test]
    fn clear_forgets_earlier_nodes() {
        let text = "node A\nnode B\nedge A B 1\nclear\npath A B\n";
        let (res, _, err) = run_script(text, RunOptions::default());
        assert!(matches!(res, Err(CliError::Failed(1))));
        assert_eq!(err, "line 5: unknown node: A\n");
    }
}
