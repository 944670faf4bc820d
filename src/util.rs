use std::fs;
use std::io::{BufWriter, Write};
use std::str::FromStr;

use clap::ArgMatches;
use serde_json::Value;

use crate::color::{Graph, Solution, checker, CheckerResult};
use crate::error::{ColorError, ColorResult};
use crate::search::tabucol::{TabuColParams, TraceEvent};


/** parameters of a command line run */
#[derive(Debug, Clone)]
pub struct RunParams {
    /// DIMACS instance file
    pub inst_filename: String,
    /// number of colors (None: decrease the number of colors until failure)
    pub k: Option<usize>,
    /// search parameters
    pub params: TabuColParams,
    /// random seed
    pub seed: u64,
    /// where to write the solution
    pub sol_file: Option<String>,
    /// where to write the performance statistics (JSON)
    pub perf_file: Option<String>,
    /// where to write the search trace (JSON lines)
    pub trace_file: Option<String>,
}

/// parses an optional numeric argument
fn parse_arg<T:FromStr>(main_args:&ArgMatches, name:&str) -> ColorResult<Option<T>> {
    match main_args.value_of(name) {
        None => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(|_|
            ColorError::config(format!("unable to parse {} (got \"{}\")", name, s))
        ),
    }
}

/** reads command line input.
search parameters are read from the `params` JSON file if given, then
overridden by the individual options.
*/
pub fn read_params(main_args:&ArgMatches) -> ColorResult<RunParams> {
    let inst_filename = main_args.value_of("instance")
        .ok_or_else(|| ColorError::config("missing instance file"))?
        .to_string();
    let mut params = match main_args.value_of("params") {
        None => TabuColParams::default(),
        Some(filename) => serde_json::from_str(&fs::read_to_string(filename)?)?,
    };
    if let Some(tabu_size) = parse_arg(main_args, "tabu_size")? { params.tabu_size = tabu_size; }
    if let Some(reps) = parse_arg(main_args, "reps")? { params.reps = reps; }
    if let Some(max_iterations) = parse_arg(main_args, "max_iterations")? { params.max_iterations = max_iterations; }
    let seed = match parse_arg(main_args, "seed")? {
        Some(seed) => seed,
        None => rand::random::<u64>(),
    };
    let output = |name:&str| main_args.value_of(name).map(|e| {
        println!("printing {} in: {}", name, e);
        e.to_string()
    });
    Ok(RunParams {
        inst_filename,
        k: parse_arg(main_args, "colors")?,
        params,
        seed,
        sol_file: output("solution"),
        perf_file: output("perf"),
        trace_file: output("trace"),
    })
}

/// exports search results to files
pub fn export_results(
    graph:&Graph,
    solution:Option<&Solution>,
    stats:&Value,
    perf_file:Option<&str>,
    sol_file:Option<&str>,
) -> ColorResult<()> {
    // export statistics
    if let Some(filename) = perf_file {
        fs::write(filename, serde_json::to_string(stats)?)?;
    }
    // export solution
    if let (Some(filename), Some(sol)) = (sol_file, solution) {
        match checker(graph, sol) {
            CheckerResult::Ok(_) => graph.write_solution(filename, sol)?,
            checker_result => tracing::error!(?checker_result, "invalid solution, not exported"),
        }
    }
    Ok(())
}

/// writes trace events, one JSON object per line
pub fn write_trace(filename:&str, events:&[TraceEvent]) -> ColorResult<()> {
    let mut writer = BufWriter::new(fs::File::create(filename)?);
    for e in events {
        serde_json::to_writer(&mut writer, e)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
