use std::time::Instant;

use clap::{App, ArgMatches, load_yaml};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use color_tabu::{Graph, ColorResult, TraceEvent, tabucol, tabucol_decreasing};
use color_tabu::util::{read_params, export_results, write_trace};


/** solves a coloring instance using TABUCOL */
pub fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    // parse arguments
    let yaml = load_yaml!("tabucol.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    if let Err(e) = run(&main_args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(main_args:&ArgMatches) -> ColorResult<()> {
    let params = read_params(main_args)?;
    println!("reading instance: {}...", params.inst_filename);
    let graph = Graph::from_dimacs_file(&params.inst_filename)?;
    graph.display_statistics();
    println!("=======================");
    println!("seed: {}", params.seed);
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut events:Vec<TraceEvent> = Vec::new();
    let mut record = |e:&TraceEvent| events.push(e.clone());
    let trace:Option<&mut dyn FnMut(&TraceEvent)> = match params.trace_file {
        None => None,
        Some(_) => Some(&mut record),
    };
    // solve it
    let start = Instant::now();
    let (solution, iterations) = match params.k {
        Some(k) => {
            let outcome = tabucol(&graph, k, &params.params, &mut rng, trace)?;
            let iterations = outcome.iterations();
            if !outcome.is_converged() {
                println!("No coloring found with {} colors.", k);
            }
            (outcome.into_solution(), Some(iterations))
        }
        None => (tabucol_decreasing(&graph, &params.params, &mut rng, trace)?, None),
    };
    let time_searched = start.elapsed().as_secs_f32();
    let nb_colors = solution.as_ref().map(|s| s.nb_colors_used());
    if let Some(nb) = nb_colors {
        println!("found coloring with {} colors", nb);
    }
    println!("time: {:.3}s", time_searched);
    let stats = json!({
        "inst_name": params.inst_filename,
        "k": params.k,
        "nb_colors": nb_colors,
        "iterations": iterations,
        "time_searched": time_searched,
        "seed": params.seed,
        "params": params.params,
    });
    // export results
    export_results(
        &graph, solution.as_ref(), &stats,
        params.perf_file.as_deref(), params.sol_file.as_deref(),
    )?;
    if let Some(filename) = &params.trace_file {
        write_trace(filename, &events)?;
    }
    Ok(())
}
