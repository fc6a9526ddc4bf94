use clap::Parser;

use semialg_rs::bounding_box::BoundingBox;
use semialg_rs::interval::Interval;
use semialg_rs::poly::{int, Rational};
use semialg_rs::solver::{Solver, SolverConfig};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Size of the square box `[0, size] x [0, size]`.
    #[arg(value_name = "INT", default_value = "2")]
    size: i64,

    /// Cache size (in bits, so the actual size is `2^bits` entries).
    #[clap(long, value_name = "INT", default_value = "14")]
    cache_bits: usize,

    /// Disable pruning of redundant roots.
    #[clap(long)]
    no_prune: bool,

    /// Print every leaf cell of the result.
    #[clap(long)]
    cells: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let side = Interval::new(int(0), int(args.size));
    let config = SolverConfig::new()
        .with_cache_bits(args.cache_bits)
        .with_pruning(!args.no_prune);
    let solver = Solver::try_new(BoundingBox::new(vec![side.clone(), side]), config)?;
    println!("solver = {:?}", solver);

    // p = x^2 - y, q = (x - 2)^2 - y
    let x = solver.variable(0);
    let y = solver.variable(1);
    let p = &(&x * &x) - &y;
    let q = &(&(&(&x * &x) - &x.scale(&int(4))) + &solver.constant(int(4))) - &y;
    println!("p = {}", p);
    println!("q = {}", q);

    let above_p = solver.not(&solver.positive(&p));
    let above_q = solver.not(&solver.positive(&q));
    println!("above p = {}", above_p);
    println!("above q = {}", above_q);

    let both = solver.and(&above_p, &above_q);
    println!("above both, {} nodes = {}", both.size(), both);
    println!("above both is subset of above p: {}", solver.subset(&both, &above_p));

    let either = solver.or(&above_p, &above_q);
    println!("above either, {} nodes = {}", either.size(), either);

    if args.cells {
        for cell in solver.walk_cells(&both) {
            let point: Vec<String> = cell.point.iter().map(Rational::to_string).collect();
            println!(
                "cell {:?} at ({}) is {}",
                cell.coordinates,
                point.join(", "),
                if cell.member { "in" } else { "out" }
            );
        }
    }

    let stats = solver.stats();
    println!("projection cache hits: {}", stats.projection_hits);
    println!("projection cache misses: {}", stats.projection_misses);
    println!("isolation cache hits: {}", stats.isolation_hits);
    println!("isolation cache misses: {}", stats.isolation_misses);
    println!("cache evictions: {}", stats.evictions);

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
