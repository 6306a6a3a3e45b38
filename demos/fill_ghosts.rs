use std::convert::TryFrom;
use clap::Parser;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use fillpatch::Error;
use fillpatch::geometry::{Geometry, GeometryConfig};
use fillpatch::index_box::IndexBox;
use fillpatch::int_vect::IntVect;
use fillpatch::layout::DisjointBoxLayout;
use fillpatch::level_data::{Components, LevelData};
use fillpatch::problem_domain::ProblemDomain;
use fillpatch::PiecewiseLinearFillPatch;




#[derive(Debug, Parser)]
#[clap(version = "0.1", about = "Fill the ghost zones of a two-level mesh and dump the result")]
struct Opts {
    #[clap(short = 'n', long, default_value = "32")]
    coarse_size: i64,

    #[clap(short = 'r', long, default_value = "2")]
    ratio: i64,

    #[clap(long, default_value = "2")]
    radius: i64,

    #[clap(short = 'g', long, default_value = "1")]
    geometry: i32,

    #[clap(short, long)]
    config: Option<String>,

    #[clap(long)]
    periodic: bool,

    #[clap(long, default_value = "info")]
    log_level: String,

    #[clap(short, long, default_value = "fill_ghosts.cbor")]
    output: String,
}




#[derive(serde::Serialize)]
struct PatchOutput {
    lo: Vec<i64>,
    hi: Vec<i64>,
    values: Vec<f64>,
}




#[derive(serde::Serialize)]
struct Output {
    geometry: GeometryConfig,
    ratio: i64,
    patches: Vec<PatchOutput>,
}




// ============================================================================
fn quadrants(b: IndexBox<2>) -> Vec<IndexBox<2>> {
    let (lo, hi) = (b.lo(), b.hi());
    let mid = IntVect([(lo[0] + hi[0] + 1) / 2, (lo[1] + hi[1] + 1) / 2]);

    vec![
        IndexBox::new(lo, mid - IntVect::unit()),
        IndexBox::from_bounds([mid[0], lo[1]], [hi[0], mid[1] - 1]),
        IndexBox::from_bounds([lo[0], mid[1]], [mid[0] - 1, hi[1]]),
        IndexBox::new(mid, hi),
    ]
}

fn gaussian(c: IntVect<2>, n: i64) -> f64 {
    let x = (c[0] as f64 + 0.5) / n as f64 - 0.5;
    let y = (c[1] as f64 + 0.5) / n as f64 - 0.5;
    1.0 + (-(x * x + y * y) / 0.02).exp()
}




// ============================================================================
fn main() -> Result<(), Error> {
    let opts = Opts::parse();
    let level = opts.log_level.parse::<LevelFilter>().map_err(|e| Error::InvalidConfig(e.to_string()))?;
    SimpleLogger::new().with_level(level).init().map_err(|e| Error::InvalidConfig(e.to_string()))?;

    info!("{:?}", opts);

    let geometry = match &opts.config {
        Some(path) => GeometryConfig::from_cbor(std::fs::File::open(path)?)?,
        None => GeometryConfig {
            geometry: Geometry::try_from(opts.geometry)?,
            ..GeometryConfig::default()
        },
    };

    let n = opts.coarse_size;
    let domain_box = IndexBox::from_bounds([0, 0], [n - 1, n - 1]);
    let domain = ProblemDomain::new(domain_box, [opts.periodic; 2]);
    let coarse = DisjointBoxLayout::new(quadrants(domain_box))?.sorted();

    let fine_region = IndexBox::from_bounds([n / 4, n / 4], [3 * n / 4 - 1, 3 * n / 4 - 1]).refine(opts.ratio);
    let fine = DisjointBoxLayout::new(quadrants(fine_region))?.sorted();
    let dx = 1.0 / (n * opts.ratio) as f64;

    let mut fill_patch = PiecewiseLinearFillPatch::new();
    fill_patch.define(&fine, &coarse, 1, &domain, opts.ratio, dx, opts.radius, false, &geometry);
    fill_patch.log_stencils();

    let old = LevelData::from_function(&coarse, 1, 0, |c, s| s[0] = gaussian(c, n));
    let new = LevelData::from_function(&coarse, 1, 0, |c, s| s[0] = 2.0 * gaussian(c, n));
    let mut fine_data = LevelData::from_function(&fine, 1, opts.radius, |c, s| s[0] = gaussian(c, n * opts.ratio));

    let start = std::time::Instant::now();
    fill_patch.fill_interp(&mut fine_data, Some(&old), Some(&new), 0.5, Components::all(1));
    let filled: usize = fill_patch.stencils().iter().map(|s| s.fine_interp.len()).sum();

    info!("filled {} ghost cells in {:.3} ms", filled, start.elapsed().as_secs_f64() * 1e3);

    let output = Output {
        geometry,
        ratio: opts.ratio,
        patches: fine_data.arrays().iter().map(|a| PatchOutput {
            lo: a.region().lo().0.to_vec(),
            hi: a.region().hi().0.to_vec(),
            values: a.data().to_vec(),
        }).collect(),
    };

    let file = std::fs::File::create(&opts.output)?;
    let mut buffer = std::io::BufWriter::new(file);
    ciborium::ser::into_writer(&output, &mut buffer).map_err(|e| Error::InvalidConfig(e.to_string()))?;

    info!("wrote {}", opts.output);
    Ok(())
}
