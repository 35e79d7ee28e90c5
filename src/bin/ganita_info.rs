//! Report which backend this build of ganita selected, optionally running a
//! numeric smoke check against the catalogue's core identities.
//!
//! # Usage
//!
//! ```bash
//! ganita-info
//! ganita-info --check
//! ```

use clap::Parser;

use ganita::{Matrix, Quaternion, Vector};

#[derive(Parser)]
#[command(name = "ganita-info")]
#[command(about = "Report the active ganita backend and run a smoke check")]
struct Args {
    /// Run a quick numeric smoke check before exiting
    #[arg(long)]
    check: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("ganita {}", env!("CARGO_PKG_VERSION"));
    log::info!("  backend: {}", ganita::active());
    log::info!("  target:  {}", std::env::consts::ARCH);

    if args.check && !smoke_check() {
        log::error!("smoke check failed");
        std::process::exit(1);
    }
}

/// Exercise one identity per operation family and report the outcome.
fn smoke_check() -> bool {
    let mut ok = true;

    // Quaternion times its inverse is the identity rotation.
    let q = Quaternion::new(1.0, -2.0, 3.0, -4.0);
    let p = q * q.inverse();
    ok &= p.approx_eq(Quaternion::identity());
    log::info!("  q * q^-1 == identity: {}", p.approx_eq(Quaternion::identity()));

    // A quarter turn about z maps the x axis onto the y axis.
    let half = std::f32::consts::FRAC_PI_4;
    let turn = Quaternion::new(0.0, 0.0, half.sin(), half.cos());
    let turned = turn.rotate(Vector::x_axis());
    let expected = Vector::new(0.0, 1.0, 0.0, 1.0);
    ok &= turned.approx_eq(expected);
    log::info!("  rotate(q_z90, x) == y: {}", turned.approx_eq(expected));

    // The identity matrix transforms every point to itself.
    let pt = Vector::new(1.0, 2.0, 3.0, 1.0);
    let through = Matrix::identity().transform(pt);
    ok &= through == pt;
    log::info!("  transform(I, p) == p: {}", through == pt);

    ok
}
