//! Drive the full simulation contract from the command line: configure the
//! drives, run a batch integration, then index into the finished series the
//! way a playback layer would.

use crane_core::CraneSimulation;
use crane_types::{Axis, CraneError};

fn main() -> Result<(), CraneError> {
    let mut sim = CraneSimulation::new();
    sim.params_mut().set_target_time(5.0)?;
    sim.params_mut().set_torque(Axis::Slew, 260.0)?;
    sim.params_mut().set_torque(Axis::Luff, -45.0)?;

    sim.run()?;

    println!(
        "integrated {} samples at dt = {} s (revision {})",
        sim.times().len(),
        sim.params().dt(),
        sim.params().revision()
    );

    // Print every half second, the way a playback layer would frame-index.
    let stride = (0.5 / sim.params().dt()) as usize;
    println!("{:>6} {:>10} {:>10} {:>10} {:>12}", "t", "theta", "phi", "psi", "|F| (N)");
    for i in (0..sim.times().len()).step_by(stride.max(1)) {
        let reaction = &sim.reactions()[i];
        println!(
            "{:>6.2} {:>10.5} {:>10.5} {:>10.5} {:>12.1}",
            sim.times()[i],
            sim.theta()[i],
            sim.phi()[i],
            sim.psi()[i],
            reaction.force_magnitude(),
        );
    }

    Ok(())
}
