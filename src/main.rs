use std::fs;
use std::path::Path;

use log::info;
use rand::Rng;
use shuttle_d_vessel::*;

const START_ALTITUDE: f64 = 400.0; // m
const START_VERTICAL_SPEED: f64 = -12.0; // m/s
const HUD_HEIGHT: i32 = 768;

fn write_scenario(path: &Path, lines: &[String]) -> Result<(), VesselError> {
    fs::write(path, lines.join("\n"))?;
    Ok(())
}

fn read_scenario(path: &Path) -> Result<Vec<String>, VesselError> {
    let text = fs::read_to_string(path)?;
    Ok(text.lines().map(str::to_string).collect())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut host = HeadlessHost::new("Shuttle-D");
    let mut crew = CrewRoster::default();
    let mut cargo = CargoHold::default();
    crew.board(CrewMember::new("Peter Falcon", 38, "Capt"));
    cargo.in_range.push(2_400.0);

    let module = VesselModule::init(&mut host)?;
    let mut vessel = Vessel::new(VesselConfig::default())?;
    vessel.set_class_caps(&mut host);
    vessel.post_creation(&mut host);

    let mut rng = rand::thread_rng();
    let touchdown_speed: f64 = -rng.gen_range(0.8..2.4);
    let mut altitude = START_ALTITUDE;
    let mut landed_at: Option<f64> = None;

    let mut telemetry = Telemetry::new();
    let mut elapsed_time = 0.0;
    let mut step: u64 = 0;

    while elapsed_time < MAX_SIMULATION_TIME {
        // Descent profile easing toward the touchdown speed
        let vertical_speed = if landed_at.is_some() {
            0.0
        } else {
            touchdown_speed
                + (START_VERTICAL_SPEED - touchdown_speed) * (altitude / START_ALTITUDE)
        };
        altitude = (altitude + vertical_speed * TIME_STEP).max(0.0);
        let touching = altitude == 0.0;
        host.flight = FlightState {
            ground_contact: touching,
            horizon_airspeed: Vector3D::new(0.0, vertical_speed, 0.0),
            dynamic_pressure: Aerodynamics::calculate_dynamic_pressure(
                AIR_DENSITY_SEA_LEVEL,
                vertical_speed.abs(),
            ),
        };
        if touching && landed_at.is_none() {
            info!("Touchdown at {:.2} m/s", vertical_speed);
            if let Some(coefficients) = host.airfoil_coefficients(0, 0.0, 0.0, 1e6) {
                info!(
                    "Airfoil at rest: cl {:.4} cm {:.4} cd {:.4}",
                    coefficients.lift, coefficients.moment, coefficients.drag
                );
            }
            landed_at = Some(elapsed_time);
        }

        let report = {
            let mut ctx = HostContext::new(&mut host, &mut crew, &mut cargo);

            if step == 50 {
                vessel.consume_key(&mut ctx, Key::G, true, Modifiers::NONE);
            }
            if let Some(landed) = landed_at {
                let since_landing = elapsed_time - landed;
                if (since_landing - 5.0).abs() < TIME_STEP / 2.0 {
                    vessel.vc_switch(VcSwitch::BayAOpen);
                }
                if (since_landing - 30.0).abs() < TIME_STEP / 2.0 {
                    vessel.consume_key(&mut ctx, Key::C, true, Modifiers::NONE);
                    vessel.consume_key(&mut ctx, Key::Digit8, true, Modifiers::NONE);
                }
                if (since_landing - 35.0).abs() < TIME_STEP / 2.0 {
                    vessel.consume_key(&mut ctx, Key::M, true, Modifiers::NONE);
                }
            }

            vessel.update(&mut ctx, TIME_STEP)
        };

        // Answer whatever prompt the enrollment wizard has open
        if let EnrollmentStep::Waiting(field) = vessel.enrollment.step() {
            vessel.enrollment.submit(match field {
                EnrollmentField::Name => "Mary Jackson",
                EnrollmentField::Age => "29",
                EnrollmentField::Role => "Sci",
            });
        }

        telemetry.collect_data(&vessel, &report, TIME_STEP);
        if step % 10 == 0 {
            vessel.draw_hud(&mut host, module.style(), HUD_HEIGHT, 1.0);
        }

        elapsed_time += TIME_STEP;
        step += 1;
    }

    let mut lines = Vec::new();
    vessel.save_state(
        &mut HostContext::new(&mut host, &mut crew, &mut cargo),
        &mut lines,
    );
    let path = std::env::temp_dir().join("shuttle_d.scn");
    write_scenario(&path, &lines)?;
    info!("Scenario saved to {}", path.display());

    let mut restored = Vessel::new(VesselConfig::default())?;
    let mut restored_host = HeadlessHost::new("Shuttle-D");
    let mut restored_crew = CrewRoster::default();
    let mut restored_cargo = CargoHold::default();
    restored.load_state(
        &mut HostContext::new(&mut restored_host, &mut restored_crew, &mut restored_cargo),
        read_scenario(&path)?,
    );
    info!(
        "Restored {:?} with {} crew and {:.0} kg of cargo",
        restored.statuses(),
        restored_crew.crew_count(),
        restored_cargo.total_mass()
    );

    module.exit(&mut host);
    telemetry.display_data();

    Ok(())
}
