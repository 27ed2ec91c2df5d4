use super::host::ClassCapsBuilder;
use crate::constants::*;
use crate::utils::vector3d::Vector3D;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrusterSpec {
    pub position: Vector3D,
    pub direction: Vector3D,
    pub max_thrust: f64,
    /// Index into `PropulsionLayout::tanks`.
    pub tank: usize,
    pub isp_vacuum: f64,
    pub isp_sea_level: f64,
    pub reference_pressure: f64,
}

impl ThrusterSpec {
    fn main(position: Vector3D, direction: Vector3D) -> Self {
        ThrusterSpec {
            position,
            direction,
            max_thrust: MAIN_THRUST,
            tank: 0,
            isp_vacuum: MAIN_ISP_VACUUM,
            isp_sea_level: MAIN_ISP_SEA_LEVEL,
            reference_pressure: SEA_LEVEL_PRESSURE,
        }
    }

    fn rcs(position: Vector3D, direction: Vector3D, max_thrust: f64, tank: usize) -> Self {
        ThrusterSpec {
            position,
            direction,
            max_thrust,
            tank,
            isp_vacuum: RCS_ISP_VACUUM,
            isp_sea_level: RCS_ISP_SEA_LEVEL,
            reference_pressure: SEA_LEVEL_PRESSURE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThrusterGroup {
    Main,
    PitchUp,
    PitchDown,
    BankLeft,
    BankRight,
    Up,
    Down,
    YawLeft,
    YawRight,
    Left,
    Right,
    Forward,
    Back,
}

/// Tanks, engines and attitude groups of the vessel class.
pub struct PropulsionLayout {
    pub tanks: Vec<f64>,
    pub main: ThrusterSpec,
    pub rcs: Vec<ThrusterSpec>,
    pub groups: Vec<(ThrusterGroup, Vec<usize>)>,
}

impl PropulsionLayout {
    pub fn shuttle_d() -> Self {
        // Tank 0 feeds the main engine, tanks 1..=12 the RCS quads
        let mut tanks = vec![MAIN_FUEL_MASS];
        tanks.extend(std::iter::repeat(RCS_TANK_MASS).take(RCS_TANK_COUNT));

        let v = Vector3D::new;
        let rcs = vec![
            // command module, forward
            ThrusterSpec::rcs(v(1.611, 0.0, 24.707), v(0.0, 0.0, 1.0), RCS_THRUST, 1),
            ThrusterSpec::rcs(v(-1.611, 0.0, 24.707), v(0.0, 0.0, 1.0), RCS_THRUST, 2),
            ThrusterSpec::rcs(v(1.8505, 0.0, 24.306), v(-1.0, 0.0, 0.0), RCS_FORWARD_LATERAL_THRUST, 1),
            ThrusterSpec::rcs(v(-1.8505, 0.0, 24.306), v(1.0, 0.0, 0.0), RCS_FORWARD_LATERAL_THRUST, 2),
            // forward truss
            ThrusterSpec::rcs(v(1.124, 2.03, 16.182), v(0.0, 1.0, 0.0), RCS_THRUST, 3),
            ThrusterSpec::rcs(v(-1.124, 2.03, 16.182), v(0.0, 1.0, 0.0), RCS_THRUST, 4),
            ThrusterSpec::rcs(v(1.124, -1.951, 16.182), v(0.0, -1.0, 0.0), RCS_THRUST, 5),
            ThrusterSpec::rcs(v(-1.124, -1.951, 16.182), v(0.0, -1.0, 0.0), RCS_THRUST, 6),
            // aft truss
            ThrusterSpec::rcs(v(1.124, 2.03, -16.125), v(0.0, 1.0, 0.0), RCS_THRUST, 7),
            ThrusterSpec::rcs(v(-1.124, 2.03, -16.125), v(0.0, 1.0, 0.0), RCS_THRUST, 8),
            ThrusterSpec::rcs(v(1.124, -1.951, -16.125), v(0.0, -1.0, 0.0), RCS_THRUST, 9),
            ThrusterSpec::rcs(v(-1.124, -1.951, -16.125), v(0.0, -1.0, 0.0), RCS_THRUST, 10),
            // service module
            ThrusterSpec::rcs(v(1.89, 0.0, -29.371), v(0.0, 0.0, -1.0), RCS_THRUST, 11),
            ThrusterSpec::rcs(v(-1.89, 0.0, -29.371), v(0.0, 0.0, -1.0), RCS_THRUST, 12),
            ThrusterSpec::rcs(v(2.22, 0.0, -28.963), v(-1.0, 0.0, 0.0), RCS_THRUST, 11),
            ThrusterSpec::rcs(v(-2.22, 0.0, -28.963), v(1.0, 0.0, 0.0), RCS_THRUST, 12),
        ];

        let groups = vec![
            (ThrusterGroup::PitchUp, vec![4, 5, 10, 11]),
            (ThrusterGroup::PitchDown, vec![6, 7, 8, 9]),
            (ThrusterGroup::BankLeft, vec![4, 7, 8, 11]),
            (ThrusterGroup::BankRight, vec![5, 6, 9, 10]),
            (ThrusterGroup::Up, vec![4, 5, 8, 9]),
            (ThrusterGroup::Down, vec![6, 7, 10, 11]),
            (ThrusterGroup::YawLeft, vec![2, 15]),
            (ThrusterGroup::YawRight, vec![3, 14]),
            (ThrusterGroup::Left, vec![2, 14]),
            (ThrusterGroup::Right, vec![3, 15]),
            (ThrusterGroup::Forward, vec![0, 1]),
            (ThrusterGroup::Back, vec![12, 13]),
        ];

        PropulsionLayout {
            tanks,
            main: ThrusterSpec::main(v(0.0, 0.0, -35.82), v(0.0, 0.0, 1.0)),
            rcs,
            groups,
        }
    }

    pub fn register(&self, caps: &mut dyn ClassCapsBuilder) {
        let tank_ids: Vec<usize> = self
            .tanks
            .iter()
            .map(|capacity| caps.create_propellant(*capacity))
            .collect();

        let main_id = caps.create_thruster(&self.main, tank_ids[self.main.tank]);
        caps.create_thruster_group(&[main_id], ThrusterGroup::Main);

        let rcs_ids: Vec<usize> = self
            .rcs
            .iter()
            .map(|spec| caps.create_thruster(spec, tank_ids[spec.tank]))
            .collect();

        for (group, members) in &self.groups {
            let ids: Vec<usize> = members.iter().map(|&index| rcs_ids[index]).collect();
            caps.create_thruster_group(&ids, *group);
        }
    }
}
