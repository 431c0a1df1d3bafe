//! Deterministic mapping from drone id to an external flight-controller
//! endpoint, for deployments that mirror simulated vehicles onto real
//! MAVLink-speaking ground-control links.

use crate::constants::{FLIGHT_CONTROLLER_BASE_PORT, FLIGHT_CONTROLLER_PORT_STRIDE};

/// UDP port and MAVLink system id a given drone's flight controller would
/// be reachable on, were this simulation driving real hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightControllerAssignment {
    pub udp_port: u16,
    pub system_id: u32,
}

/// `udp_port = base + id * stride`, `system_id = id + 1`. Deterministic
/// and collision-free for any `id` within `u16` range at the default
/// stride; required strictly for protocol uniqueness with the in-host
/// multiplex.
pub fn flight_controller_assignment(drone_id: u32) -> FlightControllerAssignment {
    FlightControllerAssignment {
        udp_port: FLIGHT_CONTROLLER_BASE_PORT
            .saturating_add((drone_id as u16).saturating_mul(FLIGHT_CONTROLLER_PORT_STRIDE)),
        system_id: drone_id + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ports_are_distinct_and_ordered() {
        let a0 = flight_controller_assignment(0);
        let a1 = flight_controller_assignment(1);
        let a2 = flight_controller_assignment(2);
        assert_eq!(a0.udp_port, FLIGHT_CONTROLLER_BASE_PORT);
        assert!(a1.udp_port > a0.udp_port);
        assert!(a2.udp_port > a1.udp_port);
        assert_eq!(a1.udp_port - a0.udp_port, FLIGHT_CONTROLLER_PORT_STRIDE);
    }

    #[test]
    fn system_id_is_one_based() {
        assert_eq!(flight_controller_assignment(0).system_id, 1);
        assert_eq!(flight_controller_assignment(7).system_id, 8);
    }
}
