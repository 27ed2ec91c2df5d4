pub struct LifeSupport {
    oxygen: f64,
    capacity: f64,
    consumption_per_crew: f64,
}

impl LifeSupport {
    // Starts with a full tank
    pub fn new(capacity: f64, consumption_per_crew: f64) -> Self {
        LifeSupport {
            oxygen: capacity,
            capacity,
            consumption_per_crew,
        }
    }

    // Breathes down the tank for one timestep and returns what was consumed
    pub fn consume(&mut self, crew_count: usize, delta_time: f64) -> f64 {
        let demand = self.consumption_per_crew * crew_count as f64 * delta_time.max(0.0);
        let consumed = demand.min(self.oxygen);
        self.oxygen = (self.oxygen - demand).max(0.0);
        consumed
    }

    pub fn oxygen_remaining(&self) -> f64 {
        self.oxygen
    }

    pub fn set_oxygen_remaining(&mut self, oxygen: f64) {
        self.oxygen = oxygen.clamp(0.0, self.capacity);
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    // The clamp in `consume` lands exactly on zero, so an exact test is safe
    pub fn is_depleted(&self) -> bool {
        self.oxygen == 0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::{O2_CONSUMPTION_PER_CREW, O2_TANK_CAPACITY};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_starts_full() {
        let life_support = LifeSupport::new(O2_TANK_CAPACITY, O2_CONSUMPTION_PER_CREW);
        assert_eq!(life_support.oxygen_remaining(), 1_000.0);
        assert_eq!(life_support.capacity(), 1_000.0);
        assert!(!life_support.is_depleted());
    }

    #[test]
    fn test_consumption_scales_with_crew() {
        let c = 0.5;
        let mut life_support = LifeSupport::new(1_000.0, c);

        let consumed = life_support.consume(2, 10.0);

        assert_abs_diff_eq!(consumed, 2.0 * c * 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(life_support.oxygen_remaining(), 1_000.0 - 2.0 * c * 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_crew_breathes_nothing() {
        let mut life_support = LifeSupport::new(1_000.0, 0.5);
        assert_eq!(life_support.consume(0, 100.0), 0.0);
        assert_eq!(life_support.oxygen_remaining(), 1_000.0);
    }

    #[test]
    fn test_depletion_lands_on_exact_zero() {
        let mut life_support = LifeSupport::new(1_000.0, 0.5);

        let consumed = life_support.consume(2, 2_000.0);

        assert_abs_diff_eq!(consumed, 1_000.0, epsilon = 1e-9);
        assert_eq!(life_support.oxygen_remaining(), 0.0);
        assert!(life_support.is_depleted());
    }

    #[test]
    fn test_set_oxygen_is_clamped() {
        let mut life_support = LifeSupport::new(1_000.0, 0.5);
        life_support.set_oxygen_remaining(1_500.0);
        assert_eq!(life_support.oxygen_remaining(), 1_000.0);
        life_support.set_oxygen_remaining(-3.0);
        assert_eq!(life_support.oxygen_remaining(), 0.0);
    }
}
