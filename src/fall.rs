/// Fixed parameters for the falling word
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallSettings {
    pub start_speed: f64,
    pub max_speed: f64,
    /// position a new word spawns at; negative starts above the visible top
    pub spawn_offset: f64,
    pub floor_threshold: f64,
    /// slack below the floor that already counts as contact, absorbs coarse steps
    pub floor_tolerance: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallEvent {
    Airborne,
    FloorReached,
    /// already on the floor; waits for the next reset
    Resting,
}

#[derive(Debug, Clone)]
pub struct FallController {
    settings: FallSettings,
    position_y: f64,
    speed: f64,
    landed: bool,
}

impl FallController {
    pub fn new(settings: FallSettings) -> Self {
        Self {
            position_y: settings.spawn_offset,
            speed: settings.start_speed,
            landed: false,
            settings,
        }
    }

    /// New word at `start_offset`. Speed carries over.
    pub fn reset(&mut self, start_offset: f64) {
        self.position_y = start_offset;
        self.landed = false;
    }

    pub fn reset_speed(&mut self) {
        self.speed = self.settings.start_speed;
    }

    /// One fixed step of `speed` distance units
    pub fn tick(&mut self) -> FallEvent {
        if self.landed {
            return FallEvent::Resting;
        }

        self.position_y += self.speed;

        if self.position_y >= self.settings.floor_threshold - self.settings.floor_tolerance {
            self.landed = true;
            FallEvent::FloorReached
        } else {
            FallEvent::Airborne
        }
    }

    pub fn increase_speed(&mut self, increment: f64) {
        self.speed = (self.speed + increment).min(self.settings.max_speed);
    }

    pub fn position(&self) -> f64 {
        self.position_y
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn has_landed(&self) -> bool {
        self.landed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> FallSettings {
        FallSettings {
            start_speed: 1.3,
            max_speed: 8.0,
            spawn_offset: 0.0,
            floor_threshold: 100.0,
            floor_tolerance: 2.0,
        }
    }

    #[test]
    fn test_tick_advances_by_speed() {
        let mut fall = FallController::new(settings());
        assert_eq!(fall.tick(), FallEvent::Airborne);
        assert_eq!(fall.position(), 1.3);
        assert_eq!(fall.tick(), FallEvent::Airborne);
        assert_eq!(fall.position(), 1.3 + 1.3);
    }

    #[test]
    fn test_floor_reached_within_tolerance() {
        let mut fall = FallController::new(FallSettings {
            start_speed: 10.0,
            max_speed: 10.0,
            ..settings()
        });
        fall.reset(88.0);
        // 98 is inside the 2 unit tolerance of the 100 floor
        assert_eq!(fall.tick(), FallEvent::FloorReached);
        assert!(fall.has_landed());
    }

    #[test]
    fn test_floor_reached_fires_once_per_word() {
        let mut fall = FallController::new(settings());
        let events: Vec<FallEvent> = (0..200).map(|_| fall.tick()).collect();

        let reached = events
            .iter()
            .filter(|e| **e == FallEvent::FloorReached)
            .count();
        assert_eq!(reached, 1);

        let resting_pos = fall.position();
        assert_eq!(fall.tick(), FallEvent::Resting);
        assert_eq!(fall.position(), resting_pos);

        fall.reset(0.0);
        assert!(!fall.has_landed());
        assert_eq!(fall.tick(), FallEvent::Airborne);
    }

    #[test]
    fn test_reset_keeps_speed() {
        let mut fall = FallController::new(settings());
        fall.increase_speed(0.5);
        fall.tick();
        fall.reset(-20.0);
        assert_eq!(fall.position(), -20.0);
        assert_eq!(fall.speed(), 1.8);
    }

    #[test]
    fn test_speed_is_clamped_to_max() {
        let mut fall = FallController::new(settings());
        for n in 0..500 {
            fall.increase_speed(0.15);
            assert!(fall.speed() <= 8.0, "step {n}");
            assert!(fall.speed() >= 1.3);
        }
        assert_eq!(fall.speed(), 8.0);

        fall.reset_speed();
        assert_eq!(fall.speed(), 1.3);
    }

    #[test]
    fn test_speed_never_decreases() {
        let mut fall = FallController::new(settings());
        let mut last = fall.speed();
        for _ in 0..100 {
            fall.increase_speed(0.15);
            assert!(fall.speed() >= last);
            last = fall.speed();
        }
    }
}
