//! Per-session counters and the score formula


/// Counters reset at the start of every session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    /// Seconds survived (stops accruing once the player dies)
    pub elapsed_alive: f64,
    pub enemies_spawned: u32,
    /// Incremented once per resolved ordered enemy/projectile pair, so each
    /// physical hit counts twice
    pub hit_counter: u32,
    pub score: u64,
}

impl SessionStats {
    /// Enemies destroyed, as shown to the player
    pub fn hits(&self) -> f64 {
        self.hit_counter as f64 / 2.0
    }

    pub fn refresh_score(&mut self, hit_score: f64) {
        self.score = score(self.hit_counter, self.elapsed_alive, hit_score);
    }
}

/// `floor(hit_score * (hit_counter / 2) + elapsed_seconds)`
pub fn score(hit_counter: u32, elapsed_alive: f64, hit_score: f64) -> u64 {
    (hit_score * (hit_counter as f64 / 2.0) + elapsed_alive).floor() as u64
}
