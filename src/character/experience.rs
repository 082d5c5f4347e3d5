use crate::messages::MessageLog;

/// Level and experience progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceManager {
    level: u32,
    total_experience: u32,
    experience_required: u32,
}

impl ExperienceManager {
    pub fn new(experience_required: u32) -> Self {
        Self::from_parts(1, 0, experience_required)
    }

    pub fn from_parts(level: u32, total_experience: u32, experience_required: u32) -> Self {
        Self {
            level: level.max(1),
            total_experience,
            experience_required,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn total_experience(&self) -> u32 {
        self.total_experience
    }

    pub fn experience_required(&self) -> u32 {
        self.experience_required
    }

    /// Adds experience and returns the number of levels gained.
    ///
    /// At most one level is granted per call; any surplus carries over and
    /// may trigger the next level on a later gain.
    pub fn gain_experience(&mut self, amount: u32, log: &mut MessageLog) -> u32 {
        log.experience(format!("You gain {} experience", amount));
        self.total_experience = self.total_experience.saturating_add(amount);

        if self.total_experience >= self.experience_required {
            self.level += 1;
            self.total_experience -= self.experience_required;
            log.success(format!("Level UP to level {}!", self.level));
            1
        } else {
            0
        }
    }

    pub fn info_messages(&self, log: &mut MessageLog) {
        log.info(format!("Total Experience: {}", self.total_experience));
        log.info(format!("Level: {}", self.level));
    }
}
