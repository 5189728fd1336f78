use crate::config::UploadConfig;

/// Simulated upload progress: fixed steps up to a cap while the request is
/// in flight, then 100 once the backend answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadProgress {
    percent: u8,
    step: u8,
    cap: u8,
}

impl UploadProgress {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            percent: 0,
            step: config.step,
            cap: config.cap.min(100),
        }
    }

    pub fn tick(&mut self) -> u8 {
        if self.percent < self.cap {
            self.percent = self.percent.saturating_add(self.step).min(self.cap);
        }
        self.percent
    }

    pub fn complete(&mut self) -> u8 {
        self.percent = 100;
        self.percent
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }
}
