/// A single-turn chat completion request, independent of any provider's wire format.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    system: Option<String>,
    user: String,
    temperature: f32,
}

impl ChatRequest {
    pub const DEFAULT_TEMPERATURE: f32 = 1.0;

    pub fn new(user: impl Into<String>) -> Self {
        Self {
            system: None,
            user: user.into(),
            temperature: Self::DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        // Chat-completions APIs accept 0.0..=2.0
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    pub fn system(&self) -> Option<&str> {
        self.system.as_deref()
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}
