use tracing::info;

pub const DEFAULT_SECRET_PHRASE: &str = "i choose you";
pub const DEFAULT_REWARD: &str = "PASTE-YOUR-REAL-CODE-HERE";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reveal {
    Granted(String),
    Denied,
}

impl Reveal {
    pub fn message(&self) -> String {
        match self {
            Reveal::Granted(reward) => format!("Your prize code: {}", reward),
            Reveal::Denied => "Nope 😈 Try the phrase again.".to_string(),
        }
    }
}

/// Holds the reward behind a phrase.
#[derive(Clone, Debug)]
pub struct PrizeGate {
    phrase: String,
    reward: String,
}

impl PrizeGate {
    pub fn new(phrase: &str, reward: &str) -> Self {
        Self {
            phrase: normalize(phrase),
            reward: reward.to_string(),
        }
    }

    pub fn matches(&self, guess: &str) -> bool {
        normalize(guess) == self.phrase
    }

    pub fn reveal(&self, guess: &str) -> Reveal {
        let granted = self.matches(guess);
        info!(granted, "prize attempt");
        if granted {
            Reveal::Granted(self.reward.clone())
        } else {
            Reveal::Denied
        }
    }
}

impl Default for PrizeGate {
    fn default() -> Self {
        Self::new(DEFAULT_SECRET_PHRASE, DEFAULT_REWARD)
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
