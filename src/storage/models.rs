use serde::{Deserialize, Serialize};

/// Example token labels shown on every simulated account.
pub const EXAMPLE_TOKENS: [&str; 3] = ["Token A", "Token B", "Token C"];

/// A locally fabricated account for UI demonstration. The balance is
/// simulated, not backed by any network state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedAccount {
    pub id: u32,
    pub balance: f64,
    pub tokens: Vec<String>,
}

impl SimulatedAccount {
    pub fn new(id: u32, balance: f64) -> Self {
        Self {
            id,
            balance,
            tokens: EXAMPLE_TOKENS.iter().map(|t| t.to_string()).collect(),
        }
    }
}
