use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ID_LEN: usize = 9;

/// One user-submitted wish. The ledger is append-only; there is no edit or
/// delete path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wish {
    pub id: String,
    pub name: String,
    pub text: String,
    /// Epoch milliseconds at submission time.
    pub timestamp: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WishError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("wish text must not be empty")]
    EmptyText,
}

/// Append-only collection of wishes plus the last submitter's name, both
/// persisted to device-local storage by the frontend.
#[derive(Debug, Default)]
pub struct WishLedger {
    wishes: Vec<Wish>,
    user_name: Option<String>,
}

impl WishLedger {
    /// Restore from the persisted JSON array. Absent or malformed input falls
    /// soft to an empty ledger.
    pub fn from_json(json: &str) -> Self {
        let wishes = serde_json::from_str::<Vec<Wish>>(json).unwrap_or_else(|e| {
            log::warn!("discarding malformed wish ledger: {e}");
            Vec::new()
        });
        Self {
            wishes,
            user_name: None,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.wishes).unwrap_or_else(|_| "[]".to_string())
    }

    /// Append a wish. Empty (post-trim) name or text is rejected and leaves
    /// the ledger untouched. The submitter becomes the current user.
    pub fn submit(
        &mut self,
        name: &str,
        text: &str,
        timestamp: i64,
        rng: &mut impl Rng,
    ) -> Result<Wish, WishError> {
        let name = name.trim();
        let text = text.trim();
        if name.is_empty() {
            return Err(WishError::EmptyName);
        }
        if text.is_empty() {
            return Err(WishError::EmptyText);
        }
        let mut id = random_id(rng);
        while self.wishes.iter().any(|w| w.id == id) {
            id = random_id(rng);
        }
        let wish = Wish {
            id,
            name: name.to_string(),
            text: text.to_string(),
            timestamp,
        };
        self.wishes.push(wish.clone());
        self.user_name = Some(name.to_string());
        Ok(wish)
    }

    pub fn wishes(&self) -> &[Wish] {
        &self.wishes
    }

    pub fn len(&self) -> usize {
        self.wishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wishes.is_empty()
    }

    /// The most recent `n` wishes, oldest first. Display concern (marquee).
    pub fn recent(&self, n: usize) -> &[Wish] {
        &self.wishes[self.wishes.len().saturating_sub(n)..]
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn set_user_name(&mut self, name: Option<String>) {
        self.user_name = name;
    }
}

fn random_id(rng: &mut impl Rng) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect()
}
