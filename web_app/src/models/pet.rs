use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    #[default]
    #[display("dog")]
    Dog,
    #[display("cat")]
    Cat,
    #[display("bird")]
    Bird,
    #[display("rabbit")]
    Rabbit,
    #[display("hamster")]
    Hamster,
    #[display("other")]
    Other,
}

impl FromStr for Species {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dog" => Ok(Species::Dog),
            "cat" => Ok(Species::Cat),
            "bird" => Ok(Species::Bird),
            "rabbit" => Ok(Species::Rabbit),
            "hamster" => Ok(Species::Hamster),
            "other" => Ok(Species::Other),
            other => anyhow::bail!("unknown species: {other}"),
        }
    }
}

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[display("male")]
    Male,
    #[default]
    #[display("female")]
    Female,
}

impl FromStr for Gender {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => anyhow::bail!("unknown gender: {other}"),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    pub id: Uuid,
    pub user_app_id: Uuid,
    pub pet_name: String,
    pub species: Species,
    pub breed: String,
    pub age: u8,
    pub weight: f64,
    pub gender: Gender,
    pub pic: Option<String>,
    pub is_available_for_breeding: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_app_id == user_id
    }
}
