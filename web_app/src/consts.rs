pub const MAX_PET_AGE: u8 = 99;
pub const MAX_PET_WEIGHT_KG: f64 = 150.0;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_TEXT_FIELD_LEN: usize = 120;
pub const MAX_DESCRIPTION_LEN: usize = 2_000;

pub const ACCEPTED_URL_SCHEMES: [&str; 2] = ["https://", "http://"];

pub const MAX_AGE_CORS_SECS: usize = chrono::TimeDelta::hours(1).num_seconds() as usize;
