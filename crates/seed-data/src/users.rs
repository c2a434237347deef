use chrono::NaiveDate;
use core_types::{User, UserStatus};

/// The user list shown on the admin panel.
pub fn seed_users() -> Vec<User> {
    vec![
        user(1, "muser", "muser@example.com", (2023, 1, 15), (2023, 4, 4), UserStatus::Active, &[1, 3, 5]),
        user(2, "mvc", "mvc@example.com", (2023, 1, 1), (2023, 4, 5), UserStatus::Active, &[1, 2, 3, 4, 5]),
        user(3, "johndoe", "john@example.com", (2023, 2, 10), (2023, 3, 28), UserStatus::Active, &[2, 4]),
        user(4, "janesmith", "jane@example.com", (2023, 2, 15), (2023, 4, 1), UserStatus::Active, &[1, 5]),
        user(5, "robertbrown", "robert@example.com", (2023, 3, 5), (2023, 3, 25), UserStatus::Inactive, &[3]),
    ]
}

fn user(
    id: u32,
    username: &str,
    email: &str,
    registered: (i32, u32, u32),
    last_login: (i32, u32, u32),
    status: UserStatus,
    strategies: &[u32],
) -> User {
    User {
        id,
        username: username.to_string(),
        email: email.to_string(),
        registration_date: date(registered),
        last_login: date(last_login),
        status,
        strategies: strategies.to_vec(),
    }
}

fn date((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}
