mod user_credits;

pub use user_credits::UserCredits;
