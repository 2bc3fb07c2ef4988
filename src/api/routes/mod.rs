pub mod health;
pub mod lotto;
