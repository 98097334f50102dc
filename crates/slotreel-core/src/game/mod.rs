pub mod combo;
pub mod machine;
pub mod paytable;
pub mod session;
pub mod simulate;

pub use combo::{check_combo, ComboResult, MatchWeight, JACKPOT_SYMBOL};
pub use machine::{layout_reels, SlotMachine, REEL_COUNT};
pub use paytable::Paytable;
pub use session::{BalanceDisplay, GameSession, SessionStats, SpinResult};
pub use simulate::Simulation;
