pub mod config;
pub mod paytable;
pub mod run;
pub mod simulate;
