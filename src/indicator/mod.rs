pub mod ema;
pub mod macd;
pub mod rsi;
