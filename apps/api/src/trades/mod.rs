// Trades: rule-based enhancement for plumbing, HVAC, electrical and construction work.
// No backend calls; everything here is static tables and pattern rewrites.

pub mod enhancer;
pub mod handlers;
