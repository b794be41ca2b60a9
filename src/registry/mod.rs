//! Caller-owned method name sets consulted by the significance analyzer.

pub mod cost;
pub mod whitelist;

pub use cost::{
    load_cost_records, parse_cost_records, CostRecord, CostRegistry, CostRelevance, ExecCost,
};
pub use whitelist::{is_valid_method_name, Whitelist};
