/// Branch and flag stalls and control flushes.
pub mod control_hazards;


/// Load-use stalls.
pub mod load_use;
