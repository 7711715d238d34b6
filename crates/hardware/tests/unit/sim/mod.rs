/// Whole-program scenarios run on both simulators.
pub mod end_to_end;


/// Program assembly and compile error collection.
pub mod program;

/// The single-cycle simulator front end.
pub mod single_cycle;
