use legv8_core::isa::instruction::Instruction;
use legv8_core::isa::mnemonic::Mnemonic;
use legv8_core::stats::{STATS_SECTIONS, SimStats};

fn instr(m: Mnemonic) -> Instruction {
    Instruction::new(m, vec![1, 2, 0], 0)
}

#[test]
fn retired_instructions_are_classified() {
    let mut stats = SimStats::default();
    for m in [
        Mnemonic::Add,
        Mnemonic::Ldur,
        Mnemonic::Ldxr,
        Mnemonic::Stur,
        Mnemonic::Stxr,
        Mnemonic::Cbz,
        Mnemonic::Faddd,
        Mnemonic::Ldurd,
    ] {
        stats.record_retired(&instr(m));
    }
    assert_eq!(stats.instructions_retired, 8);
    assert_eq!(stats.inst_alu, 1);
    assert_eq!(stats.inst_load, 3);
    assert_eq!(stats.inst_store, 2);
    assert_eq!(stats.inst_branch, 1);
    assert_eq!(stats.inst_fp, 1);
}

#[test]
fn report_renders_requested_sections() {
    let mut stats = SimStats::default();
    stats.cycles = 12;
    stats.stalls_data = 2;
    stats.record_retired(&instr(Mnemonic::Add));

    let all: Vec<String> = STATS_SECTIONS.iter().map(|s| (*s).to_owned()).collect();
    let report = stats.report(&all);
    assert!(report.contains("LEGv8 SIMULATION STATISTICS"));
    assert!(report.contains("sim_cycles"));
    assert!(report.contains("stalls.data"));
    assert!(report.contains("op.alu"));

    let summary = stats.report(&["summary".to_owned()]);
    assert!(summary.contains("sim_insts"));
    assert!(!summary.contains("stalls.data"));
}

#[test]
fn serializes_counters_without_wall_clock() {
    let stats = SimStats::default();
    let value = serde_json::to_value(&stats).expect("stats serialize");
    assert_eq!(value["cycles"], 0);
    assert!(value.get("start_time").is_none());
}
