//! Main Execution Loop.
//!
//! This module implements the single-cycle execution of one instruction. It performs the following:
//! 1. **Fetch:** Selects the instruction at the current index and advances the index.
//! 2. **Dispatch:** Routes each mnemonic to the ALU, FPU, data memory, or branch logic.
//! 3. **Fault Reporting:** Converts runtime faults into `(message, line)` errors.
//! 4. **Observability:** Records each executed instruction in the log and as tracing events.

use tracing::{debug, info, trace};

use super::Cpu;
use crate::common::constants::{BYTE, DOUBLEWORD, HALFWORD, INSTRUCTION_SIZE, WORD};
use crate::common::{LineError, RuntimeFault, Segment};
use crate::core::pipeline::signals::AluOp;
use crate::core::units::alu::Alu;
use crate::core::units::fpu::{FpOp, Fpu};
use crate::isa::abi::{LR, XZR};
use crate::isa::disasm::disassemble;
use crate::isa::instruction::Instruction;
use crate::isa::mnemonic::Mnemonic;
use crate::isa::token::Grammar;
use crate::memory::Memory;

const IGNORED_XZR: &str = "Ignored attempted assignment to XZR.";

/// Whether the second ALU operand comes from the instruction rather than a register.
const fn takes_immediate(m: Mnemonic) -> bool {
    matches!(m.form().grammar, Grammar::Rri)
}

impl Cpu {
    /// Executes the instruction at the current index.
    ///
    /// Does nothing once the index has run past the end of the program.
    ///
    /// # Arguments
    ///
    /// * `program` - The decoded program.
    /// * `memory` - Data memory.
    ///
    /// # Returns
    ///
    /// The index of the executed instruction, `None` if execution has ended,
    /// or the fault paired with the source line of the faulting instruction.
    pub fn step(
        &mut self,
        program: &[Instruction],
        memory: &mut Memory,
    ) -> Result<Option<usize>, LineError> {
        let index = self.instruction_index;
        let Some(instr) = program.get(index) else {
            return Ok(None);
        };
        self.instruction_index += 1;
        self.execute(instr, memory).map_err(|fault| {
            debug!(line = instr.line(), %fault, "runtime fault");
            LineError::new(&fault, instr.line())
        })?;
        Ok(Some(index))
    }

    /// Executes one instruction whose index has already been consumed.
    ///
    /// # Arguments
    ///
    /// * `instr` - The instruction to execute.
    /// * `memory` - Data memory.
    pub fn execute(&mut self, instr: &Instruction, memory: &mut Memory) -> Result<(), RuntimeFault> {
        self.branch_taken = false;
        let text = disassemble(instr, self.text_segment_offset);
        if self.trace_instructions {
            info!(target: "legv8::cpu", line = instr.line() + 1, "{text}");
        }
        self.note(&text);
        self.dispatch(instr, memory)
    }

    fn dispatch(&mut self, instr: &Instruction, memory: &mut Memory) -> Result<(), RuntimeFault> {
        use Mnemonic as M;

        match instr.mnemonic() {
            // The decoder rewrites these to SUBS, SUBIS and ORR.
            m @ (M::Cmp | M::Cmpi | M::Mov) => return Err(RuntimeFault::Undecoded(m.name())),

            M::Add | M::Adds | M::Addi | M::Addis => self.integer_op(instr, AluOp::Add),
            M::Sub | M::Subs | M::Subi | M::Subis => self.integer_op(instr, AluOp::Sub),
            M::And | M::Ands | M::Andi | M::Andis => self.integer_op(instr, AluOp::And),
            M::Orr | M::Orri => self.integer_op(instr, AluOp::Orr),
            M::Eor | M::Eori => self.integer_op(instr, AluOp::Eor),
            M::Mul => self.integer_op(instr, AluOp::Mul),
            M::Smulh => self.integer_op(instr, AluOp::Smulh),
            M::Umulh => self.integer_op(instr, AluOp::Umulh),
            M::Sdiv => self.integer_op(instr, AluOp::Sdiv),
            M::Udiv => self.integer_op(instr, AluOp::Udiv),
            M::Lsl => self.integer_op(instr, AluOp::Lsl),
            M::Lsr => self.integer_op(instr, AluOp::Lsr),

            M::Ldur => self.load_x(instr, memory, DOUBLEWORD, false)?,
            M::Ldursw => self.load_x(instr, memory, WORD, true)?,
            M::Ldurh => self.load_x(instr, memory, HALFWORD, false)?,
            M::Ldurb => self.load_x(instr, memory, BYTE, false)?,
            M::Stur => self.store_x(instr, memory, DOUBLEWORD)?,
            M::Sturw => self.store_x(instr, memory, WORD)?,
            M::Sturh => self.store_x(instr, memory, HALFWORD)?,
            M::Sturb => self.store_x(instr, memory, BYTE)?,
            M::Ldxr => self.load_exclusive(instr, memory)?,
            M::Stxr => self.store_exclusive(instr, memory)?,

            M::Movz => {
                let value = (instr.arg(1) as u64).wrapping_shl(instr.arg(2) as u32);
                self.write_x(instr.reg(0), value);
            }
            M::Movk => {
                let shift = instr.arg(2) as u32;
                let mask = 0xFFFF_u64.wrapping_shl(shift);
                let field = (instr.arg(1) as u64).wrapping_shl(shift) & mask;
                let value = (self.regs.read(instr.reg(0)) & !mask) | field;
                self.write_x(instr.reg(0), value);
            }
            M::Lda => {
                let addr = self.text_segment_offset + instr.arg(1) as u64 * INSTRUCTION_SIZE;
                self.write_x(instr.reg(0), addr);
            }

            M::Cbz | M::Cbnz => {
                let is_zero = self.regs.read(instr.reg(0)) == 0;
                let taken = is_zero == (instr.mnemonic() == M::Cbz);
                if taken {
                    self.jump(instr.arg(1));
                }
                self.branch_taken = taken;
            }
            M::B => {
                self.jump(instr.arg(0));
                self.branch_taken = true;
            }
            // BL and BR redirect fetch without publishing a taken outcome.
            M::Bl => {
                self.regs.write(LR, self.pc());
                self.jump(instr.arg(0));
            }
            M::Br => self.branch_register(instr, memory)?,
            m @ (M::BEq
            | M::BNe
            | M::BHs
            | M::BLo
            | M::BHi
            | M::BLs
            | M::BGe
            | M::BLt
            | M::BGt
            | M::BLe
            | M::BMi
            | M::BPl
            | M::BVs
            | M::BVc) => {
                if let Some(cond) = m.condition() {
                    let holds = cond.holds(self.flags);
                    if holds {
                        self.jump(instr.arg(0));
                    }
                    self.branch_taken = holds && cond.publishes_taken();
                }
            }

            M::Fadds => self.fp_op(instr, FpOp::Add, true),
            M::Fsubs => self.fp_op(instr, FpOp::Sub, true),
            M::Fmuls => self.fp_op(instr, FpOp::Mul, true),
            M::Fdivs => self.fp_op(instr, FpOp::Div, true),
            M::Faddd => self.fp_op(instr, FpOp::Add, false),
            M::Fsubd => self.fp_op(instr, FpOp::Sub, false),
            M::Fmuld => self.fp_op(instr, FpOp::Mul, false),
            M::Fdivd => self.fp_op(instr, FpOp::Div, false),
            M::Fcmps => {
                self.flags =
                    Fpu::compare_single(self.regs.read_s(instr.reg(0)), self.regs.read_s(instr.reg(1)));
                self.note("Set flags");
            }
            M::Fcmpd => {
                self.flags =
                    Fpu::compare_double(self.regs.read_d(instr.reg(0)), self.regs.read_d(instr.reg(1)));
                self.note("Set flags");
            }
            M::Ldurs => {
                let addr = self.effective_address(instr.reg(1), instr.arg(2))?;
                let value = memory.load_word(addr)?;
                self.regs.write_s(instr.reg(0), value as u32);
            }
            M::Ldurd => {
                let addr = self.effective_address(instr.reg(1), instr.arg(2))?;
                let value = memory.load_doubleword(addr)?;
                self.regs.write_d(instr.reg(0), value);
            }
            M::Sturs => {
                let addr = self.effective_address(instr.reg(1), instr.arg(2))?;
                let value = u64::from(self.regs.read_s(instr.reg(0)));
                self.store_data(memory, addr, value, WORD, WORD)?;
            }
            M::Sturd => {
                let addr = self.effective_address(instr.reg(1), instr.arg(2))?;
                let value = self.regs.read_d(instr.reg(0));
                self.store_data(memory, addr, value, DOUBLEWORD, DOUBLEWORD)?;
            }
        }
        Ok(())
    }

    /// Register-register and register-immediate integer operations.
    fn integer_op(&mut self, instr: &Instruction, op: AluOp) {
        let m = instr.mnemonic();
        let a = self.regs.read(instr.reg(1));
        let b = if takes_immediate(m) {
            instr.arg(2) as u64
        } else {
            self.regs.read(instr.reg(2))
        };

        if m.sets_flags() {
            let (result, flags) = Alu::execute_with_flags(op, a, b);
            self.write_x(instr.reg(0), result);
            self.flags = flags;
            self.note("Set flags");
        } else {
            self.write_x(instr.reg(0), Alu::execute(op, a, b));
        }
    }

    fn fp_op(&mut self, instr: &Instruction, op: FpOp, single: bool) {
        let (d, n, m) = (instr.reg(0), instr.reg(1), instr.reg(2));
        if single {
            let result = Fpu::execute_single(op, self.regs.read_s(n), self.regs.read_s(m));
            self.regs.write_s(d, result);
        } else {
            let result = Fpu::execute_double(op, self.regs.read_d(n), self.regs.read_d(m));
            self.regs.write_d(d, result);
        }
    }

    fn load_x(
        &mut self,
        instr: &Instruction,
        memory: &Memory,
        size: u64,
        signed: bool,
    ) -> Result<(), RuntimeFault> {
        let addr = self.effective_address(instr.reg(1), instr.arg(2))?;
        let rt = instr.reg(0);
        if rt == XZR {
            self.note(IGNORED_XZR);
            return Ok(());
        }
        let value = if signed {
            memory.load_signed_word(addr)?
        } else {
            memory.load(addr, size)?
        };
        self.regs.write(rt, value);
        Ok(())
    }

    fn store_x(
        &mut self,
        instr: &Instruction,
        memory: &mut Memory,
        size: u64,
    ) -> Result<(), RuntimeFault> {
        let addr = self.effective_address(instr.reg(1), instr.arg(2))?;
        let value = self.regs.read(instr.reg(0));
        self.store_data(memory, addr, value, size, size)
    }

    fn load_exclusive(&mut self, instr: &Instruction, memory: &Memory) -> Result<(), RuntimeFault> {
        let addr = self.effective_address(instr.reg(1), instr.arg(2))?;
        let rt = instr.reg(0);
        if rt == XZR {
            self.note(IGNORED_XZR);
            return Ok(());
        }
        let value = memory.load_doubleword(addr)?;
        self.regs.write(rt, value);
        self.monitor.set(addr);
        Ok(())
    }

    /// `STXR Xt, Xs, [Xn, #0]`: stores `Xt` only while `LDXR`'s tag names the address.
    fn store_exclusive(&mut self, instr: &Instruction, memory: &mut Memory) -> Result<(), RuntimeFault> {
        let addr = self.effective_address(instr.reg(2), instr.arg(3))?;
        let outcome = instr.reg(1);
        if self.monitor.matches(addr) {
            memory.store_doubleword(addr, self.regs.read(instr.reg(0)))?;
            self.write_x(outcome, 0);
            self.monitor.clear();
            self.stxr_succeeded = true;
        } else {
            self.write_x(outcome, 1);
            self.stxr_succeeded = false;
        }
        debug!(addr = format_args!("{addr:#x}"), succeeded = self.stxr_succeeded, "store exclusive");
        Ok(())
    }

    fn branch_register(&mut self, instr: &Instruction, memory: &Memory) -> Result<(), RuntimeFault> {
        let target = self.regs.read(instr.reg(0));
        if target % INSTRUCTION_SIZE != 0 {
            return Err(RuntimeFault::PcAlignment(target));
        }
        let last = memory.static_data_offset().saturating_sub(INSTRUCTION_SIZE);
        if target < self.text_segment_offset || target > last {
            return Err(RuntimeFault::SegmentFault { address: target, segment: Segment::Text });
        }
        self.instruction_index = ((target - self.text_segment_offset) / INSTRUCTION_SIZE) as usize;
        Ok(())
    }

    fn jump(&mut self, target: i64) {
        trace!(from = self.instruction_index, to = target, "branch taken");
        self.instruction_index = target as usize;
    }

    fn write_x(&mut self, rd: usize, value: u64) {
        if rd == XZR {
            self.note(IGNORED_XZR);
        } else {
            self.regs.write(rd, value);
        }
    }
}
