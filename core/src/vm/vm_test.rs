#[cfg(test)]
mod tests {
    use crate::error::{DecodeError, InvalidOpcode};
    use crate::val::{IntWidth, Kind, Val};
    use crate::vm::{Call, Constant, Instruction, Opcode, Operand, Program, Scope, ScopeStack};

    #[test]
    fn opcode_codes_are_contiguous() {
        assert_eq!(Opcode::FIRST.code(), 0);
        assert_eq!(Opcode::ALL.len(), Opcode::COUNT as usize);
        for (i, op) in Opcode::ALL.iter().enumerate() {
            assert_eq!(op.code() as usize, i);
            assert_eq!(Opcode::try_from(op.code()).unwrap(), *op);
        }
        assert_eq!(Opcode::try_from(Opcode::COUNT), Err(InvalidOpcode(Opcode::COUNT)));
        assert_eq!(Opcode::try_from(u8::MAX).unwrap_err().to_string(), "unknown opcode 255");
    }

    #[test]
    fn mnemonics_are_unique() {
        let mut names: Vec<&str> = Opcode::ALL.iter().map(|op| op.mnemonic()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Opcode::ALL.len());
    }

    #[test]
    fn disassemble_constant_operand() {
        let program = Program::new(
            vec![Val::from("user"), Val::from(2)],
            vec![
                Instruction::new(Opcode::Push, 1),
                Instruction::new(Opcode::Field, 0),
                Instruction::bare(Opcode::Negate),
            ],
        );
        assert_eq!(
            program.disassemble(),
            "0000\tOpPush\t<1>\t2\n0001\tOpField\t<0>\tuser\n0002\tOpNegate\n"
        );
    }

    #[test]
    fn disassemble_jumps_and_arguments() {
        let program = Program::new(
            Vec::<Val>::new(),
            vec![
                Instruction::new(Opcode::JumpIfFalse, 2),
                Instruction::new(Opcode::Cast, 3),
                Instruction::bare(Opcode::Pop),
                Instruction::new(Opcode::JumpBackward, 4),
            ],
        );
        let text = program.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "0000\tOpJumpIfFalse\t<2>\t(0003)");
        assert_eq!(lines[1], "0001\tOpCast\t<3>");
        assert_eq!(lines[3], "0003\tOpJumpBackward\t<4>\t(0000)");
    }

    #[test]
    fn disassemble_missing_constant() {
        let program = Program::new(Vec::<Val>::new(), vec![Instruction::new(Opcode::Load, 7)]);
        assert_eq!(program.disassemble(), "0000\tOpLoad\t<7>\t<missing>\n");
    }

    #[test]
    fn disassemble_escapes_control_characters() {
        let program = Program::new(
            vec![Val::from("a\nb"), Val::from("tab\there")],
            vec![Instruction::new(Opcode::Push, 0), Instruction::new(Opcode::Push, 1)],
        );
        let text = program.disassemble();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(text, "0000\tOpPush\t<0>\ta\\nb\n0001\tOpPush\t<1>\ttab\\there\n");
    }

    #[test]
    fn disassemble_call_sites() {
        let program = Program::new(
            [Constant::from(Call::new("upper", 1)), Constant::from(Val::from("name"))],
            vec![
                Instruction::new(Opcode::Load, 1),
                Instruction::new(Opcode::Call, 0),
                Instruction::new(Opcode::CallFast, 0),
            ],
        );
        let text = program.disassemble();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "0000\tOpLoad\t<1>\tname");
        assert_eq!(lines[1], "0001\tOpCall\t<0>\tupper/1");
        assert_eq!(lines[2], "0002\tOpCallFast\t<0>\tupper/1");

        let call = program.constant(0).and_then(Constant::as_call).unwrap();
        assert_eq!(call.size, 1);
        assert!(program.constant(1).and_then(Constant::as_call).is_none());
    }

    #[test]
    fn operand_shapes() {
        assert_eq!(Opcode::Push.operand(), Operand::Const);
        assert_eq!(Opcode::JumpIfEnd.operand(), Operand::Jump);
        assert_eq!(Opcode::JumpBackward.operand(), Operand::JumpBack);
        assert_eq!(Opcode::CallFast.operand(), Operand::Const);
        assert_eq!(Opcode::Cast.operand(), Operand::Arg);
        assert!(!Opcode::End.has_operand());
    }

    #[test]
    fn encode_then_decode_preserves_code() {
        let program = Program::new(
            vec![Val::from(true)],
            vec![
                Instruction::new(Opcode::Push, 0),
                Instruction::bare(Opcode::Not),
                Instruction::new(Opcode::Jump, 513),
            ],
        );
        let bytes = program.encode_code();
        assert_eq!(bytes, vec![0, 0, 0, Opcode::Not.code(), Opcode::Jump.code(), 1, 2]);
        let decoded = Program::decode(program.constants().to_vec(), &bytes).unwrap();
        assert_eq!(decoded.code(), program.code());
    }

    #[test]
    fn decode_rejects_malformed_bytes() {
        assert_eq!(
            Program::decode(Vec::<Val>::new(), &[Opcode::Pop.code(), 200]).unwrap_err(),
            DecodeError::UnknownOpcode { code: 200, offset: 1 }
        );
        let err = Program::decode(Vec::<Val>::new(), &[Opcode::Push.code(), 1]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TruncatedOperand {
                op: Opcode::Push,
                offset: 0
            }
        );
        assert_eq!(err.to_string(), "truncated operand for OpPush at offset 0");
    }

    #[test]
    fn scope_store_load_inc() {
        let mut scope = Scope::new();
        assert_eq!(scope.load("i"), Val::Nil);
        scope.store("i", 254u8);
        scope.inc("i").unwrap();
        assert_eq!(scope.load("i"), Val::from(255u8));
        scope.inc("i").unwrap();
        assert_eq!(scope.load("i"), Val::from(0u8));
        assert_eq!(scope.load("i").kind(), Kind::Int(IntWidth::U8));

        scope.store("s", "x");
        assert!(scope.inc("s").is_err());
        assert!(scope.inc("missing").is_err());
        assert_eq!(scope.len(), 2);
    }

    #[test]
    fn scope_stack_nests_begin_end() {
        let mut scopes = ScopeStack::new();
        scopes.store("outer", 1);
        scopes.begin();
        scopes.store("inner", 2);
        assert_eq!(scopes.depth(), 2);
        assert_eq!(scopes.load("outer"), Val::from(1));
        scopes.inc("outer").unwrap();

        let closed = scopes.end().unwrap();
        assert_eq!(closed.load("inner"), Val::from(2));
        assert_eq!(scopes.load("inner"), Val::Nil);
        assert_eq!(scopes.load("outer"), Val::from(2));
        assert!(scopes.end().is_none());
        assert_eq!(scopes.depth(), 1);
        assert!(!scopes.current().is_empty());
    }
}
