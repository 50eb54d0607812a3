use crate::*;

#[test]
fn test_generated_families() {
    assert_eq!(Opcode(0x60).info().unwrap().name, "push1");
    assert_eq!(Opcode(0x7f).info().unwrap().immediate_size, 32);
    assert_eq!(Opcode(0x8f).info().unwrap().name, "dup16");
    assert_eq!(Opcode(0x8f).info().unwrap().outputs, 17);
    assert_eq!(Opcode(0x9f).info().unwrap().inputs, 17);
    assert_eq!(Opcode(0xa4).info().unwrap().name, "log4");
    assert_eq!(Opcode(0xa4).info().unwrap().inputs, 6);
}

#[test]
fn test_unmapped_bytes() {
    for byte in [0x0c, 0x21, 0xa5, 0xef, 0xfb] {
        assert!(Opcode(byte).info().is_none());
        assert_eq!(Opcode(byte).to_string(), format!("0x{byte:02x}"));
    }
}

#[test]
fn test_call_family_arity() {
    let call = Opcode::CALL.info().unwrap();
    assert_eq!((call.inputs, call.outputs), (7, 1));
    let staticcall = Opcode::STATICCALL.info().unwrap();
    assert_eq!((staticcall.inputs, staticcall.outputs), (6, 1));
    assert_eq!(Opcode::CREATE2.info().unwrap().inputs, 4);
    let selfdestruct = Opcode::SELFDESTRUCT.info().unwrap();
    assert_eq!(selfdestruct.name, "selfdestruct");
    assert_eq!((selfdestruct.inputs, selfdestruct.outputs), (1, 0));
}

#[test]
fn test_opcode_map_roundtrips_names() {
    let map = opcode_map();

    assert_eq!(map["jumpdest"], Opcode::JUMPDEST);
    assert_eq!(map["delegatecall"], Opcode::DELEGATECALL);
    assert_eq!(map["selfdestruct"], Opcode::SELFDESTRUCT);
    for (name, opcode) in &map {
        assert_eq!(opcode.to_string(), *name);
    }
}
