use std::collections::HashMap;
use std::fmt;

/// A single EVM opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode(pub u8);

/// Static metadata attached to every mapped opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    /// Lowercase mnemonic, e.g. `push1`.
    pub name: &'static str,
    /// Number of immediate bytes following the opcode (only non-zero for `PUSHn`).
    pub immediate_size: u8,
    pub inputs: u8,
    pub outputs: u8,
}

impl Opcode {
    pub const STOP: Opcode = Opcode(0x00);
    pub const JUMPDEST: Opcode = Opcode(0x5b);
    pub const PUSH1: Opcode = Opcode(0x60);
    pub const CREATE: Opcode = Opcode(0xf0);
    pub const CALL: Opcode = Opcode(0xf1);
    pub const CALLCODE: Opcode = Opcode(0xf2);
    pub const RETURN: Opcode = Opcode(0xf3);
    pub const DELEGATECALL: Opcode = Opcode(0xf4);
    pub const CREATE2: Opcode = Opcode(0xf5);
    pub const STATICCALL: Opcode = Opcode(0xfa);
    pub const INVALID: Opcode = Opcode(0xfe);
    pub const SELFDESTRUCT: Opcode = Opcode(0xff);

    /// Table lookup; `None` for bytes with no assigned instruction.
    pub fn info(self) -> Option<&'static OpcodeInfo> {
        OPCODE_TABLE[self.0 as usize].as_ref()
    }

    /// Immediate byte count for `PUSHn`, zero for everything else.
    pub fn immediate_size(self) -> usize {
        self.info().map_or(0, |info| info.immediate_size as usize)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.info() {
            Some(info) => f.write_str(info.name),
            None => write!(f, "0x{:02x}", self.0),
        }
    }
}

const PUSH_NAMES: [&str; 32] = [
    "push1", "push2", "push3", "push4", "push5", "push6", "push7", "push8", "push9", "push10",
    "push11", "push12", "push13", "push14", "push15", "push16", "push17", "push18", "push19",
    "push20", "push21", "push22", "push23", "push24", "push25", "push26", "push27", "push28",
    "push29", "push30", "push31", "push32",
];

const DUP_NAMES: [&str; 16] = [
    "dup1", "dup2", "dup3", "dup4", "dup5", "dup6", "dup7", "dup8", "dup9", "dup10", "dup11",
    "dup12", "dup13", "dup14", "dup15", "dup16",
];

const SWAP_NAMES: [&str; 16] = [
    "swap1", "swap2", "swap3", "swap4", "swap5", "swap6", "swap7", "swap8", "swap9", "swap10",
    "swap11", "swap12", "swap13", "swap14", "swap15", "swap16",
];

const LOG_NAMES: [&str; 5] = ["log0", "log1", "log2", "log3", "log4"];

// (byte, name, inputs, outputs) for every fixed-width instruction.
const FIXED: [(u8, &str, u8, u8); 80] = [
    (0x00, "stop", 0, 0),
    (0x01, "add", 2, 1),
    (0x02, "mul", 2, 1),
    (0x03, "sub", 2, 1),
    (0x04, "div", 2, 1),
    (0x05, "sdiv", 2, 1),
    (0x06, "mod", 2, 1),
    (0x07, "smod", 2, 1),
    (0x08, "addmod", 3, 1),
    (0x09, "mulmod", 3, 1),
    (0x0a, "exp", 2, 1),
    (0x0b, "signextend", 2, 1),
    (0x10, "lt", 2, 1),
    (0x11, "gt", 2, 1),
    (0x12, "slt", 2, 1),
    (0x13, "sgt", 2, 1),
    (0x14, "eq", 2, 1),
    (0x15, "iszero", 1, 1),
    (0x16, "and", 2, 1),
    (0x17, "or", 2, 1),
    (0x18, "xor", 2, 1),
    (0x19, "not", 1, 1),
    (0x1a, "byte", 2, 1),
    (0x1b, "shl", 2, 1),
    (0x1c, "shr", 2, 1),
    (0x1d, "sar", 2, 1),
    (0x20, "keccak256", 2, 1),
    (0x30, "address", 0, 1),
    (0x31, "balance", 1, 1),
    (0x32, "origin", 0, 1),
    (0x33, "caller", 0, 1),
    (0x34, "callvalue", 0, 1),
    (0x35, "calldataload", 1, 1),
    (0x36, "calldatasize", 0, 1),
    (0x37, "calldatacopy", 3, 0),
    (0x38, "codesize", 0, 1),
    (0x39, "codecopy", 3, 0),
    (0x3a, "gasprice", 0, 1),
    (0x3b, "extcodesize", 1, 1),
    (0x3c, "extcodecopy", 4, 0),
    (0x3d, "returndatasize", 0, 1),
    (0x3e, "returndatacopy", 3, 0),
    (0x3f, "extcodehash", 1, 1),
    (0x40, "blockhash", 1, 1),
    (0x41, "coinbase", 0, 1),
    (0x42, "timestamp", 0, 1),
    (0x43, "number", 0, 1),
    (0x44, "prevrandao", 0, 1),
    (0x45, "gaslimit", 0, 1),
    (0x46, "chainid", 0, 1),
    (0x47, "selfbalance", 0, 1),
    (0x48, "basefee", 0, 1),
    (0x49, "blobhash", 1, 1),
    (0x4a, "blobbasefee", 0, 1),
    (0x50, "pop", 1, 0),
    (0x51, "mload", 1, 1),
    (0x52, "mstore", 2, 0),
    (0x53, "mstore8", 2, 0),
    (0x54, "sload", 1, 1),
    (0x55, "sstore", 2, 0),
    (0x56, "jump", 1, 0),
    (0x57, "jumpi", 2, 0),
    (0x58, "pc", 0, 1),
    (0x59, "msize", 0, 1),
    (0x5a, "gas", 0, 1),
    (0x5b, "jumpdest", 0, 0),
    (0x5c, "tload", 1, 1),
    (0x5d, "tstore", 2, 0),
    (0x5e, "mcopy", 3, 0),
    (0x5f, "push0", 0, 1),
    (0xf0, "create", 3, 1),
    (0xf1, "call", 7, 1),
    (0xf2, "callcode", 7, 1),
    (0xf3, "return", 2, 0),
    (0xf4, "delegatecall", 6, 1),
    (0xf5, "create2", 4, 1),
    (0xfa, "staticcall", 6, 1),
    (0xfd, "revert", 2, 0),
    (0xfe, "invalid", 0, 0),
    (0xff, "selfdestruct", 1, 0),
];

const fn build_table() -> [Option<OpcodeInfo>; 256] {
    let mut table: [Option<OpcodeInfo>; 256] = [None; 256];

    let mut i = 0;
    while i < FIXED.len() {
        let (byte, name, inputs, outputs) = FIXED[i];
        table[byte as usize] = Some(OpcodeInfo { name, immediate_size: 0, inputs, outputs });
        i += 1;
    }

    let mut n = 0;
    while n < 32 {
        table[0x60 + n] = Some(OpcodeInfo {
            name: PUSH_NAMES[n],
            immediate_size: n as u8 + 1,
            inputs: 0,
            outputs: 1,
        });
        n += 1;
    }

    let mut n = 0;
    while n < 16 {
        let depth = n as u8 + 1;
        table[0x80 + n] = Some(OpcodeInfo {
            name: DUP_NAMES[n],
            immediate_size: 0,
            inputs: depth,
            outputs: depth + 1,
        });
        table[0x90 + n] = Some(OpcodeInfo {
            name: SWAP_NAMES[n],
            immediate_size: 0,
            inputs: depth + 1,
            outputs: depth + 1,
        });
        n += 1;
    }

    let mut n = 0;
    while n < 5 {
        table[0xa0 + n] = Some(OpcodeInfo {
            name: LOG_NAMES[n],
            immediate_size: 0,
            inputs: n as u8 + 2,
            outputs: 0,
        });
        n += 1;
    }

    table
}

static OPCODE_TABLE: [Option<OpcodeInfo>; 256] = build_table();

/// Mnemonic → opcode map over every mapped byte. Keys are lowercase.
pub fn opcode_map() -> HashMap<&'static str, Opcode> {
    OPCODE_TABLE
        .iter()
        .enumerate()
        .filter_map(|(byte, info)| info.map(|info| (info.name, Opcode(byte as u8))))
        .collect()
}
