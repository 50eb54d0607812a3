use alloy_primitives::{Address, B256};
use evmscope_common::Opcode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("{op} at pc {pc} needs {needed} stack items, found {found}")]
    StackUnderflow {
        op: String,
        pc: u32,
        needed: usize,
        found: usize,
    },

    #[error("invalid hex word at pc {pc}: {value}")]
    InvalidHex { pc: u32, value: String },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("code fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("no code deployed")]
    EmptyCode,

    #[error("invalid bytecode hex: {0}")]
    InvalidCode(#[from] hex::FromHexError),
}

/// One `structLogs` entry of a `debug_traceTransaction` result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStep {
    pub pc: u32,
    pub op: String,
    pub depth: u32,
    /// Top of stack is the last element.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub stack: Vec<String>,
    /// 32-byte words, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<Vec<String>>,
}

impl RawStep {
    /// `stack[len - n]`, i.e. `n = 1` is the top of stack.
    pub fn from_top(&self, n: usize) -> Option<&str> {
        let index = self.stack.len().checked_sub(n)?;
        self.stack.get(index).map(String::as_str)
    }
}

/// The default (struct logger) trace result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub struct_logs: Option<Vec<RawStep>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CallKind {
    Call,
    CallCode,
    DelegateCall,
    StaticCall,
    Create,
    Create2,
}

impl CallKind {
    pub fn from_opcode(opcode: Opcode) -> Option<Self> {
        match opcode {
            Opcode::CALL => Some(Self::Call),
            Opcode::CALLCODE => Some(Self::CallCode),
            Opcode::DELEGATECALL => Some(Self::DelegateCall),
            Opcode::STATICCALL => Some(Self::StaticCall),
            Opcode::CREATE => Some(Self::Create),
            Opcode::CREATE2 => Some(Self::Create2),
            _ => None,
        }
    }

    /// Stack items read while reconstructing the event.
    pub fn stack_items_used(self) -> usize {
        match self {
            Self::Call | Self::CallCode => 5,
            Self::DelegateCall | Self::StaticCall => 4,
            Self::Create | Self::Create2 => 3,
        }
    }
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Call => "CALL",
            Self::CallCode => "CALLCODE",
            Self::DelegateCall => "DELEGATECALL",
            Self::StaticCall => "STATICCALL",
            Self::Create => "CREATE",
            Self::Create2 => "CREATE2",
        };
        f.write_str(name)
    }
}

/// A reconstructed call or contract creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceEvent {
    pub op: CallKind,
    /// Call target or created contract.
    #[serde(serialize_with = "lowercase_address")]
    pub address: Address,
    /// Wei as a decimal string, `None` when zero or not applicable.
    pub value: Option<String>,
    pub input: String,
    pub return_data: String,
    pub depth: u32,
    pub contract_hashed_bytecode: Option<B256>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn lowercase_address<S>(address: &Address, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("0x{}", hex::encode(address.as_slice())))
}
