use crate::{
    config::{MalformedStepPolicy, TraceConfig},
    fetcher::CodeFetcher,
    fingerprint::{fingerprint, hash_bytecode_hex},
    types::{CallKind, RawStep, RawTrace, TraceError, TraceEvent},
    words::{
        concat_memory, prefixed, slice_hex, word_to_address, word_to_b256, word_to_u256,
        word_to_usize,
    },
};
use alloy_primitives::{Address, B256};
use evmscope_common::{opcode_map, Opcode};
use futures::{stream, StreamExt};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Reconstructs the calls and contract creations of a struct-log trace.
///
/// Returns `Ok(None)` when the trace carries no `structLogs`. Events come out in trace order
/// with `depth` copied from the triggering step. Each touched address is fingerprinted
/// through `fetcher`; a failed or timed out fetch only leaves that event's
/// `contract_hashed_bytecode` empty.
///
/// `sender` is the account CREATE/CREATE2 addresses are derived from.
pub async fn parse_trace<F>(
    sender: Address,
    trace: &RawTrace,
    fetcher: &F,
    config: &TraceConfig,
) -> Result<Option<Vec<TraceEvent>>, TraceError>
where
    F: CodeFetcher + ?Sized,
{
    let Some(steps) = trace.struct_logs.as_deref() else {
        debug!("trace has no structLogs");
        return Ok(None);
    };

    let mut events = reconstruct_events(sender, steps, config)?;

    let timeout = config.fetch_timeout();
    let hashes: Vec<Option<B256>> = stream::iter(
        events
            .iter()
            .map(|event| fingerprint(event.address, fetcher, timeout)),
    )
    .buffered(config.fetch_concurrency.max(1))
    .collect()
    .await;

    for (event, hash) in events.iter_mut().zip(hashes) {
        event.contract_hashed_bytecode = hash;
    }

    Ok(Some(events))
}

/// The synchronous half of [`parse_trace`]: every event, without fingerprints.
pub fn reconstruct_events(
    sender: Address,
    steps: &[RawStep],
    config: &TraceConfig,
) -> Result<Vec<TraceEvent>, TraceError> {
    let opcodes = opcode_map();
    let mut events = Vec::new();

    for (index, step) in steps.iter().enumerate() {
        let Some(kind) = classify(step, &opcodes, config) else {
            continue;
        };

        match reconstruct(sender, steps, index, kind) {
            Ok(event) => {
                debug!(
                    op = %event.op,
                    address = %event.address,
                    depth = event.depth,
                    pc = step.pc,
                    "reconstructed trace event"
                );
                events.push(event);
            }
            Err(err) => match config.malformed_step {
                MalformedStepPolicy::Skip => warn!(error = %err, "skipping malformed trace step"),
                MalformedStepPolicy::Fail => return Err(err),
            },
        }
    }

    Ok(events)
}

fn classify(
    step: &RawStep,
    opcodes: &HashMap<&'static str, Opcode>,
    config: &TraceConfig,
) -> Option<CallKind> {
    opcodes
        .get(step.op.to_ascii_lowercase().as_str())
        .and_then(|opcode| CallKind::from_opcode(*opcode))
        .or_else(|| config.legacy_call_pcs.contains(&step.pc).then_some(CallKind::Call))
}

fn reconstruct(
    sender: Address,
    steps: &[RawStep],
    index: usize,
    kind: CallKind,
) -> Result<TraceEvent, TraceError> {
    let step = &steps[index];
    let needed = kind.stack_items_used();
    if step.stack.len() < needed {
        return Err(underflow(step, needed));
    }

    let event = match kind {
        CallKind::Call | CallKind::CallCode => TraceEvent {
            op: kind,
            address: address_at(step, 2)?,
            value: value_of(step, stack_word(step, 3))?,
            input: memory_slice(step, usize_at(step, 4)?, usize_at(step, 5)?)?,
            return_data: return_data(steps, index)?,
            depth: step.depth,
            contract_hashed_bytecode: None,
        },
        CallKind::DelegateCall | CallKind::StaticCall => TraceEvent {
            op: kind,
            address: address_at(step, 2)?,
            value: None,
            input: memory_slice(step, usize_at(step, 3)?, usize_at(step, 4)?)?,
            return_data: return_data(steps, index)?,
            depth: step.depth,
            contract_hashed_bytecode: None,
        },
        CallKind::Create | CallKind::Create2 => {
            // Popped in order: value, size, offset. The offset word doubles as the salt.
            let [.., offset, size, value] = step.stack.as_slice() else {
                return Err(underflow(step, needed));
            };

            let init_code =
                memory_slice(step, parse_usize(step, offset)?, parse_usize(step, size)?)?;
            let init_code_hash =
                hash_bytecode_hex(&init_code).map_err(|_| invalid_hex(step, &init_code))?;
            let salt = word_to_b256(offset).ok_or_else(|| invalid_hex(step, offset))?;
            let address = sender.create2(salt.0, init_code_hash.0);
            trace!(%address, %salt, %init_code_hash, "derived created address");

            TraceEvent {
                op: kind,
                address,
                value: value_of(step, value)?,
                input: init_code,
                return_data: String::new(),
                depth: step.depth,
                contract_hashed_bytecode: None,
            }
        }
    };

    Ok(event)
}

/// Return data of the call at `index`.
///
/// The caller resumes at `pc + 1` once the callee is done; the step right before that one
/// is the callee's last (`RETURN`, `REVERT`, `STOP`, ...) and holds the returned memory
/// region as `offset` (top) and `size` (second).
fn return_data(steps: &[RawStep], index: usize) -> Result<String, TraceError> {
    let call = &steps[index];
    let Some(resume_pc) = call.pc.checked_add(1) else {
        return Ok(String::new());
    };
    let Some(resumed) = steps[index + 1..]
        .iter()
        .position(|step| step.pc == resume_pc)
        .map(|position| index + 1 + position)
    else {
        trace!(pc = call.pc, "call never resumed");
        return Ok(String::new());
    };

    // Nothing ran in between, e.g. a call to an account without code.
    if resumed == index + 1 {
        return Ok(String::new());
    }

    let out = &steps[resumed - 1];
    if out.stack.len() < 2 {
        return Ok(String::new());
    }
    memory_slice(out, usize_at(out, 1)?, usize_at(out, 2)?)
}

fn stack_word(step: &RawStep, n: usize) -> &str {
    step.from_top(n).unwrap_or_default()
}

fn underflow(step: &RawStep, needed: usize) -> TraceError {
    TraceError::StackUnderflow {
        op: step.op.clone(),
        pc: step.pc,
        needed,
        found: step.stack.len(),
    }
}

fn invalid_hex(step: &RawStep, value: &str) -> TraceError {
    TraceError::InvalidHex {
        pc: step.pc,
        value: value.to_string(),
    }
}

fn parse_usize(step: &RawStep, word: &str) -> Result<usize, TraceError> {
    word_to_usize(word).ok_or_else(|| invalid_hex(step, word))
}

fn usize_at(step: &RawStep, n: usize) -> Result<usize, TraceError> {
    parse_usize(step, stack_word(step, n))
}

fn address_at(step: &RawStep, n: usize) -> Result<Address, TraceError> {
    let word = stack_word(step, n);
    word_to_address(word).ok_or_else(|| invalid_hex(step, word))
}

/// Decimal wei, `None` for zero.
fn value_of(step: &RawStep, word: &str) -> Result<Option<String>, TraceError> {
    let value = word_to_u256(word).ok_or_else(|| invalid_hex(step, word))?;
    Ok((!value.is_zero()).then(|| value.to_string()))
}

/// `0x`-prefixed slice of the step's memory, empty when there is nothing to read.
fn memory_slice(step: &RawStep, offset: usize, size: usize) -> Result<String, TraceError> {
    let Some(words) = step.memory.as_deref() else {
        return Ok(String::new());
    };
    if size == 0 {
        return Ok(String::new());
    }
    let memory = concat_memory(words).map_err(|word| invalid_hex(step, word))?;
    Ok(prefixed(slice_hex(&memory, offset, size)))
}
