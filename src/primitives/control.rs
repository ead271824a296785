//! Stack and variable control primitives: duplication, removal, swapping,
//! slicing, comparisons, and the `call` sub-routine mechanism.

use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};

pub fn push(e: &mut Engine) -> EngineResult<()> {
    let top = e
        .stack
        .top()
        .ok_or(EngineError::StackUnderflow("push", 1))?
        .to_vec();
    e.stack.push(top);
    Ok(())
}

pub fn pop(e: &mut Engine) -> EngineResult<()> {
    e.stack.pop().ok_or(EngineError::StackUnderflow("pop", 1))?;
    Ok(())
}

pub fn load(e: &mut Engine) -> EngineResult<()> {
    let name = e.stack.pop_string()?;
    let value = e
        .get_variable(&name)
        .ok_or_else(|| EngineError::MissingVariable(name.clone()))?
        .to_vec();
    e.stack.push(value);
    Ok(())
}

pub fn save(e: &mut Engine) -> EngineResult<()> {
    let name = e.stack.pop_string()?;
    let value = e
        .stack
        .pop()
        .ok_or(EngineError::StackUnderflow("save", 1))?;
    e.set_variable(&name, value);
    Ok(())
}

pub fn swap(e: &mut Engine) -> EngineResult<()> {
    let b2 = e.stack.pop();
    let b1 = e.stack.pop();
    match (b1, b2) {
        (Some(b1), Some(b2)) => {
            e.stack.push(b2);
            e.stack.push(b1);
            Ok(())
        }
        _ => Err(EngineError::StackUnderflow("swap", 2)),
    }
}

pub fn append(e: &mut Engine) -> EngineResult<()> {
    let b2 = e.stack.pop();
    let b1 = e.stack.pop();
    match (b1, b2) {
        (Some(mut b1), Some(b2)) => {
            b1.extend_from_slice(&b2);
            e.stack.push(b1);
            Ok(())
        }
        _ => Err(EngineError::StackUnderflow("append", 2)),
    }
}

pub fn slice(e: &mut Engine) -> EngineResult<()> {
    let end = e.stack.pop_int()?;
    let start = e.stack.pop_int()?;
    let d = e
        .stack
        .pop()
        .ok_or(EngineError::StackUnderflow("slice", 3))?;
    let len = d.len() as i32;
    if start > len || end > len {
        return Err(EngineError::OutOfRange);
    }
    let out = if end < 0 && start < 0 {
        d
    } else if end >= 0 && start >= 0 {
        if start > end {
            return Err(EngineError::StartGreaterThanEnd);
        }
        d[start as usize..end as usize].to_vec()
    } else if end < 0 {
        d[start as usize..].to_vec()
    } else {
        d[..end as usize].to_vec()
    };
    e.stack.push(out);
    Ok(())
}

/// Composes with `slice`: `-1`, `swap`, `slice`.
pub fn left(e: &mut Engine) -> EngineResult<()> {
    e.stack.push(b"-1".to_vec());
    swap(e)?;
    slice(e)
}

pub fn right(e: &mut Engine) -> EngineResult<()> {
    let c = e.stack.pop_int()?;
    let t = e
        .stack
        .top()
        .ok_or(EngineError::StackUnderflow("right", 2))?
        .len() as i32;
    e.stack.push((t - c).to_string().into_bytes());
    e.stack.push(t.to_string().into_bytes());
    slice(e)
}

pub fn len(e: &mut Engine) -> EngineResult<()> {
    let top = e.stack.top().ok_or(EngineError::StackUnderflow("len", 1))?;
    e.stack.push(top.len().to_string().into_bytes());
    Ok(())
}

pub fn snip(e: &mut Engine) -> EngineResult<()> {
    let pos = e.stack.pop_int()?;
    let d = e.stack.pop().ok_or(EngineError::StackUnderflow("snip", 2))?;
    let len = d.len() as i32;
    if pos >= len {
        let tail = d[d.len()..].to_vec();
        e.stack.push(d);
        e.stack.push(tail);
    } else if pos <= 0 {
        let head = d[..0].to_vec();
        e.stack.push(head);
        e.stack.push(d);
    } else {
        let (head, tail) = d.split_at(pos as usize);
        e.stack.push(head.to_vec());
        e.stack.push(tail.to_vec());
    }
    Ok(())
}

pub fn eq(e: &mut Engine) -> EngineResult<()> {
    let val1 = e.stack.pop();
    let val2 = e.stack.pop();
    match (val1, val2) {
        (Some(v1), Some(v2)) => {
            if v1 != v2 {
                return Err(EngineError::NotEqual);
            }
            Ok(())
        }
        _ => Err(EngineError::StackUnderflow("eq", 2)),
    }
}

pub fn neq(e: &mut Engine) -> EngineResult<()> {
    let val1 = e.stack.pop();
    let val2 = e.stack.pop();
    match (val1, val2) {
        (Some(v1), Some(v2)) => {
            if v1 == v2 {
                return Err(EngineError::UnexpectedlyEqual);
            }
            Ok(())
        }
        _ => Err(EngineError::StackUnderflow("neq", 2)),
    }
}

pub fn call(e: &mut Engine) -> EngineResult<()> {
    let name = e.stack.pop_string()?;
    let recipe = e
        .get_variable(&name)
        .ok_or_else(|| EngineError::MissingRecipe(name.clone()))?
        .to_vec();
    let text = String::from_utf8_lossy(&recipe).into_owned();
    let trimmed = text.strip_prefix('/').unwrap_or(&text);
    let tokens: Vec<String> = if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').map(str::to_owned).collect()
    };
    e.exec_nested(&tokens)
}
