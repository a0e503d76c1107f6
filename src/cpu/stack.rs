use crate::error::StackError;

/// Return addresses for `2NNN` / `00EE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    values: Vec<u16>,
}

pub const CAPACITY: usize = 16;

impl Stack {
    pub fn new() -> Self {
        Self {
            values: Vec::with_capacity(CAPACITY),
        }
    }

    /// Leaves the stack untouched on overflow.
    pub fn push(&mut self, value: u16) -> Result<(), StackError> {
        if self.values.len() >= CAPACITY {
            return Err(StackError::Overflow);
        }
        self.values.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, StackError> {
        self.values.pop().ok_or(StackError::Underflow)
    }

    /// Number of occupied slots, i.e. the stack pointer.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Oldest entry first.
    pub fn as_slice(&self) -> &[u16] {
        &self.values
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifo_order() {
        let mut stack = Stack::new();
        stack.push(0x202).unwrap();
        stack.push(0x304).unwrap();
        assert_eq!(stack.pop(), Ok(0x304));
        assert_eq!(stack.pop(), Ok(0x202));
    }

    #[test]
    fn overflow_after_capacity() {
        let mut stack = Stack::new();
        for i in 0..CAPACITY as u16 {
            stack.push(i).unwrap();
        }
        assert_eq!(stack.push(0xfff), Err(StackError::Overflow));
        assert_eq!(stack.len(), CAPACITY);
        assert_eq!(stack.pop(), Ok(CAPACITY as u16 - 1));
    }

    #[test]
    fn underflow_when_empty() {
        let mut stack = Stack::new();
        assert_eq!(stack.pop(), Err(StackError::Underflow));
        assert!(stack.is_empty());
    }
}
